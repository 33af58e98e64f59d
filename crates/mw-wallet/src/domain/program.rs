//! # Wallet Program
//!
//! Fixed code image of the minimal wallet contract. Its hash, together with
//! the initial data, determines the address of every wallet deployed from
//! a public key.
//!
//! The program checks the signature over the inner message against the key
//! in its data, requires the inner message to quote the data it currently
//! holds, stores the proposed next data, and hands the action chain to the
//! ledger's action phase.

use crate::domain::entities::PublicKey;
use crate::domain::state::initial_data;
use shared_types::{from_boc_hex, ArcCell, CellResult, StateInit};
use std::sync::Arc;

/// Bag-of-cells image of the wallet program.
pub const WALLET_CODE_BOC_HEX: &str =
    "B5EE9C72010101010022000040DDD40120F90059D0D4D4ED44D0C705DD20D0D70BFF4430F910DDF800ED54ED55";

/// Decode the wallet program.
pub fn wallet_code() -> CellResult<ArcCell> {
    from_boc_hex(WALLET_CODE_BOC_HEX)
}

/// Code and initial data for a wallet owned by `public_key`.
pub fn wallet_state_init(public_key: &PublicKey) -> CellResult<StateInit> {
    Ok(StateInit::new(
        wallet_code()?,
        Arc::new(initial_data(public_key)?),
    ))
}
