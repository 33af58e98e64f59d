//! # Signed Envelope
//!
//! The inner message binds an action chain to the contract's current data:
//!
//! ```text
//! inner = cell{ ^actions | ^next_data | <current data, bits and refs> }
//! next_data = public_key:bits256 | seqno + 1:u16
//! ```
//!
//! The contract accepts the message only if the quoted data equals what it
//! stores, which makes a signed envelope valid for exactly one seqno.
//! Data past the key and seqno is quoted verbatim.

use crate::domain::entities::SignedEnvelope;
use crate::domain::errors::WalletError;
use crate::domain::state::{parse_wallet_data, wallet_data};
use shared_crypto::Ed25519KeyPair;
use shared_types::{ArcCell, Cell, CellBuilder, CellExt};
use std::sync::Arc;

/// Seqno the contract holds after accepting a message at `current`.
pub fn next_seqno(current: u16) -> u16 {
    current.wrapping_add(1)
}

/// Build the inner message for `chain` against the contract's `data`.
///
/// Returns the message and the seqno it advances the contract to.
pub fn build_inner_message(chain: ArcCell, data: &ArcCell) -> Result<(Cell, u16), WalletError> {
    let state = parse_wallet_data(data)?;
    let seqno = next_seqno(state.seqno);

    let mut b = CellBuilder::new();
    b.store_reference(&chain)?
        .store_child(wallet_data(&state.public_key, seqno)?)?
        .store_cell(data)?;
    Ok((b.build()?, seqno))
}

/// Sign the representation hash of `inner`.
pub fn sign_inner(inner: Cell, seqno: u16, keypair: &Ed25519KeyPair) -> SignedEnvelope {
    let signature = keypair.sign(&inner.repr_hash());
    SignedEnvelope {
        signature,
        inner: Arc::new(inner),
        seqno,
    }
}

/// Build and sign in one step.
pub fn seal(
    chain: ArcCell,
    data: &ArcCell,
    keypair: &Ed25519KeyPair,
) -> Result<SignedEnvelope, WalletError> {
    let (inner, seqno) = build_inner_message(chain, data)?;
    Ok(sign_inner(inner, seqno, keypair))
}
