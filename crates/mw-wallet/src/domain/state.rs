//! # Wallet State
//!
//! The contract's persistent data begins with the owner key and the replay
//! counter. Anything after those 272 bits belongs to the contract and is
//! never interpreted here.
//!
//! ```text
//! public_key:bits256 | seqno:u16 | ...
//! ```

use crate::domain::entities::{AccountState, PublicKey, WalletState};
use crate::domain::errors::WalletError;
use shared_types::{
    load_u256, store_u256, ArcCell, Cell, CellBuilder, CellError, CellResult,
};

/// Bits of wallet data that carry the key and the seqno.
pub const WALLET_DATA_BITS: usize = 256 + 16;

/// Decode key and seqno from a data cell.
pub fn parse_wallet_data(data: &ArcCell) -> Result<WalletState, WalletError> {
    if data.bit_len() < WALLET_DATA_BITS {
        return Err(WalletError::MalformedState {
            bits: data.bit_len(),
            required: WALLET_DATA_BITS,
        });
    }
    let mut parser = data.parser();
    let public_key = load_u256(&mut parser)?;
    let seqno = parser.load_u32(16).map_err(CellError::from)? as u16;
    Ok(WalletState { public_key, seqno })
}

/// Data cell of an active account, validated to hold key and seqno.
///
/// Returns `None` for any account that is not active.
pub fn active_data(account: &AccountState) -> Result<Option<ArcCell>, WalletError> {
    if !account.is_active() {
        return Ok(None);
    }
    let data = account.data.clone().ok_or(WalletError::MalformedState {
        bits: 0,
        required: WALLET_DATA_BITS,
    })?;
    parse_wallet_data(&data)?;
    Ok(Some(data))
}

/// Key and seqno of an active account, `None` otherwise.
pub fn read_state(account: &AccountState) -> Result<Option<WalletState>, WalletError> {
    active_data(account)?
        .map(|data| parse_wallet_data(&data))
        .transpose()
}

/// Data a freshly deployed wallet starts with.
pub fn initial_data(public_key: &PublicKey) -> CellResult<Cell> {
    wallet_data(public_key, 0)
}

/// Data cell holding exactly `public_key` and `seqno`.
pub fn wallet_data(public_key: &PublicKey, seqno: u16) -> CellResult<Cell> {
    let mut b = CellBuilder::new();
    store_u256(&mut b, public_key)?;
    b.store_u32(16, u32::from(seqno))?;
    Ok(b.build()?)
}
