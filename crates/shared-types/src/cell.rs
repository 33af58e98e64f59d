//! # Cell Helpers
//!
//! Small conveniences over `tonlib_core::cell`: hashes as plain byte arrays,
//! the empty cell, and fixed-width fields the ledger layouts use.

use crate::errors::{CellError, CellResult};
use num_bigint::BigUint;
use tonlib_core::cell::{Cell, CellBuilder, CellParser};

/// Maximum data bits in one cell.
pub const MAX_CELL_BITS: usize = 1023;

/// Maximum references in one cell.
pub const MAX_CELL_REFS: usize = 4;

/// Largest amount `VarUInteger 16` can carry (15 length-prefixed bytes).
pub const MAX_COINS: u128 = (1 << 120) - 1;

/// 256-bit representation hash.
pub type CellHash = [u8; 32];

/// Accessors the wallet layers use on every cell.
pub trait CellExt {
    /// Representation hash as raw bytes.
    fn repr_hash(&self) -> CellHash;

    /// Representation hash as lowercase hex.
    fn hash_hex(&self) -> String {
        hex::encode(self.repr_hash())
    }

    /// True for the cell with no bits and no references.
    fn is_empty_cell(&self) -> bool;
}

impl CellExt for Cell {
    fn repr_hash(&self) -> CellHash {
        let mut hash = [0u8; 32];
        hash.copy_from_slice(&self.cell_hash().as_slice()[..]);
        hash
    }

    fn is_empty_cell(&self) -> bool {
        self.bit_len() == 0 && self.references().is_empty()
    }
}

/// The cell with no data and no references.
pub fn empty_cell() -> Cell {
    Cell::default()
}

/// Append a 256-bit field.
pub fn store_u256(builder: &mut CellBuilder, value: &[u8; 32]) -> CellResult<()> {
    builder.store_slice(value)?;
    Ok(())
}

/// Read a 256-bit field.
pub fn load_u256(parser: &mut CellParser) -> CellResult<[u8; 32]> {
    let bytes = parser.load_bytes(32)?;
    let mut value = [0u8; 32];
    value.copy_from_slice(&bytes);
    Ok(value)
}

/// Append a coin amount.
pub fn store_coins(builder: &mut CellBuilder, value: u128) -> CellResult<()> {
    if value > MAX_COINS {
        return Err(CellError::CoinsOverflow(value));
    }
    builder.store_coins(&BigUint::from(value))?;
    Ok(())
}

/// Read a coin amount.
pub fn load_coins(parser: &mut CellParser) -> CellResult<u128> {
    let value = parser.load_coins()?;
    u128::try_from(&value)
        .map_err(|_| CellError::Codec(format!("coin amount {value} does not fit in 128 bits")))
}
