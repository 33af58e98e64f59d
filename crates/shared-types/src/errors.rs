//! # Error Types
//!
//! Errors raised by the ledger layouts. Failures inside `tonlib_core` are
//! carried as [`CellError::Codec`] with the library's message.

use thiserror::Error;
use tonlib_core::cell::TonCellError;

/// Errors that can occur while building, reading, or serializing cells.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CellError {
    /// The underlying cell codec refused a read or write (capacity, bounds).
    #[error("Cell codec error: {0}")]
    Codec(String),

    /// A coin amount needs more than 15 bytes.
    #[error("Coin amount {0} exceeds the 120-bit coin range")]
    CoinsOverflow(u128),

    /// Address text or wire form is malformed.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Bag-of-cells bytes are malformed.
    #[error("Invalid bag of cells: {0}")]
    InvalidBoc(String),

    /// A well-formed but unsupported construct (anycast, libraries, ...).
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// A header did not carry the expected constructor tag.
    #[error("Unexpected tag: expected {expected:#b}, found {found:#b}")]
    UnexpectedTag { expected: u64, found: u64 },
}

impl From<TonCellError> for CellError {
    fn from(err: TonCellError) -> Self {
        CellError::Codec(err.to_string())
    }
}

/// Result alias for cell codec operations.
pub type CellResult<T> = Result<T, CellError>;
