//! # Wallet Errors
//!
//! Every failure the client can report, as distinguishable kinds. None of
//! them is retried internally.

use shared_types::{CellError, TonCellError};
use thiserror::Error;

/// Errors that can occur while building, signing or submitting wallet
/// messages.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// An action does not fit the cell codec's bit or reference limits.
    #[error("Action #{action} exceeds cell capacity: {source}")]
    Capacity {
        /// Zero-based position of the offending action in the request
        action: usize,
        source: CellError,
    },

    /// More actions than one message can carry.
    #[error("Too many actions: {count} (maximum {max})")]
    TooManyActions { count: usize, max: usize },

    /// The state provider could not be reached.
    #[error("Wallet state unavailable: {0}")]
    StateUnavailable(String),

    /// Active contract data is too short to hold key and seqno.
    #[error("Malformed wallet state: data holds {bits} bits, at least {required} required")]
    MalformedState { bits: usize, required: usize },

    /// The contract rejected the envelope because its seqno moved on.
    #[error("Replay mismatch: envelope carried seqno {submitted}, contract expects {expected}")]
    ReplayMismatch { submitted: u16, expected: u16 },

    /// The wallet is neither deployed nor deployable from known init data.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The signing key is not the key stored in the contract.
    #[error("Signing key {actual} does not match wallet key {expected}")]
    KeyMismatch { expected: String, actual: String },

    /// An action fragment could not be decoded.
    #[error("Unknown action opcode {opcode:#010x}")]
    UnknownAction { opcode: u32 },

    /// The submission collaborator refused or failed to take the message.
    #[error("Submission failed: {0}")]
    Submission(String),

    /// Any other codec failure.
    #[error("Codec error: {0}")]
    Codec(#[from] CellError),
}

impl From<TonCellError> for WalletError {
    fn from(err: TonCellError) -> Self {
        WalletError::Codec(CellError::from(err))
    }
}
