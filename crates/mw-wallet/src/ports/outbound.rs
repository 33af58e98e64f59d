//! # Outbound Ports (Driven Ports / SPI)
//!
//! The ledger collaborators the wallet depends on. Transport, retries and
//! fee estimation live behind this boundary.

use crate::domain::entities::AccountState;
use shared_types::Address;
use thiserror::Error;

/// Error reported by the ledger gateway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The ledger could not be reached
    #[error("Ledger unavailable: {0}")]
    Unavailable(String),

    /// The message was refused
    #[error("Message rejected: {reason}")]
    Rejected { reason: String },

    /// The contract's seqno no longer matches the envelope
    #[error("Seqno mismatch: submitted {submitted}, expected {expected}")]
    SeqnoMismatch { submitted: u16, expected: u16 },
}

/// Gateway to the ledger.
///
/// Implementations must be thread-safe (`Send + Sync`).
#[async_trait::async_trait]
pub trait LedgerGateway: Send + Sync {
    /// Fetch the current status, code and data of an account.
    ///
    /// # Errors
    /// * `GatewayError::Unavailable` - The ledger could not be queried
    async fn fetch_state(&self, address: &Address) -> Result<AccountState, GatewayError>;

    /// Submit a serialized external message (bag of cells) to `address`.
    ///
    /// # Errors
    /// * `GatewayError::Rejected` - The message failed validation
    /// * `GatewayError::SeqnoMismatch` - The envelope's seqno is stale
    async fn submit_external(&self, address: &Address, message: Vec<u8>)
        -> Result<(), GatewayError>;
}
