//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of a wallet instance.

use crate::domain::entities::{PublicKey, SignedEnvelope, TransferIntent};
use crate::domain::errors::WalletError;
use shared_crypto::Ed25519KeyPair;
use shared_types::{Address, ArcCell};

/// Wallet API.
///
/// Every send reads the contract state first, so two sends started from the
/// same state produce envelopes for the same seqno and only one of them can
/// be accepted. Callers that need several transfers in one step should put
/// them in one call.
#[async_trait::async_trait]
pub trait WalletApi: Send + Sync {
    // =========================================================================
    // Identity
    // =========================================================================

    /// Address of the wallet contract.
    fn address(&self) -> &Address;

    // =========================================================================
    // Sends
    // =========================================================================

    /// Sign and submit one message carrying all `transfers`, in order.
    async fn send_transfers(
        &self,
        keypair: &Ed25519KeyPair,
        transfers: Vec<TransferIntent>,
    ) -> Result<SignedEnvelope, WalletError>;

    /// Sign and submit one message replacing the wallet's code.
    async fn send_set_code(
        &self,
        keypair: &Ed25519KeyPair,
        code: ArcCell,
    ) -> Result<SignedEnvelope, WalletError>;

    // =========================================================================
    // Queries
    // =========================================================================

    /// Raw data cell of the deployed wallet, `None` when not deployed.
    async fn get_data(&self) -> Result<Option<ArcCell>, WalletError>;

    /// Stored public key, `None` when not deployed.
    async fn get_public_key(&self) -> Result<Option<PublicKey>, WalletError>;

    /// Stored seqno, `None` when not deployed.
    async fn get_seqno(&self) -> Result<Option<u16>, WalletError>;
}
