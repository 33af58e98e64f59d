//! # Domain Entities
//!
//! Core data structures of the wallet protocol.

use serde::{Deserialize, Serialize};
use shared_crypto::Ed25519Signature;
use shared_types::{
    Address, ArcCell, Cell, CellBuilder, CellExt, CellHash, CellResult, StateInit,
};

/// Raw Ed25519 public key as stored in contract data.
pub type PublicKey = [u8; 32];

// =============================================================================
// Wallet State
// =============================================================================

/// Key and replay counter decoded from the first 272 bits of contract data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WalletState {
    /// Key every envelope must be signed with
    pub public_key: PublicKey,
    /// Replay counter the contract expects to be advanced
    pub seqno: u16,
}

/// Lifecycle status of an account on the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Active,
    Uninitialized,
    Frozen,
}

/// Account snapshot returned by the state provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountState {
    pub status: AccountStatus,
    pub code: Option<ArcCell>,
    pub data: Option<ArcCell>,
}

impl AccountState {
    pub fn active(code: ArcCell, data: ArcCell) -> Self {
        Self {
            status: AccountStatus::Active,
            code: Some(code),
            data: Some(data),
        }
    }

    pub fn uninitialized() -> Self {
        Self {
            status: AccountStatus::Uninitialized,
            code: None,
            data: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

// =============================================================================
// Actions
// =============================================================================

/// A request that the wallet emit one outbound message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferIntent {
    pub recipient: Address,
    /// Amount in the ledger's smallest unit
    pub value: u128,
    /// Code and data to deploy at the recipient
    pub init: Option<StateInit>,
    /// Opaque payload handed to the recipient
    pub body: Option<ArcCell>,
}

impl TransferIntent {
    pub fn new(recipient: Address, value: u128) -> Self {
        Self {
            recipient,
            value,
            init: None,
            body: None,
        }
    }

    pub fn with_body(mut self, body: ArcCell) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_init(mut self, init: StateInit) -> Self {
        self.init = Some(init);
        self
    }
}

/// One privileged operation requested from the wallet contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Send value (and optionally a payload and init) to a recipient.
    Transfer(TransferIntent),
    /// Replace the wallet's own code.
    SetCode(ArcCell),
}

/// An action as found in an encoded chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutAction {
    SendMessage { mode: u8, message: ArcCell },
    SetCode { code: ArcCell },
}

// =============================================================================
// Envelope
// =============================================================================

/// Signature over an inner message, together with that message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignedEnvelope {
    pub signature: Ed25519Signature,
    /// Inner message: action chain, next wallet data, previous data
    pub inner: ArcCell,
    /// Seqno the inner message commits the contract to
    pub seqno: u16,
}

impl SignedEnvelope {
    /// Hash that was signed.
    pub fn signed_hash(&self) -> CellHash {
        self.inner.repr_hash()
    }

    /// 512 signature bits followed by a reference to the inner message.
    pub fn to_cell(&self) -> CellResult<Cell> {
        let mut builder = CellBuilder::new();
        builder
            .store_slice(self.signature.as_bytes())?
            .store_reference(&self.inner)?;
        Ok(builder.build()?)
    }
}
