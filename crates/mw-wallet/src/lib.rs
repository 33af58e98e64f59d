//! # Minimal Wallet Client
//!
//! Client side of the minimal wallet protocol: turns transfer and
//! code-replacement requests into one signed external message per call.
//!
//! ## Architecture
//!
//! This crate follows hexagonal architecture:
//! - **Domain Layer** (`domain/`): action encoding, chain construction,
//!   seqno binding and signing; no I/O
//! - **Ports Layer** (`ports/`): the wallet API and the ledger gateway
//! - **Service Layer** (`service.rs`): wires domain logic to ports
//!
//! ## Message layout
//!
//! ```text
//! external message -> envelope { signature:512 | ^inner }
//! inner            -> { ^actions | ^{key, seqno + 1} | current data }
//! ```
//!
//! ## Replay protection
//!
//! The contract accepts an envelope only if the data it quotes equals the
//! stored data, so each envelope is valid for exactly one seqno. Concurrent
//! sends from the same state race; at most one is accepted.

pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-export public API
pub use config::WalletConfig;
pub use domain::actions::{
    decode_action, decode_internal_message, encode_set_code, encode_transfer, DEFAULT_SEND_MODE,
    OP_SEND_MSG, OP_SET_CODE,
};
pub use domain::chain::{build_action_chain, decode_action_chain, MAX_ACTIONS};
pub use domain::entities::{
    AccountState, AccountStatus, Action, OutAction, PublicKey, SignedEnvelope, TransferIntent,
    WalletState,
};
pub use domain::envelope::{build_inner_message, next_seqno, seal};
pub use domain::errors::WalletError;
pub use domain::program::{wallet_code, wallet_state_init, WALLET_CODE_BOC_HEX};
pub use domain::state::{
    active_data, initial_data, parse_wallet_data, read_state, wallet_data, WALLET_DATA_BITS,
};
pub use ports::inbound::WalletApi;
pub use ports::outbound::{GatewayError, LedgerGateway};
pub use service::{PreparedMessage, WalletService};
