//! # Wallet Service
//!
//! Application service layer that implements the `WalletApi` trait.
//!
//! ## Architecture
//!
//! This is the hexagonal "application service" that:
//! - Implements the inbound port (`WalletApi`)
//! - Uses the outbound port (`LedgerGateway`) to read state and submit
//! - Delegates encoding and signing to the domain layer
//!
//! Every send is one pass: encode actions, read state, bind the seqno,
//! sign, package and submit. Nothing is cached between calls.

use crate::config::WalletConfig;
use crate::domain::actions::encode_actions;
use crate::domain::chain::build_action_chain;
use crate::domain::entities::{
    AccountState, Action, PublicKey, SignedEnvelope, TransferIntent, WalletState,
};
use crate::domain::envelope::seal;
use crate::domain::errors::WalletError;
use crate::domain::program::wallet_state_init;
use crate::domain::state::{active_data, parse_wallet_data, read_state};
use crate::ports::inbound::WalletApi;
use crate::ports::outbound::{GatewayError, LedgerGateway};
use shared_crypto::Ed25519KeyPair;
use shared_types::{Address, ArcCell, ExternalMessage, StateInit};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Wallet bound to one contract address.
///
/// Holds only immutable configuration and the gateway handle, so it can be
/// shared across tasks behind an `Arc`.
pub struct WalletService<G: LedgerGateway> {
    gateway: G,
    address: Address,
    init: Option<StateInit>,
    config: WalletConfig,
}

/// A signed message ready for submission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedMessage {
    pub envelope: SignedEnvelope,
    pub message: ExternalMessage,
}

impl PreparedMessage {
    /// Bag-of-cells bytes as handed to the gateway.
    pub fn to_boc(&self) -> Result<Vec<u8>, WalletError> {
        Ok(self.message.to_boc()?)
    }
}

impl<G: LedgerGateway> WalletService<G> {
    /// Wallet at a known address. It cannot deploy itself.
    pub fn from_address(gateway: G, address: Address, config: WalletConfig) -> Self {
        Self {
            gateway,
            address,
            init: None,
            config,
        }
    }

    /// Wallet owned by `public_key`, at the address derived from the
    /// program image and initial data in the configured workchain.
    pub fn from_public_key(
        gateway: G,
        public_key: &PublicKey,
        config: WalletConfig,
    ) -> Result<Self, WalletError> {
        let init = wallet_state_init(public_key)?;
        let address = init.address(config.workchain)?;
        debug!(%address, workchain = config.workchain, "Derived wallet address");
        Ok(Self {
            gateway,
            address,
            init: Some(init),
            config,
        })
    }

    /// Code and data the wallet deploys with, when known.
    pub fn init(&self) -> Option<&StateInit> {
        self.init.as_ref()
    }

    pub fn config(&self) -> &WalletConfig {
        &self.config
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Build and sign a message for `actions` without submitting it.
    pub async fn prepare(
        &self,
        keypair: &Ed25519KeyPair,
        actions: &[Action],
    ) -> Result<PreparedMessage, WalletError> {
        let fragments = encode_actions(actions)?;
        let chain = build_action_chain(&fragments)?;

        let account = self.account().await?;
        let (data, deploy) = match active_data(&account)? {
            Some(data) => (data, false),
            None => (self.initial_data()?, true),
        };
        let state = parse_wallet_data(&data)?;
        self.check_key(keypair, &state.public_key)?;

        let envelope = seal(chain, &data, keypair)?;
        debug!(
            address = %self.address,
            seqno = envelope.seqno,
            actions = actions.len(),
            deploy,
            "Signed wallet message"
        );

        let init = if deploy { self.init.clone() } else { None };
        let message = ExternalMessage::new(self.address, init, Arc::new(envelope.to_cell()?));
        Ok(PreparedMessage { envelope, message })
    }

    /// Prepare and submit a message carrying `actions`.
    pub async fn send_actions(
        &self,
        keypair: &Ed25519KeyPair,
        actions: Vec<Action>,
    ) -> Result<SignedEnvelope, WalletError> {
        let prepared = self.prepare(keypair, &actions).await?;
        let boc = prepared.to_boc()?;

        self.gateway
            .submit_external(&self.address, boc)
            .await
            .map_err(|e| match e {
                GatewayError::SeqnoMismatch {
                    submitted,
                    expected,
                } => WalletError::ReplayMismatch {
                    submitted,
                    expected,
                },
                other => WalletError::Submission(other.to_string()),
            })
            .inspect_err(|e| warn!(address = %self.address, error = %e, "Submission failed"))?;

        info!(
            address = %self.address,
            seqno = prepared.envelope.seqno,
            actions = actions.len(),
            hash = %hex::encode(prepared.envelope.signed_hash()),
            "Submitted wallet message"
        );
        Ok(prepared.envelope)
    }

    fn initial_data(&self) -> Result<ArcCell, WalletError> {
        let init = self.init.as_ref().ok_or_else(|| {
            WalletError::Configuration(format!(
                "wallet {} is not deployed and its init is unknown",
                self.address
            ))
        })?;
        init.data
            .clone()
            .ok_or_else(|| WalletError::Configuration("wallet init carries no data".to_string()))
    }

    fn check_key(&self, keypair: &Ed25519KeyPair, stored: &PublicKey) -> Result<(), WalletError> {
        let signing = keypair.public_key();
        if signing.as_bytes() == stored {
            return Ok(());
        }
        let expected = hex::encode(stored);
        let actual = hex::encode(signing.as_bytes());
        if self.config.strict_key_check {
            return Err(WalletError::KeyMismatch { expected, actual });
        }
        warn!(
            address = %self.address,
            %expected,
            %actual,
            "Signing key differs from the stored key; the contract will reject this message"
        );
        Ok(())
    }

    async fn account(&self) -> Result<AccountState, WalletError> {
        self.gateway
            .fetch_state(&self.address)
            .await
            .map_err(|e| WalletError::StateUnavailable(e.to_string()))
    }

    async fn wallet_state(&self) -> Result<Option<WalletState>, WalletError> {
        read_state(&self.account().await?)
    }
}

#[async_trait::async_trait]
impl<G: LedgerGateway> WalletApi for WalletService<G> {
    fn address(&self) -> &Address {
        &self.address
    }

    async fn send_transfers(
        &self,
        keypair: &Ed25519KeyPair,
        transfers: Vec<TransferIntent>,
    ) -> Result<SignedEnvelope, WalletError> {
        let actions = transfers.into_iter().map(Action::Transfer).collect();
        self.send_actions(keypair, actions).await
    }

    async fn send_set_code(
        &self,
        keypair: &Ed25519KeyPair,
        code: ArcCell,
    ) -> Result<SignedEnvelope, WalletError> {
        self.send_actions(keypair, vec![Action::SetCode(code)]).await
    }

    async fn get_data(&self) -> Result<Option<ArcCell>, WalletError> {
        active_data(&self.account().await?)
    }

    async fn get_public_key(&self) -> Result<Option<PublicKey>, WalletError> {
        Ok(self.wallet_state().await?.map(|state| state.public_key))
    }

    async fn get_seqno(&self) -> Result<Option<u16>, WalletError> {
        Ok(self.wallet_state().await?.map(|state| state.seqno))
    }
}
