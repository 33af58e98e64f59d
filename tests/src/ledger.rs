//! # In-Memory Ledger
//!
//! Implements `LedgerGateway` and runs the wallet contract's acceptance
//! logic natively on every submitted external message:
//!
//! 1. Deploy from the attached init when the account is not active
//! 2. Check the signature against the key in the stored data
//! 3. Require the inner message to quote the stored data exactly
//! 4. Store the proposed next data and run the action chain
//!
//! A rejected message leaves the ledger untouched. The contract logic runs
//! regardless of what code cell the account holds.

use async_trait::async_trait;
use mw_wallet::{
    decode_action_chain, decode_internal_message, next_seqno, parse_wallet_data, AccountState,
    AccountStatus, GatewayError, LedgerGateway, OutAction, TransferIntent,
};
use parking_lot::Mutex;
use shared_crypto::{Ed25519PublicKey, Ed25519Signature};
use shared_types::{Address, ArcCell, CellExt, ExternalMessage};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::debug;

/// An action the emulated contract carried out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExecutedAction {
    Transfer {
        wallet: Address,
        mode: u8,
        intent: TransferIntent,
    },
    SetCode {
        wallet: Address,
        code: ArcCell,
    },
}

#[derive(Default)]
struct LedgerInner {
    accounts: Mutex<HashMap<Address, AccountState>>,
    executed: Mutex<Vec<ExecutedAction>>,
    accepted: Mutex<Vec<Address>>,
    unavailable: AtomicBool,
}

/// Cloneable handle to a shared in-memory ledger.
#[derive(Clone, Default)]
pub struct InMemoryLedger {
    inner: Arc<LedgerInner>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `address`; unknown accounts are uninitialized.
    pub fn account(&self, address: &Address) -> AccountState {
        self.inner
            .accounts
            .lock()
            .get(address)
            .cloned()
            .unwrap_or_else(AccountState::uninitialized)
    }

    /// Overwrite the state of `address`.
    pub fn set_account(&self, address: Address, state: AccountState) {
        self.inner.accounts.lock().insert(address, state);
    }

    /// Every action executed so far, in execution order.
    pub fn executed(&self) -> Vec<ExecutedAction> {
        self.inner.executed.lock().clone()
    }

    /// Number of accepted external messages.
    pub fn accepted_count(&self) -> usize {
        self.inner.accepted.lock().len()
    }

    /// Make every gateway call fail with `Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), GatewayError> {
        if self.inner.unavailable.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("ledger offline".to_string()));
        }
        Ok(())
    }

    fn apply(&self, address: &Address, boc: &[u8]) -> Result<(), GatewayError> {
        let message = ExternalMessage::from_boc(boc).map_err(reject)?;
        if message.dest != *address {
            return Err(rejected(format!(
                "message addressed to {} submitted to {address}",
                message.dest
            )));
        }

        let mut accounts = self.inner.accounts.lock();
        let current = accounts
            .get(address)
            .cloned()
            .unwrap_or_else(AccountState::uninitialized);

        let (code, data) = if current.status == AccountStatus::Active {
            match (current.code, current.data) {
                (Some(code), Some(data)) => (code, data),
                _ => return Err(rejected("active account without code or data")),
            }
        } else {
            let init = message
                .init
                .as_ref()
                .ok_or_else(|| rejected("account is not active and no init was attached"))?;
            let derived = init.address(address.workchain).map_err(reject)?;
            if derived != *address {
                return Err(rejected("init does not hash to the destination address"));
            }
            match (init.code.clone(), init.data.clone()) {
                (Some(code), Some(data)) => (code, data),
                _ => return Err(rejected("init without code or data")),
            }
        };

        let (next_data, actions) = run_wallet(&data, &message.body)?;

        let mut code = code;
        let mut executed = Vec::with_capacity(actions.len());
        for action in actions {
            match action {
                OutAction::SendMessage { mode, message } => {
                    let intent = decode_internal_message(&message).map_err(reject)?;
                    executed.push(ExecutedAction::Transfer {
                        wallet: *address,
                        mode,
                        intent,
                    });
                }
                OutAction::SetCode { code: new_code } => {
                    code = Arc::clone(&new_code);
                    executed.push(ExecutedAction::SetCode {
                        wallet: *address,
                        code: new_code,
                    });
                }
            }
        }

        debug!(%address, actions = executed.len(), "Accepted external message");
        accounts.insert(*address, AccountState::active(code, next_data));
        self.inner.executed.lock().extend(executed);
        self.inner.accepted.lock().push(*address);
        Ok(())
    }
}

/// Wallet acceptance logic. Returns the data to store and the actions to
/// run.
fn run_wallet(
    data: &ArcCell,
    body: &ArcCell,
) -> Result<(ArcCell, Vec<OutAction>), GatewayError> {
    let stored = parse_wallet_data(data).map_err(reject)?;

    let mut envelope = body.parser();
    let signature: [u8; 64] = envelope
        .load_bytes(64)
        .map_err(reject)?
        .try_into()
        .map_err(|_| rejected("short signature"))?;
    let inner = envelope.next_reference().map_err(reject)?;

    let key = Ed25519PublicKey::from_bytes(stored.public_key).map_err(reject)?;
    key.verify(&inner.repr_hash(), &Ed25519Signature::from_bytes(signature))
        .map_err(|_| rejected("signature does not match stored key"))?;

    let mut parser = inner.parser();
    let chain = parser.next_reference().map_err(reject)?;
    let next_data = parser.next_reference().map_err(reject)?;
    let quoted = parser.load_remaining().map_err(reject)?;

    let proposed = parse_wallet_data(&next_data).map_err(reject)?;
    let expected = next_seqno(stored.seqno);
    if proposed.seqno != expected {
        return Err(GatewayError::SeqnoMismatch {
            submitted: proposed.seqno,
            expected,
        });
    }
    if quoted.repr_hash() != data.repr_hash() {
        return Err(rejected("quoted data differs from stored data"));
    }

    let actions = decode_action_chain(&chain).map_err(reject)?;
    Ok((next_data, actions))
}

fn rejected(reason: impl Into<String>) -> GatewayError {
    GatewayError::Rejected {
        reason: reason.into(),
    }
}

fn reject(error: impl std::fmt::Display) -> GatewayError {
    rejected(error.to_string())
}

#[async_trait]
impl LedgerGateway for InMemoryLedger {
    async fn fetch_state(&self, address: &Address) -> Result<AccountState, GatewayError> {
        self.check_available()?;
        Ok(self.account(address))
    }

    async fn submit_external(
        &self,
        address: &Address,
        message: Vec<u8>,
    ) -> Result<(), GatewayError> {
        self.check_available()?;
        self.apply(address, &message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_account_is_uninitialized() {
        let ledger = InMemoryLedger::new();
        let state = ledger.account(&Address::new(0, [1; 32]));
        assert_eq!(state.status, AccountStatus::Uninitialized);
        assert_eq!(ledger.accepted_count(), 0);
    }

    #[tokio::test]
    async fn test_rejects_garbage() {
        let ledger = InMemoryLedger::new();
        let err = ledger
            .submit_external(&Address::new(0, [1; 32]), vec![1, 2, 3])
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Rejected { .. }));
    }

    #[tokio::test]
    async fn test_offline() {
        let ledger = InMemoryLedger::new();
        ledger.set_unavailable(true);
        assert!(matches!(
            ledger.fetch_state(&Address::new(0, [1; 32])).await,
            Err(GatewayError::Unavailable(_))
        ));
    }
}
