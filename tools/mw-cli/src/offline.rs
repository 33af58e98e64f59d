//! Gateway that answers state reads from a fixed snapshot and refuses
//! submission. Used to build messages without a ledger connection.

use async_trait::async_trait;
use mw_wallet::{AccountState, GatewayError, LedgerGateway};
use shared_types::Address;

pub struct OfflineGateway {
    state: AccountState,
}

impl OfflineGateway {
    pub fn new(state: AccountState) -> Self {
        Self { state }
    }
}

#[async_trait]
impl LedgerGateway for OfflineGateway {
    async fn fetch_state(&self, _address: &Address) -> Result<AccountState, GatewayError> {
        Ok(self.state.clone())
    }

    async fn submit_external(
        &self,
        _address: &Address,
        _message: Vec<u8>,
    ) -> Result<(), GatewayError> {
        Err(GatewayError::Unavailable(
            "offline gateway does not submit".to_string(),
        ))
    }
}
