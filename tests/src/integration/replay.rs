//! # Replay Protection Flows
//!
//! Each envelope is valid for exactly one seqno.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{owner, recipient, wallet};
    use crate::ledger::InMemoryLedger;
    use async_trait::async_trait;
    use mw_wallet::{
        wallet_code, wallet_data, AccountState, GatewayError, LedgerGateway,
        TransferIntent, WalletApi, WalletConfig, WalletError, WalletService,
    };
    use shared_types::Address;
    use std::sync::Arc;
    use tokio::sync::Barrier;

    /// Holds every state read until `parties` reads have happened, so that
    /// concurrent senders all observe the same seqno.
    #[derive(Clone)]
    struct SynchronizedReads {
        ledger: InMemoryLedger,
        barrier: Arc<Barrier>,
    }

    #[async_trait]
    impl LedgerGateway for SynchronizedReads {
        async fn fetch_state(&self, address: &Address) -> Result<AccountState, GatewayError> {
            let state = self.ledger.fetch_state(address).await;
            self.barrier.wait().await;
            state
        }

        async fn submit_external(
            &self,
            address: &Address,
            message: Vec<u8>,
        ) -> Result<(), GatewayError> {
            self.ledger.submit_external(address, message).await
        }
    }

    #[tokio::test]
    async fn test_stale_envelope_is_rejected() {
        let ledger = InMemoryLedger::new();
        let wallet = wallet(&ledger);
        wallet.send_transfers(&owner(), vec![]).await.unwrap();

        // signed against seqno 1, then overtaken
        let stale = wallet.prepare(&owner(), &[]).await.unwrap();
        wallet.send_transfers(&owner(), vec![]).await.unwrap();

        let err = ledger
            .submit_external(wallet.address(), stale.to_boc().unwrap())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            GatewayError::SeqnoMismatch {
                submitted: 2,
                expected: 3
            }
        );
        assert_eq!(wallet.get_seqno().await.unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_resubmission_is_rejected() {
        let ledger = InMemoryLedger::new();
        let wallet = wallet(&ledger);
        let prepared = wallet.prepare(&owner(), &[]).await.unwrap();
        let boc = prepared.to_boc().unwrap();

        ledger
            .submit_external(wallet.address(), boc.clone())
            .await
            .unwrap();
        assert!(matches!(
            ledger.submit_external(wallet.address(), boc).await,
            Err(GatewayError::SeqnoMismatch { .. })
        ));
        assert_eq!(ledger.accepted_count(), 1);
    }

    #[tokio::test]
    async fn test_seqno_wraps_at_u16_max() {
        let ledger = InMemoryLedger::new();
        let wallet = wallet(&ledger);
        let data = Arc::new(wallet_data(owner().public_key().as_bytes(), 0xFFFF).unwrap());
        ledger.set_account(
            *wallet.address(),
            AccountState::active(wallet_code().unwrap(), data),
        );

        let envelope = wallet.send_transfers(&owner(), vec![]).await.unwrap();
        assert_eq!(envelope.seqno, 0);
        assert_eq!(wallet.get_seqno().await.unwrap(), Some(0));

        wallet.send_transfers(&owner(), vec![]).await.unwrap();
        assert_eq!(wallet.get_seqno().await.unwrap(), Some(1));
    }

    #[tokio::test]
    async fn test_concurrent_sends_accept_exactly_one() {
        let ledger = InMemoryLedger::new();
        wallet(&ledger).send_transfers(&owner(), vec![]).await.unwrap();

        let gateway = SynchronizedReads {
            ledger: ledger.clone(),
            barrier: Arc::new(Barrier::new(2)),
        };
        let wallet = Arc::new(
            WalletService::from_public_key(
                gateway,
                owner().public_key().as_bytes(),
                WalletConfig::default(),
            )
            .unwrap(),
        );

        let first = {
            let wallet = Arc::clone(&wallet);
            tokio::spawn(async move {
                wallet
                    .send_transfers(&owner(), vec![TransferIntent::new(recipient(1), 1)])
                    .await
            })
        };
        let second = {
            let wallet = Arc::clone(&wallet);
            tokio::spawn(async move {
                wallet
                    .send_transfers(&owner(), vec![TransferIntent::new(recipient(2), 2)])
                    .await
            })
        };

        let results = [first.await.unwrap(), second.await.unwrap()];
        let accepted = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(accepted, 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(WalletError::ReplayMismatch {
                submitted: 2,
                expected: 3
            })
        )));
        assert_eq!(ledger.accepted_count(), 2);
        assert_eq!(ledger.executed().len(), 1);
    }
}
