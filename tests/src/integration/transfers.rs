//! # Transfer and Code Replacement Flows
//!
//! What the contract executes must match what was requested, in order.

#[cfg(test)]
mod tests {
    use super::super::fixtures::{comment, owner, recipient, wallet};
    use crate::ledger::{ExecutedAction, InMemoryLedger};
    use mw_wallet::{
        decode_action_chain, wallet_state_init, AccountState, Action, OutAction, TransferIntent,
        WalletApi, DEFAULT_SEND_MODE, OP_SEND_MSG, OP_SET_CODE,
    };
    use shared_types::{empty_cell, store_u256, CellBuilder, CellExt};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_transfer_is_executed_as_requested() {
        let ledger = InMemoryLedger::new();
        let wallet = wallet(&ledger);
        let intent = TransferIntent::new(recipient(9), 2_500_000_000).with_body(comment("rent"));

        let envelope = wallet
            .send_transfers(&owner(), vec![intent.clone()])
            .await
            .unwrap();

        // opcode and mode on the wire
        let chain = &envelope.inner.references()[0];
        assert_eq!(&chain.data()[..4], &OP_SEND_MSG.to_be_bytes());
        assert_eq!(chain.data()[4], DEFAULT_SEND_MODE);

        assert_eq!(
            ledger.executed(),
            vec![ExecutedAction::Transfer {
                wallet: *wallet.address(),
                mode: 3,
                intent,
            }]
        );
    }

    #[tokio::test]
    async fn test_transfer_with_init() {
        let ledger = InMemoryLedger::new();
        let wallet = wallet(&ledger);
        let child = wallet_state_init(&[0x33; 32]).unwrap();
        let intent = TransferIntent::new(child.address(0).unwrap(), 1).with_init(child);

        wallet
            .send_transfers(&owner(), vec![intent.clone()])
            .await
            .unwrap();
        match &ledger.executed()[..] {
            [ExecutedAction::Transfer { intent: got, .. }] => assert_eq!(got, &intent),
            other => panic!("unexpected actions {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_set_code_replaces_code() {
        let ledger = InMemoryLedger::new();
        let wallet = wallet(&ledger);
        wallet.send_transfers(&owner(), vec![]).await.unwrap();

        let mut new_code = CellBuilder::new();
        new_code.store_u32(32, 0xC0DE_0002).unwrap();
        let new_code = Arc::new(new_code.build().unwrap());

        let envelope = wallet
            .send_set_code(&owner(), new_code.clone())
            .await
            .unwrap();

        let chain = &envelope.inner.references()[0];
        assert_eq!(&chain.data()[..4], &OP_SET_CODE.to_be_bytes());
        assert_eq!(chain.bit_len(), 32);

        assert_eq!(ledger.account(wallet.address()).code, Some(new_code.clone()));
        assert_eq!(wallet.get_seqno().await.unwrap(), Some(2));
        assert!(matches!(
            ledger.executed().last(),
            Some(ExecutedAction::SetCode { code, .. }) if code == &new_code
        ));
    }

    #[tokio::test]
    async fn test_ten_transfers_keep_their_order() {
        let ledger = InMemoryLedger::new();
        let wallet = wallet(&ledger);
        let intents: Vec<_> = (0..10u8)
            .map(|i| TransferIntent::new(recipient(i), u128::from(i) * 1_000 + 1))
            .collect();

        let envelope = wallet
            .send_transfers(&owner(), intents.clone())
            .await
            .unwrap();

        // ten links above the empty terminator
        let mut link = envelope.inner.references()[0].clone();
        let mut depth = 0;
        while !link.references().is_empty() {
            link = link.references()[0].clone();
            depth += 1;
        }
        assert_eq!(depth, 10);
        assert!(link.is_empty_cell());

        let executed: Vec<_> = ledger
            .executed()
            .into_iter()
            .map(|action| match action {
                ExecutedAction::Transfer { intent, .. } => intent,
                other => panic!("unexpected action {other:?}"),
            })
            .collect();
        assert_eq!(executed, intents);
    }

    #[tokio::test]
    async fn test_mixed_actions_in_one_message() {
        let ledger = InMemoryLedger::new();
        let wallet = wallet(&ledger);
        let code = Arc::new(empty_cell());
        let actions = vec![
            Action::Transfer(TransferIntent::new(recipient(1), 10)),
            Action::SetCode(code.clone()),
            Action::Transfer(TransferIntent::new(recipient(2), 20)),
        ];

        let envelope = wallet.send_actions(&owner(), actions).await.unwrap();
        let decoded = decode_action_chain(&envelope.inner.references()[0]).unwrap();
        assert_eq!(decoded.len(), 3);
        assert_eq!(decoded[1], OutAction::SetCode { code });
        assert_eq!(ledger.executed().len(), 3);
    }

    #[tokio::test]
    async fn test_opaque_tail_is_quoted_and_accepted() {
        let ledger = InMemoryLedger::new();
        let wallet = wallet(&ledger);

        let mut extra = CellBuilder::new();
        extra.store_u32(9, 0x1DD).unwrap();
        let extra = Arc::new(extra.build().unwrap());
        let mut data = CellBuilder::new();
        store_u256(&mut data, owner().public_key().as_bytes()).unwrap();
        data.store_u32(16, 17).unwrap();
        data.store_u32(24, 0xABCDEF).unwrap();
        data.store_reference(&extra).unwrap();
        let data = Arc::new(data.build().unwrap());
        let code = wallet.init().unwrap().code.clone().unwrap();
        ledger.set_account(*wallet.address(), AccountState::active(code, data.clone()));

        let envelope = wallet.send_transfers(&owner(), vec![]).await.unwrap();
        assert_eq!(envelope.seqno, 18);

        let mut inner = envelope.inner.parser();
        inner.next_reference().unwrap();
        inner.next_reference().unwrap();
        let quoted = inner.load_remaining().unwrap();
        assert_eq!(quoted.repr_hash(), data.repr_hash());
        assert_eq!(ledger.accepted_count(), 1);
    }
}
