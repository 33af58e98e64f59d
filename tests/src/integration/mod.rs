//! # Integration Flows
//!
//! Wallet service against the in-memory ledger.

pub mod replay;
pub mod transfers;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::ledger::InMemoryLedger;
    use mw_wallet::{WalletConfig, WalletService};
    use shared_crypto::Ed25519KeyPair;
    use shared_types::{Address, ArcCell, CellBuilder};
    use std::sync::Arc;

    pub fn owner() -> Ed25519KeyPair {
        Ed25519KeyPair::from_seed([0x5A; 32])
    }

    pub fn wallet(ledger: &InMemoryLedger) -> WalletService<InMemoryLedger> {
        wallet_with(ledger, WalletConfig::default())
    }

    pub fn wallet_with(
        ledger: &InMemoryLedger,
        config: WalletConfig,
    ) -> WalletService<InMemoryLedger> {
        WalletService::from_public_key(ledger.clone(), owner().public_key().as_bytes(), config)
            .unwrap()
    }

    pub fn recipient(tag: u8) -> Address {
        Address::new(0, [tag; 32])
    }

    pub fn comment(text: &str) -> ArcCell {
        let mut b = CellBuilder::new();
        b.store_u32(32, 0).unwrap().store_slice(text.as_bytes()).unwrap();
        Arc::new(b.build().unwrap())
    }
}
