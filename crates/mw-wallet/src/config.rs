//! # Wallet Configuration
//!
//! Settings shared by every wallet instance in a process, read from
//! `MW_*` environment variables.

use serde::{Deserialize, Serialize};

/// Configuration for [`crate::WalletService`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Workchain a wallet derived from a public key is deployed in.
    pub workchain: i32,
    /// Refuse to sign when the signing key differs from the stored key.
    /// When off, the mismatch is logged and the message is sent anyway.
    pub strict_key_check: bool,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            workchain: 0,
            strict_key_check: false,
        }
    }
}

impl WalletConfig {
    /// Load from environment variables.
    ///
    /// - `MW_WORKCHAIN`: signed workchain id
    /// - `MW_STRICT_KEY_CHECK`: `1` or `true` to enable the strict check
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("MW_WORKCHAIN") {
            if let Ok(workchain) = val.trim().parse() {
                config.workchain = workchain;
            }
        }

        if let Ok(val) = std::env::var("MW_STRICT_KEY_CHECK") {
            config.strict_key_check = val == "1" || val.to_lowercase() == "true";
        }

        config
    }

    /// Same settings in another workchain.
    pub fn with_workchain(mut self, workchain: i32) -> Self {
        self.workchain = workchain;
        self
    }

    /// Same settings with the strict key check switched.
    pub fn with_strict_key_check(mut self, strict: bool) -> Self {
        self.strict_key_check = strict;
        self
    }
}
