// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Key naming for persisted session and wallet state.

/// Prefix shared by every persisted entry.
pub const DEFAULT_PREFIX: &str = "usdtbanc";

/// Storage key utilities.
#[derive(Debug, Clone)]
pub struct StorageKeys {
    prefix: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self::new(DEFAULT_PREFIX)
    }
}

impl StorageKeys {
    /// Create keys under a custom prefix (useful for testing).
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    // ========== Session Keys ==========

    /// Active session user record.
    pub fn current_user(&self) -> String {
        format!("{}_user", self.prefix)
    }

    /// List of every signed-up user, used for phone-number login.
    pub fn users(&self) -> String {
        format!("{}_users", self.prefix)
    }

    /// Wallet password hash of the active session.
    pub fn wallet_password(&self) -> String {
        format!("{}_wallet_password", self.prefix)
    }

    // ========== Per-User Keys ==========

    /// Wallet snapshot for a user.
    pub fn wallet(&self, email: &str) -> String {
        format!("{}_wallet_{}", self.prefix, email)
    }

    /// Transaction ledger for a user.
    pub fn transactions(&self, email: &str) -> String {
        format!("{}_transactions_{}", self.prefix, email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keys_use_prefix() {
        let keys = StorageKeys::default();
        assert_eq!(keys.prefix(), "usdtbanc");
        assert_eq!(keys.current_user(), "usdtbanc_user");
        assert_eq!(keys.users(), "usdtbanc_users");
        assert_eq!(keys.wallet_password(), "usdtbanc_wallet_password");
    }

    #[test]
    fn per_user_keys_include_email() {
        let keys = StorageKeys::default();
        assert_eq!(
            keys.wallet("alice@example.com"),
            "usdtbanc_wallet_alice@example.com"
        );
        assert_eq!(
            keys.transactions("alice@example.com"),
            "usdtbanc_transactions_alice@example.com"
        );
    }

    #[test]
    fn custom_prefix_for_testing() {
        let keys = StorageKeys::new("test");
        assert_eq!(keys.wallet("bob@x.io"), "test_wallet_bob@x.io");
    }
}
