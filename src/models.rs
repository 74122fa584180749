// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Data Models
//!
//! Domain records persisted by the session and wallet stores, plus the
//! request and response bodies of the HTTP API. Persisted records use
//! camelCase field names so snapshots stay readable next to the original
//! browser storage format.
//!
//! ## Model Categories
//!
//! - **Users**: the active session identity and the signed-up users list
//! - **Wallet**: keys, per-chain addresses and the balance snapshot
//! - **Transactions**: the append-only, newest-first ledger
//! - **Requests**: API input bodies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// =============================================================================
// User Models
// =============================================================================

/// Identity of the active session.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (`user_` prefix).
    pub id: String,
    pub email: String,
    /// Display name.
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Entry of the signed-up users list.
///
/// Kept separately from the session so a later phone-number login can
/// resolve the account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Country code followed by the local number, e.g. `+15551234567`.
    pub phone: String,
    pub created_at: DateTime<Utc>,
    /// Argon2 hash of the wallet password, restored into the session on login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_password_digest: Option<String>,
}

impl From<RegisteredUser> for User {
    fn from(value: RegisteredUser) -> Self {
        User {
            id: value.id,
            email: value.email,
            name: value.name,
            created_at: value.created_at,
        }
    }
}

// =============================================================================
// Wallet Models
// =============================================================================

/// One address per supported chain.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub struct WalletAddresses {
    pub btc: String,
    pub eth: String,
    /// USDT is an ERC-20 token, so this is the Ethereum address.
    pub usdt: String,
    pub xrp: String,
    pub sol: String,
}

impl WalletAddresses {
    /// Address used for the given asset symbol.
    pub fn for_symbol(&self, symbol: &str) -> Option<&str> {
        match symbol {
            "BTC" => Some(&self.btc),
            "ETH" => Some(&self.eth),
            "USDT" => Some(&self.usdt),
            "XRP" => Some(&self.xrp),
            "SOL" => Some(&self.sol),
            _ => None,
        }
    }
}

/// Holding of a single asset.
///
/// `usd_value == balance * price` after every recompute.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CryptoBalance {
    /// Ticker, e.g. "USDT".
    pub symbol: String,
    pub name: String,
    /// Amount in whole units of the asset.
    pub balance: f64,
    pub usd_value: f64,
    /// USD price per unit.
    pub price: f64,
    /// 24h price change in percent.
    #[serde(rename = "change24h")]
    pub change_24h: f64,
    pub address: String,
    pub icon: String,
    pub image: String,
    /// Human-readable network name, e.g. "XRP Ledger".
    pub network: String,
    /// Presentation hint for the network badge.
    pub network_color: String,
}

impl CryptoBalance {
    /// Set a new balance and recompute the USD value.
    pub fn set_balance(&mut self, balance: f64) {
        self.balance = balance;
        self.usd_value = balance * self.price;
    }
}

/// Wallet snapshot of one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Primary (Ethereum) address.
    pub address: String,
    /// Primary (Ethereum) private key, hex without `0x`.
    pub private_key: String,
    /// Absent on snapshots written before mnemonic support.
    #[serde(default)]
    pub mnemonic: Option<String>,
    pub addresses: WalletAddresses,
    #[serde(default)]
    pub crypto_balances: Vec<CryptoBalance>,
    #[serde(default)]
    pub total_usd_value: f64,
}

impl Wallet {
    /// Holding for `symbol`, if tracked.
    pub fn balance(&self, symbol: &str) -> Option<&CryptoBalance> {
        self.crypto_balances.iter().find(|b| b.symbol == symbol)
    }

    pub fn balance_mut(&mut self, symbol: &str) -> Option<&mut CryptoBalance> {
        self.crypto_balances.iter_mut().find(|b| b.symbol == symbol)
    }

    /// Recompute `total_usd_value` from the holdings.
    pub fn recompute_total(&mut self) {
        self.total_usd_value = self.crypto_balances.iter().map(|b| b.usd_value).sum();
    }
}

/// Wallet as returned by the API: no key material.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletView {
    pub address: String,
    pub addresses: WalletAddresses,
    pub crypto_balances: Vec<CryptoBalance>,
    pub total_usd_value: f64,
    /// Whether a recovery phrase is available for backup.
    pub has_mnemonic: bool,
}

impl From<&Wallet> for WalletView {
    fn from(wallet: &Wallet) -> Self {
        Self {
            address: wallet.address.clone(),
            addresses: wallet.addresses.clone(),
            crypto_balances: wallet.crypto_balances.clone(),
            total_usd_value: wallet.total_usd_value,
            has_mnemonic: wallet.mnemonic.is_some(),
        }
    }
}

/// Where and how to deposit an asset.
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepositInfo {
    pub symbol: String,
    pub address: String,
    pub network: String,
    /// Smallest accepted deposit, in units of the asset.
    pub minimum_deposit: f64,
    /// Image URL encoding the deposit address as a QR code.
    pub qr_code_url: String,
}

// =============================================================================
// Transaction Models
// =============================================================================

/// Kind of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Purchase,
}

/// Status, fixed when the entry is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

/// Ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier (`tx_` prefix).
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Signed amount; withdrawals are negative.
    pub amount: f64,
    pub currency: String,
    pub timestamp: DateTime<Utc>,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// Ledger entry before the store assigns `id` and `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub currency: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub to_address: Option<String>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub confirmations: Option<u32>,
    #[serde(default)]
    pub network: Option<String>,
}

impl NewTransaction {
    pub fn new(
        kind: TransactionType,
        amount: f64,
        currency: impl Into<String>,
        status: TransactionStatus,
    ) -> Self {
        Self {
            kind,
            amount,
            currency: currency.into(),
            status,
            to_address: None,
            tx_hash: None,
            confirmations: None,
            network: None,
        }
    }

    /// Stamp the entry with an id and the current time.
    pub fn into_transaction(self, id: String, timestamp: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            currency: self.currency,
            timestamp,
            status: self.status,
            to_address: self.to_address,
            tx_hash: self.tx_hash,
            confirmations: self.confirmations,
            network: self.network,
        }
    }
}

// =============================================================================
// Auth Requests
// =============================================================================

/// Request to create an account.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    /// Local phone number without the country code.
    pub phone: String,
    /// E.g. "+1".
    pub country_code: String,
    pub password: String,
    /// Separate password gating withdrawals and backups.
    pub wallet_password: String,
}

/// Request to log in with an email or phone number.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Email address, or phone number starting with `+` or made of digits.
    pub identifier: String,
    pub password: String,
}

/// Request a password reset email.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResetPasswordRequest {
    pub email: String,
}

// =============================================================================
// Wallet Requests
// =============================================================================

/// Request to withdraw USDT to an external address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawRequest {
    /// USD amount.
    pub amount: f64,
    pub to_address: String,
    pub wallet_password: String,
}

/// Payment card used for a simulated purchase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    /// Digits, spaces allowed.
    pub card_number: String,
    /// `MM/YY`.
    pub expiry_date: String,
    pub cvv: String,
    pub card_name: String,
}

/// Request to buy crypto with a card.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    pub usd_amount: f64,
    /// Asset to buy, e.g. "BTC".
    pub symbol: String,
    pub card: CardDetails,
}

/// Request to replace the wallet keys with ones derived from a phrase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestoreWalletRequest {
    pub mnemonic: String,
}

/// Request to reveal the recovery phrase.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BackupRequest {
    pub wallet_password: String,
}
