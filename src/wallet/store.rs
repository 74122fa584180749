// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet Store
//!
//! Owns the wallet snapshot and the transaction ledger of the signed-in
//! user, mirrored into the key-value store under that user's email.
//!
//! ## States
//!
//! ```text
//! NO_WALLET ──load_for──▶ WALLET_PRESENT ◀──▶ refreshing
//!     ▲                        │
//!     └────────unload──────────┘
//! ```
//!
//! ## Refresh Ordering
//!
//! Every refresh takes a number from a monotonic counter before it starts
//! fetching. Its result is applied only if that number is still the latest
//! issued and the same wallet is still loaded; anything else is dropped.
//! Loading, unloading and restoring also advance the counter, so a fetch
//! for replaced addresses can never land.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::balances::{apply_snapshot, initial_balances, BalanceSource};
use super::error::WalletError;
use super::purchase::{validate_card, MIN_PURCHASE_USD};
use crate::auth::SessionStore;
use crate::blockchain::{self, ETHEREUM_MAINNET};
use crate::config::{simulate, SimulatedLatency};
use crate::crypto::{self, WalletKeys};
use crate::models::{
    CardDetails, DepositInfo, NewTransaction, Transaction, TransactionStatus, TransactionType,
    User, Wallet, WalletView,
};
use crate::storage::{JsonStore, KeyValueStore, StorageKeys};

/// Smallest accepted deposit, in units of the asset.
pub const MINIMUM_DEPOSIT: f64 = 0.001;

/// Confirmations reported for a completed withdrawal.
pub const WITHDRAWAL_CONFIRMATIONS: u32 = 12;

const QR_CODE_BASE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";

struct Loaded {
    email: String,
    wallet: Wallet,
    transactions: Vec<Transaction>,
}

pub struct WalletStore {
    kv: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    session: Arc<SessionStore>,
    source: Arc<dyn BalanceSource>,
    latency: SimulatedLatency,
    state: RwLock<Option<Loaded>>,
    refresh_seq: AtomicU64,
    refreshes_in_flight: AtomicUsize,
}

/// Decrements the in-flight counter when a refresh ends, however it ends.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl WalletStore {
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        keys: StorageKeys,
        session: Arc<SessionStore>,
        source: Arc<dyn BalanceSource>,
        latency: SimulatedLatency,
    ) -> Self {
        Self {
            kv,
            keys,
            session,
            source,
            latency,
            state: RwLock::new(None),
            refresh_seq: AtomicU64::new(0),
            refreshes_in_flight: AtomicUsize::new(0),
        }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Load (or create) the wallet of `user`.
    ///
    /// Idempotent for the user already loaded. A persisted snapshot without
    /// a recovery phrase, or one that no longer parses, is replaced by a
    /// freshly generated wallet.
    pub async fn load_for(&self, user: &User) -> Result<WalletView, WalletError> {
        let mut state = self.state.write().await;
        if let Some(loaded) = state.as_ref() {
            if loaded.email == user.email {
                return Ok(WalletView::from(&loaded.wallet));
            }
        }

        self.refresh_seq.fetch_add(1, Ordering::SeqCst);

        let wallet_key = self.keys.wallet(&user.email);
        let persisted = match self.kv.get_json::<Wallet>(&wallet_key) {
            Ok(wallet) => wallet,
            Err(e) => {
                warn!(user = %user.email, error = %e, "Persisted wallet unreadable, regenerating");
                None
            }
        };

        let wallet = match persisted {
            Some(mut wallet) if wallet.mnemonic.is_some() => {
                if wallet.crypto_balances.is_empty() {
                    wallet.crypto_balances = initial_balances(&wallet.addresses);
                    wallet.recompute_total();
                }
                debug!(user = %user.email, "Restored persisted wallet");
                wallet
            }
            Some(_) => {
                info!(user = %user.email, "Migrating legacy wallet without recovery phrase");
                self.create_wallet(&wallet_key)?
            }
            None => {
                info!(user = %user.email, "Generating new wallet");
                self.create_wallet(&wallet_key)?
            }
        };

        let transactions = match self
            .kv
            .get_json::<Vec<Transaction>>(&self.keys.transactions(&user.email))
        {
            Ok(transactions) => transactions.unwrap_or_default(),
            Err(e) => {
                warn!(user = %user.email, error = %e, "Persisted ledger unreadable, starting empty");
                Vec::new()
            }
        };

        let view = WalletView::from(&wallet);
        *state = Some(Loaded {
            email: user.email.clone(),
            wallet,
            transactions,
        });
        Ok(view)
    }

    /// Drop the in-memory wallet (on logout). Persisted state is kept.
    pub async fn unload(&self) {
        let mut state = self.state.write().await;
        self.refresh_seq.fetch_add(1, Ordering::SeqCst);
        if let Some(loaded) = state.take() {
            debug!(user = %loaded.email, "Wallet unloaded");
        }
    }

    /// Replace the keys of the loaded wallet with ones derived from `phrase`.
    ///
    /// Balances restart from zero; the ledger is kept.
    pub async fn restore_from_mnemonic(&self, phrase: &str) -> Result<WalletView, WalletError> {
        let keys = crypto::restore_wallet_keys(phrase)?;

        let mut state = self.state.write().await;
        let loaded = state.as_mut().ok_or(WalletError::NoWallet)?;
        self.refresh_seq.fetch_add(1, Ordering::SeqCst);

        let wallet = fresh_wallet(&keys);
        self.kv.set_json(&self.keys.wallet(&loaded.email), &wallet)?;
        loaded.wallet = wallet;

        info!(user = %loaded.email, "Wallet restored from recovery phrase");
        Ok(WalletView::from(&loaded.wallet))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn view(&self) -> Option<WalletView> {
        self.state
            .read()
            .await
            .as_ref()
            .map(|l| WalletView::from(&l.wallet))
    }

    /// Full snapshot, key material included.
    pub async fn wallet(&self) -> Option<Wallet> {
        self.state.read().await.as_ref().map(|l| l.wallet.clone())
    }

    /// Ledger, newest first.
    pub async fn transactions(&self) -> Result<Vec<Transaction>, WalletError> {
        self.state
            .read()
            .await
            .as_ref()
            .map(|l| l.transactions.clone())
            .ok_or(WalletError::NoWallet)
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshes_in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn is_loaded(&self) -> bool {
        self.state.read().await.is_some()
    }

    /// Recovery phrase, after checking the wallet password.
    pub async fn backup_phrase(&self, wallet_password: &str) -> Result<String, WalletError> {
        if !self.session.verify_wallet_password(wallet_password)? {
            return Err(WalletError::IncorrectPassword);
        }
        self.state
            .read()
            .await
            .as_ref()
            .ok_or(WalletError::NoWallet)?
            .wallet
            .mnemonic
            .clone()
            .ok_or(WalletError::NoWallet)
    }

    /// Address, network and QR code for depositing `symbol`.
    pub async fn deposit_info(&self, symbol: &str) -> Result<DepositInfo, WalletError> {
        let asset =
            blockchain::asset(symbol).ok_or_else(|| WalletError::UnknownAsset(symbol.to_string()))?;

        let state = self.state.read().await;
        let wallet = &state.as_ref().ok_or(WalletError::NoWallet)?.wallet;
        let address = wallet
            .addresses
            .for_symbol(asset.symbol)
            .ok_or_else(|| WalletError::UnknownAsset(symbol.to_string()))?
            .to_string();

        Ok(DepositInfo {
            symbol: asset.symbol.to_string(),
            qr_code_url: qr_code_url(&address),
            address,
            network: asset.network.to_string(),
            minimum_deposit: MINIMUM_DEPOSIT,
        })
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Fetch fresh balances and prices and apply them.
    ///
    /// Returns `Ok(false)` when a newer refresh, or a wallet change,
    /// superseded this one while it was fetching.
    pub async fn refresh_balances(&self) -> Result<bool, WalletError> {
        let (seq, email, addresses) = {
            let state = self.state.read().await;
            let loaded = state.as_ref().ok_or(WalletError::NoWallet)?;
            let seq = self.refresh_seq.fetch_add(1, Ordering::SeqCst) + 1;
            (seq, loaded.email.clone(), loaded.wallet.addresses.clone())
        };

        let _in_flight = InFlight::enter(&self.refreshes_in_flight);
        debug!(user = %email, seq, "Refreshing balances");

        let snapshot = self.source.fetch(&addresses).await;

        let mut state = self.state.write().await;
        let loaded = match state.as_mut() {
            Some(loaded)
                if loaded.email == email && self.refresh_seq.load(Ordering::SeqCst) == seq =>
            {
                loaded
            }
            _ => {
                debug!(user = %email, seq, "Discarding superseded refresh");
                return Ok(false);
            }
        };

        loaded.wallet.crypto_balances =
            apply_snapshot(&loaded.wallet.crypto_balances, &addresses, &snapshot);
        loaded.wallet.recompute_total();
        self.kv.set_json(&self.keys.wallet(&email), &loaded.wallet)?;

        info!(
            user = %email,
            seq,
            total_usd = loaded.wallet.total_usd_value,
            "Balances refreshed"
        );
        Ok(true)
    }

    /// Stamp `entry` with an id and time and prepend it to the ledger.
    pub async fn add_transaction(&self, entry: NewTransaction) -> Result<Transaction, WalletError> {
        let mut state = self.state.write().await;
        let loaded = state.as_mut().ok_or(WalletError::NoWallet)?;
        self.record(loaded, entry)
    }

    /// Credit (or debit, when negative) `usd_amount` worth of `symbol`.
    pub async fn update_balance(
        &self,
        usd_amount: f64,
        symbol: &str,
    ) -> Result<WalletView, WalletError> {
        let mut state = self.state.write().await;
        let loaded = state.as_mut().ok_or(WalletError::NoWallet)?;

        apply_usd_delta(&mut loaded.wallet, usd_amount, symbol)?;
        self.kv.set_json(&self.keys.wallet(&loaded.email), &loaded.wallet)?;
        Ok(WalletView::from(&loaded.wallet))
    }

    /// Withdraw `amount` USD worth of USDT to `to_address`.
    pub async fn withdraw_funds(
        &self,
        amount: f64,
        to_address: &str,
        wallet_password: &str,
    ) -> Result<Transaction, WalletError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(WalletError::InvalidAmount(
                "amount must be greater than zero".into(),
            ));
        }
        let to_address = to_address.trim();
        if to_address.is_empty() {
            return Err(WalletError::MissingDestination);
        }

        let email = {
            let state = self.state.read().await;
            let loaded = state.as_ref().ok_or(WalletError::NoWallet)?;
            if !self.session.verify_wallet_password(wallet_password)? {
                warn!(user = %loaded.email, "Withdrawal rejected: wrong wallet password");
                return Err(WalletError::IncorrectPassword);
            }
            ensure_usdt_covers(&loaded.wallet, amount)?;
            loaded.email.clone()
        };

        simulate(self.latency.withdrawal).await;

        let mut state = self.state.write().await;
        let loaded = state
            .as_mut()
            .filter(|l| l.email == email)
            .ok_or(WalletError::NoWallet)?;
        ensure_usdt_covers(&loaded.wallet, amount)?;

        apply_usd_delta(&mut loaded.wallet, -amount, "USDT")?;
        self.kv.set_json(&self.keys.wallet(&email), &loaded.wallet)?;

        let mut entry = NewTransaction::new(
            TransactionType::Withdrawal,
            -amount,
            "USDT",
            TransactionStatus::Completed,
        );
        entry.to_address = Some(to_address.to_string());
        entry.tx_hash = Some(simulated_tx_hash());
        entry.confirmations = Some(WITHDRAWAL_CONFIRMATIONS);
        entry.network = Some(ETHEREUM_MAINNET.name.to_string());

        let tx = self.record(loaded, entry)?;
        info!(user = %email, amount, to = %to_address, "Withdrawal completed");
        Ok(tx)
    }

    /// Buy `usd_amount` worth of `symbol` with a card.
    pub async fn purchase(
        &self,
        usd_amount: f64,
        symbol: &str,
        card: &CardDetails,
    ) -> Result<Transaction, WalletError> {
        validate_card(card, Utc::now().date_naive()).map_err(WalletError::Card)?;
        if !usd_amount.is_finite() || usd_amount < MIN_PURCHASE_USD {
            return Err(WalletError::InvalidAmount(format!(
                "minimum purchase is {MIN_PURCHASE_USD} USD"
            )));
        }
        let asset =
            blockchain::asset(symbol).ok_or_else(|| WalletError::UnknownAsset(symbol.to_string()))?;

        let email = {
            let state = self.state.read().await;
            state.as_ref().ok_or(WalletError::NoWallet)?.email.clone()
        };

        simulate(self.latency.purchase).await;

        let mut state = self.state.write().await;
        let loaded = state
            .as_mut()
            .filter(|l| l.email == email)
            .ok_or(WalletError::NoWallet)?;

        apply_usd_delta(&mut loaded.wallet, usd_amount, asset.symbol)?;
        self.kv.set_json(&self.keys.wallet(&email), &loaded.wallet)?;

        let entry = NewTransaction::new(
            TransactionType::Purchase,
            usd_amount,
            asset.symbol,
            TransactionStatus::Completed,
        );
        let tx = self.record(loaded, entry)?;
        info!(user = %email, usd_amount, symbol = asset.symbol, "Card purchase completed");
        Ok(tx)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn create_wallet(&self, wallet_key: &str) -> Result<Wallet, WalletError> {
        let keys = crypto::generate_wallet_keys()?;
        let wallet = fresh_wallet(&keys);
        self.kv.set_json(wallet_key, &wallet)?;
        Ok(wallet)
    }

    fn record(&self, loaded: &mut Loaded, entry: NewTransaction) -> Result<Transaction, WalletError> {
        let tx = entry.into_transaction(format!("tx_{}", Uuid::new_v4().simple()), Utc::now());
        loaded.transactions.insert(0, tx.clone());
        self.kv
            .set_json(&self.keys.transactions(&loaded.email), &loaded.transactions)?;
        Ok(tx)
    }
}

fn fresh_wallet(keys: &WalletKeys) -> Wallet {
    let mut wallet = keys.to_wallet();
    wallet.crypto_balances = initial_balances(&wallet.addresses);
    wallet.recompute_total();
    wallet
}

/// `balance = max(0, balance + usd / price)`, then recompute totals.
fn apply_usd_delta(wallet: &mut Wallet, usd_amount: f64, symbol: &str) -> Result<(), WalletError> {
    if !usd_amount.is_finite() {
        return Err(WalletError::InvalidAmount("amount must be a number".into()));
    }
    let entry = wallet
        .balance_mut(symbol)
        .ok_or_else(|| WalletError::UnknownAsset(symbol.to_string()))?;
    if !entry.price.is_finite() || entry.price <= 0.0 {
        return Err(WalletError::PriceUnavailable(symbol.to_string()));
    }

    let balance = (entry.balance + usd_amount / entry.price).max(0.0);
    entry.set_balance(balance);
    wallet.recompute_total();
    Ok(())
}

fn ensure_usdt_covers(wallet: &Wallet, amount: f64) -> Result<(), WalletError> {
    match wallet.balance("USDT") {
        Some(usdt) if usdt.usd_value >= amount => Ok(()),
        _ => Err(WalletError::InsufficientFunds),
    }
}

/// `0x` followed by 64 random hex digits.
fn simulated_tx_hash() -> String {
    format!(
        "0x{}{}",
        Uuid::new_v4().simple(),
        Uuid::new_v4().simple()
    )
}

fn qr_code_url(data: &str) -> String {
    let mut url = match url::Url::parse(QR_CODE_BASE_URL) {
        Ok(url) => url,
        Err(_) => return String::new(),
    };
    url.query_pairs_mut()
        .append_pair("size", "200x200")
        .append_pair("data", data);
    url.into()
}
