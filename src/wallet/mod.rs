// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet Module
//!
//! Per-user wallet state: keys, multi-chain balances and the transaction
//! ledger.
//!
//! - [`WalletStore`] owns the loaded wallet and every mutation on it
//! - [`BalanceSource`] fetches on-chain balances and USD quotes
//! - [`BalanceRefresher`] refreshes balances in the background
//!
//! Withdrawals and purchases are simulated: balances change locally and a
//! ledger entry is written, but nothing is broadcast or charged.

pub mod balances;
pub mod error;
pub mod purchase;
pub mod refresher;
pub mod store;

pub use balances::{BalanceSnapshot, BalanceSource, LiveBalanceSource};
pub use error::WalletError;
pub use refresher::BalanceRefresher;
pub use store::WalletStore;
