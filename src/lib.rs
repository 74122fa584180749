// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! USDTBanc Wallet - Demo Crypto Banking Service
//!
//! Session and wallet stores behind a JSON API. Wallet keys for Bitcoin,
//! Ethereum (and USDT), XRP and Solana are derived from a BIP39 phrase;
//! balances come from public chain endpoints and prices from CoinGecko.
//! Withdrawals and card purchases are simulated locally.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Sessions, signup validation and wallet passwords
//! - `blockchain` - Balance clients for EVM, Bitcoin, XRP and Solana
//! - `crypto` - Mnemonic and HD key derivation, address encodings
//! - `market` - Prices and the market index, with fallbacks
//! - `storage` - Key-value persistence (files or memory)
//! - `wallet` - Wallet store, balance sources and background refresh

pub mod api;
pub mod auth;
pub mod blockchain;
pub mod config;
pub mod crypto;
pub mod error;
pub mod logging;
pub mod market;
pub mod models;
pub mod state;
pub mod storage;
pub mod wallet;
