// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Balance Sources
//!
//! A [`BalanceSource`] turns a set of wallet addresses into per-asset
//! balances and USD quotes. Failures never propagate: a balance that could
//! not be read is reported as `None`, and the wallet store keeps the
//! previous value for that asset.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::blockchain::{Asset, ChainClientError, EvmClient, ExplorerClient, ASSETS, USDT_TOKEN};
use crate::market::{MarketData, PriceQuote};
use crate::models::{CryptoBalance, WalletAddresses};

/// Result of one fetch cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BalanceSnapshot {
    /// On-chain balance per symbol; `None` when the query failed.
    pub balances: HashMap<&'static str, Option<f64>>,
    /// USD quote per symbol.
    pub quotes: HashMap<&'static str, PriceQuote>,
}

#[async_trait]
pub trait BalanceSource: Send + Sync {
    /// Fetch balances and quotes for every tracked asset.
    ///
    /// All chains are queried before returning.
    async fn fetch(&self, addresses: &WalletAddresses) -> BalanceSnapshot;
}

/// Balances from public chain endpoints and prices from CoinGecko.
pub struct LiveBalanceSource {
    evm: EvmClient,
    explorer: ExplorerClient,
    market: Arc<MarketData>,
}

impl LiveBalanceSource {
    pub fn new(evm: EvmClient, explorer: ExplorerClient, market: Arc<MarketData>) -> Self {
        Self {
            evm,
            explorer,
            market,
        }
    }
}

#[async_trait]
impl BalanceSource for LiveBalanceSource {
    async fn fetch(&self, addresses: &WalletAddresses) -> BalanceSnapshot {
        let (btc, eth, usdt, xrp, sol, quotes) = tokio::join!(
            self.explorer.bitcoin_balance(&addresses.btc),
            self.evm.native_balance(&addresses.eth),
            self.evm.token_balance(&addresses.usdt, &USDT_TOKEN),
            self.explorer.xrp_balance(&addresses.xrp),
            self.explorer.solana_balance(&addresses.sol),
            self.market.quotes(),
        );

        let balances = [
            ("BTC", btc),
            ("ETH", eth),
            ("USDT", usdt),
            ("XRP", xrp),
            ("SOL", sol),
        ]
        .into_iter()
        .map(|(symbol, result)| (symbol, reading(symbol, result)))
        .collect();

        BalanceSnapshot { balances, quotes }
    }
}

fn reading(symbol: &str, result: Result<f64, ChainClientError>) -> Option<f64> {
    match result {
        Ok(balance) => Some(balance),
        Err(e) => {
            warn!(symbol, error = %e, "Balance fetch failed, keeping previous value");
            None
        }
    }
}

/// Zero balance entry at the catalogue price.
pub fn empty_balance(asset: &Asset, address: &str) -> CryptoBalance {
    CryptoBalance {
        symbol: asset.symbol.to_string(),
        name: asset.name.to_string(),
        balance: 0.0,
        usd_value: 0.0,
        price: asset.fallback_price,
        change_24h: 0.0,
        address: address.to_string(),
        icon: asset.icon.to_string(),
        image: asset.image.to_string(),
        network: asset.network.to_string(),
        network_color: asset.network_color.to_string(),
    }
}

/// Zero balances for every tracked asset.
pub fn initial_balances(addresses: &WalletAddresses) -> Vec<CryptoBalance> {
    ASSETS
        .iter()
        .map(|asset| empty_balance(asset, addresses.for_symbol(asset.symbol).unwrap_or_default()))
        .collect()
}

/// Merge a snapshot over the previous balances.
///
/// Assets come out in catalogue order. A failed balance read keeps the
/// previous balance (zero if there was none); a missing quote keeps the
/// previous price.
pub fn apply_snapshot(
    previous: &[CryptoBalance],
    addresses: &WalletAddresses,
    snapshot: &BalanceSnapshot,
) -> Vec<CryptoBalance> {
    ASSETS
        .iter()
        .map(|asset| {
            let address = addresses.for_symbol(asset.symbol).unwrap_or_default();
            let prior = previous.iter().find(|b| b.symbol == asset.symbol);

            let mut entry = empty_balance(asset, address);
            if let Some(prior) = prior {
                entry.price = prior.price;
                entry.change_24h = prior.change_24h;
            }
            if let Some(quote) = snapshot.quotes.get(asset.symbol) {
                entry.price = quote.price;
                entry.change_24h = quote.change_24h;
            }

            let balance = snapshot
                .balances
                .get(asset.symbol)
                .copied()
                .flatten()
                .or(prior.map(|b| b.balance))
                .unwrap_or(0.0);
            entry.set_balance(balance);
            entry
        })
        .collect()
}
