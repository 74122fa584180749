// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Market Data
//!
//! USD prices for the tracked assets and the top-ten market index, both
//! from CoinGecko. Neither call ever fails towards the caller:
//!
//! - A price that cannot be fetched falls back to the last good quote for
//!   that asset, then to the static price in the asset catalogue.
//! - The market index falls back to a static ten-coin snapshot.
//!
//! One attempt per call; there are no retries.

pub mod coingecko;
pub mod fallback;

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::blockchain::ASSETS;

pub use coingecko::CoinGeckoClient;

/// USD price and 24h change of one asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    pub price: f64,
    /// Percent.
    pub change_24h: f64,
}

/// Row of the market index.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct MarketCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: String,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub price_change_percentage_24h: Option<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("Market data request failed: {0}")]
    Request(String),

    #[error("Market data response was invalid: {0}")]
    InvalidResponse(String),
}

/// Price feed with last-known-good fallbacks.
pub struct MarketData {
    client: CoinGeckoClient,
    /// Last successful quote per asset symbol.
    last_quotes: Mutex<HashMap<&'static str, PriceQuote>>,
}

impl MarketData {
    pub fn new(client: CoinGeckoClient) -> Self {
        Self {
            client,
            last_quotes: Mutex::new(HashMap::new()),
        }
    }

    /// Quotes for every tracked asset, keyed by symbol.
    pub async fn quotes(&self) -> HashMap<&'static str, PriceQuote> {
        let ids: Vec<&str> = ASSETS.iter().map(|a| a.coingecko_id).collect();

        let fetched = match self.client.simple_prices(&ids).await {
            Ok(fetched) => fetched,
            Err(e) => {
                warn!(error = %e, "Price fetch failed, using fallback quotes");
                HashMap::new()
            }
        };

        let mut last = self.lock();
        ASSETS
            .iter()
            .map(|asset| {
                let quote = match fetched.get(asset.coingecko_id) {
                    Some(quote) => {
                        last.insert(asset.symbol, *quote);
                        *quote
                    }
                    None => last.get(asset.symbol).copied().unwrap_or(PriceQuote {
                        price: asset.fallback_price,
                        change_24h: 0.0,
                    }),
                };
                (asset.symbol, quote)
            })
            .collect()
    }

    /// Top coins by market cap.
    pub async fn market_index(&self) -> Vec<MarketCoin> {
        match self.client.markets().await {
            Ok(coins) if !coins.is_empty() => {
                debug!(count = coins.len(), "Fetched market index");
                coins
            }
            Ok(_) => {
                warn!("Market index was empty, using static snapshot");
                fallback::market_index()
            }
            Err(e) => {
                warn!(error = %e, "Market index fetch failed, using static snapshot");
                fallback::market_index()
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<&'static str, PriceQuote>> {
        self.last_quotes.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[cfg(test)]
    fn remember(&self, symbol: &'static str, quote: PriceQuote) {
        self.lock().insert(symbol, quote);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline() -> MarketData {
        MarketData::new(CoinGeckoClient::new("http://127.0.0.1:9").unwrap())
    }

    #[tokio::test]
    async fn offline_quotes_use_catalogue_prices() {
        let quotes = offline().quotes().await;
        assert_eq!(quotes.len(), ASSETS.len());
        assert_eq!(quotes["BTC"].price, 43_000.0);
        assert_eq!(quotes["ETH"].price, 2_600.0);
        assert_eq!(quotes["USDT"].price, 1.0);
        assert_eq!(quotes["XRP"].price, 0.6);
        assert_eq!(quotes["SOL"].price, 100.0);
        assert!(quotes.values().all(|q| q.change_24h == 0.0));
    }

    #[tokio::test]
    async fn offline_quotes_prefer_last_known_price() {
        let market = offline();
        market.remember(
            "BTC",
            PriceQuote {
                price: 61_000.0,
                change_24h: 1.5,
            },
        );

        let quotes = market.quotes().await;
        assert_eq!(quotes["BTC"].price, 61_000.0);
        assert_eq!(quotes["BTC"].change_24h, 1.5);
        assert_eq!(quotes["SOL"].price, 100.0);
    }

    #[tokio::test]
    async fn offline_market_index_uses_snapshot() {
        let index = offline().market_index().await;
        assert_eq!(index, fallback::market_index());
    }
}
