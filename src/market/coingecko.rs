// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! CoinGecko public API client.

use std::{collections::HashMap, time::Duration};

use reqwest::Client;
use serde::Deserialize;

use super::{MarketCoin, MarketError, PriceQuote};

pub const DEFAULT_COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Coins returned by the market index.
pub const MARKET_INDEX_SIZE: usize = 10;

#[derive(Debug, Deserialize)]
struct SimplePrice {
    usd: Option<f64>,
    usd_24h_change: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    base_url: String,
    http: Client,
}

impl CoinGeckoClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, MarketError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| MarketError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into(),
            http,
        })
    }

    /// USD price and 24h change for each CoinGecko id.
    ///
    /// Ids missing from the response, or without a price, are left out.
    pub async fn simple_prices(
        &self,
        ids: &[&str],
    ) -> Result<HashMap<String, PriceQuote>, MarketError> {
        let path = "/simple/price";
        let ids = ids.join(",");
        let raw: HashMap<String, SimplePrice> = self
            .get_json(
                path,
                &[
                    ("ids", ids.as_str()),
                    ("vs_currencies", "usd"),
                    ("include_24hr_change", "true"),
                ],
            )
            .await?;

        Ok(into_quotes(raw))
    }

    /// Top coins by market cap.
    pub async fn markets(&self) -> Result<Vec<MarketCoin>, MarketError> {
        let per_page = MARKET_INDEX_SIZE.to_string();
        self.get_json(
            "/coins/markets",
            &[
                ("vs_currency", "usd"),
                ("order", "market_cap_desc"),
                ("per_page", per_page.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
                ("price_change_percentage", "24h"),
            ],
        )
        .await
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, MarketError> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url.trim_end_matches('/'), path))
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| MarketError::Request(format!("GET {path} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketError::Request(format!(
                "GET {path} returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| MarketError::InvalidResponse(format!("GET {path} invalid JSON: {e}")))
    }
}

fn into_quotes(raw: HashMap<String, SimplePrice>) -> HashMap<String, PriceQuote> {
    raw.into_iter()
        .filter_map(|(id, entry)| {
            let price = entry.usd?;
            Some((
                id,
                PriceQuote {
                    price,
                    change_24h: entry.usd_24h_change.unwrap_or(0.0),
                },
            ))
        })
        .collect()
}
