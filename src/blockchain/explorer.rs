// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Balance reads for non-EVM chains.
//!
//! | Chain | Endpoint | Unit conversion |
//! |-------|----------|-----------------|
//! | BTC | `GET {btc}/address/{addr}` (Esplora) | `(funded - spent) / 1e8` |
//! | XRP | `GET {xrp}/account/{addr}` (XRPSCAN) | `xrpBalance` as-is |
//! | SOL | JSON-RPC `getBalance` | lamports `/ 1e9` |

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use super::ChainClientError;

const SATOSHIS_PER_BTC: f64 = 100_000_000.0;
const LAMPORTS_PER_SOL: f64 = 1_000_000_000.0;

pub const DEFAULT_BTC_API_URL: &str = "https://blockstream.info/api";
pub const DEFAULT_XRP_API_URL: &str = "https://api.xrpscan.com/api/v1";
pub const DEFAULT_SOL_RPC_URL: &str = "https://api.mainnet-beta.solana.com";

#[derive(Debug, Deserialize)]
struct EsploraAddress {
    chain_stats: EsploraStats,
}

#[derive(Debug, Deserialize)]
struct EsploraStats {
    funded_txo_sum: u64,
    spent_txo_sum: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct XrpscanAccount {
    xrp_balance: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<SolanaBalance>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct SolanaBalance {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    message: String,
}

/// Explorer client for Bitcoin, XRP Ledger and Solana.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    btc_api_url: String,
    xrp_api_url: String,
    sol_rpc_url: String,
    http: Client,
}

impl ExplorerClient {
    pub fn new(
        btc_api_url: impl Into<String>,
        xrp_api_url: impl Into<String>,
        sol_rpc_url: impl Into<String>,
    ) -> Result<Self, ChainClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .map_err(|e| ChainClientError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            btc_api_url: btc_api_url.into(),
            xrp_api_url: xrp_api_url.into(),
            sol_rpc_url: sol_rpc_url.into(),
            http,
        })
    }

    /// Confirmed BTC balance of `address`.
    pub async fn bitcoin_balance(&self, address: &str) -> Result<f64, ChainClientError> {
        let url = format!("{}/address/{address}", self.btc_api_url.trim_end_matches('/'));
        let body: EsploraAddress = self.get_json(&url).await?;
        Ok(satoshis_to_btc(&body.chain_stats))
    }

    /// XRP balance of `address`.
    pub async fn xrp_balance(&self, address: &str) -> Result<f64, ChainClientError> {
        let url = format!("{}/account/{address}", self.xrp_api_url.trim_end_matches('/'));
        let body: XrpscanAccount = self.get_json(&url).await?;
        parse_xrp_balance(&body.xrp_balance)
    }

    /// SOL balance of `address`.
    pub async fn solana_balance(&self, address: &str) -> Result<f64, ChainClientError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getBalance",
            "params": [address],
        });

        let response = self
            .http
            .post(&self.sol_rpc_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChainClientError::Request(format!("getBalance failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChainClientError::Request(format!(
                "getBalance returned {status}: {body}"
            )));
        }

        let body: RpcResponse = response
            .json()
            .await
            .map_err(|e| ChainClientError::InvalidResponse(format!("getBalance invalid JSON: {e}")))?;

        lamports_to_sol(body)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ChainClientError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ChainClientError::Request(format!("GET {url} failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ChainClientError::Request(format!(
                "GET {url} returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ChainClientError::InvalidResponse(format!("GET {url} invalid JSON: {e}")))
    }
}

fn satoshis_to_btc(stats: &EsploraStats) -> f64 {
    stats.funded_txo_sum.saturating_sub(stats.spent_txo_sum) as f64 / SATOSHIS_PER_BTC
}

/// XRPSCAN reports `xrpBalance` as a number or a decimal string.
fn parse_xrp_balance(value: &Value) -> Result<f64, ChainClientError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ChainClientError::InvalidResponse(format!("xrpBalance {n}"))),
        Value::String(s) => s
            .trim()
            .parse()
            .map_err(|e| ChainClientError::InvalidResponse(format!("xrpBalance '{s}': {e}"))),
        other => Err(ChainClientError::InvalidResponse(format!(
            "unexpected xrpBalance {other}"
        ))),
    }
}

fn lamports_to_sol(body: RpcResponse) -> Result<f64, ChainClientError> {
    if let Some(error) = body.error {
        return Err(ChainClientError::Rpc(error.message));
    }
    body.result
        .map(|r| r.value as f64 / LAMPORTS_PER_SOL)
        .ok_or_else(|| ChainClientError::InvalidResponse("getBalance missing result".into()))
}
