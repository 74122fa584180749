// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `DATA_DIR` | Root directory of the key-value store (`:memory:` keeps it in RAM) | `./data` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `COINGECKO_API_URL` | Market data base URL | `https://api.coingecko.com/api/v3` |
//! | `ETH_RPC_URL` | Ethereum JSON-RPC endpoint | `https://eth.llamarpc.com` |
//! | `BTC_API_URL` | Bitcoin Esplora REST base | `https://blockstream.info/api` |
//! | `XRP_API_URL` | XRPSCAN REST base | `https://api.xrpscan.com/api/v1` |
//! | `SOL_RPC_URL` | Solana JSON-RPC endpoint | `https://api.mainnet-beta.solana.com` |
//! | `REFRESH_INTERVAL_SECS` | Balance refresh period | `120` |
//! | `REFRESH_INITIAL_DELAY_MS` | Delay before the first refresh | `1000` |
//! | `SIMULATED_LATENCY` | `off` disables artificial processing delays | on |

use std::{env, net::SocketAddr, time::Duration};

use crate::blockchain::{
    explorer::{DEFAULT_BTC_API_URL, DEFAULT_SOL_RPC_URL, DEFAULT_XRP_API_URL},
    ETHEREUM_MAINNET,
};
use crate::market::coingecko::DEFAULT_COINGECKO_API_URL;
use crate::storage::file_store::DEFAULT_DATA_DIR;

pub const DATA_DIR_ENV: &str = "DATA_DIR";
pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";
pub const COINGECKO_API_URL_ENV: &str = "COINGECKO_API_URL";
pub const ETH_RPC_URL_ENV: &str = "ETH_RPC_URL";
pub const BTC_API_URL_ENV: &str = "BTC_API_URL";
pub const XRP_API_URL_ENV: &str = "XRP_API_URL";
pub const SOL_RPC_URL_ENV: &str = "SOL_RPC_URL";
pub const REFRESH_INTERVAL_ENV: &str = "REFRESH_INTERVAL_SECS";
pub const REFRESH_INITIAL_DELAY_ENV: &str = "REFRESH_INITIAL_DELAY_MS";
pub const SIMULATED_LATENCY_ENV: &str = "SIMULATED_LATENCY";

/// `DATA_DIR` value selecting the in-memory store.
pub const IN_MEMORY_DATA_DIR: &str = ":memory:";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(120);
pub const DEFAULT_REFRESH_INITIAL_DELAY: Duration = Duration::from_millis(1000);

/// Artificial processing delays of the simulated flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub login: Duration,
    pub signup: Duration,
    pub reset_password: Duration,
    pub withdrawal: Duration,
    pub purchase: Duration,
}

impl SimulatedLatency {
    /// No delays at all.
    pub const fn none() -> Self {
        Self {
            login: Duration::ZERO,
            signup: Duration::ZERO,
            reset_password: Duration::ZERO,
            withdrawal: Duration::ZERO,
            purchase: Duration::ZERO,
        }
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(1000),
            signup: Duration::from_millis(1500),
            reset_password: Duration::from_millis(1000),
            withdrawal: Duration::from_millis(2000),
            purchase: Duration::from_millis(3000),
        }
    }
}

/// Sleep for `delay`, skipping the timer entirely when it is zero.
pub async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(raw: Option<&str>) -> Self {
        match raw.map(|v| v.trim().to_ascii_lowercase()) {
            Some(v) if v == "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

/// Where the key-value store lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataDir {
    Memory,
    Path(String),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: DataDir,
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub coingecko_api_url: String,
    pub eth_rpc_url: String,
    pub btc_api_url: String,
    pub xrp_api_url: String,
    pub sol_rpc_url: String,
    pub refresh_interval: Duration,
    pub refresh_initial_delay: Duration,
    pub latency: SimulatedLatency,
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let data_dir = match lookup(DATA_DIR_ENV) {
            Some(dir) if dir == IN_MEMORY_DATA_DIR => DataDir::Memory,
            Some(dir) => DataDir::Path(dir),
            None => DataDir::Path(DEFAULT_DATA_DIR.to_string()),
        };

        let port = lookup(PORT_ENV)
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let refresh_interval = lookup(REFRESH_INTERVAL_ENV)
            .and_then(|v| v.parse().ok())
            .filter(|secs: &u64| *secs > 0)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REFRESH_INTERVAL);

        let refresh_initial_delay = lookup(REFRESH_INITIAL_DELAY_ENV)
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_REFRESH_INITIAL_DELAY);

        let latency = match lookup(SIMULATED_LATENCY_ENV) {
            Some(v) if v.eq_ignore_ascii_case("off") => SimulatedLatency::none(),
            _ => SimulatedLatency::default(),
        };

        Self {
            data_dir,
            host: var(HOST_ENV, DEFAULT_HOST),
            port,
            log_format: LogFormat::parse(lookup(LOG_FORMAT_ENV).as_deref()),
            coingecko_api_url: var(COINGECKO_API_URL_ENV, DEFAULT_COINGECKO_API_URL),
            eth_rpc_url: var(ETH_RPC_URL_ENV, ETHEREUM_MAINNET.rpc_url),
            btc_api_url: var(BTC_API_URL_ENV, DEFAULT_BTC_API_URL),
            xrp_api_url: var(XRP_API_URL_ENV, DEFAULT_XRP_API_URL),
            sol_rpc_url: var(SOL_RPC_URL_ENV, DEFAULT_SOL_RPC_URL),
            refresh_interval,
            refresh_initial_delay,
            latency,
        }
    }

    /// Socket address to bind.
    pub fn bind_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> AppConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]);
        assert_eq!(cfg.data_dir, DataDir::Path("./data".into()));
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(120));
        assert_eq!(cfg.refresh_initial_delay, Duration::from_millis(1000));
        assert_eq!(cfg.latency, SimulatedLatency::default());
        assert_eq!(cfg.bind_addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn overrides_are_read() {
        let cfg = config(&[
            ("DATA_DIR", ":memory:"),
            ("PORT", "9000"),
            ("LOG_FORMAT", "JSON"),
            ("REFRESH_INTERVAL_SECS", "30"),
            ("SIMULATED_LATENCY", "off"),
            ("COINGECKO_API_URL", "http://localhost:3000/api/v3"),
        ]);
        assert_eq!(cfg.data_dir, DataDir::Memory);
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.log_format, LogFormat::Json);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(30));
        assert_eq!(cfg.latency, SimulatedLatency::none());
        assert_eq!(cfg.coingecko_api_url, "http://localhost:3000/api/v3");
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let cfg = config(&[("PORT", "http"), ("REFRESH_INTERVAL_SECS", "0")]);
        assert_eq!(cfg.port, DEFAULT_PORT);
        assert_eq!(cfg.refresh_interval, DEFAULT_REFRESH_INTERVAL);
    }

    #[test]
    fn default_latencies_match_flows() {
        let latency = SimulatedLatency::default();
        assert_eq!(latency.login, Duration::from_millis(1000));
        assert_eq!(latency.signup, Duration::from_millis(1500));
        assert_eq!(latency.withdrawal, Duration::from_millis(2000));
        assert_eq!(latency.purchase, Duration::from_millis(3000));
    }
}
