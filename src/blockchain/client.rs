// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Ethereum client for native and ERC-20 balance reads.

use std::str::FromStr;

use alloy::{
    network::Ethereum,
    primitives::{Address, U256},
    providers::{
        fillers::{BlobGasFiller, ChainIdFiller, FillProvider, GasFiller, JoinFill, NonceFiller},
        Identity, Provider, ProviderBuilder, RootProvider,
    },
};

use super::erc20::Erc20Contract;
use super::types::*;
use super::ChainClientError;

/// HTTP provider type (with the recommended fillers).
type HttpProvider = FillProvider<
    JoinFill<
        Identity,
        JoinFill<GasFiller, JoinFill<BlobGasFiller, JoinFill<NonceFiller, ChainIdFiller>>>,
    >,
    RootProvider<Ethereum>,
>;

/// Read-only Ethereum client.
pub struct EvmClient {
    network: NetworkConfig,
    provider: HttpProvider,
}

impl EvmClient {
    /// Create a client for `network` talking to `rpc_url`.
    pub fn new(network: NetworkConfig, rpc_url: &str) -> Result<Self, ChainClientError> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e: url::ParseError| ChainClientError::InvalidUrl(e.to_string()))?;

        let provider = ProviderBuilder::new().connect_http(url);

        Ok(Self { network, provider })
    }

    /// Client for Ethereum mainnet on its default endpoint.
    pub fn mainnet() -> Result<Self, ChainClientError> {
        Self::new(ETHEREUM_MAINNET, ETHEREUM_MAINNET.rpc_url)
    }

    /// Native ETH balance of `address`, in ether.
    pub async fn native_balance(&self, address: &str) -> Result<f64, ChainClientError> {
        let addr = Address::from_str(address)
            .map_err(|e| ChainClientError::InvalidAddress(e.to_string()))?;

        let balance = self
            .provider
            .get_balance(addr)
            .await
            .map_err(|e| ChainClientError::Rpc(e.to_string()))?;

        to_units(balance, 18)
    }

    /// ERC-20 balance of `wallet_address`, in whole tokens.
    pub async fn token_balance(
        &self,
        wallet_address: &str,
        token: &Erc20Token,
    ) -> Result<f64, ChainClientError> {
        let contract = Erc20Contract::new(&self.provider, token.address)?;
        let raw = contract.balance_of(wallet_address).await?;
        to_units(raw, token.decimals)
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }
}

/// Format a raw balance with the given number of decimals.
fn format_balance(balance: U256, decimals: u8) -> String {
    if balance.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = balance / divisor;
    let remainder = balance % divisor;

    if remainder.is_zero() {
        return whole.to_string();
    }

    let decimal_str = format!("{:0>width$}", remainder.to_string(), width = decimals as usize);
    let trimmed = decimal_str.trim_end_matches('0');
    format!("{}.{}", whole, trimmed)
}

fn to_units(balance: U256, decimals: u8) -> Result<f64, ChainClientError> {
    let formatted = format_balance(balance, decimals);
    formatted
        .parse()
        .map_err(|e| ChainClientError::InvalidResponse(format!("balance '{formatted}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_balance() {
        // 1 ETH = 1e18 wei
        let one_eth = U256::from(1_000_000_000_000_000_000u64);
        assert_eq!(format_balance(one_eth, 18), "1");

        let half_eth = U256::from(500_000_000_000_000_000u64);
        assert_eq!(format_balance(half_eth, 18), "0.5");

        let one_wei = U256::from(1u64);
        assert_eq!(format_balance(one_wei, 18), "0.000000000000000001");

        assert_eq!(format_balance(U256::ZERO, 18), "0");

        // 1.25 USDT = 1_250_000 base units
        assert_eq!(format_balance(U256::from(1_250_000u64), 6), "1.25");
    }

    #[test]
    fn to_units_parses_formatted_balance() {
        let value = to_units(U256::from(2_500_000u64), 6).unwrap();
        assert!((value - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_bad_rpc_url() {
        assert!(matches!(
            EvmClient::new(ETHEREUM_MAINNET, "not a url"),
            Err(ChainClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn mainnet_client_keeps_network() {
        let client = EvmClient::mainnet().unwrap();
        assert_eq!(client.network().chain_id, 1);
    }
}
