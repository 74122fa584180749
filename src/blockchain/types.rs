// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

/// EVM network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// Default RPC endpoint URL
    pub rpc_url: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

/// Ethereum mainnet configuration.
pub const ETHEREUM_MAINNET: NetworkConfig = NetworkConfig {
    name: "Ethereum",
    chain_id: 1,
    rpc_url: "https://eth.llamarpc.com",
    explorer_url: "https://etherscan.io",
};

/// Known ERC-20 token.
#[derive(Debug, Clone)]
pub struct Erc20Token {
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
    /// Mainnet contract address
    pub address: &'static str,
}

/// Tether USD on Ethereum mainnet.
pub const USDT_TOKEN: Erc20Token = Erc20Token {
    symbol: "USDT",
    name: "Tether USD",
    decimals: 6,
    address: "0xdAC17F958D2ee523a2206206994597C13D831ec7",
};

/// Display and pricing metadata of a tracked asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Asset {
    pub symbol: &'static str,
    pub name: &'static str,
    /// CoinGecko coin id used for price lookups
    pub coingecko_id: &'static str,
    pub icon: &'static str,
    pub image: &'static str,
    pub network: &'static str,
    pub network_color: &'static str,
    /// USD price used when no quote has ever been fetched
    pub fallback_price: f64,
}

/// Tracked assets, in wallet display order.
pub const ASSETS: [Asset; 5] = [
    Asset {
        symbol: "USDT",
        name: "Tether USD",
        coingecko_id: "tether",
        icon: "₮",
        image: "https://assets.coingecko.com/coins/images/325/large/Tether.png",
        network: "Ethereum",
        network_color: "bg-blue-500/20 text-blue-400 border border-blue-500/30",
        fallback_price: 1.0,
    },
    Asset {
        symbol: "BTC",
        name: "Bitcoin",
        coingecko_id: "bitcoin",
        icon: "₿",
        image: "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
        network: "Bitcoin",
        network_color: "bg-orange-500/20 text-orange-400 border border-orange-500/30",
        fallback_price: 43_000.0,
    },
    Asset {
        symbol: "ETH",
        name: "Ethereum",
        coingecko_id: "ethereum",
        icon: "Ξ",
        image: "https://assets.coingecko.com/coins/images/279/large/ethereum.png",
        network: "Ethereum",
        network_color: "bg-indigo-500/20 text-indigo-400 border border-indigo-500/30",
        fallback_price: 2_600.0,
    },
    Asset {
        symbol: "XRP",
        name: "Ripple",
        coingecko_id: "ripple",
        icon: "◉",
        image: "https://assets.coingecko.com/coins/images/44/large/xrp-symbol-white-128.png",
        network: "XRP Ledger",
        network_color: "bg-gray-500/20 text-gray-400 border border-gray-500/30",
        fallback_price: 0.6,
    },
    Asset {
        symbol: "SOL",
        name: "Solana",
        coingecko_id: "solana",
        icon: "◎",
        image: "https://assets.coingecko.com/coins/images/4128/large/solana.png",
        network: "Solana",
        network_color: "bg-purple-500/20 text-purple-400 border border-purple-500/30",
        fallback_price: 100.0,
    },
];

/// Look up a tracked asset by ticker (case-insensitive).
pub fn asset(symbol: &str) -> Option<&'static Asset> {
    ASSETS
        .iter()
        .find(|asset| asset.symbol.eq_ignore_ascii_case(symbol))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(asset("btc").map(|a| a.name), Some("Bitcoin"));
        assert_eq!(asset("USDT").map(|a| a.coingecko_id), Some("tether"));
        assert!(asset("DOGE").is_none());
    }

    #[test]
    fn usdt_is_the_first_asset() {
        assert_eq!(ASSETS[0].symbol, USDT_TOKEN.symbol);
        assert_eq!(ASSETS[0].network, ETHEREUM_MAINNET.name);
    }
}
