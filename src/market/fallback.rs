// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Static market index shown when CoinGecko is unreachable.

use super::MarketCoin;

struct Row {
    id: &'static str,
    symbol: &'static str,
    name: &'static str,
    price: f64,
    change: f64,
    market_cap: f64,
    image: &'static str,
}

const ROWS: [Row; 10] = [
    Row { id: "bitcoin", symbol: "btc", name: "Bitcoin", price: 43_250.0, change: -1.2, market_cap: 847e9, image: "https://assets.coingecko.com/coins/images/1/large/bitcoin.png" },
    Row { id: "ethereum", symbol: "eth", name: "Ethereum", price: 2_650.0, change: 2.1, market_cap: 318e9, image: "https://assets.coingecko.com/coins/images/279/large/ethereum.png" },
    Row { id: "tether", symbol: "usdt", name: "Tether", price: 1.0, change: 0.01, market_cap: 95e9, image: "https://assets.coingecko.com/coins/images/325/large/Tether.png" },
    Row { id: "binancecoin", symbol: "bnb", name: "BNB", price: 315.0, change: -0.8, market_cap: 47e9, image: "https://assets.coingecko.com/coins/images/825/large/bnb-icon2_2x.png" },
    Row { id: "solana", symbol: "sol", name: "Solana", price: 100.0, change: 3.5, market_cap: 45e9, image: "https://assets.coingecko.com/coins/images/4128/large/solana.png" },
    Row { id: "ripple", symbol: "xrp", name: "XRP", price: 0.60, change: -2.1, market_cap: 34e9, image: "https://assets.coingecko.com/coins/images/44/large/xrp-symbol-white-128.png" },
    Row { id: "usd-coin", symbol: "usdc", name: "USDC", price: 1.0, change: 0.0, market_cap: 32e9, image: "https://assets.coingecko.com/coins/images/6319/large/USD_Coin_icon.png" },
    Row { id: "cardano", symbol: "ada", name: "Cardano", price: 0.45, change: 1.8, market_cap: 16e9, image: "https://assets.coingecko.com/coins/images/975/large/cardano.png" },
    Row { id: "avalanche-2", symbol: "avax", name: "Avalanche", price: 38.0, change: -1.5, market_cap: 15e9, image: "https://assets.coingecko.com/coins/images/12559/large/Avalanche_Circle_RedWhite_Trans.png" },
    Row { id: "dogecoin", symbol: "doge", name: "Dogecoin", price: 0.08, change: 4.2, market_cap: 12e9, image: "https://assets.coingecko.com/coins/images/5/large/dogecoin.png" },
];

/// Ten largest coins by market cap, as of the last static snapshot.
pub fn market_index() -> Vec<MarketCoin> {
    ROWS.iter()
        .map(|row| MarketCoin {
            id: row.id.to_string(),
            symbol: row.symbol.to_string(),
            name: row.name.to_string(),
            image: row.image.to_string(),
            current_price: Some(row.price),
            market_cap: Some(row.market_cap),
            price_change_percentage_24h: Some(row.change),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_index_is_sorted_by_market_cap() {
        let index = market_index();
        assert_eq!(index.len(), 10);
        assert!(index
            .windows(2)
            .all(|w| w[0].market_cap >= w[1].market_cap));
    }
}
