// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};

use crate::{market::MarketCoin, state::AppState};

/// Top ten coins by market cap. Never fails; falls back to a static snapshot.
#[utoipa::path(
    get,
    path = "/v1/market/index",
    tag = "Market",
    responses(
        (status = 200, description = "Market index", body = Vec<MarketCoin>)
    )
)]
pub async fn market_index(State(state): State<AppState>) -> Json<Vec<MarketCoin>> {
    Json(state.market.market_index().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market::fallback;
    use crate::state::test_support;

    #[tokio::test]
    async fn offline_index_uses_snapshot() {
        let Json(coins) = market_index(State(test_support::state())).await;
        assert_eq!(coins, fallback::market_index());
        assert_eq!(coins.len(), 10);
    }
}
