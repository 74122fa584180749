// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::SessionStore;
use crate::market::MarketData;
use crate::storage::KeyValueStore;
use crate::wallet::WalletStore;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn KeyValueStore>,
    pub session: Arc<SessionStore>,
    pub wallet: Arc<WalletStore>,
    pub market: Arc<MarketData>,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn KeyValueStore>,
        session: Arc<SessionStore>,
        wallet: Arc<WalletStore>,
        market: Arc<MarketData>,
    ) -> Self {
        Self {
            storage,
            session,
            wallet,
            market,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! In-memory state with no latency and scripted balances.

    use super::*;
    use crate::config::SimulatedLatency;
    use crate::market::coingecko::CoinGeckoClient;
    use crate::market::PriceQuote;
    use crate::models::{SignupRequest, User, WalletAddresses};
    use crate::storage::{MemoryStore, StorageKeys};
    use crate::wallet::{BalanceSnapshot, BalanceSource};
    use async_trait::async_trait;

    /// 100 USDT and 0.5 BTC, USDT at 1 and BTC at 50 000.
    pub struct FixedSource;

    #[async_trait]
    impl BalanceSource for FixedSource {
        async fn fetch(&self, _addresses: &WalletAddresses) -> BalanceSnapshot {
            let mut snapshot = BalanceSnapshot::default();
            snapshot.balances.insert("USDT", Some(100.0));
            snapshot.balances.insert("BTC", Some(0.5));
            snapshot.quotes.insert(
                "USDT",
                PriceQuote {
                    price: 1.0,
                    change_24h: 0.0,
                },
            );
            snapshot.quotes.insert(
                "BTC",
                PriceQuote {
                    price: 50_000.0,
                    change_24h: 1.5,
                },
            );
            snapshot
        }
    }

    pub fn state() -> AppState {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let session = Arc::new(
            SessionStore::new(kv.clone(), StorageKeys::default(), SimulatedLatency::none())
                .unwrap(),
        );
        let wallet = Arc::new(WalletStore::new(
            kv.clone(),
            StorageKeys::default(),
            session.clone(),
            Arc::new(FixedSource),
            SimulatedLatency::none(),
        ));
        // Discard port; market calls fail fast and fall back.
        let market = Arc::new(MarketData::new(
            CoinGeckoClient::new("http://127.0.0.1:9").unwrap(),
        ));
        AppState::new(kv, session, wallet, market)
    }

    /// State with Alice signed up (wallet password `secret1`) and refreshed.
    pub async fn signed_in() -> (AppState, User) {
        let state = state();
        let user = state
            .session
            .signup(&SignupRequest {
                name: "Alice".into(),
                email: "alice@example.com".into(),
                phone: "5551234567".into(),
                country_code: "+1".into(),
                password: "hunter22".into(),
                wallet_password: "secret1".into(),
            })
            .await
            .unwrap();
        state.wallet.load_for(&user).await.unwrap();
        state.wallet.refresh_balances().await.unwrap();
        (state, user)
    }
}
