// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use usdtbanc_wallet::{
    api::router,
    auth::SessionStore,
    blockchain::{EvmClient, ExplorerClient, ETHEREUM_MAINNET},
    config::{AppConfig, DataDir},
    logging,
    market::{CoinGeckoClient, MarketData},
    state::AppState,
    storage::{FileStore, KeyValueStore, MemoryStore, StorageKeys},
    wallet::{BalanceRefresher, LiveBalanceSource, WalletStore},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();
    logging::init(config.log_format);

    let storage: Arc<dyn KeyValueStore> = match &config.data_dir {
        DataDir::Memory => {
            info!("Using in-memory storage; state is lost on exit");
            Arc::new(MemoryStore::new())
        }
        DataDir::Path(dir) => {
            info!(data_dir = %dir, "Using file storage");
            Arc::new(FileStore::open(dir)?)
        }
    };
    let keys = StorageKeys::default();

    let market = Arc::new(MarketData::new(CoinGeckoClient::new(
        config.coingecko_api_url.clone(),
    )?));
    let source = LiveBalanceSource::new(
        EvmClient::new(ETHEREUM_MAINNET, &config.eth_rpc_url)?,
        ExplorerClient::new(
            config.btc_api_url.clone(),
            config.xrp_api_url.clone(),
            config.sol_rpc_url.clone(),
        )?,
        market.clone(),
    );

    let session = Arc::new(SessionStore::new(
        storage.clone(),
        keys.clone(),
        config.latency,
    )?);
    let wallet = Arc::new(WalletStore::new(
        storage.clone(),
        keys,
        session.clone(),
        Arc::new(source),
        config.latency,
    ));

    // A resumed session gets its wallet back right away.
    if let Some(user) = session.current_user().await {
        wallet.load_for(&user).await?;
    }

    let shutdown = CancellationToken::new();
    let refresher = tokio::spawn(
        BalanceRefresher::new(
            wallet.clone(),
            config.refresh_initial_delay,
            config.refresh_interval,
        )
        .run(shutdown.clone()),
    );

    let app = router(AppState::new(storage, session, wallet, market));

    let addr = config.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "USDTBanc wallet server listening (docs at /docs)");

    axum::serve(listener, app)
        .with_graceful_shutdown({
            let shutdown = shutdown.clone();
            async move {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    tracing::error!(error = %e, "Failed to listen for shutdown signal");
                }
                info!("Shutdown requested");
                shutdown.cancel();
            }
        })
        .await?;

    shutdown.cancel();
    refresher.await?;
    Ok(())
}
