// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Balance Refresher
//!
//! Background task that periodically refreshes the loaded wallet's
//! balances and prices, so the snapshot stays current even when no client
//! asks for a refresh.
//!
//! After an initial delay the refresher runs one cycle every
//! `interval` (default 120 s). A cycle with no wallet loaded is skipped.
//!
//! ## Shutdown
//!
//! Uses `tokio_util::sync::CancellationToken` for graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::error::WalletError;
use super::store::WalletStore;

pub struct BalanceRefresher {
    wallets: Arc<WalletStore>,
    initial_delay: Duration,
    interval: Duration,
}

impl BalanceRefresher {
    pub fn new(wallets: Arc<WalletStore>, initial_delay: Duration, interval: Duration) -> Self {
        Self {
            wallets,
            initial_delay,
            interval,
        }
    }

    /// Run until the cancellation token is triggered.
    ///
    /// ```rust,ignore
    /// tokio::spawn(refresher.run(shutdown.clone()));
    /// ```
    pub async fn run(self, shutdown: CancellationToken) {
        info!(
            interval_secs = self.interval.as_secs(),
            "Balance refresher starting"
        );

        let mut wait = self.initial_delay;
        loop {
            tokio::select! {
                _ = tokio::time::sleep(wait) => {},
                _ = shutdown.cancelled() => {
                    info!("Balance refresher shutting down");
                    return;
                }
            }

            self.refresh_step().await;
            wait = self.interval;
        }
    }

    async fn refresh_step(&self) {
        match self.wallets.refresh_balances().await {
            Ok(true) => {}
            Ok(false) => debug!("Periodic refresh superseded"),
            Err(WalletError::NoWallet) => {}
            Err(e) => warn!(error = %e, "Periodic balance refresh failed"),
        }
    }
}
