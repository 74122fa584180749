// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration.
//!
//! This module provides read-only balance queries for:
//! - Native ETH and the USDT ERC-20 token on Ethereum
//! - Bitcoin, XRP Ledger and Solana through public explorers
//!
//! Nothing here signs or broadcasts transactions.

pub mod client;
pub mod erc20;
pub mod explorer;
pub mod types;

pub use client::EvmClient;
pub use explorer::ExplorerClient;
pub use types::*;

/// Errors that can occur during balance queries.
#[derive(Debug, thiserror::Error)]
pub enum ChainClientError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Contract error: {0}")]
    Contract(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
