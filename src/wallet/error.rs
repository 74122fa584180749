// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet store errors.

use crate::auth::{FieldError, SessionError};
use crate::crypto::KeyError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// No wallet is loaded for the active session.
    #[error("No wallet loaded")]
    NoWallet,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Destination address is required")]
    MissingDestination,

    #[error("Wallet password is incorrect")]
    IncorrectPassword,

    #[error("Insufficient USDT balance")]
    InsufficientFunds,

    #[error("Asset {0} is not tracked by this wallet")]
    UnknownAsset(String),

    /// The asset has no usable USD price to convert with.
    #[error("No price available for {0}")]
    PriceUnavailable(String),

    #[error("{0}")]
    Card(FieldError),

    #[error("Key derivation failed: {0}")]
    Key(#[from] KeyError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl WalletError {
    /// Authorization failures of a withdrawal share one user-facing message.
    pub fn is_authorization_failure(&self) -> bool {
        matches!(
            self,
            WalletError::IncorrectPassword | WalletError::InsufficientFunds
        )
    }
}
