// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Key-Value Persistence
//!
//! Session and wallet state are mirrored into a flat key-value store. The
//! stores never talk to the filesystem directly; they receive an
//! `Arc<dyn KeyValueStore>` at construction time.
//!
//! ## Key Layout
//!
//! ```text
//! usdtbanc_user                       # active session user
//! usdtbanc_users                      # signed-up users (phone login lookup)
//! usdtbanc_wallet_password            # wallet password hash (Argon2 PHC)
//! usdtbanc_wallet_{email}             # per-user wallet snapshot
//! usdtbanc_transactions_{email}       # per-user transaction ledger
//! ```
//!
//! Values are JSON documents. Writes are plain read-modify-write without
//! transactional isolation; the last writer wins.

pub mod file_store;
pub mod keys;
pub mod memory;

use std::io;

use serde::{de::DeserializeOwned, Serialize};

pub use file_store::FileStore;
pub use keys::StorageKeys;
pub use memory::MemoryStore;

/// Error type for key-value storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// I/O error during file operations
    Io(io::Error),
    /// JSON serialization/deserialization error
    Json(serde_json::Error),
    /// Key cannot be mapped onto the backing store
    InvalidKey(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "I/O error: {e}"),
            StorageError::Json(e) => write!(f, "JSON error: {e}"),
            StorageError::InvalidKey(key) => write!(f, "Invalid storage key: {key}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Json(e) => Some(e),
            StorageError::InvalidKey(_) => None,
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(e: io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e)
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Raw string key-value persistence.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Check the backing medium is usable.
    fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }
}

/// Typed JSON access on top of any [`KeyValueStore`].
pub trait JsonStore {
    /// Read and deserialize the value under `key`.
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>>;

    /// Serialize and store `value` under `key`.
    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()>;
}

impl<S: KeyValueStore + ?Sized> JsonStore for S {
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> StorageResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set(key, &raw)
    }
}
