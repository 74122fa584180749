// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session errors.

use super::validation::FieldError;
use crate::storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// A form field failed validation.
    #[error("{0}")]
    Validation(FieldError),

    /// Unknown phone number or missing password.
    #[error("Invalid login credentials")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    EmailTaken,

    /// No active session.
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<FieldError> for SessionError {
    fn from(e: FieldError) -> Self {
        SessionError::Validation(e)
    }
}
