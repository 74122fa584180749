// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the active session.
//!
//! Use the `CurrentUser` extractor in handlers that require a signed-in
//! user:
//!
//! ```rust,ignore
//! async fn my_handler(CurrentUser(user): CurrentUser) -> impl IntoResponse {
//!     // user is the session's User
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::error::ApiError;
use crate::models::User;
use crate::state::AppState;

/// The signed-in user. Rejects with 401 when no session is active.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .session
            .current_user()
            .await
            .map(CurrentUser)
            .ok_or_else(|| ApiError::unauthorized("Sign in to continue"))
    }
}
