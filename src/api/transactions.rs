// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet ledger endpoints.

use axum::{extract::State, http::StatusCode, Json};

use super::wallet::ensure_loaded;
use crate::{
    auth::CurrentUser,
    error::ApiError,
    models::{NewTransaction, Transaction},
    state::AppState,
};

/// List the ledger, newest first.
#[utoipa::path(
    get,
    path = "/v1/wallet/transactions",
    tag = "Transactions",
    responses(
        (status = 200, description = "Ledger entries, newest first", body = Vec<Transaction>),
        (status = 401, description = "No active session")
    )
)]
pub async fn list_transactions(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    ensure_loaded(&state, &user).await?;
    Ok(Json(state.wallet.transactions().await?))
}

/// Append an entry to the ledger.
///
/// Balances are not touched; the id and timestamp are assigned here.
#[utoipa::path(
    post,
    path = "/v1/wallet/transactions",
    tag = "Transactions",
    request_body = NewTransaction,
    responses(
        (status = 201, description = "Entry recorded", body = Transaction),
        (status = 401, description = "No active session")
    )
)]
pub async fn add_transaction(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(entry): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), ApiError> {
    ensure_loaded(&state, &user).await?;
    if !entry.amount.is_finite() || entry.currency.trim().is_empty() {
        return Err(ApiError::bad_request("Amount and currency are required"));
    }
    let tx = state.wallet.add_transaction(entry).await?;
    Ok((StatusCode::CREATED, Json(tx)))
}
