// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet API endpoints.
//!
//! Every endpoint requires an active session. The session's wallet is
//! loaded on first use, so a restarted server resumes transparently.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::CurrentUser,
    error::ApiError,
    models::{
        BackupRequest, DepositInfo, PurchaseRequest, RestoreWalletRequest, Transaction, User,
        WalletView, WithdrawRequest,
    },
    state::AppState,
};

/// Result of a refresh request.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RefreshResponse {
    /// False when a newer refresh superseded this one.
    pub applied: bool,
    pub wallet: WalletView,
}

/// A completed wallet operation and the wallet after it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WalletTransactionResponse {
    pub transaction: Transaction,
    pub wallet: WalletView,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BackupResponse {
    /// BIP39 recovery phrase.
    pub mnemonic: String,
}

/// Load the wallet of `user` if it is not loaded yet.
pub(crate) async fn ensure_loaded(state: &AppState, user: &User) -> Result<WalletView, ApiError> {
    Ok(state.wallet.load_for(user).await?)
}

#[utoipa::path(
    get,
    path = "/v1/wallet",
    tag = "Wallet",
    responses(
        (status = 200, description = "Wallet without key material", body = WalletView),
        (status = 401, description = "No active session")
    )
)]
pub async fn get_wallet(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<WalletView>, ApiError> {
    Ok(Json(ensure_loaded(&state, &user).await?))
}

#[utoipa::path(
    post,
    path = "/v1/wallet/refresh",
    tag = "Wallet",
    responses(
        (status = 200, description = "Balances and prices refreshed", body = RefreshResponse),
        (status = 401, description = "No active session")
    )
)]
pub async fn refresh_wallet(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
) -> Result<Json<RefreshResponse>, ApiError> {
    ensure_loaded(&state, &user).await?;
    let applied = state.wallet.refresh_balances().await?;
    let wallet = ensure_loaded(&state, &user).await?;
    Ok(Json(RefreshResponse { applied, wallet }))
}

/// Withdraw USDT to an external address.
///
/// Wrong wallet password and insufficient balance share one message.
#[utoipa::path(
    post,
    path = "/v1/wallet/withdraw",
    tag = "Wallet",
    request_body = WithdrawRequest,
    responses(
        (status = 200, description = "Withdrawal recorded", body = WalletTransactionResponse),
        (status = 400, description = "Invalid amount or missing address"),
        (status = 401, description = "No active session"),
        (status = 403, description = "Withdrawal not authorized")
    )
)]
pub async fn withdraw(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<WithdrawRequest>,
) -> Result<Json<WalletTransactionResponse>, ApiError> {
    ensure_loaded(&state, &user).await?;
    let transaction = state
        .wallet
        .withdraw_funds(request.amount, &request.to_address, &request.wallet_password)
        .await?;
    let wallet = ensure_loaded(&state, &user).await?;
    Ok(Json(WalletTransactionResponse {
        transaction,
        wallet,
    }))
}

/// Buy crypto with a card. Nothing is charged.
#[utoipa::path(
    post,
    path = "/v1/wallet/purchase",
    tag = "Wallet",
    request_body = PurchaseRequest,
    responses(
        (status = 201, description = "Purchase recorded", body = WalletTransactionResponse),
        (status = 400, description = "Invalid card or amount"),
        (status = 401, description = "No active session"),
        (status = 404, description = "Unknown asset")
    )
)]
pub async fn purchase(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<WalletTransactionResponse>), ApiError> {
    ensure_loaded(&state, &user).await?;
    let transaction = state
        .wallet
        .purchase(request.usd_amount, &request.symbol, &request.card)
        .await?;
    let wallet = ensure_loaded(&state, &user).await?;
    Ok((
        StatusCode::CREATED,
        Json(WalletTransactionResponse {
            transaction,
            wallet,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/wallet/deposit/{symbol}",
    tag = "Wallet",
    params(("symbol" = String, Path, description = "Asset symbol, e.g. BTC")),
    responses(
        (status = 200, description = "Deposit address and QR code", body = DepositInfo),
        (status = 401, description = "No active session"),
        (status = 404, description = "Unknown asset")
    )
)]
pub async fn deposit_info(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<DepositInfo>, ApiError> {
    ensure_loaded(&state, &user).await?;
    Ok(Json(state.wallet.deposit_info(&symbol).await?))
}

#[utoipa::path(
    post,
    path = "/v1/wallet/restore",
    tag = "Wallet",
    request_body = RestoreWalletRequest,
    responses(
        (status = 200, description = "Wallet keys replaced", body = WalletView),
        (status = 400, description = "Invalid recovery phrase"),
        (status = 401, description = "No active session")
    )
)]
pub async fn restore_wallet(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<RestoreWalletRequest>,
) -> Result<Json<WalletView>, ApiError> {
    ensure_loaded(&state, &user).await?;
    let wallet = state
        .wallet
        .restore_from_mnemonic(&request.mnemonic)
        .await?;
    tracing::info!(user = %user.email, "Wallet restored via API");
    Ok(Json(wallet))
}

#[utoipa::path(
    post,
    path = "/v1/wallet/backup",
    tag = "Wallet",
    request_body = BackupRequest,
    responses(
        (status = 200, description = "Recovery phrase", body = BackupResponse),
        (status = 401, description = "No active session"),
        (status = 403, description = "Wrong wallet password")
    )
)]
pub async fn backup_wallet(
    CurrentUser(user): CurrentUser,
    State(state): State<AppState>,
    Json(request): Json<BackupRequest>,
) -> Result<Json<BackupResponse>, ApiError> {
    ensure_loaded(&state, &user).await?;
    let mnemonic = state
        .wallet
        .backup_phrase(&request.wallet_password)
        .await
        .map_err(|e| match e {
            crate::wallet::WalletError::IncorrectPassword => {
                ApiError::forbidden("Wallet password is incorrect")
            }
            other => other.into(),
        })?;
    Ok(Json(BackupResponse { mnemonic }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CardDetails;
    use crate::state::test_support;

    fn card() -> CardDetails {
        CardDetails {
            card_number: "4242 4242 4242 4242".into(),
            expiry_date: "12/99".into(),
            cvv: "123".into(),
            card_name: "Alice".into(),
        }
    }

    #[tokio::test]
    async fn get_wallet_hides_key_material() {
        let (state, user) = test_support::signed_in().await;
        let Json(view) = get_wallet(CurrentUser(user), State(state)).await.unwrap();

        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("privateKey").is_none());
        assert!(json.get("mnemonic").is_none());
        assert_eq!(json["totalUsdValue"], 25_100.0);
    }

    #[tokio::test]
    async fn wallet_loads_lazily_for_resumed_session() {
        let (state, user) = test_support::signed_in().await;
        state.wallet.unload().await;

        let Json(view) = get_wallet(CurrentUser(user), State(state)).await.unwrap();
        assert_eq!(view.total_usd_value, 25_100.0);
    }

    #[tokio::test]
    async fn refresh_reports_applied() {
        let (state, user) = test_support::signed_in().await;
        let Json(body) = refresh_wallet(CurrentUser(user), State(state)).await.unwrap();
        assert!(body.applied);
        assert_eq!(body.wallet.crypto_balances.len(), 5);
    }

    #[tokio::test]
    async fn oversized_withdrawal_does_not_confirm_password() {
        let (state, user) = test_support::signed_in().await;

        let mut rejections = Vec::new();
        for guess in ["nope", "secret1"] {
            let err = withdraw(
                CurrentUser(user.clone()),
                State(state.clone()),
                Json(WithdrawRequest {
                    amount: 1e12,
                    to_address: "0xabc".into(),
                    wallet_password: guess.into(),
                }),
            )
            .await
            .unwrap_err();
            rejections.push((err.status, err.message));
        }

        assert_eq!(rejections[0].0, StatusCode::FORBIDDEN);
        assert_eq!(rejections[0], rejections[1]);
        assert_eq!(state.wallet.view().await.unwrap().total_usd_value, 25_100.0);
    }

    #[tokio::test]
    async fn withdraw_debits_usdt() {
        let (state, user) = test_support::signed_in().await;
        let Json(body) = withdraw(
            CurrentUser(user),
            State(state),
            Json(WithdrawRequest {
                amount: 50.0,
                to_address: "0xabc".into(),
                wallet_password: "secret1".into(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(body.transaction.amount, -50.0);
        assert_eq!(body.wallet.total_usd_value, 25_050.0);
    }

    #[tokio::test]
    async fn purchase_returns_created() {
        let (state, user) = test_support::signed_in().await;
        let (status, Json(body)) = purchase(
            CurrentUser(user),
            State(state),
            Json(PurchaseRequest {
                usd_amount: 500.0,
                symbol: "BTC".into(),
                card: card(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.transaction.currency, "BTC");
        assert!((body.wallet.total_usd_value - 25_600.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn deposit_info_for_unknown_asset_is_not_found() {
        let (state, user) = test_support::signed_in().await;
        let Json(info) = deposit_info(
            CurrentUser(user.clone()),
            State(state.clone()),
            Path("sol".into()),
        )
        .await
        .unwrap();
        assert_eq!(info.symbol, "SOL");

        let err = deposit_info(CurrentUser(user), State(state), Path("DOGE".into()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn backup_then_restore_round_trips_addresses() {
        let (state, user) = test_support::signed_in().await;
        let original = state.wallet.view().await.unwrap();

        let Json(backup) = backup_wallet(
            CurrentUser(user.clone()),
            State(state.clone()),
            Json(BackupRequest {
                wallet_password: "secret1".into(),
            }),
        )
        .await
        .unwrap();

        let Json(restored) = restore_wallet(
            CurrentUser(user.clone()),
            State(state.clone()),
            Json(RestoreWalletRequest {
                mnemonic: backup.mnemonic,
            }),
        )
        .await
        .unwrap();
        assert_eq!(restored.addresses, original.addresses);

        let err = backup_wallet(
            CurrentUser(user),
            State(state),
            Json(BackupRequest {
                wallet_password: "nope".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn restore_rejects_bad_phrase() {
        let (state, user) = test_support::signed_in().await;
        let err = restore_wallet(
            CurrentUser(user),
            State(state),
            Json(RestoreWalletRequest {
                mnemonic: "definitely not a recovery phrase".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
