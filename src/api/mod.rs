// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    market::MarketCoin,
    models::{
        BackupRequest, CardDetails, CryptoBalance, DepositInfo, LoginRequest, NewTransaction,
        PurchaseRequest, ResetPasswordRequest, RestoreWalletRequest, SignupRequest, Transaction,
        TransactionStatus, TransactionType, User, WalletAddresses, WalletView, WithdrawRequest,
    },
    state::AppState,
};

pub mod auth;
pub mod health;
pub mod market;
pub mod transactions;
pub mod wallet;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/reset-password", post(auth::reset_password))
        .route("/auth/me", get(auth::me))
        .route("/wallet", get(wallet::get_wallet))
        .route("/wallet/refresh", post(wallet::refresh_wallet))
        .route("/wallet/withdraw", post(wallet::withdraw))
        .route("/wallet/purchase", post(wallet::purchase))
        .route("/wallet/deposit/{symbol}", get(wallet::deposit_info))
        .route("/wallet/restore", post(wallet::restore_wallet))
        .route("/wallet/backup", post(wallet::backup_wallet))
        .route(
            "/wallet/transactions",
            get(transactions::list_transactions).post(transactions::add_transaction),
        )
        .route("/market/index", get(market::market_index))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(CorsLayer::permissive())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        auth::signup,
        auth::login,
        auth::logout,
        auth::reset_password,
        auth::me,
        wallet::get_wallet,
        wallet::refresh_wallet,
        wallet::withdraw,
        wallet::purchase,
        wallet::deposit_info,
        wallet::restore_wallet,
        wallet::backup_wallet,
        transactions::list_transactions,
        transactions::add_transaction,
        market::market_index
    ),
    components(
        schemas(
            User,
            WalletAddresses,
            CryptoBalance,
            WalletView,
            DepositInfo,
            Transaction,
            TransactionType,
            TransactionStatus,
            NewTransaction,
            SignupRequest,
            LoginRequest,
            ResetPasswordRequest,
            WithdrawRequest,
            CardDetails,
            PurchaseRequest,
            RestoreWalletRequest,
            BackupRequest,
            MarketCoin,
            auth::AuthResponse,
            auth::MessageResponse,
            wallet::RefreshResponse,
            wallet::WalletTransactionResponse,
            wallet::BackupResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Health", description = "Liveness and readiness"),
        (name = "Auth", description = "Sessions and accounts"),
        (name = "Wallet", description = "Balances, withdrawals, purchases and backup"),
        (name = "Transactions", description = "Wallet ledger"),
        (name = "Market", description = "Market data")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(test_support::state());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/v1/auth/signup",
            "/v1/wallet/deposit/{symbol}",
            "/v1/wallet/backup",
            "/v1/wallet/transactions",
            "/v1/market/index",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[tokio::test]
    async fn wallet_routes_require_session() {
        let app = router(test_support::state());
        let (status, body) = send(
            app,
            Request::get("/v1/wallet").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Sign in to continue");
    }

    #[tokio::test]
    async fn signup_then_fetch_wallet_over_http() {
        let app = router(test_support::state());

        let (status, body) = send(
            app.clone(),
            post_json(
                "/v1/auth/signup",
                serde_json::json!({
                    "name": "Alice",
                    "email": "alice@example.com",
                    "phone": "5551234567",
                    "countryCode": "+1",
                    "password": "hunter22",
                    "walletPassword": "secret1"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["user"]["email"], "alice@example.com");
        assert!(body["wallet"].get("privateKey").is_none());

        let (status, body) = send(
            app,
            Request::get("/v1/wallet/deposit/BTC")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["network"], "Bitcoin");
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let app = router(test_support::state());
        let response = app
            .oneshot(Request::get("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(response.headers().contains_key("x-request-id"));
    }
}
