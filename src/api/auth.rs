// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session endpoints.
//!
//! Signing up or logging in also loads (or creates) the user's wallet;
//! logging out unloads it.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    auth::CurrentUser,
    error::ApiError,
    models::{LoginRequest, ResetPasswordRequest, SignupRequest, User, WalletView},
    state::AppState,
};

/// Active user and their wallet.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: User,
    pub wallet: WalletView,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[utoipa::path(
    post,
    path = "/v1/auth/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = AuthResponse),
        (status = 400, description = "A field failed validation"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let user = state.session.signup(&request).await?;
    let wallet = state.wallet.load_for(&user).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse { user, wallet })))
}

#[utoipa::path(
    post,
    path = "/v1/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Unknown phone number or empty password")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = state
        .session
        .login(&request.identifier, &request.password)
        .await?;
    let wallet = state.wallet.load_for(&user).await?;
    Ok(Json(AuthResponse { user, wallet }))
}

#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    tag = "Auth",
    responses((status = 204, description = "Signed out"))
)]
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.session.logout().await?;
    state.wallet.unload().await;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/v1/auth/reset-password",
    tag = "Auth",
    request_body = ResetPasswordRequest,
    responses(
        (status = 202, description = "Reset email queued", body = MessageResponse),
        (status = 400, description = "Malformed email")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    Json(request): Json<ResetPasswordRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    state.session.reset_password(&request.email).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "If an account exists for this email, a reset link has been sent".into(),
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/v1/auth/me",
    tag = "Auth",
    responses(
        (status = 200, description = "Signed-in user", body = User),
        (status = 401, description = "No active session")
    )
)]
pub async fn me(CurrentUser(user): CurrentUser) -> Json<User> {
    Json(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support;
    use axum::extract::FromRequestParts;
    use axum::http::Request;

    fn signup_request() -> SignupRequest {
        SignupRequest {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            phone: "5551234567".into(),
            country_code: "+1".into(),
            password: "hunter22".into(),
            wallet_password: "secret1".into(),
        }
    }

    async fn current_user(state: &AppState) -> Result<CurrentUser, ApiError> {
        let (mut parts, _) = Request::builder().body(()).unwrap().into_parts();
        CurrentUser::from_request_parts(&mut parts, state).await
    }

    #[tokio::test]
    async fn signup_creates_session_and_wallet() {
        let state = test_support::state();
        let (status, Json(body)) = signup(State(state.clone()), Json(signup_request()))
            .await
            .expect("signup succeeds");

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body.user.email, "alice@example.com");
        assert!(body.wallet.has_mnemonic);
        assert_eq!(current_user(&state).await.unwrap().0, body.user);
    }

    #[tokio::test]
    async fn duplicate_signup_conflicts() {
        let state = test_support::state();
        signup(State(state.clone()), Json(signup_request()))
            .await
            .unwrap();
        let err = signup(State(state), Json(signup_request()))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn invalid_signup_reports_field_message() {
        let mut request = signup_request();
        request.email = "not-an-email".into();
        let err = signup(State(test_support::state()), Json(request))
            .await
            .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn phone_login_restores_registered_user_and_wallet() {
        let state = test_support::state();
        let (_, Json(created)) = signup(State(state.clone()), Json(signup_request()))
            .await
            .unwrap();
        logout(State(state.clone())).await.unwrap();

        let Json(body) = login(
            State(state.clone()),
            Json(LoginRequest {
                identifier: "+15551234567".into(),
                password: "anything".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(body.user.id, created.user.id);
        assert_eq!(body.wallet.address, created.wallet.address);
    }

    #[tokio::test]
    async fn unknown_phone_is_unauthorized() {
        let err = login(
            State(test_support::state()),
            Json(LoginRequest {
                identifier: "+19998887777".into(),
                password: "pw".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn logout_clears_session_and_wallet() {
        let state = test_support::state();
        signup(State(state.clone()), Json(signup_request()))
            .await
            .unwrap();

        assert_eq!(
            logout(State(state.clone())).await.unwrap(),
            StatusCode::NO_CONTENT
        );
        assert!(!state.wallet.is_loaded().await);
        let err = current_user(&state).await.err().unwrap();
        assert_eq!(err.status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn reset_password_accepts_valid_email_only() {
        let state = test_support::state();
        let (status, _) = reset_password(
            State(state.clone()),
            Json(ResetPasswordRequest {
                email: "alice@example.com".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::ACCEPTED);

        let err = reset_password(
            State(state),
            Json(ResetPasswordRequest {
                email: "nope".into(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }
}
