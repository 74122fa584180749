// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::auth::SessionError;
use crate::crypto::KeyError;
use crate::wallet::WalletError;

/// Message for every rejected withdrawal authorization.
pub const WITHDRAWAL_REJECTED: &str =
    "Withdrawal could not be authorized. Check your wallet password and balance.";

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// 500 with a generic body; the detail only goes to the log.
    pub fn internal(detail: impl std::fmt::Display) -> Self {
        error!(error = %detail, "Internal error");
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::Validation(field) => Self::bad_request(field.message),
            SessionError::InvalidCredentials => Self::unauthorized(e.to_string()),
            SessionError::NotAuthenticated => Self::unauthorized("Sign in to continue"),
            SessionError::EmailTaken => Self::conflict(e.to_string()),
            SessionError::PasswordHash(_) => Self::internal(e),
            SessionError::Storage(inner) => Self::internal(inner),
        }
    }
}

impl From<WalletError> for ApiError {
    fn from(e: WalletError) -> Self {
        match e {
            WalletError::IncorrectPassword | WalletError::InsufficientFunds => {
                Self::forbidden(WITHDRAWAL_REJECTED)
            }
            WalletError::NoWallet => Self::not_found(e.to_string()),
            WalletError::UnknownAsset(_) => Self::not_found(e.to_string()),
            WalletError::InvalidAmount(_) | WalletError::MissingDestination => {
                Self::bad_request(e.to_string())
            }
            WalletError::Card(field) => Self::bad_request(field.message),
            WalletError::Key(KeyError::InvalidMnemonic(_)) => {
                Self::bad_request("Invalid recovery phrase")
            }
            WalletError::PriceUnavailable(_) => {
                Self::new(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
            }
            WalletError::Session(inner) => inner.into(),
            WalletError::Key(_) | WalletError::Storage(_) => Self::internal(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::FieldError;
    use axum::body::to_bytes;

    #[test]
    fn constructors_set_status_and_message() {
        let nf = ApiError::not_found("missing");
        assert_eq!(nf.status, StatusCode::NOT_FOUND);
        assert_eq!(nf.message, "missing");

        let bad = ApiError::bad_request("bad");
        assert_eq!(bad.status, StatusCode::BAD_REQUEST);

        let internal = ApiError::internal("disk on fire");
        assert_eq!(internal.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.message, "Internal server error");
    }

    #[tokio::test]
    async fn into_response_returns_json_body() {
        let response = ApiError::bad_request("bad data").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"bad data"}"#);
    }

    #[test]
    fn withdrawal_authorization_failures_are_indistinguishable() {
        let password = ApiError::from(WalletError::IncorrectPassword);
        let funds = ApiError::from(WalletError::InsufficientFunds);
        assert_eq!(password.status, StatusCode::FORBIDDEN);
        assert_eq!(funds.status, password.status);
        assert_eq!(password.message, funds.message);
    }

    #[test]
    fn session_errors_map_to_status() {
        let field = FieldError {
            field: "email",
            message: "Please enter a valid email".into(),
        };
        let validation = ApiError::from(SessionError::Validation(field));
        assert_eq!(validation.status, StatusCode::BAD_REQUEST);
        assert_eq!(validation.message, "Please enter a valid email");

        assert_eq!(
            ApiError::from(SessionError::EmailTaken).status,
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(WalletError::Session(SessionError::InvalidCredentials)).status,
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn bad_mnemonic_is_a_client_error() {
        let e = ApiError::from(WalletError::Key(KeyError::InvalidMnemonic("x".into())));
        assert_eq!(e.status, StatusCode::BAD_REQUEST);
    }
}
