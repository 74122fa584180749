// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Session Store
//!
//! Holds the identity of the active session and mirrors it into the
//! key-value store, so a restarted process resumes the same session.
//!
//! ## Login Rules
//!
//! - An identifier starting with `+` or made only of digits is a phone
//!   number. It must match a signed-up user, whose identity is restored.
//! - Anything else is treated as an email. Any non-empty password is
//!   accepted and a fresh identity is minted for that email.
//!
//! Neither path checks the account password; this is a demo service.
//! The wallet password set at signup is the only secret that is verified.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use super::error::SessionError;
use super::password::{hash_wallet_password, verify_wallet_password};
use super::validation::{is_phone_identifier, normalize_phone, validate_email, validate_signup};
use crate::config::{simulate, SimulatedLatency};
use crate::models::{RegisteredUser, SignupRequest, User};
use crate::storage::{JsonStore, KeyValueStore, StorageKeys};

pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    latency: SimulatedLatency,
    current: RwLock<Option<User>>,
}

impl SessionStore {
    /// Create the store, resuming any persisted session.
    pub fn new(
        kv: Arc<dyn KeyValueStore>,
        keys: StorageKeys,
        latency: SimulatedLatency,
    ) -> Result<Self, SessionError> {
        let current = match kv.get_json::<User>(&keys.current_user()) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted session");
                kv.remove(&keys.current_user())?;
                None
            }
        };

        if let Some(user) = &current {
            info!(user = %user.email, "Resumed persisted session");
        }

        Ok(Self {
            kv,
            keys,
            latency,
            current: RwLock::new(current),
        })
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Log in with an email or phone number.
    pub async fn login(&self, identifier: &str, password: &str) -> Result<User, SessionError> {
        simulate(self.latency.login).await;

        let identifier = identifier.trim();
        if identifier.is_empty() || password.is_empty() {
            return Err(SessionError::InvalidCredentials);
        }

        let users = self.registered_users()?;

        let (user, digest) = if is_phone_identifier(identifier) {
            let phone: String = identifier
                .chars()
                .filter(|c| *c == '+' || c.is_ascii_digit())
                .collect();
            let registered = users
                .into_iter()
                .find(|u| u.phone == phone)
                .ok_or(SessionError::InvalidCredentials)?;
            let digest = registered.wallet_password_digest.clone();
            (User::from(registered), digest)
        } else {
            let digest = users
                .iter()
                .rev()
                .find(|u| u.email.eq_ignore_ascii_case(identifier))
                .and_then(|u| u.wallet_password_digest.clone());
            let name = identifier
                .split('@')
                .next()
                .unwrap_or(identifier)
                .to_string();
            let user = User {
                id: new_user_id(),
                email: identifier.to_string(),
                name,
                created_at: Utc::now(),
            };
            (user, digest)
        };

        self.activate(&user, digest.as_deref()).await?;
        info!(user = %user.email, "User logged in");
        Ok(user)
    }

    /// Create an account and make it the active session.
    pub async fn signup(&self, request: &SignupRequest) -> Result<User, SessionError> {
        validate_signup(request)?;

        simulate(self.latency.signup).await;

        let email = request.email.trim().to_string();
        let mut users = self.registered_users()?;
        if users.iter().any(|u| u.email.eq_ignore_ascii_case(&email)) {
            return Err(SessionError::EmailTaken);
        }

        let digest = hash_wallet_password(&request.wallet_password)?;
        let registered = RegisteredUser {
            id: new_user_id(),
            email,
            name: request.name.trim().to_string(),
            phone: normalize_phone(&request.country_code, &request.phone),
            created_at: Utc::now(),
            wallet_password_digest: Some(digest.clone()),
        };

        users.push(registered.clone());
        self.kv.set_json(&self.keys.users(), &users)?;

        let user = User::from(registered);
        self.activate(&user, Some(&digest)).await?;

        info!(user = %user.email, "User signed up");
        Ok(user)
    }

    /// End the active session and forget its wallet password.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let mut current = self.current.write().await;
        self.kv.remove(&self.keys.current_user())?;
        self.kv.remove(&self.keys.wallet_password())?;

        if let Some(user) = current.take() {
            info!(user = %user.email, "User logged out");
        }
        Ok(())
    }

    /// Pretend to send a password reset email.
    pub async fn reset_password(&self, email: &str) -> Result<(), SessionError> {
        validate_email(email)?;
        simulate(self.latency.reset_password).await;
        info!(email = %email.trim(), "Password reset requested");
        Ok(())
    }

    /// Compare `candidate` with the wallet password of the active session.
    pub fn verify_wallet_password(&self, candidate: &str) -> Result<bool, SessionError> {
        Ok(match self.kv.get(&self.keys.wallet_password())? {
            Some(stored) => verify_wallet_password(candidate, &stored),
            None => false,
        })
    }

    fn registered_users(&self) -> Result<Vec<RegisteredUser>, SessionError> {
        Ok(self
            .kv
            .get_json::<Vec<RegisteredUser>>(&self.keys.users())?
            .unwrap_or_default())
    }

    async fn activate(&self, user: &User, digest: Option<&str>) -> Result<(), SessionError> {
        let mut current = self.current.write().await;

        self.kv.set_json(&self.keys.current_user(), user)?;
        match digest {
            Some(digest) => self.kv.set(&self.keys.wallet_password(), digest)?,
            None => self.kv.remove(&self.keys.wallet_password())?,
        }

        *current = Some(user.clone());
        Ok(())
    }
}

fn new_user_id() -> String {
    format!("user_{}", Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn store(kv: Arc<dyn KeyValueStore>) -> SessionStore {
        SessionStore::new(kv, StorageKeys::default(), SimulatedLatency::none()).unwrap()
    }

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

    #[tokio::test]
    async fn signup_activates_and_survives_reload() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let sessions = store(kv.clone());

        let user = sessions.signup(&signup_request()).await.unwrap();
        assert!(user.id.starts_with("user_"));
        assert_eq!(user.name, "Alice");
        assert!(sessions.is_authenticated().await);

        let reloaded = store(kv);
        assert_eq!(reloaded.current_user().await, Some(user));
    }

    #[tokio::test]
    async fn signup_rejects_invalid_form_without_side_effects() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let sessions = store(kv.clone());

        let mut request = signup_request();
        request.wallet_password = "123".into();
        let err = sessions.signup(&request).await.unwrap_err();
        assert!(matches!(err, SessionError::Validation(f) if f.field == "walletPassword"));
        assert!(!sessions.is_authenticated().await);
        assert!(kv.get(&StorageKeys::default().users()).unwrap().is_none());
    }

    #[tokio::test]
    async fn signup_rejects_duplicate_email() {
        let sessions = store(Arc::new(MemoryStore::new()));
        sessions.signup(&signup_request()).await.unwrap();

        let mut again = signup_request();
        again.email = "ALICE@example.com".into();
        assert!(matches!(
            sessions.signup(&again).await,
            Err(SessionError::EmailTaken)
        ));
    }

    #[tokio::test]
    async fn wallet_password_is_stored_hashed_and_verifies() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let sessions = store(kv.clone());
        sessions.signup(&signup_request()).await.unwrap();

        let raw = kv.get(&StorageKeys::default().wallet_password()).unwrap().unwrap();
        assert_ne!(raw, "secret1");
        assert!(sessions.verify_wallet_password("secret1").unwrap());
        assert!(!sessions.verify_wallet_password("wrong").unwrap());
    }

    #[tokio::test]
    async fn email_login_mints_identity_from_address() {
        let sessions = store(Arc::new(MemoryStore::new()));
        let user = sessions.login("bob@example.com", "anything").await.unwrap();
        assert_eq!(user.email, "bob@example.com");
        assert_eq!(user.name, "bob");
        assert!(user.id.starts_with("user_"));
        assert!(!sessions.verify_wallet_password("anything").unwrap());
    }

    #[tokio::test]
    async fn login_requires_password() {
        let sessions = store(Arc::new(MemoryStore::new()));
        assert!(matches!(
            sessions.login("bob@example.com", "").await,
            Err(SessionError::InvalidCredentials)
        ));
        assert!(matches!(
            sessions.login("  ", "pw").await,
            Err(SessionError::InvalidCredentials)
        ));
        assert!(!sessions.is_authenticated().await);
    }

    #[tokio::test]
    async fn phone_login_resolves_signed_up_user() {
        let sessions = store(Arc::new(MemoryStore::new()));
        let signed_up = sessions.signup(&signup_request()).await.unwrap();
        sessions.logout().await.unwrap();
        assert!(!sessions.verify_wallet_password("secret1").unwrap());

        let user = sessions.login("+15551234567", "pw").await.unwrap();
        assert_eq!(user, signed_up);
        assert!(sessions.verify_wallet_password("secret1").unwrap());
    }

    #[tokio::test]
    async fn unknown_phone_fails() {
        let sessions = store(Arc::new(MemoryStore::new()));
        assert!(matches!(
            sessions.login("+4400000000", "pw").await,
            Err(SessionError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn email_login_restores_wallet_password_of_registered_email() {
        let sessions = store(Arc::new(MemoryStore::new()));
        sessions.signup(&signup_request()).await.unwrap();
        sessions.logout().await.unwrap();

        sessions.login("alice@example.com", "pw").await.unwrap();
        assert!(sessions.verify_wallet_password("secret1").unwrap());
    }

    #[tokio::test]
    async fn logout_clears_persisted_session() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let sessions = store(kv.clone());
        sessions.signup(&signup_request()).await.unwrap();
        sessions.logout().await.unwrap();

        assert!(sessions.current_user().await.is_none());
        let keys = StorageKeys::default();
        assert!(kv.get(&keys.current_user()).unwrap().is_none());
        assert!(kv.get(&keys.wallet_password()).unwrap().is_none());
        // The users list survives for later phone logins.
        assert!(kv.get(&keys.users()).unwrap().is_some());
    }

    #[tokio::test]
    async fn reset_password_validates_email_only() {
        let sessions = store(Arc::new(MemoryStore::new()));
        assert!(sessions.reset_password("alice@example.com").await.is_ok());
        assert!(matches!(
            sessions.reset_password("nope").await,
            Err(SessionError::Validation(_))
        ));
        assert!(!sessions.is_authenticated().await);
    }

    #[tokio::test]
    async fn corrupt_session_is_discarded() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        kv.set(&StorageKeys::default().current_user(), "{broken").unwrap();
        let sessions = store(kv.clone());
        assert!(sessions.current_user().await.is_none());
        assert!(kv.get(&StorageKeys::default().current_user()).unwrap().is_none());
    }
}
