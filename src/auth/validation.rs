// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Form validation for the session flows.
//!
//! Each check reports the first offending field with a message suitable for
//! showing next to that field.

use crate::models::SignupRequest;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_PHONE_DIGITS: usize = 6;
pub const MAX_PHONE_DIGITS: usize = 15;

/// Validation failure of a single form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Loose `local@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Whether a login identifier should be treated as a phone number.
pub fn is_phone_identifier(identifier: &str) -> bool {
    let identifier = identifier.trim();
    identifier.starts_with('+')
        || (!identifier.is_empty() && identifier.chars().all(|c| c.is_ascii_digit()))
}

pub fn validate_email(email: &str) -> Result<(), FieldError> {
    if email.trim().is_empty() {
        return Err(FieldError::new("email", "Email is required"));
    }
    if !is_valid_email(email) {
        return Err(FieldError::new("email", "Please enter a valid email address"));
    }
    Ok(())
}

pub fn validate_signup(request: &SignupRequest) -> Result<(), FieldError> {
    if request.name.trim().is_empty() {
        return Err(FieldError::new("name", "Name is required"));
    }

    validate_email(&request.email)?;

    let digits = request.phone.chars().filter(char::is_ascii_digit).count();
    let only_digits = request
        .phone
        .chars()
        .all(|c| c.is_ascii_digit() || c == ' ' || c == '-');
    if !only_digits || !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(FieldError::new("phone", "Please enter a valid phone number"));
    }

    let code = request.country_code.trim();
    if !code.starts_with('+') || code.len() < 2 || !code[1..].chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::new("countryCode", "Please select a country code"));
    }

    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::new(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }

    if request.wallet_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::new(
            "walletPassword",
            format!("Wallet password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }

    Ok(())
}

/// Canonical `+<code><digits>` form used as the phone lookup key.
pub fn normalize_phone(country_code: &str, phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    format!("{}{}", country_code.trim(), digits)
}
