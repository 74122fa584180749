// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Session handling for the demo banking service.
//!
//! ## Session Flow
//!
//! 1. `signup` validates the form, appends the user to the persisted users
//!    list, stores an Argon2 hash of the wallet password and activates the
//!    session.
//! 2. `login` resolves a phone number against the users list, or mints an
//!    identity for an email address.
//! 3. Handlers that need a session use the [`CurrentUser`] extractor.
//! 4. `logout` clears the session and the wallet password hash.
//!
//! ## Security
//!
//! - Account passwords are never checked or stored
//! - Wallet passwords are stored as Argon2id PHC strings

pub mod error;
pub mod extractor;
pub mod password;
pub mod session;
pub mod validation;

pub use error::SessionError;
pub use extractor::CurrentUser;
pub use session::SessionStore;
pub use validation::FieldError;
