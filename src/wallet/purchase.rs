// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Card checks for simulated purchases. No card is ever charged.

use chrono::{Datelike, NaiveDate};

use crate::auth::FieldError;
use crate::models::CardDetails;

/// Smallest purchase, in USD.
pub const MIN_PURCHASE_USD: f64 = 10.0;

const CARD_DIGITS: usize = 16;

/// Validate `card` as of `today`.
pub fn validate_card(card: &CardDetails, today: NaiveDate) -> Result<(), FieldError> {
    let digits: Vec<u32> = card
        .card_number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
        .ok_or_else(|| field("cardNumber", "Card number must contain only digits"))?;

    if digits.len() != CARD_DIGITS || !luhn_valid(&digits) {
        return Err(field("cardNumber", "Please enter a valid card number"));
    }

    let (month, year) = parse_expiry(&card.expiry_date)
        .ok_or_else(|| field("expiryDate", "Expiry date must be MM/YY"))?;
    if (year, month) < (today.year(), today.month()) {
        return Err(field("expiryDate", "Card has expired"));
    }

    let cvv = card.cvv.trim();
    if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(field("cvv", "CVV must be 3 or 4 digits"));
    }

    if card.card_name.trim().is_empty() {
        return Err(field("cardName", "Cardholder name is required"));
    }

    Ok(())
}

fn field(name: &'static str, message: &str) -> FieldError {
    FieldError {
        field: name,
        message: message.to_string(),
    }
}

/// Luhn checksum over the full number, check digit included.
fn luhn_valid(digits: &[u32]) -> bool {
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 { doubled - 9 } else { doubled }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

/// `MM/YY` into `(month, four-digit year)`.
fn parse_expiry(raw: &str) -> Option<(u32, i32)> {
    let (month, year) = raw.trim().split_once('/')?;
    let (month, year) = (month.trim(), year.trim());
    if month.len() != 2 || year.len() != 2 {
        return None;
    }
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    (1..=12).contains(&month).then_some((month, 2000 + year))
}
