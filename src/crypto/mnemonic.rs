// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! BIP39 recovery phrases.

use bip39::{Language, Mnemonic};
use zeroize::Zeroizing;

use super::KeyError;

/// Words in a generated phrase (128 bits of entropy).
pub const WORD_COUNT: usize = 12;

/// Generate a fresh English phrase from OS randomness.
pub fn generate_mnemonic() -> Result<Mnemonic, KeyError> {
    Mnemonic::generate_in(Language::English, WORD_COUNT)
        .map_err(|e| KeyError::InvalidMnemonic(e.to_string()))
}

/// Parse a user-supplied phrase.
///
/// Whitespace runs are collapsed and ASCII case is folded before the
/// checksum is verified, so copy-pasted phrases with stray spaces or
/// capitals still parse.
pub fn parse_mnemonic(phrase: &str) -> Result<Mnemonic, KeyError> {
    let normalized = phrase
        .split_whitespace()
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    if normalized.is_empty() {
        return Err(KeyError::InvalidMnemonic("empty phrase".into()));
    }

    Mnemonic::parse_in_normalized(Language::English, &normalized)
        .map_err(|e| KeyError::InvalidMnemonic(e.to_string()))
}

/// 64-byte seed with an empty passphrase.
pub fn mnemonic_to_seed(mnemonic: &Mnemonic) -> Zeroizing<[u8; 64]> {
    Zeroizing::new(mnemonic.to_seed(""))
}
