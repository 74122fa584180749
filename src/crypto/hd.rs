// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Hierarchical deterministic key derivation.
//!
//! - secp256k1 chains (BTC, ETH, XRP) use BIP32 through the `bip32` crate.
//! - ed25519 chains (SOL) use SLIP-0010, which only defines hardened
//!   children. Paths like `m/44'/501'/0'/0'` must therefore be fully
//!   hardened.
//!
//! Reference: <https://github.com/satoshilabs/slips/blob/master/slip-0010.md>

use bip32::{DerivationPath, XPrv};
use ed25519_dalek::SigningKey;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use super::KeyError;

type HmacSha512 = Hmac<Sha512>;

/// The hardened index offset (0x80000000) per BIP-32/SLIP-0010.
const HARDENED_OFFSET: u32 = 0x8000_0000;

/// HMAC key for the SLIP-0010 ed25519 master key.
const ED25519_MASTER_KEY: &[u8] = b"ed25519 seed";

/// Derived secp256k1 key pair.
pub struct Secp256k1Key {
    pub secret: Zeroizing<[u8; 32]>,
    /// SEC1 compressed public key.
    pub public: [u8; 33],
}

/// Derived ed25519 key pair.
pub struct Ed25519Key {
    /// 32-byte ed25519 seed (the SLIP-0010 child key).
    pub secret: Zeroizing<[u8; 32]>,
    pub public: [u8; 32],
}

/// Derive a secp256k1 key along a BIP32 path such as `m/44'/0'/0'/0/0`.
pub fn derive_secp256k1(seed: &[u8], path: &str) -> Result<Secp256k1Key, KeyError> {
    let path: DerivationPath = path
        .parse()
        .map_err(|e: bip32::Error| KeyError::InvalidPath(format!("{path}: {e}")))?;

    let xprv = XPrv::derive_from_path(seed, &path)
        .map_err(|e| KeyError::Derivation(e.to_string()))?;

    Ok(Secp256k1Key {
        secret: Zeroizing::new(xprv.to_bytes()),
        public: xprv.public_key().to_bytes(),
    })
}

/// Derive an ed25519 key along a fully hardened SLIP-0010 path.
pub fn derive_ed25519(seed: &[u8], path: &str) -> Result<Ed25519Key, KeyError> {
    let indices = parse_hardened_path(path)?;

    let (mut key, mut chain_code) = split(hmac_sha512(ED25519_MASTER_KEY, seed)?);

    for index in indices {
        let mut data = [0u8; 37];
        data[1..33].copy_from_slice(&key);
        data[33..].copy_from_slice(&(index | HARDENED_OFFSET).to_be_bytes());

        let child = hmac_sha512(&chain_code, &data)?;
        data.zeroize();
        key.zeroize();
        chain_code.zeroize();
        (key, chain_code) = split(child);
    }

    let public = SigningKey::from_bytes(&key).verifying_key().to_bytes();
    let secret = Zeroizing::new(key);
    key.zeroize();
    chain_code.zeroize();

    Ok(Ed25519Key { secret, public })
}

fn split(mut i: [u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut left = [0u8; 32];
    let mut right = [0u8; 32];
    left.copy_from_slice(&i[..32]);
    right.copy_from_slice(&i[32..]);
    i.zeroize();
    (left, right)
}

fn hmac_sha512(key: &[u8], data: &[u8]) -> Result<[u8; 64], KeyError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|e| KeyError::Derivation(format!("HMAC-SHA512 key init failed: {e}")))?;
    mac.update(data);

    let mut output = [0u8; 64];
    output.copy_from_slice(&mac.finalize().into_bytes());
    Ok(output)
}

/// Parse `m/44'/501'/0'/0'` into raw indices (hardened offset not applied).
///
/// Every component must carry a `'` or `h` suffix.
fn parse_hardened_path(path: &str) -> Result<Vec<u32>, KeyError> {
    let trimmed = path.trim();
    let components = trimmed
        .strip_prefix("m/")
        .ok_or_else(|| KeyError::InvalidPath(format!("must start with 'm/', got '{trimmed}'")))?;

    let mut indices = Vec::new();
    for part in components.split('/') {
        let number = part
            .strip_suffix('\'')
            .or_else(|| part.strip_suffix('h'))
            .ok_or_else(|| {
                KeyError::InvalidPath(format!("ed25519 requires hardened index, got '{part}'"))
            })?;

        let index: u32 = number
            .parse()
            .map_err(|e| KeyError::InvalidPath(format!("invalid index '{number}': {e}")))?;

        if index >= HARDENED_OFFSET {
            return Err(KeyError::InvalidPath(format!("index {index} out of range")));
        }
        indices.push(index);
    }

    Ok(indices)
}
