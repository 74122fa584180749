// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet Key Derivation
//!
//! Derives one key pair and address per supported chain from a BIP39
//! recovery phrase. Nothing here signs or broadcasts; the keys only back
//! the deposit addresses shown to the user.
//!
//! ## Derivation Paths
//!
//! | Chain | Path | Curve |
//! |-------|------|-------|
//! | BTC | `m/44'/0'/0'/0/0` | secp256k1 (BIP32) |
//! | ETH / USDT | `m/44'/60'/0'/0/0` | secp256k1 (BIP32) |
//! | XRP | `m/44'/144'/0'/0/0` | secp256k1 (BIP32) |
//! | SOL | `m/44'/501'/0'/0'` | ed25519 (SLIP-0010) |

pub mod address;
pub mod hd;
pub mod mnemonic;

use bip39::Mnemonic;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::models::{Wallet, WalletAddresses};

pub const BTC_PATH: &str = "m/44'/0'/0'/0/0";
pub const ETH_PATH: &str = "m/44'/60'/0'/0/0";
pub const XRP_PATH: &str = "m/44'/144'/0'/0/0";
pub const SOL_PATH: &str = "m/44'/501'/0'/0'";

/// Errors that can occur while deriving wallet keys.
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("Invalid mnemonic: {0}")]
    InvalidMnemonic(String),

    #[error("Invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("Key derivation failed: {0}")]
    Derivation(String),

    #[error("Address encoding failed: {0}")]
    Encoding(String),
}

/// Hex-encoded private keys, wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKeys {
    pub btc: String,
    pub eth: String,
    pub xrp: String,
    pub sol: String,
}

impl std::fmt::Debug for PrivateKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PrivateKeys([REDACTED])")
    }
}

/// Everything derived from one recovery phrase.
#[derive(Debug, Clone)]
pub struct WalletKeys {
    pub mnemonic: String,
    pub addresses: WalletAddresses,
    pub private_keys: PrivateKeys,
}

impl WalletKeys {
    /// Fresh wallet snapshot with no balances yet.
    ///
    /// The Ethereum address and key act as the primary pair.
    pub fn to_wallet(&self) -> Wallet {
        Wallet {
            address: self.addresses.eth.clone(),
            private_key: self.private_keys.eth.clone(),
            mnemonic: Some(self.mnemonic.clone()),
            addresses: self.addresses.clone(),
            crypto_balances: Vec::new(),
            total_usd_value: 0.0,
        }
    }
}

/// Generate a new phrase and derive every chain's keys from it.
pub fn generate_wallet_keys() -> Result<WalletKeys, KeyError> {
    let mnemonic = mnemonic::generate_mnemonic()?;
    derive_wallet_keys(&mnemonic)
}

/// Derive every chain's keys from an existing phrase.
pub fn restore_wallet_keys(phrase: &str) -> Result<WalletKeys, KeyError> {
    let mnemonic = mnemonic::parse_mnemonic(phrase)?;
    derive_wallet_keys(&mnemonic)
}

fn derive_wallet_keys(mnemonic: &Mnemonic) -> Result<WalletKeys, KeyError> {
    let seed = mnemonic::mnemonic_to_seed(mnemonic);

    let btc = hd::derive_secp256k1(seed.as_slice(), BTC_PATH)?;
    let eth = hd::derive_secp256k1(seed.as_slice(), ETH_PATH)?;
    let xrp = hd::derive_secp256k1(seed.as_slice(), XRP_PATH)?;
    let sol = hd::derive_ed25519(seed.as_slice(), SOL_PATH)?;

    let eth_address = address::ethereum(&eth.secret)?;

    Ok(WalletKeys {
        mnemonic: mnemonic.to_string(),
        addresses: WalletAddresses {
            btc: address::bitcoin_p2pkh(&btc.public),
            eth: eth_address.clone(),
            usdt: eth_address,
            xrp: address::xrp_classic(&xrp.public),
            sol: address::solana(&sol.public),
        },
        private_keys: PrivateKeys {
            btc: hex::encode(*btc.secret),
            eth: hex::encode(*eth.secret),
            xrp: hex::encode(*xrp.secret),
            sol: hex::encode(*sol.secret),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon \
                           abandon abandon abandon abandon abandon about";

    #[test]
    fn restore_matches_bip44_vectors() {
        let keys = restore_wallet_keys(ABANDON).unwrap();
        assert_eq!(keys.addresses.btc, "1LqBGSKuX5yYUonjxT5qGfpUsXKYYWeabA");
        assert_eq!(keys.addresses.eth, "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
        assert_eq!(keys.addresses.usdt, keys.addresses.eth);
        assert!(keys.addresses.xrp.starts_with('r'));
        assert_eq!(
            bs58::decode(&keys.addresses.sol).into_vec().unwrap().len(),
            32
        );
    }

    #[test]
    fn restore_is_deterministic() {
        let a = restore_wallet_keys(ABANDON).unwrap();
        let b = restore_wallet_keys(ABANDON).unwrap();
        assert_eq!(a.addresses, b.addresses);
        assert_eq!(a.private_keys.sol, b.private_keys.sol);
    }

    #[test]
    fn generate_round_trips_through_restore() {
        let generated = generate_wallet_keys().unwrap();
        let restored = restore_wallet_keys(&generated.mnemonic).unwrap();
        assert_eq!(generated.addresses, restored.addresses);
        assert_eq!(generated.private_keys.eth, restored.private_keys.eth);
    }

    #[test]
    fn invalid_phrase_is_rejected() {
        assert!(matches!(
            restore_wallet_keys("not a real phrase"),
            Err(KeyError::InvalidMnemonic(_))
        ));
    }

    #[test]
    fn to_wallet_uses_ethereum_as_primary() {
        let keys = restore_wallet_keys(ABANDON).unwrap();
        let wallet = keys.to_wallet();
        assert_eq!(wallet.address, keys.addresses.eth);
        assert_eq!(wallet.private_key, keys.private_keys.eth);
        assert_eq!(wallet.mnemonic.as_deref(), Some(keys.mnemonic.as_str()));
        assert!(wallet.crypto_balances.is_empty());
        assert_eq!(wallet.total_usd_value, 0.0);
    }

    #[test]
    fn private_keys_debug_is_redacted() {
        let keys = restore_wallet_keys(ABANDON).unwrap();
        let debug = format!("{:?}", keys.private_keys);
        assert!(!debug.contains(&keys.private_keys.eth));
    }
}
