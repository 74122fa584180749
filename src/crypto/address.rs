// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Per-chain address encodings.
//!
//! | Chain | Payload | Encoding |
//! |-------|---------|----------|
//! | BTC | `0x00 ‖ HASH160(pubkey)` | Base58Check, Bitcoin alphabet |
//! | ETH | `keccak256(pubkey)[12..]` | `0x` hex, EIP-55 checksum |
//! | XRP | `0x00 ‖ HASH160(pubkey)` | Base58Check, Ripple alphabet |
//! | SOL | ed25519 public key | Base58 |

use alloy::signers::local::PrivateKeySigner;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use super::KeyError;

/// Version byte of Bitcoin mainnet P2PKH addresses.
const BTC_P2PKH_VERSION: u8 = 0x00;

/// Version byte of XRP Ledger classic account addresses.
const XRP_ACCOUNT_VERSION: u8 = 0x00;

/// `RIPEMD160(SHA256(data))`.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    let sha = Sha256::digest(data);
    let mut out = [0u8; 20];
    out.copy_from_slice(&Ripemd160::digest(sha));
    out
}

/// Bitcoin P2PKH address of a compressed public key.
pub fn bitcoin_p2pkh(public_key: &[u8; 33]) -> String {
    encode_bitcoin_hash160(&hash160(public_key))
}

pub fn encode_bitcoin_hash160(hash: &[u8; 20]) -> String {
    base58check(BTC_P2PKH_VERSION, hash, bs58::Alphabet::BITCOIN)
}

/// XRP classic address of a compressed public key.
pub fn xrp_classic(public_key: &[u8; 33]) -> String {
    encode_xrp_account_id(&hash160(public_key))
}

pub fn encode_xrp_account_id(account_id: &[u8; 20]) -> String {
    base58check(XRP_ACCOUNT_VERSION, account_id, bs58::Alphabet::RIPPLE)
}

/// EIP-55 checksummed Ethereum address of a secp256k1 private key.
pub fn ethereum(private_key: &[u8; 32]) -> Result<String, KeyError> {
    let signer = PrivateKeySigner::from_slice(private_key)
        .map_err(|e| KeyError::Encoding(format!("invalid secp256k1 key: {e}")))?;
    Ok(signer.address().to_checksum(None))
}

/// Solana address of an ed25519 public key.
pub fn solana(public_key: &[u8; 32]) -> String {
    bs58::encode(public_key).into_string()
}

fn base58check(version: u8, payload: &[u8], alphabet: &'static bs58::Alphabet) -> String {
    let mut data = Vec::with_capacity(1 + payload.len() + 4);
    data.push(version);
    data.extend_from_slice(payload);

    let checksum = Sha256::digest(Sha256::digest(&data));
    data.extend_from_slice(&checksum[..4]);

    bs58::encode(data).with_alphabet(alphabet).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_hash_encodes_to_known_bitcoin_address() {
        assert_eq!(
            encode_bitcoin_hash160(&[0u8; 20]),
            "1111111111111111111114oLvT2"
        );
    }

    #[test]
    fn zero_account_encodes_to_xrp_account_zero() {
        assert_eq!(
            encode_xrp_account_id(&[0u8; 20]),
            "rrrrrrrrrrrrrrrrrrrrrhoLvTp"
        );
    }

    #[test]
    fn xrp_address_checksum_verifies() {
        let address = xrp_classic(&[0x02; 33]);
        assert!(address.starts_with('r'));

        let decoded = bs58::decode(&address)
            .with_alphabet(bs58::Alphabet::RIPPLE)
            .into_vec()
            .unwrap();
        assert_eq!(decoded.len(), 25);
        assert_eq!(decoded[0], XRP_ACCOUNT_VERSION);

        let checksum = Sha256::digest(Sha256::digest(&decoded[..21]));
        assert_eq!(&decoded[21..], &checksum[..4]);
    }

    #[test]
    fn ethereum_address_from_known_key() {
        // Private key 1 -> generator point address
        let mut key = [0u8; 32];
        key[31] = 1;
        assert_eq!(
            ethereum(&key).unwrap(),
            "0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf"
        );
    }

    #[test]
    fn ethereum_rejects_zero_key() {
        assert!(matches!(ethereum(&[0u8; 32]), Err(KeyError::Encoding(_))));
    }

    #[test]
    fn solana_address_round_trips_public_key() {
        let public = [9u8; 32];
        let address = solana(&public);
        assert_eq!(bs58::decode(address).into_vec().unwrap(), public.to_vec());
    }
}
