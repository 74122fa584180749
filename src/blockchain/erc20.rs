// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! ERC-20 token contract reads.

use std::str::FromStr;

use alloy::{
    primitives::{Address, U256},
    providers::Provider,
    sol,
};

use super::ChainClientError;

sol! {
    #[sol(rpc)]
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
    }
}

/// ERC-20 contract wrapper.
pub struct Erc20Contract<P> {
    contract: IERC20::IERC20Instance<P>,
}

impl<P: Provider + Clone> Erc20Contract<P> {
    pub fn new(provider: &P, contract_address: &str) -> Result<Self, ChainClientError> {
        let address = Address::from_str(contract_address)
            .map_err(|e| ChainClientError::InvalidAddress(e.to_string()))?;

        Ok(Self {
            contract: IERC20::new(address, provider.clone()),
        })
    }

    /// Raw balance of `wallet_address` in the token's smallest unit.
    pub async fn balance_of(&self, wallet_address: &str) -> Result<U256, ChainClientError> {
        let addr = Address::from_str(wallet_address)
            .map_err(|e| ChainClientError::InvalidAddress(e.to_string()))?;

        self.contract
            .balanceOf(addr)
            .call()
            .await
            .map_err(|e| ChainClientError::Contract(e.to_string()))
    }
}
