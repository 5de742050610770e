//! Demo CEP-18 tokens for deploying and testing the lending pool
//! Each token is a separate type so Odra can deploy them independently
use odra::prelude::*;
use odra::casper_types::U256;
use crate::token::ShareToken;

/// Pool asset - the token lenders supply and borrowers draw
#[odra::module]
pub struct PoolAssetToken {
    token: SubModule<ShareToken>,
}

#[odra::module]
impl PoolAssetToken {
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        self.token.init(name, symbol, decimals);
    }

    pub fn name(&self) -> String { self.token.name() }
    pub fn symbol(&self) -> String { self.token.symbol() }
    pub fn decimals(&self) -> u8 { self.token.decimals() }
    pub fn total_supply(&self) -> U256 { self.token.total_supply() }
    pub fn balance_of(&self, owner: Address) -> U256 { self.token.balance_of(owner) }
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 { self.token.allowance(owner, spender) }
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool { self.token.transfer(to, amount) }
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool { self.token.approve(spender, amount) }
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool { self.token.transfer_from(from, to, amount) }

    /// Faucet mint for test networks
    pub fn mint(&mut self, to: Address, amount: U256) { self.token.mint(to, amount) }
}

/// Collateral asset - the token borrowers post
#[odra::module]
pub struct CollateralToken {
    token: SubModule<ShareToken>,
}

#[odra::module]
impl CollateralToken {
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        self.token.init(name, symbol, decimals);
    }

    pub fn name(&self) -> String { self.token.name() }
    pub fn symbol(&self) -> String { self.token.symbol() }
    pub fn decimals(&self) -> u8 { self.token.decimals() }
    pub fn total_supply(&self) -> U256 { self.token.total_supply() }
    pub fn balance_of(&self, owner: Address) -> U256 { self.token.balance_of(owner) }
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 { self.token.allowance(owner, spender) }
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool { self.token.transfer(to, amount) }
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool { self.token.approve(spender, amount) }
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool { self.token.transfer_from(from, to, amount) }

    /// Faucet mint for test networks
    pub fn mint(&mut self, to: Address, amount: U256) { self.token.mint(to, amount) }
}
