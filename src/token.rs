//! CEP-18 ledger embedded by the pool for lender shares
//!
//! Also backs the demo asset tokens. Only the transfer surface is exposed as
//! entry points; supply changes go through `mint` / `burn`, which only the
//! embedding module can reach.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{Transfer, Approval};
use crate::errors::TokenError;

/// Balances, allowances and metadata of a CEP-18 token
#[odra::module]
pub struct ShareToken {
    name: Var<String>,
    symbol: Var<String>,
    decimals: Var<u8>,
    total_supply: Var<U256>,
    /// holder -> balance
    balances: Mapping<Address, U256>,
    /// (owner, spender) -> remaining allowance
    allowances: Mapping<(Address, Address), U256>,
}

#[odra::module]
impl ShareToken {
    /// Set the token metadata; supply starts at zero
    pub fn init(&mut self, name: String, symbol: String, decimals: u8) {
        self.name.set(name);
        self.symbol.set(symbol);
        self.decimals.set(decimals);
        self.total_supply.set(U256::zero());
    }

    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    /// Move `amount` from the caller to `to`
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.move_balance(caller, to, amount);
        true
    }

    /// Set the caller's allowance for `spender`, replacing any previous value
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.write_allowance(caller, spender, amount);
        true
    }

    /// Move `amount` from `from` to `to`, spending the caller's allowance
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let spender = self.env().caller();
        let remaining = self
            .allowance(from, spender)
            .checked_sub(amount)
            .unwrap_or_revert_with(&self.env(), TokenError::InsufficientAllowance);

        self.write_allowance(from, spender, remaining);
        self.move_balance(from, to, amount);
        true
    }
}

impl ShareToken {
    /// Credit newly issued tokens to `to`
    pub fn mint(&mut self, to: Address, amount: U256) {
        let supply = self.total_supply() + amount;
        let balance = self.balance_of(to) + amount;
        self.total_supply.set(supply);
        self.balances.set(&to, balance);

        self.env().emit_event(Transfer {
            from: self.env().self_address(),
            to,
            value: amount,
        });
    }

    /// Destroy `amount` of `from`'s tokens
    pub fn burn(&mut self, from: Address, amount: U256) {
        let remaining = self.debit(from, amount);
        let supply = self.total_supply() - amount;
        self.balances.set(&from, remaining);
        self.total_supply.set(supply);

        self.env().emit_event(Transfer {
            from,
            to: self.env().self_address(),
            value: amount,
        });
    }

    fn move_balance(&mut self, from: Address, to: Address, amount: U256) {
        let remaining = self.debit(from, amount);
        self.balances.set(&from, remaining);
        let received = self.balance_of(to) + amount;
        self.balances.set(&to, received);

        self.env().emit_event(Transfer {
            from,
            to,
            value: amount,
        });
    }

    // Balance left after taking `amount` from `owner`
    fn debit(&self, owner: Address, amount: U256) -> U256 {
        self.balance_of(owner)
            .checked_sub(amount)
            .unwrap_or_revert_with(&self.env(), TokenError::InsufficientBalance)
    }

    fn write_allowance(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);

        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }
}

/// External token interface for the pool asset and collateral ledgers
#[odra::external_contract]
pub trait Cep18Token {
    fn balance_of(&self, owner: Address) -> U256;

    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;

    fn approve(&mut self, spender: Address, amount: U256) -> bool;

    fn allowance(&self, owner: Address, spender: Address) -> U256;

    fn total_supply(&self) -> U256;

    fn decimals(&self) -> u8;
}

#[cfg(test)]
mod tests {
    use super::*;
    use odra::host::Deployer;

    #[test]
    fn test_init() {
        let env = odra_test::env();
        let token = ShareToken::deploy(
            &env,
            ShareTokenInitArgs {
                name: String::from("Pool Share"),
                symbol: String::from("PSH"),
                decimals: 6,
            },
        );
        assert_eq!(token.name(), "Pool Share");
        assert_eq!(token.symbol(), "PSH");
        assert_eq!(token.decimals(), 6);
        assert_eq!(token.total_supply(), U256::zero());
        assert_eq!(token.balance_of(env.get_account(0)), U256::zero());
    }
}
