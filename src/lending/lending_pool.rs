//! Lending Pool - Main contract for deposits, borrows, and repayments
//!
//! Core lending contract that coordinates:
//! - Pool-asset deposits and redemptions against lender shares
//! - Collateral deposits and withdrawals
//! - Borrowing and repayment against debt shares
//! - Full liquidation of undercollateralized accounts
//! - Interest accrual into the lender and borrower share prices
//!
//! Every entry point except `deposit_collateral` accrues interest first.
//! Borrows and collateral withdrawals check the collateralization ratio
//! after the position has been updated and the tokens have moved.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use crate::math::FixedPoint;
use crate::token::{Cep18TokenContractRef, ShareToken};
use super::accrual::PoolState;
use super::collateral_manager::{BorrowerAccount, CollateralMath};
use super::errors::LendingError;
use super::events::{
    Borrow, Deposit, DepositCollateral, InterestAccrued, Liquidate, Redeem, Repay,
    WithdrawCollateral,
};
use super::interest_rate::InterestRateModel;
use super::liquidation::LiquidationEngine;
use super::price_oracle::PriceFeedContractRef;

/// Lending Pool contract
#[odra::module]
pub struct LendingPool {
    /// Pool asset token address
    asset_token: Var<Address>,
    /// Collateral token address
    collateral_token: Var<Address>,
    /// Price feed for the collateral asset
    price_oracle: Var<Address>,
    /// Decimals of the pool asset token
    asset_decimals: Var<u8>,
    /// Decimals of the collateral token
    collateral_decimals: Var<u8>,
    /// Aggregates, share prices and accrual clock
    state: Var<PoolState>,
    /// Borrower positions
    accounts: Mapping<Address, BorrowerAccount>,
    /// Lender share ledger
    shares: SubModule<ShareToken>,
}

#[odra::module]
impl LendingPool {
    /// Initialize the lending pool
    ///
    /// # Arguments
    /// * `asset_token` - CEP-18 token lenders supply and borrowers draw
    /// * `collateral_token` - CEP-18 token borrowers post
    /// * `price_oracle` - Feed pricing one collateral unit in pool-asset units
    /// * `share_name` - Name of the lender share token
    /// * `share_symbol` - Symbol of the lender share token
    pub fn init(
        &mut self,
        asset_token: Address,
        collateral_token: Address,
        price_oracle: Address,
        share_name: String,
        share_symbol: String,
    ) {
        if asset_token == collateral_token {
            self.env().revert(LendingError::InvalidConfiguration);
        }

        let asset_decimals = Cep18TokenContractRef::new(self.env(), asset_token).decimals();
        let collateral_decimals = Cep18TokenContractRef::new(self.env(), collateral_token).decimals();

        self.asset_token.set(asset_token);
        self.collateral_token.set(collateral_token);
        self.price_oracle.set(price_oracle);
        self.asset_decimals.set(asset_decimals);
        self.collateral_decimals.set(collateral_decimals);
        self.shares.init(share_name, share_symbol, asset_decimals);
        self.state.set(PoolState::new(self.now()));
    }

    // ========================================
    // Liquidity
    // ========================================

    /// Deposit the pool asset and receive lender shares
    ///
    /// Reverts with `Slippage` when fewer than `min_shares_out` shares would
    /// be minted.
    pub fn deposit(&mut self, amount: U256, min_shares_out: U256) -> U256 {
        let mut state = self.accrue();
        let caller = self.env().caller();

        let shares = state.assets_to_lender_shares(amount).unwrap_or_revert(&self.env());
        if shares < min_shares_out {
            self.env().revert(LendingError::Slippage);
        }

        self.asset().transfer_from(caller, self.self_address(), amount);
        self.shares.mint(caller, shares);

        state.total_deposited = state
            .total_deposited
            .checked_add(amount)
            .unwrap_or_revert_with(&self.env(), LendingError::MathOverflow);
        self.state.set(state);

        self.env().emit_event(Deposit {
            user: caller,
            amount,
            shares,
        });

        shares
    }

    /// Burn lender shares and receive the pool asset
    ///
    /// Only idle liquidity (deposits not lent out) can be redeemed.
    pub fn redeem(&mut self, shares: U256, min_amount_out: U256) -> U256 {
        let mut state = self.accrue();
        let caller = self.env().caller();

        let amount = state.lender_shares_to_assets(shares).unwrap_or_revert(&self.env());
        if amount < min_amount_out {
            self.env().revert(LendingError::Slippage);
        }
        if state.idle_liquidity() < amount {
            self.env().revert(LendingError::InsufficientLiquidity);
        }

        self.shares.burn(caller, shares);
        self.asset().transfer(caller, amount);

        state.total_deposited = FixedPoint::sub_floor_zero(state.total_deposited, amount);
        self.state.set(state);

        self.env().emit_event(Redeem {
            user: caller,
            shares,
            amount,
        });

        amount
    }

    // ========================================
    // Collateral
    // ========================================

    /// Deposit collateral; purely additive, so no accrual is needed
    pub fn deposit_collateral(&mut self, amount: U256) {
        let caller = self.env().caller();

        self.collateral().transfer_from(caller, self.self_address(), amount);

        let mut account = self.account(caller);
        account.collateral = account
            .collateral
            .checked_add(amount)
            .unwrap_or_revert_with(&self.env(), LendingError::MathOverflow);
        self.accounts.set(&caller, account);

        self.env().emit_event(DepositCollateral {
            user: caller,
            amount,
        });
    }

    /// Withdraw collateral, keeping the account at or above 150%
    pub fn withdraw_collateral(&mut self, amount: U256) {
        let state = self.accrue();
        let caller = self.env().caller();

        let mut account = self.account(caller);
        if account.collateral < amount {
            self.env().revert(LendingError::InsufficientCollateral);
        }
        account.collateral = account.collateral - amount;
        self.accounts.set(&caller, account.clone());

        self.collateral().transfer(caller, amount);

        let ratio = self.ratio_of(&account, &state);
        if !CollateralMath::meets_minimum(ratio) {
            self.env().revert(LendingError::MinCollateralization);
        }

        self.env().emit_event(WithdrawCollateral {
            user: caller,
            amount,
        });
    }

    // ========================================
    // Borrowing
    // ========================================

    /// Borrow the pool asset against posted collateral
    ///
    /// A zero amount only accrues. The ratio is checked against the debt
    /// including this borrow.
    pub fn borrow(&mut self, amount: U256) {
        let mut state = self.accrue();
        if amount.is_zero() {
            return;
        }
        let caller = self.env().caller();

        let available = self.asset().balance_of(self.self_address());
        if amount > available {
            self.env().revert(LendingError::InsufficientLiquidity);
        }

        let new_shares = state.assets_to_debt_shares(amount).unwrap_or_revert(&self.env());
        if new_shares.is_zero() {
            self.env().revert(LendingError::ZeroDebtShares);
        }

        let mut account = self.account(caller);
        account.debt_shares = account
            .debt_shares
            .checked_add(new_shares)
            .unwrap_or_revert_with(&self.env(), LendingError::MathOverflow);
        self.accounts.set(&caller, account.clone());

        self.asset().transfer(caller, amount);

        let ratio = self.ratio_of(&account, &state);
        if !CollateralMath::meets_minimum(ratio) {
            self.env().revert(LendingError::MinCollateralization);
        }

        state.total_borrowed = state
            .total_borrowed
            .checked_add(amount)
            .unwrap_or_revert_with(&self.env(), LendingError::MathOverflow);
        self.state.set(state);

        self.env().emit_event(Borrow {
            user: caller,
            amount,
        });
    }

    /// Repay debt with the pool asset; returns the debt shares burned
    ///
    /// Paying more than is owed clears the debt and the excess stays in the
    /// pool.
    pub fn repay(&mut self, amount: U256, min_shares_burned: U256) -> U256 {
        let mut state = self.accrue();
        let caller = self.env().caller();

        let shares_to_burn = state.assets_to_debt_shares(amount).unwrap_or_revert(&self.env());
        if shares_to_burn < min_shares_burned {
            self.env().revert(LendingError::Slippage);
        }

        self.asset().transfer_from(caller, self.self_address(), amount);

        let mut account = self.account(caller);
        account.debt_shares = FixedPoint::sub_floor_zero(account.debt_shares, shares_to_burn);
        self.accounts.set(&caller, account);

        // Recorded in share units against a principal-basis total
        state.total_borrowed = FixedPoint::sub_floor_zero(state.total_borrowed, shares_to_burn);
        self.state.set(state);

        self.env().emit_event(Repay {
            user: caller,
            shares_burned: shares_to_burn,
        });

        shares_to_burn
    }

    // ========================================
    // Liquidation
    // ========================================

    /// Repay a liquidatable account's whole debt and take all its collateral
    pub fn liquidate(&mut self, borrower: Address) {
        let mut state = self.accrue();
        let liquidator = self.env().caller();

        let account = self.account(borrower);
        let ratio = self.ratio_of(&account, &state);
        if !LiquidationEngine::can_liquidate(ratio) {
            self.env().revert(LendingError::HealthyAccount);
        }

        let plan = LiquidationEngine::plan(&account, state.borrower_share_price)
            .unwrap_or_revert(&self.env());

        self.asset().transfer_from(liquidator, self.self_address(), plan.amount_owed);
        self.collateral().transfer(liquidator, plan.collateral_seized);

        state.total_borrowed = FixedPoint::sub_floor_zero(state.total_borrowed, plan.amount_owed);
        self.state.set(state);
        self.accounts.set(&borrower, BorrowerAccount::empty());

        self.env().emit_event(Liquidate {
            liquidator,
            borrower,
            collateral_seized: plan.collateral_seized,
        });
    }

    // ========================================
    // Interest Accrual
    // ========================================

    /// Bring both share prices up to the current block time
    pub fn update(&mut self) {
        self.accrue();
    }

    // ========================================
    // View Functions
    // ========================================

    /// Fraction of deposits currently borrowed, scaled by 1e18
    pub fn utilization(&self) -> U256 {
        self.load_state().utilization().unwrap_or_revert(&self.env())
    }

    /// Borrower and lender rates per second at `utilization`
    pub fn interest_rate(&self, utilization: U256) -> (U256, U256) {
        let rates = InterestRateModel::rates(utilization).unwrap_or_revert(&self.env());
        (rates.borrower_rate, rates.lender_rate)
    }

    /// Value of the user's collateral in pool-asset units
    pub fn collateral_value(&self, user: Address) -> U256 {
        self.value_of(self.account(user).collateral)
    }

    /// Collateral value over debt value, scaled by 1e18; `U256::MAX` without debt
    pub fn collateralization_ratio(&self, user: Address) -> U256 {
        self.ratio_of(&self.account(user), &self.load_state())
    }

    /// Whether the account is strictly below the liquidation threshold
    pub fn can_liquidate(&self, user: Address) -> bool {
        LiquidationEngine::can_liquidate(self.collateralization_ratio(user))
    }

    /// Debt shares and collateral of `user`; the zero record when unknown
    pub fn get_account(&self, user: Address) -> BorrowerAccount {
        self.account(user)
    }

    /// Pool asset owed by `user` at the stored borrower share price
    pub fn debt_value(&self, user: Address) -> U256 {
        let debt_shares = self.account(user).debt_shares;
        self.load_state().debt_shares_to_assets(debt_shares).unwrap_or_revert(&self.env())
    }

    pub fn get_pool_state(&self) -> PoolState {
        self.load_state()
    }

    /// Lender shares a deposit of `amount` would mint at the stored price
    pub fn preview_deposit(&self, amount: U256) -> U256 {
        self.load_state().assets_to_lender_shares(amount).unwrap_or_revert(&self.env())
    }

    /// Pool asset `shares` would redeem for at the stored price
    pub fn preview_redeem(&self, shares: U256) -> U256 {
        self.load_state().lender_shares_to_assets(shares).unwrap_or_revert(&self.env())
    }

    pub fn asset_token(&self) -> Address {
        self.asset_token.get_or_revert_with(LendingError::InvalidConfiguration)
    }

    pub fn collateral_token(&self) -> Address {
        self.collateral_token.get_or_revert_with(LendingError::InvalidConfiguration)
    }

    pub fn price_oracle(&self) -> Address {
        self.price_oracle.get_or_revert_with(LendingError::InvalidConfiguration)
    }

    // ========================================
    // Lender Share Token (CEP-18)
    // ========================================

    pub fn name(&self) -> String {
        self.shares.name()
    }

    pub fn symbol(&self) -> String {
        self.shares.symbol()
    }

    pub fn decimals(&self) -> u8 {
        self.shares.decimals()
    }

    pub fn total_supply(&self) -> U256 {
        self.shares.total_supply()
    }

    pub fn balance_of(&self, owner: Address) -> U256 {
        self.shares.balance_of(owner)
    }

    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.shares.allowance(owner, spender)
    }

    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        self.shares.transfer(to, amount)
    }

    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        self.shares.approve(spender, amount)
    }

    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        self.shares.transfer_from(from, to, amount)
    }

    // ========================================
    // Internal
    // ========================================

    /// Accrue into storage and return the up-to-date state
    fn accrue(&mut self) -> PoolState {
        let mut state = self.load_state();
        let now = self.now();
        let moved = state.accrue(now).unwrap_or_revert(&self.env());
        self.state.set(state.clone());

        if moved {
            self.env().emit_event(InterestAccrued {
                lender_share_price: state.lender_share_price,
                borrower_share_price: state.borrower_share_price,
                timestamp: now,
            });
        }
        state
    }

    fn ratio_of(&self, account: &BorrowerAccount, state: &PoolState) -> U256 {
        if !account.has_debt() {
            return U256::MAX;
        }
        let value = self.value_of(account.collateral);
        CollateralMath::collateralization_ratio(account.debt_shares, state.borrower_share_price, value)
            .unwrap_or_revert(&self.env())
    }

    fn value_of(&self, collateral: U256) -> U256 {
        let oracle = PriceFeedContractRef::new(self.env(), self.price_oracle());
        let price = oracle.latest_price();
        CollateralMath::collateral_value(
            collateral,
            self.collateral_decimals.get_or_default(),
            self.asset_decimals.get_or_default(),
            &price,
        )
        .unwrap_or_revert(&self.env())
    }

    fn account(&self, user: Address) -> BorrowerAccount {
        self.accounts.get(&user).unwrap_or_else(BorrowerAccount::empty)
    }

    fn load_state(&self) -> PoolState {
        self.state.get_or_revert_with(LendingError::InvalidConfiguration)
    }

    fn asset(&self) -> Cep18TokenContractRef {
        Cep18TokenContractRef::new(self.env(), self.asset_token())
    }

    fn collateral(&self) -> Cep18TokenContractRef {
        Cep18TokenContractRef::new(self.env(), self.collateral_token())
    }

    fn self_address(&self) -> Address {
        self.env().self_address()
    }

    /// Block time in whole seconds
    fn now(&self) -> u64 {
        self.env().get_block_time() / 1000
    }
}
