//! Accrual Engine - Pool-wide share prices advanced by elapsed time
//!
//! Lender and borrower share prices start at par (1e18) and only grow.
//! Each accrual applies simple interest for the elapsed interval on top of
//! the current price, so prices compound across calls but not within one.

use odra::casper_types::U256;
use crate::math::{FixedPoint, WAD};
use super::errors::LendingError;
use super::interest_rate::{InterestRateModel, Rates};

/// Pool-wide accounting state
#[odra::odra_type]
pub struct PoolState {
    /// Asset units deposited, net of redemptions (principal basis)
    pub total_deposited: U256,
    /// Asset units owed by borrowers, net of repayments (principal basis)
    pub total_borrowed: U256,
    /// Asset value of one lender share (scaled by 1e18)
    pub lender_share_price: U256,
    /// Asset value owed per debt share (scaled by 1e18)
    pub borrower_share_price: U256,
    /// Timestamp of the last accrual, in seconds
    pub last_update_time: u64,
}

impl PoolState {
    /// Fresh pool at par, clock started at `now`
    pub fn new(now: u64) -> Self {
        Self {
            total_deposited: U256::zero(),
            total_borrowed: U256::zero(),
            lender_share_price: WAD,
            borrower_share_price: WAD,
            last_update_time: now,
        }
    }

    /// Current utilization, scaled by 1e18
    pub fn utilization(&self) -> Result<U256, LendingError> {
        InterestRateModel::utilization(self.total_borrowed, self.total_deposited)
    }

    /// Rates at the current utilization
    pub fn current_rates(&self) -> Result<Rates, LendingError> {
        InterestRateModel::rates(self.utilization()?)
    }

    /// Brings both share prices up to `now`.
    ///
    /// Returns `true` when the prices moved. A clock that has not advanced
    /// leaves the state untouched; zero rates only move the clock.
    pub fn accrue(&mut self, now: u64) -> Result<bool, LendingError> {
        let elapsed = now.saturating_sub(self.last_update_time);
        if elapsed == 0 {
            return Ok(false);
        }

        let rates = self.current_rates()?;
        if rates.is_zero() {
            self.last_update_time = now;
            return Ok(false);
        }

        let dt = U256::from(elapsed);
        let lender_growth = rates.lender_rate.checked_mul(dt).ok_or(LendingError::MathOverflow)?;
        let borrower_growth = rates.borrower_rate.checked_mul(dt).ok_or(LendingError::MathOverflow)?;

        self.lender_share_price = grow(self.lender_share_price, lender_growth)?;
        self.borrower_share_price = grow(self.borrower_share_price, borrower_growth)?;
        self.last_update_time = now;
        Ok(true)
    }

    /// Lender shares issued for `amount` of the pool asset
    pub fn assets_to_lender_shares(&self, amount: U256) -> Result<U256, LendingError> {
        FixedPoint::wad_div_down(amount, self.lender_share_price)
    }

    /// Pool asset paid out for `shares` lender shares
    pub fn lender_shares_to_assets(&self, shares: U256) -> Result<U256, LendingError> {
        FixedPoint::wad_mul_down(shares, self.lender_share_price)
    }

    /// Debt shares matching `amount` of the pool asset
    pub fn assets_to_debt_shares(&self, amount: U256) -> Result<U256, LendingError> {
        FixedPoint::wad_div_down(amount, self.borrower_share_price)
    }

    /// Pool asset owed for `debt_shares`
    pub fn debt_shares_to_assets(&self, debt_shares: U256) -> Result<U256, LendingError> {
        FixedPoint::wad_mul_down(debt_shares, self.borrower_share_price)
    }

    /// Deposited liquidity not lent out
    pub fn idle_liquidity(&self) -> U256 {
        FixedPoint::sub_floor_zero(self.total_deposited, self.total_borrowed)
    }
}

// price + price * growth / 1e18
fn grow(price: U256, growth: U256) -> Result<U256, LendingError> {
    let increase = FixedPoint::wad_mul_down(price, growth)?;
    price.checked_add(increase).ok_or(LendingError::MathOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lending::interest_rate::{MAX_RATE, SECONDS_PER_YEAR};

    fn tokens(amount: u64) -> U256 {
        U256::from(amount) * WAD
    }

    fn pool(deposited: u64, borrowed: u64) -> PoolState {
        let mut state = PoolState::new(1_000);
        state.total_deposited = tokens(deposited);
        state.total_borrowed = tokens(borrowed);
        state
    }

    #[test]
    fn test_new_pool_at_par() {
        let state = PoolState::new(42);
        assert_eq!(state.lender_share_price, WAD);
        assert_eq!(state.borrower_share_price, WAD);
        assert_eq!(state.last_update_time, 42);
        assert_eq!(state.utilization().unwrap(), U256::zero());
    }

    #[test]
    fn test_no_elapsed_time_is_noop() {
        let mut state = pool(100, 50);
        let before = state.clone();
        assert!(!state.accrue(1_000).unwrap());
        assert_eq!(state, before);

        // A clock behind the last update is treated as no elapsed time
        assert!(!state.accrue(999).unwrap());
        assert_eq!(state, before);
    }

    #[test]
    fn test_zero_rates_only_advance_clock() {
        let mut state = pool(100, 0);
        assert!(!state.accrue(5_000).unwrap());
        assert_eq!(state.lender_share_price, WAD);
        assert_eq!(state.borrower_share_price, WAD);
        assert_eq!(state.last_update_time, 5_000);
    }

    #[test]
    fn test_accrual_strictly_increases_prices() {
        let mut state = pool(100, 50);
        assert!(state.accrue(1_000 + 3_600).unwrap());
        assert!(state.lender_share_price > WAD);
        assert!(state.borrower_share_price > WAD);
        // Lenders earn the borrow rate scaled by 50% utilization
        assert!(state.lender_share_price < state.borrower_share_price);
        assert_eq!(state.last_update_time, 4_600);

        let lender_before = state.lender_share_price;
        let borrower_before = state.borrower_share_price;
        assert!(state.accrue(4_601).unwrap());
        assert!(state.lender_share_price > lender_before);
        assert!(state.borrower_share_price > borrower_before);
    }

    #[test]
    fn test_accrual_is_simple_interest_per_call() {
        let mut state = pool(100, 100);
        state.accrue(1_000 + 10).unwrap();
        // price * (1 + MAX_RATE * 10)
        let expected = WAD + MAX_RATE * U256::from(10);
        assert_eq!(state.borrower_share_price, expected);
    }

    #[test]
    fn test_full_utilization_for_one_year() {
        let mut state = pool(100, 100);
        state.accrue(1_000 + SECONDS_PER_YEAR).unwrap();

        let expected = WAD + MAX_RATE * U256::from(SECONDS_PER_YEAR);
        assert_eq!(state.borrower_share_price, expected);
        assert!(state.borrower_share_price >= U256::from(1_400_000_000_000_000_000u128));
        assert!(state.borrower_share_price <= U256::from(1_600_000_000_000_000_000u128));
        // At 100% utilization lenders earn the full borrow rate
        assert_eq!(state.lender_share_price, state.borrower_share_price);
    }

    #[test]
    fn test_share_conversions_round_down() {
        let mut state = pool(100, 50);
        state.lender_share_price = U256::from(1_500_000_000_000_000_000u128);
        // 1 unit / 1.5 rounds to zero shares
        assert_eq!(state.assets_to_lender_shares(U256::one()).unwrap(), U256::zero());
        assert_eq!(state.assets_to_lender_shares(U256::from(3)).unwrap(), U256::from(2));
        assert_eq!(state.lender_shares_to_assets(U256::from(3)).unwrap(), U256::from(4));
    }

    #[test]
    fn test_idle_liquidity_floors_at_zero() {
        assert_eq!(pool(100, 40).idle_liquidity(), tokens(60));
        assert_eq!(pool(100, 120).idle_liquidity(), U256::zero());
    }
}
