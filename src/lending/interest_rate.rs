//! Interest Rate Model - Kinked rate curve driven by pool utilization
//!
//! Two linear segments meeting at the optimal utilization (95%):
//! - Below the kink the borrow rate climbs from zero to `KINK_RATE`
//! - Above the kink it climbs steeply from `KINK_RATE` to `MAX_RATE` at 100%
//!
//! Lenders earn the borrow rate scaled down by utilization, since idle
//! liquidity earns nothing. All rates are per second, scaled by 1e18.

use odra::casper_types::U256;
use crate::math::{FixedPoint, WAD};
use super::errors::LendingError;

/// Seconds in a 365-day year
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Utilization at which the curve changes slope (95%)
pub const OPTIMAL_UTILIZATION: U256 = U256([950_000_000_000_000_000, 0, 0, 0]);

/// Borrow rate at the kink: 5% a year in per-second terms
/// 0.05e18 / 31_536_000
pub const KINK_RATE: U256 = U256([1_585_489_599, 0, 0, 0]);

/// Borrow rate at full utilization: 50% a year in per-second terms
/// 0.5e18 / 31_536_000
pub const MAX_RATE: U256 = U256([15_854_895_991, 0, 0, 0]);

/// Borrower and lender rates at a given utilization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rates {
    /// Rate paid by borrowers (per second, scaled by 1e18)
    pub borrower_rate: U256,
    /// Rate earned by lenders (per second, scaled by 1e18)
    pub lender_rate: U256,
}

impl Rates {
    pub fn is_zero(&self) -> bool {
        self.borrower_rate.is_zero() && self.lender_rate.is_zero()
    }
}

/// Kinked interest rate model
pub struct InterestRateModel;

impl InterestRateModel {
    /// Fraction of deposits currently borrowed, scaled by 1e18
    ///
    /// Zero when nothing is deposited. Capped at 1e18: recorded borrows can
    /// outgrow recorded deposits once interest has accrued.
    pub fn utilization(total_borrowed: U256, total_deposited: U256) -> Result<U256, LendingError> {
        if total_deposited.is_zero() {
            return Ok(U256::zero());
        }
        let utilization = FixedPoint::wad_div_down(total_borrowed, total_deposited)?;
        Ok(if utilization > WAD { WAD } else { utilization })
    }

    /// Borrower and lender rates at `utilization`
    ///
    /// # Formula
    /// - `u <= OPTIMAL`: `br = u * KINK_RATE / OPTIMAL`
    /// - `u > OPTIMAL`: `br = KINK_RATE + (u - OPTIMAL) * (MAX_RATE - KINK_RATE) / (1e18 - OPTIMAL)`
    /// - `lr = br * u / 1e18`
    pub fn rates(utilization: U256) -> Result<Rates, LendingError> {
        let borrower_rate = if utilization <= OPTIMAL_UTILIZATION {
            FixedPoint::mul_div_down(utilization, KINK_RATE, OPTIMAL_UTILIZATION)?
        } else {
            let excess = utilization - OPTIMAL_UTILIZATION;
            let steep = FixedPoint::mul_div_down(
                excess,
                MAX_RATE - KINK_RATE,
                WAD - OPTIMAL_UTILIZATION,
            )?;
            KINK_RATE + steep
        };
        let lender_rate = FixedPoint::wad_mul_down(borrower_rate, utilization)?;

        Ok(Rates { borrower_rate, lender_rate })
    }
}
