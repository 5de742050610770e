//! Liquidation Engine - Detects and settles undercollateralized positions
//!
//! Liquidation is all-or-nothing: the liquidator repays the full debt and
//! receives the full collateral balance. There is no bonus and no partial
//! path.

use odra::casper_types::U256;
use super::collateral_manager::BorrowerAccount;
use super::errors::LendingError;
use crate::math::FixedPoint;

/// Ratio below which an account can be liquidated (110%)
pub const LIQUIDATION_THRESHOLD: U256 = U256([1_100_000_000_000_000_000, 0, 0, 0]);

/// Settlement of a full liquidation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiquidationPlan {
    /// Pool asset the liquidator pays in
    pub amount_owed: U256,
    /// Collateral handed to the liquidator
    pub collateral_seized: U256,
}

/// Liquidation rules
pub struct LiquidationEngine;

impl LiquidationEngine {
    /// Strictly below the threshold; exactly at the threshold is healthy
    pub fn can_liquidate(ratio: U256) -> bool {
        ratio < LIQUIDATION_THRESHOLD
    }

    /// Amount owed for the whole debt and the collateral released for it
    pub fn plan(
        account: &BorrowerAccount,
        borrower_share_price: U256,
    ) -> Result<LiquidationPlan, LendingError> {
        let amount_owed = FixedPoint::wad_mul_down(account.debt_shares, borrower_share_price)?;
        Ok(LiquidationPlan {
            amount_owed,
            collateral_seized: account.collateral,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::WAD;

    #[test]
    fn test_threshold_boundary() {
        assert!(!LiquidationEngine::can_liquidate(LIQUIDATION_THRESHOLD));
        assert!(LiquidationEngine::can_liquidate(LIQUIDATION_THRESHOLD - U256::one()));
        assert!(LiquidationEngine::can_liquidate(U256::zero()));
        assert!(!LiquidationEngine::can_liquidate(U256::MAX));
    }

    #[test]
    fn test_plan_takes_everything() {
        let account = BorrowerAccount {
            debt_shares: U256::from(100) * WAD,
            collateral: U256::from(105) * WAD,
        };
        let price = U256::from(1_200_000_000_000_000_000u128);
        let plan = LiquidationEngine::plan(&account, price).unwrap();
        assert_eq!(plan.amount_owed, U256::from(120) * WAD);
        assert_eq!(plan.collateral_seized, account.collateral);
    }
}
