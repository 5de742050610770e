//! Collateral Manager - Per-borrower debt and collateral records
//!
//! Handles:
//! - The lazily created `BorrowerAccount` record
//! - Collateral valuation against the oracle price
//! - Collateralization ratio and the minimum-ratio check

use odra::casper_types::U256;
use crate::math::{FixedPoint, WAD};
use super::errors::LendingError;
use super::price_oracle::PriceData;

/// Minimum collateralization ratio to borrow or withdraw collateral (150%)
pub const MIN_COLLATERALIZATION_RATIO: U256 = U256([1_500_000_000_000_000_000, 0, 0, 0]);

/// A borrower's position
///
/// Absent accounts read as the zero record.
#[odra::odra_type]
pub struct BorrowerAccount {
    /// Claim on debt, valued at the borrower share price
    pub debt_shares: U256,
    /// Raw collateral-asset units held for the borrower
    pub collateral: U256,
}

impl BorrowerAccount {
    pub fn empty() -> Self {
        Self {
            debt_shares: U256::zero(),
            collateral: U256::zero(),
        }
    }

    pub fn has_debt(&self) -> bool {
        !self.debt_shares.is_zero()
    }
}

/// Collateral valuation and ratio math
pub struct CollateralMath;

impl CollateralMath {
    /// Value of `collateral` in pool-asset units
    ///
    /// `collateral * price / 10^price_decimals`, then rescaled from the
    /// collateral token's decimals to the asset token's, so it compares
    /// directly with debt value.
    pub fn collateral_value(
        collateral: U256,
        collateral_decimals: u8,
        asset_decimals: u8,
        price: &PriceData,
    ) -> Result<U256, LendingError> {
        let price_scale = FixedPoint::pow10(price.decimals)?;
        let value = FixedPoint::mul_div_down(collateral, price.price, price_scale)?;
        FixedPoint::rescale(value, collateral_decimals, asset_decimals)
    }

    /// Collateral value over debt value, scaled by 1e18
    ///
    /// `U256::MAX` when there is no debt. Zero collateral against debt is 0.
    pub fn collateralization_ratio(
        debt_shares: U256,
        borrower_share_price: U256,
        collateral_value: U256,
    ) -> Result<U256, LendingError> {
        if debt_shares.is_zero() {
            return Ok(U256::MAX);
        }
        let debt_value = FixedPoint::wad_mul_down(debt_shares, borrower_share_price)?;
        FixedPoint::mul_div_down(collateral_value, WAD, debt_value)
    }

    /// Whether `ratio` satisfies the 150% minimum (inclusive)
    pub fn meets_minimum(ratio: U256) -> bool {
        ratio >= MIN_COLLATERALIZATION_RATIO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dollar_price() -> PriceData {
        PriceData {
            price: U256::from(100_000_000u64),
            decimals: 8,
            updated_at: 0,
        }
    }

    fn tokens(amount: u64) -> U256 {
        U256::from(amount) * WAD
    }

    #[test]
    fn test_collateral_value_at_one_dollar() {
        let value = CollateralMath::collateral_value(tokens(200), 18, 18, &dollar_price()).unwrap();
        assert_eq!(value, tokens(200));
    }

    #[test]
    fn test_collateral_value_rescales_token_decimals() {
        // 200 units of a 6-decimal token at $2.50, valued in an 18-decimal asset
        let price = PriceData {
            price: U256::from(250_000_000u64),
            decimals: 8,
            updated_at: 0,
        };
        let value = CollateralMath::collateral_value(U256::from(200_000_000u64), 6, 18, &price).unwrap();
        assert_eq!(value, tokens(500));
    }

    #[test]
    fn test_collateral_value_in_asset_decimals() {
        // 1 unit of an 18-decimal token at $1, valued in a 6-decimal asset
        let value = CollateralMath::collateral_value(WAD, 18, 6, &dollar_price()).unwrap();
        assert_eq!(value, U256::from(1_000_000u64));

        // Debt of 500_000 asset units against it is far below 150%
        let ratio = CollateralMath::collateralization_ratio(
            U256::from(500_000_000_000u64),
            WAD,
            value,
        )
        .unwrap();
        assert!(!CollateralMath::meets_minimum(ratio));
    }

    #[test]
    fn test_ratio_without_debt_is_infinite() {
        let ratio = CollateralMath::collateralization_ratio(U256::zero(), WAD, tokens(1)).unwrap();
        assert_eq!(ratio, U256::MAX);

        let ratio = CollateralMath::collateralization_ratio(U256::zero(), WAD, U256::zero()).unwrap();
        assert_eq!(ratio, U256::MAX);
    }

    #[test]
    fn test_ratio_with_zero_collateral_is_zero() {
        let ratio = CollateralMath::collateralization_ratio(tokens(10), WAD, U256::zero()).unwrap();
        assert_eq!(ratio, U256::zero());
    }

    #[test]
    fn test_ratio_uses_borrower_share_price() {
        let ratio = CollateralMath::collateralization_ratio(tokens(100), WAD, tokens(200)).unwrap();
        assert_eq!(ratio, U256::from(2) * WAD);

        // Debt grown by 25%: 200 / 125 = 1.6
        let price = U256::from(1_250_000_000_000_000_000u128);
        let ratio = CollateralMath::collateralization_ratio(tokens(100), price, tokens(200)).unwrap();
        assert_eq!(ratio, U256::from(1_600_000_000_000_000_000u128));
    }

    #[test]
    fn test_minimum_is_inclusive() {
        assert!(CollateralMath::meets_minimum(MIN_COLLATERALIZATION_RATIO));
        assert!(CollateralMath::meets_minimum(U256::MAX));
        assert!(!CollateralMath::meets_minimum(MIN_COLLATERALIZATION_RATIO - U256::one()));
    }

    #[test]
    fn test_empty_account() {
        let account = BorrowerAccount::empty();
        assert!(!account.has_debt());
        assert!(account.collateral.is_zero());
    }
}
