//! Fixed-point utilities shared by the lending pool
//! All ratios, rates and prices are unsigned integers scaled by 1e18 (WAD)
use odra::casper_types::{U256, U512};
use crate::lending::errors::LendingError;

/// One unit in 1e18 fixed point
pub const WAD: U256 = U256([1_000_000_000_000_000_000, 0, 0, 0]);

/// Fixed-point arithmetic for WAD-scaled U256 values
pub struct FixedPoint;

impl FixedPoint {
    /// Computes `floor(a * b / denominator)`.
    ///
    /// The product is formed in 512 bits, so it never overflows; only a
    /// quotient that does not fit back into 256 bits is an error.
    pub fn mul_div_down(a: U256, b: U256, denominator: U256) -> Result<U256, LendingError> {
        if denominator.is_zero() {
            return Err(LendingError::DivisionByZero);
        }
        let product = widen(a) * widen(b);
        narrow(product / widen(denominator)).ok_or(LendingError::MathOverflow)
    }

    /// `x * y / 1e18`, rounded down
    pub fn wad_mul_down(x: U256, y: U256) -> Result<U256, LendingError> {
        Self::mul_div_down(x, y, WAD)
    }

    /// `x * 1e18 / y`, rounded down
    pub fn wad_div_down(x: U256, y: U256) -> Result<U256, LendingError> {
        Self::mul_div_down(x, WAD, y)
    }

    /// Returns `x - y`, or zero when `y > x`
    pub fn sub_floor_zero(x: U256, y: U256) -> U256 {
        if x >= y { x - y } else { U256::zero() }
    }

    /// Returns `10^exponent`
    pub fn pow10(exponent: u8) -> Result<U256, LendingError> {
        let ten = U256::from(10u8);
        let mut result = U256::one();
        for _ in 0..exponent {
            result = result.checked_mul(ten).ok_or(LendingError::MathOverflow)?;
        }
        Ok(result)
    }

    /// Rescales `amount` from `from_decimals` to `to_decimals`, rounding down
    pub fn rescale(amount: U256, from_decimals: u8, to_decimals: u8) -> Result<U256, LendingError> {
        if from_decimals == to_decimals {
            Ok(amount)
        } else if from_decimals < to_decimals {
            let factor = Self::pow10(to_decimals - from_decimals)?;
            amount.checked_mul(factor).ok_or(LendingError::MathOverflow)
        } else {
            let factor = Self::pow10(from_decimals - to_decimals)?;
            Ok(amount / factor)
        }
    }
}

fn widen(value: U256) -> U512 {
    let mut limbs = [0u64; 8];
    limbs[..4].copy_from_slice(&value.0);
    U512(limbs)
}

fn narrow(value: U512) -> Option<U256> {
    if value.0[4..].iter().any(|limb| *limb != 0) {
        return None;
    }
    let mut limbs = [0u64; 4];
    limbs.copy_from_slice(&value.0[..4]);
    Some(U256(limbs))
}
