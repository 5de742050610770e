//! Error types for the Lending Pool

use odra::prelude::*;

/// Errors that can occur in the lending pool
#[odra::odra_error]
#[derive(Debug, PartialEq)]
pub enum LendingError {
    // Bounds Errors
    /// Computed share or asset amount fell outside the caller's bound
    Slippage = 1,

    // Liquidity Errors
    /// Requested withdrawal or borrow exceeds available liquidity
    InsufficientLiquidity = 2,

    // Collateral Errors
    /// Account would be left below the minimum collateralization ratio
    MinCollateralization = 3,
    /// Withdrawal exceeds the recorded collateral balance
    InsufficientCollateral = 4,
    /// Borrow amount too small to mint a single debt share
    ZeroDebtShares = 5,

    // Liquidation Errors
    /// Account is at or above the liquidation threshold
    HealthyAccount = 6,

    // Price Oracle Errors
    /// Price is zero or otherwise unusable
    InvalidPrice = 7,

    // Access Control Errors
    /// Caller is not authorized
    Unauthorized = 8,

    // Configuration Errors
    /// Contract storage is not initialized
    InvalidConfiguration = 9,

    // Math Errors
    /// Result does not fit in 256 bits
    MathOverflow = 10,
    /// Division by zero
    DivisionByZero = 11,
}
