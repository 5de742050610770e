//! Events for the Lending Pool

use odra::prelude::*;
use odra::casper_types::U256;

// ============================================================================
// Liquidity Events
// ============================================================================

/// Event emitted when the pool asset is deposited for lender shares
#[odra::event]
pub struct Deposit {
    /// Address that deposited
    pub user: Address,
    /// Amount of the pool asset deposited
    pub amount: U256,
    /// Lender shares minted
    pub shares: U256,
}

/// Event emitted when lender shares are redeemed for the pool asset
#[odra::event]
pub struct Redeem {
    /// Address that redeemed
    pub user: Address,
    /// Lender shares burned
    pub shares: U256,
    /// Amount of the pool asset paid out
    pub amount: U256,
}

// ============================================================================
// Collateral Events
// ============================================================================

/// Event emitted when collateral is deposited
#[odra::event]
pub struct DepositCollateral {
    /// Address that deposited collateral
    pub user: Address,
    /// Amount of collateral deposited
    pub amount: U256,
}

/// Event emitted when collateral is withdrawn
#[odra::event]
pub struct WithdrawCollateral {
    /// Address that withdrew collateral
    pub user: Address,
    /// Amount of collateral withdrawn
    pub amount: U256,
}

// ============================================================================
// Borrowing Events
// ============================================================================

/// Event emitted when the pool asset is borrowed
#[odra::event]
pub struct Borrow {
    /// Address that borrowed
    pub user: Address,
    /// Amount borrowed
    pub amount: U256,
}

/// Event emitted when debt is repaid
#[odra::event]
pub struct Repay {
    /// Address that repaid
    pub user: Address,
    /// Debt shares burned
    pub shares_burned: U256,
}

// ============================================================================
// Liquidation Events
// ============================================================================

/// Event emitted when a position is liquidated
#[odra::event]
pub struct Liquidate {
    /// Address of the liquidator
    pub liquidator: Address,
    /// Address of the borrower being liquidated
    pub borrower: Address,
    /// Collateral handed to the liquidator
    pub collateral_seized: U256,
}

// ============================================================================
// Interest Events
// ============================================================================

/// Event emitted when accrual moves the share prices
#[odra::event]
pub struct InterestAccrued {
    /// Lender share price after accrual
    pub lender_share_price: U256,
    /// Borrower share price after accrual
    pub borrower_share_price: U256,
    /// Accrual time, in seconds
    pub timestamp: u64,
}
