//! Error definitions shared by the token ledgers
use odra::prelude::*;

/// Custom errors for the CEP-18 token ledgers
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,

    /// Insufficient balance for operation
    InsufficientBalance = 101,
}
