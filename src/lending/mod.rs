//! Lending Protocol - two-sided pool for a single asset/collateral pair
//!
//! Lenders deposit the pool asset for transferable lender shares; borrowers
//! post collateral and draw the pool asset against debt shares. Interest
//! accrues into the two share prices through a kinked rate curve, and
//! accounts under 110% collateralization can be fully liquidated.

pub mod accrual;
pub mod lending_pool;
pub mod interest_rate;
pub mod collateral_manager;
pub mod liquidation;
pub mod price_oracle;
pub mod errors;
pub mod events;


pub use accrual::PoolState;
pub use lending_pool::LendingPool;
pub use interest_rate::InterestRateModel;
pub use collateral_manager::{BorrowerAccount, CollateralMath};
pub use liquidation::LiquidationEngine;
pub use price_oracle::{PriceData, PriceOracle};
pub use errors::LendingError;
pub use events::*;
