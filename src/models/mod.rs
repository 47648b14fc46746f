//! Core data models for the paycheck planner
//!
//! This module contains the data structures the allocation engine consumes
//! and produces: categories and subcategories, payment cadences, and the
//! allocation result.

pub mod allocation;
pub mod cadence;
pub mod category;
pub mod ids;
pub mod money;

pub use allocation::{
    AllocationKey, AllocationResult, AllocationSummary, AllocationWarning, AmountBasis,
    CategoryAllocation, SubcategoryAllocation,
};
pub use cadence::{to_monthly, to_periodic, PaymentCadence};
pub use category::{
    months_until, Category, CategoryKind, CategoryTotal, CategoryValidationError, Subcategory,
    EMERGENCY_FUND, HOUSING,
};
pub use ids::{CategoryId, SubcategoryId};
pub use money::Amount;
