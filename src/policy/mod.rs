//! Static allocation policy
//!
//! - `limits`: category ranges, the debt ceiling, savings and discretionary
//!   ranges, and subcategory share tables
//! - `weights`: the priority weighting table
//!
//! Everything here is read-only and shared by the waterfall and the
//! projections.

pub mod limits;
pub mod weights;

pub use limits::{
    has_limits, limits_for, range_for, shares_for, subcategory_share, PolicyRange,
    CATEGORY_LIMITS, DEBT_TO_INCOME_CEILING, DEFAULT_RANGE, DISCRETIONARY_RANGE, SAVINGS_RANGE,
    SUBCATEGORY_SHARES,
};
pub use weights::{distribute_by_weight, weight_for, DEFAULT_WEIGHT, PRIORITY_WEIGHTS};
