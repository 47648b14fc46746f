//! Allocation services
//!
//! The waterfall engine and everything it runs: deficit rebalancing, surplus
//! distribution and recommendations. Projections live alongside it and share
//! the policy tables, but never feed an allocation.

pub mod projections;
pub mod rebalance;
pub mod recommendations;
pub mod surplus;
pub mod waterfall;

pub use projections::{perfect_budget, recommended_budget, PerfectBudget, RecommendedBudget};
pub use surplus::UndistributedSurplusPolicy;
pub use waterfall::{AllocationEngine, EngineOptions};
