//! Display formatting for terminal output
//!
//! Tables for allocation results and projections, trees for the catalog,
//! and plain listings for the policy tables.

pub mod allocation;
pub mod policy;
pub mod projection;

pub use allocation::{format_allocation, format_allocation_table, format_summary};
pub use policy::{format_catalog_tree, format_conversion, format_policy_tables};
pub use projection::{format_perfect, format_recommended};
