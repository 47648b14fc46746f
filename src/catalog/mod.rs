//! Category catalog
//!
//! - `seed`: the built-in categories
//! - `store`: the session's category collection and its snapshots
//! - `budget_file`: YAML/JSON documents that select categories and income

pub mod budget_file;
pub mod seed;
pub mod store;

pub use budget_file::{BudgetFile, CategorySelection, IncomeBasis, SubcategorySelection};
pub use seed::seed_categories;
pub use store::{CatalogSnapshot, CategoryStore};
