//! Paycheck Planner - priority waterfall paycheck allocation
//!
//! This library splits a monthly (or per-paycheck) income across a user's
//! selected debts, needs, savings and wants. Every stage is bounded by
//! fraction-of-income policy limits, weighted by priority, and reconciled so
//! the result never allocates more than the income.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: Categories, cadences and allocation results
//! - `policy`: Policy limit tables and priority weights
//! - `catalog`: Seed catalog, category store and budget files
//! - `services`: The allocation waterfall, rebalancing and projections
//! - `config`: Configuration and path management
//! - `audit`: JSONL log of planner runs
//! - `display`: Terminal formatting
//! - `export`: CSV, JSON and YAML export
//! - `cli`: Command handlers for the `paycheck` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust,ignore
//! use paycheck::catalog::CategoryStore;
//! use paycheck::models::PaymentCadence;
//! use paycheck::services::AllocationEngine;
//!
//! let mut store = CategoryStore::seeded();
//! let housing = store.find_by_name("Housing").map(|c| c.id).unwrap();
//! store.activate_subcategory(housing, "Mortgage/Rent")?;
//!
//! let engine = AllocationEngine::default();
//! let result = engine.recalculate_paycheck(&store.snapshot().categories, 2000.0, PaymentCadence::BiWeekly);
//! ```

pub mod audit;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod policy;
pub mod services;

pub use error::{PlannerError, PlannerResult};
