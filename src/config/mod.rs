//! Configuration for the paycheck planner
//!
//! - Path resolution with an environment override
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::PlannerPaths;
pub use settings::Settings;
