//! Export of allocation results
//!
//! - CSV: one row per category and subcategory (spreadsheet-compatible)
//! - JSON: schema-versioned document with monthly and per-paycheck amounts
//! - YAML: the same document with a readable header

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::export_allocation_csv;
pub use self::json::{
    export_allocation_json, import_allocation_json, AllocationExport, EXPORT_SCHEMA_VERSION,
};
pub use self::yaml::{export_allocation_yaml, import_allocation_yaml};
