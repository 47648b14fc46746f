//! Policy limit table
//!
//! Allowed allocation ranges per category, expressed as fractions of monthly
//! income, and the share of a parent category's allocation that each of its
//! subcategories receives. All tables are compile-time constants.

use serde::{Deserialize, Serialize};

use crate::models::{Category, CategoryKind};

/// A min/max fraction of income
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PolicyRange {
    pub min: f64,
    pub max: f64,
}

impl PolicyRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite()
            && self.max.is_finite()
            && self.min >= 0.0
            && self.min <= self.max
            && self.max <= 1.0
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    /// Clamp `value` into `[base × min, base × max]`
    ///
    /// Never panics: if the bounds are inverted the upper bound wins.
    pub fn clamp_of(&self, base: f64, value: f64) -> f64 {
        value.max(base * self.min).min(base * self.max)
    }
}

/// Maximum share of monthly income that may go to debt payments
pub const DEBT_TO_INCOME_CEILING: f64 = 0.36;

/// Savings range, applied to income remaining after needs
pub const SAVINGS_RANGE: PolicyRange = PolicyRange::new(0.10, 0.30);

/// Discretionary (wants) range, applied to income remaining after savings
pub const DISCRETIONARY_RANGE: PolicyRange = PolicyRange::new(0.0, 0.30);

/// Range for categories missing from [`CATEGORY_LIMITS`]
pub const DEFAULT_RANGE: PolicyRange = PolicyRange::new(0.02, 0.05);

/// Emergency Fund target when no amount was entered, as a share of income
pub const EMERGENCY_FUND_INCOME_SHARE: f64 = 0.10;

/// Default want allocation when no amount was entered, as a share of remaining
pub const DEFAULT_WANT_SHARE: f64 = 0.05;

/// Subcategory share used when the parent category has no share table
pub const UNKNOWN_PARENT_SHARE: f64 = 1.0 / 3.0;

/// Category ranges as fractions of monthly income
pub const CATEGORY_LIMITS: &[(&str, PolicyRange)] = &[
    ("Housing", PolicyRange::new(0.25, 0.28)),
    ("Transportation", PolicyRange::new(0.10, 0.12)),
    ("Food", PolicyRange::new(0.10, 0.12)),
    ("Utilities", PolicyRange::new(0.05, 0.08)),
    ("Healthcare", PolicyRange::new(0.05, 0.08)),
    ("Personal Care", PolicyRange::new(0.02, 0.03)),
    ("Education", PolicyRange::new(0.05, 0.10)),
    ("Pets", PolicyRange::new(0.01, 0.03)),
    ("Entertainment", PolicyRange::new(0.02, 0.05)),
    ("Subscriptions", PolicyRange::new(0.01, 0.02)),
];

/// Shares of a parent category's allocation per subcategory.
/// A name containing `/` answers to each of its parts as well.
pub const SUBCATEGORY_SHARES: &[(&str, &[(&str, f64)])] = &[
    (
        "Housing",
        &[
            ("Mortgage/Rent", 0.70),
            ("Utilities", 0.15),
            ("Home Maintenance", 0.10),
            ("Property Tax", 0.03),
            ("Home Insurance", 0.02),
        ],
    ),
    (
        "Transportation",
        &[
            ("Car Payment", 0.50),
            ("Public Transportation", 0.10),
            ("Ride Share", 0.05),
            ("Tolls", 0.05),
            ("Maintenance", 0.15),
            ("Fuel", 0.10),
            ("Car Insurance", 0.05),
        ],
    ),
    (
        "Food",
        &[
            ("Groceries", 0.70),
            ("Dining Out", 0.15),
            ("Snacks", 0.05),
            ("Meal Delivery", 0.10),
        ],
    ),
    (
        "Healthcare",
        &[
            ("Insurance Premiums", 0.50),
            ("Doctor Visits", 0.20),
            ("Medications", 0.15),
            ("Dental Care", 0.10),
            ("Vision Care", 0.05),
        ],
    ),
    (
        "Utilities",
        &[
            ("Electricity", 0.35),
            ("Water", 0.15),
            ("Gas", 0.15),
            ("Internet", 0.20),
            ("Cable", 0.10),
            ("Trash", 0.05),
        ],
    ),
    (
        "Pets",
        &[
            ("Food", 0.40),
            ("Vet Visits", 0.30),
            ("Medications", 0.15),
            ("Grooming", 0.05),
            ("Toys", 0.05),
            ("Pet Insurance", 0.05),
        ],
    ),
    (
        "Subscriptions",
        &[
            ("Streaming", 0.40),
            ("Music", 0.20),
            ("Magazines", 0.10),
            ("Apps", 0.15),
            ("News", 0.15),
        ],
    ),
    (
        "Entertainment",
        &[
            ("Movies", 0.20),
            ("Games", 0.20),
            ("Concerts", 0.25),
            ("Sports Events", 0.20),
            ("Hobbies", 0.15),
        ],
    ),
    (
        "Personal Care",
        &[
            ("Haircuts", 0.30),
            ("Skincare", 0.20),
            ("Cosmetics", 0.20),
            ("Spa", 0.15),
            ("Gym", 0.15),
        ],
    ),
    (
        "Education",
        &[
            ("Tuition", 0.70),
            ("Books & Supplies", 0.15),
            ("Online Courses", 0.10),
            ("School Fees", 0.05),
        ],
    ),
];

/// Case-insensitive name match; a name containing `/` also answers to each part
pub(crate) fn name_matches(table_name: &str, query: &str) -> bool {
    let query = query.trim();
    table_name.eq_ignore_ascii_case(query)
        || (table_name.contains('/')
            && table_name
                .split('/')
                .any(|part| part.trim().eq_ignore_ascii_case(query)))
}

/// Allowed range for a category name; unknown names get [`DEFAULT_RANGE`]
pub fn limits_for(category_name: &str) -> PolicyRange {
    CATEGORY_LIMITS
        .iter()
        .find(|(name, _)| name_matches(name, category_name))
        .map(|(_, range)| *range)
        .unwrap_or(DEFAULT_RANGE)
}

/// Whether a category name has its own entry in [`CATEGORY_LIMITS`]
pub fn has_limits(category_name: &str) -> bool {
    CATEGORY_LIMITS
        .iter()
        .any(|(name, _)| name_matches(name, category_name))
}

/// The share table for a parent category, if it has one
pub fn shares_for(parent_name: &str) -> Option<&'static [(&'static str, f64)]> {
    SUBCATEGORY_SHARES
        .iter()
        .find(|(name, _)| name_matches(name, parent_name))
        .map(|(_, shares)| *shares)
}

/// Fraction of the parent's allocation assigned to a subcategory
///
/// Unknown subcategories of a known parent split evenly across the
/// `selected_siblings` (floored at 1); every subcategory of an unknown parent
/// gets [`UNKNOWN_PARENT_SHARE`].
pub fn subcategory_share(parent_name: &str, subcategory_name: &str, selected_siblings: usize) -> f64 {
    match shares_for(parent_name) {
        Some(shares) => shares
            .iter()
            .find(|(name, _)| name_matches(name, subcategory_name))
            .map(|(_, share)| *share)
            .unwrap_or_else(|| 1.0 / selected_siblings.max(1) as f64),
        None => UNKNOWN_PARENT_SHARE,
    }
}

/// Effective range for a category: its own override, otherwise a
/// kind-dependent default (the named table for needs and wants)
pub fn range_for(category: &Category) -> PolicyRange {
    if let Some(limits) = category.limits {
        return limits;
    }

    match category.kind() {
        CategoryKind::Need | CategoryKind::Want => limits_for(&category.name),
        CategoryKind::Debt => PolicyRange::new(0.0, DEBT_TO_INCOME_CEILING),
        CategoryKind::Saving => SAVINGS_RANGE,
    }
}
