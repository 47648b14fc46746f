//! Category and Subcategory models
//!
//! A category is one financial obligation (a debt, a need, a want or a
//! savings goal). Categories own an ordered list of subcategories; a
//! subcategory only takes part in an allocation when both it and its parent
//! are active.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, SubcategoryId};
use crate::policy::limits::name_matches;
use crate::policy::PolicyRange;

/// Name of the savings category funded before every other savings goal
pub const EMERGENCY_FUND: &str = "Emergency Fund";

/// Name of the need whose allocation is checked against its policy ceiling
pub const HOUSING: &str = "Housing";

/// Most essential priority
pub const MIN_PRIORITY: u8 = 1;

/// Least essential priority
pub const MAX_PRIORITY: u8 = 5;

/// What kind of obligation a category is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Debt,
    Need,
    Want,
    Saving,
}

impl CategoryKind {
    /// All kinds in waterfall order of their display groups
    pub fn all() -> &'static [Self] {
        &[Self::Debt, Self::Need, Self::Saving, Self::Want]
    }

    /// Plural label used for group headers
    pub fn plural(&self) -> &'static str {
        match self {
            Self::Debt => "Debts",
            Self::Need => "Needs",
            Self::Want => "Wants",
            Self::Saving => "Savings",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debt => "debt",
            Self::Need => "need",
            Self::Want => "want",
            Self::Saving => "saving",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for CategoryKind {
    type Err = CategoryValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debt" | "debts" => Ok(Self::Debt),
            "need" | "needs" => Ok(Self::Need),
            "want" | "wants" => Ok(Self::Want),
            "saving" | "savings" => Ok(Self::Saving),
            _ => Err(CategoryValidationError::UnknownKind(s.to_string())),
        }
    }
}

/// How a category's allocated total is derived
///
/// Resolved once when a waterfall run is planned. Need and want categories
/// with at least one active subcategory are aggregated; everything else
/// carries its own flat amount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryTotal {
    Flat,
    Aggregated(Vec<SubcategoryId>),
}

/// A line item owned by exactly one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: SubcategoryId,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    /// Entered monthly amount; when absent the parent's ceiling is split by share
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_amount: Option<f64>,
    #[serde(default = "default_priority")]
    pub priority: u8,
}

fn default_active() -> bool {
    true
}

fn default_priority() -> u8 {
    3
}

impl Subcategory {
    /// Create a new active subcategory
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SubcategoryId::new(),
            name: name.into(),
            active: true,
            requested_amount: None,
            priority: default_priority(),
        }
    }

    pub fn with_requested(mut self, amount: f64) -> Self {
        self.requested_amount = Some(amount);
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Validate the subcategory
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)?;
        validate_priority(self.priority)?;
        validate_amount(self.requested_amount)
    }
}

/// A named financial obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    #[serde(default)]
    pub emoji: String,

    #[serde(default)]
    pub description: String,

    /// Fixed for the lifetime of the category
    kind: CategoryKind,

    /// 1 = essential, 5 = optional
    pub priority: u8,

    /// Overrides the policy table range looked up by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<PolicyRange>,

    /// User-entered monthly amount (the total balance for debts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_amount: Option<f64>,

    /// Payoff date, debts only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    /// Create a new, inactive category
    pub fn new(name: impl Into<String>, kind: CategoryKind, priority: u8) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            emoji: String::new(),
            description: String::new(),
            kind,
            priority,
            limits: None,
            requested_amount: None,
            due_date: None,
            active: false,
            subcategories: Vec::new(),
        }
    }

    pub fn with_emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = emoji.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_requested(mut self, amount: f64) -> Self {
        self.requested_amount = Some(amount);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_limits(mut self, limits: PolicyRange) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_subcategory(mut self, subcategory: Subcategory) -> Self {
        self.subcategories.push(subcategory);
        self
    }

    pub fn activated(mut self) -> Self {
        self.active = true;
        self
    }

    pub fn kind(&self) -> CategoryKind {
        self.kind
    }

    pub fn is_debt(&self) -> bool {
        self.kind == CategoryKind::Debt
    }

    pub fn is_emergency_fund(&self) -> bool {
        self.kind == CategoryKind::Saving && self.name.eq_ignore_ascii_case(EMERGENCY_FUND)
    }

    pub fn is_housing(&self) -> bool {
        self.name.eq_ignore_ascii_case(HOUSING)
    }

    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Deactivating a category removes its subcategories from computation
    /// without discarding them
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn set_requested(&mut self, amount: Option<f64>) {
        self.requested_amount = amount;
    }

    pub fn set_due_date(&mut self, due_date: Option<NaiveDate>) {
        self.due_date = due_date;
    }

    /// Active subcategories in their stored order
    pub fn active_subcategories(&self) -> impl Iterator<Item = &Subcategory> {
        self.subcategories.iter().filter(|s| s.active)
    }

    /// Find a subcategory by name; "Mortgage/Rent" answers to "rent" too
    pub fn subcategory_by_name(&self, name: &str) -> Option<&Subcategory> {
        self.subcategories
            .iter()
            .find(|s| name_matches(&s.name, name))
    }

    pub fn subcategory_by_name_mut(&mut self, name: &str) -> Option<&mut Subcategory> {
        self.subcategories
            .iter_mut()
            .find(|s| name_matches(&s.name, name))
    }

    /// Monthly payment needed to clear a debt by its due date
    ///
    /// `None` when the category has no due date or no balance entered.
    pub fn monthly_payment(&self, as_of: NaiveDate) -> Option<f64> {
        let due = self.due_date?;
        let balance = self
            .requested_amount
            .filter(|b| b.is_finite() && *b >= 0.0)?;
        Some(balance / f64::from(months_until(as_of, due)))
    }

    /// Resolve how this category's total is derived
    pub fn total_mode(&self) -> CategoryTotal {
        if !matches!(self.kind, CategoryKind::Need | CategoryKind::Want) {
            return CategoryTotal::Flat;
        }

        let ids: Vec<SubcategoryId> = self.active_subcategories().map(|s| s.id).collect();
        if ids.is_empty() {
            CategoryTotal::Flat
        } else {
            CategoryTotal::Aggregated(ids)
        }
    }

    /// Validate the category and its subcategories
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        validate_name(&self.name)?;
        validate_priority(self.priority)?;
        validate_amount(self.requested_amount)?;

        if self.due_date.is_some() && !self.is_debt() {
            return Err(CategoryValidationError::DueDateOnNonDebt(self.name.clone()));
        }

        if let Some(limits) = self.limits {
            if !limits.is_valid() {
                return Err(CategoryValidationError::InvalidLimits {
                    min: limits.min,
                    max: limits.max,
                });
            }
        }

        for sub in &self.subcategories {
            sub.validate()?;
        }

        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.emoji.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} {}", self.emoji, self.name)
        }
    }
}

/// Whole calendar months from `as_of` to `due`, never less than 1
pub fn months_until(as_of: NaiveDate, due: NaiveDate) -> u32 {
    let years = due.year() - as_of.year();
    let months = due.month() as i32 - as_of.month() as i32;
    let total = years * 12 + months;
    total.max(1) as u32
}

fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
    if name.trim().is_empty() {
        return Err(CategoryValidationError::EmptyName);
    }
    if name.len() > 50 {
        return Err(CategoryValidationError::NameTooLong(name.len()));
    }
    Ok(())
}

fn validate_priority(priority: u8) -> Result<(), CategoryValidationError> {
    if !(MIN_PRIORITY..=MAX_PRIORITY).contains(&priority) {
        return Err(CategoryValidationError::PriorityOutOfRange(priority));
    }
    Ok(())
}

fn validate_amount(amount: Option<f64>) -> Result<(), CategoryValidationError> {
    match amount {
        Some(a) if !a.is_finite() || a < 0.0 => Err(CategoryValidationError::InvalidAmount(a)),
        _ => Ok(()),
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    PriorityOutOfRange(u8),
    InvalidAmount(f64),
    DueDateOnNonDebt(String),
    InvalidLimits { min: f64, max: f64 },
    UnknownKind(String),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::PriorityOutOfRange(p) => {
                write!(f, "Priority {} is out of range (expected 1-5)", p)
            }
            Self::InvalidAmount(a) => write!(f, "Amount {} must be a non-negative number", a),
            Self::DueDateOnNonDebt(name) => {
                write!(f, "Only debts can have a due date ('{}' is not a debt)", name)
            }
            Self::InvalidLimits { min, max } => {
                write!(f, "Invalid policy range {:.2}-{:.2}", min, max)
            }
            Self::UnknownKind(kind) => write!(
                f,
                "Unknown category kind '{}' (expected debt, need, want or saving)",
                kind
            ),
        }
    }
}

impl std::error::Error for CategoryValidationError {}
