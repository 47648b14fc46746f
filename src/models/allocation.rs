//! Allocation result model
//!
//! The output of one waterfall run: how much of the income goes to every
//! active category and subcategory, totals per kind, the signed remainder,
//! advisory recommendations and data-completeness warnings.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::cadence::PaymentCadence;
use super::category::CategoryKind;
use super::ids::{CategoryId, SubcategoryId};

/// The time basis the amounts of a result are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmountBasis {
    Monthly,
    PerPaycheck,
}

impl fmt::Display for AmountBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::PerPaycheck => write!(f, "per paycheck"),
        }
    }
}

/// Key into the allocation map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AllocationKey {
    Category(CategoryId),
    Subcategory(SubcategoryId),
}

impl From<CategoryId> for AllocationKey {
    fn from(id: CategoryId) -> Self {
        Self::Category(id)
    }
}

impl From<SubcategoryId> for AllocationKey {
    fn from(id: SubcategoryId) -> Self {
        Self::Subcategory(id)
    }
}

/// Allocation for one active subcategory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategoryAllocation {
    pub id: SubcategoryId,
    pub name: String,
    pub amount: f64,
}

/// Allocation for one active category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAllocation {
    pub id: CategoryId,
    pub name: String,
    pub kind: CategoryKind,
    pub priority: u8,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<SubcategoryAllocation>,
}

impl CategoryAllocation {
    pub fn is_aggregated(&self) -> bool {
        !self.subcategories.is_empty()
    }

    /// Sum of the subcategory amounts
    pub fn subcategory_total(&self) -> f64 {
        self.subcategories.iter().map(|s| s.amount).sum()
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            amount: self.amount * factor,
            subcategories: self
                .subcategories
                .iter()
                .map(|s| SubcategoryAllocation {
                    amount: s.amount * factor,
                    ..s.clone()
                })
                .collect(),
            ..self.clone()
        }
    }
}

/// Totals of one waterfall run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AllocationSummary {
    pub total_debt: f64,
    pub total_needs: f64,
    pub total_wants: f64,
    pub total_savings: f64,
    pub total_allocated: f64,
    /// Income minus everything allocated; negative means over-allocated
    pub surplus_or_deficit: f64,
    /// Surplus that found no recipient and was set aside instead of reported
    #[serde(default)]
    pub undistributed_surplus: f64,
    /// Required debt payments from the debt stage; `total_debt` also counts
    /// surplus sent to debt
    #[serde(default)]
    pub debt_payments: f64,
}

impl AllocationSummary {
    /// Build totals from category lines
    pub fn from_lines(lines: &[CategoryAllocation], income: f64, undistributed: f64) -> Self {
        let total_of = |kind: CategoryKind| -> f64 {
            lines
                .iter()
                .filter(|l| l.kind == kind)
                .map(|l| l.amount)
                .sum()
        };

        let total_debt = total_of(CategoryKind::Debt);
        let total_needs = total_of(CategoryKind::Need);
        let total_wants = total_of(CategoryKind::Want);
        let total_savings = total_of(CategoryKind::Saving);
        let total_allocated = total_debt + total_needs + total_wants + total_savings;

        Self {
            total_debt,
            total_needs,
            total_wants,
            total_savings,
            total_allocated,
            surplus_or_deficit: income - total_allocated - undistributed,
            undistributed_surplus: undistributed,
            debt_payments: total_debt,
        }
    }

    /// Record the required debt payments separately from the final debt total
    pub fn with_debt_payments(mut self, debt_payments: f64) -> Self {
        self.debt_payments = debt_payments;
        self
    }

    /// Part of `total_debt` that came from surplus distribution
    pub fn extra_debt_paydown(&self) -> f64 {
        (self.total_debt - self.debt_payments).max(0.0)
    }

    pub fn is_deficit(&self) -> bool {
        self.surplus_or_deficit < 0.0
    }

    fn scaled(&self, factor: f64) -> Self {
        Self {
            total_debt: self.total_debt * factor,
            total_needs: self.total_needs * factor,
            total_wants: self.total_wants * factor,
            total_savings: self.total_savings * factor,
            total_allocated: self.total_allocated * factor,
            surplus_or_deficit: self.surplus_or_deficit * factor,
            undistributed_surplus: self.undistributed_surplus * factor,
            debt_payments: self.debt_payments * factor,
        }
    }
}

/// Recoverable input problems found while allocating
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AllocationWarning {
    /// Income was negative or not a number and was treated as zero
    InvalidIncome { supplied: String },
    /// An active debt has no due date and was not allocated
    MissingDueDate { category: String },
    /// An active debt has no balance entered
    MissingDebtAmount { category: String },
}

impl fmt::Display for AllocationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidIncome { supplied } => {
                write!(f, "Income '{}' is not a valid amount; treated as 0", supplied)
            }
            Self::MissingDueDate { category } => write!(
                f,
                "Debt '{}' has no due date and was skipped",
                category
            ),
            Self::MissingDebtAmount { category } => write!(
                f,
                "Debt '{}' has no balance entered; nothing was allocated",
                category
            ),
        }
    }
}

/// Complete output of one waterfall run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub cadence: PaymentCadence,
    pub basis: AmountBasis,
    /// Income in this result's basis
    pub income: f64,
    /// Active categories in catalog order
    pub categories: Vec<CategoryAllocation>,
    pub summary: AllocationSummary,
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<AllocationWarning>,
}

impl AllocationResult {
    /// Amount allocated to a category or subcategory, if it was active
    pub fn amount_of(&self, key: impl Into<AllocationKey>) -> Option<f64> {
        match key.into() {
            AllocationKey::Category(id) => self.category(id).map(|c| c.amount),
            AllocationKey::Subcategory(id) => self
                .categories
                .iter()
                .flat_map(|c| c.subcategories.iter())
                .find(|s| s.id == id)
                .map(|s| s.amount),
        }
    }

    pub fn category(&self, id: CategoryId) -> Option<&CategoryAllocation> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn category_by_name(&self, name: &str) -> Option<&CategoryAllocation> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Category lines of one kind, in catalog order
    pub fn of_kind(&self, kind: CategoryKind) -> impl Iterator<Item = &CategoryAllocation> {
        self.categories.iter().filter(move |c| c.kind == kind)
    }

    /// The same result expressed per paycheck for its cadence
    pub fn per_paycheck(&self) -> Self {
        if self.basis == AmountBasis::PerPaycheck {
            return self.clone();
        }

        let factor = self.cadence.to_periodic(1.0);
        Self {
            cadence: self.cadence,
            basis: AmountBasis::PerPaycheck,
            income: self.income * factor,
            categories: self.categories.iter().map(|c| c.scaled(factor)).collect(),
            summary: self.summary.scaled(factor),
            recommendations: self.recommendations.clone(),
            warnings: self.warnings.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(kind: CategoryKind, amount: f64) -> CategoryAllocation {
        CategoryAllocation {
            id: CategoryId::new(),
            name: format!("{}", kind),
            kind,
            priority: 1,
            amount,
            subcategories: Vec::new(),
        }
    }

    #[test]
    fn test_summary_from_lines() {
        let lines = vec![
            line(CategoryKind::Debt, 200.0),
            line(CategoryKind::Need, 1400.0),
            line(CategoryKind::Saving, 400.0),
            line(CategoryKind::Want, 100.0),
        ];

        let summary = AllocationSummary::from_lines(&lines, 5000.0, 0.0);
        assert_eq!(summary.total_debt, 200.0);
        assert_eq!(summary.total_needs, 1400.0);
        assert_eq!(summary.total_savings, 400.0);
        assert_eq!(summary.total_wants, 100.0);
        assert_eq!(summary.total_allocated, 2100.0);
        assert_eq!(summary.surplus_or_deficit, 2900.0);
        assert!(!summary.is_deficit());
    }

    #[test]
    fn test_debt_payments_kept_apart_from_total() {
        let lines = vec![line(CategoryKind::Debt, 1940.0)];

        let plain = AllocationSummary::from_lines(&lines, 6000.0, 0.0);
        assert_eq!(plain.debt_payments, 1940.0);
        assert_eq!(plain.extra_debt_paydown(), 0.0);

        let summary = plain.with_debt_payments(200.0);
        assert_eq!(summary.total_debt, 1940.0);
        assert_eq!(summary.debt_payments, 200.0);
        assert_eq!(summary.extra_debt_paydown(), 1740.0);
    }

    #[test]
    fn test_summary_with_undistributed() {
        let lines = vec![line(CategoryKind::Saving, 2920.0)];
        let summary = AllocationSummary::from_lines(&lines, 4000.0, 1080.0);
        assert_eq!(summary.surplus_or_deficit, 0.0);
        assert_eq!(summary.undistributed_surplus, 1080.0);
    }

    #[test]
    fn test_amount_lookup() {
        let mut housing = line(CategoryKind::Need, 700.0);
        let sub_id = SubcategoryId::new();
        housing.subcategories.push(SubcategoryAllocation {
            id: sub_id,
            name: "Mortgage/Rent".into(),
            amount: 700.0,
        });
        let housing_id = housing.id;

        let result = AllocationResult {
            cadence: PaymentCadence::Monthly,
            basis: AmountBasis::Monthly,
            income: 5000.0,
            summary: AllocationSummary::from_lines(std::slice::from_ref(&housing), 5000.0, 0.0),
            categories: vec![housing],
            recommendations: Vec::new(),
            warnings: Vec::new(),
        };

        assert_eq!(result.amount_of(housing_id), Some(700.0));
        assert_eq!(result.amount_of(sub_id), Some(700.0));
        assert_eq!(result.amount_of(CategoryId::new()), None);
    }

    #[test]
    fn test_per_paycheck_conversion() {
        let lines = vec![line(CategoryKind::Need, 2000.0)];
        let result = AllocationResult {
            cadence: PaymentCadence::SemiMonthly,
            basis: AmountBasis::Monthly,
            income: 4000.0,
            summary: AllocationSummary::from_lines(&lines, 4000.0, 0.0),
            categories: lines,
            recommendations: Vec::new(),
            warnings: Vec::new(),
        };

        let periodic = result.per_paycheck();
        assert_eq!(periodic.basis, AmountBasis::PerPaycheck);
        assert_eq!(periodic.income, 2000.0);
        assert_eq!(periodic.categories[0].amount, 1000.0);
        assert_eq!(periodic.summary.surplus_or_deficit, 1000.0);

        assert_eq!(periodic.per_paycheck(), periodic);
    }

    #[test]
    fn test_warning_display() {
        let warning = AllocationWarning::MissingDueDate {
            category: "Car Loan".into(),
        };
        assert_eq!(
            warning.to_string(),
            "Debt 'Car Loan' has no due date and was skipped"
        );
    }
}
