//! Budget projections
//!
//! Two read-only views computed from the same inputs as the waterfall, for
//! comparison only:
//!
//! - the recommended budget: what each active category should get according
//!   to the policy tables
//! - the perfect budget: an idealized 50/30/20 split
//!
//! Neither feeds back into an allocation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{Category, CategoryId, CategoryKind, PaymentCadence};
use crate::policy::{
    distribute_by_weight, limits_for, subcategory_share, weight_for, DEBT_TO_INCOME_CEILING,
    SAVINGS_RANGE,
};
use crate::policy::limits::EMERGENCY_FUND_INCOME_SHARE;

/// Share of income for needs and debts in the perfect budget
pub const PERFECT_NEEDS_SHARE: f64 = 0.50;
/// Share of income for wants in the perfect budget
pub const PERFECT_WANTS_SHARE: f64 = 0.30;
/// Share of income for savings in the perfect budget
pub const PERFECT_SAVINGS_SHARE: f64 = 0.20;

/// A monthly amount with its per-paycheck equivalent
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Projected {
    pub monthly: f64,
    pub per_paycheck: f64,
}

impl Projected {
    pub fn new(monthly: f64, cadence: PaymentCadence) -> Self {
        Self {
            monthly,
            per_paycheck: cadence.to_periodic(monthly),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedSubcategory {
    pub name: String,
    pub recommended: Projected,
}

/// Recommendation for one active category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedLine {
    pub id: CategoryId,
    pub name: String,
    pub kind: CategoryKind,
    pub recommended: Projected,
    pub min: Projected,
    pub max: Projected,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<RecommendedSubcategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendedBudget {
    pub cadence: PaymentCadence,
    pub monthly_income: f64,
    pub lines: Vec<RecommendedLine>,
}

impl RecommendedBudget {
    pub fn total(&self) -> Projected {
        let monthly = self.lines.iter().map(|l| l.recommended.monthly).sum();
        Projected::new(monthly, self.cadence)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfectLine {
    pub id: CategoryId,
    pub name: String,
    pub amount: Projected,
}

/// One of the three 50/30/20 pools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPool {
    pub label: String,
    pub share: f64,
    pub total: Projected,
    /// Empty when no active category belongs to the pool
    pub lines: Vec<PerfectLine>,
}

impl BudgetPool {
    /// The pool has no active category to receive its money
    pub fn is_unassigned(&self) -> bool {
        self.lines.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfectBudget {
    pub cadence: PaymentCadence,
    pub monthly_income: f64,
    pub pools: Vec<BudgetPool>,
}

impl PerfectBudget {
    /// Money that belongs to pools without categories
    pub fn unassigned(&self) -> Projected {
        let monthly = self
            .pools
            .iter()
            .filter(|p| p.is_unassigned())
            .map(|p| p.total.monthly)
            .sum();
        Projected::new(monthly, self.cadence)
    }
}

fn valid_income(monthly_income: f64) -> f64 {
    if monthly_income.is_finite() && monthly_income > 0.0 {
        monthly_income
    } else {
        0.0
    }
}

/// Policy-based recommendation for every active category
pub fn recommended_budget(
    categories: &[Category],
    monthly_income: f64,
    cadence: PaymentCadence,
    as_of: NaiveDate,
) -> RecommendedBudget {
    let income = valid_income(monthly_income);
    let active: Vec<&Category> = categories.iter().filter(|c| c.active).collect();

    let other_savings: Vec<&Category> = active
        .iter()
        .copied()
        .filter(|c| c.kind() == CategoryKind::Saving && !c.is_emergency_fund())
        .collect();
    let savings_weight: f64 = other_savings.iter().map(|c| weight_for(c.priority)).sum();

    let lines = active
        .iter()
        .map(|category| {
            let (min, recommended, max) = match category.kind() {
                CategoryKind::Need | CategoryKind::Want => {
                    let range = category
                        .limits
                        .unwrap_or_else(|| limits_for(&category.name));
                    (
                        income * range.min,
                        income * range.midpoint(),
                        income * range.max,
                    )
                }
                CategoryKind::Debt => (
                    0.0,
                    category.monthly_payment(as_of).unwrap_or(0.0),
                    income * DEBT_TO_INCOME_CEILING,
                ),
                CategoryKind::Saving if category.is_emergency_fund() => {
                    let target = income * EMERGENCY_FUND_INCOME_SHARE;
                    (target, target, target)
                }
                CategoryKind::Saving => {
                    let fraction = if savings_weight > 0.0 {
                        weight_for(category.priority) / savings_weight
                    } else {
                        0.0
                    };
                    (
                        income * SAVINGS_RANGE.min * fraction,
                        income * SAVINGS_RANGE.midpoint() * fraction,
                        income * SAVINGS_RANGE.max * fraction,
                    )
                }
            };

            let subcategories = if matches!(category.kind(), CategoryKind::Need | CategoryKind::Want) {
                let siblings = category.active_subcategories().count();
                category
                    .active_subcategories()
                    .map(|sub| RecommendedSubcategory {
                        name: sub.name.clone(),
                        recommended: Projected::new(
                            recommended * subcategory_share(&category.name, &sub.name, siblings),
                            cadence,
                        ),
                    })
                    .collect()
            } else {
                Vec::new()
            };

            RecommendedLine {
                id: category.id,
                name: category.name.clone(),
                kind: category.kind(),
                recommended: Projected::new(recommended, cadence),
                min: Projected::new(min, cadence),
                max: Projected::new(max, cadence),
                subcategories,
            }
        })
        .collect();

    RecommendedBudget {
        cadence,
        monthly_income: income,
        lines,
    }
}

/// Idealized 50/30/20 split across the active categories
pub fn perfect_budget(
    categories: &[Category],
    monthly_income: f64,
    cadence: PaymentCadence,
) -> PerfectBudget {
    let income = valid_income(monthly_income);
    let active: Vec<&Category> = categories.iter().filter(|c| c.active).collect();

    let pools = [
        (
            "Needs & Debts",
            PERFECT_NEEDS_SHARE,
            &[CategoryKind::Need, CategoryKind::Debt][..],
        ),
        ("Wants", PERFECT_WANTS_SHARE, &[CategoryKind::Want][..]),
        ("Savings", PERFECT_SAVINGS_SHARE, &[CategoryKind::Saving][..]),
    ];

    let pools = pools
        .into_iter()
        .map(|(label, share, kinds)| {
            let members: Vec<&Category> = active
                .iter()
                .copied()
                .filter(|c| kinds.contains(&c.kind()))
                .collect();
            let pool = income * share;
            let weights: Vec<f64> = members.iter().map(|c| weight_for(c.priority)).collect();
            let amounts = distribute_by_weight(pool, &weights);

            BudgetPool {
                label: label.to_string(),
                share,
                total: Projected::new(pool, cadence),
                lines: members
                    .iter()
                    .zip(amounts)
                    .map(|(c, amount)| PerfectLine {
                        id: c.id,
                        name: c.name.clone(),
                        amount: Projected::new(amount, cadence),
                    })
                    .collect(),
            }
        })
        .collect();

    PerfectBudget {
        cadence,
        monthly_income: income,
        pools,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Subcategory;

    const EPS: f64 = 1e-6;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_recommended_needs_use_midpoint() {
        let housing = Category::new("Housing", CategoryKind::Need, 1)
            .with_subcategory(Subcategory::new("Mortgage/Rent"))
            .with_subcategory(Subcategory::new("Utilities"))
            .activated();

        let budget = recommended_budget(&[housing], 5000.0, PaymentCadence::SemiMonthly, as_of());
        let line = &budget.lines[0];

        assert!((line.min.monthly - 1250.0).abs() < EPS);
        assert!((line.max.monthly - 1400.0).abs() < EPS);
        assert!((line.recommended.monthly - 1325.0).abs() < EPS);
        assert!((line.recommended.per_paycheck - 662.5).abs() < EPS);
        assert!((line.subcategories[0].recommended.monthly - 1325.0 * 0.70).abs() < EPS);
        assert!((line.subcategories[1].recommended.monthly - 1325.0 * 0.15).abs() < EPS);
    }

    #[test]
    fn test_recommended_debt_and_savings() {
        let debt = Category::new("Car Loan", CategoryKind::Debt, 2)
            .with_requested(1200.0)
            .with_due_date(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap())
            .activated();
        let ef = Category::new("Emergency Fund", CategoryKind::Saving, 1).activated();
        let retirement = Category::new("Retirement", CategoryKind::Saving, 1).activated();
        let vacation = Category::new("Vacation", CategoryKind::Saving, 4).activated();
        let inactive = Category::new("Shopping", CategoryKind::Want, 5);

        let budget = recommended_budget(
            &[debt, ef, retirement, vacation, inactive],
            4000.0,
            PaymentCadence::Monthly,
            as_of(),
        );

        assert_eq!(budget.lines.len(), 4);
        assert!((budget.lines[0].recommended.monthly - 200.0).abs() < EPS);
        assert!((budget.lines[0].max.monthly - 1440.0).abs() < EPS);
        assert!((budget.lines[1].recommended.monthly - 400.0).abs() < EPS);
        // weights 1.0 and 0.4 share the 800 midpoint
        assert!((budget.lines[2].recommended.monthly - 800.0 / 1.4).abs() < EPS);
        assert!((budget.lines[3].recommended.monthly - 800.0 * 0.4 / 1.4).abs() < EPS);
    }

    #[test]
    fn test_perfect_budget_pools() {
        let categories = vec![
            Category::new("Housing", CategoryKind::Need, 1).activated(),
            Category::new("Car Loan", CategoryKind::Debt, 3).activated(),
            Category::new("Emergency Fund", CategoryKind::Saving, 1).activated(),
        ];

        let budget = perfect_budget(&categories, 4000.0, PaymentCadence::BiWeekly);

        let needs = &budget.pools[0];
        assert!((needs.total.monthly - 2000.0).abs() < EPS);
        assert!((needs.lines[0].amount.monthly - 1250.0).abs() < EPS);
        assert!((needs.lines[1].amount.monthly - 750.0).abs() < EPS);

        let wants = &budget.pools[1];
        assert!(wants.is_unassigned());
        assert!((budget.unassigned().monthly - 1200.0).abs() < EPS);
        assert!((budget.unassigned().per_paycheck - 1200.0 / 2.167).abs() < EPS);

        let savings = &budget.pools[2];
        assert!((savings.lines[0].amount.monthly - 800.0).abs() < EPS);
    }

    #[test]
    fn test_projections_clamp_invalid_income() {
        let housing = Category::new("Housing", CategoryKind::Need, 1).activated();
        let budget = perfect_budget(std::slice::from_ref(&housing), -10.0, PaymentCadence::Weekly);
        assert_eq!(budget.monthly_income, 0.0);
        assert_eq!(budget.pools[0].lines[0].amount.monthly, 0.0);

        let recommended = recommended_budget(&[housing], f64::NAN, PaymentCadence::Weekly, as_of());
        assert_eq!(recommended.total().monthly, 0.0);
    }
}
