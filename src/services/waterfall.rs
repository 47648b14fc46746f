//! Allocation waterfall
//!
//! Splits a monthly income across the active categories in five fixed
//! stages, each drawing on what the previous stage left over:
//!
//! 1. debts, in priority order, up to the 36% debt-to-income ceiling
//! 2. needs, clamped to their policy ranges
//! 3. savings, Emergency Fund first
//! 4. wants, capped by the discretionary range
//! 5. reconciliation: deficit rebalancing or surplus distribution
//!
//! Every call recomputes the whole result from its inputs. The engine keeps
//! no state between calls besides its options.

use chrono::{Local, NaiveDate};

use crate::models::{
    AllocationResult, AllocationSummary, AllocationWarning, AmountBasis, Category,
    CategoryAllocation, CategoryKind, CategoryTotal, PaymentCadence, SubcategoryAllocation,
};
use crate::policy::{
    distribute_by_weight, limits_for, subcategory_share, weight_for, DEBT_TO_INCOME_CEILING,
    DISCRETIONARY_RANGE, SAVINGS_RANGE,
};
use crate::policy::limits::{DEFAULT_WANT_SHARE, EMERGENCY_FUND_INCOME_SHARE};

use super::rebalance::absorb_deficit;
use super::recommendations::build_recommendations;
use super::surplus::{distribute_surplus, UndistributedSurplusPolicy};

/// Savings with an entered amount may exceed their weighted share by this factor
const SAVINGS_REQUEST_ALLOWANCE: f64 = 1.2;

/// Options fixed for the lifetime of an engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineOptions {
    /// Reference date for months-until-due
    pub as_of: NaiveDate,
    pub surplus_policy: UndistributedSurplusPolicy,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            as_of: Local::now().date_naive(),
            surplus_policy: UndistributedSurplusPolicy::default(),
        }
    }
}

/// One active category while a run is in progress
#[derive(Debug, Clone)]
pub(crate) struct Entry<'a> {
    pub category: &'a Category,
    pub total: CategoryTotal,
    pub line: CategoryAllocation,
}

impl Entry<'_> {
    pub fn kind(&self) -> CategoryKind {
        self.category.kind()
    }

    pub fn is_aggregated(&self) -> bool {
        matches!(self.total, CategoryTotal::Aggregated(_))
    }

    /// Recompute an aggregated total from its subcategories
    pub fn sync_total(&mut self) {
        if self.is_aggregated() {
            self.line.amount = self.line.subcategory_total();
        }
    }

    /// Scale the allocation down by `cut`, spreading it over subcategories
    /// when the total is aggregated
    pub fn reduce_by(&mut self, cut: f64) {
        if cut <= 0.0 || self.line.amount <= 0.0 {
            return;
        }

        if self.is_aggregated() {
            let factor = ((self.line.amount - cut) / self.line.amount).max(0.0);
            for sub in &mut self.line.subcategories {
                sub.amount *= factor;
            }
            self.sync_total();
        } else {
            self.line.amount = (self.line.amount - cut).max(0.0);
        }
    }
}

/// Indices of entries of one kind, most essential first; catalog order
/// breaks ties
pub(crate) fn by_priority(entries: &[Entry<'_>], kind: CategoryKind) -> Vec<usize> {
    let mut indices: Vec<usize> = entries
        .iter()
        .enumerate()
        .filter(|(_, e)| e.kind() == kind)
        .map(|(i, _)| i)
        .collect();
    indices.sort_by_key(|&i| entries[i].category.priority);
    indices
}

pub(crate) fn total_of(entries: &[Entry<'_>], kind: CategoryKind) -> f64 {
    entries
        .iter()
        .filter(|e| e.kind() == kind)
        .map(|e| e.line.amount)
        .sum()
}

/// Entered amounts that are negative or not numbers count as absent
pub(crate) fn entered(amount: Option<f64>) -> Option<f64> {
    amount.filter(|a| a.is_finite() && *a >= 0.0)
}

/// The allocation engine
#[derive(Debug, Clone, Default)]
pub struct AllocationEngine {
    options: EngineOptions,
}

impl AllocationEngine {
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Engine with default options and a fixed reference date
    pub fn as_of(as_of: NaiveDate) -> Self {
        Self::new(EngineOptions {
            as_of,
            ..EngineOptions::default()
        })
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Allocate a per-paycheck income; the result stays on the monthly basis
    pub fn recalculate_paycheck(
        &self,
        categories: &[Category],
        paycheck_amount: f64,
        cadence: PaymentCadence,
    ) -> AllocationResult {
        self.recalculate(categories, cadence.to_monthly(paycheck_amount), cadence)
    }

    /// Run the full waterfall
    ///
    /// Inactive categories and subcategories are ignored. Amounts in the
    /// result are monthly; use [`AllocationResult::per_paycheck`] for the
    /// cadence's paycheck amounts.
    pub fn recalculate(
        &self,
        categories: &[Category],
        monthly_income: f64,
        cadence: PaymentCadence,
    ) -> AllocationResult {
        let mut warnings = Vec::new();

        let income = if monthly_income.is_finite() && monthly_income >= 0.0 {
            monthly_income
        } else {
            warnings.push(AllocationWarning::InvalidIncome {
                supplied: monthly_income.to_string(),
            });
            0.0
        };

        let mut entries = plan(categories);

        let total_debt = self.allocate_debts(&mut entries, income, &mut warnings);
        let after_debts = (income - total_debt).max(0.0);

        let total_needs = allocate_needs(&mut entries, after_debts);
        let after_needs = (after_debts - total_needs).max(0.0);

        let total_savings = allocate_savings(&mut entries, after_needs, income);
        let after_savings = (after_needs - total_savings).max(0.0);

        allocate_wants(&mut entries, after_savings);

        let mut discarded = 0.0;
        let mut unabsorbed = 0.0;
        let allocated: f64 = entries.iter().map(|e| e.line.amount).sum();
        let surplus = income - allocated;

        if surplus < 0.0 {
            unabsorbed = absorb_deficit(&mut entries, -surplus);
        } else {
            let undistributed = distribute_surplus(&mut entries, surplus, income);
            if self.options.surplus_policy == UndistributedSurplusPolicy::Discard {
                discarded = undistributed;
            }
        }
        sync_totals(&mut entries);

        let lines: Vec<CategoryAllocation> = entries.into_iter().map(|e| e.line).collect();
        let summary =
            AllocationSummary::from_lines(&lines, income, discarded).with_debt_payments(total_debt);
        let recommendations =
            build_recommendations(categories, &lines, &summary, income, unabsorbed);

        AllocationResult {
            cadence,
            basis: AmountBasis::Monthly,
            income,
            categories: lines,
            summary,
            recommendations,
            warnings,
        }
    }

    /// Stage 1: debts against the debt-to-income ceiling
    fn allocate_debts(
        &self,
        entries: &mut [Entry<'_>],
        income: f64,
        warnings: &mut Vec<AllocationWarning>,
    ) -> f64 {
        let ceiling = income * DEBT_TO_INCOME_CEILING;
        let mut total = 0.0;
        let mut ceiling_reached = false;

        for idx in by_priority(entries, CategoryKind::Debt) {
            let entry = &mut entries[idx];
            let category = entry.category;

            if category.due_date.is_none() {
                warnings.push(AllocationWarning::MissingDueDate {
                    category: category.name.clone(),
                });
                continue;
            }
            if entered(category.requested_amount).is_none() {
                warnings.push(AllocationWarning::MissingDebtAmount {
                    category: category.name.clone(),
                });
                continue;
            }
            if ceiling_reached {
                continue;
            }

            let payment = category.monthly_payment(self.options.as_of).unwrap_or(0.0);
            let headroom = (ceiling - total).max(0.0);

            let amount = if payment > headroom {
                ceiling_reached = true;
                headroom
            } else {
                payment
            };

            entry.line.amount = amount;
            total += amount;
        }

        total
    }
}

/// Build one entry per active category, resolving how each total is derived
fn plan(categories: &[Category]) -> Vec<Entry<'_>> {
    categories
        .iter()
        .filter(|c| c.active)
        .map(|category| {
            let total = category.total_mode();
            let subcategories = match &total {
                CategoryTotal::Aggregated(_) => category
                    .active_subcategories()
                    .map(|s| SubcategoryAllocation {
                        id: s.id,
                        name: s.name.clone(),
                        amount: 0.0,
                    })
                    .collect(),
                CategoryTotal::Flat => Vec::new(),
            };

            Entry {
                category,
                total,
                line: CategoryAllocation {
                    id: category.id,
                    name: category.name.clone(),
                    kind: category.kind(),
                    priority: category.priority,
                    amount: 0.0,
                    subcategories,
                },
            }
        })
        .collect()
}

/// Fill an aggregated entry's subcategories: entered amounts first, otherwise
/// the subcategory's share of `ceiling`
fn fill_subcategories(entry: &mut Entry<'_>, ceiling: f64) {
    let category = entry.category;
    let siblings = entry.line.subcategories.len();

    for sub_line in &mut entry.line.subcategories {
        let requested = category
            .subcategories
            .iter()
            .find(|s| s.id == sub_line.id)
            .and_then(|s| entered(s.requested_amount));

        sub_line.amount = requested.unwrap_or_else(|| {
            ceiling * subcategory_share(&category.name, &sub_line.name, siblings)
        });
    }

    entry.sync_total();
}

/// Stage 2: needs, each measured against what debts left over
fn allocate_needs(entries: &mut [Entry<'_>], base: f64) -> f64 {
    for idx in by_priority(entries, CategoryKind::Need) {
        let entry = &mut entries[idx];
        let category = entry.category;
        let range = category
            .limits
            .unwrap_or_else(|| limits_for(&category.name));

        if entry.is_aggregated() {
            fill_subcategories(entry, base * range.max);
        } else {
            let floor = base * range.min;
            let requested = entered(category.requested_amount).unwrap_or(floor);
            let weighted = weight_for(category.priority) * requested;
            entry.line.amount = range.clamp_of(base, weighted).max(0.0);
        }
    }

    total_of(entries, CategoryKind::Need)
}

/// Stage 3: Emergency Fund, then the other savings by priority weight
fn allocate_savings(entries: &mut [Entry<'_>], base: f64, income: f64) -> f64 {
    let mut emergency = 0.0;
    if let Some(entry) = entries.iter_mut().find(|e| e.category.is_emergency_fund()) {
        let target = entered(entry.category.requested_amount)
            .unwrap_or(income * EMERGENCY_FUND_INCOME_SHARE);
        emergency = (base * SAVINGS_RANGE.min).min(target).max(0.0);
        entry.line.amount = emergency;
    }

    let headroom = (base * SAVINGS_RANGE.max - emergency).min(base - emergency);
    if headroom > 0.0 {
        let others: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.kind() == CategoryKind::Saving && !e.category.is_emergency_fund())
            .map(|(i, _)| i)
            .collect();

        let weights: Vec<f64> = others
            .iter()
            .map(|&i| weight_for(entries[i].category.priority))
            .collect();
        let shares = distribute_by_weight(headroom, &weights);

        for (&idx, share) in others.iter().zip(shares) {
            let entry = &mut entries[idx];
            entry.line.amount = match entered(entry.category.requested_amount) {
                Some(requested) => requested.min(share * SAVINGS_REQUEST_ALLOWANCE),
                None => share,
            };
        }
    }

    total_of(entries, CategoryKind::Saving)
}

/// Stage 4: wants, each measured against what savings left over
fn allocate_wants(entries: &mut [Entry<'_>], base: f64) -> f64 {
    for idx in by_priority(entries, CategoryKind::Want) {
        let entry = &mut entries[idx];
        let category = entry.category;

        if entry.is_aggregated() {
            let range = category
                .limits
                .unwrap_or_else(|| limits_for(&category.name));
            fill_subcategories(entry, base * range.max);
        } else {
            let cap = base * DISCRETIONARY_RANGE.max;
            let requested =
                entered(category.requested_amount).unwrap_or(base * DEFAULT_WANT_SHARE);
            entry.line.amount = cap.min(requested).max(0.0);
        }
    }

    total_of(entries, CategoryKind::Want)
}

fn sync_totals(entries: &mut [Entry<'_>]) {
    for entry in entries
        .iter_mut()
        .filter(|e| matches!(e.kind(), CategoryKind::Need | CategoryKind::Want))
    {
        entry.sync_total();
    }
}
