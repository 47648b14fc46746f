//! Advisory recommendations
//!
//! Generated after the allocation is final. They only read the result and
//! never change an amount.

use crate::models::{
    AllocationSummary, Category, CategoryAllocation, CategoryKind, EMERGENCY_FUND, HOUSING,
};
use crate::policy::{limits_for, range_for, DEBT_TO_INCOME_CEILING};

/// Months of income an Emergency Fund should cover
pub const EMERGENCY_FUND_MONTHS: f64 = 3.0;

/// `unabsorbed` is the over-allocation left after deficit rebalancing
pub(crate) fn build_recommendations(
    categories: &[Category],
    lines: &[CategoryAllocation],
    summary: &AllocationSummary,
    income: f64,
    unabsorbed: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if unabsorbed > 0.0 {
        recommendations.push(format!(
            "Allocations exceed income by {:.2} even after trimming wants and non-essential needs; lower debt payments or savings",
            unabsorbed
        ));
    }

    let debt_ceiling = income * DEBT_TO_INCOME_CEILING;
    if summary.total_debt > debt_ceiling {
        recommendations.push(format!(
            "Debt payments of {:.2} exceed {:.0}% of income ({:.2}); consider refinancing or extending due dates",
            summary.total_debt,
            DEBT_TO_INCOME_CEILING * 100.0,
            debt_ceiling
        ));
    }

    let emergency_target = income * EMERGENCY_FUND_MONTHS;
    let emergency = lines
        .iter()
        .find(|l| l.kind == CategoryKind::Saving && l.name.eq_ignore_ascii_case(EMERGENCY_FUND));
    match emergency {
        Some(line) if line.amount < emergency_target => recommendations.push(format!(
            "Emergency Fund allocation of {:.2} is below the {:.0}-month target of {:.2}; keep building it",
            line.amount, EMERGENCY_FUND_MONTHS, emergency_target
        )),
        Some(_) => {}
        None => recommendations.push(format!(
            "No Emergency Fund is selected; aim to save {:.0} months of income ({:.2})",
            EMERGENCY_FUND_MONTHS, emergency_target
        )),
    }

    if let Some(line) = lines
        .iter()
        .find(|l| l.kind == CategoryKind::Need && l.name.eq_ignore_ascii_case(HOUSING))
    {
        let range = categories
            .iter()
            .find(|c| c.id == line.id)
            .map(range_for)
            .unwrap_or_else(|| limits_for(HOUSING));
        let housing_max = income * range.max;
        if line.amount > housing_max {
            recommendations.push(format!(
                "Housing allocation of {:.2} exceeds the recommended maximum of {:.2}",
                line.amount, housing_max
            ));
        }
    }

    recommendations
}
