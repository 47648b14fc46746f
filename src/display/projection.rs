//! Projection display

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::Amount;
use crate::services::projections::{PerfectBudget, RecommendedBudget};

#[derive(Tabled)]
struct RecommendedRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Range (monthly)")]
    range: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Per paycheck")]
    per_paycheck: String,
}

#[derive(Tabled)]
struct PerfectRow {
    #[tabled(rename = "Pool")]
    pool: String,
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Monthly")]
    monthly: String,
    #[tabled(rename = "Per paycheck")]
    per_paycheck: String,
}

pub fn format_recommended(budget: &RecommendedBudget, symbol: &str) -> String {
    if budget.lines.is_empty() {
        return "No active categories.".to_string();
    }

    let money = |v: f64| Amount(v).format_with_symbol(symbol);
    let mut rows = Vec::new();

    for line in &budget.lines {
        rows.push(RecommendedRow {
            name: line.name.clone(),
            kind: line.kind.to_string(),
            range: format!("{} - {}", money(line.min.monthly), money(line.max.monthly)),
            monthly: money(line.recommended.monthly),
            per_paycheck: money(line.recommended.per_paycheck),
        });

        for sub in &line.subcategories {
            rows.push(RecommendedRow {
                name: format!("  └── {}", sub.name),
                kind: String::new(),
                range: String::new(),
                monthly: money(sub.recommended.monthly),
                per_paycheck: money(sub.recommended.per_paycheck),
            });
        }
    }

    let total = budget.total();
    let mut output = format!(
        "Recommended budget for {} monthly income ({} paychecks)\n",
        money(budget.monthly_income),
        budget.cadence
    );
    output.push_str(
        &Table::new(rows)
            .with(Style::rounded())
            .modify(Columns::new(2..), Alignment::right())
            .to_string(),
    );
    output.push_str(&format!(
        "\nTotal recommended: {} monthly, {} per paycheck\n",
        money(total.monthly),
        money(total.per_paycheck)
    ));

    output
}

pub fn format_perfect(budget: &PerfectBudget, symbol: &str) -> String {
    let money = |v: f64| Amount(v).format_with_symbol(symbol);
    let mut rows = Vec::new();

    for pool in &budget.pools {
        let header = format!("{} ({:.0}%)", pool.label, pool.share * 100.0);

        if pool.is_unassigned() {
            rows.push(PerfectRow {
                pool: header,
                name: "(unassigned)".to_string(),
                monthly: money(pool.total.monthly),
                per_paycheck: money(pool.total.per_paycheck),
            });
            continue;
        }

        for (i, line) in pool.lines.iter().enumerate() {
            rows.push(PerfectRow {
                pool: if i == 0 { header.clone() } else { String::new() },
                name: line.name.clone(),
                monthly: money(line.amount.monthly),
                per_paycheck: money(line.amount.per_paycheck),
            });
        }
    }

    let mut output = format!(
        "50/30/20 budget for {} monthly income ({} paychecks)\n",
        money(budget.monthly_income),
        budget.cadence
    );
    output.push_str(
        &Table::new(rows)
            .with(Style::rounded())
            .modify(Columns::new(2..), Alignment::right())
            .to_string(),
    );
    output.push('\n');

    let unassigned = budget.unassigned();
    if unassigned.monthly > 0.0 {
        output.push_str(&format!(
            "Unassigned: {} monthly (no active categories in those pools)\n",
            money(unassigned.monthly)
        ));
    }

    output
}
