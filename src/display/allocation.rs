//! Allocation result display
//!
//! Renders an [`AllocationResult`] as a table of category lines (with their
//! subcategories indented beneath), followed by the totals, recommendations
//! and warnings.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};

use crate::models::{AllocationResult, Amount, AmountBasis, CategoryKind};

#[derive(Tabled)]
struct AllocationRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Kind")]
    kind: String,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "% of income")]
    share: String,
}

#[derive(Tabled)]
struct SummaryRow {
    #[tabled(rename = "Total")]
    label: &'static str,
    #[tabled(rename = "Amount")]
    amount: String,
}

fn percent(amount: f64, income: f64) -> String {
    if income > 0.0 {
        format!("{:.1}%", amount / income * 100.0)
    } else {
        "-".to_string()
    }
}

fn basis_label(result: &AllocationResult) -> String {
    match result.basis {
        AmountBasis::Monthly => format!("Monthly amounts ({} paychecks)", result.cadence),
        AmountBasis::PerPaycheck => format!("Per-paycheck amounts ({})", result.cadence),
    }
}

/// Format the category lines of a result as a table
pub fn format_allocation_table(result: &AllocationResult, symbol: &str) -> String {
    if result.categories.is_empty() {
        return "No active categories.".to_string();
    }

    let mut rows = Vec::new();
    for kind in CategoryKind::all() {
        for line in result.of_kind(*kind) {
            rows.push(AllocationRow {
                name: line.name.clone(),
                kind: kind.to_string(),
                priority: line.priority.to_string(),
                amount: Amount(line.amount).format_with_symbol(symbol),
                share: percent(line.amount, result.income),
            });

            for (i, sub) in line.subcategories.iter().enumerate() {
                let prefix = if i == line.subcategories.len() - 1 {
                    "└── "
                } else {
                    "├── "
                };
                rows.push(AllocationRow {
                    name: format!("  {}{}", prefix, sub.name),
                    kind: String::new(),
                    priority: String::new(),
                    amount: Amount(sub.amount).format_with_symbol(symbol),
                    share: percent(sub.amount, result.income),
                });
            }
        }
    }

    Table::new(rows)
        .with(Style::rounded())
        .modify(Columns::new(3..), Alignment::right())
        .to_string()
}

/// Format the summary totals
pub fn format_summary(result: &AllocationResult, symbol: &str) -> String {
    let s = &result.summary;
    let money = |v: f64| Amount(v).format_with_symbol(symbol);

    let mut rows = vec![
        SummaryRow { label: "Income", amount: money(result.income) },
        SummaryRow { label: "Debts", amount: money(s.total_debt) },
        SummaryRow { label: "Needs", amount: money(s.total_needs) },
        SummaryRow { label: "Savings", amount: money(s.total_savings) },
        SummaryRow { label: "Wants", amount: money(s.total_wants) },
        SummaryRow { label: "Allocated", amount: money(s.total_allocated) },
        SummaryRow {
            label: if s.is_deficit() { "Deficit" } else { "Surplus" },
            amount: money(s.surplus_or_deficit),
        },
    ];
    if s.extra_debt_paydown() >= 0.005 {
        rows.insert(
            2,
            SummaryRow {
                label: "  Required",
                amount: money(s.debt_payments),
            },
        );
        rows.insert(
            3,
            SummaryRow {
                label: "  From surplus",
                amount: money(s.extra_debt_paydown()),
            },
        );
    }
    if s.undistributed_surplus > 0.0 {
        rows.push(SummaryRow {
            label: "Set aside",
            amount: money(s.undistributed_surplus),
        });
    }

    Table::new(rows)
        .with(Style::rounded())
        .modify(Columns::new(1..), Alignment::right())
        .to_string()
}

/// Format a complete result: lines, totals, recommendations and warnings
pub fn format_allocation(result: &AllocationResult, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", basis_label(result)));
    output.push_str(&format_allocation_table(result, symbol));
    output.push_str("\n\n");
    output.push_str(&format_summary(result, symbol));
    output.push('\n');

    if !result.recommendations.is_empty() {
        output.push_str("\nRecommendations:\n");
        for rec in &result.recommendations {
            output.push_str(&format!("  • {}\n", rec));
        }
    }

    if !result.warnings.is_empty() {
        output.push_str("\nWarnings:\n");
        for warning in &result.warnings {
            output.push_str(&format!("  ! {}\n", warning));
        }
    }

    output
}
