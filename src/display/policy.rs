//! Policy table and catalog display

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Amount, Category, CategoryKind, PaymentCadence};
use crate::policy::{
    CATEGORY_LIMITS, DEBT_TO_INCOME_CEILING, DEFAULT_RANGE, DISCRETIONARY_RANGE,
    PRIORITY_WEIGHTS, SAVINGS_RANGE, SUBCATEGORY_SHARES,
};

#[derive(Tabled)]
struct LimitRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Min")]
    min: String,
    #[tabled(rename = "Max")]
    max: String,
}

#[derive(Tabled)]
struct WeightRow {
    #[tabled(rename = "Priority")]
    priority: u8,
    #[tabled(rename = "Weight")]
    weight: String,
}

fn pct(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

/// Format every policy table: category ranges, stage ranges, subcategory
/// shares and priority weights
pub fn format_policy_tables() -> String {
    let mut limits: Vec<LimitRow> = CATEGORY_LIMITS
        .iter()
        .map(|(name, range)| LimitRow {
            name: name.to_string(),
            min: pct(range.min),
            max: pct(range.max),
        })
        .collect();
    limits.push(LimitRow {
        name: "(other)".to_string(),
        min: pct(DEFAULT_RANGE.min),
        max: pct(DEFAULT_RANGE.max),
    });

    let mut output = String::from("Category limits (share of monthly income)\n");
    output.push_str(&Table::new(limits).with(Style::rounded()).to_string());

    output.push_str("\n\nStage limits\n");
    output.push_str(&format!(
        "  Debt-to-income ceiling: {}\n",
        pct(DEBT_TO_INCOME_CEILING)
    ));
    output.push_str(&format!(
        "  Savings:                {} - {}\n",
        pct(SAVINGS_RANGE.min),
        pct(SAVINGS_RANGE.max)
    ));
    output.push_str(&format!(
        "  Wants:                  {} - {}\n",
        pct(DISCRETIONARY_RANGE.min),
        pct(DISCRETIONARY_RANGE.max)
    ));

    output.push_str("\nSubcategory shares\n");
    for (parent, shares) in SUBCATEGORY_SHARES {
        let parts: Vec<String> = shares
            .iter()
            .map(|(name, share)| format!("{} {}", name, pct(*share)))
            .collect();
        output.push_str(&format!("  {}: {}\n", parent, parts.join(", ")));
    }

    let weights: Vec<WeightRow> = PRIORITY_WEIGHTS
        .iter()
        .map(|(priority, weight)| WeightRow {
            priority: *priority,
            weight: format!("{:.1}", weight),
        })
        .collect();
    output.push_str("\nPriority weights\n");
    output.push_str(&Table::new(weights).with(Style::rounded()).to_string());
    output.push('\n');

    output
}

/// Format categories as a tree grouped by kind
pub fn format_catalog_tree(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let mut output = String::new();
    let kinds: Vec<&CategoryKind> = CategoryKind::all()
        .iter()
        .filter(|k| categories.iter().any(|c| c.kind() == **k))
        .collect();

    for (i, kind) in kinds.iter().enumerate() {
        output.push_str(&format!("{}\n", kind.plural()));

        let members: Vec<&Category> = categories.iter().filter(|c| c.kind() == **kind).collect();
        for (j, category) in members.iter().enumerate() {
            let is_last = j == members.len() - 1;
            let prefix = if is_last { "└── " } else { "├── " };

            output.push_str(&format!(
                "  {}{} (priority {})",
                prefix, category, category.priority
            ));
            if !category.description.is_empty() {
                output.push_str(&format!(" - {}", category.description));
            }
            output.push('\n');

            if !category.subcategories.is_empty() {
                let branch = if is_last { "    " } else { "│   " };
                let names: Vec<&str> = category
                    .subcategories
                    .iter()
                    .map(|s| s.name.as_str())
                    .collect();
                output.push_str(&format!("  {}  {}\n", branch, names.join(", ")));
            }
        }

        if i < kinds.len() - 1 {
            output.push('\n');
        }
    }

    output
}

/// Format a cadence conversion
pub fn format_conversion(amount: f64, cadence: PaymentCadence, inverse: bool, symbol: &str) -> String {
    let money = |v: f64| Amount(v).format_with_symbol(symbol);

    if inverse {
        format!(
            "{} monthly = {} per {} paycheck",
            money(amount),
            money(cadence.to_periodic(amount)),
            cadence.label().to_lowercase()
        )
    } else {
        format!(
            "{} per {} paycheck = {} monthly ({} yearly)",
            money(amount),
            cadence.label().to_lowercase(),
            money(cadence.to_monthly(amount)),
            money(cadence.to_annual(amount))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed_categories;

    #[test]
    fn test_policy_tables() {
        let output = format_policy_tables();
        assert!(output.contains("Housing"));
        assert!(output.contains("28%"));
        assert!(output.contains("Debt-to-income ceiling: 36%"));
        assert!(output.contains("Mortgage/Rent 70%"));
        assert!(output.contains("0.2"));
    }

    #[test]
    fn test_catalog_tree() {
        let output = format_catalog_tree(&seed_categories());
        assert!(output.starts_with("Debts\n"));
        assert!(output.contains("Needs\n"));
        assert!(output.contains("🏠 Housing (priority 1)"));
        assert!(output.contains("Groceries, Dining Out"));
        assert!(format_catalog_tree(&[]).contains("No categories found"));
    }

    #[test]
    fn test_conversion() {
        assert_eq!(
            format_conversion(2000.0, PaymentCadence::BiWeekly, false, "$"),
            "$2000.00 per bi-weekly paycheck = $4000.00 monthly ($52000.00 yearly)"
        );
        assert_eq!(
            format_conversion(4000.0, PaymentCadence::BiWeekly, true, "$"),
            "$4000.00 monthly = $1845.87 per bi-weekly paycheck"
        );
    }
}
