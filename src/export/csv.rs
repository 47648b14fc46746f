//! CSV export of allocation results
//!
//! One row per category and per active subcategory, with both the monthly
//! and per-paycheck amount.

use serde::Serialize;
use std::io::Write;

use crate::error::PlannerResult;
use crate::models::{AllocationResult, AmountBasis, CategoryKind};

#[derive(Debug, Serialize)]
struct AllocationRecord<'a> {
    #[serde(rename = "Kind")]
    kind: CategoryKind,
    #[serde(rename = "Category")]
    category: &'a str,
    #[serde(rename = "Subcategory")]
    subcategory: &'a str,
    #[serde(rename = "Priority")]
    priority: u8,
    #[serde(rename = "Monthly")]
    monthly: String,
    #[serde(rename = "Per Paycheck")]
    per_paycheck: String,
}

fn cents(amount: f64) -> String {
    format!("{:.2}", amount)
}

/// Export every allocation line to CSV
pub fn export_allocation_csv<W: Write>(result: &AllocationResult, writer: W) -> PlannerResult<()> {
    let cadence = result.cadence;
    let both = |amount: f64| match result.basis {
        AmountBasis::Monthly => (cents(amount), cents(cadence.to_periodic(amount))),
        AmountBasis::PerPaycheck => (cents(cadence.to_monthly(amount)), cents(amount)),
    };

    let mut csv = csv::Writer::from_writer(writer);

    for line in &result.categories {
        let (monthly, per_paycheck) = both(line.amount);
        csv.serialize(AllocationRecord {
            kind: line.kind,
            category: &line.name,
            subcategory: "",
            priority: line.priority,
            monthly,
            per_paycheck,
        })?;

        for sub in &line.subcategories {
            let (monthly, per_paycheck) = both(sub.amount);
            csv.serialize(AllocationRecord {
                kind: line.kind,
                category: &line.name,
                subcategory: &sub.name,
                priority: line.priority,
                monthly,
                per_paycheck,
            })?;
        }
    }

    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AllocationSummary, CategoryAllocation, CategoryId, PaymentCadence,
        SubcategoryAllocation, SubcategoryId,
    };

    #[test]
    fn test_export_allocation_csv() {
        let lines = vec![CategoryAllocation {
            id: CategoryId::new(),
            name: "Food, Groceries & More".into(),
            kind: CategoryKind::Need,
            priority: 1,
            amount: 600.0,
            subcategories: vec![SubcategoryAllocation {
                id: SubcategoryId::new(),
                name: "Groceries".into(),
                amount: 600.0,
            }],
        }];
        let result = AllocationResult {
            cadence: PaymentCadence::SemiMonthly,
            basis: AmountBasis::Monthly,
            income: 3000.0,
            summary: AllocationSummary::from_lines(&lines, 3000.0, 0.0),
            categories: lines,
            recommendations: Vec::new(),
            warnings: Vec::new(),
        };

        let mut buffer = Vec::new();
        export_allocation_csv(&result, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows[0], "Kind,Category,Subcategory,Priority,Monthly,Per Paycheck");
        assert_eq!(rows[1], "need,\"Food, Groceries & More\",,1,600.00,300.00");
        assert_eq!(rows[2], "need,\"Food, Groceries & More\",Groceries,1,600.00,300.00");
        assert_eq!(rows.len(), 3);
    }
}
