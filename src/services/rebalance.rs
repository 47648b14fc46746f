//! Deficit rebalancing
//!
//! When the four stages allocate more than the income, discretionary money is
//! given back first: every want may lose up to half of its allocation, then
//! non-essential needs (priority above 2) up to 30%. Debts, savings and
//! essential needs are never reduced.

use crate::models::CategoryKind;

use super::waterfall::{by_priority, Entry};

/// Largest fraction of a want's allocation that may be cut
pub const WANT_REDUCTION_LIMIT: f64 = 0.50;

/// Largest fraction of a non-essential need's allocation that may be cut
pub const NEED_REDUCTION_LIMIT: f64 = 0.30;

/// Needs at or below this priority are essential and never reduced
pub const ESSENTIAL_PRIORITY: u8 = 2;

/// Reduce allocations until `deficit` is covered or nothing reducible is left
///
/// Returns the deficit that could not be absorbed.
pub(crate) fn absorb_deficit(entries: &mut [Entry<'_>], deficit: f64) -> f64 {
    let mut remaining = deficit;

    let wants = by_priority(entries, CategoryKind::Want);
    let needs: Vec<usize> = by_priority(entries, CategoryKind::Need)
        .into_iter()
        .filter(|&i| entries[i].category.priority > ESSENTIAL_PRIORITY)
        .collect();

    let passes = [(wants, WANT_REDUCTION_LIMIT), (needs, NEED_REDUCTION_LIMIT)];

    for (indices, limit) in passes {
        for idx in indices {
            if remaining <= 0.0 {
                return 0.0;
            }

            let entry = &mut entries[idx];
            let cut = (entry.line.amount * limit).min(remaining);
            entry.reduce_by(cut);
            remaining -= cut;
        }
    }

    remaining.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, CategoryAllocation, Subcategory, SubcategoryAllocation};

    fn entry(category: &Category, amount: f64) -> Entry<'_> {
        let total = category.total_mode();
        let subcategories: Vec<SubcategoryAllocation> = category
            .active_subcategories()
            .map(|s| SubcategoryAllocation {
                id: s.id,
                name: s.name.clone(),
                amount: s.requested_amount.unwrap_or(0.0),
            })
            .collect();
        let amount = if subcategories.is_empty() {
            amount
        } else {
            subcategories.iter().map(|s| s.amount).sum()
        };

        Entry {
            category,
            total,
            line: CategoryAllocation {
                id: category.id,
                name: category.name.clone(),
                kind: category.kind(),
                priority: category.priority,
                amount,
                subcategories,
            },
        }
    }

    #[test]
    fn test_wants_cut_before_needs() {
        let want = Category::new("Shopping", CategoryKind::Want, 5);
        let need = Category::new("Clothing", CategoryKind::Need, 3);
        let mut entries = vec![entry(&need, 100.0), entry(&want, 100.0)];

        let left = absorb_deficit(&mut entries, 40.0);

        assert_eq!(left, 0.0);
        assert_eq!(entries[0].line.amount, 100.0);
        assert_eq!(entries[1].line.amount, 60.0);
    }

    #[test]
    fn test_reduction_limits_and_leftover() {
        let want = Category::new("Shopping", CategoryKind::Want, 5);
        let need = Category::new("Clothing", CategoryKind::Need, 4);
        let essential = Category::new("Housing", CategoryKind::Need, 1);
        let debt = Category::new("Car Loan", CategoryKind::Debt, 1);
        let saving = Category::new("Retirement", CategoryKind::Saving, 1);
        let mut entries = vec![
            entry(&want, 100.0),
            entry(&need, 100.0),
            entry(&essential, 1000.0),
            entry(&debt, 300.0),
            entry(&saving, 200.0),
        ];

        let left = absorb_deficit(&mut entries, 500.0);

        assert!((left - 420.0).abs() < 1e-9);
        assert_eq!(entries[0].line.amount, 50.0);
        assert!((entries[1].line.amount - 70.0).abs() < 1e-9);
        assert_eq!(entries[2].line.amount, 1000.0);
        assert_eq!(entries[3].line.amount, 300.0);
        assert_eq!(entries[4].line.amount, 200.0);
    }

    #[test]
    fn test_aggregated_cut_keeps_subcategory_sum() {
        let entertainment = Category::new("Entertainment", CategoryKind::Want, 3)
            .with_subcategory(Subcategory::new("Movies").with_requested(60.0))
            .with_subcategory(Subcategory::new("Games").with_requested(40.0));
        let mut entries = vec![entry(&entertainment, 0.0)];

        absorb_deficit(&mut entries, 30.0);

        let line = &entries[0].line;
        assert!((line.amount - 70.0).abs() < 1e-9);
        assert!((line.subcategory_total() - line.amount).abs() < 1e-9);
        assert!((line.subcategories[0].amount - 42.0).abs() < 1e-9);
        assert!((line.subcategories[1].amount - 28.0).abs() < 1e-9);
    }

    #[test]
    fn test_ties_follow_catalog_order() {
        let first = Category::new("Hobbies", CategoryKind::Want, 3);
        let second = Category::new("Shopping", CategoryKind::Want, 3);
        let mut entries = vec![entry(&first, 100.0), entry(&second, 100.0)];

        absorb_deficit(&mut entries, 30.0);

        assert_eq!(entries[0].line.amount, 70.0);
        assert_eq!(entries[1].line.amount, 100.0);
    }
}
