//! Budget input files
//!
//! A budget file names the income, how often it arrives and which categories
//! are selected, with their entered amounts. YAML and JSON are both accepted:
//!
//! ```yaml
//! income: 2000
//! cadence: bi-weekly
//! categories:
//!   - name: Housing
//!     subcategories:
//!       - name: Rent
//!         requested: 1200
//!   - name: Credit Card Debt
//!     requested: 2400
//!     due_date: 2026-01-15
//!   - name: Boat Fund
//!     kind: saving
//!     priority: 5
//! ```

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::models::{Category, CategoryKind, PaymentCadence, Subcategory};
use crate::policy::PolicyRange;

use super::store::CategoryStore;

/// Priority given to custom categories that do not name one
pub const DEFAULT_CUSTOM_PRIORITY: u8 = 3;

/// Whether `income` is one paycheck or a whole month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomeBasis {
    #[default]
    Paycheck,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubcategorySelection {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySelection {
    pub name: String,
    /// Required for categories outside the built-in catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<CategoryKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<PolicyRange>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subcategories: Vec<SubcategorySelection>,
}

/// A budget input document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetFile {
    pub income: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<PaymentCadence>,
    #[serde(default)]
    pub income_basis: IncomeBasis,
    #[serde(default)]
    pub categories: Vec<CategorySelection>,
}

impl BudgetFile {
    /// Read a budget file; `.json` is parsed as JSON, anything else as YAML
    pub fn load(path: impl AsRef<Path>) -> PlannerResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            PlannerError::Budget(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        if is_json {
            Self::from_json(&contents)
        } else {
            Self::from_yaml(&contents)
        }
        .map_err(|e| PlannerError::Budget(format!("Failed to parse {}: {}", path.display(), e)))
    }

    pub fn from_yaml(contents: &str) -> PlannerResult<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    pub fn from_json(contents: &str) -> PlannerResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    /// The file's cadence, or `default` when it names none
    pub fn cadence_or(&self, default: PaymentCadence) -> PaymentCadence {
        self.cadence.unwrap_or(default)
    }

    /// Income normalized to a monthly amount
    pub fn monthly_income(&self, cadence: PaymentCadence) -> f64 {
        match self.income_basis {
            IncomeBasis::Paycheck => cadence.to_monthly(self.income),
            IncomeBasis::Monthly => self.income,
        }
    }

    /// Activate the selected categories in `store`
    ///
    /// Names found in the store activate that entry, with any given fields
    /// overriding it. Unknown names become custom categories and must give a
    /// kind.
    pub fn apply(&self, store: &mut CategoryStore) -> PlannerResult<()> {
        for selection in &self.categories {
            let id = match store.find_by_name(&selection.name) {
                Some(existing) => existing.id,
                None => {
                    let kind = selection.kind.ok_or_else(|| {
                        PlannerError::Budget(format!(
                            "Category '{}' is not in the catalog; give it a kind",
                            selection.name
                        ))
                    })?;
                    let priority = selection.priority.unwrap_or(DEFAULT_CUSTOM_PRIORITY);
                    store.add(Category::new(selection.name.trim(), kind, priority))?
                }
            };

            store.update(id, |category| selection.merge_into(category))?;
        }

        Ok(())
    }
}

impl CategorySelection {
    fn merge_into(&self, category: &mut Category) {
        category.activate();

        if let Some(priority) = self.priority {
            category.priority = priority;
        }
        if let Some(requested) = self.requested {
            category.set_requested(Some(requested));
        }
        if let Some(due_date) = self.due_date {
            category.set_due_date(Some(due_date));
        }
        if let Some(emoji) = &self.emoji {
            category.emoji = emoji.clone();
        }
        if let Some(limits) = self.limits {
            category.limits = Some(limits);
        }

        for selected in &self.subcategories {
            if category.subcategory_by_name(&selected.name).is_none() {
                category
                    .subcategories
                    .push(Subcategory::new(selected.name.trim()));
            }

            if let Some(sub) = category.subcategory_by_name_mut(&selected.name) {
                sub.active = true;
                if let Some(requested) = selected.requested {
                    sub.requested_amount = Some(requested);
                }
                if let Some(priority) = selected.priority {
                    sub.priority = priority;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    const SAMPLE: &str = r#"
income: 2000
cadence: bi-weekly
categories:
  - name: Housing
    subcategories:
      - name: Rent
        requested: 1200
      - name: Pool Service
  - name: credit card debt
    requested: 2400
    due_date: 2026-01-15
  - name: Boat Fund
    kind: saving
    priority: 5
"#;

    #[test]
    fn test_parse_yaml() {
        let file = BudgetFile::from_yaml(SAMPLE).unwrap();
        assert_eq!(file.income, 2000.0);
        assert_eq!(file.cadence, Some(PaymentCadence::BiWeekly));
        assert_eq!(file.income_basis, IncomeBasis::Paycheck);
        assert_eq!(file.categories.len(), 3);
        assert_eq!(file.monthly_income(PaymentCadence::BiWeekly), 4000.0);
    }

    #[test]
    fn test_monthly_basis() {
        let file = BudgetFile::from_json(r#"{"income": 5000, "income_basis": "monthly"}"#).unwrap();
        assert_eq!(file.cadence_or(PaymentCadence::Weekly), PaymentCadence::Weekly);
        assert_eq!(file.monthly_income(PaymentCadence::Weekly), 5000.0);
    }

    #[test]
    fn test_apply_selections() {
        let file = BudgetFile::from_yaml(SAMPLE).unwrap();
        let mut store = CategoryStore::seeded();
        let seeded = store.len();

        file.apply(&mut store).unwrap();

        assert_eq!(store.len(), seeded + 1);
        assert_eq!(store.active().count(), 3);

        let housing = store.find_by_name("Housing").unwrap();
        let rent = housing.subcategory_by_name("Mortgage/Rent").unwrap();
        assert!(rent.active);
        assert_eq!(rent.requested_amount, Some(1200.0));
        assert!(housing.subcategory_by_name("Pool Service").unwrap().active);
        assert_eq!(housing.active_subcategories().count(), 2);

        let debt = store.find_by_name("Credit Card Debt").unwrap();
        assert_eq!(debt.requested_amount, Some(2400.0));
        assert!(debt.due_date.is_some());

        let boat = store.find_by_name("Boat Fund").unwrap();
        assert_eq!(boat.kind(), CategoryKind::Saving);
        assert_eq!(boat.priority, 5);
    }

    #[test]
    fn test_unknown_category_needs_kind() {
        let file = BudgetFile::from_yaml("income: 100\ncategories:\n  - name: Mystery\n").unwrap();
        let mut store = CategoryStore::seeded();

        let err = file.apply(&mut store).unwrap_err();
        assert!(matches!(err, PlannerError::Budget(_)));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let file = BudgetFile::from_yaml(
            "income: 100\ncategories:\n  - name: Food\n    due_date: 2026-01-01\n",
        )
        .unwrap();
        let mut store = CategoryStore::seeded();

        let err = file.apply(&mut store).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_load_by_extension() {
        let mut json = Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"income": 1000, "cadence": "weekly"}}"#).unwrap();
        let loaded = BudgetFile::load(json.path()).unwrap();
        assert_eq!(loaded.cadence, Some(PaymentCadence::Weekly));

        let mut yaml = Builder::new().suffix(".yaml").tempfile().unwrap();
        write!(yaml, "{}", SAMPLE).unwrap();
        assert_eq!(BudgetFile::load(yaml.path()).unwrap().income, 2000.0);

        let err = BudgetFile::load("/nonexistent/budget.yaml").unwrap_err();
        assert!(matches!(err, PlannerError::Budget(_)));
    }
}
