//! Category store
//!
//! Holds the categories for one planning session. The composition root
//! creates it, applies the budget's selections, then hands the engine a
//! [`CatalogSnapshot`]. Every mutation bumps the version, so a snapshot can
//! tell whether it is stale.

use chrono::NaiveDate;

use crate::error::{PlannerError, PlannerResult};
use crate::models::{Category, CategoryId, CategoryKind, Subcategory};

use super::seed::seed_categories;

/// An immutable copy of the store's categories at one version
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSnapshot {
    pub version: u64,
    pub categories: Vec<Category>,
}

impl CatalogSnapshot {
    pub fn active(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.active)
    }
}

/// Ordered, owned collection of categories
#[derive(Debug, Clone, Default)]
pub struct CategoryStore {
    categories: Vec<Category>,
    version: u64,
}

impl CategoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the built-in catalog
    pub fn seeded() -> Self {
        Self {
            categories: seed_categories(),
            version: 0,
        }
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// All categories in catalog order
    pub fn all(&self) -> &[Category] {
        &self.categories
    }

    pub fn of_kind(&self, kind: CategoryKind) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.kind() == kind)
    }

    pub fn active(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(|c| c.active)
    }

    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Find a category by name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Clone the current state for a recalculation
    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            version: self.version,
            categories: self.categories.clone(),
        }
    }

    /// Add a validated category with a unique name
    pub fn add(&mut self, category: Category) -> PlannerResult<CategoryId> {
        category
            .validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;

        if self.find_by_name(&category.name).is_some() {
            return Err(PlannerError::Validation(format!(
                "Category '{}' already exists",
                category.name
            )));
        }

        let id = category.id;
        self.categories.push(category);
        self.version += 1;
        Ok(id)
    }

    /// Apply a change to one category, keeping it only if it still validates
    pub fn update<F>(&mut self, id: CategoryId, change: F) -> PlannerResult<&Category>
    where
        F: FnOnce(&mut Category),
    {
        let index = self
            .categories
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| PlannerError::category_not_found(id.to_string()))?;

        let mut updated = self.categories[index].clone();
        change(&mut updated);
        updated
            .validate()
            .map_err(|e| PlannerError::Validation(e.to_string()))?;

        self.categories[index] = updated;
        self.version += 1;
        Ok(&self.categories[index])
    }

    pub fn activate(&mut self, id: CategoryId) -> PlannerResult<()> {
        self.update(id, Category::activate).map(|_| ())
    }

    pub fn deactivate(&mut self, id: CategoryId) -> PlannerResult<()> {
        self.update(id, Category::deactivate).map(|_| ())
    }

    pub fn set_requested(&mut self, id: CategoryId, amount: Option<f64>) -> PlannerResult<()> {
        self.update(id, |c| c.set_requested(amount)).map(|_| ())
    }

    pub fn set_due_date(&mut self, id: CategoryId, due_date: Option<NaiveDate>) -> PlannerResult<()> {
        self.update(id, |c| c.set_due_date(due_date)).map(|_| ())
    }

    /// Activate a subcategory by name, creating it when the category has none
    /// with that name
    pub fn activate_subcategory(&mut self, id: CategoryId, name: &str) -> PlannerResult<()> {
        self.update(id, |category| match category.subcategory_by_name_mut(name) {
            Some(sub) => sub.active = true,
            None => category.subcategories.push(Subcategory::new(name.trim())),
        })
        .map(|_| ())
    }

    /// Deactivate every category and subcategory
    pub fn clear_selection(&mut self) {
        for category in &mut self.categories {
            category.deactivate();
            for sub in &mut category.subcategories {
                sub.active = false;
            }
        }
        self.version += 1;
    }
}
