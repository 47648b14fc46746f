//! Built-in category catalog
//!
//! Every category a budget can select without defining it first. Needs and
//! wants with a share table get their subcategories from it, inactive until a
//! budget selects them.

use crate::models::{Category, CategoryKind, Subcategory};
use crate::policy::shares_for;

struct SeedCategory {
    name: &'static str,
    emoji: &'static str,
    kind: CategoryKind,
    priority: u8,
    description: &'static str,
}

const fn seed(
    name: &'static str,
    emoji: &'static str,
    kind: CategoryKind,
    priority: u8,
    description: &'static str,
) -> SeedCategory {
    SeedCategory {
        name,
        emoji,
        kind,
        priority,
        description,
    }
}

use CategoryKind::{Debt, Need, Saving, Want};

const SEED: &[SeedCategory] = &[
    // Debts
    seed("Credit Card Debt", "💳", Debt, 1, "Revolving balances on credit cards"),
    seed("Medical Debt", "🏥", Debt, 1, "Outstanding hospital and doctor bills"),
    seed("Student Loans", "🎓", Debt, 2, "Federal and private student loans"),
    seed("Car Loan", "🚗", Debt, 2, "Auto financing payments"),
    seed("Personal Loan", "🤝", Debt, 3, "Unsecured personal loans and lines of credit"),
    seed("Back Taxes", "🧾", Debt, 1, "Taxes owed from previous years"),
    // Needs
    seed("Housing", "🏠", Need, 1, "Rent or mortgage and the costs of keeping a home"),
    seed("Food", "🍎", Need, 1, "Groceries and everyday meals"),
    seed("Utilities", "💡", Need, 1, "Electricity, water, gas and internet"),
    seed("Healthcare", "🩺", Need, 1, "Insurance premiums, visits and prescriptions"),
    seed("Transportation", "🚌", Need, 2, "Getting to work and around town"),
    seed("Childcare", "👶", Need, 2, "Daycare, babysitting and school programs"),
    seed("Insurance", "🛡️", Need, 2, "Life, disability and renters insurance"),
    seed("Phone", "📱", Need, 2, "Mobile phone plan"),
    seed("Education", "📚", Need, 2, "Tuition, books and courses"),
    seed("Personal Care", "🧴", Need, 3, "Haircuts, hygiene and grooming"),
    seed("Pets", "🐾", Need, 3, "Food, vet visits and care for pets"),
    seed("Clothing", "👕", Need, 4, "Work and everyday clothes"),
    // Wants
    seed("Entertainment", "🎬", Want, 3, "Movies, games, concerts and events"),
    seed("Dining Out", "🍽️", Want, 3, "Restaurants, cafes and takeout"),
    seed("Fitness", "🏋️", Want, 3, "Gym memberships and classes"),
    seed("Subscriptions", "📺", Want, 4, "Streaming, music, news and apps"),
    seed("Travel", "✈️", Want, 4, "Trips and weekend getaways"),
    seed("Hobbies", "🎨", Want, 4, "Supplies and fees for hobbies"),
    seed("Gifts", "🎁", Want, 4, "Birthdays, holidays and celebrations"),
    seed("Shopping", "🛍️", Want, 5, "Non-essential purchases"),
    seed("Charitable Giving", "💝", Want, 5, "Donations and tithing"),
    // Savings
    seed("Emergency Fund", "🆘", Saving, 1, "Three to six months of income set aside"),
    seed("Retirement", "🏖️", Saving, 1, "401(k), IRA and pension contributions"),
    seed("Home Down Payment", "🏡", Saving, 2, "Saving toward buying a home"),
    seed("Investments", "📈", Saving, 3, "Brokerage and index fund contributions"),
    seed("Education Fund", "🎒", Saving, 3, "College savings for yourself or children"),
    seed("Vacation", "🌴", Saving, 4, "Saving ahead for time off"),
    seed("New Car", "🚙", Saving, 4, "Saving for the next vehicle"),
    seed("Wedding", "💍", Saving, 5, "Ceremony and celebration costs"),
];

/// Build the built-in catalog in display order, every category inactive
pub fn seed_categories() -> Vec<Category> {
    SEED.iter().map(build).collect()
}

fn build(entry: &SeedCategory) -> Category {
    let mut category = Category::new(entry.name, entry.kind, entry.priority)
        .with_emoji(entry.emoji)
        .with_description(entry.description);

    if matches!(entry.kind, Need | Want) {
        if let Some(shares) = shares_for(entry.name) {
            for (name, _) in shares {
                category = category.with_subcategory(Subcategory::new(*name).inactive());
            }
        }
    }

    category
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_is_valid() {
        let categories = seed_categories();
        assert_eq!(categories.len(), 35);

        for category in &categories {
            assert!(category.validate().is_ok(), "{} is invalid", category.name);
            assert!(!category.active);
            assert!(!category.emoji.is_empty());
        }
    }

    #[test]
    fn test_seed_names_unique() {
        let categories = seed_categories();
        let names: HashSet<String> = categories.iter().map(|c| c.name.to_lowercase()).collect();
        assert_eq!(names.len(), categories.len());
    }

    #[test]
    fn test_every_kind_seeded() {
        let categories = seed_categories();
        for kind in CategoryKind::all() {
            assert!(categories.iter().any(|c| c.kind() == *kind));
        }
        assert!(categories.iter().any(|c| c.is_emergency_fund()));
    }

    #[test]
    fn test_share_tables_become_subcategories() {
        let categories = seed_categories();
        let housing = categories.iter().find(|c| c.is_housing()).unwrap();

        assert_eq!(housing.subcategories.len(), 5);
        assert_eq!(housing.subcategories[0].name, "Mortgage/Rent");
        assert!(housing.subcategories.iter().all(|s| !s.active));

        let debt = categories.iter().find(|c| c.name == "Car Loan").unwrap();
        assert!(debt.subcategories.is_empty());
    }
}
