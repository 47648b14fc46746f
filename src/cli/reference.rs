//! Reference commands: `convert`, `limits`, `catalog` and `config`
//!
//! None of these read a budget file or write to the audit log.

use crate::catalog::CategoryStore;
use crate::config::{PlannerPaths, Settings};
use crate::display::{format_catalog_tree, format_conversion, format_policy_tables};
use crate::error::{PlannerError, PlannerResult};
use crate::models::{Amount, Category, CategoryKind, PaymentCadence};

/// Handle the `convert` command
pub fn handle_convert_command(
    settings: &Settings,
    amount: Amount,
    cadence: PaymentCadence,
    inverse: bool,
) -> PlannerResult<()> {
    let amount = amount.value();
    if amount < 0.0 {
        return Err(PlannerError::Validation(format!(
            "Amount must not be negative, got {}",
            amount
        )));
    }

    println!(
        "{}",
        format_conversion(amount, cadence, inverse, &settings.currency_symbol)
    );
    Ok(())
}

/// Handle the `limits` command
pub fn handle_limits_command() -> PlannerResult<()> {
    print!("{}", format_policy_tables());
    Ok(())
}

/// Handle the `catalog` command
pub fn handle_catalog_command(kind: Option<CategoryKind>) -> PlannerResult<()> {
    let store = CategoryStore::seeded();
    let categories: Vec<Category> = match kind {
        Some(kind) => store.of_kind(kind).cloned().collect(),
        None => store.all().to_vec(),
    };

    println!("{}", format_catalog_tree(&categories));
    Ok(())
}

/// Handle the `config` command
pub fn handle_config_command(
    paths: &PlannerPaths,
    settings: &Settings,
    init: bool,
) -> PlannerResult<()> {
    if init {
        settings.save(paths)?;
        println!("Settings written to: {}", paths.settings_file().display());
        println!();
    }

    println!("Paycheck Planner Configuration");
    println!("==============================");
    println!("Base directory: {}", paths.base_dir().display());
    println!("Settings file:  {}", paths.settings_file().display());
    println!("Audit log:      {}", paths.audit_log().display());
    if !paths.is_initialized() {
        println!("                (settings not saved yet; run 'paycheck config --init')");
    }
    println!();
    println!("Settings:");
    println!("  Default cadence:  {}", settings.default_cadence);
    println!("  Surplus policy:   {}", settings.surplus_policy);
    println!("  Currency symbol:  {}", settings.currency_symbol);
    println!("  Date format:      {}", settings.date_format);
    println!("  Audit enabled:    {}", settings.audit_enabled);

    Ok(())
}
