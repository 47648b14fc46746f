use anyhow::Result;
use clap::{Parser, Subcommand};

use paycheck::cli::{
    handle_catalog_command, handle_config_command, handle_convert_command,
    handle_history_command, handle_limits_command, handle_perfect_command, handle_plan_command,
    handle_recommend_command, PlanArgs, ProjectionArgs,
};
use paycheck::config::{PlannerPaths, Settings};
use paycheck::models::{Amount, CategoryKind, PaymentCadence};

#[derive(Parser)]
#[command(
    name = "paycheck",
    author,
    version,
    about = "Split a paycheck across debts, needs, savings and wants",
    long_about = "Paycheck Planner allocates each paycheck through a priority waterfall: \
                  debts first, then needs, savings and wants, all held to \
                  fraction-of-income policy limits. Over-allocation is trimmed from \
                  the least essential categories and any surplus goes to the \
                  Emergency Fund and debt."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Allocate the income in a budget file
    Plan(PlanArgs),

    /// Show the policy-recommended amount for every selected category
    #[command(alias = "rec")]
    Recommend(ProjectionArgs),

    /// Show an idealized 50/30/20 budget for the selected categories
    Perfect(ProjectionArgs),

    /// Convert between per-paycheck and monthly amounts
    Convert {
        /// Amount to convert (e.g. "2000" or "$2,000")
        #[arg(allow_hyphen_values = true)]
        amount: Amount,
        /// Payment cadence (weekly, bi-weekly, semi-monthly, monthly)
        #[arg(short, long)]
        cadence: PaymentCadence,
        /// Treat the amount as monthly and convert to per-paycheck
        #[arg(short, long)]
        inverse: bool,
    },

    /// Print policy limits, subcategory shares and priority weights
    Limits,

    /// List the built-in category catalog
    Catalog {
        /// Only show one kind (debt, need, want, saving)
        #[arg(short, long)]
        kind: Option<CategoryKind>,
    },

    /// Show recent planner runs from the audit log
    History {
        /// Number of entries to show
        #[arg(short, long, default_value = "10")]
        limit: usize,
    },

    /// Show current configuration and paths
    Config {
        /// Write the current settings to disk
        #[arg(long)]
        init: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = PlannerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    match cli.command {
        Some(Commands::Plan(args)) => handle_plan_command(&paths, &settings, args)?,
        Some(Commands::Recommend(args)) => handle_recommend_command(&paths, &settings, args)?,
        Some(Commands::Perfect(args)) => handle_perfect_command(&paths, &settings, args)?,
        Some(Commands::Convert {
            amount,
            cadence,
            inverse,
        }) => handle_convert_command(&settings, amount, cadence, inverse)?,
        Some(Commands::Limits) => handle_limits_command()?,
        Some(Commands::Catalog { kind }) => handle_catalog_command(kind)?,
        Some(Commands::History { limit }) => handle_history_command(&paths, limit)?,
        Some(Commands::Config { init }) => handle_config_command(&paths, &settings, init)?,
        None => {
            println!("Paycheck Planner - priority waterfall budgeting");
            println!();
            println!("Run 'paycheck --help' for usage information.");
            println!("Run 'paycheck plan <budget-file>' to allocate a paycheck.");
        }
    }

    Ok(())
}
