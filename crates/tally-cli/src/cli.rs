//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track expenses, set budgets, see where the money goes
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Self-hosted personal expense and budget tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set TALLY_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Directory containing static files to serve (e.g., ui/dist)
        #[arg(long)]
        static_dir: Option<PathBuf>,
    },

    /// List spending categories
    Categories,

    /// Manage transactions (list, add, edit, delete)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage budgets (list, set, effective)
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Show dashboard summary
    Dashboard {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,

        /// Print the full summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show budget insights for the current month
    Insights {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Generate spending reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List recent transactions
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Record an expense
    Add {
        /// Amount spent (zero or more)
        #[arg(short, long)]
        amount: f64,

        /// Category (e.g., Food, Housing)
        #[arg(short, long)]
        category: String,

        /// What the money was spent on
        #[arg(short, long)]
        description: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// Change fields of an existing transaction
    Edit {
        /// Transaction ID
        id: i64,

        #[arg(short, long)]
        amount: Option<f64>,

        #[arg(short, long)]
        category: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List every budget record
    List,

    /// Set a monthly cap for a category (replaces the current one)
    Set {
        /// Category (e.g., Food, Housing)
        category: String,

        /// Monthly cap (greater than 0)
        amount: f64,

        /// Month the cap was declared for (YYYY-MM, defaults to this month)
        #[arg(long)]
        month: Option<String>,
    },

    /// Show the cap that applies to each category
    Effective,
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Spending by category
    Categories {
        /// Only include the current month
        #[arg(long)]
        month: bool,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Spending per month
    Monthly {
        /// Number of months to show (1-36)
        #[arg(short, long, default_value = "6")]
        months: usize,

        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,
    },

    /// Budget vs. actual for the current month
    Budgets {
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        as_of: Option<String>,
    },
}
