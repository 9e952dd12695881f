//! Tally CLI - Personal expense and budget tracker
//!
//! Usage:
//!   tally init                                     Initialize database
//!   tally transactions add -a 12.5 -c Food -d Lunch Record an expense
//!   tally budgets set Food 300                     Set a monthly budget
//!   tally dashboard                                Show the summary
//!   tally serve --port 3000                        Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Serve {
            port,
            host,
            static_dir,
        } => {
            commands::cmd_serve(&cli.db, &host, port, cli.no_encrypt, static_dir.as_deref())
                .await
        }
        Commands::Categories => commands::cmd_categories(),
        Commands::Transactions { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_transactions_list(&db, 20),
                Some(TransactionsAction::List { limit }) => {
                    commands::cmd_transactions_list(&db, limit)
                }
                Some(TransactionsAction::Add {
                    amount,
                    category,
                    description,
                    date,
                }) => commands::cmd_transactions_add(
                    &db,
                    amount,
                    &category,
                    &description,
                    date.as_deref(),
                ),
                Some(TransactionsAction::Edit {
                    id,
                    amount,
                    category,
                    description,
                    date,
                }) => commands::cmd_transactions_edit(
                    &db,
                    id,
                    commands::TransactionEdit {
                        amount,
                        category: category.as_deref(),
                        description: description.as_deref(),
                        date: date.as_deref(),
                    },
                ),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&db, id)
                }
            }
        }
        Commands::Budgets { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(BudgetsAction::List) => commands::cmd_budgets_list(&db),
                Some(BudgetsAction::Set {
                    category,
                    amount,
                    month,
                }) => commands::cmd_budgets_set(&db, &category, amount, month.as_deref()),
                Some(BudgetsAction::Effective) => commands::cmd_budgets_effective(&db),
            }
        }
        Commands::Dashboard { as_of, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let as_of = commands::resolve_as_of(as_of.as_deref())?;
            commands::cmd_dashboard(&db, as_of, json)
        }
        Commands::Insights { as_of } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let as_of = commands::resolve_as_of(as_of.as_deref())?;
            commands::cmd_insights(&db, as_of)
        }
        Commands::Report { report_type } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match report_type {
                ReportType::Categories { month, as_of } => {
                    let as_of = commands::resolve_as_of(as_of.as_deref())?;
                    commands::cmd_report_categories(&db, month, as_of)
                }
                ReportType::Monthly { months, as_of } => {
                    let as_of = commands::resolve_as_of(as_of.as_deref())?;
                    commands::cmd_report_monthly(&db, months, as_of)
                }
                ReportType::Budgets { as_of } => {
                    let as_of = commands::resolve_as_of(as_of.as_deref())?;
                    commands::cmd_report_budgets(&db, as_of)
                }
            }
        }
    }
}
