//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `resolve_as_of` / `parse_category` - Argument parsing shared by commands
//! - `cmd_init` - Initialize the database
//! - `cmd_categories` - List categories

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use tally_core::db::Database;
use tally_core::models::{parse_date, Category};

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Reference date for reports: the given date, or today (UTC)
pub fn resolve_as_of(as_of: Option<&str>) -> Result<NaiveDate> {
    match as_of {
        Some(s) => parse_date(s).context("Invalid --as-of date"),
        None => Ok(Utc::now().date_naive()),
    }
}

pub fn parse_category(s: &str) -> Result<Category> {
    s.parse().map_err(|e: String| {
        anyhow::anyhow!(
            "{}. Run 'tally categories' to see the valid names.",
            e
        )
    })
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path, no_encrypt)?;
    let count = db.count_transactions()?;
    println!("   Transactions: {}", count);

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record an expense: tally transactions add -a 12.50 -c Food -d Lunch");
    println!("  2. Set a budget: tally budgets set Food 300");
    println!("  3. Start web UI: tally serve");

    Ok(())
}

pub fn cmd_categories() -> Result<()> {
    println!();
    println!("🗂️  Categories");
    println!("   ─────────────────────────────");
    for category in Category::ALL {
        println!("   {}", category);
    }
    Ok(())
}
