//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_server::{ServerConfig, ALLOWED_ORIGINS_ENV};

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_encrypt: bool,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting Tally web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let config = ServerConfig::from_env();
    if config.allowed_origins.is_empty() {
        println!("   🔒 CORS: same-origin only");
    } else {
        println!(
            "   🌐 CORS origins: {} ({})",
            config.allowed_origins.join(", "),
            ALLOWED_ORIGINS_ENV
        );
    }
    println!();

    let db = open_db(db_path, no_encrypt)?;
    let static_dir = match static_dir {
        Some(dir) => Some(dir.to_str().context("Static directory path is not valid UTF-8")?),
        None => None,
    };

    tally_server::serve_with_config(db, host, port, static_dir, config).await
}
