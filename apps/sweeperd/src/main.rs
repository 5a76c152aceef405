//! # Vela Sweep Daemon
//!
//! Runs the periodic sweeps against a local database until interrupted:
//!
//! ```text
//! sweeperd ──► SweepAgent ──► vela-api ──► vela-db ──► SQLite
//!                  │
//!                  └──► append-only sink files (heartbeat, restock, reminders)
//! ```
//!
//! ## Usage
//! ```bash
//! cargo run -p sweeperd -- --db ./vela_dev.db --config ./sweeps.toml
//! ```

use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use vela_api::Api;
use vela_db::{Database, DbConfig};
use vela_sweeps::{SweepAgent, SweepConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut db_path = String::from("./vela_dev.db");
    let mut config_path = PathBuf::from("./sweeps.toml");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Vela CRM Sweep Daemon");
                println!();
                println!("Usage: sweeperd [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>      Database file path (default: ./vela_dev.db)");
                println!("  -c, --config <PATH>  Sweep config file (default: ./sweeps.toml)");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    info!(db = %db_path, config = %config_path.display(), "Starting sweeperd");

    let config = SweepConfig::load_or_default(&config_path)?;
    let db = Database::new(DbConfig::new(&db_path)).await?;
    let api = Api::new(db.clone());

    let mut agent = SweepAgent::new(config, api)?;
    agent.start();

    tokio::signal::ctrl_c().await?;
    info!("Ctrl-C received, shutting down");

    agent.shutdown().await;
    db.close().await;

    Ok(())
}
