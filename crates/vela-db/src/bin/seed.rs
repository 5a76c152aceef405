//! # Seed Data Generator
//!
//! Populates the database with a small fixture set for development:
//! one customer and two products.
//!
//! ## Usage
//! ```bash
//! cargo run -p vela-db --bin seed
//!
//! # Specify database path
//! cargo run -p vela-db --bin seed -- --db ./data/vela.db
//! ```

use chrono::Utc;
use std::env;
use uuid::Uuid;
use vela_core::{Customer, Product};
use vela_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./vela_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Vela CRM Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./vela_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Vela CRM Seed Data Generator");
    println!("============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("* Connected to database, migrations applied");

    let existing = db.customers().count().await? + db.products().count().await?;
    if existing > 0 {
        println!("! Database already has {} records", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    let now = Utc::now();

    let customer = Customer {
        id: Uuid::new_v4().to_string(),
        name: "Seed User".to_string(),
        email: "seed@example.com".to_string(),
        phone: Some("+1234567890".to_string()),
        created_at: now,
        updated_at: now,
    };
    db.customers().insert(&customer).await?;

    let products = [("Phone", 500, 5), ("Tablet", 800, 3)];
    for (name, price_cents, stock) in products {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price_cents,
            stock,
            created_at: now,
            updated_at: now,
        };
        db.products().insert(&product).await?;
    }

    println!("* Seeded 1 customer, 2 products");
    println!("* Seed complete!");

    Ok(())
}
