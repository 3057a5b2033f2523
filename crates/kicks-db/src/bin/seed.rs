//! # Catalog Seeder
//!
//! Creates and fills the `sneakers` reference table.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p kicks-db --bin kicks-seed
//!
//! # Specify database path
//! cargo run -p kicks-db --bin kicks-seed -- --db ./data/sneakers.db
//!
//! # Rewrite prices of an already seeded catalog
//! cargo run -p kicks-db --bin kicks-seed -- --force
//! ```

use clap::Parser;
use kicks_core::{CatalogEntry, Money};
use kicks_db::{Database, DbConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Catalog rows: (brand, model, price in cents).
const CATALOG: &[(&str, &str, i64)] = &[
    ("Nike", "AirMax", 12000),
    ("Nike", "Air Force 1", 11000),
    ("Nike", "Pegasus", 13000),
    ("Nike", "Dunk Low", 11500),
    ("Adidas", "UltraBoost", 15000),
    ("Adidas", "Stan Smith", 9000),
    ("Adidas", "Superstar", 9500),
    ("Puma", "Suede", 8000),
    ("Puma", "RS-X", 11000),
    ("New Balance", "574", 9000),
    ("New Balance", "990v6", 20000),
    ("Vans", "Old Skool", 6500),
    ("Converse", "Chuck 70", 8500),
];

#[derive(Debug, Parser)]
#[command(name = "kicks-seed", about = "Kicks catalog seeder")]
struct Args {
    /// Database file path
    #[arg(short, long, env = "KICKS_DB_PATH", default_value = "./kicks_dev.db")]
    db: PathBuf,

    /// Overwrite prices even if the catalog already has rows
    #[arg(short, long)]
    force: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match seed(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ Seed failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn seed(args: &Args) -> kicks_db::DbResult<()> {
    println!("🌱 Kicks Catalog Seeder");
    println!("=======================");
    println!("Database: {}", args.db.display());
    println!();

    let db = Database::new(DbConfig::new(&args.db)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let catalog = db.catalog();
    catalog.ensure_table().await?;

    let existing = catalog.entries().await?.len();
    if existing > 0 && !args.force {
        println!("⚠ Catalog already has {} entries", existing);
        println!("  Pass --force to rewrite prices.");
        return Ok(());
    }

    for (brand, model, cents) in CATALOG {
        let entry = CatalogEntry {
            brand: brand.to_string(),
            model: model.to_string(),
            price: Money::from_cents(*cents),
        };
        catalog.upsert(&entry).await?;
    }

    let brands = catalog.all_brands().await?;
    println!();
    println!("✓ Seeded {} models across {} brands", CATALOG.len(), brands.len());
    for brand in &brands {
        let models = catalog.models_by_brand(brand).await?;
        println!("  {}: {}", brand, models.join(", "));
    }

    db.close().await;
    Ok(())
}
