//! # Seed Data Writer
//!
//! Writes the example shopping lists into a data directory for development.
//!
//! ## Usage
//! ```bash
//! # Seed the platform data directory (or $BASKET_DATA_DIR)
//! cargo run -p basket-store --bin seed
//!
//! # Seed a specific directory
//! cargo run -p basket-store --bin seed -- --data-dir ./data
//!
//! # Replace whatever is stored there
//! cargo run -p basket-store --bin seed -- --data-dir ./data --force
//! ```

use basket_store::persistence::{load_lists, save_lists};
use basket_store::seed::seed_lists;
use basket_store::storage::FileStorage;
use basket_store::{KeyValueStorage, StoreConfig};
use chrono::Utc;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut data_dir: Option<PathBuf> = None;
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Basket Seed Data Writer");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data-dir <PATH>  Data directory (default: $BASKET_DATA_DIR or platform dir)");
                println!("  -f, --force            Overwrite existing shopping lists");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            other => warn!(arg = other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let mut config = StoreConfig::from_env()?;
    if let Some(dir) = data_dir {
        config.data_dir = Some(dir);
    }
    let dir = config
        .data_dir
        .clone()
        .ok_or("no data directory configured")?;

    println!("🌱 Basket Seed Data Writer");
    println!("==========================");
    println!("Data dir: {}", dir.display());
    println!("Key:      {}", config.storage_key);
    println!();

    let mut storage = FileStorage::open(dir.clone())?;

    match load_lists(&storage, &config.storage_key) {
        Ok(Some(existing)) if !force => {
            println!("⚠ Storage already has {} lists", existing.len());
            println!("  Skipping seed to avoid overwriting them.");
            println!("  Pass --force to replace them.");
            return Ok(());
        }
        Ok(Some(existing)) => {
            warn!(count = existing.len(), "Overwriting stored shopping lists");
        }
        Ok(None) => {}
        Err(e) if !force => {
            println!("⚠ Stored data could not be read: {}", e);
            println!("  Pass --force to replace it.");
            return Ok(());
        }
        Err(e) => warn!(error = %e, "Overwriting unreadable shopping lists"),
    }

    let lists = seed_lists(Utc::now());
    save_lists(&mut storage, &config.storage_key, &lists)?;
    info!(count = lists.len(), "Seed lists written");

    for list in &lists {
        println!(
            "✓ {} ({} items, total {})",
            list.name,
            list.items.len(),
            list.total()
        );
    }

    let path = storage.path_for(&config.storage_key)?;
    if storage.get(&config.storage_key)?.is_some() {
        println!();
        println!("✓ Seed complete: {}", path.display());
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,basket=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
