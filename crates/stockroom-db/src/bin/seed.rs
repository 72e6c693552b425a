//! # Seed Data Generator
//!
//! Populates the configured store with sample products.
//!
//! ## Usage
//! ```bash
//! # 100 products into an in-memory store (smoke test)
//! cargo run -p stockroom-db --bin seed
//!
//! # 2,000 products into Redis
//! STOCKROOM_BACKEND=redis REDIS_URL=redis://localhost:6379/0 \
//!     cargo run -p stockroom-db --bin seed -- --count 2000
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::env;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;
use stockroom_core::Product;
use stockroom_db::{Catalog, StoreConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Sample catalogue: category and the product names listed under it.
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Beverages",
        &["Chai", "Chang", "Lemonade", "Green Tea", "Espresso", "Root Beer"],
    ),
    (
        "Condiments",
        &["Aniseed Syrup", "Cajun Seasoning", "Gumbo Mix", "Curry Paste"],
    ),
    (
        "Confections",
        &["Chocolate Biscuits", "Gummy Bears", "Toffee", "Marmalade"],
    ),
    (
        "Dairy Products",
        &["Mozzarella", "Gorgonzola", "Camembert", "Butter", "Yogurt"],
    ),
    (
        "Grains/Cereals",
        &["Ravioli", "Gnocchi", "Crispbread", "Oatmeal", "Rice"],
    ),
];

/// Pack sizes appended to product names.
const SIZES: &[&str] = &["250g", "500g", "1kg", "6-Pack", "12-Pack"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args: Vec<String> = env::args().collect();
    let mut count: usize = 100;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if let Some(raw) = args.get(i + 1) {
                    count = raw.parse()?;
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of products to add (default: 100)");
                println!("  -h, --help         Show this help message");
                println!();
                println!("Store selection: STOCKROOM_BACKEND, REDIS_URL,");
                println!("STOCKROOM_KEY_PREFIX, STOCKROOM_COLLECTION");
                return Ok(());
            }
            other => warn!(argument = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let config = StoreConfig::load()?;
    let catalog = Catalog::connect(config).await?;
    let products = catalog.products();

    info!(count, collection = %products.collection(), "Seeding products");

    let start = Instant::now();
    let mut added = 0usize;
    let mut first_id = None;

    for seed in 0..count {
        let product = generate_product(seed);

        match products.add(&product).await {
            Ok(id) => {
                first_id.get_or_insert(id);
                added += 1;
            }
            Err(e) => {
                warn!(name = %product.name, error = %e, "Failed to add product");
                continue;
            }
        }

        if added > 0 && added % 500 == 0 {
            info!(added, "Progress");
        }
    }

    let elapsed = start.elapsed();
    info!(
        added,
        skipped = count - added,
        elapsed_ms = elapsed.as_millis() as u64,
        products_per_second = products_per_second(added, elapsed),
        "Seed complete"
    );

    if let Some(id) = first_id {
        let product = products.get(id).await?;
        info!(
            id,
            name = %product.name,
            category = %product.category,
            unit_price = %product.unit_price,
            "Read back first product"
        );
    }

    Ok(())
}

/// Throughput rounded to one decimal place; 0 when nothing was timed.
fn products_per_second(added: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs <= 0.0 {
        return 0.0;
    }
    (added as f64 / secs * 10.0).round() / 10.0
}

/// Generates one deterministic sample product.
fn generate_product(seed: usize) -> Product {
    let (category, names) = CATEGORIES[seed % CATEGORIES.len()];
    let name = names[(seed / CATEGORIES.len()) % names.len()];
    let size = SIZES[seed % SIZES.len()];

    // $0.99 - $24.98
    let cents = 99 + ((seed * 37) % 2400) as i64;
    let units = ((seed * 13) % 121) as i32;

    Product::new(
        format!("{} {}", name, size),
        category,
        Decimal::new(cents, 2),
        units,
    )
    .discontinued(seed % 17 == 0)
}

// =============================================================================
// Unit Tests
// =============================================================================
