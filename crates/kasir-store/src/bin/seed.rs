//! # Seed Data Generator
//!
//! Populates the data directory with a demo catalog and a few recorded
//! sales for manual testing.
//!
//! ## Usage
//! ```bash
//! # Seed into ./database (default)
//! cargo run -p kasir-store --bin seed
//!
//! # Specify the data directory
//! cargo run -p kasir-store --bin seed -- --data-dir ./demo_data
//! ```
//!
//! ## Generated Data
//! - A small warung catalog across four categories (Minuman, Makanan,
//!   Snack, Lainnya) with realistic rupiah prices; barcodes are left
//!   empty so the repository derives them (`PRD000001`, ...)
//! - A default store profile, written only when none exists
//! - Three checked-out sales, so the history and report screens have
//!   something to show on first launch
//!
//! Seeding is skipped when the catalog already has products; delete the
//! data directory to regenerate.

use std::env;
use std::path::PathBuf;

use tracing::info;
use tracing_subscriber::EnvFilter;

use kasir_core::{Money, NewProduct, Product, StoreProfile};
use kasir_store::{CartEngine, ProductRepository, ProfileStore, TransactionRepository};

/// Demo catalog: category → (name, buy price, sell price).
const CATALOG: &[(&str, &[(&str, i64, i64)])] = &[
    (
        "Minuman",
        &[
            ("Kopi Hitam", 5_000, 8_000),
            ("Kopi Susu", 6_000, 10_000),
            ("Es Teh Manis", 2_000, 5_000),
            ("Es Jeruk", 3_000, 6_000),
            ("Teh Botol Sosro", 3_500, 5_000),
            ("Aqua 600ml", 2_500, 4_000),
            ("Jus Alpukat", 8_000, 13_000),
        ],
    ),
    (
        "Makanan",
        &[
            ("Indomie Goreng", 2_500, 5_000),
            ("Nasi Goreng", 12_000, 18_000),
            ("Mie Ayam", 10_000, 15_000),
            ("Bubur Ayam", 8_000, 13_000),
            ("Roti Bakar Coklat", 7_000, 12_000),
            ("Pisang Goreng", 1_500, 3_000),
        ],
    ),
    (
        "Snack",
        &[
            ("Chitato 68g", 8_000, 11_000),
            ("Kacang Garuda", 4_000, 7_000),
            ("Roma Kelapa", 5_000, 8_000),
            ("Tango Wafer", 4_500, 7_500),
            ("Oreo 110g", 6_000, 9_000),
        ],
    ),
    (
        "Lainnya",
        &[("Tissue Paseo", 5_500, 8_000), ("Baterai AA", 7_000, 10_000)],
    ),
];

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,kasir_core=debug,kasir_store=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut data_dir = PathBuf::from("./database");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Kasir Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --data-dir <PATH>  Data directory (default: ./database)");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    init_tracing();

    println!("🌱 Kasir Seed Data Generator");
    println!("============================");
    println!("Data directory: {}", data_dir.display());
    println!();

    let products = ProductRepository::new(data_dir.join("products.csv"))?;
    let transactions = TransactionRepository::new(data_dir.join("transactions.csv"))?;
    let profile = ProfileStore::new(data_dir.join("store_config.json"));

    println!("✓ Stores initialized");

    // Check existing products
    let existing = products.count()?;
    if existing > 0 {
        println!("⚠ Catalog already has {existing} products");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the data directory to regenerate.");
        return Ok(());
    }

    // Seed the catalog
    println!();
    println!("Seeding catalog...");

    let start = std::time::Instant::now();
    let mut seeded = Vec::new();

    for (category, entries) in CATALOG {
        for (name, buy, sell) in entries.iter() {
            let product = products.add(NewProduct {
                barcode: String::new(),
                name: (*name).to_string(),
                category: (*category).to_string(),
                buy_price: Money::new(*buy),
                sell_price: Money::new(*sell),
            })?;
            seeded.push(product);
        }
        println!("  {category}: {} products", entries.len());
    }

    // Store profile, only when the owner has not saved one yet
    if !profile.path().exists() {
        profile.save(&StoreProfile::default())?;
        println!("✓ Wrote default store profile");
    }

    // A few sales so the history and reports are not empty
    let recorded = record_demo_sales(&seeded, CartEngine::new(transactions))?;

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Seeded {} products and {recorded} transactions in {elapsed:?}",
        seeded.len()
    );
    info!(
        products = seeded.len(),
        transactions = recorded,
        "Seed complete"
    );

    Ok(())
}

/// Checks out a few demo sales through the full cart path.
fn record_demo_sales(
    seeded: &[Product],
    mut engine: CartEngine,
) -> Result<usize, Box<dyn std::error::Error>> {
    let find = |name: &str| {
        seeded
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .ok_or_else(|| format!("demo product missing from catalog: {name}"))
    };

    let kopi = find("Kopi Hitam")?;
    let teh = find("Es Teh Manis")?;
    let indomie = find("Indomie Goreng")?;
    let roti = find("Roti Bakar Coklat")?;
    let aqua = find("Aqua 600ml")?;

    // Sale 1: two coffees and a toast, paid with a Rp 50.000 note.
    engine.add_item(&kopi);
    engine.add_item(&kopi);
    engine.add_item(&roti);
    engine.checkout(Money::new(50_000), "Siti")?;

    // Sale 2: teas and noodles with a small discount.
    engine.add_item(&teh);
    engine.add_item(&teh);
    engine.add_item(&teh);
    engine.add_item(&indomie);
    engine.add_item(&indomie);
    engine.set_discount(Money::new(2_000))?;
    engine.checkout(Money::new(30_000), "Budi")?;

    // Sale 3: a single bottle of water, exact payment.
    engine.add_item(&aqua);
    engine.checkout(aqua.sell_price, "Siti")?;

    let recorded = engine.transactions().count()?;
    println!("✓ Recorded {recorded} demo transactions");
    Ok(recorded)
}
