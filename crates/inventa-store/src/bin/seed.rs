//! # Seed Data Generator
//!
//! Populates a data directory with demo companies and products.
//!
//! ## Usage
//! ```bash
//! # Seed ./data with the default catalogue
//! cargo run -p inventa-store --bin seed
//!
//! # Limit the number of products
//! cargo run -p inventa-store --bin seed -- --count 20
//!
//! # Specify data directory
//! cargo run -p inventa-store --bin seed -- --data ./tmp/data
//! ```
//!
//! ## Generated Data
//! - A handful of companies with distinct RUTs
//! - Products across categories (Herramientas, Fijaciones, Pinturas,
//!   Electricidad, Gasfitería) in several sizes
//!
//! Each product has:
//! - Price: 990 - 11190 plus size addon, whole units
//! - Cost: 60-80% of price
//! - Stock: 0 - 100

use std::env;

use anyhow::Context;
use inventa_core::{CompanyInput, Money, ProductInput};
use inventa_store::{Store, StoreConfig};

/// Demo companies: (nombre, rut, giro)
const COMPANIES: &[(&str, &str, &str)] = &[
    ("Constructora Andes SpA", "76.111.222-3", "Construcción"),
    ("Ferretería El Roble Ltda", "77.333.444-5", "Comercio minorista"),
    ("Mantenciones Pacífico", "78.555.666-7", "Servicios"),
    ("Inmobiliaria Los Aromos", "79.777.888-9", "Inmobiliaria"),
];

/// Product categories for realistic demo data
const CATEGORIES: &[(&str, &[&str])] = &[
    (
        "Herramientas",
        &["Martillo", "Serrucho", "Alicate", "Destornillador", "Huincha de medir"],
    ),
    (
        "Fijaciones",
        &["Clavos", "Tornillos", "Pernos", "Tarugos", "Remaches"],
    ),
    (
        "Pinturas",
        &["Látex blanco", "Esmalte sintético", "Barniz", "Diluyente", "Rodillo"],
    ),
    (
        "Electricidad",
        &["Cable 2.5mm", "Enchufe doble", "Interruptor", "Ampolleta LED", "Alargador"],
    ),
    (
        "Gasfitería",
        &["Llave de paso", "Teflón", "Sifón", "Flexible", "Codo PVC"],
    ),
];

/// Size variants: (label, price addon in cents)
const SIZES: &[(&str, i64)] = &[("S", 0), ("M", 50_000), ("L", 120_000)];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = usize::MAX;
    let mut data_dir = String::from("./data");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1]
                        .parse()
                        .with_context(|| format!("invalid --count '{}'", args[i + 1]))?;
                    i += 1;
                }
            }
            "--data" | "-d" => {
                if i + 1 < args.len() {
                    data_dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Inventa Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Maximum number of products (default: all)");
                println!("  -d, --data <DIR>   Data directory (default: ./data)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Inventa Seed Data Generator");
    println!("==============================");
    println!("Data directory: {}", data_dir);
    println!();

    let store = Store::open(StoreConfig::new(&data_dir))
        .await
        .context("opening data directory")?;

    if !store.products().list().await?.is_empty() {
        println!("⚠ productos.json already has data");
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the data files to regenerate.");
        return Ok(());
    }

    let existing: Vec<String> = store
        .companies()
        .list()
        .await?
        .into_iter()
        .map(|c| c.tax_id)
        .collect();

    let mut companies = 0;
    for (name, tax_id, sector) in COMPANIES {
        if existing.iter().any(|t| t == tax_id) {
            continue;
        }
        store
            .companies()
            .create(CompanyInput {
                name: name.to_string(),
                tax_id: tax_id.to_string(),
                sector: Some(sector.to_string()),
                phone: None,
                email: None,
                address: None,
            })
            .await?;
        companies += 1;
    }
    println!("✓ Created {} companies", companies);

    let start = std::time::Instant::now();
    let mut generated = 0;

    'outer: for (category_idx, (category, names)) in CATEGORIES.iter().enumerate() {
        for (name_idx, name) in names.iter().enumerate() {
            for (size_idx, (size, addon)) in SIZES.iter().enumerate() {
                if generated >= count {
                    break 'outer;
                }
                let seed = category_idx * 100 + name_idx * 10 + size_idx;
                store
                    .products()
                    .create(generate_product(category, name, size, *addon, seed))
                    .await?;
                generated += 1;
            }
        }
    }

    println!("✓ Generated {} products in {:?}", generated, start.elapsed());
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Generates a single product with realistic data.
fn generate_product(
    category: &str,
    name: &str,
    size: &str,
    addon: i64,
    seed: usize,
) -> ProductInput {
    // Base price 990 - 9990 in whole units
    let base = 99_000 + ((seed * 1_700) % 900_000) as i64;
    let price_cents = base + addon;
    let price = Money::from_cents(price_cents);

    // Cost is 60-80% of price
    let cost_pct = 60 + (seed % 21) as i64;
    let cost = Money::from_cents(price_cents * cost_pct / 100);

    ProductInput {
        name: format!("{} {}", name, size),
        price,
        stock: (seed % 101) as i64,
        cost,
        category: category.to_string(),
    }
}
