//! # Seed Data Generator
//!
//! Populates the database with the sample artwork catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p artisell-db --bin seed
//!
//! # Specify database path
//! cargo run -p artisell-db --bin seed -- --db ./data/artisell.db
//! ```
//!
//! ## Generated Data
//! Eight Filipino artworks across Luzon, Visayas and Mindanao, each with a
//! primary image and two secondary views. Three are featured for the home
//! carousel. Prices are whole pesos stored as centavos.

use chrono::Utc;
use std::env;

use artisell_core::Product;
use artisell_db::repository::product::generate_product_id;
use artisell_db::{Database, DbConfig};

/// (title, artist, price_pesos, description, region, medium, dimensions, year, featured)
#[allow(clippy::type_complexity)]
const ARTWORKS: &[(&str, &str, i64, &str, &str, &str, &str, i64, bool)] = &[
    (
        "Vibrant Filipino Landscape",
        "Maria Santos",
        12_500,
        "A vibrant depiction of rural life in the Philippines, showcasing the lush landscapes and traditional farming methods.",
        "Visayas",
        "Oil on Canvas",
        "24 x 36 inches",
        2023,
        true,
    ),
    (
        "Urban Manila",
        "Juan Dela Cruz",
        18_500,
        "A modern interpretation of Manila's urban landscape, blending traditional Filipino elements with contemporary city life.",
        "Luzon",
        "Acrylic on Canvas",
        "30 x 40 inches",
        2022,
        true,
    ),
    (
        "Coastal Dreams",
        "Ana Reyes",
        12_000,
        "A serene portrayal of the beautiful coastal regions of Mindanao, capturing the tranquility of island life.",
        "Mindanao",
        "Watercolor",
        "18 x 24 inches",
        2023,
        true,
    ),
    (
        "Manila Bay Sunset",
        "Juan Reyes",
        9_800,
        "A stunning sunset view over Manila Bay, showcasing the vibrant colors and reflections on the water.",
        "Luzon",
        "Oil on Canvas",
        "20 x 30 inches",
        2021,
        false,
    ),
    (
        "Tribal Patterns",
        "Ana Diaz",
        15_000,
        "An abstract representation of traditional Filipino tribal patterns, celebrating the rich cultural heritage.",
        "Mindanao",
        "Mixed Media",
        "24 x 24 inches",
        2022,
        false,
    ),
    (
        "Banaue Rice Terraces",
        "Miguel Cruz",
        18_500,
        "A detailed landscape painting of the famous Banaue Rice Terraces, showcasing this UNESCO World Heritage site.",
        "Luzon",
        "Oil on Canvas",
        "36 x 48 inches",
        2020,
        false,
    ),
    (
        "Tarsier Portrait",
        "Elena Gomez",
        7_500,
        "A detailed portrait of the Philippine Tarsier, one of the smallest primates in the world and native to the Philippines.",
        "Visayas",
        "Colored Pencil",
        "16 x 20 inches",
        2023,
        false,
    ),
    (
        "Mayon Volcano",
        "Rafael Mendoza",
        14_200,
        "A majestic view of the perfect cone-shaped Mayon Volcano in Albay, captured during sunset.",
        "Luzon",
        "Acrylic on Canvas",
        "24 x 36 inches",
        2021,
        false,
    ),
];

/// Stock photography used for every artwork's gallery (primary + two views).
const IMAGE_URLS: &[&str] = &[
    "https://images.unsplash.com/photo-1579783902614-a3fb3927b6a5?auto=format&fit=crop&w=1200&q=80",
    "https://images.unsplash.com/photo-1552083375-1447ce886485?auto=format&fit=crop&w=1200&q=80",
    "https://images.unsplash.com/photo-1518982380512-5cb02dedd6a0?auto=format&fit=crop&w=1200&q=80",
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Structured logs from the db layer (RUST_LOG=debug for SQL detail)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./artisell_dev.db");

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
                println!("Artisell Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./artisell_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Artisell Seed Data Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding artworks...");

    let products = db.products();
    for (idx, &(title, artist, pesos, description, region, medium, dimensions, year, featured)) in
        ARTWORKS.iter().enumerate()
    {
        let product = Product {
            id: generate_product_id(),
            title: title.to_string(),
            artist: artist.to_string(),
            price_cents: pesos * 100,
            description: Some(description.to_string()),
            region: Some(region.to_string()),
            medium: Some(medium.to_string()),
            dimensions: Some(dimensions.to_string()),
            year: Some(year),
            is_featured: featured,
            in_stock: true,
            primary_image_url: None,
            created_at: Utc::now(),
        };

        products.insert(&product).await?;

        // Primary image plus two secondary views, rotated across the pool
        for img_idx in 0..3 {
            let url = IMAGE_URLS[(idx + img_idx) % IMAGE_URLS.len()];
            products.add_image(&product.id, url, img_idx == 0).await?;
        }

        println!("  ✓ {} — {} (₱{})", title, artist, pesos);
    }

    println!();
    println!("✓ Seeded {} artworks", ARTWORKS.len());

    Ok(())
}
