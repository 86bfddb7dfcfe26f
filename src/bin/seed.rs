//! Wipes the catalog and fills it with sample vendors, sweets and price listings.
//!
//! Usage: cargo run --bin seed
//! Reads the same DATABASE_URL as the API server.

use rand::seq::SliceRandom;
use rand::Rng;
use sweet_shop_api::{AppConfig, CatalogService, NewVendorSweet};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const VENDORS: &[&str] = &[
    "Insomnia Cookies",
    "Cookies Cream",
    "Carvel",
    "Gregory's Coffee",
    "Duane Park Patisserie",
    "Tribeca Treats",
];

const SWEETS: &[&str] = &[
    "Chocolate Chip Cookie",
    "Chocolate Chunk Cookie",
    "M&Ms Cookie",
    "White Chocolate Cookie",
    "Brownie",
    "Blondie",
];

const LISTINGS_PER_VENDOR: usize = 3;
const MAX_PRICE: i64 = 1000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = AppConfig::from_env()?;
    let catalog = CatalogService::connect(&config).await?;

    tracing::info!("Clearing vendor_sweets, vendors and sweets...");
    catalog.clear_all().await?;

    let mut vendors = Vec::with_capacity(VENDORS.len());
    for name in VENDORS {
        vendors.push(catalog.insert_vendor(name).await?);
    }
    let mut sweets = Vec::with_capacity(SWEETS.len());
    for name in SWEETS {
        sweets.push(catalog.insert_sweet(name).await?);
    }
    tracing::info!(vendors = vendors.len(), sweets = sweets.len(), "Seeded vendors and sweets.");

    let mut rng = rand::thread_rng();
    let mut listings = 0usize;
    for vendor in &vendors {
        let picks: Vec<_> = sweets.choose_multiple(&mut rng, LISTINGS_PER_VENDOR).collect();
        for sweet in picks {
            let price = rng.gen_range(1..=MAX_PRICE);
            let new = NewVendorSweet::new(Some(price), Some(vendor.id), Some(sweet.id))?;
            catalog.create_vendor_sweet(&new).await?;
            listings += 1;
        }
    }

    tracing::info!(listings, "Seeding complete.");
    Ok(())
}
