use std::process::ExitCode;

use spooky_core::config::load_config;
use spooky_db::db::connection::create_pool;
use spooky_service::house::{DuplicateAddressGroup, find_duplicate_addresses};
use tracing_subscriber::EnvFilter;

/// Exit status when duplicated address texts are found.
const DUPLICATES_FOUND: u8 = 2;

async fn run() -> anyhow::Result<Vec<DuplicateAddressGroup>> {
    let config = load_config()?;
    let pool = create_pool(&config.database.url, 1).await?;
    Ok(find_duplicate_addresses(&pool).await?)
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run().await {
        Ok(groups) if groups.is_empty() => {
            println!("No duplicate addresses found.");
            ExitCode::SUCCESS
        }
        Ok(groups) => {
            println!("Duplicate addresses found:");
            for group in groups {
                println!("\n-- {}", group.address_text);
                for house in group.houses {
                    println!("  houseId={} userId={}", house.house_id, house.user_id);
                }
            }
            ExitCode::from(DUPLICATES_FOUND)
        }
        Err(err) => {
            eprintln!("Failed to check duplicate addresses: {err:#}");
            ExitCode::FAILURE
        }
    }
}
