//! PetFriends QA - smoke probe for the PetFriends API
//!
//! Read-only sanity check against a live deployment: authenticate with the
//! configured valid account and list the account's pets. Never creates or
//! deletes anything.

use anyhow::bail;
use clap::Parser;
use petfriends_qa::client::{ApiKey, PetFilter, PetFriendsClient, PetList};
use petfriends_qa::config::Config;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// PetFriends QA - smoke probe for the PetFriends API
#[derive(Parser, Debug)]
#[command(name = "petfriends-qa")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting PetFriends QA smoke probe v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load(&args.config)?;
    info!(base_url = %config.base_url, "Loaded configuration from {:?}", args.config);

    let client = PetFriendsClient::new(&config.base_url)?;

    // Authenticate with the valid account
    let auth = client
        .get_api_key(&config.accounts.valid.email, &config.accounts.valid.password)
        .await?;
    if !auth.is_success() {
        bail!(
            "authentication failed with status {}: {}",
            auth.status,
            auth.body
        );
    }
    let key: ApiKey = auth.json()?;
    info!("Authenticated successfully");

    // List the account's own pets
    let listing = client.get_list_of_pets(&key.key, PetFilter::MyPets).await?;
    if !listing.is_success() {
        bail!("pet listing failed with status {}", listing.status);
    }
    let pets: PetList = listing.json()?;
    info!(count = pets.pets.len(), "Listed my_pets");

    Ok(())
}
