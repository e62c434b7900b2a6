//! PetFriends QA Library
//!
//! End-to-end API test suite for the PetFriends pet adoption REST service.
//!
//! # Features
//!
//! - **Thin client**: one method per remote endpoint, no abstraction on top
//! - **Raw responses**: every call returns the HTTP status plus the decoded body
//! - **Bug probes**: the test suite documents suspected validation bugs in the
//!   remote service (negative age accepted, non-numeric age accepted)
//!
//! # Example
//!
//! ```no_run
//! use petfriends_qa::{config::Config, client::{PetFriendsClient, PetFilter}};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.yaml")?;
//!     let client = PetFriendsClient::new(&config.base_url)?;
//!
//!     let auth = client
//!         .get_api_key(&config.accounts.valid.email, &config.accounts.valid.password)
//!         .await?;
//!     let key = auth.body["key"].as_str().unwrap_or_default().to_string();
//!
//!     let pets = client.get_list_of_pets(&key, PetFilter::MyPets).await?;
//!     println!("my pets: {}", pets.body["pets"].as_array().map_or(0, |p| p.len()));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;

// Re-export commonly used types
pub use client::{ApiResponse, PetFilter, PetFriendsClient};
pub use config::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
