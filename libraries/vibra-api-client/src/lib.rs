//! Vibra API Client
//!
//! HTTP client library for the Vibra Player backend API.
//!
//! # Features
//!
//! - **Catalog**: list, fetch, and related-track queries ([`CatalogClient`])
//! - **Favorites**: like/unlike reconciliation ([`FavoritesClient`])
//! - **Session recording**: fire-and-forget listen reporting with local
//!   notices ([`RecorderClient`])
//!
//! # Example
//!
//! ```ignore
//! use vibra_api_client::{ApiConfig, VibraApiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::new("https://music.example.com");
//!     let client = VibraApiClient::new(config)?;
//!
//!     let tracks = client.catalog().list_tracks(&Default::default()).await?;
//!     println!("Found {} tracks", tracks.len());
//!
//!     Ok(())
//! }
//! ```

mod catalog;
mod client;
mod error;
mod favorites;
mod recorder;
mod types;

// Re-export main types
pub use catalog::CatalogClient;
pub use client::VibraApiClient;
pub use error::{ApiClientError, Result};
pub use favorites::FavoritesClient;
pub use recorder::RecorderClient;
pub use types::{ApiConfig, ApiTrack, ListenNotice, ListenPayload};
