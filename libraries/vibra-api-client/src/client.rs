//! Main Vibra backend client.

use crate::catalog::CatalogClient;
use crate::error::{ApiClientError, Result};
use crate::favorites::FavoritesClient;
use crate::recorder::RecorderClient;
use crate::types::ApiConfig;
use reqwest::Client;
use std::time::Duration;

/// Main client for the Vibra backend API.
///
/// Construction validates and normalizes the base URL and builds the one
/// `reqwest::Client` shared by every sub-client.
///
/// # Example
///
/// ```ignore
/// use vibra_api_client::{ApiConfig, VibraApiClient};
///
/// let config = ApiConfig::new("https://music.example.com");
/// let client = VibraApiClient::new(config)?;
///
/// let tracks = client.catalog().list_tracks(&Default::default()).await?;
/// println!("Found {} tracks", tracks.len());
/// ```
pub struct VibraApiClient {
    http: Client,
    config: ApiConfig,
    recorder: RecorderClient,
}

impl VibraApiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: ApiConfig) -> Result<Self> {
        if config.base_url.is_empty() {
            return Err(ApiClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ApiClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("VibraPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiClientError::Request)?;

        let normalized = ApiConfig {
            base_url,
            auth_token: config.auth_token,
            user_id: config.user_id,
        };

        let recorder = RecorderClient::new(
            http.clone(),
            normalized.base_url.clone(),
            normalized.auth_token.clone(),
            normalized.user_id.clone(),
        );

        Ok(Self {
            http,
            config: normalized,
            recorder,
        })
    }

    /// Get the backend base URL.
    pub fn url(&self) -> &str {
        &self.config.base_url
    }

    /// Check if the client carries an identity.
    pub fn is_authenticated(&self) -> bool {
        self.config.auth_token.is_some()
    }

    /// Get a catalog client for track queries.
    pub fn catalog(&self) -> CatalogClient<'_> {
        CatalogClient::new(
            &self.http,
            &self.config.base_url,
            self.config.auth_token.as_deref(),
        )
    }

    /// Get a favorites client for like/unlike operations.
    pub fn favorites(&self) -> FavoritesClient<'_> {
        FavoritesClient::new(
            &self.http,
            &self.config.base_url,
            self.config.auth_token.as_deref(),
        )
    }

    /// Get the session recorder client.
    ///
    /// The recorder is cloneable; hand a clone to the playback engine as its
    /// `SessionRecorder` and keep another for subscribing to listen notices.
    pub fn recorder(&self) -> RecorderClient {
        self.recorder.clone()
    }
}
