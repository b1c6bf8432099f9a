//! Track catalog queries against the Vibra backend.

use crate::error::{ApiClientError, Result};
use crate::types::ApiTrack;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use vibra_core::traits::{CatalogFilter, TrackCatalog};
use vibra_core::types::{Track, TrackId};
use vibra_core::VibraError;

/// Catalog client for the Vibra backend.
///
/// Implements [`TrackCatalog`]; the backend owns ordering (descending play
/// count, then descending creation time) and the client treats responses as
/// already-ordered lists.
pub struct CatalogClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    auth_token: Option<&'a str>,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, auth_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            auth_token,
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        let mut request = self.http.get(url);
        if let Some(token) = self.auth_token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn fetch_tracks(&self, url: &str) -> Result<Vec<Track>> {
        let response = self.get(url).send().await.map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                ApiClientError::ServerUnreachable(e.to_string())
            } else {
                ApiClientError::Request(e)
            }
        })?;

        let status = response.status();

        if status.is_success() {
            let tracks: Vec<ApiTrack> = response.json().await.map_err(|e| {
                ApiClientError::ParseError(format!("Failed to parse track list: {}", e))
            })?;
            Ok(tracks.into_iter().map(Track::from).collect())
        } else if status.as_u16() == 401 {
            Err(ApiClientError::AuthRequired)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl TrackCatalog for CatalogClient<'_> {
    async fn list_tracks(&self, filter: &CatalogFilter) -> vibra_core::Result<Vec<Track>> {
        let mut url = format!("{}/api/tracks", self.base_url);

        let mut params = Vec::new();
        if let Some(search) = &filter.search {
            params.push(format!("search={}", urlencoding::encode(search)));
        }
        if let Some(artist_id) = &filter.artist_id {
            params.push(format!("artist={}", urlencoding::encode(artist_id.as_str())));
        }
        if let Some(genre) = &filter.genre {
            params.push(format!("genre={}", urlencoding::encode(genre)));
        }
        if let Some(limit) = filter.limit {
            params.push(format!("limit={}", limit));
        }
        if !params.is_empty() {
            url = format!("{}?{}", url, params.join("&"));
        }

        debug!(url = %url, "Listing tracks");

        let tracks = self.fetch_tracks(&url).await?;
        debug!(results = tracks.len(), "Listed tracks");
        Ok(tracks)
    }

    async fn get_track(&self, id: &TrackId) -> vibra_core::Result<Track> {
        let url = format!("{}/api/tracks/{}", self.base_url, id);
        debug!(url = %url, track_id = %id, "Fetching track");

        let response = self
            .get(&url)
            .send()
            .await
            .map_err(|e| VibraError::from(ApiClientError::Request(e)))?;

        let status = response.status();

        if status.is_success() {
            let track: ApiTrack = response.json().await.map_err(|e| {
                VibraError::from(ApiClientError::ParseError(format!(
                    "Failed to parse track response: {}",
                    e
                )))
            })?;
            Ok(track.into())
        } else if status.as_u16() == 404 {
            Err(VibraError::TrackNotFound(id.clone()))
        } else if status.as_u16() == 401 {
            Err(ApiClientError::AuthRequired.into())
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            }
            .into())
        }
    }

    async fn list_related(&self, id: &TrackId) -> vibra_core::Result<Vec<Track>> {
        let url = format!("{}/api/tracks/{}/related", self.base_url, id);
        debug!(url = %url, track_id = %id, "Fetching related tracks");

        let tracks = self.fetch_tracks(&url).await?;
        debug!(results = tracks.len(), "Fetched related tracks");
        Ok(tracks)
    }
}

// URL encoding helper
mod urlencoding {
    pub fn encode(s: &str) -> String {
        url::form_urlencoded::byte_serialize(s.as_bytes()).collect()
    }
}
