//! Favorites operations against the Vibra backend.
//!
//! Called by UI layers to reconcile the engine's optimistic like flips. The
//! engine itself never reaches this client.

use crate::error::ApiClientError;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use vibra_core::traits::Favorites;
use vibra_core::types::{TrackId, UserId};

/// Favorites client for the Vibra backend.
pub struct FavoritesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    auth_token: Option<&'a str>,
}

impl<'a> FavoritesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, auth_token: Option<&'a str>) -> Self {
        Self {
            http,
            base_url,
            auth_token,
        }
    }

    async fn send(
        &self,
        mut request: reqwest::RequestBuilder,
    ) -> std::result::Result<(), ApiClientError> {
        if let Some(token) = self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
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
impl Favorites for FavoritesClient<'_> {
    async fn like(&self, user_id: &UserId, track_id: &TrackId) -> vibra_core::Result<()> {
        let url = format!(
            "{}/api/users/{}/likes/{}",
            self.base_url, user_id, track_id
        );
        debug!(url = %url, "Liking track");

        self.send(self.http.put(&url)).await?;
        debug!(track_id = %track_id, "Track liked");
        Ok(())
    }

    async fn unlike(&self, user_id: &UserId, track_id: &TrackId) -> vibra_core::Result<()> {
        let url = format!(
            "{}/api/users/{}/likes/{}",
            self.base_url, user_id, track_id
        );
        debug!(url = %url, "Unliking track");

        self.send(self.http.delete(&url)).await?;
        debug!(track_id = %track_id, "Track unliked");
        Ok(())
    }
}
