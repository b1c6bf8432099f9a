//! Session recorder client.
//!
//! Fire-and-forget listen reporting: nothing here may block, retry, or
//! surface a failure to the playback engine. Failures are logged and
//! dropped.

use crate::types::{ListenNotice, ListenPayload};
use reqwest::Client;
use tokio::sync::broadcast;
use tracing::{debug, warn};
use vibra_core::traits::SessionRecorder;
use vibra_core::types::{TrackId, UserId};

/// Capacity of the listen-notice channel; widgets that fall this far behind
/// just miss notices and refresh on the next one
const NOTICE_CHANNEL_CAPACITY: usize = 32;

/// Recorder client for the Vibra backend.
///
/// Cloneable: hand one clone to the playback engine and keep another for
/// [`subscribe`](Self::subscribe)-ing to listen notices.
#[derive(Clone)]
pub struct RecorderClient {
    http: Client,
    base_url: String,
    auth_token: Option<String>,
    user_id: Option<UserId>,
    notices: broadcast::Sender<ListenNotice>,
}

impl RecorderClient {
    pub(crate) fn new(
        http: Client,
        base_url: String,
        auth_token: Option<String>,
        user_id: Option<UserId>,
    ) -> Self {
        let (notices, _) = broadcast::channel(NOTICE_CHANNEL_CAPACITY);
        Self {
            http,
            base_url,
            auth_token,
            user_id,
            notices,
        }
    }

    /// Subscribe to local notifications of successfully recorded listens.
    pub fn subscribe(&self) -> broadcast::Receiver<ListenNotice> {
        self.notices.subscribe()
    }
}

impl SessionRecorder for RecorderClient {
    fn record(&self, track_id: &TrackId, completed_percentage: u8) {
        let Some(user_id) = self.user_id.clone() else {
            debug!(track_id = %track_id, "anonymous session; listen not recorded");
            return;
        };

        // Spawning requires a runtime; without one the report is dropped,
        // never panicked on.
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("no async runtime available; listen not recorded");
            return;
        };

        let payload = ListenPayload {
            user_id: user_id.clone(),
            track_id: track_id.clone(),
            completed_percentage: completed_percentage.min(100),
        };
        let http = self.http.clone();
        let url = format!("{}/api/listens", self.base_url);
        let auth_token = self.auth_token.clone();
        let notices = self.notices.clone();
        let track_id = track_id.clone();

        handle.spawn(async move {
            let mut request = http.post(&url).json(&payload);
            if let Some(token) = auth_token {
                request = request.bearer_auth(token);
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    debug!(track_id = %track_id, "listen recorded");
                    // No receivers is fine; widgets subscribe on demand
                    let _ = notices.send(ListenNotice { track_id, user_id });
                }
                Ok(response) => {
                    warn!(
                        track_id = %track_id,
                        status = %response.status(),
                        "listen rejected by server"
                    );
                }
                Err(err) => {
                    warn!(track_id = %track_id, %err, "failed to record listen");
                }
            }
        });
    }
}
