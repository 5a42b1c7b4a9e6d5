use anyhow::Result;
use log::warn;

use crate::config::settings::ApiSettings;
use crate::domain::models::RawAggregatePayload;
use crate::http::RetryingClient;

/// Client for the MDblist ratings aggregator
pub struct MdblistClient {
    client: RetryingClient,
    api_key: String,
    base_url: &'static str,
}

impl MdblistClient {
    pub fn new(settings: &ApiSettings, api_key: &str) -> Result<Self> {
        let client = RetryingClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.max_retries,
            settings.retry_delay_ms,
        )?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: settings.mdblist_url,
        })
    }

    /// Fetch the aggregate ratings payload for an IMDb id. Any failure
    /// degrades to None; the title is then processed without aggregator
    /// ratings.
    pub async fn fetch_ratings(&self, imdb_id: &str) -> Option<RawAggregatePayload> {
        let url = self.build_url(imdb_id);

        let response = match self.client.get(&url).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Could not reach MDblist: {e:#}");
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("MDblist returned status {}", response.status());
            return None;
        }

        match response.json().await {
            Ok(payload) => Some(payload),
            Err(e) => {
                warn!("Failed to decode MDblist payload: {e:#}");
                None
            }
        }
    }

    fn build_url(&self, imdb_id: &str) -> String {
        format!(
            "{}?apikey={}&i={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(imdb_id)
        )
    }
}
