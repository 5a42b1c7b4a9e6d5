use anyhow::{Context, Result};
use log::{info, warn};

use crate::config::settings::ApiSettings;
use crate::domain::models::{
    MediaType, TitleDetails, TmdbDetails, TmdbExternalIds, TmdbSearchItem, TmdbSearchResponse,
};
use crate::http::RetryingClient;

/// TMDB API client: title search, details and external IDs
pub struct TmdbClient {
    client: RetryingClient,
    api_key: String,
    base_url: &'static str,
}

impl TmdbClient {
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
            base_url: settings.tmdb_base_url,
        })
    }

    /// Search for a movie or TV show by title
    pub async fn search(&self, title: &str, media_type: MediaType) -> Result<Vec<TmdbSearchItem>> {
        let url = self.build_search_url(title, media_type);
        info!("Searching TMDB for {} '{}'", media_type.as_str(), title);

        let response = self.client.get(&url).await?;
        if !response.status().is_success() {
            warn!("TMDB search returned status {}", response.status());
            return Ok(Vec::new());
        }

        let data: TmdbSearchResponse = response
            .json()
            .await
            .context("Failed to decode TMDB search response")?;
        Ok(data.results)
    }

    /// Fetch details and external IDs for a title. The two endpoints are
    /// fetched independently; one failing leg leaves the other usable.
    pub async fn details(&self, tmdb_id: i64, media_type: MediaType) -> TitleDetails {
        let external_ids = match self.fetch_external_ids(tmdb_id, media_type).await {
            Ok(ids) => Some(ids),
            Err(e) => {
                warn!("Could not fetch TMDB external IDs for {tmdb_id}: {e:#}");
                None
            }
        };

        let details = match self.fetch_details(tmdb_id, media_type).await {
            Ok(details) => Some(details),
            Err(e) => {
                warn!("Could not fetch TMDB details for {tmdb_id}: {e:#}");
                None
            }
        };

        TitleDetails {
            external_ids,
            details,
        }
    }

    // --- Helper Methods ---

    async fn fetch_external_ids(
        &self,
        tmdb_id: i64,
        media_type: MediaType,
    ) -> Result<TmdbExternalIds> {
        let url = format!(
            "{}/external_ids?api_key={}",
            self.build_item_url(tmdb_id, media_type),
            self.api_key
        );
        self.fetch_json(&url).await
    }

    async fn fetch_details(&self, tmdb_id: i64, media_type: MediaType) -> Result<TmdbDetails> {
        let url = format!(
            "{}?api_key={}",
            self.build_item_url(tmdb_id, media_type),
            self.api_key
        );
        self.fetch_json(&url).await
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.client.get(url).await?;
        if !response.status().is_success() {
            anyhow::bail!("TMDB returned status {}", response.status());
        }
        response
            .json()
            .await
            .context("Failed to decode TMDB response")
    }

    fn build_search_url(&self, title: &str, media_type: MediaType) -> String {
        format!(
            "{}/search/{}?api_key={}&query={}",
            self.base_url,
            media_type.as_str(),
            self.api_key,
            urlencoding::encode(title)
        )
    }

    fn build_item_url(&self, tmdb_id: i64, media_type: MediaType) -> String {
        format!("{}/{}/{}", self.base_url, media_type.as_str(), tmdb_id)
    }
}
