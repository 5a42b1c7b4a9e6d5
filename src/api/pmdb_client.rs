use anyhow::Result;
use log::{error, info, warn};
use reqwest::StatusCode;
use std::collections::HashSet;

use crate::api::models::{
    MappingRecord, MappingsResponse, MappingSubmission, RatingsResponse, RatingSubmission,
};
use crate::config::settings::ApiSettings;
use crate::domain::models::{IdMapping, MappingSnapshot, MediaType};
use crate::http::RetryingClient;
use crate::rating::SourceCode;

/// Authenticated client for the PMDB metadata registry: snapshot reads of
/// existing mappings/ratings plus one-record-per-call submissions.
pub struct PmdbClient {
    client: RetryingClient,
    token: String,
    ratings_url: &'static str,
    mappings_url: &'static str,
}

impl PmdbClient {
    pub fn new(settings: &ApiSettings, token: &str) -> Result<Self> {
        let client = RetryingClient::new(
            settings.user_agent,
            settings.timeout_secs,
            settings.max_retries,
            settings.retry_delay_ms,
        )?;

        Ok(Self {
            client,
            token: token.to_string(),
            ratings_url: settings.pmdb_ratings_url,
            mappings_url: settings.pmdb_mappings_url,
        })
    }

    /// Fetch the registry's known ID mappings for a title. 404 means the
    /// registry has never seen the title; read failures degrade to an
    /// empty snapshot so the run can continue.
    pub async fn existing_mappings(&self, tmdb_id: i64, media_type: MediaType) -> MappingSnapshot {
        let url = self.build_read_url(self.mappings_url, tmdb_id, media_type);

        let Some(response) = self.read(&url, "existing mappings").await else {
            return MappingSnapshot::new();
        };

        match response.json::<MappingsResponse>().await {
            Ok(data) => Self::collect_mapping_values(data),
            Err(e) => {
                warn!("Failed to decode existing mappings: {e:#}");
                MappingSnapshot::new()
            }
        }
    }

    /// Fetch the upper-cased labels of ratings the registry already has
    pub async fn existing_ratings(&self, tmdb_id: i64, media_type: MediaType) -> HashSet<String> {
        let url = self.build_read_url(self.ratings_url, tmdb_id, media_type);

        let Some(response) = self.read(&url, "existing ratings").await else {
            return HashSet::new();
        };

        match response.json::<RatingsResponse>().await {
            Ok(data) => Self::collect_rating_labels(data),
            Err(e) => {
                warn!("Failed to decode existing ratings: {e:#}");
                HashSet::new()
            }
        }
    }

    /// Submit one ID mapping. Returns whether the registry accepted it.
    pub async fn submit_mapping(
        &self,
        tmdb_id: i64,
        mapping: &IdMapping,
        media_type: MediaType,
    ) -> bool {
        let body = MappingSubmission {
            tmdb_id,
            media_type: media_type.as_str(),
            id_type: &mapping.id_type,
            id_value: &mapping.value,
        };

        match self.client.post_json(self.mappings_url, &self.token, &body).await {
            Ok(response) if response.status().is_success() => {
                info!(
                    "Mapping submitted: TMDB {} -> {} {}",
                    tmdb_id,
                    mapping.id_type.to_uppercase(),
                    mapping.value
                );
                true
            }
            Ok(response) => {
                error!(
                    "Error submitting {} mapping: status {}",
                    mapping.id_type,
                    response.status()
                );
                false
            }
            Err(e) => {
                error!("Error submitting {} mapping: {e:#}", mapping.id_type);
                false
            }
        }
    }

    /// Submit one rating. Returns whether the registry accepted it.
    pub async fn submit_rating(
        &self,
        tmdb_id: i64,
        code: SourceCode,
        score: f64,
        media_type: MediaType,
    ) -> bool {
        let body = RatingSubmission {
            tmdb_id,
            media_type: media_type.as_str(),
            score,
            label: code.label(),
        };

        match self.client.post_json(self.ratings_url, &self.token, &body).await {
            Ok(response) if response.status().is_success() => {
                info!("Rating submitted: {} = {}", code.label(), score);
                true
            }
            Ok(response) => {
                error!(
                    "Error submitting {} rating: status {}",
                    code.label(),
                    response.status()
                );
                false
            }
            Err(e) => {
                error!("Error submitting {} rating: {e:#}", code.label());
                false
            }
        }
    }

    // --- Helper Methods ---

    async fn read(&self, url: &str, what: &str) -> Option<reqwest::Response> {
        let response = match self.client.get_with_bearer(url, &self.token).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Could not check {what}: {e:#}");
                return None;
            }
        };

        if response.status() == StatusCode::NOT_FOUND {
            return None;
        }
        if !response.status().is_success() {
            warn!("Could not check {what}: status {}", response.status());
            return None;
        }
        Some(response)
    }

    fn build_read_url(&self, endpoint: &str, tmdb_id: i64, media_type: MediaType) -> String {
        format!(
            "{}?tmdb_id={}&media_type={}",
            endpoint,
            tmdb_id,
            media_type.as_str()
        )
    }

    fn collect_mapping_values(data: MappingsResponse) -> MappingSnapshot {
        data.mappings
            .into_iter()
            .map(|(id_type, records)| {
                let values = records
                    .into_iter()
                    .filter_map(|record: MappingRecord| record.value)
                    .collect();
                (id_type, values)
            })
            .collect()
    }

    fn collect_rating_labels(data: RatingsResponse) -> HashSet<String> {
        data.into_records()
            .into_iter()
            .filter_map(|record| record.label)
            .map(|label| label.to_uppercase())
            .collect()
    }
}
