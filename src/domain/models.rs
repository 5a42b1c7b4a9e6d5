use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{HashMap, HashSet};

/// Media type discriminator shared by all provider and registry APIs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Movie,
    Tv,
}

impl MediaType {
    /// Wire value used in URLs and submission payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "tv",
        }
    }

    /// Human-readable name for prompts and messages
    pub fn label(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Tv => "TV show",
        }
    }
}

/// One external identifier pair destined for the registry,
/// e.g. `("imdb", "tt1234567")`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdMapping {
    pub id_type: String,
    pub value: String,
}

impl IdMapping {
    pub fn new(id_type: &str, value: &str) -> Self {
        Self {
            id_type: id_type.to_string(),
            value: value.to_string(),
        }
    }
}

/// Identifier values the registry already knows, keyed by id type
pub type MappingSnapshot = HashMap<String, HashSet<String>>;

// --- TMDB Response Structures ---

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchItem>,
}

/// One result from the TMDB title search endpoint. Movies carry
/// `title`/`release_date`, TV shows `name`/`first_air_date`.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchItem {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
}

impl TmdbSearchItem {
    pub fn display_title(&self, media_type: MediaType) -> &str {
        let title = match media_type {
            MediaType::Tv => self.name.as_deref(),
            MediaType::Movie => self.title.as_deref(),
        };
        title.unwrap_or("Unknown")
    }

    pub fn year(&self, media_type: MediaType) -> String {
        let date = match media_type {
            MediaType::Tv => self.first_air_date.as_deref(),
            MediaType::Movie => self.release_date.as_deref(),
        };
        safe_year(date)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbExternalIds {
    #[serde(default)]
    pub imdb_id: Option<String>,
    #[serde(default)]
    pub tvdb_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbDetails {
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// Combined result of the two TMDB detail endpoints. Either leg may be
/// missing when its fetch failed; the other stays usable.
#[derive(Debug, Default)]
pub struct TitleDetails {
    pub external_ids: Option<TmdbExternalIds>,
    pub details: Option<TmdbDetails>,
}

impl TitleDetails {
    pub fn imdb_id(&self) -> Option<&str> {
        self.external_ids
            .as_ref()?
            .imdb_id
            .as_deref()
            .filter(|id| !id.is_empty())
    }

    pub fn vote_average(&self) -> Option<f64> {
        self.details.as_ref()?.vote_average
    }
}

// --- MDblist Response Structures ---

/// One provider-reported rating inside the aggregate payload. The value
/// arrives as a string ("81%", "7.9", "53/100") or a bare number.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRatingEntry {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub value: Option<Value>,
}

/// Loosely structured ratings payload from the MDblist aggregator.
/// Top-level fields are more authoritative than same-named list entries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawAggregatePayload {
    #[serde(rename = "Metascore", default)]
    pub metascore: Option<Value>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<Value>,
    #[serde(default)]
    pub score: Option<Value>,
    #[serde(default)]
    pub tvdbid: Option<Value>,
    #[serde(default)]
    pub ratings: Vec<RawRatingEntry>,
}

impl RawAggregatePayload {
    /// TVDB id as a submission-ready string, when the aggregator knows one
    pub fn tvdb_id(&self) -> Option<String> {
        match self.tvdbid.as_ref()? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            _ => None,
        }
    }
}

// --- Helper Functions ---

/// Extract the year from a release date like "2010-07-16".
/// Falls back to the leading four characters for non-standard dates.
pub fn safe_year(date: Option<&str>) -> String {
    let Some(date) = date.filter(|d| !d.is_empty()) else {
        return "Unknown".to_string();
    };

    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(parsed) => parsed.year().to_string(),
        Err(_) if date.chars().count() >= 4 => date.chars().take(4).collect(),
        Err(_) => "Unknown".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_safe_year_from_full_date() {
        assert_eq!(safe_year(Some("2010-07-16")), "2010");
    }

    #[test]
    fn test_safe_year_from_bare_year() {
        assert_eq!(safe_year(Some("1999")), "1999");
    }

    #[test]
    fn test_safe_year_missing_or_short() {
        assert_eq!(safe_year(None), "Unknown");
        assert_eq!(safe_year(Some("")), "Unknown");
        assert_eq!(safe_year(Some("20")), "Unknown");
    }

    #[test]
    fn test_payload_deserializes_mixed_value_types() {
        let payload: RawAggregatePayload = serde_json::from_value(json!({
            "Metascore": "75",
            "imdbRating": 8.1,
            "tvdbid": 81189,
            "ratings": [
                {"source": "Metacritic", "value": "75/100"},
                {"source": "Letterboxd", "value": 4.2},
                {"source": "Broken", "value": null}
            ]
        }))
        .unwrap();

        assert_eq!(payload.ratings.len(), 3);
        assert_eq!(payload.tvdb_id().as_deref(), Some("81189"));
        assert!(payload.score.is_none());
    }

    #[test]
    fn test_empty_payload_deserializes() {
        let payload: RawAggregatePayload = serde_json::from_str("{}").unwrap();
        assert!(payload.ratings.is_empty());
        assert!(payload.metascore.is_none());
        assert!(payload.tvdb_id().is_none());
    }

    #[test]
    fn test_title_details_filters_empty_imdb_id() {
        let details = TitleDetails {
            external_ids: Some(TmdbExternalIds {
                imdb_id: Some(String::new()),
                tvdb_id: None,
            }),
            details: None,
        };
        assert!(details.imdb_id().is_none());
    }
}
