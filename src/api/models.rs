use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// --- PMDB Read Shapes ---

#[derive(Debug, Deserialize)]
pub struct MappingsResponse {
    #[serde(default)]
    pub mappings: HashMap<String, Vec<MappingRecord>>,
}

#[derive(Debug, Deserialize)]
pub struct MappingRecord {
    #[serde(default)]
    pub value: Option<String>,
}

/// The ratings read endpoint answers either `{"items": [...]}` or a bare
/// array, depending on the registry version.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RatingsResponse {
    Wrapped { items: Vec<RatingRecord> },
    Bare(Vec<RatingRecord>),
}

impl RatingsResponse {
    pub fn into_records(self) -> Vec<RatingRecord> {
        match self {
            RatingsResponse::Wrapped { items } => items,
            RatingsResponse::Bare(records) => records,
        }
    }
}

/// Only the label matters for reconciliation; the registry's stored score
/// and any other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct RatingRecord {
    #[serde(default)]
    pub label: Option<String>,
}

// --- PMDB Write Shapes ---

#[derive(Debug, Serialize)]
pub struct MappingSubmission<'a> {
    pub tmdb_id: i64,
    pub media_type: &'a str,
    pub id_type: &'a str,
    pub id_value: &'a str,
}

#[derive(Debug, Serialize)]
pub struct RatingSubmission<'a> {
    pub tmdb_id: i64,
    pub media_type: &'a str,
    pub score: f64,
    pub label: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratings_response_accepts_both_shapes() {
        let wrapped: RatingsResponse =
            serde_json::from_str(r#"{"items": [{"label": "im", "score": 81.0}]}"#).unwrap();
        assert_eq!(wrapped.into_records().len(), 1);

        let bare: RatingsResponse =
            serde_json::from_str(r#"[{"label": "MC"}, {"score": 50.0}]"#).unwrap();
        assert_eq!(bare.into_records().len(), 2);
    }

    #[test]
    fn test_mappings_response_tolerates_missing_values() {
        let response: MappingsResponse =
            serde_json::from_str(r#"{"mappings": {"imdb": [{"value": "tt1"}, {}]}}"#).unwrap();
        let records = &response.mappings["imdb"];
        assert_eq!(records.len(), 2);
        assert!(records[1].value.is_none());
    }
}
