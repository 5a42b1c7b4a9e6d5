use serde_json::Value;

use super::types::{CanonicalRatings, Score, SourceCode};
use crate::domain::models::{RawAggregatePayload, RawRatingEntry};

/// Scale conversion applied to a parsed value before storing
type Rescale = fn(f64) -> f64;

/// Validity filter applied to the parsed value before rescaling
type Accepts = fn(f64) -> bool;

/// One source-matching rule for the entry-list pass: recognizes a provider
/// name and says how to bring its native scale onto 0-100.
struct SourceRule {
    matches: fn(&str) -> bool,
    code: SourceCode,
    accepts: Accepts,
    rescale: Rescale,
}

/// Ordered dispatch table for the entry-list pass. Evaluated top to bottom;
/// the first matching rule claims the entry.
const SOURCE_RULES: &[SourceRule] = &[
    SourceRule {
        matches: is_imdb_source,
        code: SourceCode::IM,
        accepts: accept_any,
        rescale: rescale_out_of_10,
    },
    SourceRule {
        matches: is_rt_critics_source,
        code: SourceCode::RT,
        accepts: accept_any,
        rescale: rescale_identity,
    },
    SourceRule {
        matches: is_rt_audience_source,
        code: SourceCode::PC,
        accepts: accept_any,
        rescale: rescale_identity,
    },
    SourceRule {
        matches: is_metacritic_source,
        code: SourceCode::MC,
        accepts: accept_critic_scale,
        rescale: rescale_identity,
    },
    SourceRule {
        matches: is_letterboxd_source,
        code: SourceCode::LB,
        accepts: accept_any,
        rescale: rescale_letterboxd,
    },
    SourceRule {
        matches: is_trakt_source,
        code: SourceCode::TR,
        accepts: accept_any,
        rescale: rescale_trakt,
    },
];

/// Convert a raw aggregator payload into canonical 0-100 ratings.
///
/// Never fails: unparseable fields and entries are skipped, an empty
/// payload yields an empty map, and scores <= 0 are never stored. For
/// every source the first accepted value wins; top-level fields are
/// processed before the entry list and therefore take precedence.
pub fn normalize(payload: &RawAggregatePayload) -> CanonicalRatings {
    let mut ratings = CanonicalRatings::new();

    store_top_level_metascore(&mut ratings, payload);
    store_top_level_imdb(&mut ratings, payload);
    store_listed_entries(&mut ratings, &payload.ratings);
    store_top_level_trakt_fallback(&mut ratings, payload);

    ratings
}

/// Convert a native 0-10 score (e.g. the TMDB community average) to the
/// canonical 0-100 scale. None for missing or non-positive input.
pub fn normalize_direct_score(native: Option<f64>) -> Option<Score> {
    let value = native?;
    if value <= 0.0 {
        return None;
    }
    Some(round1(value * 10.0))
}

/// Metacritic critic scores come in tens while user scores arrive on a
/// 0-10 scale, and the aggregator labels both "Metacritic". A value at or
/// below 10 is assumed to be a misattributed user score.
pub fn is_likely_user_score(value: f64) -> bool {
    value <= 10.0
}

// --- Normalization Passes ---

fn store_top_level_metascore(ratings: &mut CanonicalRatings, payload: &RawAggregatePayload) {
    if let Some(score) = payload.metascore.as_ref().and_then(parse_number) {
        store_if_absent(ratings, SourceCode::MC, score);
    }
}

fn store_top_level_imdb(ratings: &mut CanonicalRatings, payload: &RawAggregatePayload) {
    if let Some(score) = payload.imdb_rating.as_ref().and_then(parse_number) {
        store_if_absent(ratings, SourceCode::IM, rescale_out_of_10(score));
    }
}

fn store_listed_entries(ratings: &mut CanonicalRatings, entries: &[RawRatingEntry]) {
    for entry in entries {
        if let Some((code, score)) = match_entry(entry) {
            store_if_absent(ratings, code, score);
        }
    }
}

// Assumes a bare top-level `score` is the Trakt score; the aggregator's
// schema does not label it.
fn store_top_level_trakt_fallback(ratings: &mut CanonicalRatings, payload: &RawAggregatePayload) {
    if ratings.contains_key(&SourceCode::TR) {
        return;
    }
    if let Some(score) = payload.score.as_ref().and_then(parse_number) {
        store_if_absent(ratings, SourceCode::TR, round1(score));
    }
}

/// Run one entry through the rule table. None when the value is missing,
/// unparseable, the source is unrecognized, or the rule rejects the value.
fn match_entry(entry: &RawRatingEntry) -> Option<(SourceCode, Score)> {
    let value = entry.value.as_ref()?;
    let raw = parse_entry_value(value)?;
    let name = entry.source.to_lowercase();

    let rule = SOURCE_RULES.iter().find(|rule| (rule.matches)(&name))?;
    if !(rule.accepts)(raw) {
        return None;
    }
    Some((rule.code, (rule.rescale)(raw)))
}

/// Only the first accepted score per source is kept
fn store_if_absent(ratings: &mut CanonicalRatings, code: SourceCode, score: Score) {
    if score > 0.0 {
        ratings.entry(code).or_insert(score);
    }
}

// --- Value Parsing ---

/// Parse a top-level payload field. "N/A" and other non-numeric strings
/// yield None.
fn parse_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.eq_ignore_ascii_case("n/a") {
                return None;
            }
            trimmed.parse().ok()
        }
        _ => None,
    }
}

/// Permissive entry value parser: accepts bare numbers, "85%", "53/100"
/// (numerator wins) and plain numeric strings.
fn parse_entry_value(value: &Value) -> Option<f64> {
    let text = match value {
        Value::Number(n) => return n.as_f64(),
        Value::String(s) => s,
        _ => return None,
    };

    let cleaned = text.replace('%', "");
    let cleaned = cleaned.trim();
    let numeric = match cleaned.split_once('/') {
        Some((numerator, _)) => numerator.trim(),
        None => cleaned,
    };
    numeric.parse().ok()
}

// --- Source Predicates ---

fn is_imdb_source(name: &str) -> bool {
    name.contains("internet movie database")
}

fn is_rt_critics_source(name: &str) -> bool {
    name == "rotten tomatoes"
}

fn is_rt_audience_source(name: &str) -> bool {
    name.contains("tomatoes") && name.contains("audience")
}

fn is_metacritic_source(name: &str) -> bool {
    name == "metacritic" && !name.contains("user")
}

fn is_letterboxd_source(name: &str) -> bool {
    name.contains("letterboxd")
}

fn is_trakt_source(name: &str) -> bool {
    name.contains("trakt")
}

// --- Filters and Rescales ---

fn accept_any(_value: f64) -> bool {
    true
}

fn accept_critic_scale(value: f64) -> bool {
    !is_likely_user_score(value)
}

fn rescale_identity(value: f64) -> f64 {
    value
}

/// 0-10 scale to 0-100; values above 10 are already on the target scale
fn rescale_out_of_10(value: f64) -> f64 {
    if value <= 10.0 {
        round1(value * 10.0)
    } else {
        value
    }
}

/// Letterboxd reports out of 5 natively, out of 10 on some mirrors
fn rescale_letterboxd(value: f64) -> f64 {
    let scaled = if value <= 5.0 {
        value * 20.0
    } else if value <= 10.0 {
        value * 10.0
    } else {
        value
    };
    round1(scaled)
}

fn rescale_trakt(value: f64) -> f64 {
    let scaled = if value <= 10.0 { value * 10.0 } else { value };
    round1(scaled)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> RawAggregatePayload {
        serde_json::from_value(value).unwrap()
    }

    fn entry(source: &str, value: serde_json::Value) -> serde_json::Value {
        json!({"source": source, "value": value})
    }

    #[test]
    fn test_empty_payload_yields_empty_map() {
        let ratings = normalize(&RawAggregatePayload::default());
        assert!(ratings.is_empty());
    }

    #[test]
    fn test_top_level_metascore_beats_list_entry() {
        let ratings = normalize(&payload(json!({
            "Metascore": "75",
            "ratings": [entry("Metacritic", json!("8.5"))]
        })));
        assert_eq!(ratings.get(&SourceCode::MC), Some(&75.0));
    }

    #[test]
    fn test_top_level_sentinel_is_absent() {
        let ratings = normalize(&payload(json!({
            "Metascore": "N/A",
            "imdbRating": "N/A"
        })));
        assert!(ratings.is_empty());
    }

    #[test]
    fn test_imdb_rescales_only_below_10() {
        let low = normalize(&payload(json!({"imdbRating": "8.1"})));
        assert_eq!(low.get(&SourceCode::IM), Some(&81.0));

        let high = normalize(&payload(json!({"imdbRating": "81"})));
        assert_eq!(high.get(&SourceCode::IM), Some(&81.0));
    }

    #[test]
    fn test_imdb_entry_skipped_when_top_level_present() {
        let ratings = normalize(&payload(json!({
            "imdbRating": "8.1",
            "ratings": [entry("Internet Movie Database", json!("7.0/10"))]
        })));
        assert_eq!(ratings.get(&SourceCode::IM), Some(&81.0));
    }

    #[test]
    fn test_imdb_entry_used_without_top_level() {
        let ratings = normalize(&payload(json!({
            "ratings": [entry("Internet Movie Database", json!("7.9/10"))]
        })));
        assert_eq!(ratings.get(&SourceCode::IM), Some(&79.0));
    }

    #[test]
    fn test_rotten_tomatoes_critics_and_audience_are_distinct() {
        let ratings = normalize(&payload(json!({
            "ratings": [
                entry("Rotten Tomatoes", json!("91%")),
                entry("Rotten Tomatoes (Audience)", json!("84%"))
            ]
        })));
        assert_eq!(ratings.get(&SourceCode::RT), Some(&91.0));
        assert_eq!(ratings.get(&SourceCode::PC), Some(&84.0));
    }

    #[test]
    fn test_metacritic_user_scale_value_is_discarded() {
        let ratings = normalize(&payload(json!({
            "ratings": [entry("Metacritic", json!("5.3"))]
        })));
        assert!(!ratings.contains_key(&SourceCode::MC));

        let ratings = normalize(&payload(json!({
            "ratings": [entry("Metacritic", json!("53"))]
        })));
        assert_eq!(ratings.get(&SourceCode::MC), Some(&53.0));
    }

    #[test]
    fn test_letterboxd_rescales_per_magnitude() {
        let out_of_5 = normalize(&payload(json!({
            "ratings": [entry("Letterboxd", json!(4.2))]
        })));
        assert_eq!(out_of_5.get(&SourceCode::LB), Some(&84.0));

        let out_of_10 = normalize(&payload(json!({
            "ratings": [entry("Letterboxd", json!(7.5))]
        })));
        assert_eq!(out_of_10.get(&SourceCode::LB), Some(&75.0));

        let out_of_100 = normalize(&payload(json!({
            "ratings": [entry("Letterboxd", json!(92))]
        })));
        assert_eq!(out_of_100.get(&SourceCode::LB), Some(&92.0));
    }

    #[test]
    fn test_fraction_value_parses_to_numerator() {
        let ratings = normalize(&payload(json!({
            "ratings": [entry("Metacritic", json!("53/100"))]
        })));
        assert_eq!(ratings.get(&SourceCode::MC), Some(&53.0));
    }

    #[test]
    fn test_unparseable_entries_are_skipped() {
        let ratings = normalize(&payload(json!({
            "ratings": [
                entry("Metacritic", json!("great")),
                entry("Trakt", json!(null)),
                entry("Letterboxd", json!([1, 2]))
            ]
        })));
        assert!(ratings.is_empty());
    }

    #[test]
    fn test_unknown_sources_are_ignored() {
        let ratings = normalize(&payload(json!({
            "ratings": [entry("FilmAffinity", json!("7.1"))]
        })));
        assert!(ratings.is_empty());
    }

    #[test]
    fn test_first_entry_wins_per_source() {
        let ratings = normalize(&payload(json!({
            "ratings": [
                entry("Trakt", json!("7.0")),
                entry("Trakt", json!("9.0"))
            ]
        })));
        assert_eq!(ratings.get(&SourceCode::TR), Some(&70.0));
    }

    #[test]
    fn test_top_level_score_is_trakt_fallback_only() {
        let fallback = normalize(&payload(json!({"score": 72})));
        assert_eq!(fallback.get(&SourceCode::TR), Some(&72.0));

        let not_overridden = normalize(&payload(json!({
            "score": 72,
            "ratings": [entry("Trakt", json!("8.5"))]
        })));
        assert_eq!(not_overridden.get(&SourceCode::TR), Some(&85.0));
    }

    #[test]
    fn test_zero_and_negative_scores_never_stored() {
        let ratings = normalize(&payload(json!({
            "imdbRating": "0",
            "score": -3,
            "ratings": [entry("Rotten Tomatoes", json!("0%"))]
        })));
        assert!(ratings.is_empty());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let input = payload(json!({
            "Metascore": "75",
            "imdbRating": "8.1",
            "score": 70,
            "ratings": [
                entry("Rotten Tomatoes", json!("91%")),
                entry("Letterboxd", json!(4.2))
            ]
        }));
        assert_eq!(normalize(&input), normalize(&input));
    }

    #[test]
    fn test_all_scores_in_range() {
        let ratings = normalize(&payload(json!({
            "Metascore": "75",
            "imdbRating": "8.1",
            "ratings": [
                entry("Rotten Tomatoes", json!("91%")),
                entry("Rotten Tomatoes (Audience)", json!("84%")),
                entry("Letterboxd", json!(4.2)),
                entry("Trakt", json!("7.9"))
            ]
        })));
        assert_eq!(ratings.len(), 6);
        assert!(ratings.values().all(|&s| s > 0.0 && s <= 100.0));
    }

    #[test]
    fn test_direct_score_conversion() {
        assert_eq!(normalize_direct_score(Some(7.23)), Some(72.3));
        assert_eq!(normalize_direct_score(Some(0.0)), None);
        assert_eq!(normalize_direct_score(None), None);
    }

    #[test]
    fn test_user_score_heuristic_boundary() {
        assert!(is_likely_user_score(10.0));
        assert!(!is_likely_user_score(10.1));
    }
}
