use std::collections::HashSet;

use super::types::CanonicalRatings;
use crate::domain::models::{IdMapping, MappingSnapshot};

/// Split candidate ratings into those the registry is missing and those it
/// already has. Every candidate key lands in exactly one of the two maps.
///
/// `existing` holds upper-cased registry labels; source labels are already
/// upper-case, so the comparison is effectively case-insensitive.
pub fn partition_ratings(
    candidate: &CanonicalRatings,
    existing: &HashSet<String>,
) -> (CanonicalRatings, CanonicalRatings) {
    let mut new_ratings = CanonicalRatings::new();
    let mut existing_ratings = CanonicalRatings::new();

    for (&code, &score) in candidate {
        if existing.contains(code.label()) {
            existing_ratings.insert(code, score);
        } else {
            new_ratings.insert(code, score);
        }
    }

    (new_ratings, existing_ratings)
}

/// Filter out ID mappings the registry already knows. Matching is exact on
/// the identifier string; pairs with empty values are never submitted.
/// Input order is preserved.
pub fn missing_mappings(desired: &[IdMapping], snapshot: &MappingSnapshot) -> Vec<IdMapping> {
    desired
        .iter()
        .filter(|mapping| !mapping.value.is_empty())
        .filter(|mapping| !is_known(snapshot, mapping))
        .cloned()
        .collect()
}

fn is_known(snapshot: &MappingSnapshot, mapping: &IdMapping) -> bool {
    snapshot
        .get(&mapping.id_type)
        .is_some_and(|values| values.contains(&mapping.value))
}
