pub mod normalize;
pub mod reconcile;
pub mod types;

pub use normalize::{is_likely_user_score, normalize, normalize_direct_score};
pub use reconcile::{missing_mappings, partition_ratings};
pub use types::{CanonicalRatings, Score, SourceCode};
