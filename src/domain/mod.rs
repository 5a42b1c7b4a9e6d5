pub mod models;

pub use models::{
    IdMapping, MappingSnapshot, MediaType, RawAggregatePayload, RawRatingEntry, TitleDetails,
    TmdbDetails, TmdbExternalIds, TmdbSearchItem, TmdbSearchResponse, safe_year,
};
