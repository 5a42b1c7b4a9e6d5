pub mod mdblist_client;
pub mod models;
pub mod pmdb_client;
pub mod tmdb_client;

pub use mdblist_client::MdblistClient;
pub use pmdb_client::PmdbClient;
pub use tmdb_client::TmdbClient;
