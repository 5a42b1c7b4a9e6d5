pub struct ApiSettings {
    pub tmdb_base_url: &'static str,
    pub mdblist_url: &'static str,
    pub pmdb_ratings_url: &'static str,
    pub pmdb_mappings_url: &'static str,
    pub user_agent: &'static str,
    pub timeout_secs: u64,
    pub max_retries: usize,
    pub retry_delay_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            tmdb_base_url: "https://api.themoviedb.org/3",
            mdblist_url: "https://mdblist.com/api/",
            pmdb_ratings_url: "https://publicmetadb.com/api/external/ratings",
            pmdb_mappings_url: "https://publicmetadb.com/api/external/mappings",
            user_agent: "PmdbMapper/1.0",
            timeout_secs: 10,
            max_retries: 3,
            retry_delay_ms: 1000,
        }
    }
}

pub struct SearchSettings {
    /// How many search results are shown for selection
    pub max_results: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self { max_results: 10 }
    }
}

pub struct AppConfig {
    pub api: ApiSettings,
    pub search: SearchSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            api: ApiSettings::default(),
            search: SearchSettings::default(),
        }
    }
}
