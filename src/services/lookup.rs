use anyhow::Result;
use colored::Colorize;
use log::info;

use crate::api::{MdblistClient, TmdbClient};
use crate::config::keys::ApiKeys;
use crate::config::settings::AppConfig;
use crate::domain::models::MediaType;
use crate::rating::{self, SourceCode};

/// One-shot read-only lookup: fetch, normalize and display ratings for the
/// first search match. Never writes to the registry.
pub struct LookupService {
    tmdb: TmdbClient,
    mdblist: MdblistClient,
}

impl LookupService {
    pub fn new(config: AppConfig, keys: &ApiKeys) -> Result<Self> {
        let tmdb = TmdbClient::new(&config.api, &keys.tmdb_key)?;
        let mdblist = MdblistClient::new(&config.api, &keys.mdblist_key)?;
        Ok(Self { tmdb, mdblist })
    }

    pub async fn run(&self, title: &str, media_type: MediaType) -> Result<()> {
        let results = self.tmdb.search(title, media_type).await?;
        let Some(first) = results.into_iter().next() else {
            anyhow::bail!("No {} found for '{}'", media_type.label(), title);
        };

        info!(
            "Using first match: {} ({})",
            first.display_title(media_type),
            first.year(media_type)
        );

        let details = self.tmdb.details(first.id, media_type).await;
        let Some(imdb_id) = details.imdb_id() else {
            anyhow::bail!(
                "No IMDb ID known for '{}'",
                first.display_title(media_type)
            );
        };

        let payload = self.mdblist.fetch_ratings(imdb_id).await;
        let mut ratings = payload.as_ref().map(rating::normalize).unwrap_or_default();
        if let Some(tm) = rating::normalize_direct_score(details.vote_average()) {
            ratings.entry(SourceCode::TM).or_insert(tm);
        }

        println!(
            "\n{} ({}) - TMDB {} / {}",
            first.display_title(media_type).bold(),
            first.year(media_type),
            first.id,
            imdb_id
        );

        if ratings.is_empty() {
            println!("No ratings found.");
            return Ok(());
        }

        for (code, score) in &ratings {
            println!("  {}  {:>5}/100  {}", code, score, code.description());
        }
        Ok(())
    }
}
