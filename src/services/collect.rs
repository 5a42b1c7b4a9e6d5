use anyhow::Result;
use colored::Colorize;
use log::warn;

use crate::api::{MdblistClient, PmdbClient, TmdbClient};
use crate::config::keys::ApiKeys;
use crate::config::settings::AppConfig;
use crate::domain::models::{IdMapping, MediaType, TmdbSearchItem};
use crate::prompt;
use crate::rating::{self, CanonicalRatings, SourceCode};

const RULE_WIDTH: usize = 70;

/// Interactive collection loop: search a title, reconcile its ratings and
/// ID mappings against the registry, and submit what is missing.
pub struct CollectService {
    config: AppConfig,
    tmdb: TmdbClient,
    mdblist: MdblistClient,
    pmdb: PmdbClient,
}

impl CollectService {
    pub fn new(config: AppConfig, keys: &ApiKeys) -> Result<Self> {
        let tmdb = TmdbClient::new(&config.api, &keys.tmdb_key)?;
        let mdblist = MdblistClient::new(&config.api, &keys.mdblist_key)?;
        let pmdb = PmdbClient::new(&config.api, &keys.pmdb_key)?;

        Ok(Self {
            config,
            tmdb,
            mdblist,
            pmdb,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        println!("{}", "=".repeat(RULE_WIDTH));
        println!("Movie/TV Data Collector (Powered by MDblist)");
        println!("{}\n", "=".repeat(RULE_WIDTH));

        loop {
            if let Err(e) = self.process_item().await {
                warn!("Item skipped: {e:#}");
            }

            println!("\n{}", "=".repeat(RULE_WIDTH));
            if !prompt::confirm("\nProcess another item? (y/n, Enter=yes): ")? {
                println!("\nExiting. Goodbye!");
                break;
            }
            println!("\n{}\n", "=".repeat(RULE_WIDTH));
        }

        Ok(())
    }

    async fn process_item(&mut self) -> Result<()> {
        let Some(media_type) = self.choose_media_type()? else {
            return Ok(());
        };

        let Some(selected) = self.search_and_select(media_type).await? else {
            return Ok(());
        };
        let tmdb_id = selected.id;

        println!("\nFetching data from TMDB...");
        let details = self.tmdb.details(tmdb_id, media_type).await;
        let Some(imdb_id) = details.imdb_id().map(str::to_string) else {
            println!("Could not find an IMDb ID for this {}.", media_type.label());
            return Ok(());
        };

        println!("Fetching ratings and IDs from MDblist...");
        let payload = self.mdblist.fetch_ratings(&imdb_id).await;
        let mut ratings = payload.as_ref().map(rating::normalize).unwrap_or_default();

        let tvdb_id = match media_type {
            MediaType::Tv => payload.as_ref().and_then(|p| p.tvdb_id()),
            MediaType::Movie => None,
        };
        if let Some(id) = &tvdb_id {
            println!("Found TVDB ID via MDblist: {id}");
        }

        // The TMDB community score rides along from the details leg
        if let Some(tm) = rating::normalize_direct_score(details.vote_average()) {
            ratings.entry(SourceCode::TM).or_insert(tm);
        }

        println!("Checking existing records in PMDB...");
        let mapping_snapshot = self.pmdb.existing_mappings(tmdb_id, media_type).await;
        let existing_labels = self.pmdb.existing_ratings(tmdb_id, media_type).await;

        let (new_ratings, existing_ratings) =
            rating::partition_ratings(&ratings, &existing_labels);
        let desired = Self::desired_mappings(&imdb_id, tvdb_id.as_deref(), media_type);
        let pending_mappings = rating::missing_mappings(&desired, &mapping_snapshot);

        self.display_summary(
            &selected,
            &imdb_id,
            tvdb_id.as_deref(),
            &new_ratings,
            &existing_ratings,
            media_type,
        );

        self.handle_mappings(tmdb_id, &pending_mappings, media_type).await?;
        self.handle_ratings(tmdb_id, &new_ratings, &existing_ratings, media_type)
            .await?;
        Ok(())
    }

    // --- Interactive Steps ---

    /// None when stdin is exhausted; the item is then skipped and the
    /// outer loop's confirmation ends the run.
    fn choose_media_type(&self) -> Result<Option<MediaType>> {
        let Some(choice) = prompt::read_line("Search for (1) Movie or (2) TV Show? Enter 1 or 2: ")?
        else {
            return Ok(None);
        };
        Ok(Some(if choice == "2" {
            MediaType::Tv
        } else {
            MediaType::Movie
        }))
    }

    async fn search_and_select(
        &self,
        media_type: MediaType,
    ) -> Result<Option<TmdbSearchItem>> {
        let Some(title) =
            prompt::read_line(&format!("\nEnter {} title to search: ", media_type.label()))?
        else {
            return Ok(None);
        };
        if title.is_empty() {
            println!("Title cannot be empty.");
            return Ok(None);
        }

        let results = self.tmdb.search(&title, media_type).await?;
        if results.is_empty() {
            println!("No {}s found.", media_type.label());
            return Ok(None);
        }

        let shown: Vec<TmdbSearchItem> = results
            .into_iter()
            .take(self.config.search.max_results)
            .collect();
        self.display_results(&shown, media_type);

        let question = format!("\nSelect {} number (or 0 to cancel): ", media_type.label());
        match prompt::select_index(&question, shown.len())? {
            Some(idx) => Ok(shown.into_iter().nth(idx)),
            None => {
                println!("Cancelled.");
                Ok(None)
            }
        }
    }

    async fn handle_mappings(
        &self,
        tmdb_id: i64,
        pending: &[IdMapping],
        media_type: MediaType,
    ) -> Result<()> {
        if pending.is_empty() {
            println!("All ID mappings already exist in PMDB\n");
            return Ok(());
        }

        println!("{}", "=".repeat(RULE_WIDTH));
        println!("ID MAPPINGS TO SUBMIT");
        println!("{}", "=".repeat(RULE_WIDTH));
        for mapping in pending {
            println!(
                "TMDB ID {} -> {} {}",
                tmdb_id,
                mapping.id_type.to_uppercase(),
                mapping.value
            );
        }
        println!("{}\n", "=".repeat(RULE_WIDTH));

        if !prompt::confirm("Submit ID mapping(s) to PMDB? (y/n, Enter=yes): ")? {
            println!("Mapping submission skipped.\n");
            return Ok(());
        }

        println!("\nSubmitting mappings...");
        println!("{}", "-".repeat(RULE_WIDTH));
        for mapping in pending {
            self.pmdb.submit_mapping(tmdb_id, mapping, media_type).await;
        }
        println!("{}\n", "-".repeat(RULE_WIDTH));
        Ok(())
    }

    async fn handle_ratings(
        &self,
        tmdb_id: i64,
        new_ratings: &CanonicalRatings,
        existing_ratings: &CanonicalRatings,
        media_type: MediaType,
    ) -> Result<()> {
        if new_ratings.is_empty() {
            println!("No new ratings to submit - all ratings already exist!");
            return Ok(());
        }

        if !prompt::confirm("Submit new ratings to PMDB? (y/n, Enter=yes): ")? {
            println!("Ratings submission cancelled.");
            return Ok(());
        }

        println!("\nSubmitting ratings...");
        println!("{}", "-".repeat(RULE_WIDTH));

        let mut success_count = 0;
        for (&code, &score) in new_ratings {
            if self.pmdb.submit_rating(tmdb_id, code, score, media_type).await {
                success_count += 1;
            }
        }

        println!("{}", "-".repeat(RULE_WIDTH));
        println!(
            "\nSuccessfully submitted {}/{} rating(s)!",
            success_count,
            new_ratings.len()
        );
        if !existing_ratings.is_empty() {
            println!("Skipped {} existing rating(s).", existing_ratings.len());
        }
        Ok(())
    }

    // --- Display ---

    fn display_results(&self, results: &[TmdbSearchItem], media_type: MediaType) {
        println!("\nSearch Results:");
        println!("{}", "-".repeat(RULE_WIDTH));
        for (idx, item) in results.iter().enumerate() {
            println!(
                "{}. {} ({}) - TMDB ID: {}",
                idx + 1,
                item.display_title(media_type),
                item.year(media_type),
                item.id
            );
        }
        println!("{}", "-".repeat(RULE_WIDTH));
    }

    fn display_summary(
        &self,
        item: &TmdbSearchItem,
        imdb_id: &str,
        tvdb_id: Option<&str>,
        new_ratings: &CanonicalRatings,
        existing_ratings: &CanonicalRatings,
        media_type: MediaType,
    ) {
        println!("\n{}", "=".repeat(RULE_WIDTH));
        println!("{} INFORMATION", media_type.as_str().to_uppercase());
        println!("{}", "=".repeat(RULE_WIDTH));

        println!("Title: {}", item.display_title(media_type));
        println!("Year: {}", item.year(media_type));
        println!("TMDB ID: {}", item.id);
        println!("IMDb ID: {imdb_id}");
        if let Some(tvdb) = tvdb_id {
            println!("TVDB ID: {tvdb}");
        }

        if !existing_ratings.is_empty() {
            println!("\n{}", "-".repeat(RULE_WIDTH));
            println!("RATINGS ALREADY IN PMDB (will skip):");
            println!("{}", "-".repeat(RULE_WIDTH));
            for (code, score) in existing_ratings {
                println!("  {}: {}/100 {}", code, score, "[EXISTS]".yellow());
            }
        }

        println!("\n{}", "-".repeat(RULE_WIDTH));
        println!("NEW RATINGS TO SUBMIT:");
        println!("{}", "-".repeat(RULE_WIDTH));
        if new_ratings.is_empty() {
            println!("  No new ratings to submit (all already exist)");
        } else {
            for (code, score) in new_ratings {
                println!("  {}: {}/100 {}", code, score, "[NEW]".green());
            }
        }
        println!("{}\n", "=".repeat(RULE_WIDTH));
    }

    // --- Helper Methods ---

    /// IMDb always; TVDB only for TV titles and only when the aggregator
    /// reported one.
    fn desired_mappings(
        imdb_id: &str,
        tvdb_id: Option<&str>,
        media_type: MediaType,
    ) -> Vec<IdMapping> {
        let mut desired = vec![IdMapping::new("imdb", imdb_id)];

        if media_type == MediaType::Tv {
            if let Some(tvdb) = tvdb_id {
                desired.push(IdMapping::new("tvdb", tvdb));
            }
        }
        desired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desired_mappings_include_tvdb_only_for_tv() {
        let tv = CollectService::desired_mappings("tt1", Some("100"), MediaType::Tv);
        assert_eq!(
            tv,
            vec![IdMapping::new("imdb", "tt1"), IdMapping::new("tvdb", "100")]
        );

        let movie = CollectService::desired_mappings("tt1", Some("100"), MediaType::Movie);
        assert_eq!(movie, vec![IdMapping::new("imdb", "tt1")]);
    }

    #[test]
    fn test_desired_mappings_without_tvdb_id() {
        let tv = CollectService::desired_mappings("tt1", None, MediaType::Tv);
        assert_eq!(tv, vec![IdMapping::new("imdb", "tt1")]);
    }
}
