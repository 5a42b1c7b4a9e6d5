pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod http;
pub mod prompt;
pub mod rating;
pub mod retry;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::cli::Command;
use crate::config::keys::ApiKeys;
use crate::config::settings::AppConfig;
use crate::domain::MediaType;
use crate::services::collect::CollectService;
use crate::services::lookup::LookupService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_collect(keys_file: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let keys = ApiKeys::load(keys_file)?;
        let mut service = CollectService::new(config, &keys)?;
        service.run().await
    })
}

pub fn handle_lookup(title: &str, tv: bool, keys_file: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let keys = ApiKeys::load(keys_file)?;
        let media_type = if tv { MediaType::Tv } else { MediaType::Movie };
        let service = LookupService::new(config, &keys)?;
        service.run(title, media_type).await
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    clap_complete::generate(shell, &mut command, "pmdb_mapper", &mut std::io::stdout());
    Ok(())
}
