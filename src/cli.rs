use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "pmdb-mapper: movie/TV rating and ID mapping collector")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Interactively search titles, review their ratings and submit new data to PMDB
    Collect {
        /// Path to the JSON file with API keys
        #[arg(short, long, default_value = "api_keys.json")]
        keys: String,
    },
    /// Fetch and display normalized ratings for one title without submitting anything
    Lookup {
        /// Title to search for
        title: String,
        /// Treat the title as a TV show instead of a movie
        #[arg(long)]
        tv: bool,
        /// Path to the JSON file with API keys
        #[arg(short, long, default_value = "api_keys.json")]
        keys: String,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}
