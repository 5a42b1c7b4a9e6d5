use anyhow::Result;

use pmdb_mapper::cli::Command;
use pmdb_mapper::{handle_collect, handle_completions, handle_lookup, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Collect { keys } => handle_collect(keys),
        Command::Lookup { title, tv, keys } => handle_lookup(title, *tv, keys),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
