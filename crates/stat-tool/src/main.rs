//! Development tools for the stat subsystem.
//!
//! Inspects stat templates, previews entity stat sets, and validates data
//! directories. Run with: `cargo run -p stat-tool -- <command>`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Entity, Templates, Validate};
use tracing_subscriber::EnvFilter;

/// Development tools for the stat subsystem
#[derive(Parser)]
#[command(name = "stat-tool")]
#[command(about = "Inspect and validate stat content", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// List stat templates
    Templates(Templates),

    /// Preview the default stat set for an entity
    Entity(Entity),

    /// Validate a data directory
    Validate(Validate),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for STAT_DATA_DIR and RUST_LOG)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Templates(cmd) => cmd.execute(),
        Command::Entity(cmd) => cmd.execute(),
        Command::Validate(cmd) => cmd.execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_ids_and_categories_case_insensitively() {
        let args = ["stat-tool", "templates", "--category", "TERTIARY"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Templates(_)));

        let args = ["stat-tool", "entity", "--bonus", "attack=15", "-b", "magicpower=2"];
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Command::Entity(_)));

        let args = ["stat-tool", "templates", "--category", "quaternary"];
        assert!(Cli::try_parse_from(args).is_err());
        let args = ["stat-tool", "entity", "--bonus", "mojo=1"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
