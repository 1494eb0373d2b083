//! damage-cli - Compute damage reports from build records
//!
//! Reads build and enemy records from JSON or TOML files, runs the combat_core pipeline and
//! prints the report as JSON on stdout. Logs go to stderr.

mod app;
mod commands;

use anyhow::Result;
use app::App;
use clap::Parser;
use commands::{BondCmd, CharacterCmd, ReactionsCmd, SetsCmd, TeamCmd};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Theoretical damage calculator
#[derive(Parser)]
#[command(name = "damage-cli")]
#[command(about = "Theoretical damage reports for characters and teams", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding characters.toml, artifact_sets.toml, team_buffs.toml and reactions.toml
    #[arg(long, global = true)]
    tables: Option<PathBuf>,

    /// Engine constants TOML file
    #[arg(long, global = true)]
    constants: Option<PathBuf>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON on a single line
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Damage of every ability of one character, no team buffs
    Character(CharacterCmd),

    /// Unbuffed and buffed damage of a main character inside a team
    Team(TeamCmd),

    /// Rank the reactions a team can produce
    Reactions(ReactionsCmd),

    /// Recommended artifact sets for an element or character
    Sets(SetsCmd),

    /// Bond of Life bonus and healing simulation for a character
    Bond(BondCmd),
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let app = App::load(cli.tables.as_deref(), cli.constants.as_deref(), !cli.compact)?;

    match cli.command {
        Command::Character(cmd) => cmd.execute(&app),
        Command::Team(cmd) => cmd.execute(&app),
        Command::Reactions(cmd) => cmd.execute(&app),
        Command::Sets(cmd) => cmd.execute(&app),
        Command::Bond(cmd) => cmd.execute(&app),
    }
}
