//! chattally - personal chat activity tracker CLI
//!
//! Reads the tracker's durable store and renders the activity reports, and
//! replays exported event logs through the full tracking pipeline.

mod replay;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use chattally_core::{commands, Config, SqliteStore, StatsAccumulator};

#[derive(Parser, Debug)]
#[command(name = "chattally")]
#[command(about = "Personal chat activity tracker")]
#[command(version)]
struct Cli {
    /// Path to the stats database (default: XDG data dir)
    #[arg(long)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the activity overview report
    Stats,
    /// Show the server/channel ranking report
    Serverstats,
    /// Reset all stats (requires the literal confirmation word "confirm")
    Resetstats {
        /// Type 'confirm' to reset all stats (this cannot be undone)
        confirmation: String,
    },
    /// Replay an exported JSONL event log into the stats database
    Replay {
        /// Path to the event log
        file: PathBuf,
    },
    /// Dump the raw (undeflated) snapshot as pretty JSON
    Export,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = chattally_core::logging::init(&config.logging).ok();

    let db_path = cli.db.unwrap_or_else(Config::database_path);
    let store = SqliteStore::open(&db_path)
        .with_context(|| format!("failed to open stats database {:?}", db_path))?;

    match cli.command {
        Command::Stats => {
            let mut acc = StatsAccumulator::new(Box::new(store));
            acc.reload();
            let response = commands::stats(&acc, &config.tracking);
            println!("{}", response.content);
            print_footer();
        }
        Command::Serverstats => {
            let mut acc = StatsAccumulator::new(Box::new(store));
            acc.reload();
            let response = commands::server_stats(&acc, &config.tracking);
            println!("{}", response.content);
            print_footer();
        }
        Command::Resetstats { confirmation } => {
            let mut acc = StatsAccumulator::new(Box::new(store));
            acc.reload();
            let response = commands::reset_stats(&mut acc, &confirmation);
            println!("{}", response.content);
        }
        Command::Replay { file } => {
            let summary = replay::replay_file(&file, Box::new(store), config.tracking.clone())?;
            println!(
                "Replayed {} events ({} lines skipped) into {:?}",
                summary.events, summary.skipped_lines, db_path
            );
        }
        Command::Export => {
            let mut acc = StatsAccumulator::new(Box::new(store));
            acc.reload();
            println!("{}", serde_json::to_string_pretty(acc.snapshot())?);
        }
    }

    Ok(())
}

fn print_footer() {
    println!("Generated {}", Local::now().format("%b %d, %Y"));
}
