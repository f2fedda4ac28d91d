//! CLI frontend for the Everbrook text-adventure engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "eb",
    about = "Everbrook — a whimsical text-adventure engine",
    version,
    propagate_version = true
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive session
    Play {
        /// Directory containing the game's JSON content files
        #[arg(short, long, default_value = "data")]
        dir: PathBuf,

        /// Starting location id
        #[arg(long, default_value = "start")]
        start: String,

        /// RNG seed for a deterministic playthrough
        #[arg(short, long, default_value = "42")]
        seed: u64,
    },

    /// Validate content files and show category counts
    Check {
        /// Directory containing the game's JSON content files
        #[arg(short, long, default_value = "data")]
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Play { dir, start, seed } => commands::play::run(&dir, &start, seed),
        Commands::Check { dir } => commands::check::run(&dir),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new().filter_level(level).init();
}
