use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use ludo::config::{MAX_PLAYERS, MIN_PLAYERS};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(about = "Ludo for two to four players in the terminal")]
struct Args {
    /// Player names; with none, the game starts on the setup screen
    names: Vec<String>,

    /// RNG seed for the die
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,

    /// Write log lines to this file (the terminal itself belongs to the board)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    if !args.names.is_empty() && !(MIN_PLAYERS..=MAX_PLAYERS).contains(&args.names.len()) {
        anyhow::bail!(
            "expected between {MIN_PLAYERS} and {MAX_PLAYERS} player names, got {}",
            args.names.len()
        );
    }

    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .with_context(|| format!("cannot open log file {}", path.display()))?;
        initialize_logging(args.log_level, file);
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, players = args.names.len(), "starting");

    ludo::app::run(args.names, seed)
}

fn initialize_logging(level: LevelFilter, file: File) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(format)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .init();
}
