use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the exporter config (TOML). Falls back to $BAR_EXPORTER_CONFIG, then defaults.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// What the host knows about the run: the bars, the instrument and the clock.
#[derive(Args, Debug, Clone)]
pub struct HostArgs {
    /// JSON array of bars in ascending open-time order
    #[arg(long)]
    pub input: PathBuf,

    /// Symbol name as the host reports it (e.g. "EUR/USD")
    #[arg(long)]
    pub symbol: String,

    /// Timeframe amount (numeric value)
    #[arg(long, default_value = "1")]
    pub amount: u32,

    /// Timeframe unit: m (minute), h (hour), d (day), w (week), M (month)
    #[arg(long, default_value = "m")]
    pub unit: String,

    /// Host server time at run start in RFC 3339 (e.g. "2025-01-01T09:30:00Z"); defaults to now
    #[arg(long)]
    pub server_time: Option<String>,

    /// Override the configured output directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Export the trailing window of the input history in one pass
    Bulk {
        #[command(flatten)]
        host: HostArgs,

        /// Override the configured number of bars
        #[arg(long)]
        bar_count: Option<usize>,

        /// Export even when auto_start is disabled in the config
        #[arg(long)]
        trigger: bool,
    },

    /// Replay the input history bar by bar, appending each closed bar
    Replay {
        #[command(flatten)]
        host: HostArgs,

        /// Pretend the host is trading live instead of backtesting
        #[arg(long)]
        real_time: bool,
    },
}
