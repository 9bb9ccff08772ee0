use anyhow::{Context, Result};
use bar_exporter::{
    cli::commands::{Cli, Commands},
    config::resolve_config,
    export::{StreamingSession, export_bulk},
    models::job::RunMode,
    replay::replay,
    source::load_bars_json,
};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = resolve_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Bulk {
            host,
            bar_count,
            trigger,
        } => {
            host.apply_to(&mut config);
            if let Some(n) = bar_count {
                config.bar_count = n;
            }
            if !config.auto_start && !trigger {
                info!("auto_start is disabled; pass --trigger to export");
                return Ok(());
            }

            let bars = load_bars_json(&host.input)?;
            let job = config.to_job(
                host.symbol.as_str(),
                host.timeframe_label()?,
                host.run_timestamp()?,
                false,
            );
            let summary = export_bulk(&job, &bars).context("bulk export failed")?;
            // Paths go to stdout for scripting; logs stay on stderr.
            println!("{}", summary.path.display());
        }

        Commands::Replay { host, real_time } => {
            host.apply_to(&mut config);
            let bars = load_bars_json(&host.input)?;
            let job = config.to_job(
                host.symbol.as_str(),
                host.timeframe_label()?,
                host.run_timestamp()?,
                true,
            );
            let mode = if real_time {
                RunMode::RealTime
            } else {
                RunMode::Backtesting
            };

            let mut session = StreamingSession::start(&job, mode)?;
            let stats = replay(&bars, &mut session);
            eprintln!(
                "SUMMARY: {} written, {} skipped, {} failed",
                stats.written, stats.skipped, stats.failed
            );
            println!("{}", session.path().display());
        }
    }

    Ok(())
}
