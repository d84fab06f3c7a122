use crate::{
    backtest::backtester::Backtester,
    cli::Cli,
    config::BacktestConfig,
    data_sources::datasource::DataSource,
    report::{
        csv_export::export_results,
        summary::{BacktestSummary, DAILY_FALLBACK_WARNING},
    },
    signals::{
        normalizer::{normalize, read_signals},
        signal_summary::SignalSummary,
    },
};
use anyhow::{Context, Result};
use chrono::Local;
use std::fs::File;
use tracing::{info, warn};

/// Reads the signal file named on the command line, replays every entry and
/// writes the results file. Input problems abort before any fetch happens.
pub async fn run(cli: Cli) -> Result<()> {
    let config = cli.apply_to(BacktestConfig::from_env()?);
    config.validate()?;

    let file = File::open(&cli.input)
        .with_context(|| format!("Unable to open signal file {}.", cli.input.display()))?;
    let signals = read_signals(file)?;
    let entries = normalize(&signals)?;

    println!("{}\n", SignalSummary::new(signals.len(), &entries));

    let source = DataSource::new(config.source, config.utc_offset_minutes)?;

    info!(
        "Running backtest on {} entries with {} (SL {:.1}%, TP {:.1}%)",
        entries.len(),
        source,
        config.exit_rule.stop_loss_pct,
        config.exit_rule.take_profit_pct
    );

    let backtester = Backtester::new(source, config);
    let results = backtester.run(&entries).await;

    println!("Detailed Results");
    for res in &results {
        println!("  {}", res);
    }
    println!();

    let summary = BacktestSummary::from_results(&results);
    println!("{}", summary);

    if summary.used_daily_fallback() {
        warn!("{}", DAILY_FALLBACK_WARNING);
    }

    let path = export_results(&cli.output_dir, Local::now().naive_local(), &results)?;
    info!("Results written to {}", path.display());

    Ok(())
}
