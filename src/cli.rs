use crate::{config::BacktestConfig, data_sources::datasource::SourceKind};
use clap::Parser;
use std::{path::PathBuf, time::Duration};

/// Replay entry signals against historical candles with a fixed stop-loss /
/// take-profit exit.
#[derive(Debug, Parser)]
#[command(name = "signal_backtest", version, about)]
pub struct Cli {
    /// CSV file with `date` (DD-MM-YYYY HH:MM am/pm) and `symbol` columns
    pub input: PathBuf,

    /// Stop loss in percent, (0, 20]
    #[arg(long)]
    pub stop_loss: Option<f64>,

    /// Take profit in percent, (0, 50]
    #[arg(long)]
    pub take_profit: Option<f64>,

    /// Calendar days of data fetched after each entry day
    #[arg(long)]
    pub lookahead_days: Option<i64>,

    /// Entries processed between pauses
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Pause after each batch, in milliseconds
    #[arg(long)]
    pub batch_delay_ms: Option<u64>,

    /// Suffix appended to every symbol to form the provider ticker
    #[arg(long)]
    pub suffix: Option<String>,

    /// Candle provider: yahoo or dummy
    #[arg(long)]
    pub source: Option<SourceKind>,

    /// Directory the results file is written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

impl Cli {
    /// Command line flags win over environment configuration.
    pub fn apply_to(&self, mut config: BacktestConfig) -> BacktestConfig {
        if let Some(sl) = self.stop_loss {
            config.exit_rule.stop_loss_pct = sl;
        }
        if let Some(tp) = self.take_profit {
            config.exit_rule.take_profit_pct = tp;
        }
        if let Some(days) = self.lookahead_days {
            config.lookahead_days = days;
        }
        if let Some(size) = self.batch_size {
            config.batch_size = size;
        }
        if let Some(ms) = self.batch_delay_ms {
            config.batch_delay = Duration::from_millis(ms);
        }
        if let Some(suffix) = &self.suffix {
            config.market_suffix = suffix.clone();
        }
        if let Some(source) = self.source {
            config.source = source;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let cli = Cli::try_parse_from([
            "signal_backtest",
            "signals.csv",
            "--stop-loss",
            "2",
            "--source",
            "dummy",
            "--suffix",
            ".BO",
        ])
        .unwrap();

        let config = cli.apply_to(BacktestConfig::default());

        assert_eq!(cli.input, PathBuf::from("signals.csv"));
        assert_eq!(config.exit_rule.stop_loss_pct, 2.0);
        assert_eq!(config.exit_rule.take_profit_pct, 7.5);
        assert_eq!(config.source, SourceKind::Dummy);
        assert_eq!(config.market_suffix, ".BO");
        assert_eq!(cli.output_dir, PathBuf::from("."));
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["signal_backtest"]).is_err());
    }
}
