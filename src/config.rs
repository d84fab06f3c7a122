use crate::{
    backtest::throttle::{DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE},
    data_sources::datasource::{SourceKind, DEFAULT_MARKET_SUFFIX},
    models::exit_rule::ExitRule,
};
use anyhow::{anyhow, Context, Result};
use std::{env, str::FromStr, time::Duration};

pub const DEFAULT_LOOKAHEAD_DAYS: i64 = 7;
pub const MAX_LOOKAHEAD_DAYS: i64 = 366;
/// India Standard Time, the exchange time of the default `.NS` suffix.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 330;

/// Run-scoped settings. Built once before the run and passed explicitly to
/// everything that needs them.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub exit_rule: ExitRule,
    pub lookahead_days: i64,
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub market_suffix: String,
    pub utc_offset_minutes: i32,
    pub source: SourceKind,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            exit_rule: ExitRule::default(),
            lookahead_days: DEFAULT_LOOKAHEAD_DAYS,
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
            market_suffix: DEFAULT_MARKET_SUFFIX.to_string(),
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            source: SourceKind::Yahoo,
        }
    }
}

impl BacktestConfig {
    /// Reads `BACKTEST_*` variables from the process environment (after
    /// `.env` has been loaded), falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let stop_loss_pct = read(&lookup, "BACKTEST_STOP_LOSS_PCT", defaults.exit_rule.stop_loss_pct)?;
        let take_profit_pct = read(
            &lookup,
            "BACKTEST_TAKE_PROFIT_PCT",
            defaults.exit_rule.take_profit_pct,
        )?;
        let batch_delay_ms = read(
            &lookup,
            "BACKTEST_BATCH_DELAY_MS",
            defaults.batch_delay.as_millis() as u64,
        )?;

        let config = Self {
            exit_rule: ExitRule {
                stop_loss_pct,
                take_profit_pct,
            },
            lookahead_days: read(&lookup, "BACKTEST_LOOKAHEAD_DAYS", defaults.lookahead_days)?,
            batch_size: read(&lookup, "BACKTEST_BATCH_SIZE", defaults.batch_size)?,
            batch_delay: Duration::from_millis(batch_delay_ms),
            market_suffix: lookup("BACKTEST_MARKET_SUFFIX").unwrap_or(defaults.market_suffix),
            utc_offset_minutes: read(
                &lookup,
                "BACKTEST_EXCHANGE_UTC_OFFSET_MINUTES",
                defaults.utc_offset_minutes,
            )?,
            source: read(&lookup, "BACKTEST_DATA_SOURCE", defaults.source)?,
        };

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.exit_rule.validate()?;

        if !(1..=MAX_LOOKAHEAD_DAYS).contains(&self.lookahead_days) {
            return Err(anyhow!(
                "Lookahead must be between 1 and {} days, got {}.",
                MAX_LOOKAHEAD_DAYS,
                self.lookahead_days
            ));
        }

        if self.batch_size == 0 {
            return Err(anyhow!("Batch size must be at least 1."));
        }

        if self.utc_offset_minutes.abs() > 14 * 60 {
            return Err(anyhow!(
                "Exchange UTC offset of {} minutes is out of range.",
                self.utc_offset_minutes
            ));
        }

        Ok(())
    }
}

fn read<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow!("{}", e))
            .with_context(|| format!("Invalid value '{}' for {}.", raw, key)),
        None => Ok(default),
    }
}
