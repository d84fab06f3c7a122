use crate::{
    backtest::{exit_scanner::scan_exit, throttle::Throttle},
    config::BacktestConfig,
    data_sources::{candle_source::CandleSource, datasource::ticker_for, fetcher::fetch_with_fallback},
    models::{data_type::DataType, entry::Entry, trade_result::TradeResult},
};
use anyhow::{anyhow, Result};
use chrono::Duration;
use tracing::{info, warn};

/// Error text attached to an `ERROR` result is cut to this many characters.
pub const MAX_ERROR_CHARS: usize = 50;

/// Replays entries one at a time against a candle source.
pub struct Backtester<S: CandleSource> {
    source: S,
    config: BacktestConfig,
}

impl<S: CandleSource> Backtester<S> {
    pub fn new(source: S, config: BacktestConfig) -> Self {
        Self { source, config }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Produces exactly one result per entry, in entry order. A failure for
    /// one entry is recorded as an `ERROR` result and never stops the run.
    pub async fn run(&self, entries: &[Entry]) -> Vec<TradeResult> {
        let total = entries.len();
        let mut throttle = Throttle::new(self.config.batch_size, self.config.batch_delay);
        let mut results = Vec::with_capacity(total);

        for (i, entry) in entries.iter().enumerate() {
            info!(
                "Processing {}/{}: {} on {}",
                i + 1,
                total,
                entry.symbol,
                entry.date()
            );

            let result = match self.process(entry).await {
                Ok(result) => result,
                Err(e) => {
                    warn!("{} on {} failed: {:#}", entry.symbol, entry.date(), e);
                    TradeResult::error(entry, &truncate_error(&e))
                }
            };

            results.push(result);

            if i + 1 < total {
                throttle.record().await;
            }
        }

        results
    }

    async fn process(&self, entry: &Entry) -> Result<TradeResult> {
        let ticker = ticker_for(&entry.symbol, &self.config.market_suffix);
        let start = entry.date();
        let end = Duration::try_days(self.config.lookahead_days)
            .and_then(|window| start.checked_add_signed(window))
            .ok_or(anyhow!(
                "Lookahead of {} days from {} is out of range",
                self.config.lookahead_days,
                start
            ))?;

        let fetched = fetch_with_fallback(&self.source, &ticker, start, end).await?;

        if fetched.data_type == DataType::None {
            return Ok(TradeResult::no_data(entry));
        }

        scan_exit(
            entry,
            &fetched.candles,
            &self.config.exit_rule,
            fetched.data_type,
        )
    }
}

fn truncate_error(e: &anyhow::Error) -> String {
    format!("{:#}", e).chars().take(MAX_ERROR_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn error_text_is_truncated_by_characters() {
        let e = anyhow!("{}", "é".repeat(80));

        let text = truncate_error(&e);

        assert_eq!(text.chars().count(), MAX_ERROR_CHARS);
    }

    #[test]
    fn short_error_text_is_kept() {
        let e = anyhow!("timeout").context("fetch failed");

        assert_eq!(truncate_error(&e), "fetch failed: timeout");
    }
}
