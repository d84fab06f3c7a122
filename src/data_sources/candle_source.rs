use crate::models::{candle::Candle, interval::Interval};
use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

/// Anything able to return historical candles for a ticker.
///
/// `start` is inclusive and `end` exclusive, both calendar days in exchange
/// time. An empty vector means the provider has no data for the window; an
/// `Err` means the request itself failed.
#[async_trait]
pub trait CandleSource: Send + Sync {
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<Candle>>;
}
