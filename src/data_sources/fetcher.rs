use crate::{
    data_sources::candle_source::CandleSource,
    models::{candle::Candle, data_type::DataType, interval::Interval},
};
use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct FetchedCandles {
    pub candles: Vec<Candle>,
    pub data_type: DataType,
}

/// Requests intraday candles and falls back to daily ones when the provider
/// has none. Provider errors are returned as is; they are not a reason to
/// try the next resolution.
pub async fn fetch_with_fallback<S>(
    source: &S,
    ticker: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<FetchedCandles>
where
    S: CandleSource + ?Sized,
{
    for interval in Interval::fallback_order() {
        let candles = source.fetch(ticker, start, end, interval).await?;

        if !candles.is_empty() {
            debug!("{}: {} candles at {}", ticker, candles.len(), interval);
            return Ok(FetchedCandles {
                candles,
                data_type: DataType::from(interval),
            });
        }

        debug!("{}: no candles at {}", ticker, interval);
    }

    Ok(FetchedCandles {
        candles: vec![],
        data_type: DataType::None,
    })
}
