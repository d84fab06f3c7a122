use crate::models::candle::Candle;
use anyhow::{anyhow, Result};
use chrono::DateTime;
use serde::Deserialize;

/// Error codes Yahoo uses when a window simply holds no bars, e.g. intraday
/// data requested beyond its retention period.
const EMPTY_RANGE_CODES: [&str; 2] = ["Not Found", "Unprocessable Entity"];

#[derive(Debug, Deserialize)]
pub struct ChartResponse {
    pub chart: Chart,
}

#[derive(Debug, Deserialize)]
pub struct Chart {
    pub result: Option<Vec<ChartResult>>,
    pub error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
pub struct ChartError {
    pub code: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChartResult {
    pub meta: Option<ChartMeta>,
    pub timestamp: Option<Vec<i64>>,
    pub indicators: Indicators,
}

#[derive(Debug, Deserialize)]
pub struct ChartMeta {
    pub gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct Indicators {
    pub quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub open: Vec<Option<f64>>,
    #[serde(default)]
    pub high: Vec<Option<f64>>,
    #[serde(default)]
    pub low: Vec<Option<f64>>,
    #[serde(default)]
    pub close: Vec<Option<f64>>,
    #[serde(default)]
    pub volume: Vec<Option<f64>>,
}

impl ChartResponse {
    /// Converts the response into exchange-local candles. Bars with any
    /// missing price are dropped.
    pub fn into_candles(self, fallback_offset_secs: i64) -> Result<Vec<Candle>> {
        if let Some(err) = self.chart.error {
            if EMPTY_RANGE_CODES.contains(&err.code.as_str()) {
                return Ok(vec![]);
            }

            return Err(anyhow!(
                "{}: {}",
                err.code,
                err.description.unwrap_or_default()
            ));
        }

        let result = match self.chart.result.and_then(|r| r.into_iter().next()) {
            Some(result) => result,
            None => return Ok(vec![]),
        };

        let offset = result
            .meta
            .and_then(|m| m.gmtoffset)
            .unwrap_or(fallback_offset_secs);

        let timestamps = match result.timestamp {
            Some(ts) => ts,
            None => return Ok(vec![]),
        };

        let quote = match result.indicators.quote.into_iter().next() {
            Some(quote) => quote,
            None => return Ok(vec![]),
        };

        let mut candles = Vec::with_capacity(timestamps.len());

        for (i, ts) in timestamps.iter().enumerate() {
            let field = |values: &Vec<Option<f64>>| values.get(i).copied().flatten();

            let (open, high, low, close) = match (
                field(&quote.open),
                field(&quote.high),
                field(&quote.low),
                field(&quote.close),
            ) {
                (Some(o), Some(h), Some(l), Some(c)) => (o, h, l, c),
                _ => continue,
            };

            let timestamp = DateTime::from_timestamp(ts + offset, 0)
                .ok_or(anyhow!("Timestamp {} is out of range.", ts))?
                .naive_utc();

            candles.push(Candle {
                timestamp,
                open,
                high,
                low,
                close,
                volume: field(&quote.volume).unwrap_or(0.0),
            });
        }

        candles.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
        candles.dedup_by(|a, b| a.timestamp == b.timestamp);

        Ok(candles)
    }
}
