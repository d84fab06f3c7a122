use crate::{
    data_sources::{candle_source::CandleSource, yahoo::chart_response::ChartResponse},
    models::{candle::Candle, interval::Interval},
};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use reqwest::{header::USER_AGENT, Client};
use std::time::Duration;
use tracing::debug;

const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const CLIENT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) signal_backtest";

/// Historical candles from the public Yahoo Finance chart endpoint.
#[derive(Debug, Clone)]
pub struct YahooApi {
    client: Client,
    base_url: String,
    utc_offset_secs: i64,
}

impl YahooApi {
    pub fn new(utc_offset_minutes: i32) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Unable to build HTTP client.")?;

        Ok(Self {
            client,
            base_url: YAHOO_CHART_URL.to_string(),
            utc_offset_secs: i64::from(utc_offset_minutes) * 60,
        })
    }

    /// Epoch seconds of local midnight on `date`.
    fn local_midnight_epoch(&self, date: NaiveDate) -> i64 {
        date.and_time(NaiveTime::MIN).and_utc().timestamp() - self.utc_offset_secs
    }
}

#[async_trait]
impl CandleSource for YahooApi {
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<Candle>> {
        let url = format!("{}/{}", self.base_url, ticker);
        let period1 = self.local_midnight_epoch(start).to_string();
        let period2 = self.local_midnight_epoch(end).to_string();

        debug!("GET {} {} [{} .. {})", url, interval, start, end);

        let res = self
            .client
            .get(&url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .query(&[
                ("period1", period1.as_str()),
                ("period2", period2.as_str()),
                ("interval", interval.as_provider_str()),
                ("includePrePost", "false"),
            ])
            .send()
            .await?;

        let status = res.status();

        // Yahoo reports most failures as JSON with a non-2xx status, so the
        // body is decoded before the status is considered.
        let parsed: ChartResponse = res
            .json()
            .await
            .map_err(|e| anyhow!("Yahoo returned {} with unreadable body: {}", status, e))?;

        parsed.into_candles(self.utc_offset_secs)
    }
}
