use crate::{
    data_sources::{candle_source::CandleSource, dummy::DummySource, yahoo::yahoo_api::YahooApi},
    models::{candle::Candle, interval::Interval},
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

pub const DEFAULT_MARKET_SUFFIX: &str = ".NS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Yahoo,
    Dummy,
}

impl FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" => Ok(SourceKind::Yahoo),
            "dummy" => Ok(SourceKind::Dummy),
            other => Err(anyhow!(
                "Unknown data source '{}'. Supported sources: yahoo, dummy",
                other
            )),
        }
    }
}

impl Display for SourceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Yahoo => write!(f, "yahoo"),
            SourceKind::Dummy => write!(f, "dummy"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum DataSource {
    Yahoo(YahooApi),
    Dummy(DummySource),
}

impl DataSource {
    pub fn new(kind: SourceKind, utc_offset_minutes: i32) -> Result<Self> {
        let source = match kind {
            SourceKind::Yahoo => DataSource::Yahoo(YahooApi::new(utc_offset_minutes)?),
            SourceKind::Dummy => DataSource::Dummy(DummySource::new(0)),
        };

        Ok(source)
    }
}

impl Display for DataSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::Yahoo(_) => write!(f, "Yahoo Finance"),
            DataSource::Dummy(_) => write!(f, "Dummy"),
        }
    }
}

#[async_trait]
impl CandleSource for DataSource {
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<Candle>> {
        match self {
            DataSource::Yahoo(api) => api.fetch(ticker, start, end, interval).await,
            DataSource::Dummy(dummy) => dummy.fetch(ticker, start, end, interval).await,
        }
    }
}

/// Provider instrument id for a raw signal symbol.
pub fn ticker_for(symbol: &str, suffix: &str) -> String {
    format!("{}{}", symbol.trim(), suffix)
}
