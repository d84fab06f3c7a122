use crate::models::{
    data_type::DataType, entry::Entry, exit_type::ExitType, trade_status::TradeStatus,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Terminal outcome of a single entry. Created once and never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeResult {
    pub symbol: String,
    pub entry_timestamp: NaiveDateTime,
    pub status: TradeStatus,
    pub entry_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub exit_timestamp: Option<NaiveDateTime>,
    pub exit_type: ExitType,
    pub pnl_pct: f64,
    pub data_type: DataType,
}

/// Flat row written to the exported results file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub entry_date: String,
    pub entry_time: String,
    pub status: String,
    pub entry_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub exit_datetime: Option<String>,
    pub exit_type: String,
    pub pnl_pct: f64,
    pub data_type: String,
}

impl TradeResult {
    pub fn no_data(entry: &Entry) -> Self {
        Self::unpriced(entry, TradeStatus::NoData, ExitType::NoData, DataType::None)
    }

    pub fn no_data_after_entry(entry: &Entry, data_type: DataType) -> Self {
        Self::unpriced(
            entry,
            TradeStatus::NoDataAfterEntry,
            ExitType::NoData,
            data_type,
        )
    }

    pub fn error(entry: &Entry, message: &str) -> Self {
        Self::unpriced(
            entry,
            TradeStatus::Error,
            ExitType::Error(message.to_string()),
            DataType::Error,
        )
    }

    fn unpriced(
        entry: &Entry,
        status: TradeStatus,
        exit_type: ExitType,
        data_type: DataType,
    ) -> Self {
        Self {
            symbol: entry.symbol.clone(),
            entry_timestamp: entry.timestamp,
            status,
            entry_price: None,
            exit_price: None,
            exit_timestamp: None,
            exit_type,
            pnl_pct: 0.0,
            data_type,
        }
    }

    pub fn entry_date(&self) -> NaiveDate {
        self.entry_timestamp.date()
    }

    pub fn is_completed(&self) -> bool {
        self.status == TradeStatus::Completed
    }

    pub fn to_record(&self) -> TradeRecord {
        TradeRecord {
            symbol: self.symbol.clone(),
            entry_date: self.entry_date().format("%Y-%m-%d").to_string(),
            entry_time: self.entry_timestamp.format("%H:%M").to_string(),
            status: self.status.to_string(),
            entry_price: self.entry_price.map(round2),
            exit_price: self.exit_price.map(round2),
            exit_datetime: self
                .exit_timestamp
                .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string()),
            exit_type: self.exit_type.to_string(),
            pnl_pct: round2(self.pnl_pct),
            data_type: self.data_type.to_string(),
        }
    }
}

impl Display for TradeResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let price = |p: Option<f64>| p.map_or("-".to_string(), |p| format!("{:.2}", p));

        write!(
            f,
            "{:<12} {} {:<20} {:>10} -> {:<10} {:<22} {:>7.2}% [{}]",
            self.symbol,
            self.entry_timestamp.format("%Y-%m-%d %H:%M"),
            self.status.to_string(),
            price(self.entry_price),
            price(self.exit_price),
            self.exit_type.to_string(),
            self.pnl_pct,
            self.data_type
        )
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
