use chrono::{NaiveDate, NaiveDateTime};

/// The earliest signal for a symbol on a given day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
}

impl Entry {
    pub fn new(symbol: &str, timestamp: NaiveDateTime) -> Self {
        Self {
            symbol: symbol.to_string(),
            timestamp,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}
