use crate::models::entry::Entry;
use chrono::NaiveDate;
use std::{
    collections::HashSet,
    fmt::{Display, Formatter},
};

/// Overview of an ingested signal file, shown before the run starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSummary {
    pub total_signals: usize,
    pub unique_trades: usize,
    pub unique_symbols: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
}

impl SignalSummary {
    pub fn new(total_signals: usize, entries: &[Entry]) -> Self {
        let symbols: HashSet<&str> = entries.iter().map(|e| e.symbol.as_str()).collect();

        Self {
            total_signals,
            unique_trades: entries.len(),
            unique_symbols: symbols.len(),
            first_date: entries.iter().map(Entry::date).min(),
            last_date: entries.iter().map(Entry::date).max(),
        }
    }
}

impl Display for SignalSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Data Summary:")?;
        writeln!(f, "  Total signals in file:  {}", self.total_signals)?;
        writeln!(f, "  Unique trades:          {}", self.unique_trades)?;
        writeln!(f, "  Unique symbols:         {}", self.unique_symbols)?;

        match (self.first_date, self.last_date) {
            (Some(first), Some(last)) => write!(f, "  Date range:             {} to {}", first, last),
            _ => write!(f, "  Date range:             -"),
        }
    }
}
