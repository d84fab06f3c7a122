use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TradeStatus {
    Completed,
    /// Neither threshold was touched inside the fetched window. This is a
    /// truncation of the data, not a live position.
    Open,
    NoData,
    NoDataAfterEntry,
    Error,
}

impl Display for TradeStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TradeStatus::Completed => "COMPLETED",
            TradeStatus::Open => "OPEN",
            TradeStatus::NoData => "NO_DATA",
            TradeStatus::NoDataAfterEntry => "NO_DATA_AFTER_ENTRY",
            TradeStatus::Error => "ERROR",
        };

        write!(f, "{}", s)
    }
}
