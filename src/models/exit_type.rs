use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExitType {
    StopLoss,
    TakeProfit,
    StillOpen,
    NoData,
    Error(String),
}

impl ExitType {
    /// Bucket name used when counting exit types, so that every error lands
    /// in the same bucket regardless of its message.
    pub fn category(&self) -> &'static str {
        match self {
            ExitType::StopLoss => "STOP_LOSS",
            ExitType::TakeProfit => "TAKE_PROFIT",
            ExitType::StillOpen => "STILL_OPEN",
            ExitType::NoData => "NO_DATA",
            ExitType::Error(_) => "ERROR",
        }
    }
}

impl Display for ExitType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ExitType::Error(msg) => write!(f, "ERROR: {}", msg),
            other => write!(f, "{}", other.category()),
        }
    }
}
