use crate::models::interval::Interval;
use std::fmt::{Display, Formatter};

/// Resolution of the data a result was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Minute5,
    Daily,
    None,
    Error,
}

impl From<Interval> for DataType {
    fn from(interval: Interval) -> Self {
        match interval {
            Interval::Minute5 => DataType::Minute5,
            Interval::Day1 => DataType::Daily,
        }
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DataType::Minute5 => "5min",
            DataType::Daily => "daily",
            DataType::None => "none",
            DataType::Error => "error",
        };

        write!(f, "{}", s)
    }
}
