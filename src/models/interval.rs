use std::fmt::{Display, Formatter};

/// Bar resolution requested from a candle source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interval {
    Minute5,
    Day1,
}

impl Interval {
    /// Order in which resolutions are tried, finest first.
    pub fn fallback_order() -> [Interval; 2] {
        [Interval::Minute5, Interval::Day1]
    }

    pub fn as_provider_str(&self) -> &'static str {
        match self {
            Interval::Minute5 => "5m",
            Interval::Day1 => "1d",
        }
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_provider_str())
    }
}
