use crate::models::{
    data_type::DataType, exit_type::ExitType, trade_result::TradeResult,
    trade_status::TradeStatus,
};
use indexmap::IndexMap;
use std::fmt::{Display, Formatter};

pub const DAILY_FALLBACK_WARNING: &str = "Some trades used daily data instead of intraday (5min). \
     Results may be less accurate for those trades.";

/// Aggregate view of a finished run. P&L figures only cover `COMPLETED`
/// trades; every other outcome is surfaced through the counts.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestSummary {
    pub total_results: usize,
    pub completed: usize,
    pub take_profit_hits: usize,
    pub stop_loss_hits: usize,
    pub still_open: usize,
    pub win_rate: Option<f64>,
    pub total_pnl: f64,
    pub avg_pnl: Option<f64>,
    pub by_status: IndexMap<TradeStatus, usize>,
    pub by_exit_type: IndexMap<&'static str, usize>,
    pub by_data_type: IndexMap<DataType, usize>,
}

impl BacktestSummary {
    pub fn from_results(results: &[TradeResult]) -> Self {
        let mut by_status: IndexMap<TradeStatus, usize> = [
            TradeStatus::Completed,
            TradeStatus::Open,
            TradeStatus::NoData,
            TradeStatus::NoDataAfterEntry,
            TradeStatus::Error,
        ]
        .into_iter()
        .map(|s| (s, 0))
        .collect();

        let mut by_exit_type: IndexMap<&'static str, usize> = [
            ExitType::TakeProfit,
            ExitType::StopLoss,
            ExitType::StillOpen,
            ExitType::NoData,
            ExitType::Error(String::new()),
        ]
        .iter()
        .map(|e| (e.category(), 0))
        .collect();

        let mut by_data_type: IndexMap<DataType, usize> = [
            DataType::Minute5,
            DataType::Daily,
            DataType::None,
            DataType::Error,
        ]
        .into_iter()
        .map(|d| (d, 0))
        .collect();

        for res in results {
            *by_status.entry(res.status).or_insert(0) += 1;
            *by_exit_type.entry(res.exit_type.category()).or_insert(0) += 1;
            *by_data_type.entry(res.data_type).or_insert(0) += 1;
        }

        let completed: Vec<&TradeResult> = results.iter().filter(|r| r.is_completed()).collect();
        let take_profit_hits = completed
            .iter()
            .filter(|r| r.exit_type == ExitType::TakeProfit)
            .count();
        let stop_loss_hits = completed
            .iter()
            .filter(|r| r.exit_type == ExitType::StopLoss)
            .count();
        let total_pnl: f64 = completed.iter().map(|r| r.pnl_pct).sum();

        let (win_rate, avg_pnl) = if completed.is_empty() {
            (None, None)
        } else {
            let n = completed.len() as f64;
            (Some(take_profit_hits as f64 / n * 100.0), Some(total_pnl / n))
        };

        Self {
            total_results: results.len(),
            completed: completed.len(),
            take_profit_hits,
            stop_loss_hits,
            still_open: by_status.get(&TradeStatus::Open).copied().unwrap_or(0),
            win_rate,
            total_pnl,
            avg_pnl,
            by_status,
            by_exit_type,
            by_data_type,
        }
    }

    /// True when any result was computed from daily bars, whose P&L is not
    /// directly comparable with intraday results.
    pub fn used_daily_fallback(&self) -> bool {
        self.by_data_type
            .get(&DataType::Daily)
            .is_some_and(|n| *n > 0)
    }
}

impl Display for BacktestSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Backtest Summary")?;
        writeln!(f, "  Results:                {}", self.total_results)?;
        writeln!(f, "  Completed trades:       {}", self.completed)?;

        match (self.win_rate, self.avg_pnl) {
            (Some(win_rate), Some(avg_pnl)) => {
                writeln!(f, "  Win rate:               {:.1}%", win_rate)?;
                writeln!(f, "  Total P&L:              {:.2}%", self.total_pnl)?;
                writeln!(f, "  Avg P&L per trade:      {:.2}%", avg_pnl)?;
            }
            _ => writeln!(f, "  Win rate:               n/a (no completed trades)")?,
        }

        writeln!(f)?;
        writeln!(f, "Trade Breakdown")?;
        writeln!(f, "  Take profit hits:       {}", self.take_profit_hits)?;
        writeln!(f, "  Stop loss hits:         {}", self.stop_loss_hits)?;
        writeln!(f, "  Still open/incomplete:  {}", self.still_open)?;

        writeln!(f)?;
        writeln!(f, "By status")?;
        for (status, n) in &self.by_status {
            writeln!(f, "  {:<22}  {}", status.to_string(), n)?;
        }

        writeln!(f)?;
        writeln!(f, "By exit type")?;
        for (exit_type, n) in &self.by_exit_type {
            writeln!(f, "  {:<22}  {}", exit_type, n)?;
        }

        writeln!(f)?;
        writeln!(f, "Data Quality")?;
        for (data_type, n) in &self.by_data_type {
            writeln!(f, "  {:<22}  {}", data_type.to_string(), n)?;
        }

        if self.used_daily_fallback() {
            writeln!(f)?;
            write!(f, "WARNING: {}", DAILY_FALLBACK_WARNING)?;
        }

        Ok(())
    }
}
