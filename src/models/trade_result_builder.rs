use crate::models::{
    data_type::DataType, entry::Entry, exit_type::ExitType, trade_result::TradeResult,
    trade_status::TradeStatus,
};
use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;

/// Builds priced results (`COMPLETED` and `OPEN`). Unpriced outcomes use the
/// constructors on [`TradeResult`] directly.
#[derive(Debug, Default)]
pub struct TradeResultBuilder {
    pub entry: Option<Entry>,
    pub status: Option<TradeStatus>,
    pub entry_price: Option<f64>,
    pub exit_price: Option<f64>,
    pub exit_timestamp: Option<NaiveDateTime>,
    pub exit_type: Option<ExitType>,
    pub pnl_pct: Option<f64>,
    pub data_type: Option<DataType>,
}

impl TradeResultBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entry(mut self, entry: &Entry) -> Self {
        self.entry = Some(entry.clone());
        self
    }

    pub fn status(mut self, status: TradeStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn entry_price(mut self, entry_price: f64) -> Self {
        self.entry_price = Some(entry_price);
        self
    }

    pub fn exit_price(mut self, exit_price: f64) -> Self {
        self.exit_price = Some(exit_price);
        self
    }

    pub fn exit_timestamp(mut self, exit_timestamp: NaiveDateTime) -> Self {
        self.exit_timestamp = Some(exit_timestamp);
        self
    }

    pub fn exit_type(mut self, exit_type: ExitType) -> Self {
        self.exit_type = Some(exit_type);
        self
    }

    pub fn pnl_pct(mut self, pnl_pct: f64) -> Self {
        self.pnl_pct = Some(pnl_pct);
        self
    }

    pub fn data_type(mut self, data_type: DataType) -> Self {
        self.data_type = Some(data_type);
        self
    }

    pub fn build(self) -> Result<TradeResult> {
        let entry = self
            .entry
            .ok_or(anyhow!("Entry is required to build TradeResult."))?;
        let status = self
            .status
            .ok_or(anyhow!("Status is required to build TradeResult."))?;
        let entry_price = self
            .entry_price
            .ok_or(anyhow!("Entry price is required to build TradeResult."))?;
        let exit_price = self
            .exit_price
            .ok_or(anyhow!("Exit price is required to build TradeResult."))?;
        let exit_timestamp = self
            .exit_timestamp
            .ok_or(anyhow!("Exit timestamp is required to build TradeResult."))?;
        let exit_type = self
            .exit_type
            .ok_or(anyhow!("Exit type is required to build TradeResult."))?;
        let pnl_pct = self
            .pnl_pct
            .ok_or(anyhow!("PnL is required to build TradeResult."))?;
        let data_type = self
            .data_type
            .ok_or(anyhow!("Data type is required to build TradeResult."))?;

        if !matches!(status, TradeStatus::Completed | TradeStatus::Open) {
            return Err(anyhow!("Status {} does not carry prices.", status));
        }

        if !pnl_pct.is_finite() {
            return Err(anyhow!("PnL for {} is not a finite number.", entry.symbol));
        }

        Ok(TradeResult {
            symbol: entry.symbol,
            entry_timestamp: entry.timestamp,
            status,
            entry_price: Some(entry_price),
            exit_price: Some(exit_price),
            exit_timestamp: Some(exit_timestamp),
            exit_type,
            pnl_pct,
            data_type,
        })
    }
}
