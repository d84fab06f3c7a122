use anyhow::{anyhow, Result};

pub const DEFAULT_STOP_LOSS_PCT: f64 = 3.0;
pub const DEFAULT_TAKE_PROFIT_PCT: f64 = 7.5;
pub const MAX_STOP_LOSS_PCT: f64 = 20.0;
pub const MAX_TAKE_PROFIT_PCT: f64 = 50.0;

/// Fixed-risk exit thresholds, expressed as percentages of the entry price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitRule {
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
}

impl Default for ExitRule {
    fn default() -> Self {
        Self {
            stop_loss_pct: DEFAULT_STOP_LOSS_PCT,
            take_profit_pct: DEFAULT_TAKE_PROFIT_PCT,
        }
    }
}

impl ExitRule {
    pub fn new(stop_loss_pct: f64, take_profit_pct: f64) -> Result<Self> {
        let rule = Self {
            stop_loss_pct,
            take_profit_pct,
        };
        rule.validate()?;

        Ok(rule)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.stop_loss_pct > 0.0 && self.stop_loss_pct <= MAX_STOP_LOSS_PCT) {
            return Err(anyhow!(
                "Stop loss must be in (0, {}], got {}.",
                MAX_STOP_LOSS_PCT,
                self.stop_loss_pct
            ));
        }

        if !(self.take_profit_pct > 0.0 && self.take_profit_pct <= MAX_TAKE_PROFIT_PCT) {
            return Err(anyhow!(
                "Take profit must be in (0, {}], got {}.",
                MAX_TAKE_PROFIT_PCT,
                self.take_profit_pct
            ));
        }

        Ok(())
    }

    pub fn stop_loss_price(&self, entry_price: f64) -> f64 {
        entry_price * (1.0 - self.stop_loss_pct / 100.0)
    }

    pub fn take_profit_price(&self, entry_price: f64) -> f64 {
        entry_price * (1.0 + self.take_profit_pct / 100.0)
    }
}
