use crate::models::{
    candle::Candle, data_type::DataType, entry::Entry, exit_rule::ExitRule, exit_type::ExitType,
    trade_result::TradeResult, trade_result_builder::TradeResultBuilder,
    trade_status::TradeStatus,
};
use anyhow::{anyhow, Result};

/// # Exit scan
///
/// Replays `candles` (chronological) from the entry timestamp and reports
/// which threshold is touched first.
///
/// - The first candle at or after the entry is the entry candle: its open is
///   the entry price and it is never an exit candle.
/// - Stop-loss is checked before take-profit on every candle, so a candle
///   touching both exits at the stop.
/// - Exits fill at the threshold price and report exactly the configured
///   percentage.
/// - Without a touch the result is `OPEN` / `STILL_OPEN` at the last close.
///
/// Returns `Err` when the entry price is not a positive finite number.
pub fn scan_exit(
    entry: &Entry,
    candles: &[Candle],
    rule: &ExitRule,
    data_type: DataType,
) -> Result<TradeResult> {
    let mut after_entry = candles.iter().filter(|c| c.timestamp >= entry.timestamp);

    let entry_candle = match after_entry.next() {
        Some(candle) => candle,
        None => return Ok(TradeResult::no_data_after_entry(entry, data_type)),
    };

    let entry_price = entry_candle.open;
    if !(entry_price.is_finite() && entry_price > 0.0) {
        return Err(anyhow!(
            "Invalid entry price {} for {} at {}",
            entry_price,
            entry.symbol,
            entry_candle.timestamp
        ));
    }

    let sl_price = rule.stop_loss_price(entry_price);
    let tp_price = rule.take_profit_price(entry_price);

    let builder = TradeResultBuilder::new()
        .entry(entry)
        .entry_price(entry_price)
        .data_type(data_type);

    let mut last: Option<&Candle> = None;

    for candle in after_entry {
        if candle.low <= sl_price {
            return builder
                .status(TradeStatus::Completed)
                .exit_price(sl_price)
                .exit_timestamp(candle.timestamp)
                .exit_type(ExitType::StopLoss)
                .pnl_pct(-rule.stop_loss_pct)
                .build();
        }

        if candle.high >= tp_price {
            return builder
                .status(TradeStatus::Completed)
                .exit_price(tp_price)
                .exit_timestamp(candle.timestamp)
                .exit_type(ExitType::TakeProfit)
                .pnl_pct(rule.take_profit_pct)
                .build();
        }

        last = Some(candle);
    }

    // Only the entry candle exists, there is nothing to evaluate an exit on.
    let last = match last {
        Some(candle) => candle,
        None => return Ok(TradeResult::no_data_after_entry(entry, data_type)),
    };

    let pnl_pct = (last.close - entry_price) / entry_price * 100.0;

    builder
        .status(TradeStatus::Open)
        .exit_price(last.close)
        .exit_timestamp(last.timestamp)
        .exit_type(ExitType::StillOpen)
        .pnl_pct(pnl_pct)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    /// Consecutive 5 minute candles starting at 09:15 from (open, high, low, close).
    fn series(bars: &[(f64, f64, f64, f64)]) -> Vec<Candle> {
        bars.iter()
            .enumerate()
            .map(|(i, &(o, h, l, c))| {
                let minutes = 15 + 5 * i as u32;
                Candle::new(at(9 + minutes / 60, minutes % 60), o, h, l, c)
            })
            .collect()
    }

    fn entry() -> Entry {
        Entry::new("INFY", at(9, 15))
    }

    fn scan(candles: &[Candle]) -> TradeResult {
        scan_exit(&entry(), candles, &ExitRule::default(), DataType::Minute5).unwrap()
    }

    #[test]
    fn stop_loss_on_second_candle() {
        let candles = series(&[
            (100.0, 101.0, 99.0, 100.5),
            (101.0, 102.0, 96.0, 96.5),
            (96.0, 97.0, 95.0, 95.5),
        ]);

        let res = scan(&candles);

        assert_eq!(res.status, TradeStatus::Completed);
        assert_eq!(res.exit_type, ExitType::StopLoss);
        assert_eq!(res.entry_price, Some(100.0));
        assert!((res.exit_price.unwrap() - 97.0).abs() < 1e-9);
        assert_eq!(res.exit_timestamp, Some(at(9, 20)));
        assert_eq!(res.pnl_pct, -3.0);
    }

    #[test]
    fn take_profit_on_second_candle() {
        let candles = series(&[
            (100.0, 101.0, 99.0, 100.5),
            (101.0, 108.0, 98.0, 107.0),
        ]);

        let res = scan(&candles);

        assert_eq!(res.exit_type, ExitType::TakeProfit);
        assert!((res.exit_price.unwrap() - 107.5).abs() < 1e-9);
        assert_eq!(res.pnl_pct, 7.5);
    }

    #[test]
    fn stop_loss_wins_when_both_touch_in_one_candle() {
        let candles = series(&[
            (100.0, 100.0, 100.0, 100.0),
            (100.0, 110.0, 90.0, 100.0),
        ]);

        let res = scan(&candles);

        assert_eq!(res.exit_type, ExitType::StopLoss);
        assert_eq!(res.pnl_pct, -3.0);
    }

    #[test]
    fn first_breach_decides_even_if_other_side_follows() {
        let candles = series(&[
            (100.0, 100.0, 100.0, 100.0),
            (100.0, 104.0, 99.0, 103.0),
            (103.0, 107.6, 102.0, 107.0),
            (107.0, 107.0, 90.0, 91.0),
        ]);

        let res = scan(&candles);

        assert_eq!(res.exit_type, ExitType::TakeProfit);
        assert_eq!(res.exit_timestamp, Some(at(9, 25)));
    }

    #[test]
    fn thresholds_are_inclusive() {
        let rule = ExitRule::new(5.0, 10.0).unwrap();
        let sl = rule.stop_loss_price(100.0);
        let candles = series(&[(100.0, 100.0, 100.0, 100.0), (100.0, 100.0, sl, 100.0)]);

        let res = scan_exit(&entry(), &candles, &rule, DataType::Minute5).unwrap();

        assert_eq!(res.exit_type, ExitType::StopLoss);
        assert_eq!(res.pnl_pct, -5.0);
    }

    #[test]
    fn entry_candle_is_never_an_exit() {
        let candles = series(&[
            (100.0, 200.0, 1.0, 100.0),
            (100.0, 101.0, 99.0, 102.0),
        ]);

        let res = scan(&candles);

        assert_eq!(res.status, TradeStatus::Open);
        assert_eq!(res.exit_type, ExitType::StillOpen);
    }

    #[test]
    fn still_open_uses_last_close() {
        let candles = series(&[
            (100.0, 101.0, 99.0, 100.5),
            (100.5, 102.0, 99.5, 101.0),
            (101.0, 104.0, 100.0, 102.5),
        ]);

        let res = scan(&candles);

        assert_eq!(res.status, TradeStatus::Open);
        assert_eq!(res.exit_price, Some(102.5));
        assert_eq!(res.exit_timestamp, Some(at(9, 25)));
        assert!((res.pnl_pct - 2.5).abs() < 1e-9);
    }

    #[test]
    fn candles_before_entry_are_ignored() {
        let candles = series(&[
            (80.0, 80.0, 10.0, 80.0),
            (100.0, 101.0, 99.0, 100.0),
            (100.0, 108.0, 99.0, 107.0),
        ]);
        let entry = Entry::new("INFY", at(9, 17));

        let res = scan_exit(&entry, &candles, &ExitRule::default(), DataType::Minute5).unwrap();

        assert_eq!(res.entry_price, Some(100.0));
        assert_eq!(res.exit_type, ExitType::TakeProfit);
    }

    #[test]
    fn nothing_after_entry() {
        let candles = series(&[(100.0, 101.0, 99.0, 100.0)]);
        let late = Entry::new("INFY", at(15, 0));

        let res = scan_exit(&late, &candles, &ExitRule::default(), DataType::Daily).unwrap();

        assert_eq!(res.status, TradeStatus::NoDataAfterEntry);
        assert_eq!(res.data_type, DataType::Daily);
        assert!(res.entry_price.is_none() && res.exit_price.is_none());
    }

    #[test]
    fn lone_entry_candle_has_no_exit_data() {
        let candles = series(&[(50.0, 51.0, 49.0, 50.5)]);

        let res = scan(&candles);

        assert_eq!(res.status, TradeStatus::NoDataAfterEntry);
        assert!(res.entry_price.is_none());
    }

    #[test]
    fn non_positive_entry_price_is_an_error() {
        let zero = series(&[(0.0, 1.0, 0.0, 1.0), (1.0, 2.0, 0.5, 1.5)]);
        let nan = series(&[(f64::NAN, 1.0, 0.0, 1.0), (1.0, 2.0, 0.5, 1.5)]);

        assert!(scan_exit(&entry(), &zero, &ExitRule::default(), DataType::Minute5).is_err());
        assert!(scan_exit(&entry(), &nan, &ExitRule::default(), DataType::Minute5).is_err());
    }
}
