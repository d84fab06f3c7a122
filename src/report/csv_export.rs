use crate::models::trade_result::TradeResult;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use csv::Writer;
use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

pub fn results_file_name(generated_at: NaiveDateTime) -> String {
    format!("backtest_results_{}.csv", generated_at.format("%Y%m%d_%H%M%S"))
}

/// Writes one CSV row per result, header included.
pub fn write_results<W: Write>(writer: W, results: &[TradeResult]) -> Result<()> {
    let mut wtr = Writer::from_writer(writer);

    for res in results {
        wtr.serialize(res.to_record())?;
    }

    // An empty run still gets a header row.
    if results.is_empty() {
        wtr.write_record([
            "symbol",
            "entry_date",
            "entry_time",
            "status",
            "entry_price",
            "exit_price",
            "exit_datetime",
            "exit_type",
            "pnl_pct",
            "data_type",
        ])?;
    }

    wtr.flush()?;

    Ok(())
}

pub fn export_results(
    dir: &Path,
    generated_at: NaiveDateTime,
    results: &[TradeResult],
) -> Result<PathBuf> {
    let path = dir.join(results_file_name(generated_at));
    let file = File::create(&path)
        .with_context(|| format!("Unable to create results file {}.", path.display()))?;

    write_results(file, results)?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        data_type::DataType, entry::Entry, exit_type::ExitType,
        trade_result_builder::TradeResultBuilder, trade_status::TradeStatus,
    };
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn file_name_embeds_timestamp() {
        assert_eq!(
            results_file_name(ts(14, 7)),
            "backtest_results_20240305_140700.csv"
        );
    }

    #[test]
    fn writes_header_and_rows() {
        let entry = Entry::new("INFY", ts(9, 20));
        let completed = TradeResultBuilder::new()
            .entry(&entry)
            .status(TradeStatus::Completed)
            .entry_price(1523.456)
            .exit_price(1523.456 * 0.97)
            .exit_timestamp(ts(11, 5))
            .exit_type(ExitType::StopLoss)
            .pnl_pct(-3.0)
            .data_type(DataType::Minute5)
            .build()
            .unwrap();
        let results = vec![completed, TradeResult::no_data(&Entry::new("TCS", ts(10, 0)))];

        let mut buf = vec![];
        write_results(&mut buf, &results).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "symbol,entry_date,entry_time,status,entry_price,exit_price,exit_datetime,exit_type,pnl_pct,data_type"
        );
        assert_eq!(
            lines[1],
            "INFY,2024-03-05,09:20,COMPLETED,1523.46,1477.75,2024-03-05 11:05:00,STOP_LOSS,-3.0,5min"
        );
        assert_eq!(lines[2], "TCS,2024-03-05,10:00,NO_DATA,,,,NO_DATA,0.0,none");
    }

    #[test]
    fn empty_results_still_have_header() {
        let mut buf = vec![];
        write_results(&mut buf, &[]).unwrap();

        assert!(String::from_utf8(buf).unwrap().starts_with("symbol,entry_date"));
    }
}
