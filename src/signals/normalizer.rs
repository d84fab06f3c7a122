use crate::models::{entry::Entry, signal::Signal};
use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use csv::{ReaderBuilder, Trim};
use indexmap::IndexMap;
use std::io::Read;

/// Day-month-year with a 12 hour clock, e.g. `05-03-2024 09:20 am`.
pub const SIGNAL_DATETIME_FORMAT: &str = "%d-%m-%Y %I:%M %p";

const REQUIRED_COLUMNS: [&str; 2] = ["date", "symbol"];

/// Reads every row of a signal file. Any structural problem with the file is
/// fatal for the whole run.
pub fn read_signals<R: Read>(reader: R) -> Result<Vec<Signal>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers().context("Unable to read signal file header.")?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(anyhow!("Signal file is missing required column '{}'.", column));
        }
    }

    rdr.deserialize::<Signal>()
        .enumerate()
        .map(|(i, row)| row.with_context(|| format!("Unable to read signal row {}.", i + 1)))
        .collect()
}

pub fn parse_signal_datetime(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), SIGNAL_DATETIME_FORMAT).with_context(|| {
        format!(
            "Unable to parse '{}' as a signal timestamp (expected DD-MM-YYYY HH:MM am/pm).",
            text
        )
    })
}

/// Collapses signals to one entry per (symbol, day), keeping the earliest
/// timestamp, ordered by timestamp. Every row is parsed before any grouping
/// happens so a single malformed date rejects the whole input.
pub fn normalize(signals: &[Signal]) -> Result<Vec<Entry>> {
    let parsed = signals
        .iter()
        .enumerate()
        .map(|(i, signal)| {
            parse_signal_datetime(&signal.date)
                .map(|ts| (signal.symbol.as_str(), ts))
                .with_context(|| format!("Invalid date in signal row {}.", i + 1))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut earliest: IndexMap<(&str, NaiveDate), NaiveDateTime> = IndexMap::new();

    for (symbol, ts) in parsed {
        earliest
            .entry((symbol, ts.date()))
            .and_modify(|current| {
                if ts < *current {
                    *current = ts;
                }
            })
            .or_insert(ts);
    }

    let mut entries: Vec<Entry> = earliest
        .into_iter()
        .map(|((symbol, _), ts)| Entry::new(symbol, ts))
        .collect();

    entries.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn signal(date: &str, symbol: &str) -> Signal {
        Signal {
            date: date.to_string(),
            symbol: symbol.to_string(),
            marketcapname: None,
            sector: None,
        }
    }

    fn ts(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn parses_meridiem_in_either_case() {
        assert_eq!(parse_signal_datetime("05-03-2024 09:20 am").unwrap(), ts(5, 9, 20));
        assert_eq!(parse_signal_datetime("05-03-2024 02:45 PM").unwrap(), ts(5, 14, 45));
        assert_eq!(parse_signal_datetime("05-03-2024 12:05 pm").unwrap(), ts(5, 12, 5));
        assert_eq!(parse_signal_datetime("05-03-2024 12:05 am").unwrap(), ts(5, 0, 5));
    }

    #[test]
    fn rejects_other_formats() {
        assert!(parse_signal_datetime("2024-03-05 09:20").is_err());
        assert!(parse_signal_datetime("05-03-2024 13:20 pm").is_err());
        assert!(parse_signal_datetime("").is_err());
    }

    #[test]
    fn keeps_earliest_signal_per_symbol_and_day() {
        let signals = vec![
            signal("05-03-2024 11:00 am", "INFY"),
            signal("05-03-2024 09:30 am", "INFY"),
            signal("05-03-2024 10:15 am", "TCS"),
            signal("06-03-2024 09:20 am", "INFY"),
            signal("05-03-2024 01:00 pm", "INFY"),
        ];

        let entries = normalize(&signals).unwrap();

        assert_eq!(
            entries,
            vec![
                Entry::new("INFY", ts(5, 9, 30)),
                Entry::new("TCS", ts(5, 10, 15)),
                Entry::new("INFY", ts(6, 9, 20)),
            ]
        );
    }

    #[test]
    fn entries_are_unique_per_group_and_sorted() {
        let signals: Vec<Signal> = (0..40)
            .map(|i| {
                let day = 1 + (i * 7) % 5;
                let hour = 1 + (i * 5) % 11;
                let symbol = ["A", "B", "C"][(i % 3) as usize];
                signal(&format!("{:02}-03-2024 {:02}:{:02} am", day, hour, i % 60), symbol)
            })
            .collect();

        let entries = normalize(&signals).unwrap();

        let keys: HashSet<(String, NaiveDate)> =
            entries.iter().map(|e| (e.symbol.clone(), e.date())).collect();
        assert_eq!(keys.len(), entries.len());

        for e in &entries {
            let min = signals
                .iter()
                .filter(|s| s.symbol == e.symbol)
                .map(|s| parse_signal_datetime(&s.date).unwrap())
                .filter(|t| t.date() == e.date())
                .min()
                .unwrap();
            assert_eq!(e.timestamp, min);
        }

        assert!(entries.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    }

    #[test]
    fn one_bad_row_rejects_everything() {
        let signals = vec![
            signal("05-03-2024 09:30 am", "INFY"),
            signal("not a date", "TCS"),
        ];

        let err = normalize(&signals).unwrap_err();
        assert!(format!("{:#}", err).contains("row 2"));
    }

    #[test]
    fn reads_optional_columns_and_ignores_extra_ones() {
        let data = "date,symbol,marketcapname,sector,notes\n\
                    05-03-2024 09:30 am,INFY,Largecap,IT,x\n\
                    05-03-2024 10:00 am,TCS,,,y\n";

        let signals = read_signals(data.as_bytes()).unwrap();

        assert_eq!(signals.len(), 2);
        assert_eq!(signals[0].sector.as_deref(), Some("IT"));
        assert_eq!(signals[1].symbol, "TCS");
        assert!(signals[1].marketcapname.is_none());
    }

    #[test]
    fn reads_file_without_optional_columns() {
        let data = "symbol,date\nINFY,05-03-2024 09:30 am\n";

        let signals = read_signals(data.as_bytes()).unwrap();

        assert_eq!(signals, vec![signal("05-03-2024 09:30 am", "INFY")]);
    }

    #[test]
    fn missing_required_column_is_fatal() {
        let data = "timestamp,symbol\n05-03-2024 09:30 am,INFY\n";

        assert!(read_signals(data.as_bytes()).is_err());
    }
}
