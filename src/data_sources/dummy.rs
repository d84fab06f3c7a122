use crate::{
    data_sources::candle_source::CandleSource,
    models::{candle::Candle, interval::Interval},
};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use rand::{rngs::StdRng, Rng, SeedableRng};

const SESSION_OPEN: (u32, u32) = (9, 15);
const BARS_PER_SESSION: u32 = 75;
const BAR_MINUTES: i64 = 5;
const MAX_STEP: f64 = 0.004;

/// Offline candle generator producing a seeded random walk over weekday
/// sessions. The same ticker and window always yield the same candles.
#[derive(Debug, Clone)]
pub struct DummySource {
    seed: u64,
}

impl DummySource {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    fn rng_for(&self, ticker: &str, start: NaiveDate) -> StdRng {
        let ticker_seed = ticker
            .bytes()
            .fold(0xcbf29ce484222325_u64, |acc, b| {
                (acc ^ u64::from(b)).wrapping_mul(0x100000001b3)
            });
        let day_seed = start.num_days_from_ce() as u64;

        StdRng::seed_from_u64(self.seed ^ ticker_seed ^ day_seed.rotate_left(32))
    }

    fn session_start(date: NaiveDate) -> NaiveDateTime {
        let open = NaiveTime::from_hms_opt(SESSION_OPEN.0, SESSION_OPEN.1, 0).unwrap_or(NaiveTime::MIN);
        date.and_time(open)
    }

    pub fn intraday(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Vec<Candle> {
        let mut rng = self.rng_for(ticker, start);
        let mut price: f64 = rng.gen_range(50.0..2000.0);
        let mut candles = vec![];

        for date in start.iter_days().take_while(|d| *d < end) {
            if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
                continue;
            }

            let session = Self::session_start(date);

            for bar in 0..BARS_PER_SESSION {
                let open = price;
                let close = open * (1.0 + rng.gen_range(-MAX_STEP..MAX_STEP));
                let high = open.max(close) * (1.0 + rng.gen_range(0.0..MAX_STEP / 2.0));
                let low = open.min(close) * (1.0 - rng.gen_range(0.0..MAX_STEP / 2.0));

                candles.push(Candle {
                    timestamp: session + Duration::minutes(BAR_MINUTES * i64::from(bar)),
                    open,
                    high,
                    low,
                    close,
                    volume: rng.gen_range(1_000.0..50_000.0),
                });

                price = close;
            }
        }

        candles
    }

    /// Daily bars aggregated from the intraday walk so both resolutions agree.
    pub fn daily(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Vec<Candle> {
        let mut days: Vec<Candle> = vec![];

        for bar in self.intraday(ticker, start, end) {
            match days.last_mut() {
                Some(day) if day.timestamp.date() == bar.timestamp.date() => {
                    day.high = day.high.max(bar.high);
                    day.low = day.low.min(bar.low);
                    day.close = bar.close;
                    day.volume += bar.volume;
                }
                _ => days.push(Candle {
                    timestamp: Self::session_start(bar.timestamp.date()),
                    ..bar
                }),
            }
        }

        days
    }
}

#[async_trait]
impl CandleSource for DummySource {
    async fn fetch(
        &self,
        ticker: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<Candle>> {
        let candles = match interval {
            Interval::Minute5 => self.intraday(ticker, start, end),
            Interval::Day1 => self.daily(ticker, start, end),
        };

        Ok(candles)
    }
}
