use std::time::Duration;
use tokio::time::sleep;
use tracing::debug;

pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(500);

/// Cooperative pacing of provider requests: a fixed pause after every
/// `batch_size` processed entries. It does not react to provider errors.
#[derive(Debug, Clone)]
pub struct Throttle {
    batch_size: usize,
    delay: Duration,
    processed: usize,
    pauses: usize,
}

impl Throttle {
    pub fn new(batch_size: usize, delay: Duration) -> Self {
        Self {
            batch_size,
            delay,
            processed: 0,
            pauses: 0,
        }
    }

    /// Marks one entry as processed, sleeping when a batch is complete.
    pub async fn record(&mut self) {
        self.processed += 1;

        if self.batch_size == 0 || self.delay.is_zero() {
            return;
        }

        if self.processed % self.batch_size == 0 {
            debug!("Processed {} entries, pausing {:?}", self.processed, self.delay);
            self.pauses += 1;
            sleep(self.delay).await;
        }
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn pauses(&self) -> usize {
        self.pauses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn pauses_after_each_full_batch() {
        let mut throttle = Throttle::new(3, Duration::from_millis(1));

        for _ in 0..7 {
            throttle.record().await;
        }

        assert_eq!(throttle.processed(), 7);
        assert_eq!(throttle.pauses(), 2);
    }

    #[tokio::test]
    async fn zero_delay_never_pauses() {
        let mut throttle = Throttle::new(1, Duration::ZERO);

        for _ in 0..5 {
            throttle.record().await;
        }

        assert_eq!(throttle.pauses(), 0);
    }
}
