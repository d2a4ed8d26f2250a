use std::time::Duration;

/// Fixed-interval clock. Elapsed time accumulates and whole intervals are
/// handed out as due ticks; the remainder carries over to the next call.
#[derive(Clone, Debug)]
pub struct Ticker {
    interval: Duration,
    carry: Duration,
    fired: u64,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            carry: Duration::ZERO,
            fired: 0,
        }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Total ticks handed out so far.
    pub fn fired(&self) -> u64 {
        self.fired
    }

    /// Add `elapsed` and return how many ticks are now due.
    pub fn due(&mut self, elapsed: Duration) -> u32 {
        if self.interval.is_zero() {
            return 0;
        }
        self.carry += elapsed;
        let n = u32::try_from(self.carry.as_nanos() / self.interval.as_nanos()).unwrap_or(u32::MAX);
        self.carry -= self.interval * n;
        self.fired += u64::from(n);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn carries_remainder() {
        let mut t = Ticker::from_millis(50);
        assert_eq!(t.due(Duration::from_millis(49)), 0);
        assert_eq!(t.due(Duration::from_millis(1)), 1);
        assert_eq!(t.due(Duration::from_millis(175)), 3);
        assert_eq!(t.due(Duration::from_millis(25)), 1);
        assert_eq!(t.fired(), 5);
    }

    #[test]
    fn zero_interval_never_fires() {
        let mut t = Ticker::new(Duration::ZERO);
        assert_eq!(t.due(Duration::from_secs(10)), 0);
    }

    proptest! {
        #[test]
        fn total_matches_elapsed(steps in proptest::collection::vec(0u64..500, 1..50)) {
            let mut t = Ticker::from_millis(50);
            let mut total = 0u64;
            for ms in &steps {
                total += u64::from(t.due(Duration::from_millis(*ms)));
            }
            let elapsed: u64 = steps.iter().sum();
            prop_assert_eq!(total, elapsed / 50);
            prop_assert_eq!(t.fired(), total);
        }
    }
}
