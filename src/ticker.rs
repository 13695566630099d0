use std::time::{Duration, Instant};

/// Render/poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Idle seconds before the draft is autosaved
pub const DEFAULT_STALE_SECS: u64 = 300;

/// Seconds between staleness checks
pub const DEFAULT_PROBE_SECS: u64 = 15;

/// Get tick duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Fires at most once per interval
#[derive(Debug, Clone)]
pub struct Probe {
    interval: Duration,
    last: Instant,
}

impl Probe {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    /// True when the interval has elapsed since the last firing
    pub fn due(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        let duration = tick_duration();
        assert_eq!(duration, Duration::from_millis(250));
    }

    #[test]
    fn test_probe_fires_once_per_interval() {
        let start = Instant::now();
        let mut probe = Probe::new(Duration::from_secs(15), start);

        assert!(!probe.due(start + Duration::from_secs(14)));
        assert!(probe.due(start + Duration::from_secs(15)));
        assert!(!probe.due(start + Duration::from_secs(20)));
        assert!(probe.due(start + Duration::from_secs(31)));
    }
}
