use chrono::{DateTime, Duration, Utc};

/// Source of wall-clock timestamps for quiz attempts.
///
/// The countdown itself is driven by ticks, not by this clock; it only stamps
/// when an attempt started and completed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Clock {
    #[default]
    System,
    Pinned(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn pinned(at: DateTime<Utc>) -> Self {
        Self::Pinned(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Pinned(at) => *at,
        }
    }

    /// Whole seconds between `earlier` and now, saturating at zero.
    #[must_use]
    pub fn secs_since(&self, earlier: DateTime<Utc>) -> u64 {
        u64::try_from((self.now() - earlier).num_seconds()).unwrap_or(0)
    }
}

/// Unix seconds used for pinned test clocks (2023-11-14T22:13:20Z).
pub const PINNED_TEST_SECS: i64 = 1_700_000_000;

#[must_use]
pub fn pinned_now() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + Duration::seconds(PINNED_TEST_SECS)
}

#[must_use]
pub fn pinned_clock() -> Clock {
    Clock::pinned(pinned_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pinned_clock_never_moves() {
        let clock = pinned_clock();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().timestamp(), PINNED_TEST_SECS);
    }

    #[test]
    fn secs_since_saturates_for_future_instants() {
        let clock = pinned_clock();
        assert_eq!(clock.secs_since(pinned_now() - Duration::seconds(42)), 42);
        assert_eq!(clock.secs_since(pinned_now() + Duration::seconds(5)), 0);
    }

    #[test]
    fn system_clock_is_the_default() {
        assert_eq!(Clock::default(), Clock::system());
    }
}
