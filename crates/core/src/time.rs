use chrono::{DateTime, Duration, Utc};

/// Time source for view-models with timed effects (feedback fade-out,
/// success highlight, completion notice). Tests pin it and step it forward.
#[derive(Debug, Clone, Copy, Default)]
pub enum Clock {
    #[default]
    System,
    Fixed(DateTime<Utc>),
}

impl Clock {
    #[must_use]
    pub fn system() -> Self {
        Self::System
    }

    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Fixed(at)
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::System => Utc::now(),
            Clock::Fixed(t) => *t,
        }
    }

    /// Step a fixed clock forward. No effect on the system clock.
    pub fn advance(&mut self, delta: std::time::Duration) {
        if let Clock::Fixed(t) = self {
            *t += Duration::from_std(delta).unwrap_or_else(|_| Duration::zero());
        }
    }
}

/// 2023-11-14T22:13:20Z, a deterministic instant for tests.
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_advances() {
        let mut clock = fixed_clock();
        clock.advance(std::time::Duration::from_secs(5));
        assert_eq!(clock.now(), fixed_now() + Duration::seconds(5));
    }

    #[test]
    fn system_clock_ignores_advance() {
        let mut clock = Clock::system();
        clock.advance(std::time::Duration::from_secs(3600));
        assert!(matches!(clock, Clock::System));
    }
}
