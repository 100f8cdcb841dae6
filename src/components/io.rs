use super::LogicValue;
use std::time::{Duration, Instant};

/// Lowest and highest frequency a [Clock] can run at.
pub const CLOCK_FREQUENCY_RANGE: (u32, u32) = (1, 1000);

/// State of a [ClockGenerator](super::ComponentKind::ClockGenerator), a free running square wave
/// driven by wall clock time.
///
/// The generator's output pin stays [Undefined](LogicValue::Undefined) until the first toggle.
///
/// # Example
/// ```
/// # use logisim_core::Clock;
/// use std::time::{Duration, Instant};
///
/// let start = Instant::now();
/// let mut clock = Clock::new(10, start);
///
/// // Half a period at 10Hz is 50ms.
/// assert_eq!(clock.update(start + Duration::from_millis(20)), false);
/// assert_eq!(clock.update(start + Duration::from_millis(50)), true);
/// assert_eq!(clock.is_high(), true);
/// ```
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Clock {
    high: bool,
    frequency_hz: u32,
    last_toggle: Instant,
}
impl Clock {
    /// Returns a low [Clock] whose first half period starts at `now`.
    ///
    /// `frequency_hz` is clamped to [CLOCK_FREQUENCY_RANGE].
    pub fn new(frequency_hz: u32, now: Instant) -> Self {
        let mut clock = Self {
            high: false,
            frequency_hz: 1,
            last_toggle: now,
        };
        clock.set_frequency(frequency_hz);
        clock
    }

    pub fn is_high(&self) -> bool {
        self.high
    }

    pub fn frequency(&self) -> u32 {
        self.frequency_hz
    }

    /// Sets the frequency, clamped to [CLOCK_FREQUENCY_RANGE].
    pub fn set_frequency(&mut self, frequency_hz: u32) {
        let (min, max) = CLOCK_FREQUENCY_RANGE;
        self.frequency_hz = frequency_hz.max(min).min(max);
    }

    pub fn half_period(&self) -> Duration {
        Duration::from_micros(500_000 / self.frequency_hz as u64)
    }

    /// Toggles the clock if at least half a period has passed since the last toggle.
    /// Returns true if it toggled.
    pub fn update(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_toggle) < self.half_period() {
            return false;
        }
        self.last_toggle = now;
        self.toggle();
        true
    }

    /// Flips the clock level regardless of time.
    pub fn toggle(&mut self) {
        self.high = !self.high
    }

    /// Returns the level to drive onto the output pin.
    pub fn value(&self) -> LogicValue {
        LogicValue::from_bool(self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_clamp() {
        let now = Instant::now();
        assert_eq!(Clock::new(0, now).frequency(), 1);
        assert_eq!(Clock::new(5000, now).frequency(), 1000);
        assert_eq!(
            Clock::new(1, now).half_period(),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_update_toggles_every_half_period() {
        let start = Instant::now();
        let mut clock = Clock::new(1, start);
        let at = |ms| start + Duration::from_millis(ms);

        assert!(!clock.update(at(499)));
        assert!(clock.update(at(500)));
        assert!(clock.is_high());
        assert!(!clock.update(at(900)));
        assert!(clock.update(at(1000)));
        assert!(!clock.is_high());
        // Earlier instants never toggle.
        assert!(!clock.update(start));
    }
}
