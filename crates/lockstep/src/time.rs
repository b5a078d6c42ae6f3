use std::time::Instant;

/// A trait for time sources that return a monotonic timestamp in
/// milliseconds.
///
/// This abstraction allows you to plug in a real monotonic timer or a mocked
/// time source in tests.
///
/// # Example
///
/// ```
/// use lockstep::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource {
    /// Returns the current time in milliseconds since the source's origin.
    fn current_millis(&self) -> u64;
}

impl<T: TimeSource> TimeSource for &T {
    fn current_millis(&self) -> u64 {
        (**self).current_millis()
    }
}

/// A monotonic time source that returns elapsed time since construction.
///
/// This avoids wall-clock adjustments (e.g., NTP or daylight savings
/// changes): the clock captures `Instant::now()` at construction and reports
/// the milliseconds elapsed since then. Time never goes backward, even if
/// the system clock is adjusted externally.
///
/// # Example
///
/// ```
/// use lockstep::{MonotonicClock, TimeSource};
///
/// let clock = MonotonicClock::default();
/// let a = clock.current_millis();
/// let b = clock.current_millis();
/// assert!(b >= a);
/// ```
#[derive(Clone, Debug)]
pub struct MonotonicClock {
    start: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl MonotonicClock {
    /// Constructs a monotonic clock anchored at the moment of construction
    /// (t = 0).
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl TimeSource for MonotonicClock {
    fn current_millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
