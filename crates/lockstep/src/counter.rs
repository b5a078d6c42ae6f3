use core::cell::Cell;
use core::time::Duration;

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{CountStatus, TimeSource};

/// A non-concurrent, paced counting sequence producer.
///
/// Emits the positions `1..=bound` in strictly increasing order, with each
/// position becoming due one pace interval after the previous emission. The
/// counter is lightweight and fast, but **not thread-safe**: the sequence
/// position is single-owner by design.
///
/// Polling is non-blocking. A poll either emits the next position, reports
/// how long to wait until it is due, or reports that the bound was reached.
/// The pace affects latency only: shrinking it (down to [`Duration::ZERO`])
/// never changes the emitted values or their order.
///
/// ## Recommended When
/// - You're in a single-threaded environment (no shared access)
/// - You want to drive the wait strategy yourself (sleep, yield, timer)
///
/// ## See Also
/// - [`CountStream`] for pull-based async consumption
/// - [`produce`] for task/channel delivery with cancellation
///
/// [`CountStream`]: crate::CountStream
/// [`produce`]: crate::produce
pub struct PacedCounter<T>
where
    T: TimeSource,
{
    position: Cell<u64>,
    due: Cell<u64>,
    bound: u64,
    pace_ms: u64,
    time: T,
}

impl<T> PacedCounter<T>
where
    T: TimeSource,
{
    /// Creates a new [`PacedCounter`] at position zero.
    ///
    /// The first value (`1`) becomes due one pace after construction. A
    /// `bound` of zero is a legal, immediately-exhausted counter: it emits
    /// nothing and never schedules a wait.
    ///
    /// # Parameters
    ///
    /// - `bound`: The inclusive upper end of the sequence; `1..=bound` will
    ///   be emitted.
    /// - `pace`: The delay before each emission. Sub-millisecond components
    ///   are truncated, matching the millisecond clock domain.
    /// - `time`: A [`TimeSource`] implementation (e.g., [`MonotonicClock`])
    ///   that determines when positions become due.
    ///
    /// # Example
    /// ```
    /// use core::time::Duration;
    /// use lockstep::{CountStatus, MonotonicClock, PacedCounter};
    ///
    /// let counter = PacedCounter::new(3, Duration::ZERO, MonotonicClock::default());
    /// assert_eq!(counter.poll_next(), CountStatus::Ready { value: 1 });
    /// ```
    ///
    /// [`MonotonicClock`]: crate::MonotonicClock
    pub fn new(bound: u64, pace: Duration, time: T) -> Self {
        let pace_ms = pace.as_millis() as u64;
        // Saturate: an absurd pace pins the due time at the far future
        // instead of wrapping into the past.
        let due = time.current_millis().saturating_add(pace_ms);
        Self {
            position: Cell::new(0),
            due: Cell::new(due),
            bound,
            pace_ms,
            time,
        }
    }

    /// The inclusive upper end of the sequence.
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// How many positions have not been emitted yet.
    pub fn remaining(&self) -> u64 {
        self.bound - self.position.get()
    }

    /// Performs one non-blocking step of the producer state machine.
    ///
    /// # Returns
    /// - [`CountStatus::Ready`]: The next position was emitted and the
    ///   counter advanced; the wait for the following position starts now.
    /// - [`CountStatus::Pending`]: The next position is not due yet; wait
    ///   `yield_for` before polling again.
    /// - [`CountStatus::Done`]: The bound was reached. Terminal: every later
    ///   poll returns `Done` again.
    ///
    /// # Example
    /// ```
    /// use core::time::Duration;
    /// use lockstep::{CountStatus, MonotonicClock, PacedCounter};
    ///
    /// let counter = PacedCounter::new(2, Duration::ZERO, MonotonicClock::default());
    /// assert_eq!(counter.poll_next(), CountStatus::Ready { value: 1 });
    /// assert_eq!(counter.poll_next(), CountStatus::Ready { value: 2 });
    /// assert_eq!(counter.poll_next(), CountStatus::Done);
    /// assert_eq!(counter.poll_next(), CountStatus::Done);
    /// ```
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip(self)))]
    pub fn poll_next(&self) -> CountStatus {
        let position = self.position.get();
        if position == self.bound {
            return CountStatus::Done;
        }

        let now = self.time.current_millis();
        let due = self.due.get();
        if now < due {
            return Self::cold_not_due(now, due);
        }

        let next = position + 1;
        self.position.set(next);
        self.due.set(now.saturating_add(self.pace_ms));
        CountStatus::Ready { value: next }
    }

    #[cold]
    #[inline(never)]
    fn cold_not_due(now: u64, due: u64) -> CountStatus {
        let yield_for = due - now;
        CountStatus::Pending {
            yield_for: Duration::from_millis(yield_for),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ManualClock {
        millis: Cell<u64>,
    }

    impl ManualClock {
        fn new(millis: u64) -> Self {
            Self {
                millis: Cell::new(millis),
            }
        }

        fn advance(&self, millis: u64) {
            self.millis.set(self.millis.get() + millis);
        }
    }

    impl TimeSource for ManualClock {
        fn current_millis(&self) -> u64 {
            self.millis.get()
        }
    }

    #[test]
    fn emits_in_order_with_pacing() {
        let clock = ManualClock::new(0);
        let counter = PacedCounter::new(3, Duration::from_millis(100), &clock);

        assert_eq!(
            counter.poll_next(),
            CountStatus::Pending {
                yield_for: Duration::from_millis(100)
            }
        );

        clock.advance(100);
        assert_eq!(counter.poll_next(), CountStatus::Ready { value: 1 });

        // Not due again until a full pace has elapsed.
        clock.advance(50);
        assert_eq!(
            counter.poll_next(),
            CountStatus::Pending {
                yield_for: Duration::from_millis(50)
            }
        );

        clock.advance(50);
        assert_eq!(counter.poll_next(), CountStatus::Ready { value: 2 });

        clock.advance(100);
        assert_eq!(counter.poll_next(), CountStatus::Ready { value: 3 });

        assert_eq!(counter.poll_next(), CountStatus::Done);
    }

    #[test]
    fn done_is_terminal() {
        let clock = ManualClock::new(0);
        let counter = PacedCounter::new(1, Duration::ZERO, &clock);

        assert_eq!(counter.poll_next(), CountStatus::Ready { value: 1 });
        for _ in 0..10 {
            clock.advance(1_000);
            assert_eq!(counter.poll_next(), CountStatus::Done);
        }
    }

    #[test]
    fn zero_bound_is_immediately_done() {
        let clock = ManualClock::new(0);
        let counter = PacedCounter::new(0, Duration::from_millis(100), &clock);

        // No Pending is ever reported: the empty sequence schedules no wait.
        assert_eq!(counter.poll_next(), CountStatus::Done);
        clock.advance(1_000);
        assert_eq!(counter.poll_next(), CountStatus::Done);
        assert_eq!(counter.remaining(), 0);
    }

    #[test]
    fn zero_pace_emits_back_to_back() {
        let clock = ManualClock::new(42);
        let counter = PacedCounter::new(5, Duration::ZERO, &clock);

        // The clock never advances, yet the full sequence is available:
        // pacing affects latency only, never content.
        for expected in 1..=5 {
            assert_eq!(counter.poll_next(), CountStatus::Ready { value: expected });
        }
        assert_eq!(counter.poll_next(), CountStatus::Done);
    }

    #[test]
    fn independent_counters_share_no_state() {
        let clock = ManualClock::new(0);

        for _ in 0..2 {
            let counter = PacedCounter::new(3, Duration::from_millis(10), &clock);
            let mut values = Vec::new();
            while values.len() < 3 {
                match counter.poll_next() {
                    CountStatus::Ready { value } => values.push(value),
                    CountStatus::Pending { yield_for } => {
                        clock.advance(yield_for.as_millis() as u64)
                    }
                    CountStatus::Done => break,
                }
            }
            assert_eq!(values, vec![1, 2, 3]);
        }
    }

    #[test]
    fn extreme_pace_saturates_instead_of_wrapping() {
        let clock = ManualClock::new(u64::MAX - 10);
        let counter = PacedCounter::new(1, Duration::from_millis(u64::MAX), &clock);

        // The due time pins at u64::MAX rather than wrapping into the past,
        // so the counter reports Pending instead of emitting early.
        assert!(matches!(counter.poll_next(), CountStatus::Pending { .. }));

        clock.advance(10);
        assert_eq!(counter.poll_next(), CountStatus::Ready { value: 1 });
        assert_eq!(counter.poll_next(), CountStatus::Done);
    }

    #[test]
    fn remaining_tracks_emissions() {
        let clock = ManualClock::new(0);
        let counter = PacedCounter::new(2, Duration::ZERO, &clock);

        assert_eq!(counter.remaining(), 2);
        assert_eq!(counter.poll_next(), CountStatus::Ready { value: 1 });
        assert_eq!(counter.remaining(), 1);
        assert_eq!(counter.poll_next(), CountStatus::Ready { value: 2 });
        assert_eq!(counter.remaining(), 0);
    }
}
