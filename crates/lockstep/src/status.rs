use core::time::Duration;

/// Represents the result of one non-blocking step of a paced counting
/// sequence.
///
/// This type models the outcome of `PacedCounter::poll_next()`:
///
/// - [`CountStatus::Ready`] indicates the next position was emitted and the
///   counter advanced.
/// - [`CountStatus::Pending`] means the next position is not due yet; the
///   caller should wait `yield_for` before polling again.
/// - [`CountStatus::Done`] means the bound was reached. The state is
///   terminal: every later poll returns `Done` again.
///
/// This allows non-blocking production loops and clean backoff strategies.
///
/// # Example
///
/// ```
/// use core::time::Duration;
/// use lockstep::{CountStatus, PacedCounter, TimeSource};
///
/// struct FixedTime;
/// impl TimeSource for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1
///     }
/// }
///
/// let counter = PacedCounter::new(3, Duration::from_millis(100), FixedTime);
/// match counter.poll_next() {
///     CountStatus::Ready { value } => println!("emitted: {value}"),
///     CountStatus::Pending { yield_for } => println!("due in: {yield_for:?}"),
///     CountStatus::Done => println!("exhausted"),
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountStatus {
    /// The next position in the sequence was emitted and is ready to use.
    Ready {
        /// The emitted position, in `1..=bound`.
        value: u64,
    },
    /// The next position is not due yet.
    ///
    /// You should wait for `yield_for` before polling again.
    Pending {
        /// How long to wait before the next poll can succeed.
        yield_for: Duration,
    },
    /// Every position up to the bound has been emitted.
    Done,
}
