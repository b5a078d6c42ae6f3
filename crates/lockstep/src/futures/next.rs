use crate::{CountStatus, PacedCounter, SleepProvider, TimeSource};

impl<T> PacedCounter<T>
where
    T: TimeSource,
{
    /// Resolves to the next value in the sequence, or `None` once the bound
    /// is reached.
    ///
    /// If the next position is not due yet, the future sleeps for the amount
    /// of time indicated by the counter and retries. Each wait interval is a
    /// single suspension point; the counter never advances while the caller
    /// is not awaiting.
    pub async fn next_paced<S>(&self) -> Option<u64>
    where
        S: SleepProvider,
    {
        loop {
            match self.poll_next() {
                CountStatus::Ready { value } => return Some(value),
                CountStatus::Pending { yield_for } => S::sleep_for(yield_for).await,
                CountStatus::Done => return None,
            }
        }
    }
}
