use crate::{CountStatus, PacedCounter, SleepProvider, TimeSource};
use core::pin::Pin;
use core::task::{Context, Poll};
use futures::stream::{FusedStream, Stream};
use pin_project_lite::pin_project;

impl<T> PacedCounter<T>
where
    T: TimeSource,
{
    /// Consumes the counter, returning a [`Stream`] of its values.
    ///
    /// The stream is lazy and pull-based: a consumer that stops early (by
    /// dropping the stream or taking a prefix) abandons the remaining
    /// positions without ever producing them.
    pub fn into_stream<S>(self) -> CountStream<T, S>
    where
        S: SleepProvider,
    {
        CountStream::new(self)
    }
}

pin_project! {
    /// A finite [`Stream`] that polls a [`PacedCounter`] until the bound is
    /// reached.
    ///
    /// This stream handles `Pending` responses by sleeping for the
    /// recommended amount of time before polling the counter again. After
    /// yielding `None` it is fused: every later poll returns `None` again.
    #[must_use = "streams do nothing unless polled"]
    pub struct CountStream<T, S>
    where
        T: TimeSource,
        S: SleepProvider,
    {
        counter: PacedCounter<T>,
        #[pin]
        sleep: Option<S::Sleep>,
    }
}

impl<T, S> CountStream<T, S>
where
    T: TimeSource,
    S: SleepProvider,
{
    /// Constructs a new [`CountStream`] from a given counter.
    ///
    /// This does not immediately begin polling the counter; production only
    /// advances while the stream is being polled.
    pub fn new(counter: PacedCounter<T>) -> Self {
        Self {
            counter,
            sleep: None,
        }
    }
}

impl<T, S> Stream for CountStream<T, S>
where
    T: TimeSource,
    S: SleepProvider,
{
    type Item = u64;

    /// Polls the counter for the next value.
    ///
    /// If the counter is not ready, this will register the task waker and
    /// sleep for the time recommended by the counter before polling again.
    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if let Some(sleep) = this.sleep.as_mut().as_pin_mut() {
            match sleep.poll(cx) {
                Poll::Pending => {
                    return Poll::Pending;
                }
                Poll::Ready(()) => {
                    this.sleep.set(None);
                }
            }
        }
        match this.counter.poll_next() {
            CountStatus::Ready { value } => Poll::Ready(Some(value)),
            CountStatus::Done => Poll::Ready(None),
            CountStatus::Pending { yield_for } => {
                let sleep_fut = S::sleep_for(yield_for);
                this.sleep.as_mut().set(Some(sleep_fut));
                cx.waker().wake_by_ref();
                Poll::Pending
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.counter.remaining() as usize;
        (remaining, Some(remaining))
    }
}

impl<T, S> FusedStream for CountStream<T, S>
where
    T: TimeSource,
    S: SleepProvider,
{
    fn is_terminated(&self) -> bool {
        self.counter.remaining() == 0
    }
}

#[cfg(all(test, feature = "async-tokio"))]
mod tests {
    use super::*;
    use crate::{MonotonicClock, TokioSleep};
    use core::time::Duration;
    use futures::StreamExt;

    #[tokio::test(flavor = "multi_thread")]
    async fn yields_full_sequence_in_order() {
        let counter = PacedCounter::new(3, Duration::from_millis(1), MonotonicClock::default());
        let stream = counter.into_stream::<TokioSleep>();

        let values: Vec<_> = stream.collect().await;
        assert_eq!(values, vec![1, 2, 3]);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn zero_pace_yields_identical_sequence() {
        let paced = PacedCounter::new(4, Duration::from_millis(1), MonotonicClock::default());
        let unpaced = PacedCounter::new(4, Duration::ZERO, MonotonicClock::default());

        let slow: Vec<_> = paced.into_stream::<TokioSleep>().collect().await;
        let fast: Vec<_> = unpaced.into_stream::<TokioSleep>().collect().await;

        assert_eq!(slow, fast);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn early_stop_abandons_remaining_positions() {
        let counter = PacedCounter::new(100, Duration::ZERO, MonotonicClock::default());
        let mut stream = Box::pin(counter.into_stream::<TokioSleep>());

        assert_eq!(stream.next().await, Some(1));

        // The prefix consumer never materializes the rest of the sequence.
        assert_eq!(stream.size_hint(), (99, Some(99)));
        drop(stream);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn fused_after_exhaustion() {
        let counter = PacedCounter::new(1, Duration::ZERO, MonotonicClock::default());
        let mut stream = Box::pin(counter.into_stream::<TokioSleep>());

        assert_eq!(stream.next().await, Some(1));
        assert!(stream.is_terminated());
        assert_eq!(stream.next().await, None);
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn size_hint_is_exact() {
        let counter = PacedCounter::new(2, Duration::ZERO, MonotonicClock::default());
        let mut stream = Box::pin(counter.into_stream::<TokioSleep>());

        assert_eq!(stream.size_hint(), (2, Some(2)));
        assert_eq!(stream.next().await, Some(1));
        assert_eq!(stream.size_hint(), (1, Some(1)));
        assert_eq!(stream.next().await, Some(2));
        assert_eq!(stream.size_hint(), (0, Some(0)));
    }
}
