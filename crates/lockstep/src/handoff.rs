//! Task/channel delivery of a paced counting sequence.
//!
//! This module defines the push half of the crate: a background pump task
//! that drives a [`PacedCounter`] and hands each value to a consumer through
//! a single-slot channel. The slot enforces lockstep backpressure without
//! extra synchronization primitives: the pump cannot advance to position
//! `i + 1` until the consumer has accepted position `i`.
//!
//! ## Responsibilities
//!
//! - Validate the requested bound and fail fast before spawning anything.
//! - Check the [`CancellationToken`] before each wait and each emission.
//! - Surface cancellation as a final [`Error::Cancelled`] item, distinct
//!   from normal end-of-stream.
//! - Stop producing as soon as the consumer is gone.

use crate::{CountStatus, Error, MonotonicClock, PacedCounter, Result, TimeSource};
use core::pin::Pin;
use core::task::{Context, Poll};
use core::time::Duration;
use futures::Stream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

/// Handle to a running paced sequence producer.
///
/// Bundles the consumption half of the handoff channel with the pump task's
/// [`JoinHandle`]. The handle implements [`Stream`], yielding each position
/// as `Ok(value)` in strictly increasing order, followed by either normal
/// end-of-stream or a final `Err(`[`Error::Cancelled`]`)`.
///
/// Dropping the handle closes the channel; the pump notices immediately,
/// even mid-wait, and stops without producing further positions.
#[derive(Debug)]
pub struct Producer {
    stream: ReceiverStream<Result<u64>>,
    task: JoinHandle<()>,
}

impl Producer {
    /// Splits the handle into its stream and task halves.
    ///
    /// Useful when the consumer needs to await pump termination separately,
    /// e.g. to assert that cancellation actually stopped production.
    pub fn into_parts(self) -> (ReceiverStream<Result<u64>>, JoinHandle<()>) {
        (self.stream, self.task)
    }
}

impl Stream for Producer {
    type Item = Result<u64>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.get_mut().stream).poll_next(cx)
    }
}

/// Starts producing the paced sequence `1..=bound`, validated.
///
/// Fails fast with [`Error::InvalidBound`] for `bound == 0`: no wait is
/// scheduled and no task is spawned. Otherwise spawns the pump task against
/// a fresh [`MonotonicClock`] and returns its [`Producer`] handle.
///
/// Each invocation yields a fresh, independent sequence from 1; state never
/// leaks between invocations.
///
/// # Errors
///
/// Returns [`Error::InvalidBound`] if `bound` is zero.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(token)))]
pub fn produce(bound: u64, pace: Duration, token: CancellationToken) -> Result<Producer> {
    if bound == 0 {
        return Err(Error::InvalidBound { bound });
    }
    let counter = PacedCounter::new(bound, pace, MonotonicClock::default());
    Ok(spawn(counter, token))
}

/// Spawns the pump task for a prebuilt counter.
///
/// Lower-level, unvalidated variant of [`produce`]: accepts any counter,
/// including one with a custom [`TimeSource`] or a zero bound (which simply
/// yields an empty stream).
pub fn spawn<T>(counter: PacedCounter<T>, token: CancellationToken) -> Producer
where
    T: TimeSource + Send + 'static,
{
    // A buffer size of 1 is the point, not an optimization: it ensures
    // at-most-one value in flight, so the pump's send suspends until the
    // consumer has accepted the previous value.
    let (tx, rx) = mpsc::channel(1);

    let task = tokio::spawn(async move {
        if let Err(_e) = pump(counter, tx, token).await {
            #[cfg(feature = "tracing")]
            tracing::debug!("Producer stopped early: {_e}");
        }
    });

    Producer {
        stream: ReceiverStream::new(rx),
        task,
    }
}

/// Drives the counter to completion, handing each value to the consumer.
///
/// The loop is fully cooperative: it suspends during each pace interval and
/// during each handoff, and it re-checks the cancellation token at both
/// suspension points. On cancellation it delivers a final
/// [`Error::Cancelled`] item (unless the consumer is already gone), then
/// stops; the position that was being waited on is never emitted. A dropped
/// consumer interrupts an in-progress wait the same way cancellation does.
#[cfg_attr(feature = "tracing", tracing::instrument(skip_all, fields(bound = counter.bound())))]
async fn pump<T>(
    counter: PacedCounter<T>,
    tx: mpsc::Sender<Result<u64>>,
    token: CancellationToken,
) -> Result<()>
where
    T: TimeSource,
{
    #[cfg(feature = "tracing")]
    tracing::trace!("Pump started");

    loop {
        if token.is_cancelled() {
            return cancel(&tx).await;
        }

        match counter.poll_next() {
            CountStatus::Done => {
                // Returning drops `tx`, which closes the channel; the
                // consumer observes normal end-of-stream.
                #[cfg(feature = "tracing")]
                tracing::trace!("Pump finished");
                return Ok(());
            }
            CountStatus::Ready { value } => {
                tokio::select! {
                    () = token.cancelled() => {
                        // The slot may still hold the previous value; drop
                        // the fetched one and replace the handoff with the
                        // cancellation outcome.
                        return cancel(&tx).await;
                    }
                    res = tx.send(Ok(value)) => {
                        if res.is_err() {
                            return abandoned();
                        }
                    }
                }
            }
            CountStatus::Pending { yield_for } => {
                tokio::select! {
                    () = token.cancelled() => {
                        return cancel(&tx).await;
                    }
                    () = tx.closed() => {
                        // The consumer dropped the stream mid-wait; do not
                        // sit out the rest of the pace interval, and do not
                        // advance to the position being waited on.
                        return abandoned();
                    }
                    () = tokio::time::sleep(yield_for) => {}
                }
            }
        }
    }
}

/// Delivers the cancellation outcome to the consumer.
///
/// Waits for the single slot rather than racing it: a value the consumer has
/// not yet accepted must not mask the `Cancelled` item. Gives up only when
/// the consumer is gone, in which case nobody is left to observe it.
async fn cancel(tx: &mpsc::Sender<Result<u64>>) -> Result<()> {
    tokio::select! {
        res = tx.send(Err(Error::Cancelled)) => {
            let _ = res;
        }
        () = tx.closed() => {}
    }
    Err(Error::Cancelled)
}

/// The consumer dropped the stream. Nobody is left to observe an error item.
fn abandoned() -> Result<()> {
    Err(Error::ChannelClosed {
        context: "consumer dropped the stream".into(),
    })
}
