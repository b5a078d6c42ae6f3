use crate::futures::SleepProvider;
use core::pin::Pin;
use core::task::{Context, Poll};
use smol::Timer;

/// An implementation of [`SleepProvider`] using Smol's timer.
///
/// This is the default provider for use in async applications built on Smol.
pub struct SmolSleep;
impl SleepProvider for SmolSleep {
    type Sleep = SmolSleepFuture;

    fn sleep_for(dur: core::time::Duration) -> Self::Sleep {
        SmolSleepFuture {
            timer: Timer::after(dur),
        }
    }
}

/// Adapts [`smol::Timer`], which resolves to the fire [`Instant`], to the
/// `()`-output contract of [`SleepProvider::Sleep`].
///
/// [`Instant`]: std::time::Instant
pub struct SmolSleepFuture {
    timer: Timer,
}

impl Future for SmolSleepFuture {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.timer).poll(cx).map(|_| ())
    }
}
