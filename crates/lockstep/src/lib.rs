mod counter;
mod error;
#[cfg(feature = "futures")]
mod futures;
#[cfg(feature = "async-tokio")]
mod handoff;
mod status;
mod time;

pub use crate::counter::*;
pub use crate::error::*;
#[cfg(feature = "futures")]
pub use crate::futures::*;
#[cfg(feature = "async-tokio")]
pub use crate::handoff::*;
pub use crate::status::*;
pub use crate::time::*;
