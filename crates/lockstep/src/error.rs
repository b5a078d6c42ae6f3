//! Error types for paced sequence production.
//!
//! This module defines the central `Error` enum, which captures all
//! reportable error cases in the producer/consumer pair.
//!
//! ## Error Cases
//! - `InvalidBound`: The requested bound was rejected before any production
//!   began.
//! - `Cancelled`: The sequence was cancelled mid-flight, distinct from
//!   normal completion.
//! - `ChannelClosed`: An internal handoff failure between the producer task
//!   and its consumer.

pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for paced sequence production.
#[derive(Clone, thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    /// The requested bound was invalid or exceeded constraints.
    #[error("Invalid bound: {bound} (must be greater than 0)")]
    InvalidBound { bound: u64 },

    /// The sequence was cancelled before reaching its bound.
    #[error("Sequence cancelled before completion")]
    Cancelled,

    /// Internal channel send/receive failure (e.g., a closed channel).
    #[error("Channel error: {context}")]
    ChannelClosed { context: String },
}
