use thiserror::Error;

use crate::clock::TimeUnit;

/// Represents errors that can occur while configuring or decoding Snowflake IDs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SnowflakeError {
    /// A layout needs at least one worker segment
    #[error("At least one worker segment is required")]
    EmptyWorkerSegments,
    /// Error when a worker ID does not fit its segment
    #[error("Worker ID {worker_id} is invalid for segment '{segment}'. Maximum allowed value is {max}")]
    InvalidWorkerId {
        segment: String,
        worker_id: u64,
        max: u64,
    },
    /// Worker and sequence bits leave no room for the sign and headroom bits
    #[error("Worker and sequence segments use {total} bits. Maximum allowed is {max}")]
    TooManyBits { total: u32, max: u32 },
    /// Only millisecond and second granularity are supported
    #[error("Time unit {unit:?} is not supported. Use milliseconds or seconds")]
    UnsupportedTimeUnit { unit: TimeUnit },
    /// Decoding asked for a segment index the layout does not have
    #[error("Worker segment index {index} is out of range for a layout with {count} segments")]
    SegmentOutOfRange { index: usize, count: usize },
    /// Decoding asked for a segment name the layout does not have
    #[error("Worker segment '{name}' does not exist in this layout")]
    UnknownSegment { name: String },
}
