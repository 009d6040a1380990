//! Half-open time intervals over whole epoch seconds, and an ordered
//! collection of them supporting coalescing, intersection and partitioning.

mod collection;
mod error;
mod format;
mod interval;
mod timestamp;

pub use collection::{Collection, Slices, ONE_HOUR_IN_SECONDS};
pub use error::InvalidInterval;
pub use format::{Calendar, TimestampFormat, DEFAULT_PATTERN};
pub use interval::Interval;
pub use timestamp::{IntoTimestamp, TimeSpan, Timestamp};
