use thiserror::Error;

use crate::format::{bracketed, Calendar};
use crate::timestamp::Timestamp;

/// The only way constructing an [`Interval`](crate::Interval) can fail.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InvalidInterval {
    /// An endpoint was absent or not representable as whole seconds.
    #[error("Invalid interval")]
    MissingEndpoint,
    /// The rounded end precedes the rounded start.
    #[error("Invalid interval: {}", render(.started_at, .ended_at))]
    EndsBeforeStart {
        started_at: Timestamp,
        ended_at: Timestamp,
    },
}

fn render(started_at: &Timestamp, ended_at: &Timestamp) -> String {
    bracketed(&Calendar::utc(), *started_at, *ended_at)
}
