use std::borrow::Cow;
use std::fmt::{Display, Write};

use chrono::{DateTime, TimeZone, Utc};

use crate::timestamp::Timestamp;

pub const DEFAULT_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Renders a single endpoint for display.
pub trait TimestampFormat {
    fn format_timestamp(&self, timestamp: Timestamp) -> String;
}

impl<F> TimestampFormat for F
where
    F: Fn(Timestamp) -> String,
{
    fn format_timestamp(&self, timestamp: Timestamp) -> String {
        self(timestamp)
    }
}

/// Calendar rendering of epoch seconds in a fixed zone.
///
/// The pattern uses `chrono`'s strftime syntax. Timestamps outside the range
/// `chrono` can represent, and any timestamp under an invalid pattern, are
/// rendered as the raw number of seconds.
#[derive(Clone, Debug)]
pub struct Calendar<Tz: TimeZone> {
    zone: Tz,
    pattern: Cow<'static, str>,
}

impl Calendar<Utc> {
    pub const fn utc() -> Self {
        Self {
            zone: Utc,
            pattern: Cow::Borrowed(DEFAULT_PATTERN),
        }
    }
}

impl<Tz: TimeZone> Calendar<Tz> {
    pub fn new(zone: Tz) -> Self {
        Self {
            zone,
            pattern: Cow::Borrowed(DEFAULT_PATTERN),
        }
    }

    pub fn with_pattern<P>(mut self, pattern: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        self.pattern = pattern.into();
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl<Tz> TimestampFormat for Calendar<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn format_timestamp(&self, timestamp: Timestamp) -> String {
        let local = match DateTime::from_timestamp(timestamp, 0) {
            Some(utc) => utc.with_timezone(&self.zone),
            None => return timestamp.to_string(),
        };

        let mut rendered = String::new();
        match write!(rendered, "{}", local.format(&self.pattern)) {
            Ok(()) => rendered,
            Err(_) => timestamp.to_string(),
        }
    }
}

/// The `[start, end]` rendering shared by intervals and error messages.
pub(crate) fn bracketed<F>(format: &F, started_at: Timestamp, ended_at: Timestamp) -> String
where
    F: TimestampFormat + ?Sized,
{
    format!(
        "[{}, {}]",
        format.format_timestamp(started_at),
        format.format_timestamp(ended_at)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_calendar_utc() {
        assert_eq!(
            Calendar::utc().format_timestamp(1_403_136_900),
            "2014-06-19 00:15:00"
        );
        assert_eq!(Calendar::utc().format_timestamp(0), "1970-01-01 00:00:00");
    }

    #[test]
    fn test_calendar_zone_and_pattern() {
        let zone = FixedOffset::east_opt(2 * 3600).unwrap();
        let calendar = Calendar::new(zone).with_pattern("%H:%M");
        assert_eq!(calendar.pattern(), "%H:%M");
        assert_eq!(calendar.format_timestamp(1_403_136_900), "02:15");
    }

    #[test]
    fn test_calendar_out_of_range() {
        assert_eq!(
            Calendar::utc().format_timestamp(Timestamp::MAX),
            Timestamp::MAX.to_string()
        );
    }

    #[test]
    fn test_calendar_invalid_pattern() {
        let calendar = Calendar::utc().with_pattern("%Y-%!");
        assert_eq!(calendar.format_timestamp(1_403_136_900), "1403136900");
        assert_eq!(bracketed(&calendar, 0, 60), "[0, 60]");
    }

    #[test]
    fn test_closure_format() {
        let format = |t: Timestamp| format!("t{}", t);
        assert_eq!(bracketed(&format, 1, 2), "[t1, t2]");
    }
}
