/// Day- and minute-granularity timestamp values.
///
/// Both types truncate an instant through the calendar rather than raw
/// millisecond arithmetic, so day boundaries stay midnight-aligned across
/// DST transitions. The time zone is always an explicit parameter; nothing
/// here reads ambient zone state.
use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use serde::Serialize;
use std::fmt;

/// A timestamp truncated to its calendar day.
///
/// Equality, ordering, and hashing consider only the calendar day; the
/// sub-day precision of the source instant is discarded at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Day(NaiveDate);

impl Day {
    /// Truncate a millisecond timestamp to its calendar day in `tz`.
    pub fn from_millis_in<Tz: TimeZone>(ts_millis: i64, tz: &Tz) -> Self {
        let utc = DateTime::<Utc>::from_timestamp_millis(ts_millis).unwrap_or_default();
        Day(utc.with_timezone(tz).date_naive())
    }

    /// The current calendar day in `tz`.
    pub fn today_in<Tz: TimeZone>(tz: &Tz) -> Self {
        Day(Utc::now().with_timezone(tz).date_naive())
    }

    /// Build a day from a calendar date; `None` for dates outside the
    /// representable calendar (e.g. month 13).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Day)
    }

    /// Parse a `YYYY-MM-DD` string.
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(Day)
    }

    /// The previous calendar day, saturating at the calendar's lower bound.
    pub fn yesterday(self) -> Self {
        Day(self.0.pred_opt().unwrap_or(self.0))
    }

    /// The next calendar day, saturating at the calendar's upper bound.
    pub fn tomorrow(self) -> Self {
        Day(self.0.succ_opt().unwrap_or(self.0))
    }

    /// Days since 1970-01-01, for compact storage and range comparisons.
    pub fn num_days_from_epoch(self) -> i64 {
        (self.0 - NaiveDate::default()).num_days()
    }

    /// Inverse of [`Day::num_days_from_epoch`], saturating on overflow.
    pub fn from_num_days(days: i64) -> Self {
        let date = chrono::Duration::try_days(days)
            .and_then(|delta| NaiveDate::default().checked_add_signed(delta))
            .unwrap_or_default();
        Day(date)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A timestamp truncated to the start of its minute.
///
/// Equality, ordering, and hashing consider only the truncated instant;
/// seconds and sub-second precision are discarded at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Minutes(DateTime<Utc>);

impl Minutes {
    /// Truncate a millisecond timestamp to the start of its minute.
    pub fn from_millis(ts_millis: i64) -> Self {
        let utc = DateTime::<Utc>::from_timestamp_millis(ts_millis).unwrap_or_default();
        let truncated = utc
            .with_second(0)
            .and_then(|dt| dt.with_nanosecond(0))
            .unwrap_or(utc);
        Minutes(truncated)
    }

    /// The truncated instant as epoch milliseconds.
    pub fn timestamp_millis(self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Format as `YYYY-MM-DD HH:MM` in `tz`.
    pub fn format_in<Tz: TimeZone>(self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.0.with_timezone(tz).format("%Y-%m-%d %H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    const DAY_MS: i64 = 86_400_000;

    #[test]
    fn day_equality_ignores_sub_day_offsets() {
        let noon = 1_700_000_000_000; // 2023-11-14 22:13:20 UTC
        assert_eq!(
            Day::from_millis_in(noon, &Utc),
            Day::from_millis_in(noon + 1, &Utc)
        );
        assert_ne!(
            Day::from_millis_in(noon, &Utc),
            Day::from_millis_in(noon + DAY_MS, &Utc)
        );
    }

    #[test]
    fn day_depends_on_zone() {
        // 2023-11-14 23:30 UTC is already the 15th at UTC+2.
        let ts = 1_700_004_600_000;
        let utc_day = Day::from_millis_in(ts, &Utc);
        let east = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(utc_day.tomorrow(), Day::from_millis_in(ts, &east));
    }

    #[test]
    fn yesterday_tomorrow_shift_one_calendar_day() {
        let d = Day::from_ymd(2024, 3, 1).unwrap();
        assert_eq!(d.yesterday(), Day::from_ymd(2024, 2, 29).unwrap());
        assert_eq!(d.tomorrow(), Day::from_ymd(2024, 3, 2).unwrap());
        assert_eq!(d.yesterday().tomorrow(), d);
    }

    #[test]
    fn day_roundtrips_through_epoch_days() {
        let d = Day::from_ymd(2025, 6, 15).unwrap();
        assert_eq!(Day::from_num_days(d.num_days_from_epoch()), d);
        assert_eq!(Day::from_ymd(1970, 1, 1).unwrap().num_days_from_epoch(), 0);
    }

    #[test]
    fn day_parse_and_display() {
        let d = Day::parse("2025-03-15").unwrap();
        assert_eq!(d, Day::from_ymd(2025, 3, 15).unwrap());
        assert_eq!(d.to_string(), "2025-03-15");
        assert!(Day::parse("not-a-date").is_none());
    }

    #[test]
    fn minutes_equality_ignores_seconds() {
        let base = 1_700_000_040_000; // exactly on a minute boundary
        assert_eq!(
            Minutes::from_millis(base),
            Minutes::from_millis(base + 59_999)
        );
        assert_ne!(
            Minutes::from_millis(base),
            Minutes::from_millis(base + 60_000)
        );
        assert_eq!(Minutes::from_millis(base + 31_500).timestamp_millis(), base);
    }
}
