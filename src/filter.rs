/// Date filtering for session lists.
///
/// A user-supplied filter is a pair of optional bounds; resolving it against
/// the actual first/last record days yields the concrete inclusive interval
/// used to scope queries. Both resolution functions are pure and total,
/// including over inverted or degenerate filters, which resolve to an empty
/// interval rather than an error.
use serde::Serialize;

use crate::timeunit::Day;

/// An optional date filter over a session list.
///
/// Absence of both bounds means "unfiltered". The type enforces no ordering
/// between the bounds; an inverted pair resolves to an empty range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateFilter {
    /// Inclusive lower bound.
    pub from: Option<Day>,
    /// Exclusive upper bound.
    pub to_exclusive: Option<Day>,
}

impl DateFilter {
    pub fn is_unfiltered(&self) -> bool {
        self.from.is_none() && self.to_exclusive.is_none()
    }
}

/// A concrete inclusive interval produced by resolving a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: Day,
    pub end: Day,
}

impl DateRange {
    /// True when the interval contains no days; consumers treat this as
    /// "no rows", never as an error.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Lower bound of the resolved interval.
///
/// A user-chosen lower bound can never usefully extend before the first real
/// record, so anything earlier (or absent) collapses to `first_record`.
pub fn effective_start(from: Option<Day>, first_record: Day) -> Day {
    match from {
        Some(d) if d > first_record => d,
        _ => first_record,
    }
}

/// Upper bound of the resolved interval.
///
/// The exclusive filter bound is converted to its inclusive predecessor day,
/// then clamped to `max(today, last_record)` so the interval never exceeds
/// the natural upper bound and never excludes today (an empty-but-current
/// day must stay representable).
pub fn effective_end(to_exclusive: Option<Day>, last_record: Day, today: Day) -> Day {
    let upper = today.max(last_record);
    match to_exclusive.map(Day::yesterday) {
        Some(d) if d < upper => d,
        _ => upper,
    }
}

/// Resolve a filter against the store's record bounds into the interval to
/// query. May yield an empty range for inverted filters.
pub fn resolve(filter: &DateFilter, first_record: Day, last_record: Day, today: Day) -> DateRange {
    DateRange {
        start: effective_start(filter.from, first_record),
        end: effective_end(filter.to_exclusive, last_record, today),
    }
}
