/// Aggregation for the `summary` command.
///
/// Pure over a slice of sessions; the caller scopes the slice with the
/// resolved date range first.
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::filter::DateRange;
use crate::session::PracticeSession;
use crate::timeunit::Day;

#[derive(Debug, Serialize)]
pub struct Summary {
    pub range: DateRange,
    pub sessions: usize,
    pub total_minutes: i64,
    pub days_practised: usize,
    /// Minutes per day, chronological.
    pub minutes_by_day: IndexMap<String, i64>,
    /// Minutes per piece, most practised first.
    pub minutes_by_piece: IndexMap<String, i64>,
    /// Longest run of consecutive practised days.
    pub longest_streak_days: usize,
}

pub fn build(range: DateRange, sessions: &[PracticeSession]) -> Summary {
    let mut by_day: BTreeMap<Day, i64> = BTreeMap::new();
    let mut by_piece: Vec<(String, i64)> = Vec::new();
    let mut total_minutes = 0;

    for session in sessions {
        total_minutes += session.minutes;
        *by_day.entry(session.day).or_insert(0) += session.minutes;
        match by_piece.iter_mut().find(|(piece, _)| *piece == session.piece) {
            Some((_, minutes)) => *minutes += session.minutes,
            None => by_piece.push((session.piece.clone(), session.minutes)),
        }
    }

    by_piece.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Summary {
        range,
        sessions: sessions.len(),
        total_minutes,
        days_practised: by_day.len(),
        longest_streak_days: longest_streak(by_day.keys().copied()),
        minutes_by_day: by_day
            .into_iter()
            .map(|(day, minutes)| (day.to_string(), minutes))
            .collect(),
        minutes_by_piece: by_piece.into_iter().collect(),
    }
}

/// Longest run of consecutive days in an ascending day sequence.
fn longest_streak(days: impl IntoIterator<Item = Day>) -> usize {
    let mut longest = 0;
    let mut current = 0;
    let mut previous: Option<Day> = None;
    for day in days {
        current = match previous {
            Some(prev) if prev.tomorrow() == day => current + 1,
            _ => 1,
        };
        longest = longest.max(current);
        previous = Some(day);
    }
    longest
}
