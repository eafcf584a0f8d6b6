use serde::Serialize;

use crate::timeunit::{Day, Minutes};

/// Stable identifier of a stored practice session (the store's rowid).
///
/// Ids are unique within the store and never reused while the row exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SessionId(pub i64);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single logged practice session.
#[derive(Debug, Clone, Serialize)]
pub struct PracticeSession {
    pub id: SessionId,
    /// What was practised (piece, etude, exercise).
    pub piece: String,
    /// Practice duration in minutes.
    pub minutes: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Start of the session, minute precision.
    pub started_at: Minutes,
    /// Calendar day the session is logged under.
    pub day: Day,
}
