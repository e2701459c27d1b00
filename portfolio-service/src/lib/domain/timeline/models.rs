use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::errors::ContentError;

/// An entry on the career or education timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub id: TimelineId,
    pub title: String,
    pub description: String,
    pub from: String,
    /// Open-ended entries ("present") have no end
    pub to: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Timeline entry unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimelineId(pub Uuid);

impl TimelineId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, ContentError> {
        Uuid::parse_str(s)
            .map(TimelineId)
            .map_err(|_| ContentError::InvalidId { kind: "Timeline" })
    }
}

impl Default for TimelineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TimelineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Default)]
pub struct NewTimelineCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}
