//! Event domain model.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date::format_date;
use crate::member::MemberId;

/// Stable identifier of an event. Assigned by the store on insert, never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    pub fn generate() -> Self {
        EventId(Uuid::new_v4())
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EventId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(EventId)
    }
}

/// A dated gathering and the set of members who attended it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub date: NaiveDate,
    pub description: String,
    /// Ids of members who attended
    pub attendance: BTreeSet<MemberId>,
}

impl Event {
    /// New events always start with nobody marked present.
    pub fn from_draft(id: EventId, draft: EventDraft) -> Self {
        Event {
            id,
            title: draft.title,
            date: draft.date,
            description: draft.description,
            attendance: BTreeSet::new(),
        }
    }

    pub fn attended_by(&self, member: MemberId) -> bool {
        self.attendance.contains(&member)
    }

    /// Column label used in reports: `Title (YYYY-MM-DD)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.title, format_date(&self.date))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Event data before the store has assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

impl EventDraft {
    pub fn new(title: impl Into<String>, date: NaiveDate) -> Self {
        EventDraft {
            title: title.into(),
            date,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
