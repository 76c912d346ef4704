//! Member domain model.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::date::optional_date;

/// Stable identifier of a member. Assigned by the store on insert, never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(Uuid);

impl MemberId {
    pub fn generate() -> Self {
        MemberId(Uuid::new_v4())
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MemberId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(MemberId)
    }
}

/// Which recurring milestone date of a member to look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateField {
    Birthday,
    Anniversary,
}

impl DateField {
    pub const ALL: [DateField; 2] = [DateField::Birthday, DateField::Anniversary];

    /// Heading used for reminder lists ("Birthdays", "Anniversaries").
    pub fn plural(&self) -> &'static str {
        match self {
            DateField::Birthday => "Birthdays",
            DateField::Anniversary => "Anniversaries",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Birthday => write!(f, "birthday"),
            DateField::Anniversary => write!(f, "anniversary"),
        }
    }
}

/// A tracked individual with contact and milestone-date information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(with = "optional_date", default)]
    pub birthday: Option<NaiveDate>,
    #[serde(with = "optional_date", default)]
    pub anniversary: Option<NaiveDate>,
}

impl Member {
    pub fn from_draft(id: MemberId, draft: MemberDraft) -> Self {
        Member {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            birthday: draft.birthday,
            anniversary: draft.anniversary,
        }
    }

    /// The date stored under `field`, if set.
    pub fn date(&self, field: DateField) -> Option<NaiveDate> {
        match field {
            DateField::Birthday => self.birthday,
            DateField::Anniversary => self.anniversary,
        }
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Member data before the store has assigned an id (form input, CSV rows).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(with = "optional_date", default)]
    pub birthday: Option<NaiveDate>,
    #[serde(with = "optional_date", default)]
    pub anniversary: Option<NaiveDate>,
}

impl MemberDraft {
    pub fn new(name: impl Into<String>) -> Self {
        MemberDraft {
            name: name.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_field_selects_matching_date() {
        let mut draft = MemberDraft::new("John Doe");
        draft.birthday = NaiveDate::from_ymd_opt(1990, 5, 15);
        let member = Member::from_draft(MemberId::generate(), draft);

        assert_eq!(member.date(DateField::Birthday), NaiveDate::from_ymd_opt(1990, 5, 15));
        assert_eq!(member.date(DateField::Anniversary), None);
    }

    #[test]
    fn unset_dates_serialize_as_empty_strings() {
        let mut draft = MemberDraft::new("Alice");
        draft.birthday = NaiveDate::from_ymd_opt(2000, 1, 1);

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["birthday"], "2000-01-01");
        assert_eq!(json["anniversary"], "");
    }

    #[test]
    fn malformed_dates_deserialize_as_unset() {
        let json = r#"{"name":"Bob","email":"","phone":"","birthday":"1990-13-45","anniversary":""}"#;
        let draft: MemberDraft = serde_json::from_str(json).unwrap();
        assert_eq!(draft.birthday, None);
        assert_eq!(draft.anniversary, None);
    }

    #[test]
    fn member_id_parses_back() {
        let id = MemberId::generate();
        assert_eq!(id.to_string().parse::<MemberId>().unwrap(), id);
        assert!("m1".parse::<MemberId>().is_err());
    }
}
