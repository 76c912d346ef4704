//! Monthly birthday/anniversary reminders.
//!
//! Milestones recur every year, so only the month and day of a stored date
//! matter. Members with no date for the requested field never appear.

use chrono::{Datelike, NaiveDate};

use crate::date::{following_month, month_name};
use crate::member::{DateField, Member};

/// Members whose milestone falls in one calendar month, ordered by day.
#[derive(Debug, Clone)]
pub struct ReminderBucket<'a> {
    /// 1-based month number
    pub month: u32,
    pub members: Vec<&'a Member>,
}

impl ReminderBucket<'_> {
    pub fn month_name(&self) -> &'static str {
        month_name(self.month)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// This-month and next-month reminder lists for one date field.
#[derive(Debug, Clone)]
pub struct MonthlyReminders<'a> {
    pub field: DateField,
    pub this_month: ReminderBucket<'a>,
    pub next_month: ReminderBucket<'a>,
}

/// Bucket `members` by the month of `field`, relative to `today`'s month.
pub fn reminders(today: NaiveDate, members: &[Member], field: DateField) -> MonthlyReminders<'_> {
    let this_month = today.month();
    let next_month = following_month(this_month);

    MonthlyReminders {
        field,
        this_month: bucket(members, field, this_month),
        next_month: bucket(members, field, next_month),
    }
}

fn bucket(members: &[Member], field: DateField, month: u32) -> ReminderBucket<'_> {
    let mut matching: Vec<&Member> = members
        .iter()
        .filter(|m| m.date(field).is_some_and(|d| d.month() == month))
        .collect();

    // Stable: members sharing a day keep store order
    matching.sort_by_key(|m| m.date(field).map(|d| d.day()));

    ReminderBucket {
        month,
        members: matching,
    }
}
