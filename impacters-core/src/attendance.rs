//! Attendance aggregation across members and events.

use crate::event::Event;
use crate::member::Member;

/// One member's line in the attendance matrix.
#[derive(Debug, Clone)]
pub struct AttendanceRow<'a> {
    pub member: &'a Member,
    pub attended_count: usize,
    /// Whole-number percentage in `0..=100`
    pub percentage: u8,
    /// Presence per event, aligned with `AttendanceReport::events`
    pub cells: Vec<bool>,
}

/// Members × events presence matrix with per-member totals.
#[derive(Debug, Clone)]
pub struct AttendanceReport<'a> {
    /// Events, oldest first
    pub events: Vec<&'a Event>,
    /// One row per member, in store order
    pub rows: Vec<AttendanceRow<'a>>,
}

impl<'a> AttendanceReport<'a> {
    pub fn build(members: &'a [Member], events: &'a [Event]) -> Self {
        let mut sorted: Vec<&Event> = events.iter().collect();
        sorted.sort_by_key(|e| e.date);

        let total = sorted.len();
        let rows = members
            .iter()
            .map(|member| {
                let cells: Vec<bool> = sorted.iter().map(|e| e.attended_by(member.id)).collect();
                let attended_count = cells.iter().filter(|present| **present).count();
                AttendanceRow {
                    member,
                    attended_count,
                    percentage: attendance_percentage(attended_count, total),
                    cells,
                }
            })
            .collect();

        AttendanceReport {
            events: sorted,
            rows,
        }
    }

    pub fn total_events(&self) -> usize {
        self.events.len()
    }

    /// Nothing to report without both members and events.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.events.is_empty()
    }
}

/// `attended / total` as a percentage rounded half-up; 0 when there are no events.
pub fn attendance_percentage(attended: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let attended = attended.min(total);
    let rounded = (attended * 200 + total) / (2 * total);
    rounded as u8
}
