//! Upcoming-events selection for the dashboard.

use chrono::NaiveDate;

use crate::event::Event;

/// Number of upcoming events shown when nothing else is configured.
pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// Events dated today or later, soonest first, at most `limit` of them.
pub fn upcoming_events(today: NaiveDate, events: &[Event], limit: usize) -> Vec<&Event> {
    let mut upcoming: Vec<&Event> = events.iter().filter(|e| e.date >= today).collect();
    upcoming.sort_by_key(|e| e.date);
    upcoming.truncate(limit);
    upcoming
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{EventDraft, EventId};

    fn event(title: &str, date: &str) -> Event {
        let date = crate::date::parse_date(date).unwrap();
        Event::from_draft(EventId::generate(), EventDraft::new(title, date))
    }

    fn titles(events: &[&Event]) -> Vec<String> {
        events.iter().map(|e| e.title.clone()).collect()
    }

    #[test]
    fn includes_today_and_excludes_past() {
        let events = vec![
            event("Yesterday", "2024-05-09"),
            event("Today", "2024-05-10"),
            event("Later", "2024-06-01"),
        ];
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();

        let upcoming = upcoming_events(today, &events, DEFAULT_UPCOMING_LIMIT);
        assert_eq!(titles(&upcoming), ["Today", "Later"]);
    }

    #[test]
    fn sorted_ascending_and_truncated() {
        let events: Vec<Event> = (1..=8)
            .rev()
            .map(|d| event(&format!("Day {d}"), &format!("2024-07-0{d}")))
            .collect();
        let today = NaiveDate::from_ymd_opt(2024, 7, 2).unwrap();

        let upcoming = upcoming_events(today, &events, DEFAULT_UPCOMING_LIMIT);
        assert_eq!(upcoming.len(), 5);
        assert_eq!(titles(&upcoming), ["Day 2", "Day 3", "Day 4", "Day 5", "Day 6"]);
        assert!(upcoming.windows(2).all(|w| w[0].date <= w[1].date));
    }

    #[test]
    fn empty_when_everything_is_past() {
        let events = vec![event("Old", "2020-01-01")];
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(upcoming_events(today, &events, DEFAULT_UPCOMING_LIMIT).is_empty());
    }
}
