use anyhow::Result;
use chrono::NaiveDate;
use impacters_core::reminder::reminders;
use impacters_core::upcoming::upcoming_events;
use impacters_core::{DateField, Store};

use crate::render::{Render, render_upcoming};

pub fn run(store: &Store, today: NaiveDate, upcoming_limit: usize) -> Result<()> {
    println!("{}", render(store, today, upcoming_limit));
    Ok(())
}

fn render(store: &Store, today: NaiveDate, upcoming_limit: usize) -> String {
    let mut sections = vec![render_upcoming(&upcoming_events(today, store.events(), upcoming_limit))];

    for field in DateField::ALL {
        sections.push(reminders(today, store.members(), field).render());
    }

    sections.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_shows_upcoming_and_both_reminder_kinds() {
        let store = Store::with_demo_data();
        let today = NaiveDate::from_ymd_opt(2024, 5, 12).unwrap();
        let text = render(&store, today, 5);

        assert!(text.contains("Upcoming Events"));
        assert!(text.contains("Community Outreach"));
        assert!(text.contains("Game Night"));
        assert!(!text.contains("Weekly Bible Study"));
        assert!(text.contains("Birthdays"));
        assert!(text.contains("Anniversaries"));
        assert!(text.contains("May 15"));
        assert!(text.contains("June 20"));
    }
}
