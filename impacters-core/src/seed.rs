//! Sample members and events for trying the shell out.

use tracing::{info, warn};

use crate::date::parse_date;
use crate::event::EventDraft;
use crate::member::{MemberDraft, MemberId};
use crate::store::Store;

/// name, email, phone, birthday, anniversary
const DEMO_MEMBERS: [(&str, &str, &str, &str, &str); 4] = [
    ("John Doe", "john@example.com", "123-456-7890", "1990-05-15", "2015-06-20"),
    ("Jane Smith", "jane@example.com", "234-567-8901", "1992-08-22", "2018-07-10"),
    ("Peter Jones", "peter@example.com", "345-678-9012", "1985-12-01", ""),
    ("Mary Garcia", "mary@example.com", "456-789-0123", "1995-05-30", "2020-09-05"),
];

/// title, date, description, attendees (indexes into `DEMO_MEMBERS`)
const DEMO_EVENTS: [(&str, &str, &str, &[usize]); 3] = [
    ("Weekly Bible Study", "2024-05-10", "Chapter 5 of Romans", &[0, 2]),
    ("Community Outreach", "2024-05-18", "Serving at the local shelter", &[0, 1, 2, 3]),
    ("Game Night", "2024-06-01", "Fun and fellowship", &[]),
];

pub fn demo_members() -> Vec<MemberDraft> {
    DEMO_MEMBERS
        .iter()
        .map(|(name, email, phone, birthday, anniversary)| MemberDraft {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            birthday: parse_date(birthday),
            anniversary: parse_date(anniversary),
        })
        .collect()
}

/// Append the demo members and events (with their attendance) to `store`.
pub fn load_demo_data(store: &mut Store) {
    let member_ids: Vec<MemberId> = store.bulk_add_members(demo_members());

    for (title, date, description, attendees) in DEMO_EVENTS {
        let Some(date) = parse_date(date) else {
            continue;
        };
        let event_id = store.add_event(EventDraft::new(title, date).with_description(description));
        let present: Vec<MemberId> = attendees
            .iter()
            .filter_map(|&index| member_ids.get(index).copied())
            .collect();
        if let Err(e) = store.set_attendance(event_id, present) {
            warn!(event = %event_id, error = %e, "Could not record demo attendance");
        }
    }

    info!(
        members = DEMO_MEMBERS.len(),
        events = DEMO_EVENTS.len(),
        "Loaded demo data"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_store_matches_sample_data() {
        let store = Store::with_demo_data();

        assert_eq!(store.members().len(), 4);
        assert_eq!(store.events().len(), 3);

        let peter = &store.members()[2];
        assert_eq!(peter.name, "Peter Jones");
        assert_eq!(peter.anniversary, None);

        let attendance: Vec<usize> = store.events().iter().map(|e| e.attendance.len()).collect();
        assert_eq!(attendance, [2, 4, 0]);

        let study = &store.events()[0];
        assert!(study.attended_by(store.members()[0].id));
        assert!(study.attended_by(peter.id));
        assert_eq!(study.description, "Chapter 5 of Romans");
    }

    #[test]
    fn attendance_refers_to_freshly_added_members() {
        let mut store = Store::new();
        store.add_member(MemberDraft::new("Existing"));
        load_demo_data(&mut store);

        let existing = store.members()[0].id;
        let outreach = &store.events()[1];
        assert_eq!(outreach.attendance.len(), 4);
        assert!(!outreach.attended_by(existing));

        let study = &store.events()[0];
        assert!(study.attended_by(store.members()[1].id));
        assert!(study.attended_by(store.members()[3].id));
    }

    #[test]
    fn loading_twice_appends() {
        let mut store = Store::with_demo_data();
        load_demo_data(&mut store);
        assert_eq!(store.members().len(), 8);
        assert_eq!(store.events().len(), 6);
    }
}
