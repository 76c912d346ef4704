use anyhow::Result;
use dialoguer::MultiSelect;
use impacters_core::{EventId, ImpactersError, MemberId, Store};
use owo_colors::OwoColorize;

use super::{resolve_event, resolve_member};

/// How `attend` changes an event's attendance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttendanceChange {
    /// Pick attendees from a checklist
    Interactive,
    /// Replace the attendance with exactly these members
    Set(Vec<String>),
    /// Flip one member's presence
    Toggle(String),
    /// Mark nobody present
    Clear,
}

pub fn run(store: &mut Store, event_query: &str, change: AttendanceChange) -> Result<()> {
    let event_id = resolve_event(store, event_query)?;
    let label = store
        .event(event_id)
        .map(|e| e.label())
        .ok_or(ImpactersError::EventNotFound(event_id))?;

    match change {
        AttendanceChange::Toggle(query) => {
            let member_id = resolve_member(store, &query)?;
            let present = store.toggle_attendance(event_id, member_id)?;
            let name = store.member(member_id).map(|m| m.name.as_str()).unwrap_or_default();
            if present {
                println!("{} marked {} at {}", name.bold(), "present".green(), label);
            } else {
                println!("{} marked {} at {}", name.bold(), "absent".dimmed(), label);
            }
            return Ok(());
        }
        AttendanceChange::Set(queries) => {
            let attendees = queries
                .iter()
                .map(|q| resolve_member(store, q))
                .collect::<Result<Vec<MemberId>>>()?;
            store.set_attendance(event_id, attendees)?;
        }
        AttendanceChange::Clear => store.set_attendance(event_id, Vec::new())?,
        AttendanceChange::Interactive => {
            let Some(attendees) = select_attendees(store, event_id, &label)? else {
                return Ok(());
            };
            store.set_attendance(event_id, attendees)?;
        }
    }

    let count = store.event(event_id).map(|e| e.attendance.len()).unwrap_or_default();
    println!("{} {} attended {}", "Saved:".green(), count, label);
    Ok(())
}

/// Checklist of every member, pre-ticked with the current attendance.
fn select_attendees(
    store: &Store,
    event_id: EventId,
    label: &str,
) -> Result<Option<Vec<MemberId>>> {
    if store.members().is_empty() {
        println!("{}", "No members to mark. Add members first.".dimmed());
        return Ok(None);
    }

    let event = store.event(event_id).ok_or(ImpactersError::EventNotFound(event_id))?;
    let items: Vec<String> = store.members().iter().map(|m| m.name.clone()).collect();
    let defaults: Vec<bool> = store.members().iter().map(|m| event.attended_by(m.id)).collect();

    let selections = MultiSelect::new()
        .with_prompt(format!("Attendance for {} (space to toggle, enter to save)", label))
        .items(&items)
        .defaults(&defaults)
        .interact()?;

    Ok(Some(
        selections.into_iter().map(|i| store.members()[i].id).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_replaces_attendance() {
        let mut store = Store::with_demo_data();
        run(
            &mut store,
            "Game Night",
            AttendanceChange::Set(vec!["Jane Smith".into(), "mary garcia".into()]),
        )
        .unwrap();

        let game_night = &store.events()[2];
        assert_eq!(game_night.attendance.len(), 2);
        assert!(game_night.attended_by(store.members()[1].id));
        assert!(game_night.attended_by(store.members()[3].id));
    }

    #[test]
    fn unknown_member_leaves_attendance_unchanged() {
        let mut store = Store::with_demo_data();
        let result = run(
            &mut store,
            "Weekly Bible Study",
            AttendanceChange::Set(vec!["John Doe".into(), "Nobody".into()]),
        );

        assert!(result.is_err());
        assert_eq!(store.events()[0].attendance.len(), 2);
    }

    #[test]
    fn toggle_flips_presence() {
        let mut store = Store::with_demo_data();
        let john = store.members()[0].id;

        run(&mut store, "Weekly Bible Study", AttendanceChange::Toggle("John Doe".into())).unwrap();
        assert!(!store.events()[0].attended_by(john));

        run(&mut store, "Weekly Bible Study", AttendanceChange::Toggle("John Doe".into())).unwrap();
        assert!(store.events()[0].attended_by(john));
    }

    #[test]
    fn clear_marks_nobody() {
        let mut store = Store::with_demo_data();
        run(&mut store, "Community Outreach", AttendanceChange::Clear).unwrap();
        assert!(store.events()[1].attendance.is_empty());
    }
}
