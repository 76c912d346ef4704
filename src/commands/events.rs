use anyhow::Result;
use dialoguer::Confirm;
use impacters_core::{Event, EventDraft, ImpactersError, Store};
use owo_colors::OwoColorize;

use super::{parse_date_arg, prompt_date, prompt_text, resolve_event};
use crate::render::Render;

pub fn list(store: &Store) -> Result<()> {
    let events = store.events_newest_first();

    if events.is_empty() {
        println!("{}", "No events yet. Use `event add`.".dimmed());
        return Ok(());
    }

    for event in events {
        println!("{}", event.render());
    }

    Ok(())
}

pub fn add(
    store: &mut Store,
    title: Option<String>,
    date: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let date = date.as_deref().map(parse_date_arg).transpose()?;

    let draft = match (title, date) {
        (Some(title), Some(date)) => {
            EventDraft::new(title.trim(), date).with_description(description.unwrap_or_default().trim())
        }
        (title, date) => {
            let title = prompt_title(title.as_deref().unwrap_or_default())?;
            let date = prompt_date("  Date", date)?;
            let description = prompt_text("  Description (skip)", description.as_deref().unwrap_or_default())?;
            EventDraft::new(title, date).with_description(description)
        }
    };

    if draft.title.is_empty() {
        return Err(ImpactersError::Validation("Event title is required.".into()).into());
    }

    let id = store.add_event(draft);
    if let Some(event) = store.event(id) {
        println!("{} {}", "Added".green(), event.label().bold());
    }
    Ok(())
}

pub fn edit(
    store: &mut Store,
    query: &str,
    title: Option<String>,
    date: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let id = resolve_event(store, query)?;
    let mut event: Event = store.event(id).cloned().ok_or(ImpactersError::EventNotFound(id))?;

    if title.is_none() && date.is_none() && description.is_none() {
        event.title = prompt_title(&event.title)?;
        event.date = prompt_date("  Date", Some(event.date))?;
        event.description = prompt_text("  Description (skip)", &event.description)?;
    } else {
        if let Some(title) = title {
            event.title = title.trim().to_string();
        }
        if let Some(date) = date {
            event.date = parse_date_arg(&date)?;
        }
        if let Some(description) = description {
            event.description = description.trim().to_string();
        }
    }

    if event.title.is_empty() {
        return Err(ImpactersError::Validation("Event title is required.".into()).into());
    }

    let label = event.label();
    store.update_event(event)?;
    println!("{} {}", "Updated".green(), label.bold());
    Ok(())
}

pub fn delete(store: &mut Store, query: &str, yes: bool) -> Result<()> {
    let id = resolve_event(store, query)?;
    let label = store
        .event(id)
        .map(Event::label)
        .ok_or(ImpactersError::EventNotFound(id))?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {}?", label))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    store.delete_event(id)?;
    println!("{} {}", "Deleted".red(), label);
    Ok(())
}

fn prompt_title(current: &str) -> Result<String> {
    loop {
        let title = prompt_text("  Title", current)?;
        if !title.is_empty() {
            return Ok(title);
        }
        eprintln!("  {}", "Title is required".red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn add_with_title_and_date() {
        let mut store = Store::new();
        add(
            &mut store,
            Some("Prayer Meeting".into()),
            Some("2024-07-04".into()),
            Some(" Upper room ".into()),
        )
        .unwrap();

        let event = &store.events()[0];
        assert_eq!(event.title, "Prayer Meeting");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2024, 7, 4).unwrap());
        assert_eq!(event.description, "Upper room");
        assert!(event.attendance.is_empty());
    }

    #[test]
    fn malformed_date_is_rejected_before_prompting() {
        let mut store = Store::new();
        let err = add(&mut store, Some("Picnic".into()), Some("July 4".into()), None).unwrap_err();
        assert!(err.to_string().contains("Expected YYYY-MM-DD"));
        assert!(store.events().is_empty());
    }

    #[test]
    fn edit_keeps_attendance() {
        let mut store = Store::with_demo_data();
        edit(&mut store, "community outreach", None, Some("2024-05-19".into()), None).unwrap();

        let outreach = &store.events()[1];
        assert_eq!(outreach.date, NaiveDate::from_ymd_opt(2024, 5, 19).unwrap());
        assert_eq!(outreach.attendance.len(), 4);
        assert_eq!(outreach.description, "Serving at the local shelter");
    }

    #[test]
    fn delete_leaves_members_alone() {
        let mut store = Store::with_demo_data();
        delete(&mut store, "Game Night", true).unwrap();

        assert_eq!(store.events().len(), 2);
        assert_eq!(store.members().len(), 4);
    }
}
