pub mod attend;
pub mod dashboard;
pub mod events;
pub mod import;
pub mod members;
pub mod report;

use anyhow::Result;
use chrono::NaiveDate;
use dialoguer::Input;
use impacters_core::date::{format_optional_date, parse_date, parse_required_date};
use impacters_core::{EventId, MemberId, Store};
use owo_colors::OwoColorize;

use crate::render::short_id;

/// Shortest id prefix accepted, so short names are never read as ids.
const MIN_ID_PREFIX: usize = 4;

/// Find a member by exact name (any case) or by unique id prefix.
pub fn resolve_member(store: &Store, query: &str) -> Result<MemberId> {
    let candidates = store.members().iter().map(|m| (m.id, m.name.as_str())).collect();
    resolve("member", query, candidates)
}

/// Find an event by exact title (any case) or by unique id prefix.
pub fn resolve_event(store: &Store, query: &str) -> Result<EventId> {
    let candidates = store.events().iter().map(|e| (e.id, e.title.as_str())).collect();
    resolve("event", query, candidates)
}

fn resolve<T>(kind: &str, query: &str, candidates: Vec<(T, &str)>) -> Result<T>
where
    T: Copy + ToString,
{
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("No {} given", kind);
    }

    let lowered = query.to_lowercase();
    let by_name: Vec<&(T, &str)> = candidates
        .iter()
        .filter(|(_, name)| name.to_lowercase() == lowered)
        .collect();

    match by_name.as_slice() {
        [(id, _)] => return Ok(*id),
        [] => {}
        many => {
            let ids: Vec<String> = many.iter().map(|(id, _)| short_id(id)).collect();
            anyhow::bail!(
                "Several {}s are named '{}'. Use an id instead: {}",
                kind,
                query,
                ids.join(", ")
            );
        }
    }

    if query.len() >= MIN_ID_PREFIX {
        let by_id: Vec<&(T, &str)> = candidates
            .iter()
            .filter(|(id, _)| id.to_string().starts_with(&lowered))
            .collect();

        match by_id.as_slice() {
            [(id, _)] => return Ok(*id),
            [] => {}
            _ => anyhow::bail!("Id prefix '{}' matches more than one {}", query, kind),
        }
    }

    anyhow::bail!("No {} matches '{}'", kind, query)
}

/// Parse a date flag where an empty value clears the date.
pub fn parse_optional_date_arg(input: &str) -> Result<Option<NaiveDate>> {
    if input.trim().is_empty() {
        return Ok(None);
    }
    parse_required_date(input)
        .map(Some)
        .map_err(|e| anyhow::anyhow!(e))
}

pub fn parse_date_arg(input: &str) -> Result<NaiveDate> {
    parse_required_date(input).map_err(|e| anyhow::anyhow!(e))
}

/// Prompt for free text, pre-filled with `current`.
pub fn prompt_text(prompt: &str, current: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .default(current.to_string())
        .show_default(!current.is_empty())
        .allow_empty(true)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Prompt for an optional date, retrying until the input is empty or valid.
pub fn prompt_optional_date(prompt: &str, current: Option<NaiveDate>) -> Result<Option<NaiveDate>> {
    let current = format_optional_date(current.as_ref());
    loop {
        let input = prompt_text(&format!("{} (YYYY-MM-DD, skip)", prompt), &current)?;
        if input.is_empty() {
            return Ok(None);
        }
        match parse_date(&input) {
            Some(date) => return Ok(Some(date)),
            None => eprintln!("  {}", format!("Invalid date '{}'", input).red()),
        }
    }
}

/// Prompt for a required date, retrying on parse errors.
pub fn prompt_date(prompt: &str, current: Option<NaiveDate>) -> Result<NaiveDate> {
    let current = format_optional_date(current.as_ref());
    loop {
        let input = prompt_text(&format!("{} (YYYY-MM-DD)", prompt), &current)?;
        match parse_date_arg(&input) {
            Ok(date) => return Ok(date),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impacters_core::MemberDraft;

    #[test]
    fn resolves_by_name_ignoring_case() {
        let store = Store::with_demo_data();
        let id = resolve_member(&store, "jane SMITH").unwrap();
        assert_eq!(store.member(id).unwrap().name, "Jane Smith");

        let event = resolve_event(&store, "game night").unwrap();
        assert_eq!(store.event(event).unwrap().title, "Game Night");
    }

    #[test]
    fn resolves_by_id_prefix() {
        let store = Store::with_demo_data();
        let mary = &store.members()[3];
        let prefix = short_id(&mary.id);
        assert_eq!(resolve_member(&store, &prefix).unwrap(), mary.id);
        assert_eq!(resolve_member(&store, &mary.id.to_string()).unwrap(), mary.id);
    }

    #[test]
    fn duplicate_names_need_an_id() {
        let mut store = Store::new();
        store.add_member(MemberDraft::new("Sam"));
        store.add_member(MemberDraft::new("sam"));

        let err = resolve_member(&store, "Sam").unwrap_err();
        assert!(err.to_string().contains("Use an id instead"));
    }

    #[test]
    fn unknown_query_fails() {
        let store = Store::with_demo_data();
        assert!(resolve_member(&store, "Nobody").is_err());
        assert!(resolve_member(&store, "").is_err());
        assert!(resolve_event(&store, "abc").is_err());
    }

    #[test]
    fn optional_date_arg() {
        assert_eq!(parse_optional_date_arg("").unwrap(), None);
        assert_eq!(
            parse_optional_date_arg("1990-05-15").unwrap(),
            NaiveDate::from_ymd_opt(1990, 5, 15)
        );
        assert!(parse_optional_date_arg("15/05/1990").is_err());
    }
}
