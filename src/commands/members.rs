use anyhow::Result;
use clap::Args;
use dialoguer::Confirm;
use impacters_core::{ImpactersError, Member, MemberDraft, Store};
use owo_colors::OwoColorize;

use super::{parse_optional_date_arg, prompt_optional_date, prompt_text, resolve_member};
use crate::render::Render;

/// Contact fields shared by `member add` and `member edit`.
#[derive(Debug, Default, Clone, Args)]
pub struct MemberFields {
    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Birthday (YYYY-MM-DD, empty to clear)
    #[arg(long)]
    pub birthday: Option<String>,

    /// Wedding anniversary (YYYY-MM-DD, empty to clear)
    #[arg(long)]
    pub anniversary: Option<String>,
}

impl MemberFields {
    fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.phone.is_none()
            && self.birthday.is_none()
            && self.anniversary.is_none()
    }
}

pub fn list(store: &Store, search: Option<&str>) -> Result<()> {
    let members = store.search_members(search.unwrap_or_default());

    if members.is_empty() {
        let message = match search {
            Some(term) => format!("No members match '{}'", term),
            None => "No members yet. Use `member add` or `import`.".to_string(),
        };
        println!("{}", message.dimmed());
        return Ok(());
    }

    for member in members {
        println!("{}", member.render());
    }

    Ok(())
}

pub fn add(store: &mut Store, name: Option<String>, fields: MemberFields) -> Result<()> {
    let draft = match name {
        Some(name) => {
            let mut draft = MemberDraft::new(name.trim());
            apply_fields(&mut draft, fields)?;
            draft
        }
        None => {
            let mut draft = MemberDraft::default();
            apply_fields(&mut draft, fields)?;
            prompt_member(draft)?
        }
    };

    if draft.name.is_empty() {
        return Err(ImpactersError::Validation("Member name is required.".into()).into());
    }

    let name = draft.name.clone();
    store.add_member(draft);
    println!("{} {}", "Added".green(), name.bold());
    Ok(())
}

pub fn edit(
    store: &mut Store,
    query: &str,
    name: Option<String>,
    fields: MemberFields,
) -> Result<()> {
    let id = resolve_member(store, query)?;
    let current = store.member(id).cloned().ok_or(ImpactersError::MemberNotFound(id))?;

    let mut draft = MemberDraft {
        name: current.name.clone(),
        email: current.email.clone(),
        phone: current.phone.clone(),
        birthday: current.birthday,
        anniversary: current.anniversary,
    };

    if name.is_none() && fields.is_empty() {
        draft = prompt_member(draft)?;
    } else {
        if let Some(name) = name {
            draft.name = name.trim().to_string();
        }
        apply_fields(&mut draft, fields)?;
    }

    if draft.name.is_empty() {
        return Err(ImpactersError::Validation("Member name is required.".into()).into());
    }

    let updated = Member::from_draft(id, draft);
    let line = updated.render();
    store.update_member(updated)?;
    println!("{} {}", "Updated".green(), line);
    Ok(())
}

pub fn delete(store: &mut Store, query: &str, yes: bool) -> Result<()> {
    let id = resolve_member(store, query)?;
    let name = store
        .member(id)
        .map(|m| m.name.clone())
        .ok_or(ImpactersError::MemberNotFound(id))?;

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {} and their attendance records?", name))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    store.delete_member(id)?;
    println!("{} {}", "Deleted".red(), name);
    Ok(())
}

fn apply_fields(draft: &mut MemberDraft, fields: MemberFields) -> Result<()> {
    if let Some(email) = fields.email {
        draft.email = email.trim().to_string();
    }
    if let Some(phone) = fields.phone {
        draft.phone = phone.trim().to_string();
    }
    if let Some(birthday) = fields.birthday {
        draft.birthday = parse_optional_date_arg(&birthday)?;
    }
    if let Some(anniversary) = fields.anniversary {
        draft.anniversary = parse_optional_date_arg(&anniversary)?;
    }
    Ok(())
}

/// Walk through every field, pre-filled with `draft`.
fn prompt_member(draft: MemberDraft) -> Result<MemberDraft> {
    let name = loop {
        let name = prompt_text("  Name", &draft.name)?;
        if !name.is_empty() {
            break name;
        }
        eprintln!("  {}", "Name is required".red());
    };

    Ok(MemberDraft {
        name,
        email: prompt_text("  Email (skip)", &draft.email)?,
        phone: prompt_text("  Phone (skip)", &draft.phone)?,
        birthday: prompt_optional_date("  Birthday", draft.birthday)?,
        anniversary: prompt_optional_date("  Anniversary", draft.anniversary)?,
    })
}
