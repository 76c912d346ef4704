//! Member import from comma-separated text.
//!
//! The first non-blank line is a header that must name every column in
//! [`REQUIRED_COLUMNS`] (any case, any order); extra columns are ignored.
//! Each following line becomes one [`MemberDraft`]. Parsing is all-or-nothing:
//! any validation failure returns an error and no drafts at all.

use tracing::{debug, warn};

use crate::date::parse_date;
use crate::error::{ImpactersError, ImpactersResult};
use crate::member::MemberDraft;

pub const REQUIRED_COLUMNS: [&str; 5] = ["name", "email", "phone", "birthday", "anniversary"];

/// Positions of the required columns within the header.
struct ColumnMap {
    name: usize,
    email: usize,
    phone: usize,
    birthday: usize,
    anniversary: usize,
}

impl ColumnMap {
    fn from_header(line: &str) -> ImpactersResult<Self> {
        let headers: Vec<String> = split_fields(line)
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        let position = |column: &str| headers.iter().position(|h| h == column);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .into_iter()
            .filter(|&column| position(column).is_none())
            .collect();

        match (
            position("name"),
            position("email"),
            position("phone"),
            position("birthday"),
            position("anniversary"),
        ) {
            (Some(name), Some(email), Some(phone), Some(birthday), Some(anniversary)) => {
                Ok(ColumnMap {
                    name,
                    email,
                    phone,
                    birthday,
                    anniversary,
                })
            }
            _ => Err(ImpactersError::Validation(format!(
                "CSV header must contain: {} (missing: {})",
                REQUIRED_COLUMNS.join(", "),
                missing.join(", ")
            ))),
        }
    }
}

/// Parse CSV text into member drafts (ids are assigned later by the store).
pub fn parse_members_csv(text: &str) -> ImpactersResult<Vec<MemberDraft>> {
    let lines: Vec<&str> = text
        .split(['\n', '\r'])
        .filter(|line| !line.trim().is_empty())
        .collect();

    if lines.len() < 2 {
        return Err(ImpactersError::Validation(
            "CSV must have a header row and at least one data row.".into(),
        ));
    }

    let columns = ColumnMap::from_header(lines[0])?;

    let drafts: Vec<MemberDraft> = lines[1..]
        .iter()
        .enumerate()
        .map(|(i, line)| parse_row(&columns, line, i + 2))
        .collect();

    debug!(rows = drafts.len(), "Parsed member CSV");
    Ok(drafts)
}

fn parse_row(columns: &ColumnMap, line: &str, line_number: usize) -> MemberDraft {
    let values = split_fields(line);
    let value = |index: usize| {
        values
            .get(index)
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    };

    let date = |index: usize, column: &str| {
        let raw = value(index);
        let parsed = parse_date(&raw);
        if parsed.is_none() && !raw.is_empty() {
            warn!(line = line_number, column, value = %raw, "Ignoring malformed date in CSV");
        }
        parsed
    };

    MemberDraft {
        name: value(columns.name),
        email: value(columns.email),
        phone: value(columns.phone),
        birthday: date(columns.birthday, "birthday"),
        anniversary: date(columns.anniversary, "anniversary"),
    }
}

/// Split one line on commas.
///
/// A field may be wrapped in double quotes to carry commas; `""` inside such a
/// field is a literal quote. Lines without quotes split on every comma.
fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.trim().is_empty() => {
                field.clear();
                in_quotes = true;
            }
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(c),
        }
    }
    fields.push(field);

    fields
}
