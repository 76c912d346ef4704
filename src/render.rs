//! Terminal rendering for impacters types.
//!
//! Extension traits that add colored output to impacters-core types using
//! owo_colors. Padding is applied before coloring so ANSI codes never skew
//! column widths. Colors are dropped when stdout is not a terminal.

use impacters_core::date::{format_date, format_month_day};
use impacters_core::reminder::MonthlyReminders;
use impacters_core::{AttendanceReport, DateField, Event, Member};
use owo_colors::{OwoColorize, Stream};

/// Number of id characters shown in lists; any unique prefix resolves.
const SHORT_ID_LEN: usize = 8;

pub trait Render {
    fn render(&self) -> String;
}

pub fn short_id(id: &impl ToString) -> String {
    id.to_string().chars().take(SHORT_ID_LEN).collect()
}

fn width(s: &str) -> usize {
    s.chars().count()
}

fn bold(s: &str) -> String {
    s.if_supports_color(Stream::Stdout, |t| t.bold()).to_string()
}

fn dimmed(s: &str) -> String {
    s.if_supports_color(Stream::Stdout, |t| t.dimmed()).to_string()
}

fn green(s: &str) -> String {
    s.if_supports_color(Stream::Stdout, |t| t.green()).to_string()
}

impl Render for Member {
    fn render(&self) -> String {
        let mut line = format!("{} {}", dimmed(&short_id(&self.id)), bold(&self.name));

        let contact: Vec<&str> = [self.email.as_str(), self.phone.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !contact.is_empty() {
            line.push_str(&format!("  {}", dimmed(&contact.join(" · "))));
        }

        let dates: Vec<String> = DateField::ALL
            .iter()
            .filter_map(|field| {
                self.date(*field)
                    .map(|d| format!("{} {}", field, format_date(&d)))
            })
            .collect();
        if !dates.is_empty() {
            line.push_str(&format!("  {}", dates.join(", ")));
        }

        line
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let attended = format!("({} attended)", self.attendance.len());
        let mut line = format!(
            "{} {} {} {}",
            dimmed(&short_id(&self.id)),
            bold(&format_date(&self.date)),
            self.title,
            dimmed(&attended)
        );
        if !self.description.is_empty() {
            line.push_str(&format!("\n           {}", dimmed(&self.description)));
        }
        line
    }
}

impl Render for MonthlyReminders<'_> {
    fn render(&self) -> String {
        let mut lines = vec![bold(self.field.plural())];

        for (label, bucket) in [("This Month", &self.this_month), ("Next Month", &self.next_month)] {
            let heading = format!("  {} ({})", label, bucket.month_name());
            lines.push(dimmed(&heading));

            if bucket.is_empty() {
                let empty = format!(
                    "    No {} {}.",
                    self.field.plural().to_lowercase(),
                    label.to_lowercase()
                );
                lines.push(dimmed(&empty));
                continue;
            }

            for member in &bucket.members {
                let day = member
                    .date(self.field)
                    .map(|d| format_month_day(&d))
                    .unwrap_or_default();
                lines.push(format!("    {:<24} {}", member.name, dimmed(&day)));
            }
        }

        lines.join("\n")
    }
}

/// Dashboard list of upcoming events.
pub fn render_upcoming(events: &[&Event]) -> String {
    let mut lines = vec![bold("Upcoming Events")];

    if events.is_empty() {
        lines.push(format!("  {}", dimmed("No upcoming events.")));
        return lines.join("\n");
    }

    for event in events {
        let day = format!("{:<12}", format_month_day(&event.date));
        lines.push(format!("  {} {}", dimmed(&day), bold(&event.title)));
        if !event.description.is_empty() {
            lines.push(format!("  {:<12} {}", "", dimmed(&event.description)));
        }
    }

    lines.join("\n")
}

pub const NO_REPORT_DATA: &str = "No data to display. Add members and events to see reports.";

impl Render for AttendanceReport<'_> {
    fn render(&self) -> String {
        if self.is_empty() {
            return dimmed(NO_REPORT_DATA);
        }

        let total = self.total_events();
        let totals: Vec<String> = self
            .rows
            .iter()
            .map(|r| format!("{} / {} ({}%)", r.attended_count, total, r.percentage))
            .collect();

        let name_width = self
            .rows
            .iter()
            .map(|r| width(&r.member.name))
            .chain([width("Member Name")])
            .max()
            .unwrap_or_default();
        let event_widths: Vec<usize> = self
            .events
            .iter()
            .map(|e| width(&e.title).max(10))
            .collect();
        let total_width = totals
            .iter()
            .map(|t| width(t))
            .chain([width("Total")])
            .max()
            .unwrap_or_default();

        let mut titles = format!("{:<name_width$}", "Member Name");
        let mut dates = format!("{:<name_width$}", "");
        for (event, &w) in self.events.iter().zip(&event_widths) {
            titles.push_str(&format!("  {:^w$}", event.title));
            dates.push_str(&format!("  {:^w$}", format_date(&event.date)));
        }
        titles.push_str(&format!("  {:^total_width$}", "Total"));

        let mut lines = vec![bold(&titles), dimmed(&dates)];

        for (row, total_text) in self.rows.iter().zip(&totals) {
            let mut line = format!("{:<name_width$}", row.member.name);
            for (present, &w) in row.cells.iter().zip(&event_widths) {
                let cell = if *present {
                    green(&format!("{:^w$}", "✔"))
                } else {
                    dimmed(&format!("{:^w$}", "-"))
                };
                line.push_str("  ");
                line.push_str(&cell);
            }
            line.push_str(&format!("  {:^total_width$}", total_text));
            lines.push(line);
        }

        lines.join("\n")
    }
}
