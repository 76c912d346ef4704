//! The interactive shell.
//!
//! Each input line is split with shell quoting rules and parsed by clap as
//! one command. The session owns the store for its whole lifetime; nothing
//! is written to disk except exported reports.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};
use dialoguer::Input;
use impacters_core::Store;
use impacters_core::config::AppConfig;
use impacters_core::export::{SheetWriter, default_writer};
use impacters_core::seed::load_demo_data;
use owo_colors::OwoColorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands::attend::AttendanceChange;
use crate::commands::members::MemberFields;
use crate::commands::{attend, dashboard, events, import, members, report};

#[derive(Parser)]
#[command(name = "impacters", no_binary_name = true)]
#[command(about = "Members, events, attendance and reminders")]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Upcoming events plus this and next month's birthdays and anniversaries
    Dashboard,
    /// List members, optionally filtered by name
    Members {
        /// Case-insensitive part of a name
        search: Option<String>,
    },
    /// Add, edit or delete a member
    Member {
        #[command(subcommand)]
        action: MemberAction,
    },
    /// Add members from a CSV file with name,email,phone,birthday,anniversary columns
    Import {
        path: PathBuf,
    },
    /// List events, newest first
    Events,
    /// Add, edit or delete an event
    Event {
        #[command(subcommand)]
        action: EventAction,
    },
    /// Record who attended an event (opens a checklist without flags)
    Attend {
        /// Event title or id
        event: String,

        /// Exactly these members attended (comma-separated names or ids)
        #[arg(long, value_delimiter = ',', num_args = 1.., conflicts_with_all = ["toggle", "clear"])]
        set: Option<Vec<String>>,

        /// Flip one member's presence
        #[arg(long, conflicts_with = "clear")]
        toggle: Option<String>,

        /// Mark nobody present
        #[arg(long)]
        clear: bool,
    },
    /// Show the attendance table
    Report,
    /// Save the attendance report as a spreadsheet
    Export {
        /// Output file (defaults to export_dir/report_filename from config)
        path: Option<PathBuf>,
    },
    /// Load the sample members and events
    Demo,
    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand)]
enum MemberAction {
    /// Add a member (prompts for anything not given when the name is omitted)
    Add {
        name: Option<String>,
        #[command(flatten)]
        fields: MemberFields,
    },
    /// Change a member (prompts for every field when no flags are given)
    Edit {
        /// Member name or id
        member: String,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: MemberFields,
    },
    /// Delete a member and their attendance records
    Delete {
        /// Member name or id
        member: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum EventAction {
    /// Add an event (prompts when the title or date is missing)
    Add {
        title: Option<String>,
        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change an event (prompts for every field when no flags are given)
    Edit {
        /// Event title or id
        event: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete an event
    Delete {
        /// Event title or id
        event: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    pub store: Store,
    pub config: AppConfig,
    pub today: NaiveDate,
    writer: Option<Box<dyn SheetWriter>>,
}

impl Session {
    pub fn new(store: Store, config: AppConfig, today: NaiveDate) -> Self {
        Session {
            store,
            config,
            today,
            writer: default_writer(),
        }
    }

    pub fn with_writer(mut self, writer: Option<Box<dyn SheetWriter>>) -> Self {
        self.writer = writer;
        self
    }

    /// Run one input line.
    pub async fn execute(&mut self, line: &str) -> Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let Some(words) = shlex::split(line) else {
            anyhow::bail!("Unbalanced quotes in: {}", line.trim());
        };

        self.execute_words(words).await
    }

    /// Run one already-split command.
    pub async fn execute_words(&mut self, words: Vec<String>) -> Result<Flow> {
        let parsed = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed,
            Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
                e.print()?;
                return Ok(Flow::Continue);
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(today = %self.today, "Running command");

        match parsed.command {
            ShellCommand::Dashboard => {
                dashboard::run(&self.store, self.today, self.config.upcoming_limit)?
            }
            ShellCommand::Members { search } => members::list(&self.store, search.as_deref())?,
            ShellCommand::Member { action } => match action {
                MemberAction::Add { name, fields } => members::add(&mut self.store, name, fields)?,
                MemberAction::Edit {
                    member,
                    name,
                    fields,
                } => members::edit(&mut self.store, &member, name, fields)?,
                MemberAction::Delete { member, yes } => {
                    members::delete(&mut self.store, &member, yes)?
                }
            },
            ShellCommand::Import { path } => import::run(&mut self.store, &path).await?,
            ShellCommand::Events => events::list(&self.store)?,
            ShellCommand::Event { action } => match action {
                EventAction::Add {
                    title,
                    date,
                    description,
                } => events::add(&mut self.store, title, date, description)?,
                EventAction::Edit {
                    event,
                    title,
                    date,
                    description,
                } => events::edit(&mut self.store, &event, title, date, description)?,
                EventAction::Delete { event, yes } => events::delete(&mut self.store, &event, yes)?,
            },
            ShellCommand::Attend {
                event,
                set,
                toggle,
                clear,
            } => {
                let change = match (set, toggle) {
                    (Some(members), _) => AttendanceChange::Set(members),
                    (None, Some(member)) => AttendanceChange::Toggle(member),
                    (None, None) if clear => AttendanceChange::Clear,
                    (None, None) => AttendanceChange::Interactive,
                };
                attend::run(&mut self.store, &event, change)?
            }
            ShellCommand::Report => report::show(&self.store)?,
            ShellCommand::Export { path } => {
                report::export(
                    &self.store,
                    self.writer.as_deref(),
                    path.as_deref(),
                    self.config.report_path(),
                )?;
            }
            ShellCommand::Demo => {
                load_demo_data(&mut self.store);
                println!(
                    "{} demo data ({} members, {} events in total)",
                    "Loaded".green(),
                    self.store.members().len(),
                    self.store.events().len()
                );
            }
            ShellCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Run a line, printing any failure instead of returning it.
    async fn dispatch(&mut self, line: &str) -> Flow {
        match self.execute(line).await {
            Ok(flow) => flow,
            Err(e) => {
                eprintln!("{}", format!("{e:#}").red());
                Flow::Continue
            }
        }
    }
}

/// Read commands until `quit` or end of input.
pub async fn run(mut session: Session) -> Result<()> {
    println!("{}", "impacters: type `help` for commands, `quit` to leave".dimmed());
    session.dispatch("dashboard").await;

    if std::io::stdin().is_terminal() {
        loop {
            println!();
            let line: String = Input::new()
                .with_prompt("impacters")
                .allow_empty(true)
                .interact_text()?;

            if session.dispatch(&line).await == Flow::Quit {
                break;
            }
        }
    } else {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            if session.dispatch(&line).await == Flow::Quit {
                break;
            }
        }
    }

    Ok(())
}
