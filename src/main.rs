mod commands;
mod logging;
mod render;
mod shell;

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use impacters_core::Store;
use impacters_core::config::AppConfig;
use owo_colors::OwoColorize;

use crate::commands::parse_date_arg;
use crate::shell::Session;

#[derive(Parser)]
#[command(name = "impacters")]
#[command(about = "Track members, events and attendance, with birthday and anniversary reminders")]
#[command(version)]
struct Cli {
    /// Start with the sample members and events
    #[arg(long)]
    demo: bool,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date_arg)]
    today: Option<NaiveDate>,

    /// Run a single shell command and exit, e.g. `impacters --demo report`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load()?;
    logging::init(&config.log_level);

    let today = cli.today.unwrap_or_else(|| chrono::Local::now().date_naive());
    let store = if cli.demo || config.load_demo_data {
        Store::with_demo_data()
    } else {
        Store::new()
    };

    let mut session = Session::new(store, config, today);

    if cli.command.is_empty() {
        return shell::run(session).await;
    }

    if let Err(e) = session.execute_words(cli.command).await {
        eprintln!("{}", format!("{e:#}").red());
        std::process::exit(1);
    }

    Ok(())
}
