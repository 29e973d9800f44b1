mod agenda;
mod cli;
mod clock;
mod codec;
mod render;
mod resolver;
mod types;
mod urgency;

use chrono::NaiveDate;
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

use cli::Cli;
use clock::CalendarClock;
use types::{StoredTask, Task};
use urgency::Urgency;

/// One task as emitted in JSON output: the record plus its classification
#[derive(serde::Serialize)]
struct TaskView {
    #[serde(flatten)]
    task: Task,
    urgency: Urgency,
    due_label: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let clock = match &cli.date {
        Some(date) => CalendarClock::fixed(NaiveDate::parse_from_str(date, "%Y-%m-%d")?),
        None => CalendarClock::new(&cli.tz)?,
    };
    let today = clock.today();

    if let Some(text) = &cli.resolve {
        return match resolver::resolve(text, today) {
            Some(date) => {
                println!("{}", codec::encode(date));
                Ok(())
            }
            None => Err(format!("could not resolve '{text}' to a date").into()),
        };
    }

    let input = cli
        .input
        .as_ref()
        .ok_or("--input is required unless --resolve is given")?;
    let rows: Vec<StoredTask> = serde_json::from_str(&fs::read_to_string(input)?)?;
    // Completed tasks never reach the urgency views
    let tasks: Vec<Task> = rows
        .into_iter()
        .map(Task::from)
        .filter(|t| !t.completed)
        .collect();

    let tasks = match cli.mode.as_str() {
        "list" => agenda::order_by_urgency(tasks, today),
        "urgent" => agenda::urgent_tasks(tasks, today),
        "today" => agenda::due_today(tasks, today),
        "remind" => agenda::reminder_window(tasks, today, cli.horizon),
        _ => return Err("Invalid mode. Use: list, urgent, today, remind".into()),
    };

    let output = match cli.format.as_str() {
        "json" => {
            let views: Vec<TaskView> = tasks
                .into_iter()
                .map(|task| TaskView {
                    urgency: urgency::classify(task.due_date, today),
                    due_label: render::due_label(task.due_date, today),
                    task,
                })
                .collect();
            serde_json::to_string_pretty(&views)?
        }
        "md" if cli.mode == "remind" => render::render_digest_markdown(&tasks, today),
        "md" => render::render_tasks_markdown(&tasks, today),
        _ => return Err("Invalid format".into()),
    };

    if let Some(out_path) = cli.output {
        fs::write(out_path, output)?;
    } else {
        io::stdout().write_all(output.as_bytes())?;
    }

    Ok(())
}
