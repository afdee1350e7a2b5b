use anyhow::{Context, Result};
use chrono::{Local, Utc};

use studyloop_lib::notebook::{ErrorEntry, NewErrorEntry};

use crate::app::{short_id, App};
use crate::render::terminal::{paint, rule, truncate, Color};
use crate::OutputFormat;

fn entry_json(app: &App, entry: &ErrorEntry) -> serde_json::Value {
    serde_json::json!({
        "id": entry.id.to_string(),
        "subjectId": entry.subject_id.to_string(),
        "subject": app.subject_name(entry.subject_id),
        "topic": entry.topic,
        "question": entry.question,
        "explanation": entry.explanation,
        "date": entry.date.to_rfc3339(),
        "reviewDates": entry.review_dates.iter().map(|d| d.to_rfc3339()).collect::<Vec<_>>(),
    })
}

fn print_entries(app: &App, entries: &[&ErrorEntry], format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = entries.iter().map(|e| entry_json(app, e)).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("No errors found.");
                return Ok(());
            }

            println!("{:<8} {:<10} {:<16} {:<24} Question", "Id", "Logged", "Subject", "Topic");
            println!("{} {} {} {} {}", rule(8), rule(10), rule(16), rule(24), rule(30));

            for entry in entries {
                println!(
                    "{} {:<10} {:<16} {:<24} {}",
                    paint(&short_id(entry.id), Color::GRAY, use_color),
                    entry.date.with_timezone(&Local).format("%Y-%m-%d"),
                    truncate(&app.subject_name(entry.subject_id), 16),
                    truncate(&entry.topic, 24),
                    truncate(&entry.question, 60)
                );
            }

            println!("\n{} errors", entries.len());
        }
    }

    Ok(())
}

pub fn run_list(app: &App, subject: Option<&str>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let log = &app.workspace.state().error_log;
    let entries: Vec<&ErrorEntry> = match subject {
        Some(query) => {
            let subject = app.find_subject(query)?;
            log.for_subject(subject.id).collect()
        }
        None => log.list().iter().collect(),
    };

    print_entries(app, &entries, format, use_color)
}

pub fn run_search(app: &App, term: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let entries = app.workspace.search_errors(term);
    print_entries(app, &entries, format, use_color)
}

pub fn run_add(
    app: &mut App,
    subject: &str,
    topic: String,
    question: String,
    explanation: Option<String>,
    format: &OutputFormat,
) -> Result<()> {
    let subject = app.find_subject(subject)?;
    let request = NewErrorEntry {
        subject_id: subject.id,
        topic,
        question,
        explanation,
    };
    let entry = app
        .workspace
        .log_error(request, Utc::now())
        .context("Failed to log error")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry_json(app, &entry))?),
        OutputFormat::Plain => {
            println!("Logged error {} for {}", short_id(entry.id), subject.name);
            let dates: Vec<String> = entry
                .review_dates
                .iter()
                .map(|d| d.with_timezone(&Local).format("%Y-%m-%d").to_string())
                .collect();
            println!("  Reviews: {}", dates.join(", "));
        }
    }

    Ok(())
}

pub fn run_remove(app: &mut App, query: &str, format: &OutputFormat) -> Result<()> {
    let entry = app.find_error(query)?;
    let removed = app.workspace.remove_error(entry.id)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entry_json(app, &removed))?),
        OutputFormat::Plain => println!("Removed error: {} ({})", removed.topic, short_id(removed.id)),
    }

    Ok(())
}
