use anyhow::{Context, Result};

use studyloop_lib::subjects::{SubjectCategory, SubjectColor, MAX_SUBJECTS};

use crate::app::{short_id, App};
use crate::render::terminal::{hours, paint, rule, subject_color, Color};
use crate::OutputFormat;

pub fn run_list(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let subjects = app.workspace.state().subjects.list();
    let next_id = app.workspace.next_subject().map(|s| s.id);

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = subjects
                .iter()
                .map(|s| {
                    serde_json::json!({
                        "id": s.id.to_string(),
                        "name": s.name,
                        "category": s.category,
                        "color": s.color,
                        "totalHours": s.total_hours,
                        "isNext": Some(s.id) == next_id,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if subjects.is_empty() {
                println!("No subjects yet.");
                return Ok(());
            }

            let name_width = subjects.iter().map(|s| s.name.chars().count()).max().unwrap_or(4).max(4);

            println!("  {:<8} {:<width$} {:<12} Hours", "Id", "Name", "Category", width = name_width);
            println!("  {} {} {} {}", rule(8), rule(name_width), rule(12), rule(6));

            for subject in subjects {
                let marker = if Some(subject.id) == next_id { "> " } else { "  " };
                let name = format!("{:<width$}", subject.name, width = name_width);
                println!(
                    "{}{} {} {:<12} {}",
                    marker,
                    paint(&short_id(subject.id), Color::GRAY, use_color),
                    paint(&name, subject_color(subject.color), use_color),
                    subject.category.label(),
                    hours(subject.total_hours)
                );
            }

            println!("\n{}/{} subjects", subjects.len(), MAX_SUBJECTS);
        }
    }

    Ok(())
}

pub fn run_add(
    app: &mut App,
    name: &str,
    category: SubjectCategory,
    color: SubjectColor,
    format: &OutputFormat,
) -> Result<()> {
    let subject = app
        .workspace
        .add_subject(name, category, color)
        .context("Failed to add subject")?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&subject)?),
        OutputFormat::Plain => println!("Added subject: {} ({})", subject.name, short_id(subject.id)),
    }

    Ok(())
}

pub fn run_remove(app: &mut App, query: &str, format: &OutputFormat) -> Result<()> {
    let subject = app.find_subject(query)?;
    let removed = app.workspace.remove_subject(subject.id)?;
    let orphaned = app.workspace.state().error_log.for_subject(removed.id).count();

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "removed": removed,
                    "orphanedErrors": orphaned,
                }))?
            );
        }
        OutputFormat::Plain => {
            println!("Removed subject: {}", removed.name);
            if orphaned > 0 {
                println!("  {} logged errors still reference it", orphaned);
            }
        }
    }

    Ok(())
}

pub fn run_log(app: &mut App, query: &str, study_hours: f64, format: &OutputFormat) -> Result<()> {
    let subject = app.find_subject(query)?;
    let updated = app.workspace.log_study_time(subject.id, study_hours)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&updated)?),
        OutputFormat::Plain => println!(
            "{}: +{} (total {})",
            updated.name,
            hours(study_hours),
            hours(updated.total_hours)
        ),
    }

    Ok(())
}
