use anyhow::Result;
use chrono::Local;

use crate::app::App;
use crate::render::terminal::{hours, paint, progress_bar, subject_color, Color};
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let summary = app.workspace.dashboard(&Local::now());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Plain => {
            println!(
                "Today      {} / {}  {} {:.0}%",
                hours(summary.today_hours),
                hours(summary.daily_goal_hours),
                progress_bar(summary.goal_progress, 20),
                summary.goal_progress
            );
            println!("Sessions   {} today", summary.sessions_today);

            match &summary.next_subject {
                Some(subject) => println!(
                    "Next up    {} ({})",
                    paint(&subject.name, subject_color(subject.color), use_color),
                    subject.category
                ),
                None => println!("Next up    (no subjects, add one with `studyloop subjects add`)"),
            }

            println!(
                "Subjects   {}/{}",
                summary.subject_count, summary.subject_limit
            );
            println!("Errors     {} logged", summary.error_count);

            let reviews = &summary.reviews;
            let overdue = format!("{} overdue", reviews.overdue);
            println!(
                "Reviews    {}, {} due today, {} this week, {} done",
                if reviews.overdue > 0 {
                    paint(&overdue, Color::RED, use_color)
                } else {
                    overdue
                },
                reviews.due_today,
                reviews.upcoming,
                reviews.completed
            );
        }
    }

    Ok(())
}
