use anyhow::Result;
use chrono::Utc;

use studyloop_lib::reviews::{ReviewInterval, ReviewItem};

use crate::app::{short_id, App};
use crate::render::terminal::{due_label, paint, status_color, truncate, Color};
use crate::OutputFormat;

fn item_json(app: &App, item: &ReviewItem<'_>, completed: bool) -> serde_json::Value {
    serde_json::json!({
        "entryId": item.entry.id.to_string(),
        "subject": app.subject_name(item.entry.subject_id),
        "topic": item.entry.topic,
        "question": item.entry.question,
        "interval": item.interval,
        "reviewDate": item.review_date.to_rfc3339(),
        "daysDue": item.days_due,
        "status": item.status(),
        "completed": completed,
    })
}

/// Items paired with their completion flag, completed ones dropped unless asked for
fn visible<'a>(app: &App, items: &[ReviewItem<'a>], include_completed: bool) -> Vec<(ReviewItem<'a>, bool)> {
    items
        .iter()
        .map(|item| (*item, app.workspace.is_review_complete(item.entry.id, item.review_date)))
        .filter(|(_, done)| include_completed || !done)
        .collect()
}

pub fn run_list(app: &App, include_completed: bool, format: &OutputFormat, use_color: bool) -> Result<()> {
    let now = Utc::now();
    let buckets = app.workspace.review_buckets(now);
    let stats = app.workspace.review_stats(now);

    let sections = [
        ("Overdue", &buckets.overdue),
        ("Due today", &buckets.due_today),
        ("This week", &buckets.upcoming),
    ];

    match format {
        OutputFormat::Json => {
            let mut output = serde_json::json!({ "stats": stats });
            for (key, items) in [
                ("overdue", &buckets.overdue),
                ("dueToday", &buckets.due_today),
                ("upcoming", &buckets.upcoming),
            ] {
                let list: Vec<serde_json::Value> = visible(app, items, include_completed)
                    .iter()
                    .map(|(item, done)| item_json(app, item, *done))
                    .collect();
                output[key] = serde_json::Value::Array(list);
            }
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let mut shown = 0;
            for (title, items) in sections {
                let rows = visible(app, items, include_completed);
                if rows.is_empty() {
                    continue;
                }
                shown += rows.len();

                println!("{}", paint(title, Color::BOLD, use_color));
                for (item, done) in &rows {
                    let check = if *done { "[x]" } else { "[ ]" };
                    let due = format!("{:<16}", due_label(item.days_due));
                    println!(
                        "  {} {} {:<4} {} {:<16} {}",
                        check,
                        paint(&short_id(item.entry.id), Color::GRAY, use_color),
                        item.interval.short_label(),
                        paint(&due, status_color(item.status()), use_color),
                        truncate(&app.subject_name(item.entry.subject_id), 16),
                        truncate(&item.entry.topic, 40)
                    );
                }
                println!();
            }

            if shown == 0 {
                println!("Nothing to review.");
                println!();
            }

            println!(
                "{} overdue, {} due today, {} this week, {} completed",
                stats.overdue, stats.due_today, stats.upcoming, stats.completed
            );
        }
    }

    Ok(())
}

pub fn run_done(app: &mut App, query: &str, interval: ReviewInterval, format: &OutputFormat) -> Result<()> {
    let entry = app.find_error(query)?;
    let review_date = entry.review_date(interval);

    let newly_completed = app.workspace.mark_review_complete(entry.id, review_date)?;

    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "entryId": entry.id.to_string(),
                    "interval": interval,
                    "reviewDate": review_date.to_rfc3339(),
                    "newlyCompleted": newly_completed,
                }))?
            );
        }
        OutputFormat::Plain => {
            if newly_completed {
                println!("Reviewed: {} ({})", entry.topic, interval.label());
            } else {
                println!("Already reviewed: {} ({})", entry.topic, interval.label());
            }
        }
    }

    Ok(())
}
