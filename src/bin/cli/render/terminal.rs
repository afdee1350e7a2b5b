use studyloop_lib::reviews::ReviewStatus;
use studyloop_lib::subjects::SubjectColor;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
    pub const BRIGHT_RED: &str = "\x1b[91m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

pub fn subject_color(color: SubjectColor) -> &'static str {
    match color {
        SubjectColor::Blue => Color::BLUE,
        SubjectColor::Green => Color::GREEN,
        SubjectColor::Purple => Color::MAGENTA,
        SubjectColor::Orange => Color::YELLOW,
        SubjectColor::Pink => Color::BRIGHT_RED,
        SubjectColor::Teal => Color::CYAN,
    }
}

pub fn status_color(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Overdue => Color::RED,
        ReviewStatus::DueToday => Color::YELLOW,
        ReviewStatus::Upcoming => Color::BLUE,
        ReviewStatus::Later => Color::GRAY,
    }
}

/// Horizontal rule of box-drawing characters
pub fn rule(width: usize) -> String {
    "\u{2500}".repeat(width)
}

/// Fixed-width bar for a 0-100 percentage, e.g. `[#####.....]`
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}\u{2026}", kept)
}

/// "1.5h" style hours
pub fn hours(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}h", value)
    } else {
        format!("{:.1}h", value)
    }
}

/// Human description of a review's distance from today
pub fn due_label(days_due: i64) -> String {
    match days_due {
        0 => "today".to_string(),
        1 => "1 day overdue".to_string(),
        d if d > 1 => format!("{} days overdue", d),
        -1 => "tomorrow".to_string(),
        d => format!("in {} days", -d),
    }
}
