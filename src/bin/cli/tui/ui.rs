use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};

use studyloop_lib::subjects::SubjectColor;
use studyloop_lib::timer::{format_time, TimerPhase};

use super::timer_state::TimerScreen;

pub fn draw(f: &mut Frame, state: &TimerScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, chunks[0], state);
    draw_clock(f, chunks[1], state);
    draw_progress(f, chunks[2], state);
    draw_status(f, chunks[3], state);
}

fn subject_color(color: SubjectColor) -> Color {
    match color {
        SubjectColor::Blue => Color::Blue,
        SubjectColor::Green => Color::Green,
        SubjectColor::Purple => Color::Magenta,
        SubjectColor::Orange => Color::Yellow,
        SubjectColor::Pink => Color::LightRed,
        SubjectColor::Teal => Color::Cyan,
    }
}

fn phase_color(phase: TimerPhase) -> Color {
    match phase {
        TimerPhase::Focus => Color::Green,
        TimerPhase::Break => Color::Cyan,
    }
}

fn draw_header(f: &mut Frame, area: Rect, state: &TimerScreen) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", state.subject.name),
            Style::default()
                .fg(subject_color(state.subject.color))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{}  ", state.subject.category.label()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!(
            "Today {:.1}h / {:.1}h",
            state.today_hours, state.daily_goal_hours
        )),
    ]);

    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL).title(" studyloop "));
    f.render_widget(header, area);
}

fn draw_clock(f: &mut Frame, area: Rect, state: &TimerScreen) {
    let timer = &state.timer;
    let phase = match timer.phase() {
        TimerPhase::Focus => "FOCUS",
        TimerPhase::Break => "BREAK",
    };
    let status = if timer.is_paused() {
        "paused"
    } else if timer.is_running() {
        "running"
    } else {
        "stopped"
    };

    let text = vec![
        Line::from(Span::styled(
            phase,
            Style::default().fg(phase_color(timer.phase())).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format_time(timer.remaining()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(status, Style::default().fg(Color::DarkGray))),
    ];

    let top_pad = area.height.saturating_sub(text.len() as u16 + 2) / 2;
    let inner = Rect {
        y: area.y + top_pad,
        height: area.height.saturating_sub(top_pad),
        ..area
    };

    f.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner);
}

fn draw_progress(f: &mut Frame, area: Rect, state: &TimerScreen) {
    let progress = state.timer.progress().clamp(0.0, 100.0);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(phase_color(state.timer.phase())))
        .ratio(progress / 100.0)
        .label(format!("{:.0}%", progress));
    f.render_widget(gauge, area);
}

fn draw_status(f: &mut Frame, area: Rect, state: &TimerScreen) {
    if let Some(ref msg) = state.flash_message {
        let flash = Paragraph::new(format!(" {}", msg))
            .style(Style::default().bg(Color::Green).fg(Color::Black));
        f.render_widget(flash, area);
        return;
    }

    let mut hints = String::from(" s: start  space: pause  b: break  x: stop  q: quit ");
    if state.saved_visible {
        hints.push_str(" \u{2713} Saved");
    }

    let status = Paragraph::new(hints).style(Style::default().bg(Color::DarkGray).fg(Color::White));
    f.render_widget(status, area);
}
