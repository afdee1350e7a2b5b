mod key_handler;
mod timer_state;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use chrono::{Local, Utc};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;

use studyloop_lib::timer::TimerEvent;

use crate::app::App;
use crate::render::terminal::hours;
use timer_state::TimerScreen;

const TICK: Duration = Duration::from_secs(1);

pub fn run(app: &mut App, subject: Option<&str>) -> Result<()> {
    let subject = match subject {
        Some(query) => app.find_subject(query)?,
        None => match app.workspace.next_subject() {
            Some(next) => next.clone(),
            None => bail!("No subjects yet. Add one with `studyloop subjects add <name>`"),
        },
    };
    let mut state = TimerScreen::new(app, subject);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.workspace.save_timer(&state.timer)?;
    result
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App, state: &mut TimerScreen) -> Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui::draw(f, state))?;

        if state.quit {
            return Ok(());
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    key_handler::handle_key(state, key);
                }
            }
        }

        // One tick per elapsed second, never more than one at a time
        while last_tick.elapsed() >= TICK {
            last_tick += TICK;
            if let Some(event) = state.timer.tick(Utc::now()) {
                handle_timer_event(app, state, event)?;
            }
        }

        let now = Instant::now();
        state.expire_flash(now);
        state.saved_visible = app.workspace.poll_saved(now);
    }
}

fn handle_timer_event(app: &mut App, state: &mut TimerScreen, event: TimerEvent) -> Result<()> {
    match event {
        TimerEvent::SessionCompleted(session) => {
            let credited = session.hours();
            app.workspace.record_session(session)?;
            app.workspace.save_timer(&state.timer)?;
            state.today_hours = app.workspace.dashboard(&Local::now()).today_hours;
            state.flash(format!(
                "Session complete: +{} {}. Press s for the next block",
                hours(credited),
                state.subject.name
            ));
        }
        TimerEvent::BreakFinished => {
            state.flash("Break over. Press s to continue");
        }
    }
    Ok(())
}
