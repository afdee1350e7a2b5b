use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use studyloop_lib::timer::TimerPhase;

use super::timer_state::TimerScreen;

pub fn handle_key(state: &mut TimerScreen, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.quit = true;
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => state.quit = true,
        KeyCode::Char('s') | KeyCode::Enter => {
            if state.timer.is_running() && state.timer.phase() == TimerPhase::Focus {
                return;
            }
            match state.timer.start() {
                Ok(()) => state.flash(format!("Focus: {}", state.subject.name)),
                Err(e) => state.flash(e.to_string()),
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => {
            state.timer.toggle_pause();
        }
        KeyCode::Char('b') => match state.timer.start_break() {
            Ok(()) => state.flash("Break started"),
            Err(e) => state.flash(e.to_string()),
        },
        KeyCode::Char('x') => {
            if state.timer.is_started() {
                state.timer.stop();
                state.flash("Session abandoned");
            }
        }
        _ => {}
    }
}
