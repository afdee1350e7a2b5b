//! Pomodoro-style countdown
//!
//! The timer does not own a clock. The caller invokes [`SessionTimer::tick`]
//! once per elapsed second, so ticks can never overlap.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::models::{StudySession, TimerEvent, TimerPhase, BREAK_MINUTES, FOCUS_MINUTES};

pub const FOCUS_SECS: u32 = FOCUS_MINUTES * 60;
pub const BREAK_SECS: u32 = BREAK_MINUTES * 60;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimerError {
    #[error("No subject selected for this session")]
    NoSubject,

    #[error("A break can only start during a running focus session")]
    BreakUnavailable,
}

/// Focus/break countdown for one subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTimer {
    subject_id: Option<Uuid>,
    phase: TimerPhase,
    running: bool,
    paused: bool,
    started: bool,
    focus_remaining: u32,
    break_remaining: u32,
}

impl SessionTimer {
    pub fn new(subject_id: Option<Uuid>) -> Self {
        Self {
            subject_id,
            phase: TimerPhase::Focus,
            running: false,
            paused: false,
            started: false,
            focus_remaining: FOCUS_SECS,
            break_remaining: BREAK_SECS,
        }
    }

    pub fn subject_id(&self) -> Option<Uuid> {
        self.subject_id
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Start (or resume after a break) the focus countdown
    pub fn start(&mut self) -> Result<(), TimerError> {
        if self.subject_id.is_none() {
            return Err(TimerError::NoSubject);
        }

        if self.focus_remaining == 0 {
            self.focus_remaining = FOCUS_SECS;
        }
        self.phase = TimerPhase::Focus;
        self.running = true;
        self.started = true;
        self.paused = false;
        Ok(())
    }

    pub fn toggle_pause(&mut self) {
        if self.running {
            self.paused = !self.paused;
        }
    }

    /// Abandon the session and reset to a full focus block
    pub fn stop(&mut self) {
        self.phase = TimerPhase::Focus;
        self.running = false;
        self.paused = false;
        self.started = false;
        self.focus_remaining = FOCUS_SECS;
        self.break_remaining = BREAK_SECS;
    }

    /// Interrupt the focus countdown with a break. Focus time left is kept.
    pub fn start_break(&mut self) -> Result<(), TimerError> {
        if !self.started || self.phase == TimerPhase::Break {
            return Err(TimerError::BreakUnavailable);
        }

        self.phase = TimerPhase::Break;
        self.running = true;
        self.paused = false;
        self.break_remaining = BREAK_SECS;
        Ok(())
    }

    /// Advance one second
    pub fn tick(&mut self, now: DateTime<Utc>) -> Option<TimerEvent> {
        if !self.running || self.paused {
            return None;
        }

        match self.phase {
            TimerPhase::Break => {
                if self.break_remaining <= 1 {
                    self.phase = TimerPhase::Focus;
                    self.running = false;
                    self.break_remaining = BREAK_SECS;
                    log::debug!("Break finished");
                    return Some(TimerEvent::BreakFinished);
                }
                self.break_remaining -= 1;
                None
            }
            TimerPhase::Focus => {
                if self.focus_remaining <= 1 {
                    self.focus_remaining = 0;
                    self.running = false;
                    self.started = false;
                    return self.subject_id.map(|subject_id| {
                        log::info!("Focus session completed for subject {}", subject_id);
                        TimerEvent::SessionCompleted(StudySession::completed(subject_id, now))
                    });
                }
                self.focus_remaining -= 1;
                None
            }
        }
    }

    /// Seconds left in the current phase
    pub fn remaining(&self) -> u32 {
        match self.phase {
            TimerPhase::Focus => self.focus_remaining,
            TimerPhase::Break => self.break_remaining,
        }
    }

    fn total(&self) -> u32 {
        match self.phase {
            TimerPhase::Focus => FOCUS_SECS,
            TimerPhase::Break => BREAK_SECS,
        }
    }

    /// Percent of the current phase already elapsed
    pub fn progress(&self) -> f64 {
        let total = self.total() as f64;
        (total - self.remaining() as f64) / total * 100.0
    }
}

/// Format seconds as `MM:SS`
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_timer() -> (SessionTimer, Uuid) {
        let subject_id = Uuid::new_v4();
        let mut timer = SessionTimer::new(Some(subject_id));
        timer.start().unwrap();
        (timer, subject_id)
    }

    fn tick_n(timer: &mut SessionTimer, n: u32) -> Vec<TimerEvent> {
        (0..n).filter_map(|_| timer.tick(Utc::now())).collect()
    }

    #[test]
    fn test_new_timer_is_idle_full_block() {
        let timer = SessionTimer::new(None);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 3600);
        assert_eq!(timer.progress(), 0.0);
    }

    #[test]
    fn test_start_requires_subject() {
        let mut timer = SessionTimer::new(None);
        assert_eq!(timer.start(), Err(TimerError::NoSubject));
    }

    #[test]
    fn test_tick_counts_down_and_pause_freezes() {
        let (mut timer, _) = running_timer();

        assert!(tick_n(&mut timer, 10).is_empty());
        assert_eq!(timer.remaining(), FOCUS_SECS - 10);

        timer.toggle_pause();
        tick_n(&mut timer, 30);
        assert_eq!(timer.remaining(), FOCUS_SECS - 10);

        timer.toggle_pause();
        tick_n(&mut timer, 1);
        assert_eq!(timer.remaining(), FOCUS_SECS - 11);
    }

    #[test]
    fn test_focus_completion_emits_once() {
        let (mut timer, subject_id) = running_timer();

        let events = tick_n(&mut timer, FOCUS_SECS + 120);
        assert_eq!(events.len(), 1);
        match &events[0] {
            TimerEvent::SessionCompleted(session) => {
                assert_eq!(session.subject_id, subject_id);
                assert_eq!(session.duration, 60);
                assert!(session.completed);
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), 0);
        assert_eq!(timer.progress(), 100.0);

        // Starting again begins a fresh block
        timer.start().unwrap();
        assert_eq!(timer.remaining(), FOCUS_SECS);
    }

    #[test]
    fn test_break_keeps_focus_time() {
        let (mut timer, _) = running_timer();
        tick_n(&mut timer, 100);

        timer.start_break().unwrap();
        assert_eq!(timer.phase(), TimerPhase::Break);
        assert_eq!(timer.remaining(), BREAK_SECS);
        assert_eq!(timer.start_break(), Err(TimerError::BreakUnavailable));

        let events = tick_n(&mut timer, BREAK_SECS);
        assert_eq!(events, vec![TimerEvent::BreakFinished]);
        assert_eq!(timer.phase(), TimerPhase::Focus);
        assert!(!timer.is_running());
        assert_eq!(timer.remaining(), FOCUS_SECS - 100);

        timer.start().unwrap();
        tick_n(&mut timer, 1);
        assert_eq!(timer.remaining(), FOCUS_SECS - 101);
    }

    #[test]
    fn test_break_requires_started_session() {
        let mut timer = SessionTimer::new(Some(Uuid::new_v4()));
        assert_eq!(timer.start_break(), Err(TimerError::BreakUnavailable));
    }

    #[test]
    fn test_stop_resets() {
        let (mut timer, _) = running_timer();
        tick_n(&mut timer, 500);
        timer.stop();

        assert!(!timer.is_running());
        assert!(!timer.is_started());
        assert_eq!(timer.remaining(), FOCUS_SECS);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(3600), "60:00");
        assert_eq!(format_time(299), "04:59");
        assert_eq!(format_time(0), "00:00");
    }

    #[test]
    fn test_snapshot_round_trip() {
        let (mut timer, _) = running_timer();
        tick_n(&mut timer, 42);

        let json = serde_json::to_string(&timer).unwrap();
        let restored: SessionTimer = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, timer);
    }
}
