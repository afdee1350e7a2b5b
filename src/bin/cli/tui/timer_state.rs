use std::time::{Duration, Instant};

use chrono::Local;

use studyloop_lib::subjects::Subject;
use studyloop_lib::timer::SessionTimer;

use crate::app::App;

const FLASH_DURATION: Duration = Duration::from_secs(3);

pub struct TimerScreen {
    pub timer: SessionTimer,
    pub subject: Subject,
    pub today_hours: f64,
    pub daily_goal_hours: f64,
    pub flash_message: Option<String>,
    flash_at: Option<Instant>,
    pub saved_visible: bool,
    pub quit: bool,
}

impl TimerScreen {
    /// Resume the stored timer when it belongs to `subject`, otherwise start fresh
    pub fn new(app: &App, subject: Subject) -> Self {
        let timer = match &app.workspace.state().timer {
            Some(saved) if saved.subject_id() == Some(subject.id) && saved.is_started() => {
                let mut resumed = saved.clone();
                if resumed.is_running() && !resumed.is_paused() {
                    resumed.toggle_pause();
                }
                log::debug!("Resuming stored timer for {}", subject.name);
                resumed
            }
            _ => SessionTimer::new(Some(subject.id)),
        };

        let summary = app.workspace.dashboard(&Local::now());

        Self {
            timer,
            subject,
            today_hours: summary.today_hours,
            daily_goal_hours: summary.daily_goal_hours,
            flash_message: None,
            flash_at: None,
            saved_visible: false,
            quit: false,
        }
    }

    pub fn flash(&mut self, message: impl Into<String>) {
        self.flash_message = Some(message.into());
        self.flash_at = Some(Instant::now());
    }

    /// Drop the flash message once it has been shown long enough
    pub fn expire_flash(&mut self, now: Instant) {
        if let Some(at) = self.flash_at {
            if now.duration_since(at) >= FLASH_DURATION {
                self.flash_message = None;
                self.flash_at = None;
            }
        }
    }
}
