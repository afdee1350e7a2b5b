//! Daily progress summary

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;

use crate::reviews::{bucket, compute_agenda, ReviewStats};
use crate::state::StudyState;
use crate::subjects::{Subject, MAX_SUBJECTS};
use crate::timer::StudySession;

/// Hours of study per day the dashboard measures progress against
pub const DEFAULT_DAILY_GOAL_HOURS: f64 = 6.0;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub today_hours: f64,
    pub daily_goal_hours: f64,
    /// Percent of the daily goal reached, capped at 100
    pub goal_progress: f64,
    pub subject_count: usize,
    pub subject_limit: usize,
    pub error_count: usize,
    pub sessions_today: usize,
    pub reviews: ReviewStats,
    pub next_subject: Option<Subject>,
}

/// Completed sessions whose date falls on the same local day as `now`
pub fn todays_sessions<'a, Tz: TimeZone>(
    sessions: &'a [StudySession],
    now: &DateTime<Tz>,
) -> Vec<&'a StudySession> {
    let today = now.date_naive();
    let tz = now.timezone();
    sessions
        .iter()
        .filter(|s| s.completed && s.date.with_timezone(&tz).date_naive() == today)
        .collect()
}

pub fn today_hours<Tz: TimeZone>(sessions: &[StudySession], now: &DateTime<Tz>) -> f64 {
    todays_sessions(sessions, now)
        .iter()
        .map(|s| s.hours())
        .sum()
}

/// The subject after the one studied last, wrapping around.
///
/// With no sessions the first subject is next. If the last session's subject
/// was removed the rotation restarts at the first subject.
pub fn next_subject<'a>(subjects: &'a [Subject], sessions: &[StudySession]) -> Option<&'a Subject> {
    if subjects.is_empty() {
        return None;
    }

    let Some(last) = sessions.last() else {
        return subjects.first();
    };

    let next_index = subjects
        .iter()
        .position(|s| s.id == last.subject_id)
        .map_or(0, |i| (i + 1) % subjects.len());
    subjects.get(next_index)
}

pub fn summarize<Tz: TimeZone>(
    state: &StudyState,
    daily_goal_hours: f64,
    now: &DateTime<Tz>,
) -> DashboardSummary {
    let sessions_today = todays_sessions(&state.sessions, now);
    let today_hours: f64 = sessions_today.iter().map(|s| s.hours()).sum();

    let goal_progress = if daily_goal_hours > 0.0 {
        (today_hours / daily_goal_hours * 100.0).min(100.0)
    } else {
        100.0
    };

    let agenda = compute_agenda(state.error_log.list(), now.with_timezone(&Utc));
    let buckets = bucket(&agenda);

    DashboardSummary {
        today_hours,
        daily_goal_hours,
        goal_progress,
        subject_count: state.subjects.len(),
        subject_limit: MAX_SUBJECTS,
        error_count: state.error_log.len(),
        sessions_today: sessions_today.len(),
        reviews: ReviewStats::new(&buckets, state.completions.len()),
        next_subject: next_subject(state.subjects.list(), &state.sessions).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, FixedOffset};
    use uuid::Uuid;

    use crate::notebook::NewErrorEntry;
    use crate::subjects::{SubjectCategory, SubjectColor};

    fn subjects(names: &[&str]) -> Vec<Subject> {
        names
            .iter()
            .map(|n| Subject::new(n.to_string(), SubjectCategory::Theoretical, SubjectColor::Blue))
            .collect()
    }

    fn session_at(subject_id: Uuid, date: DateTime<Utc>) -> StudySession {
        StudySession::completed(subject_id, date)
    }

    #[test]
    fn test_next_subject_rotation() {
        let subjects = subjects(&["A", "B", "C"]);

        assert!(next_subject(&[], &[]).is_none());
        assert_eq!(next_subject(&subjects, &[]).unwrap().name, "A");

        let sessions = vec![session_at(subjects[0].id, Utc::now())];
        assert_eq!(next_subject(&subjects, &sessions).unwrap().name, "B");

        let sessions = vec![session_at(subjects[2].id, Utc::now())];
        assert_eq!(next_subject(&subjects, &sessions).unwrap().name, "A");

        let sessions = vec![session_at(Uuid::new_v4(), Utc::now())];
        assert_eq!(next_subject(&subjects, &sessions).unwrap().name, "A");
    }

    #[test]
    fn test_today_hours_uses_local_day() {
        // UTC-3: 2024-05-10 01:00Z is still 2024-05-09 locally
        let tz = FixedOffset::west_opt(3 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2024, 5, 9, 20, 0, 0).unwrap();
        let subject_id = Uuid::new_v4();

        let mut incomplete = session_at(subject_id, now.with_timezone(&Utc));
        incomplete.completed = false;

        let sessions = vec![
            session_at(subject_id, Utc.with_ymd_and_hms(2024, 5, 10, 1, 0, 0).unwrap()),
            session_at(subject_id, Utc.with_ymd_and_hms(2024, 5, 9, 12, 0, 0).unwrap()),
            session_at(subject_id, Utc.with_ymd_and_hms(2024, 5, 9, 2, 0, 0).unwrap()),
            incomplete,
        ];

        assert_eq!(today_hours(&sessions, &now), 2.0);
    }

    #[test]
    fn test_summarize() {
        let now = Utc.with_ymd_and_hms(2024, 1, 9, 12, 0, 0).unwrap();
        let mut state = StudyState::default();
        let math = state
            .subjects
            .add("Math", SubjectCategory::Practical, SubjectColor::Green)
            .unwrap();
        state
            .subjects
            .add("Law", SubjectCategory::Theoretical, SubjectColor::Blue)
            .unwrap();

        state.error_log
            .add(
                NewErrorEntry {
                    subject_id: math.id,
                    topic: "Fractions".to_string(),
                    question: "Simplify".to_string(),
                    explanation: None,
                },
                now - Duration::days(8),
            )
            .unwrap();

        for hours_ago in [1, 2, 3, 4, 5, 6, 7] {
            state.sessions.push(session_at(math.id, now - Duration::hours(hours_ago)));
        }

        let summary = summarize(&state, DEFAULT_DAILY_GOAL_HOURS, &now);
        assert_eq!(summary.today_hours, 7.0);
        assert_eq!(summary.goal_progress, 100.0);
        assert_eq!(summary.sessions_today, 7);
        assert_eq!(summary.subject_count, 2);
        assert_eq!(summary.subject_limit, 6);
        assert_eq!(summary.error_count, 1);
        assert_eq!(summary.reviews.overdue, 2);
        assert_eq!(summary.reviews.upcoming, 1);
        assert_eq!(summary.next_subject.unwrap().name, "Law");
    }
}
