use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::matches::MatchStatus;

/// Clock state as shown to users. Always derived from the stored
/// timestamps, never stored itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockState {
    #[serde(rename = "parado")]
    Idle,
    #[serde(rename = "rodando")]
    Running,
    #[serde(rename = "pausado")]
    Paused,
    #[serde(rename = "encerrado")]
    Stopped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockAction {
    Play,
    Pause,
    Reset,
}

impl std::fmt::Display for ClockAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = match self {
            ClockAction::Play => "play",
            ClockAction::Pause => "pause",
            ClockAction::Reset => "reset",
        };
        write!(f, "{}", action)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ClockError {
    #[error("Cronômetro já está rodando")]
    AlreadyRunning,
    #[error("Cronômetro não está rodando")]
    NotRunning,
    #[error("Partida já foi finalizada")]
    MatchFinished,
    #[error("Partida ainda não foi iniciada")]
    NotStarted,
    #[error("Partida foi cancelada")]
    MatchCancelled,
}

/// Timestamps and status to persist after a clock transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTransition {
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClockSnapshot {
    #[serde(rename = "estado")]
    pub state: ClockState,
    #[serde(rename = "segundos_decorridos")]
    pub elapsed_seconds: i64,
}

/// The match clock.
///
/// Running means a start without an end. A pause stores the pause instant
/// as the end; resuming shifts the start forward by the paused interval and
/// clears the end, so `end - start` is always the played time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchClock {
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub finished: bool,
}

impl MatchClock {
    pub fn new(
        started_at: Option<DateTime<Utc>>,
        ended_at: Option<DateTime<Utc>>,
        finished: bool,
    ) -> Self {
        Self { started_at, ended_at, finished }
    }

    pub fn state(&self) -> ClockState {
        match (self.started_at, self.ended_at) {
            (None, _) => ClockState::Idle,
            (Some(_), None) => ClockState::Running,
            (Some(_), Some(_)) if self.finished => ClockState::Stopped,
            (Some(_), Some(_)) => ClockState::Paused,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == ClockState::Running
    }

    /// Whole seconds played at `now`. Zero before kickoff, never negative.
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        match self.started_at {
            None => 0,
            Some(started_at) => {
                let until = self.ended_at.unwrap_or(now);
                (until - started_at).num_seconds().max(0)
            }
        }
    }

    /// Minute a goal scored at `now` belongs to: 0 before kickoff, then
    /// the running minute starting at 1.
    pub fn goal_minute(&self, now: DateTime<Utc>) -> i32 {
        if self.started_at.is_none() {
            return 0;
        }
        (self.elapsed_seconds(now) / 60 + 1) as i32
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> ClockSnapshot {
        ClockSnapshot {
            state: self.state(),
            elapsed_seconds: self.elapsed_seconds(now),
        }
    }

    pub fn apply(&self, action: ClockAction, now: DateTime<Utc>) -> Result<ClockTransition, ClockError> {
        match action {
            ClockAction::Play => self.play(now),
            ClockAction::Pause => self.pause(now),
            ClockAction::Reset => self.reset(),
        }
    }

    fn play(&self, now: DateTime<Utc>) -> Result<ClockTransition, ClockError> {
        match self.state() {
            ClockState::Idle => Ok(ClockTransition {
                started_at: Some(now),
                ended_at: None,
                status: MatchStatus::InProgress,
            }),
            ClockState::Paused => {
                let (started_at, paused_at) = match (self.started_at, self.ended_at) {
                    (Some(s), Some(e)) => (s, e),
                    _ => return Err(ClockError::NotStarted),
                };
                let paused_for = (now - paused_at).max(Duration::zero());
                Ok(ClockTransition {
                    started_at: Some(started_at + paused_for),
                    ended_at: None,
                    status: MatchStatus::InProgress,
                })
            }
            ClockState::Running => Err(ClockError::AlreadyRunning),
            ClockState::Stopped => Err(ClockError::MatchFinished),
        }
    }

    fn pause(&self, now: DateTime<Utc>) -> Result<ClockTransition, ClockError> {
        match self.state() {
            ClockState::Running => Ok(ClockTransition {
                started_at: self.started_at,
                ended_at: Some(now),
                status: MatchStatus::InProgress,
            }),
            ClockState::Stopped => Err(ClockError::MatchFinished),
            ClockState::Idle | ClockState::Paused => Err(ClockError::NotRunning),
        }
    }

    fn reset(&self) -> Result<ClockTransition, ClockError> {
        if self.state() == ClockState::Stopped {
            return Err(ClockError::MatchFinished);
        }
        Ok(ClockTransition {
            started_at: None,
            ended_at: None,
            status: MatchStatus::Scheduled,
        })
    }

    /// Kick off from zero, discarding any previous run.
    pub fn start(&self, now: DateTime<Utc>) -> Result<ClockTransition, ClockError> {
        if self.state() == ClockState::Stopped {
            return Err(ClockError::MatchFinished);
        }
        Ok(ClockTransition {
            started_at: Some(now),
            ended_at: None,
            status: MatchStatus::InProgress,
        })
    }

    /// Final whistle. A paused match keeps its pause instant as the end.
    pub fn finish(&self, now: DateTime<Utc>) -> Result<ClockTransition, ClockError> {
        match self.state() {
            ClockState::Idle => Err(ClockError::NotStarted),
            ClockState::Stopped => Err(ClockError::MatchFinished),
            ClockState::Running => Ok(ClockTransition {
                started_at: self.started_at,
                ended_at: Some(now),
                status: MatchStatus::Finished,
            }),
            ClockState::Paused => Ok(ClockTransition {
                started_at: self.started_at,
                ended_at: self.ended_at,
                status: MatchStatus::Finished,
            }),
        }
    }
}

impl ClockTransition {
    pub fn clock(&self) -> MatchClock {
        MatchClock::new(self.started_at, self.ended_at, self.status == MatchStatus::Finished)
    }
}

/// `mm:ss`, minutes keep growing past 59.
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 8, 15, 0, 0).unwrap()
    }

    #[test]
    fn test_state_is_derived_from_timestamps() {
        let t = kickoff();
        assert_eq!(MatchClock::new(None, None, false).state(), ClockState::Idle);
        assert_eq!(MatchClock::new(Some(t), None, false).state(), ClockState::Running);
        assert_eq!(MatchClock::new(Some(t), Some(t), false).state(), ClockState::Paused);
        assert_eq!(MatchClock::new(Some(t), Some(t), true).state(), ClockState::Stopped);
    }

    #[test]
    fn test_elapsed_seconds_floor_and_never_negative() {
        let t = kickoff();
        let clock = MatchClock::new(Some(t), None, false);
        assert_eq!(clock.elapsed_seconds(t + Duration::milliseconds(125_900)), 125);
        assert_eq!(clock.elapsed_seconds(t - Duration::seconds(5)), 0);
        assert_eq!(MatchClock::new(None, None, false).elapsed_seconds(t), 0);

        let paused = MatchClock::new(Some(t), Some(t + Duration::seconds(90)), false);
        assert_eq!(paused.elapsed_seconds(t + Duration::hours(2)), 90);
    }

    #[test]
    fn test_play_pause_resume_reset_sequence() {
        let t = kickoff();
        let idle = MatchClock::new(None, None, false);

        let running = idle.apply(ClockAction::Play, t).unwrap();
        assert_eq!(running.clock().state(), ClockState::Running);
        assert_eq!(running.status, MatchStatus::InProgress);

        let paused = running.clock().apply(ClockAction::Pause, t + Duration::seconds(300)).unwrap();
        assert_eq!(paused.clock().state(), ClockState::Paused);
        assert_eq!(paused.clock().elapsed_seconds(t + Duration::seconds(1000)), 300);

        // resumed two minutes later, the paused interval is not counted
        let resumed = paused.clock().apply(ClockAction::Play, t + Duration::seconds(420)).unwrap();
        assert_eq!(resumed.clock().state(), ClockState::Running);
        assert_eq!(resumed.clock().elapsed_seconds(t + Duration::seconds(430)), 310);

        let reset = resumed.clock().apply(ClockAction::Reset, t + Duration::seconds(500)).unwrap();
        assert_eq!(reset.clock().state(), ClockState::Idle);
        assert_eq!(reset.status, MatchStatus::Scheduled);
    }

    #[test]
    fn test_invalid_transitions() {
        let t = kickoff();
        let running = MatchClock::new(Some(t), None, false);
        assert_eq!(running.apply(ClockAction::Play, t), Err(ClockError::AlreadyRunning));

        let idle = MatchClock::new(None, None, false);
        assert_eq!(idle.apply(ClockAction::Pause, t), Err(ClockError::NotRunning));
        assert!(idle.apply(ClockAction::Reset, t).is_ok());
        assert_eq!(idle.finish(t), Err(ClockError::NotStarted));

        let stopped = MatchClock::new(Some(t), Some(t), true);
        assert_eq!(stopped.apply(ClockAction::Play, t), Err(ClockError::MatchFinished));
        assert_eq!(stopped.apply(ClockAction::Reset, t), Err(ClockError::MatchFinished));
        assert_eq!(stopped.start(t), Err(ClockError::MatchFinished));
    }

    #[test]
    fn test_finish_keeps_pause_instant() {
        let t = kickoff();
        let paused_at = t + Duration::seconds(600);
        let paused = MatchClock::new(Some(t), Some(paused_at), false);
        let finished = paused.finish(t + Duration::seconds(900)).unwrap();
        assert_eq!(finished.ended_at, Some(paused_at));
        assert_eq!(finished.clock().state(), ClockState::Stopped);
    }

    #[test]
    fn test_goal_minute() {
        let t = kickoff();
        assert_eq!(MatchClock::new(None, None, false).goal_minute(t), 0);
        let clock = MatchClock::new(Some(t), None, false);
        assert_eq!(clock.goal_minute(t + Duration::seconds(30)), 1);
        assert_eq!(clock.goal_minute(t + Duration::seconds(60)), 2);
        assert_eq!(clock.goal_minute(t + Duration::seconds(89 * 60 + 59)), 90);
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00");
        assert_eq!(format_elapsed(75), "01:15");
        assert_eq!(format_elapsed(5400), "90:00");
        assert_eq!(format_elapsed(-3), "00:00");
    }
}
