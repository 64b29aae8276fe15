//! Countdown state machine
//!
//! The controller owns the timer state and never performs I/O. Every action
//! returns the [`Effect`]s the caller must carry out (backend calls,
//! notifications, the chime). Backend results come back through
//! [`TimerController::session_started`].
//!
//! ```text
//! Idle --start--> Running <--pause/resume--> Paused
//!   ^                |                          |
//!   +------reset-----+--------------------------+
//! ```
//!
//! While running, each phase that counts down to zero flips Study <-> Break.

use tracing::{debug, info, warn};

use crate::error::TimerError;

use super::{
    mode::{Durations, Mode, ModePresets},
    timer_state::{format_clock, Phase, SessionId, TimerSnapshot, TimerStatus},
};

pub const BREAK_START_MESSAGE: &str = "Great job! Time for a break!";
pub const STUDY_START_MESSAGE: &str = "Break's over! Time to study!";

/// A session-start the caller must send to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct SessionRequest {
    /// Ties the eventual response back to the phase that asked for it
    pub ticket: u64,
    pub phase: Phase,
    pub mode: Mode,
    pub duration: u32,
}

/// Side effects requested by the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    StartSession(SessionRequest),
    EndSession { session_id: SessionId, duration: u32 },
    Notify(String),
    Chime,
}

#[derive(Debug, Clone)]
pub struct TimerController {
    presets: ModePresets,
    mode: Mode,
    phase: Phase,
    status: TimerStatus,
    remaining_seconds: u32,
    /// Open Study session
    session_id: Option<SessionId>,
    /// Open Break session, tracked separately and never ended
    break_session_id: Option<SessionId>,
    last_ticket: u64,
    /// Bumped on every start so the tick loop can tell a restart apart
    run: u64,
    pending: Option<(u64, Phase)>,
}

impl TimerController {
    pub fn new(presets: ModePresets) -> Self {
        let remaining_seconds = presets.durations(Mode::Focus).study_seconds();
        Self {
            presets,
            mode: Mode::Focus,
            phase: Phase::Study,
            status: TimerStatus::Idle,
            remaining_seconds,
            session_id: None,
            break_session_id: None,
            last_ticket: 0,
            run: 0,
            pending: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining_seconds
    }

    pub fn session_id(&self) -> Option<&SessionId> {
        self.session_id.as_ref()
    }

    pub fn break_session_id(&self) -> Option<&SessionId> {
        self.break_session_id.as_ref()
    }

    pub fn durations(&self) -> Durations {
        self.presets.durations(self.mode)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        let durations = self.durations();
        TimerSnapshot {
            mode: self.mode,
            phase: self.phase,
            status: self.status,
            paused: self.status.is_paused(),
            run: self.run,
            remaining_seconds: self.remaining_seconds,
            display: format_clock(self.remaining_seconds),
            study_minutes: durations.study_minutes,
            break_minutes: durations.break_minutes,
            session_id: self.session_id.clone(),
        }
    }

    /// Begin a Study phase from Idle
    pub fn start(&mut self) -> Result<Vec<Effect>, TimerError> {
        if self.status.is_running() {
            return Err(TimerError::AlreadyRunning);
        }

        self.phase = Phase::Study;
        self.remaining_seconds = self.durations().study_seconds();
        self.status = TimerStatus::Running;
        self.run += 1;
        info!("Timer started: mode={}, {}s", self.mode, self.remaining_seconds);

        Ok(vec![Effect::StartSession(self.issue_request())])
    }

    pub fn pause(&mut self) -> Result<(), TimerError> {
        if self.status != TimerStatus::Running {
            return Err(TimerError::NotRunning);
        }
        self.status = TimerStatus::Paused;
        debug!("Timer paused at {}s", self.remaining_seconds);
        Ok(())
    }

    pub fn resume(&mut self) -> Result<(), TimerError> {
        if self.status != TimerStatus::Paused {
            return Err(TimerError::NotPaused);
        }
        self.status = TimerStatus::Running;
        debug!("Timer resumed at {}s", self.remaining_seconds);
        Ok(())
    }

    /// Return to Idle from any state. Open sessions are forgotten and any
    /// in-flight session-start response will be ignored.
    pub fn reset(&mut self) {
        if self.session_id.is_some() || self.break_session_id.is_some() {
            warn!("Reset abandons open session without ending it");
        }

        self.status = TimerStatus::Idle;
        self.phase = Phase::Study;
        self.remaining_seconds = self.durations().study_seconds();
        self.session_id = None;
        self.break_session_id = None;
        self.pending = None;
    }

    /// Switch mode while Idle. For `custom`, the raw field values are applied
    /// first; rejected fields keep their last valid value and are returned.
    pub fn set_mode(
        &mut self,
        mode: Mode,
        study: Option<&str>,
        brk: Option<&str>,
    ) -> Result<Vec<TimerError>, TimerError> {
        if self.status.is_running() {
            return Err(TimerError::ModeLocked);
        }

        let rejected = if mode == Mode::Custom {
            self.presets.update_custom(study, brk)
        } else {
            Vec::new()
        };

        self.mode = mode;
        self.phase = Phase::Study;
        self.remaining_seconds = self.durations().study_seconds();
        info!("Mode set to {} ({:?})", mode, self.durations());
        Ok(rejected)
    }

    /// Edit the custom durations while Idle
    pub fn set_custom(
        &mut self,
        study: Option<&str>,
        brk: Option<&str>,
    ) -> Result<Vec<TimerError>, TimerError> {
        if self.status.is_running() {
            return Err(TimerError::ModeLocked);
        }

        let rejected = self.presets.update_custom(study, brk);
        info!("Custom durations now {:?}", self.presets.custom());
        if self.mode == Mode::Custom {
            self.phase = Phase::Study;
            self.remaining_seconds = self.durations().study_seconds();
        }
        Ok(rejected)
    }

    /// Advance by one second
    pub fn tick(&mut self) -> Vec<Effect> {
        if self.status != TimerStatus::Running {
            return Vec::new();
        }

        self.remaining_seconds = self.remaining_seconds.saturating_sub(1);
        debug_assert!(self.remaining_seconds <= self.durations().max_seconds());
        if self.remaining_seconds > 0 {
            return Vec::new();
        }

        match self.phase {
            Phase::Study => self.enter_break(),
            Phase::Break => self.enter_study(),
        }
    }

    /// Record a completed session-start. Returns false when the response is
    /// stale (the timer was reset or moved on since the request was issued).
    pub fn session_started(&mut self, ticket: u64, session_id: SessionId) -> bool {
        match self.pending {
            Some((pending, phase)) if pending == ticket && phase == self.phase => {
                self.pending = None;
                debug!("Session {} open for {:?} phase", session_id, phase);
                match phase {
                    Phase::Study => self.session_id = Some(session_id),
                    Phase::Break => self.break_session_id = Some(session_id),
                }
                true
            }
            _ => {
                debug!("Ignoring stale session {} (ticket {})", session_id, ticket);
                false
            }
        }
    }

    fn enter_break(&mut self) -> Vec<Effect> {
        let durations = self.durations();
        let mut effects = Vec::with_capacity(4);

        match self.session_id.take() {
            Some(session_id) => effects.push(Effect::EndSession {
                session_id,
                duration: durations.study_seconds(),
            }),
            None => warn!("Study phase finished without an open session; skipping end-session"),
        }
        effects.push(Effect::Notify(BREAK_START_MESSAGE.to_string()));
        effects.push(Effect::Chime);

        self.phase = Phase::Break;
        self.remaining_seconds = durations.break_seconds();
        info!("Study phase complete, break for {}s", self.remaining_seconds);

        effects.push(Effect::StartSession(self.issue_request()));
        effects
    }

    fn enter_study(&mut self) -> Vec<Effect> {
        self.break_session_id = None;
        self.phase = Phase::Study;
        self.remaining_seconds = self.durations().study_seconds();
        info!("Break complete, study for {}s", self.remaining_seconds);

        vec![
            Effect::Notify(STUDY_START_MESSAGE.to_string()),
            Effect::StartSession(self.issue_request()),
        ]
    }

    fn issue_request(&mut self) -> SessionRequest {
        self.last_ticket += 1;
        self.pending = Some((self.last_ticket, self.phase));

        let durations = self.durations();
        let duration = match self.phase {
            Phase::Study => durations.study_seconds(),
            Phase::Break => durations.break_seconds(),
        };

        SessionRequest {
            ticket: self.last_ticket,
            phase: self.phase,
            mode: self.mode,
            duration,
        }
    }
}

impl Default for TimerController {
    fn default() -> Self {
        Self::new(ModePresets::default())
    }
}
