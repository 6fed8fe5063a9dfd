//! A session bundled with its running clock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::info;

use crate::config::GameConfig;
use crate::errors::{EngineError, EngineResult};
use crate::session::clock::{ClockTask, SharedSession};
use crate::session::game_session::{GameSession, GameStatus, PlayerInfo};

#[derive(Debug)]
pub struct LiveGame {
    session: SharedSession,
    clock: Option<ClockTask>,
    period: Duration,
}

impl LiveGame {
    /// Create, start and clock a game described by `config`.
    pub fn start(config: &GameConfig, white: PlayerInfo, black: PlayerInfo) -> EngineResult<Self> {
        config.validate()?;
        let mut session = GameSession::from_config(config);
        session.start_game(white, black, config.time_control)?;
        info!(period_ms = config.clock_period_ms, "live game started");
        Ok(Self::attach(session, config.clock_period()))
    }

    /// Put an existing session (for example one loaded from a store) under a clock.
    pub fn attach(session: GameSession, period: Duration) -> Self {
        let session = Arc::new(Mutex::new(session));
        let clock = ClockTask::spawn(Arc::clone(&session), period);
        Self {
            session,
            clock: Some(clock),
            period,
        }
    }

    pub fn shared(&self) -> SharedSession {
        Arc::clone(&self.session)
    }

    /// Run `f` with the session locked.
    pub fn with_session<T>(&self, f: impl FnOnce(&mut GameSession) -> T) -> EngineResult<T> {
        let mut guard = self
            .session
            .lock()
            .map_err(|_| EngineError::InvalidState("session lock poisoned".to_owned()))?;
        Ok(f(&mut guard))
    }

    pub fn clock_running(&self) -> bool {
        self.clock.as_ref().is_some_and(|clock| !clock.is_finished())
    }

    pub fn stop_clock(&mut self) {
        if let Some(mut clock) = self.clock.take() {
            clock.cancel();
        }
    }

    /// Spawn a fresh clock if the old one has exited and the game is live
    /// again, as after undoing the final move.
    pub fn ensure_clock(&mut self) -> EngineResult<bool> {
        if self.clock_running() {
            return Ok(false);
        }
        if self.with_session(|s| s.status())? != GameStatus::Playing {
            return Ok(false);
        }
        self.stop_clock();
        self.clock = Some(ClockTask::spawn(Arc::clone(&self.session), self.period));
        Ok(true)
    }
}

impl Drop for LiveGame {
    fn drop(&mut self) {
        self.stop_clock();
    }
}
