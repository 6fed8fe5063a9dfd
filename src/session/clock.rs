//! Background clock for a shared session.
//!
//! The worker wakes once per period, locks the session and calls `tick`.
//! It exits when the game ends, when `cancel` is called or when the handle
//! is dropped.

use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::session::game_session::{ClockTick, GameSession, GameStatus};

pub type SharedSession = Arc<Mutex<GameSession>>;

#[derive(Debug)]
pub struct ClockTask {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ClockTask {
    pub fn spawn(session: SharedSession, period: Duration) -> Self {
        let (stop_tx, stop_rx) = channel::<()>();
        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {}
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    debug!("clock cancelled");
                    return;
                }
            }

            let mut guard = match session.lock() {
                Ok(guard) => guard,
                Err(_) => {
                    warn!("session lock poisoned, stopping clock");
                    return;
                }
            };
            if let ClockTick::TimedOut(result) = guard.tick() {
                info!(winner = ?result.winner, "flag fell");
            }
            if guard.status() == GameStatus::Ended {
                debug!("clock stopped at game end");
                return;
            }
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    /// Whether the worker has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Stop the worker and wait for it.
    pub fn cancel(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("clock thread panicked");
            }
        }
    }
}

impl Drop for ClockTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeControl;
    use crate::game_state::chess_types::Color;
    use crate::session::game_session::{EndReason, PlayerInfo};
    use crate::setup::setup_generator::GameMode;
    use std::time::Instant;

    fn shared(seconds: u32) -> SharedSession {
        let mut session = GameSession::with_seed(GameMode::Standard, 11);
        session
            .start_game(
                PlayerInfo::default(),
                PlayerInfo::default(),
                TimeControl::from_seconds(seconds),
            )
            .expect("start");
        Arc::new(Mutex::new(session))
    }

    fn wait_until(deadline: Duration, mut done: impl FnMut() -> bool) -> bool {
        let start = Instant::now();
        while start.elapsed() < deadline {
            if done() {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        done()
    }

    #[test]
    fn clock_runs_out_and_stops() {
        let session = shared(3);
        let clock = ClockTask::spawn(Arc::clone(&session), Duration::from_millis(5));

        assert!(wait_until(Duration::from_secs(5), || clock.is_finished()));
        let session = session.lock().expect("lock");
        assert_eq!(session.end_reason(), Some(EndReason::Timeout));
        assert_eq!(session.winner(), Some(Color::Black));
        assert_eq!(session.clock(Color::White), 0);
        assert_eq!(session.clock(Color::Black), 3);
    }

    #[test]
    fn cancel_stops_the_worker() {
        let session = shared(900);
        let mut clock = ClockTask::spawn(Arc::clone(&session), Duration::from_millis(5));
        clock.cancel();
        assert!(clock.is_finished());

        let remaining = session.lock().expect("lock").clock(Color::White);
        thread::sleep(Duration::from_millis(30));
        assert_eq!(session.lock().expect("lock").clock(Color::White), remaining);
        assert_eq!(
            session.lock().expect("lock").status(),
            GameStatus::Playing
        );
    }
}
