//! Versioned JSON snapshots of a session.
//!
//! A snapshot carries the mode, the players and the full `SessionState`.
//! Undo history and the RNG are not persisted. Loading validates shape and
//! consistency before anything is handed back, so a rejected snapshot never
//! reaches a live session.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::MAX_CLOCK_SECONDS;
use crate::game_state::chess_types::*;
use crate::moves::pawn_moves::is_promotion_square;
use crate::session::game_session::{
    EndReason, GameSession, GameStatus, Players, SessionState,
};
use crate::setup::setup_generator::GameMode;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub mode: GameMode,
    pub players: Players,
    pub state: SessionState,
}

impl GameSnapshot {
    pub fn capture(session: &GameSession) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            mode: session.mode(),
            players: session.players().clone(),
            state: session.state().clone(),
        }
    }

    pub fn to_json(&self) -> EngineResult<String> {
        serde_json::to_string(self)
            .map_err(|e| EngineError::CorruptSnapshot(format!("cannot encode snapshot: {e}")))
    }

    /// Parse and validate.
    pub fn from_json(raw: &str) -> EngineResult<Self> {
        let snapshot: GameSnapshot = serde_json::from_str(raw).map_err(|e| {
            warn!(error = %e, "snapshot rejected by schema");
            EngineError::CorruptSnapshot(e.to_string())
        })?;
        if let Err(err) = snapshot.validate() {
            warn!(error = %err, "snapshot rejected by consistency checks");
            return Err(err);
        }
        Ok(snapshot)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.version != SNAPSHOT_VERSION {
            return corrupt(format!("unsupported snapshot version {}", self.version));
        }
        let state = &self.state;

        for (square, piece) in state.board.pieces() {
            if piece.is_joker && piece.kind != PieceKind::Pawn {
                return corrupt(format!("joker flag on a non-pawn at {square}"));
            }
            if piece.is_joker && !self.mode.has_jokers() {
                return corrupt(format!("joker flag at {square} in {:?} mode", self.mode));
            }
            if piece.kind == PieceKind::Pawn && matches!(square.rank(), 0 | 7) {
                return corrupt(format!("pawn on a back rank at {square}"));
            }
        }

        for color in [Color::White, Color::Black] {
            if state.clock(color) > MAX_CLOCK_SECONDS {
                return corrupt(format!(
                    "{color} clock {} exceeds {MAX_CLOCK_SECONDS} seconds",
                    state.clock(color)
                ));
            }
        }

        match state.status {
            GameStatus::Setup => {
                if !state.moves.is_empty() {
                    return corrupt("moves recorded before the game started".to_owned());
                }
            }
            GameStatus::Playing | GameStatus::Ended => {
                for color in [Color::White, Color::Black] {
                    let kings = state
                        .board
                        .pieces_of(color)
                        .filter(|(_, p)| p.kind == PieceKind::King)
                        .count();
                    if kings != 1 {
                        return corrupt(format!("{color} has {kings} kings"));
                    }
                }
                if self.mode.has_jokers() != state.joker_squares.is_some() {
                    return corrupt(format!(
                        "joker squares do not match mode {:?}",
                        self.mode
                    ));
                }
            }
        }

        match (state.status, state.end_reason) {
            (GameStatus::Ended, None) => {
                return corrupt("ended game without a reason".to_owned());
            }
            (GameStatus::Ended, Some(reason)) => check_winner(reason, state.winner)?,
            (_, Some(_)) => return corrupt("end reason on an unfinished game".to_owned()),
            (_, None) if state.winner.is_some() => {
                return corrupt("winner on an unfinished game".to_owned());
            }
            _ => {}
        }

        if let Some(pending) = state.pending_promotion {
            if state.status != GameStatus::Playing {
                return corrupt("promotion pending outside of play".to_owned());
            }
            let pawn_of_mover = state.board.get(pending.from).is_some_and(|p| {
                p.kind == PieceKind::Pawn && p.color == state.current_player
            });
            if !pawn_of_mover || !is_promotion_square(state.current_player, pending.to) {
                return corrupt(format!(
                    "pending promotion {}{} does not fit the board",
                    pending.from, pending.to
                ));
            }
        }

        Ok(())
    }
}

fn check_winner(reason: EndReason, winner: Option<Color>) -> EngineResult<()> {
    match (reason.is_drawn(), winner) {
        (true, Some(_)) => corrupt(format!("{reason:?} cannot have a winner")),
        (false, None) => corrupt(format!("{reason:?} needs a winner")),
        _ => Ok(()),
    }
}

fn corrupt<T>(message: String) -> EngineResult<T> {
    Err(EngineError::CorruptSnapshot(message))
}

impl GameSession {
    /// JSON snapshot of the live session.
    pub fn serialize(&self) -> EngineResult<String> {
        GameSnapshot::capture(self).to_json()
    }

    /// Build a fresh session from a snapshot. The RNG is reseeded from entropy
    /// and the undo history starts empty.
    pub fn deserialize(raw: &str) -> EngineResult<GameSession> {
        let snapshot = GameSnapshot::from_json(raw)?;
        Ok(GameSession::from_parts(
            snapshot.mode,
            snapshot.players,
            snapshot.state,
        ))
    }

    /// Replace the live state with a snapshot, only if it validates.
    pub fn restore(&mut self, raw: &str) -> EngineResult<()> {
        let snapshot = GameSnapshot::from_json(raw)?;
        self.replace_parts(snapshot.mode, snapshot.players, snapshot.state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimeControl;
    use crate::session::game_session::PlayerInfo;

    fn sq(label: &str) -> Square {
        label.parse().expect("test square should parse")
    }

    fn played_session() -> GameSession {
        let mut session = GameSession::with_seed(GameMode::Joker, 99);
        session
            .start_game(
                PlayerInfo::new("white"),
                PlayerInfo::new("black"),
                TimeControl::from_seconds(300),
            )
            .expect("start");
        let (from, to) = session
            .board()
            .pieces_of(Color::White)
            .find_map(|(from, _)| {
                session
                    .legal_destinations(from)
                    .first()
                    .map(|to| (from, *to))
            })
            .expect("white has a legal move");
        session.submit_move(from, to, None).expect("legal move");
        session.tick();
        session
    }

    #[test]
    fn snapshot_round_trip_keeps_state() {
        let session = played_session();
        let json = session.serialize().expect("serialize");
        let back = GameSession::deserialize(&json).expect("deserialize");
        assert_eq!(back.state(), session.state());
        assert_eq!(back.players(), session.players());
        assert_eq!(back.mode(), GameMode::Joker);
        assert!(!back.can_undo());
    }

    #[test]
    fn garbage_is_corrupt() {
        assert!(matches!(
            GameSession::deserialize("not json"),
            Err(EngineError::CorruptSnapshot(_))
        ));
        assert!(matches!(
            GameSession::deserialize(r#"{"version":1}"#),
            Err(EngineError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn inconsistent_snapshots_are_rejected() {
        let session = played_session();

        let mut wrong_version = GameSnapshot::capture(&session);
        wrong_version.version = 42;
        assert!(wrong_version.validate().is_err());

        let mut missing_king = GameSnapshot::capture(&session);
        let king = missing_king
            .state
            .board
            .king_square(Color::Black)
            .expect("black king");
        missing_king.state.board.remove(king);
        assert!(missing_king.validate().is_err());

        let mut winner_while_playing = GameSnapshot::capture(&session);
        winner_while_playing.state.winner = Some(Color::White);
        assert!(winner_while_playing.validate().is_err());

        let mut drawn_with_winner = GameSnapshot::capture(&session);
        drawn_with_winner.state.status = GameStatus::Ended;
        drawn_with_winner.state.end_reason = Some(EndReason::Stalemate);
        drawn_with_winner.state.winner = Some(Color::Black);
        assert!(drawn_with_winner.validate().is_err());

        let mut no_jokers = GameSnapshot::capture(&session);
        no_jokers.state.joker_squares = None;
        assert!(no_jokers.validate().is_err());
    }

    #[test]
    fn oversized_clocks_are_rejected() {
        let session = played_session();

        let mut huge = GameSnapshot::capture(&session);
        huge.state.white_clock_seconds = u32::MAX;
        let json = huge.to_json().expect("encode");
        assert!(matches!(
            GameSession::deserialize(&json),
            Err(EngineError::CorruptSnapshot(_))
        ));

        let mut at_ceiling = GameSnapshot::capture(&session);
        at_ceiling.state.black_clock_seconds = MAX_CLOCK_SECONDS;
        assert!(at_ceiling.validate().is_ok());
    }

    #[test]
    fn joker_flags_need_joker_mode() {
        let mut standard = GameSession::with_seed(GameMode::Standard, 4);
        standard
            .start_game(
                PlayerInfo::default(),
                PlayerInfo::default(),
                TimeControl::default(),
            )
            .expect("start");
        let mut snapshot = GameSnapshot::capture(&standard);
        assert!(snapshot.validate().is_ok());

        if let Some(pawn) = snapshot.state.board.get_mut(sq("d2")) {
            pawn.is_joker = true;
        }
        assert!(matches!(
            snapshot.validate(),
            Err(EngineError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn restore_keeps_live_state_on_failure() {
        let mut session = played_session();
        let before = session.state().clone();
        assert!(session.restore("{}").is_err());
        assert_eq!(session.state(), &before);

        let mut other = GameSession::with_seed(GameMode::Standard, 3);
        other
            .start_game(
                PlayerInfo::default(),
                PlayerInfo::default(),
                TimeControl::default(),
            )
            .expect("start");
        other.submit_move(sq("d2"), sq("d4"), None).expect("d4");
        session
            .restore(&other.serialize().expect("serialize"))
            .expect("valid snapshot restores");
        assert_eq!(session.mode(), GameMode::Standard);
        assert_eq!(session.state(), other.state());
        assert!(!session.can_undo());
    }
}
