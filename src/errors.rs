//! Errors used throughout the engine.
//!
//! `EngineError` is the single error type returned by board parsing, move
//! submission, session control and snapshot handling. Every variant is
//! recoverable: the session is left exactly as it was before the failing call.
//!
//! Terminal outcomes such as a joker capture or a flag fall are *not* errors;
//! they are reported through `MoveOutcome` and the session status.

use thiserror::Error;

use crate::game_state::chess_types::{PieceKind, Square};

/// Unified error type for the engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested relocation is not a legal move for the side to move.
    ///
    /// Covers an empty source square, moving the opponent's piece, a pattern
    /// violation, a blocked path, and moves that leave the own king in check.
    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    /// The call does not make sense in the current session state
    /// (for example moving before `start_game`, or answering a draw offer
    /// that was never made).
    #[error("invalid session state: {0}")]
    InvalidState(String),

    /// A pawn may only promote to a knight, bishop, rook or queen.
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),

    /// A square label outside `a1..h8`.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// A piece-placement string could not be parsed into a board.
    #[error("invalid placement: {0}")]
    InvalidPlacement(String),

    /// A serialized snapshot failed schema or consistency checks.
    #[error("corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    /// The snapshot store could not read or write.
    #[error("storage failure: {0}")]
    Storage(#[from] std::io::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;
