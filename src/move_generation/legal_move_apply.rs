//! Board transitions for single moves.
//!
//! Every function here works on a clone and leaves the input board as it
//! was, so speculative checks never touch live state.

use crate::errors::{EngineError, EngineResult};
use crate::game_state::{board::Board, chess_types::*};

/// Outcome of applying one move to a board.
#[derive(Debug, Clone)]
pub struct AppliedMove {
    pub board: Board,
    /// The piece as it stands on the destination afterwards.
    pub moved: Piece,
    pub captured: Option<Piece>,
}

/// Plain relocation used for self-check simulation: no flags change.
pub fn relocate(board: &Board, from: Square, to: Square) -> Option<Board> {
    let mut next = board.clone();
    let piece = next.remove(from)?;
    next.set(to, piece);
    Some(next)
}

/// Apply a move, marking the piece as moved and promoting when asked.
///
/// A promotion clears the joker flag for good. Legality is the caller's job.
pub fn apply_move(
    board: &Board,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> EngineResult<AppliedMove> {
    let mut next = board.clone();
    let mut moved = next
        .remove(from)
        .ok_or(EngineError::IllegalMove { from, to })?;

    moved.has_moved = true;
    if let Some(kind) = promotion {
        if !kind.is_promotion_target() {
            return Err(EngineError::InvalidPromotion(kind));
        }
        moved.kind = kind;
        moved.is_joker = false;
    }

    let captured = next.set(to, moved);

    Ok(AppliedMove {
        board: next,
        moved,
        captured,
    })
}
