//! Movement patterns shared by the validator and attack detection.

use crate::game_state::{board::Board, chess_types::*};
use crate::moves::bishop_moves::bishop_reaches;
use crate::moves::king_moves::king_reaches;
use crate::moves::knight_moves::knight_reaches;
use crate::moves::pawn_moves::{pawn_advance_reaches, pawn_attack_reaches};
use crate::moves::queen_moves::queen_reaches;
use crate::moves::rook_moves::rook_reaches;

/// Whether the piece on `from` may relocate to `to` by its movement pattern.
///
/// Checks occupancy of the endpoints, the per-kind pattern and path
/// clearance, but not whether the mover's own king ends up in check. Attack
/// detection uses this directly, which keeps it free of recursion.
pub fn pattern_reaches(board: &Board, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let Some(piece) = board.get(from) else {
        return false;
    };
    let target = board.get(to);
    if target.is_some_and(|t| t.color == piece.color) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => {
            if target.is_some() {
                pawn_attack_reaches(piece.color, from, to)
            } else {
                pawn_advance_reaches(board, piece.color, from, to)
            }
        }
        PieceKind::Knight => knight_reaches(from, to),
        PieceKind::Bishop => bishop_reaches(board, from, to),
        PieceKind::Rook => rook_reaches(board, from, to),
        PieceKind::Queen => queen_reaches(board, from, to),
        PieceKind::King => king_reaches(from, to),
    }
}
