use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::legal_move_shared::pattern_reaches;

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.king_square(color)
}

/// True when a king of `color` stands on a square some opposing piece reaches.
///
/// A board without that king is never in check.
#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

/// Whether any `attacker_color` piece reaches `square` by its pattern.
///
/// Pawn attacks only register on occupied squares, which is all the king
/// lookup ever needs.
pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    board
        .pieces_of(attacker_color)
        .any(|(from, _)| pattern_reaches(board, from, square))
}
