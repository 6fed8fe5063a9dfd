//! Pawn movement patterns.
//!
//! Pawns are the only piece whose pattern depends on color and on what
//! stands on the destination: they advance straight onto empty squares and
//! capture diagonally onto enemy pieces. En passant is not part of this rule
//! set.

use crate::game_state::{board::Board, chess_types::*};
use crate::moves::line_of_sight::square_delta;

/// Straight advance: one step onto an empty square, or two steps from the
/// starting rank when both squares ahead are empty.
pub fn pawn_advance_reaches(board: &Board, color: Color, from: Square, to: Square) -> bool {
    let (d_file, d_rank) = square_delta(from, to);
    let direction = color.pawn_direction();

    if d_file != 0 || board.is_occupied(to) {
        return false;
    }

    if d_rank == direction {
        return true;
    }

    if d_rank == 2 * direction && from.rank() == color.pawn_start_rank() {
        return from
            .offset(0, direction)
            .is_some_and(|middle| !board.is_occupied(middle));
    }

    false
}

/// Diagonal step forward, regardless of what stands on `to`.
#[inline]
pub fn pawn_attack_reaches(color: Color, from: Square, to: Square) -> bool {
    let (d_file, d_rank) = square_delta(from, to);
    d_file.abs() == 1 && d_rank == color.pawn_direction()
}

/// True when moving a `color` pawn onto `to` ends on the promotion rank.
#[inline]
pub fn is_promotion_square(color: Color, to: Square) -> bool {
    to.rank() == color.promotion_rank()
}
