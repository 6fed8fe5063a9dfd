use crate::game_state::chess_types::Square;
use crate::moves::line_of_sight::square_delta;

/// One step in any direction. Castling is not part of this rule set.
#[inline]
pub fn king_reaches(from: Square, to: Square) -> bool {
    let (d_file, d_rank) = square_delta(from, to);
    from != to && d_file.abs() <= 1 && d_rank.abs() <= 1
}
