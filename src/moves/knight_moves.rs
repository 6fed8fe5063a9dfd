use crate::game_state::chess_types::Square;
use crate::moves::line_of_sight::square_delta;

pub const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Knights jump, so only the delta matters.
#[inline]
pub fn knight_reaches(from: Square, to: Square) -> bool {
    let (d_file, d_rank) = square_delta(from, to);
    matches!((d_file.abs(), d_rank.abs()), (1, 2) | (2, 1))
}

pub fn knight_targets(from: Square) -> impl Iterator<Item = Square> {
    KNIGHT_DELTAS
        .into_iter()
        .filter_map(move |(d_file, d_rank)| from.offset(d_file, d_rank))
}
