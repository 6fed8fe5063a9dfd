use crate::game_state::{board::Board, chess_types::Square};
use crate::moves::line_of_sight::{is_orthogonal, is_path_clear, square_delta};

#[inline]
pub fn rook_reaches(board: &Board, from: Square, to: Square) -> bool {
    let (d_file, d_rank) = square_delta(from, to);
    is_orthogonal(d_file, d_rank) && is_path_clear(board, from, to)
}
