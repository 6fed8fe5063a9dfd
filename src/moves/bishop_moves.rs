use crate::game_state::{board::Board, chess_types::Square};
use crate::moves::line_of_sight::{is_diagonal, is_path_clear, square_delta};

#[inline]
pub fn bishop_reaches(board: &Board, from: Square, to: Square) -> bool {
    let (d_file, d_rank) = square_delta(from, to);
    is_diagonal(d_file, d_rank) && is_path_clear(board, from, to)
}
