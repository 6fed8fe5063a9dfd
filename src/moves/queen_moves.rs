use crate::game_state::{board::Board, chess_types::Square};
use crate::moves::bishop_moves::bishop_reaches;
use crate::moves::rook_moves::rook_reaches;

#[inline]
pub fn queen_reaches(board: &Board, from: Square, to: Square) -> bool {
    rook_reaches(board, from, to) || bishop_reaches(board, from, to)
}
