//! Checkmate and stalemate detection.
//!
//! Both are evaluated for the side about to move, right after the opponent's
//! move has been applied.

use crate::game_state::{board::Board, chess_types::Color};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_any_legal_move;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardVerdict {
    Checkmate,
    Stalemate,
}

#[inline]
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_king_in_check(board, color) && !has_any_legal_move(board, color)
}

#[inline]
pub fn is_stalemate(board: &Board, color: Color) -> bool {
    !is_king_in_check(board, color) && !has_any_legal_move(board, color)
}

/// Terminal verdict for `color` to move, `None` while the game goes on.
pub fn board_verdict(board: &Board, color: Color) -> Option<BoardVerdict> {
    if has_any_legal_move(board, color) {
        return None;
    }
    if is_king_in_check(board, color) {
        Some(BoardVerdict::Checkmate)
    } else {
        Some(BoardVerdict::Stalemate)
    }
}
