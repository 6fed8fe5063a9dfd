//! Legal move validation and enumeration.
//!
//! Legality is pattern + path (see `legal_move_shared`) followed by a
//! self-check gate that simulates the relocation on a cloned board.
//! Destinations are found by brute force over all 64 squares; at this board
//! size that is cheap enough for hints and terminal-state detection.

use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::legal_move_apply::relocate;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_shared::pattern_reaches;
use crate::moves::pawn_moves::is_promotion_square;

/// A legal relocation for the side owning the piece on `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalMove {
    pub from: Square,
    pub to: Square,
    pub is_capture: bool,
    /// The move needs a promotion choice before it can be applied.
    pub promotes: bool,
}

/// Full legality test, including the own-king safety gate.
pub fn is_legal(board: &Board, from: Square, to: Square) -> bool {
    if !pattern_reaches(board, from, to) {
        return false;
    }
    let Some(piece) = board.get(from) else {
        return false;
    };
    !leaves_king_in_check(board, piece.color, from, to)
}

#[inline]
fn leaves_king_in_check(board: &Board, color: Color, from: Square, to: Square) -> bool {
    match relocate(board, from, to) {
        Some(next) => is_king_in_check(&next, color),
        None => true,
    }
}

pub fn legal_destinations(board: &Board, from: Square) -> Vec<Square> {
    if !board.is_occupied(from) {
        return Vec::new();
    }
    Square::all().filter(|to| is_legal(board, from, *to)).collect()
}

pub fn generate_legal_moves(board: &Board, color: Color) -> Vec<LegalMove> {
    let mut out = Vec::with_capacity(64);
    for (from, piece) in board.pieces_of(color) {
        for to in legal_destinations(board, from) {
            out.push(LegalMove {
                from,
                to,
                is_capture: board.is_occupied(to),
                promotes: piece.kind == PieceKind::Pawn && is_promotion_square(color, to),
            });
        }
    }
    out
}

pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces_of(color)
        .any(|(from, _)| Square::all().any(|to| is_legal(board, from, to)))
}
