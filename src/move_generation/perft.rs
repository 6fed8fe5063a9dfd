//! Move-path enumeration for validating the generator.
//!
//! Counts leaf nodes of the legal move tree under this rule set (no
//! castling, no en passant). A promoting move counts once per promotion
//! choice. Without those special moves the classic start-position counts
//! still hold for the first four plies.

use crate::errors::EngineResult;
use crate::game_state::chess_rules::PROMOTION_CHOICES;
use crate::game_state::{
    board::Board,
    chess_types::{Color, PieceKind},
};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{generate_legal_moves, LegalMove};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub promotions: usize,
    pub checks: usize,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
    }
}

pub fn perft(board: &Board, side_to_move: Color, depth: u8) -> EngineResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generate_legal_moves(board, side_to_move) {
        for promotion in promotion_options(&mv) {
            let applied = apply_move(board, mv.from, mv.to, promotion)?;
            if depth == 1 {
                total.nodes += 1;
                if mv.is_capture {
                    total.captures += 1;
                }
                if promotion.is_some() {
                    total.promotions += 1;
                }
                if is_king_in_check(&applied.board, side_to_move.opposite()) {
                    total.checks += 1;
                }
            } else {
                total.merge(perft(&applied.board, side_to_move.opposite(), depth - 1)?);
            }
        }
    }

    Ok(total)
}

fn promotion_options(mv: &LegalMove) -> Vec<Option<PieceKind>> {
    if mv.promotes {
        PROMOTION_CHOICES.iter().copied().map(Some).collect()
    } else {
        vec![None]
    }
}
