//! Path clearance for sliding pieces.
//!
//! Bishops, rooks and queens need every square strictly between the
//! endpoints to be empty. The endpoints themselves are never inspected here;
//! capture rules live with the validator.

use crate::game_state::{board::Board, chess_types::Square};

/// File/rank distance from `from` to `to`.
#[inline]
pub fn square_delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.file() as i8 - from.file() as i8,
        to.rank() as i8 - from.rank() as i8,
    )
}

#[inline]
pub fn is_orthogonal(d_file: i8, d_rank: i8) -> bool {
    (d_file == 0) != (d_rank == 0)
}

#[inline]
pub fn is_diagonal(d_file: i8, d_rank: i8) -> bool {
    d_file != 0 && d_file.abs() == d_rank.abs()
}

/// Squares strictly between two aligned squares, in walking order.
///
/// Returns an empty list when the squares share no rank, file or diagonal.
pub fn squares_between(from: Square, to: Square) -> Vec<Square> {
    let (d_file, d_rank) = square_delta(from, to);
    if !is_orthogonal(d_file, d_rank) && !is_diagonal(d_file, d_rank) {
        return Vec::new();
    }

    let step = (d_file.signum(), d_rank.signum());
    let mut out = Vec::new();
    let mut current = from.offset(step.0, step.1);
    while let Some(square) = current {
        if square == to {
            break;
        }
        out.push(square);
        current = square.offset(step.0, step.1);
    }
    out
}

#[inline]
pub fn is_path_clear(board: &Board, from: Square, to: Square) -> bool {
    squares_between(from, to)
        .into_iter()
        .all(|square| !board.is_occupied(square))
}
