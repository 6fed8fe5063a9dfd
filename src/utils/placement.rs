//! Piece-placement strings.
//!
//! Reads and writes the board field of a FEN record (`rnbqkbnr/pppppppp/...`),
//! ranks from 8 down to 1. Only the placement is covered; side to move,
//! clocks and variant flags live on the session. Handy for building test
//! positions and for compact debug output.

use crate::errors::EngineError;
use crate::game_state::{board::Board, chess_types::*};

/// Classic start position.
pub const STANDARD_PLACEMENT: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR";

/// Parse a placement string into a board.
///
/// Pawns off their starting rank and every piece off its home rank are
/// marked as already moved.
pub fn board_from_placement(placement: &str) -> Result<Board, EngineError> {
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(EngineError::InvalidPlacement(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut board = Board::new_empty();
    for (row, rank_str) in ranks.iter().enumerate() {
        let rank = 7 - row as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(EngineError::InvalidPlacement(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(EngineError::InvalidPlacement(format!(
                        "rank {} has too many files",
                        rank + 1
                    )));
                }
                continue;
            }

            let (color, kind) = piece_from_char(ch).ok_or_else(|| {
                EngineError::InvalidPlacement(format!("invalid piece character '{ch}'"))
            })?;
            let square = Square::new(file, rank).ok_or_else(|| {
                EngineError::InvalidPlacement(format!("rank {} has too many files", rank + 1))
            })?;

            let mut piece = Piece::new(kind, color);
            piece.has_moved = !stands_on_home_rank(kind, color, rank);
            board.set(square, piece);
            file += 1;
        }

        if file != 8 {
            return Err(EngineError::InvalidPlacement(format!(
                "rank {} does not sum to 8 files",
                rank + 1
            )));
        }
    }

    Ok(board)
}

/// Write the placement field for a board.
pub fn placement_of(board: &Board) -> String {
    let mut out = String::new();
    for rank in (0..8u8).rev() {
        let mut empty = 0u8;
        for file in 0..8u8 {
            let piece = Square::new(file, rank).and_then(|sq| board.get(sq));
            match piece {
                Some(piece) => {
                    if empty > 0 {
                        out.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    out.push(piece_to_char(piece.color, piece.kind));
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            out.push(char::from(b'0' + empty));
        }
        if rank > 0 {
            out.push('/');
        }
    }
    out
}

fn stands_on_home_rank(kind: PieceKind, color: Color, rank: u8) -> bool {
    match kind {
        PieceKind::Pawn => rank == color.pawn_start_rank(),
        _ => rank == color.back_rank(),
    }
}

pub fn piece_from_char(ch: char) -> Option<(Color, PieceKind)> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some((color, kind))
}

pub fn piece_to_char(color: Color, kind: PieceKind) -> char {
    let ch = match kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };
    match color {
        Color::White => ch.to_ascii_uppercase(),
        Color::Black => ch,
    }
}
