//! Initial positions for the three game modes.
//!
//! Standard games use the classic back rank. Chess960 and joker games
//! shuffle the seven non-king back-rank pieces and then drop the king into a
//! random slot; both colors receive the same arrangement. Joker games also
//! secretly flag one pawn per side.
//!
//! All randomness comes from the caller's `Rng`, so a seeded `StdRng`
//! reproduces a setup exactly.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::{NON_KING_BACK_RANK, STANDARD_BACK_RANK};
use crate::game_state::{board::Board, chess_types::*};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    Standard,
    Chess960,
    #[default]
    Joker,
}

impl GameMode {
    #[inline]
    pub const fn shuffles_back_rank(self) -> bool {
        matches!(self, GameMode::Chess960 | GameMode::Joker)
    }

    #[inline]
    pub const fn has_jokers(self) -> bool {
        matches!(self, GameMode::Joker)
    }
}

/// Squares of the two joker pawns as assigned at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokerSquares {
    pub white: Square,
    pub black: Square,
}

impl JokerSquares {
    #[inline]
    pub const fn of(&self, color: Color) -> Square {
        match color {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InitialSetup {
    pub back_rank: [PieceKind; 8],
    pub board: Board,
    pub jokers: Option<JokerSquares>,
}

pub fn generate_setup<R: Rng + ?Sized>(mode: GameMode, rng: &mut R) -> EngineResult<InitialSetup> {
    let back_rank = if mode.shuffles_back_rank() {
        shuffled_back_rank(rng)
    } else {
        STANDARD_BACK_RANK
    };

    let mut board = board_from_back_rank(back_rank);
    let jokers = if mode.has_jokers() {
        let jokers = select_joker_pawns(&board, rng)?;
        mark_jokers(&mut board, jokers)?;
        Some(jokers)
    } else {
        None
    };

    Ok(InitialSetup {
        back_rank,
        board,
        jokers,
    })
}

/// Shuffle the non-king pieces, then insert the king at a uniform index.
///
/// Bishops may share a square color and the king need not stand between the
/// rooks; this is a random back rank, not a strict Chess960 position.
pub fn shuffled_back_rank<R: Rng + ?Sized>(rng: &mut R) -> [PieceKind; 8] {
    let mut pieces: Vec<PieceKind> = NON_KING_BACK_RANK.to_vec();
    pieces.shuffle(rng);
    let king_index = rng.random_range(0..=pieces.len());
    pieces.insert(king_index, PieceKind::King);

    let mut rank = STANDARD_BACK_RANK;
    rank.copy_from_slice(&pieces);
    rank
}

/// Mirror one back-rank arrangement for both colors and add full pawn rows.
pub fn board_from_back_rank(back_rank: [PieceKind; 8]) -> Board {
    let mut board = Board::new_empty();
    for color in [Color::White, Color::Black] {
        for (file, kind) in back_rank.iter().copied().enumerate() {
            let file = file as u8;
            if let Some(square) = Square::new(file, color.back_rank()) {
                board.set(square, Piece::new(kind, color));
            }
            if let Some(square) = Square::new(file, color.pawn_start_rank()) {
                board.set(square, Piece::new(PieceKind::Pawn, color));
            }
        }
    }
    board
}

/// Pick one pawn per side uniformly, never on the same file.
///
/// Choosing uniformly among all valid pairs gives the same distribution as
/// redrawing until the files differ, without an unbounded loop.
pub fn select_joker_pawns<R: Rng + ?Sized>(
    board: &Board,
    rng: &mut R,
) -> EngineResult<JokerSquares> {
    let pawns = |color: Color| -> Vec<Square> {
        board
            .pieces_of(color)
            .filter(|(_, piece)| piece.kind == PieceKind::Pawn)
            .map(|(sq, _)| sq)
            .collect()
    };
    let white_pawns = pawns(Color::White);
    let black_pawns = pawns(Color::Black);

    let pairs: Vec<JokerSquares> = white_pawns
        .iter()
        .flat_map(|white| {
            black_pawns
                .iter()
                .filter(move |black| black.file() != white.file())
                .map(move |black| JokerSquares {
                    white: *white,
                    black: *black,
                })
        })
        .collect();

    pairs.choose(rng).copied().ok_or_else(|| {
        EngineError::InvalidState("no pawn pair on different files for joker selection".to_owned())
    })
}

fn mark_jokers(board: &mut Board, jokers: JokerSquares) -> EngineResult<()> {
    for color in [Color::White, Color::Black] {
        let square = jokers.of(color);
        let pawn = board.get_mut(square).ok_or_else(|| {
            EngineError::InvalidState(format!("joker square {square} is empty"))
        })?;
        pawn.is_joker = true;
    }
    Ok(())
}
