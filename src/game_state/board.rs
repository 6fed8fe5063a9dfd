//! Square-addressed piece placement.
//!
//! `Board` is pure data: it knows where pieces stand and nothing about the
//! rules. Cloning yields a fully independent copy, which is what speculative
//! legality checks and undo snapshots rely on.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Square, Piece>", into = "BTreeMap<Square, Piece>")]
pub struct Board {
    cells: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self { cells: [None; 64] }
    }
}

impl Board {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.cells[square.index()].as_mut()
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.cells[square.index()].is_some()
    }

    /// Place a piece, returning whatever stood there before.
    #[inline]
    pub fn set(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.cells[square.index()].replace(piece)
    }

    #[inline]
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.index()].take()
    }

    /// Occupied squares in `a1..h8` order.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces_of(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

impl From<BTreeMap<Square, Piece>> for Board {
    fn from(value: BTreeMap<Square, Piece>) -> Self {
        let mut board = Board::new_empty();
        for (square, piece) in value {
            board.set(square, piece);
        }
        board
    }
}

impl From<Board> for BTreeMap<Square, Piece> {
    fn from(value: Board) -> Self {
        value.pieces().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(label: &str) -> Square {
        label.parse().expect("test square should parse")
    }

    #[test]
    fn set_get_remove() {
        let mut board = Board::new_empty();
        assert!(board.is_empty());

        let rook = Piece::new(PieceKind::Rook, Color::White);
        assert_eq!(board.set(sq("a1"), rook), None);
        assert_eq!(board.get(sq("a1")), Some(rook));
        assert!(board.is_occupied(sq("a1")));

        let replaced = board.set(sq("a1"), Piece::new(PieceKind::Queen, Color::Black));
        assert_eq!(replaced, Some(rook));
        assert_eq!(board.count(), 1);

        assert!(board.remove(sq("a1")).is_some());
        assert!(board.remove(sq("a1")).is_none());
    }

    #[test]
    fn clones_are_independent() {
        let mut board = Board::new_empty();
        board.set(sq("e1"), Piece::new(PieceKind::King, Color::White));
        let mut copy = board.clone();
        copy.remove(sq("e1"));
        if let Some(piece) = board.get_mut(sq("e1")) {
            piece.has_moved = true;
        }

        assert!(copy.get(sq("e1")).is_none());
        assert_eq!(board.king_square(Color::White), Some(sq("e1")));
        assert!(board.get(sq("e1")).is_some_and(|p| p.has_moved));
    }

    #[test]
    fn serializes_as_square_keyed_map() {
        let mut board = Board::new_empty();
        board.set(sq("e8"), Piece::new(PieceKind::King, Color::Black));
        let json = serde_json::to_string(&board).expect("board should serialize");
        assert!(json.contains("\"e8\""));
        let back: Board = serde_json::from_str(&json).expect("board should deserialize");
        assert_eq!(back, board);
    }
}
