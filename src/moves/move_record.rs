//! Entries of the move log.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{Piece, PieceKind, Square};

/// One applied move, immutable once appended to the log.
///
/// `piece` is the piece as it stands on `to` after the move, so a promotion
/// shows the new kind and a cleared joker flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    #[serde(default)]
    pub captured: Option<Piece>,
    pub is_capture: bool,
    #[serde(default)]
    pub promotion: Option<PieceKind>,
    pub timestamp: DateTime<Utc>,
}

impl MoveRecord {
    pub fn new(
        from: Square,
        to: Square,
        piece: Piece,
        captured: Option<Piece>,
        promotion: Option<PieceKind>,
    ) -> Self {
        Self {
            from,
            to,
            piece,
            is_capture: captured.is_some(),
            captured,
            promotion,
            timestamp: Utc::now(),
        }
    }

    /// Coordinate form such as `e7e8q`, for logs and debugging.
    pub fn coordinate_notation(&self) -> String {
        let suffix = match self.promotion {
            Some(PieceKind::Queen) => "q",
            Some(PieceKind::Rook) => "r",
            Some(PieceKind::Bishop) => "b",
            Some(PieceKind::Knight) => "n",
            _ => "",
        };
        format!("{}{}{}", self.from, self.to, suffix)
    }
}
