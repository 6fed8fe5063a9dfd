//! Rule constants of the variant.
//!
//! Back-rank layouts, promotion choices and the capture time-bonus table.

use crate::game_state::chess_types::PieceKind;

/// Classic back rank, `a` file to `h` file.
pub const STANDARD_BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Back-rank pieces other than the king, shuffled in randomized setups.
pub const NON_KING_BACK_RANK: [PieceKind; 7] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Default time control of a new game, 15 minutes per side.
pub const DEFAULT_TIME_CONTROL_SECONDS: u32 = 15 * 60;

/// Longest accepted time control, one day per side.
pub const MAX_TIME_CONTROL_SECONDS: u32 = 24 * 60 * 60;

/// Ceiling for a running clock. Capture bonuses never push a clock past it.
pub const MAX_CLOCK_SECONDS: u32 = 2 * MAX_TIME_CONTROL_SECONDS;

/// Seconds credited to the capturer's clock for taking a piece of `kind`.
///
/// Kings are never captured, so they carry no bonus.
#[inline]
pub const fn capture_time_bonus(kind: PieceKind) -> u32 {
    match kind {
        PieceKind::Pawn => 30,
        PieceKind::Knight | PieceKind::Bishop => 60,
        PieceKind::Rook => 90,
        PieceKind::Queen => 120,
        PieceKind::King => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_bonus_table() {
        assert_eq!(capture_time_bonus(PieceKind::Pawn), 30);
        assert_eq!(capture_time_bonus(PieceKind::Knight), 60);
        assert_eq!(capture_time_bonus(PieceKind::Bishop), 60);
        assert_eq!(capture_time_bonus(PieceKind::Rook), 90);
        assert_eq!(capture_time_bonus(PieceKind::Queen), 120);
        assert_eq!(capture_time_bonus(PieceKind::King), 0);
    }

    #[test]
    fn shuffled_pool_is_standard_rank_without_king() {
        let mut pool: Vec<usize> = NON_KING_BACK_RANK.iter().map(|k| k.index()).collect();
        let mut standard: Vec<usize> = STANDARD_BACK_RANK
            .iter()
            .filter(|k| **k != PieceKind::King)
            .map(|k| k.index())
            .collect();
        pool.sort_unstable();
        standard.sort_unstable();
        assert_eq!(pool, standard);
    }
}
