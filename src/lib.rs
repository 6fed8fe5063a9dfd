//! Crate root module declarations for the joker-chess rule engine.
//!
//! This file exposes the board model, move validation, setup generation,
//! the game session state machine and its helpers so binaries, tests and
//! embedding applications can import stable module paths.

pub mod config;
pub mod errors;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod line_of_sight;
    pub mod move_record;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod perft;
    pub mod terminal_checks;
}

pub mod setup {
    pub mod setup_generator;
}

pub mod session {
    pub mod clock;
    pub mod game_session;
    pub mod history;
    pub mod live_game;
    pub mod snapshot;
    pub mod store;
}

pub mod utils {
    pub mod algebraic;
    pub mod placement;
    pub mod render_board;
}
