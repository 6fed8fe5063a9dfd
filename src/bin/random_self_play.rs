//! Play one joker-chess game of random legal moves and print the result.
//!
//! Run with:
//! `cargo run --release --bin random_self_play`
//! `cargo run --release --bin random_self_play -- --seed 42 --mode chess960`
//!
//! Set `RUST_LOG=debug` to see every move.

use joker_chess::config::{GameConfig, TimeControl};
use joker_chess::errors::EngineError;
use joker_chess::game_state::chess_types::PieceKind;
use joker_chess::move_generation::legal_move_generator::generate_legal_moves;
use joker_chess::session::game_session::{GameSession, MoveOutcome, PlayerInfo};
use joker_chess::setup::setup_generator::GameMode;
use joker_chess::utils::render_board::render_board_revealed;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

const MAX_PLIES: usize = 400;

fn parse_args() -> Result<GameConfig, String> {
    let mut config = GameConfig {
        seed: Some(1234),
        ..GameConfig::default()
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => {
                let raw = args.next().ok_or("--seed needs a value")?;
                config.seed = Some(raw.parse().map_err(|e| format!("bad seed {raw}: {e}"))?);
            }
            "--mode" => {
                config.mode = match args.next().as_deref() {
                    Some("standard") => GameMode::Standard,
                    Some("chess960") => GameMode::Chess960,
                    Some("joker") => GameMode::Joker,
                    other => return Err(format!("unknown mode {other:?}")),
                };
            }
            other => return Err(format!("unknown argument {other}")),
        }
    }
    Ok(config)
}

fn main() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = parse_args()?;
    let seed = config.seed.unwrap_or_default();
    let mut session = GameSession::from_config(&config);
    session
        .start_game(
            PlayerInfo::new("random white"),
            PlayerInfo::new("random black"),
            TimeControl::from_seconds(600),
        )
        .map_err(|e: EngineError| e.to_string())?;

    println!("{}", render_board_revealed(session.board()));

    let mut picker = StdRng::seed_from_u64(seed.wrapping_add(1));
    for _ in 0..MAX_PLIES {
        let moves = generate_legal_moves(session.board(), session.current_player());
        let Some(mv) = moves.choose(&mut picker) else {
            break;
        };
        let promotion = mv.promotes.then_some(PieceKind::Queen);
        let outcome = session
            .submit_move(mv.from, mv.to, promotion)
            .map_err(|e| e.to_string())?;
        session.tick();
        if let MoveOutcome::GameEnded(_) = outcome {
            break;
        }
    }

    println!("{}", render_board_revealed(session.board()));
    println!("plies: {}", session.moves().len());
    match session.result() {
        Some(result) => println!("result: {:?}, winner: {:?}", result.reason, result.winner),
        None => println!("result: unfinished after {MAX_PLIES} plies"),
    }
    println!(
        "captured: {}",
        session
            .captured_pieces()
            .iter()
            .map(|p| format!("{:?} {:?}", p.color, p.kind))
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(())
}
