use joker_chess::config::TimeControl;
use joker_chess::errors::EngineError;
use joker_chess::game_state::chess_types::{Color, PieceKind, Square};
use joker_chess::move_generation::legal_move_checks::is_king_in_check;
use joker_chess::move_generation::terminal_checks::{is_checkmate, is_stalemate};
use joker_chess::session::game_session::{
    ClockTick, EndReason, GameResult, GameSession, GameStatus, MoveOutcome, PlayerInfo, Players,
    SessionState,
};
use joker_chess::session::snapshot::{GameSnapshot, SNAPSHOT_VERSION};
use joker_chess::setup::setup_generator::{GameMode, JokerSquares};
use joker_chess::utils::placement::board_from_placement;

fn sq(label: &str) -> Square {
    label.parse().expect("test square should parse")
}

/// Build a playing session around a hand-made position.
fn session_at(
    mode: GameMode,
    placement: &str,
    to_move: Color,
    jokers: Option<(&str, &str)>,
    clock_seconds: u32,
) -> GameSession {
    let mut board = board_from_placement(placement).expect("placement should parse");
    let joker_squares = jokers.map(|(white, black)| JokerSquares {
        white: sq(white),
        black: sq(black),
    });
    if let Some(jokers) = joker_squares {
        for square in [jokers.white, jokers.black] {
            board
                .get_mut(square)
                .expect("joker square should hold a pawn")
                .is_joker = true;
        }
    }

    let snapshot = GameSnapshot {
        version: SNAPSHOT_VERSION,
        mode,
        players: Players {
            white: PlayerInfo::new("white"),
            black: PlayerInfo::new("black"),
        },
        state: SessionState {
            board,
            current_player: to_move,
            status: GameStatus::Playing,
            white_clock_seconds: clock_seconds,
            black_clock_seconds: clock_seconds,
            joker_squares,
            ..SessionState::default()
        },
    };
    let json = snapshot.to_json().expect("snapshot should encode");
    GameSession::deserialize(&json).expect("hand-made snapshot should validate")
}

fn started(mode: GameMode, seed: u64) -> GameSession {
    let mut session = GameSession::with_seed(mode, seed);
    session
        .start_game(
            PlayerInfo::new("Ada"),
            PlayerInfo::new("Grace"),
            TimeControl::default(),
        )
        .expect("start should succeed");
    session
}

#[test]
fn scenario_a_supported_queen_mates() {
    // Queen on e7 checks down the file, but the king still walks to d1/f1.
    let escapable = board_from_placement("4k3/4q3/8/8/8/8/8/4K3").expect("placement");
    assert!(is_king_in_check(&escapable, Color::White));
    assert!(!is_checkmate(&escapable, Color::White));

    let mate = board_from_placement("8/8/8/8/8/4k3/4q3/4K3").expect("placement");
    assert!(is_checkmate(&mate, Color::White));
    assert!(!is_stalemate(&mate, Color::White));
}

#[test]
fn scenario_b_cornered_king_is_stalemated() {
    let board = board_from_placement("7k/8/8/8/8/8/2q5/K7").expect("placement");
    assert!(!is_king_in_check(&board, Color::White));
    assert!(is_stalemate(&board, Color::White));
    assert!(!is_checkmate(&board, Color::White));
}

#[test]
fn scenario_c_capturing_the_joker_loses() {
    let mut session = session_at(
        GameMode::Joker,
        "4k3/8/8/3p4/4P3/8/8/4K3",
        Color::White,
        Some(("e4", "d5")),
        900,
    );
    let board_before = session.board().clone();

    let outcome = session
        .submit_move(sq("e4"), sq("d5"), None)
        .expect("the capture itself is legal");
    assert_eq!(
        outcome,
        MoveOutcome::GameEnded(GameResult {
            reason: EndReason::Joker,
            winner: Some(Color::Black),
        })
    );
    assert_eq!(session.status(), GameStatus::Ended);
    assert_eq!(session.board(), &board_before);
    assert!(session.moves().is_empty());

    // The losing submission is undoable like any other.
    session.undo().expect("undo the joker capture");
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.winner(), None);
}

#[test]
fn black_capturing_white_joker_loses_for_black() {
    let mut session = session_at(
        GameMode::Joker,
        "4k3/8/8/4p3/3P4/8/8/4K3",
        Color::Black,
        Some(("d4", "e5")),
        900,
    );
    let board_before = session.board().clone();

    let outcome = session
        .submit_move(sq("e5"), sq("d4"), None)
        .expect("the capture itself is legal");
    assert_eq!(
        outcome,
        MoveOutcome::GameEnded(GameResult {
            reason: EndReason::Joker,
            winner: Some(Color::White),
        })
    );
    assert_eq!(session.winner(), Some(Color::White));
    assert_eq!(session.board(), &board_before);
    assert_eq!(session.clock(Color::Black), 900);
}

#[test]
fn scenario_d_promotion_waits_then_clears_joker() {
    let mut session = session_at(
        GameMode::Joker,
        "4k3/P6p/8/8/8/8/8/4K3",
        Color::White,
        Some(("a7", "h7")),
        900,
    );
    let board_before = session.board().clone();

    let pending = session
        .submit_move(sq("a7"), sq("a8"), None)
        .expect("push to the last rank is legal");
    assert_eq!(
        pending,
        MoveOutcome::AwaitingPromotion {
            from: sq("a7"),
            to: sq("a8"),
        }
    );
    assert_eq!(session.board(), &board_before);
    assert_eq!(session.current_player(), Color::White);

    let done = session
        .submit_move(sq("a7"), sq("a8"), Some(PieceKind::Queen))
        .expect("promotion with a choice");
    let MoveOutcome::Accepted { record, gives_check } = done else {
        panic!("expected the promotion to be accepted, got {done:?}");
    };
    assert!(gives_check);
    assert_eq!(record.promotion, Some(PieceKind::Queen));

    let queen = session.board().get(sq("a8")).expect("queen on a8");
    assert_eq!(queen.kind, PieceKind::Queen);
    assert!(!queen.is_joker);
    assert!(session.pending_promotion().is_none());
    assert_eq!(session.current_player(), Color::Black);
}

#[test]
fn scenario_e_rook_bonus_and_promoted_joker_is_safe() {
    let mut session = session_at(
        GameMode::Joker,
        "r7/1Pn3k1/7p/8/8/8/8/4K3",
        Color::White,
        Some(("b7", "h6")),
        900,
    );

    session
        .submit_move(sq("b7"), sq("a8"), Some(PieceKind::Queen))
        .expect("capture-promotion on a8");
    assert_eq!(session.clock(Color::White), 990);

    let outcome = session
        .submit_move(sq("c7"), sq("a8"), None)
        .expect("knight takes the new queen");
    assert!(matches!(outcome, MoveOutcome::Accepted { .. }));
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.clock(Color::Black), 1020);

    let captured: Vec<PieceKind> = session.captured_pieces().iter().map(|p| p.kind).collect();
    assert_eq!(captured, vec![PieceKind::Rook, PieceKind::Queen]);
}

#[test]
fn scenario_f_flag_fall_ends_the_game() {
    let mut session = session_at(
        GameMode::Standard,
        "4k3/8/8/8/8/8/8/4K3",
        Color::White,
        None,
        2,
    );

    assert_eq!(
        session.tick(),
        ClockTick::Decremented {
            color: Color::White,
            remaining: 1,
        }
    );
    assert_eq!(
        session.tick(),
        ClockTick::TimedOut(GameResult {
            reason: EndReason::Timeout,
            winner: Some(Color::Black),
        })
    );
    assert_eq!(session.clock(Color::White), 0);

    assert_eq!(session.tick(), ClockTick::Idle);
    assert_eq!(session.clock(Color::White), 0);
    assert_eq!(session.clock(Color::Black), 2);
    assert_eq!(session.end_reason(), Some(EndReason::Timeout));
}

#[test]
fn paused_clock_does_not_fall() {
    let mut session = session_at(
        GameMode::Standard,
        "4k3/8/8/8/8/8/8/4K3",
        Color::White,
        None,
        1,
    );
    session.pause().expect("pause");
    for _ in 0..5 {
        assert_eq!(session.tick(), ClockTick::Idle);
    }
    assert_eq!(session.status(), GameStatus::Playing);
    session.resume().expect("resume");
    assert!(matches!(session.tick(), ClockTick::TimedOut(_)));
}

#[test]
fn seeded_setups_are_reproducible() {
    let a = started(GameMode::Joker, 314);
    let b = started(GameMode::Joker, 314);
    assert_eq!(a.board(), b.board());
    assert_eq!(a.joker_squares(), b.joker_squares());

    let jokers = a.joker_squares().expect("joker mode records joker squares");
    assert_ne!(jokers.white.file(), jokers.black.file());
    assert_eq!(jokers.white.rank(), 1);
    assert_eq!(jokers.black.rank(), 6);
}

#[test]
fn serialize_round_trip_mid_game() {
    let mut session = started(GameMode::Joker, 8);
    for _ in 0..3 {
        let (from, to) = session
            .board()
            .pieces_of(session.current_player())
            .find_map(|(from, _)| {
                session
                    .legal_destinations(from)
                    .into_iter()
                    .find(|to| !session.board().is_occupied(*to))
                    .map(|to| (from, to))
            })
            .expect("a quiet move exists in the opening");
        session.submit_move(from, to, None).expect("quiet move");
        session.tick();
    }
    session.offer_draw(Color::Black).expect("offer");

    let json = session.serialize().expect("serialize");
    let restored = GameSession::deserialize(&json).expect("deserialize");
    assert_eq!(restored.board(), session.board());
    assert_eq!(restored.clock(Color::White), session.clock(Color::White));
    assert_eq!(restored.clock(Color::Black), session.clock(Color::Black));
    assert_eq!(restored.status(), session.status());
    assert_eq!(restored.moves(), session.moves());
    assert_eq!(restored.pending_draw_offer(), Some(Color::Black));
    assert_eq!(restored.joker_squares(), session.joker_squares());
}

#[test]
fn resign_twice_changes_nothing() {
    let mut session = started(GameMode::Standard, 1);
    session.resign(Color::Black).expect("resign");
    let ended = session.state().clone();
    session.resign(Color::White).expect("no-op");
    assert_eq!(session.state(), &ended);
    assert_eq!(session.winner(), Some(Color::White));
    assert_eq!(session.end_reason(), Some(EndReason::Resignation));
}

#[test]
fn moves_after_the_end_are_rejected() {
    let mut session = started(GameMode::Standard, 1);
    session.offer_draw(Color::White).expect("offer");
    session.respond_to_draw(true).expect("accept");
    assert!(matches!(
        session.submit_move(sq("e2"), sq("e4"), None),
        Err(EngineError::InvalidState(_))
    ));
    assert!(matches!(
        session.offer_draw(Color::White),
        Err(EngineError::InvalidState(_))
    ));
}

#[test]
fn own_king_exposure_is_illegal() {
    // The e2 rook is pinned against the king by the e8 rook.
    let mut session = session_at(
        GameMode::Standard,
        "4r2k/8/8/8/8/8/4R3/4K3",
        Color::White,
        None,
        900,
    );
    assert!(matches!(
        session.submit_move(sq("e2"), sq("a2"), None),
        Err(EngineError::IllegalMove { .. })
    ));
    assert!(session.submit_move(sq("e2"), sq("e5"), None).is_ok());
}
