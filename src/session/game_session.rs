//! The game session state machine.
//!
//! A `GameSession` is created in `Setup` with an empty board, moves to
//! `Playing` on `start_game` and ends exactly once. Every mutating call either
//! succeeds as a whole or returns an error with the session untouched.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::{GameConfig, TimeControl};
use crate::errors::{EngineError, EngineResult};
use crate::game_state::chess_rules::{capture_time_bonus, MAX_CLOCK_SECONDS};
use crate::game_state::{board::Board, chess_types::*};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{is_legal, legal_destinations};
use crate::move_generation::terminal_checks::{board_verdict, BoardVerdict};
use crate::moves::move_record::MoveRecord;
use crate::moves::pawn_moves::is_promotion_square;
use crate::session::history::History;
use crate::setup::setup_generator::{generate_setup, GameMode, JokerSquares};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Setup,
    Playing,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    Checkmate,
    Stalemate,
    Timeout,
    Joker,
    Resignation,
    Draw,
}

impl EndReason {
    /// Reasons that end the game without a winner.
    #[inline]
    pub const fn is_drawn(self) -> bool {
        matches!(self, EndReason::Stalemate | EndReason::Draw)
    }
}

/// Final result of a game. `winner == None` is a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub reason: EndReason,
    pub winner: Option<Color>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub name: String,
}

impl PlayerInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Players {
    pub white: PlayerInfo,
    pub black: PlayerInfo,
}

impl Players {
    pub fn of(&self, color: Color) -> &PlayerInfo {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }
}

/// A pawn move to the last rank waiting for the piece choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
}

/// Everything that undo/redo swaps and snapshots persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub board: Board,
    pub current_player: Color,
    pub moves: Vec<MoveRecord>,
    pub status: GameStatus,
    pub winner: Option<Color>,
    pub end_reason: Option<EndReason>,
    pub white_clock_seconds: u32,
    pub black_clock_seconds: u32,
    pub joker_squares: Option<JokerSquares>,
    pub pending_promotion: Option<PendingPromotion>,
    pub pending_draw_offer: Option<Color>,
    pub paused: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            board: Board::new_empty(),
            current_player: Color::White,
            moves: Vec::new(),
            status: GameStatus::Setup,
            winner: None,
            end_reason: None,
            white_clock_seconds: 0,
            black_clock_seconds: 0,
            joker_squares: None,
            pending_promotion: None,
            pending_draw_offer: None,
            paused: false,
        }
    }
}

impl SessionState {
    #[inline]
    pub fn clock(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white_clock_seconds,
            Color::Black => self.black_clock_seconds,
        }
    }

    #[inline]
    fn clock_mut(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::White => &mut self.white_clock_seconds,
            Color::Black => &mut self.black_clock_seconds,
        }
    }

    pub fn result(&self) -> Option<GameResult> {
        match (self.status, self.end_reason) {
            (GameStatus::Ended, Some(reason)) => Some(GameResult {
                reason,
                winner: self.winner,
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted { record: MoveRecord, gives_check: bool },
    AwaitingPromotion { from: Square, to: Square },
    GameEnded(GameResult),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionOutcome {
    Selected { square: Square, destinations: Vec<Square> },
    Deselected,
    /// Empty square or opponent piece with nothing selected.
    Ignored,
    Moved(MoveOutcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockTick {
    /// Not playing, or paused.
    Idle,
    Decremented { color: Color, remaining: u32 },
    TimedOut(GameResult),
}

#[derive(Debug, Clone)]
pub struct GameSession {
    mode: GameMode,
    players: Players,
    state: SessionState,
    history: History<SessionState>,
    selected: Option<Square>,
    rng: StdRng,
}

impl GameSession {
    /// New session in `Setup`, seeded from OS entropy.
    pub fn new(mode: GameMode) -> Self {
        Self::with_rng(mode, StdRng::from_rng(&mut rand::rng()))
    }

    pub fn with_seed(mode: GameMode, seed: u64) -> Self {
        Self::with_rng(mode, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(mode: GameMode, rng: StdRng) -> Self {
        Self {
            mode,
            players: Players::default(),
            state: SessionState::default(),
            history: History::default(),
            selected: None,
            rng,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        match config.seed {
            Some(seed) => Self::with_seed(config.mode, seed),
            None => Self::new(config.mode),
        }
    }

    /// Rebuild a session around restored parts; history starts empty.
    pub(crate) fn from_parts(mode: GameMode, players: Players, state: SessionState) -> Self {
        let mut session = Self::new(mode);
        session.players = players;
        session.state = state;
        session
    }

    pub(crate) fn replace_parts(&mut self, mode: GameMode, players: Players, state: SessionState) {
        self.mode = mode;
        self.players = players;
        self.state = state;
        self.history.clear();
        self.selected = None;
    }

    // ----- accessors -----

    #[inline]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[inline]
    pub fn players(&self) -> &Players {
        &self.players
    }

    #[inline]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.state.board
    }

    #[inline]
    pub fn current_player(&self) -> Color {
        self.state.current_player
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    #[inline]
    pub fn winner(&self) -> Option<Color> {
        self.state.winner
    }

    #[inline]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.state.end_reason
    }

    #[inline]
    pub fn result(&self) -> Option<GameResult> {
        self.state.result()
    }

    #[inline]
    pub fn clock(&self, color: Color) -> u32 {
        self.state.clock(color)
    }

    #[inline]
    pub fn moves(&self) -> &[MoveRecord] {
        &self.state.moves
    }

    #[inline]
    pub fn joker_squares(&self) -> Option<JokerSquares> {
        self.state.joker_squares
    }

    #[inline]
    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.state.pending_promotion
    }

    #[inline]
    pub fn pending_draw_offer(&self) -> Option<Color> {
        self.state.pending_draw_offer
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    #[inline]
    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Pieces taken so far, in capture order.
    pub fn captured_pieces(&self) -> Vec<Piece> {
        self.state.moves.iter().filter_map(|m| m.captured).collect()
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        is_king_in_check(&self.state.board, color)
    }

    /// Legal targets of the piece on `square`; empty for an empty square.
    pub fn legal_destinations(&self, square: Square) -> Vec<Square> {
        legal_destinations(&self.state.board, square)
    }

    // ----- lifecycle -----

    pub fn start_game(
        &mut self,
        white: PlayerInfo,
        black: PlayerInfo,
        time_control: TimeControl,
    ) -> EngineResult<()> {
        if self.state.status != GameStatus::Setup {
            return Err(EngineError::InvalidState(
                "game already started".to_owned(),
            ));
        }
        let seconds = time_control.starting_seconds()?;

        let setup = generate_setup(self.mode, &mut self.rng)?;
        self.players = Players { white, black };
        self.state = SessionState {
            board: setup.board,
            status: GameStatus::Playing,
            white_clock_seconds: seconds,
            black_clock_seconds: seconds,
            joker_squares: setup.jokers,
            ..SessionState::default()
        };
        self.history.clear();
        self.selected = None;

        info!(
            mode = ?self.mode,
            white = %self.players.white.name,
            black = %self.players.black.name,
            seconds,
            "game started"
        );
        Ok(())
    }

    fn ensure_playing(&self) -> EngineResult<()> {
        match self.state.status {
            GameStatus::Playing => Ok(()),
            status => Err(EngineError::InvalidState(format!(
                "game is not in progress ({status:?})"
            ))),
        }
    }

    fn finish(&mut self, reason: EndReason, winner: Option<Color>) -> GameResult {
        self.state.status = GameStatus::Ended;
        self.state.end_reason = Some(reason);
        self.state.winner = winner;
        self.state.pending_promotion = None;
        self.state.pending_draw_offer = None;
        self.selected = None;
        info!(?reason, ?winner, moves = self.state.moves.len(), "game ended");
        GameResult { reason, winner }
    }

    // ----- moves -----

    pub fn submit_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> EngineResult<MoveOutcome> {
        self.ensure_playing()?;

        let mover = self.state.current_player;
        let piece = self
            .state
            .board
            .get(from)
            .filter(|p| p.color == mover)
            .ok_or(EngineError::IllegalMove { from, to })?;
        if !is_legal(&self.state.board, from, to) {
            debug!(%from, %to, "rejected illegal move");
            return Err(EngineError::IllegalMove { from, to });
        }

        let promotion = if piece.kind == PieceKind::Pawn && is_promotion_square(mover, to) {
            match promotion {
                None => {
                    self.state.pending_promotion = Some(PendingPromotion { from, to });
                    debug!(%from, %to, "awaiting promotion choice");
                    return Ok(MoveOutcome::AwaitingPromotion { from, to });
                }
                Some(kind) if !kind.is_promotion_target() => {
                    return Err(EngineError::InvalidPromotion(kind));
                }
                choice => choice,
            }
        } else {
            None
        };

        if let Some(joker) = self
            .state
            .board
            .get(to)
            .filter(|target| target.is_active_joker() && target.color != mover)
        {
            self.history.record(self.state.clone());
            info!(%from, %to, "joker pawn captured");
            let result = self.finish(EndReason::Joker, Some(joker.color));
            return Ok(MoveOutcome::GameEnded(result));
        }

        let applied = apply_move(&self.state.board, from, to, promotion)?;
        self.history.record(self.state.clone());

        self.state.board = applied.board;
        let record = MoveRecord::new(from, to, applied.moved, applied.captured, promotion);
        self.state.moves.push(record.clone());
        if let Some(captured) = applied.captured {
            let clock = self.state.clock_mut(mover);
            *clock = clock
                .saturating_add(capture_time_bonus(captured.kind))
                .min(MAX_CLOCK_SECONDS);
        }

        let next = mover.opposite();
        self.state.current_player = next;
        self.state.pending_promotion = None;
        self.selected = None;
        debug!(mv = %record.coordinate_notation(), capture = record.is_capture, "move applied");

        let outcome = match board_verdict(&self.state.board, next) {
            Some(BoardVerdict::Checkmate) => {
                MoveOutcome::GameEnded(self.finish(EndReason::Checkmate, Some(mover)))
            }
            Some(BoardVerdict::Stalemate) => {
                MoveOutcome::GameEnded(self.finish(EndReason::Stalemate, None))
            }
            None => MoveOutcome::Accepted {
                gives_check: is_king_in_check(&self.state.board, next),
                record,
            },
        };
        Ok(outcome)
    }

    /// Complete the pending promotion with `choice`.
    pub fn promote(&mut self, choice: PieceKind) -> EngineResult<MoveOutcome> {
        self.ensure_playing()?;
        let pending = self
            .state
            .pending_promotion
            .ok_or_else(|| EngineError::InvalidState("no promotion pending".to_owned()))?;
        self.submit_move(pending.from, pending.to, Some(choice))
    }

    /// Drop a pending promotion. Returns whether one was pending.
    pub fn cancel_promotion(&mut self) -> bool {
        self.state.pending_promotion.take().is_some()
    }

    /// Click-style input: select an own piece, deselect it, or move it.
    pub fn select_square(&mut self, square: Square) -> EngineResult<SelectionOutcome> {
        self.ensure_playing()?;
        let mover = self.state.current_player;
        let own_piece = self
            .state
            .board
            .get(square)
            .is_some_and(|p| p.color == mover);

        match self.selected {
            Some(current) if current == square => {
                self.selected = None;
                Ok(SelectionOutcome::Deselected)
            }
            Some(_) if own_piece => Ok(self.select(square)),
            Some(current) => {
                self.selected = None;
                self.submit_move(current, square, None)
                    .map(SelectionOutcome::Moved)
            }
            None if own_piece => Ok(self.select(square)),
            None => Ok(SelectionOutcome::Ignored),
        }
    }

    fn select(&mut self, square: Square) -> SelectionOutcome {
        self.selected = Some(square);
        SelectionOutcome::Selected {
            square,
            destinations: self.legal_destinations(square),
        }
    }

    // ----- draws, resignation, pause -----

    pub fn offer_draw(&mut self, color: Color) -> EngineResult<()> {
        self.ensure_playing()?;
        match self.state.pending_draw_offer {
            Some(offering) if offering != color => Err(EngineError::InvalidState(format!(
                "{offering} already offered a draw"
            ))),
            _ => {
                self.state.pending_draw_offer = Some(color);
                debug!(%color, "draw offered");
                Ok(())
            }
        }
    }

    /// Answer the pending offer. Returns the result when the draw is accepted.
    pub fn respond_to_draw(&mut self, accept: bool) -> EngineResult<Option<GameResult>> {
        self.ensure_playing()?;
        let offering = self
            .state
            .pending_draw_offer
            .take()
            .ok_or_else(|| EngineError::InvalidState("no draw offer pending".to_owned()))?;

        if accept {
            Ok(Some(self.finish(EndReason::Draw, None)))
        } else {
            debug!(%offering, "draw declined");
            Ok(None)
        }
    }

    /// Resign for `color`. Resigning an ended game returns its result unchanged.
    pub fn resign(&mut self, color: Color) -> EngineResult<GameResult> {
        if let Some(result) = self.state.result() {
            return Ok(result);
        }
        self.ensure_playing()?;
        Ok(self.finish(EndReason::Resignation, Some(color.opposite())))
    }

    pub fn pause(&mut self) -> EngineResult<()> {
        self.ensure_playing()?;
        self.state.paused = true;
        Ok(())
    }

    pub fn resume(&mut self) -> EngineResult<()> {
        self.ensure_playing()?;
        self.state.paused = false;
        Ok(())
    }

    // ----- clock -----

    /// One simulated second for the side to move.
    pub fn tick(&mut self) -> ClockTick {
        if self.state.status != GameStatus::Playing || self.state.paused {
            return ClockTick::Idle;
        }
        let color = self.state.current_player;
        let clock = self.state.clock_mut(color);
        *clock = clock.saturating_sub(1);
        let remaining = *clock;

        if remaining == 0 {
            ClockTick::TimedOut(self.finish(EndReason::Timeout, Some(color.opposite())))
        } else {
            ClockTick::Decremented { color, remaining }
        }
    }

    // ----- history -----

    /// Restore the state before the last accepted move.
    ///
    /// The pause flag is a property of the live game, not of the position, so
    /// it survives the swap.
    pub fn undo(&mut self) -> EngineResult<()> {
        let paused = self.state.paused;
        let previous = self
            .history
            .undo(self.state.clone())
            .ok_or_else(|| EngineError::InvalidState("nothing to undo".to_owned()))?;
        self.state = previous;
        self.state.paused = paused;
        self.selected = None;
        debug!(moves = self.state.moves.len(), "undo");
        Ok(())
    }

    pub fn redo(&mut self) -> EngineResult<()> {
        let paused = self.state.paused;
        let next = self
            .history
            .redo(self.state.clone())
            .ok_or_else(|| EngineError::InvalidState("nothing to redo".to_owned()))?;
        self.state = next;
        self.state.paused = paused;
        self.selected = None;
        debug!(moves = self.state.moves.len(), "redo");
        Ok(())
    }
}
