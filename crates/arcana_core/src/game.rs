//! A played game: committed moves, the history feed, undo and outcome
//! detection on top of [`Position`].

use crate::arcana::Arcana;
use crate::board::Board;
use crate::config::{DEFAULT_HISTORY_WINDOW, GameSetup, Preset};
use crate::error::{MoveError, Result, SetupError};
use crate::history::{Mode, UnmakeScope};
use crate::ledger::Ledger;
use crate::movegen::{ActionFilter, GenRequest, focus_square, legal_moves_into};
use crate::moves::Move;
use crate::notation::{parse_move, render};
use crate::position::Position;
use crate::types::{Color, PieceKind, Square, rank_of};

/// One committed ply in the history feed.
#[derive(Clone, Debug, PartialEq)]
pub struct LogEntry {
    /// 1-based ply number.
    pub ply: usize,
    pub mv: Move,
    pub notation: String,
    /// State right after the move.
    pub board: Board,
    pub ledger: Ledger,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinReason {
    Checkmate,
    Checks,
    PawnHunt,
    FarRank,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    FiftyMove,
    Repetition,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Win { winner: Color, reason: WinReason },
    Draw(DrawReason),
}

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    preset: Preset,
    history_window: usize,
    origin: (Board, Ledger),
    log: Vec<LogEntry>,
    /// Position hashes after each kept ply, for repetition.
    hashes: Vec<u64>,
    plies: usize,
}

impl Game {
    pub fn new(setup: &GameSetup) -> Result<Self, SetupError> {
        let position = setup.build()?;
        Ok(Game::with_position(position, setup.preset, setup.history_window))
    }

    pub fn with_position(position: Position, preset: Preset, history_window: usize) -> Self {
        let origin = (position.board.clone(), position.ledger.clone());
        let hashes = vec![position.board.hash()];
        Game {
            position,
            preset,
            history_window: history_window.max(1),
            origin,
            log: Vec::new(),
            hashes,
            plies: 0,
        }
    }

    pub fn standard() -> Self {
        Game::with_position(Position::startpos(), Preset::Standard, DEFAULT_HISTORY_WINDOW)
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn side(&self) -> Color {
        self.position.side()
    }

    pub fn in_check(&self) -> bool {
        self.position.in_check(self.side())
    }

    /// Live charge counts held by `color`.
    pub fn charges(&self, color: Color) -> Vec<(Arcana, u8)> {
        self.position.ledger.side(color).held().collect()
    }

    pub fn legal_moves(&mut self, filter: ActionFilter) -> Vec<Move> {
        let mut out = Vec::with_capacity(64);
        legal_moves_into(&mut self.position, &GenRequest::action(filter), &mut out);
        out
    }

    /// Squares the side to move can act on with `filter`, sorted.
    pub fn legal_destinations(&mut self, filter: ActionFilter) -> Vec<Square> {
        let mut squares: Vec<Square> = self
            .legal_moves(filter)
            .into_iter()
            .map(focus_square)
            .collect();
        squares.sort_unstable();
        squares.dedup();
        squares
    }

    /// Commits `mv` if it is legal now.
    pub fn play(&mut self, mv: Move) -> Result<()> {
        if !self.legal_moves(ActionFilter::Any).contains(&mv) {
            return Err(MoveError::NotApplicable);
        }
        let notation = render(&self.position, mv);
        self.position.make(mv, Mode::Commit)?;

        self.plies += 1;
        tracing::debug!(ply = self.plies, %notation, "played");
        self.log.push(LogEntry {
            ply: self.plies,
            mv,
            notation,
            board: self.position.board.clone(),
            ledger: self.position.ledger.clone(),
        });
        self.hashes.push(self.position.board.hash());
        self.trim();
        Ok(())
    }

    /// Parses `text` against the legal moves and commits it.
    pub fn play_text(&mut self, text: &str) -> Result<Move> {
        let mv = parse_move(&self.position, text).ok_or(MoveError::NotApplicable)?;
        self.play(mv)?;
        Ok(mv)
    }

    /// Takes back the last turn, both halves of a linked move included.
    pub fn undo(&mut self) -> Result<Move> {
        let before = self.position.ply_count();
        let mv = self.position.unmake(UnmakeScope::Turn)?;
        let reverted = before - self.position.ply_count();
        self.log.truncate(self.log.len().saturating_sub(reverted));
        self.hashes
            .truncate(self.hashes.len().saturating_sub(reverted).max(1));
        self.plies -= reverted;
        tracing::debug!(ply = self.plies, reverted, "undo");
        Ok(mv)
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    /// Board and ledger as they stood after `ply`; ply 0 is the start.
    /// Plies older than the history window are gone.
    pub fn view(&self, ply: usize) -> Option<(&Board, &Ledger)> {
        if ply == 0 {
            return Some((&self.origin.0, &self.origin.1));
        }
        self.log
            .iter()
            .find(|entry| entry.ply == ply)
            .map(|entry| (&entry.board, &entry.ledger))
    }

    pub fn outcome(&mut self) -> Outcome {
        if let Some(outcome) = self.preset_outcome() {
            return outcome;
        }

        let us = self.side();
        if self.legal_moves(ActionFilter::Any).is_empty() {
            if self.in_check() {
                return Outcome::Win {
                    winner: us.other(),
                    reason: WinReason::Checkmate,
                };
            }
            return Outcome::Draw(DrawReason::Stalemate);
        }
        if self.position.board.fifty >= 100 {
            return Outcome::Draw(DrawReason::FiftyMove);
        }
        let current = self.position.board.hash();
        if self.hashes.iter().filter(|&&h| h == current).count() >= 3 {
            return Outcome::Draw(DrawReason::Repetition);
        }
        Outcome::Ongoing
    }

    /// Preset win conditions, the side that just moved checked first.
    fn preset_outcome(&self) -> Option<Outcome> {
        let board = &self.position.board;
        let mover = self.side().other();
        let win = |winner, reason| Some(Outcome::Win { winner, reason });
        for color in [mover, mover.other()] {
            let them = color.other();
            match self.preset {
                Preset::Standard => return None,
                Preset::NChecks { checks } => {
                    if board.checks[color.idx()] >= checks {
                        return win(color, WinReason::Checks);
                    }
                }
                Preset::PawnHunt => {
                    if board.pieces(them, PieceKind::Pawn).is_empty() {
                        return win(color, WinReason::PawnHunt);
                    }
                }
                Preset::FarRank => {
                    if board
                        .king_sq(color)
                        .is_some_and(|sq| color.relative_rank(rank_of(sq)) == 7)
                    {
                        return win(color, WinReason::FarRank);
                    }
                }
            }
        }
        None
    }

    fn trim(&mut self) {
        let window = self.history_window;
        self.position.trim_history(window);
        if self.log.len() > window {
            let excess = self.log.len() - window;
            self.log.drain(..excess);
        }
        if self.hashes.len() > window + 1 {
            let excess = self.hashes.len() - window - 1;
            self.hashes.drain(..excess);
        }
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
