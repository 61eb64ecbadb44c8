//! The owned game aggregate: board, ledger, undo history and the random
//! source for progression tie breaks.

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::arcana::Arcana;
use crate::attacks;
use crate::board::Board;
use crate::error::FenError;
use crate::history::Record;
use crate::ledger::Ledger;
use crate::types::{Color, Square};

pub const DEFAULT_SEED: u64 = 0x5EED;

#[derive(Clone, Debug)]
pub struct Position {
    pub board: Board,
    pub ledger: Ledger,
    pub(crate) history: Vec<Record>,
    pub(crate) rng: StdRng,
}

impl Position {
    pub fn new(board: Board, ledger: Ledger, seed: u64) -> Self {
        Position {
            board,
            ledger,
            history: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn startpos() -> Self {
        Position::new(Board::startpos(), Ledger::new(), DEFAULT_SEED)
    }

    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        Ok(Position::new(Board::from_fen(fen)?, Ledger::new(), DEFAULT_SEED))
    }

    pub fn side(&self) -> Color {
        self.board.side()
    }

    pub fn holds(&self, side: Color, key: Arcana) -> bool {
        self.ledger.holds(side, key)
    }

    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        attacks::is_attacked(&self.board, &self.ledger, sq, by)
    }

    pub fn in_check(&self, color: Color) -> bool {
        attacks::in_check(&self.board, &self.ledger, color)
    }

    pub fn history(&self) -> &[Record] {
        &self.history
    }

    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Drops the oldest undo records so at most `keep` remain.
    pub fn trim_history(&mut self, keep: usize) {
        if self.history.len() > keep {
            let excess = self.history.len() - keep;
            self.history.drain(..excess);
        }
    }
}

/// Equality over game state only; the random source and undo records are
/// excluded so a make/unmake pair compares equal to the original.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board && self.ledger == other.ledger
    }
}
