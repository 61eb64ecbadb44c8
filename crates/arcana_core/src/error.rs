//! Error types surfaced by the rules core.

use thiserror::Error;

use crate::types::Square;

/// Position string could not be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("expected at least 4 fields, found {0}")]
    MissingFields(usize),

    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {rank} does not describe exactly 8 files")]
    RankWidth { rank: usize },

    #[error("invalid piece letter '{0}'")]
    PieceLetter(char),

    #[error("invalid side to move '{0}'")]
    SideToMove(String),

    #[error("invalid castling field '{0}'")]
    Castling(String),

    #[error("invalid en passant square '{0}'")]
    EnPassant(String),

    #[error("invalid move counter '{0}'")]
    Counter(String),
}

/// Board mutation was given a square it cannot act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("square {0} is not on the board")]
    InvalidSquare(Square),

    #[error("square {0} is already occupied")]
    Occupied(Square),

    #[error("square {0} is empty")]
    Empty(Square),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("move references square {0}, which is not on the board")]
    InvalidSquare(Square),

    #[error("move does not fit the current position")]
    NotApplicable,

    #[error("move leaves the mover's king in check")]
    KingLeftInCheck,

    #[error("no move to undo")]
    NothingToUndo,
}

/// Game setup file could not be applied.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("setup parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unknown arcana key '{0}'")]
    UnknownArcana(String),

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("royalty on {0} needs at least one turn")]
    ZeroTurns(String),

    #[error(transparent)]
    Fen(#[from] FenError),
}

pub type Result<T, E = MoveError> = std::result::Result<T, E>;
