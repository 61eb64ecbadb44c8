//! Per-ply undo records.

use arrayvec::ArrayVec;

use crate::board::Snapshot;
use crate::ledger::LedgerTag;
use crate::moves::Move;
use crate::types::{Piece, Square};

/// Whether a make touched the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Board effects only. Used for exploration and legality tests.
    Provisional,
    /// Board effects plus spending, rewards and progression.
    Commit,
}

/// How far `unmake` reaches back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnmakeScope {
    /// Exactly one record.
    Ply,
    /// One record, plus the first half of a linked move left open by it.
    Turn,
}

/// Piece movements a record must reverse. Everything else the move
/// changed is restored from the snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Detail {
    /// Ordinary and en-passant moves. `placed` differs from `moved` after
    /// a promotion or evolution; the capture square differs from `to` for
    /// en passant.
    Relocation {
        from: Square,
        to: Square,
        moved: Piece,
        placed: Piece,
        captured: Option<(Square, Piece)>,
    },
    Castle {
        king_from: Square,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    },
    Summon {
        square: Square,
    },
    /// The overlay itself comes back with the snapshot.
    Aura,
    Offering {
        square: Square,
        piece: Piece,
    },
    Swap {
        a: Square,
        b: Square,
    },
    /// Pulls in the order they were applied.
    Magnet {
        pulls: ArrayVec<(Square, Square), 12>,
    },
    Trample {
        target: Square,
        victim: Piece,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub mv: Move,
    pub mode: Mode,
    pub snapshot: Snapshot,
    pub detail: Detail,
    pub journal: Vec<LedgerTag>,
}
