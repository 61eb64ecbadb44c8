//! Capture permissions and square attack detection.
//!
//! Attack detection walks the attacker's own piece lists with the same
//! gait, extension and trample rules the generator uses, so "attacked"
//! always means "some generated move could take or strike there".

use crate::arcana::Arcana;
use crate::board::{Board, Cell};
use crate::gait::{Gait, extension, gait_at, has_native_gait, trample_steps};
use crate::ledger::Ledger;
use crate::royalty::RoyaltyKind;
use crate::types::*;

const SHIFT_KEYS: [Arcana; 6] = [
    Arcana::ShiftPawn,
    Arcana::ShiftRook,
    Arcana::ShiftBishop,
    Arcana::ShiftKnight,
    Arcana::ShiftGhost,
    Arcana::HybridHop,
];

/// Outcome of asking whether `mover` may take what stands on a square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capture {
    /// Empty square: a plain move.
    Quiet,
    /// An enemy piece that may be taken.
    Enemy(Piece),
    /// An own piece that may be consumed.
    Own(Piece),
    /// Occupied and not takeable.
    Blocked,
}

impl Capture {
    pub fn victim(self) -> Option<Piece> {
        match self {
            Capture::Enemy(p) | Capture::Own(p) => Some(p),
            _ => None,
        }
    }
}

pub fn may_capture(board: &Board, ledger: &Ledger, mover: Piece, target_sq: Square) -> Capture {
    let target = match board.cell(target_sq) {
        Cell::Empty => return Capture::Quiet,
        Cell::Offboard => return Capture::Blocked,
        Cell::Occupied(p) => p,
    };
    if board.royalty.has(target_sq, RoyaltyKind::Aegis) {
        return Capture::Blocked;
    }
    let exile_involved = target.kind == PieceKind::Exile || mover.kind == PieceKind::Exile;
    if exile_involved && !ledger.holds(mover.color, Arcana::Unbind) {
        return Capture::Blocked;
    }
    if target.color != mover.color {
        return Capture::Enemy(target);
    }
    let consumable = !target.kind.is_royal() && target.kind != PieceKind::Exile;
    if consumable && ledger.holds(mover.color, Arcana::Consume) {
        Capture::Own(target)
    } else {
        Capture::Blocked
    }
}

/// Whether a piece of `by` could take on `target`, or reach it if empty.
pub fn is_attacked(board: &Board, ledger: &Ledger, target: Square, by: Color) -> bool {
    if !is_playable(target) {
        return false;
    }
    let occupant = board.piece_at(target);
    if occupant.is_some_and(|p| p.color == by) {
        return false;
    }

    let shifts = SHIFT_KEYS.iter().any(|&key| ledger.holds(by, key));
    let trample = ledger.holds(by, Arcana::Trample)
        && occupant.is_some_and(|p| p.kind != PieceKind::King);

    for (from, piece) in board.occupied_by(by) {
        if attacks_from(board, ledger, from, piece, target, occupant.is_some()) {
            return true;
        }
        if !has_native_gait(board, from) {
            continue;
        }
        if shifts
            && let Some(ext) = extension(piece)
            && ext.captures
            && ledger.holds(by, ext.key)
            && ext.steps.iter().any(|&d| offset(from, d) == Some(target))
            && takeable(board, ledger, piece, target)
        {
            return true;
        }
        if trample
            && let Some(steps) = trample_steps(piece.kind)
            && steps.iter().any(|&d| offset(from, d) == Some(target))
            && takeable(board, ledger, piece, target)
        {
            return true;
        }
    }
    false
}

fn takeable(board: &Board, ledger: &Ledger, mover: Piece, target: Square) -> bool {
    matches!(
        may_capture(board, ledger, mover, target),
        Capture::Quiet | Capture::Enemy(_)
    )
}

fn attacks_from(
    board: &Board,
    ledger: &Ledger,
    from: Square,
    piece: Piece,
    target: Square,
    occupied: bool,
) -> bool {
    match gait_at(board, from, piece) {
        Gait::Frozen => false,
        Gait::Pawn { color } => {
            let dr = color.forward();
            [(-1, dr), (1, dr)]
                .iter()
                .any(|&d| offset(from, d) == Some(target))
                && takeable(board, ledger, piece, target)
        }
        Gait::Pattern {
            leaps,
            rides,
            captures,
        } => {
            if !captures {
                return false;
            }
            let reached = leaps.iter().any(|&d| offset(from, d) == Some(target))
                || rides.iter().any(|&d| ray_reaches(board, from, d, target));
            reached && (!occupied || takeable(board, ledger, piece, target))
        }
    }
}

fn ray_reaches(board: &Board, from: Square, d: Delta, target: Square) -> bool {
    let mut cur = from;
    while let Some(next) = offset(cur, d) {
        if next == target {
            return true;
        }
        if !board.is_empty(next) {
            return false;
        }
        cur = next;
    }
    false
}

pub fn in_check(board: &Board, ledger: &Ledger, color: Color) -> bool {
    match board.king_sq(color) {
        Some(k) => is_attacked(board, ledger, k, color.other()),
        None => false,
    }
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
