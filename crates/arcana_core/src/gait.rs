//! Movement tables and per-square move sets.
//!
//! A piece's gait is normally fixed by its kind, but a movement royalty on
//! its square replaces it wholesale. Shift extensions and tramples are
//! looked up separately because they depend on held arcana.

use crate::arcana::Arcana;
use crate::board::Board;
use crate::royalty::RoyaltyKind;
use crate::types::{Color, Delta, Piece, PieceKind, Square};

pub const ORTHOGONAL: [Delta; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const DIAGONAL: [Delta; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub const ROYAL: [Delta; 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
pub const KNIGHT: [Delta; 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];
pub const CAMEL: [Delta; 8] = [
    (1, 3),
    (3, 1),
    (-1, 3),
    (-3, 1),
    (1, -3),
    (3, -1),
    (-1, -3),
    (-3, -1),
];
pub const DABBABA: [Delta; 4] = [(2, 0), (-2, 0), (0, 2), (0, -2)];
pub const ALFIL: [Delta; 4] = [(2, 2), (2, -2), (-2, 2), (-2, -2)];

const PAWN_SHIFT_WHITE: [Delta; 3] = [(1, 0), (-1, 0), (0, -1)];
const PAWN_SHIFT_BLACK: [Delta; 3] = [(1, 0), (-1, 0), (0, 1)];

/// How a piece moves from one square.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gait {
    /// Cannot move or attack.
    Frozen,
    /// Pushes, double pushes, diagonal captures and en passant.
    Pawn { color: Color },
    /// Single leaps plus unbounded rides.
    Pattern {
        leaps: &'static [Delta],
        rides: &'static [Delta],
        captures: bool,
    },
}

const NONE: &[Delta] = &[];

pub fn native_gait(piece: Piece) -> Gait {
    let (leaps, rides, captures): (&'static [Delta], &'static [Delta], bool) = match piece.kind {
        PieceKind::Pawn => return Gait::Pawn { color: piece.color },
        PieceKind::Knight => (&KNIGHT, NONE, true),
        PieceKind::Bishop => (NONE, &DIAGONAL, true),
        PieceKind::Rook => (NONE, &ORTHOGONAL, true),
        PieceKind::Queen => (NONE, &ROYAL, true),
        PieceKind::King => (&ROYAL, NONE, true),
        PieceKind::Archbishop => (&KNIGHT, &DIAGONAL, true),
        PieceKind::Chancellor => (&KNIGHT, &ORTHOGONAL, true),
        PieceKind::Amazon => (&KNIGHT, &ROYAL, true),
        PieceKind::Ghost => (&DABBABA, NONE, false),
        PieceKind::Herring => (&ORTHOGONAL, NONE, false),
        PieceKind::Exile => (&ROYAL, NONE, true),
    };
    Gait::Pattern {
        leaps,
        rides,
        captures,
    }
}

fn royalty_gait(kind: RoyaltyKind, color: Color) -> Option<Gait> {
    let (leaps, rides): (&'static [Delta], &'static [Delta]) = match kind {
        RoyaltyKind::Queen => (NONE, &ROYAL),
        RoyaltyKind::Rook => (NONE, &ORTHOGONAL),
        RoyaltyKind::Bishop => (NONE, &DIAGONAL),
        RoyaltyKind::Knight => (&KNIGHT, NONE),
        RoyaltyKind::Pawn => return Some(Gait::Pawn { color }),
        RoyaltyKind::Stasis => return Some(Gait::Frozen),
        RoyaltyKind::Aegis => return None,
    };
    Some(Gait::Pattern {
        leaps,
        rides,
        captures: true,
    })
}

/// Gait of `piece` standing on `sq`, after royalty replacement.
pub fn gait_at(board: &Board, sq: Square, piece: Piece) -> Gait {
    board
        .royalty
        .kind_at(sq)
        .and_then(|kind| royalty_gait(kind, piece.color))
        .unwrap_or_else(|| native_gait(piece))
}

/// Whether the occupant of `sq` moves by its own kind.
pub fn has_native_gait(board: &Board, sq: Square) -> bool {
    !board
        .royalty
        .kind_at(sq)
        .is_some_and(RoyaltyKind::replaces_gait)
}

/// A movement extension unlocked by a shift arcana.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Extension {
    pub key: Arcana,
    pub steps: &'static [Delta],
    pub captures: bool,
}

pub fn extension(piece: Piece) -> Option<Extension> {
    let (steps, captures): (&'static [Delta], bool) = match piece.kind {
        PieceKind::Pawn => match piece.color {
            Color::White => (&PAWN_SHIFT_WHITE, true),
            Color::Black => (&PAWN_SHIFT_BLACK, true),
        },
        PieceKind::Rook => (&DIAGONAL, true),
        PieceKind::Bishop => (&ORTHOGONAL, true),
        PieceKind::Knight => (&CAMEL, true),
        PieceKind::Ghost => (&ALFIL, false),
        PieceKind::King => (&KNIGHT, true),
        _ => return None,
    };
    Some(Extension {
        key: Arcana::shift_for(piece.kind)?,
        steps,
        captures,
    })
}

/// Squares a trampling piece of `kind` can strike without moving.
pub fn trample_steps(kind: PieceKind) -> Option<&'static [Delta]> {
    match kind {
        PieceKind::Knight => Some(&KNIGHT),
        PieceKind::Ghost => Some(&DABBABA),
        _ => None,
    }
}

#[cfg(test)]
#[path = "gait_tests.rs"]
mod gait_tests;
