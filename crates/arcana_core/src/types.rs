//! Colors, piece kinds and square helpers for the padded 10x12 mailbox.
//!
//! The playable 8x8 region sits inside a 120-cell array with a one-column
//! border left and right and a two-row border top and bottom, so a knight
//! leap from any playable square lands on a sentinel cell instead of
//! wrapping around. Square 0 is a border cell and doubles as the "no
//! destination" sentinel in packed moves.

use serde::{Deserialize, Serialize};

/// Index into the 120-cell mailbox.
pub type Square = u8;

/// A `(file, rank)` step used by the movement tables.
pub type Delta = (i8, i8);

pub const BOARD_CELLS: usize = 120;
pub const NO_SQUARE: Square = 0;

pub const A1: Square = 21;
pub const C1: Square = 23;
pub const D1: Square = 24;
pub const E1: Square = 25;
pub const F1: Square = 26;
pub const G1: Square = 27;
pub const H1: Square = 28;
pub const A8: Square = 91;
pub const C8: Square = 93;
pub const D8: Square = 94;
pub const E8: Square = 95;
pub const F8: Square = 96;
pub const G8: Square = 97;
pub const H8: Square = 98;

/// Maps each mailbox cell to its 0..64 index, or -1 for border cells.
pub static MAILBOX: [i8; BOARD_CELLS] = {
    let mut table = [-1i8; BOARD_CELLS];
    let mut rank = 0;
    while rank < 8 {
        let mut file = 0;
        while file < 8 {
            table[21 + rank * 10 + file] = (rank * 8 + file) as i8;
            file += 1;
        }
        rank += 1;
    }
    table
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Rank step a pawn of this color advances by.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    /// Rank as seen from this side: 0 is its own back rank, 7 the far rank.
    pub fn relative_rank(self, rank: i8) -> i8 {
        match self {
            Color::White => rank,
            Color::Black => 7 - rank,
        }
    }
}

/// Broad movement family of a piece kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveClass {
    PawnLike,
    Leaper,
    Slider,
    Compound,
    Stepper,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    /// Bishop + knight.
    Archbishop,
    /// Rook + knight.
    Chancellor,
    /// Queen + knight, royal class.
    Amazon,
    /// Hops two squares orthogonally, never captures on its own.
    Ghost,
    /// Marked piece: while attacked it must be taken before anything else.
    Herring,
    /// Blocker that cannot capture or be captured without `unbind`.
    Exile,
}

impl PieceKind {
    pub const COUNT: usize = 12;

    pub const ALL: [PieceKind; PieceKind::COUNT] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
        PieceKind::Archbishop,
        PieceKind::Chancellor,
        PieceKind::Amazon,
        PieceKind::Ghost,
        PieceKind::Herring,
        PieceKind::Exile,
    ];

    /// Orthodox promotion targets, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn from_idx(idx: usize) -> Option<PieceKind> {
        PieceKind::ALL.get(idx).copied()
    }

    /// Material value in centipawns.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 300,
            PieceKind::Bishop => 325,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
            PieceKind::Archbishop => 700,
            PieceKind::Chancellor => 800,
            PieceKind::Amazon => 1200,
            PieceKind::Ghost => 200,
            PieceKind::Herring => 50,
            PieceKind::Exile => 0,
        }
    }

    pub fn class(self) -> MoveClass {
        match self {
            PieceKind::Pawn => MoveClass::PawnLike,
            PieceKind::Knight | PieceKind::Ghost => MoveClass::Leaper,
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => MoveClass::Slider,
            PieceKind::Archbishop | PieceKind::Chancellor | PieceKind::Amazon => {
                MoveClass::Compound
            }
            PieceKind::King | PieceKind::Herring | PieceKind::Exile => MoveClass::Stepper,
        }
    }

    pub fn is_royal(self) -> bool {
        matches!(self, PieceKind::King | PieceKind::Queen | PieceKind::Amazon)
    }

    /// Next form on the evolution chain.
    pub fn evolves_to(self) -> Option<PieceKind> {
        match self {
            PieceKind::Pawn => Some(PieceKind::Knight),
            PieceKind::Knight => Some(PieceKind::Bishop),
            PieceKind::Bishop => Some(PieceKind::Rook),
            PieceKind::Rook => Some(PieceKind::Archbishop),
            PieceKind::Archbishop => Some(PieceKind::Chancellor),
            PieceKind::Chancellor => Some(PieceKind::Queen),
            _ => None,
        }
    }

    /// Uppercase letter used in position strings and notation.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
            PieceKind::Archbishop => 'A',
            PieceKind::Chancellor => 'C',
            PieceKind::Amazon => 'M',
            PieceKind::Ghost => 'G',
            PieceKind::Herring => 'H',
            PieceKind::Exile => 'X',
        }
    }

    pub fn from_letter(c: char) -> Option<PieceKind> {
        let kind = match c.to_ascii_uppercase() {
            'P' => PieceKind::Pawn,
            'N' => PieceKind::Knight,
            'B' => PieceKind::Bishop,
            'R' => PieceKind::Rook,
            'Q' => PieceKind::Queen,
            'K' => PieceKind::King,
            'A' => PieceKind::Archbishop,
            'C' => PieceKind::Chancellor,
            'M' => PieceKind::Amazon,
            'G' => PieceKind::Ghost,
            'H' => PieceKind::Herring,
            'X' => PieceKind::Exile,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Five-bit code used by the move encoder; 0 is reserved for "none".
    pub fn code(self) -> u8 {
        1 + (self.color.idx() * PieceKind::COUNT + self.kind.idx()) as u8
    }

    pub fn from_code(code: u8) -> Option<Piece> {
        if code == 0 {
            return None;
        }
        let raw = (code - 1) as usize;
        let color = match raw / PieceKind::COUNT {
            0 => Color::White,
            1 => Color::Black,
            _ => return None,
        };
        let kind = PieceKind::from_idx(raw % PieceKind::COUNT)?;
        Some(Piece { color, kind })
    }

    /// Letter in position-string case: uppercase for White.
    pub fn letter(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }

    pub fn from_letter(c: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Piece { color, kind })
    }

    pub fn value(self) -> i32 {
        self.kind.value()
    }
}

// Helpers

/// Mailbox square for a 0-based file and rank, if both are on the board.
pub fn square(file: i8, rank: i8) -> Option<Square> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((21 + rank * 10 + file) as Square)
    } else {
        None
    }
}

pub fn file_of(sq: Square) -> i8 {
    (sq % 10) as i8 - 1
}

pub fn rank_of(sq: Square) -> i8 {
    (sq / 10) as i8 - 2
}

pub fn is_playable(sq: Square) -> bool {
    MAILBOX.get(sq as usize).is_some_and(|&idx| idx >= 0)
}

/// 0..64 index of a playable square.
pub fn index64(sq: Square) -> Option<usize> {
    match MAILBOX.get(sq as usize) {
        Some(&idx) if idx >= 0 => Some(idx as usize),
        _ => None,
    }
}

/// Square reached by stepping `delta` from `sq`, if it stays on the board.
///
/// Steps of up to two files are caught by the border columns; wider steps
/// (camel leaps) need an explicit file check because they can wrap into
/// the next row.
#[inline]
pub fn offset(sq: Square, (df, dr): Delta) -> Option<Square> {
    let target = sq as i16 + df as i16 + 10 * dr as i16;
    if !(0..BOARD_CELLS as i16).contains(&target) {
        return None;
    }
    let target = target as Square;
    if !is_playable(target) {
        return None;
    }
    if df.abs() > 2 && file_of(target) - file_of(sq) != df {
        return None;
    }
    Some(target)
}

/// All playable squares from a1 to h8, rank by rank.
pub fn playable_squares() -> impl Iterator<Item = Square> {
    (0..8i8).flat_map(|rank| (0..8i8).map(move |file| (21 + rank * 10 + file) as Square))
}

pub fn sq_to_coord(sq: Square) -> Option<String> {
    if !is_playable(sq) {
        return None;
    }
    let f = (b'a' + file_of(sq) as u8) as char;
    let r = (b'1' + rank_of(sq) as u8) as char;
    Some(format!("{f}{r}"))
}

pub fn coord_to_sq(c: &str) -> Option<Square> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    square((f - b'a') as i8, (r - b'1') as i8)
}

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;
