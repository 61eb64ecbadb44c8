//! Packed move encoding.
//!
//! A move is a single `u32` so generator buffers stay small and moves are
//! cheap to copy and compare:
//!
//! | bits  | field    | meaning                                      |
//! |-------|----------|----------------------------------------------|
//! | 0-6   | src      | origin square (or the acted-on square)       |
//! | 7-13  | dst      | destination square, 0 for "none"             |
//! | 14-18 | captured | piece code of the victim or offered piece    |
//! | 19-23 | promoted | promotion / summon piece code, or aura index |
//! | 24-27 | kind     | [`MoveKind`]                                  |
//! | 28-31 | flags    | [`MoveFlags`]                                 |
//!
//! The kind field tells how the captured and promoted channels are read,
//! so the same bits never mean two things for one move.

use std::fmt;

use bitflags::bitflags;

use crate::royalty::RoyaltyKind;
use crate::types::{NO_SQUARE, Piece, PieceKind, Square, sq_to_coord};

const SRC_SHIFT: u32 = 0;
const DST_SHIFT: u32 = 7;
const CAP_SHIFT: u32 = 14;
const PROMO_SHIFT: u32 = 19;
const KIND_SHIFT: u32 = 24;
const FLAGS_SHIFT: u32 = 28;

const SQ_MASK: u32 = 0x7f;
const CODE_MASK: u32 = 0x1f;
const NIBBLE_MASK: u32 = 0xf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveKind {
    Ordinary = 0,
    Castle = 1,
    EnPassant = 2,
    Summon = 3,
    Aura = 4,
    Offering = 5,
    Swap = 6,
    Magnet = 7,
    Trample = 8,
}

impl MoveKind {
    pub fn from_bits(bits: u8) -> Option<MoveKind> {
        let kind = match bits {
            0 => MoveKind::Ordinary,
            1 => MoveKind::Castle,
            2 => MoveKind::EnPassant,
            3 => MoveKind::Summon,
            4 => MoveKind::Aura,
            5 => MoveKind::Offering,
            6 => MoveKind::Swap,
            7 => MoveKind::Magnet,
            8 => MoveKind::Trample,
            _ => return None,
        };
        Some(kind)
    }
}

bitflags! {
    /// Modifier bits. Two pairs share a bit because the moves carrying
    /// them never overlap: `VAULT` only appears on castles and `SHIFT`
    /// never does; `DOUBLE_PUSH` only appears on quiet pawn pushes and
    /// `CONSUME` only on captures.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct MoveFlags: u8 {
        /// Uses a movement extension and spends the matching shift arcana.
        const SHIFT = 0b0001;
        /// Captures one of the mover's own pieces.
        const CONSUME = 0b0010;
        /// First half of a linked two-move turn.
        const DYAD = 0b0100;
        /// Opens an evolution window for the mover.
        const EVOLVE = 0b1000;
        /// Castle with the rook landing on the king's origin square.
        const VAULT = Self::SHIFT.bits();
        /// Pawn advanced two squares.
        const DOUBLE_PUSH = Self::CONSUME.bits();
    }
}

/// Decoded view of a move, one variant per action category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Ordinary {
        from: Square,
        to: Square,
        captured: Option<Piece>,
        promotion: Option<Piece>,
    },
    Castle {
        from: Square,
        to: Square,
        vault: bool,
    },
    EnPassant {
        from: Square,
        to: Square,
        captured: Option<Piece>,
        promotion: Option<Piece>,
    },
    Summon {
        square: Square,
        piece: Piece,
    },
    Aura {
        square: Square,
        kind: RoyaltyKind,
    },
    Offering {
        square: Square,
        piece: Piece,
    },
    Swap {
        a: Square,
        b: Square,
    },
    Magnet {
        center: Square,
    },
    Trample {
        from: Square,
        target: Square,
        victim: Piece,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Move(u32);

impl Move {
    /// Packs raw fields. Values wider than their field are masked.
    pub const fn encode(
        src: Square,
        dst: Square,
        captured: u8,
        promoted: u8,
        kind: MoveKind,
        flags: MoveFlags,
    ) -> Move {
        Move(
            ((src as u32 & SQ_MASK) << SRC_SHIFT)
                | ((dst as u32 & SQ_MASK) << DST_SHIFT)
                | ((captured as u32 & CODE_MASK) << CAP_SHIFT)
                | ((promoted as u32 & CODE_MASK) << PROMO_SHIFT)
                | ((kind as u32 & NIBBLE_MASK) << KIND_SHIFT)
                | ((flags.bits() as u32 & NIBBLE_MASK) << FLAGS_SHIFT),
        )
    }

    /// Rebuilds a move from its raw bits, rejecting unknown kinds.
    pub fn from_raw(raw: u32) -> Option<Move> {
        let mv = Move(raw);
        MoveKind::from_bits(((raw >> KIND_SHIFT) & NIBBLE_MASK) as u8)?;
        Some(mv)
    }

    pub fn raw(self) -> u32 {
        self.0
    }

    // Typed constructors

    pub fn quiet(from: Square, to: Square) -> Move {
        Move::encode(from, to, 0, 0, MoveKind::Ordinary, MoveFlags::empty())
    }

    pub fn capture(from: Square, to: Square, victim: Piece) -> Move {
        Move::encode(
            from,
            to,
            victim.code(),
            0,
            MoveKind::Ordinary,
            MoveFlags::empty(),
        )
    }

    pub fn castle(from: Square, to: Square, vault: bool) -> Move {
        let flags = if vault {
            MoveFlags::VAULT
        } else {
            MoveFlags::empty()
        };
        Move::encode(from, to, 0, 0, MoveKind::Castle, flags)
    }

    pub fn en_passant(from: Square, to: Square, victim: Piece) -> Move {
        Move::encode(
            from,
            to,
            victim.code(),
            0,
            MoveKind::EnPassant,
            MoveFlags::empty(),
        )
    }

    pub fn summon(square: Square, piece: Piece) -> Move {
        Move::encode(
            square,
            NO_SQUARE,
            0,
            piece.code(),
            MoveKind::Summon,
            MoveFlags::empty(),
        )
    }

    pub fn aura(square: Square, kind: RoyaltyKind) -> Move {
        Move::encode(
            square,
            NO_SQUARE,
            0,
            kind.idx() as u8 + 1,
            MoveKind::Aura,
            MoveFlags::empty(),
        )
    }

    pub fn offering(square: Square, piece: Piece) -> Move {
        Move::encode(
            square,
            NO_SQUARE,
            piece.code(),
            0,
            MoveKind::Offering,
            MoveFlags::empty(),
        )
    }

    pub fn swap(a: Square, b: Square) -> Move {
        Move::encode(a, b, 0, 0, MoveKind::Swap, MoveFlags::empty())
    }

    pub fn magnet(center: Square) -> Move {
        Move::encode(
            center,
            NO_SQUARE,
            0,
            0,
            MoveKind::Magnet,
            MoveFlags::empty(),
        )
    }

    pub fn trample(from: Square, target: Square, victim: Piece) -> Move {
        Move::encode(
            from,
            target,
            victim.code(),
            0,
            MoveKind::Trample,
            MoveFlags::empty(),
        )
    }

    /// Same move with `piece` in the promotion channel.
    pub fn with_promotion(self, piece: Piece) -> Move {
        let cleared = self.0 & !(CODE_MASK << PROMO_SHIFT);
        Move(cleared | ((piece.code() as u32 & CODE_MASK) << PROMO_SHIFT))
    }

    pub fn with_flags(self, flags: MoveFlags) -> Move {
        Move(self.0 | ((flags.bits() as u32 & NIBBLE_MASK) << FLAGS_SHIFT))
    }

    // Field accessors

    #[inline]
    pub fn src(self) -> Square {
        ((self.0 >> SRC_SHIFT) & SQ_MASK) as Square
    }

    #[inline]
    pub fn dst(self) -> Square {
        ((self.0 >> DST_SHIFT) & SQ_MASK) as Square
    }

    #[inline]
    pub fn captured_code(self) -> u8 {
        ((self.0 >> CAP_SHIFT) & CODE_MASK) as u8
    }

    #[inline]
    pub fn promoted_code(self) -> u8 {
        ((self.0 >> PROMO_SHIFT) & CODE_MASK) as u8
    }

    pub fn captured(self) -> Option<Piece> {
        Piece::from_code(self.captured_code())
    }

    pub fn promoted(self) -> Option<Piece> {
        Piece::from_code(self.promoted_code())
    }

    #[inline]
    pub fn kind(self) -> MoveKind {
        // Every constructor writes a known kind; `from_raw` rejects the rest.
        MoveKind::from_bits(((self.0 >> KIND_SHIFT) & NIBBLE_MASK) as u8)
            .unwrap_or(MoveKind::Ordinary)
    }

    #[inline]
    pub fn flags(self) -> MoveFlags {
        MoveFlags::from_bits_truncate(((self.0 >> FLAGS_SHIFT) & NIBBLE_MASK) as u8)
    }

    pub fn has(self, flag: MoveFlags) -> bool {
        self.flags().contains(flag)
    }

    /// Shift flag as read on non-castle moves.
    pub fn is_shift(self) -> bool {
        self.kind() != MoveKind::Castle && self.has(MoveFlags::SHIFT)
    }

    /// Consume flag as read on captures.
    pub fn is_consume(self) -> bool {
        self.kind() == MoveKind::Ordinary
            && self.captured_code() != 0
            && self.has(MoveFlags::CONSUME)
    }

    pub fn is_vault(self) -> bool {
        self.kind() == MoveKind::Castle && self.has(MoveFlags::VAULT)
    }

    pub fn is_double_push(self) -> bool {
        self.kind() == MoveKind::Ordinary
            && self.captured_code() == 0
            && self.has(MoveFlags::DOUBLE_PUSH)
    }

    pub fn is_dyad(self) -> bool {
        self.has(MoveFlags::DYAD)
    }

    pub fn is_evolve(self) -> bool {
        self.has(MoveFlags::EVOLVE)
    }

    pub fn is_capture(self) -> bool {
        matches!(
            self.kind(),
            MoveKind::Ordinary | MoveKind::EnPassant | MoveKind::Trample
        ) && self.captured_code() != 0
    }

    /// Promotion kind for ordinary and en-passant moves.
    pub fn promotion_kind(self) -> Option<PieceKind> {
        match self.kind() {
            MoveKind::Ordinary | MoveKind::EnPassant => self.promoted().map(|p| p.kind),
            _ => None,
        }
    }

    /// Decodes the packed fields into an [`Action`]. Returns `None` when a
    /// channel required by the kind holds no valid value.
    pub fn action(self) -> Option<Action> {
        let (src, dst) = (self.src(), self.dst());
        let action = match self.kind() {
            MoveKind::Ordinary => Action::Ordinary {
                from: src,
                to: dst,
                captured: self.captured(),
                promotion: self.promoted(),
            },
            MoveKind::Castle => Action::Castle {
                from: src,
                to: dst,
                vault: self.is_vault(),
            },
            MoveKind::EnPassant => Action::EnPassant {
                from: src,
                to: dst,
                captured: self.captured(),
                promotion: self.promoted(),
            },
            MoveKind::Summon => Action::Summon {
                square: src,
                piece: self.promoted()?,
            },
            MoveKind::Aura => Action::Aura {
                square: src,
                kind: RoyaltyKind::from_idx((self.promoted_code() as usize).checked_sub(1)?)?,
            },
            MoveKind::Offering => Action::Offering {
                square: src,
                piece: self.captured()?,
            },
            MoveKind::Swap => Action::Swap { a: src, b: dst },
            MoveKind::Magnet => Action::Magnet { center: src },
            MoveKind::Trample => Action::Trample {
                from: src,
                target: dst,
                victim: self.captured()?,
            },
        };
        Some(action)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let coord = |sq: Square| sq_to_coord(sq).unwrap_or_else(|| "-".to_string());
        write!(
            f,
            "Move({:?} {}{} cap={} promo={} flags={:#06b})",
            self.kind(),
            coord(self.src()),
            coord(self.dst()),
            self.captured_code(),
            self.promoted_code(),
            self.flags().bits()
        )
    }
}

#[cfg(test)]
#[path = "moves_tests.rs"]
mod moves_tests;
