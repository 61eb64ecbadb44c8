//! Square-bound royalty auras.
//!
//! A royalty binds to a square, not to a piece: whatever stands on the
//! square is overridden while the aura lasts. Each kind lives in its own
//! sparse map, and a square carries at most one kind at a time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

use crate::types::{Color, Square};

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RoyaltyKind {
    /// Occupant moves and attacks as a queen.
    Queen,
    /// Occupant moves and attacks as a rook.
    Rook,
    /// Occupant moves and attacks as a bishop.
    Bishop,
    /// Occupant moves and attacks as a knight.
    Knight,
    /// Occupant moves and attacks as a pawn of its own color.
    Pawn,
    /// Occupant cannot be captured.
    Aegis,
    /// Occupant can neither move nor attack.
    Stasis,
}

impl RoyaltyKind {
    pub const COUNT: usize = 7;

    pub const ALL: [RoyaltyKind; RoyaltyKind::COUNT] = [
        RoyaltyKind::Queen,
        RoyaltyKind::Rook,
        RoyaltyKind::Bishop,
        RoyaltyKind::Knight,
        RoyaltyKind::Pawn,
        RoyaltyKind::Aegis,
        RoyaltyKind::Stasis,
    ];

    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn from_idx(idx: usize) -> Option<RoyaltyKind> {
        RoyaltyKind::ALL.get(idx).copied()
    }

    /// Whether the aura replaces the occupant's own move set.
    pub fn replaces_gait(self) -> bool {
        !matches!(self, RoyaltyKind::Aegis)
    }

    /// Kinds that may be placed on a friendly king standing in check,
    /// because the aura itself can lift the check.
    pub fn resolves_check(self) -> bool {
        matches!(self, RoyaltyKind::Aegis)
    }

    pub fn letter(self) -> char {
        match self {
            RoyaltyKind::Queen => 'Q',
            RoyaltyKind::Rook => 'R',
            RoyaltyKind::Bishop => 'B',
            RoyaltyKind::Knight => 'N',
            RoyaltyKind::Pawn => 'P',
            RoyaltyKind::Aegis => 'A',
            RoyaltyKind::Stasis => 'S',
        }
    }
}

/// Owner turns a freshly placed aura lasts.
pub const AURA_TURNS: u8 = 3;

/// Remaining lifetime and owner of one placed aura.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aura {
    pub turns: u8,
    pub owner: Color,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoyaltyOverlay {
    maps: [BTreeMap<Square, Aura>; RoyaltyKind::COUNT],
}

impl RoyaltyOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, sq: Square) -> Option<(RoyaltyKind, Aura)> {
        RoyaltyKind::ALL
            .iter()
            .find_map(|&kind| self.maps[kind.idx()].get(&sq).map(|aura| (kind, *aura)))
    }

    #[inline]
    pub fn kind_at(&self, sq: Square) -> Option<RoyaltyKind> {
        if self.is_empty() {
            return None;
        }
        self.get(sq).map(|(kind, _)| kind)
    }

    pub fn has(&self, sq: Square, kind: RoyaltyKind) -> bool {
        self.maps[kind.idx()].contains_key(&sq)
    }

    /// Binds `kind` to `sq`, clearing any other kind already there.
    /// An aura with zero turns is never stored.
    pub fn assign(&mut self, sq: Square, kind: RoyaltyKind, aura: Aura) {
        self.clear(sq);
        if aura.turns > 0 {
            self.maps[kind.idx()].insert(sq, aura);
        }
    }

    pub fn clear(&mut self, sq: Square) {
        for map in &mut self.maps {
            map.remove(&sq);
        }
    }

    /// One turn passes for every aura `owner` placed; spent auras vanish.
    pub fn decay(&mut self, owner: Color) {
        for map in &mut self.maps {
            map.retain(|_, aura| {
                if aura.owner == owner {
                    aura.turns = aura.turns.saturating_sub(1);
                }
                aura.turns > 0
            });
        }
    }

    pub fn is_empty(&self) -> bool {
        self.maps.iter().all(BTreeMap::is_empty)
    }

    pub fn len(&self) -> usize {
        self.maps.iter().map(BTreeMap::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, RoyaltyKind, Aura)> + '_ {
        RoyaltyKind::ALL.iter().flat_map(move |&kind| {
            self.maps[kind.idx()]
                .iter()
                .map(move |(&sq, &aura)| (sq, kind, aura))
        })
    }
}

#[cfg(test)]
#[path = "royalty_tests.rs"]
mod royalty_tests;
