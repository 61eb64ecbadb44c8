//! The ability catalog.
//!
//! Every optional rule modifier a side can hold is one `Arcana` variant.
//! The catalog is fixed, so ledgers store it as a dense array indexed by
//! [`Arcana::idx`]. Keys round-trip through their snake_case names for
//! game setup files.

use strum::{EnumCount, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::royalty::RoyaltyKind;
use crate::types::PieceKind;

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumCount,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Arcana {
    // Summons
    SummonPawn,
    SummonKnight,
    SummonBishop,
    SummonRook,
    SummonQueen,
    SummonGhost,
    SummonHerring,
    SummonExile,

    // Royalty auras
    AuraQueen,
    AuraRook,
    AuraBishop,
    AuraKnight,
    AuraPawn,
    AuraAegis,
    AuraStasis,

    // Actions
    Offering,
    Swap,
    Magnet,
    Trample,
    Dyad,
    Evolution,
    Coronation,

    // Movement shifts
    ShiftPawn,
    ShiftRook,
    ShiftBishop,
    ShiftKnight,
    ShiftGhost,
    HybridHop,

    // Passive rules
    Consume,
    Capacity,
    EarlyPromotion,
    RookVault,
    Bravado,
    ForceEnPassant,
    Unbind,

    // Death and rank triggers
    MoriPawn,
    MoriRoyal,
    Mori,
    MoriDyad,
    MoriAdvance,
    MoraPawn,
    MoraRoyal,
    Mora,
    MoraDyad,
    MoraAdvance,
    GainPawn,
    GainRoyal,
    Gain,
    GainDyad,
    GainAdvance,
}

pub const ARCANA_COUNT: usize = <Arcana as EnumCount>::COUNT;

impl Arcana {
    pub fn idx(self) -> usize {
        self as usize
    }

    pub fn all() -> impl Iterator<Item = Arcana> {
        Arcana::iter()
    }

    pub fn key(self) -> &'static str {
        self.into()
    }

    /// Catalog value (1..=6); progression tiers gate on it.
    pub fn value(self) -> u8 {
        use Arcana::*;
        match self {
            SummonPawn | AuraPawn | ShiftPawn | RookVault => 1,
            MoriPawn | MoraPawn | GainPawn | Mori | Mora | Gain => 1,
            SummonKnight | SummonBishop | SummonHerring | SummonExile => 2,
            Offering | Swap | Consume | Capacity | Bravado | ForceEnPassant => 2,
            ShiftRook | ShiftBishop | ShiftKnight | ShiftGhost => 2,
            MoriDyad | MoraDyad | GainDyad => 2,
            SummonRook | SummonGhost | AuraBishop | AuraKnight | AuraStasis => 3,
            Trample | HybridHop | EarlyPromotion | Unbind => 3,
            MoriRoyal | MoraRoyal | GainRoyal => 3,
            AuraRook | AuraAegis | Magnet | Dyad => 4,
            MoriAdvance | MoraAdvance | GainAdvance => 4,
            SummonQueen | AuraQueen | Evolution => 5,
            Coronation => 6,
        }
    }

    /// Stacking arcana hold several charges; the rest are held or not.
    pub fn stacking(self) -> bool {
        !matches!(self.group(), ArcanaGroup::Passive)
    }

    /// Ceiling used when the progression clock picks what to hand out.
    pub fn max_charges(self) -> u8 {
        use Arcana::*;
        match self {
            SummonPawn => 4,
            SummonKnight | SummonBishop | Offering | Swap | Trample | ShiftPawn => 3,
            SummonQueen | Evolution | Coronation => 1,
            _ if !self.stacking() => 1,
            _ => 2,
        }
    }

    pub fn group(self) -> ArcanaGroup {
        use Arcana::*;
        match self {
            SummonPawn | SummonKnight | SummonBishop | SummonRook | SummonQueen | SummonGhost
            | SummonHerring | SummonExile => ArcanaGroup::Summon,
            AuraQueen | AuraRook | AuraBishop | AuraKnight | AuraPawn | AuraAegis
            | AuraStasis => ArcanaGroup::Aura,
            Offering | Swap | Magnet | Trample | Dyad | Evolution | Coronation => {
                ArcanaGroup::Action
            }
            ShiftPawn | ShiftRook | ShiftBishop | ShiftKnight | ShiftGhost | HybridHop => {
                ArcanaGroup::Shift
            }
            Consume | Capacity | EarlyPromotion | RookVault | Bravado | ForceEnPassant
            | Unbind => ArcanaGroup::Passive,
            _ => ArcanaGroup::Trigger,
        }
    }

    pub fn summon_for(kind: PieceKind) -> Option<Arcana> {
        let key = match kind {
            PieceKind::Pawn => Arcana::SummonPawn,
            PieceKind::Knight => Arcana::SummonKnight,
            PieceKind::Bishop => Arcana::SummonBishop,
            PieceKind::Rook => Arcana::SummonRook,
            PieceKind::Queen => Arcana::SummonQueen,
            PieceKind::Ghost => Arcana::SummonGhost,
            PieceKind::Herring => Arcana::SummonHerring,
            PieceKind::Exile => Arcana::SummonExile,
            _ => return None,
        };
        Some(key)
    }

    pub fn summoned_kind(self) -> Option<PieceKind> {
        let kind = match self {
            Arcana::SummonPawn => PieceKind::Pawn,
            Arcana::SummonKnight => PieceKind::Knight,
            Arcana::SummonBishop => PieceKind::Bishop,
            Arcana::SummonRook => PieceKind::Rook,
            Arcana::SummonQueen => PieceKind::Queen,
            Arcana::SummonGhost => PieceKind::Ghost,
            Arcana::SummonHerring => PieceKind::Herring,
            Arcana::SummonExile => PieceKind::Exile,
            _ => return None,
        };
        Some(kind)
    }

    pub fn aura_for(kind: RoyaltyKind) -> Arcana {
        match kind {
            RoyaltyKind::Queen => Arcana::AuraQueen,
            RoyaltyKind::Rook => Arcana::AuraRook,
            RoyaltyKind::Bishop => Arcana::AuraBishop,
            RoyaltyKind::Knight => Arcana::AuraKnight,
            RoyaltyKind::Pawn => Arcana::AuraPawn,
            RoyaltyKind::Aegis => Arcana::AuraAegis,
            RoyaltyKind::Stasis => Arcana::AuraStasis,
        }
    }

    pub fn aura_kind(self) -> Option<RoyaltyKind> {
        RoyaltyKind::ALL
            .iter()
            .copied()
            .find(|&kind| Arcana::aura_for(kind) == self)
    }

    /// Shift arcana extending the native move set of `kind`.
    pub fn shift_for(kind: PieceKind) -> Option<Arcana> {
        let key = match kind {
            PieceKind::Pawn => Arcana::ShiftPawn,
            PieceKind::Rook => Arcana::ShiftRook,
            PieceKind::Bishop => Arcana::ShiftBishop,
            PieceKind::Knight => Arcana::ShiftKnight,
            PieceKind::Ghost => Arcana::ShiftGhost,
            PieceKind::King => Arcana::HybridHop,
            _ => return None,
        };
        Some(key)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArcanaGroup {
    Summon,
    Aura,
    Action,
    Shift,
    Passive,
    Trigger,
}

/// What fires a death or rank trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardEvent {
    /// One of the side's own pieces died.
    Mori,
    /// The side captured an enemy piece.
    Mora,
    /// One of the side's pieces reached the far rank.
    Gain,
}

/// What a spent trigger pays out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payout {
    Grant(Arcana, u8),
    /// Runs one progression grant immediately.
    Advance,
}

/// Trigger keys for `event` that apply to a piece of `kind`, in priority
/// order: type specific, generic, linked-move variant, progression variant.
pub fn reward_ladder(event: RewardEvent, kind: PieceKind) -> impl Iterator<Item = Arcana> {
    use Arcana::*;
    let [pawn, royal, generic, dyad, advance] = match event {
        RewardEvent::Mori => [MoriPawn, MoriRoyal, Mori, MoriDyad, MoriAdvance],
        RewardEvent::Mora => [MoraPawn, MoraRoyal, Mora, MoraDyad, MoraAdvance],
        RewardEvent::Gain => [GainPawn, GainRoyal, Gain, GainDyad, GainAdvance],
    };
    let specific = if kind == PieceKind::Pawn {
        Some(pawn)
    } else if kind.is_royal() {
        Some(royal)
    } else {
        None
    };
    specific.into_iter().chain([generic, dyad, advance])
}

/// Payout of a death or rank trigger; `None` for every other key.
pub fn payout(trigger: Arcana) -> Option<Payout> {
    use Arcana::*;
    let payout = match trigger {
        MoriPawn => Payout::Grant(SummonPawn, 1),
        MoriRoyal => Payout::Grant(AuraAegis, 1),
        Mori => Payout::Grant(Offering, 1),
        MoraPawn => Payout::Grant(ShiftPawn, 1),
        MoraRoyal => Payout::Grant(Swap, 1),
        Mora => Payout::Grant(SummonKnight, 1),
        GainPawn => Payout::Grant(SummonPawn, 2),
        GainRoyal => Payout::Grant(AuraQueen, 1),
        Gain => Payout::Grant(Magnet, 1),
        MoriDyad | MoraDyad | GainDyad => Payout::Grant(Dyad, 1),
        MoriAdvance | MoraAdvance | GainAdvance => Payout::Advance,
        _ => return None,
    };
    Some(payout)
}

/// Letter code identifying what an offered piece is worth.
pub fn offering_code(kind: PieceKind) -> Option<char> {
    match kind {
        PieceKind::King | PieceKind::Exile => None,
        other => Some(other.letter().to_ascii_lowercase()),
    }
}

/// Fixed reward table for offerings, keyed by letter code.
pub fn offering_reward(code: char) -> &'static [(Arcana, u8)] {
    use Arcana::*;
    match code {
        'p' => &[(SummonHerring, 1)],
        'n' => &[(SummonPawn, 2)],
        'b' => &[(AuraBishop, 1), (SummonPawn, 1)],
        'r' => &[(Dyad, 1), (SummonKnight, 1)],
        'q' => &[(SummonRook, 1), (AuraQueen, 1), (Evolution, 1)],
        'a' => &[(SummonBishop, 1), (ShiftKnight, 1)],
        'c' => &[(SummonRook, 1), (ShiftRook, 1)],
        'm' => &[(SummonQueen, 1), (Coronation, 1)],
        'g' => &[(Trample, 1)],
        'h' => &[(Swap, 1)],
        _ => &[],
    }
}

#[cfg(test)]
#[path = "arcana_tests.rs"]
mod arcana_tests;
