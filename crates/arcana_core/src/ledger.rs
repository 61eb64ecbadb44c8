//! Per-side resource ledger and progression clock.
//!
//! Every mutation returns a [`LedgerTag`] holding the value it replaced.
//! Make pushes the tags onto the ply's record and unmake replays them in
//! reverse, so the ledger returns bit-identical no matter how often a move
//! is made and taken back. Counts clamp instead of failing.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::arcana::{ARCANA_COUNT, Arcana, Payout, RewardEvent, payout, reward_ladder};
use crate::types::{Color, PieceKind};

/// Live charges of one arcana, with the high-water mark `cap`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Charge {
    pub cap: u8,
    pub live: u8,
}

/// When progression grants fall due: after `first` completed turns, then
/// every `every` turns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cadence {
    pub first: u32,
    pub every: u32,
}

impl Default for Cadence {
    fn default() -> Self {
        Cadence { first: 4, every: 6 }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progression {
    pub moves: u32,
    pub grants: u32,
    pub cadence: Cadence,
}

impl Progression {
    /// Highest catalog value a grant normally reaches.
    pub fn tier(&self) -> u8 {
        (1 + self.grants / 2).min(6) as u8
    }

    /// Whether the current move count is a grant boundary.
    pub fn due(&self) -> bool {
        let Cadence { first, every } = self.cadence;
        if self.moves == first {
            return true;
        }
        every > 0 && self.moves > first && (self.moves - first) % every == 0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SideLedger {
    charges: [Charge; ARCANA_COUNT],
    /// Arcana granted by an offering this game; progression skips them.
    offered: [bool; ARCANA_COUNT],
    progression: Progression,
}

impl Default for SideLedger {
    fn default() -> Self {
        SideLedger {
            charges: [Charge::default(); ARCANA_COUNT],
            offered: [false; ARCANA_COUNT],
            progression: Progression::default(),
        }
    }
}

impl SideLedger {
    pub fn charge(&self, key: Arcana) -> Charge {
        self.charges[key.idx()]
    }

    pub fn progression(&self) -> Progression {
        self.progression
    }

    pub fn was_offered(&self, key: Arcana) -> bool {
        self.offered[key.idx()]
    }

    /// Held arcana with their live counts.
    pub fn held(&self) -> impl Iterator<Item = (Arcana, u8)> + '_ {
        Arcana::all()
            .map(|key| (key, self.charges[key.idx()].live))
            .filter(|&(_, live)| live > 0)
    }
}

/// Reversal record for one ledger mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedgerTag {
    Charge {
        side: Color,
        key: Arcana,
        prior: Charge,
    },
    Offered {
        side: Color,
        key: Arcana,
        prior: bool,
    },
    Progression {
        side: Color,
        prior: Progression,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Ledger {
    sides: [SideLedger; 2],
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn side(&self, side: Color) -> &SideLedger {
        &self.sides[side.idx()]
    }

    pub fn charge(&self, side: Color, key: Arcana) -> Charge {
        self.sides[side.idx()].charge(key)
    }

    pub fn live(&self, side: Color, key: Arcana) -> u8 {
        self.charge(side, key).live
    }

    #[inline]
    pub fn holds(&self, side: Color, key: Arcana) -> bool {
        self.live(side, key) > 0
    }

    /// Resets one side: fresh charges from `pool`, no offered marks and a
    /// zeroed progression clock using `cadence`.
    pub fn set_inventory(
        &mut self,
        side: Color,
        pool: impl IntoIterator<Item = (Arcana, u8)>,
        cadence: Cadence,
    ) {
        let entry = &mut self.sides[side.idx()];
        *entry = SideLedger::default();
        entry.progression.cadence = cadence;
        for (key, qty) in pool {
            self.grant(side, key, qty);
        }
    }

    pub fn grant(&mut self, side: Color, key: Arcana, qty: u8) -> LedgerTag {
        let slot = &mut self.sides[side.idx()].charges[key.idx()];
        let prior = *slot;
        if qty > 0 {
            if key.stacking() {
                let live = slot.live.saturating_add(qty);
                slot.cap = slot.cap.max(live);
                slot.live = live.min(slot.cap);
            } else {
                slot.cap = slot.cap.max(1);
                slot.live = 1;
            }
        }
        LedgerTag::Charge { side, key, prior }
    }

    /// Takes back `qty` charges. The cap stays as a high-water mark.
    pub fn revert(&mut self, side: Color, key: Arcana, qty: u8) -> LedgerTag {
        let slot = &mut self.sides[side.idx()].charges[key.idx()];
        let prior = *slot;
        if key.stacking() {
            slot.live = slot.live.saturating_sub(qty);
        } else if qty > 0 {
            slot.live = 0;
        }
        LedgerTag::Charge { side, key, prior }
    }

    /// Uses one charge. Passive arcana are never used up.
    pub fn spend(&mut self, side: Color, key: Arcana) -> LedgerTag {
        if key.stacking() {
            self.revert(side, key, 1)
        } else {
            LedgerTag::Charge {
                side,
                key,
                prior: self.charge(side, key),
            }
        }
    }

    pub fn mark_offered(&mut self, side: Color, key: Arcana) -> LedgerTag {
        let flag = &mut self.sides[side.idx()].offered[key.idx()];
        let prior = *flag;
        *flag = true;
        LedgerTag::Offered { side, key, prior }
    }

    pub fn undo(&mut self, tag: LedgerTag) {
        match tag {
            LedgerTag::Charge { side, key, prior } => {
                self.sides[side.idx()].charges[key.idx()] = prior;
            }
            LedgerTag::Offered { side, key, prior } => {
                self.sides[side.idx()].offered[key.idx()] = prior;
            }
            LedgerTag::Progression { side, prior } => {
                self.sides[side.idx()].progression = prior;
            }
        }
    }

    /// Replays a journal backwards.
    pub fn unwind(&mut self, journal: &[LedgerTag]) {
        for &tag in journal.iter().rev() {
            self.undo(tag);
        }
    }

    /// Advances `side`'s clock by one completed turn and runs a grant on a
    /// cadence boundary.
    pub fn on_move_committed<R: Rng + ?Sized>(
        &mut self,
        side: Color,
        rng: &mut R,
        journal: &mut Vec<LedgerTag>,
    ) -> Option<Arcana> {
        let entry = &mut self.sides[side.idx()];
        journal.push(LedgerTag::Progression {
            side,
            prior: entry.progression,
        });
        entry.progression.moves += 1;
        if entry.progression.due() {
            self.progression_grant(side, rng, journal)
        } else {
            None
        }
    }

    /// Grants one arcana chosen by the progression rules.
    pub fn progression_grant<R: Rng + ?Sized>(
        &mut self,
        side: Color,
        rng: &mut R,
        journal: &mut Vec<LedgerTag>,
    ) -> Option<Arcana> {
        let entry = &self.sides[side.idx()];
        let tier = entry.progression.tier();
        let candidates: Vec<Arcana> = Arcana::all()
            .filter(|&key| entry.charge(key).live < key.max_charges() && !entry.was_offered(key))
            .collect();
        let Some(cheapest) = candidates.iter().map(|key| key.value()).min() else {
            tracing::debug!(?side, "progression grant skipped, nothing left to grant");
            return None;
        };
        let ceiling = if cheapest <= tier { tier } else { cheapest };
        let best = candidates
            .iter()
            .map(|key| key.value())
            .filter(|&value| value <= ceiling)
            .max()?;
        let top: Vec<Arcana> = candidates
            .into_iter()
            .filter(|key| key.value() == best)
            .collect();
        let key = *top.choose(rng)?;

        let entry = &mut self.sides[side.idx()];
        journal.push(LedgerTag::Progression {
            side,
            prior: entry.progression,
        });
        entry.progression.grants += 1;
        journal.push(self.grant(side, key, 1));
        tracing::debug!(?side, key = key.key(), tier, "progression grant");
        Some(key)
    }

    /// Spends the first held trigger for `event` on a piece of `kind` and
    /// pays it out. Returns the trigger spent.
    pub fn reward<R: Rng + ?Sized>(
        &mut self,
        side: Color,
        event: RewardEvent,
        kind: PieceKind,
        rng: &mut R,
        journal: &mut Vec<LedgerTag>,
    ) -> Option<Arcana> {
        let trigger = reward_ladder(event, kind).find(|&key| self.holds(side, key))?;
        journal.push(self.spend(side, trigger));
        match payout(trigger)? {
            Payout::Grant(key, qty) => journal.push(self.grant(side, key, qty)),
            Payout::Advance => {
                self.progression_grant(side, rng, journal);
            }
        }
        tracing::trace!(?side, ?event, trigger = trigger.key(), "trigger paid out");
        Some(trigger)
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod ledger_tests;
