//! Game-start setup, loaded from TOML.
//!
//! ```toml
//! seed = 7
//! preset = { rule = "n_checks", checks = 3 }
//!
//! [white.arcana]
//! summon_pawn = 2
//! dyad = 1
//!
//! [black.cadence]
//! first = 3
//! every = 5
//!
//! [[royalties]]
//! square = "e4"
//! kind = "aegis"
//! turns = 2
//! owner = "white"
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::arcana::Arcana;
use crate::board::Board;
use crate::error::SetupError;
use crate::fen::START_FEN;
use crate::ledger::{Cadence, Ledger};
use crate::position::{DEFAULT_SEED, Position};
use crate::royalty::{Aura, RoyaltyKind};
use crate::types::{Color, coord_to_sq};

pub const DEFAULT_HISTORY_WINDOW: usize = 512;

/// Rule set toggling global win conditions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Standard,
    /// Giving check `checks` times wins.
    NChecks { checks: u8 },
    /// Capturing every enemy pawn wins.
    PawnHunt,
    /// Bringing the king to the far rank wins.
    FarRank,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SideSetup {
    /// Arcana key to initial count.
    pub arcana: BTreeMap<String, u8>,
    pub cadence: Cadence,
}

impl SideSetup {
    /// Parses the arcana keys into a grant pool.
    pub fn pool(&self) -> Result<Vec<(Arcana, u8)>, SetupError> {
        self.arcana
            .iter()
            .map(|(name, &qty)| {
                let key = Arcana::from_str(name)
                    .map_err(|_| SetupError::UnknownArcana(name.clone()))?;
                Ok((key, qty))
            })
            .collect()
    }
}

/// One royalty placed before the first move.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoyaltySetup {
    pub square: String,
    pub kind: RoyaltyKind,
    pub turns: u8,
    pub owner: Color,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSetup {
    pub fen: String,
    pub seed: u64,
    pub preset: Preset,
    /// Committed plies kept for undo and the history feed.
    pub history_window: usize,
    pub white: SideSetup,
    pub black: SideSetup,
    pub royalties: Vec<RoyaltySetup>,
}

impl Default for GameSetup {
    fn default() -> Self {
        GameSetup {
            fen: START_FEN.to_string(),
            seed: DEFAULT_SEED,
            preset: Preset::default(),
            history_window: DEFAULT_HISTORY_WINDOW,
            white: SideSetup::default(),
            black: SideSetup::default(),
            royalties: Vec::new(),
        }
    }
}

impl GameSetup {
    pub fn from_toml(text: &str) -> Result<Self, SetupError> {
        Ok(toml::from_str(text)?)
    }

    pub fn side(&self, color: Color) -> &SideSetup {
        match color {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Builds the starting position: board from the FEN, royalties placed,
    /// inventories and cadences set, random source seeded.
    pub fn build(&self) -> Result<Position, SetupError> {
        let mut board = Board::from_fen(&self.fen)?;
        for placement in &self.royalties {
            let sq = coord_to_sq(&placement.square)
                .ok_or_else(|| SetupError::InvalidSquare(placement.square.clone()))?;
            if placement.turns == 0 {
                return Err(SetupError::ZeroTurns(placement.square.clone()));
            }
            let aura = Aura {
                turns: placement.turns,
                owner: placement.owner,
            };
            board.royalty.assign(sq, placement.kind, aura);
        }

        let mut ledger = Ledger::new();
        for color in Color::ALL {
            let side = self.side(color);
            ledger.set_inventory(color, side.pool()?, side.cadence);
        }

        tracing::debug!(
            preset = ?self.preset,
            seed = self.seed,
            royalties = self.royalties.len(),
            white_arcana = self.white.arcana.len(),
            black_arcana = self.black.arcana.len(),
            "game setup applied"
        );
        Ok(Position::new(board, ledger, self.seed))
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
