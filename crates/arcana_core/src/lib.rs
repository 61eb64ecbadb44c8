pub mod arcana;
pub mod attacks;
pub mod board;
pub mod config;
pub mod error;
pub mod fen;
pub mod gait;
pub mod game;
pub mod history;
pub mod ledger;
pub mod makemove;
pub mod movegen;
pub mod moves;
pub mod notation;
pub mod perft;
pub mod position;
pub mod royalty;
pub mod types;
pub mod zobrist;

// Re-export the rules surface
pub use arcana::{ARCANA_COUNT, Arcana, ArcanaGroup, RewardEvent};
pub use attacks::{in_check, is_attacked};
pub use board::{Board, Cell, CastleRights, Snapshot};
pub use config::{GameSetup, Preset, RoyaltySetup, SideSetup};
pub use error::{BoardError, FenError, MoveError, SetupError};
pub use fen::START_FEN;
pub use game::{DrawReason, Game, LogEntry, Outcome, WinReason};
pub use history::{Mode, UnmakeScope};
pub use ledger::{Cadence, Charge, Ledger};
pub use movegen::{ActionFilter, GenRequest, Tier, legal_moves, legal_moves_into, magnet_pulls};
pub use moves::{Action, Move, MoveFlags, MoveKind};
pub use notation::{parse_move, render};
pub use perft::{divide, perft};
pub use position::Position;
pub use royalty::{Aura, RoyaltyKind, RoyaltyOverlay};
pub use types::*;
pub use zobrist::ZOBRIST;
