//! Zobrist keys for arcana positions.
//!
//! Every board mutation updates the hash incrementally. Hashed: each piece
//! on each playable square, the side to move, the four castling rights and
//! the en-passant file. Royalty auras, timers and ledger charges are not
//! hashed, so two positions differing only there repeat.

use crate::types::{Piece, PieceKind, Square, index64};

const PIECE_KEYS: usize = 2 * PieceKind::COUNT * 64;
const SEED: u64 = 0x00A5_CA4A_5EED_0001;

pub struct ZobristKeys {
    /// Flat table indexed by `(color * COUNT + kind) * 64 + index64(sq)`.
    pieces: [u64; PIECE_KEYS],
    pub side_to_move: u64,
    /// [wk, wq, bk, bq]
    castling: [u64; 4],
    en_passant: [u64; 8],
}

/// One splitmix64 step: the advanced state and its mixed output.
const fn splitmix64(state: u64) -> (u64, u64) {
    let next = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = next;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (next, z ^ (z >> 31))
}

/// Draws `N` keys from the stream starting at `state`.
const fn draw<const N: usize>(mut state: u64) -> ([u64; N], u64) {
    let mut keys = [0u64; N];
    let mut i = 0;
    while i < N {
        let (next, key) = splitmix64(state);
        keys[i] = key;
        state = next;
        i += 1;
    }
    (keys, state)
}

impl ZobristKeys {
    pub const fn new() -> Self {
        let (pieces, state) = draw::<PIECE_KEYS>(SEED);
        let (side, state) = draw::<1>(state);
        let (castling, state) = draw::<4>(state);
        let (en_passant, _) = draw::<8>(state);
        ZobristKeys {
            pieces,
            side_to_move: side[0],
            castling,
            en_passant,
        }
    }

    /// Key for a piece on a mailbox square; border cells hash to 0.
    #[inline(always)]
    pub fn piece_key(&self, piece: Piece, sq: Square) -> u64 {
        let Some(idx) = index64(sq) else {
            return 0;
        };
        let table = piece.color.idx() * PieceKind::COUNT + piece.kind.idx();
        self.pieces[table * 64 + idx]
    }

    /// 0=wk, 1=wq, 2=bk, 3=bq.
    #[inline(always)]
    pub fn castling_key(&self, index: usize) -> u64 {
        self.castling[index & 3]
    }

    #[inline(always)]
    pub fn ep_key(&self, file: i8) -> u64 {
        self.en_passant[(file & 7) as usize]
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

pub static ZOBRIST: ZobristKeys = ZobristKeys::new();

#[cfg(test)]
#[path = "zobrist_tests.rs"]
mod zobrist_tests;
