//! Board state on the padded mailbox.
//!
//! `Board` owns everything about a position except the resource ledger:
//! cells, per-type square lists, material, castling, en passant, counters,
//! the royalty overlay and the linked-move and evolution state. All piece
//! mutations go through `put`/`take`, which keep cells, lists, material and
//! the Zobrist hash in step.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::error::BoardError;
use crate::royalty::RoyaltyOverlay;
use crate::types::*;
use crate::zobrist::ZOBRIST;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Offboard,
    Empty,
    Occupied(Piece),
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct CastleRights: u8 {
        const WK = 0b0001;
        const WQ = 0b0010;
        const BK = 0b0100;
        const BQ = 0b1000;
    }
}

impl CastleRights {
    pub fn kingside(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights::WK,
            Color::Black => CastleRights::BK,
        }
    }

    pub fn queenside(color: Color) -> CastleRights {
        match color {
            Color::White => CastleRights::WQ,
            Color::Black => CastleRights::BQ,
        }
    }

    /// Rights lost when anything leaves or lands on `sq`.
    pub fn mask_for(sq: Square) -> CastleRights {
        match sq {
            E1 => CastleRights::WK | CastleRights::WQ,
            H1 => CastleRights::WK,
            A1 => CastleRights::WQ,
            E8 => CastleRights::BK | CastleRights::BQ,
            H8 => CastleRights::BK,
            A8 => CastleRights::BQ,
            _ => CastleRights::empty(),
        }
    }

    fn hash(self) -> u64 {
        let mut h = 0;
        for (i, right) in [
            CastleRights::WK,
            CastleRights::WQ,
            CastleRights::BK,
            CastleRights::BQ,
        ]
        .into_iter()
        .enumerate()
        {
            if self.contains(right) {
                h ^= ZOBRIST.castling_key(i);
            }
        }
        h
    }
}

/// Sorted squares of one piece type.
pub type PieceList = ArrayVec<Square, 64>;

/// Board fields saved per ply so unmake can restore them wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub side: Color,
    pub hash: u64,
    pub castling: CastleRights,
    pub ep: Option<Square>,
    pub fifty: u32,
    pub fullmove: u32,
    pub royalty: RoyaltyOverlay,
    pub linked: Option<Color>,
    pub evolution: [u8; 2],
    pub checks: [u8; 2],
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
    lists: [[PieceList; PieceKind::COUNT]; 2],
    material: [i32; 2],
    side: Color,
    castling: CastleRights,
    ep: Option<Square>,
    hash: u64,
    pub fifty: u32,
    pub fullmove: u32,
    pub royalty: RoyaltyOverlay,
    /// Side that played the first half of an open linked move.
    pub linked: Option<Color>,
    /// Remaining turns of each side's evolution window.
    pub evolution: [u8; 2],
    /// Checks given by each side so far.
    pub checks: [u8; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Empty board, White to move.
    pub fn new() -> Self {
        let mut cells = [Cell::Offboard; BOARD_CELLS];
        for sq in playable_squares() {
            cells[sq as usize] = Cell::Empty;
        }
        Board {
            cells,
            lists: std::array::from_fn(|_| std::array::from_fn(|_| PieceList::new())),
            material: [0; 2],
            side: Color::White,
            castling: CastleRights::empty(),
            ep: None,
            hash: 0,
            fifty: 0,
            fullmove: 1,
            royalty: RoyaltyOverlay::new(),
            linked: None,
            evolution: [0; 2],
            checks: [0; 2],
        }
    }

    pub fn startpos() -> Self {
        let mut b = Board::new();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (f, &kind) in back.iter().enumerate() {
            let f = f as i8;
            for (color, back_rank, pawn_rank) in [(Color::White, 0, 1), (Color::Black, 7, 6)] {
                if let Some(sq) = square(f, back_rank) {
                    b.put(sq, Piece::new(color, kind));
                }
                if let Some(sq) = square(f, pawn_rank) {
                    b.put(sq, Piece::new(color, PieceKind::Pawn));
                }
            }
        }
        b.set_castling(CastleRights::all());
        b
    }

    // Queries

    #[inline]
    pub fn cell(&self, sq: Square) -> Cell {
        self.cells
            .get(sq as usize)
            .copied()
            .unwrap_or(Cell::Offboard)
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        match self.cell(sq) {
            Cell::Occupied(p) => Some(p),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.cell(sq) == Cell::Empty
    }

    pub fn pieces(&self, color: Color, kind: PieceKind) -> &[Square] {
        &self.lists[color.idx()][kind.idx()]
    }

    /// Every square holding a piece of `color`, grouped by kind.
    pub fn occupied_by(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        PieceKind::ALL.iter().flat_map(move |&kind| {
            self.pieces(color, kind)
                .iter()
                .map(move |&sq| (sq, Piece::new(color, kind)))
        })
    }

    pub fn king_sq(&self, color: Color) -> Option<Square> {
        self.pieces(color, PieceKind::King).first().copied()
    }

    pub fn material(&self, color: Color) -> i32 {
        self.material[color.idx()]
    }

    pub fn side(&self) -> Color {
        self.side
    }

    pub fn castling(&self) -> CastleRights {
        self.castling
    }

    pub fn ep(&self) -> Option<Square> {
        self.ep
    }

    pub fn hash(&self) -> u64 {
        self.hash
    }

    // Hashed state setters

    pub fn set_side(&mut self, side: Color) {
        if side != self.side {
            self.hash ^= ZOBRIST.side_to_move;
            self.side = side;
        }
    }

    pub fn set_castling(&mut self, rights: CastleRights) {
        self.hash ^= self.castling.hash() ^ rights.hash();
        self.castling = rights;
    }

    /// Drops the castling rights tied to `sq`.
    pub fn apply_castle_mask(&mut self, sq: Square) {
        let mask = CastleRights::mask_for(sq);
        if self.castling.intersects(mask) {
            self.set_castling(self.castling - mask);
        }
    }

    pub fn set_ep(&mut self, ep: Option<Square>) {
        if let Some(old) = self.ep {
            self.hash ^= ZOBRIST.ep_key(file_of(old));
        }
        if let Some(new) = ep {
            self.hash ^= ZOBRIST.ep_key(file_of(new));
        }
        self.ep = ep;
    }

    // Piece mutation, unchecked. Callers guarantee playable squares.

    pub(crate) fn put(&mut self, sq: Square, piece: Piece) {
        if let Cell::Occupied(old) = self.cells[sq as usize] {
            self.unlist(sq, old);
        }
        self.cells[sq as usize] = Cell::Occupied(piece);
        let list = &mut self.lists[piece.color.idx()][piece.kind.idx()];
        if let Err(pos) = list.binary_search(&sq) {
            list.insert(pos, sq);
        }
        self.material[piece.color.idx()] += piece.value();
        self.hash ^= ZOBRIST.piece_key(piece, sq);
    }

    pub(crate) fn take(&mut self, sq: Square) -> Option<Piece> {
        let Cell::Occupied(piece) = self.cell(sq) else {
            return None;
        };
        self.unlist(sq, piece);
        self.cells[sq as usize] = Cell::Empty;
        Some(piece)
    }

    pub(crate) fn shift(&mut self, from: Square, to: Square) -> Option<Piece> {
        let piece = self.take(from)?;
        self.put(to, piece);
        Some(piece)
    }

    fn unlist(&mut self, sq: Square, piece: Piece) {
        let list = &mut self.lists[piece.color.idx()][piece.kind.idx()];
        if let Ok(pos) = list.binary_search(&sq) {
            list.remove(pos);
        }
        self.material[piece.color.idx()] -= piece.value();
        self.hash ^= ZOBRIST.piece_key(piece, sq);
    }

    // Piece mutation, checked. Entry points for external callers.

    pub fn place(&mut self, sq: Square, piece: Piece) -> Result<(), BoardError> {
        match self.cell(sq) {
            Cell::Offboard => Err(BoardError::InvalidSquare(sq)),
            Cell::Occupied(_) => Err(BoardError::Occupied(sq)),
            Cell::Empty => {
                self.put(sq, piece);
                Ok(())
            }
        }
    }

    pub fn remove(&mut self, sq: Square) -> Result<Piece, BoardError> {
        match self.cell(sq) {
            Cell::Offboard => Err(BoardError::InvalidSquare(sq)),
            Cell::Empty => Err(BoardError::Empty(sq)),
            Cell::Occupied(_) => self.take(sq).ok_or(BoardError::Empty(sq)),
        }
    }

    pub fn relocate(&mut self, from: Square, to: Square) -> Result<Piece, BoardError> {
        if !is_playable(to) {
            return Err(BoardError::InvalidSquare(to));
        }
        match (self.cell(from), self.cell(to)) {
            (Cell::Offboard, _) => Err(BoardError::InvalidSquare(from)),
            (Cell::Empty, _) => Err(BoardError::Empty(from)),
            (_, Cell::Occupied(_)) => Err(BoardError::Occupied(to)),
            _ => self.shift(from, to).ok_or(BoardError::Empty(from)),
        }
    }

    // Snapshots

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            side: self.side,
            hash: self.hash,
            castling: self.castling,
            ep: self.ep,
            fifty: self.fifty,
            fullmove: self.fullmove,
            royalty: self.royalty.clone(),
            linked: self.linked,
            evolution: self.evolution,
            checks: self.checks,
        }
    }

    /// Restores every snapshot field. Pieces must already be back in
    /// place, so the stored hash matches the restored board.
    pub fn restore(&mut self, snap: Snapshot) {
        self.side = snap.side;
        self.hash = snap.hash;
        self.castling = snap.castling;
        self.ep = snap.ep;
        self.fifty = snap.fifty;
        self.fullmove = snap.fullmove;
        self.royalty = snap.royalty;
        self.linked = snap.linked;
        self.evolution = snap.evolution;
        self.checks = snap.checks;
    }

    /// Hash computed from scratch; equals `hash()` on a consistent board.
    pub fn compute_hash(&self) -> u64 {
        let mut h = 0;
        for color in Color::ALL {
            for (sq, piece) in self.occupied_by(color) {
                h ^= ZOBRIST.piece_key(piece, sq);
            }
        }
        if self.side == Color::Black {
            h ^= ZOBRIST.side_to_move;
        }
        h ^= self.castling.hash();
        if let Some(ep) = self.ep {
            h ^= ZOBRIST.ep_key(file_of(ep));
        }
        h
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
