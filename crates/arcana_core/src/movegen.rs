//! Pseudo-legal move generation across every action category, and the
//! legality filter built on `try_make`.
//!
//! Generation never fails: an ability without live charges simply adds no
//! moves. Forced tiers are resolved here too. When a forced tier is
//! present, only its moves are produced, whatever the request asked for.

use arrayvec::ArrayVec;

use crate::arcana::Arcana;
use crate::attacks::{Capture, in_check, is_attacked, may_capture};
use crate::board::{Board, CastleRights};
use crate::gait::{Gait, ORTHOGONAL, extension, gait_at, has_native_gait, trample_steps};
use crate::ledger::Ledger;
use crate::moves::{Action, Move, MoveFlags, MoveKind};
use crate::position::Position;
use crate::royalty::RoyaltyKind;
use crate::types::*;

pub const MAGNET_RADIUS: i8 = 3;

/// Pulls applied by one magnet, in order.
pub type Pulls = ArrayVec<(Square, Square), 12>;

/// Restricts generation to one action category.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ActionFilter {
    #[default]
    Any,
    /// Piece moves without a shift extension, castling and en passant.
    Ordinary,
    /// Moves using a shift extension.
    Shift,
    Summon(Option<PieceKind>),
    Aura(Option<RoyaltyKind>),
    Offering,
    Swap,
    Magnet,
    Trample,
}

impl ActionFilter {
    fn wants_piece_moves(self) -> bool {
        matches!(
            self,
            ActionFilter::Any | ActionFilter::Ordinary | ActionFilter::Shift
        )
    }

    fn wants(self, other: ActionFilter) -> bool {
        match (self, other) {
            (ActionFilter::Any, _) => true,
            (ActionFilter::Summon(_), ActionFilter::Summon(_)) => true,
            (ActionFilter::Aura(_), ActionFilter::Aura(_)) => true,
            (a, b) => a == b,
        }
    }

    pub fn accepts(self, mv: Move) -> bool {
        match self {
            ActionFilter::Any => true,
            ActionFilter::Ordinary => match mv.kind() {
                MoveKind::Ordinary => !mv.is_shift(),
                MoveKind::Castle | MoveKind::EnPassant => true,
                _ => false,
            },
            ActionFilter::Shift => mv.kind() == MoveKind::Ordinary && mv.is_shift(),
            ActionFilter::Summon(kind) => match mv.action() {
                Some(Action::Summon { piece, .. }) => kind.is_none_or(|k| k == piece.kind),
                _ => false,
            },
            ActionFilter::Aura(kind) => match mv.action() {
                Some(Action::Aura { kind: placed, .. }) => kind.is_none_or(|k| k == placed),
                _ => false,
            },
            ActionFilter::Offering => mv.kind() == MoveKind::Offering,
            ActionFilter::Swap => mv.kind() == MoveKind::Swap,
            ActionFilter::Magnet => mv.kind() == MoveKind::Magnet,
            ActionFilter::Trample => mv.kind() == MoveKind::Trample,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenRequest {
    /// Apply forced-move precedence.
    pub forced: bool,
    pub captures_only: bool,
    pub action: ActionFilter,
    /// Keep only moves focused on this square: the destination of piece
    /// moves, or the acted-on square of placements, offerings and magnets.
    pub target: Option<Square>,
}

impl Default for GenRequest {
    fn default() -> Self {
        GenRequest {
            forced: true,
            captures_only: false,
            action: ActionFilter::Any,
            target: None,
        }
    }
}

impl GenRequest {
    pub fn action(action: ActionFilter) -> Self {
        GenRequest {
            action,
            ..GenRequest::default()
        }
    }

    pub fn captures() -> Self {
        GenRequest {
            captures_only: true,
            ..GenRequest::default()
        }
    }

    pub fn accepts(&self, mv: Move) -> bool {
        if self.captures_only && !mv.is_capture() {
            return false;
        }
        if let Some(target) = self.target
            && focus_square(mv) != target
        {
            return false;
        }
        self.action.accepts(mv)
    }
}

/// Square a move acts on, as seen by a destination query.
pub fn focus_square(mv: Move) -> Square {
    match mv.kind() {
        MoveKind::Summon | MoveKind::Aura | MoveKind::Offering | MoveKind::Magnet => mv.src(),
        _ => mv.dst(),
    }
}

/// Which precedence tier produced a move list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tier {
    ForcedEnPassant,
    Herring,
    Free,
}

/// Fills `out` with pseudo-legal moves for the side to move.
pub fn generate(pos: &Position, req: &GenRequest, out: &mut Vec<Move>) -> Tier {
    out.clear();
    let mut g = Gen::new(&pos.board, &pos.ledger, *req, out);
    if req.forced
        && let Some(tier) = g.forced_tier()
    {
        return tier;
    }
    g.free();
    Tier::Free
}

/// Legal moves for the request, reusing the buffer.
///
/// Each candidate is checked with `try_make`. A forced tier with no legal
/// move at all lapses, and the request is answered unforced.
pub fn legal_moves_into(pos: &mut Position, req: &GenRequest, out: &mut Vec<Move>) -> Tier {
    let tier = generate(pos, req, out);
    out.retain(|&mv| pos.try_make(mv));
    if tier == Tier::Free || !out.is_empty() {
        return tier;
    }

    if *req != GenRequest::default() {
        let mut probe = Vec::new();
        generate(pos, &GenRequest::default(), &mut probe);
        if probe.into_iter().any(|mv| pos.try_make(mv)) {
            return tier;
        }
    }

    let unforced = GenRequest {
        forced: false,
        ..*req
    };
    generate(pos, &unforced, out);
    out.retain(|&mv| pos.try_make(mv));
    Tier::Free
}

/// Generate all legal moves, returning a freshly allocated vector.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &GenRequest::default(), &mut out);
    out
}

/// Pieces a magnet on `center` would pull, nearest first along each ray.
/// Exiles and pieces in stasis stay put; pawns are never pulled onto their
/// first or last rank.
pub fn magnet_pulls(board: &Board, center: Square) -> Pulls {
    let mut pulls = Pulls::new();
    if !is_playable(center) {
        return pulls;
    }
    let mut vacated: ArrayVec<Square, 12> = ArrayVec::new();
    let mut filled: ArrayVec<Square, 12> = ArrayVec::new();

    for (df, dr) in ORTHOGONAL {
        let mut inner = center;
        for dist in 1..=MAGNET_RADIUS {
            let Some(outer) = offset(center, (df * dist, dr * dist)) else {
                break;
            };
            let step_from = outer;
            let step_to = inner;
            inner = outer;

            let occupied = |sq: Square| {
                filled.contains(&sq) || (board.piece_at(sq).is_some() && !vacated.contains(&sq))
            };
            if !occupied(step_from) || occupied(step_to) {
                continue;
            }
            let Some(piece) = board.piece_at(step_from) else {
                continue;
            };
            if piece.kind == PieceKind::Exile || board.royalty.has(step_from, RoyaltyKind::Stasis) {
                continue;
            }
            if piece.kind == PieceKind::Pawn {
                let rel = piece.color.relative_rank(rank_of(step_to));
                if rel == 0 || rel == 7 {
                    continue;
                }
            }

            if let Some(i) = filled.iter().position(|&s| s == step_from) {
                filled.remove(i);
            } else {
                vacated.push(step_from);
            }
            if let Some(i) = vacated.iter().position(|&s| s == step_to) {
                vacated.remove(i);
            } else {
                filled.push(step_to);
            }
            pulls.push((step_from, step_to));
        }
    }
    pulls
}

struct Gen<'a> {
    board: &'a Board,
    ledger: &'a Ledger,
    req: GenRequest,
    us: Color,
    out: &'a mut Vec<Move>,
}

impl<'a> Gen<'a> {
    fn new(board: &'a Board, ledger: &'a Ledger, req: GenRequest, out: &'a mut Vec<Move>) -> Self {
        Gen {
            board,
            ledger,
            req,
            us: board.side(),
            out,
        }
    }

    fn holds(&self, key: Arcana) -> bool {
        self.ledger.holds(self.us, key)
    }

    fn push(&mut self, mv: Move) {
        if self.req.accepts(mv) {
            self.out.push(mv);
        }
    }

    fn second_half(&self) -> bool {
        self.board.linked == Some(self.us)
    }

    // Forced tiers

    fn forced_tier(&mut self) -> Option<Tier> {
        let them = self.us.other();
        let requested = self.req;

        if self.board.linked.is_none()
            && self.board.ep().is_some()
            && self.ledger.holds(them, Arcana::ForceEnPassant)
        {
            let mut found = Vec::new();
            self.collect_all(&mut found, |g| g.en_passant());
            if !found.is_empty() {
                self.out.extend(found.into_iter().filter(|&mv| requested.accepts(mv)));
                return Some(Tier::ForcedEnPassant);
            }
        }

        if !self.board.pieces(them, PieceKind::Herring).is_empty() {
            let mut found = Vec::new();
            self.collect_all(&mut found, |g| {
                g.piece_moves();
                g.tramples();
            });
            found.retain(|mv| {
                mv.captured()
                    .is_some_and(|p| p.kind == PieceKind::Herring && p.color == them)
            });
            if !found.is_empty() {
                self.out.extend(found.into_iter().filter(|&mv| requested.accepts(mv)));
                return Some(Tier::Herring);
            }
        }
        None
    }

    /// Runs `f` with an unfiltered request, collecting into `sink`.
    fn collect_all(&self, sink: &mut Vec<Move>, f: impl FnOnce(&mut Gen<'_>)) {
        let mut g = Gen {
            board: self.board,
            ledger: self.ledger,
            req: GenRequest {
                forced: false,
                ..GenRequest::default()
            },
            us: self.us,
            out: sink,
        };
        f(&mut g);
    }

    // Free tier

    fn free(&mut self) {
        let action = self.req.action;
        if self.second_half() {
            if action.wants_piece_moves() {
                self.piece_moves();
            }
            return;
        }
        if action.wants_piece_moves() {
            self.piece_moves();
            self.en_passant();
        }
        if action.wants(ActionFilter::Trample) {
            self.tramples();
        }
        if self.req.captures_only {
            return;
        }
        if action.wants(ActionFilter::Summon(None)) {
            self.summons();
        }
        if action.wants(ActionFilter::Aura(None)) {
            self.auras();
        }
        if action.wants(ActionFilter::Offering) {
            self.offerings();
        }
        if action.wants(ActionFilter::Swap) {
            self.swaps();
        }
        if action.wants(ActionFilter::Magnet) {
            self.magnets();
        }
    }

    // Piece moves

    fn piece_moves(&mut self) {
        let board = self.board;
        let second_half = self.second_half();
        for (from, piece) in board.occupied_by(self.us) {
            match gait_at(board, from, piece) {
                Gait::Frozen => continue,
                Gait::Pawn { color } => self.pawn_moves(from, piece, color),
                Gait::Pattern {
                    leaps,
                    rides,
                    captures,
                } => {
                    for &d in leaps {
                        if let Some(to) = offset(from, d) {
                            self.step(from, piece, to, captures, MoveFlags::empty());
                        }
                    }
                    for &d in rides {
                        let mut cur = from;
                        while let Some(to) = offset(cur, d) {
                            self.step(from, piece, to, captures, MoveFlags::empty());
                            if !board.is_empty(to) {
                                break;
                            }
                            cur = to;
                        }
                    }
                }
            }

            if second_half || !has_native_gait(board, from) {
                continue;
            }
            if let Some(ext) = extension(piece)
                && self.holds(ext.key)
            {
                for &d in ext.steps {
                    if let Some(to) = offset(from, d) {
                        self.step(from, piece, to, ext.captures, MoveFlags::SHIFT);
                    }
                }
            }
            if piece.kind == PieceKind::King {
                self.castles(from);
            }
        }
    }

    /// One step onto `to`: a quiet move, a capture, or nothing.
    fn step(&mut self, from: Square, piece: Piece, to: Square, captures: bool, flags: MoveFlags) {
        match may_capture(self.board, self.ledger, piece, to) {
            Capture::Quiet => self.emit(from, to, piece, None, flags),
            Capture::Enemy(victim) if captures => self.emit(from, to, piece, Some(victim), flags),
            Capture::Own(victim) if captures && !self.second_half() => {
                self.emit(from, to, piece, Some(victim), flags | MoveFlags::CONSUME)
            }
            _ => {}
        }
    }

    fn pawn_moves(&mut self, from: Square, piece: Piece, color: Color) {
        let fwd = color.forward();
        if let Some(one) = offset(from, (0, fwd))
            && self.board.is_empty(one)
        {
            self.emit(from, one, piece, None, MoveFlags::empty());
            if color.relative_rank(rank_of(from)) == 1
                && let Some(two) = offset(from, (0, 2 * fwd))
                && self.board.is_empty(two)
            {
                self.emit(from, two, piece, None, MoveFlags::DOUBLE_PUSH);
            }
        }
        for df in [-1, 1] {
            let Some(to) = offset(from, (df, fwd)) else {
                continue;
            };
            match may_capture(self.board, self.ledger, piece, to) {
                Capture::Enemy(victim) => self.emit(from, to, piece, Some(victim), MoveFlags::empty()),
                Capture::Own(victim) if !self.second_half() => {
                    self.emit(from, to, piece, Some(victim), MoveFlags::CONSUME)
                }
                _ => {}
            }
        }
    }

    /// Emits an ordinary move with its promotion, linked-move and
    /// evolution variants.
    fn emit(&mut self, from: Square, to: Square, piece: Piece, victim: Option<Piece>, flags: MoveFlags) {
        let us = self.us;
        let rel = us.relative_rank(rank_of(to));
        if piece.kind == PieceKind::Pawn && rel == 0 {
            return;
        }
        let base = match victim {
            Some(v) => Move::capture(from, to, v),
            None => Move::quiet(from, to),
        }
        .with_flags(flags);

        if self.promotes(piece, rel, flags) {
            let optional = rel != 7;
            if optional {
                self.push(base);
            }
            self.push_promotions(base);
            return;
        }
        self.push(base);

        if self.second_half() {
            return;
        }
        if !flags.contains(MoveFlags::SHIFT)
            && victim.is_none()
            && piece.kind != PieceKind::King
            && self.board.linked.is_none()
            && self.holds(Arcana::Dyad)
        {
            self.push(base.with_flags(MoveFlags::DYAD));
        }
        if piece.kind.evolves_to().is_some()
            && self.board.evolution[us.idx()] == 0
            && self.holds(Arcana::Evolution)
        {
            self.push(base.with_flags(MoveFlags::EVOLVE));
        }
    }

    fn promotes(&self, piece: Piece, rel: i8, flags: MoveFlags) -> bool {
        if piece.kind != PieceKind::Pawn || flags.contains(MoveFlags::SHIFT) {
            return false;
        }
        rel == 7 || (rel == 6 && self.holds(Arcana::EarlyPromotion))
    }

    fn push_promotions(&mut self, base: Move) {
        for kind in PieceKind::PROMOTIONS {
            self.push(base.with_promotion(Piece::new(self.us, kind)));
        }
        if self.holds(Arcana::Coronation) {
            self.push(base.with_promotion(Piece::new(self.us, PieceKind::Amazon)));
        }
    }

    fn en_passant(&mut self) {
        let Some(ep) = self.board.ep() else {
            return;
        };
        if !self.board.is_empty(ep) {
            return;
        }
        let back = -self.us.forward();
        let Some(cap_sq) = offset(ep, (0, back)) else {
            return;
        };
        for df in [-1, 1] {
            let Some(from) = offset(ep, (df, back)) else {
                continue;
            };
            let Some(piece) = self.board.piece_at(from) else {
                continue;
            };
            if piece.color != self.us
                || !matches!(gait_at(self.board, from, piece), Gait::Pawn { .. })
            {
                continue;
            }
            let Capture::Enemy(victim) = may_capture(self.board, self.ledger, piece, cap_sq) else {
                continue;
            };
            if victim.kind != PieceKind::Pawn {
                continue;
            }
            let base = Move::en_passant(from, ep, victim);
            let rel = self.us.relative_rank(rank_of(ep));
            if self.promotes(piece, rel, MoveFlags::empty()) {
                if rel != 7 {
                    self.push(base);
                }
                self.push_promotions(base);
            } else {
                self.push(base);
            }
        }
    }

    fn castles(&mut self, from: Square) {
        let us = self.us;
        let home = match us {
            Color::White => E1,
            Color::Black => E8,
        };
        if from != home || in_check(self.board, self.ledger, us) {
            return;
        }
        let bravado = self.holds(Arcana::Bravado);
        let vault = self.holds(Arcana::RookVault);

        // (right, rook file offset, king step direction, squares to clear)
        let sides: [(CastleRights, i8, i8, &[i8]); 2] = [
            (CastleRights::kingside(us), 3, 1, &[1, 2]),
            (CastleRights::queenside(us), -4, -1, &[-1, -2, -3]),
        ];
        for (right, rook_df, dir, clear) in sides {
            if !self.board.castling().contains(right) {
                continue;
            }
            let Some(rook_sq) = offset(home, (rook_df, 0)) else {
                continue;
            };
            let rook = Piece::new(us, PieceKind::Rook);
            if self.board.piece_at(rook_sq) != Some(rook)
                || self.board.royalty.has(rook_sq, RoyaltyKind::Stasis)
            {
                continue;
            }
            let path_clear = clear
                .iter()
                .all(|&df| offset(home, (df, 0)).is_some_and(|sq| self.board.is_empty(sq)));
            if !path_clear {
                continue;
            }
            let (Some(transit), Some(king_to)) = (offset(home, (dir, 0)), offset(home, (2 * dir, 0)))
            else {
                continue;
            };
            let them = us.other();
            let safe = bravado
                || (!is_attacked(self.board, self.ledger, transit, them)
                    && !is_attacked(self.board, self.ledger, king_to, them));
            if !safe {
                continue;
            }
            self.push(Move::castle(home, king_to, false));
            if vault {
                self.push(Move::castle(home, king_to, true));
            }
        }
    }

    // Actions

    fn tramples(&mut self) {
        if self.second_half() || !self.holds(Arcana::Trample) {
            return;
        }
        let board = self.board;
        for (from, piece) in board.occupied_by(self.us) {
            let Some(steps) = trample_steps(piece.kind) else {
                continue;
            };
            if !has_native_gait(board, from) {
                continue;
            }
            for &d in steps {
                let Some(target) = offset(from, d) else {
                    continue;
                };
                if let Capture::Enemy(victim) = may_capture(board, self.ledger, piece, target)
                    && victim.kind != PieceKind::King
                {
                    self.push(Move::trample(from, target, victim));
                }
            }
        }
    }

    fn placement_squares(&self) -> impl Iterator<Item = Square> + use<> {
        let us = self.us;
        let depth = if self.holds(Arcana::Capacity) { 4 } else { 2 };
        (0..depth).flat_map(move |rel| {
            let rank = us.relative_rank(rel);
            (0..8).filter_map(move |file| square(file, rank))
        })
    }

    fn summons(&mut self) {
        let kinds: ArrayVec<PieceKind, 8> = Arcana::all()
            .filter(|&key| self.holds(key))
            .filter_map(Arcana::summoned_kind)
            .collect();
        if kinds.is_empty() {
            return;
        }
        for sq in self.placement_squares() {
            if !self.board.is_empty(sq) {
                continue;
            }
            let rel = self.us.relative_rank(rank_of(sq));
            for &kind in &kinds {
                if kind == PieceKind::Pawn && (rel == 0 || rel == 7) {
                    continue;
                }
                self.push(Move::summon(sq, Piece::new(self.us, kind)));
            }
        }
    }

    fn auras(&mut self) {
        let kinds: ArrayVec<RoyaltyKind, 7> = RoyaltyKind::ALL
            .into_iter()
            .filter(|&kind| self.holds(Arcana::aura_for(kind)))
            .collect();
        if kinds.is_empty() {
            return;
        }
        let king_in_check = self
            .board
            .king_sq(self.us)
            .filter(|_| in_check(self.board, self.ledger, self.us));
        for sq in self.placement_squares() {
            let existing = self.board.royalty.get(sq);
            for &kind in &kinds {
                let conflict = existing
                    .is_some_and(|(placed, aura)| aura.owner != self.us || placed == kind);
                if conflict {
                    continue;
                }
                if king_in_check == Some(sq) && !kind.resolves_check() {
                    continue;
                }
                self.push(Move::aura(sq, kind));
            }
        }
    }

    fn offerings(&mut self) {
        if !self.holds(Arcana::Offering) {
            return;
        }
        for (sq, piece) in self.board.occupied_by(self.us) {
            if matches!(piece.kind, PieceKind::King | PieceKind::Exile) {
                continue;
            }
            self.push(Move::offering(sq, piece));
        }
    }

    fn swaps(&mut self) {
        if !self.holds(Arcana::Swap) {
            return;
        }
        let own: Vec<(Square, Piece)> = self
            .board
            .occupied_by(self.us)
            .filter(|(_, p)| p.kind != PieceKind::Exile)
            .collect();
        for (i, &(a, pa)) in own.iter().enumerate() {
            for &(b, pb) in &own[i + 1..] {
                if pa.kind == pb.kind || !pawn_may_stand(pa, b) || !pawn_may_stand(pb, a) {
                    continue;
                }
                let (lo, hi) = if a < b { (a, b) } else { (b, a) };
                self.push(Move::swap(lo, hi));
            }
        }
    }

    fn magnets(&mut self) {
        if !self.holds(Arcana::Magnet) {
            return;
        }
        for center in playable_squares() {
            if !magnet_pulls(self.board, center).is_empty() {
                self.push(Move::magnet(center));
            }
        }
    }
}

/// Pawns never stand on their first or last rank.
fn pawn_may_stand(piece: Piece, sq: Square) -> bool {
    if piece.kind != PieceKind::Pawn {
        return true;
    }
    let rel = piece.color.relative_rank(rank_of(sq));
    rel != 0 && rel != 7
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
