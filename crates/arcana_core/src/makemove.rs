//! Make and unmake.
//!
//! `make` runs in two phases. The board phase moves pieces, updates the
//! royalty overlay, timers, counters and side, and pushes one record.
//! Legality is judged right after it: if the mover's king stands attacked
//! the record is unwound and the move rejected. Only a legal committed
//! move reaches the ledger phase, whose every change is journaled on the
//! same record.

use crate::arcana::{Arcana, RewardEvent, offering_code, offering_reward};
use crate::error::MoveError;
use crate::history::{Detail, Mode, Record, UnmakeScope};
use crate::moves::{Action, Move};
use crate::movegen::magnet_pulls;
use crate::position::Position;
use crate::royalty::{AURA_TURNS, Aura};
use crate::types::*;

/// Turns an evolution window stays open.
pub const EVOLUTION_SPAN: u8 = 3;

impl Position {
    /// Applies `mv` for the side to move.
    ///
    /// On error nothing has changed: stale or malformed moves are rejected
    /// before any mutation, and moves leaving the king attacked are undone.
    pub fn make(&mut self, mv: Move, mode: Mode) -> Result<(), MoveError> {
        let us = self.board.side();
        let action = mv.action().ok_or(MoveError::NotApplicable)?;
        self.validate(action, us)?;

        let snapshot = self.board.snapshot();
        let closes_turn = !mv.is_dyad();
        if closes_turn {
            self.board.royalty.decay(us);
        }
        self.board.set_ep(None);

        let mut detail = self.apply(action, us);
        self.evolve(mv, us, &mut detail);
        // Only a pawn still standing after its double step leaves a target
        if mv.is_double_push()
            && let Detail::Relocation { from, placed, .. } = &detail
            && placed.kind == PieceKind::Pawn
        {
            self.board.set_ep(offset(*from, (0, us.forward())));
        }
        if closes_turn && self.board.evolution[us.idx()] > 0 {
            self.board.evolution[us.idx()] -= 1;
        }

        let resets = match &detail {
            Detail::Relocation { moved, captured, .. } => {
                moved.kind == PieceKind::Pawn || captured.is_some()
            }
            Detail::Summon { .. } | Detail::Offering { .. } | Detail::Trample { .. } => true,
            _ => false,
        };
        self.board.fifty = if resets { 0 } else { self.board.fifty + 1 };
        if closes_turn && us == Color::Black {
            self.board.fullmove += 1;
        }

        if closes_turn {
            self.board.linked = None;
            self.board.set_side(us.other());
        } else {
            self.board.linked = Some(us);
        }

        self.history.push(Record {
            mv,
            mode,
            snapshot,
            detail,
            journal: Vec::new(),
        });

        if self.in_check(us) {
            self.unmake_ply();
            return Err(MoveError::KingLeftInCheck);
        }

        if mode == Mode::Commit {
            if self.in_check(us.other()) {
                self.board.checks[us.idx()] = self.board.checks[us.idx()].saturating_add(1);
            }
            self.commit_ledger(mv, action, us);
        }
        Ok(())
    }

    /// The legality oracle: whether `mv` can be made now. The position is
    /// left as it was.
    pub fn try_make(&mut self, mv: Move) -> bool {
        if self.make(mv, Mode::Provisional).is_err() {
            return false;
        }
        self.unmake_ply();
        true
    }

    /// Reverts the last ply, or the whole linked turn with
    /// [`UnmakeScope::Turn`]. Returns the last move reverted.
    pub fn unmake(&mut self, scope: UnmakeScope) -> Result<Move, MoveError> {
        let mv = self.unmake_ply().ok_or(MoveError::NothingToUndo)?;
        if scope == UnmakeScope::Turn
            && self.board.linked.is_some()
            && let Some(first) = self.unmake_ply()
        {
            return Ok(first);
        }
        Ok(mv)
    }

    fn unmake_ply(&mut self) -> Option<Move> {
        let record = self.history.pop()?;
        self.ledger.unwind(&record.journal);

        let board = &mut self.board;
        match record.detail {
            Detail::Relocation {
                from,
                to,
                moved,
                captured,
                ..
            } => {
                board.take(to);
                board.put(from, moved);
                if let Some((sq, piece)) = captured {
                    board.put(sq, piece);
                }
            }
            Detail::Castle {
                king_from,
                king_to,
                rook_from,
                rook_to,
            } => {
                let rook = board.take(rook_to);
                let king = board.take(king_to);
                if let Some(king) = king {
                    board.put(king_from, king);
                }
                if let Some(rook) = rook {
                    board.put(rook_from, rook);
                }
            }
            Detail::Summon { square } => {
                board.take(square);
            }
            Detail::Aura => {}
            Detail::Offering { square, piece } => board.put(square, piece),
            Detail::Swap { a, b } => {
                let on_a = board.take(a);
                let on_b = board.take(b);
                if let Some(p) = on_b {
                    board.put(a, p);
                }
                if let Some(p) = on_a {
                    board.put(b, p);
                }
            }
            Detail::Magnet { pulls } => {
                for &(from, to) in pulls.iter().rev() {
                    board.shift(to, from);
                }
            }
            Detail::Trample { target, victim } => board.put(target, victim),
        }
        board.restore(record.snapshot);
        Some(record.mv)
    }

    /// Rejects moves that do not fit the current board, before mutating.
    fn validate(&self, action: Action, us: Color) -> Result<(), MoveError> {
        let board = &self.board;
        let playable = |sq: Square| {
            if is_playable(sq) {
                Ok(())
            } else {
                Err(MoveError::InvalidSquare(sq))
            }
        };
        let own = |sq: Square| board.piece_at(sq).is_some_and(|p| p.color == us);
        let fits = |ok: bool| if ok { Ok(()) } else { Err(MoveError::NotApplicable) };

        match action {
            Action::Ordinary { from, to, captured, .. } => {
                playable(from)?;
                playable(to)?;
                fits(own(from) && from != to && board.piece_at(to) == captured)
            }
            Action::EnPassant { from, to, captured, .. } => {
                playable(from)?;
                playable(to)?;
                let cap_sq = offset(to, (0, -us.forward())).ok_or(MoveError::InvalidSquare(to))?;
                fits(
                    own(from)
                        && board.is_empty(to)
                        && captured.is_some_and(|p| p.kind == PieceKind::Pawn)
                        && board.piece_at(cap_sq) == captured,
                )
            }
            Action::Castle { from, to, .. } => {
                playable(from)?;
                playable(to)?;
                let rook_sq = castle_rook_from(from, to).ok_or(MoveError::InvalidSquare(to))?;
                fits(
                    board.piece_at(from) == Some(Piece::new(us, PieceKind::King))
                        && board.piece_at(rook_sq) == Some(Piece::new(us, PieceKind::Rook))
                        && board.is_empty(to),
                )
            }
            Action::Summon { square, piece } => {
                playable(square)?;
                fits(piece.color == us && board.is_empty(square))
            }
            Action::Aura { square, .. } | Action::Magnet { center: square } => playable(square),
            Action::Offering { square, piece } => {
                playable(square)?;
                fits(piece.color == us && board.piece_at(square) == Some(piece))
            }
            Action::Swap { a, b } => {
                playable(a)?;
                playable(b)?;
                fits(a != b && own(a) && own(b))
            }
            Action::Trample {
                from,
                target,
                victim,
            } => {
                playable(from)?;
                playable(target)?;
                fits(own(from) && board.piece_at(target) == Some(victim))
            }
        }
    }

    /// Board effects of the action itself.
    fn apply(&mut self, action: Action, us: Color) -> Detail {
        let board = &mut self.board;
        match action {
            Action::Ordinary {
                from,
                to,
                promotion,
                ..
            } => {
                let captured = board.take(to).map(|p| (to, p));
                let moved = board.shift(from, to).unwrap_or(Piece::new(us, PieceKind::Pawn));
                let placed = promotion.unwrap_or(moved);
                if placed != moved {
                    board.put(to, placed);
                }
                board.apply_castle_mask(from);
                board.apply_castle_mask(to);
                Detail::Relocation {
                    from,
                    to,
                    moved,
                    placed,
                    captured,
                }
            }
            Action::EnPassant {
                from,
                to,
                promotion,
                ..
            } => {
                let cap_sq = offset(to, (0, -us.forward())).unwrap_or(to);
                let captured = board.take(cap_sq).map(|p| (cap_sq, p));
                let moved = board.shift(from, to).unwrap_or(Piece::new(us, PieceKind::Pawn));
                let placed = promotion.unwrap_or(moved);
                if placed != moved {
                    board.put(to, placed);
                }
                board.apply_castle_mask(cap_sq);
                Detail::Relocation {
                    from,
                    to,
                    moved,
                    placed,
                    captured,
                }
            }
            Action::Castle { from, to, vault } => {
                let rook_from = castle_rook_from(from, to).unwrap_or(from);
                let rook_to = if vault {
                    from
                } else if to > from {
                    from + 1
                } else {
                    from - 1
                };
                board.shift(from, to);
                board.shift(rook_from, rook_to);
                board.apply_castle_mask(from);
                board.apply_castle_mask(rook_from);
                Detail::Castle {
                    king_from: from,
                    king_to: to,
                    rook_from,
                    rook_to,
                }
            }
            Action::Summon { square, piece } => {
                board.put(square, piece);
                Detail::Summon { square }
            }
            Action::Aura { square, kind } => {
                let aura = Aura {
                    turns: AURA_TURNS,
                    owner: us,
                };
                board.royalty.assign(square, kind, aura);
                Detail::Aura
            }
            Action::Offering { square, piece } => {
                board.take(square);
                board.apply_castle_mask(square);
                Detail::Offering { square, piece }
            }
            Action::Swap { a, b } => {
                let on_a = board.take(a);
                let on_b = board.take(b);
                if let Some(p) = on_b {
                    board.put(a, p);
                }
                if let Some(p) = on_a {
                    board.put(b, p);
                }
                board.apply_castle_mask(a);
                board.apply_castle_mask(b);
                Detail::Swap { a, b }
            }
            Action::Magnet { center } => {
                let pulls = magnet_pulls(board, center);
                for &(from, to) in &pulls {
                    board.shift(from, to);
                    board.apply_castle_mask(from);
                    board.apply_castle_mask(to);
                }
                Detail::Magnet { pulls }
            }
            Action::Trample { target, victim, .. } => {
                board.take(target);
                board.apply_castle_mask(target);
                Detail::Trample { target, victim }
            }
        }
    }

    /// Opens the evolution window for an evolve move, and upgrades the moved
    /// piece while the window is open.
    fn evolve(&mut self, mv: Move, us: Color, detail: &mut Detail) {
        if mv.is_evolve() {
            self.board.evolution[us.idx()] = EVOLUTION_SPAN;
        }
        if self.board.evolution[us.idx()] == 0 {
            return;
        }
        if let Detail::Relocation {
            to, moved, placed, ..
        } = detail
            && *placed == *moved
            && let Some(next) = moved.kind.evolves_to()
        {
            *placed = Piece::new(us, next);
            self.board.put(*to, *placed);
        }
    }

    /// Spending, rewards, offering payout and progression for a legal
    /// committed move, journaled onto its record.
    fn commit_ledger(&mut self, mv: Move, action: Action, us: Color) {
        let Some(record) = self.history.last() else {
            return;
        };
        let (victim, moved, path) = match &record.detail {
            Detail::Relocation {
                from,
                to,
                moved,
                captured,
                ..
            } => (captured.map(|(_, p)| p), Some(moved.kind), Some((*from, *to))),
            Detail::Trample { victim, .. } => (Some(*victim), None, None),
            _ => (None, None, None),
        };

        let ledger = &mut self.ledger;
        let rng = &mut self.rng;
        let mut journal = Vec::new();

        if let Some(victim) = victim {
            ledger.reward(victim.color, RewardEvent::Mori, victim.kind, rng, &mut journal);
            if victim.color != us {
                ledger.reward(us, RewardEvent::Mora, victim.kind, rng, &mut journal);
            }
        }

        for key in spent_arcana(mv, action, moved) {
            journal.push(ledger.spend(us, key));
        }

        if let Action::Offering { piece, .. } = action
            && let Some(code) = offering_code(piece.kind)
        {
            for &(key, qty) in offering_reward(code) {
                journal.push(ledger.grant(us, key, qty));
                journal.push(ledger.mark_offered(us, key));
            }
        }

        // Gain pays on arrival at the far rank, not on moves along it
        if let (Some(kind), Some((from, to))) = (moved, path)
            && us.relative_rank(rank_of(to)) == 7
            && us.relative_rank(rank_of(from)) != 7
        {
            ledger.reward(us, RewardEvent::Gain, kind, rng, &mut journal);
        }

        if !mv.is_dyad() {
            ledger.on_move_committed(us, rng, &mut journal);
        }

        tracing::debug!(
            side = ?us,
            ?mv,
            ledger_changes = journal.len(),
            "move committed"
        );
        if let Some(record) = self.history.last_mut() {
            record.journal = journal;
        }
    }
}

/// Rook origin for a castle from `king_from` to `king_to`.
fn castle_rook_from(king_from: Square, king_to: Square) -> Option<Square> {
    if king_to > king_from {
        offset(king_from, (3, 0))
    } else {
        offset(king_from, (-4, 0))
    }
}

/// Arcana a move uses up, read from its own encoding.
fn spent_arcana(mv: Move, action: Action, moved: Option<PieceKind>) -> Vec<Arcana> {
    let mut keys = Vec::new();
    match action {
        Action::Ordinary { promotion, .. } | Action::EnPassant { promotion, .. } => {
            if mv.is_shift()
                && let Some(key) = moved.and_then(Arcana::shift_for)
            {
                keys.push(key);
            }
            if promotion.is_some_and(|p| p.kind == PieceKind::Amazon) {
                keys.push(Arcana::Coronation);
            }
        }
        Action::Castle { .. } => {}
        Action::Summon { piece, .. } => keys.extend(Arcana::summon_for(piece.kind)),
        Action::Aura { kind, .. } => keys.push(Arcana::aura_for(kind)),
        Action::Offering { .. } => keys.push(Arcana::Offering),
        Action::Swap { .. } => keys.push(Arcana::Swap),
        Action::Magnet { .. } => keys.push(Arcana::Magnet),
        Action::Trample { .. } => keys.push(Arcana::Trample),
    }
    if mv.is_dyad() {
        keys.push(Arcana::Dyad);
    }
    if mv.is_evolve() {
        keys.push(Arcana::Evolution);
    }
    keys
}

#[cfg(test)]
#[path = "makemove_tests.rs"]
mod makemove_tests;
