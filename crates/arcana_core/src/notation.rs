//! Move text.
//!
//! `render` writes the human-readable form shown in the history feed;
//! `parse_move` reads that form back, or plain coordinate text such as
//! `e7e8q`, by matching against the legal moves of the position.

use crate::history::Mode;
use crate::movegen::legal_moves;
use crate::moves::{Action, Move};
use crate::position::Position;
use crate::types::*;

/// Rendered for moves whose squares fall outside the board.
pub const INVALID: &str = "invalid";

/// Renders `mv` as played from `pos`.
pub fn render(pos: &Position, mv: Move) -> String {
    let Some(action) = mv.action() else {
        return INVALID.to_string();
    };
    let Some(mut text) = body(pos, mv, action) else {
        return INVALID.to_string();
    };
    if mv.is_dyad() {
        text.push(';');
    }
    if mv.is_evolve() {
        text.push('^');
    }
    if gives_check(pos, mv) {
        text.push('+');
    }
    text
}

fn body(pos: &Position, mv: Move, action: Action) -> Option<String> {
    let board = &pos.board;
    let coord = sq_to_coord;
    // Piece moves omit the pawn letter
    let mover = |sq: Square| match board.piece_at(sq) {
        Some(p) if p.kind != PieceKind::Pawn => p.kind.letter().to_string(),
        _ => String::new(),
    };
    let letter = |sq: Square| board.piece_at(sq).map_or('?', |p| p.kind.letter());

    let text = match action {
        Action::Ordinary {
            from,
            to,
            captured,
            promotion,
        } => {
            let sep = if mv.is_consume() {
                "*"
            } else if mv.is_shift() && captured.is_some() {
                "~x"
            } else if mv.is_shift() {
                "~"
            } else if captured.is_some() {
                "x"
            } else {
                "-"
            };
            let mut text = format!("{}{}{sep}{}", mover(from), coord(from)?, coord(to)?);
            if let Some(p) = promotion {
                text.push('=');
                text.push(p.kind.letter());
            }
            text
        }
        Action::EnPassant {
            from, to, promotion, ..
        } => {
            let mut text = format!("{}x{}ep", coord(from)?, coord(to)?);
            if let Some(p) = promotion {
                text.push('=');
                text.push(p.kind.letter());
            }
            text
        }
        Action::Castle { from, to, vault } => {
            coord(from)?;
            coord(to)?;
            let mut text = if to > from { "O-O" } else { "O-O-O" }.to_string();
            if vault {
                text.push('v');
            }
            text
        }
        Action::Summon { square, piece } => format!("{}@{}", piece.kind.letter(), coord(square)?),
        Action::Aura { square, kind } => format!("{}&{}", kind.letter(), coord(square)?),
        Action::Offering { square, piece } => format!("!{}{}", piece.kind.letter(), coord(square)?),
        Action::Swap { a, b } => format!("{}{}<>{}{}", letter(a), coord(a)?, letter(b), coord(b)?),
        Action::Magnet { center } => format!("*{}", coord(center)?),
        Action::Trample { from, target, .. } => {
            format!("{}{}>{}", mover(from), coord(from)?, coord(target)?)
        }
    };
    Some(text)
}

fn gives_check(pos: &Position, mv: Move) -> bool {
    let them = pos.side().other();
    let mut probe = pos.clone();
    probe.make(mv, Mode::Provisional).is_ok() && probe.in_check(them)
}

/// Finds the legal move written as `text`, either in rendered form or as
/// coordinates with an optional promotion letter.
pub fn parse_move(pos: &Position, text: &str) -> Option<Move> {
    let text = text.trim();
    let legals = legal_moves(pos);
    if let Some(mv) = legals.iter().copied().find(|&mv| render(pos, mv) == text) {
        return Some(mv);
    }

    if !text.is_ascii() || text.len() < 4 {
        return None;
    }
    let from = coord_to_sq(&text[0..2])?;
    let to = coord_to_sq(&text[2..4])?;
    let promo = match text[4..].chars().next() {
        Some(c) => Some(PieceKind::from_letter(c)?),
        None => None,
    };
    // Coordinates name the plain move when an extended variant shares them
    legals
        .into_iter()
        .filter(|mv| {
            mv.src() == from
                && mv.dst() == to
                && !mv.is_dyad()
                && !mv.is_evolve()
                && mv.action().is_some_and(|a| {
                    matches!(
                        a,
                        Action::Ordinary { .. } | Action::EnPassant { .. } | Action::Castle { .. }
                    )
                })
                && mv.promotion_kind() == promo
        })
        .min_by_key(|mv| mv.is_shift() || mv.is_vault() || mv.is_consume())
}

#[cfg(test)]
#[path = "notation_tests.rs"]
mod notation_tests;
