use std::collections::HashSet;

use super::*;
use crate::types::{A1, Color, H8, NO_SQUARE};

#[test]
fn test_no_two_keys_collide() {
    let keys = ZobristKeys::new();
    let all: Vec<u64> = keys
        .pieces
        .iter()
        .chain(&keys.castling)
        .chain(&keys.en_passant)
        .copied()
        .chain([keys.side_to_move])
        .collect();
    assert_eq!(all.len(), PIECE_KEYS + 13);
    let unique: HashSet<u64> = all.iter().copied().collect();
    assert_eq!(unique.len(), all.len());
    assert!(!unique.contains(&0));
}

#[test]
fn test_static_table_matches_fresh_table() {
    let fresh = ZobristKeys::default();
    assert_eq!(fresh.side_to_move, ZOBRIST.side_to_move);
    assert_eq!(fresh.pieces, ZOBRIST.pieces);
}

#[test]
fn test_piece_keys_by_color_kind_and_square() {
    let ghost = Piece::new(Color::Black, PieceKind::Ghost);
    let white_ghost = Piece::new(Color::White, PieceKind::Ghost);
    assert_ne!(ZOBRIST.piece_key(ghost, A1), ZOBRIST.piece_key(ghost, H8));
    assert_ne!(ZOBRIST.piece_key(ghost, A1), ZOBRIST.piece_key(white_ghost, A1));
    assert_eq!(ZOBRIST.piece_key(ghost, NO_SQUARE), 0);
    assert_eq!(ZOBRIST.ep_key(3), ZOBRIST.ep_key(11));
}
