use super::*;
use crate::royalty::Aura;
use crate::types::{E1, coord_to_sq, offset};

#[test]
fn test_royalty_replaces_native_gait() {
    let mut board = Board::new();
    let ghost = Piece::new(Color::White, PieceKind::Ghost);
    board.place(E1, ghost).unwrap();
    assert_eq!(gait_at(&board, E1, ghost), native_gait(ghost));

    let aura = Aura {
        turns: 2,
        owner: Color::White,
    };
    board.royalty.assign(E1, RoyaltyKind::Rook, aura);
    assert_eq!(
        gait_at(&board, E1, ghost),
        Gait::Pattern {
            leaps: &[],
            rides: &ORTHOGONAL,
            captures: true
        }
    );
    assert!(!has_native_gait(&board, E1));

    board.royalty.assign(E1, RoyaltyKind::Stasis, aura);
    assert_eq!(gait_at(&board, E1, ghost), Gait::Frozen);

    board.royalty.assign(E1, RoyaltyKind::Aegis, aura);
    assert_eq!(gait_at(&board, E1, ghost), native_gait(ghost));
    assert!(has_native_gait(&board, E1));
}

#[test]
fn test_camel_leaps_from_corner() {
    let a1 = coord_to_sq("a1").unwrap();
    let reach: Vec<_> = CAMEL.iter().filter_map(|&d| offset(a1, d)).collect();
    assert_eq!(reach, vec![coord_to_sq("b4").unwrap(), coord_to_sq("d2").unwrap()]);
}

#[test]
fn test_extensions_map_to_shift_keys() {
    let king = Piece::new(Color::Black, PieceKind::King);
    let ghost = Piece::new(Color::Black, PieceKind::Ghost);
    let queen = Piece::new(Color::Black, PieceKind::Queen);

    assert_eq!(extension(king).map(|e| e.key), Some(Arcana::HybridHop));
    assert_eq!(extension(ghost).map(|e| e.captures), Some(false));
    assert_eq!(extension(queen), None);

    let black_pawn = extension(Piece::new(Color::Black, PieceKind::Pawn)).unwrap();
    assert!(black_pawn.steps.contains(&(0, 1)));
}
