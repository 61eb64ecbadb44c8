use super::*;

#[test]
fn test_mailbox_corners() {
    assert_eq!(square(0, 0), Some(A1));
    assert_eq!(square(7, 0), Some(H1));
    assert_eq!(square(0, 7), Some(A8));
    assert_eq!(square(7, 7), Some(H8));
    assert_eq!(square(8, 0), None);
    assert_eq!(index64(A1), Some(0));
    assert_eq!(index64(H8), Some(63));
    assert_eq!(index64(NO_SQUARE), None);
}

#[test]
fn test_playable_squares_cover_board() {
    let all: Vec<Square> = playable_squares().collect();
    assert_eq!(all.len(), 64);
    assert!(all.iter().all(|&sq| is_playable(sq)));
    assert_eq!(all.iter().filter(|&&sq| !is_playable(sq)).count(), 0);
    assert!(!is_playable(20));
    assert!(!is_playable(29));
    assert!(!is_playable(119));
}

#[test]
fn test_offset_stays_on_board() {
    // Knight from a1 reaches only b3 and c2
    let knight = [
        (1, 2),
        (2, 1),
        (-1, 2),
        (-2, 1),
        (1, -2),
        (2, -1),
        (-1, -2),
        (-2, -1),
    ];
    let reach: Vec<Square> = knight.iter().filter_map(|&d| offset(A1, d)).collect();
    assert_eq!(reach.len(), 2);
    assert!(reach.contains(&coord_to_sq("b3").unwrap()));
    assert!(reach.contains(&coord_to_sq("c2").unwrap()));
}

#[test]
fn test_offset_rejects_wide_wrap() {
    // A (3, 1) leap from h1 would land on a3 without the file check
    assert_eq!(offset(H1, (3, 1)), None);
    assert_eq!(offset(A1, (3, 1)), coord_to_sq("d2"));
    assert_eq!(offset(A1, (-1, -3)), None);
    assert_eq!(offset(H8, (1, 3)), None);
}

#[test]
fn test_coords_round_trip() {
    for sq in playable_squares() {
        let text = sq_to_coord(sq).unwrap();
        assert_eq!(coord_to_sq(&text), Some(sq));
    }
    assert_eq!(sq_to_coord(NO_SQUARE), None);
    assert_eq!(coord_to_sq("i9"), None);
}

#[test]
fn test_piece_codes_are_distinct() {
    let mut seen = std::collections::HashSet::new();
    for color in Color::ALL {
        for kind in PieceKind::ALL {
            let piece = Piece::new(color, kind);
            let code = piece.code();
            assert!(code > 0 && code < 32);
            assert!(seen.insert(code));
            assert_eq!(Piece::from_code(code), Some(piece));
            assert_eq!(Piece::from_letter(piece.letter()), Some(piece));
        }
    }
    assert_eq!(Piece::from_code(0), None);
    assert_eq!(Piece::from_code(31), None);
}

#[test]
fn test_relative_rank() {
    assert_eq!(Color::White.relative_rank(7), 7);
    assert_eq!(Color::Black.relative_rank(0), 7);
    assert_eq!(Color::Black.relative_rank(6), 1);
}

#[test]
fn test_evolution_chain_ends_at_queen() {
    let mut kind = PieceKind::Pawn;
    let mut steps = 0;
    while let Some(next) = kind.evolves_to() {
        assert!(next.value() > kind.value());
        kind = next;
        steps += 1;
    }
    assert_eq!(kind, PieceKind::Queen);
    assert_eq!(steps, 6);
}
