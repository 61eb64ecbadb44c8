use super::*;
use crate::error::FenError;
use crate::fen::START_FEN;

fn sq(name: &str) -> Square {
    coord_to_sq(name).unwrap()
}

#[test]
fn test_startpos_matches_fen() {
    let built = Board::startpos();
    let parsed = Board::from_fen(START_FEN).unwrap();
    assert_eq!(built, parsed);
    assert_eq!(built.hash(), built.compute_hash());
    assert_eq!(built.to_fen(), START_FEN);
}

#[test]
fn test_fen_round_trip_with_variant_letters() {
    let fen = "r1m1k2r/pgh2ppp/8/3X4/4a3/2C5/PPPG1PPP/R3K2R b KQk e3 12 30";
    let board = Board::from_fen(fen).unwrap();
    assert_eq!(board.to_fen(), fen);
    assert_eq!(
        board.piece_at(sq("d5")),
        Some(Piece::new(Color::White, PieceKind::Exile))
    );
    assert_eq!(board.pieces(Color::Black, PieceKind::Amazon), &[sq("c8")]);
    assert_eq!(board.ep(), Some(sq("e3")));
    assert_eq!(board.hash(), board.compute_hash());
}

#[test]
fn test_fen_rejects_bad_input() {
    assert_eq!(
        Board::from_fen("8/8/8 w - -"),
        Err(FenError::RankCount(3))
    );
    assert_eq!(
        Board::from_fen("8/8/8/8/8/8/8/8 w"),
        Err(FenError::MissingFields(2))
    );
    assert!(matches!(
        Board::from_fen("9/8/8/8/8/8/8/8 w - -"),
        Err(FenError::RankWidth { .. })
    ));
    assert_eq!(
        Board::from_fen("8/8/8/8/8/8/8/7z w - -"),
        Err(FenError::PieceLetter('z'))
    );
    assert!(matches!(
        Board::from_fen("8/8/8/8/8/8/8/8 x - -"),
        Err(FenError::SideToMove(_))
    ));
}

#[test]
fn test_lists_stay_sorted() {
    let mut board = Board::new();
    let knight = Piece::new(Color::White, PieceKind::Knight);
    for name in ["g1", "b1", "e5", "a8"] {
        board.place(sq(name), knight).unwrap();
    }
    let list = board.pieces(Color::White, PieceKind::Knight);
    assert!(list.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(list.len(), 4);
    assert_eq!(board.material(Color::White), 4 * PieceKind::Knight.value());
}

#[test]
fn test_checked_mutations_validate_squares() {
    let mut board = Board::startpos();
    let pawn = Piece::new(Color::White, PieceKind::Pawn);
    let before = board.clone();

    assert_eq!(board.place(0, pawn), Err(BoardError::InvalidSquare(0)));
    assert_eq!(board.place(A1, pawn), Err(BoardError::Occupied(A1)));
    assert_eq!(board.remove(sq("e4")), Err(BoardError::Empty(sq("e4"))));
    assert_eq!(board.relocate(A1, 119), Err(BoardError::InvalidSquare(119)));
    assert_eq!(board.relocate(A1, H1), Err(BoardError::Occupied(H1)));
    assert_eq!(board, before);

    board.relocate(sq("e2"), sq("e4")).unwrap();
    assert_eq!(board.piece_at(sq("e4")), Some(pawn));
    assert_eq!(board.hash(), board.compute_hash());
}

#[test]
fn test_castle_mask() {
    let mut board = Board::startpos();
    board.apply_castle_mask(H1);
    assert_eq!(
        board.castling(),
        CastleRights::WQ | CastleRights::BK | CastleRights::BQ
    );
    board.apply_castle_mask(E8);
    assert_eq!(board.castling(), CastleRights::WQ);
    assert_eq!(board.hash(), board.compute_hash());
}
