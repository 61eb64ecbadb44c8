use super::*;
use crate::arcana::Arcana;
use crate::moves::MoveFlags;
use crate::royalty::RoyaltyKind;

fn sq(name: &str) -> Square {
    coord_to_sq(name).unwrap()
}

fn pos(fen: &str) -> Position {
    Position::from_fen(fen).unwrap()
}

#[test]
fn test_piece_moves() {
    let p = Position::startpos();
    assert_eq!(render(&p, Move::quiet(G1, sq("f3"))), "Ng1-f3");
    assert_eq!(
        render(&p, Move::quiet(sq("e2"), sq("e4")).with_flags(MoveFlags::DOUBLE_PUSH)),
        "e2-e4"
    );
    assert_eq!(
        render(&p, Move::quiet(G1, sq("f3")).with_flags(MoveFlags::DYAD)),
        "Ng1-f3;"
    );
    assert_eq!(
        render(&p, Move::quiet(G1, sq("f3")).with_flags(MoveFlags::EVOLVE)),
        "Ng1-f3^"
    );

    let p = pos("4k3/8/8/3n4/8/2N5/8/4K3 w - - 0 1");
    let knight = Piece::new(Color::Black, PieceKind::Knight);
    assert_eq!(render(&p, Move::capture(sq("c3"), sq("d5"), knight)), "Nc3xd5");
}

#[test]
fn test_check_marker_and_promotion() {
    let p = pos("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    assert_eq!(render(&p, Move::quiet(A1, A8)), "Ra1-a8+");

    let p = pos("8/P3k3/8/8/8/8/8/4K3 w - - 0 1");
    let queen = Piece::new(Color::White, PieceKind::Queen);
    assert_eq!(
        render(&p, Move::quiet(sq("a7"), A8).with_promotion(queen)),
        "a7-a8=Q"
    );
}

#[test]
fn test_variant_forms() {
    let p = pos("4k3/8/8/8/8/8/3N4/RN2K3 w - - 0 1");
    let white = |kind| Piece::new(Color::White, kind);

    let consume = Move::capture(sq("b1"), sq("d2"), white(PieceKind::Knight))
        .with_flags(MoveFlags::CONSUME);
    assert_eq!(render(&p, consume), "Nb1*d2");
    assert_eq!(render(&p, Move::swap(A1, sq("b1"))), "Ra1<>Nb1");
    assert_eq!(render(&p, Move::summon(sq("f3"), white(PieceKind::Knight))), "N@f3");
    assert_eq!(render(&p, Move::aura(sq("e4"), RoyaltyKind::Queen)), "Q&e4");
    assert_eq!(render(&p, Move::offering(sq("b1"), white(PieceKind::Knight))), "!Nb1");
    assert_eq!(render(&p, Move::magnet(sq("e4"))), "*e4");
    assert_eq!(
        render(&p, Move::quiet(A1, sq("b2")).with_flags(MoveFlags::SHIFT)),
        "Ra1~b2"
    );
    let victim = Piece::new(Color::Black, PieceKind::Pawn);
    assert_eq!(render(&p, Move::trample(sq("d2"), sq("f3"), victim)), "Nd2>f3");
}

#[test]
fn test_castles_and_en_passant() {
    let p = pos("4k3/8/8/3pP3/8/8/8/R3K2R w KQ d6 0 1");
    assert_eq!(render(&p, Move::castle(E1, G1, false)), "O-O");
    assert_eq!(render(&p, Move::castle(E1, C1, true)), "O-O-Ov");
    let pawn = Piece::new(Color::Black, PieceKind::Pawn);
    assert_eq!(
        render(&p, Move::en_passant(sq("e5"), sq("d6"), pawn)),
        "e5xd6ep"
    );
}

#[test]
fn test_out_of_range_is_invalid() {
    let p = Position::startpos();
    assert_eq!(render(&p, Move::quiet(NO_SQUARE, sq("e4"))), INVALID);
    assert_eq!(render(&p, Move::magnet(119)), INVALID);
}

#[test]
fn test_parse_rendered_and_coordinates() {
    let p = Position::startpos();
    let nf3 = parse_move(&p, "Ng1-f3").unwrap();
    assert_eq!((nf3.src(), nf3.dst()), (G1, sq("f3")));
    assert_eq!(parse_move(&p, "g1f3"), Some(nf3));
    let e4 = parse_move(&p, "e2e4").unwrap();
    assert!(e4.is_double_push());
    assert_eq!(parse_move(&p, "e2e5"), None);
    assert_eq!(parse_move(&p, "zz"), None);

    let p = pos("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let promo = parse_move(&p, "a7a8n").unwrap();
    assert_eq!(promo.promotion_kind(), Some(PieceKind::Knight));
}

#[test]
fn test_parse_variant_moves() {
    let mut p = pos("4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    p.ledger.grant(Color::White, Arcana::SummonKnight, 1);
    let summon = parse_move(&p, "N@f2").unwrap();
    assert_eq!(summon.kind(), crate::moves::MoveKind::Summon);
    assert_eq!(parse_move(&p, "Q@f2"), None);
}
