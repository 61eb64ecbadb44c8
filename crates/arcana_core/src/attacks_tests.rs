use super::*;
use crate::royalty::Aura;

fn sq(name: &str) -> Square {
    coord_to_sq(name).unwrap()
}

fn board(fen: &str) -> Board {
    Board::from_fen(fen).unwrap()
}

#[test]
fn test_orthodox_attacks() {
    let b = board("4k3/8/8/3r4/8/8/8/4K2N w - - 0 1");
    let ledger = Ledger::new();
    assert!(is_attacked(&b, &ledger, sq("d1"), Color::Black));
    assert!(is_attacked(&b, &ledger, sq("a5"), Color::Black));
    assert!(!is_attacked(&b, &ledger, sq("e4"), Color::Black));
    assert!(is_attacked(&b, &ledger, sq("g3"), Color::White));
    assert!(!in_check(&b, &ledger, Color::White));
}

#[test]
fn test_stasis_silences_attacker() {
    let mut b = board("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1");
    let ledger = Ledger::new();
    assert!(in_check(&b, &ledger, Color::White));

    let aura = Aura {
        turns: 3,
        owner: Color::White,
    };
    b.royalty.assign(sq("e2"), RoyaltyKind::Stasis, aura);
    assert!(!in_check(&b, &ledger, Color::White));
}

#[test]
fn test_aegis_blocks_capture() {
    let mut b = board("4k3/8/8/8/8/8/4r3/4K3 w - - 0 1");
    let ledger = Ledger::new();
    let aura = Aura {
        turns: 1,
        owner: Color::White,
    };
    b.royalty.assign(E1, RoyaltyKind::Aegis, aura);
    assert!(!in_check(&b, &ledger, Color::White));
}

#[test]
fn test_royalty_changes_attack_pattern() {
    let mut b = board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1");
    let ledger = Ledger::new();
    assert!(is_attacked(&b, &ledger, sq("a7"), Color::White));

    let aura = Aura {
        turns: 2,
        owner: Color::White,
    };
    b.royalty.assign(A1, RoyaltyKind::Knight, aura);
    assert!(!is_attacked(&b, &ledger, sq("a7"), Color::White));
    assert!(is_attacked(&b, &ledger, sq("b3"), Color::White));
}

#[test]
fn test_exile_needs_unbind() {
    let b = board("4k3/8/8/8/8/8/3x4/4K3 w - - 0 1");
    let mut ledger = Ledger::new();
    let exile = Piece::new(Color::Black, PieceKind::Exile);
    let king = Piece::new(Color::White, PieceKind::King);

    assert!(!in_check(&b, &ledger, Color::White));
    assert_eq!(may_capture(&b, &ledger, king, sq("d2")), Capture::Blocked);

    ledger.grant(Color::Black, Arcana::Unbind, 1);
    assert!(in_check(&b, &ledger, Color::White));
    assert_eq!(may_capture(&b, &ledger, king, sq("d2")), Capture::Blocked);

    ledger.grant(Color::White, Arcana::Unbind, 1);
    assert_eq!(may_capture(&b, &ledger, king, sq("d2")), Capture::Enemy(exile));
}

#[test]
fn test_consume_rules() {
    let b = board("4k3/8/8/8/8/8/3QN3/3NK3 w - - 0 1");
    let mut ledger = Ledger::new();
    let knight = Piece::new(Color::White, PieceKind::Knight);

    assert_eq!(may_capture(&b, &ledger, knight, sq("e2")), Capture::Blocked);
    ledger.grant(Color::White, Arcana::Consume, 1);
    assert_eq!(may_capture(&b, &ledger, knight, sq("e2")), Capture::Own(knight));
    // Royal pieces are never consumed
    assert_eq!(may_capture(&b, &ledger, knight, sq("d2")), Capture::Blocked);
    assert_eq!(may_capture(&b, &ledger, knight, E1), Capture::Blocked);
}

#[test]
fn test_shift_and_hop_attacks_need_charges() {
    let b = board("8/8/8/8/8/5k2/8/4K3 b - - 0 1");
    let mut ledger = Ledger::new();
    assert!(!is_attacked(&b, &ledger, sq("f3"), Color::White));
    ledger.grant(Color::White, Arcana::HybridHop, 1);
    assert!(is_attacked(&b, &ledger, sq("f3"), Color::White));
}

#[test]
fn test_trample_never_counts_against_king() {
    let b = board("8/8/8/8/8/8/8/k1G1K3 w - - 0 1");
    let mut ledger = Ledger::new();
    ledger.grant(Color::White, Arcana::Trample, 1);
    assert!(!in_check(&b, &ledger, Color::Black));

    let b = board("8/8/8/8/8/8/8/n1G1K2k w - - 0 1");
    assert!(is_attacked(&b, &ledger, A1, Color::White));
}
