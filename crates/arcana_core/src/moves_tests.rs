use super::*;
use crate::types::{Color, E1, G1, H8, coord_to_sq};

fn sq(name: &str) -> Square {
    coord_to_sq(name).unwrap()
}

#[test]
fn test_fields_do_not_overlap() {
    let victim = Piece::new(Color::Black, PieceKind::Exile);
    let promo = Piece::new(Color::White, PieceKind::Amazon);
    let flags = MoveFlags::SHIFT | MoveFlags::DYAD | MoveFlags::EVOLVE | MoveFlags::CONSUME;
    let mv = Move::encode(H8, sq("a1"), victim.code(), promo.code(), MoveKind::Trample, flags);

    assert_eq!(mv.src(), H8);
    assert_eq!(mv.dst(), sq("a1"));
    assert_eq!(mv.captured(), Some(victim));
    assert_eq!(mv.promoted(), Some(promo));
    assert_eq!(mv.kind(), MoveKind::Trample);
    assert_eq!(mv.flags(), flags);
}

#[test]
fn test_ordinary_promotion_decodes() {
    let victim = Piece::new(Color::Black, PieceKind::Rook);
    let queen = Piece::new(Color::White, PieceKind::Queen);
    let mv = Move::capture(sq("g7"), H8, victim).with_promotion(queen);

    assert_eq!(
        mv.action(),
        Some(Action::Ordinary {
            from: sq("g7"),
            to: H8,
            captured: Some(victim),
            promotion: Some(queen),
        })
    );
    assert_eq!(mv.promotion_kind(), Some(PieceKind::Queen));
    assert!(mv.is_capture());
}

#[test]
fn test_summon_and_aura_share_channel_without_collision() {
    let knight = Piece::new(Color::White, PieceKind::Knight);
    let summon = Move::summon(sq("f3"), knight);
    let aura = Move::aura(sq("f3"), RoyaltyKind::Knight);

    assert_eq!(summon.dst(), NO_SQUARE);
    assert_eq!(
        summon.action(),
        Some(Action::Summon {
            square: sq("f3"),
            piece: knight
        })
    );
    assert_eq!(
        aura.action(),
        Some(Action::Aura {
            square: sq("f3"),
            kind: RoyaltyKind::Knight
        })
    );
    assert_ne!(summon, aura);
    assert_eq!(summon.promotion_kind(), None);
}

#[test]
fn test_shared_flag_bits_read_by_kind() {
    let vault = Move::castle(E1, G1, true);
    assert!(vault.is_vault());
    assert!(!vault.is_shift());

    let shift = Move::quiet(sq("a1"), sq("b2")).with_flags(MoveFlags::SHIFT);
    assert!(shift.is_shift());
    assert!(!shift.is_vault());

    let push = Move::quiet(sq("e2"), sq("e4")).with_flags(MoveFlags::DOUBLE_PUSH);
    assert!(push.is_double_push());
    assert!(!push.is_consume());
}

#[test]
fn test_from_raw_rejects_unknown_kind() {
    let mv = Move::magnet(sq("d4"));
    assert_eq!(Move::from_raw(mv.raw()), Some(mv));
    assert_eq!(Move::from_raw(0x0f00_0000), None);
}

#[test]
fn test_action_rejects_empty_channels() {
    let bad_summon = Move::encode(sq("c3"), NO_SQUARE, 0, 0, MoveKind::Summon, MoveFlags::empty());
    let bad_aura = Move::encode(sq("c3"), NO_SQUARE, 0, 0, MoveKind::Aura, MoveFlags::empty());
    let bad_offer = Move::encode(sq("c3"), NO_SQUARE, 0, 0, MoveKind::Offering, MoveFlags::empty());
    assert_eq!(bad_summon.action(), None);
    assert_eq!(bad_aura.action(), None);
    assert_eq!(bad_offer.action(), None);
}
