use super::*;
use std::str::FromStr;

#[test]
fn test_catalog_size_and_values() {
    assert_eq!(ARCANA_COUNT, 50);
    assert_eq!(Arcana::all().count(), ARCANA_COUNT);
    for key in Arcana::all() {
        assert!((1..=6).contains(&key.value()), "{key:?}");
        assert!(key.max_charges() >= 1);
    }
}

#[test]
fn test_keys_round_trip() {
    for key in Arcana::all() {
        assert_eq!(Arcana::from_str(key.key()), Ok(key));
    }
    assert_eq!(Arcana::SummonPawn.key(), "summon_pawn");
    assert_eq!(Arcana::from_str("force_en_passant"), Ok(Arcana::ForceEnPassant));
    assert!(Arcana::from_str("summon_king").is_err());
}

#[test]
fn test_passive_rules_do_not_stack() {
    let passive: Vec<Arcana> = Arcana::all()
        .filter(|key| key.group() == ArcanaGroup::Passive)
        .collect();
    assert_eq!(passive.len(), 7);
    for key in passive {
        assert!(!key.stacking());
        assert_eq!(key.max_charges(), 1);
    }
    assert!(Arcana::Swap.stacking());
    assert!(Arcana::MoriPawn.stacking());
}

#[test]
fn test_summon_and_aura_mappings_agree() {
    for key in Arcana::all() {
        if let Some(kind) = key.summoned_kind() {
            assert_eq!(Arcana::summon_for(kind), Some(key));
        }
        if let Some(kind) = key.aura_kind() {
            assert_eq!(Arcana::aura_for(kind), key);
        }
    }
    assert_eq!(Arcana::summon_for(PieceKind::King), None);
    assert_eq!(Arcana::summon_for(PieceKind::Amazon), None);
}

#[test]
fn test_reward_ladder_order() {
    let pawn: Vec<Arcana> = reward_ladder(RewardEvent::Mori, PieceKind::Pawn).collect();
    assert_eq!(
        pawn,
        [
            Arcana::MoriPawn,
            Arcana::Mori,
            Arcana::MoriDyad,
            Arcana::MoriAdvance
        ]
    );
    let queen: Vec<Arcana> = reward_ladder(RewardEvent::Gain, PieceKind::Queen).collect();
    assert_eq!(queen[0], Arcana::GainRoyal);
    let knight: Vec<Arcana> = reward_ladder(RewardEvent::Mora, PieceKind::Knight).collect();
    assert_eq!(knight, [Arcana::Mora, Arcana::MoraDyad, Arcana::MoraAdvance]);
}

#[test]
fn test_every_trigger_has_a_payout() {
    for key in Arcana::all() {
        assert_eq!(
            payout(key).is_some(),
            key.group() == ArcanaGroup::Trigger,
            "{key:?}"
        );
    }
    assert_eq!(payout(Arcana::MoraAdvance), Some(Payout::Advance));
}

#[test]
fn test_offering_codes() {
    assert_eq!(offering_code(PieceKind::King), None);
    assert_eq!(offering_code(PieceKind::Exile), None);
    assert_eq!(offering_code(PieceKind::Amazon), Some('m'));
    assert_eq!(
        offering_reward('q'),
        &[
            (Arcana::SummonRook, 1),
            (Arcana::AuraQueen, 1),
            (Arcana::Evolution, 1)
        ]
    );
    for kind in PieceKind::ALL {
        if let Some(code) = offering_code(kind) {
            assert!(!offering_reward(code).is_empty(), "{kind:?}");
        }
    }
}
