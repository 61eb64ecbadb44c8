//! Property tests for make/unmake over random playouts.
//!
//! Each case hands both sides a random arcana pool, plays random legal
//! moves in commit mode and then takes everything back.

use arcana_core::{
    ARCANA_COUNT, Arcana, Color, Mode, Position, UnmakeScope, legal_moves,
};
use proptest::prelude::*;

fn pool_strategy() -> impl Strategy<Value = Vec<(usize, u8)>> {
    prop::collection::vec((0..ARCANA_COUNT, 1u8..=3), 0..10)
}

fn grant_pool(pos: &mut Position, color: Color, pool: &[(usize, u8)]) {
    for &(idx, qty) in pool {
        if let Some(key) = Arcana::all().nth(idx) {
            pos.ledger.grant(color, key, qty);
        }
    }
}

/// Plays up to `choices.len()` random legal moves and returns how many
/// plies were made.
fn playout(pos: &mut Position, choices: &[usize], mode: Mode) -> usize {
    let mut made = 0;
    for &choice in choices {
        let moves = legal_moves(pos);
        if moves.is_empty() {
            break;
        }
        let mv = moves[choice % moves.len()];
        pos.make(mv, mode)
            .unwrap_or_else(|e| panic!("generated move {mv:?} rejected: {e}"));
        assert_eq!(pos.board.hash(), pos.board.compute_hash(), "{mv:?}");
        made += 1;
    }
    made
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn commit_playout_unwinds_to_start(
        white in pool_strategy(),
        black in pool_strategy(),
        choices in prop::collection::vec(any::<usize>(), 1..32),
    ) {
        let mut pos = Position::startpos();
        grant_pool(&mut pos, Color::White, &white);
        grant_pool(&mut pos, Color::Black, &black);
        let start = pos.clone();

        let made = playout(&mut pos, &choices, Mode::Commit);
        prop_assert_eq!(pos.ply_count(), made);
        for _ in 0..made {
            prop_assert!(pos.unmake(UnmakeScope::Ply).is_ok());
        }

        prop_assert_eq!(pos.board.hash(), start.board.hash());
        prop_assert_eq!(&pos, &start);
        prop_assert!(pos.unmake(UnmakeScope::Ply).is_err());
    }

    #[test]
    fn provisional_playout_never_touches_ledger(
        white in pool_strategy(),
        choices in prop::collection::vec(any::<usize>(), 1..24),
    ) {
        let mut pos = Position::startpos();
        grant_pool(&mut pos, Color::White, &white);
        let ledger = pos.ledger.clone();

        let made = playout(&mut pos, &choices, Mode::Provisional);
        prop_assert_eq!(&pos.ledger, &ledger);
        for _ in 0..made {
            prop_assert!(pos.unmake(UnmakeScope::Ply).is_ok());
        }
        prop_assert_eq!(pos.board, Position::startpos().board);
    }

    #[test]
    fn turn_undo_matches_ply_undo(
        white in pool_strategy(),
        black in pool_strategy(),
        choices in prop::collection::vec(any::<usize>(), 1..24),
    ) {
        let mut pos = Position::startpos();
        grant_pool(&mut pos, Color::White, &white);
        grant_pool(&mut pos, Color::Black, &black);
        let start = pos.clone();

        playout(&mut pos, &choices, Mode::Commit);
        while pos.ply_count() > 0 {
            let before = pos.ply_count();
            prop_assert!(pos.unmake(UnmakeScope::Turn).is_ok());
            let reverted = before - pos.ply_count();
            prop_assert!(reverted == 1 || reverted == 2);
        }
        prop_assert_eq!(&pos, &start);
    }
}
