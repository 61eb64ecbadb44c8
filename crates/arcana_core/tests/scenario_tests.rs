//! End-to-end rules scenarios driven through `GameSetup` and `Game`.

use arcana_core::{
    ActionFilter, Arcana, Charge, Color, Game, GameSetup, Ledger, Mode, MoveKind, Outcome,
    PieceKind, Position, RoyaltyKind, Square, UnmakeScope, coord_to_sq, legal_moves,
};

fn sq(name: &str) -> Square {
    coord_to_sq(name).unwrap()
}

fn game(toml: &str) -> Game {
    Game::new(&GameSetup::from_toml(toml).unwrap()).unwrap()
}

#[test]
fn opening_has_twenty_moves_without_arcana() {
    let mut g = Game::standard();
    let moves = g.legal_moves(ActionFilter::Any);
    assert_eq!(moves.len(), 20);
    assert!(
        moves
            .iter()
            .all(|mv| mv.flags().is_empty() || mv.is_double_push())
    );
    assert_eq!(g.outcome(), Outcome::Ongoing);
}

#[test]
fn grant_then_revert_keeps_high_water_mark() {
    let mut ledger = Ledger::new();
    ledger.grant(Color::White, Arcana::SummonPawn, 3);
    assert_eq!(
        ledger.charge(Color::White, Arcana::SummonPawn),
        Charge { cap: 3, live: 3 }
    );
    ledger.revert(Color::White, Arcana::SummonPawn, 1);
    assert_eq!(
        ledger.charge(Color::White, Arcana::SummonPawn),
        Charge { cap: 3, live: 2 }
    );
    ledger.revert(Color::White, Arcana::SummonPawn, 5);
    assert_eq!(ledger.live(Color::White, Arcana::SummonPawn), 0);
}

#[test]
fn royalty_expires_after_its_owner_turns() {
    let mut g = game(
        r#"
[[royalties]]
square = "d4"
kind = "rook"
turns = 9
owner = "white"
"#,
    );
    let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
    for turn in 0..8 {
        g.play_text(shuffle[(turn % 2) * 2]).unwrap();
        g.play_text(shuffle[(turn % 2) * 2 + 1]).unwrap();
    }
    let (kind, aura) = g.position().board.royalty.get(sq("d4")).unwrap();
    assert_eq!((kind, aura.turns), (RoyaltyKind::Rook, 1));

    g.play_text("g1f3").unwrap();
    assert!(g.position().board.royalty.get(sq("d4")).is_none());
    assert!(g.position().board.royalty.is_empty());
}

#[test]
fn promotion_unmake_restores_pawn_and_coronation() {
    let setup = GameSetup::from_toml(
        r#"
fen = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1"

[white.arcana]
coronation = 1
"#,
    )
    .unwrap();
    let mut pos: Position = setup.build().unwrap();
    let before = pos.clone();

    let promotions: Vec<_> = legal_moves(&pos)
        .into_iter()
        .filter(|mv| mv.src() == sq("a7") && mv.promotion_kind().is_some())
        .collect();
    let amazon = promotions
        .iter()
        .copied()
        .find(|mv| mv.promotion_kind() == Some(PieceKind::Amazon))
        .unwrap();
    assert_eq!(amazon.kind(), MoveKind::Ordinary);
    assert!(amazon.captured().is_none());

    pos.make(amazon, Mode::Commit).unwrap();
    assert_eq!(pos.board.piece_at(sq("a8")).map(|p| p.kind), Some(PieceKind::Amazon));
    assert!(pos.board.piece_at(sq("a7")).is_none());
    assert!(!pos.holds(Color::White, Arcana::Coronation));

    pos.unmake(UnmakeScope::Ply).unwrap();
    assert_eq!(pos, before);
    assert_eq!(pos.board.piece_at(sq("a7")).map(|p| p.kind), Some(PieceKind::Pawn));
    assert!(pos.board.piece_at(sq("a8")).is_none());
    assert_eq!(pos.ledger.live(Color::White, Arcana::Coronation), 1);
}

#[test]
fn forced_en_passant_through_game() {
    let mut g = game(
        r#"
fen = "4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1"

[black.arcana]
force_en_passant = 1
"#,
    );
    g.play_text("d7d5").unwrap();
    let moves = g.legal_moves(ActionFilter::Any);
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].kind(), MoveKind::EnPassant);
    assert_eq!(g.play_text("e1e2"), Err(arcana_core::MoveError::NotApplicable));

    g.play_text("e5d6").unwrap();
    assert_eq!(g.log().last().unwrap().notation, "e5xd6ep");
    assert!(g.position().board.piece_at(sq("d5")).is_none());
}

#[test]
fn summon_and_undo_through_game() {
    let mut g = game(
        r#"
fen = "4k3/pppppppp/8/8/8/8/8/4K3 w - - 0 1"

[white.arcana]
summon_knight = 2
"#,
    );
    let summons = g.legal_destinations(ActionFilter::Summon(Some(PieceKind::Knight)));
    assert_eq!(summons.len(), 15);
    assert!(summons.iter().all(|&s| g.position().board.is_empty(s)));

    g.play_text("N@e2").unwrap();
    assert_eq!(g.charges(Color::White), vec![(Arcana::SummonKnight, 1)]);
    assert_eq!(g.log()[0].notation, "N@e2");

    g.undo().unwrap();
    assert_eq!(g.charges(Color::White), vec![(Arcana::SummonKnight, 2)]);
    assert!(g.position().board.is_empty(sq("e2")));
}
