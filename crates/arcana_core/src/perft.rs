use crate::{
    history::{Mode, UnmakeScope},
    movegen::{GenRequest, legal_moves_into},
    moves::Move,
    position::Position,
};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`, using
/// board-only makes so the ledger is never touched.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }

    fn inner(pos: &mut Position, depth: u8, layers: &mut [Vec<Move>]) -> u64 {
        if depth == 0 {
            return 1;
        }
        let Some((buf, rest)) = layers.split_first_mut() else {
            return 0;
        };

        legal_moves_into(pos, &GenRequest::default(), buf);
        if depth == 1 {
            return buf.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in buf.iter().copied() {
            if pos.make(mv, Mode::Provisional).is_err() {
                continue;
            }
            nodes += inner(pos, depth - 1, rest);
            let undone = pos.unmake(UnmakeScope::Ply);
            debug_assert_eq!(undone, Ok(mv));
        }
        nodes
    }

    let mut layers = vec![Vec::with_capacity(64); depth as usize];
    inner(pos, depth, &mut layers[..])
}

/// Per-move node counts at `depth`, for comparing against other tools.
pub fn divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    let mut moves = Vec::new();
    legal_moves_into(pos, &GenRequest::default(), &mut moves);
    let mut counts = Vec::with_capacity(moves.len());
    for mv in moves {
        if pos.make(mv, Mode::Provisional).is_err() {
            continue;
        }
        let nodes = perft(pos, depth.saturating_sub(1));
        let undone = pos.unmake(UnmakeScope::Ply);
        debug_assert_eq!(undone, Ok(mv));
        counts.push((mv, nodes));
    }
    counts
}
