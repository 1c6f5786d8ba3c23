//! perft - placement-tree counting for movegen verification and benches.
//!
//! The core stays single-threaded; the parallel entry point fans out over
//! independent board copies, one per first placement, which is the only
//! parallelism the engine's value-copy semantics allow.

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use botrix_core::{Board, PieceType};

use crate::movegen_smeared::god_movegen;

type Memo = FxHashMap<(Board, usize), u64>;

/// Number of distinct placement sequences for `queue` against `board`.
pub fn perft(board: &Board, queue: &[PieceType], depth: usize) -> u64 {
    let mut memo = Memo::default();
    perft_memo(board, queue, depth, &mut memo)
}

fn perft_memo(board: &Board, queue: &[PieceType], depth: usize, memo: &mut Memo) -> u64 {
    if depth == 0 || queue.is_empty() {
        return 1;
    }

    let moves = god_movegen(board, queue[0]);
    if depth == 1 {
        return moves.len() as u64;
    }

    if let Some(&cached) = memo.get(&(board.clone(), depth)) {
        return cached;
    }

    let mut nodes = 0u64;
    for piece in &moves {
        let mut next = board.clone();
        next.set_piece(piece);
        next.clear_lines();
        nodes += perft_memo(&next, &queue[1..], depth - 1, memo);
    }

    memo.insert((board.clone(), depth), nodes);
    nodes
}

/// Same count, with the first ply split across threads. Each task owns its
/// board copy and memo table; nothing is shared.
pub fn perft_parallel(board: &Board, queue: &[PieceType], depth: usize) -> u64 {
    if depth <= 1 || queue.is_empty() {
        return perft(board, queue, depth);
    }

    let moves = god_movegen(board, queue[0]);
    moves
        .to_vec()
        .into_par_iter()
        .map(|piece| {
            let mut next = board.clone();
            next.set_piece(&piece);
            next.clear_lines();
            let mut memo = Memo::default();
            perft_memo(&next, &queue[1..], depth - 1, &mut memo)
        })
        .sum()
}
