//! Height-map move generation: the skyline walk and the convex fast path.
//!
//! Both enumerate placements reachable by lateral movement above the stack
//! plus a single sonic drop per column. `convex_movegen` additionally
//! assumes `Board::is_convex()` and reads landing rows straight off the
//! column-height profile instead of probing collisions during the drop.

use rustc_hash::FxHashSet;

use botrix_core::{
    mino_offsets, Board, Coord, Piece, PieceType, Rotation, SPAWN_X, SPAWN_Y,
};

use crate::collision::{can_place, hard_drop_y};
use crate::move_list::MoveList;
use crate::movement::detect_spin;

const ROTATIONS: [Rotation; 4] = [
    Rotation::North,
    Rotation::East,
    Rotation::South,
    Rotation::West,
];

#[inline]
fn push_unique(moves: &mut MoveList, seen: &mut FxHashSet<u32>, piece: Piece) {
    if seen.insert(piece.compact_hash()) {
        moves.push(piece);
    }
}

#[inline]
fn land(board: &Board, kind: PieceType, rotation: Rotation, x: i8, y: i8) -> Piece {
    let spin = detect_spin(board, kind, rotation, x, y);
    Piece::from_parts(kind, rotation, Coord::new(x, y), spin)
}

/// Skyline search: valid for any board. For each rotation legal at the
/// spawn anchor, walk left and right while the sky row is clear and sonic
/// drop each column once. Placements that require moving or rotating after
/// the drop are not discovered here.
pub fn sky_piece_movegen(board: &Board, kind: PieceType) -> MoveList {
    let mut moves = MoveList::new();
    if kind == PieceType::Empty || !can_place(board, kind, Rotation::North, SPAWN_X, SPAWN_Y) {
        return moves;
    }

    let mut seen = FxHashSet::default();
    for rotation in ROTATIONS {
        if !can_place(board, kind, rotation, SPAWN_X, SPAWN_Y) {
            continue;
        }

        let mut x = SPAWN_X;
        while can_place(board, kind, rotation, x - 1, SPAWN_Y) {
            x -= 1;
        }
        while can_place(board, kind, rotation, x, SPAWN_Y) {
            let y = hard_drop_y(board, kind, rotation, x, SPAWN_Y);
            push_unique(&mut moves, &mut seen, land(board, kind, rotation, x, y));
            x += 1;
        }
    }

    moves
}

/// Convex fast path: precondition `board.is_convex()` (the caller gates on
/// it). The monotone silhouette lets the landing row be computed as a max
/// over per-column heights - one linear scan per rotation, no collision
/// probing on the way down.
pub fn convex_movegen(board: &Board, kind: PieceType) -> MoveList {
    let mut moves = MoveList::new();
    if kind == PieceType::Empty || !can_place(board, kind, Rotation::North, SPAWN_X, SPAWN_Y) {
        return moves;
    }

    let heights = board.heights();
    let mut seen = FxHashSet::default();

    for rotation in ROTATIONS {
        let minos = mino_offsets(kind, rotation);
        'column: for x in -2..(Board::WIDTH as i8 + 2) {
            let mut y = i8::MIN;
            let mut top = i8::MIN;
            for mino in minos {
                let nx = x + mino.x;
                if nx < 0 || nx >= Board::WIDTH as i8 {
                    continue 'column;
                }
                y = y.max(heights[nx as usize] as i8 - mino.y);
                top = top.max(mino.y);
            }
            if y + top >= Board::HEIGHT as i8 {
                continue;
            }
            push_unique(&mut moves, &mut seen, land(board, kind, rotation, x, y));
        }
    }

    moves
}
