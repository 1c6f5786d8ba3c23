//! Bit-parallel exhaustive move generation.
//!
//! Reachability is tracked per (rotation, anchor column) as a u32 mask of
//! anchor rows, so a whole column of candidate positions is dropped,
//! shifted sideways and collision-tested in a handful of word ops. A
//! worklist of dirty (rotation, column) cells is relaxed until no pass
//! discovers a new state, which terminates because the state space is
//! finite and bits are only ever added.
//!
//! `movegen` seeds every rotation that fits at the spawn anchor and relaxes
//! with translation edges only. `god_movegen` adds kick-aware rotation
//! edges and therefore reaches every placement any finite sequence of the
//! five atomic movements can produce.

use botrix_core::{
    canonical_rotation, Board, Coord, Piece, PieceType, Rotation, SPAWN_X, SPAWN_Y,
};

use crate::collision_map::CollisionMap;
use crate::kicks::get_kicks;
use crate::move_list::MoveList;
use crate::movement::detect_spin;

const ROTATIONS: [Rotation; 4] = [
    Rotation::North,
    Rotation::East,
    Rotation::South,
    Rotation::West,
];

/// Project a row mask by a vertical kick offset.
#[inline(always)]
fn shift_y(mask: u32, dy: i8) -> u32 {
    if dy > 0 {
        mask << dy as u32
    } else if dy < 0 {
        mask >> (-dy) as u32
    } else {
        mask
    }
}

/// Placements reachable by choosing a rotation at spawn, then moving,
/// dropping and tucking. No rotations are attempted once the piece is in
/// the stack, so kick-dependent spins are out of reach.
pub fn movegen(board: &Board, kind: PieceType) -> MoveList {
    smear(board, kind, false)
}

/// Full fixed-point closure over all five atomic movements: every legal
/// movement sequence's final placement appears exactly once.
pub fn god_movegen(board: &Board, kind: PieceType) -> MoveList {
    smear(board, kind, true)
}

fn smear(board: &Board, kind: PieceType, with_rotations: bool) -> MoveList {
    if kind == PieceType::Empty {
        return MoveList::new();
    }

    let collision = CollisionMap::new(board, kind);
    if collision.collides(Rotation::North, SPAWN_X, SPAWN_Y) {
        // no legal spawn: an empty result is the topout signal
        return MoveList::new();
    }

    let mut to_search = [[0u32; 14]; 4];
    let mut searched = [[0u32; 14]; 4];

    // blocked cells start out "searched" so projections never queue them
    for (rot, rotation) in ROTATIONS.into_iter().enumerate() {
        for x_idx in 0..14 {
            searched[rot][x_idx] = collision.get_column(rotation, x_idx as i8 - 2);
        }
    }

    let spawn_bit = 1u32 << SPAWN_Y as u32;
    let spawn_x_idx = (SPAWN_X + 2) as usize;
    let mut remaining: u64 = 0;

    if with_rotations {
        to_search[0][spawn_x_idx] = spawn_bit;
        remaining |= 1 << (spawn_x_idx * 4);
    } else {
        for (rot, rotation) in ROTATIONS.into_iter().enumerate() {
            if !collision.collides(rotation, SPAWN_X, SPAWN_Y) {
                to_search[rot][spawn_x_idx] = spawn_bit;
                remaining |= 1 << (spawn_x_idx * 4 + rot);
            }
        }
    }

    let mut move_set = [[0u32; 14]; 4];

    while remaining != 0 {
        let index = remaining.trailing_zeros() as usize;
        let x_idx = index / 4;
        let rot = index % 4;
        let x = x_idx as i8 - 2;
        let rotation = ROTATIONS[rot];

        let mut current = to_search[rot][x_idx];
        if current == 0 {
            remaining &= !(1u64 << index);
            continue;
        }

        let blocked = collision.get_column(rotation, x);

        // sonic-drop closure within the column
        let mut dropped = (current >> 1) & !blocked;
        while (dropped & current) != dropped {
            current |= dropped;
            dropped |= (dropped >> 1) & !blocked;
        }
        to_search[rot][x_idx] = current;

        // positions whose next downward step is blocked can lock here
        let lock_mask = (blocked << 1) | 1;
        move_set[rot][x_idx] |= current & lock_mask & !blocked;

        // lateral projection
        for step in [-1i8, 1] {
            let nx = x + step;
            let n_idx = nx + 2;
            if !(0..14).contains(&n_idx) {
                continue;
            }
            let n_idx = n_idx as usize;
            let n_blocked = collision.get_column(rotation, nx);
            let new_bits = current & !n_blocked & !searched[rot][n_idx];
            if new_bits != 0 {
                to_search[rot][n_idx] |= new_bits;
                remaining |= 1u64 << (n_idx * 4 + rot);
            }
        }

        if with_rotations {
            for to_rot in [rotation.cw(), rotation.ccw()] {
                propagate_rotation(
                    &mut to_search,
                    &searched,
                    &collision,
                    kind,
                    rotation,
                    to_rot,
                    x_idx,
                    current,
                    &mut remaining,
                );
            }
        }

        searched[rot][x_idx] |= current;
        to_search[rot][x_idx] = 0;
        remaining &= !(1u64 << index);
    }

    extract_placements(board, kind, &move_set)
}

/// Kick candidates applied in table order with first-valid semantics:
/// source positions whose rotation already resolved at an earlier offset
/// are subtracted before the next candidate is tried.
#[allow(clippy::too_many_arguments)]
#[inline]
fn propagate_rotation(
    to_search: &mut [[u32; 14]; 4],
    searched: &[[u32; 14]; 4],
    collision: &CollisionMap,
    kind: PieceType,
    from_rot: Rotation,
    to_rot: Rotation,
    src_x_idx: usize,
    source: u32,
    remaining: &mut u64,
) {
    let mut current = source;
    if current == 0 {
        return;
    }

    let src_x = src_x_idx as i8 - 2;
    let to_rot_idx = to_rot as usize;
    let kicks = get_kicks(kind, from_rot, to_rot);

    for (dx, dy) in std::iter::once((0i8, 0i8)).chain(kicks.iter().copied()) {
        let target_x = src_x + dx;
        let target_idx = target_x + 2;
        if !(0..14).contains(&target_idx) {
            continue;
        }
        let target_idx = target_idx as usize;

        let target_blocked = collision.get_column(to_rot, target_x);
        let projected = shift_y(current, dy);
        let valid = projected & !target_blocked;

        let new_bits = valid & !searched[to_rot_idx][target_idx];
        if new_bits != 0 {
            to_search[to_rot_idx][target_idx] |= new_bits;
            *remaining |= 1u64 << (target_idx * 4 + to_rot_idx);
        }

        current &= !shift_y(valid, -dy);
        if current == 0 {
            break;
        }
    }
}

/// Walk the lock masks, fold symmetric rotations onto their canonical
/// shape, and classify spin at the landing cells.
fn extract_placements(board: &Board, kind: PieceType, move_set: &[[u32; 14]; 4]) -> MoveList {
    let mut moves = MoveList::new();
    let mut seen = [[0u32; 14]; 4];

    for (rot, rotation) in ROTATIONS.into_iter().enumerate() {
        let (canon_rot, off_x, off_y) = canonical_rotation(kind, rotation);
        let canon_rot_idx = canon_rot as usize;

        for x_idx in 0..14 {
            let locked = move_set[rot][x_idx];
            if locked == 0 {
                continue;
            }

            let x = x_idx as i8 - 2;
            let canon_x = x + off_x;
            let canon_idx = canon_x + 2;
            if !(0..14).contains(&canon_idx) {
                continue;
            }
            let canon_idx = canon_idx as usize;

            let shifted = shift_y(locked, off_y);
            let mut new_bits = shifted & !seen[canon_rot_idx][canon_idx];
            seen[canon_rot_idx][canon_idx] |= shifted;

            while new_bits != 0 {
                let y = new_bits.trailing_zeros() as i8;
                new_bits &= new_bits - 1;

                let spin = detect_spin(board, kind, canon_rot, canon_x, y);
                moves.push(Piece::from_parts(
                    kind,
                    canon_rot,
                    Coord::new(canon_x, y),
                    spin,
                ));
            }
        }
    }

    moves
}
