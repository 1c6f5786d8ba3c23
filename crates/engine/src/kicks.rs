//! SRS kick tables for piece rotation.
//! The zero offset is implicit: callers try the naive target first and walk
//! these candidates in order only when it is blocked.

use botrix_core::{PieceType, Rotation};

/// Kick offsets for a rotation transition, in priority order.
pub fn get_kicks(kind: PieceType, from: Rotation, to: Rotation) -> &'static [(i8, i8)] {
    let key = rotation_key(from, to);

    match kind {
        PieceType::I => get_i_kicks(key),
        PieceType::O => &[], // O rotates in place
        _ => get_jlstz_kicks(key),
    }
}

fn rotation_key(from: Rotation, to: Rotation) -> u8 {
    from as u8 * 10 + to as u8
}

/// JLSTZ kick table (guideline SRS, y up)
fn get_jlstz_kicks(key: u8) -> &'static [(i8, i8)] {
    match key {
        // CW rotations
        01 => &[(-1, 0), (-1, 1), (0, -2), (-1, -2)], // N -> E
        12 => &[(1, 0), (1, -1), (0, 2), (1, 2)],     // E -> S
        23 => &[(1, 0), (1, 1), (0, -2), (1, -2)],    // S -> W
        30 => &[(-1, 0), (-1, -1), (0, 2), (-1, 2)],  // W -> N

        // CCW rotations
        10 => &[(1, 0), (1, -1), (0, 2), (1, 2)],     // E -> N
        21 => &[(-1, 0), (-1, 1), (0, -2), (-1, -2)], // S -> E
        32 => &[(-1, 0), (-1, -1), (0, 2), (-1, 2)],  // W -> S
        03 => &[(1, 0), (1, 1), (0, -2), (1, -2)],    // N -> W

        _ => &[],
    }
}

/// I piece kick table (guideline SRS, y up)
fn get_i_kicks(key: u8) -> &'static [(i8, i8)] {
    match key {
        // CW rotations
        01 => &[(-2, 0), (1, 0), (-2, -1), (1, 2)], // N -> E
        12 => &[(-1, 0), (2, 0), (-1, 2), (2, -1)], // E -> S
        23 => &[(2, 0), (-1, 0), (2, 1), (-1, -2)], // S -> W
        30 => &[(1, 0), (-2, 0), (1, -2), (-2, 1)], // W -> N

        // CCW rotations
        10 => &[(2, 0), (-1, 0), (2, 1), (-1, -2)], // E -> N
        21 => &[(1, 0), (-2, 0), (1, -2), (-2, 1)], // S -> E
        32 => &[(-2, 0), (1, 0), (-2, -1), (1, 2)], // W -> S
        03 => &[(-1, 0), (2, 0), (-1, 2), (2, -1)], // N -> W

        _ => &[],
    }
}
