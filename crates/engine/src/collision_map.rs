//! Precomputed collision maps - single bitcheck instead of 4 mino lookups.
//! Built once per (board, kind) query and consumed by the smeared search.

use botrix_core::{mino_offsets, Board, PieceType, Rotation};

const ROTATIONS: [Rotation; 4] = [
    Rotation::North,
    Rotation::East,
    Rotation::South,
    Rotation::West,
];

/// Per-kind collision lookup - [rotation][x+2] -> u32 of blocked anchor rows.
/// Anchors are indexed over x in -2..=11 so every kick target stays in range.
#[derive(Clone)]
pub struct CollisionMap {
    map: [[u32; 14]; 4],
}

impl CollisionMap {
    /// Build by OR-ing the four shifted column words per anchor column,
    /// saturating at walls, floor and buffer ceiling.
    pub fn new(board: &Board, kind: PieceType) -> Self {
        let mut map = [[0u32; 14]; 4];

        for (rot, rotation) in ROTATIONS.into_iter().enumerate() {
            let minos = mino_offsets(kind, rotation);

            for (x_idx, blocked) in map[rot].iter_mut().enumerate() {
                let x = x_idx as i8 - 2;
                let mut bits = 0u32;

                for mino in minos {
                    let nx = x + mino.x;
                    if nx < 0 || nx >= Board::WIDTH as i8 {
                        bits = u32::MAX;
                        break;
                    }

                    let col = board.get_column(nx as usize);
                    let dy = mino.y;
                    if dy > 0 {
                        bits |= col >> dy;
                        // anchor rows whose mino would poke above the buffer
                        bits |= !((1u32 << (32 - dy as u32)) - 1);
                    } else if dy < 0 {
                        bits |= col << (-dy) as u32;
                        // anchor rows whose mino would sink below the floor
                        bits |= (1u32 << (-dy) as u32) - 1;
                    } else {
                        bits |= col;
                    }
                }

                *blocked = bits;
            }
        }

        Self { map }
    }

    /// O(1) collision check - just a bit test.
    #[inline(always)]
    pub fn collides(&self, rotation: Rotation, x: i8, y: i8) -> bool {
        let x_idx = (x + 2) as usize;
        if x_idx >= 14 || !(0..Board::HEIGHT as i8).contains(&y) {
            return true;
        }
        (self.map[rotation as usize][x_idx] >> y) & 1 == 1
    }

    /// Raw blocked column - for mask propagation.
    #[inline(always)]
    pub fn get_column(&self, rotation: Rotation, x: i8) -> u32 {
        let x_idx = (x + 2) as usize;
        if x_idx >= 14 {
            return u32::MAX;
        }
        self.map[rotation as usize][x_idx]
    }
}
