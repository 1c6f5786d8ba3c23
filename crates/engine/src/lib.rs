//! botrix-engine - Botris game rules and simulation engine.
//!
//! Provides SRS rotation with kicks, atomic movement, two move-generation
//! strategies, the Botris damage state machine and the game orchestrator.

pub mod collision;
pub mod collision_map;
pub mod game;
pub mod kicks;
pub mod mode;
pub mod move_list;
pub mod movegen_smeared;
pub mod movegen_traditional;
pub mod movement;
pub mod perft;

pub use collision::{can_place, collides, hard_drop_y, piece_fits};
pub use game::{Game, GameError, PlacementPolicy, QUEUE_SIZE};
pub use kicks::get_kicks;
pub use mode::Botris;
pub use move_list::MoveList;
pub use movement::{detect_spin, sonic_drop, try_drop, try_move, try_rotate};

use botrix_core::{Board, PieceType};

/// One capability, two strategies: enumerate every distinct final
/// placement for (board, piece kind). Callers select an implementation by
/// precondition instead of the engine hard-coding the choice.
pub trait PlacementGenerator {
    fn generate(&self, board: &Board, kind: PieceType) -> MoveList;
}

/// Skyline walk; valid everywhere, misses post-drop tucks and spins.
pub struct SkylineGenerator;

/// Height-profile scan; requires `Board::is_convex()`.
pub struct ConvexGenerator;

/// Bit-parallel search without mid-stack rotations.
pub struct SmearedGenerator;

/// Full fixed-point closure over all five atomic movements.
pub struct ExhaustiveGenerator;

impl PlacementGenerator for SkylineGenerator {
    fn generate(&self, board: &Board, kind: PieceType) -> MoveList {
        movegen_traditional::sky_piece_movegen(board, kind)
    }
}

impl PlacementGenerator for ConvexGenerator {
    fn generate(&self, board: &Board, kind: PieceType) -> MoveList {
        movegen_traditional::convex_movegen(board, kind)
    }
}

impl PlacementGenerator for SmearedGenerator {
    fn generate(&self, board: &Board, kind: PieceType) -> MoveList {
        movegen_smeared::movegen(board, kind)
    }
}

impl PlacementGenerator for ExhaustiveGenerator {
    fn generate(&self, board: &Board, kind: PieceType) -> MoveList {
        movegen_smeared::god_movegen(board, kind)
    }
}
