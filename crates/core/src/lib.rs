//! Botrix core crate - board and piece primitives for the Botris engine.

mod bits;
mod board;
mod piece;

pub use bits::{pext_u32, pext_u64};
pub use board::Board;
pub use piece::{
    canonical_rotation, mino_offsets, Coord, Movement, Piece, PieceType, Rotation, Spin,
    TurnDirection, N_MINOS, SPAWN_X, SPAWN_Y,
};
