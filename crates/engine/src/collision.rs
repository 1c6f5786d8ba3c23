//! Collision detection - walls, floor, other blocks.

use botrix_core::{mino_offsets, Board, Piece, PieceType, Rotation};

/// Does a piece of `kind` at (rotation, x, y) overlap a wall, the floor,
/// the buffer ceiling or an occupied cell?
#[inline]
pub fn collides(board: &Board, kind: PieceType, rotation: Rotation, x: i8, y: i8) -> bool {
    for mino in mino_offsets(kind, rotation) {
        let cx = x + mino.x;
        let cy = y + mino.y;
        if cx < 0 || cx >= Board::WIDTH as i8 || cy < 0 || cy >= Board::HEIGHT as i8 {
            return true;
        }
        if board.get(cx as usize, cy as usize) {
            return true;
        }
    }
    false
}

/// Can we place here? (just !collides)
#[inline]
pub fn can_place(board: &Board, kind: PieceType, rotation: Rotation, x: i8, y: i8) -> bool {
    !collides(board, kind, rotation, x, y)
}

/// Collision check against a piece instance's current cells.
#[inline]
pub fn piece_fits(board: &Board, piece: &Piece) -> bool {
    can_place(board, piece.kind, piece.rotation, piece.position.x, piece.position.y)
}

/// Anchor row the piece settles on when dropped straight down from (x, y).
#[inline]
pub fn hard_drop_y(board: &Board, kind: PieceType, rotation: Rotation, x: i8, y: i8) -> i8 {
    let mut landing_y = y;
    while !collides(board, kind, rotation, x, landing_y - 1) {
        landing_y -= 1;
    }
    landing_y
}
