//! Rotation and movement logic with kick application and spin
//! classification.

use crate::collision::{can_place, hard_drop_y};
use crate::kicks::get_kicks;
use botrix_core::{Board, Coord, Piece, PieceType, Rotation, Spin, TurnDirection};

/// Try to shift a piece horizontally. None if the target overlaps.
pub fn try_move(board: &Board, piece: &Piece, dx: i8) -> Option<Piece> {
    let moved = piece.translated(dx, 0);
    can_place(board, moved.kind, moved.rotation, moved.position.x, moved.position.y)
        .then_some(moved)
}

/// Try to move a piece one row down.
pub fn try_drop(board: &Board, piece: &Piece) -> Option<Piece> {
    let dropped = piece.translated(0, -1);
    can_place(
        board,
        dropped.kind,
        dropped.rotation,
        dropped.position.x,
        dropped.position.y,
    )
    .then_some(dropped)
}

/// Drop straight down until blocked. Always succeeds; spin is untouched
/// (translation never reclassifies a rotation).
pub fn sonic_drop(board: &Board, piece: &Piece) -> Piece {
    let y = hard_drop_y(
        board,
        piece.kind,
        piece.rotation,
        piece.position.x,
        piece.position.y,
    );
    Piece {
        position: Coord::new(piece.position.x, y),
        ..*piece
    }
}

/// Try to rotate a piece, walking the kick table first-legal-wins.
/// Returns None when every candidate is blocked (the rotation is a no-op
/// for the caller). A rotation resolved at the zero offset never scores as
/// a spin; a kicked rotation is classified from the landing cells.
pub fn try_rotate(board: &Board, piece: &Piece, dir: TurnDirection) -> Option<Piece> {
    let mut target = piece.calculate_rotate(dir);
    let x = target.position.x;
    let y = target.position.y;

    if can_place(board, target.kind, target.rotation, x, y) {
        target.spin = Spin::None;
        return Some(target);
    }

    for &(dx, dy) in get_kicks(piece.kind, piece.rotation, target.rotation) {
        let nx = x + dx;
        let ny = y + dy;
        if can_place(board, target.kind, target.rotation, nx, ny) {
            let mut kicked = target.translated(dx, dy);
            kicked.spin = detect_spin(board, kicked.kind, kicked.rotation, nx, ny);
            return Some(kicked);
        }
    }

    None
}

/// Lock-time spin classification: a placement only scores when the piece
/// is immobile (left, right, down and up all blocked). An immobile T is
/// refined by the 3-corner rule; any other immobile piece is a full
/// all-spin.
pub fn detect_spin(board: &Board, kind: PieceType, rotation: Rotation, x: i8, y: i8) -> Spin {
    if !is_immobile(board, kind, rotation, x, y) {
        return Spin::None;
    }
    if kind == PieceType::T {
        t_corner_spin(board, rotation, x, y)
    } else {
        Spin::Full
    }
}

fn is_immobile(board: &Board, kind: PieceType, rotation: Rotation, x: i8, y: i8) -> bool {
    !can_place(board, kind, rotation, x - 1, y)
        && !can_place(board, kind, rotation, x + 1, y)
        && !can_place(board, kind, rotation, x, y - 1)
        && !can_place(board, kind, rotation, x, y + 1)
}

/// 3-corner rule around the T center. Corners in NW, NE, SW, SE order;
/// the two corners the flat side points away from are "front".
fn t_corner_spin(board: &Board, rotation: Rotation, x: i8, y: i8) -> Spin {
    let corners = [
        (x - 1, y + 1),
        (x + 1, y + 1),
        (x - 1, y - 1),
        (x + 1, y - 1),
    ];

    let mut filled = 0;
    let mut front_filled = 0;
    for (i, &(cx, cy)) in corners.iter().enumerate() {
        let occupied = cx < 0
            || cx >= Board::WIDTH as i8
            || cy < 0
            || cy >= Board::HEIGHT as i8
            || board.get(cx as usize, cy as usize);
        if occupied {
            filled += 1;
            let is_front = match rotation {
                Rotation::North => i < 2,
                Rotation::East => i == 1 || i == 3,
                Rotation::South => i >= 2,
                Rotation::West => i == 0 || i == 2,
            };
            if is_front {
                front_filled += 1;
            }
        }
    }

    if filled >= 3 && front_filled >= 2 {
        Spin::Full
    } else {
        Spin::Mini
    }
}
