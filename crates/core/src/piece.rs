//! Piece model: tetromino kinds, rotation states, SRS mino tables and the
//! live piece instance carried through movement and placement.

use serde::{Deserialize, Serialize};

pub const N_MINOS: usize = 4;

/// Spawn anchor shared by every kind.
pub const SPAWN_X: i8 = 4;
pub const SPAWN_Y: i8 = 20;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: i8,
    pub y: i8,
}

impl Coord {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum PieceType {
    S,
    Z,
    J,
    L,
    T,
    O,
    I,
    /// Vacant queue-slot sentinel, never placed on a board.
    Empty,
}

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::S,
        PieceType::Z,
        PieceType::J,
        PieceType::L,
        PieceType::T,
        PieceType::O,
        PieceType::I,
    ];
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum TurnDirection {
    Left,
    Right,
}

/// The five atomic movements a search is allowed to apply.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Movement {
    Left,
    Right,
    RotateClockwise,
    RotateCounterClockwise,
    SonicDrop,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Default, Serialize, Deserialize)]
pub enum Spin {
    #[default]
    None,
    Mini,
    Full,
}

impl Rotation {
    pub fn cw(self) -> Self {
        match self {
            Self::North => Self::East,
            Self::East => Self::South,
            Self::South => Self::West,
            Self::West => Self::North,
        }
    }

    pub fn ccw(self) -> Self {
        match self {
            Self::North => Self::West,
            Self::West => Self::South,
            Self::South => Self::East,
            Self::East => Self::North,
        }
    }

    pub fn turned(self, dir: TurnDirection) -> Self {
        match dir {
            TurnDirection::Left => self.ccw(),
            TurnDirection::Right => self.cw(),
        }
    }
}

/// Mino offsets for a (kind, rotation) pair, relative to the piece anchor.
/// True SRS cells: I is asymmetric across rotations, O never moves.
pub fn mino_offsets(kind: PieceType, rotation: Rotation) -> [Coord; N_MINOS] {
    let idx = rotation as usize;
    let raw: [(i8, i8); N_MINOS] = match kind {
        PieceType::S => [
            [(-1, 0), (0, 0), (0, 1), (1, 1)],
            [(0, 1), (0, 0), (1, 0), (1, -1)],
            [(-1, -1), (0, -1), (0, 0), (1, 0)],
            [(-1, 1), (-1, 0), (0, 0), (0, -1)],
        ][idx],
        PieceType::Z => [
            [(0, 0), (1, 0), (-1, 1), (0, 1)],
            [(0, -1), (0, 0), (1, 0), (1, 1)],
            [(0, -1), (1, -1), (-1, 0), (0, 0)],
            [(-1, -1), (-1, 0), (0, 0), (0, 1)],
        ][idx],
        PieceType::J => [
            [(-1, 0), (0, 0), (1, 0), (-1, 1)],
            [(0, -1), (0, 0), (0, 1), (1, 1)],
            [(1, -1), (-1, 0), (0, 0), (1, 0)],
            [(-1, -1), (0, -1), (0, 0), (0, 1)],
        ][idx],
        PieceType::L => [
            [(-1, 0), (0, 0), (1, 0), (1, 1)],
            [(0, -1), (0, 0), (0, 1), (1, -1)],
            [(-1, -1), (-1, 0), (0, 0), (1, 0)],
            [(-1, 1), (0, -1), (0, 0), (0, 1)],
        ][idx],
        PieceType::T => [
            [(-1, 0), (0, 0), (1, 0), (0, 1)],
            [(0, -1), (0, 0), (0, 1), (1, 0)],
            [(-1, 0), (0, 0), (1, 0), (0, -1)],
            [(0, -1), (0, 0), (0, 1), (-1, 0)],
        ][idx],
        PieceType::O => [(0, 0), (1, 0), (0, 1), (1, 1)],
        PieceType::I => [
            [(-1, 0), (0, 0), (1, 0), (2, 0)],
            [(1, 1), (1, 0), (1, -1), (1, -2)],
            [(-1, -1), (0, -1), (1, -1), (2, -1)],
            [(0, 1), (0, 0), (0, -1), (0, -2)],
        ][idx],
        PieceType::Empty => [(0, 0); N_MINOS],
    };
    raw.map(|(x, y)| Coord::new(x, y))
}

/// Canonical (rotation, dx, dy) for rotations that occupy identical cells.
/// S/Z/I collapse South onto North and West onto East; O is always North.
pub fn canonical_rotation(kind: PieceType, rotation: Rotation) -> (Rotation, i8, i8) {
    match kind {
        PieceType::S | PieceType::Z | PieceType::I => match rotation {
            Rotation::South => (Rotation::North, 0, -1),
            Rotation::West => (Rotation::East, -1, 0),
            r => (r, 0, 0),
        },
        PieceType::O => (Rotation::North, 0, 0),
        _ => (rotation, 0, 0),
    }
}

/// A live tetromino: kind, rotation state, anchor position, the four
/// occupied cell offsets for the current (kind, rotation) pair, and the
/// spin classification of the most recent rotation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceType,
    pub rotation: Rotation,
    pub position: Coord,
    pub minos: [Coord; N_MINOS],
    pub spin: Spin,
}

impl Piece {
    pub const EMPTY: Piece = Piece {
        kind: PieceType::Empty,
        rotation: Rotation::North,
        position: Coord::new(0, 0),
        minos: [Coord::new(0, 0); N_MINOS],
        spin: Spin::None,
    };

    /// Fresh piece in spawn state.
    pub fn new(kind: PieceType) -> Self {
        Self::at(kind, Rotation::North, Coord::new(SPAWN_X, SPAWN_Y))
    }

    pub fn with_rotation(kind: PieceType, rotation: Rotation) -> Self {
        Self::at(kind, rotation, Coord::new(SPAWN_X, SPAWN_Y))
    }

    pub fn at(kind: PieceType, rotation: Rotation, position: Coord) -> Self {
        Self::from_parts(kind, rotation, position, Spin::None)
    }

    pub fn from_parts(kind: PieceType, rotation: Rotation, position: Coord, spin: Spin) -> Self {
        Self {
            kind,
            rotation,
            position,
            minos: mino_offsets(kind, rotation),
            spin,
        }
    }

    /// Table rotation: new rotation state and recomputed minos.
    /// Kick resolution against a board lives in the engine; a piece rotated
    /// here lands on the naive target cells.
    pub fn rotate(&mut self, dir: TurnDirection) {
        self.rotation = self.rotation.turned(dir);
        self.minos = mino_offsets(self.kind, self.rotation);
    }

    /// Non-mutating variant of [`rotate`](Self::rotate); used to enumerate
    /// hypothetical rotations without committing.
    pub fn calculate_rotate(&self, dir: TurnDirection) -> Piece {
        let mut rotated = *self;
        rotated.rotate(dir);
        rotated
    }

    pub fn translated(&self, dx: i8, dy: i8) -> Piece {
        Piece {
            position: Coord::new(self.position.x + dx, self.position.y + dy),
            ..*self
        }
    }

    /// Absolute occupied cells.
    pub fn cells(&self) -> [Coord; N_MINOS] {
        self.minos
            .map(|m| Coord::new(self.position.x + m.x, self.position.y + m.y))
    }

    /// Packs (kind, rotation, position, spin) into 16 bits.
    /// Collision-free over the whole reachable state space.
    pub fn hash(&self) -> u32 {
        let kind = self.kind as u32;
        let rot = self.rotation as u32;
        let x = (self.position.x as i32 + 2) as u32;
        let y = self.position.y as u32;
        ((((kind << 2) | rot) << 4 | x) << 5 | y) << 2 | self.spin as u32
    }

    /// Like [`hash`](Self::hash) but with rotation and position
    /// canonicalized, so two rotation states occupying the same cells with
    /// the same spin produce the same key. This is the dedup key for
    /// move generation.
    pub fn compact_hash(&self) -> u32 {
        let (rot, dx, dy) = canonical_rotation(self.kind, self.rotation);
        let x = (self.position.x as i32 + dx as i32 + 2) as u32;
        let y = (self.position.y as i32 + dy as i32) as u32;
        ((rot as u32) << 11) | (x << 7) | (y << 2) | self.spin as u32
    }
}
