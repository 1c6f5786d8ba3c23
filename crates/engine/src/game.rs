//! Game orchestration: live board, active piece, hold slot, upcoming
//! queue, pending garbage meter and the two scoring counters.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use botrix_core::{Board, Movement, Piece, PieceType, Rotation, Spin, TurnDirection, SPAWN_X, SPAWN_Y};

use crate::collision::can_place;
use crate::mode::Botris;
use crate::move_list::MoveList;
use crate::movegen_smeared::{god_movegen, movegen};
use crate::movegen_traditional::{convex_movegen, sky_piece_movegen};
use crate::movement::{sonic_drop, try_move, try_rotate};

/// Upcoming pieces visible to the player/agent.
pub const QUEUE_SIZE: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("spawned piece overlaps the stack")]
    TopOut,
    #[error("hold already used for this piece")]
    HoldAlreadyUsed,
    #[error("upcoming queue is empty")]
    EmptyQueue,
    #[error("no active piece")]
    NoActivePiece,
    #[error("placement overlaps the stack or leaves the board")]
    IllegalPlacement,
}

/// Movegen strategy selection. `Auto` is the performance heuristic; the
/// other variants pin one path explicitly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PlacementPolicy {
    #[default]
    Auto,
    Sky,
    Convex,
    Smeared,
    Exhaustive,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub board: Board,
    pub current: Option<Piece>,
    pub hold: Option<PieceType>,
    hold_used: bool,
    pub queue: [PieceType; QUEUE_SIZE],
    /// Pending incoming garbage, one hole column per line, oldest first.
    pub garbage_meter: SmallVec<[u8; 16]>,
    pub combo: u32,
    pub b2b: u32,
    pub mode: Botris,
}

impl Default for Game {
    fn default() -> Self {
        Self {
            board: Board::new(),
            current: None,
            hold: None,
            hold_used: false,
            queue: [PieceType::Empty; QUEUE_SIZE],
            garbage_meter: SmallVec::new(),
            combo: 0,
            b2b: 0,
            mode: Botris::new(),
        }
    }
}

impl Game {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh game with the queue pre-filled and the first piece spawned.
    pub fn with_queue(kinds: &[PieceType]) -> Self {
        let mut game = Self::new();
        for &kind in kinds {
            game.push_queue(kind);
        }
        if game.current.is_none() {
            // spawning on an empty board cannot collide
            game.spawn_next().ok();
        }
        game
    }

    /// Feed point for the external piece source. Returns false when every
    /// slot is occupied.
    pub fn push_queue(&mut self, kind: PieceType) -> bool {
        if kind == PieceType::Empty {
            return false;
        }
        for slot in &mut self.queue {
            if *slot == PieceType::Empty {
                *slot = kind;
                return true;
            }
        }
        false
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    fn next_from_queue(&mut self) -> Result<PieceType, GameError> {
        let kind = self.queue[0];
        if kind == PieceType::Empty {
            return Err(GameError::EmptyQueue);
        }
        self.queue.copy_within(1.., 0);
        self.queue[QUEUE_SIZE - 1] = PieceType::Empty;
        Ok(kind)
    }

    fn spawn(&mut self, kind: PieceType) -> Result<(), GameError> {
        let piece = Piece::new(kind);
        if !can_place(&self.board, kind, Rotation::North, SPAWN_X, SPAWN_Y) {
            self.current = None;
            return Err(GameError::TopOut);
        }
        self.current = Some(piece);
        self.hold_used = false;
        Ok(())
    }

    /// Pop the queue into the active slot.
    pub fn spawn_next(&mut self) -> Result<(), GameError> {
        let kind = self.next_from_queue()?;
        self.spawn(kind)
    }

    /// Drop the current piece straight down and commit it.
    pub fn place_piece(&mut self) -> Result<u32, GameError> {
        let piece = self.current.ok_or(GameError::NoActivePiece)?;
        self.commit(sonic_drop(&self.board, &piece))
    }

    /// Commit an explicit, already-resolved piece (e.g. one picked from a
    /// movegen result). Stamps it, clears lines, scores, settles pending
    /// garbage and spawns the next queue piece. Returns the damage left
    /// after garbage cancellation.
    pub fn commit(&mut self, piece: Piece) -> Result<u32, GameError> {
        if !self.board.try_set_piece(&piece) {
            return Err(GameError::IllegalPlacement);
        }

        let lines = self.board.clear_lines();
        let perfect_clear = self.board.is_empty();
        let mut damage = self
            .mode
            .points(lines, piece.spin, perfect_clear, &mut self.combo, &mut self.b2b);

        // incoming garbage is cancelled line-for-damage before anything
        // reaches the opponent or the board
        let cancelled = (damage as usize).min(self.garbage_meter.len());
        self.garbage_meter.drain(..cancelled);
        damage -= cancelled as u32;

        // a placement that clears nothing tanks whatever is still pending
        if lines == 0 && !self.garbage_meter.is_empty() {
            let pending = std::mem::take(&mut self.garbage_meter);
            for &hole in &pending {
                self.board.insert_garbage(1, hole as usize);
            }
        }

        self.current = None;
        self.spawn_next()?;
        Ok(damage)
    }

    /// Swap the active piece with the hold slot; at most once per spawn.
    /// The first-ever hold pulls the replacement from the queue instead.
    pub fn do_hold(&mut self) -> Result<(), GameError> {
        if self.hold_used {
            return Err(GameError::HoldAlreadyUsed);
        }
        let current = self.current.ok_or(GameError::NoActivePiece)?;
        match self.hold {
            Some(previous) => {
                self.hold = Some(current.kind);
                self.spawn(previous)?;
            }
            None => {
                self.spawn_next()?;
                self.hold = Some(current.kind);
            }
        }
        self.hold_used = true;
        Ok(())
    }

    /// Enqueue incoming garbage; it materializes with the next placement
    /// that fails to clear, `lines` rows with a single hole at `location`.
    pub fn add_garbage(&mut self, lines: u32, location: usize) {
        debug_assert!(location < Board::WIDTH);
        for _ in 0..lines {
            self.garbage_meter.push(location as u8);
        }
    }

    /// Damage preview: `Botris::points` without touching the counters.
    pub fn damage_sent(&self, lines_cleared: u32, spin: Spin, perfect_clear: bool) -> u32 {
        let mut combo = self.combo;
        let mut b2b = self.b2b;
        self.mode
            .points(lines_cleared, spin, perfect_clear, &mut combo, &mut b2b)
    }

    /// Apply exactly one atomic movement against the live board. Returns
    /// the unchanged piece when the movement is illegal.
    pub fn process_movement(&self, piece: Piece, movement: Movement) -> Piece {
        match movement {
            Movement::Left => try_move(&self.board, &piece, -1),
            Movement::Right => try_move(&self.board, &piece, 1),
            Movement::RotateClockwise => try_rotate(&self.board, &piece, TurnDirection::Right),
            Movement::RotateCounterClockwise => {
                try_rotate(&self.board, &piece, TurnDirection::Left)
            }
            Movement::SonicDrop => Some(sonic_drop(&self.board, &piece)),
        }
        .unwrap_or(piece)
    }

    /// All distinct final placements for the current piece, using the
    /// default policy.
    pub fn get_possible_piece_placements(&self) -> MoveList {
        self.placements_with(PlacementPolicy::default())
    }

    /// Placement enumeration with an explicit strategy. `Auto` takes the
    /// cheap convex path only when its preconditions hold and the stack is
    /// low; everything else runs the exhaustive search.
    pub fn placements_with(&self, policy: PlacementPolicy) -> MoveList {
        let Some(piece) = self.current else {
            return MoveList::new();
        };
        let kind = piece.kind;
        match policy {
            PlacementPolicy::Auto => {
                if self.board.is_convex()
                    && self.board.is_low()
                    && !self.board.has_imbalanced_split(4)
                {
                    convex_movegen(&self.board, kind)
                } else {
                    god_movegen(&self.board, kind)
                }
            }
            PlacementPolicy::Sky => sky_piece_movegen(&self.board, kind),
            PlacementPolicy::Convex => convex_movegen(&self.board, kind),
            PlacementPolicy::Smeared => movegen(&self.board, kind),
            PlacementPolicy::Exhaustive => god_movegen(&self.board, kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(kinds: &[PieceType]) -> Game {
        Game::with_queue(kinds)
    }

    #[test]
    fn test_with_queue_spawns_first_piece() {
        let game = queue_of(&[PieceType::T, PieceType::I, PieceType::O]);
        assert_eq!(game.current.unwrap().kind, PieceType::T);
        assert_eq!(game.queue[0], PieceType::I);
        assert_eq!(game.queue[2], PieceType::Empty);
    }

    #[test]
    fn test_push_queue_capacity() {
        let mut game = Game::new();
        for _ in 0..QUEUE_SIZE {
            assert!(game.push_queue(PieceType::I));
        }
        assert!(!game.push_queue(PieceType::I));
        assert!(!game.push_queue(PieceType::Empty));
    }

    #[test]
    fn test_place_piece_advances_queue() {
        let mut game = queue_of(&[PieceType::O, PieceType::T]);
        let damage = game.place_piece().unwrap();
        assert_eq!(damage, 0);
        assert_eq!(game.current.unwrap().kind, PieceType::T);
        // O landed on the floor at spawn column
        assert!(game.board.get(4, 0) && game.board.get(5, 0));
    }

    #[test]
    fn test_place_piece_empty_queue_errors() {
        let mut game = queue_of(&[PieceType::O]);
        assert_eq!(game.place_piece(), Err(GameError::EmptyQueue));
        assert!(game.current.is_none());
    }

    #[test]
    fn test_commit_rejects_overlap() {
        let mut game = queue_of(&[PieceType::T, PieceType::T]);
        let mut board_piece = game.current.unwrap();
        board_piece = sonic_drop(&game.board, &board_piece);
        game.board.set_piece(&board_piece);
        assert_eq!(game.commit(board_piece), Err(GameError::IllegalPlacement));
    }

    #[test]
    fn test_hold_swaps_and_rejects_repeat() {
        let mut game = queue_of(&[PieceType::T, PieceType::I, PieceType::O]);
        assert!(game.do_hold().is_ok());
        assert_eq!(game.hold, Some(PieceType::T));
        assert_eq!(game.current.unwrap().kind, PieceType::I);
        assert_eq!(game.do_hold(), Err(GameError::HoldAlreadyUsed));

        // next spawn clears the flag, second hold swaps with the slot
        game.place_piece().unwrap();
        assert!(game.do_hold().is_ok());
        assert_eq!(game.hold, Some(PieceType::O));
        assert_eq!(game.current.unwrap().kind, PieceType::T);
    }

    #[test]
    fn test_garbage_tanked_on_non_clearing_placement() {
        let mut game = queue_of(&[PieceType::O, PieceType::O, PieceType::O]);
        game.add_garbage(2, 3);
        assert_eq!(game.garbage_meter.len(), 2);
        game.place_piece().unwrap();
        assert!(game.garbage_meter.is_empty());
        assert_eq!(game.board.get_garbage_height(), 2);
        assert!(!game.board.get(3, 0) && game.board.get(0, 0));
        // the O that landed on the floor rode the garbage up
        assert!(game.board.get(4, 2));
    }

    #[test]
    fn test_garbage_cancelled_by_sent_damage() {
        let mut game = queue_of(&[PieceType::I, PieceType::O, PieceType::T]);
        // leave columns 3..7 open on the floor row
        for x in 0..Board::WIDTH {
            if !(3..7).contains(&x) {
                game.board.set(x, 0);
            }
        }
        // a stray cell above keeps the clear from being perfect
        game.board.set(0, 1);
        // prime the combo counter so the single pays one damage
        game.combo = 2;
        game.add_garbage(2, 5);

        let piece = Piece::from_parts(
            PieceType::I,
            Rotation::North,
            botrix_core::Coord::new(4, 0),
            Spin::None,
        );
        let damage = game.commit(piece).unwrap();
        assert_eq!(damage, 0);
        // one pending line cancelled, one still queued
        assert_eq!(game.garbage_meter.len(), 1);
        // cleared, so nothing materialized
        assert_eq!(game.board.get_garbage_height(), 0);
    }

    #[test]
    fn test_topout_on_blocked_spawn() {
        let mut game = queue_of(&[PieceType::O, PieceType::T]);
        for y in 0..(SPAWN_Y as usize + 2) {
            game.board.set(4, y);
            game.board.set(5, y);
        }
        // the committed O lands somewhere harmless, the T spawn is blocked
        let piece = Piece::at(PieceType::O, Rotation::North, botrix_core::Coord::new(0, 0));
        assert_eq!(game.commit(piece), Err(GameError::TopOut));
        assert!(game.current.is_none());
    }

    #[test]
    fn test_damage_sent_preview_is_pure() {
        let mut game = queue_of(&[PieceType::T]);
        game.combo = 3;
        game.b2b = 2;
        let preview = game.damage_sent(4, Spin::None, false);
        assert_eq!(preview, 4 + 1 + 1); // quad + b2b + combo_table[3]
        assert_eq!(game.combo, 3);
        assert_eq!(game.b2b, 2);
    }

    #[test]
    fn test_process_movement_illegal_is_identity() {
        let game = queue_of(&[PieceType::T]);
        let piece = Piece::at(PieceType::T, Rotation::North, botrix_core::Coord::new(1, 0));
        let moved = game.process_movement(piece, Movement::Left);
        assert_eq!(moved, piece);
        let dropped = game.process_movement(piece, Movement::SonicDrop);
        assert_eq!(dropped.position, piece.position);
    }

    #[test]
    fn test_auto_policy_switches_paths() {
        // low convex board: the cheap path answers, and it agrees with the
        // exhaustive one
        let mut game = queue_of(&[PieceType::L, PieceType::L]);
        for x in 0..3 {
            game.board.set(x, 0);
        }
        assert!(game.board.is_convex() && game.board.is_low());
        let auto = game.placements_with(PlacementPolicy::Auto);
        let god = game.placements_with(PlacementPolicy::Exhaustive);
        assert_eq!(auto.len(), god.len());
        for piece in &auto {
            assert!(god.contains_placement(piece));
        }

        // an overhang forces the exhaustive path
        game.board.set(6, 3);
        assert!(!game.board.is_convex());
        let auto = game.placements_with(PlacementPolicy::Auto);
        let god = game.placements_with(PlacementPolicy::Exhaustive);
        assert_eq!(auto.len(), god.len());
    }

    #[test]
    fn test_perfect_clear_scenario() {
        // nine columns of the floor row filled, I placed vertically? no -
        // fill all but columns 3..7 across one row and drop the I flat
        let mut game = queue_of(&[PieceType::I, PieceType::T]);
        for x in 0..Board::WIDTH {
            if !(3..7).contains(&x) {
                game.board.set(x, 0);
            }
        }
        let damage = game.place_piece().unwrap();
        // single + PC bonus: 0 + 10
        assert_eq!(damage, 10);
        assert!(game.board.is_empty());
    }

    #[test]
    fn test_combo_across_three_clears_then_reset() {
        let mut game = queue_of(&[
            PieceType::I,
            PieceType::I,
            PieceType::I,
            PieceType::O,
            PieceType::T,
        ]);
        for y in 0..3 {
            for x in 0..Board::WIDTH {
                if !(3..7).contains(&x) {
                    game.board.set(x, y);
                }
            }
        }
        // pile a little extra so the third clear is not a perfect clear
        game.board.set(0, 3);

        for expected in 1..=3u32 {
            game.place_piece().unwrap();
            assert_eq!(game.combo, expected);
        }
        game.place_piece().unwrap(); // O clears nothing
        assert_eq!(game.combo, 0);
    }
}
