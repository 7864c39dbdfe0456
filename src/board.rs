//! Board topology and dynamic state.

use std::fmt;

use arrayvec::ArrayVec;
use thiserror::Error;

use crate::grid::{Direction, Grid, Tile};
use crate::zobrist::Zobrist;

/// Upper bound on the number of boxes a level may contain. Generous for any
/// real Sokoban level; chosen so the box set can live in a fixed-capacity
/// `ArrayVec` instead of a heap allocation per state.
pub const MAX_BOXES: usize = 255;

pub type Boxes = ArrayVec<usize, MAX_BOXES>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("level has no player square")]
    NoPlayer,
    #[error("level has more than one player square")]
    MultiplePlayers,
    #[error("box count ({boxes}) does not match goal count ({goals})")]
    BoxGoalMismatch { boxes: usize, goals: usize },
    #[error("level has too many boxes ({0}, max {MAX_BOXES})")]
    TooManyBoxes(usize),
    #[error("level is empty")]
    Empty,
}

/// Raw parsed level data, as delivered by the level parser.
pub struct Level {
    pub width: usize,
    pub height: usize,
    pub tiles: Vec<Tile>,
}

/// Immutable puzzle topology: walls, goals, dimensions, the direction
/// table, the Zobrist word tables, and the statically precomputed dead
/// squares. Shared read-only across the whole search.
#[derive(Debug)]
pub struct Board {
    pub grid: Grid,
    walls: Vec<bool>,
    goals: Vec<bool>,
    zobrist: Zobrist,
    dead_squares: Vec<bool>,
}

/// The mutable part of a game state: box positions, player position, and
/// the running Zobrist hash. This is the payload cloned into frontier
/// entries and compared in the visited set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardState {
    pub boxes: Boxes,
    pub player: usize,
    pub hash: u32,
}

/// A single push: the box's square before the push, and the direction it
/// is pushed in. Self-contained: a frontier entry additionally carries
/// the predecessor `BoardState` so no parent-pointer tree is needed to
/// undo/redo a push.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Push {
    pub box_square: usize,
    pub dir: Direction,
}

impl Board {
    pub fn new(level: &Level) -> Result<(Board, BoardState), BoardError> {
        if level.tiles.is_empty() {
            return Err(BoardError::Empty);
        }
        let grid = Grid::new(level.width, level.height);
        let mut walls = vec![false; grid.size()];
        let mut goals = vec![false; grid.size()];
        let mut boxes = Boxes::new();
        let mut player = None;

        for (square, tile) in level.tiles.iter().enumerate() {
            walls[square] = tile.is_wall();
            if tile.is_goal() {
                goals[square] = true;
            }
            if tile.is_box() {
                if boxes.len() == MAX_BOXES {
                    return Err(BoardError::TooManyBoxes(boxes.len() + 1));
                }
                boxes.push(square);
            }
            if tile.is_player() {
                if player.is_some() {
                    return Err(BoardError::MultiplePlayers);
                }
                player = Some(square);
            }
        }

        let player = player.ok_or(BoardError::NoPlayer)?;
        let goal_count = goals.iter().filter(|g| **g).count();
        if boxes.len() != goal_count {
            return Err(BoardError::BoxGoalMismatch {
                boxes: boxes.len(),
                goals: goal_count,
            });
        }

        boxes.sort_unstable();
        let zobrist = Zobrist::new(grid.size());
        let hash = Self::hash_of(&zobrist, &boxes, player);

        let mut board = Board {
            grid,
            walls,
            goals,
            zobrist,
            dead_squares: Vec::new(),
        };
        board.dead_squares = crate::deadsquares::compute_dead_squares(&board);

        let state = BoardState {
            boxes,
            player,
            hash,
        };
        Ok((board, state))
    }

    fn hash_of(zobrist: &Zobrist, boxes: &Boxes, player: usize) -> u32 {
        let mut hash = zobrist.player_word(player);
        for &b in boxes {
            hash ^= zobrist.box_word(b);
        }
        hash
    }

    pub fn is_wall(&self, square: usize) -> bool {
        self.walls[square]
    }

    pub fn is_goal(&self, square: usize) -> bool {
        self.goals[square]
    }

    pub fn is_dead(&self, square: usize) -> bool {
        self.dead_squares[square]
    }

    pub fn is_box(&self, state: &BoardState, square: usize) -> bool {
        state.boxes.binary_search(&square).is_ok()
    }

    pub fn is_solved(&self, state: &BoardState) -> bool {
        state.boxes.iter().all(|&b| self.goals[b])
    }

    fn insert_box(boxes: &mut Boxes, square: usize) {
        let idx = boxes.partition_point(|&b| b < square);
        boxes.insert(idx, square);
    }

    fn remove_box(boxes: &mut Boxes, square: usize) {
        let idx = boxes
            .binary_search(&square)
            .expect("removing a box from a square with no box");
        boxes.remove(idx);
    }

    /// Applies `push` to `state` in place. Assumes `push` was produced by
    /// the push generator against this exact state (no validation here).
    pub fn do_push(&self, state: &mut BoardState, push: Push) {
        debug_assert_eq!(
            self.grid.step(push.box_square, reverse(push.dir)),
            Some(state.player)
        );
        let to = self
            .grid
            .step(push.box_square, push.dir)
            .expect("push destination must be in-grid");

        state.hash ^= self.zobrist.player_word(state.player);
        state.hash ^= self.zobrist.player_word(push.box_square);
        state.hash ^= self.zobrist.box_word(push.box_square);
        state.hash ^= self.zobrist.box_word(to);

        Self::remove_box(&mut state.boxes, push.box_square);
        Self::insert_box(&mut state.boxes, to);
        state.player = push.box_square;
    }

    /// Exact inverse of [`Board::do_push`].
    #[allow(dead_code)]
    pub fn undo_push(&self, state: &mut BoardState, push: Push) {
        let to = self
            .grid
            .step(push.box_square, push.dir)
            .expect("push destination must be in-grid");
        let from = self
            .grid
            .step(push.box_square, reverse(push.dir))
            .expect("push origin must be in-grid");

        debug_assert_eq!(state.player, push.box_square);

        state.hash ^= self.zobrist.box_word(to);
        state.hash ^= self.zobrist.box_word(push.box_square);
        state.hash ^= self.zobrist.player_word(push.box_square);
        state.hash ^= self.zobrist.player_word(from);

        Self::remove_box(&mut state.boxes, to);
        Self::insert_box(&mut state.boxes, push.box_square);
        state.player = from;
    }
}

fn reverse(dir: Direction) -> Direction {
    match dir {
        Direction::Left => Direction::Right,
        Direction::Right => Direction::Left,
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "player={} boxes={:?}", self.player, self.boxes)
    }
}

/// Renders a `(Board, BoardState)` pair back to the character grammar used
/// by the level parser.
pub struct Render<'a>(pub &'a Board, pub &'a BoardState);

impl fmt::Display for Render<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Render(board, state) = self;
        for row in 0..board.grid.height {
            let mut line = String::with_capacity(board.grid.width);
            for col in 0..board.grid.width {
                let square = row * board.grid.width + col;
                let has_box = board.is_box(state, square);
                let is_goal = board.is_goal(square);
                let is_player = state.player == square;
                let ch = if board.is_wall(square) {
                    '#'
                } else if has_box && is_goal {
                    '*'
                } else if has_box {
                    '$'
                } else if is_player && is_goal {
                    '+'
                } else if is_player {
                    '@'
                } else if is_goal {
                    '.'
                } else {
                    ' '
                };
                line.push(ch);
            }
            writeln!(f, "{}", line.trim_end())?;
        }
        Ok(())
    }
}
