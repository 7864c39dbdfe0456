//! Tile encoding and flat grid addressing.

use std::fmt;

/// A single tile's role bitmask. Floor is the zero value; roles combine by
/// bitwise OR and are cleared by bitwise XOR (caller must ensure the role is
/// present before clearing it).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tile(pub u8);

impl Tile {
    pub const FLOOR: Tile = Tile(0);
    pub const WALL: Tile = Tile(1 << 0);
    pub const BOX: Tile = Tile(1 << 1);
    pub const GOAL: Tile = Tile(1 << 2);
    pub const PLAYER: Tile = Tile(1 << 3);

    pub const BOX_ON_GOAL: Tile = Tile(Self::BOX.0 | Self::GOAL.0);
    pub const PLAYER_ON_GOAL: Tile = Tile(Self::PLAYER.0 | Self::GOAL.0);

    pub fn has(self, role: Tile) -> bool {
        self.0 & role.0 == role.0
    }

    #[must_use]
    #[allow(dead_code)]
    pub fn set(self, role: Tile) -> Tile {
        Tile(self.0 | role.0)
    }

    #[must_use]
    #[allow(dead_code)]
    pub fn clear(self, role: Tile) -> Tile {
        debug_assert!(self.has(role), "clearing a role that is not set");
        Tile(self.0 ^ role.0)
    }

    pub fn is_wall(self) -> bool {
        self.has(Tile::WALL)
    }

    pub fn is_box(self) -> bool {
        self.has(Tile::BOX)
    }

    pub fn is_goal(self) -> bool {
        self.has(Tile::GOAL)
    }

    pub fn is_player(self) -> bool {
        self.has(Tile::PLAYER)
    }
}

/// The four push/move directions, in the fixed iteration order used
/// throughout the push generator and heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        };
        write!(f, "{s}")
    }
}

/// Flat row-major grid addressing. Squares are plain `usize` indices; the
/// four direction deltas are derived once from `width` and carried as a
/// field here rather than as a process-wide global table.
#[derive(Debug, Clone)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    deltas: [isize; 4],
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        let deltas = [-1, 1, -(width as isize), width as isize];
        Grid {
            width,
            height,
            deltas,
        }
    }

    pub fn size(&self) -> usize {
        self.width * self.height
    }

    pub fn delta(&self, dir: Direction) -> isize {
        self.deltas[dir as usize]
    }

    pub fn row(&self, square: usize) -> usize {
        square / self.width
    }

    pub fn col(&self, square: usize) -> usize {
        square % self.width
    }

    /// Applies `dir` to `square`, returning `None` if the result would leave
    /// the grid (wrap around a row edge or fall off the top/bottom).
    pub fn step(&self, square: usize, dir: Direction) -> Option<usize> {
        let col = self.col(square);
        match dir {
            Direction::Left if col == 0 => return None,
            Direction::Right if col + 1 == self.width => return None,
            _ => {}
        }
        let next = square as isize + self.delta(dir);
        if next < 0 || next as usize >= self.size() {
            None
        } else {
            Some(next as usize)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_set_clear_roundtrip() {
        let t = Tile::FLOOR.set(Tile::BOX).set(Tile::GOAL);
        assert!(t.is_box());
        assert!(t.is_goal());
        assert_eq!(t.clear(Tile::BOX), Tile::GOAL);
    }

    #[test]
    fn box_on_goal_matches_combination() {
        assert_eq!(Tile::BOX.set(Tile::GOAL), Tile::BOX_ON_GOAL);
        assert_eq!(Tile::PLAYER.set(Tile::GOAL), Tile::PLAYER_ON_GOAL);
    }

    #[test]
    fn step_respects_row_edges() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.step(0, Direction::Left), None);
        assert_eq!(grid.step(3, Direction::Right), None);
        assert_eq!(grid.step(0, Direction::Right), Some(1));
        assert_eq!(grid.step(0, Direction::Down), Some(4));
        assert_eq!(grid.step(0, Direction::Up), None);
    }

    #[test]
    fn step_respects_top_bottom() {
        let grid = Grid::new(4, 3);
        assert_eq!(grid.step(0, Direction::Up), None);
        assert_eq!(grid.step(8, Direction::Down), None);
    }
}
