//! Manhattan-pairing heuristic.
//!
//! Boxes and goals are both carried as ascending-sorted sets; pairing the
//! i-th box with the i-th goal and summing Manhattan distances is cheap but
//! not an admissible lower bound on push count (it ignores the optimal
//! assignment between boxes and goals). The search is therefore best-first,
//! not guaranteed to return the shortest push sequence.

use crate::board::{Board, BoardState};

pub trait Heuristic {
    fn estimate(board: &Board, state: &BoardState) -> u32;
}

pub struct ManhattanPairing;

impl Heuristic for ManhattanPairing {
    fn estimate(board: &Board, state: &BoardState) -> u32 {
        let grid = &board.grid;
        let mut goals: Vec<usize> = (0..grid.size()).filter(|&s| board.is_goal(s)).collect();
        goals.sort_unstable();

        let mut total = 0u32;
        for (&box_sq, &goal_sq) in state.boxes.iter().zip(goals.iter()) {
            let (br, bc) = (grid.row(box_sq) as i64, grid.col(box_sq) as i64);
            let (gr, gc) = (grid.row(goal_sq) as i64, grid.col(goal_sq) as i64);
            total += ((br - gr).abs() + (bc - gc).abs()) as u32;
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::parse_level;

    #[test]
    fn zero_when_already_solved() {
        let level = parse_level("#####\n#@*#\n#####\n").unwrap();
        let (board, state) = Board::new(&level).unwrap();
        assert_eq!(ManhattanPairing::estimate(&board, &state), 0);
    }

    #[test]
    fn sums_manhattan_distance_for_one_box() {
        let level = parse_level("#######\n#@$  .#\n#######\n").unwrap();
        let (board, state) = Board::new(&level).unwrap();
        assert_eq!(ManhattanPairing::estimate(&board, &state), 3);
    }
}
