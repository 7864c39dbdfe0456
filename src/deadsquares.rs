//! Static dead-square analysis.
//!
//! A square is dead if a box sitting there can never be pushed onto any
//! goal, for any player position. This is computed once per board, purely
//! from wall geometry: boxes are never considered, only the question of
//! whether a chain of pushes starting from a goal and working backwards
//! could have placed a box on the square in question.

use crate::board::Board;
use crate::grid::ALL_DIRECTIONS;

pub fn compute_dead_squares(board: &Board) -> Vec<bool> {
    let size = board.grid.size();
    let mut reachable = vec![false; size];
    let mut queue = std::collections::VecDeque::new();

    for (square, slot) in reachable.iter_mut().enumerate() {
        if board.is_goal(square) && !board.is_wall(square) {
            *slot = true;
            queue.push_back(square);
        }
    }

    while let Some(cur) = queue.pop_front() {
        for &dir in &ALL_DIRECTIONS {
            // A box reaches `cur` by being pushed in direction `dir`, which
            // means it came from `prev = cur - dir` and the player stood on
            // `player_sq = prev - dir` to make that push.
            let Some(prev) = board.grid.step(cur, dir.opposite()) else {
                continue;
            };
            let Some(player_sq) = board.grid.step(prev, dir.opposite()) else {
                continue;
            };
            if board.is_wall(prev) || board.is_wall(player_sq) {
                continue;
            }
            if !reachable[prev] {
                reachable[prev] = true;
                queue.push_back(prev);
            }
        }
    }

    (0..size)
        .map(|sq| !board.is_wall(sq) && !reachable[sq])
        .collect()
}
