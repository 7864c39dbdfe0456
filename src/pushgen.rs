//! Push generator.

use crate::board::{Board, BoardState, Push};
use crate::grid::ALL_DIRECTIONS;
use crate::reach::{compute_reachability, Reach};

/// Enumerates legal pushes from `state`, in ascending box-index order and
/// fixed direction order (Left, Right, Up, Down). This order is observable:
/// it is the tie-break the frontier falls back on for equal-priority pushes.
pub fn generate_pushes(board: &Board, state: &BoardState) -> Vec<Push> {
    let reach = compute_reachability(board, state);
    generate_pushes_with_reach(board, state, &reach)
}

fn generate_pushes_with_reach(board: &Board, state: &BoardState, reach: &Reach) -> Vec<Push> {
    let mut pushes = Vec::new();
    for &box_square in &state.boxes {
        for &dir in &ALL_DIRECTIONS {
            let Some(from) = board.grid.step(box_square, dir.opposite()) else {
                continue;
            };
            let Some(to) = board.grid.step(box_square, dir) else {
                continue;
            };
            if !reach.is_push_source(from) {
                continue;
            }
            if board.is_wall(to) || board.is_box(state, to) {
                continue;
            }
            pushes.push(Push {
                box_square,
                dir,
            });
        }
    }
    pushes
}

impl crate::grid::Direction {
    pub fn opposite(self) -> Self {
        use crate::grid::Direction::*;
        match self {
            Left => Right,
            Right => Left,
            Up => Down,
            Down => Up,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::parse_level;

    #[test]
    fn single_push_is_the_only_legal_push() {
        let level = parse_level("#####\n#@$.#\n#####\n").unwrap();
        let (board, state) = Board::new(&level).unwrap();
        let pushes = generate_pushes(&board, &state);
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].box_square, state.boxes[0]);
    }

    #[test]
    fn box_against_wall_has_no_pushes_along_that_axis() {
        let level = parse_level("#####\n#$@.#\n#####\n").unwrap();
        let (board, state) = Board::new(&level).unwrap();
        let pushes = generate_pushes(&board, &state);
        assert!(pushes.is_empty());
    }

    #[test]
    fn generation_is_deterministic() {
        let level = parse_level("######\n#@$ .#\n######\n").unwrap();
        let (board, state) = Board::new(&level).unwrap();
        let a = generate_pushes(&board, &state);
        let b = generate_pushes(&board, &state);
        assert_eq!(a, b);
    }
}
