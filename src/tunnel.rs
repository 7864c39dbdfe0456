//! Tunnel (macro-move) detection.

use crate::board::{Board, Push};
use crate::grid::Direction;

/// Returns true when `push` moves a box down a one-square-wide corridor:
/// the player's square is flanked on both perpendicular sides by walls,
/// and the box itself is walled on at least one side along that same
/// perpendicular axis. Such pushes are assigned priority 0.
pub fn is_tunnel_push(board: &Board, push: Push) -> bool {
    let grid = &board.grid;
    let Some(player) = grid.step(push.box_square, push.dir.opposite()) else {
        return false;
    };

    match push.dir {
        Direction::Left | Direction::Right => {
            let p_up = grid.step(player, Direction::Up);
            let p_down = grid.step(player, Direction::Down);
            let walled_perp = is_wall_or_edge(board, p_up) && is_wall_or_edge(board, p_down);

            let b_up = grid.step(push.box_square, Direction::Up);
            let b_down = grid.step(push.box_square, Direction::Down);
            let box_walled = is_wall_or_edge(board, b_up) || is_wall_or_edge(board, b_down);

            walled_perp && box_walled
        }
        Direction::Up | Direction::Down => {
            let p_left = grid.step(player, Direction::Left);
            let p_right = grid.step(player, Direction::Right);
            let walled_perp = is_wall_or_edge(board, p_left) && is_wall_or_edge(board, p_right);

            let b_left = grid.step(push.box_square, Direction::Left);
            let b_right = grid.step(push.box_square, Direction::Right);
            let box_walled = is_wall_or_edge(board, b_left) || is_wall_or_edge(board, b_right);

            walled_perp && box_walled
        }
    }
}

fn is_wall_or_edge(board: &Board, square: Option<usize>) -> bool {
    match square {
        None => true,
        Some(sq) => board.is_wall(sq),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::levels::parse_level;

    #[test]
    fn push_along_one_wide_corridor_is_a_tunnel() {
        let level = parse_level("#######\n#@$  .#\n#######\n").unwrap();
        let (board, state) = Board::new(&level).unwrap();
        let push = Push {
            box_square: state.boxes[0],
            dir: crate::grid::Direction::Right,
        };
        assert!(is_tunnel_push(&board, push));
    }

    #[test]
    fn push_in_an_open_room_is_not_a_tunnel() {
        let level = parse_level("#####\n#   #\n#@$.#\n#   #\n#####\n").unwrap();
        let (board, state) = Board::new(&level).unwrap();
        let push = Push {
            box_square: state.boxes[0],
            dir: crate::grid::Direction::Right,
        };
        assert!(!is_tunnel_push(&board, push));
    }
}
