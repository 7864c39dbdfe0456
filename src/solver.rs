//! Frontier and search driver.
//!
//! Forward-only best-first search: pushes are generated from a popped
//! state, scored by the Manhattan-pairing heuristic (with tunnel pushes and
//! forced single-push states overriding to priority 0), and a state is
//! recorded as visited only after it has actually been popped and applied,
//! never when it is merely enqueued. This keeps the visited-set check in
//! one place and makes it safe for tunnel pushes to skip ahead in the
//! queue without skipping the check itself.

use std::collections::HashMap;

use tracing::info;

use crate::board::{Board, BoardState, Push};
use crate::heuristic::{Heuristic, ManhattanPairing};
use crate::pqueue::PriorityQueue;
use crate::pushgen::generate_pushes;
use crate::tunnel::is_tunnel_push;
use crate::visited::VisitedSet;

#[derive(Debug, Clone, Copy)]
pub struct SolverOpts {
    /// Caller-supplied node budget. The driver has no intrinsic limit;
    /// `None` means search until the frontier is exhausted.
    pub max_nodes: Option<usize>,
    pub dead_squares: bool,
    pub tunnels: bool,
}

impl Default for SolverOpts {
    fn default() -> Self {
        SolverOpts {
            max_nodes: None,
            dead_squares: true,
            tunnels: true,
        }
    }
}

#[derive(Debug)]
pub enum SolveResult {
    Solved {
        pushes: Vec<Push>,
        final_state: Box<BoardState>,
    },
    Exhausted,
    BudgetExceeded,
}

struct FrontierEntry {
    predecessor: BoardState,
    push: Push,
}

pub fn solve(board: &Board, initial: &BoardState, opts: SolverOpts) -> SolveResult {
    if board.is_solved(initial) {
        info!("level already solved at the initial state");
        return SolveResult::Solved {
            pushes: Vec::new(),
            final_state: Box::new(initial.clone()),
        };
    }

    let mut frontier: PriorityQueue<FrontierEntry> = PriorityQueue::new();
    let mut visited = VisitedSet::new();
    let mut parent: HashMap<BoardState, (BoardState, Push)> = HashMap::new();

    visited.insert(initial);
    enqueue_successors(board, initial, &mut frontier, opts);

    let mut nodes_explored = 0usize;

    loop {
        let Some(entry) = frontier.pop_min() else {
            info!(nodes_explored, "frontier exhausted without a solution");
            return SolveResult::Exhausted;
        };

        let mut state = entry.predecessor.clone();
        board.do_push(&mut state, entry.push);

        // The visited-set check always runs here, unconditionally after
        // popping, even for priority-0 tunnel/forced pushes: skipping it
        // for those would be unsafe, since a tunnel push can still land on
        // a state reached earlier by a different route.
        if visited.contains(&state) {
            continue;
        }

        visited.insert(&state);
        parent.insert(state.clone(), (entry.predecessor, entry.push));
        nodes_explored += 1;

        if nodes_explored.is_multiple_of(100_000) {
            info!(nodes_explored, frontier_len = frontier.len(), "search progress");
        }

        if board.is_solved(&state) {
            info!(nodes_explored, "solution found");
            let pushes = reconstruct(&parent, initial, state.clone());
            return SolveResult::Solved {
                pushes,
                final_state: Box::new(state),
            };
        }

        if let Some(max_nodes) = opts.max_nodes
            && nodes_explored >= max_nodes
        {
            info!(nodes_explored, "node budget exceeded");
            return SolveResult::BudgetExceeded;
        }

        enqueue_successors(board, &state, &mut frontier, opts);
    }
}

fn enqueue_successors(
    board: &Board,
    state: &BoardState,
    frontier: &mut PriorityQueue<FrontierEntry>,
    opts: SolverOpts,
) {
    let pushes = generate_pushes(board, state);
    let forced = pushes.len() == 1;

    for push in pushes {
        let destination = board
            .grid
            .step(push.box_square, push.dir)
            .expect("generated push must stay in-grid");
        if opts.dead_squares && board.is_dead(destination) {
            continue;
        }

        let priority = if forced || (opts.tunnels && is_tunnel_push(board, push)) {
            0
        } else {
            let mut next = state.clone();
            board.do_push(&mut next, push);
            ManhattanPairing::estimate(board, &next) as usize
        };

        frontier.push(
            priority,
            FrontierEntry {
                predecessor: state.clone(),
                push,
            },
        );
    }
}

fn reconstruct(
    parent: &HashMap<BoardState, (BoardState, Push)>,
    initial: &BoardState,
    mut state: BoardState,
) -> Vec<Push> {
    let mut pushes = Vec::new();
    while &state != initial {
        let (prev, push) = parent
            .get(&state)
            .expect("every non-initial visited state has a recorded parent");
        pushes.push(*push);
        state = prev.clone();
    }
    pushes.reverse();
    pushes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::levels::parse_level;

    fn setup(text: &str) -> (Board, BoardState) {
        let level = parse_level(text).unwrap();
        Board::new(&level).unwrap()
    }

    #[test]
    fn trivial_already_solved_state() {
        let (board, state) = setup("#####\n#@*#\n#####\n");
        match solve(&board, &state, SolverOpts::default()) {
            SolveResult::Solved { pushes, .. } => assert!(pushes.is_empty()),
            other => panic!("expected Solved, got {other:?}"),
        }
    }

    #[test]
    fn single_push_solves_in_one_step() {
        let (board, state) = setup("#####\n#@$.#\n#####\n");
        match solve(&board, &state, SolverOpts::default()) {
            SolveResult::Solved { pushes, final_state } => {
                assert_eq!(pushes.len(), 1);
                assert!(board.is_solved(&final_state));
            }
            other => panic!("expected Solved, got {other:?}"),
        }
    }

    #[test]
    fn dead_square_is_never_pushed_into() {
        let (board, state) = setup("#####\n#@$ #\n#  .#\n#####\n");
        // the only legal initial push sends the box toward the dead
        // corner; with dead-square pruning on, the search must report
        // exhausted rather than solved via an illegal route.
        match solve(&board, &state, SolverOpts::default()) {
            SolveResult::Exhausted => {}
            other => panic!("expected Exhausted, got {other:?}"),
        }
    }

    #[test]
    fn tunnel_corridor_is_solved_by_greedily_chasing_the_tunnel() {
        let (board, state) = setup("########\n#@$   .#\n########\n");
        match solve(&board, &state, SolverOpts::default()) {
            SolveResult::Solved { pushes, final_state } => {
                assert_eq!(pushes.len(), 4);
                assert!(board.is_solved(&final_state));
            }
            other => panic!("expected Solved, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_states_are_expanded_only_once() {
        // the player can walk around the box in either direction to reach
        // the same push; the second arrival must be pruned.
        let (board, state) = setup("#######\n#  #  #\n# @$ .#\n#  #  #\n#######\n");
        match solve(&board, &state, SolverOpts::default()) {
            SolveResult::Solved { final_state, .. } => assert!(board.is_solved(&final_state)),
            other => panic!("expected Solved, got {other:?}"),
        }
    }
}
