//! Iterative-deepening search driven by the Walking Distance + Inversion
//! Distance heuristic, with parent-move retraction pruning and incremental
//! index maintenance.

use thiserror::Error;

use crate::board::{Board, HEIGHT, WIDTH};
use crate::heuristic::walking_distance::SENTINEL;
use crate::heuristic::{bound, evaluate_full, Indices, InversionDistanceTable, WalkingDistanceTable, CONV};
use crate::r#move::{Direction, MoveStack};
use crate::solvability::is_solvable;
use crate::solver::statistics::SearchIterationStats;

/// Hard depth cap. The state graph's diameter is 80 moves for any solvable
/// 4x4 board; this is a defensive bound against a broken heuristic, not a
/// value ever expected to be reached.
pub const MAX_DEPTH: u8 = 100;

/// Error returned at the solver boundary.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("board is not solvable")]
    Unsolvable,
    #[error("search exceeded the depth cap of {0} moves without finding a solution")]
    DepthLimitExceeded(u8),
}

/// An IDA* solver for the 4x4 sliding-tile puzzle, owning the Walking
/// Distance and Inversion Distance tables it searches with.
pub struct Solver {
    wd: WalkingDistanceTable,
    id: InversionDistanceTable,
}

impl Solver {
    /// Builds the solver, constructing the Walking Distance and Inversion
    /// Distance tables. Takes well under a second; the result should be
    /// reused across many [`Solver::solve`] calls.
    #[must_use]
    pub fn new() -> Self {
        Self {
            wd: WalkingDistanceTable::build(),
            id: InversionDistanceTable::build(),
        }
    }

    /// Solves `board`, returning the optimal move sequence.
    pub fn solve(&self, board: &Board) -> Result<Vec<Direction>, SearchError> {
        self.solve_impl(board, None)
    }

    /// Like [`Solver::solve`], but invokes `callback` once per finished
    /// outer-loop iteration that did not find a solution.
    pub fn solve_with_callback(
        &self,
        board: &Board,
        callback: &dyn Fn(SearchIterationStats),
    ) -> Result<Vec<Direction>, SearchError> {
        self.solve_impl(board, Some(callback))
    }

    fn solve_impl(
        &self,
        board: &Board,
        callback: Option<&dyn Fn(SearchIterationStats)>,
    ) -> Result<Vec<Direction>, SearchError> {
        if !is_solvable(board) {
            return Err(SearchError::Unsolvable);
        }

        let mut working = *board;
        let (indices, h0) = evaluate_full(&self.wd, &self.id, &working);
        let mut limit = h0;
        let mut path = MoveStack::new();

        loop {
            let mut nodes = 0u64;
            let cur = working.blank_position();
            debug_assert_eq!(working.cell(cur), 0, "blank position cell is not 0 at DFS entry");

            if self.dfs(&mut working, cur, None, 0, limit, indices, &mut path, &mut nodes) {
                debug_assert!(working.is_solved(), "DFS reported success on an unsolved board");
                return Ok((&path).into());
            }

            if let Some(cb) = callback {
                cb(SearchIterationStats {
                    depth_limit: limit,
                    nodes_expanded: nodes,
                });
            }

            let next_limit = limit.checked_add(2).filter(|&l| l <= MAX_DEPTH);
            limit = match next_limit {
                Some(l) => l,
                None => return Err(SearchError::DepthLimitExceeded(limit)),
            };
        }
    }

    /// Bounded recursive depth-first search. Returns `true` (leaving `board`
    /// solved and `path` holding the solution) iff a solution at depth `g`
    /// or deeper, within `limit`, was found starting from this node.
    #[allow(clippy::too_many_arguments)]
    fn dfs(
        &self,
        board: &mut Board,
        cur: usize,
        prev: Option<usize>,
        g: u8,
        limit: u8,
        indices: Indices,
        path: &mut MoveStack,
        nodes: &mut u64,
    ) -> bool {
        *nodes += 1;
        let h = bound(&self.wd, &self.id, indices);

        if h == 0 {
            return true;
        }
        if g + h > limit {
            return false;
        }

        for direction in Direction::ALL {
            let Some(child) = child_blank_position(cur, direction) else {
                continue;
            };
            if Some(child) == prev {
                continue;
            }

            let new_indices = self.apply_move(board, cur, child, direction, indices);

            board.swap(cur, child);
            path.push(direction);

            if self.dfs(board, child, Some(cur), g + 1, limit, new_indices, path, nodes) {
                return true;
            }

            path.pop();
            board.swap(cur, child);
        }

        false
    }

    /// Computes the post-move heuristic indices for sliding the tile
    /// currently at `child` into `cur`, without mutating `board`.
    fn apply_move(
        &self,
        board: &Board,
        cur: usize,
        child: usize,
        direction: Direction,
        indices: Indices,
    ) -> Indices {
        match direction {
            Direction::Up | Direction::Down => {
                let (inv_v, idx_v) = update_vertical(&self.wd, board, cur, child, direction, indices);
                Indices { idx_v, inv_v, ..indices }
            }
            Direction::Left | Direction::Right => {
                let (inv_h, idx_h) = update_horizontal(&self.wd, board, cur, child, direction, indices);
                Indices { idx_h, inv_h, ..indices }
            }
        }
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

/// Blank position after moving in `direction`, or `None` if that would
/// leave the board.
fn child_blank_position(pos: usize, direction: Direction) -> Option<usize> {
    let row = Board::row(pos);
    let col = Board::col(pos);
    match direction {
        Direction::Up => (row > 0).then(|| pos - WIDTH),
        Direction::Down => (row < HEIGHT - 1).then(|| pos + WIDTH),
        Direction::Left => (col > 0).then(|| pos - 1),
        Direction::Right => (col < WIDTH - 1).then(|| pos + 1),
    }
}

/// Incrementally updates `inv_v`/`idx_v` for a vertical move. `cur` and
/// `child` are 4 apart; `tile` is the value at `child` before the swap.
fn update_vertical(
    wd: &WalkingDistanceTable,
    board: &Board,
    cur: usize,
    child: usize,
    direction: Direction,
    indices: Indices,
) -> (u16, u16) {
    let tile = board.cell(child);
    let mut inv_v = indices.inv_v as i32;

    let (lo, hi) = if child < cur { (child, cur) } else { (cur, child) };
    for between in lo + 1..hi {
        let value = board.cell(between);
        let increases = value > tile;
        let up_increases = direction == Direction::Up;
        if increases == up_increases {
            inv_v += 1;
        } else {
            inv_v -= 1;
        }
    }

    let link_dir = u8::from(direction == Direction::Up);
    let goal_class = ((tile - 1) / WIDTH as u8) as usize;
    let idx_v = wd.link(indices.idx_v, link_dir, goal_class);
    debug_assert_ne!(idx_v, SENTINEL, "WD link lookup returned the sentinel for a live move");

    (inv_v as u16, idx_v)
}

/// Incrementally updates `inv_h`/`idx_h` for a horizontal move, scanning
/// the columns of `cur` and `child` above/below per the table builder's
/// axis-flip convention.
fn update_horizontal(
    wd: &WalkingDistanceTable,
    board: &Board,
    cur: usize,
    child: usize,
    direction: Direction,
    indices: Indices,
) -> (u16, u16) {
    let tile = board.cell(child);
    let conv_tile = CONV[tile as usize];
    let mut inv_h = indices.inv_h as i32;

    let (below_col, above_col) = match direction {
        Direction::Left => (child, cur),
        Direction::Right => (cur, child),
        _ => unreachable!("update_horizontal called with a non-horizontal direction"),
    };
    let left_increases = direction == Direction::Left;

    let mut j = below_col + WIDTH;
    while j < crate::board::NUM_CELLS {
        let conv_value = CONV[board.cell(j) as usize];
        let increases = conv_value > conv_tile;
        if increases == left_increases {
            inv_h += 1;
        } else {
            inv_h -= 1;
        }
        j += WIDTH;
    }

    let mut j = above_col;
    while j >= WIDTH {
        j -= WIDTH;
        let conv_value = CONV[board.cell(j) as usize];
        let increases = conv_value > conv_tile;
        if increases == left_increases {
            inv_h += 1;
        } else {
            inv_h -= 1;
        }
    }

    let link_dir = u8::from(direction == Direction::Left);
    let goal_class = ((conv_tile - 1) / WIDTH as u8) as usize;
    let idx_h = wd.link(indices.idx_h, link_dir, goal_class);
    debug_assert_ne!(idx_h, SENTINEL, "WD link lookup returned the sentinel for a live move");

    (inv_h as u16, idx_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve_str(board: &str) -> Vec<Direction> {
        let board: Board = board.parse().unwrap();
        Solver::new().solve(&board).unwrap()
    }

    fn apply(board: &Board, moves: &[Direction]) -> Board {
        let mut board = *board;
        for &direction in moves {
            let cur = board.blank_position();
            let child = child_blank_position(cur, direction).expect("illegal move in solution");
            board.swap(cur, child);
        }
        board
    }

    #[test]
    fn test_already_solved() {
        let moves = solve_str("1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 0");
        assert_eq!(moves.len(), 0);
    }

    #[test]
    fn test_one_move() {
        let moves = solve_str("1 2 3 4 5 6 7 8 9 10 11 12 13 14 0 15");
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn test_two_move() {
        let moves = solve_str("1 2 3 4 5 6 7 8 9 10 11 12 13 0 14 15");
        assert_eq!(moves.len(), 2);
    }

    #[test]
    fn test_short_scramble() {
        let moves = solve_str("1 2 3 4 5 6 7 8 9 10 11 12 0 13 14 15");
        assert_eq!(moves.len(), 3);
    }

    #[test]
    fn test_unsolvable_is_rejected() {
        let board: Board = "1 2 3 4 5 6 7 8 9 10 11 12 13 15 14 0"
            .parse()
            .unwrap();
        assert_eq!(Solver::new().solve(&board), Err(SearchError::Unsolvable));
    }

    #[test]
    fn test_solution_actually_solves_board() {
        let board: Board = "1 2 3 4 5 6 7 8 9 10 11 12 0 13 14 15"
            .parse()
            .unwrap();
        let moves = Solver::new().solve(&board).unwrap();
        let result = apply(&board, &moves);
        assert!(result.is_solved());
    }

    #[test]
    fn test_korf_1() {
        let moves = solve_str("14 13 15 7 11 12 9 5 6 0 2 1 4 8 10 3");
        assert_eq!(moves.len(), 57);
    }

    #[test]
    fn test_incremental_matches_full_evaluator_after_random_walk() {
        use rand::Rng;
        use rand_xoshiro::rand_core::SeedableRng;
        use rand_xoshiro::Xoshiro256PlusPlus;

        let solver = Solver::new();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

        let mut board = Board::solved();
        let (mut indices, _) = evaluate_full(&solver.wd, &solver.id, &board);
        let mut prev: Option<usize> = None;
        let mut cur = board.blank_position();

        for _ in 0..200 {
            let candidates: Vec<Direction> = Direction::ALL
                .into_iter()
                .filter(|&d| child_blank_position(cur, d).is_some_and(|c| Some(c) != prev))
                .collect();
            let direction = candidates[rng.random_range(0..candidates.len())];
            let child = child_blank_position(cur, direction).unwrap();

            let new_indices = solver.apply_move(&board, cur, child, direction, indices);
            board.swap(cur, child);

            let (full_indices, _) = evaluate_full(&solver.wd, &solver.id, &board);
            assert_eq!(new_indices, full_indices);

            indices = new_indices;
            prev = Some(cur);
            cur = child;
        }
    }

    #[test]
    fn test_heuristic_is_admissible_on_small_bfs() {
        use std::collections::{HashMap, VecDeque};

        let solver = Solver::new();
        let max_depth = 5u8;

        let solved = Board::solved();
        let mut dist: HashMap<Board, u8> = HashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(solved, 0);
        queue.push_back((solved, solved.blank_position(), 0u8));

        while let Some((board, cur, depth)) = queue.pop_front() {
            if depth == max_depth {
                continue;
            }
            for direction in Direction::ALL {
                if let Some(child) = child_blank_position(cur, direction) {
                    let mut next = board;
                    next.swap(cur, child);
                    if !dist.contains_key(&next) {
                        dist.insert(next, depth + 1);
                        queue.push_back((next, child, depth + 1));
                    }
                }
            }
        }

        for (board, &true_dist) in &dist {
            let (_, h) = evaluate_full(&solver.wd, &solver.id, board);
            assert!(
                h <= true_dist,
                "heuristic {h} exceeds true distance {true_dist} for board {board:?}"
            );
        }
    }
}
