use crate::{
    DEFAULT_MAX_DEPTH, start, success, working,
    config::SolverConfig,
    coordinates::{Coordinate, FrToBr, N_SLICE_PERM, UbToDf, UrToUl, UrfToDlf},
    cube::Cube,
    move_table::{PHASE_TWO_MOVES, parity_move},
    notation::{Algorithm, Move, MoveFace, NotationError},
    tables::{SolverTables, solver_tables},
};
use log::{debug, info};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("The solver tables are not initialized, call `init_solver` first")]
    NotInitialized,
    #[error(transparent)]
    Notation(#[from] NotationError),
}

/// Whether `face` may follow a move with code `last_move`. Turning the same
/// face twice in a row is never useful, and of two opposite faces only the
/// order with the lower face first is searched.
#[inline]
fn follows(last_move: Option<usize>, face: usize) -> bool {
    last_move.is_none_or(|last_move| {
        let last_face = last_move / 3;
        face != last_face && face + 3 != last_face
    })
}

fn is_phase_two_move(moove: usize) -> bool {
    PHASE_TWO_MOVES.contains(&moove)
}

/// One slot of the search arena. The node at depth `d` was reached from the
/// node at depth `d - 1` by `last_move`.
#[derive(Debug, Clone, Copy, Default)]
struct SearchNode {
    last_move: Option<usize>,

    flip: u32,
    twist: u32,
    slice: u32,

    parity: u8,
    urf_to_dlf: u32,
    fr_to_br: u32,
    ur_to_ul: u32,
    ub_to_df: u32,
    ur_to_df: u32,
}

impl SearchNode {
    fn new(cube: &Cube) -> Self {
        let fr_to_br = FrToBr::encode(cube);
        SearchNode {
            last_move: None,
            flip: cube.flip(),
            twist: cube.twist(),
            slice: fr_to_br / N_SLICE_PERM as u32,
            parity: cube.corner_parity(),
            urf_to_dlf: UrfToDlf::encode(cube),
            fr_to_br,
            ur_to_ul: UrToUl::encode(cube),
            ub_to_df: UbToDf::encode(cube),
            ur_to_df: 0,
        }
    }
}

/// The mutable state of one search. Owned by a single `solve` call.
struct Search<'t> {
    tables: &'t SolverTables,
    nodes: Vec<SearchNode>,
    max_depth: usize,
    nodes_visited: u64,
    solution_depth: Option<usize>,
}

impl Search<'_> {
    fn phase_one_child(&self, parent: &SearchNode, moove: usize) -> SearchNode {
        let moves = &self.tables.moves;
        SearchNode {
            last_move: Some(moove),
            flip: moves.flip.apply(parent.flip, moove),
            twist: moves.twist.apply(parent.twist, moove),
            slice: moves
                .fr_to_br
                .apply(parent.slice * N_SLICE_PERM as u32, moove)
                / N_SLICE_PERM as u32,
            ..SearchNode::default()
        }
    }

    fn phase_two_child(&self, parent: &SearchNode, moove: usize) -> SearchNode {
        let moves = &self.tables.moves;
        SearchNode {
            last_move: Some(moove),
            parity: parity_move(parent.parity, moove),
            urf_to_dlf: moves.urf_to_dlf.apply(parent.urf_to_dlf, moove),
            fr_to_br: moves.fr_to_br.apply(parent.fr_to_br, moove),
            ur_to_df: moves.ur_to_df.apply(parent.ur_to_df, moove),
            ..SearchNode::default()
        }
    }

    /// Search every phase 1 continuation of the node at `depth` that uses
    /// exactly `remaining` more moves.
    fn phase_one(&mut self, depth: usize, remaining: usize) -> bool {
        self.nodes_visited += 1;
        let node = self.nodes[depth];
        let distance = self
            .tables
            .pruning
            .phase_one_distance(node.flip, node.twist, node.slice);

        if remaining == 0 {
            // Ending phase 1 with a phase 2 move would let phase 2 undo it
            return distance == 0
                && node.last_move.is_none_or(|moove| !is_phase_two_move(moove))
                && self.phase_two_search(depth);
        }
        if usize::from(distance) > remaining {
            return false;
        }

        for moove in Move::outer().map(Move::code) {
            if !follows(node.last_move, moove / 3) {
                continue;
            }
            self.nodes[depth + 1] = self.phase_one_child(&node, moove);
            if self.phase_one(depth + 1, remaining - 1) {
                return true;
            }
        }
        false
    }

    /// Replay the phase 2 coordinates from the root to the phase 1 leaf at
    /// `depth`. `None` when the edge halves cannot be merged.
    fn init_phase_two(&mut self, depth: usize) -> Option<()> {
        let moves = &self.tables.moves;
        for i in 1..=depth {
            let parent = self.nodes[i - 1];
            let node = &mut self.nodes[i];
            let moove = node.last_move?;
            node.parity = parity_move(parent.parity, moove);
            node.urf_to_dlf = moves.urf_to_dlf.apply(parent.urf_to_dlf, moove);
            node.fr_to_br = moves.fr_to_br.apply(parent.fr_to_br, moove);
            node.ur_to_ul = moves.ur_to_ul.apply(parent.ur_to_ul, moove);
            node.ub_to_df = moves.ub_to_df.apply(parent.ub_to_df, moove);
        }

        let leaf = &mut self.nodes[depth];
        leaf.ur_to_df = moves.merge.merge(leaf.ur_to_ul, leaf.ub_to_df)?;
        Some(())
    }

    /// Run phase 2 from the phase 1 leaf at `depth` within what is left of
    /// the move budget.
    fn phase_two_search(&mut self, depth: usize) -> bool {
        if self.init_phase_two(depth).is_none() {
            return false;
        }
        (0..=self.max_depth - depth).any(|limit| self.phase_two(depth, limit))
    }

    fn phase_two(&mut self, depth: usize, remaining: usize) -> bool {
        self.nodes_visited += 1;
        let node = self.nodes[depth];
        let distance = self.tables.pruning.phase_two_distance(
            node.urf_to_dlf,
            node.ur_to_df,
            node.fr_to_br,
            node.parity,
        );

        if remaining == 0 {
            if distance == 0 {
                self.solution_depth = Some(depth);
            }
            return distance == 0;
        }
        if usize::from(distance) > remaining {
            return false;
        }

        for moove in PHASE_TWO_MOVES {
            if !follows(node.last_move, moove / 3) {
                continue;
            }
            self.nodes[depth + 1] = self.phase_two_child(&node, moove);
            if self.phase_two(depth + 1, remaining - 1) {
                return true;
            }
        }
        false
    }

    /// The moves from the root to the node at `depth`.
    fn solution(&self, depth: usize) -> Algorithm {
        self.nodes[1..=depth]
            .iter()
            .filter_map(|node| node.last_move.and_then(Move::from_code))
            .collect::<Vec<_>>()
            .into()
    }
}

/// A two-phase solver over a borrowed set of tables. Solvers are cheap; many
/// may share one [`SolverTables`] across threads.
#[derive(Clone, Copy)]
pub struct Solver<'t> {
    tables: &'t SolverTables,
    max_depth: usize,
}

impl<'t> Solver<'t> {
    /// A solver with the default move budget.
    #[must_use]
    pub fn new(tables: &'t SolverTables) -> Self {
        Solver {
            tables,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// A solver with the move budget of `config`.
    #[must_use]
    pub fn from_config(tables: &'t SolverTables, config: &SolverConfig) -> Self {
        Solver::new(tables).with_max_depth(config.max_depth)
    }

    /// Limit solutions to at most `max_depth` moves.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Solve a cube whose F and U centers are in place. `None` when no
    /// solution of at most `max_depth` moves is found.
    #[must_use]
    pub fn solve_upright(&self, cube: &Cube) -> Option<Algorithm> {
        info!(start!("Searching for a two-phase solution..."));
        let start = Instant::now();
        let mut search = Search {
            tables: self.tables,
            nodes: vec![SearchNode::default(); self.max_depth + 1],
            max_depth: self.max_depth,
            nodes_visited: 0,
            solution_depth: None,
        };
        search.nodes[0] = SearchNode::new(cube);

        for limit in 1..=self.max_depth {
            debug!(working!("Searching phase 1 depth limit {}..."), limit);
            let depth_start = Instant::now();
            let found = search.phase_one(0, limit);
            debug!(
                working!("Traversed {} nodes in {:.3}s"),
                search.nodes_visited,
                depth_start.elapsed().as_secs_f64()
            );
            if found {
                break;
            }
        }

        let Some(depth) = search.solution_depth else {
            info!(
                "No solution within {} moves after {:.3}s",
                self.max_depth,
                start.elapsed().as_secs_f64()
            );
            return None;
        };
        let solution = search.solution(depth);
        info!(
            success!("Found a {} move solution in {:.3}s"),
            solution.len(),
            start.elapsed().as_secs_f64()
        );
        Some(solution)
    }

    /// Solve a cube in any orientation. The returned moves apply to `cube`
    /// as given, and leave it solved up to a whole cube rotation.
    #[must_use]
    pub fn solve(&self, cube: &Cube) -> Option<Algorithm> {
        let upright = cube.upright();
        let mut uprighted = *cube;
        uprighted.apply_alg(&upright);
        // Which face of the original cube each face of the uprighted cube is
        let rotation = Cube::identity().apply_alg(&upright).center;

        let solution = self.solve_upright(&uprighted)?;
        solution
            .moves()
            .iter()
            .map(|moove| {
                let face = MoveFace::from_index(usize::from(rotation[moove.face.index()]))?;
                Some(Move::new(face, moove.power))
            })
            .collect::<Option<Vec<_>>>()
            .map(Algorithm::new)
    }

    /// A scramble that produces a uniformly random cube from the solved
    /// cube, or `None` if the random cube has no solution within the move
    /// budget.
    #[must_use]
    pub fn scramble(&self, rng: &mut fastrand::Rng) -> Option<Algorithm> {
        let cube = Cube::random(rng);
        self.solve(&cube).map(|solution| solution.inverse())
    }
}

impl Cube {
    /// Solve with the process-wide tables.
    ///
    /// # Errors
    ///
    /// `SolverError::NotInitialized` if `init_solver` has not run yet.
    pub fn solve(&self, max_depth: usize) -> Result<Option<Algorithm>, SolverError> {
        let tables = solver_tables()?;
        Ok(Solver::new(tables).with_max_depth(max_depth).solve(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follows() {
        assert!(follows(None, 0));
        // U then U
        assert!(!follows(Some(0), 0));
        // U then D is searched, D then U is not
        assert!(follows(Some(2), 3));
        assert!(!follows(Some(9), 0));
        // L then R is not
        assert!(!follows(Some(12), 1));
        assert!(follows(Some(12), 2));
    }

    #[test]
    fn test_phase_two_moves() {
        let names: Vec<String> = PHASE_TWO_MOVES
            .iter()
            .map(|&code| Move::from_code(code).unwrap().to_string())
            .collect();
        assert_eq!(names, ["U", "U2", "U'", "R2", "F2", "D", "D2", "D'", "L2", "B2"]);
    }
}
