use crate::{
    DEFAULT_MAX_DEPTH,
    move_table::MoveTables,
    notation::Algorithm,
    pruning::PruningTables,
    solver::{Solver, SolverError},
};
use std::sync::OnceLock;

/// Every precomputed table the search reads. Immutable once generated.
pub struct SolverTables {
    pub moves: MoveTables,
    pub pruning: PruningTables,
}

impl SolverTables {
    #[must_use]
    pub fn generate() -> Self {
        let moves = MoveTables::generate();
        let pruning = PruningTables::generate(&moves);
        SolverTables { moves, pruning }
    }
}

static TABLES: OnceLock<SolverTables> = OnceLock::new();

/// Generate the process-wide tables if they do not exist yet. Concurrent
/// callers wait for the one generation.
pub fn init_solver() -> &'static SolverTables {
    TABLES.get_or_init(SolverTables::generate)
}

/// The process-wide tables.
///
/// # Errors
///
/// `SolverError::NotInitialized` if `init_solver` has not run yet.
pub fn solver_tables() -> Result<&'static SolverTables, SolverError> {
    TABLES.get().ok_or(SolverError::NotInitialized)
}

/// A scramble to a uniformly random cube, using the process-wide tables.
///
/// # Errors
///
/// `SolverError::NotInitialized` if `init_solver` has not run yet.
pub fn scramble() -> Result<Algorithm, SolverError> {
    let solver = Solver::new(solver_tables()?).with_max_depth(DEFAULT_MAX_DEPTH);
    let mut rng = fastrand::Rng::new();
    // Practically every random cube is solved within the default budget
    loop {
        if let Some(scramble) = solver.scramble(&mut rng) {
            return Ok(scramble);
        }
    }
}
