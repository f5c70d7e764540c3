//! Runs in its own process so the process-wide tables are never generated.

use twophase::{Cube, SolverError, scramble, solver_tables};

#[test_log::test]
fn test_solve_before_init() {
    assert_eq!(
        Cube::identity().solve(22),
        Err(SolverError::NotInitialized)
    );
    assert!(matches!(solver_tables(), Err(SolverError::NotInitialized)));
    assert_eq!(scramble(), Err(SolverError::NotInitialized));
}
