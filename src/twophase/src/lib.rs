#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::too_many_lines)]

//! A Kociemba two-phase solver for the 3x3x3 cube.
//!
//! The cube is projected onto a handful of small integer coordinates. Move
//! tables and admissible pruning tables over those coordinates drive an
//! iterative deepening A* search, first into the subgroup `<U, D, R2, L2,
//! F2, B2>` and then to the solved state.

pub mod config;
pub mod coordinates;
pub mod cube;
pub mod facelet;
pub mod move_table;
pub mod notation;
pub mod pruning;
pub mod solver;
pub mod tables;
pub mod worker;

pub use config::{ConfigError, SolverConfig};
pub use cube::Cube;
pub use facelet::FaceletError;
pub use notation::{Algorithm, Move, MoveFace, NotationError, Power, inverse};
pub use solver::{Solver, SolverError};
pub use tables::{SolverTables, init_solver, scramble, solver_tables};
pub use worker::{SolverWorker, WorkerError, WorkerRequest, WorkerResponse};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}

/// The number of moves a move table has a column for: the six outer faces
/// in all three powers.
pub const N_MOVES: usize = 18;

/// The default search budget. Every reachable cube has a two-phase solution
/// of at most this length.
pub const DEFAULT_MAX_DEPTH: usize = 22;

/// A precomputed factorial table for 0! to 12!, where index[i] is i!.
const FACTORIAL: [u32; 13] = {
    let mut arr = [0; 13];
    arr[0] = 1;
    let mut i = 1;
    while i < arr.len() {
        arr[i] = arr[i - 1] * i as u32;
        i += 1;
    }
    arr
};
