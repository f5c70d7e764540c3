//! A solver running on its own thread, driven by request and response
//! messages.

use crate::{
    cube::Cube,
    notation::Algorithm,
    solver::{Solver, SolverError},
    tables::SolverTables,
};
use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{debug, warn};
use std::thread::{self, JoinHandle};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerRequest {
    /// Generate the worker's tables. Later `Init`s do nothing.
    Init,
    Solve { cube: Cube, max_depth: usize },
    Scramble,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    Initialized,
    Solved(Result<Option<Algorithm>, SolverError>),
    Scrambled(Result<Algorithm, SolverError>),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    #[error("The solver thread has stopped")]
    Disconnected,
}

/// Owns the solver thread. Requests are answered in the order they are sent.
/// Dropping the worker stops the thread once it has answered everything
/// already sent.
pub struct SolverWorker {
    request_tx: Option<Sender<WorkerRequest>>,
    response_rx: Receiver<WorkerResponse>,
    handle: Option<JoinHandle<()>>,
}

impl SolverWorker {
    #[must_use]
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = unbounded::<WorkerRequest>();
        let (response_tx, response_rx) = unbounded::<WorkerResponse>();
        let handle = thread::spawn(move || solver_loop(&request_rx, &response_tx));

        SolverWorker {
            request_tx: Some(request_tx),
            response_rx,
            handle: Some(handle),
        }
    }

    /// Queue a request without waiting for its response.
    ///
    /// # Errors
    ///
    /// If the solver thread is gone.
    pub fn send(&self, request: WorkerRequest) -> Result<(), WorkerError> {
        self.request_tx
            .as_ref()
            .ok_or(WorkerError::Disconnected)?
            .send(request)
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Wait for the response to the oldest unanswered request.
    ///
    /// # Errors
    ///
    /// If the solver thread is gone.
    pub fn recv(&self) -> Result<WorkerResponse, WorkerError> {
        self.response_rx
            .recv()
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Send a request and wait for its response.
    ///
    /// # Errors
    ///
    /// If the solver thread is gone.
    pub fn request(&self, request: WorkerRequest) -> Result<WorkerResponse, WorkerError> {
        self.send(request)?;
        self.recv()
    }
}

impl Drop for SolverWorker {
    fn drop(&mut self) {
        // Closing the request channel ends the loop
        drop(self.request_tx.take());
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("The solver thread panicked");
        }
    }
}

fn solver_loop(request_rx: &Receiver<WorkerRequest>, response_tx: &Sender<WorkerResponse>) {
    let mut tables: Option<SolverTables> = None;
    let mut rng = fastrand::Rng::new();

    for request in request_rx {
        debug!("Solver thread received {request:?}");
        let response = match request {
            WorkerRequest::Init => {
                tables.get_or_insert_with(SolverTables::generate);
                WorkerResponse::Initialized
            }
            WorkerRequest::Solve { cube, max_depth } => WorkerResponse::Solved(
                tables
                    .as_ref()
                    .ok_or(SolverError::NotInitialized)
                    .map(|tables| Solver::new(tables).with_max_depth(max_depth).solve(&cube)),
            ),
            WorkerRequest::Scramble => {
                WorkerResponse::Scrambled(tables.as_ref().ok_or(SolverError::NotInitialized).map(
                    |tables| {
                        let solver = Solver::new(tables);
                        loop {
                            if let Some(scramble) = solver.scramble(&mut rng) {
                                break scramble;
                            }
                        }
                    },
                ))
            }
        };
        if response_tx.send(response).is_err() {
            break;
        }
    }
}
