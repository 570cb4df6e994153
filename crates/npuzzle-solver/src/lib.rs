//! Optimal N-puzzle solver.
//!
//! This crate provides an immutable [`Board`] with Manhattan and Hamming
//! heuristics, and a [`Solver`] that runs A* on the board and on its twin in
//! lockstep to find a shortest solution or prove that none exists.

pub mod board;
pub mod loader;
pub mod search;
pub mod solver;

// Re-export main types
pub use board::{Board, BoardError, Slide};
pub use loader::{Format, LoadError};
pub use solver::{Solver, SolverConfig, SolverError, SolverStats};
