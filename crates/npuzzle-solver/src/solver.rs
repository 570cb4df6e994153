//! Optimal solver: A* run in lockstep on a board and on its twin.
//!
//! A board and its twin sit in opposite parity classes of the puzzle, and
//! within a class every board can reach the goal. Advancing both searches one
//! expansion at a time therefore always terminates: whichever search dequeues
//! the goal first tells us whether the original board is solvable, with no
//! inversion counting needed.

use std::fmt;
use std::time::Instant;

use log::{debug, info};

use crate::board::{Board, Slide};
use crate::search::{NodeId, Search, SearchCounters};

/// How often (in lockstep iterations) frontier sizes are logged.
const PROGRESS_INTERVAL: usize = 100_000;

/// Configuration for the solver
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Keep a visited set per search and drop nodes whose board was already
    /// expanded. Move counts are unchanged; the reported path may differ.
    pub dedupe_visited: bool,
}

/// Work done by a finished solve, both searches combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverStats {
    pub nodes_expanded: usize,
    pub nodes_created: usize,
    pub stale_skipped: usize,
    pub time_elapsed_ms: u64,
}

impl SolverStats {
    fn collect(primary: SearchCounters, twin: SearchCounters, started: Instant) -> Self {
        Self {
            nodes_expanded: primary.expanded + twin.expanded,
            nodes_created: primary.created + twin.created,
            stale_skipped: primary.stale_skipped + twin.stale_skipped,
            time_elapsed_ms: started.elapsed().as_millis() as u64,
        }
    }
}

/// Errors raised before any search work starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// No initial board was supplied.
    MissingBoard,
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBoard => write!(f, "no initial board was supplied"),
        }
    }
}

impl std::error::Error for SolverError {}

/// Outcome of one lockstep step.
enum Step {
    Continue,
    Solved(NodeId),
    Unsolvable,
}

/// A completed solve of one initial board.
#[derive(Debug, Clone)]
pub struct Solver {
    solution: Option<Vec<Board>>,
    stats: SolverStats,
}

impl Solver {
    /// Value reported by [`Solver::moves`] for unsolvable boards.
    pub const UNSOLVABLE: i32 = -1;

    /// Solve `initial` with the default configuration.
    pub fn new(initial: Board) -> Self {
        Self::with_config(initial, &SolverConfig::default())
    }

    /// Solve an optional board, failing before any search work when it is
    /// absent.
    pub fn try_new(initial: Option<Board>, config: &SolverConfig) -> Result<Self, SolverError> {
        let initial = initial.ok_or(SolverError::MissingBoard)?;
        Ok(Self::with_config(initial, config))
    }

    /// Solve `initial`. Blocks until the search has an answer.
    pub fn with_config(initial: Board, config: &SolverConfig) -> Self {
        let started = Instant::now();
        info!(
            "solving {n}x{n} board (manhattan {}, dedupe {})",
            initial.manhattan(),
            config.dedupe_visited,
            n = initial.dimension()
        );

        let twin = initial.twin();
        let mut primary = Search::new(initial, config.dedupe_visited);
        let mut mirror = Search::new(twin, config.dedupe_visited);

        let mut iterations = 0usize;
        let outcome = loop {
            match step(&mut primary, &mut mirror) {
                Step::Continue => {}
                Step::Solved(goal) => break Some(goal),
                Step::Unsolvable => break None,
            }

            iterations += 1;
            if iterations % PROGRESS_INTERVAL == 0 {
                debug!(
                    "iteration {iterations}: frontier sizes {} / {}",
                    primary.frontier_len(),
                    mirror.frontier_len()
                );
            }
        };

        let solution = outcome.map(|goal| primary.path_to(goal));
        let stats = SolverStats::collect(primary.counters(), mirror.counters(), started);

        match &solution {
            Some(path) => info!(
                "solved in {} moves ({} nodes expanded, {} ms)",
                path.len() - 1,
                stats.nodes_expanded,
                stats.time_elapsed_ms
            ),
            None => info!(
                "board is unsolvable ({} nodes expanded, {} ms)",
                stats.nodes_expanded, stats.time_elapsed_ms
            ),
        }

        Self { solution, stats }
    }

    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    /// Minimum number of slides, or [`Solver::UNSOLVABLE`].
    pub fn moves(&self) -> i32 {
        match &self.solution {
            Some(path) => path.len() as i32 - 1,
            None => Self::UNSOLVABLE,
        }
    }

    /// Boards from the initial board to the goal, inclusive.
    pub fn solution(&self) -> Option<&[Board]> {
        self.solution.as_deref()
    }

    /// Direction of the blank for each move of the solution.
    pub fn slides(&self) -> Option<Vec<Slide>> {
        let path = self.solution.as_ref()?;
        path.windows(2)
            .map(|pair| pair[0].slide_to(&pair[1]))
            .collect()
    }

    pub fn stats(&self) -> &SolverStats {
        &self.stats
    }
}

/// Dequeue once from each search, check for the goal, then expand both.
fn step(primary: &mut Search, mirror: &mut Search) -> Step {
    // An exhausted primary frontier (only possible with a visited set) means
    // the goal is unreachable from the initial board.
    let Some(node) = primary.pop() else {
        return Step::Unsolvable;
    };
    let twin_node = mirror.pop();

    if primary.node(node).board.is_goal() {
        return Step::Solved(node);
    }
    if let Some(twin_node) = twin_node {
        if mirror.node(twin_node).board.is_goal() {
            return Step::Unsolvable;
        }
    }

    primary.expand(node);
    if let Some(twin_node) = twin_node {
        mirror.expand(twin_node);
    }
    Step::Continue
}
