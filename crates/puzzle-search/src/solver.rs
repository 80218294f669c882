//! Shared solver surface: the `Solver` trait, search limits and statistics.
//!
//! Both strategies report "no solution" as an empty path. Running out of
//! time, depth or memory budget is reported as a [`SearchError`] instead, so
//! callers can tell an exhausted search from a truncated one.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::ValueEnum;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::bfs::BfsSolver;
use crate::dfs::DfsSolver;
use crate::error::SearchError;
use crate::puzzle::{Puzzle, Seen};

/// Cooperative cancellation shared with whoever may want to stop a search.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Limits applied to a single solve. The default is unbounded.
#[derive(Debug, Clone, Default)]
pub struct SolverConfig {
    /// Maximum wall-clock time for one solve
    pub timeout: Option<Duration>,
    /// Maximum number of steps away from the initial state (DFS stack height)
    pub max_depth: Option<usize>,
    /// Maximum number of states held for path reconstruction (BFS)
    pub max_states: Option<usize>,
    /// Checked once per expanded state
    pub cancel: Option<CancelFlag>,
}

impl SolverConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = Some(max_states);
        self
    }

    pub fn with_cancel(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

/// Counters collected during one solve
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// States whose extensions were generated
    pub states_expanded: usize,
    /// Extensions produced across all expansions, before deduplication
    pub states_generated: usize,
    /// Largest frontier (BFS) or stack (DFS) observed
    pub max_frontier: usize,
    /// Deepest state reached, in steps from the initial state
    pub max_depth: usize,
    pub time_elapsed_ms: u64,
}

/// A solution path plus the statistics of the search that produced it.
#[derive(Debug, Clone)]
pub struct SearchOutcome<P> {
    /// Initial state first, solved state last. Empty when no solution exists.
    pub path: Vec<P>,
    pub stats: SearchStats,
}

impl<P> SearchOutcome<P> {
    pub fn is_solved(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of moves in the solution, if there is one
    pub fn steps(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

/// A search strategy over [`Puzzle`] states.
///
/// `seen` holds fingerprints that must not appear on the returned path. When
/// `None`, a fresh set is used. The set is extended in place with every state
/// the solver visits, so a caller-owned set must not be shared between
/// concurrent solves.
pub trait Solver {
    fn search<P: Puzzle>(
        &self,
        puzzle: P,
        seen: Option<&mut Seen>,
    ) -> Result<SearchOutcome<P>, SearchError>;

    /// Like [`Solver::search`] without the statistics.
    fn solve<P: Puzzle>(&self, puzzle: P, seen: Option<&mut Seen>) -> Result<Vec<P>, SearchError> {
        self.search(puzzle, seen).map(|outcome| outcome.path)
    }
}

/// Runtime choice between the two strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    Dfs,
    Bfs,
}

impl SolverKind {
    pub fn search<P: Puzzle>(
        self,
        config: &SolverConfig,
        puzzle: P,
        seen: Option<&mut Seen>,
    ) -> Result<SearchOutcome<P>, SearchError> {
        match self {
            SolverKind::Dfs => DfsSolver::with_config(config.clone()).search(puzzle, seen),
            SolverKind::Bfs => BfsSolver::with_config(config.clone()).search(puzzle, seen),
        }
    }
}

/// Tracks elapsed time and cancellation for one solve.
pub(crate) struct Budget<'a> {
    config: &'a SolverConfig,
    started: Instant,
    deadline: Option<Instant>,
}

impl<'a> Budget<'a> {
    pub(crate) fn start(config: &'a SolverConfig) -> Self {
        let started = Instant::now();
        Self {
            config,
            started,
            deadline: config.timeout.map(|t| started + t),
        }
    }

    pub(crate) fn check(&self) -> Result<(), SearchError> {
        if self.config.cancel.as_ref().map_or(false, CancelFlag::is_cancelled) {
            warn!("search cancelled after {:?}", self.started.elapsed());
            return Err(SearchError::Cancelled);
        }
        if let (Some(deadline), Some(timeout)) = (self.deadline, self.config.timeout) {
            if Instant::now() > deadline {
                warn!("search timed out after {:?}", timeout);
                return Err(SearchError::Timeout(timeout));
            }
        }
        Ok(())
    }

    pub(crate) fn check_depth(&self, depth: usize) -> Result<(), SearchError> {
        match self.config.max_depth {
            Some(limit) if depth > limit => {
                warn!("search depth {} exceeds limit {}", depth, limit);
                Err(SearchError::DepthLimit(limit))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn check_states(&self, states: usize) -> Result<(), SearchError> {
        match self.config.max_states {
            Some(limit) if states > limit => {
                warn!("search holds {} states, limit is {}", states, limit);
                Err(SearchError::StateLimit(limit))
            }
            _ => Ok(()),
        }
    }

    pub(crate) fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budget_is_unbounded() {
        let config = SolverConfig::default();
        let budget = Budget::start(&config);
        assert!(budget.check().is_ok());
        assert!(budget.check_depth(usize::MAX).is_ok());
        assert!(budget.check_states(usize::MAX).is_ok());
    }

    #[test]
    fn test_cancel_flag_stops_budget() {
        let cancel = CancelFlag::new();
        let config = SolverConfig::default().with_cancel(cancel.clone());
        let budget = Budget::start(&config);
        assert!(budget.check().is_ok());

        cancel.cancel();
        assert_eq!(budget.check(), Err(SearchError::Cancelled));
    }

    #[test]
    fn test_zero_timeout_expires() {
        let config = SolverConfig::default().with_timeout(Duration::ZERO);
        let budget = Budget::start(&config);
        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(budget.check(), Err(SearchError::Timeout(Duration::ZERO)));
    }

    #[test]
    fn test_depth_and_state_limits() {
        let config = SolverConfig::default().with_max_depth(3).with_max_states(10);
        let budget = Budget::start(&config);
        assert!(budget.check_depth(3).is_ok());
        assert_eq!(budget.check_depth(4), Err(SearchError::DepthLimit(3)));
        assert!(budget.check_states(10).is_ok());
        assert_eq!(budget.check_states(11), Err(SearchError::StateLimit(10)));
    }

    #[test]
    fn test_outcome_steps() {
        let empty: SearchOutcome<u8> = SearchOutcome {
            path: vec![],
            stats: SearchStats::default(),
        };
        assert!(!empty.is_solved());
        assert_eq!(empty.steps(), None);

        let two = SearchOutcome {
            path: vec![1u8, 2],
            stats: SearchStats::default(),
        };
        assert!(two.is_solved());
        assert_eq!(two.steps(), Some(1));
    }
}
