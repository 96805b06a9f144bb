use std::{iter::Rev, sync::Arc};

use crate::{
    candidates::{BoundedRankedSet, Candidate},
    config::ResultConfig,
    error::Result,
    network::{EdgeSet, NodeSet, Structure},
    result::ResultSummary,
    statistics::RunLog,
};

/// Everything a learner produces: the best scored networks it has seen and the runs
/// that produced them.
///
/// # Invariants
/// - Every candidate shares the collection's node set (same `Arc`).
/// - The ranked set never holds two candidates with the same structure.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use netresult::{config::ResultConfig, network::NodeSet, result::ResultCollection};
///
/// let nodes = Arc::new(NodeSet::new(["a", "b", "c"]));
/// let config = ResultConfig { size: 2, ..ResultConfig::default() };
/// let mut result = ResultCollection::new(nodes, &config);
///
/// result.start_run();
/// result.add_candidate(&vec![(0, 1)], -12.5).unwrap();
/// result.add_candidate(&vec![(1, 2), (0, 1)], -10.0).unwrap();
/// result.add_candidate(&vec![(0, 1), (1, 2)], -3.0).unwrap(); // same structure, dropped
/// result.stop_run().unwrap();
///
/// let best: Vec<f64> = result.ranked_view().map(|c| c.score()).collect();
/// assert_eq!(best, vec![-10.0, -12.5]);
/// ```
#[derive(Debug, Clone)]
pub struct ResultCollection {
    nodes: Arc<NodeSet>,
    ranked: BoundedRankedSet,
    runs: RunLog,
}

impl ResultCollection {
    /// Creates an empty collection keeping at most `config.size` networks.
    pub fn new(nodes: Arc<NodeSet>, config: &ResultConfig) -> Self {
        Self::with_capacity(nodes, config.size)
    }

    /// Creates an empty collection keeping at most `capacity` networks, `0` for no limit.
    pub fn with_capacity(nodes: Arc<NodeSet>, capacity: usize) -> Self {
        ResultCollection {
            nodes,
            ranked: BoundedRankedSet::new(capacity),
            runs: RunLog::new(),
        }
    }

    pub(crate) fn from_parts(nodes: Arc<NodeSet>, ranked: BoundedRankedSet, runs: RunLog) -> Self {
        ResultCollection {
            nodes,
            ranked,
            runs,
        }
    }

    /// Copies the edges of `structure` and offers it with `score`.
    ///
    /// # Returns
    /// Whether the network made it into the collection. A duplicate structure or a score
    /// too low for a full collection gives `Ok(false)`.
    ///
    /// # Errors
    /// [`crate::error::ResultError::NonFiniteScore`] or
    /// [`crate::error::ResultError::EdgeOutOfRange`] for input that cannot form a candidate.
    pub fn add_candidate<S: Structure + ?Sized>(&mut self, structure: &S, score: f64) -> Result<bool> {
        let edges: EdgeSet = structure.edges().collect();
        let candidate = Candidate::new(Arc::clone(&self.nodes), edges, score)?;
        Ok(self.ranked.offer(candidate))
    }

    /// Indicates that the learner is starting a new run.
    pub fn start_run(&mut self) -> usize {
        self.runs.start()
    }

    /// Indicates that the learner is stopping its current run.
    ///
    /// # Errors
    /// [`crate::error::ResultError::InvalidState`] if no run was started.
    pub fn stop_run(&mut self) -> Result<()> {
        self.runs.stop()
    }

    /// Candidates best first, the order expected by posterior computations.
    pub fn ranked_view(&self) -> Rev<std::slice::Iter<'_, Candidate>> {
        self.ranked.ranked()
    }

    /// The `n` best candidates, best first.
    pub fn top(&self, n: usize) -> impl Iterator<Item = &Candidate> {
        self.ranked_view().take(n)
    }

    /// Candidates in storage order, worst first.
    pub fn candidates(&self) -> std::slice::Iter<'_, Candidate> {
        self.ranked.iter()
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.ranked.best()
    }

    pub fn nodes(&self) -> &Arc<NodeSet> {
        &self.nodes
    }

    pub fn runs(&self) -> &RunLog {
        &self.runs
    }

    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.ranked.capacity()
    }

    pub fn summary(&self, top_n: usize) -> ResultSummary {
        ResultSummary::from_collection(self, top_n)
    }
}
