use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
    sync::Arc,
};

use crate::{
    candidates::{Fingerprint, TotalF64},
    error::{Result, ResultError},
    network::{EdgeSet, NodeSet},
};

/// A scored network proposed by the search process.
///
/// Candidates are immutable once built. Equality and hashing follow the structure only
/// (the edge set, through its fingerprint), so the same network offered twice with two
/// different scores is the same candidate. Ordering follows the score, with the
/// fingerprint as tie breaker to keep sorts deterministic.
///
/// # Ordering
/// [`Eq`] and [`Ord`] disagree: two candidates with the same structure and different
/// scores are equal, yet `cmp` does not return [`Ordering::Equal`] for them. Sorting a
/// slice is fine, but do not key a `BTreeSet`, `BTreeMap` or `BinaryHeap` on candidates
/// and expect it to deduplicate structures. Use [`Candidate::fingerprint`] as the key,
/// the way [`BoundedRankedSet`](crate::candidates::BoundedRankedSet) does.
///
/// Cloning copies the edges but shares the node set.
#[derive(Clone, Debug)]
pub struct Candidate {
    nodes: Arc<NodeSet>,
    edges: EdgeSet,
    score: TotalF64,
    fingerprint: Fingerprint,
}

impl Candidate {
    /// Builds a candidate over `nodes`.
    ///
    /// # Errors
    /// - [`ResultError::NonFiniteScore`] if `score` is NaN or infinite.
    /// - [`ResultError::EdgeOutOfRange`] if an edge endpoint is not a node of `nodes`.
    pub fn new(nodes: Arc<NodeSet>, edges: EdgeSet, score: f64) -> Result<Self> {
        if !score.is_finite() {
            return Err(ResultError::NonFiniteScore(score));
        }
        if let Some(edge) = edges.first_out_of_range(nodes.len()) {
            return Err(ResultError::EdgeOutOfRange {
                src: edge.src,
                dest: edge.dest,
                nodes: nodes.len(),
            });
        }
        let fingerprint = Fingerprint::of(&edges);
        Ok(Candidate {
            nodes,
            edges,
            score: score.into(),
            fingerprint,
        })
    }

    pub fn nodes(&self) -> &Arc<NodeSet> {
        &self.nodes
    }

    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    pub fn score(&self) -> f64 {
        self.score.0
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// Same edges and score, attached to another (compatible) node set.
    pub(crate) fn rebind(&self, nodes: &Arc<NodeSet>) -> Self {
        Candidate {
            nodes: Arc::clone(nodes),
            ..self.clone()
        }
    }

    pub(crate) fn total_score(&self) -> TotalF64 {
        self.score
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl Eq for Candidate {}

impl Hash for Candidate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .cmp(&other.score)
            .then_with(|| self.fingerprint.cmp(&other.fingerprint))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::Edge;

    fn nodes() -> Arc<NodeSet> {
        Arc::new(NodeSet::new(["a", "b", "c"]))
    }

    fn edges(pairs: &[(usize, usize)]) -> EdgeSet {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_equality_ignores_score() {
        let n = nodes();
        let a = Candidate::new(Arc::clone(&n), edges(&[(0, 1)]), 5.0).unwrap();
        let b = Candidate::new(Arc::clone(&n), edges(&[(0, 1)]), 9.0).unwrap();
        assert_eq!(a, b);
        assert!(a < b);
    }

    #[test]
    fn test_btree_keyed_on_candidates_keeps_equal_structures() {
        let n = nodes();
        let a = Candidate::new(Arc::clone(&n), edges(&[(0, 1)]), 5.0).unwrap();
        let b = Candidate::new(Arc::clone(&n), edges(&[(0, 1)]), 9.0).unwrap();
        let ordered: std::collections::BTreeSet<_> = [a.clone(), b.clone()].into_iter().collect();
        assert_eq!(ordered.len(), 2);

        let by_fingerprint: std::collections::BTreeSet<_> =
            [a, b].iter().map(Candidate::fingerprint).collect();
        assert_eq!(by_fingerprint.len(), 1);
    }

    #[test]
    fn test_ordering_by_score_then_structure() {
        let n = nodes();
        let low = Candidate::new(Arc::clone(&n), edges(&[(0, 1)]), -10.0).unwrap();
        let high = Candidate::new(Arc::clone(&n), edges(&[(1, 2)]), -2.0).unwrap();
        assert!(low < high);

        let x = Candidate::new(Arc::clone(&n), edges(&[(0, 2)]), 1.0).unwrap();
        let y = Candidate::new(Arc::clone(&n), edges(&[(2, 0)]), 1.0).unwrap();
        assert_ne!(x.cmp(&y), Ordering::Equal);
        assert_eq!(x.cmp(&y), x.fingerprint().cmp(&y.fingerprint()));
    }

    #[test]
    fn test_rejects_non_finite_scores() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = Candidate::new(nodes(), EdgeSet::new(), bad).unwrap_err();
            assert!(matches!(err, ResultError::NonFiniteScore(_)));
        }
    }

    #[test]
    fn test_rejects_edges_outside_node_set() {
        let err = Candidate::new(nodes(), edges(&[(0, 3)]), 0.0).unwrap_err();
        assert!(matches!(
            err,
            ResultError::EdgeOutOfRange {
                src: 0,
                dest: 3,
                nodes: 3
            }
        ));
    }

    #[test]
    fn test_clone_shares_nodes_and_copies_edges() {
        let n = nodes();
        let a = Candidate::new(Arc::clone(&n), edges(&[(0, 1), (1, 2)]), 3.0).unwrap();
        let b = a.clone();
        assert!(Arc::ptr_eq(a.nodes(), b.nodes()));
        assert_ne!(a.edges().as_slice().as_ptr(), b.edges().as_slice().as_ptr());
        assert!(b.edges().contains(Edge::new(1, 2)));
    }

    #[test]
    fn test_rebind_swaps_node_set_only() {
        let a = Candidate::new(nodes(), edges(&[(0, 1)]), 3.0).unwrap();
        let other = nodes();
        let b = a.rebind(&other);
        assert!(Arc::ptr_eq(b.nodes(), &other));
        assert_eq!(a, b);
        assert_eq!(b.score(), 3.0);
    }
}
