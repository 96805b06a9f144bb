use std::iter::Rev;

use hashbrown::HashSet;
use tracing::{debug, trace};

use crate::{
    candidates::{Candidate, Fingerprint},
    error::{Result, ResultError},
};

/// A bounded collection that keeps the *highest scoring* unique candidates seen so far.
///
/// Candidates are stored ascending by score (worst first) next to an index of their
/// fingerprints, which makes the duplicate check `O(1)` and the insertion point an
/// `O(log n)` binary search (plus the `O(n)` shift of the vector).
///
/// # Insertion Semantics
/// - A candidate whose structure is already present is dropped, whatever its score.
///   The first occurrence of a structure wins.
/// - With `capacity == 0` (unbounded) or while not full, every new structure is inserted
///   after all members with an equal score, so equal-score members keep their arrival order.
/// - When full, a candidate scoring *strictly* more than the current worst member evicts
///   it. Anything else is dropped.
///
/// # Example
/// ```
/// use std::sync::Arc;
/// use netresult::{candidates::{BoundedRankedSet, Candidate}, network::NodeSet};
///
/// let nodes = Arc::new(NodeSet::anonymous(4));
/// let mut set = BoundedRankedSet::new(2);
/// for (i, score) in [5.0, 3.0, 8.0, 1.0].into_iter().enumerate() {
///     let edges = [(0, i)].into_iter().collect();
///     set.offer(Candidate::new(Arc::clone(&nodes), edges, score).unwrap());
/// }
/// let best_first: Vec<f64> = set.ranked().map(|c| c.score()).collect();
/// assert_eq!(best_first, vec![8.0, 5.0]);
/// ```
#[derive(Debug, Clone)]
pub struct BoundedRankedSet {
    sorted_members: Vec<Candidate>,
    fingerprints: HashSet<Fingerprint>,
    capacity: usize,
}

impl BoundedRankedSet {
    /// Creates an empty set retaining at most `capacity` candidates, `0` meaning no limit.
    pub fn new(capacity: usize) -> Self {
        BoundedRankedSet {
            sorted_members: Vec::with_capacity(capacity.min(4096)),
            fingerprints: HashSet::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Rebuilds a set from members already sorted ascending by score.
    ///
    /// # Errors
    /// [`ResultError::CorruptData`] if the members are out of order, repeat a structure,
    /// or exceed `capacity`.
    pub(crate) fn from_sorted(capacity: usize, sorted_members: Vec<Candidate>) -> Result<Self> {
        if capacity > 0 && sorted_members.len() > capacity {
            return Err(ResultError::corrupt(format!(
                "{} candidates exceed capacity {capacity}",
                sorted_members.len()
            )));
        }
        if let Some(pos) = sorted_members
            .windows(2)
            .position(|w| w[0].total_score() > w[1].total_score())
        {
            return Err(ResultError::corrupt(format!(
                "candidates not sorted by score at position {}",
                pos + 1
            )));
        }

        let mut fingerprints = HashSet::with_capacity(sorted_members.len());
        for member in &sorted_members {
            if !fingerprints.insert(member.fingerprint()) {
                return Err(ResultError::corrupt(format!(
                    "structure {} appears more than once",
                    member.fingerprint()
                )));
            }
        }

        Ok(BoundedRankedSet {
            sorted_members,
            fingerprints,
            capacity,
        })
    }

    /// Offers a candidate to the set.
    ///
    /// # Returns
    /// `true` if the candidate was inserted (possibly evicting the worst member), `false`
    /// if it was dropped as a duplicate or for scoring too low.
    ///
    /// # Ties
    /// A candidate whose score equals existing members is placed after all of them, the
    /// way Python's `bisect.insort` does. Equal-score members therefore keep arrival order
    /// from worst to best, and [`ranked`](Self::ranked) lists the newest of them first.
    pub fn offer(&mut self, candidate: Candidate) -> bool {
        debug_assert!(self.capacity == 0 || self.sorted_members.len() <= self.capacity);
        // should be impossible to break this, by construction.

        if self.fingerprints.contains(&candidate.fingerprint()) {
            trace!(fingerprint = %candidate.fingerprint(), score = candidate.score(), "duplicate structure dropped");
            return false;
        }

        if self.capacity == 0 || self.sorted_members.len() < self.capacity {
            self.insert_sorted(candidate);
            return true;
        }

        let beats_worst = self
            .sorted_members
            .first()
            .is_some_and(|worst| candidate.total_score() > worst.total_score());
        if !beats_worst {
            trace!(score = candidate.score(), "candidate below threshold dropped");
            return false;
        }

        let evicted = self.sorted_members.remove(0);
        self.fingerprints.remove(&evicted.fingerprint());
        debug!(
            evicted = evicted.score(),
            incoming = candidate.score(),
            "evicted worst candidate"
        );
        self.insert_sorted(candidate);
        true
    }

    fn insert_sorted(&mut self, candidate: Candidate) {
        // after every member with an equal score (O(log n))
        let idx = self
            .sorted_members
            .partition_point(|m| m.total_score() <= candidate.total_score());
        debug!(fingerprint = %candidate.fingerprint(), score = candidate.score(), rank = idx, "accepted candidate");
        self.fingerprints.insert(candidate.fingerprint());
        self.sorted_members.insert(idx, candidate);
    }

    pub fn len(&self) -> usize {
        self.sorted_members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted_members.is_empty()
    }

    /// Configured maximum size, `0` when unbounded.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the next offer has to beat the worst member to get in.
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.sorted_members.len() >= self.capacity
    }

    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.fingerprints.contains(fingerprint)
    }

    /// The lowest scoring member, i.e. the next one to be evicted.
    pub fn worst(&self) -> Option<&Candidate> {
        self.sorted_members.first()
    }

    pub fn best(&self) -> Option<&Candidate> {
        self.sorted_members.last()
    }

    /// Iterates in storage order, worst first.
    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.sorted_members.iter()
    }

    /// Iterates best first.
    pub fn ranked(&self) -> Rev<std::slice::Iter<'_, Candidate>> {
        self.sorted_members.iter().rev()
    }
}

impl IntoIterator for BoundedRankedSet {
    type Item = Candidate;
    type IntoIter = std::vec::IntoIter<Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted_members.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rand::prelude::*;

    use super::*;
    use crate::network::{EdgeSet, NodeSet};

    fn nodes() -> Arc<NodeSet> {
        Arc::new(NodeSet::anonymous(8))
    }

    // Helper to create a distinct candidate per `id`
    fn entry(nodes: &Arc<NodeSet>, id: usize, score: f64) -> Candidate {
        let edges: EdgeSet = [(id % 8, (id / 8) % 8)].into_iter().collect();
        Candidate::new(Arc::clone(nodes), edges, score).unwrap()
    }

    fn scores(set: &BoundedRankedSet) -> Vec<f64> {
        set.ranked().map(|c| c.score()).collect()
    }

    fn assert_invariants(set: &BoundedRankedSet) {
        if set.capacity > 0 {
            assert!(set.len() <= set.capacity);
        }
        assert!(
            set.sorted_members
                .windows(2)
                .all(|w| w[0].score() <= w[1].score())
        );
        assert_eq!(set.fingerprints.len(), set.sorted_members.len());
        for member in &set.sorted_members {
            assert!(set.fingerprints.contains(&member.fingerprint()));
        }
    }

    #[test]
    fn test_keeps_two_best_of_four() {
        let n = nodes();
        let mut set = BoundedRankedSet::new(2);
        assert!(set.offer(entry(&n, 1, 5.0)));
        assert!(set.offer(entry(&n, 2, 3.0)));
        // 8 evicts 3, the minimum at that point
        assert!(set.offer(entry(&n, 3, 8.0)));
        assert_eq!(scores(&set), vec![8.0, 5.0]);
        // 1 is below the current minimum 5
        assert!(!set.offer(entry(&n, 4, 1.0)));
        assert_eq!(scores(&set), vec![8.0, 5.0]);
        assert_invariants(&set);
    }

    #[test]
    fn test_first_seen_structure_wins() {
        let n = nodes();
        let mut set = BoundedRankedSet::new(10);
        assert!(set.offer(entry(&n, 7, 5.0)));
        assert!(!set.offer(entry(&n, 7, 9.0)));
        assert_eq!(scores(&set), vec![5.0]);
    }

    #[test]
    fn test_duplicate_is_dropped_even_when_full() {
        let n = nodes();
        let mut set = BoundedRankedSet::new(2);
        set.offer(entry(&n, 1, 1.0));
        set.offer(entry(&n, 2, 2.0));
        let before: Vec<_> = set.iter().map(|c| c.fingerprint()).collect();
        assert!(!set.offer(entry(&n, 1, 100.0)));
        let after: Vec<_> = set.iter().map(|c| c.fingerprint()).collect();
        assert_eq!(before, after);
        assert_eq!(scores(&set), vec![2.0, 1.0]);
    }

    #[test]
    fn test_equal_to_threshold_is_dropped() {
        let n = nodes();
        let mut set = BoundedRankedSet::new(2);
        set.offer(entry(&n, 1, 4.0));
        set.offer(entry(&n, 2, 6.0));
        assert!(set.is_full());
        assert!(!set.offer(entry(&n, 3, 4.0)));
        assert_eq!(set.worst().unwrap().fingerprint(), entry(&n, 1, 0.0).fingerprint());
    }

    #[test]
    fn test_eviction_keeps_size_and_removes_old_minimum() {
        let n = nodes();
        let mut set = BoundedRankedSet::new(3);
        for (id, score) in [(1, 10.0), (2, 20.0), (3, 30.0)] {
            set.offer(entry(&n, id, score));
        }
        let old_min = set.worst().unwrap().fingerprint();
        assert!(set.offer(entry(&n, 4, 15.0)));
        assert_eq!(set.len(), 3);
        assert!(!set.contains(&old_min));
        assert_eq!(scores(&set), vec![30.0, 20.0, 15.0]);
        assert_invariants(&set);
    }

    #[test]
    fn test_equal_scores_keep_arrival_order() {
        let n = nodes();
        let mut set = BoundedRankedSet::new(0);
        set.offer(entry(&n, 1, 2.0));
        set.offer(entry(&n, 2, 2.0));
        set.offer(entry(&n, 3, 1.0));
        set.offer(entry(&n, 4, 2.0));
        let order: Vec<_> = set.iter().map(|c| c.fingerprint()).collect();
        let expected: Vec<_> = [3, 1, 2, 4]
            .into_iter()
            .map(|id| entry(&n, id, 0.0).fingerprint())
            .collect();
        assert_eq!(order, expected);

        // best first: the newest of the tied members leads
        let best = set.ranked().next().unwrap();
        assert_eq!(best.fingerprint(), entry(&n, 4, 0.0).fingerprint());
    }

    #[test]
    fn test_unbounded_keeps_everything() {
        let n = nodes();
        let mut set = BoundedRankedSet::new(0);
        for id in 0..64 {
            assert!(set.offer(entry(&n, id, -(id as f64))));
        }
        assert_eq!(set.len(), 64);
        assert!(!set.is_full());
        assert_eq!(set.best().unwrap().score(), 0.0);
        assert_eq!(set.worst().unwrap().score(), -63.0);
        assert_invariants(&set);
    }

    #[test]
    fn test_capacity_one() {
        let n = nodes();
        let mut set = BoundedRankedSet::new(1);
        set.offer(entry(&n, 1, 50.0));
        set.offer(entry(&n, 2, 10.0));
        set.offer(entry(&n, 3, 100.0));
        assert_eq!(scores(&set), vec![100.0]);
    }

    #[test]
    fn test_from_sorted_accepts_valid_members() {
        let n = nodes();
        let members = vec![entry(&n, 1, 1.0), entry(&n, 2, 1.0), entry(&n, 3, 4.0)];
        let set = BoundedRankedSet::from_sorted(3, members).unwrap();
        assert_eq!(set.len(), 3);
        assert_invariants(&set);
    }

    #[test]
    fn test_from_sorted_rejects_bad_members() {
        let n = nodes();
        let unsorted = vec![entry(&n, 1, 4.0), entry(&n, 2, 1.0)];
        assert!(matches!(
            BoundedRankedSet::from_sorted(0, unsorted),
            Err(ResultError::CorruptData { .. })
        ));

        let duplicated = vec![entry(&n, 1, 1.0), entry(&n, 1, 2.0)];
        assert!(matches!(
            BoundedRankedSet::from_sorted(0, duplicated),
            Err(ResultError::CorruptData { .. })
        ));

        let oversized = vec![entry(&n, 1, 1.0), entry(&n, 2, 2.0)];
        assert!(matches!(
            BoundedRankedSet::from_sorted(1, oversized),
            Err(ResultError::CorruptData { .. })
        ));
    }

    /// Straightforward model of the policy: append, stable sort, drop the front.
    fn reference(capacity: usize, offers: &[Candidate]) -> Vec<Fingerprint> {
        let mut kept: Vec<Candidate> = Vec::new();
        for c in offers {
            if kept.iter().any(|k| k.fingerprint() == c.fingerprint()) {
                continue;
            }
            if capacity == 0 || kept.len() < capacity {
                kept.push(c.clone());
            } else if c.score() > kept[0].score() {
                kept.remove(0);
                kept.push(c.clone());
            }
            kept.sort_by(|a, b| a.score().total_cmp(&b.score()));
        }
        kept.iter().map(|c| c.fingerprint()).collect()
    }

    #[test]
    fn test_randomized_consistency() {
        let mut rng = StdRng::seed_from_u64(42);
        let n = nodes();

        for capacity in [0, 1, 5, 20] {
            let mut set = BoundedRankedSet::new(capacity);
            let mut offers = Vec::new();

            for _ in 0..500 {
                // few structures and coarse scores: plenty of duplicates and ties
                let id = rng.random_range(0..40);
                let score = rng.random_range(0..30) as f64 / 2.0;
                let c = entry(&n, id, score);
                let before = set.len();
                let was_present = set.contains(&c.fingerprint());

                let accepted = set.offer(c.clone());
                offers.push(c);

                if was_present {
                    assert!(!accepted);
                    assert_eq!(set.len(), before);
                }
                assert_invariants(&set);
            }

            let actual: Vec<_> = set.iter().map(|c| c.fingerprint()).collect();
            assert_eq!(actual, reference(capacity, &offers));
        }
    }
}
