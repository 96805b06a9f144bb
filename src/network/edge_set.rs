use serde::{Deserialize, Serialize};

/// A directed edge `src -> dest` between two node indices.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Edge {
    pub src: usize,
    pub dest: usize,
}

impl Edge {
    pub fn new(src: usize, dest: usize) -> Self {
        Edge { src, dest }
    }
}

impl From<(usize, usize)> for Edge {
    fn from((src, dest): (usize, usize)) -> Self {
        Edge { src, dest }
    }
}

impl From<Edge> for (usize, usize) {
    fn from(edge: Edge) -> Self {
        (edge.src, edge.dest)
    }
}

/// Normalized set of directed edges.
///
/// Edges are kept sorted ascending and without repetitions, so structural equality
/// does not depend on the order in which a search algorithm produced them.
///
/// ```
/// use netresult::network::{Edge, EdgeSet};
///
/// let a: EdgeSet = [(0, 1), (2, 1)].into_iter().collect();
/// let b: EdgeSet = [(2, 1), (0, 1), (0, 1)].into_iter().collect();
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 2);
/// assert!(a.contains(Edge::new(2, 1)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Edge>", into = "Vec<Edge>")]
pub struct EdgeSet {
    edges: Vec<Edge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        EdgeSet { edges: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn contains(&self, edge: Edge) -> bool {
        self.edges.binary_search(&edge).is_ok()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the first edge whose endpoints do not index into a node set of `num_nodes` nodes.
    pub fn first_out_of_range(&self, num_nodes: usize) -> Option<Edge> {
        self.edges
            .iter()
            .copied()
            .find(|e| e.src >= num_nodes || e.dest >= num_nodes)
    }
}

impl<E: Into<Edge>> FromIterator<E> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut edges: Vec<Edge> = iter.into_iter().map(Into::into).collect();
        edges.sort_unstable();
        edges.dedup();
        EdgeSet { edges }
    }
}

impl From<Vec<Edge>> for EdgeSet {
    fn from(edges: Vec<Edge>) -> Self {
        edges.into_iter().collect()
    }
}

impl From<EdgeSet> for Vec<Edge> {
    fn from(set: EdgeSet) -> Self {
        set.edges
    }
}

impl<'a> IntoIterator for &'a EdgeSet {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}

/// Anything the search process can hand over as a scored structure.
///
/// Only the edges are read; the collection copies them into its own `EdgeSet`.
pub trait Structure {
    fn edges(&self) -> impl Iterator<Item = Edge> + '_;
}

impl Structure for EdgeSet {
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.edges.iter().copied()
    }
}

impl Structure for [Edge] {
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.iter().copied()
    }
}

impl Structure for Vec<Edge> {
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.iter().copied()
    }
}

impl Structure for [(usize, usize)] {
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.iter().copied().map(Edge::from)
    }
}

impl Structure for Vec<(usize, usize)> {
    fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.iter().copied().map(Edge::from)
    }
}
