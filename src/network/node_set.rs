use serde::{Deserialize, Serialize};

/// Ordered list of the variables of a learning problem.
///
/// `Edge` endpoints are indices into this list. A node set is owned by the problem
/// and handed to result collections as an `Arc<NodeSet>`; candidates never copy it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeSet {
    names: Vec<String>,
}

impl NodeSet {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NodeSet {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Node set of `n` anonymous variables named `0..n`.
    pub fn anonymous(n: usize) -> Self {
        NodeSet::new((0..n).map(|i| i.to_string()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
