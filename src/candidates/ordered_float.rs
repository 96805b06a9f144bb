use std::{cmp::Ordering, hash::Hash, hash::Hasher};

use serde::{Deserialize, Serialize};

/// A wrapper around f64 that provides total ordering and proper equality semantics.
///
/// Scores are compared with `f64::total_cmp`, so any two scores have a defined order and
/// can live in sorted collections. Callers are expected to reject non-finite scores before
/// they get here; the total order only guarantees the collections never see an
/// incomparable pair.
#[derive(Debug, Copy, Clone, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct TotalF64(pub f64);

impl PartialEq for TotalF64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for TotalF64 {}

impl PartialOrd for TotalF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TotalF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for TotalF64 {
    fn from(x: f64) -> Self {
        TotalF64(x)
    }
}

impl Hash for TotalF64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}
