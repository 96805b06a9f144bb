//! Scored candidates and the bounded, deduplicating collection that ranks them.
//!
//! This module provides the total ordering used for scores, the structural fingerprint
//! used for duplicate detection, the immutable [`Candidate`] itself and the
//! [`BoundedRankedSet`] keeping the best candidates seen by a search.

mod bounded_ranked_set;
mod candidate;
mod fingerprint;
mod ordered_float;

pub use bounded_ranked_set::*;
pub use candidate::*;
pub use fingerprint::*;
pub use ordered_float::*;
