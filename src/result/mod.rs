//! Learner results: the collection a search run fills, the merge of several of them and
//! the summary handed to report generation.

mod collection;
mod merge;
mod summary;

pub use collection::*;
pub use merge::*;
pub use summary::*;
