//! Error type shared by every fallible operation of the crate.
//!
//! Rejecting a candidate (duplicate structure, score too low) is a normal outcome
//! and never shows up here.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResultError {
    /// The run bookkeeping was driven out of order, e.g. stopping a run that was never started.
    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("no persisted result at {}", path.display())]
    NotFound { path: PathBuf },

    /// The stream could be read but does not describe a valid result collection.
    #[error("corrupt result data: {reason}")]
    CorruptData { reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value has no JSON representation, e.g. a run timestamp before the Unix epoch.
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("score {0} is not finite")]
    NonFiniteScore(f64),

    #[error("edge {src} -> {dest} does not fit a node set of {nodes} nodes")]
    EdgeOutOfRange {
        src: usize,
        dest: usize,
        nodes: usize,
    },

    #[error("merge needs at least one result collection")]
    NothingToMerge,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ResultError {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        ResultError::CorruptData {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResultError>;
