//! File system I/O for result collections.
//!
//! This module persists a [`crate::result::ResultCollection`] to any writer or path and
//! loads it back. The on-disk form is a versioned JSON document; only round-trip
//! correctness is promised, not byte-level stability.

mod persist;
