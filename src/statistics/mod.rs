//! Bookkeeping of learning runs.
//!
//! This module records when each learning run started and stopped and on which host it
//! ran. Run records are advisory metadata carried along with a result collection; they
//! never control the search itself.

mod runs;
pub use runs::*;
