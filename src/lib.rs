pub mod candidates;
pub mod config;
pub mod error;
pub mod fs;
pub mod network;
pub mod result;
pub mod statistics;
