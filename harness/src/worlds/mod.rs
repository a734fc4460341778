//! Environment implementations for tests and benchmarks.

pub mod sliding_tile;
pub mod unit_chain;
