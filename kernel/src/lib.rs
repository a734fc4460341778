//! Underbound Kernel: the pure core of the admissibility-correction engine.
//!
//! # API Surface
//!
//! - [`index::StateIndex`] -- dense handle arena for opaque states
//! - [`table::HeuristicTable`] -- handle-aligned heuristic columns
//! - [`bucket::correct`] -- the bucketed admissibility-correction step
//!
//! # Module Dependency Direction
//!
//! `error` ← `index` / `table` / `bucket`
//!
//! One-way only. No cycles. The kernel never touches an environment:
//! expansion and goal tests live in `underbound-search`.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bucket;
pub mod error;
pub mod index;
pub mod table;
