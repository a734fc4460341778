//! Underbound Search: bounded best-first verification and the
//! correction loop that drives raw heuristics to admissibility.
//!
//! This crate depends only on `underbound_kernel` — it does NOT depend
//! on `underbound_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! underbound_kernel  ←  underbound_search  ←  underbound_harness
//! (index, buckets)      (verifier, loop)      (worlds, runner)
//! ```
//!
//! # Key types
//!
//! - [`SearchEnvironmentV1`] — environment collaborator contract
//! - [`OpenList`] — handle-keyed best-first frontier
//! - [`VerifyOutcomeV1`] — per-state verification outcome
//! - [`CorrectionPolicyV1`] — margins, round cap, worker-pool switch
//! - [`ConvergenceReportV1`] — per-run audit artifact
//!
//! [`SearchEnvironmentV1`]: contract::SearchEnvironmentV1
//! [`OpenList`]: frontier::OpenList
//! [`VerifyOutcomeV1`]: verifier::VerifyOutcomeV1
//! [`CorrectionPolicyV1`]: convergence::CorrectionPolicyV1
//! [`ConvergenceReportV1`]: report::ConvergenceReportV1

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod convergence;
pub mod error;
pub mod frontier;
pub mod report;
pub mod verifier;
