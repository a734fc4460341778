//! Underbound Harness: environments and orchestration around the
//! correction engine.
//!
//! The harness does NOT implement correction or search logic — it
//! supplies worlds (transition + goal-test semantics), raw-heuristic
//! sources standing in for an external approximator, and a runner that
//! executes a correction run and persists its report artifact.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod provider;
pub mod runner;
pub mod worlds;
