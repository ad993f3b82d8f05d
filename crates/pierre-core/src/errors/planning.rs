// ABOUTME: Planning pipeline error types for day composition and report parsing
// ABOUTME: Defines run-aborting candidate exhaustion and recoverable report parse failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Planning errors.
//!
//! `CandidatesExhausted` aborts a run. `Parse` is recoverable: callers turn it
//! into a zero-macro entry plus a warning on the enclosing scope.

/// Errors raised by the planning pipeline
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanningError {
    /// Every attempt for a day produced zero usable foods
    #[error("No usable food candidates for week {week} day {day} after {attempts} attempts")]
    CandidatesExhausted {
        /// Week number within the run
        week: u32,
        /// Day number within the week (1-7)
        day: u8,
        /// Number of composition attempts made
        attempts: u32,
    },

    /// A textual report block lacked its expected marker line
    #[error("Report block is missing the '{marker}' marker")]
    Parse {
        /// Marker that was expected
        marker: &'static str,
    },
}
