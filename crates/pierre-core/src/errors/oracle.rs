// ABOUTME: Error types for the external food candidate and macro lookup services
// ABOUTME: Provides structured errors that integrate with the main AppError system
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Oracle Error Types
//!
//! The planner treats the candidate generator and the macro lookup service as
//! black boxes. Their failures are reported with `OracleError`, which the day
//! validator retries locally before degrading the day with a warning.
//!
//! A lookup that simply does not know a food is NOT an error: oracles return
//! `Ok(None)` for that case.

use std::error::Error;
use std::fmt;

/// Errors raised by external oracles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The service could not be reached or answered with a failure
    Unavailable {
        /// Name of the service
        service: String,
        /// Details about the failure
        details: String,
    },
    /// The service throttled the request
    RateLimited {
        /// Name of the service
        service: String,
    },
    /// The service answered but the payload could not be interpreted
    Malformed {
        /// Name of the service
        service: String,
        /// What was wrong with the payload
        details: String,
    },
}

impl OracleError {
    /// Create an "unavailable" error
    #[must_use]
    pub fn unavailable(service: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Unavailable {
            service: service.into(),
            details: details.into(),
        }
    }

    /// Create a "rate limited" error
    #[must_use]
    pub fn rate_limited(service: impl Into<String>) -> Self {
        Self::RateLimited {
            service: service.into(),
        }
    }

    /// Create a "malformed payload" error
    #[must_use]
    pub fn malformed(service: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Malformed {
            service: service.into(),
            details: details.into(),
        }
    }

    /// Get the service name associated with this error
    #[must_use]
    pub fn service(&self) -> &str {
        match self {
            Self::Unavailable { service, .. }
            | Self::RateLimited { service }
            | Self::Malformed { service, .. } => service,
        }
    }
}

impl fmt::Display for OracleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable { service, details } => {
                write!(f, "Oracle '{service}' unavailable: {details}")
            }
            Self::RateLimited { service } => {
                write!(f, "Oracle '{service}' rate limit exceeded")
            }
            Self::Malformed { service, details } => {
                write!(f, "Oracle '{service}' returned a malformed answer: {details}")
            }
        }
    }
}

impl Error for OracleError {}
