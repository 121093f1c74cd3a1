// ABOUTME: Domain errors raised by the windowing, aggregation, and rollup layers
// ABOUTME: Distinguishes caller bugs (bad period, bad window) from unresolved identities
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ErrorCode;
use thiserror::Error;

/// Errors produced by the analytics computation layers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// Period text did not name a supported chart period
    #[error("Unrecognized chart period '{value}'")]
    InvalidPeriod {
        /// The rejected period text
        value: String,
    },

    /// Window boundaries could not be built from the inputs
    #[error("Malformed window: {reason}")]
    MalformedWindow {
        /// Why the window was rejected
        reason: String,
    },

    /// The client whose records were aggregated does not exist
    #[error("Client '{client_id}' could not be resolved; no metrics can be derived")]
    InsufficientData {
        /// Identifier passed to the aggregator
        client_id: String,
    },

    /// A client or doctor identifier has no record in the source
    #[error("{entity} '{id}' could not be resolved")]
    UnresolvedIdentity {
        /// Entity kind ("client", "doctor")
        entity: &'static str,
        /// Identifier that failed to resolve
        id: String,
    },
}

impl AnalyticsError {
    /// Create an "invalid period" error
    #[must_use]
    pub fn invalid_period(value: impl Into<String>) -> Self {
        Self::InvalidPeriod {
            value: value.into(),
        }
    }

    /// Create a "malformed window" error
    #[must_use]
    pub fn malformed_window(reason: impl Into<String>) -> Self {
        Self::MalformedWindow {
            reason: reason.into(),
        }
    }

    /// Standard error code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidPeriod { .. } => ErrorCode::InvalidPeriod,
            Self::MalformedWindow { .. } => ErrorCode::MalformedWindow,
            Self::InsufficientData { .. } | Self::UnresolvedIdentity { .. } => {
                ErrorCode::ResourceNotFound
            }
        }
    }

    /// Identifier the error refers to, if any
    #[must_use]
    pub fn resource_id(&self) -> Option<&str> {
        match self {
            Self::InsufficientData { client_id } => Some(client_id),
            Self::UnresolvedIdentity { id, .. } => Some(id),
            Self::InvalidPeriod { .. } | Self::MalformedWindow { .. } => None,
        }
    }
}
