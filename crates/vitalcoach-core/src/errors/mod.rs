// ABOUTME: Unified error handling with standard error codes for the analytics engine
// ABOUTME: Provides AppError, ErrorCode, AppResult, and the AnalyticsError domain errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling System
//!
//! Computation errors (bad period, malformed window) are programmer errors and
//! propagate to the caller as `Err`. Data-availability conditions such as
//! "still loading" or "client not found" are not errors at all; they are
//! modeled as explicit view states by the binding layer.

mod analytics;

pub use analytics::AnalyticsError;

use serde::{Deserialize, Serialize};
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    /// Caller supplied an invalid argument
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    /// Chart period text was not recognized
    #[serde(rename = "INVALID_PERIOD")]
    InvalidPeriod = 3001,
    /// Window boundaries could not be constructed
    #[serde(rename = "MALFORMED_WINDOW")]
    MalformedWindow = 3002,

    // Resource Management (4000-4999)
    /// Identifier could not be resolved by the record source
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound = 4000,
    /// Record source has not delivered a snapshot yet
    #[serde(rename = "RESOURCE_UNAVAILABLE")]
    ResourceUnavailable = 4003,

    // Internal Errors (9000-9999)
    /// Fixture or payload (de)serialization failed
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9003,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::InvalidPeriod => "The requested chart period is not recognized",
            Self::MalformedWindow => "The requested time window is malformed",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceUnavailable => "The resource is temporarily unavailable",
            Self::SerializationError => "Data serialization/deserialization failed",
        }
    }

    /// Whether the condition is a caller bug rather than a data condition
    #[must_use]
    pub const fn is_programmer_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput | Self::InvalidPeriod | Self::MalformedWindow
        )
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Resource ID if applicable
    pub resource_id: Option<String>,
}

/// Unified error type for the engine
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a resource ID to the error context
    #[must_use]
    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.context.resource_id = Some(resource_id.into());
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Invalid input
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Records needed for a view have not been delivered yet
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceUnavailable, message)
    }

    /// Serialization error
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SerializationError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

impl From<AnalyticsError> for AppError {
    fn from(error: AnalyticsError) -> Self {
        let code = error.code();
        let message = error.to_string();
        let app_error = Self::new(code, message);
        match error.resource_id() {
            Some(id) => app_error.with_resource_id(id),
            None => app_error,
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::serialization(error.to_string())
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_programmer_errors() {
        assert!(ErrorCode::InvalidPeriod.is_programmer_error());
        assert!(ErrorCode::MalformedWindow.is_programmer_error());
        assert!(!ErrorCode::ResourceNotFound.is_programmer_error());
        assert!(!ErrorCode::ResourceUnavailable.is_programmer_error());
    }

    #[test]
    fn test_analytics_error_conversion_keeps_resource() {
        let error: AppError = AnalyticsError::InsufficientData {
            client_id: "client-7".into(),
        }
        .into();

        assert_eq!(error.code, ErrorCode::ResourceNotFound);
        assert_eq!(error.context.resource_id.as_deref(), Some("client-7"));
        assert!(error.to_string().contains("client-7"));
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::InvalidPeriod).unwrap();
        assert_eq!(json, "\"INVALID_PERIOD\"");
    }
}
