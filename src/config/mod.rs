// ABOUTME: Configuration module for the analytics command-line tool
// ABOUTME: Re-exports environment configuration and the analytics settings it wraps
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! Analytics settings themselves live in `vitalcoach_intelligence::config`;
//! this module adds what only the binary needs.

/// Environment and command-line tool configuration
pub mod environment;

pub use environment::{LogLevel, ServerConfig};
pub use vitalcoach_intelligence::AnalyticsConfig;
