// ABOUTME: Core types and constants for the Vitalcoach analytics engine
// ABOUTME: Foundation crate with error handling, record models, chart periods, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Vitalcoach Core
//!
//! Foundation crate providing shared types and constants for the Vitalcoach
//! client progress analytics engine. Everything in here is plain data: the
//! read-only records delivered by the reactive store, the identifiers that key
//! them, and the error vocabulary shared by the computation layers.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AnalyticsError`
//! - **models**: Clients, doctors, meal plans, diet logs, activity entries, chart periods
//! - **constants**: Calendar and aggregation defaults

/// Unified error handling system with standard error codes
pub mod errors;

/// Raw record models delivered by the record source
pub mod models;

/// Application constants organized by domain
pub mod constants;
