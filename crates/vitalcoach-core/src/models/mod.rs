// ABOUTME: Core data models for the Vitalcoach analytics engine
// ABOUTME: Re-exports clients, meal plans, diet logs, activity entries, and chart periods
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Raw records as the reactive store delivers them. The engine treats every
//! model here as read-only input; derived views live in the intelligence crate.
//!
//! All models derive `PartialEq` so that snapshot deliveries can be compared
//! structurally when deciding whether anything actually changed.

// Domain modules
mod activity;
mod client;
mod diet_log;
mod identifiers;
mod meal_plan;
mod period;

pub use activity::{ActivityEntry, ActivityKind};
pub use client::{Client, ClientStatus, Doctor};
pub use diet_log::{DietLogEntry, FoodItem, MealType};
pub use identifiers::{ClientId, DoctorId, PlanId, RecordId};
pub use meal_plan::{active_plan, MacroTargets, MealPlan, PlanMilestone, PlanStatus};
pub use period::{ChartPeriod, TimeRange};
