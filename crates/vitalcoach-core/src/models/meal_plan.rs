// ABOUTME: Meal plan models with status, calorie and macro targets, and milestones
// ABOUTME: A client has at most one active plan at a time, enforced upstream
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClientId, PlanId};

/// Whether a plan is the one currently being followed
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    /// Currently followed
    Active,
    /// Past or drafted plan
    #[default]
    Inactive,
}

/// Daily macronutrient targets in grams
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MacroTargets {
    /// Protein target (grams)
    pub protein_g: f64,
    /// Carbohydrate target (grams)
    pub carbohydrates_g: f64,
    /// Fat target (grams)
    pub fat_g: f64,
}

/// A dated checkpoint inside a plan ("first weigh-in", "switch to phase 2")
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanMilestone {
    /// Short title shown on the dashboard
    pub title: String,
    /// When the milestone is due
    pub due: DateTime<Utc>,
}

/// A meal plan assigned to one client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MealPlan {
    /// Plan identifier
    pub id: PlanId,
    /// Owning client
    pub client_id: ClientId,
    /// Plan title
    pub title: String,
    /// Active/inactive status
    #[serde(default)]
    pub status: PlanStatus,
    /// When the client started following the plan
    pub start_date: DateTime<Utc>,
    /// Target calories per day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_calorie_target: Option<f64>,
    /// Target macros per day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macro_targets: Option<MacroTargets>,
    /// Dated checkpoints
    #[serde(default)]
    pub milestones: Vec<PlanMilestone>,
}

impl MealPlan {
    /// Whether this plan is the active one
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == PlanStatus::Active
    }
}

/// Select the active plan among a client's plans
///
/// Upstream guarantees at most one active plan. Should several be flagged,
/// the most recently started wins and ties fall back to the larger id so the
/// choice never depends on delivery order.
#[must_use]
pub fn active_plan(plans: &[MealPlan]) -> Option<&MealPlan> {
    plans
        .iter()
        .filter(|plan| plan.is_active())
        .max_by(|a, b| {
            a.start_date
                .cmp(&b.start_date)
                .then_with(|| a.id.cmp(&b.id))
        })
}
