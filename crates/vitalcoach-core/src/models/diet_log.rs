// ABOUTME: Diet log models for food intake records logged by clients
// ABOUTME: DietLogEntry, MealType, and FoodItem definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ClientId, PlanId, RecordId};

/// Type of meal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snack between meals
    Snack,
    /// Unspecified or other meal type
    Other,
}

impl MealType {
    /// Every meal type, in display order
    pub const ALL: [Self; 5] = [
        Self::Breakfast,
        Self::Lunch,
        Self::Dinner,
        Self::Snack,
        Self::Other,
    ];
}

/// Individual food item within a log entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodItem {
    /// Food name
    pub name: String,
    /// Serving size amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<f64>,
    /// Serving unit (g, oz, cup, etc.)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_unit: Option<String>,
    /// Calories for the consumed amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
}

/// A timestamped record of food intake
///
/// Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DietLogEntry {
    /// Record identifier
    pub id: RecordId,
    /// Owning client
    pub client_id: ClientId,
    /// Plan the entry was logged against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_id: Option<PlanId>,
    /// When the intake was logged
    pub logged_at: DateTime<Utc>,
    /// Meal type
    pub meal_type: MealType,
    /// Calories consumed
    #[serde(default)]
    pub calories: f64,
    /// Protein in grams
    #[serde(default)]
    pub protein_g: f64,
    /// Carbohydrates in grams
    #[serde(default)]
    pub carbohydrates_g: f64,
    /// Fat in grams
    #[serde(default)]
    pub fat_g: f64,
    /// Individual food items
    #[serde(default)]
    pub food_items: Vec<FoodItem>,
    /// Client's own mark of whether the meal followed the plan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub followed_plan: Option<bool>,
}

impl DietLogEntry {
    /// Whether the entry counts toward diet adherence
    ///
    /// An entry qualifies when it records some intake and was not explicitly
    /// marked as off-plan.
    #[must_use]
    pub fn is_qualifying(&self) -> bool {
        let records_intake = self.calories > 0.0 || !self.food_items.is_empty();
        records_intake && self.followed_plan != Some(false)
    }
}
