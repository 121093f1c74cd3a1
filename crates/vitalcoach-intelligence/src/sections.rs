// ABOUTME: Tab and section composer for the client detail screen
// ABOUTME: Evaluates a fixed catalog of tab definitions against client metrics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Client detail sections
//!
//! The catalog is a fixed, ordered list of [`TabDefinition`]s. Each carries an
//! explicit predicate deciding whether the section has anything to show for
//! the current metrics. Sections are rebuilt from scratch on every upstream
//! change; nothing here is cached.

use serde::{Deserialize, Serialize};
use vitalcoach_core::models::{Client, ClientStatus, PlanMilestone};

use crate::aggregator::{
    ActivityMetrics, AdherenceMetrics, ClientMetrics, NutritionMetrics, PlanProgress,
    StreakMetrics,
};

/// Kind of section on the client detail screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    /// Contact details and goals
    Profile,
    /// Diet adherence
    Adherence,
    /// Nutrition totals
    Nutrition,
    /// Activity totals
    Activity,
    /// Activity streaks
    Streaks,
    /// Active meal plan
    MealPlan,
    /// Upcoming plan milestones
    Milestones,
}

/// Display metadata of the client the sections describe
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientMetadata {
    /// Display name
    pub name: String,
    /// Contact phone number
    pub phone: Option<String>,
    /// Contact email
    pub email: Option<String>,
    /// Age in years
    pub age: Option<u32>,
    /// Coaching goal
    pub goal: Option<String>,
    /// Dietary notes
    pub dietary_notes: Option<String>,
    /// Lifecycle status
    pub status: ClientStatus,
}

impl ClientMetadata {
    /// Whether any profile detail beyond the name is known
    #[must_use]
    pub const fn has_details(&self) -> bool {
        self.phone.is_some()
            || self.email.is_some()
            || self.age.is_some()
            || self.goal.is_some()
            || self.dietary_notes.is_some()
    }
}

impl From<&Client> for ClientMetadata {
    fn from(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            phone: client.phone.clone(),
            email: client.email.clone(),
            age: client.age,
            goal: client.goal.clone(),
            dietary_notes: client.dietary_notes.clone(),
            status: client.status,
        }
    }
}

/// Predicate deciding whether a section has content
pub type HasContent = fn(&ClientMetrics, &ClientMetadata) -> bool;

/// One entry of the tab catalog
#[derive(Debug, Clone, Copy)]
pub struct TabDefinition {
    /// Section kind
    pub kind: SectionKind,
    /// Title shown on the tab
    pub title: &'static str,
    /// Visibility predicate
    pub has_content: HasContent,
}

/// Tab catalog in display order
pub const DEFAULT_TABS: [TabDefinition; 7] = [
    TabDefinition {
        kind: SectionKind::Profile,
        title: "Profile",
        has_content: |_, metadata| metadata.has_details(),
    },
    TabDefinition {
        kind: SectionKind::Adherence,
        title: "Adherence",
        has_content: |metrics, _| metrics.adherence.adherent_days > 0,
    },
    TabDefinition {
        kind: SectionKind::Nutrition,
        title: "Nutrition",
        has_content: |metrics, _| metrics.nutrition.log_count > 0,
    },
    TabDefinition {
        kind: SectionKind::Activity,
        title: "Activity",
        has_content: |metrics, _| metrics.activity.activity_count > 0,
    },
    TabDefinition {
        kind: SectionKind::Streaks,
        title: "Streaks",
        has_content: |metrics, _| metrics.streaks.longest_streak > 0,
    },
    TabDefinition {
        kind: SectionKind::MealPlan,
        title: "Meal Plan",
        has_content: |metrics, _| metrics.plan.plan_id.is_some(),
    },
    TabDefinition {
        kind: SectionKind::Milestones,
        title: "Milestones",
        has_content: |metrics, _| !metrics.plan.upcoming_milestones.is_empty(),
    },
];

/// Data carried by a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum SectionContent {
    /// Profile details
    Profile(ClientMetadata),
    /// Adherence metrics
    Adherence(AdherenceMetrics),
    /// Nutrition metrics
    Nutrition(NutritionMetrics),
    /// Activity metrics
    Activity(ActivityMetrics),
    /// Streak metrics
    Streaks(StreakMetrics),
    /// Active plan progress
    MealPlan(PlanProgress),
    /// Upcoming milestones
    Milestones(Vec<PlanMilestone>),
}

/// A section as shown on the client detail screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionItem {
    /// Section kind
    pub kind: SectionKind,
    /// Tab title
    pub title: String,
    /// Whether the section has anything to show
    pub visible: bool,
    /// Section data
    pub content: SectionContent,
}

/// Evaluate every tab in `tabs`, keeping hidden ones with `visible = false`
#[must_use]
pub fn evaluate_sections(
    metrics: &ClientMetrics,
    metadata: &ClientMetadata,
    tabs: &[TabDefinition],
) -> Vec<SectionItem> {
    tabs.iter()
        .map(|tab| SectionItem {
            kind: tab.kind,
            title: tab.title.to_owned(),
            visible: (tab.has_content)(metrics, metadata),
            content: content_for(tab.kind, metrics, metadata),
        })
        .collect()
}

/// Visible sections of `tabs`, in catalog order
#[must_use]
pub fn compose_sections(
    metrics: &ClientMetrics,
    metadata: &ClientMetadata,
    tabs: &[TabDefinition],
) -> Vec<SectionItem> {
    evaluate_sections(metrics, metadata, tabs)
        .into_iter()
        .filter(|section| section.visible)
        .collect()
}

fn content_for(
    kind: SectionKind,
    metrics: &ClientMetrics,
    metadata: &ClientMetadata,
) -> SectionContent {
    match kind {
        SectionKind::Profile => SectionContent::Profile(metadata.clone()),
        SectionKind::Adherence => SectionContent::Adherence(metrics.adherence),
        SectionKind::Nutrition => SectionContent::Nutrition(metrics.nutrition.clone()),
        SectionKind::Activity => SectionContent::Activity(metrics.activity.clone()),
        SectionKind::Streaks => SectionContent::Streaks(metrics.streaks),
        SectionKind::MealPlan => SectionContent::MealPlan(metrics.plan.clone()),
        SectionKind::Milestones => {
            SectionContent::Milestones(metrics.plan.upcoming_milestones.clone())
        }
    }
}
