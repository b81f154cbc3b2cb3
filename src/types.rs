//! Shared data model for the roadmap core.
//!
//! Four entity collections (verticals, products, items, milestones) plus the
//! composite snapshot persisted by the local cache. Relationships are forward
//! references only — no entity holds a back-pointer list; lookups scan.

use serde::{Deserialize, Serialize};

/// The calendar grid covers a single planning year.
pub const PLAN_YEAR: u32 = 2024;

/// Number of months on the planning grid.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Derive the quarter label for a start month (0-11).
///
/// `quarter` on an item is never edited independently — it is recomputed from
/// `start_month` on every save. Month 5 (June) yields "Q2 2024".
pub fn quarter_for_month(start_month: u32) -> String {
    format!("Q{} {}", start_month / 3 + 1, PLAN_YEAR)
}

/// Clamp an item's span to what fits on the visible grid.
///
/// The stored `span_months` is never truncated; only rendering clamps.
pub fn visible_span(start_month: u32, span_months: u32) -> u32 {
    span_months.min(MONTHS_PER_YEAR.saturating_sub(start_month))
}

fn synced_default() -> bool {
    // An entity of unknown provenance is treated as remote-owned, so a
    // reconciliation pull may replace it.
    true
}

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoadmapStatus {
    Backlog,
    Planning,
    #[serde(rename = "In Development")]
    InDevelopment,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Remote reachability and last-operation outcome, surfaced read-only to the
/// presentation layer. Updated by both the reconciliation engine and the
/// mutation service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    #[default]
    Offline,
    Syncing,
    Synced,
    Error,
}

/// Source system for items imported through an integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationSource {
    Jira,
    Trello,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Blocks,
    Requires,
}

// ============================================================================
// Entities
// ============================================================================

/// A product family (top-level grouping of products).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vertical {
    pub id: String,
    pub name: String,
    pub color_tag: String,
    #[serde(rename = "_synced", default = "synced_default")]
    pub synced: bool,
}

/// A module/sub-product belonging to a family.
///
/// `family_id` may be absent or dangle after its vertical is deleted; both
/// render as "unlinked", never as an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub family_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub color_tag: String,
    #[serde(rename = "_synced", default = "synced_default")]
    pub synced: bool,
}

/// A named point-in-time marker, loosely linked to items by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub month: Option<u32>,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "_synced", default = "synced_default")]
    pub synced: bool,
}

/// A checklist entry nested within an item; drives item-level completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubFeature {
    pub id: String,
    pub title: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependency {
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
}

/// A plannable unit of work placed on the monthly calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapItem {
    pub id: String,
    pub vertical_id: String,
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: RoadmapStatus,
    pub priority: Priority,
    /// 0-11 (Jan-Dec).
    pub start_month: u32,
    /// Duration in months. May run past December; see [`visible_span`].
    pub span_months: u32,
    /// 1-5.
    pub effort: u8,
    /// 1-5.
    pub value: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
    #[serde(default)]
    pub sub_features: Vec<SubFeature>,
    /// Epoch milliseconds, stamped at creation.
    #[serde(default)]
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub integration_source: Option<IntegrationSource>,
    /// Derived from `start_month`; see [`quarter_for_month`].
    #[serde(default)]
    pub quarter: String,
    #[serde(rename = "_synced", default = "synced_default")]
    pub synced: bool,
}

// ============================================================================
// Composite snapshot
// ============================================================================

/// The full dataset as persisted under one key in the local cache and held in
/// memory by [`crate::state::AppState`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub items: Vec<RoadmapItem>,
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub verticals: Vec<Vertical>,
}
