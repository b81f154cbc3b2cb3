//! Wire-format records and their translation to the in-memory shape.
//!
//! The remote schema is snake_case and slightly older than the in-memory
//! model ("teams" for verticals, `team_id` for `verticalId`). The mapping is
//! exhaustive and lives only here — nothing outside the gateway ever sees a
//! wire field name.

use serde::{Deserialize, Serialize};

use crate::types::{
    quarter_for_month, Milestone, Priority, Product, RoadmapItem, RoadmapStatus, SubFeature,
    Vertical,
};

/// Color assigned to rows created before color tagging existed.
const DEFAULT_COLOR_TAG: &str = "bg-slate-500";

// ============================================================================
// teams
// ============================================================================

/// A row from the `teams` collection (verticals in memory).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireTeam {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

impl From<WireTeam> for Vertical {
    fn from(row: WireTeam) -> Self {
        Vertical {
            id: row.id,
            name: row.name,
            color_tag: row.color.unwrap_or_else(|| DEFAULT_COLOR_TAG.to_string()),
            synced: true,
        }
    }
}

impl From<&Vertical> for WireTeam {
    fn from(vertical: &Vertical) -> Self {
        WireTeam {
            id: vertical.id.clone(),
            name: vertical.name.clone(),
            color: Some(vertical.color_tag.clone()),
        }
    }
}

// ============================================================================
// products
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub family_id: Option<String>,
}

impl From<WireProduct> for Product {
    fn from(row: WireProduct) -> Self {
        Product {
            id: row.id,
            family_id: row.family_id,
            name: row.name,
            description: row.description.unwrap_or_default(),
            color_tag: row.color.unwrap_or_else(|| DEFAULT_COLOR_TAG.to_string()),
            synced: true,
        }
    }
}

impl From<&Product> for WireProduct {
    fn from(product: &Product) -> Self {
        WireProduct {
            id: product.id.clone(),
            name: product.name.clone(),
            description: Some(product.description.clone()),
            color: Some(product.color_tag.clone()),
            family_id: product.family_id.clone(),
        }
    }
}

// ============================================================================
// roadmap_items
// ============================================================================

/// A row from the `roadmap_items` collection.
///
/// Older rows carry the vertical reference as `vertical_id`, newer ones as
/// `team_id`; `team_id` wins when both are present. Writes emit `team_id`
/// only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireItem {
    pub id: String,
    #[serde(default)]
    pub product_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub vertical_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: RoadmapStatus,
    pub priority: Priority,
    pub start_month: u32,
    pub span_months: u32,
    pub effort: u8,
    pub value: u8,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sub_features: Vec<SubFeature>,
    #[serde(default)]
    pub quarter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

impl From<WireItem> for RoadmapItem {
    fn from(row: WireItem) -> Self {
        // The quarter invariant is enforced at the boundary rather than
        // trusting whatever the row carries.
        let quarter = quarter_for_month(row.start_month);
        RoadmapItem {
            id: row.id,
            vertical_id: row.team_id.or(row.vertical_id).unwrap_or_default(),
            product_id: row.product_id,
            milestone_id: None,
            title: row.title,
            description: row.description,
            status: row.status,
            priority: row.priority,
            start_month: row.start_month,
            span_months: row.span_months,
            effort: row.effort,
            value: row.value,
            tags: row.tags,
            dependencies: vec![],
            sub_features: row.sub_features,
            created_at: row.created_at.unwrap_or_default(),
            external_id: None,
            integration_source: None,
            quarter,
            synced: true,
        }
    }
}

impl From<&RoadmapItem> for WireItem {
    fn from(item: &RoadmapItem) -> Self {
        WireItem {
            id: item.id.clone(),
            product_id: item.product_id.clone(),
            team_id: Some(item.vertical_id.clone()),
            vertical_id: None,
            title: item.title.clone(),
            description: item.description.clone(),
            status: item.status,
            priority: item.priority,
            start_month: item.start_month,
            span_months: item.span_months,
            effort: item.effort,
            value: item.value,
            tags: item.tags.clone(),
            sub_features: item.sub_features.clone(),
            quarter: quarter_for_month(item.start_month),
            created_at: None,
        }
    }
}

// ============================================================================
// milestones
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMilestone {
    pub id: String,
    #[serde(default)]
    pub product_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
}

impl From<WireMilestone> for Milestone {
    fn from(row: WireMilestone) -> Self {
        Milestone {
            id: row.id,
            product_id: row.product_id,
            title: row.title,
            month: row.month,
            description: row.description.unwrap_or_default(),
            synced: true,
        }
    }
}

impl From<&Milestone> for WireMilestone {
    fn from(milestone: &Milestone) -> Self {
        WireMilestone {
            id: milestone.id.clone(),
            product_id: milestone.product_id.clone(),
            title: milestone.title.clone(),
            month: milestone.month,
            description: Some(milestone.description.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_row_to_vertical() {
        let row: WireTeam =
            serde_json::from_str(r#"{"id":"t1","name":"Growth","color":"bg-rose-500"}"#).unwrap();
        let vertical = Vertical::from(row);
        assert_eq!(vertical.id, "t1");
        assert_eq!(vertical.color_tag, "bg-rose-500");
        assert!(vertical.synced);
    }

    #[test]
    fn test_team_row_missing_color_gets_default() {
        let row: WireTeam = serde_json::from_str(r#"{"id":"t1","name":"Growth"}"#).unwrap();
        let vertical = Vertical::from(row);
        assert_eq!(vertical.color_tag, DEFAULT_COLOR_TAG);
    }

    #[test]
    fn test_product_round_trip() {
        let product = Product {
            id: "p1".to_string(),
            family_id: Some("t1".to_string()),
            name: "Checkout".to_string(),
            description: "Payment flows".to_string(),
            color_tag: "bg-indigo-500".to_string(),
            synced: false,
        };

        let wire = WireProduct::from(&product);
        let json = serde_json::to_string(&wire).unwrap();
        assert!(json.contains("\"family_id\":\"t1\""));
        assert!(json.contains("\"color\":\"bg-indigo-500\""));

        let back = Product::from(serde_json::from_str::<WireProduct>(&json).unwrap());
        assert_eq!(back.family_id.as_deref(), Some("t1"));
        assert_eq!(back.color_tag, "bg-indigo-500");
        assert!(back.synced);
    }

    #[test]
    fn test_item_read_prefers_team_id() {
        let json = r#"{
            "id": "itm-1",
            "product_id": "p1",
            "team_id": "t-new",
            "vertical_id": "t-old",
            "title": "Search revamp",
            "status": "Planning",
            "priority": "Medium",
            "start_month": 7,
            "span_months": 3,
            "effort": 2,
            "value": 4
        }"#;
        let item = RoadmapItem::from(serde_json::from_str::<WireItem>(json).unwrap());
        assert_eq!(item.vertical_id, "t-new");
    }

    #[test]
    fn test_item_read_falls_back_to_vertical_id() {
        let json = r#"{
            "id": "itm-1",
            "product_id": "p1",
            "vertical_id": "t-old",
            "title": "Search revamp",
            "status": "Planning",
            "priority": "Medium",
            "start_month": 7,
            "span_months": 3,
            "effort": 2,
            "value": 4
        }"#;
        let item = RoadmapItem::from(serde_json::from_str::<WireItem>(json).unwrap());
        assert_eq!(item.vertical_id, "t-old");
    }

    #[test]
    fn test_item_read_recomputes_quarter() {
        let json = r#"{
            "id": "itm-1",
            "product_id": "p1",
            "team_id": "t1",
            "title": "Search revamp",
            "status": "Backlog",
            "priority": "Low",
            "start_month": 5,
            "span_months": 1,
            "effort": 1,
            "value": 1,
            "quarter": "Q4 2019"
        }"#;
        let item = RoadmapItem::from(serde_json::from_str::<WireItem>(json).unwrap());
        assert_eq!(item.quarter, "Q2 2024");
    }

    #[test]
    fn test_item_write_emits_team_id_and_derived_quarter() {
        let item = RoadmapItem {
            id: "itm-1".to_string(),
            vertical_id: "t1".to_string(),
            product_id: "p1".to_string(),
            milestone_id: None,
            title: "Search revamp".to_string(),
            description: String::new(),
            status: RoadmapStatus::InDevelopment,
            priority: Priority::High,
            start_month: 10,
            span_months: 4,
            effort: 3,
            value: 5,
            tags: vec!["search".to_string()],
            dependencies: vec![],
            sub_features: vec![],
            created_at: 0,
            external_id: None,
            integration_source: None,
            quarter: "stale".to_string(),
            synced: false,
        };

        let json = serde_json::to_string(&WireItem::from(&item)).unwrap();
        assert!(json.contains("\"team_id\":\"t1\""));
        assert!(!json.contains("vertical_id"));
        assert!(json.contains("\"start_month\":10"));
        assert!(json.contains("\"quarter\":\"Q4 2024\""));
        assert!(json.contains("\"status\":\"In Development\""));
    }

    #[test]
    fn test_milestone_round_trip() {
        let json = r#"{"id":"m1","product_id":"p1","title":"GA launch","month":8}"#;
        let milestone = Milestone::from(serde_json::from_str::<WireMilestone>(json).unwrap());
        assert_eq!(milestone.product_id.as_deref(), Some("p1"));
        assert_eq!(milestone.month, Some(8));
        assert_eq!(milestone.description, "");

        let back = serde_json::to_string(&WireMilestone::from(&milestone)).unwrap();
        assert!(back.contains("\"product_id\":\"p1\""));
        assert!(back.contains("\"month\":8"));
    }
}
