//! Progress aggregation.
//!
//! Pure computation over the in-memory entity graph — no internal state,
//! recomputed from scratch on every query. Completion rolls up from
//! sub-features to items, and from items to quarters and product families.

use std::collections::HashMap;

use crate::types::{Product, RoadmapItem, RoadmapStatus};

/// Pseudo-scope matching every item regardless of vertical.
pub const ALL_VERTICALS: &str = "all";

/// Item-level completion, 0.0-100.0.
///
/// With sub-features: the completed ratio. Without: binary on status.
pub fn item_completion(item: &RoadmapItem) -> f64 {
    if item.sub_features.is_empty() {
        return if item.status == RoadmapStatus::Completed {
            100.0
        } else {
            0.0
        };
    }

    let completed = item.sub_features.iter().filter(|sf| sf.is_completed).count();
    completed as f64 / item.sub_features.len() as f64 * 100.0
}

/// The vertical an item effectively belongs to.
///
/// A product's `family_id`, when present and non-empty, is authoritative over
/// the item's own `vertical_id` (which may be stale after a product was moved
/// between families).
pub fn effective_vertical_id<'a>(item: &'a RoadmapItem, products: &'a [Product]) -> &'a str {
    products
        .iter()
        .find(|p| p.id == item.product_id)
        .and_then(|p| p.family_id.as_deref())
        .filter(|family| !family.is_empty())
        .unwrap_or(&item.vertical_id)
}

/// Mean item completion across a quarter, rounded to the nearest integer.
/// A quarter with no items is 0, never NaN.
pub fn quarter_completion(items: &[RoadmapItem], quarter: &str) -> u32 {
    mean_completion(items.iter().filter(|i| i.quarter == quarter))
}

/// Mean item completion across a vertical (by effective family), rounded.
/// Pass [`ALL_VERTICALS`] to average over every item. An empty scope is 0.
pub fn vertical_completion(items: &[RoadmapItem], products: &[Product], vertical_id: &str) -> u32 {
    mean_completion(items.iter().filter(|i| {
        vertical_id == ALL_VERTICALS || effective_vertical_id(i, products) == vertical_id
    }))
}

fn mean_completion<'a>(items: impl Iterator<Item = &'a RoadmapItem>) -> u32 {
    let mut total = 0.0;
    let mut count = 0u32;
    for item in items {
        total += item_completion(item);
        count += 1;
    }
    if count == 0 {
        return 0;
    }
    (total / count as f64).round() as u32
}

/// Item tally per status, for the status-distribution view.
pub fn status_counts(items: &[RoadmapItem]) -> HashMap<RoadmapStatus, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item.status).or_insert(0) += 1;
    }
    counts
}
