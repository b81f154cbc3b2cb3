//! Entity mutation service.
//!
//! Every create/update/delete is the same named two-phase operation:
//!
//! 1. Synchronous local apply — the in-memory collection is updated
//!    optimistically and the result is what the user sees, final.
//! 2. Best-effort remote attempt — outcome only moves the sync status
//!    indicator (`syncing` → `synced`/`error`); it never rolls back phase 1.
//!
//! The full four-collection snapshot is then persisted to the local cache
//! unconditionally. A user's edit is never lost locally, even when it never
//! reaches the remote store.
//!
//! Create and update share one operation per entity type: an existing id is
//! replaced in place (collection order preserved), an unknown id is appended,
//! and a missing id is generated here — callers never mint ids.

use crate::cache::{persist_snapshot, RoadmapCache};
use crate::remote::RemoteStore;
use crate::state::AppState;
use crate::types::{
    quarter_for_month, Milestone, Product, RoadmapItem, SyncStatus, Vertical,
};

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Record a finished remote attempt on the status indicator.
fn finish_remote_attempt(state: &AppState, result: Result<(), crate::remote::GatewayError>) -> bool {
    match result {
        Ok(()) => {
            state.set_sync_status(SyncStatus::Synced);
            true
        }
        Err(e) => {
            log::warn!("Remote write failed (local state kept): {e}");
            state.set_sync_status(SyncStatus::Error);
            false
        }
    }
}

// ============================================================================
// Roadmap items
// ============================================================================

/// Create or update a roadmap item.
///
/// `quarter` is always recomputed from `start_month` — caller-supplied values
/// are discarded. New items get a generated id and a creation timestamp.
/// Returns the item as committed locally.
pub async fn save_item(
    state: &AppState,
    gateway: Option<&dyn RemoteStore>,
    cache: Option<&RoadmapCache>,
    mut item: RoadmapItem,
) -> RoadmapItem {
    if item.id.is_empty() {
        item.id = new_id();
        item.created_at = now_millis();
    }
    item.quarter = quarter_for_month(item.start_month);
    item.synced = false;

    state.upsert_item(item.clone());

    if let Some(gateway) = gateway {
        state.set_sync_status(SyncStatus::Syncing);
        if finish_remote_attempt(state, gateway.upsert_item(&item).await) {
            item.synced = true;
            state.upsert_item(item.clone());
        }
    }

    persist_snapshot(state, cache);
    item
}

/// Delete a roadmap item by id. Returns whether a local entity was removed.
pub async fn delete_item(
    state: &AppState,
    gateway: Option<&dyn RemoteStore>,
    cache: Option<&RoadmapCache>,
    id: &str,
) -> bool {
    let removed = state.remove_item(id);

    if let Some(gateway) = gateway {
        state.set_sync_status(SyncStatus::Syncing);
        finish_remote_attempt(state, gateway.delete_item(id).await);
    }

    persist_snapshot(state, cache);
    removed
}

// ============================================================================
// Products
// ============================================================================

/// Create or update a product. Returns the product as committed locally.
pub async fn save_product(
    state: &AppState,
    gateway: Option<&dyn RemoteStore>,
    cache: Option<&RoadmapCache>,
    mut product: Product,
) -> Product {
    if product.id.is_empty() {
        product.id = new_id();
    }
    product.synced = false;

    state.upsert_product(product.clone());

    if let Some(gateway) = gateway {
        state.set_sync_status(SyncStatus::Syncing);
        if finish_remote_attempt(state, gateway.upsert_product(&product).await) {
            product.synced = true;
            state.upsert_product(product.clone());
        }
    }

    persist_snapshot(state, cache);
    product
}

/// Delete a product by id.
///
/// Items referencing the product are NOT removed — they become unlinked and
/// stay fully editable. The remote layer may cascade on its own; this service
/// never relies on that.
pub async fn delete_product(
    state: &AppState,
    gateway: Option<&dyn RemoteStore>,
    cache: Option<&RoadmapCache>,
    id: &str,
) -> bool {
    let removed = state.remove_product(id);

    if let Some(gateway) = gateway {
        state.set_sync_status(SyncStatus::Syncing);
        finish_remote_attempt(state, gateway.delete_product(id).await);
    }

    persist_snapshot(state, cache);
    removed
}

// ============================================================================
// Milestones
// ============================================================================

/// Create or update a milestone. Returns the milestone as committed locally.
pub async fn save_milestone(
    state: &AppState,
    gateway: Option<&dyn RemoteStore>,
    cache: Option<&RoadmapCache>,
    mut milestone: Milestone,
) -> Milestone {
    if milestone.id.is_empty() {
        milestone.id = new_id();
    }
    milestone.synced = false;

    state.upsert_milestone(milestone.clone());

    if let Some(gateway) = gateway {
        state.set_sync_status(SyncStatus::Syncing);
        if finish_remote_attempt(state, gateway.upsert_milestone(&milestone).await) {
            milestone.synced = true;
            state.upsert_milestone(milestone.clone());
        }
    }

    persist_snapshot(state, cache);
    milestone
}

/// Delete a milestone by id. Items referencing it keep their dangling
/// `milestone_id`.
pub async fn delete_milestone(
    state: &AppState,
    gateway: Option<&dyn RemoteStore>,
    cache: Option<&RoadmapCache>,
    id: &str,
) -> bool {
    let removed = state.remove_milestone(id);

    if let Some(gateway) = gateway {
        state.set_sync_status(SyncStatus::Syncing);
        finish_remote_attempt(state, gateway.delete_milestone(id).await);
    }

    persist_snapshot(state, cache);
    removed
}

// ============================================================================
// Verticals
// ============================================================================

/// Create or update a vertical. Returns the vertical as committed locally.
pub async fn save_vertical(
    state: &AppState,
    gateway: Option<&dyn RemoteStore>,
    cache: Option<&RoadmapCache>,
    mut vertical: Vertical,
) -> Vertical {
    if vertical.id.is_empty() {
        vertical.id = new_id();
    }
    vertical.synced = false;

    state.upsert_vertical(vertical.clone());

    if let Some(gateway) = gateway {
        state.set_sync_status(SyncStatus::Syncing);
        if finish_remote_attempt(state, gateway.upsert_vertical(&vertical).await) {
            vertical.synced = true;
            state.upsert_vertical(vertical.clone());
        }
    }

    persist_snapshot(state, cache);
    vertical
}

/// Delete a vertical by id.
///
/// Products and items keep their `family_id`/`vertical_id` references; a
/// dangling family resolves as "unlinked" everywhere, never as an error.
pub async fn delete_vertical(
    state: &AppState,
    gateway: Option<&dyn RemoteStore>,
    cache: Option<&RoadmapCache>,
    id: &str,
) -> bool {
    let removed = state.remove_vertical(id);

    if let Some(gateway) = gateway {
        state.set_sync_status(SyncStatus::Syncing);
        finish_remote_attempt(state, gateway.delete_vertical(id).await);
    }

    persist_snapshot(state, cache);
    removed
}
