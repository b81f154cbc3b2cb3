//! Local/cloud reconciliation.
//!
//! Startup flow: hydrate from the local cache for instant rendering, then
//! pull the remote dataset and make it the new source of truth. The pull is
//! all-or-nothing — four concurrent reads, and a failure in any one discards
//! the entire pass, leaving the last known good state untouched.
//!
//! Entities flagged `_synced: false` are local edits the remote never
//! acknowledged. A pull preserves them: after the wholesale replace, any
//! unsynced local entity missing from the remote result is re-appended, still
//! unsynced. Discarding them would silently destroy offline work; the cost is
//! that an entity deleted remotely before it ever synced from here survives
//! locally, a window the no-conflict-detection design already accepts.

use crate::cache::{persist_snapshot, RoadmapCache};
use crate::remote::RemoteStore;
use crate::state::AppState;
use crate::types::{Snapshot, SyncStatus};

/// Hydrate in-memory state from the last cached snapshot.
///
/// Runs before the first reconcile so a cold start renders instantly, with no
/// network. Returns whether a snapshot was loaded; failures are logged and
/// leave state empty (first run looks the same as a broken cache).
pub fn load_cached(state: &AppState, cache: &RoadmapCache) -> bool {
    match cache.load_snapshot() {
        Ok(Some(snapshot)) => {
            log::info!(
                "Loaded cached snapshot: {} items, {} products, {} milestones, {} verticals",
                snapshot.items.len(),
                snapshot.products.len(),
                snapshot.milestones.len(),
                snapshot.verticals.len()
            );
            state.replace_all(snapshot);
            true
        }
        Ok(None) => false,
        Err(e) => {
            log::warn!("Failed to load cached snapshot: {e}");
            false
        }
    }
}

/// Pull the full remote dataset and make it the source of truth.
///
/// - No gateway ⇒ `offline`; whatever the cache hydrated stays.
/// - Any of the four reads fails ⇒ `error`; in-memory state untouched, no
///   partial cross-collection apply.
/// - All succeed ⇒ wholesale replace (preserving unsynced locals, see module
///   docs), cache write-back, `synced`.
///
/// Returns the resulting status, which is also published on `state`.
pub async fn reconcile(
    state: &AppState,
    gateway: Option<&dyn RemoteStore>,
    cache: Option<&RoadmapCache>,
) -> SyncStatus {
    let Some(gateway) = gateway else {
        state.set_sync_status(SyncStatus::Offline);
        return SyncStatus::Offline;
    };

    state.set_sync_status(SyncStatus::Syncing);

    let (verticals, products, items, milestones) = tokio::join!(
        gateway.fetch_verticals(),
        gateway.fetch_products(),
        gateway.fetch_items(),
        gateway.fetch_milestones(),
    );

    // Each failing collection is logged for diagnostics, but one failure
    // fails the pass as a whole.
    if let Err(e) = &verticals {
        log::warn!("Reconcile: verticals read failed: {e}");
    }
    if let Err(e) = &products {
        log::warn!("Reconcile: products read failed: {e}");
    }
    if let Err(e) = &items {
        log::warn!("Reconcile: items read failed: {e}");
    }
    if let Err(e) = &milestones {
        log::warn!("Reconcile: milestones read failed: {e}");
    }

    let (Ok(verticals), Ok(products), Ok(items), Ok(milestones)) =
        (verticals, products, items, milestones)
    else {
        state.set_sync_status(SyncStatus::Error);
        return SyncStatus::Error;
    };

    let merged = Snapshot {
        items: merge_preserving_unsynced(items, &state.items(), |i| i.id.as_str(), |i| i.synced),
        products: merge_preserving_unsynced(
            products,
            &state.products(),
            |p| p.id.as_str(),
            |p| p.synced,
        ),
        milestones: merge_preserving_unsynced(
            milestones,
            &state.milestones(),
            |m| m.id.as_str(),
            |m| m.synced,
        ),
        verticals: merge_preserving_unsynced(
            verticals,
            &state.verticals(),
            |v| v.id.as_str(),
            |v| v.synced,
        ),
    };

    state.replace_all(merged);
    persist_snapshot(state, cache);
    state.set_sync_status(SyncStatus::Synced);
    SyncStatus::Synced
}

/// Remote result plus local entities the remote has never acknowledged.
///
/// Synced locals are dropped in favor of remote truth (including remote
/// deletes); unsynced locals absent from the remote result are kept.
fn merge_preserving_unsynced<T: Clone>(
    remote: Vec<T>,
    local: &[T],
    id: impl Fn(&T) -> &str,
    synced: impl Fn(&T) -> bool,
) -> Vec<T> {
    let mut merged = remote;
    for entity in local {
        if !synced(entity) && !merged.iter().any(|e| id(e) == id(entity)) {
            merged.push(entity.clone());
        }
    }
    merged
}
