//! In-memory application state.
//!
//! The dataset is held here and injected by reference into the reconciliation
//! engine, the mutation service, and the progress engine — no component closes
//! over ambient globals. One logical thread of control mutates it; the mutexes
//! only provide interior mutability across cooperative await points.

use std::sync::Mutex;

use crate::types::{Milestone, Product, RoadmapItem, Snapshot, SyncStatus, Vertical};

/// Application state shared by the core services.
pub struct AppState {
    items: Mutex<Vec<RoadmapItem>>,
    products: Mutex<Vec<Product>>,
    milestones: Mutex<Vec<Milestone>>,
    verticals: Mutex<Vec<Vertical>>,
    sync_status: Mutex<SyncStatus>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            products: Mutex::new(Vec::new()),
            milestones: Mutex::new(Vec::new()),
            verticals: Mutex::new(Vec::new()),
            sync_status: Mutex::new(SyncStatus::Offline),
        }
    }

    // =========================================================================
    // Collection reads
    // =========================================================================

    pub fn items(&self) -> Vec<RoadmapItem> {
        self.items.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn products(&self) -> Vec<Product> {
        self.products.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn milestones(&self) -> Vec<Milestone> {
        self.milestones.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn verticals(&self) -> Vec<Vertical> {
        self.verticals.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Clone the full dataset for persistence.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            items: self.items(),
            products: self.products(),
            milestones: self.milestones(),
            verticals: self.verticals(),
        }
    }

    // =========================================================================
    // Collection writes
    // =========================================================================

    /// Replace all four collections wholesale (reconciliation apply,
    /// cold-start hydration).
    pub fn replace_all(&self, snapshot: Snapshot) {
        if let Ok(mut guard) = self.items.lock() {
            *guard = snapshot.items;
        }
        if let Ok(mut guard) = self.products.lock() {
            *guard = snapshot.products;
        }
        if let Ok(mut guard) = self.milestones.lock() {
            *guard = snapshot.milestones;
        }
        if let Ok(mut guard) = self.verticals.lock() {
            *guard = snapshot.verticals;
        }
    }

    /// Replace the item with a matching id in place (preserving collection
    /// order), or append as new.
    pub fn upsert_item(&self, item: RoadmapItem) {
        if let Ok(mut guard) = self.items.lock() {
            match guard.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => *existing = item,
                None => guard.push(item),
            }
        }
    }

    pub fn upsert_product(&self, product: Product) {
        if let Ok(mut guard) = self.products.lock() {
            match guard.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => *existing = product,
                None => guard.push(product),
            }
        }
    }

    pub fn upsert_milestone(&self, milestone: Milestone) {
        if let Ok(mut guard) = self.milestones.lock() {
            match guard.iter_mut().find(|m| m.id == milestone.id) {
                Some(existing) => *existing = milestone,
                None => guard.push(milestone),
            }
        }
    }

    pub fn upsert_vertical(&self, vertical: Vertical) {
        if let Ok(mut guard) = self.verticals.lock() {
            match guard.iter_mut().find(|v| v.id == vertical.id) {
                Some(existing) => *existing = vertical,
                None => guard.push(vertical),
            }
        }
    }

    /// Remove an item by id. Returns whether anything was removed.
    pub fn remove_item(&self, id: &str) -> bool {
        self.items
            .lock()
            .map(|mut guard| {
                let before = guard.len();
                guard.retain(|i| i.id != id);
                guard.len() != before
            })
            .unwrap_or(false)
    }

    /// Remove a product by id. Items referencing it are left untouched; they
    /// resolve as unlinked.
    pub fn remove_product(&self, id: &str) -> bool {
        self.products
            .lock()
            .map(|mut guard| {
                let before = guard.len();
                guard.retain(|p| p.id != id);
                guard.len() != before
            })
            .unwrap_or(false)
    }

    pub fn remove_milestone(&self, id: &str) -> bool {
        self.milestones
            .lock()
            .map(|mut guard| {
                let before = guard.len();
                guard.retain(|m| m.id != id);
                guard.len() != before
            })
            .unwrap_or(false)
    }

    /// Remove a vertical by id. Products and items keep their family
    /// references; they resolve as unlinked.
    pub fn remove_vertical(&self, id: &str) -> bool {
        self.verticals
            .lock()
            .map(|mut guard| {
                let before = guard.len();
                guard.retain(|v| v.id != id);
                guard.len() != before
            })
            .unwrap_or(false)
    }

    // =========================================================================
    // Sync status
    // =========================================================================

    pub fn sync_status(&self) -> SyncStatus {
        self.sync_status
            .lock()
            .map(|guard| *guard)
            .unwrap_or(SyncStatus::Offline)
    }

    pub fn set_sync_status(&self, status: SyncStatus) {
        if let Ok(mut guard) = self.sync_status.lock() {
            *guard = status;
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
