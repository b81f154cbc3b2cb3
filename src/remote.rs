//! Remote store abstraction.
//!
//! The reconciliation engine and the mutation service talk to the remote
//! relational store only through [`RemoteStore`], so tests can substitute an
//! in-memory double and the Supabase client stays swappable. An unavailable
//! gateway is represented as `Option::None` at the call sites — offline is a
//! mode, not an error.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{Milestone, Product, RoadmapItem, Vertical};

/// Errors from remote store operations.
///
/// A failed call is terminal for that attempt; there is no automatic retry.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("HTTP: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Typed access to the four remote collections.
///
/// Reads return in-memory entities — wire-format translation is the
/// implementation's responsibility, never the caller's. Each collection
/// supports select-all, upsert-by-id and delete-by-id.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn fetch_verticals(&self) -> Result<Vec<Vertical>, GatewayError>;
    async fn fetch_products(&self) -> Result<Vec<Product>, GatewayError>;
    async fn fetch_items(&self) -> Result<Vec<RoadmapItem>, GatewayError>;
    async fn fetch_milestones(&self) -> Result<Vec<Milestone>, GatewayError>;

    async fn upsert_vertical(&self, vertical: &Vertical) -> Result<(), GatewayError>;
    async fn upsert_product(&self, product: &Product) -> Result<(), GatewayError>;
    async fn upsert_item(&self, item: &RoadmapItem) -> Result<(), GatewayError>;
    async fn upsert_milestone(&self, milestone: &Milestone) -> Result<(), GatewayError>;

    async fn delete_vertical(&self, id: &str) -> Result<(), GatewayError>;
    async fn delete_product(&self, id: &str) -> Result<(), GatewayError>;
    async fn delete_item(&self, id: &str) -> Result<(), GatewayError>;
    async fn delete_milestone(&self, id: &str) -> Result<(), GatewayError>;
}

#[cfg(test)]
pub(crate) mod mock {
    //! In-memory `RemoteStore` double for reconciliation and mutation tests.

    use std::sync::Mutex;

    use super::*;

    /// Remote double holding plain vectors, with per-collection read failure
    /// switches and a global write failure switch.
    #[derive(Default)]
    pub struct MockRemote {
        pub verticals: Mutex<Vec<Vertical>>,
        pub products: Mutex<Vec<Product>>,
        pub items: Mutex<Vec<RoadmapItem>>,
        pub milestones: Mutex<Vec<Milestone>>,
        pub fail_verticals_read: bool,
        pub fail_products_read: bool,
        pub fail_items_read: bool,
        pub fail_milestones_read: bool,
        pub fail_writes: bool,
    }

    impl MockRemote {
        fn read_error(what: &str) -> GatewayError {
            GatewayError::Api {
                status: 500,
                message: format!("simulated {what} read failure"),
            }
        }

        fn write_error() -> GatewayError {
            GatewayError::Api {
                status: 503,
                message: "simulated write failure".to_string(),
            }
        }
    }

    #[async_trait]
    impl RemoteStore for MockRemote {
        async fn fetch_verticals(&self) -> Result<Vec<Vertical>, GatewayError> {
            if self.fail_verticals_read {
                return Err(Self::read_error("verticals"));
            }
            Ok(self.verticals.lock().unwrap().clone())
        }

        async fn fetch_products(&self) -> Result<Vec<Product>, GatewayError> {
            if self.fail_products_read {
                return Err(Self::read_error("products"));
            }
            Ok(self.products.lock().unwrap().clone())
        }

        async fn fetch_items(&self) -> Result<Vec<RoadmapItem>, GatewayError> {
            if self.fail_items_read {
                return Err(Self::read_error("items"));
            }
            Ok(self.items.lock().unwrap().clone())
        }

        async fn fetch_milestones(&self) -> Result<Vec<Milestone>, GatewayError> {
            if self.fail_milestones_read {
                return Err(Self::read_error("milestones"));
            }
            Ok(self.milestones.lock().unwrap().clone())
        }

        async fn upsert_vertical(&self, vertical: &Vertical) -> Result<(), GatewayError> {
            if self.fail_writes {
                return Err(Self::write_error());
            }
            let mut guard = self.verticals.lock().unwrap();
            match guard.iter_mut().find(|v| v.id == vertical.id) {
                Some(existing) => *existing = vertical.clone(),
                None => guard.push(vertical.clone()),
            }
            Ok(())
        }

        async fn upsert_product(&self, product: &Product) -> Result<(), GatewayError> {
            if self.fail_writes {
                return Err(Self::write_error());
            }
            let mut guard = self.products.lock().unwrap();
            match guard.iter_mut().find(|p| p.id == product.id) {
                Some(existing) => *existing = product.clone(),
                None => guard.push(product.clone()),
            }
            Ok(())
        }

        async fn upsert_item(&self, item: &RoadmapItem) -> Result<(), GatewayError> {
            if self.fail_writes {
                return Err(Self::write_error());
            }
            let mut guard = self.items.lock().unwrap();
            match guard.iter_mut().find(|i| i.id == item.id) {
                Some(existing) => *existing = item.clone(),
                None => guard.push(item.clone()),
            }
            Ok(())
        }

        async fn upsert_milestone(&self, milestone: &Milestone) -> Result<(), GatewayError> {
            if self.fail_writes {
                return Err(Self::write_error());
            }
            let mut guard = self.milestones.lock().unwrap();
            match guard.iter_mut().find(|m| m.id == milestone.id) {
                Some(existing) => *existing = milestone.clone(),
                None => guard.push(milestone.clone()),
            }
            Ok(())
        }

        async fn delete_vertical(&self, id: &str) -> Result<(), GatewayError> {
            if self.fail_writes {
                return Err(Self::write_error());
            }
            self.verticals.lock().unwrap().retain(|v| v.id != id);
            Ok(())
        }

        async fn delete_product(&self, id: &str) -> Result<(), GatewayError> {
            if self.fail_writes {
                return Err(Self::write_error());
            }
            self.products.lock().unwrap().retain(|p| p.id != id);
            Ok(())
        }

        async fn delete_item(&self, id: &str) -> Result<(), GatewayError> {
            if self.fail_writes {
                return Err(Self::write_error());
            }
            self.items.lock().unwrap().retain(|i| i.id != id);
            Ok(())
        }

        async fn delete_milestone(&self, id: &str) -> Result<(), GatewayError> {
            if self.fail_writes {
                return Err(Self::write_error());
            }
            self.milestones.lock().unwrap().retain(|m| m.id != id);
            Ok(())
        }
    }
}
