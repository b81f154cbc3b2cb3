//! PostgREST client for the Supabase-hosted collections.
//!
//! Every operation is a single HTTP round trip — a failed call is terminal
//! for that attempt (the next user-triggered sync recovers). Responses are
//! checked for status before the payload shape is trusted.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use super::wire::{WireItem, WireMilestone, WireProduct, WireTeam};
use crate::config::Config;
use crate::remote::{GatewayError, RemoteStore};
use crate::types::{Milestone, Product, RoadmapItem, Vertical};

const TEAMS_TABLE: &str = "teams";
const PRODUCTS_TABLE: &str = "products";
const ITEMS_TABLE: &str = "roadmap_items";
const MILESTONES_TABLE: &str = "milestones";

/// HTTP client for the remote collections.
///
/// Construction is the availability check: an unconfigured or unparseable
/// endpoint yields `None`, and callers treat the whole system as offline.
pub struct SupabaseClient {
    http: reqwest::Client,
    rest_url: String,
    key: String,
}

impl SupabaseClient {
    /// Build a client from configuration. `None` when the remote endpoint is
    /// not usable — offline mode, not an error.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.is_configured() {
            return None;
        }

        if let Err(e) = Url::parse(&config.supabase_url) {
            log::warn!(
                "Supabase URL not parseable ({}): running offline",
                e
            );
            return None;
        }

        let rest_url = format!("{}/rest/v1", config.supabase_url.trim_end_matches('/'));
        Some(Self {
            http: reqwest::Client::new(),
            rest_url,
            key: config.supabase_key.clone(),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    async fn select_all<T: DeserializeOwned>(
        &self,
        table: &str,
        order_by_name: bool,
    ) -> Result<Vec<T>, GatewayError> {
        let mut request = self
            .http
            .get(self.table_url(table))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .query(&[("select", "*")]);

        if order_by_name {
            request = request.query(&[("order", "name.asc")]);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json::<Vec<T>>().await?)
    }

    /// Insert-or-replace one row by primary key.
    async fn upsert_row<T: Serialize>(&self, table: &str, row: &T) -> Result<(), GatewayError> {
        let resp = self
            .http
            .post(self.table_url(table))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }

    /// Delete one row by id. Deleting an absent id is a success at this
    /// layer; PostgREST reports it as an empty match.
    async fn delete_row(&self, table: &str, id: &str) -> Result<(), GatewayError> {
        let resp = self
            .http
            .delete(self.table_url(table))
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl RemoteStore for SupabaseClient {
    async fn fetch_verticals(&self) -> Result<Vec<Vertical>, GatewayError> {
        let rows: Vec<WireTeam> = self.select_all(TEAMS_TABLE, true).await?;
        Ok(rows.into_iter().map(Vertical::from).collect())
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, GatewayError> {
        let rows: Vec<WireProduct> = self.select_all(PRODUCTS_TABLE, true).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn fetch_items(&self) -> Result<Vec<RoadmapItem>, GatewayError> {
        let rows: Vec<WireItem> = self.select_all(ITEMS_TABLE, false).await?;
        Ok(rows.into_iter().map(RoadmapItem::from).collect())
    }

    async fn fetch_milestones(&self) -> Result<Vec<Milestone>, GatewayError> {
        let rows: Vec<WireMilestone> = self.select_all(MILESTONES_TABLE, false).await?;
        Ok(rows.into_iter().map(Milestone::from).collect())
    }

    async fn upsert_vertical(&self, vertical: &Vertical) -> Result<(), GatewayError> {
        self.upsert_row(TEAMS_TABLE, &WireTeam::from(vertical)).await
    }

    async fn upsert_product(&self, product: &Product) -> Result<(), GatewayError> {
        self.upsert_row(PRODUCTS_TABLE, &WireProduct::from(product))
            .await
    }

    async fn upsert_item(&self, item: &RoadmapItem) -> Result<(), GatewayError> {
        self.upsert_row(ITEMS_TABLE, &WireItem::from(item)).await
    }

    async fn upsert_milestone(&self, milestone: &Milestone) -> Result<(), GatewayError> {
        self.upsert_row(MILESTONES_TABLE, &WireMilestone::from(milestone))
            .await
    }

    async fn delete_vertical(&self, id: &str) -> Result<(), GatewayError> {
        self.delete_row(TEAMS_TABLE, id).await
    }

    async fn delete_product(&self, id: &str) -> Result<(), GatewayError> {
        self.delete_row(PRODUCTS_TABLE, id).await
    }

    async fn delete_item(&self, id: &str) -> Result<(), GatewayError> {
        self.delete_row(ITEMS_TABLE, id).await
    }

    async fn delete_milestone(&self, id: &str) -> Result<(), GatewayError> {
        self.delete_row(MILESTONES_TABLE, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unconfigured_yields_no_client() {
        assert!(SupabaseClient::from_config(&Config::default()).is_none());
    }

    #[test]
    fn test_placeholder_yields_no_client() {
        let config = Config {
            supabase_url: "https://PLACEHOLDER.supabase.co".to_string(),
            supabase_key: "anon".to_string(),
        };
        assert!(SupabaseClient::from_config(&config).is_none());
    }

    #[test]
    fn test_bad_url_yields_no_client() {
        let config = Config {
            supabase_url: "not a url".to_string(),
            supabase_key: "anon".to_string(),
        };
        assert!(SupabaseClient::from_config(&config).is_none());
    }

    #[test]
    fn test_table_url_layout() {
        let config = Config {
            supabase_url: "https://abc123.supabase.co/".to_string(),
            supabase_key: "anon".to_string(),
        };
        let client = SupabaseClient::from_config(&config).expect("client");
        assert_eq!(
            client.table_url("roadmap_items"),
            "https://abc123.supabase.co/rest/v1/roadmap_items"
        );
    }
}
