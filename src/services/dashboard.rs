//! Dashboard loading seam
//!
//! The dashboard subsystem itself lives elsewhere. The connection flow only
//! hands it a document, or asks it to resolve one from the database.

use super::driver::{GraphDriver, QueryParameters};
use super::storage::{KeyValueStore, DASHBOARD_STORAGE_KEY};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

const LOAD_BY_NAME_QUERY: &str = "MATCH (n:_Neodash_Dashboard) WHERE n.title = $title \
     RETURN n.content as dashboard ORDER BY n.date DESC LIMIT 1";
const LOAD_BY_ID_QUERY: &str =
    "MATCH (n:_Neodash_Dashboard) WHERE n.uuid = $uuid RETURN n.content as dashboard";
const DASHBOARD_KEY: &str = "dashboard";

#[async_trait]
pub trait DashboardLoader: Send + Sync {
    /// Load a dashboard from its JSON document
    async fn load_from_text(&self, text: &str) -> Result<()>;

    /// Load the latest dashboard saved under `name` in `database`
    async fn load_by_name(&self, driver: &dyn GraphDriver, database: &str, name: &str) -> Result<()>;

    /// Load the dashboard with identifier `id` from `database`
    async fn load_by_id(&self, driver: &dyn GraphDriver, database: &str, id: &str) -> Result<()>;
}

/// Resolves dashboards from `_Neodash_Dashboard` nodes and keeps the loaded
/// document in local storage
pub struct StoredDashboardLoader {
    storage: Arc<dyn KeyValueStore>,
}

impl StoredDashboardLoader {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        Self { storage }
    }

    async fn load_single(
        &self,
        driver: &dyn GraphDriver,
        database: &str,
        query: &str,
        parameter: (&str, &str),
    ) -> Result<()> {
        let mut parameters = QueryParameters::new();
        parameters.insert(parameter.0.to_string(), Value::String(parameter.1.to_string()));

        let records = driver
            .run_query(database, query, &parameters, &[DASHBOARD_KEY], 1)
            .await?;
        let Some(record) = records.first() else {
            bail!("No dashboard found with {} '{}'", parameter.0, parameter.1);
        };

        match record.get(DASHBOARD_KEY) {
            Some(Value::String(text)) => self.load_from_text(text).await,
            _ => Err(anyhow!("Dashboard '{}' has no content", parameter.1)),
        }
    }
}

#[async_trait]
impl DashboardLoader for StoredDashboardLoader {
    async fn load_from_text(&self, text: &str) -> Result<()> {
        let document: Value = serde_json::from_str(text)
            .map_err(|e| anyhow!("Not a valid dashboard file: {}", e))?;
        let title = document
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("untitled");

        self.storage.set_item(DASHBOARD_STORAGE_KEY, text)?;
        tracing::info!(title, "Dashboard loaded");
        Ok(())
    }

    async fn load_by_name(&self, driver: &dyn GraphDriver, database: &str, name: &str) -> Result<()> {
        self.load_single(driver, database, LOAD_BY_NAME_QUERY, ("title", name))
            .await
    }

    async fn load_by_id(&self, driver: &dyn GraphDriver, database: &str, id: &str) -> Result<()> {
        self.load_single(driver, database, LOAD_BY_ID_QUERY, ("uuid", id))
            .await
    }
}
