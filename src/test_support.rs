//! In-memory fakes for every collaborator, recording how they were called

use crate::model::ConnectionParameters;
use crate::services::desktop::{DesktopApi, DesktopContext};
use crate::services::driver::{DriverFactory, GraphDriver, QueryParameters, Record};
use crate::services::{
    Credentials, DashboardLoader, Host, KeyValueStore, ResourceFetcher, Services, SsoProvider,
};
use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// ─────────────────────────────────────────────────────────────────────────────
// Fetching & storage
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeFetcher {
    resources: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn with(mut self, location: &str, text: &str) -> Self {
        self.resources.insert(location.to_string(), text.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResourceFetcher for FakeFetcher {
    async fn fetch_text(&self, location: &str) -> Result<String> {
        self.requests.lock().unwrap().push(location.to_string());
        self.resources
            .get(location)
            .cloned()
            .ok_or_else(|| anyhow!("404 Not Found: {}", location))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
    fail_reads: bool,
}

impl MemoryStore {
    pub fn failing() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            bail!("storage is unavailable");
        }
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Drivers & dashboards
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct QueryCall {
    pub database: String,
    pub query: String,
    pub parameters: QueryParameters,
    pub keys: Vec<String>,
    pub row_limit: usize,
}

pub struct FakeDriver {
    answer: std::result::Result<Vec<Record>, String>,
    calls: Mutex<Vec<QueryCall>>,
}

impl FakeDriver {
    pub fn answering(records: Vec<Record>) -> Self {
        Self {
            answer: Ok(records),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answers the liveness probe successfully
    pub fn connected() -> Self {
        Self::answering(vec![Record::new(vec!["connected".to_string()], vec![json!(true)])])
    }

    pub fn failing(message: &str) -> Self {
        Self {
            answer: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<QueryCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphDriver for FakeDriver {
    async fn run_query(
        &self,
        database: &str,
        query: &str,
        parameters: &QueryParameters,
        keys: &[&str],
        row_limit: usize,
    ) -> Result<Vec<Record>> {
        self.calls.lock().unwrap().push(QueryCall {
            database: database.to_string(),
            query: query.to_string(),
            parameters: parameters.clone(),
            keys: keys.iter().map(|k| k.to_string()).collect(),
            row_limit,
        });
        self.answer.clone().map_err(|e| anyhow!(e))
    }
}

pub struct FakeDriverFactory {
    driver: Arc<FakeDriver>,
    refuse_with: Option<String>,
    created: Mutex<Vec<ConnectionParameters>>,
}

impl FakeDriverFactory {
    pub fn new(driver: FakeDriver) -> Self {
        Self {
            driver: Arc::new(driver),
            refuse_with: None,
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn refusing(message: &str) -> Self {
        Self {
            refuse_with: Some(message.to_string()),
            ..Self::new(FakeDriver::connected())
        }
    }

    pub fn driver(&self) -> &FakeDriver {
        &self.driver
    }

    pub fn created(&self) -> Vec<ConnectionParameters> {
        self.created.lock().unwrap().clone()
    }
}

impl DriverFactory for FakeDriverFactory {
    fn create_driver(&self, params: &ConnectionParameters) -> Result<Arc<dyn GraphDriver>> {
        if let Some(message) = &self.refuse_with {
            bail!("{}", message);
        }
        self.created.lock().unwrap().push(params.clone());
        Ok(self.driver.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardCall {
    Text(String),
    Name { database: String, name: String },
    Id { database: String, id: String },
}

#[derive(Default)]
pub struct FakeDashboardLoader {
    calls: Mutex<Vec<DashboardCall>>,
}

impl FakeDashboardLoader {
    pub fn calls(&self) -> Vec<DashboardCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DashboardLoader for FakeDashboardLoader {
    async fn load_from_text(&self, text: &str) -> Result<()> {
        self.calls.lock().unwrap().push(DashboardCall::Text(text.to_string()));
        Ok(())
    }

    async fn load_by_name(&self, _driver: &dyn GraphDriver, database: &str, name: &str) -> Result<()> {
        self.calls.lock().unwrap().push(DashboardCall::Name {
            database: database.to_string(),
            name: name.to_string(),
        });
        Ok(())
    }

    async fn load_by_id(&self, _driver: &dyn GraphDriver, database: &str, id: &str) -> Result<()> {
        self.calls.lock().unwrap().push(DashboardCall::Id {
            database: database.to_string(),
            id: id.to_string(),
        });
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Host, desktop & SSO
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeHost {
    query: Mutex<String>,
    alerts: Mutex<Vec<String>>,
}

impl FakeHost {
    pub fn at(query: &str) -> Self {
        Self {
            query: Mutex::new(query.to_string()),
            alerts: Mutex::new(Vec::new()),
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }
}

impl Host for FakeHost {
    fn query_string(&self) -> String {
        self.query.lock().unwrap().clone()
    }

    fn reset_location_to_root(&self) {
        self.query.lock().unwrap().clear();
    }

    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }
}

pub struct FakeDesktop {
    context: Option<DesktopContext>,
}

impl FakeDesktop {
    pub fn with_context(json: &str) -> Self {
        Self {
            context: Some(serde_json::from_str(json).unwrap()),
        }
    }

    pub fn unavailable() -> Self {
        Self { context: None }
    }
}

#[async_trait]
impl DesktopApi for FakeDesktop {
    async fn get_context(&self) -> Result<DesktopContext> {
        self.context
            .clone()
            .ok_or_else(|| anyhow!("desktop context unavailable"))
    }
}

pub struct FakeSso {
    answer: Option<Credentials>,
    calls: Mutex<Vec<String>>,
}

impl FakeSso {
    pub fn resolving(username: &str, password: &str) -> Self {
        Self {
            answer: Some(Credentials {
                username: username.to_string(),
                password: password.to_string(),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SsoProvider for FakeSso {
    async fn initialize(&self, discovery_url: &str) -> Result<Credentials> {
        self.calls.lock().unwrap().push(discovery_url.to_string());
        self.answer
            .clone()
            .ok_or_else(|| anyhow!("identity provider rejected the login"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Harness
// ─────────────────────────────────────────────────────────────────────────────

/// Every fake, kept by handle so tests can inspect them after the run
pub struct Fakes {
    pub drivers: Arc<FakeDriverFactory>,
    pub fetcher: Arc<FakeFetcher>,
    pub dashboards: Arc<FakeDashboardLoader>,
    pub storage: Arc<MemoryStore>,
    pub host: Arc<FakeHost>,
    pub desktop: Option<Arc<FakeDesktop>>,
    pub sso: Option<Arc<FakeSso>>,
}

impl Default for Fakes {
    fn default() -> Self {
        Self {
            drivers: Arc::new(FakeDriverFactory::new(FakeDriver::connected())),
            fetcher: Arc::new(FakeFetcher::default()),
            dashboards: Arc::new(FakeDashboardLoader::default()),
            storage: Arc::new(MemoryStore::default()),
            host: Arc::new(FakeHost::default()),
            desktop: None,
            sso: None,
        }
    }
}

impl Fakes {
    pub fn with_config(mut self, json: &str) -> Self {
        self.fetcher = Arc::new(FakeFetcher::default().with(crate::config::CONFIG_FILE, json));
        self
    }

    pub fn services(&self) -> Services {
        Services {
            drivers: self.drivers.clone(),
            fetcher: self.fetcher.clone(),
            dashboards: self.dashboards.clone(),
            storage: self.storage.clone(),
            host: self.host.clone(),
            desktop: self
                .desktop
                .clone()
                .map(|d| d as Arc<dyn DesktopApi>),
            sso: self.sso.clone().map(|s| s as Arc<dyn SsoProvider>),
        }
    }
}
