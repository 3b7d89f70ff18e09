//! Database driver seam
//!
//! The query engine itself lives outside this crate. The bootstrap flow only
//! needs to open a driver for a set of connection parameters and run a
//! query that returns keyed rows.

use crate::model::ConnectionParameters;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Liveness probe issued right after opening a driver
pub const PROBE_QUERY: &str = "RETURN true as connected";
/// The single column the probe returns
pub const PROBE_KEY: &str = "connected";

pub type QueryParameters = serde_json::Map<String, Value>;

/// One result row, keeping the column order the database returned
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    keys: Vec<String>,
    values: Vec<Value>,
}

impl Record {
    pub fn new(keys: Vec<String>, values: Vec<Value>) -> Self {
        Self { keys, values }
    }

    /// A row reporting a query failure under the `error` key
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(vec!["error".to_string()], vec![Value::String(message.into())])
    }

    pub fn first_key(&self) -> Option<&str> {
        self.keys.first().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.keys
            .iter()
            .position(|k| k == key)
            .and_then(|i| self.values.get(i))
    }
}

#[async_trait]
pub trait GraphDriver: Send + Sync {
    /// Run `query` against `database`, returning at most `row_limit` rows
    /// that carry the expected `keys`
    async fn run_query(
        &self,
        database: &str,
        query: &str,
        parameters: &QueryParameters,
        keys: &[&str],
        row_limit: usize,
    ) -> Result<Vec<Record>>;
}

pub trait DriverFactory: Send + Sync {
    /// Open a driver bound to `params`. Fails on an unusable protocol or host.
    fn create_driver(&self, params: &ConnectionParameters) -> Result<Arc<dyn GraphDriver>>;
}

/// How the first row of a probe result reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Connected,
    Failed(String),
    Unknown,
}

pub fn classify_probe(records: &[Record]) -> ProbeOutcome {
    let Some(first) = records.first() else {
        return ProbeOutcome::Unknown;
    };

    if let Some(error) = first.get("error") {
        let message = match error {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        return ProbeOutcome::Failed(message);
    }

    if first.first_key() == Some(PROBE_KEY) {
        ProbeOutcome::Connected
    } else {
        ProbeOutcome::Unknown
    }
}
