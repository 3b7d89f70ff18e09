//! Driver over the database's HTTP transactional endpoint
//!
//! Sends each query as a single auto-commit transaction to
//! `POST /db/{database}/tx/commit` with basic auth.

use super::driver::{DriverFactory, GraphDriver, QueryParameters, Record};
use crate::model::ConnectionParameters;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use url::Url;

#[derive(Debug, Deserialize)]
struct TxResponse {
    #[serde(default)]
    results: Vec<TxResult>,
    #[serde(default)]
    errors: Vec<TxError>,
}

#[derive(Debug, Deserialize)]
struct TxResult {
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<TxRow>,
}

#[derive(Debug, Deserialize)]
struct TxRow {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct TxError {
    code: String,
    message: String,
}

/// Map a driver protocol onto the HTTP scheme serving the same database
fn http_scheme(protocol: &str) -> Option<&'static str> {
    match protocol {
        "bolt" | "neo4j" | "http" => Some("http"),
        "bolt+s" | "bolt+ssc" | "neo4j+s" | "neo4j+ssc" | "https" => Some("https"),
        _ => None,
    }
}

const BOLT_PORT: u16 = 7687;
const HTTP_PORT: u16 = 7474;
const HTTPS_PORT: u16 = 7473;

/// Port of the HTTP listener matching the port a connection was given
///
/// Config defaults, share links and desktop descriptors all carry the Bolt
/// port. On the default Bolt port the database's default HTTP(S) port is
/// used instead. Any other port is assumed to already be the HTTP one.
fn http_port(protocol: &str, scheme: &str, port: u16) -> u16 {
    let speaks_bolt = !matches!(protocol, "http" | "https");
    match (speaks_bolt && port == BOLT_PORT, scheme) {
        (true, "https") => HTTPS_PORT,
        (true, _) => HTTP_PORT,
        (false, _) => port,
    }
}

#[derive(Default)]
pub struct HttpDriverFactory {
    client: reqwest::Client,
    /// Overrides the port derived from the connection parameters
    port_override: Option<u16>,
}

impl HttpDriverFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_http_port(mut self, port: Option<u16>) -> Self {
        self.port_override = port;
        self
    }

    fn base_url(&self, params: &ConnectionParameters) -> Result<Url> {
        let scheme = http_scheme(&params.protocol)
            .ok_or_else(|| anyhow!("Unsupported protocol '{}'", params.protocol))?;
        if params.host.trim().is_empty() {
            bail!("No host specified");
        }
        let port: u16 = params
            .port
            .trim()
            .parse()
            .with_context(|| format!("Invalid port '{}'", params.port))?;
        let port = self
            .port_override
            .unwrap_or_else(|| http_port(&params.protocol, scheme, port));

        Url::parse(&format!("{}://{}:{}/", scheme, params.host, port))
            .with_context(|| format!("Invalid host '{}'", params.host))
    }
}

impl DriverFactory for HttpDriverFactory {
    fn create_driver(&self, params: &ConnectionParameters) -> Result<Arc<dyn GraphDriver>> {
        let base = self.base_url(params)?;
        tracing::debug!(%base, "http driver created");

        Ok(Arc::new(HttpDriver {
            client: self.client.clone(),
            base,
            username: params.username.clone(),
            password: params.password.clone(),
        }))
    }
}

pub struct HttpDriver {
    client: reqwest::Client,
    base: Url,
    username: String,
    password: String,
}

impl HttpDriver {
    fn commit_url(&self, database: &str) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Cannot build a query URL from {}", self.base))?
            .clear()
            .extend(["db", database, "tx", "commit"]);
        Ok(url)
    }
}

#[async_trait]
impl GraphDriver for HttpDriver {
    async fn run_query(
        &self,
        database: &str,
        query: &str,
        parameters: &QueryParameters,
        keys: &[&str],
        row_limit: usize,
    ) -> Result<Vec<Record>> {
        let url = self.commit_url(database)?;
        let body = json!({
            "statements": [{
                "statement": query,
                "parameters": parameters,
                "resultDataContents": ["row"],
            }]
        });

        let response = self
            .client
            .post(url.as_str())
            .basic_auth(&self.username, Some(&self.password))
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(serde_json::to_string(&body)?)
            .send()
            .await
            .with_context(|| format!("Failed to reach {}", self.base))?
            .error_for_status()?;

        let response: TxResponse = serde_json::from_str(&response.text().await?)?;
        parse_response(response, keys, row_limit)
    }
}

fn parse_response(response: TxResponse, keys: &[&str], row_limit: usize) -> Result<Vec<Record>> {
    if let Some(error) = response.errors.first() {
        bail!("{}: {}", error.code, error.message);
    }

    let Some(result) = response.results.into_iter().next() else {
        return Ok(Vec::new());
    };

    if let Some(missing) = keys.iter().find(|k| !result.columns.iter().any(|c| c == *k)) {
        bail!("Query result is missing the '{}' field", missing);
    }

    Ok(result
        .data
        .into_iter()
        .take(row_limit)
        .map(|row| Record::new(result.columns.clone(), row.row))
        .collect())
}
