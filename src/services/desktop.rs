//! Desktop host integration
//!
//! When the application runs inside the desktop host, the host exposes a
//! context listing projects and their graphs. The first graph marked
//! `ACTIVE` supplies default connection details.

use crate::model::connection::deserialize_optional_port;
use crate::model::ConnectionParameters;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::path::PathBuf;

const ACTIVE_STATUS: &str = "ACTIVE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DesktopContext {
    #[serde(default)]
    pub projects: Vec<DesktopProject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DesktopProject {
    #[serde(default)]
    pub graphs: Vec<DesktopGraph>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DesktopGraph {
    #[serde(default)]
    pub status: String,
    pub connection: Option<GraphConnection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphConnection {
    pub configuration: GraphConfiguration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfiguration {
    pub protocols: GraphProtocols,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphProtocols {
    pub bolt: Option<BoltProtocol>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BoltProtocol {
    pub url: String,
    #[serde(default, deserialize_with = "deserialize_optional_port")]
    pub port: Option<String>,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[async_trait]
pub trait DesktopApi: Send + Sync {
    async fn get_context(&self) -> Result<DesktopContext>;
}

/// Reads the desktop context from a JSON file
pub struct DesktopContextFile {
    path: PathBuf,
}

impl DesktopContextFile {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl DesktopApi for DesktopContextFile {
    async fn get_context(&self) -> Result<DesktopContext> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", self.path.display()))
    }
}

/// First graph with status `ACTIVE`, scanning projects in order
pub fn find_active_graph(context: &DesktopContext) -> Option<&DesktopGraph> {
    context
        .projects
        .iter()
        .flat_map(|project| project.graphs.iter())
        .find(|graph| graph.status == ACTIVE_STATUS)
}

/// Turn a graph's bolt descriptor into connection fields
///
/// The database is left empty; the desktop host does not name one.
pub fn connection_from_graph(graph: &DesktopGraph) -> Result<ConnectionParameters> {
    let bolt = graph
        .connection
        .as_ref()
        .and_then(|c| c.configuration.protocols.bolt.as_ref())
        .ok_or_else(|| anyhow!("Active graph has no bolt configuration"))?;

    let protocol = bolt.url.split("://").next().unwrap_or_default();
    let host = bolt
        .url
        .split("://")
        .nth(1)
        .ok_or_else(|| anyhow!("Bolt URL '{}' has no protocol", bolt.url))?
        .split(':')
        .next()
        .unwrap_or_default();

    Ok(ConnectionParameters::new(
        protocol,
        host,
        bolt.port.clone().unwrap_or_default(),
        "",
        bolt.username.clone(),
        bolt.password.clone(),
    ))
}
