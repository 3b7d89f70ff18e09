//! Resource fetching service
//!
//! Fetches text resources (the runtime config, dashboards shared by URL)
//! either over HTTP or from the local filesystem.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use url::Url;

#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch a resource as text. Relative locations resolve against the
    /// deployment root.
    async fn fetch_text(&self, location: &str) -> Result<String>;
}

/// Where the application is deployed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeploymentRoot {
    Url(Url),
    Directory(PathBuf),
}

impl DeploymentRoot {
    /// Interpret `root` as an http(s)/file URL, or else as a directory path
    pub fn parse(root: &str) -> DeploymentRoot {
        match Url::parse(root) {
            Ok(mut url) if matches!(url.scheme(), "http" | "https" | "file") => {
                // Relative joins need a trailing slash to stay inside the root
                if !url.path().ends_with('/') {
                    let path = format!("{}/", url.path());
                    url.set_path(&path);
                }
                DeploymentRoot::Url(url)
            }
            _ => DeploymentRoot::Directory(PathBuf::from(root)),
        }
    }
}

enum Resolved {
    Remote(Url),
    Local(PathBuf),
}

/// Fetches over HTTP with reqwest, or from disk for `file://` and paths
pub struct HttpFetcher {
    root: DeploymentRoot,
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(root: DeploymentRoot) -> Self {
        Self {
            root,
            client: reqwest::Client::new(),
        }
    }

    fn resolve(&self, location: &str) -> Result<Resolved> {
        let url = match Url::parse(location) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.root {
                DeploymentRoot::Url(root) => root
                    .join(location)
                    .with_context(|| format!("Invalid location '{}'", location))?,
                DeploymentRoot::Directory(dir) => return Ok(Resolved::Local(dir.join(location))),
            },
            Err(e) => return Err(anyhow!("Invalid location '{}': {}", location, e)),
        };

        match url.scheme() {
            "http" | "https" => Ok(Resolved::Remote(url)),
            "file" => url
                .to_file_path()
                .map(Resolved::Local)
                .map_err(|_| anyhow!("Invalid file location '{}'", url)),
            other => bail!("Unsupported scheme '{}' in '{}'", other, location),
        }
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch_text(&self, location: &str) -> Result<String> {
        match self.resolve(location)? {
            Resolved::Remote(url) => {
                tracing::debug!(%url, "fetching resource");
                let response = self
                    .client
                    .get(url.as_str())
                    .send()
                    .await
                    .with_context(|| format!("Failed to fetch {}", url))?
                    .error_for_status()?;
                Ok(response.text().await?)
            }
            Resolved::Local(path) => tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display())),
        }
    }
}
