//! External service interactions
//!
//! This module contains the seams to systems outside the bootstrap flow,
//! plus the implementations the command-line binary uses:
//! - Resource fetching (runtime config, dashboards shared by URL)
//! - Local key-value storage
//! - The host environment (location, alerts)
//! - Share-link decoding
//! - Database drivers and dashboard loading
//! - Desktop host context and single sign-on

pub mod dashboard;
pub mod desktop;
pub mod driver;
pub mod fetch;
pub mod host;
pub mod http_driver;
pub mod share_link;
pub mod sso;
pub mod storage;

pub use dashboard::{DashboardLoader, StoredDashboardLoader};
pub use desktop::{DesktopApi, DesktopContext, DesktopContextFile};
pub use driver::{DriverFactory, GraphDriver, QueryParameters, Record};
pub use fetch::{DeploymentRoot, HttpFetcher, ResourceFetcher};
pub use host::{ConsoleHost, Host};
pub use http_driver::HttpDriverFactory;
pub use share_link::{build_share_url, decode_share_link, ShareLinkError};
pub use sso::{Credentials, SsoProvider};
pub use storage::{FileStore, KeyValueStore, DASHBOARD_STORAGE_KEY};

use std::sync::Arc;

/// Collaborators the application talks to
#[derive(Clone)]
pub struct Services {
    pub drivers: Arc<dyn DriverFactory>,
    pub fetcher: Arc<dyn ResourceFetcher>,
    pub dashboards: Arc<dyn DashboardLoader>,
    pub storage: Arc<dyn KeyValueStore>,
    pub host: Arc<dyn Host>,
    /// Present only when running inside the desktop host
    pub desktop: Option<Arc<dyn DesktopApi>>,
    pub sso: Option<Arc<dyn SsoProvider>>,
}
