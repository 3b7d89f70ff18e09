//! neodash-bootstrap - runs the dashboard startup flow from the command line
//!
//! Wires the real collaborators together, bootstraps once, and prints the
//! resulting state as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use neodash_bootstrap::model::{ApplicationState, ShareDetails};
use neodash_bootstrap::services::{
    build_share_url, ConsoleHost, DeploymentRoot, DesktopApi, DesktopContextFile, FileStore,
    HttpDriverFactory, HttpFetcher, KeyValueStore, Services, StoredDashboardLoader,
};
use neodash_bootstrap::App;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Debug, Parser)]
#[command(name = "neodash-bootstrap", version, about = "Bootstrap a graph dashboard session")]
struct Cli {
    /// Deployment root (URL or directory) that serves config.json
    #[arg(long, default_value = ".")]
    deployment_root: String,

    /// Current location; its query string may carry a share link
    #[arg(long, default_value = "http://localhost/")]
    location: Url,

    /// Directory for local storage [default: $HOME/.neodash]
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// JSON file with the desktop host context
    #[arg(long)]
    desktop_context: Option<PathBuf>,

    /// Start as if returning from the identity provider
    #[arg(long)]
    sso_redirect: bool,

    /// Confirm a decoded share link right after startup
    #[arg(long)]
    confirm_share: bool,

    /// HTTP port of the database [default: derived from the Bolt port]
    #[arg(long)]
    http_port: Option<u16>,

    /// Print a share link for this dashboard id (or `name:<title>`)
    #[arg(long, value_name = "ID")]
    share_dashboard: Option<String>,

    /// Embed the current connection's credentials in the share link
    #[arg(long, requires = "share_dashboard")]
    share_credentials: bool,
}

/// What the run ended with, minus secrets
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StateSummary {
    connected: bool,
    address: Option<String>,
    database: String,
    username: String,
    standalone: bool,
    sso_enabled: bool,
    welcome_screen_open: bool,
    connection_modal_open: bool,
    share_id: Option<String>,
    old_dashboard: bool,
    notification: Option<NotificationSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    share_url: Option<String>,
}

#[derive(Debug, Serialize)]
struct NotificationSummary {
    title: String,
    message: String,
    time: String,
}

impl From<&ApplicationState> for StateSummary {
    fn from(state: &ApplicationState) -> Self {
        let connection = &state.connection;
        StateSummary {
            connected: state.connected,
            address: (!connection.host.is_empty()).then(|| connection.address()),
            database: connection.database.clone(),
            username: connection.username.clone(),
            standalone: state.standalone,
            sso_enabled: state.sso_enabled,
            welcome_screen_open: state.welcome_screen_open,
            connection_modal_open: state.connection_modal_open(),
            share_id: state.share_details.as_ref().map(|share| share.id.clone()),
            old_dashboard: state.old_dashboard.is_some(),
            notification: state.notification.as_ref().map(|n| NotificationSummary {
                title: n.title.clone(),
                message: n.message.clone(),
                time: n.formatted_time(),
            }),
            share_url: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let storage_dir = match cli.storage_dir {
        Some(dir) => dir,
        None => FileStore::default_dir().context("HOME is not set; pass --storage-dir")?,
    };
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(storage_dir));

    let services = Services {
        drivers: Arc::new(HttpDriverFactory::new().with_http_port(cli.http_port)),
        fetcher: Arc::new(HttpFetcher::new(DeploymentRoot::parse(&cli.deployment_root))),
        dashboards: Arc::new(StoredDashboardLoader::new(storage.clone())),
        storage,
        host: Arc::new(ConsoleHost::new(cli.location.clone())),
        desktop: cli
            .desktop_context
            .map(|path| Arc::new(DesktopContextFile::new(path)) as Arc<dyn DesktopApi>),
        sso: None,
    };

    let mut state = ApplicationState::new();
    state.wait_for_sso = cli.sso_redirect;

    let mut app = App::with_state(services, state);
    app.load_application_config().await;

    if cli.confirm_share && app.state().share_details.is_some() {
        app.confirm_load_shared_dashboard().await;
    }

    let state = app.into_state();
    let mut summary = StateSummary::from(&state);
    if let Some(id) = cli.share_dashboard {
        let details = ShareDetails {
            kind: "database".to_string(),
            id,
            standalone: state.standalone,
            connection: (cli.share_credentials && state.connected)
                .then(|| state.connection.clone()),
            dashboard_database: Some(state.standalone_settings.dashboard_database.clone()),
        };
        summary.share_url = Some(build_share_url(&cli.location, &details).to_string());
    }

    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
