//! Root application
//!
//! `App` owns the store and the collaborators. Each public operation is one
//! user- or startup-triggered flow: it reads state, talks to services and
//! dispatches actions. Failures end up as notifications, never as errors
//! returned to the caller.

use crate::action::Action;
use crate::config::AppConfig;
use crate::model::{ApplicationState, ConnectionParameters, Notification, PendingDashboard};
use crate::services::desktop::{connection_from_graph, find_active_graph};
use crate::services::driver::{classify_probe, ProbeOutcome, PROBE_KEY, PROBE_QUERY};
use crate::services::{decode_share_link, GraphDriver, QueryParameters, Services, DASHBOARD_STORAGE_KEY};
use crate::store::Store;
use anyhow::{anyhow, Result};
use std::sync::Arc;

// ═══════════════════════════════════════════════════════════════════════════════
// Notification Texts
// ═══════════════════════════════════════════════════════════════════════════════

const UNABLE_TO_CONNECT: &str = "Unable to establish connection";
const UNKNOWN_CONNECTION_ERROR: &str = "Unknown Connection Error";
const UNKNOWN_CONNECTION_ERROR_MESSAGE: &str = "Check the logs for more details.";
const UNABLE_TO_CONNECT_DESKTOP: &str = "Unable to establish connection to Neo4j Desktop";
const NO_DESKTOP_CONNECTION_MESSAGE: &str = "No active database was found in Neo4j Desktop.";
const UNABLE_TO_LOAD_DASHBOARD: &str = "Unable to load dashboard";
const UNABLE_TO_LOAD_SHARED_DASHBOARD: &str = "Unable to load shared dashboard";
const INVALID_SHARE_URL_MESSAGE: &str = "You have specified an invalid/incomplete share URL. \
     Try regenerating the share URL from the sharing window.";
const INVALID_SHARE_IDENTIFIERS_MESSAGE: &str = "The provided connection or dashboard identifiers \
     are invalid. Try regenerating the share URL from the sharing window.";
const SSO_FAILED: &str = "Unable to connect using SSO";
const SSO_FAILED_MESSAGE: &str =
    "Something went wrong. Most likely your credentials are incorrect...";
const UNABLE_TO_LOAD_CONFIG: &str = "Unable to load application configuration";
const UNABLE_TO_LOAD_CONFIG_MESSAGE: &str =
    "Do you have a valid config.json deployed with your application?";

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

pub struct App {
    store: Store,
    services: Services,

    /// Driver of the last successful connection
    driver: Option<Arc<dyn GraphDriver>>,
}

impl App {
    pub fn new(services: Services) -> App {
        Self::with_state(services, ApplicationState::new())
    }

    /// Start from an existing state, e.g. one restored after an SSO redirect
    pub fn with_state(services: Services, state: ApplicationState) -> App {
        App {
            store: Store::new(state),
            services,
            driver: None,
        }
    }

    pub fn state(&self) -> &ApplicationState {
        self.store.state()
    }

    pub fn into_state(self) -> ApplicationState {
        self.store.into_state()
    }

    /// Driver committed by the last successful connection
    pub fn driver(&self) -> Option<&Arc<dyn GraphDriver>> {
        self.driver.as_ref()
    }

    fn dispatch(&mut self, action: Action) {
        self.store.dispatch(action);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_notification(&mut self, title: &str, message: &str) {
        tracing::warn!(title, message, "notification");
        self.dispatch(Action::CreateNotification(Notification::new(title, message)));
    }

    pub fn clear_notification(&mut self) {
        self.dispatch(Action::ClearNotification);
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Connecting
    // ─────────────────────────────────────────────────────────────────────────

    /// Open a driver, probe it, and commit the connection if the probe
    /// answers. Loads any dashboard queued for after connecting.
    pub async fn create_connection(&mut self, params: ConnectionParameters) {
        let driver = match self.services.drivers.create_driver(&params) {
            Ok(driver) => driver,
            Err(e) => {
                self.create_notification(UNABLE_TO_CONNECT, &format!("{:#}", e));
                return;
            }
        };
        tracing::info!(address = %params.address(), database = %params.database, "Attempting to connect...");

        let probe = driver
            .run_query(&params.database, PROBE_QUERY, &QueryParameters::new(), &[PROBE_KEY], 1)
            .await;
        tracing::info!("Confirming connection was established...");

        let outcome = match probe {
            Ok(records) => classify_probe(&records),
            Err(e) => ProbeOutcome::Failed(format!("{:#}", e)),
        };

        match outcome {
            ProbeOutcome::Failed(error) => self.create_notification(UNABLE_TO_CONNECT, &error),
            ProbeOutcome::Unknown => {
                self.create_notification(UNKNOWN_CONNECTION_ERROR, UNKNOWN_CONNECTION_ERROR_MESSAGE)
            }
            ProbeOutcome::Connected => {
                self.dispatch(Action::SetConnectionProperties(params));
                self.dispatch(Action::SetConnectionModalOpen(false));
                self.dispatch(Action::SetConnected(true));
                self.driver = Some(driver);
                self.load_pending_dashboard().await;
            }
        }
    }

    async fn load_pending_dashboard(&mut self) {
        let Some(pending) = self.state().dashboard_to_load_after_connecting.clone() else {
            return;
        };
        let database = self.state().standalone_settings.dashboard_database.clone();

        let result = match (&pending, self.driver.clone()) {
            (PendingDashboard::Url(url), _) => self.load_dashboard_from_url(url).await,
            (PendingDashboard::Name(name), Some(driver)) => {
                self.services
                    .dashboards
                    .load_by_name(driver.as_ref(), &database, name)
                    .await
            }
            (PendingDashboard::Id(id), Some(driver)) => {
                self.services
                    .dashboards
                    .load_by_id(driver.as_ref(), &database, id)
                    .await
            }
            (_, None) => Err(anyhow!("Not connected")),
        };
        self.dispatch(Action::SetDashboardToLoadAfterConnecting(None));

        if let Err(e) = result {
            self.create_notification(UNABLE_TO_LOAD_DASHBOARD, &format!("{:#}", e));
        }
    }

    async fn load_dashboard_from_url(&self, url: &str) -> Result<()> {
        let text = self.services.fetcher.fetch_text(url).await?;
        self.services.dashboards.load_from_text(&text).await
    }

    /// Connect with the details the desktop host advertised
    pub async fn create_connection_from_desktop_integration(&mut self) {
        match self.state().desktop_connection.clone() {
            Some(params) => self.create_connection(params).await,
            None => self.create_notification(UNABLE_TO_CONNECT_DESKTOP, NO_DESKTOP_CONNECTION_MESSAGE),
        }
    }

    /// Remember the active desktop database so the user can connect to it
    pub async fn set_database_from_desktop_integration(&mut self) {
        let Some(desktop) = self.services.desktop.clone() else {
            return;
        };

        let context = match desktop.get_context().await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "desktop context unavailable");
                return;
            }
        };

        let Some(graph) = find_active_graph(&context) else {
            tracing::info!("No active desktop database found");
            return;
        };

        match connection_from_graph(graph) {
            Ok(params) => self.dispatch(Action::SetDesktopConnectionProperties(params)),
            Err(e) => tracing::warn!(error = %format!("{:#}", e), "unusable desktop database"),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Sharing
    // ─────────────────────────────────────────────────────────────────────────

    /// Decode a share link from the current location, if there is one
    pub fn handle_shared_dashboards(&mut self) {
        let query = self.services.host.query_string();
        match decode_share_link(&query) {
            Ok(None) => {}
            Ok(Some(details)) => {
                tracing::info!(id = %details.id, kind = %details.kind, "share link detected");
                self.dispatch(Action::SetShareDetails(details));
                self.services.host.reset_location_to_root();
            }
            Err(e) => {
                tracing::warn!(error = %e, "invalid share link");
                self.create_notification(UNABLE_TO_LOAD_SHARED_DASHBOARD, INVALID_SHARE_URL_MESSAGE);
            }
        }
    }

    /// The user agreed to open the dashboard from the decoded share link
    pub async fn confirm_load_shared_dashboard(&mut self) {
        let Some(share) = self.state().share_details.clone() else {
            self.create_notification(UNABLE_TO_LOAD_SHARED_DASHBOARD, INVALID_SHARE_IDENTIFIERS_MESSAGE);
            return;
        };

        self.dispatch(Action::SetWelcomeScreenOpen(false));
        self.dispatch(Action::SetDashboardToLoadAfterConnecting(Some(
            PendingDashboard::parse(&share.id),
        )));
        if let Some(database) = share.dashboard_database {
            self.dispatch(Action::SetStandaloneDashboardDatabase(database));
        }
        if share.standalone {
            self.dispatch(Action::SetStandaloneMode(true));
        }
        self.dispatch(Action::ResetShareDetails);

        match share.connection {
            Some(params) => self.create_connection(params).await,
            None => self.dispatch(Action::SetConnectionModalOpen(true)),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Startup
    // ─────────────────────────────────────────────────────────────────────────

    /// Initialize the application: load the runtime config, then finish an
    /// SSO redirect, start standalone mode, or show the welcome screen
    pub async fn load_application_config(&mut self) {
        let config = AppConfig::load(self.services.fetcher.as_ref()).await;

        if let Err(e) = self.bootstrap(&config).await {
            tracing::error!(error = %format!("{:#}", e), "startup failed");
            self.dispatch(Action::SetWelcomeScreenOpen(false));
            self.create_notification(UNABLE_TO_LOAD_CONFIG, UNABLE_TO_LOAD_CONFIG_MESSAGE);
        }
    }

    async fn bootstrap(&mut self, config: &AppConfig) -> Result<()> {
        // Decisions below use the state from before the config was applied
        let wait_for_sso = self.state().wait_for_sso;
        let previous = self.state().connection.clone();

        self.dispatch(Action::SetSsoEnabled {
            enabled: config.sso_enabled,
            discovery_url: config.sso_discovery_url.clone(),
        });
        self.dispatch(Action::SetStandaloneEnabled {
            enabled: config.standalone,
            settings: config.standalone_settings(),
        });
        self.dispatch(Action::SetConnectionModalOpen(false));

        if wait_for_sso && self.complete_sso_redirect(config).await {
            return Ok(());
        }

        if config.standalone {
            self.start_standalone(config, &previous).await;
            Ok(())
        } else {
            self.start_welcome().await
        }
    }

    /// Finish the round-trip to the identity provider
    ///
    /// Returns whether credentials were resolved.
    pub async fn complete_sso_redirect(&mut self, config: &AppConfig) -> bool {
        self.dispatch(Action::CloseAllModals);
        self.dispatch(Action::SetConnected(false));
        self.dispatch(Action::SetWelcomeScreenOpen(false));

        let resolved = match self.services.sso.clone() {
            Some(sso) => sso.initialize(&config.sso_discovery_url).await,
            None => Err(anyhow!("No SSO provider is configured")),
        };

        let success = match resolved {
            Ok(credentials) => {
                if config.standalone {
                    let params = ConnectionParameters::new(
                        config.standalone_protocol.clone(),
                        config.standalone_host.clone(),
                        config.standalone_port.clone(),
                        config.standalone_database.clone(),
                        credentials.username,
                        credentials.password,
                    );
                    self.dispatch(Action::SetConnectionProperties(params.clone()));
                    self.dispatch(Action::SetDashboardToLoadAfterConnecting(Some(
                        PendingDashboard::by_name(&config.standalone_dashboard_name),
                    )));
                    self.create_connection(params).await;
                }
                true
            }
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "SSO failed");
                false
            }
        };

        self.dispatch(Action::SetWaitForSso(false));
        if !success {
            self.services.host.alert(SSO_FAILED);
            self.create_notification(SSO_FAILED, SSO_FAILED_MESSAGE);
        }
        success
    }

    async fn start_standalone(&mut self, config: &AppConfig, previous: &ConnectionParameters) {
        let params = ConnectionParameters::new(
            config.standalone_protocol.clone(),
            config.standalone_host.clone(),
            config.standalone_port.clone(),
            config.standalone_database.clone(),
            config.username().unwrap_or(previous.username.as_str()),
            config.password().unwrap_or(previous.password.as_str()),
        );
        self.dispatch(Action::SetConnectionProperties(params.clone()));
        self.dispatch(Action::SetAboutModalOpen(false));
        self.dispatch(Action::SetConnected(false));
        self.dispatch(Action::SetWelcomeScreenOpen(false));
        self.dispatch(Action::SetDashboardToLoadAfterConnecting(Some(
            PendingDashboard::by_name(&config.standalone_dashboard_name),
        )));
        self.clear_notification();

        // Credentials in the config mean no one needs to type them in
        if config.username().is_some() && config.password().is_some() {
            self.create_connection(params).await;
        } else {
            self.dispatch(Action::SetConnectionModalOpen(true));
        }
    }

    async fn start_welcome(&mut self) -> Result<()> {
        self.dispatch(Action::ClearDesktopConnectionProperties);
        self.set_database_from_desktop_integration().await;

        let old = self.services.storage.get_item(DASHBOARD_STORAGE_KEY)?;
        self.dispatch(Action::SetOldDashboard(old));
        self.dispatch(Action::SetConnected(false));
        self.dispatch(Action::SetDashboardToLoadAfterConnecting(None));
        self.dispatch(Action::SetWelcomeScreenOpen(true));
        self.clear_notification();
        self.handle_shared_dashboards();
        self.dispatch(Action::SetConnectionModalOpen(false));
        self.dispatch(Action::SetAboutModalOpen(false));
        Ok(())
    }
}
