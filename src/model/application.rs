//! Application state - everything the bootstrap and connection flows touch
//!
//! State is a plain value. `reduce` consumes it together with one `Action`
//! and returns the next state; nothing else mutates it.

use super::connection::{ConnectionParameters, StandaloneSettings};
use super::dashboard::PendingDashboard;
use super::modal::{Modal, ModalStack};
use super::notification::Notification;
use super::share::ShareDetails;
use crate::action::Action;

#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationState {
    /// Parameters of the last successful connection
    pub connection: ConnectionParameters,

    /// Connection advertised by the desktop host, if any
    pub desktop_connection: Option<ConnectionParameters>,

    pub connected: bool,

    /// Open dialogs
    pub modals: ModalStack,

    pub welcome_screen_open: bool,

    /// Share link decoded at startup, waiting for confirmation
    pub share_details: Option<ShareDetails>,

    /// Dashboard to load as soon as a connection succeeds
    pub dashboard_to_load_after_connecting: Option<PendingDashboard>,

    /// Dashboard document restored from local storage
    pub old_dashboard: Option<String>,

    pub sso_enabled: bool,
    pub sso_discovery_url: String,

    /// Whether the deployment runs in standalone (single dashboard) mode
    pub standalone: bool,
    pub standalone_settings: StandaloneSettings,

    /// Set before redirecting to the identity provider, cleared on return
    pub wait_for_sso: bool,

    pub notification: Option<Notification>,
}

impl Default for ApplicationState {
    fn default() -> Self {
        Self::new()
    }
}

impl ApplicationState {
    /// Create a fresh, disconnected state
    pub fn new() -> Self {
        Self {
            connection: ConnectionParameters::default(),
            desktop_connection: None,
            connected: false,
            modals: ModalStack::new(),
            welcome_screen_open: true,
            share_details: None,
            dashboard_to_load_after_connecting: None,
            old_dashboard: None,
            sso_enabled: false,
            sso_discovery_url: String::new(),
            standalone: false,
            standalone_settings: StandaloneSettings::default(),
            wait_for_sso: false,
            notification: None,
        }
    }

    pub fn connection_modal_open(&self) -> bool {
        self.modals.is_open(Modal::Connection)
    }

    pub fn about_modal_open(&self) -> bool {
        self.modals.is_open(Modal::About)
    }

    /// Fold one action into the state
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // Connection
            // ─────────────────────────────────────────────────────────────────
            Action::SetConnectionProperties(params) => self.connection = params,
            Action::SetDesktopConnectionProperties(params) => {
                self.desktop_connection = Some(params)
            }
            Action::ClearDesktopConnectionProperties => self.desktop_connection = None,
            Action::SetConnected(connected) => self.connected = connected,

            // ─────────────────────────────────────────────────────────────────
            // Dialogs & Screens
            // ─────────────────────────────────────────────────────────────────
            Action::SetConnectionModalOpen(open) => self.modals.set_open(Modal::Connection, open),
            Action::SetAboutModalOpen(open) => self.modals.set_open(Modal::About, open),
            Action::CloseAllModals => self.modals.clear(),
            Action::SetWelcomeScreenOpen(open) => self.welcome_screen_open = open,

            // ─────────────────────────────────────────────────────────────────
            // Sharing & Dashboards
            // ─────────────────────────────────────────────────────────────────
            Action::SetShareDetails(details) => self.share_details = Some(details),
            Action::ResetShareDetails => self.share_details = None,
            Action::SetDashboardToLoadAfterConnecting(pending) => {
                self.dashboard_to_load_after_connecting = pending
            }
            Action::SetOldDashboard(old) => self.old_dashboard = old,

            // ─────────────────────────────────────────────────────────────────
            // Deployment Modes
            // ─────────────────────────────────────────────────────────────────
            Action::SetSsoEnabled { enabled, discovery_url } => {
                self.sso_enabled = enabled;
                self.sso_discovery_url = discovery_url;
            }
            Action::SetStandaloneEnabled { enabled, settings } => {
                self.standalone = enabled;
                self.standalone_settings = settings;
            }
            Action::SetStandaloneMode(enabled) => self.standalone = enabled,
            Action::SetStandaloneDashboardDatabase(database) => {
                self.standalone_settings.dashboard_database = database
            }
            Action::SetWaitForSso(wait) => self.wait_for_sso = wait,

            // ─────────────────────────────────────────────────────────────────
            // Notifications
            // ─────────────────────────────────────────────────────────────────
            Action::CreateNotification(notification) => self.notification = Some(notification),
            Action::ClearNotification => self.notification = None,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn params() -> ConnectionParameters {
        ConnectionParameters::new("neo4j", "localhost", "7687", "neo4j", "neo4j", "secret")
    }

    #[test]
    fn test_new_state_is_disconnected_on_welcome_screen() {
        let state = ApplicationState::new();
        assert!(!state.connected);
        assert!(state.welcome_screen_open);
        assert!(state.modals.is_empty());
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_reduce_is_idempotent() {
        let actions = vec![
            Action::SetConnectionProperties(params()),
            Action::SetConnectionModalOpen(true),
            Action::SetConnected(true),
            Action::SetDashboardToLoadAfterConnecting(Some(PendingDashboard::by_name("Ops"))),
        ];

        let once = actions
            .iter()
            .cloned()
            .fold(ApplicationState::new(), ApplicationState::reduce);
        let twice = actions
            .iter()
            .cloned()
            .chain(actions.iter().cloned())
            .fold(ApplicationState::new(), ApplicationState::reduce);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_standalone_mode_keeps_settings() {
        let settings = StandaloneSettings {
            host: "graph.internal".to_string(),
            ..StandaloneSettings::default()
        };
        let state = ApplicationState::new()
            .reduce(Action::SetStandaloneEnabled {
                enabled: false,
                settings: settings.clone(),
            })
            .reduce(Action::SetStandaloneMode(true))
            .reduce(Action::SetStandaloneDashboardDatabase("shared".to_string()));

        assert!(state.standalone);
        assert_eq!(state.standalone_settings.host, "graph.internal");
        assert_eq!(state.standalone_settings.dashboard_database, "shared");
    }

    #[test]
    fn test_modal_actions() {
        let state = ApplicationState::new()
            .reduce(Action::SetConnectionModalOpen(true))
            .reduce(Action::SetAboutModalOpen(true));
        assert!(state.connection_modal_open());
        assert!(state.about_modal_open());

        let state = state.reduce(Action::CloseAllModals);
        assert!(!state.connection_modal_open());
        assert!(!state.about_modal_open());
    }

    #[test]
    fn test_notifications_overwrite_and_clear() {
        let state = ApplicationState::new()
            .reduce(Action::CreateNotification(Notification::new("First", "one")))
            .reduce(Action::CreateNotification(Notification::new("Second", "two")));
        assert_eq!(state.notification.as_ref().map(|n| n.title.as_str()), Some("Second"));

        let state = state.reduce(Action::ClearNotification);
        assert!(state.notification.is_none());
    }

    #[test]
    fn test_desktop_connection_is_separate() {
        let state = ApplicationState::new()
            .reduce(Action::SetDesktopConnectionProperties(params()));
        assert_eq!(state.connection, ConnectionParameters::default());
        assert_eq!(state.desktop_connection, Some(params()));

        let state = state.reduce(Action::ClearDesktopConnectionProperties);
        assert!(state.desktop_connection.is_none());
    }
}
