//! Action enum - All possible application state transitions
//!
//! Actions are the only way application state changes. Bootstrap and
//! connection operations dispatch them to the store, which folds each one
//! into a new state through `ApplicationState::reduce`.

use crate::model::{ConnectionParameters, Notification, PendingDashboard, ShareDetails, StandaloneSettings};
use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // Connection
    // ─────────────────────────────────────────────────────────────────────────
    /// Commit the parameters of the active connection
    SetConnectionProperties(ConnectionParameters),
    /// Remember the connection advertised by the desktop host
    SetDesktopConnectionProperties(ConnectionParameters),
    /// Forget the desktop-sourced connection
    ClearDesktopConnectionProperties,
    /// Mark the application as connected or disconnected
    SetConnected(bool),

    // ─────────────────────────────────────────────────────────────────────────
    // Dialogs & Screens
    // ─────────────────────────────────────────────────────────────────────────
    SetConnectionModalOpen(bool),
    SetAboutModalOpen(bool),
    /// Close every open modal
    CloseAllModals,
    SetWelcomeScreenOpen(bool),

    // ─────────────────────────────────────────────────────────────────────────
    // Sharing & Dashboards
    // ─────────────────────────────────────────────────────────────────────────
    /// Store the share link decoded from the location
    SetShareDetails(ShareDetails),
    /// Discard the decoded share link
    ResetShareDetails,
    /// Queue (or clear) a dashboard to load once connected
    SetDashboardToLoadAfterConnecting(Option<PendingDashboard>),
    /// Dashboard document restored from local storage
    SetOldDashboard(Option<String>),

    // ─────────────────────────────────────────────────────────────────────────
    // Deployment Modes
    // ─────────────────────────────────────────────────────────────────────────
    SetSsoEnabled { enabled: bool, discovery_url: String },
    SetStandaloneEnabled { enabled: bool, settings: StandaloneSettings },
    /// Switch standalone mode on or off without touching its settings
    SetStandaloneMode(bool),
    SetStandaloneDashboardDatabase(String),
    /// Set while an SSO redirect round-trip is in flight
    SetWaitForSso(bool),

    // ─────────────────────────────────────────────────────────────────────────
    // Notifications
    // ─────────────────────────────────────────────────────────────────────────
    CreateNotification(Notification),
    ClearNotification,
}

// Credentials and dashboard documents stay out of the log line.
impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::SetConnectionProperties(p) => {
                write!(f, "SetConnectionProperties({}, db={})", p.address(), p.database)
            }
            Action::SetDesktopConnectionProperties(p) => {
                write!(f, "SetDesktopConnectionProperties({})", p.address())
            }
            Action::ClearDesktopConnectionProperties => write!(f, "ClearDesktopConnectionProperties"),
            Action::SetConnected(v) => write!(f, "SetConnected({})", v),
            Action::SetConnectionModalOpen(v) => write!(f, "SetConnectionModalOpen({})", v),
            Action::SetAboutModalOpen(v) => write!(f, "SetAboutModalOpen({})", v),
            Action::CloseAllModals => write!(f, "CloseAllModals"),
            Action::SetWelcomeScreenOpen(v) => write!(f, "SetWelcomeScreenOpen({})", v),
            Action::SetShareDetails(s) => write!(f, "SetShareDetails({}, {})", s.kind, s.id),
            Action::ResetShareDetails => write!(f, "ResetShareDetails"),
            Action::SetDashboardToLoadAfterConnecting(Some(d)) => {
                write!(f, "SetDashboardToLoadAfterConnecting({})", d)
            }
            Action::SetDashboardToLoadAfterConnecting(None) => {
                write!(f, "SetDashboardToLoadAfterConnecting(None)")
            }
            Action::SetOldDashboard(old) => write!(f, "SetOldDashboard(present={})", old.is_some()),
            Action::SetSsoEnabled { enabled, discovery_url } => {
                write!(f, "SetSsoEnabled({}, {})", enabled, discovery_url)
            }
            Action::SetStandaloneEnabled { enabled, settings } => write!(
                f,
                "SetStandaloneEnabled({}, {}://{}:{})",
                enabled, settings.protocol, settings.host, settings.port
            ),
            Action::SetStandaloneMode(v) => write!(f, "SetStandaloneMode({})", v),
            Action::SetStandaloneDashboardDatabase(db) => {
                write!(f, "SetStandaloneDashboardDatabase({})", db)
            }
            Action::SetWaitForSso(v) => write!(f, "SetWaitForSso({})", v),
            Action::CreateNotification(n) => write!(f, "CreateNotification({})", n.title),
            Action::ClearNotification => write!(f, "ClearNotification"),
        }
    }
}
