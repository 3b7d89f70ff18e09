//! Share-link intent decoded at startup

use super::connection::ConnectionParameters;

/// A dashboard shared through a link, waiting for the user to confirm
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareDetails {
    /// Resource kind from the `type` parameter
    pub kind: String,
    /// Dashboard identifier, a `name:` token or a URL
    pub id: String,
    pub standalone: bool,
    /// Present only when the link embedded credentials
    pub connection: Option<ConnectionParameters>,
    /// Database holding the dashboard nodes, if different from the default
    pub dashboard_database: Option<String>,
}
