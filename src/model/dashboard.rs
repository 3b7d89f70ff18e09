//! Deferred dashboard loads

use std::fmt;

const NAME_PREFIX: &str = "name:";

/// A dashboard to load once a connection has been made
///
/// Parsed from the raw token the rest of the application passes around:
/// anything starting with `http` is fetched as a document, `name:<title>`
/// resolves the latest dashboard with that title, everything else is a
/// dashboard identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingDashboard {
    Url(String),
    Name(String),
    Id(String),
}

impl PendingDashboard {
    pub fn parse(token: &str) -> Self {
        if token.starts_with("http") {
            PendingDashboard::Url(token.to_string())
        } else if let Some(name) = token.strip_prefix(NAME_PREFIX) {
            PendingDashboard::Name(name.to_string())
        } else {
            PendingDashboard::Id(token.to_string())
        }
    }

    pub fn by_name(name: &str) -> Self {
        PendingDashboard::Name(name.to_string())
    }
}

impl fmt::Display for PendingDashboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PendingDashboard::Url(url) => write!(f, "{}", url),
            PendingDashboard::Name(name) => write!(f, "{}{}", NAME_PREFIX, name),
            PendingDashboard::Id(id) => write!(f, "{}", id),
        }
    }
}
