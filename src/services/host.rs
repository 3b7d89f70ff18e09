//! Host environment the application runs in
//!
//! Covers the current location (where share links arrive) and blocking
//! alerts.

use std::sync::Mutex;
use url::Url;

pub trait Host: Send + Sync {
    /// Raw query string of the current location, without the leading `?`
    fn query_string(&self) -> String;

    /// Rewrite the visible location to the application root, dropping the
    /// query string, without reloading
    fn reset_location_to_root(&self);

    /// Show a blocking message to the user
    fn alert(&self, message: &str);
}

/// Host backed by an in-memory location, alerting on stderr
pub struct ConsoleHost {
    location: Mutex<Url>,
}

impl ConsoleHost {
    pub fn new(location: Url) -> Self {
        Self {
            location: Mutex::new(location),
        }
    }

    pub fn location(&self) -> Option<Url> {
        self.location.lock().ok().map(|url| url.clone())
    }
}

impl Host for ConsoleHost {
    fn query_string(&self) -> String {
        self.location
            .lock()
            .ok()
            .and_then(|url| url.query().map(str::to_string))
            .unwrap_or_default()
    }

    fn reset_location_to_root(&self) {
        if let Ok(mut url) = self.location.lock() {
            url.set_path("/");
            url.set_query(None);
            url.set_fragment(None);
        }
    }

    fn alert(&self, message: &str) {
        tracing::error!(message, "alert");
        eprintln!("{}", message);
    }
}
