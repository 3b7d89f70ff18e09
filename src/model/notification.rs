//! User-facing notifications

use chrono::{DateTime, Local};

/// A dismissible title + message pair shown to the user
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Local>,
}

impl Notification {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            created_at: Local::now(),
        }
    }

    pub fn formatted_time(&self) -> String {
        self.created_at.format("%H:%M:%S").to_string()
    }
}
