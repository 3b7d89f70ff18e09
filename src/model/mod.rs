//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `ApplicationState` - Connection, sharing and deployment-mode state
//! - `ModalStack` - Open dialogs
//! - Value types shared with the services layer

pub mod application;
pub mod connection;
pub mod dashboard;
pub mod modal;
pub mod notification;
pub mod share;

// Re-export commonly used types
pub use application::ApplicationState;
pub use connection::{ConnectionParameters, StandaloneSettings};
pub use dashboard::PendingDashboard;
pub use modal::{Modal, ModalStack};
pub use notification::Notification;
pub use share::ShareDetails;
