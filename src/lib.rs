//! neodash-bootstrap - startup and connection flow of a graph dashboard
//!
//! Loads the runtime config, decodes share links, picks up desktop and SSO
//! credentials, and connects to the graph database before loading the first
//! dashboard. All state lives in one reducer-driven `ApplicationState`.

pub mod action;
pub mod app;
pub mod config;
pub mod model;
pub mod services;
pub mod store;

#[cfg(test)]
mod test_support;

pub use app::App;
