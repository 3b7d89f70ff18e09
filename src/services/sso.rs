//! Single sign-on seam
//!
//! The identity handshake happens elsewhere. After the redirect back to the
//! application, one awaited call yields the resolved credentials or fails.

use anyhow::Result;
use async_trait::async_trait;
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[async_trait]
pub trait SsoProvider: Send + Sync {
    /// Complete the handshake against the provider at `discovery_url`
    async fn initialize(&self, discovery_url: &str) -> Result<Credentials>;
}
