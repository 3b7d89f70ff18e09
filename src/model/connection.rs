//! Connection parameters and the standalone deployment settings

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Everything needed to open a driver against one database
///
/// The port is kept textual: share links and desktop descriptors carry it as
/// free text and it is only interpreted by the driver.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionParameters {
    pub protocol: String,
    pub host: String,
    pub port: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl ConnectionParameters {
    pub fn new(
        protocol: impl Into<String>,
        host: impl Into<String>,
        port: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            protocol: protocol.into(),
            host: host.into(),
            port: port.into(),
            database: database.into(),
            username: username.into(),
            password: password.into(),
        }
    }

    /// `protocol://host:port`, without credentials
    pub fn address(&self) -> String {
        format!("{}://{}:{}", self.protocol, self.host, self.port)
    }
}

// Never print the password.
impl fmt::Debug for ConnectionParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParameters")
            .field("protocol", &self.protocol)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Standalone deployment settings committed from the runtime config
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StandaloneSettings {
    pub protocol: String,
    pub host: String,
    pub port: String,
    pub database: String,
    pub dashboard_name: String,
    pub dashboard_database: String,
}

impl Default for StandaloneSettings {
    fn default() -> Self {
        Self {
            protocol: "neo4j".to_string(),
            host: "localhost".to_string(),
            port: "7687".to_string(),
            database: "neo4j".to_string(),
            dashboard_name: "My Dashboard".to_string(),
            dashboard_database: "dashboards".to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PortValue {
    Text(String),
    Number(u64),
}

impl From<PortValue> for String {
    fn from(value: PortValue) -> Self {
        match value {
            PortValue::Text(text) => text,
            PortValue::Number(number) => number.to_string(),
        }
    }
}

/// Accept a port written either as a JSON string or a JSON number
pub(crate) fn deserialize_port<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    PortValue::deserialize(deserializer).map(String::from)
}

pub(crate) fn deserialize_optional_port<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<PortValue>::deserialize(deserializer)?.map(String::from))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Holder {
        #[serde(deserialize_with = "deserialize_port")]
        port: String,
    }

    #[test]
    fn test_port_accepts_string_and_number() {
        let text: Holder = serde_json::from_str(r#"{"port": "7687"}"#).unwrap();
        let number: Holder = serde_json::from_str(r#"{"port": 7474}"#).unwrap();
        assert_eq!(text.port, "7687");
        assert_eq!(number.port, "7474");
    }

    #[test]
    fn test_debug_redacts_password() {
        let params = ConnectionParameters::new("bolt", "host", "7687", "neo4j", "user", "s3cret");
        let printed = format!("{:?}", params);
        assert!(!printed.contains("s3cret"));
        assert!(printed.contains("<redacted>"));
    }

    #[test]
    fn test_address_omits_credentials() {
        let params = ConnectionParameters::new("neo4j+s", "db.example.com", "7687", "neo4j", "u", "p");
        assert_eq!(params.address(), "neo4j+s://db.example.com:7687");
    }
}
