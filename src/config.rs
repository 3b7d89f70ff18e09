use crate::model::connection::{deserialize_port, StandaloneSettings};
use crate::services::ResourceFetcher;
use serde::{Deserialize, Serialize};

/// Runtime configuration file, resolved against the deployment root
pub const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    pub sso_enabled: bool,
    pub sso_discovery_url: String,
    pub standalone: bool,
    pub standalone_protocol: String,
    pub standalone_host: String,
    #[serde(deserialize_with = "deserialize_port")]
    pub standalone_port: String,
    pub standalone_database: String,
    pub standalone_dashboard_name: String,
    pub standalone_dashboard_database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standalone_username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standalone_password: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let standalone = StandaloneSettings::default();
        Self {
            sso_enabled: false,
            sso_discovery_url: "http://example.com".to_string(),
            standalone: false,
            standalone_protocol: standalone.protocol,
            standalone_host: standalone.host,
            standalone_port: standalone.port,
            standalone_database: standalone.database,
            standalone_dashboard_name: standalone.dashboard_name,
            standalone_dashboard_database: standalone.dashboard_database,
            standalone_username: None,
            standalone_password: None,
        }
    }
}

impl AppConfig {
    /// Fetch `config.json`, falling back to safe defaults
    ///
    /// A missing or unreadable file is expected (for example when running
    /// inside the desktop host), so the failure is only logged.
    pub async fn load(fetcher: &dyn ResourceFetcher) -> AppConfig {
        match Self::fetch(fetcher).await {
            Ok(config) => config,
            Err(e) => {
                tracing::info!(error = %e, "No config file detected. Setting to safe defaults.");
                AppConfig::default()
            }
        }
    }

    async fn fetch(fetcher: &dyn ResourceFetcher) -> anyhow::Result<AppConfig> {
        let contents = fetcher.fetch_text(CONFIG_FILE).await?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn standalone_settings(&self) -> StandaloneSettings {
        StandaloneSettings {
            protocol: self.standalone_protocol.clone(),
            host: self.standalone_host.clone(),
            port: self.standalone_port.clone(),
            database: self.standalone_database.clone(),
            dashboard_name: self.standalone_dashboard_name.clone(),
            dashboard_database: self.standalone_dashboard_database.clone(),
        }
    }

    /// Configured username, ignoring empty values
    pub fn username(&self) -> Option<&str> {
        self.standalone_username.as_deref().filter(|u| !u.is_empty())
    }

    /// Configured password, ignoring empty values
    pub fn password(&self) -> Option<&str> {
        self.standalone_password.as_deref().filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FakeFetcher;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn test_missing_config_yields_defaults() {
        let fetcher = FakeFetcher::default();
        let config = AppConfig::load(&fetcher).await;
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.sso_discovery_url, "http://example.com");
        assert_eq!(config.standalone_protocol, "neo4j");
        assert_eq!(config.standalone_host, "localhost");
        assert_eq!(config.standalone_port, "7687");
        assert_eq!(config.standalone_database, "neo4j");
        assert_eq!(config.standalone_dashboard_name, "My Dashboard");
        assert_eq!(config.standalone_dashboard_database, "dashboards");
        assert!(!config.sso_enabled);
        assert!(!config.standalone);
    }

    #[tokio::test]
    async fn test_invalid_json_yields_defaults() {
        let fetcher = FakeFetcher::default().with(CONFIG_FILE, "<html>not found</html>");
        assert_eq!(AppConfig::load(&fetcher).await, AppConfig::default());
    }

    #[tokio::test]
    async fn test_partial_config_fills_defaults() {
        let fetcher = FakeFetcher::default().with(
            CONFIG_FILE,
            r#"{"standalone": true, "standaloneHost": "graph.example.com", "standalonePort": 7688, "standaloneUsername": "reader"}"#,
        );
        let config = AppConfig::load(&fetcher).await;

        assert!(config.standalone);
        assert_eq!(config.standalone_host, "graph.example.com");
        assert_eq!(config.standalone_port, "7688");
        assert_eq!(config.standalone_protocol, "neo4j");
        assert_eq!(config.username(), Some("reader"));
        assert_eq!(config.password(), None);
    }

    #[test]
    fn test_empty_credentials_count_as_absent() {
        let config = AppConfig {
            standalone_username: Some(String::new()),
            standalone_password: Some(String::new()),
            ..AppConfig::default()
        };
        assert_eq!(config.username(), None);
        assert_eq!(config.password(), None);
    }
}
