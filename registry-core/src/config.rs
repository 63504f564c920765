//! Registry Configuration
//!
//! Where the hosted database lives, how screens sync, and the share link
//! parameter. Loaded from JSON or from `GIFT_REGISTRY_*` keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::domain::{DomainError, DomainResult};

pub const ENV_DATABASE_URL: &str = "GIFT_REGISTRY_DATABASE_URL";
pub const ENV_AUTH_TOKEN: &str = "GIFT_REGISTRY_AUTH_TOKEN";
pub const ENV_SYNC: &str = "GIFT_REGISTRY_SYNC";
pub const ENV_DEBUG: &str = "GIFT_REGISTRY_DEBUG";

fn default_share_param() -> String {
    "list".into()
}

/// How a screen keeps its cache in step with the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SyncStrategy {
    /// Replace the cached list with every snapshot the store pushes.
    #[default]
    Subscription,
    /// Patch the cache locally after each successful write.
    Optimistic,
}

impl SyncStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStrategy::Subscription => "subscription",
            SyncStrategy::Optimistic => "optimistic",
        }
    }
}

impl fmt::Display for SyncStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subscription" | "push" => Ok(SyncStrategy::Subscription),
            "optimistic" | "merge" => Ok(SyncStrategy::Optimistic),
            other => Err(DomainError::InvalidInput(format!(
                "unknown sync strategy: {}",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Root of the hosted database, e.g. `https://<project>.firebasedatabase.app`
    pub database_url: String,
    /// Sent as the `auth` query parameter when set
    pub auth_token: Option<String>,
    pub sync_strategy: SyncStrategy,
    /// Query parameter carrying the list ID in share links
    pub share_param: String,
    pub debug_logging: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            auth_token: None,
            sync_strategy: SyncStrategy::default(),
            share_param: default_share_param(),
            debug_logging: false,
        }
    }
}

impl RegistryConfig {
    pub fn from_json(raw: &str) -> DomainResult<Self> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|e| DomainError::InvalidInput(format!("bad config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Build from `GIFT_REGISTRY_*` keys. Unset keys keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            config.database_url = url.trim().to_string();
        }
        config.auth_token = lookup(ENV_AUTH_TOKEN)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        if let Some(strategy) = lookup(ENV_SYNC) {
            config.sync_strategy = strategy.parse()?;
        }
        if let Some(debug) = lookup(ENV_DEBUG) {
            config.debug_logging = matches!(debug.trim(), "1" | "true" | "yes" | "on");
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DomainResult<()> {
        self.database_url()?;
        if self.share_param.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "share parameter must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn database_url(&self) -> DomainResult<Url> {
        if self.database_url.trim().is_empty() {
            return Err(DomainError::InvalidInput(
                "database url is not configured".to_string(),
            ));
        }
        let url = Url::parse(self.database_url.trim())
            .map_err(|e| DomainError::InvalidInput(format!("database url: {}", e)))?;
        if url.cannot_be_a_base() {
            return Err(DomainError::InvalidInput(format!(
                "database url cannot hold paths: {}",
                url
            )));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    #[test]
    fn test_json_defaults() {
        let config = RegistryConfig::from_json(r#"{ "database_url": "https://db.example" }"#).unwrap();
        assert_eq!(config.share_param, "list");
        assert_eq!(config.sync_strategy, SyncStrategy::Subscription);
        assert!(config.auth_token.is_none());
    }

    #[test]
    fn test_json_strategy() {
        let config = RegistryConfig::from_json(
            r#"{ "database_url": "https://db.example", "sync_strategy": "optimistic" }"#,
        )
        .unwrap();
        assert_eq!(config.sync_strategy, SyncStrategy::Optimistic);
    }

    #[test]
    fn test_missing_url_rejected() {
        assert!(matches!(
            RegistryConfig::from_json("{}"),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_DATABASE_URL, " https://db.example/ "),
            (ENV_AUTH_TOKEN, ""),
            (ENV_SYNC, "Optimistic"),
            (ENV_DEBUG, "true"),
        ]
        .into_iter()
        .collect();
        let config = RegistryConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.database_url, "https://db.example/");
        assert!(config.auth_token.is_none());
        assert_eq!(config.sync_strategy, SyncStrategy::Optimistic);
        assert!(config.debug_logging);
    }

    #[rstest]
    #[case("subscription", Some(SyncStrategy::Subscription))]
    #[case(" PUSH ", Some(SyncStrategy::Subscription))]
    #[case("optimistic", Some(SyncStrategy::Optimistic))]
    #[case("merge", Some(SyncStrategy::Optimistic))]
    #[case("polling", None)]
    fn test_parse_strategy(#[case] raw: &str, #[case] expected: Option<SyncStrategy>) {
        assert_eq!(raw.parse::<SyncStrategy>().ok(), expected);
    }

    #[rstest]
    #[case("https://db.example", true)]
    #[case("http://localhost:9000/ns", true)]
    #[case("not a url", false)]
    #[case("mailto:someone@example.com", false)]
    fn test_database_url(#[case] raw: &str, #[case] expected_valid: bool) {
        let config = RegistryConfig {
            database_url: raw.into(),
            ..Default::default()
        };
        assert_eq!(config.validate().is_ok(), expected_valid, "url: {}", raw);
    }
}
