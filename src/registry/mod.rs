//! Connector registry
//!
//! Process-wide store of configured connectors, addressable by alias, with
//! one optional default. This is the only global state in the crate.

use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};

use crate::config::ApiConfig;
use crate::connector::ModelConnector;
use crate::error::ApiError;

/// Connectors keyed by alias, plus the default one.
#[derive(Debug, Default)]
pub struct ConnectorRegistry {
    default: Option<ModelConnector>,
    by_alias: HashMap<String, ModelConnector>,
}

impl ConnectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the default connector.
    pub fn set_default(&mut self, connector: ModelConnector) {
        self.default = Some(connector);
    }

    /// Register a connector under `alias`, optionally making it the default.
    pub fn insert(
        &mut self,
        alias: impl Into<String>,
        connector: ModelConnector,
        make_default: bool,
    ) {
        if make_default {
            self.default = Some(connector.clone());
        }
        self.by_alias.insert(alias.into(), connector);
    }

    /// Connector for `alias`, or the default when `alias` is `None`.
    pub fn get(&self, alias: Option<&str>) -> Result<ModelConnector, ApiError> {
        match alias {
            Some(alias) => self
                .by_alias
                .get(alias)
                .cloned()
                .ok_or_else(|| ApiError::MissingConfiguration(Some(alias.to_string()))),
            None => self
                .default
                .clone()
                .ok_or(ApiError::MissingConfiguration(None)),
        }
    }

    /// Registered aliases
    pub fn aliases(&self) -> Vec<&str> {
        self.by_alias.keys().map(|s| s.as_str()).collect()
    }
}

static GLOBAL_REGISTRY: OnceLock<Mutex<ConnectorRegistry>> = OnceLock::new();

/// Get the global registry instance
pub fn global_registry() -> &'static Mutex<ConnectorRegistry> {
    GLOBAL_REGISTRY.get_or_init(|| Mutex::new(ConnectorRegistry::new()))
}

fn with_registry<R>(f: impl FnOnce(&mut ConnectorRegistry) -> R) -> Result<R, ApiError> {
    let mut registry = global_registry().lock().map_err(|_| {
        ApiError::ConfigurationError("Failed to lock connector registry".to_string())
    })?;
    Ok(f(&mut registry))
}

/// Build a connector from `config` and make it the global default.
pub fn configure(config: ApiConfig) -> Result<ModelConnector, ApiError> {
    let connector = ModelConnector::from_config(&config)?;
    with_registry(|registry| registry.set_default(connector.clone()))?;
    tracing::debug!("configured default diagnosis API connector");
    Ok(connector)
}

/// Build a connector from `config` and register it under `alias`.
pub fn configure_alias(
    alias: &str,
    config: ApiConfig,
    make_default: bool,
) -> Result<ModelConnector, ApiError> {
    let connector = ModelConnector::from_config(&config)?;
    with_registry(|registry| registry.insert(alias, connector.clone(), make_default))?;
    tracing::debug!(alias, make_default, "configured diagnosis API connector");
    Ok(connector)
}

/// Connector registered under `alias`, or the default one.
///
/// Fails with `MissingConfiguration` when nothing matches.
pub fn get_api(alias: Option<&str>) -> Result<ModelConnector, ApiError> {
    with_registry(|registry| registry.get(alias))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiVersion;

    fn config(version: ApiVersion) -> ApiConfig {
        ApiConfig::new("app", "key").with_api_version(version)
    }

    #[test]
    fn empty_registry_reports_missing_configuration() {
        let registry = ConnectorRegistry::new();
        assert_eq!(
            registry.get(None).unwrap_err(),
            ApiError::MissingConfiguration(None)
        );
        assert_eq!(
            registry.get(Some("eu")).unwrap_err(),
            ApiError::MissingConfiguration(Some("eu".into()))
        );
    }

    #[test]
    fn insert_can_promote_to_default() {
        let mut registry = ConnectorRegistry::new();
        let v3 = ModelConnector::from_config(&config(ApiVersion::V3)).unwrap();
        registry.insert("v3", v3, true);
        assert_eq!(registry.get(None).unwrap().api_version(), ApiVersion::V3);
        assert_eq!(registry.aliases(), vec!["v3"]);
    }

    #[test]
    fn global_aliases_are_independent() {
        configure_alias("registry-test-v2", config(ApiVersion::V2), false).unwrap();
        configure_alias("registry-test-v3", config(ApiVersion::V3), false).unwrap();

        let v2 = get_api(Some("registry-test-v2")).unwrap();
        let v3 = get_api(Some("registry-test-v3")).unwrap();
        assert_eq!(v2.api_version(), ApiVersion::V2);
        assert_eq!(v3.api_version(), ApiVersion::V3);
        assert!(get_api(Some("registry-test-missing")).is_err());
    }

    #[test]
    fn configure_rejects_invalid_config() {
        let err = configure(ApiConfig::new("", "key")).unwrap_err();
        assert!(matches!(err, ApiError::ConfigurationError(_)));
    }
}
