//! HTTP settings for the default reqwest transport.

use std::collections::HashMap;
use std::time::Duration;

/// Default request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Default connection timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP configuration
///
/// `None` timeouts disable the corresponding limit on the client.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpConfig {
    pub timeout: Option<Duration>,
    pub connect_timeout: Option<Duration>,
    /// Headers sent with every request, overriding the computed defaults
    pub headers: HashMap<String, String>,
    pub proxy: Option<String>,
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_REQUEST_TIMEOUT),
            connect_timeout: Some(DEFAULT_CONNECT_TIMEOUT),
            headers: HashMap::new(),
            proxy: None,
            user_agent: None,
        }
    }
}

impl HttpConfig {
    /// Returns a builder starting from the default settings
    pub fn builder() -> HttpConfigBuilder {
        HttpConfigBuilder::new()
    }
}

/// Builder for `HttpConfig`
#[derive(Debug, Clone, Default)]
pub struct HttpConfigBuilder {
    config: HttpConfig,
}

impl HttpConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: Option<Duration>) -> Self {
        self.config.connect_timeout = connect_timeout;
        self
    }

    pub fn user_agent<S: Into<String>>(mut self, user_agent: Option<S>) -> Self {
        self.config.user_agent = user_agent.map(Into::into);
        self
    }

    pub fn proxy<S: Into<String>>(mut self, proxy: Option<S>) -> Self {
        self.config.proxy = proxy.map(Into::into);
        self
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.config.headers.insert(key.into(), value.into());
        self
    }

    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.config.headers.extend(headers);
        self
    }

    pub fn build(self) -> HttpConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_bounds_both_timeouts() {
        let cfg = HttpConfig::default();
        assert_eq!(cfg.timeout, Some(DEFAULT_REQUEST_TIMEOUT));
        assert_eq!(cfg.connect_timeout, Some(DEFAULT_CONNECT_TIMEOUT));
        assert_eq!(HttpConfig::builder().build(), cfg);
    }

    #[test]
    fn builder_overrides_defaults() {
        let cfg = HttpConfig::builder()
            .timeout(Some(Duration::from_secs(30)))
            .connect_timeout(None)
            .header("X-Trace", "1")
            .user_agent(Some("custom-agent"))
            .build();

        assert_eq!(cfg.timeout, Some(Duration::from_secs(30)));
        assert_eq!(cfg.connect_timeout, None);
        assert_eq!(cfg.headers.get("X-Trace").map(String::as_str), Some("1"));
        assert_eq!(cfg.user_agent.as_deref(), Some("custom-agent"));
    }
}
