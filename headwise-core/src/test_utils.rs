//! Test utilities for headwise.
//!
//! This module provides shared test configuration types used across unit tests.
//! It is only compiled when running tests (`#[cfg(test)]`).

use crate::defaults;
use crate::types::{ChainSelection, ClientIpConfig, NegotiationProvider, ProxyTrustProvider};

/// Shared test configuration for unit tests.
///
/// This struct implements all configuration traits with sensible defaults
/// and builder methods for customization.
#[derive(Debug, Clone)]
pub struct TestConfig {
    pub client_ip: ClientIpConfig,
    pub content_types: Vec<String>,
    pub languages: Vec<String>,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            client_ip: ClientIpConfig::default(),
            content_types: defaults::CONTENT_TYPES.iter().map(|s| s.to_string()).collect(),
            languages: defaults::LANGUAGES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TestConfig {
    /// Create a new test configuration with defaults (proxy headers ignored).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration that trusts forwarding headers from the given peers.
    pub fn trusting(proxies: Vec<&str>) -> Self {
        Self {
            client_ip: ClientIpConfig::default()
                .with_proxy_headers(true)
                .with_trusted_proxies(proxies),
            ..Self::default()
        }
    }

    /// Configure the inspected forwarding headers.
    pub fn with_headers_to_inspect(mut self, headers: Vec<&str>) -> Self {
        self.client_ip = self.client_ip.with_headers_to_inspect(headers);
        self
    }

    /// Configure the chain selection policy.
    pub fn with_chain_selection(mut self, selection: ChainSelection) -> Self {
        self.client_ip = self.client_ip.with_chain_selection(selection);
        self
    }

    /// Configure the client IP attribute name.
    pub fn with_attribute_name(mut self, name: &str) -> Self {
        self.client_ip = self.client_ip.with_attribute_name(name);
        self
    }

    /// Configure offered content types.
    pub fn with_content_types(mut self, types: Vec<&str>) -> Self {
        self.content_types = types.into_iter().map(String::from).collect();
        self
    }

    /// Configure offered languages.
    pub fn with_languages(mut self, languages: Vec<&str>) -> Self {
        self.languages = languages.into_iter().map(String::from).collect();
        self
    }
}

impl ProxyTrustProvider for TestConfig {
    fn check_proxy_headers(&self) -> bool {
        self.client_ip.check_proxy_headers
    }

    fn trusted_proxies(&self) -> &[String] {
        &self.client_ip.trusted_proxies
    }

    fn headers_to_inspect(&self) -> &[String] {
        &self.client_ip.headers_to_inspect
    }

    fn chain_selection(&self) -> ChainSelection {
        self.client_ip.chain_selection
    }

    fn attribute_name(&self) -> &str {
        &self.client_ip.attribute_name
    }
}

impl NegotiationProvider for TestConfig {
    fn available_content_types(&self) -> &[String] {
        &self.content_types
    }

    fn available_languages(&self) -> &[String] {
        &self.languages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TestConfig::new();
        assert!(!config.check_proxy_headers());
        assert!(config.trusted_proxies().is_empty());
        assert_eq!(config.available_content_types(), ["text/plain", "text/html"]);
        assert_eq!(config.available_languages(), ["en"]);
    }

    #[test]
    fn test_trusting_config() {
        let config = TestConfig::trusting(vec!["192.168.1.1", "10.0.0.1"]);
        assert!(config.check_proxy_headers());
        assert_eq!(config.trusted_proxies().len(), 2);
        assert!(config.is_trusted_proxy("10.0.0.1"));
    }

    #[test]
    fn test_builder_methods() {
        let config = TestConfig::new()
            .with_headers_to_inspect(vec!["X-Real-Ip"])
            .with_attribute_name("client")
            .with_content_types(vec!["application/json"])
            .with_languages(vec!["fr", "en"]);

        assert_eq!(config.headers_to_inspect(), ["X-Real-Ip"]);
        assert_eq!(config.attribute_name(), "client");
        assert_eq!(config.content_types, vec!["application/json"]);
        assert_eq!(config.languages, vec!["fr", "en"]);
    }
}
