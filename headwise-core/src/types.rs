//! Type definitions for headwise configuration.
//!
//! Configuration is injected through small composable traits so the resolver and
//! the negotiation endpoint can be driven from environment variables, files, or
//! plain structs in tests.

use std::fmt;
use std::str::FromStr;

use crate::defaults;
use crate::error::HeadwiseError;

// ============================================================================
// Composable Configuration Traits
// ============================================================================

/// Trust policy for forwarding headers.
///
/// Implement this trait to decide when a request's forwarding headers may
/// override its transport peer address.
pub trait ProxyTrustProvider: Send + Sync {
    /// Whether forwarding headers are consulted at all.
    fn check_proxy_headers(&self) -> bool;

    /// Peer addresses allowed to assert a different client address.
    fn trusted_proxies(&self) -> &[String];

    /// Forwarding headers to inspect, highest priority first.
    fn headers_to_inspect(&self) -> &[String];

    /// Which entry of a multi-hop forwarding chain names the client.
    fn chain_selection(&self) -> ChainSelection {
        ChainSelection::Leftmost
    }

    /// Request attribute key under which callers store the resolved address.
    fn attribute_name(&self) -> &str {
        defaults::ATTRIBUTE_NAME
    }

    /// Returns true if `address` is one of the trusted proxies.
    fn is_trusted_proxy(&self, address: &str) -> bool {
        self.trusted_proxies().iter().any(|proxy| proxy == address)
    }
}

/// Representations offered during content negotiation.
pub trait NegotiationProvider: Send + Sync {
    /// Media types the server can produce, in server preference order.
    fn available_content_types(&self) -> &[String];

    /// Languages the server can produce, in server preference order.
    fn available_languages(&self) -> &[String];
}

// ============================================================================
// ConfigProvider - Aggregated trait for full configuration
// ============================================================================

/// Trait for complete configuration injection.
///
/// This trait combines the specialized configuration traits into one. For more
/// granular control, implement the individual traits:
/// - [`ProxyTrustProvider`] for client address resolution
/// - [`NegotiationProvider`] for content negotiation
///
/// # Example
///
/// ```
/// use headwise_core::{ConfigProvider, NegotiationProvider, ProxyTrustProvider};
///
/// struct MyConfig {
///     trusted: Vec<String>,
///     headers: Vec<String>,
///     types: Vec<String>,
///     languages: Vec<String>,
/// }
///
/// impl ProxyTrustProvider for MyConfig {
///     fn check_proxy_headers(&self) -> bool { true }
///     fn trusted_proxies(&self) -> &[String] { &self.trusted }
///     fn headers_to_inspect(&self) -> &[String] { &self.headers }
/// }
///
/// impl NegotiationProvider for MyConfig {
///     fn available_content_types(&self) -> &[String] { &self.types }
///     fn available_languages(&self) -> &[String] { &self.languages }
/// }
///
/// fn assert_config<C: ConfigProvider>(_: &C) {}
///
/// let config = MyConfig {
///     trusted: vec!["10.0.0.1".into()],
///     headers: vec!["X-Forwarded-For".into()],
///     types: vec!["text/plain".into()],
///     languages: vec!["en".into()],
/// };
/// assert_config(&config);
/// assert!(config.is_trusted_proxy("10.0.0.1"));
/// ```
pub trait ConfigProvider: ProxyTrustProvider + NegotiationProvider {}

// Blanket implementation: any type implementing all sub-traits is a ConfigProvider
impl<T> ConfigProvider for T where T: ProxyTrustProvider + NegotiationProvider {}

// Lets a resolver borrow shared configuration instead of owning a copy
impl<T: ProxyTrustProvider + ?Sized> ProxyTrustProvider for &T {
    fn check_proxy_headers(&self) -> bool {
        (**self).check_proxy_headers()
    }

    fn trusted_proxies(&self) -> &[String] {
        (**self).trusted_proxies()
    }

    fn headers_to_inspect(&self) -> &[String] {
        (**self).headers_to_inspect()
    }

    fn chain_selection(&self) -> ChainSelection {
        (**self).chain_selection()
    }

    fn attribute_name(&self) -> &str {
        (**self).attribute_name()
    }

    fn is_trusted_proxy(&self, address: &str) -> bool {
        (**self).is_trusted_proxy(address)
    }
}

// ============================================================================
// Chain selection policy
// ============================================================================

/// Selection policy for comma-separated forwarding chains such as
/// `X-Forwarded-For: client, proxy1, proxy2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChainSelection {
    /// The left-most entry. Correct when the trusted proxy in front of us
    /// overwrites the header, or when every hop is trusted.
    #[default]
    Leftmost,
    /// Walking from the right, the first entry that is not a trusted proxy.
    /// Correct behind proxies and CDNs that append to an existing header.
    RightmostUntrusted,
}

impl FromStr for ChainSelection {
    type Err = HeadwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leftmost" | "left" => Ok(Self::Leftmost),
            "rightmost-untrusted" | "rightmost_untrusted" | "right" => {
                Ok(Self::RightmostUntrusted)
            }
            other => Err(HeadwiseError::ConfigError(format!(
                "unknown chain selection policy: {other}"
            ))),
        }
    }
}

impl fmt::Display for ChainSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leftmost => f.write_str("leftmost"),
            Self::RightmostUntrusted => f.write_str("rightmost-untrusted"),
        }
    }
}

// ============================================================================
// ClientIpConfig - plain struct configuration
// ============================================================================

/// Plain configuration for [`crate::client_ip::ClientIpResolver`].
///
/// # Example
///
/// ```
/// use headwise_core::ClientIpConfig;
///
/// let config = ClientIpConfig::default()
///     .with_proxy_headers(true)
///     .with_trusted_proxies(["10.0.0.1"]);
///
/// assert!(config.check_proxy_headers);
/// assert_eq!(config.attribute_name, "ip_address");
/// assert_eq!(config.headers_to_inspect[0], "forwarded");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIpConfig {
    pub check_proxy_headers: bool,
    pub trusted_proxies: Vec<String>,
    pub headers_to_inspect: Vec<String>,
    pub attribute_name: String,
    pub chain_selection: ChainSelection,
}

impl Default for ClientIpConfig {
    fn default() -> Self {
        Self {
            check_proxy_headers: defaults::CHECK_PROXY_HEADERS,
            trusted_proxies: Vec::new(),
            headers_to_inspect: defaults::DEFAULT_HEADERS_TO_INSPECT
                .iter()
                .map(|header| header.to_string())
                .collect(),
            attribute_name: defaults::ATTRIBUTE_NAME.to_string(),
            chain_selection: ChainSelection::default(),
        }
    }
}

impl ClientIpConfig {
    pub fn with_proxy_headers(mut self, enabled: bool) -> Self {
        self.check_proxy_headers = enabled;
        self
    }

    pub fn with_trusted_proxies<I, S>(mut self, proxies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.trusted_proxies = proxies.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the inspected headers. An empty list keeps the defaults.
    pub fn with_headers_to_inspect<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let headers: Vec<String> = headers.into_iter().map(Into::into).collect();
        if !headers.is_empty() {
            self.headers_to_inspect = headers;
        }
        self
    }

    /// Sets the attribute name. An empty name keeps the default.
    pub fn with_attribute_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !name.is_empty() {
            self.attribute_name = name;
        }
        self
    }

    pub fn with_chain_selection(mut self, selection: ChainSelection) -> Self {
        self.chain_selection = selection;
        self
    }
}

impl ProxyTrustProvider for ClientIpConfig {
    fn check_proxy_headers(&self) -> bool {
        self.check_proxy_headers
    }

    fn trusted_proxies(&self) -> &[String] {
        &self.trusted_proxies
    }

    fn headers_to_inspect(&self) -> &[String] {
        &self.headers_to_inspect
    }

    fn chain_selection(&self) -> ChainSelection {
        self.chain_selection
    }

    fn attribute_name(&self) -> &str {
        &self.attribute_name
    }
}
