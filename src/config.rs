//! Configuration management for headwise.
//!
//! This module handles loading and caching configuration from environment variables.
//! All configurations are computed once at first access and cached for the lifetime
//! of the application using `once_cell::sync::Lazy`.
//!
//! # Caching
//!
//! Configuration values are read from environment variables only once, at startup.
//! This provides:
//! - Consistent configuration throughout the application lifetime
//! - No runtime overhead from repeated environment lookups
//! - Thread-safe access without locking
//!
//! # Example
//!
//! ```
//! use headwise::config;
//!
//! let client_ip = config::get_client_ip_config();
//! println!("Trusted proxies: {}", client_ip.trusted_proxies.len());
//!
//! let types = config::get_available_content_types();
//! println!("Offering: {}", types.join(", "));
//! ```

use std::env::{self, VarError};
use std::str::FromStr;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::env_vars;
use headwise_core::client_ip::parse_ip;
use headwise_core::{ChainSelection, ClientIpConfig, NegotiationProvider, ProxyTrustProvider, defaults};

// ============================================================================
// Cached Configuration (computed once at first access)
// ============================================================================

static CLIENT_IP_CONFIG: Lazy<ClientIpConfig> =
    Lazy::new(|| compute_client_ip_config_internal(|key| env::var(key)));
static CONTENT_TYPES: Lazy<Vec<String>> = Lazy::new(|| {
    compute_list_internal(
        |key| env::var(key),
        env_vars::AVAILABLE_CONTENT_TYPES,
        defaults::CONTENT_TYPES,
    )
});
static LANGUAGES: Lazy<Vec<String>> = Lazy::new(|| {
    compute_list_internal(
        |key| env::var(key),
        env_vars::AVAILABLE_LANGUAGES,
        defaults::LANGUAGES,
    )
});

/// Whitelisted environment variable names for trusted proxy IPs.
///
/// This prevents arbitrary environment variable disclosure via `TRUSTED_PROXY_IPS_VAR`.
const ALLOWED_PROXY_VAR_NAMES: &[&str] = &[
    "REVERSE_PROXY_IPS",
    "CC_REVERSE_PROXY_IPS",
    "PROXY_ALLOWLIST",
    "ALLOWED_PROXY_IPS",
    "PROXY_IPS",
];

// ============================================================================
// Internal Helpers
// ============================================================================

/// Parses an environment variable with fallback to a default value.
///
/// Logs a warning if the value exists but cannot be parsed.
fn parse_env_var_or_default<T, F>(env_var: &F, var_name: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Result<String, VarError>,
{
    match env_var(var_name) {
        Ok(value) if value.trim().is_empty() => default,
        Ok(value) => match value.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = var_name, value = %value, "Invalid env var value, using default");
                default
            }
        },
        Err(_) => default,
    }
}

/// Parses a comma-separated string into a Vec of trimmed strings.
///
/// Filters out empty entries after trimming.
fn parse_comma_separated(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Keeps the entries that are IP literals, in canonical form. Others are
/// logged and dropped.
fn parse_proxy_list(input: &str) -> Vec<String> {
    parse_comma_separated(input)
        .into_iter()
        .filter_map(|entry| match parse_ip(&entry) {
            Ok(ip) => Some(ip.to_canonical().to_string()),
            Err(err) => {
                warn!(error = %err, "Ignoring trusted proxy entry");
                None
            }
        })
        .collect()
}

// ============================================================================
// Public Configuration Getters
// ============================================================================

/// Returns the cached client IP resolution configuration.
///
/// Configuration is read from environment variables on first access:
/// - `CHECK_PROXY_HEADERS`: `true` to consult forwarding headers (default: false)
/// - `TRUSTED_PROXY_IPS`: Comma-separated trusted proxy addresses
/// - `TRUSTED_PROXY_IPS_VAR`: Alternative variable name (must be whitelisted)
/// - `PROXY_HEADERS`: Comma-separated headers to inspect, highest priority first
/// - `FORWARDED_CHAIN_SELECTION`: `leftmost` (default) or `rightmost-untrusted`
/// - `CLIENT_IP_ATTRIBUTE`: Request attribute name (default: `ip_address`)
///
/// # Example
///
/// ```
/// use headwise::config::get_client_ip_config;
///
/// let config = get_client_ip_config();
/// if config.check_proxy_headers {
///     println!("Inspecting {} headers", config.headers_to_inspect.len());
/// }
/// ```
pub fn get_client_ip_config() -> &'static ClientIpConfig {
    &CLIENT_IP_CONFIG
}

/// Computes client IP configuration from environment variables.
/// Invalid values fall back to defaults and log warnings.
fn compute_client_ip_config_internal<F>(env_var: F) -> ClientIpConfig
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let check_proxy_headers = parse_env_var_or_default(
        &env_var,
        env_vars::CHECK_PROXY_HEADERS,
        defaults::CHECK_PROXY_HEADERS,
    );

    let chain_selection = parse_env_var_or_default(
        &env_var,
        env_vars::FORWARDED_CHAIN_SELECTION,
        ChainSelection::default(),
    );

    let trusted_proxies = compute_trusted_proxy_ips_internal(&env_var);

    let headers_to_inspect = env_var(env_vars::PROXY_HEADERS)
        .map(|s| parse_comma_separated(&s))
        .unwrap_or_default();

    let attribute_name = env_var(env_vars::CLIENT_IP_ATTRIBUTE)
        .map(|s| s.trim().to_string())
        .unwrap_or_default();

    if check_proxy_headers && trusted_proxies.is_empty() {
        warn!(
            "{} is enabled but no trusted proxies are configured, forwarding headers will be ignored",
            env_vars::CHECK_PROXY_HEADERS
        );
    }

    ClientIpConfig::default()
        .with_proxy_headers(check_proxy_headers)
        .with_trusted_proxies(trusted_proxies)
        .with_headers_to_inspect(headers_to_inspect)
        .with_attribute_name(attribute_name)
        .with_chain_selection(chain_selection)
}

/// Computes trusted proxy IPs from environment variables.
fn compute_trusted_proxy_ips_internal<F>(env_var: &F) -> Vec<String>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    // Try primary variable first
    if let Ok(ips) = env_var(env_vars::TRUSTED_PROXY_IPS)
        && !ips.trim().is_empty()
    {
        return parse_proxy_list(&ips);
    }

    // Try user-defined alternative variable if set (only from whitelist)
    if let Ok(alt_var_name) = env_var(env_vars::TRUSTED_PROXY_IPS_VAR) {
        if !ALLOWED_PROXY_VAR_NAMES.contains(&alt_var_name.as_str()) {
            warn!(
                var = %alt_var_name,
                allowed = ?ALLOWED_PROXY_VAR_NAMES,
                "Invalid TRUSTED_PROXY_IPS_VAR value"
            );
        } else if let Ok(ips) = env_var(&alt_var_name)
            && !ips.trim().is_empty()
        {
            return parse_proxy_list(&ips);
        }
    }

    Vec::new()
}

/// Returns the cached list of content types offered by the negotiation endpoint.
///
/// Read from `AVAILABLE_CONTENT_TYPES` (default: `text/plain,text/html`).
pub fn get_available_content_types() -> &'static [String] {
    &CONTENT_TYPES
}

/// Returns the cached list of languages offered by the negotiation endpoint.
///
/// Read from `AVAILABLE_LANGUAGES` (default: `en`).
pub fn get_available_languages() -> &'static [String] {
    &LANGUAGES
}

/// Computes a comma-separated list from an environment variable, falling back
/// to `default` when unset or empty.
fn compute_list_internal<F>(env_var: F, var_name: &str, default: &[&str]) -> Vec<String>
where
    F: Fn(&str) -> Result<String, VarError>,
{
    let values = env_var(var_name)
        .map(|s| parse_comma_separated(&s))
        .unwrap_or_default();

    if values.is_empty() {
        default.iter().map(|s| s.to_string()).collect()
    } else {
        values
    }
}

// ============================================================================
// EnvVarConfig - ConfigProvider implementation using environment variables
// ============================================================================

/// Configuration provider that reads from environment variables.
///
/// This is the default configuration provider for the headwise CLI.
/// All values are cached at creation time using the global lazy statics.
///
/// # Example
///
/// ```
/// use headwise::config::EnvVarConfig;
/// use headwise::types::{NegotiationProvider, ProxyTrustProvider};
///
/// let config = EnvVarConfig::new();
/// println!("Attribute: {}", config.attribute_name());
/// println!("Languages: {:?}", config.available_languages());
/// ```
#[derive(Clone, Debug)]
pub struct EnvVarConfig {
    // We use references to the global lazy statics for zero-copy access
    _private: (),
}

impl EnvVarConfig {
    /// Creates a new configuration provider from environment variables.
    ///
    /// This triggers lazy initialization of all configuration values
    /// if they haven't been accessed yet.
    pub fn new() -> Self {
        Lazy::force(&CLIENT_IP_CONFIG);
        Lazy::force(&CONTENT_TYPES);
        Lazy::force(&LANGUAGES);
        Self { _private: () }
    }
}

impl Default for EnvVarConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ProxyTrustProvider for EnvVarConfig {
    fn check_proxy_headers(&self) -> bool {
        get_client_ip_config().check_proxy_headers()
    }

    fn trusted_proxies(&self) -> &[String] {
        get_client_ip_config().trusted_proxies()
    }

    fn headers_to_inspect(&self) -> &[String] {
        get_client_ip_config().headers_to_inspect()
    }

    fn chain_selection(&self) -> ChainSelection {
        get_client_ip_config().chain_selection()
    }

    fn attribute_name(&self) -> &str {
        get_client_ip_config().attribute_name()
    }
}

impl NegotiationProvider for EnvVarConfig {
    fn available_content_types(&self) -> &[String] {
        get_available_content_types()
    }

    fn available_languages(&self) -> &[String] {
        get_available_languages()
    }
}
