//! Environment variable names used throughout headwise configuration

/// Proxy trust configuration
pub const CHECK_PROXY_HEADERS: &str = "CHECK_PROXY_HEADERS";
pub const TRUSTED_PROXY_IPS: &str = "TRUSTED_PROXY_IPS";
pub const TRUSTED_PROXY_IPS_VAR: &str = "TRUSTED_PROXY_IPS_VAR";
pub const PROXY_HEADERS: &str = "PROXY_HEADERS";
pub const FORWARDED_CHAIN_SELECTION: &str = "FORWARDED_CHAIN_SELECTION";

/// Request attribute configuration
pub const CLIENT_IP_ATTRIBUTE: &str = "CLIENT_IP_ATTRIBUTE";

/// Content negotiation configuration
pub const AVAILABLE_CONTENT_TYPES: &str = "AVAILABLE_CONTENT_TYPES";
pub const AVAILABLE_LANGUAGES: &str = "AVAILABLE_LANGUAGES";

/// Get all environment variable names for documentation/validation
pub fn all_env_vars() -> &'static [&'static str] {
    &[
        CHECK_PROXY_HEADERS,
        TRUSTED_PROXY_IPS,
        TRUSTED_PROXY_IPS_VAR,
        PROXY_HEADERS,
        FORWARDED_CHAIN_SELECTION,
        CLIENT_IP_ATTRIBUTE,
        AVAILABLE_CONTENT_TYPES,
        AVAILABLE_LANGUAGES,
    ]
}
