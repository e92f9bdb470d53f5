//! Default configuration values for headwise.
//!
//! This module centralizes all default values used throughout headwise,
//! ensuring consistency between production code and tests.

pub use crate::headers::DEFAULT_HEADERS_TO_INSPECT;

/// Quality of an Accept-family item that carries no `q` parameter.
pub const QUALITY: f64 = 1.0;

/// Whether forwarding headers are consulted at all.
///
/// Off by default: only the transport peer address is trustworthy.
pub const CHECK_PROXY_HEADERS: bool = false;

/// Request attribute key for the resolved client address.
pub const ATTRIBUTE_NAME: &str = "ip_address";

/// Representations offered by the negotiation endpoint.
pub const CONTENT_TYPES: &[&str] = &["text/plain", "text/html"];

/// Languages offered by the negotiation endpoint.
pub const LANGUAGES: &[&str] = &["en"];
