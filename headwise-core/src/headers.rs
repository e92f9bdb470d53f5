//! HTTP header and server parameter names used by headwise.
//!
//! This module centralizes the header names read during content negotiation and
//! client address resolution, avoiding magic strings and ensuring consistency.
//! Lookups through [`crate::client_ip::HeaderAccessor`] are case-insensitive, so the
//! lowercase constants below match any casing sent on the wire.

/// Accept header - media types the client understands.
pub const ACCEPT: &str = "accept";

/// Accept-Language header - natural languages the client prefers.
pub const ACCEPT_LANGUAGE: &str = "accept-language";

/// Content-Type header.
pub const CONTENT_TYPE: &str = "content-type";

/// Content-Language header (re-emits the negotiated language item).
pub const CONTENT_LANGUAGE: &str = "content-language";

/// Vary header.
pub const VARY: &str = "vary";

/// Forwarded header (RFC 7239) - standardized proxy header.
pub const FORWARDED: &str = "forwarded";

/// X-Forwarded header - legacy non-standard variant.
pub const X_FORWARDED: &str = "x-forwarded";

/// X-Forwarded-For header - contains the originating client IP.
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// CGI-style spelling of X-Forwarded-For, as some gateways pass it through.
pub const HTTP_X_FORWARDED_FOR: &str = "http_x_forwarded_for";

/// X-Cluster-Client-Ip header - set by some load balancers.
pub const X_CLUSTER_CLIENT_IP: &str = "x-cluster-client-ip";

/// Client-Ip header.
pub const CLIENT_IP: &str = "client-ip";

/// Server parameter holding the transport peer address.
pub const REMOTE_ADDR: &str = "REMOTE_ADDR";

/// Forwarding headers inspected by default, in priority order.
pub const DEFAULT_HEADERS_TO_INSPECT: &[&str] = &[
    FORWARDED,
    X_FORWARDED,
    X_FORWARDED_FOR,
    HTTP_X_FORWARDED_FOR,
    X_CLUSTER_CLIENT_IP,
    CLIENT_IP,
];

/// Check if a header name designates the RFC 7239 `Forwarded` header.
///
/// # Example
///
/// ```
/// use headwise_core::headers::is_forwarded;
///
/// assert!(is_forwarded("Forwarded"));
/// assert!(is_forwarded("FORWARDED"));
/// assert!(!is_forwarded("X-Forwarded"));
/// ```
pub fn is_forwarded(header_name: &str) -> bool {
    header_name.eq_ignore_ascii_case(FORWARDED)
}
