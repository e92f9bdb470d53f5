//! Client IP resolution behind proxies.
//!
//! This module handles:
//! - Reading the transport peer address from server parameters
//! - Deciding whether the peer is a trusted proxy
//! - Extracting the client address from forwarding headers
//! - RFC 7239 `Forwarded` header `for=` parsing
//!
//! # Security Model
//!
//! The transport peer address is the only value a client cannot forge. Forwarding
//! headers are plain request text, so they are consulted only when all of these
//! hold:
//! - proxy header checking is enabled
//! - at least one trusted proxy is configured
//! - the peer address is one of the trusted proxies
//!
//! Anything else resolves to the peer address itself. A header value that is not a
//! strictly valid IPv4 or IPv6 literal is ignored, never an error, so a crafted
//! `X-Forwarded-For` can at worst be skipped.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use headwise_core::{ClientIpConfig, ClientIpResolver};
//!
//! let resolver = ClientIpResolver::new(
//!     ClientIpConfig::default()
//!         .with_proxy_headers(true)
//!         .with_trusted_proxies(["10.0.0.1"]),
//! );
//!
//! let server = HashMap::from([("REMOTE_ADDR", "10.0.0.1")]);
//! let headers = vec![("X-Forwarded-For", "198.51.100.7, 10.0.0.1")];
//!
//! assert_eq!(
//!     resolver.resolve(&server, &headers),
//!     Some("198.51.100.7".to_string())
//! );
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};
use std::net::{IpAddr, SocketAddr};

use tracing::debug;

use crate::error::{HeadwiseError, Result};
use crate::header_utils;
use crate::headers;
use crate::types::{ChainSelection, ClientIpConfig, ProxyTrustProvider};

// ============================================================================
// Request accessors
// ============================================================================

/// Read access to a request's headers.
///
/// Name lookups are case-insensitive. Repeated headers are folded into one
/// comma-separated line, as HTTP allows for list-valued fields.
pub trait HeaderAccessor {
    /// Returns true if the header is present.
    fn has_header(&self, name: &str) -> bool;

    /// Returns all values of the header joined with `", "`.
    fn header_line(&self, name: &str) -> Option<String>;
}

impl HeaderAccessor for hyper::HeaderMap {
    fn has_header(&self, name: &str) -> bool {
        self.contains_key(name)
    }

    fn header_line(&self, name: &str) -> Option<String> {
        let values: Vec<&str> = self
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect();

        (!values.is_empty()).then(|| values.join(", "))
    }
}

impl<K, V> HeaderAccessor for [(K, V)]
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn has_header(&self, name: &str) -> bool {
        self.iter()
            .any(|(key, _)| key.as_ref().eq_ignore_ascii_case(name))
    }

    fn header_line(&self, name: &str) -> Option<String> {
        let values: Vec<&str> = self
            .iter()
            .filter(|(key, _)| key.as_ref().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_ref())
            .collect();

        (!values.is_empty()).then(|| values.join(", "))
    }
}

impl<K, V> HeaderAccessor for Vec<(K, V)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn has_header(&self, name: &str) -> bool {
        self.as_slice().has_header(name)
    }

    fn header_line(&self, name: &str) -> Option<String> {
        self.as_slice().header_line(name)
    }
}

impl<K, V, S> HeaderAccessor for HashMap<K, V, S>
where
    K: AsRef<str>,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn has_header(&self, name: &str) -> bool {
        self.keys().any(|key| key.as_ref().eq_ignore_ascii_case(name))
    }

    fn header_line(&self, name: &str) -> Option<String> {
        self.iter()
            .find(|(key, _)| key.as_ref().eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_ref().to_string())
    }
}

/// Source of the transport peer address (`REMOTE_ADDR`).
pub trait ServerParams {
    /// Returns the peer address as text, if known.
    fn remote_addr(&self) -> Option<String>;
}

impl<K, V, S> ServerParams for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn remote_addr(&self) -> Option<String> {
        self.get(headers::REMOTE_ADDR)
            .map(|value| value.as_ref().to_string())
    }
}

// IPv4-mapped IPv6 peers are reported in IPv4 form so they match IPv4 proxy lists.
impl ServerParams for IpAddr {
    fn remote_addr(&self) -> Option<String> {
        Some(self.to_canonical().to_string())
    }
}

impl ServerParams for SocketAddr {
    fn remote_addr(&self) -> Option<String> {
        self.ip().remote_addr()
    }
}

impl ServerParams for str {
    fn remote_addr(&self) -> Option<String> {
        Some(self.to_string())
    }
}

impl<T: ServerParams + ?Sized> ServerParams for &T {
    fn remote_addr(&self) -> Option<String> {
        (**self).remote_addr()
    }
}

impl<T: ServerParams> ServerParams for Option<T> {
    fn remote_addr(&self) -> Option<String> {
        self.as_ref().and_then(ServerParams::remote_addr)
    }
}

// ============================================================================
// Resolver
// ============================================================================

/// Resolves the client address of a request.
///
/// The resolver holds only configuration and can be shared freely between
/// concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct ClientIpResolver<C = ClientIpConfig> {
    config: C,
}

impl<C: ProxyTrustProvider> ClientIpResolver<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Determines the client address.
    ///
    /// 1. The peer address is accepted if it is a valid IP literal.
    /// 2. If the peer is not a trusted proxy, it is the answer.
    /// 3. Otherwise the configured headers are inspected in order and the
    ///    first one yielding a valid address wins.
    /// 4. If no header yields one, the peer address is the answer.
    ///
    /// Returns `None` only when no valid peer address is available.
    pub fn resolve<P, H>(&self, server_params: &P, headers: &H) -> Option<String>
    where
        P: ServerParams + ?Sized,
        H: HeaderAccessor + ?Sized,
    {
        let Some(peer) = server_params.remote_addr().filter(|addr| is_valid_ip(addr)) else {
            debug!("No valid peer address available");
            return None;
        };

        if !self.peer_is_trusted(&peer) {
            return Some(peer);
        }

        self.address_from_headers(headers).or(Some(peer))
    }

    /// The trust boundary: forwarding headers may only be read when this
    /// returns true for the peer address.
    pub fn peer_is_trusted(&self, peer: &str) -> bool {
        if !self.config.check_proxy_headers() {
            return false;
        }

        if self.config.trusted_proxies().is_empty() {
            return false;
        }

        if !self.config.is_trusted_proxy(peer) {
            debug!(peer = %peer, "Peer is not a trusted proxy, ignoring forwarding headers");
            return false;
        }

        true
    }

    fn address_from_headers<H>(&self, headers: &H) -> Option<String>
    where
        H: HeaderAccessor + ?Sized,
    {
        for name in self.config.headers_to_inspect() {
            if !headers.has_header(name) {
                continue;
            }

            let Some(line) = headers.header_line(name) else {
                continue;
            };

            match self.candidate_from_header(name, &line) {
                Some(candidate) if is_valid_ip(&candidate) => {
                    debug!(header = %name, client_ip = %candidate, "Client address taken from forwarding header");
                    return Some(candidate);
                }
                candidate => {
                    debug!(header = %name, ?candidate, "Ignoring forwarding header without a valid address");
                }
            }
        }

        None
    }

    /// Picks the raw candidate out of one header line according to the
    /// configured chain selection.
    fn candidate_from_header(&self, name: &str, line: &str) -> Option<String> {
        let forwarded = headers::is_forwarded(name);
        let mut candidates = header_utils::split_unquoted(line, ',')
            .into_iter()
            .map(str::trim)
            .map(|entry| {
                if forwarded {
                    forwarded_for(entry)
                } else {
                    Some(entry.to_string())
                }
            });

        match self.config.chain_selection() {
            ChainSelection::Leftmost => candidates.next().flatten(),
            ChainSelection::RightmostUntrusted => candidates
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .find(|candidate| {
                    !candidate
                        .as_deref()
                        .is_some_and(|addr| self.config.is_trusted_proxy(addr))
                })
                .flatten(),
        }
    }
}

/// Extracts the `for=` node of one `Forwarded` element.
///
/// Format: `for=192.0.2.60;proto=http;by=203.0.113.43`. The parameter name is
/// matched case-insensitively.
fn forwarded_for(element: &str) -> Option<String> {
    header_utils::split_unquoted(element, ';')
        .into_iter()
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            key.trim()
                .eq_ignore_ascii_case("for")
                .then(|| node_address(value))
        })
}

/// Reduces an RFC 7239 node identifier to its address part.
///
/// Handles formats: IP, "IP:port", "[IPv6]", "[IPv6]:port", quoted values.
/// Obfuscated identifiers and `unknown` pass through unchanged and later fail
/// validation.
fn node_address(value: &str) -> String {
    let value = value.trim().trim_matches('"').trim();

    if let Some(rest) = value.strip_prefix('[') {
        return rest
            .split_once(']')
            .map_or(rest, |(address, _)| address)
            .trim()
            .to_string();
    }

    // A single colon can only be an IPv4 port separator
    if value.matches(':').count() == 1
        && let Some((address, _port)) = value.split_once(':')
    {
        return address.to_string();
    }

    value.to_string()
}

/// Strict IP literal check: IPv4 dotted quad or IPv6, nothing else.
///
/// Hostnames, ports, brackets, zone identifiers and surrounding whitespace are
/// all rejected.
///
/// # Example
///
/// ```
/// use headwise_core::client_ip::is_valid_ip;
///
/// assert!(is_valid_ip("203.0.113.5"));
/// assert!(is_valid_ip("2001:db8::1"));
/// assert!(!is_valid_ip("[2001:db8::1]"));
/// assert!(!is_valid_ip("localhost"));
/// ```
pub fn is_valid_ip(candidate: &str) -> bool {
    candidate.parse::<IpAddr>().is_ok()
}

/// Parses a configured address (e.g. a trusted proxy entry) with the same
/// strictness as [`is_valid_ip`].
///
/// # Errors
///
/// Returns [`HeadwiseError::InvalidIp`] if `candidate` is not an IP literal.
pub fn parse_ip(candidate: &str) -> Result<IpAddr> {
    candidate
        .parse()
        .map_err(|_| HeadwiseError::InvalidIp(candidate.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestConfig;

    fn server(addr: &str) -> HashMap<String, String> {
        HashMap::from([(headers::REMOTE_ADDR.to_string(), addr.to_string())])
    }

    fn trusting(proxies: &[&str]) -> ClientIpResolver<ClientIpConfig> {
        ClientIpResolver::new(
            ClientIpConfig::default()
                .with_proxy_headers(true)
                .with_trusted_proxies(proxies.iter().copied()),
        )
    }

    fn resolve(
        resolver: &ClientIpResolver<ClientIpConfig>,
        remote_addr: &str,
        headers: &[(&str, &str)],
    ) -> Option<String> {
        resolver.resolve(&server(remote_addr), headers)
    }

    // ===========================================
    // is_valid_ip tests
    // ===========================================

    #[test]
    fn test_is_valid_ip_ipv4() {
        assert!(is_valid_ip("192.168.1.1"));
        assert!(is_valid_ip("0.0.0.0"));
        assert!(is_valid_ip("255.255.255.255"));
    }

    #[test]
    fn test_is_valid_ip_ipv4_invalid() {
        assert!(!is_valid_ip("256.1.1.1"));
        assert!(!is_valid_ip("192.168.1"));
        assert!(!is_valid_ip("192.168.1.1.1"));
        assert!(!is_valid_ip("192.168.1.1:8080"));
        assert!(!is_valid_ip("010.0.0.1"));
    }

    #[test]
    fn test_is_valid_ip_ipv6() {
        assert!(is_valid_ip("::1"));
        assert!(is_valid_ip("2001:db8::1"));
        assert!(is_valid_ip("::ffff:192.168.1.1"));
        assert!(is_valid_ip("2001:0db8:85a3:0000:0000:8a2e:0370:7334"));
    }

    #[test]
    fn test_is_valid_ip_rejects_everything_else() {
        assert!(!is_valid_ip(""));
        assert!(!is_valid_ip(" 10.0.0.1"));
        assert!(!is_valid_ip("[::1]"));
        assert!(!is_valid_ip("fe80::1%eth0"));
        assert!(!is_valid_ip("example.com"));
        assert!(!is_valid_ip("unknown"));
        assert!(!is_valid_ip("10.0.0.1\r\nX-Injected: 1"));
    }

    #[test]
    fn test_parse_ip() {
        assert_eq!(
            parse_ip("10.0.0.1"),
            Ok(IpAddr::from([10, 0, 0, 1]))
        );
        assert_eq!(
            parse_ip("10.0.0.1/8"),
            Err(HeadwiseError::InvalidIp("10.0.0.1/8".to_string()))
        );
    }

    // ===========================================
    // node_address / forwarded_for tests
    // ===========================================

    #[test]
    fn test_node_address_formats() {
        assert_eq!(node_address("192.168.1.1"), "192.168.1.1");
        assert_eq!(node_address("192.168.1.1:8080"), "192.168.1.1");
        assert_eq!(node_address("[2001:db8::1]"), "2001:db8::1");
        assert_eq!(node_address("[2001:db8::1]:443"), "2001:db8::1");
        assert_eq!(node_address("\"[::1]:8080\""), "::1");
        assert_eq!(node_address("  \"10.0.0.1\"  "), "10.0.0.1");
        assert_eq!(node_address("2001:db8::1"), "2001:db8::1");
        assert_eq!(node_address("unknown"), "unknown");
    }

    #[test]
    fn test_forwarded_for_extraction() {
        assert_eq!(
            forwarded_for(r#"for="[2001:db8::1]";proto=https"#),
            Some("2001:db8::1".to_string())
        );
        assert_eq!(
            forwarded_for("proto=http; FOR=192.0.2.60; by=203.0.113.43"),
            Some("192.0.2.60".to_string())
        );
        assert_eq!(forwarded_for("proto=http;by=10.0.0.1"), None);
        assert_eq!(forwarded_for(""), None);
    }

    // ===========================================
    // Trust boundary tests
    // ===========================================

    #[test]
    fn test_untrusted_peer_ignores_headers() {
        let resolver = trusting(&["10.0.0.1"]);
        assert_eq!(
            resolve(&resolver, "203.0.113.5", &[("X-Forwarded-For", "198.51.100.7")]),
            Some("203.0.113.5".to_string())
        );
    }

    #[test]
    fn test_trusted_peer_uses_first_token() {
        let resolver = trusting(&["10.0.0.1"]);
        assert_eq!(
            resolve(
                &resolver,
                "10.0.0.1",
                &[("X-Forwarded-For", "198.51.100.7, 10.0.0.1")]
            ),
            Some("198.51.100.7".to_string())
        );
    }

    #[test]
    fn test_proxy_headers_disabled() {
        let resolver = ClientIpResolver::new(
            ClientIpConfig::default().with_trusted_proxies(["10.0.0.1"]),
        );
        assert!(!resolver.peer_is_trusted("10.0.0.1"));
        assert_eq!(
            resolve(&resolver, "10.0.0.1", &[("X-Forwarded-For", "198.51.100.7")]),
            Some("10.0.0.1".to_string())
        );
    }

    #[test]
    fn test_empty_trusted_set_never_trusts() {
        let resolver = trusting(&[]);
        assert!(!resolver.peer_is_trusted("10.0.0.1"));
        assert_eq!(
            resolve(&resolver, "10.0.0.1", &[("X-Forwarded-For", "198.51.100.7")]),
            Some("10.0.0.1".to_string())
        );
    }

    #[test]
    fn test_peer_is_trusted_only_on_exact_match() {
        let resolver = trusting(&["10.0.0.1"]);
        assert!(resolver.peer_is_trusted("10.0.0.1"));
        assert!(!resolver.peer_is_trusted("10.0.0.10"));
        assert!(!resolver.peer_is_trusted(""));
    }

    #[test]
    fn test_default_resolver_returns_peer() {
        let resolver = ClientIpResolver::<ClientIpConfig>::default();
        assert_eq!(
            resolve(&resolver, "192.0.2.1", &[("Forwarded", "for=198.51.100.7")]),
            Some("192.0.2.1".to_string())
        );
    }

    // ===========================================
    // Peer address tests
    // ===========================================

    #[test]
    fn test_invalid_peer_yields_none() {
        let resolver = trusting(&["10.0.0.1"]);
        assert_eq!(
            resolve(&resolver, "not-an-ip", &[("X-Forwarded-For", "198.51.100.7")]),
            None
        );
    }

    #[test]
    fn test_missing_server_params_yields_none() {
        let resolver = trusting(&["10.0.0.1"]);
        let empty: HashMap<String, String> = HashMap::new();
        let headers = vec![("X-Forwarded-For", "198.51.100.7")];
        assert_eq!(resolver.resolve(&empty, &headers), None);
        assert_eq!(resolver.resolve(&None::<&str>, &headers), None);
    }

    #[test]
    fn test_socket_addr_peer() {
        let resolver = trusting(&["10.0.0.1"]);
        let peer: SocketAddr = "10.0.0.1:54321".parse().unwrap();
        let headers = vec![("X-Forwarded-For", "198.51.100.7")];
        assert_eq!(
            resolver.resolve(&peer, &headers),
            Some("198.51.100.7".to_string())
        );
    }

    #[test]
    fn test_ipv4_mapped_peer_is_canonicalized() {
        let peer: SocketAddr = "[::ffff:10.0.0.1]:443".parse().unwrap();
        assert_eq!(peer.remote_addr(), Some("10.0.0.1".to_string()));
    }

    #[test]
    fn test_str_peer() {
        let resolver = trusting(&["10.0.0.1"]);
        let headers = vec![("Client-Ip", "198.51.100.9")];
        assert_eq!(
            resolver.resolve("10.0.0.1", &headers),
            Some("198.51.100.9".to_string())
        );
        assert_eq!(
            resolver.resolve(&Some("10.0.0.1"), &headers),
            Some("198.51.100.9".to_string())
        );
    }

    // ===========================================
    // Header inspection tests
    // ===========================================

    #[test]
    fn test_invalid_header_falls_back_to_peer() {
        let resolver = trusting(&["10.0.0.1"]);
        assert_eq!(
            resolve(&resolver, "10.0.0.1", &[("X-Forwarded-For", "not-an-ip")]),
            Some("10.0.0.1".to_string())
        );
    }

    #[test]
    fn test_only_leftmost_token_is_considered() {
        let resolver = trusting(&["10.0.0.1"]);
        assert_eq!(
            resolve(
                &resolver,
                "10.0.0.1",
                &[("X-Forwarded-For", "garbage, 198.51.100.7")]
            ),
            Some("10.0.0.1".to_string())
        );
    }

    #[test]
    fn test_forwarded_ipv6_with_quotes_and_brackets() {
        let resolver = trusting(&["10.0.0.1"]);
        assert_eq!(
            resolve(
                &resolver,
                "10.0.0.1",
                &[("Forwarded", r#"for="[2001:db8::1]";proto=https"#)]
            ),
            Some("2001:db8::1".to_string())
        );
    }

    #[test]
    fn test_forwarded_first_element_wins() {
        let resolver = trusting(&["10.0.0.1"]);
        assert_eq!(
            resolve(
                &resolver,
                "10.0.0.1",
                &[("forwarded", "for=192.0.2.60;by=10.0.0.1, for=198.51.100.1")]
            ),
            Some("192.0.2.60".to_string())
        );
    }

    #[test]
    fn test_first_valid_header_in_priority_order_wins() {
        let resolver = trusting(&["10.0.0.1"]);
        let headers = [
            ("Client-Ip", "192.0.2.3"),
            ("X-Forwarded-For", "192.0.2.2"),
            ("Forwarded", "for=unknown"),
        ];
        // Forwarded is inspected first but yields nothing valid
        assert_eq!(
            resolve(&resolver, "10.0.0.1", &headers),
            Some("192.0.2.2".to_string())
        );
    }

    #[test]
    fn test_custom_header_list_restricts_inspection() {
        let resolver = ClientIpResolver::new(
            ClientIpConfig::default()
                .with_proxy_headers(true)
                .with_trusted_proxies(["10.0.0.1"])
                .with_headers_to_inspect(["X-Real-Ip"]),
        );
        let headers = [("X-Forwarded-For", "192.0.2.2"), ("x-real-ip", "192.0.2.9")];
        assert_eq!(
            resolve(&resolver, "10.0.0.1", &headers),
            Some("192.0.2.9".to_string())
        );
    }

    #[test]
    fn test_header_injection_attempt_is_ignored() {
        let resolver = trusting(&["10.0.0.1"]);
        assert_eq!(
            resolve(
                &resolver,
                "10.0.0.1",
                &[("X-Forwarded-For", "1.2.3.4' OR '1'='1")]
            ),
            Some("10.0.0.1".to_string())
        );
    }

    #[test]
    fn test_repeated_headers_are_folded() {
        let resolver = trusting(&["10.0.0.1"]);
        let headers = [
            ("X-Forwarded-For", "192.0.2.1"),
            ("X-Forwarded-For", "192.0.2.2"),
        ];
        assert_eq!(
            resolve(&resolver, "10.0.0.1", &headers),
            Some("192.0.2.1".to_string())
        );
    }

    // ===========================================
    // Chain selection tests
    // ===========================================

    #[test]
    fn test_rightmost_untrusted_skips_trusted_hops() {
        let resolver = ClientIpResolver::new(
            TestConfig::trusting(vec!["10.0.0.1", "10.0.0.2"])
                .with_chain_selection(ChainSelection::RightmostUntrusted),
        );
        let headers = vec![(
            "X-Forwarded-For",
            "6.6.6.6, 198.51.100.7, 10.0.0.2",
        )];
        assert_eq!(
            resolver.resolve("10.0.0.1", &headers),
            Some("198.51.100.7".to_string())
        );
    }

    #[test]
    fn test_rightmost_untrusted_forwarded() {
        let resolver = ClientIpResolver::new(
            TestConfig::trusting(vec!["10.0.0.1", "10.0.0.2"])
                .with_chain_selection(ChainSelection::RightmostUntrusted),
        );
        let headers = vec![(
            "Forwarded",
            r#"for=6.6.6.6, for="[2001:db8::7]:80", for=10.0.0.2"#,
        )];
        assert_eq!(
            resolver.resolve("10.0.0.1", &headers),
            Some("2001:db8::7".to_string())
        );
    }

    #[test]
    fn test_rightmost_untrusted_all_trusted_falls_back() {
        let resolver = ClientIpResolver::new(
            TestConfig::trusting(vec!["10.0.0.1", "10.0.0.2"])
                .with_chain_selection(ChainSelection::RightmostUntrusted),
        );
        let headers = vec![("X-Forwarded-For", "10.0.0.2, 10.0.0.1")];
        assert_eq!(
            resolver.resolve("10.0.0.1", &headers),
            Some("10.0.0.1".to_string())
        );
    }

    // ===========================================
    // Header accessor tests
    // ===========================================

    #[test]
    fn test_header_map_accessor() {
        let mut map = hyper::HeaderMap::new();
        map.append("x-forwarded-for", "192.0.2.1".parse().unwrap());
        map.append("x-forwarded-for", "192.0.2.2".parse().unwrap());

        assert!(map.has_header("X-Forwarded-For"));
        assert!(!map.has_header("Forwarded"));
        assert!(!map.has_header("not a header"));
        assert_eq!(
            map.header_line("X-FORWARDED-FOR"),
            Some("192.0.2.1, 192.0.2.2".to_string())
        );
        assert_eq!(map.header_line("forwarded"), None);
    }

    #[test]
    fn test_header_map_resolution() {
        let resolver = trusting(&["127.0.0.1"]);
        let mut map = hyper::HeaderMap::new();
        map.insert("forwarded", "for=192.0.2.43".parse().unwrap());

        let peer: SocketAddr = "127.0.0.1:8080".parse().unwrap();
        assert_eq!(
            resolver.resolve(&peer, &map),
            Some("192.0.2.43".to_string())
        );
    }

    #[test]
    fn test_hash_map_accessor_case_insensitive() {
        let map = HashMap::from([("X-Forwarded-For", "192.0.2.1")]);
        assert!(map.has_header("x-forwarded-for"));
        assert_eq!(map.header_line("x-forwarded-for"), Some("192.0.2.1".to_string()));
        assert_eq!(map.header_line("forwarded"), None);
    }
}
