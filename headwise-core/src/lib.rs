//! headwise Core - Request header interpretation components
//!
//! This crate provides the building blocks for reading what a client asks for and
//! who the client is:
//! - Accept-family header parsing and preference ranking
//! - Content negotiation against a list of offered representations
//! - Client IP resolution behind trusted proxies (RFC 7239 aware)
//!
//! # Overview
//!
//! `headwise-core` is framework-agnostic: the resolver reads headers through the
//! [`client_ip::HeaderAccessor`] trait and the peer address through
//! [`client_ip::ServerParams`], both implemented for hyper types and plain maps.
//! Configuration is provided via the [`ConfigProvider`] trait, allowing flexible
//! configuration from any source.
//!
//! # Example
//!
//! ```rust
//! use headwise_core::{AcceptHeader, ClientIpConfig, ClientIpResolver};
//! use std::net::SocketAddr;
//!
//! let accept: AcceptHeader = "text/html;q=0.9, application/json".parse().unwrap();
//! assert_eq!(accept.negotiate(&["text/html", "application/json"]), Some("application/json"));
//!
//! let resolver = ClientIpResolver::new(
//!     ClientIpConfig::default()
//!         .with_proxy_headers(true)
//!         .with_trusted_proxies(["127.0.0.1"]),
//! );
//! let peer: SocketAddr = "127.0.0.1:50000".parse().unwrap();
//! let headers = vec![("X-Forwarded-For", "198.51.100.7")];
//! assert_eq!(resolver.resolve(&peer, &headers).as_deref(), Some("198.51.100.7"));
//! ```
//!
//! # Modules
//!
//! - [`accept`] - Accept-family items, parsing, ranking and negotiation
//! - [`client_ip`] - Client IP resolution and proxy trust
//! - [`header_utils`] - Quote-aware header value splitting and rendering
//! - [`types`] - Configuration traits and the [`ConfigProvider`] trait
//! - [`error`] - Error types and result aliases
//! - [`headers`] - HTTP header constants
//! - [`defaults`] - Default configuration values
//! - [`request_handler`] - hyper request annotation and the negotiation endpoint

#![forbid(unsafe_code)]

pub mod accept;
pub mod client_ip;
pub mod defaults;
pub mod error;
pub mod header_utils;
pub mod headers;
pub mod request_handler;
#[cfg(test)]
pub mod test_utils;
pub mod types;

// Re-export commonly used items at crate root
pub use accept::{AcceptHeader, AcceptHeaderItem};
pub use client_ip::{ClientIpResolver, HeaderAccessor, ServerParams};
pub use error::{HeadwiseError, Result};
pub use types::{
    // Selection policy for forwarding chains
    ChainSelection,
    // Plain configuration struct
    ClientIpConfig,
    // Aggregated configuration trait
    ConfigProvider,
    // Composable configuration traits
    NegotiationProvider,
    ProxyTrustProvider,
};
