//! headwise - Accept header negotiation and client IP resolution
//!
//! A small HTTP endpoint that reports what a request asks for and who sent it.
//!
//! # Overview
//!
//! headwise wires the `headwise-core` building blocks into a runnable server:
//! - Accept and Accept-Language parsing, ranking and negotiation
//! - Client IP resolution behind trusted proxies (RFC 7239 compliant)
//! - Configuration from environment variables, cached at startup
//! - Structured logging with JSON support
//!
//! # Example
//!
//! ```rust,no_run
//! use headwise::{config, ClientIpResolver, EnvVarConfig};
//!
//! // Get configuration from environment
//! let client_ip = config::get_client_ip_config();
//! let types = config::get_available_content_types();
//!
//! // Create a resolver driven by the same configuration
//! let resolver = ClientIpResolver::new(EnvVarConfig::new());
//! ```
//!
//! # Modules
//!
//! - [`config`] - Configuration management from environment variables
//! - [`env_vars`] - Environment variable constants
//! - [`server`] - Server utilities and startup info
//! - [`args`] - Command line argument parsing
//!
//! # Re-exports from headwise-core
//!
//! Core functionality is provided by the `headwise-core` crate:
//! - [`accept`] - Accept-family header parsing and ranking
//! - [`client_ip`] - Client IP resolution and proxy trust
//! - [`request_handler`] - HTTP request processing

#![forbid(unsafe_code)]

pub mod args;
pub mod config;
pub mod env_vars;
pub mod server;

// Re-export headwise-core modules
pub use headwise_core::accept;
pub use headwise_core::client_ip;
pub use headwise_core::request_handler;
pub use headwise_core::types;

// Re-export commonly used items at crate root
pub use config::{
    EnvVarConfig, get_available_content_types, get_available_languages, get_client_ip_config,
};
pub use headwise_core::{
    AcceptHeader, AcceptHeaderItem, ChainSelection, ClientIpConfig, ClientIpResolver,
    ConfigProvider, HeadwiseError, NegotiationProvider, ProxyTrustProvider,
};
