//! HTTP request handling.
//!
//! This module ties the resolver and the Accept-family parser to hyper requests:
//! the resolved client address is attached to the request as an attribute, and
//! [`handle_request`] answers with a representation negotiated from the
//! request's `Accept` and `Accept-Language` headers.
//!
//! # Architecture
//!
//! The request handling flow:
//! 1. Resolve the client address and attach it to the request
//! 2. Parse `Accept` and `Accept-Language`
//! 3. Negotiate a content type (406 if none is acceptable)
//! 4. Negotiate a language (first available if none matches)
//! 5. Answer with a body describing the decisions

use http_body_util::Full;
use hyper::header::HeaderValue;
use hyper::{HeaderMap, Request, Response, StatusCode};
use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::accept::{AcceptHeader, AcceptHeaderItem};
use crate::client_ip::ClientIpResolver;
use crate::error::{HeadwiseError, Result};
use crate::headers;
use crate::types::{ConfigProvider, ProxyTrustProvider};

/// String attributes attached to a request, stored in its extensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestAttributes(HashMap<String, String>);

impl RequestAttributes {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Resolves the client address of `req` and stores it in the request's
/// [`RequestAttributes`] under the configured attribute name.
///
/// # Arguments
///
/// * `req` - The request to annotate
/// * `peer` - The transport peer address of the connection
/// * `resolver` - The client address resolver
///
/// # Returns
///
/// The resolved address, also available afterwards through the request's
/// extensions.
///
/// # Example
///
/// ```
/// use headwise_core::request_handler::{attach_client_ip, RequestAttributes};
/// use headwise_core::{ClientIpConfig, ClientIpResolver};
/// use hyper::Request;
///
/// let resolver = ClientIpResolver::new(ClientIpConfig::default());
/// let mut req = Request::builder().body(()).unwrap();
///
/// attach_client_ip(&mut req, "192.0.2.1:4000".parse().unwrap(), &resolver);
///
/// let attributes = req.extensions().get::<RequestAttributes>().unwrap();
/// assert_eq!(attributes.get("ip_address"), Some("192.0.2.1"));
/// ```
pub fn attach_client_ip<B, C: ProxyTrustProvider>(
    req: &mut Request<B>,
    peer: SocketAddr,
    resolver: &ClientIpResolver<C>,
) -> Option<String> {
    let client_ip = resolver.resolve(&peer, req.headers())?;
    let attribute = resolver.config().attribute_name().to_string();

    match req.extensions_mut().get_mut::<RequestAttributes>() {
        Some(attributes) => attributes.insert(attribute, client_ip.clone()),
        None => {
            let mut attributes = RequestAttributes::default();
            attributes.insert(attribute, client_ip.clone());
            req.extensions_mut().insert(attributes);
        }
    }

    Some(client_ip)
}

/// Handles an incoming HTTP request with content negotiation.
///
/// # Arguments
///
/// * `req` - The incoming HTTP request
/// * `peer` - The transport peer address of the connection
/// * `config` - Configuration provider for all settings
///
/// # Returns
///
/// Always returns `Ok` with either:
/// - `200 OK` with the negotiated `Content-Type` and `Content-Language`
/// - `406 Not Acceptable` when no offered content type is accepted
/// - `400 Bad Request` when an Accept-family header is malformed
pub async fn handle_request<B, C: ConfigProvider>(
    mut req: Request<B>,
    peer: SocketAddr,
    config: Arc<C>,
) -> std::result::Result<Response<Full<bytes::Bytes>>, Infallible> {
    let resolver = ClientIpResolver::new(config.as_ref());
    let client_ip = attach_client_ip(&mut req, peer, &resolver);

    let (accept, accept_language) = match parse_accept_headers(req.headers()) {
        Ok(parsed) => parsed,
        Err(err) => return Ok(error_response(&err, peer)),
    };

    let Some(content_type) = choose(&accept, config.available_content_types()) else {
        debug!(accept = %accept, "No acceptable content type");
        return Ok(create_error_response(
            StatusCode::NOT_ACCEPTABLE,
            "Not Acceptable",
        ));
    };

    let language = choose(&accept_language, config.available_languages())
        .or_else(|| config.available_languages().first().map(String::as_str));

    let body = render_body(
        client_ip.as_deref(),
        content_type,
        language,
        &accept,
        &accept_language,
    );

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(headers::CONTENT_TYPE, content_type_with_charset(content_type))
        .header(headers::VARY, "Accept, Accept-Language");

    if let Some(language) = language
        && let Ok(value) = HeaderValue::from_str(&AcceptHeaderItem::new(language).to_string())
    {
        builder = builder.header(headers::CONTENT_LANGUAGE, value);
    }

    Ok(builder
        .body(Full::new(bytes::Bytes::from(body)))
        .unwrap_or_else(|_| {
            create_error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }))
}

/// Creates a standardized error response.
///
/// Builds an HTTP response with the given status code and plain text message.
/// Falls back to a minimal 500 response if building fails.
///
/// # Example
///
/// ```
/// use headwise_core::request_handler::create_error_response;
/// use hyper::StatusCode;
///
/// let response = create_error_response(StatusCode::NOT_ACCEPTABLE, "Not Acceptable");
/// assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
/// ```
pub fn create_error_response(status: StatusCode, message: &str) -> Response<Full<bytes::Bytes>> {
    Response::builder()
        .status(status)
        .header(headers::CONTENT_TYPE, "text/plain")
        .body(Full::new(bytes::Bytes::from(message.to_string())))
        .unwrap_or_else(|_| Response::new(Full::new(bytes::Bytes::from("Internal Server Error"))))
}

/// Maps a handler error to its response, logging server faults at error level
/// and malformed client input at warn level.
fn error_response(err: &HeadwiseError, peer: SocketAddr) -> Response<Full<bytes::Bytes>> {
    if err.is_server_error() {
        error!(peer = %peer, error = %err, "Request failed");
    } else {
        warn!(peer = %peer, error = %err, "Rejecting request with malformed header");
    }
    create_error_response(err.status_code(), err.user_message())
}

fn parse_accept_headers(map: &HeaderMap) -> Result<(AcceptHeader, AcceptHeader)> {
    let accept = AcceptHeader::parse(header_value(map, headers::ACCEPT)?.as_deref())?;
    let accept_language =
        AcceptHeader::parse(header_value(map, headers::ACCEPT_LANGUAGE)?.as_deref())?;
    Ok((accept, accept_language))
}

/// Folds repeated header lines into one value. Non-UTF-8 bytes are an error.
fn header_value(map: &HeaderMap, name: &str) -> Result<Option<String>> {
    let mut values = Vec::new();
    for value in map.get_all(name) {
        let value = value
            .to_str()
            .map_err(|_| HeadwiseError::InvalidHeader(name.to_string()))?;
        values.push(value);
    }

    Ok((!values.is_empty()).then(|| values.join(", ")))
}

/// An absent header accepts anything: the first offer wins.
fn choose<'a>(header: &AcceptHeader, available: &'a [String]) -> Option<&'a str> {
    if header.is_empty() {
        available.first().map(String::as_str)
    } else {
        header.negotiate(available)
    }
}

fn content_type_with_charset(content_type: &str) -> String {
    if content_type.starts_with("text/") {
        format!("{content_type}; charset=utf-8")
    } else {
        content_type.to_string()
    }
}

fn render_body(
    client_ip: Option<&str>,
    content_type: &str,
    language: Option<&str>,
    accept: &AcceptHeader,
    accept_language: &AcceptHeader,
) -> String {
    let lines = [
        ("client_ip", client_ip.unwrap_or("unknown").to_string()),
        ("content_type", content_type.to_string()),
        ("language", language.unwrap_or("").to_string()),
        ("accept", accept.to_string()),
        ("accept_language", accept_language.to_string()),
    ];

    let text: String = lines
        .iter()
        .map(|(name, value)| format!("{name}: {value}\n"))
        .collect();

    if content_type.eq_ignore_ascii_case("text/html") {
        format!(
            "<!DOCTYPE html>\n<html><body><pre>\n{}</pre></body></html>\n",
            escape_html(&text)
        )
    } else {
        text
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
