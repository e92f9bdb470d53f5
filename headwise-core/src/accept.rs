//! Accept-family header parsing and ranking.
//!
//! `Accept`, `Accept-Language`, `Accept-Charset` and `Accept-Encoding` all share
//! one shape: a comma-separated list of items, each a value followed by
//! `;name=value` parameters, one of which may be the quality weight `q`.
//!
//! Clients list alternatives in any order and express preference through `q`;
//! equal weights defer to declaration order (RFC 7231). [`AcceptHeaderItem`]
//! keeps the original position as its `index` so that a stable sort by
//! descending quality, then ascending index, reproduces the client's intent.
//!
//! # Example
//!
//! ```
//! use headwise_core::accept::{parse_items, sort_by_preference};
//!
//! let mut items = parse_items(Some("text/html;q=0.8, text/plain;q=0.9")).unwrap();
//! sort_by_preference(&mut items);
//!
//! assert_eq!(items[0].value(), "text/plain");
//! assert_eq!(items[1].value(), "text/html");
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::defaults;
use crate::error::{HeadwiseError, Result};
use crate::header_utils;

/// One item of an Accept-family header.
///
/// Items are immutable values: every `with_*` method consumes the item and
/// returns an updated copy, so an item handed to concurrent request workflows
/// can never change underneath them.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptHeaderItem {
    value: String,
    quality: f64,
    index: usize,
    attributes: Vec<(String, String)>,
}

impl AcceptHeaderItem {
    /// Creates an item with default quality, index 0 and no attributes.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            quality: defaults::QUALITY,
            index: 0,
            attributes: Vec::new(),
        }
    }

    /// Creates an item and applies each attribute through [`Self::with_attribute`].
    ///
    /// # Errors
    ///
    /// Returns [`HeadwiseError::InvalidQuality`] if a `q` attribute is malformed.
    pub fn from_parts<I, K, V>(value: impl Into<String>, attributes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        attributes
            .into_iter()
            .try_fold(Self::new(value), |item, (name, value)| {
                item.with_attribute(name, value)
            })
    }

    /// Parses a single item such as `text/html;q=0.8;level=1`.
    ///
    /// `None` is treated as an empty string and yields an item with an empty
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`HeadwiseError::InvalidQuality`] if the `q` parameter is not a
    /// number in `[0, 1]`.
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let parts = header_utils::split(raw.unwrap_or_default(), ";=");

        let value = parts
            .first()
            .and_then(|group| group.first())
            .cloned()
            .unwrap_or_default();
        let attributes = header_utils::combine(parts.get(1..).unwrap_or_default());

        Self::from_parts(value, attributes)
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn quality(&self) -> f64 {
        self.quality
    }

    /// Sets the quality verbatim. No range check is applied here; values read
    /// from the wire are validated when parsed.
    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = quality;
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = index;
        self
    }

    /// Attribute names compare case-insensitively.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn attribute_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.attribute(name).unwrap_or(default)
    }

    /// All attributes other than `q`, in insertion order.
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Sets an attribute, or the quality when `name` is `q`.
    ///
    /// Names are lowercased, as they are when parsed, so `Q` also sets the
    /// quality. Setting an existing attribute replaces its value in place.
    ///
    /// # Errors
    ///
    /// Returns [`HeadwiseError::InvalidQuality`] if `name` is `q` and `value`
    /// is not a number in `[0, 1]`, and [`HeadwiseError::InvalidHeader`] if
    /// `name` is not an HTTP token.
    pub fn with_attribute(
        mut self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into().to_lowercase();
        let value = value.into();

        if !header_utils::is_token(&name) {
            return Err(HeadwiseError::InvalidHeader(format!(
                "attribute name {name:?}"
            )));
        }

        if name == "q" {
            self.quality = parse_quality(&value)?;
            return Ok(self);
        }

        match self.attributes.iter_mut().find(|(key, _)| *key == name) {
            Some(attribute) => attribute.1 = value,
            None => self.attributes.push((name, value)),
        }
        Ok(self)
    }

    /// Client preference order: descending quality, then ascending index.
    pub fn preference_cmp(&self, other: &Self) -> Ordering {
        other
            .quality
            .total_cmp(&self.quality)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl FromStr for AcceptHeaderItem {
    type Err = HeadwiseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(Some(s))
    }
}

impl fmt::Display for AcceptHeaderItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if needs_quoting(&self.value) {
            f.write_str(&header_utils::quote(&self.value))?;
        } else {
            f.write_str(&self.value)?;
        }

        if self.quality < defaults::QUALITY {
            write!(f, ";q={}", self.quality)?;
        }

        if !self.attributes.is_empty() {
            write!(
                f,
                "; {}",
                header_utils::to_header_string(&self.attributes, ";")
            )?;
        }

        Ok(())
    }
}

/// Values are written bare (media types contain `/`) unless they would not
/// survive re-parsing.
fn needs_quoting(value: &str) -> bool {
    value != value.trim() || value.contains([',', ';', '=', '"', '\\'])
}

/// Parses a `q` parameter value.
///
/// # Errors
///
/// Returns [`HeadwiseError::InvalidQuality`] for anything other than a finite
/// number in `[0, 1]`.
pub fn parse_quality(raw: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(quality) if (0.0..=1.0).contains(&quality) => Ok(quality),
        _ => Err(HeadwiseError::InvalidQuality(raw.to_string())),
    }
}

/// Parses a whole header value into items, in header order.
///
/// Each top-level comma-separated segment becomes one item whose index is the
/// segment position. `None`, an empty string and a blank string all yield no
/// items. A blank segment inside a non-empty header yields an item with an
/// empty value; callers that do not want those should filter them (as
/// [`AcceptHeader`] does).
///
/// # Errors
///
/// Fails on the first segment carrying a malformed `q` parameter.
///
/// # Example
///
/// ```
/// use headwise_core::accept::parse_items;
///
/// let items = parse_items(Some("en-US, fr;q=0.5")).unwrap();
/// assert_eq!(items[1].value(), "fr");
/// assert_eq!(items[1].index(), 1);
/// assert!(parse_items(None).unwrap().is_empty());
/// ```
pub fn parse_items(raw: Option<&str>) -> Result<Vec<AcceptHeaderItem>> {
    let raw = raw.unwrap_or_default();
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    header_utils::split_unquoted(raw, ',')
        .into_iter()
        .enumerate()
        .map(|(index, segment)| {
            AcceptHeaderItem::parse(Some(segment)).map(|item| item.with_index(index))
        })
        .collect()
}

/// Sorts items into client preference order. The sort is stable and
/// idempotent.
pub fn sort_by_preference(items: &mut [AcceptHeaderItem]) {
    items.sort_by(AcceptHeaderItem::preference_cmp);
}

/// A parsed Accept-family header: its non-empty items, kept in preference
/// order and unique by value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AcceptHeader {
    items: Vec<AcceptHeaderItem>,
}

impl AcceptHeader {
    /// Builds a header from items. A later item replaces an earlier one with
    /// the same value.
    pub fn new(items: impl IntoIterator<Item = AcceptHeaderItem>) -> Self {
        items
            .into_iter()
            .fold(Self::default(), |header, item| header.with_item(item))
    }

    /// Parses a raw header value, dropping items with an empty value.
    ///
    /// # Errors
    ///
    /// Returns [`HeadwiseError::InvalidQuality`] if any item carries a
    /// malformed `q` parameter.
    ///
    /// # Example
    ///
    /// ```
    /// use headwise_core::accept::AcceptHeader;
    ///
    /// let header = AcceptHeader::parse(Some("da, en-gb;q=0.8, en;q=0.7")).unwrap();
    /// assert_eq!(header.first().map(|item| item.value()), Some("da"));
    /// assert_eq!(header.negotiate(&["en", "fr"]), Some("en"));
    /// ```
    pub fn parse(raw: Option<&str>) -> Result<Self> {
        let items = parse_items(raw)?
            .into_iter()
            .filter(|item| !item.value().is_empty());
        Ok(Self::new(items))
    }

    /// Returns a header with `item` added, replacing any item with the same value.
    pub fn with_item(mut self, item: AcceptHeaderItem) -> Self {
        self.items.retain(|existing| existing.value() != item.value());
        self.items.push(item);
        sort_by_preference(&mut self.items);
        self
    }

    pub fn has(&self, value: &str) -> bool {
        self.get(value).is_some()
    }

    pub fn get(&self, value: &str) -> Option<&AcceptHeaderItem> {
        self.items.iter().find(|item| item.value() == value)
    }

    /// All items in preference order.
    pub fn all(&self) -> &[AcceptHeaderItem] {
        &self.items
    }

    /// The most preferred item.
    pub fn first(&self) -> Option<&AcceptHeaderItem> {
        self.items.first()
    }

    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&AcceptHeaderItem) -> bool,
    {
        Self {
            items: self
                .items
                .iter()
                .filter(|item| predicate(item))
                .cloned()
                .collect(),
        }
    }

    /// Item values in preference order.
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(AcceptHeaderItem::value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Picks the first of `available` the client accepts, walking the client's
    /// items in preference order.
    ///
    /// Values compare case-insensitively and exactly; wildcards such as
    /// `text/*` get no special treatment. Items with quality 0 mean "not
    /// acceptable" and never match.
    pub fn negotiate<'a, S: AsRef<str>>(&self, available: &'a [S]) -> Option<&'a str> {
        self.items
            .iter()
            .filter(|item| item.quality() > 0.0)
            .find_map(|item| {
                available
                    .iter()
                    .map(AsRef::as_ref)
                    .find(|candidate| candidate.eq_ignore_ascii_case(item.value()))
            })
    }
}

impl fmt::Display for AcceptHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.items.iter().map(ToString::to_string).collect();
        f.write_str(&rendered.join(","))
    }
}

impl FromStr for AcceptHeader {
    type Err = HeadwiseError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(Some(s))
    }
}
