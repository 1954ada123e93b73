//! Media type parsing and content negotiation.
//!
//! # Data Flow
//! ```text
//! Content-Type header
//!     → MediaType::parse (type, subtype, parameters)
//!     → MediaRange (parameters stripped) → ContentTypeRouter lookup
//!
//! Accept header
//!     → accept.rs: split on ',' → MediaType::parse per segment
//!     → AcceptClause { range, quality } (malformed segments dropped)
//!     → sort by preference → AcceptRouter scan
//! ```
//!
//! # Design Decisions
//! - Type and subtype are lowercased at parse time; comparisons are plain `==`
//! - Parameters are kept for `q` extraction only, never used for matching
//! - Either component may be the literal wildcard `*`
//! - Parsing is allocation-light and never panics on any input

pub mod accept;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

pub use accept::{preference, AcceptClause};

/// The wildcard component of a media range.
pub const WILDCARD: &str = "*";

/// Errors produced while parsing a media type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MediaTypeError {
    /// The essence did not split into exactly `type/subtype`.
    #[error("invalid media type {0:?}: expected type/subtype")]
    InvalidEssence(String),

    /// Type or subtype was empty.
    #[error("invalid media type {0:?}: empty type or subtype")]
    EmptyComponent(String),

    /// A parameter had no `=` or an empty key.
    #[error("malformed parameter {param:?} in {input:?}")]
    MalformedParameter { param: String, input: String },

    /// The `q` parameter could not be read as a weight in `[0, 1]`.
    #[error("quality {value:?} can not be parsed from {input:?}")]
    InvalidQuality { value: String, input: String },
}

/// A `type/subtype` pair with parameters removed.
///
/// Used both for parsed request media types and for registered route keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaRange {
    type_: String,
    subtype: String,
}

impl MediaRange {
    /// Build a range from already separated components, normalizing case.
    pub fn new(type_: impl AsRef<str>, subtype: impl AsRef<str>) -> Self {
        Self {
            type_: type_.as_ref().trim().to_ascii_lowercase(),
            subtype: subtype.as_ref().trim().to_ascii_lowercase(),
        }
    }

    /// The universal range `*/*`.
    pub fn any() -> Self {
        Self::new(WILDCARD, WILDCARD)
    }

    pub fn type_(&self) -> &str {
        &self.type_
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    pub fn is_wildcard_type(&self) -> bool {
        self.type_ == WILDCARD
    }

    pub fn is_wildcard_subtype(&self) -> bool {
        self.subtype == WILDCARD
    }

    /// True for `*/*`.
    pub fn is_any(&self) -> bool {
        self.is_wildcard_type() && self.is_wildcard_subtype()
    }
}

impl fmt::Display for MediaRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)
    }
}

impl FromStr for MediaRange {
    type Err = MediaTypeError;

    /// Parses a route key. Parameters, if any, are accepted and discarded.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaType::parse(s).map(|mt| mt.range)
    }
}

/// A parsed media type: `type/subtype` plus its parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaType {
    range: MediaRange,
    params: BTreeMap<String, String>,
}

impl MediaType {
    /// Parse a single media type such as `multipart/form-data; boundary=X`.
    ///
    /// Surrounding whitespace is ignored, components are lowercased, and
    /// empty parameter segments (`text/html;`) are skipped. A `q` parameter
    /// is validated here so that every caller sees the same failure.
    pub fn parse(input: &str) -> Result<Self, MediaTypeError> {
        let input = input.trim();
        let mut segments = input.split(';');
        let essence = segments.next().unwrap_or_default();

        let mut parts = essence.split('/');
        let (type_, subtype) = match (parts.next(), parts.next(), parts.next()) {
            (Some(t), Some(s), None) => (t.trim(), s.trim()),
            _ => return Err(MediaTypeError::InvalidEssence(input.to_string())),
        };
        if type_.is_empty() || subtype.is_empty() {
            return Err(MediaTypeError::EmptyComponent(input.to_string()));
        }

        let mut params = BTreeMap::new();
        for param in segments {
            if param.trim().is_empty() {
                continue;
            }
            let (key, value) = match param.split_once('=') {
                Some((k, v)) if !k.trim().is_empty() => (k, v),
                _ => {
                    return Err(MediaTypeError::MalformedParameter {
                        param: param.to_string(),
                        input: input.to_string(),
                    })
                }
            };
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim().trim_matches('"').to_string();
            if key == "q" {
                parse_quality(&value, input)?;
            }
            params.insert(key, value);
        }

        Ok(Self {
            range: MediaRange::new(type_, subtype),
            params,
        })
    }

    pub fn range(&self) -> &MediaRange {
        &self.range
    }

    pub fn type_(&self) -> &str {
        self.range.type_()
    }

    pub fn subtype(&self) -> &str {
        self.range.subtype()
    }

    /// Parameters with lowercase keys.
    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// The `q` weight, defaulting to `1.0` when absent.
    pub fn quality(&self) -> f32 {
        // Validated in `parse`.
        self.param("q")
            .and_then(|q| q.parse::<f32>().ok())
            .unwrap_or(1.0)
    }

    /// Drop the parameters.
    pub fn into_range(self) -> MediaRange {
        self.range
    }
}

impl FromStr for MediaType {
    type Err = MediaTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.range)?;
        for (key, value) in &self.params {
            write!(f, "; {}={}", key, value)?;
        }
        Ok(())
    }
}

fn parse_quality(value: &str, input: &str) -> Result<f32, MediaTypeError> {
    match value.parse::<f32>() {
        Ok(q) if (0.0..=1.0).contains(&q) => Ok(q),
        _ => Err(MediaTypeError::InvalidQuality {
            value: value.to_string(),
            input: input.to_string(),
        }),
    }
}
