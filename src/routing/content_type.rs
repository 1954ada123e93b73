//! Dispatch by request entity media type.
//!
//! # Resolution Order
//! 1. Exact `type/subtype` (parameters ignored)
//! 2. Registered `type/*` with the same type
//! 3. Registered `*/*`
//! 4. 415 Unsupported Media Type
//!
//! # Design Decisions
//! - Keys are parsed once, at registration, into one of three tables
//! - A header that fails to parse is looked up verbatim in the exact table
//!   and skips the `type/*` step; `*/*` still applies
//! - An unparseable key is kept verbatim, so `""` can route requests that
//!   carry no `Content-Type` at all

use std::collections::HashMap;
use std::fmt;

use axum::body::Body;
use axum::http::{header, Request, Response};

use crate::media::{MediaRange, MediaType};
use crate::observability::metrics;
use crate::routing::handler::{boxed, BoxHandler, Handler};
use crate::routing::Rejection;

/// Routes requests to handlers keyed by `Content-Type` pattern.
#[derive(Default)]
pub struct ContentTypeRouter {
    exact: HashMap<String, BoxHandler>,
    by_type: HashMap<String, BoxHandler>,
    any: Option<BoxHandler>,
}

impl ContentTypeRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for a pattern: `type/subtype`, `type/*` or `*/*`.
    pub fn route(mut self, pattern: impl AsRef<str>, handler: impl Handler + 'static) -> Self {
        let pattern = pattern.as_ref();
        let handler = boxed(handler);
        match pattern.parse::<MediaRange>() {
            Ok(range) if range.is_any() => self.any = Some(handler),
            Ok(range) if range.is_wildcard_subtype() => {
                self.by_type.insert(range.type_().to_string(), handler);
            }
            Ok(range) => {
                self.exact.insert(range.to_string(), handler);
            }
            Err(e) => {
                tracing::debug!(pattern = %pattern, error = %e, "Registering content type as opaque key");
                self.exact.insert(pattern.trim().to_string(), handler);
            }
        }
        self
    }

    fn resolve(&self, content_type: Option<&str>) -> Option<(&'static str, &BoxHandler)> {
        let parsed = content_type.map(|raw| (raw, MediaType::parse(raw)));

        match parsed {
            Some((_, Ok(mt))) => {
                let range = mt.range();
                if let Some(handler) = self.exact.get(&range.to_string()) {
                    return Some(("exact", handler));
                }
                if let Some(handler) = self.by_type.get(range.type_()) {
                    return Some(("type", handler));
                }
            }
            Some((raw, Err(e))) => {
                tracing::debug!(content_type = %raw, error = %e, "Unparseable content type, matching verbatim");
                if let Some(handler) = self.exact.get(raw.trim()) {
                    return Some(("exact", handler));
                }
            }
            None => {}
        }

        self.any.as_ref().map(|handler| ("any", handler))
    }
}

impl fmt::Debug for ContentTypeRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentTypeRouter")
            .field("exact", &self.exact.keys().collect::<Vec<_>>())
            .field("by_type", &self.by_type.keys().collect::<Vec<_>>())
            .field("any", &self.any.is_some())
            .finish()
    }
}

impl Handler for ContentTypeRouter {
    fn serve(&self, req: Request<Body>, res: &mut Response<Body>) {
        // A missing header reads as "", a non-UTF-8 one can only hit `*/*`.
        let content_type = match req.headers().get(header::CONTENT_TYPE) {
            Some(value) => value.to_str().ok(),
            None => Some(""),
        };

        match self.resolve(content_type) {
            Some((matched, handler)) => {
                tracing::debug!(router = "content_type", content_type = ?content_type, matched, "Route matched");
                metrics::record_dispatch("content_type", matched);
                handler.serve(req, res);
            }
            None => {
                tracing::debug!(router = "content_type", content_type = ?content_type, "No route for content type");
                metrics::record_dispatch("content_type", "rejected");
                Rejection::UnsupportedMediaType.write(res);
            }
        }
    }
}
