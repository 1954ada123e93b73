//! Dispatch by request method.
//!
//! # Responsibilities
//! - Route on the uppercased request method (exact match)
//! - Advertise registered methods on a miss
//! - Answer `OPTIONS` implicitly unless a handler is registered for it
//!
//! # Design Decisions
//! - Methods are normalized to uppercase on registration and on dispatch
//! - The advertised list lives in the `Accept` header by default; existing
//!   clients read it there. `advertise_with(header::ALLOW)` opts into `Allow`
//! - BTreeMap keeps the advertised list sorted without extra work

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use axum::body::Body;
use axum::http::{header, HeaderName, HeaderValue, Request, Response};

use crate::observability::metrics;
use crate::routing::handler::{boxed, BoxHandler, Handler};
use crate::routing::Rejection;

const OPTIONS: &str = "OPTIONS";

/// Routes requests to handlers keyed by HTTP method.
pub struct MethodRouter {
    routes: BTreeMap<String, BoxHandler>,
    advertise: HeaderName,
}

impl MethodRouter {
    pub fn new() -> Self {
        Self {
            routes: BTreeMap::new(),
            advertise: header::ACCEPT,
        }
    }

    /// Register `handler` for `method`. Re-registering a method replaces it.
    pub fn route(mut self, method: impl AsRef<str>, handler: impl Handler + 'static) -> Self {
        let method = method.as_ref().trim().to_ascii_uppercase();
        self.routes.insert(method, boxed(handler));
        self
    }

    /// Name of the header carrying the allowed methods on a miss.
    pub fn advertise_with(mut self, header: HeaderName) -> Self {
        self.advertise = header;
        self
    }

    /// Registered methods, sorted.
    pub fn methods(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    /// Registered methods plus `OPTIONS`, sorted and comma-joined.
    pub fn allowed(&self) -> String {
        self.methods()
            .chain(std::iter::once(OPTIONS))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for MethodRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MethodRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MethodRouter")
            .field("methods", &self.routes.keys().collect::<Vec<_>>())
            .field("advertise", &self.advertise)
            .finish()
    }
}

impl Handler for MethodRouter {
    fn serve(&self, req: Request<Body>, res: &mut Response<Body>) {
        let method = req.method().as_str().to_ascii_uppercase();

        if let Some(handler) = self.routes.get(&method) {
            tracing::debug!(router = "method", method = %method, "Route matched");
            metrics::record_dispatch("method", "matched");
            handler.serve(req, res);
            return;
        }

        let allowed = self.allowed();
        match HeaderValue::from_str(&allowed) {
            Ok(value) => {
                res.headers_mut().insert(self.advertise.clone(), value);
            }
            Err(e) => {
                tracing::warn!(allowed = %allowed, error = %e, "Registered methods are not a valid header value");
            }
        }

        if method == OPTIONS {
            tracing::debug!(router = "method", allowed = %allowed, "Answering OPTIONS");
            metrics::record_dispatch("method", "options");
            return;
        }

        tracing::debug!(router = "method", method = %method, allowed = %allowed, "No route for method");
        metrics::record_dispatch("method", "rejected");
        Rejection::UnroutableMethod.write(res);
    }
}
