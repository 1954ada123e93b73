//! Dispatch by the client's preferred response media type.
//!
//! # Algorithm
//! ```text
//! Accept header
//!     → AcceptClause::parse_sorted (malformed clauses dropped)
//!     → for each clause, in preference order:
//!           first registered type the clause accepts → handler
//!     → else registered */* → handler
//!     → else 406 Not Acceptable
//! ```
//!
//! # Design Decisions
//! - Clauses drive the outer loop, so the client's most preferred available
//!   type wins rather than the first type the server registered
//! - Registered types are scanned in registration order
//! - Route keys are parsed once at registration

use std::fmt;

use axum::body::Body;
use axum::http::{header, Request, Response};

use crate::media::{AcceptClause, MediaRange};
use crate::observability::metrics;
use crate::routing::handler::{boxed, BoxHandler, Handler};
use crate::routing::Rejection;

/// Routes requests to handlers keyed by producible response type.
#[derive(Default)]
pub struct AcceptRouter {
    routes: Vec<(MediaRange, BoxHandler)>,
}

impl AcceptRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` as the producer of `media_type`.
    ///
    /// Re-registering a type replaces the earlier handler in place. A key
    /// that is not of the form `type/subtype` can never be selected, so it is
    /// logged and ignored.
    pub fn route(mut self, media_type: impl AsRef<str>, handler: impl Handler + 'static) -> Self {
        let media_type = media_type.as_ref();
        let range = match media_type.parse::<MediaRange>() {
            Ok(range) => range,
            Err(e) => {
                tracing::warn!(media_type = %media_type, error = %e, "Ignoring unparseable accept route");
                return self;
            }
        };

        let handler = boxed(handler);
        match self.routes.iter_mut().find(|(existing, _)| *existing == range) {
            Some(slot) => slot.1 = handler,
            None => self.routes.push((range, handler)),
        }
        self
    }

    /// Registered types, in registration order.
    pub fn media_types(&self) -> impl Iterator<Item = &MediaRange> {
        self.routes.iter().map(|(range, _)| range)
    }

    /// The registered type that would answer an `Accept` header value.
    pub fn negotiate(&self, accept: &str) -> Option<&MediaRange> {
        self.select(accept).map(|(range, _)| range)
    }

    fn select(&self, accept: &str) -> Option<&(MediaRange, BoxHandler)> {
        let clauses = AcceptClause::parse_sorted(accept);

        clauses
            .iter()
            .find_map(|clause| self.routes.iter().find(|(range, _)| clause.accepts(range)))
            .or_else(|| self.routes.iter().find(|(range, _)| range.is_any()))
    }
}

impl fmt::Debug for AcceptRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AcceptRouter")
            .field("media_types", &self.media_types().collect::<Vec<_>>())
            .finish()
    }
}

impl Handler for AcceptRouter {
    fn serve(&self, req: Request<Body>, res: &mut Response<Body>) {
        // Absent and non-UTF-8 headers both negotiate as an empty list.
        let accept = req
            .headers()
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();

        match self.select(&accept) {
            Some((range, handler)) => {
                tracing::debug!(router = "accept", accept = %accept, matched = %range, "Route matched");
                metrics::record_dispatch("accept", "matched");
                handler.serve(req, res);
            }
            None => {
                tracing::debug!(router = "accept", accept = %accept, "No acceptable media type");
                metrics::record_dispatch("accept", "rejected");
                Rejection::NotAcceptable.write(res);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::handler::testing::{dispatch, routed_to, tag};
    use axum::http::StatusCode;

    fn request(accept: &str) -> Request<Body> {
        Request::builder()
            .header(header::ACCEPT, accept)
            .body(Body::empty())
            .unwrap()
    }

    fn xml_json() -> AcceptRouter {
        AcceptRouter::new()
            .route("application/xml", tag("xml"))
            .route("application/json", tag("json"))
    }

    #[test]
    fn test_single_exact_clause() {
        let res = dispatch(&xml_json(), request("application/json"));
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(routed_to(&res), Some("json"));
    }

    #[test]
    fn test_highest_quality_wins_regardless_of_position() {
        let res = dispatch(
            &xml_json(),
            request("application/xml;q=0.5,application/json;q=0.8"),
        );
        assert_eq!(routed_to(&res), Some("json"));
    }

    #[test]
    fn test_wildcard_subtype_with_higher_quality() {
        let router = AcceptRouter::new()
            .route("text/html", tag("html"))
            .route("image/png", tag("png"));
        let res = dispatch(&router, request("text/html;q=0.5, image/*;q=1.0"));
        assert_eq!(routed_to(&res), Some("png"));
    }

    #[test]
    fn test_universal_clause_picks_first_registered() {
        let res = dispatch(&xml_json(), request("*/*"));
        assert_eq!(routed_to(&res), Some("xml"));
    }

    #[test]
    fn test_specific_beats_wildcard_at_equal_quality() {
        let res = dispatch(&xml_json(), request("*/*, application/json"));
        assert_eq!(routed_to(&res), Some("json"));
    }

    #[test]
    fn test_absent_header_falls_back_to_any() {
        let router = xml_json().route("*/*", tag("any"));
        let req = Request::builder().body(Body::empty()).unwrap();
        let res = dispatch(&router, req);
        assert_eq!(routed_to(&res), Some("any"));
    }

    #[test]
    fn test_absent_header_without_fallback_is_406() {
        let req = Request::builder().body(Body::empty()).unwrap();
        let res = dispatch(&xml_json(), req);
        assert_eq!(res.status(), StatusCode::NOT_ACCEPTABLE);
    }

    #[test]
    fn test_only_malformed_clauses() {
        let res = dispatch(&xml_json(), request("garbage, nonsense;q=1"));
        assert_eq!(res.status(), StatusCode::NOT_ACCEPTABLE);

        let router = xml_json().route("*/*", tag("any"));
        let res = dispatch(&router, request("garbage, nonsense;q=1"));
        assert_eq!(routed_to(&res), Some("any"));
    }

    #[test]
    fn test_unmatched_clause_falls_back_to_any() {
        let router = xml_json().route("*/*", tag("any"));
        let res = dispatch(&router, request("text/csv"));
        assert_eq!(routed_to(&res), Some("any"));
    }

    #[test]
    fn test_no_match_is_406() {
        let res = dispatch(&xml_json(), request("text/html, image/*"));
        assert_eq!(res.status(), StatusCode::NOT_ACCEPTABLE);
        assert_eq!(routed_to(&res), None);
    }

    #[test]
    fn test_registered_subtype_wildcard_needs_matching_clause() {
        let router = AcceptRouter::new().route("text/*", tag("text"));
        assert!(router.negotiate("text/plain").is_none());
        assert_eq!(
            router.negotiate("text/*").map(ToString::to_string),
            Some("text/*".to_string())
        );
    }

    #[test]
    fn test_negotiate() {
        let router = xml_json();
        assert_eq!(
            router.negotiate("application/*;q=0.2, application/json"),
            Some(&MediaRange::new("application", "json"))
        );
        assert_eq!(router.negotiate("text/plain"), None);
    }

    #[test]
    fn test_reregistering_replaces_in_place() {
        let router = xml_json().route("APPLICATION/XML", tag("xml2"));
        assert_eq!(router.media_types().count(), 2);
        let res = dispatch(&router, request("*/*"));
        assert_eq!(routed_to(&res), Some("xml2"));
    }

    #[test]
    fn test_unparseable_route_ignored() {
        let router = AcceptRouter::new().route("json", tag("json"));
        assert_eq!(router.media_types().count(), 0);
    }

    #[test]
    fn test_dispatch_is_idempotent() {
        let router = xml_json();
        let first = routed_to(&dispatch(&router, request("*/*"))).map(str::to_string);
        let second = routed_to(&dispatch(&router, request("*/*"))).map(str::to_string);
        assert_eq!(first, second);
    }
}
