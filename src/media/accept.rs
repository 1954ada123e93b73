//! `Accept` header parsing and preference ordering.
//!
//! # Ordering
//! Clauses are ordered by a total preference relation:
//! 1. higher quality first
//! 2. concrete type before `*`
//! 3. concrete subtype before `*`
//! 4. earlier position in the header
//!
//! The last rule falls out of using a stable sort.

use std::cmp::Ordering;

use crate::media::{MediaRange, MediaType};

/// One weighted media range from an `Accept` header.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptClause {
    pub range: MediaRange,
    pub quality: f32,
}

impl AcceptClause {
    pub fn new(range: MediaRange, quality: f32) -> Self {
        Self { range, quality }
    }

    /// Parse one comma-separated segment.
    pub fn parse(segment: &str) -> Option<Self> {
        match MediaType::parse(segment) {
            Ok(mt) => {
                let quality = mt.quality();
                Some(Self::new(mt.into_range(), quality))
            }
            Err(e) => {
                tracing::trace!(segment = %segment, error = %e, "Dropping malformed accept clause");
                None
            }
        }
    }

    /// Parse a whole header value, keeping header order.
    ///
    /// Malformed segments are skipped, so the result may be empty.
    pub fn parse_list(header: &str) -> Vec<Self> {
        let header = header.trim();
        if header.is_empty() {
            return Vec::new();
        }
        header
            .split(',')
            .filter(|segment| !segment.trim().is_empty())
            .filter_map(Self::parse)
            .collect()
    }

    /// Parse a header and sort it by [`preference`].
    pub fn parse_sorted(header: &str) -> Vec<Self> {
        let mut clauses = Self::parse_list(header);
        clauses.sort_by(preference);
        clauses
    }

    /// Whether this clause accepts a producible `route` type.
    ///
    /// Matches on exact equality, on `type/*` with the same type, or on `*/*`.
    pub fn accepts(&self, route: &MediaRange) -> bool {
        let exact = self.range == *route;
        let subtype_wildcard =
            self.range.is_wildcard_subtype() && self.range.type_() == route.type_();
        exact || subtype_wildcard || self.range.is_any()
    }
}

/// Preference order over clauses; `Less` means "preferred".
pub fn preference(a: &AcceptClause, b: &AcceptClause) -> Ordering {
    b.quality
        .total_cmp(&a.quality)
        .then_with(|| a.range.is_wildcard_type().cmp(&b.range.is_wildcard_type()))
        .then_with(|| {
            a.range
                .is_wildcard_subtype()
                .cmp(&b.range.is_wildcard_subtype())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn essences(clauses: &[AcceptClause]) -> Vec<String> {
        clauses.iter().map(|c| c.range.to_string()).collect()
    }

    #[test]
    fn test_parse_list_defaults_quality() {
        let clauses = AcceptClause::parse_list("application/json, text/html;q=0.9");
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[0].quality, 1.0);
        assert_eq!(clauses[1].quality, 0.9);
    }

    #[test]
    fn test_parse_list_empty() {
        assert!(AcceptClause::parse_list("").is_empty());
        assert!(AcceptClause::parse_list("   ").is_empty());
        assert!(AcceptClause::parse_list(" , ,").is_empty());
    }

    #[test]
    fn test_parse_list_drops_malformed() {
        let clauses =
            AcceptClause::parse_list("garbage, text/html;q=nope, application/json, a/b/c");
        assert_eq!(essences(&clauses), vec!["application/json"]);

        assert!(AcceptClause::parse_list("foo, bar;q=1").is_empty());
    }

    #[test]
    fn test_sort_by_quality() {
        let clauses = AcceptClause::parse_sorted("application/xml;q=0.5,application/json;q=0.8");
        assert_eq!(essences(&clauses), vec!["application/json", "application/xml"]);
    }

    #[test]
    fn test_sort_by_specificity_at_equal_quality() {
        let clauses = AcceptClause::parse_sorted("*/*, text/*, text/html");
        assert_eq!(essences(&clauses), vec!["text/html", "text/*", "*/*"]);
    }

    #[test]
    fn test_sort_wildcard_with_higher_quality_first() {
        let clauses = AcceptClause::parse_sorted("image/png;q=0.5, image/*;q=1.0");
        assert_eq!(essences(&clauses), vec!["image/*", "image/png"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_rank() {
        let clauses = AcceptClause::parse_sorted("text/html, application/json, text/plain");
        assert_eq!(
            essences(&clauses),
            vec!["text/html", "application/json", "text/plain"]
        );
    }

    #[test]
    fn test_zero_quality_sorts_last() {
        let clauses = AcceptClause::parse_sorted("text/html;q=0, */*;q=0.1");
        assert_eq!(essences(&clauses), vec!["*/*", "text/html"]);
    }

    #[test]
    fn test_accepts() {
        let json = MediaRange::new("application", "json");
        let html = MediaRange::new("text", "html");

        let exact = AcceptClause::new(json.clone(), 1.0);
        assert!(exact.accepts(&json));
        assert!(!exact.accepts(&html));

        let app = AcceptClause::new(MediaRange::new("application", "*"), 1.0);
        assert!(app.accepts(&json));
        assert!(!app.accepts(&html));

        let any = AcceptClause::new(MediaRange::any(), 1.0);
        assert!(any.accepts(&json));
        assert!(any.accepts(&html));
    }

    #[test]
    fn test_preference_is_total() {
        let a = AcceptClause::new(MediaRange::new("text", "html"), 0.5);
        let b = AcceptClause::new(MediaRange::new("text", "*"), 0.5);
        assert_eq!(preference(&a, &b), Ordering::Less);
        assert_eq!(preference(&b, &a), Ordering::Greater);
        assert_eq!(preference(&a, &a), Ordering::Equal);
    }
}
