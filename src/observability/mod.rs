//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Routers produce:
//!     → tracing events (router, matched, method/content_type/accept)
//!     → metrics.rs (dispatch outcome counters)
//!
//! Binary consumes:
//!     → logging.rs (fmt or JSON subscriber on stdout)
//!     → metrics.rs (optional Prometheus scrape endpoint)
//! ```
//!
//! # Design Decisions
//! - The library only emits; installing subscribers/recorders is the binary's job
//! - Without a recorder, metric calls are no-ops

pub mod logging;
pub mod metrics;
