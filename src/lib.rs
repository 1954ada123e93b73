//! Request routers that dispatch on method, `Content-Type` and `Accept`.
//!
//! Every router is a [`Handler`], so trees nest:
//!
//! ```
//! use request_mux::{AcceptRouter, ContentTypeRouter, MethodRouter, handler_fn};
//! use axum::body::Body;
//! use axum::http::Response;
//!
//! let noop = || handler_fn(|_req, _res: &mut Response<Body>| {});
//!
//! let items = MethodRouter::new()
//!     .route("GET", AcceptRouter::new()
//!         .route("application/xml", noop())
//!         .route("application/json", noop()))
//!     .route("PUT", ContentTypeRouter::new()
//!         .route("application/xml", noop())
//!         .route("application/json", noop()));
//! # let _ = items;
//! ```

pub mod config;
pub mod demo;
pub mod http;
pub mod media;
pub mod observability;
pub mod routing;

pub use config::ServerConfig;
pub use http::{HandlerService, HttpServer};
pub use media::{AcceptClause, MediaRange, MediaType, MediaTypeError};
pub use routing::{
    handler_fn, AcceptRouter, BoxHandler, ContentTypeRouter, Handler, MethodRouter, Rejection,
};
