//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, Content-Type, Accept)
//!     → method.rs        (uppercase method → handler | 405 | implicit OPTIONS)
//!     → content_type.rs  (exact → type/* → */* | 415)
//!     → accept.rs        (sorted Accept clauses × registered types | 406)
//!     → handler.rs       (any Handler, including another router)
//!
//! Route Table Construction (at startup):
//!     Router::new().route(key, handler)...
//!     → keys normalized / parsed once
//!     → moved behind Arc, never mutated again
//! ```
//!
//! # Design Decisions
//! - Routers are handlers, so trees compose by plain nesting
//! - Tables are immutable once built (thread-safe without locks)
//! - Deterministic: same request and table always pick the same handler
//! - Misses become status codes on the response, never errors

pub mod accept;
pub mod content_type;
pub mod handler;
pub mod method;
pub mod rejection;

pub use accept::AcceptRouter;
pub use content_type::ContentTypeRouter;
pub use handler::{handler_fn, BoxHandler, Handler, HandlerFn};
pub use method::MethodRouter;
pub use rejection::Rejection;
