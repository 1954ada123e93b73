//! HTTP integration subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, tracing, timeouts)
//!     → service.rs (tower Service around a Handler)
//!     → routing tree (method / content type / accept)
//!     → Send to client
//! ```

pub mod server;
pub mod service;

pub use server::HttpServer;
pub use service::HandlerService;
