//! The handler capability every route points at.
//!
//! # Design Decisions
//! - One synchronous method; routers implement it too, so trees nest freely
//! - The request is moved into the handler, the response is borrowed
//! - Handlers are shared as `Arc<dyn Handler>` inside route tables

use std::fmt;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};

/// Something that can answer a request by writing to a response.
pub trait Handler: Send + Sync {
    /// Handle `req`, writing status, headers and body into `res`.
    ///
    /// `res` arrives as an empty `200 OK`.
    fn serve(&self, req: Request<Body>, res: &mut Response<Body>);
}

/// Shared, type-erased handler as stored in route tables.
pub type BoxHandler = Arc<dyn Handler>;

impl<H: Handler + ?Sized> Handler for Arc<H> {
    fn serve(&self, req: Request<Body>, res: &mut Response<Body>) {
        (**self).serve(req, res)
    }
}

impl<H: Handler + ?Sized> Handler for Box<H> {
    fn serve(&self, req: Request<Body>, res: &mut Response<Body>) {
        (**self).serve(req, res)
    }
}

/// Adapter returned by [`handler_fn`].
#[derive(Clone)]
pub struct HandlerFn<F> {
    f: F,
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

impl<F> Handler for HandlerFn<F>
where
    F: Fn(Request<Body>, &mut Response<Body>) + Send + Sync,
{
    fn serve(&self, req: Request<Body>, res: &mut Response<Body>) {
        (self.f)(req, res)
    }
}

/// Turn a closure into a [`Handler`].
pub fn handler_fn<F>(f: F) -> HandlerFn<F>
where
    F: Fn(Request<Body>, &mut Response<Body>) + Send + Sync,
{
    HandlerFn { f }
}

/// Erase a handler into the shared form used by route tables.
pub(crate) fn boxed(handler: impl Handler + 'static) -> BoxHandler {
    Arc::new(handler)
}
