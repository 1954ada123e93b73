//! Tower adapter for handlers.
//!
//! # Design Decisions
//! - Every request starts from an empty `200 OK` response
//! - Dispatch is synchronous, so the future is always ready
//! - The service never fails; misses are status codes

use std::convert::Infallible;
use std::future::{ready, Ready};
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::body::Body;
use axum::http::{Request, Response};
use tower::Service;

use crate::routing::Handler;

/// Serves a [`Handler`] as a `tower::Service`, for mounting in axum.
pub struct HandlerService<H: ?Sized> {
    handler: Arc<H>,
}

impl<H: Handler + 'static> HandlerService<H> {
    pub fn new(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }
}

impl<H: Handler + ?Sized> HandlerService<H> {
    pub fn from_shared(handler: Arc<H>) -> Self {
        Self { handler }
    }
}

impl<H: ?Sized> Clone for HandlerService<H> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H, B> Service<Request<B>> for HandlerService<H>
where
    H: Handler + ?Sized,
    B: axum::body::HttpBody<Data = axum::body::Bytes> + Send + 'static,
    B::Error: Into<axum::BoxError>,
{
    type Response = Response<Body>;
    type Error = Infallible;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let req = req.map(Body::new);
        let mut res = Response::new(Body::empty());
        self.handler.serve(req, &mut res);
        ready(Ok(res))
    }
}
