//! Dispatch misses, expressed as HTTP statuses.

use axum::body::Body;
use axum::http::{Response, StatusCode};
use thiserror::Error;

/// Why a router could not hand a request to any of its handlers.
///
/// Rejections never cross the dispatch boundary as errors; they are written
/// to the response as a status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// No handler for the request method.
    #[error("method not allowed")]
    UnroutableMethod,

    /// No handler for the request entity's media type.
    #[error("unsupported request media type")]
    UnsupportedMediaType,

    /// No handler produces a type the client accepts.
    #[error("no acceptable response media type")]
    NotAcceptable,
}

impl Rejection {
    pub fn status(self) -> StatusCode {
        match self {
            Rejection::UnroutableMethod => StatusCode::METHOD_NOT_ALLOWED,
            Rejection::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Rejection::NotAcceptable => StatusCode::NOT_ACCEPTABLE,
        }
    }

    /// Write the status onto `res`, leaving headers and body untouched.
    pub fn write(self, res: &mut Response<Body>) {
        *res.status_mut() = self.status();
    }
}
