//! Per-request logging stage.

use std::time::Instant;

use tracing::info;

use super::{Middleware, from_fn};
use crate::handler::BoxedHandler;
use crate::request::Request;

/// Logs one `info` event per request once the inner handler has answered:
/// method, path, status and latency in microseconds.
///
/// Attach it at the root to cover every route and both fallbacks:
///
/// ```rust
/// use trellis::{Router, Routes, middleware};
///
/// let mut router = Router::new();
/// router.middleware(middleware::trace());
/// ```
pub fn trace() -> impl Middleware {
    from_fn(|req: Request, next: BoxedHandler| async move {
        let method = req.method().to_owned();
        let path = req.path().to_owned();
        let start = Instant::now();

        let res = next.call(req).await;

        let status = res.status_code();
        info!(
            %method,
            %path,
            status = status.as_u16(),
            latency_us = start.elapsed().as_micros() as u64,
            "{}",
            status.canonical_reason().unwrap_or("")
        );
        res
    })
}
