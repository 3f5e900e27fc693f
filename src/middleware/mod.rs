//! Middleware layer.
//!
//! A middleware stage turns the "next" handler into a new handler. Stages are
//! the place for cross-cutting concerns: structured tracing, request-id
//! injection, authentication-header inspection, panic recovery. They are
//! attached to a router or group with [`Routes::middleware`](crate::Routes::middleware)
//! and composed by a [`Chain`](crate::Chain) when a route is registered.
//!
//! Two ways to write one:
//!
//! ```rust
//! use trellis::{BoxedHandler, Request, Response, StatusCode};
//! use trellis::middleware::{self, Middleware};
//!
//! // 1. A plain function from handler to handler.
//! fn deny_all(_next: BoxedHandler) -> BoxedHandler {
//!     BoxedHandler::new(|_req: Request| async { StatusCode::FORBIDDEN })
//! }
//!
//! // 2. An async closure that decides whether and how to call `next`.
//! let auth = middleware::from_fn(|req: Request, next: BoxedHandler| async move {
//!     if req.header("authorization").is_none() {
//!         return Response::status(StatusCode::UNAUTHORIZED);
//!     }
//!     next.call(req).await
//! });
//! # fn assert_middleware(_: impl Middleware) {}
//! # assert_middleware(deny_all);
//! # assert_middleware(auth);
//! ```

mod trace;

pub use trace::trace;

use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler};
use crate::request::Request;
use crate::response::IntoResponse;

/// A transformation from the next handler to a handler.
///
/// Implemented for any `Fn(BoxedHandler) -> BoxedHandler` and for the
/// stages built by [`from_fn`].
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

impl<F> Middleware for F
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        self(next)
    }
}

/// Builds a stage from an async closure receiving the request and the next
/// handler. The closure may skip `next` entirely to short-circuit.
pub fn from_fn<F, Fut, R>(f: F) -> FromFn<F>
where
    F: Fn(Request, BoxedHandler) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    FromFn(Arc::new(f))
}

/// Stage returned by [`from_fn`].
pub struct FromFn<F>(Arc<F>);

impl<F, Fut, R> Middleware for FromFn<F>
where
    F: Fn(Request, BoxedHandler) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        BoxedHandler::from_erased(Stage { f: Arc::clone(&self.0), next })
    }
}

struct Stage<F> {
    f: Arc<F>,
    next: BoxedHandler,
}

impl<F, Fut, R> ErasedHandler for Stage<F>
where
    F: Fn(Request, BoxedHandler) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.f)(req, self.next.clone());
        Box::pin(async move { fut.await.into_response() })
    }
}
