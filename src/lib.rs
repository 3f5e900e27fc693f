//! # trellis
//!
//! Route groups, ordered middleware chains and registration events on top
//! of a radix-tree router.
//!
//! - Groups compose path prefixes hierarchically: `/api` → `/v1` → `/users`.
//! - Each group carries a middleware [`Chain`]. A child group forks a copy of
//!   its parent's chain when it is created; stages added later to the parent
//!   do not leak into it.
//! - Handlers are wrapped in their group's chain when they are registered, so
//!   at request time the matcher finds one ready-to-run handler.
//! - Every registration fires an [`Event`] at the router's event sink.
//!
//! Matching is done by [`matchit`]; the transport is hyper on tokio, with
//! graceful shutdown.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use trellis::{Request, Response, Router, Routes, Server, StatusCode, middleware};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), trellis::Error> {
//!     let mut router = Router::new();
//!     router.middleware(middleware::trace());
//!     router.not_found(|_req: Request| async { StatusCode::NOT_FOUND });
//!
//!     let api = router.group("/api/v1");
//!     api.get("/users/:id", get_user)
//!         .post("/users", create_user);
//!
//!     Server::bind("0.0.0.0:3000")?.serve(router.handler()).await
//! }
//!
//! async fn get_user(req: Request) -> Response {
//!     let id = req.param("id").unwrap_or("unknown");
//!     Response::json(format!(r#"{{"id":"{id}"}}"#))
//! }
//!
//! async fn create_user(req: Request) -> Response {
//!     if req.body().is_empty() {
//!         return Response::status(StatusCode::BAD_REQUEST);
//!     }
//!     Response::builder()
//!         .status(StatusCode::CREATED)
//!         .header("location", "/users/99")
//!         .json(r#"{"id":"99"}"#)
//! }
//! ```

mod app;
mod chain;
mod error;
mod event;
mod fs;
mod group;
mod handler;
mod method;
mod params;
mod path;
mod request;
mod response;
mod router;
mod server;
mod table;

pub mod middleware;

pub use app::App;
pub use chain::Chain;
pub use error::Error;
pub use event::Event;
pub use fs::ServeDir;
pub use group::{RouteGroup, Routes};
pub use handler::{BoxFuture, BoxedHandler, Handler};
pub use http::StatusCode;
pub use method::Method;
pub use middleware::Middleware;
pub use params::Params;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
