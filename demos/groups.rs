//! Nested groups, per-group middleware and static content.
//!
//! Run with:
//!   cargo run --example groups
//!
//! Try:
//!   curl -H 'x-client: curl' http://localhost:3000/api/v1/settings
//!   curl -H 'x-client: curl' http://localhost:3000/api/v1/apps/7/clients/users/42/info
//!   curl -X DELETE http://localhost:3000/api/v1/settings     → 405, allow: GET
//!   curl http://localhost:3000/assets/Cargo.toml             → served from ./
//!   curl http://localhost:3000/nothing-here                  → custom 404

use trellis::{
    BoxedHandler, Event, Request, Response, Router, Routes, ServeDir, Server, StatusCode,
    middleware,
};

#[tokio::main]
async fn main() -> Result<(), trellis::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut router = Router::new();
    router.event_handler(|event: &Event| println!("registered: {event:?}"));
    router.middleware(middleware::trace());
    router.not_found(|req: Request| async move {
        Response::builder()
            .status(StatusCode::NOT_FOUND)
            .text(format!("nothing at {}", req.path()))
    });

    let mut api = router.group("/api/v1");
    api.middleware(middleware::from_fn(require_client_header));
    api.get("/settings", settings);

    let clients = api.group("/apps/:app").group("/clients");
    clients.get("/users/:userid/info", user_info);

    router.static_files("/assets", ServeDir::new("."));

    Server::bind("0.0.0.0:3000")?.serve(router.handler()).await
}

// Rejects API calls without an `x-client` header.
async fn require_client_header(req: Request, next: BoxedHandler) -> Response {
    if req.header("x-client").is_none() {
        return Response::builder()
            .status(StatusCode::BAD_REQUEST)
            .text("missing x-client header");
    }
    next.call(req).await
}

async fn settings(_req: Request) -> Response {
    Response::json(r#"{"theme":"dark"}"#)
}

async fn user_info(req: Request) -> Response {
    let app = req.param("app").unwrap_or("?");
    let user = req.param("userid").unwrap_or("?");
    Response::json(format!(r#"{{"app":"{app}","user":"{user}"}}"#))
}
