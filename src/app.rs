//! The dispatchable entry point produced by [`Router::handler`](crate::Router::handler).

use std::sync::Arc;

use http::StatusCode;

use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::table::{Lookup, Table};

/// A frozen route table, ready to serve.
///
/// Cheap to clone and safe to share between any number of concurrent
/// requests: every handler in it is already wrapped in its middleware, and
/// each request carries its own parameters.
#[derive(Clone)]
pub struct App {
    table: Arc<Table>,
}

impl App {
    pub(crate) fn new(table: Table) -> Self {
        Self { table: Arc::new(table) }
    }

    /// Routes one request and produces one response.
    pub async fn dispatch(&self, mut req: Request) -> Response {
        let method = Method::try_from(req.http_method()).ok();

        match self.table.lookup(method, req.path()) {
            Lookup::Found(handler, params) => {
                req.set_params(params);
                handler.call(req).await
            }
            Lookup::MethodNotAllowed(allowed) => match &self.table.method_not_allowed {
                Some(handler) => handler.call(req).await,
                None => {
                    let allow = allowed
                        .iter()
                        .map(|m| m.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    Response::builder()
                        .status(StatusCode::METHOD_NOT_ALLOWED)
                        .header("allow", &allow)
                        .no_body()
                }
            },
            Lookup::NotFound => match &self.table.not_found {
                Some(handler) => handler.call(req).await,
                None => Response::status(StatusCode::NOT_FOUND),
            },
        }
    }
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("App")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync + 'static>() {}

    #[test]
    fn app_is_shareable() {
        assert_send_sync::<App>();
    }
}
