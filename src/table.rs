//! Radix-tree route table.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. The
//! table knows nothing about groups or middleware: it stores handlers that
//! are already wrapped, plus the two fallbacks.

use std::collections::HashMap;

use matchit::Router as MatchitRouter;

use crate::error::Error;
use crate::handler::BoxedHandler;
use crate::method::Method;
use crate::params::Params;
use crate::path;

#[derive(Clone, Default)]
pub(crate) struct Table {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    pub(crate) not_found: Option<BoxedHandler>,
    pub(crate) method_not_allowed: Option<BoxedHandler>,
}

/// Outcome of matching one request.
pub(crate) enum Lookup {
    Found(BoxedHandler, Params),
    /// The path exists under these other methods.
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Table {
    /// Binds `handler` to `method` + `path`. `path` may use `:name` / `*name`
    /// segments; at most one handler per (method, path).
    pub(crate) fn insert(
        &mut self,
        method: Method,
        path: &str,
        handler: BoxedHandler,
    ) -> Result<(), Error> {
        self.routes
            .entry(method)
            .or_default()
            .insert(path::to_matchit(path), handler)
            .map_err(|source| Error::Route { path: path.to_owned(), source })
    }

    /// `method` is `None` for methods outside [`Method`]; such requests can
    /// only ever end in one of the fallbacks.
    pub(crate) fn lookup(&self, method: Option<Method>, path: &str) -> Lookup {
        let found = method
            .and_then(|m| self.routes.get(&m))
            .and_then(|tree| tree.at(path).ok());
        if let Some(matched) = found {
            return Lookup::Found(matched.value.clone(), Params::from_match(&matched.params));
        }

        let allowed = self.allowed(path);
        if allowed.is_empty() {
            Lookup::NotFound
        } else {
            Lookup::MethodNotAllowed(allowed)
        }
    }

    /// Methods with a route matching `path`, in [`Method::ALL`] order.
    fn allowed(&self, path: &str) -> Vec<Method> {
        Method::ALL
            .into_iter()
            .filter(|m| {
                self.routes
                    .get(m)
                    .is_some_and(|tree| tree.at(path).is_ok())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Request, Response};

    fn handler() -> BoxedHandler {
        BoxedHandler::new(|_req: Request| async { Response::text("ok") })
    }

    #[test]
    fn duplicate_route_is_rejected() {
        let mut table = Table::default();
        table.insert(Method::Get, "/users/:id", handler()).unwrap();

        let err = table.insert(Method::Get, "/users/:id", handler()).unwrap_err();
        assert!(matches!(err, Error::Route { ref path, .. } if path == "/users/:id"));

        table.insert(Method::Post, "/users/:id", handler()).unwrap();
    }

    #[test]
    fn lookup_distinguishes_misses() {
        let mut table = Table::default();
        table.insert(Method::Get, "/users/:id", handler()).unwrap();
        table.insert(Method::Delete, "/users/:id", handler()).unwrap();

        match table.lookup(Some(Method::Get), "/users/7") {
            Lookup::Found(_, params) => assert_eq!(params.get("id"), Some("7")),
            _ => panic!("expected a match"),
        }
        match table.lookup(Some(Method::Put), "/users/7") {
            Lookup::MethodNotAllowed(allowed) => {
                assert_eq!(allowed, vec![Method::Get, Method::Delete]);
            }
            _ => panic!("expected method not allowed"),
        }
        assert!(matches!(table.lookup(None, "/users/7"), Lookup::MethodNotAllowed(_)));
        assert!(matches!(table.lookup(Some(Method::Get), "/nope"), Lookup::NotFound));
    }
}
