//! The root router.
//!
//! A [`Router`] is the root [`RouteGroup`] plus everything that only exists
//! once per router: the not-found and method-not-allowed fallbacks, static
//! content, and the event sink. Registration happens here and on groups;
//! [`Router::handler`] then freezes the table into an [`App`] for serving.

use std::rc::Rc;

use tracing::debug;

use crate::app::App;
use crate::event::Event;
use crate::group::{RouteGroup, Routes, Shared};
use crate::handler::Handler;
use crate::method::Method;
use crate::path;
use crate::request::Request;

/// The application router.
///
/// Build it once at startup, register routes on it and on its groups, then
/// pass [`handler()`](Router::handler) to [`Server::serve`](crate::Server::serve).
///
/// ```rust
/// use trellis::{Request, Response, Router, Routes, middleware};
///
/// async fn settings(_req: Request) -> Response {
///     Response::text("settings")
/// }
///
/// let mut router = Router::new();
/// router.middleware(middleware::trace());
///
/// let api = router.group("/api/v1");
/// api.get("/settings", settings);
///
/// let app = router.handler();
/// # drop(app);
/// ```
///
/// Registered paths are cleaned, so `/settings/` registers `/settings`.
/// Request paths are matched as sent: `/api/v1/settings/` is a `404` here,
/// and there is no trailing-slash redirect. Path parameters are handed to
/// handlers percent-decoded.
///
/// `handler()` takes a snapshot. Routes and fallbacks registered after the
/// call are not served by that `App`; call `handler()` again to pick them up.
pub struct Router {
    root: RouteGroup,
}

impl Router {
    pub fn new() -> Self {
        Self { root: RouteGroup::root(Shared::new()) }
    }

    /// Serves requests whose path matches no route.
    ///
    /// `handler` is wrapped in the root chain only: an unmatched request never
    /// passed through any group. Replaces any earlier not-found or
    /// [`static_root`](Router::static_root) handler.
    pub fn not_found(&self, handler: impl Handler) -> &Self {
        let wrapped = self.root.chain().then(handler);
        self.root.shared().borrow_mut().table.not_found = Some(wrapped);
        debug!("not-found handler set");
        Shared::emit(self.root.shared(), Event::NotFoundHandlerSet);
        self
    }

    /// Serves requests whose path matches a route registered under other
    /// methods only. Wrapped in the root chain.
    ///
    /// Without one, such requests get a bodiless `405` with an `Allow` header.
    pub fn method_not_allowed(&self, handler: impl Handler) -> &Self {
        let wrapped = self.root.chain().then(handler);
        self.root.shared().borrow_mut().table.method_not_allowed = Some(wrapped);
        debug!("method-not-allowed handler set");
        Shared::emit(self.root.shared(), Event::MethodNotAllowedHandlerSet);
        self
    }

    /// Serves static content for every path no route claims.
    ///
    /// An alias for [`not_found`](Router::not_found): the last of the two
    /// calls wins.
    pub fn static_root(&self, handler: impl Handler) -> &Self {
        self.not_found(handler)
    }

    /// Serves `handler` under `prefix` with the prefix stripped from the path.
    ///
    /// Registers GET for `prefix` itself and for everything below it, so
    /// with a prefix of `/assets` a request to `/assets/css/site.css` reaches
    /// `handler` as `/css/site.css`. Both routes are wrapped in the root
    /// chain like any other GET, and both are reported as
    /// [`Event::HandlerAdded`].
    ///
    /// # Panics
    ///
    /// Panics if either route conflicts with an existing one.
    pub fn static_files(&self, prefix: &str, handler: impl Handler) -> &Self {
        let prefix = path::join(self.root.path(), prefix);
        let inner = handler.into_boxed_handler();
        let strip = {
            let prefix = prefix.clone();
            move |mut req: Request| {
                req.strip_prefix(&prefix);
                let inner = inner.clone();
                async move { inner.call(req).await }
            }
        };

        self.root.route(Method::Get, &prefix, strip.clone());
        self.root.route(Method::Get, &format!("{prefix}/*filepath"), strip);
        self
    }

    /// Replaces the event sink. Only events emitted from now on reach it.
    pub fn event_handler(&self, sink: impl Fn(&Event) + 'static) -> &Self {
        self.root.shared().borrow_mut().sink = Rc::new(sink);
        self
    }

    /// Snapshots everything registered so far into a servable [`App`].
    ///
    /// Routes registered after this call do not show up in the returned
    /// `App`; call `handler()` again to pick them up.
    pub fn handler(&self) -> App {
        App::new(self.root.shared().borrow().table.clone())
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

impl Routes for Router {
    fn scope(&self) -> &RouteGroup { &self.root }
    fn scope_mut(&mut self) -> &mut RouteGroup { &mut self.root }
}
