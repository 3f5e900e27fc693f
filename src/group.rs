//! Route groups and the registration surface shared with [`Router`](crate::Router).
//!
//! A group is a path prefix plus a middleware chain. Groups form a tree
//! rooted at the router: [`Routes::group`] creates a child whose prefix
//! extends the parent's and whose chain is a copy of the parent's chain at
//! that moment. Registering a route on any group composes the full prefix,
//! folds the group's chain around the handler and stores the result in the
//! router's table. Nothing group-related runs per request.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::chain::Chain;
use crate::error::Error;
use crate::event::Event;
use crate::handler::Handler;
use crate::method::Method;
use crate::middleware::Middleware;
use crate::path;
use crate::table::Table;

/// Callback notified of every registration.
pub(crate) type EventSink = Rc<dyn Fn(&Event)>;

/// State owned by one router and shared with all of its groups.
pub(crate) struct Shared {
    pub(crate) table: Table,
    pub(crate) sink: EventSink,
}

impl Shared {
    pub(crate) fn new() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            table: Table::default(),
            sink: Rc::new(|_: &Event| {}),
        }))
    }

    /// Hands `event` to the current sink. The table is not borrowed while
    /// the sink runs, so a sink may inspect or even extend the router.
    pub(crate) fn emit(this: &RefCell<Self>, event: Event) {
        let sink = Rc::clone(&this.borrow().sink);
        sink(&event);
    }
}

/// A prefix- and middleware-scoped registration context.
///
/// Obtained from [`Routes::group`] on a [`Router`](crate::Router) or on
/// another group. Groups are configuration-time values: they are not `Send`,
/// and they can be dropped once their routes are registered.
pub struct RouteGroup {
    prefix: String,
    chain: Chain,
    shared: Rc<RefCell<Shared>>,
}

impl RouteGroup {
    pub(crate) fn root(shared: Rc<RefCell<Shared>>) -> Self {
        Self { prefix: "/".to_owned(), chain: Chain::new(), shared }
    }

    pub(crate) fn shared(&self) -> &Rc<RefCell<Shared>> {
        &self.shared
    }

    fn fork(&self, relative: &str) -> Self {
        Self {
            prefix: path::join(&self.prefix, relative),
            chain: self.chain.clone(),
            shared: Rc::clone(&self.shared),
        }
    }

    fn register(&self, method: Method, relative: &str, handler: impl Handler) -> Result<(), Error> {
        let full = path::join(&self.prefix, relative);
        let wrapped = self.chain.then(handler);
        self.shared.borrow_mut().table.insert(method, &full, wrapped)?;

        debug!(%method, path = %full, stages = self.chain.len(), "handler added");
        Shared::emit(&self.shared, Event::HandlerAdded { method, path: full });
        Ok(())
    }
}

impl std::fmt::Debug for RouteGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteGroup")
            .field("prefix", &self.prefix)
            .field("chain", &self.chain)
            .finish()
    }
}

/// Registration operations shared by [`Router`](crate::Router) and
/// [`RouteGroup`].
///
/// Paths are relative to the receiver's prefix and cleaned after joining,
/// so leading and trailing slashes do not matter. Named parameters are
/// written `:name`, a trailing catch-all `*name`.
///
/// The per-method helpers panic when the path matcher rejects the route
/// (duplicate method + path, conflicting wildcard): that is a programming
/// error in start-up code. Use [`try_route`](Routes::try_route) to handle
/// it instead.
pub trait Routes {
    #[doc(hidden)]
    fn scope(&self) -> &RouteGroup;

    #[doc(hidden)]
    fn scope_mut(&mut self) -> &mut RouteGroup;

    /// Appends a middleware stage.
    ///
    /// Only routes registered afterwards on this group, and groups created
    /// from it afterwards, are wrapped by the new stage.
    fn middleware(&mut self, stage: impl Middleware) -> &mut Self {
        let scope = self.scope_mut();
        scope.chain = scope.chain.append(stage);
        self
    }

    /// The middleware chain routes registered now would be wrapped in.
    fn chain(&self) -> &Chain {
        &self.scope().chain
    }

    /// The fully composed, cleaned absolute prefix of this group.
    fn path(&self) -> &str {
        &self.scope().prefix
    }

    /// Creates a child group at `relative`, forking the current chain.
    fn group(&self, relative: &str) -> RouteGroup {
        self.scope().fork(relative)
    }

    /// Registers `handler` for `method` at `relative`, reporting a rejected
    /// route as [`Error::Route`].
    fn try_route(&self, method: Method, relative: &str, handler: impl Handler) -> Result<&Self, Error> {
        self.scope().register(method, relative, handler)?;
        Ok(self)
    }

    /// Registers `handler` for `method` at `relative`.
    ///
    /// # Panics
    ///
    /// Panics if the path matcher rejects the route.
    fn route(&self, method: Method, relative: &str, handler: impl Handler) -> &Self {
        if let Err(e) = self.scope().register(method, relative, handler) {
            panic!("{e}");
        }
        self
    }

    fn get(&self, relative: &str, handler: impl Handler) -> &Self {
        self.route(Method::Get, relative, handler)
    }

    fn post(&self, relative: &str, handler: impl Handler) -> &Self {
        self.route(Method::Post, relative, handler)
    }

    fn put(&self, relative: &str, handler: impl Handler) -> &Self {
        self.route(Method::Put, relative, handler)
    }

    fn patch(&self, relative: &str, handler: impl Handler) -> &Self {
        self.route(Method::Patch, relative, handler)
    }

    fn delete(&self, relative: &str, handler: impl Handler) -> &Self {
        self.route(Method::Delete, relative, handler)
    }

    fn head(&self, relative: &str, handler: impl Handler) -> &Self {
        self.route(Method::Head, relative, handler)
    }

    fn options(&self, relative: &str, handler: impl Handler) -> &Self {
        self.route(Method::Options, relative, handler)
    }
}

impl Routes for RouteGroup {
    fn scope(&self) -> &RouteGroup { self }
    fn scope_mut(&mut self) -> &mut RouteGroup { self }
}
