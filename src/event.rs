//! Registration events.
//!
//! Events fire while the router is being configured, synchronously, once
//! per registration call. They are mostly a debugging aid: print the route
//! table at start-up, or assert on it in tests.

use crate::method::Method;

/// Something was registered on a [`Router`](crate::Router) or one of its groups.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Event {
    /// A handler was bound to `method` at the fully qualified `path`.
    HandlerAdded { method: Method, path: String },
    /// The fallback for unmatched paths was installed or replaced.
    NotFoundHandlerSet,
    /// The fallback for matched paths with an unregistered method was
    /// installed or replaced.
    MethodNotAllowedHandlerSet,
}
