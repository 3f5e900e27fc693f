//! Ordered middleware pipeline.

use std::fmt;
use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler};
use crate::middleware::Middleware;

/// An ordered sequence of middleware stages.
///
/// A `Chain` is a value: [`append`](Chain::append) returns a new chain and
/// leaves the receiver untouched, so a group that forked a copy never sees
/// stages added to its parent afterwards. Stages themselves are shared
/// between copies.
#[derive(Clone, Default)]
pub struct Chain {
    stages: Vec<Arc<dyn Middleware>>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a chain with `stage` placed after every existing stage.
    pub fn append(&self, stage: impl Middleware) -> Self {
        let mut stages = Vec::with_capacity(self.stages.len() + 1);
        stages.extend(self.stages.iter().cloned());
        stages.push(Arc::new(stage));
        Self { stages }
    }

    /// Folds every stage around `handler`.
    ///
    /// The first appended stage ends up outermost: it sees the request first
    /// and the response last, and may answer without calling the rest.
    pub fn then(&self, handler: impl Handler) -> BoxedHandler {
        self.stages
            .iter()
            .rev()
            .fold(handler.into_boxed_handler(), |next, stage| stage.wrap(next))
    }

    pub fn len(&self) -> usize { self.stages.len() }
    pub fn is_empty(&self) -> bool { self.stages.is_empty() }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("stages", &self.stages.len()).finish()
    }
}
