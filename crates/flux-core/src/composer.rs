//! Composer - per-dispatch cursor over the worker chain
//!
//! ```text
//! Dispatcher::dispatch(action)
//!     └─> Composer [w0, w1, w2]
//!           └─> w0.handle(action, Composer [w1, w2])
//!                 └─> composer.next(action)
//!                       └─> w1.handle(action, Composer [w2])
//! ```
//!
//! The composer borrows an immutable snapshot of the registered workers and
//! is consumed by [`Composer::next`], so a worker can resume the chain at most
//! once. Dropping it without calling `next` halts propagation.

use crate::action::Action;
use crate::worker::Worker;
use std::fmt;
use std::sync::Arc;

/// Remaining suffix of the worker chain for one dispatch
pub struct Composer<'a> {
    remaining: &'a [Arc<dyn Worker>],
}

impl<'a> Composer<'a> {
    pub(crate) fn new(workers: &'a [Arc<dyn Worker>]) -> Self {
        Self { remaining: workers }
    }

    /// Hand the action to the next worker, if any
    pub fn next(self, action: &dyn Action) {
        if let Some((head, rest)) = self.remaining.split_first() {
            log::trace!("{} handling {:?}", head.token(), action.kind());
            head.handle(action, Composer { remaining: rest });
        }
    }

    /// Number of workers not yet visited
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining.is_empty()
    }
}

impl fmt::Debug for Composer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.remaining.iter().map(|w| w.token()))
            .finish()
    }
}
