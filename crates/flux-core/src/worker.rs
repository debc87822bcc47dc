//! Worker contract for participants in the dispatch chain

use crate::action::Action;
use crate::composer::Composer;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Ordering key of a worker. Lower values are visited first.
pub type Priority = i32;

static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkerToken(u64);

impl WorkerToken {
    /// Allocate a fresh token
    pub fn next() -> Self {
        Self(NEXT_TOKEN.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WorkerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "worker#{}", self.0)
    }
}

/// Worker trait - anything that can receive a dispatched action
///
/// Workers are visited in ascending priority order. Each worker decides
/// whether the chain continues:
/// - call `composer.next(action)` to hand the action to the next worker
/// - return without calling it to stop propagation
///
/// # Example
///
/// ```rust
/// use flux_core::{Action, Composer, Priority, Worker, WorkerToken};
///
/// struct Tracer {
///     token: WorkerToken,
/// }
///
/// impl Worker for Tracer {
///     fn token(&self) -> WorkerToken {
///         self.token
///     }
///
///     fn priority(&self) -> Priority {
///         0
///     }
///
///     fn handle(&self, action: &dyn Action, composer: Composer<'_>) {
///         println!("saw {:?}", action);
///         composer.next(action);
///     }
/// }
/// ```
pub trait Worker: Send + Sync {
    /// Identity used for registration bookkeeping
    fn token(&self) -> WorkerToken;

    /// Position in the dispatch chain
    ///
    /// Must not change while the worker is registered.
    fn priority(&self) -> Priority;

    /// Handle an action and optionally continue the chain
    fn handle(&self, action: &dyn Action, composer: Composer<'_>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_unique() {
        let a = WorkerToken::next();
        let b = WorkerToken::next();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn test_token_display() {
        let token = WorkerToken::next();
        assert_eq!(token.to_string(), format!("worker#{}", token.as_u64()));
    }
}
