//! LoggingWorker - logs all actions for debugging

use crate::action::Action;
use crate::composer::Composer;
use crate::worker::{Priority, Worker, WorkerToken};

/// LoggingWorker - logs every action that passes through the chain
///
/// Registered with the lowest priority by default so it sees each action
/// before any store does. Always continues the chain.
pub struct LoggingWorker {
    token: WorkerToken,
    priority: Priority,
}

impl LoggingWorker {
    pub fn new() -> Self {
        Self::with_priority(Priority::MIN)
    }

    pub fn with_priority(priority: Priority) -> Self {
        Self {
            token: WorkerToken::next(),
            priority,
        }
    }
}

impl Default for LoggingWorker {
    fn default() -> Self {
        Self::new()
    }
}

impl Worker for LoggingWorker {
    fn token(&self) -> WorkerToken {
        self.token
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn handle(&self, action: &dyn Action, composer: Composer<'_>) {
        log::debug!("Action: {:?}", action);
        composer.next(action);
    }
}
