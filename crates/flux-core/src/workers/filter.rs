//! FilterWorker - gates the chain with a predicate

use crate::action::Action;
use crate::composer::Composer;
use crate::worker::{Priority, Worker, WorkerToken};

type Predicate = Box<dyn Fn(&dyn Action) -> bool + Send + Sync>;

/// Continues the chain only for actions accepted by the predicate
///
/// Workers with a higher priority value than the filter never see rejected
/// actions; workers before it are unaffected.
pub struct FilterWorker {
    token: WorkerToken,
    priority: Priority,
    predicate: Predicate,
}

impl FilterWorker {
    pub fn new<F>(priority: Priority, predicate: F) -> Self
    where
        F: Fn(&dyn Action) -> bool + Send + Sync + 'static,
    {
        Self {
            token: WorkerToken::next(),
            priority,
            predicate: Box::new(predicate),
        }
    }

    /// Filter that drops every action of kind `A`
    pub fn block<A: Action>(priority: Priority) -> Self {
        Self::new(priority, |action| !action.is::<A>())
    }
}

impl Worker for FilterWorker {
    fn token(&self) -> WorkerToken {
        self.token
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn handle(&self, action: &dyn Action, composer: Composer<'_>) {
        if (self.predicate)(action) {
            composer.next(action);
        } else {
            log::trace!("{} stopped {}", self.token, action.kind());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Dispatcher, Store};
    use std::sync::Arc;

    #[derive(Debug)]
    struct Increment;

    #[derive(Debug)]
    struct Secret;

    #[test]
    fn test_filter_blocks_kind_for_later_workers() {
        let store = Arc::new(Store::new("hits", 10, 0_u32));
        store.register_reducer(|hits: &mut u32, _: &Increment| {
            *hits += 1;
            true
        });
        store.register_reducer(|hits: &mut u32, _: &Secret| {
            *hits += 100;
            true
        });

        let mut dispatcher = Dispatcher::new();
        dispatcher.register_worker(Arc::new(FilterWorker::block::<Secret>(0)));
        dispatcher.register_worker(Arc::clone(&store));

        dispatcher.dispatch(&Increment);
        dispatcher.dispatch(&Secret);
        dispatcher.dispatch(&Increment);

        assert_eq!(store.get_state(), 2);
    }

    #[test]
    fn test_filter_does_not_affect_earlier_workers() {
        let early = Arc::new(Store::new("early", -1, 0_u32));
        early.register_reducer(|n: &mut u32, _: &Secret| {
            *n += 1;
            true
        });

        let mut dispatcher = Dispatcher::new();
        dispatcher.register_worker(Arc::new(FilterWorker::new(0, |_| false)));
        dispatcher.register_worker(Arc::clone(&early));

        dispatcher.dispatch(&Secret);

        assert_eq!(early.get_state(), 1);
    }
}
