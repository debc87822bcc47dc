//! Dispatcher - registry of workers and origin of every dispatch chain
//!
//! Workers are kept sorted by ascending priority. Workers with equal priority
//! keep the order in which they were registered.
//!
//! The dispatcher is not internally synchronized for mutation: `register` and
//! `unregister` take `&mut self`. A host sharing one dispatcher between
//! threads wraps it in a lock and may release that lock as soon as it has
//! taken a [`DispatchChain`] snapshot.

use crate::action::Action;
use crate::composer::Composer;
use crate::worker::{Worker, WorkerToken};
use crate::workers::LoggingWorker;
use flux_config::FluxConfig;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

type WorkerList = Vec<Arc<dyn Worker>>;

/// Priority-ordered collection of workers
#[derive(Default)]
pub struct Dispatcher {
    tokens: HashSet<WorkerToken>,
    // Copy-on-write: a live snapshot keeps the old list alive while
    // registration builds a new one.
    workers: Arc<WorkerList>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a dispatcher set up according to `config`
    ///
    /// Installs a [`LoggingWorker`] when `log_actions` is enabled.
    pub fn from_config(config: &FluxConfig) -> Self {
        let mut dispatcher = Self::new();
        if config.log_actions {
            dispatcher.register_worker(Arc::new(LoggingWorker::with_priority(
                config.logging_priority,
            )));
        }
        dispatcher
    }

    /// Register workers
    ///
    /// Workers whose token is already registered are skipped.
    pub fn register<I>(&mut self, workers: I)
    where
        I: IntoIterator<Item = Arc<dyn Worker>>,
    {
        for worker in workers {
            let token = worker.token();
            if !self.tokens.insert(token) {
                log::debug!("{} already registered, skipping", token);
                continue;
            }

            let priority = worker.priority();
            let list = Arc::make_mut(&mut self.workers);
            // Right-biased: equal priorities land after existing ones
            let index = list.partition_point(|existing| existing.priority() <= priority);
            list.insert(index, worker);
            log::debug!(
                "Registered {} with priority {} at position {}",
                token,
                priority,
                index
            );
        }
    }

    /// Register a single concrete worker and return its token
    pub fn register_worker<W: Worker + 'static>(&mut self, worker: Arc<W>) -> WorkerToken {
        let token = worker.token();
        self.register([worker as Arc<dyn Worker>]);
        token
    }

    /// Unregister workers by token
    ///
    /// Unknown tokens are ignored.
    pub fn unregister<I>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = WorkerToken>,
    {
        let mut removed = HashSet::new();
        for token in tokens {
            if self.tokens.remove(&token) {
                removed.insert(token);
            }
        }

        if removed.is_empty() {
            return;
        }

        Arc::make_mut(&mut self.workers).retain(|worker| !removed.contains(&worker.token()));
        log::debug!("Unregistered {} worker(s)", removed.len());
    }

    /// Dispatch an action through all registered workers
    ///
    /// Runs synchronously on the calling thread and returns once the chain
    /// has completed or a worker stopped it.
    pub fn dispatch(&self, action: &dyn Action) {
        self.snapshot().run(action);
    }

    /// Snapshot of the current worker order
    ///
    /// Registration changes made after this call do not affect the snapshot.
    pub fn snapshot(&self) -> DispatchChain {
        DispatchChain {
            workers: Arc::clone(&self.workers),
        }
    }

    pub fn contains(&self, token: WorkerToken) -> bool {
        self.tokens.contains(&token)
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// Registered tokens in dispatch order
    pub fn tokens(&self) -> Vec<WorkerToken> {
        self.workers.iter().map(|worker| worker.token()).collect()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("workers", &self.tokens())
            .finish()
    }
}

/// Immutable worker order captured at dispatch time
#[derive(Clone)]
pub struct DispatchChain {
    workers: Arc<WorkerList>,
}

impl DispatchChain {
    /// Run the chain for `action`
    pub fn run(&self, action: &dyn Action) {
        log::trace!(
            "Dispatching {} to {} worker(s)",
            action.kind(),
            self.workers.len()
        );
        Composer::new(&self.workers).next(action);
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::Priority;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;

    type Trace = Arc<Mutex<Vec<&'static str>>>;

    struct TestWorker {
        token: WorkerToken,
        priority: Priority,
        label: &'static str,
        forward: bool,
        trace: Trace,
    }

    impl Worker for TestWorker {
        fn token(&self) -> WorkerToken {
            self.token
        }

        fn priority(&self) -> Priority {
            self.priority
        }

        fn handle(&self, action: &dyn Action, composer: Composer<'_>) {
            self.trace.lock().unwrap().push(self.label);
            if self.forward {
                composer.next(action);
            }
        }
    }

    fn worker(label: &'static str, priority: Priority, trace: &Trace) -> Arc<TestWorker> {
        Arc::new(TestWorker {
            token: WorkerToken::next(),
            priority,
            label,
            forward: true,
            trace: Arc::clone(trace),
        })
    }

    fn gate(label: &'static str, priority: Priority, trace: &Trace) -> Arc<TestWorker> {
        Arc::new(TestWorker {
            token: WorkerToken::next(),
            priority,
            label,
            forward: false,
            trace: Arc::clone(trace),
        })
    }

    fn priorities(dispatcher: &Dispatcher) -> Vec<Priority> {
        dispatcher.workers.iter().map(|w| w.priority()).collect()
    }

    fn run(dispatcher: &Dispatcher, trace: &Trace) -> Vec<&'static str> {
        trace.lock().unwrap().clear();
        dispatcher.dispatch(&"any");
        trace.lock().unwrap().clone()
    }

    #[test]
    fn test_register_sorts_by_priority() {
        let trace = Trace::default();
        let mut dispatcher = Dispatcher::new();
        for (label, priority) in [("c", 30), ("a", -5), ("d", 100), ("b", 0), ("e", 30)] {
            dispatcher.register_worker(worker(label, priority, &trace));
        }

        assert_eq!(priorities(&dispatcher), vec![-5, 0, 30, 30, 100]);
        assert_eq!(run(&dispatcher, &trace), vec!["a", "b", "c", "e", "d"]);
    }

    #[test]
    fn test_equal_priorities_keep_insertion_order() {
        let trace = Trace::default();
        let mut dispatcher = Dispatcher::new();
        let x = worker("x", 5, &trace);
        let y = worker("y", 5, &trace);
        dispatcher.register([x as Arc<dyn Worker>, y as Arc<dyn Worker>]);
        dispatcher.register_worker(worker("z", 5, &trace));
        dispatcher.register_worker(worker("first", 1, &trace));

        assert_eq!(run(&dispatcher, &trace), vec!["first", "x", "y", "z"]);
    }

    #[test]
    fn test_register_twice_is_noop() {
        let trace = Trace::default();
        let mut dispatcher = Dispatcher::new();
        let a = worker("a", 1, &trace);
        let b = worker("b", 2, &trace);
        dispatcher.register_worker(Arc::clone(&a));
        dispatcher.register_worker(Arc::clone(&b));
        let before = dispatcher.tokens();

        dispatcher.register_worker(a);
        dispatcher.register([b as Arc<dyn Worker>]);

        assert_eq!(dispatcher.tokens(), before);
        assert_eq!(dispatcher.len(), 2);
    }

    #[test]
    fn test_unregister_removes_only_matching() {
        let trace = Trace::default();
        let mut dispatcher = Dispatcher::new();
        let tokens: Vec<WorkerToken> = [("a", 0), ("b", 1), ("c", 1), ("d", 2)]
            .into_iter()
            .map(|(label, priority)| dispatcher.register_worker(worker(label, priority, &trace)))
            .collect();

        dispatcher.unregister([tokens[1], WorkerToken::next()]);

        assert!(!dispatcher.contains(tokens[1]));
        assert!(dispatcher.contains(tokens[2]));
        assert_eq!(run(&dispatcher, &trace), vec!["a", "c", "d"]);
    }

    #[test]
    fn test_unregistered_worker_can_register_again() {
        let trace = Trace::default();
        let mut dispatcher = Dispatcher::new();
        let a = worker("a", 0, &trace);
        let token = dispatcher.register_worker(Arc::clone(&a));
        dispatcher.register_worker(worker("b", 0, &trace));

        dispatcher.unregister([token]);
        dispatcher.register_worker(a);

        assert_eq!(run(&dispatcher, &trace), vec!["b", "a"]);
    }

    #[test]
    fn test_worker_not_forwarding_halts_chain() {
        let trace = Trace::default();
        let mut dispatcher = Dispatcher::new();
        dispatcher.register_worker(worker("before", 0, &trace));
        dispatcher.register_worker(gate("gate", 1, &trace));
        dispatcher.register_worker(worker("after", 2, &trace));

        assert_eq!(run(&dispatcher, &trace), vec!["before", "gate"]);
    }

    #[test]
    fn test_snapshot_ignores_later_registration() {
        let trace = Trace::default();
        let mut dispatcher = Dispatcher::new();
        let a = dispatcher.register_worker(worker("a", 0, &trace));
        let chain = dispatcher.snapshot();

        dispatcher.register_worker(worker("b", 1, &trace));
        dispatcher.unregister([a]);

        chain.run(&"any");
        assert_eq!(*trace.lock().unwrap(), vec!["a"]);
        assert_eq!(chain.len(), 1);
        assert_eq!(dispatcher.len(), 1);
    }

    #[test]
    fn test_dispatch_on_empty_dispatcher() {
        let dispatcher = Dispatcher::new();
        assert!(dispatcher.is_empty());
        dispatcher.dispatch(&"nothing listens");
    }

    #[test]
    fn test_from_config_installs_logging_worker() {
        let config = FluxConfig {
            log_actions: true,
            logging_priority: -10,
            ..FluxConfig::default()
        };
        let dispatcher = Dispatcher::from_config(&config);
        assert_eq!(priorities(&dispatcher), vec![-10]);

        let quiet = Dispatcher::from_config(&FluxConfig::default());
        assert!(quiet.is_empty());
    }
}
