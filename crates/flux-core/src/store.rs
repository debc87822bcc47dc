//! Store - a worker owning one typed state value
//!
//! ```text
//! Composer ─> Store::handle(action)
//!               ├─ reducer for action kind?  ── no ──┐
//!               │     yes                           │
//!               ├─ draft = state.clone()            │
//!               ├─ changed = reducer(&mut draft)    │
//!               ├─ changed? commit draft            │
//!               └─ composer.next(action) <──────────┘
//! ```
//!
//! State is guarded by a reader-writer lock: readers get a clone, writers are
//! exclusive. The reducer runs on a draft while the write lock is held, so
//! overlapping dispatches from different threads never lose an update.
//! Reducers and will-change observers must not call back into the same store.

use crate::action::{Action, ActionKind};
use crate::composer::Composer;
use crate::notification::{change_channel, ChangeReceiver, ChangeSender, StateChanged};
use crate::worker::{Priority, Worker, WorkerToken};
use flux_config::FluxConfig;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockWriteGuard};

type Reducer<S> = Arc<dyn Fn(&mut S, &dyn Action) -> bool + Send + Sync>;
type WillChange<S> = Arc<dyn Fn(&S, &S) + Send + Sync>;

struct Slot<S> {
    value: S,
    revision: u64,
}

/// Typed state container that reacts to dispatched actions
pub struct Store<S> {
    token: WorkerToken,
    name: Arc<str>,
    priority: Priority,
    state: RwLock<Slot<S>>,
    reducers: RwLock<HashMap<ActionKind, Reducer<S>>>,
    will_change: RwLock<Vec<WillChange<S>>>,
    subscribers: Mutex<Vec<ChangeSender>>,
}

impl<S> Store<S>
where
    S: Clone + Send + Sync + 'static,
{
    /// Create a store with a name used in logs and change events
    pub fn new(name: impl Into<Arc<str>>, priority: Priority, initial_state: S) -> Self {
        Self {
            token: WorkerToken::next(),
            name: name.into(),
            priority,
            state: RwLock::new(Slot {
                value: initial_state,
                revision: 0,
            }),
            reducers: RwLock::new(HashMap::new()),
            will_change: RwLock::new(Vec::new()),
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Create a store whose priority can be overridden by `config`
    pub fn with_config(
        name: impl Into<Arc<str>>,
        default_priority: Priority,
        initial_state: S,
        config: &FluxConfig,
    ) -> Self {
        let name = name.into();
        let priority = config.priority_for(&name, default_priority);
        if priority != default_priority {
            log::debug!("Store '{}' priority overridden to {}", name, priority);
        }
        Self::new(name, priority, initial_state)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Clone of the current state
    pub fn get_state(&self) -> S {
        self.read().value.clone()
    }

    /// Read the current state without cloning it
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.read().value)
    }

    /// Number of commits since the store was created
    pub fn revision(&self) -> u64 {
        self.read().revision
    }

    /// Replace the state
    ///
    /// Will-change observers run before the new value is committed; change
    /// events are posted after the write lock is released.
    pub fn set_state(&self, state: S) {
        let event = {
            let mut slot = self.write();
            self.commit(&mut slot, state)
        };
        self.notify(event);
    }

    /// Install the reducer for action kind `A`, replacing any previous one
    ///
    /// The reducer mutates a draft of the state and returns whether it
    /// changed anything. Only drafts reported as changed are committed.
    pub fn register_reducer<A, F>(&self, reduce: F)
    where
        A: Action,
        F: Fn(&mut S, &A) -> bool + Send + Sync + 'static,
    {
        let reducer: Reducer<S> = Arc::new(move |state: &mut S, action: &dyn Action| {
            match action.downcast_ref::<A>() {
                Some(action) => reduce(state, action),
                None => false,
            }
        });

        let kind = ActionKind::of::<A>();
        let replaced = self
            .reducers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(kind, reducer)
            .is_some();
        if replaced {
            log::debug!("Store '{}': replaced reducer for {}", self.name, kind);
        }
    }

    /// Remove the reducer for action kind `A`
    ///
    /// Returns `true` if a reducer was registered.
    pub fn unregister_reducer<A: Action>(&self) -> bool {
        self.reducers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&ActionKind::of::<A>())
            .is_some()
    }

    pub fn has_reducer<A: Action>(&self) -> bool {
        self.reducers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&ActionKind::of::<A>())
    }

    /// Observe commits synchronously, before the new state becomes visible
    ///
    /// The callback receives `(current, next)` and runs while the store's
    /// write lock is held.
    pub fn on_will_change<F>(&self, observer: F)
    where
        F: Fn(&S, &S) + Send + Sync + 'static,
    {
        self.will_change
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(observer));
    }

    /// Subscribe to change events on a dedicated channel
    pub fn subscribe(&self) -> ChangeReceiver {
        let (tx, rx) = change_channel();
        self.add_subscriber(tx);
        rx
    }

    /// Post change events to an existing channel, e.g. one shared by several
    /// stores and drained on the host's main task
    pub fn add_subscriber(&self, tx: ChangeSender) {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(tx);
    }

    /// Number of live subscriber channels
    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| !tx.is_closed());
        subscribers.len()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Slot<S>> {
        // A panicking reducer only ever touched a draft
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Slot<S>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn reducer_for(&self, kind: &ActionKind) -> Option<Reducer<S>> {
        self.reducers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(kind)
            .cloned()
    }

    /// Run `reducer` on a draft and commit it if changed
    fn reduce(&self, reducer: &Reducer<S>, action: &dyn Action) -> Option<StateChanged> {
        let mut slot = self.write();
        let mut draft = slot.value.clone();
        if !reducer(&mut draft, action) {
            return None;
        }
        Some(self.commit(&mut slot, draft))
    }

    fn commit(&self, slot: &mut Slot<S>, next: S) -> StateChanged {
        let observers = self
            .will_change
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in &observers {
            observer(&slot.value, &next);
        }

        slot.value = next;
        slot.revision += 1;

        StateChanged {
            store: self.token,
            store_name: Arc::clone(&self.name),
            revision: slot.revision,
        }
    }

    fn notify(&self, event: StateChanged) {
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        log::trace!(
            "Store '{}' revision {} posted to {} subscriber(s)",
            self.name,
            event.revision,
            subscribers.len()
        );
    }
}

impl<S> Worker for Store<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn token(&self) -> WorkerToken {
        self.token
    }

    fn priority(&self) -> Priority {
        self.priority
    }

    fn handle(&self, action: &dyn Action, composer: Composer<'_>) {
        let kind = action.kind();
        match self.reducer_for(&kind) {
            Some(reducer) => {
                if let Some(event) = self.reduce(&reducer, action) {
                    log::debug!(
                        "Store '{}' changed by {} (revision {})",
                        self.name,
                        kind,
                        event.revision
                    );
                    self.notify(event);
                }
            }
            None => {
                log::trace!("Store '{}' has no reducer for {}", self.name, kind);
            }
        }

        composer.next(action);
    }
}

impl<S> fmt::Debug for Store<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.name)
            .field("token", &self.token)
            .field("priority", &self.priority)
            .finish_non_exhaustive()
    }
}
