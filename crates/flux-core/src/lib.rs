//! # flux-core
//!
//! Unidirectional data flow for application state: typed stores, a
//! priority-ordered dispatcher and a chain-of-responsibility composer that
//! lets several stores react to the same action in turn.
//!
//! ## Design
//!
//! ```text
//! dispatch(action) → Dispatcher snapshot → Composer → Worker → Worker → ...
//!                                                       │
//!                                               Store: reducer(draft)
//!                                                       │
//!                                               commit → StateChanged
//! ```
//!
//! - State changes only through reducers registered on a [`Store`]
//! - Workers run in ascending [`Priority`] order, ties in registration order
//! - Any worker may stop the chain by not calling [`Composer::next`]
//! - Committed changes are posted to each store's own subscribers
//!
//! ## Usage
//!
//! ```rust
//! use flux_core::{Dispatcher, Store};
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! struct SetValue(i64);
//!
//! let numbers = Arc::new(Store::new("numbers", 0, 0_i64));
//! numbers.register_reducer(|value: &mut i64, action: &SetValue| {
//!     *value = action.0 * 2;
//!     true
//! });
//! let mut changes = numbers.subscribe();
//!
//! let mut dispatcher = Dispatcher::new();
//! dispatcher.register_worker(Arc::clone(&numbers));
//! dispatcher.dispatch(&SetValue(5));
//!
//! assert_eq!(numbers.get_state(), 10);
//! assert!(changes.try_recv().is_ok());
//! ```

pub mod action;
pub mod composer;
pub mod dispatcher;
pub mod notification;
pub mod store;
pub mod worker;
pub mod workers;

pub use action::{Action, ActionKind};
pub use composer::Composer;
pub use dispatcher::{DispatchChain, Dispatcher};
pub use notification::{change_channel, ChangeReceiver, ChangeSender, StateChanged};
pub use store::Store;
pub use worker::{Priority, Worker, WorkerToken};
pub use workers::{FilterWorker, LoggingWorker};
