//! Change notifications
//!
//! Every store owns its own subscriber list; there is no process-wide
//! broadcast. A committed write posts one [`StateChanged`] to each subscriber
//! channel after the store's write lock has been released, so a slow consumer
//! never blocks a writer.
//!
//! Hosts typically create one channel, hand the sender to every store they
//! care about with [`Store::add_subscriber`](crate::Store::add_subscriber) and
//! drain the receiver on their main/UI task. Events can be coalesced by
//! draining everything that is pending before re-reading state.

use crate::worker::WorkerToken;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Sending half of a change notification channel
pub type ChangeSender = mpsc::UnboundedSender<StateChanged>;

/// Receiving half of a change notification channel
pub type ChangeReceiver = mpsc::UnboundedReceiver<StateChanged>;

/// Create a channel that one or more stores can post change events to
pub fn change_channel() -> (ChangeSender, ChangeReceiver) {
    mpsc::unbounded_channel()
}

/// A store committed a new state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateChanged {
    /// Token of the originating store
    pub store: WorkerToken,
    /// Name of the originating store
    pub store_name: Arc<str>,
    /// Revision produced by the commit, starting at 1 for the first commit
    pub revision: u64,
}
