//! Demo stores and their reducers

use crate::actions::{CounterAction, Note};
use flux_config::FluxConfig;
use flux_core::Store;
use std::sync::Arc;

pub const COUNTER: &str = "counter";
pub const JOURNAL: &str = "journal";

pub fn counter_store(config: &FluxConfig) -> Arc<Store<i64>> {
    let store = Arc::new(Store::with_config(COUNTER, 0, 0_i64, config));
    store.register_reducer::<CounterAction, _>(reduce_counter);
    store
}

pub fn journal_store(config: &FluxConfig) -> Arc<Store<Vec<String>>> {
    let store = Arc::new(Store::with_config(JOURNAL, 10, Vec::new(), config));
    store.register_reducer(|journal: &mut Vec<String>, note: &Note| {
        if note.0.trim().is_empty() {
            return false;
        }
        journal.push(note.0.clone());
        true
    });
    store.register_reducer(|journal: &mut Vec<String>, action: &CounterAction| {
        journal.push(format!("counter: {:?}", action));
        true
    });
    store
}

fn reduce_counter(value: &mut i64, action: &CounterAction) -> bool {
    let before = *value;
    match action {
        CounterAction::Increment => *value = value.saturating_add(1),
        CounterAction::Decrement => *value = value.saturating_sub(1),
        CounterAction::Set(v) => *value = *v,
    }
    *value != before
}
