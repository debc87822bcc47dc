use anyhow::Context;
use flux_config::FluxConfig;
use flux_core::{change_channel, ChangeReceiver, Dispatcher, FilterWorker, StateChanged, Store};
use std::collections::BTreeMap;
use std::sync::Arc;

mod actions;
mod logger;
mod stores;

use actions::{CounterAction, Note, Probe};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init().context("Failed to initialize logger")?;

    log::info!("Starting flux-demo");

    let config = FluxConfig::load();
    let counter = stores::counter_store(&config);
    let journal = stores::journal_store(&config);

    // Both stores post into one channel drained on the main task
    let (changes_tx, mut changes_rx) = change_channel();
    counter.add_subscriber(changes_tx.clone());
    journal.add_subscriber(changes_tx);

    let mut dispatcher = Dispatcher::from_config(&config);
    dispatcher.register_worker(Arc::new(FilterWorker::block::<Probe>(-1)));
    dispatcher.register_worker(Arc::clone(&counter));
    dispatcher.register_worker(Arc::clone(&journal));

    // Dispatch runs synchronously on whichever thread calls it
    let mut producer = tokio::task::spawn_blocking(move || {
        dispatcher.dispatch(&Note("session started".to_string()));
        dispatcher.dispatch(&CounterAction::Increment);
        dispatcher.dispatch(&CounterAction::Increment);
        dispatcher.dispatch(&Probe);
        dispatcher.dispatch(&CounterAction::Set(40));
        dispatcher.dispatch(&CounterAction::Set(40));
        dispatcher.dispatch(&CounterAction::Decrement);
    });

    loop {
        tokio::select! {
            Some(first) = changes_rx.recv() => {
                render(first, &mut changes_rx, &counter, &journal);
            }
            result = &mut producer => {
                result.context("Dispatch task failed")?;
                break;
            }
        }
    }

    // Every commit has been posted by now
    if let Ok(first) = changes_rx.try_recv() {
        render(first, &mut changes_rx, &counter, &journal);
    }

    log::info!(
        "Exiting flux-demo (counter revision {}, journal revision {})",
        counter.revision(),
        journal.revision()
    );
    Ok(())
}

/// Coalesce everything already pending into one line per store
fn render(
    first: StateChanged,
    changes_rx: &mut ChangeReceiver,
    counter: &Store<i64>,
    journal: &Store<Vec<String>>,
) {
    let mut latest: BTreeMap<String, StateChanged> = BTreeMap::new();
    latest.insert(first.store_name.to_string(), first);
    while let Ok(event) = changes_rx.try_recv() {
        latest.insert(event.store_name.to_string(), event);
    }

    for (name, event) in latest {
        match name.as_str() {
            stores::COUNTER => {
                println!("[r{}] counter = {}", event.revision, counter.get_state())
            }
            stores::JOURNAL => {
                println!("[r{}] journal = {:?}", event.revision, journal.get_state())
            }
            _ => log::warn!("Change from unknown store {}", name),
        }
    }
}
