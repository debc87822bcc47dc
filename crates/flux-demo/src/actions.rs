/// Counter actions, one kind for all variants
#[derive(Debug, Clone)]
pub enum CounterAction {
    Increment,
    Decrement,
    Set(i64),
}

/// Free-form note for the journal
#[derive(Debug, Clone)]
pub struct Note(pub String);

/// Diagnostic action that is filtered out before reaching any store
#[derive(Debug, Clone)]
pub struct Probe;
