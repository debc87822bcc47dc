//! Actions and action kinds
//!
//! An action is an inert value describing an intent. Any `'static` value that
//! is `Debug + Send + Sync` can be dispatched; its concrete type is the kind
//! used to look up reducers.
//!
//! A tagged-union `enum` works just as well: the whole enum is then a single
//! kind and reducers `match` on the variant.

use std::any::{Any, TypeId};
use std::fmt;

/// A value that can be dispatched through a [`Dispatcher`](crate::Dispatcher)
///
/// Implemented for every `'static + Debug + Send + Sync` type. When holding a
/// `Box<dyn Action>`, dispatch `&*boxed` so the kind resolves to the inner
/// value rather than to the box.
pub trait Action: Any + fmt::Debug + Send + Sync + 'static {
    /// Concrete kind of this action
    fn kind(&self) -> ActionKind;

    /// Upcast for downcasting to the concrete action type
    fn as_any(&self) -> &dyn Any;
}

impl<T: Any + fmt::Debug + Send + Sync> Action for T {
    fn kind(&self) -> ActionKind {
        ActionKind::of::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl dyn Action {
    /// Returns `true` if the action is of kind `A`
    pub fn is<A: Action>(&self) -> bool {
        self.as_any().is::<A>()
    }

    /// Downcast to the concrete action type
    pub fn downcast_ref<A: Action>(&self) -> Option<&A> {
        self.as_any().downcast_ref::<A>()
    }
}

/// Stable identifier for an action kind
///
/// Equality and hashing use the type id only; the name is kept for logs.
#[derive(Clone, Copy)]
pub struct ActionKind {
    id: TypeId,
    name: &'static str,
}

impl ActionKind {
    /// Kind of action type `A`
    pub fn of<A: Action>() -> Self {
        Self {
            id: TypeId::of::<A>(),
            name: std::any::type_name::<A>(),
        }
    }

    /// Fully qualified type name of the kind
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for ActionKind {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ActionKind {}

impl std::hash::Hash for ActionKind {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ActionKind").field(&self.name).finish()
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short name is enough in logs
        let short = self.name.rsplit("::").next().unwrap_or(self.name);
        write!(f, "{}", short)
    }
}
