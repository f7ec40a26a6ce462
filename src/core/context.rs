//! Request-scoped context that valuers read from
//!
//! A `Context` is an immutable linked chain of values. Attaching a value
//! returns a new context that shares its tail with the parent, so deriving
//! per-request contexts never copies or mutates the parent.

use super::field::FieldValue;
use std::any::{Any, TypeId};
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Key {
    Type(TypeId),
    Name(&'static str),
}

struct Node {
    key: Key,
    value: Arc<dyn Any + Send + Sync>,
    parent: Option<Arc<Node>>,
}

/// Immutable, cheaply clonable request-scoped value chain.
#[derive(Clone, Default)]
pub struct Context {
    head: Option<Arc<Node>>,
}

impl Context {
    /// The empty root context.
    pub fn background() -> Self {
        Self { head: None }
    }

    /// Attach a value keyed by its type.
    #[must_use]
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        self.push(Key::Type(TypeId::of::<T>()), Arc::new(value))
    }

    /// Nearest value of type `T`, if any.
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.lookup(Key::Type(TypeId::of::<T>()))
            .and_then(|v| v.downcast_ref::<T>())
    }

    /// Attach a field value under a string key.
    #[must_use]
    pub fn with_named(&self, key: &'static str, value: impl Into<FieldValue>) -> Self {
        let value: FieldValue = value.into();
        self.push(Key::Name(key), Arc::new(value))
    }

    /// Nearest value attached under `key` with [`Context::with_named`].
    pub fn named(&self, key: &str) -> Option<&FieldValue> {
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            if let Key::Name(k) = n.key {
                if k == key {
                    return n.value.downcast_ref::<FieldValue>();
                }
            }
            node = n.parent.as_deref();
        }
        None
    }

    pub fn is_background(&self) -> bool {
        self.head.is_none()
    }

    /// Whether both handles point at the same chain.
    pub fn ptr_eq(&self, other: &Context) -> bool {
        match (&self.head, &other.head) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn push(&self, key: Key, value: Arc<dyn Any + Send + Sync>) -> Self {
        Self {
            head: Some(Arc::new(Node {
                key,
                value,
                parent: self.head.clone(),
            })),
        }
    }

    fn lookup(&self, key: Key) -> Option<&(dyn Any + Send + Sync)> {
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            if n.key == key {
                return Some(n.value.as_ref());
            }
            node = n.parent.as_deref();
        }
        None
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut depth = 0;
        let mut node = self.head.as_deref();
        while let Some(n) = node {
            depth += 1;
            node = n.parent.as_deref();
        }
        f.debug_struct("Context").field("depth", &depth).finish()
    }
}
