//! Per-pass caller context for strict decoding.

use std::any::Any;
use std::fmt;

/// Opaque value threaded unchanged through every strict decode of one pass.
///
/// The conversion layer never inspects it; callers may stash one value of any
/// type and read it back from their own [`FromNode`](crate::FromNode) impls.
#[derive(Default)]
pub struct Context {
    data: Option<Box<dyn Any>>,
}

impl Context {
    pub fn empty() -> Self {
        Context { data: None }
    }

    pub fn with<T: Any>(value: T) -> Self {
        Context {
            data: Some(Box::new(value)),
        }
    }

    /// The stored value, if it is a `T`.
    pub fn get<T: Any>(&self) -> Option<&T> {
        self.data.as_deref()?.downcast_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_none()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("data", &self.data.as_ref().map(|_| "..."))
            .finish()
    }
}
