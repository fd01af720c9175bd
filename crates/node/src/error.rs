//! Error taxonomy shared by strict decoding and mapping passes.

use thiserror::Error;

use crate::node::Node;
use crate::path::Path;

/// Boxed error raised by a caller-supplied transform function.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    /// Strict decode found a node whose tag cannot produce the target type.
    #[error("type mismatch: expected {expected}, found {} node", .found.type_name())]
    TypeMismatch { expected: &'static str, found: Node },
    /// A required field was absent (or null) during a decode pass.
    #[error("found nil at `{key}`: expected {expected}")]
    FoundNil { key: Path, expected: &'static str },
    /// An encode write addressed an array index too far past its end.
    #[error("index {index} at `{key}` is out of range")]
    IndexOutOfRange { key: Path, index: usize },
    /// Whatever the caller's own transform function raised.
    #[error(transparent)]
    Transform(BoxError),
}

impl Error {
    pub fn type_mismatch(expected: &'static str, found: &Node) -> Self {
        Error::TypeMismatch {
            expected,
            found: found.clone(),
        }
    }

    pub fn found_nil(key: Path, expected: &'static str) -> Self {
        Error::FoundNil { key, expected }
    }

    pub fn index_out_of_range(key: Path, index: usize) -> Self {
        Error::IndexOutOfRange { key, index }
    }

    /// Wraps an error raised by a user transform. An [`Error`] returned by
    /// the transform is passed through as-is rather than boxed again.
    pub fn transform(err: impl Into<BoxError>) -> Self {
        match err.into().downcast::<Error>() {
            Ok(inner) => *inner,
            Err(other) => Error::Transform(other),
        }
    }

    /// Re-roots the key of a `FoundNil` or `IndexOutOfRange` under `parent`,
    /// for errors bubbling out of a nested pass. Other variants pass through
    /// unchanged.
    pub fn within(self, parent: &Path) -> Self {
        match self {
            Error::FoundNil { key, expected } => Error::FoundNil {
                key: parent.join(&key),
                expected,
            },
            Error::IndexOutOfRange { key, index } => Error::IndexOutOfRange {
                key: parent.join(&key),
                index,
            },
            other => other,
        }
    }

    pub fn is_found_nil(&self) -> bool {
        matches!(self, Error::FoundNil { .. })
    }

    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Error::TypeMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
