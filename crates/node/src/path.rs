//! Paths into a [`Node`](crate::Node) tree.

use std::fmt;

use crate::pointer::format_pointer;

/// One traversal step: a key into an object or an index into an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl PathSegment {
    pub fn as_key(&self) -> Option<&str> {
        match self {
            PathSegment::Key(key) => Some(key),
            PathSegment::Index(_) => None,
        }
    }

    /// The array index this step names. Keys never name an index, even
    /// when they are spelled with digits.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            PathSegment::Index(index) => Some(*index),
            PathSegment::Key(_) => None,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

impl From<&String> for PathSegment {
    fn from(key: &String) -> Self {
        PathSegment::Key(key.clone())
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => f.write_str(key),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

/// An ordered sequence of [`PathSegment`]s. The empty path is the root.
///
/// Displays as a JSON Pointer, e.g. `/names/2`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path(Vec<PathSegment>);

impl Path {
    pub fn root() -> Self {
        Path(Vec::new())
    }

    pub fn new(segments: Vec<PathSegment>) -> Self {
        Path(segments)
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, segment: impl Into<PathSegment>) {
        self.0.push(segment.into());
    }

    /// Returns `self` followed by every segment of `tail`.
    pub fn join(&self, tail: &Path) -> Path {
        let mut segments = Vec::with_capacity(self.0.len() + tail.0.len());
        segments.extend_from_slice(&self.0);
        segments.extend_from_slice(&tail.0);
        Path(segments)
    }

    /// The path without its last segment; `None` for the root.
    pub fn parent(&self) -> Option<Path> {
        if self.0.is_empty() {
            return None;
        }
        Some(Path(self.0[..self.0.len() - 1].to_vec()))
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PathSegment> {
        self.0.iter()
    }

    /// Splits every key segment on `separator`, leaving indices untouched.
    pub fn split_keys(self, separator: char) -> Path {
        let mut segments = Vec::with_capacity(self.0.len());
        for segment in self.0 {
            match segment {
                PathSegment::Key(key) if key.contains(separator) => {
                    segments.extend(key.split(separator).map(PathSegment::from));
                }
                other => segments.push(other),
            }
        }
        Path(segments)
    }
}

impl AsRef<[PathSegment]> for Path {
    fn as_ref(&self) -> &[PathSegment] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PathSegment;
    type IntoIter = std::slice::Iter<'a, PathSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<PathSegment> for Path {
    fn from_iter<I: IntoIterator<Item = PathSegment>>(iter: I) -> Self {
        Path(iter.into_iter().collect())
    }
}

impl From<Vec<PathSegment>> for Path {
    fn from(segments: Vec<PathSegment>) -> Self {
        Path(segments)
    }
}

impl From<PathSegment> for Path {
    fn from(segment: PathSegment) -> Self {
        Path(vec![segment])
    }
}

impl From<&Path> for Path {
    fn from(path: &Path) -> Self {
        path.clone()
    }
}

impl From<&str> for Path {
    fn from(key: &str) -> Self {
        Path(vec![PathSegment::from(key)])
    }
}

impl From<String> for Path {
    fn from(key: String) -> Self {
        Path(vec![PathSegment::Key(key)])
    }
}

impl From<usize> for Path {
    fn from(index: usize) -> Self {
        Path(vec![PathSegment::Index(index)])
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_pointer(&self.0))
    }
}

/// Builds a [`Path`] from a mix of string keys and integer indices.
///
/// ```
/// use nodemap_node::{path, PathSegment};
///
/// let p = path!["names", 2];
/// assert_eq!(p.segments()[1], PathSegment::Index(2));
/// assert!(path![].is_root());
/// ```
#[macro_export]
macro_rules! path {
    () => {
        $crate::Path::root()
    };
    ($($segment:expr),+ $(,)?) => {
        $crate::Path::new(vec![$($crate::PathSegment::from($segment)),+])
    };
}
