//! The [`Node`] tree and its lenient traversal surface.

use indexmap::IndexMap;

use crate::convert::ToNode;
use crate::error::{Error, Result};
use crate::path::{Path, PathSegment};
use crate::pointer::{is_valid_index, parse_pointer};

/// How far past the end of an array [`Node::set_path`] may write.
pub const MAX_ARRAY_GAP: usize = 1 << 16;

/// Object storage: string keys, insertion order preserved.
pub type Object = IndexMap<String, Node>;

/// A recursive tagged value.
///
/// Equality is structural; object comparison ignores key order.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<Node>),
    Object(Object),
}

impl Node {
    /// An empty object, the default accumulator of an encode pass.
    pub fn empty_object() -> Self {
        Node::Object(Object::new())
    }

    /// Builds an array by encoding every item in order.
    pub fn array<T: ToNode>(items: impl IntoIterator<Item = T>) -> Self {
        Node::Array(items.into_iter().map(|item| item.to_node()).collect())
    }

    /// Builds an object by encoding every value, keeping entry order.
    pub fn object<K: Into<String>, V: ToNode>(entries: impl IntoIterator<Item = (K, V)>) -> Self {
        Node::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.to_node()))
                .collect(),
        )
    }

    /// Tag name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "bool",
            Node::Int(_) => "int",
            Node::Double(_) => "double",
            Node::String(_) => "string",
            Node::Array(_) => "array",
            Node::Object(_) => "object",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Node::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Doubles, and ints widened to `f64`.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Node::Double(n) => Some(*n),
            Node::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Node]> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self {
            Node::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        match self {
            Node::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Number of entries of an array or object; `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Node::Array(items) => Some(items.len()),
            Node::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    /// True for empty arrays and objects only.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Resolves one step: keys against objects, indices against arrays.
    ///
    /// ```
    /// use nodemap_node::Node;
    ///
    /// let node = Node::object([("int", 3)]);
    /// assert_eq!(node.get("int"), Some(&Node::Int(3)));
    /// assert_eq!(node.get(0), None);
    /// ```
    pub fn get(&self, segment: impl Into<PathSegment>) -> Option<&Node> {
        step(self, &segment.into())
    }

    /// Walks `path` left to right. Any step that does not narrow (wrong tag,
    /// missing key, index out of range) yields `None`.
    ///
    /// ```
    /// use nodemap_node::{path, Node};
    ///
    /// let node = Node::object([("names", Node::array(["", "", "World"]))]);
    /// assert_eq!(node.get_path(&path!["names", 2]), Some(&Node::from("World")));
    /// assert_eq!(node.get_path(&path!["names", 5]), None);
    /// ```
    pub fn get_path(&self, path: impl AsRef<[PathSegment]>) -> Option<&Node> {
        path.as_ref()
            .iter()
            .try_fold(self, |current, segment| step(current, segment))
    }

    pub fn get_path_mut(&mut self, path: impl AsRef<[PathSegment]>) -> Option<&mut Node> {
        let mut current = self;
        for segment in path.as_ref() {
            current = step_mut(current, segment)?;
        }
        Some(current)
    }

    /// Looks up a JSON Pointer such as `/names/2`.
    ///
    /// Pointer steps are untyped: a step reads as an index on arrays when it
    /// is a canonical decimal, and as a key everywhere else.
    pub fn pointer(&self, pointer: &str) -> Option<&Node> {
        parse_pointer(pointer)
            .iter()
            .try_fold(self, |current, segment| {
                step(current, &pointer_step(current, segment))
            })
    }

    pub fn pointer_mut(&mut self, pointer: &str) -> Option<&mut Node> {
        let mut current = self;
        for segment in &parse_pointer(pointer) {
            let segment = pointer_step(current, segment);
            current = step_mut(current, &segment)?;
        }
        Some(current)
    }

    /// Stores `value` at `path`, creating containers along the way.
    ///
    /// Key steps materialize objects and index steps materialize arrays
    /// (padded with `Null`). A node of the wrong shape in the way is replaced.
    /// The root path replaces `self`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] when an index lies more than
    /// [`MAX_ARRAY_GAP`] past the end of its array; nothing is written then.
    pub fn set_path(&mut self, path: &Path, value: Node) -> Result<()> {
        check_gaps(self, path)?;
        let mut current = self;
        for segment in path {
            current = child_or_insert(current, segment);
        }
        *current = value;
        Ok(())
    }
}

fn step<'a>(node: &'a Node, segment: &PathSegment) -> Option<&'a Node> {
    match node {
        Node::Object(map) => map.get(segment.as_key()?),
        Node::Array(items) => items.get(segment.as_index()?),
        _ => None,
    }
}

fn step_mut<'a>(node: &'a mut Node, segment: &PathSegment) -> Option<&'a mut Node> {
    match node {
        Node::Object(map) => map.get_mut(segment.as_key()?),
        Node::Array(items) => items.get_mut(segment.as_index()?),
        _ => None,
    }
}

fn pointer_step(node: &Node, segment: &PathSegment) -> PathSegment {
    match (node, segment) {
        (Node::Array(_), PathSegment::Key(key)) if is_valid_index(key) => key
            .parse()
            .map_or_else(|_| segment.clone(), PathSegment::Index),
        _ => segment.clone(),
    }
}

/// Walks `path` the way `set_path` will and rejects oversized padding
/// before anything is mutated.
fn check_gaps(node: &Node, path: &Path) -> Result<()> {
    let mut current = Some(node);
    for (depth, segment) in path.iter().enumerate() {
        if let PathSegment::Index(index) = segment {
            let len = match current {
                Some(Node::Array(items)) => items.len(),
                _ => 0,
            };
            if index.saturating_sub(len) > MAX_ARRAY_GAP {
                let key = Path::new(path.segments()[..=depth].to_vec());
                return Err(Error::index_out_of_range(key, *index));
            }
        }
        current = current.and_then(|node| step(node, segment));
    }
    Ok(())
}

fn child_or_insert<'a>(node: &'a mut Node, segment: &PathSegment) -> &'a mut Node {
    match segment {
        PathSegment::Key(key) => {
            if !matches!(node, Node::Object(_)) {
                *node = Node::empty_object();
            }
            match node {
                Node::Object(map) => map.entry(key.clone()).or_insert(Node::Null),
                _ => unreachable!("object materialized above"),
            }
        }
        PathSegment::Index(index) => {
            if !matches!(node, Node::Array(_)) {
                *node = Node::Array(Vec::new());
            }
            match node {
                Node::Array(items) => {
                    if items.len() <= *index {
                        items.resize_with(*index + 1, Node::default);
                    }
                    &mut items[*index]
                }
                _ => unreachable!("array materialized above"),
            }
        }
    }
}

impl From<()> for Node {
    fn from(_: ()) -> Self {
        Node::Null
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

macro_rules! from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Node {
                fn from(n: $ty) -> Self {
                    Node::Int(n as i64)
                }
            }
        )*
    };
}

from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Node {
    fn from(n: f64) -> Self {
        Node::Double(n)
    }
}

impl From<f32> for Node {
    fn from(n: f32) -> Self {
        Node::Double(n as f64)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::String(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::String(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::Array(items)
    }
}

impl From<Object> for Node {
    fn from(map: Object) -> Self {
        Node::Object(map)
    }
}

impl FromIterator<Node> for Node {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Node::Array(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Node)> for Node {
    fn from_iter<I: IntoIterator<Item = (K, Node)>>(iter: I) -> Self {
        Node::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
