//! The convertible capability: infallible encode, strict decode.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;

use crate::context::Context;
use crate::error::{Error, Result};
use crate::node::Node;

/// Encodes a value as a [`Node`]. Never fails.
pub trait ToNode {
    fn to_node(&self) -> Node;
}

/// Strictly decodes a value from a [`Node`].
///
/// Implementations fail with [`Error::TypeMismatch`] when the node's tag
/// cannot produce `Self`; they must pass `context` unchanged to nested calls.
pub trait FromNode: Sized {
    fn from_node(node: &Node, context: &Context) -> Result<Self>;
}

/// Types that can be both encoded and strictly decoded.
pub trait NodeConvertible: ToNode + FromNode {}

impl<T: ToNode + FromNode> NodeConvertible for T {}

/// Short type name for error messages (`String`, `Vec<i64>`, ...).
///
/// Tuples, slices, arrays and references keep their full name.
pub fn type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    if full.starts_with(['(', '[', '&', '*']) {
        return full;
    }
    // Keep the last path component of the outermost type.
    match full.find('<') {
        Some(generic) => {
            let head = &full[..generic];
            let start = head.rfind("::").map_or(0, |i| i + 2);
            &full[start..]
        }
        None => full.rsplit("::").next().unwrap_or(full),
    }
}

impl<T: ToNode + ?Sized> ToNode for &T {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl<T: ToNode + ?Sized> ToNode for Box<T> {
    fn to_node(&self) -> Node {
        (**self).to_node()
    }
}

impl ToNode for Node {
    fn to_node(&self) -> Node {
        self.clone()
    }
}

impl FromNode for Node {
    fn from_node(node: &Node, _context: &Context) -> Result<Self> {
        Ok(node.clone())
    }
}

impl ToNode for bool {
    fn to_node(&self) -> Node {
        Node::Bool(*self)
    }
}

impl FromNode for bool {
    fn from_node(node: &Node, _context: &Context) -> Result<Self> {
        node.as_bool()
            .ok_or_else(|| Error::type_mismatch("bool", node))
    }
}

impl ToNode for str {
    fn to_node(&self) -> Node {
        Node::String(self.to_string())
    }
}

impl ToNode for String {
    fn to_node(&self) -> Node {
        Node::String(self.clone())
    }
}

impl FromNode for String {
    fn from_node(node: &Node, _context: &Context) -> Result<Self> {
        node.as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::type_mismatch("String", node))
    }
}

impl ToNode for i64 {
    fn to_node(&self) -> Node {
        Node::Int(*self)
    }
}

impl FromNode for i64 {
    fn from_node(node: &Node, _context: &Context) -> Result<Self> {
        node.as_int().ok_or_else(|| Error::type_mismatch("i64", node))
    }
}

macro_rules! narrow_int {
    ($($ty:ty),*) => {
        $(
            impl ToNode for $ty {
                fn to_node(&self) -> Node {
                    Node::Int(*self as i64)
                }
            }

            impl FromNode for $ty {
                fn from_node(node: &Node, _context: &Context) -> Result<Self> {
                    node.as_int()
                        .and_then(|n| <$ty>::try_from(n).ok())
                        .ok_or_else(|| Error::type_mismatch(stringify!($ty), node))
                }
            }
        )*
    };
}

narrow_int!(i8, i16, i32, u8, u16, u32);

macro_rules! wide_uint {
    ($($ty:ty),*) => {
        $(
            impl ToNode for $ty {
                fn to_node(&self) -> Node {
                    match i64::try_from(*self) {
                        Ok(n) => Node::Int(n),
                        Err(_) => Node::Double(*self as f64),
                    }
                }
            }

            /// Also accepts the integral doubles that values above
            /// `i64::MAX` encode as.
            impl FromNode for $ty {
                fn from_node(node: &Node, _context: &Context) -> Result<Self> {
                    let value = match node {
                        Node::Int(n) => <$ty>::try_from(*n).ok(),
                        Node::Double(d)
                            if d.fract() == 0.0 && *d >= 0.0 && *d <= <$ty>::MAX as f64 =>
                        {
                            // saturates at MAX, which is what MAX encoded as
                            Some(*d as $ty)
                        }
                        _ => None,
                    };
                    value.ok_or_else(|| Error::type_mismatch(stringify!($ty), node))
                }
            }
        )*
    };
}

wide_uint!(u64, usize);

impl ToNode for f64 {
    fn to_node(&self) -> Node {
        Node::Double(*self)
    }
}

impl FromNode for f64 {
    fn from_node(node: &Node, _context: &Context) -> Result<Self> {
        node.as_double()
            .ok_or_else(|| Error::type_mismatch("f64", node))
    }
}

impl ToNode for f32 {
    fn to_node(&self) -> Node {
        Node::Double(*self as f64)
    }
}

impl FromNode for f32 {
    fn from_node(node: &Node, _context: &Context) -> Result<Self> {
        node.as_double()
            .map(|n| (n, n as f32))
            .filter(|(wide, narrow)| narrow.is_finite() || !wide.is_finite())
            .map(|(_, narrow)| narrow)
            .ok_or_else(|| Error::type_mismatch("f32", node))
    }
}

/// `None` encodes as `Null`; `Null` decodes as `None`.
impl<T: ToNode> ToNode for Option<T> {
    fn to_node(&self) -> Node {
        match self {
            Some(value) => value.to_node(),
            None => Node::Null,
        }
    }
}

impl<T: FromNode> FromNode for Option<T> {
    fn from_node(node: &Node, context: &Context) -> Result<Self> {
        if node.is_null() {
            return Ok(None);
        }
        T::from_node(node, context).map(Some)
    }
}

impl<T: ToNode> ToNode for [T] {
    fn to_node(&self) -> Node {
        Node::array(self)
    }
}

impl<T: ToNode> ToNode for Vec<T> {
    fn to_node(&self) -> Node {
        Node::array(self)
    }
}

impl<T: FromNode> FromNode for Vec<T> {
    fn from_node(node: &Node, context: &Context) -> Result<Self> {
        let items = node
            .as_array()
            .ok_or_else(|| Error::type_mismatch("array", node))?;
        items
            .iter()
            .map(|item| T::from_node(item, context))
            .collect()
    }
}

fn decode_entries<T, C>(node: &Node, context: &Context) -> Result<C>
where
    T: FromNode,
    C: FromIterator<(String, T)>,
{
    let map = node
        .as_object()
        .ok_or_else(|| Error::type_mismatch("object", node))?;
    map.iter()
        .map(|(key, value)| Ok::<_, Error>((key.clone(), T::from_node(value, context)?)))
        .collect()
}

impl<T: ToNode, S: BuildHasher> ToNode for IndexMap<String, T, S> {
    fn to_node(&self) -> Node {
        Node::object(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

impl<T: FromNode, S: BuildHasher + Default> FromNode for IndexMap<String, T, S> {
    fn from_node(node: &Node, context: &Context) -> Result<Self> {
        decode_entries(node, context)
    }
}

/// Entry order follows the map's own iteration order.
impl<T: ToNode, S: BuildHasher> ToNode for HashMap<String, T, S> {
    fn to_node(&self) -> Node {
        Node::object(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

impl<T: FromNode, S: BuildHasher + Default> FromNode for HashMap<String, T, S> {
    fn from_node(node: &Node, context: &Context) -> Result<Self> {
        decode_entries(node, context)
    }
}

impl<T: ToNode> ToNode for BTreeMap<String, T> {
    fn to_node(&self) -> Node {
        Node::object(self.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

impl<T: FromNode> FromNode for BTreeMap<String, T> {
    fn from_node(node: &Node, context: &Context) -> Result<Self> {
        decode_entries(node, context)
    }
}
