//! Tree-shaped [`Node`] values.
//!
//! This crate provides the value model used by `nodemap`: a recursive tagged
//! tree, lenient path traversal, and the strict [`FromNode`] / infallible
//! [`ToNode`] conversion pair.
//!
//! # Example
//!
//! ```
//! use nodemap_node::{path, Context, FromNode, Node};
//!
//! let node = Node::object([("names", Node::array(["", "", "World"]))]);
//!
//! // Lenient traversal: absence, never an error
//! assert_eq!(node.get_path(&path!["names", 2]).and_then(Node::as_str), Some("World"));
//! assert_eq!(node.get_path(&path!["names", 5]), None);
//!
//! // Strict decoding: tag mismatches are errors
//! let names = Vec::<String>::from_node(node.get("names").unwrap(), &Context::empty()).unwrap();
//! assert_eq!(names.len(), 3);
//! ```

pub mod context;
pub mod convert;
pub mod error;
pub mod json;
pub mod node;
pub mod path;
pub mod pointer;

pub use context::Context;
pub use convert::{type_name, FromNode, NodeConvertible, ToNode};
pub use error::{BoxError, Error, Result};
pub use node::{Node, Object, MAX_ARRAY_GAP};
pub use path::{Path, PathSegment};
pub use pointer::{escape_component, format_pointer, parse_pointer, unescape_component};
