//! Bidirectional mapping between [`Node`](nodemap_node::Node) trees and typed values.
//!
//! A type implements [`Mappable`] with one routine that addresses each field
//! on a [`Map`] and binds it once. The same routine decodes (the map reads a
//! source node) and encodes (the map fills an accumulator); the bind calls
//! pick the direction. [`FromNodeTransformer`], [`ToNodeTransformer`] and
//! [`TwoWayTransformer`] plug custom conversions into a field.
//!
//! # Example
//!
//! ```
//! use nodemap::{FromNodeTransformer, Map, Mappable, TwoWayTransformer};
//! use nodemap_node::{Context, Node, Result};
//! use std::convert::Infallible;
//!
//! fn port_as_text() -> TwoWayTransformer<String, u16, String> {
//!     FromNodeTransformer::required(|s: String| s.parse::<u16>())
//!         .transform_to_node(|port: &u16| Ok::<_, Infallible>(port.to_string()))
//! }
//!
//! #[derive(Debug, Default, Clone, PartialEq)]
//! struct Endpoint {
//!     host: String,
//!     port: u16,
//! }
//!
//! impl Mappable for Endpoint {
//!     fn sequence(&mut self, map: &mut Map<'_>) -> Result<()> {
//!         map.at("host").bind(&mut self.host)?;
//!         map.at("port").bind_with(&mut self.port, &port_as_text())?;
//!         Ok(())
//!     }
//! }
//!
//! let node = Node::object([("host", "localhost"), ("port", "8080")]);
//! let endpoint: Endpoint = nodemap::decode(&node, &Context::empty()).unwrap();
//! assert_eq!(endpoint.port, 8080);
//! assert_eq!(nodemap::encode(&endpoint).unwrap(), node);
//! ```

pub mod binding;
pub mod config;
pub mod map;
pub mod mappable;
pub mod transformer;

pub use binding::Binding;
pub use config::MapConfig;
pub use map::{Direction, Map};
pub use mappable::{decode, encode, Mappable, Mapper};
pub use transformer::{
    FromNodeTransformer, InputPolicy, ToNodeTransformer, Transformer, TwoWayTransformer,
};
