//! The mapping-routine contract and the pass drivers.

use log::debug;
use nodemap_node::{type_name, Context, Node, Result};

use crate::config::MapConfig;
use crate::map::Map;

/// A type described by one routine that binds every field exactly once.
///
/// The same `sequence` runs for decoding (on a fresh `Default` value) and for
/// encoding (on a clone, so the caller's value is left untouched).
///
/// ```
/// use nodemap::{Map, Mappable};
/// use nodemap_node::{Node, Result};
///
/// #[derive(Debug, Default, Clone, PartialEq)]
/// struct Person {
///     name: String,
///     age: Option<i64>,
/// }
///
/// impl Mappable for Person {
///     fn sequence(&mut self, map: &mut Map<'_>) -> Result<()> {
///         map.at("name").bind(&mut self.name)?;
///         map.at("age").bind_optional(&mut self.age)?;
///         Ok(())
///     }
/// }
///
/// let person = Person { name: "Ada".into(), age: Some(36) };
/// let node = nodemap::encode(&person).unwrap();
/// assert_eq!(node, Node::object([("name", Node::from("Ada")), ("age", Node::Int(36))]));
/// assert_eq!(nodemap::decode::<Person>(&node, &Default::default()).unwrap(), person);
/// ```
pub trait Mappable: Default + Clone {
    fn sequence(&mut self, map: &mut Map<'_>) -> Result<()>;
}

/// Runs decode and encode passes with a fixed [`MapConfig`].
#[derive(Debug, Clone, Default)]
pub struct Mapper {
    config: MapConfig,
}

impl Mapper {
    pub fn new(config: MapConfig) -> Self {
        Mapper { config }
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// Decodes a `T` from `node`. Any field failure aborts the whole pass.
    pub fn decode<T: Mappable>(&self, node: &Node, context: &Context) -> Result<T> {
        debug!("decode {} from {} node", type_name::<T>(), node.type_name());
        let mut map = Map::from_node_with(node, context, self.config.clone());
        let mut value = T::default();
        match value.sequence(&mut map) {
            Ok(()) => {
                debug!("decode {} done", type_name::<T>());
                Ok(value)
            }
            Err(err) => {
                debug!("decode {} failed: {}", type_name::<T>(), err);
                Err(err)
            }
        }
    }

    /// Encodes `value` into a fresh node. A failed pass yields no node.
    pub fn encode<T: Mappable>(&self, value: &T) -> Result<Node> {
        debug!("encode {}", type_name::<T>());
        let mut map = Map::to_node_with(self.config.clone());
        let mut copy = value.clone();
        if let Err(err) = copy.sequence(&mut map) {
            debug!("encode {} failed: {}", type_name::<T>(), err);
            return Err(err);
        }
        debug!("encode {} done", type_name::<T>());
        Ok(map.into_node().unwrap_or_default())
    }
}

/// Decodes with the default configuration.
pub fn decode<T: Mappable>(node: &Node, context: &Context) -> Result<T> {
    Mapper::default().decode(node, context)
}

/// Encodes with the default configuration.
pub fn encode<T: Mappable>(value: &T) -> Result<Node> {
    Mapper::default().encode(value)
}
