//! Direction-dispatching bind operations.
//!
//! Each field of a mapping routine is bound exactly once. The decode family
//! only acts on decode maps, the encode family only on encode maps, and the
//! bidirectional family does whichever the map's [`Direction`] asks for.

use nodemap_node::{type_name, Error, FromNode, Node, NodeConvertible, Path, Result, ToNode};

use crate::map::{Direction, Map};
use crate::mappable::Mappable;
use crate::transformer::{FromNodeTransformer, ToNodeTransformer, TwoWayTransformer};

/// Something that can decode and encode a field of type `T`.
///
/// Implemented by every transformer kind so [`Map::bind_with`] accepts any
/// of them. A one-way transformer fills in its missing direction with the
/// field type's own [`FromNode`] / [`ToNode`] impl.
pub trait Binding<T> {
    fn decode(&self, map: &Map<'_>, node: Option<&Node>) -> Result<T>;
    fn encode(&self, map: &Map<'_>, value: &T) -> Result<Node>;
}

impl<N: FromNode, T: ToNode> Binding<T> for FromNodeTransformer<N, T> {
    fn decode(&self, map: &Map<'_>, node: Option<&Node>) -> Result<T> {
        self.transform(map, node)
    }

    fn encode(&self, _map: &Map<'_>, value: &T) -> Result<Node> {
        Ok(value.to_node())
    }
}

impl<V: FromNode, O: ToNode> Binding<V> for ToNodeTransformer<V, O> {
    fn decode(&self, map: &Map<'_>, node: Option<&Node>) -> Result<V> {
        match node {
            Some(node) => V::from_node(node, map.context()),
            None => Err(Error::found_nil(map.last_key().clone(), type_name::<V>())),
        }
    }

    fn encode(&self, map: &Map<'_>, value: &V) -> Result<Node> {
        self.transform(map, value)
    }
}

impl<N: FromNode, T, O: ToNode> Binding<T> for TwoWayTransformer<N, T, O> {
    fn decode(&self, map: &Map<'_>, node: Option<&Node>) -> Result<T> {
        TwoWayTransformer::decode(self, map, node)
    }

    fn encode(&self, map: &Map<'_>, value: &T) -> Result<Node> {
        TwoWayTransformer::encode(self, map, value)
    }
}

impl<'a> Map<'a> {
    fn required_field<T>(&self) -> Result<&'a Node> {
        self.field()
            .ok_or_else(|| Error::found_nil(self.last_key().clone(), type_name::<T>()))
    }

    fn write_optional<T: ToNode>(&mut self, source: &Option<T>) -> Result<()> {
        match source {
            Some(value) => self.write(value.to_node()),
            None if self.config().skip_none_on_encode => Ok(()),
            None => self.write(Node::Null),
        }
    }

    /// Decodes the current field into `target`; absence is [`Error::FoundNil`].
    /// No-op while encoding.
    pub fn bind_decode<T: FromNode>(&mut self, target: &mut T) -> Result<()> {
        if self.is_decoding() {
            let node = self.required_field::<T>()?;
            *target = T::from_node(node, self.context())?;
        }
        Ok(())
    }

    /// Decodes the current field into `target`, or `None` when absent or
    /// null. No-op while encoding.
    pub fn bind_decode_optional<T: FromNode>(&mut self, target: &mut Option<T>) -> Result<()> {
        if self.is_decoding() {
            *target = match self.field() {
                Some(node) if !node.is_null() => Some(T::from_node(node, self.context())?),
                _ => None,
            };
        }
        Ok(())
    }

    /// Writes `source` at the current field. No-op while decoding.
    pub fn bind_encode<T: ToNode + ?Sized>(&mut self, source: &T) -> Result<()> {
        if self.is_encoding() {
            self.write(source.to_node())?;
        }
        Ok(())
    }

    /// Writes `source` at the current field; `None` follows
    /// [`MapConfig::skip_none_on_encode`](crate::MapConfig::skip_none_on_encode).
    /// No-op while decoding.
    pub fn bind_encode_optional<T: ToNode>(&mut self, source: &Option<T>) -> Result<()> {
        if self.is_encoding() {
            self.write_optional(source)?;
        }
        Ok(())
    }

    /// Decodes into or encodes from a required field.
    pub fn bind<T: NodeConvertible>(&mut self, target: &mut T) -> Result<()> {
        match self.direction() {
            Direction::FromNode => self.bind_decode(target),
            Direction::ToNode => self.bind_encode(target),
        }
    }

    /// Decodes into or encodes from an optional field.
    pub fn bind_optional<T: NodeConvertible>(&mut self, target: &mut Option<T>) -> Result<()> {
        match self.direction() {
            Direction::FromNode => self.bind_decode_optional(target),
            Direction::ToNode => self.bind_encode_optional(target),
        }
    }

    /// Decodes the current field through `transformer`. No-op while encoding.
    pub fn bind_decode_with<N: FromNode, T>(
        &mut self,
        target: &mut T,
        transformer: &FromNodeTransformer<N, T>,
    ) -> Result<()> {
        if self.is_decoding() {
            *target = transformer.transform(self, self.field())?;
        }
        Ok(())
    }

    /// Encodes `source` through `transformer`. No-op while decoding.
    pub fn bind_encode_with<V, O: ToNode>(
        &mut self,
        source: &V,
        transformer: &ToNodeTransformer<V, O>,
    ) -> Result<()> {
        if self.is_encoding() {
            let node = transformer.transform(self, source)?;
            self.write(node)?;
        }
        Ok(())
    }

    /// Binds both directions through any [`Binding`].
    ///
    /// ```
    /// use nodemap::{FromNodeTransformer, Map};
    /// use nodemap_node::{Context, Node};
    ///
    /// let as_text = FromNodeTransformer::required(|s: String| s.parse::<i64>())
    ///     .transform_to_node(|n: &i64| Ok::<_, std::convert::Infallible>(n.to_string()));
    ///
    /// let source = Node::object([("n", "42")]);
    /// let context = Context::empty();
    /// let mut value = 0i64;
    /// Map::from_node(&source, &context).at("n").bind_with(&mut value, &as_text).unwrap();
    /// assert_eq!(value, 42);
    ///
    /// let mut map = Map::to_node();
    /// map.at("n").bind_with(&mut value, &as_text).unwrap();
    /// assert_eq!(map.into_node(), Some(source));
    /// ```
    pub fn bind_with<T, B: Binding<T>>(&mut self, target: &mut T, binding: &B) -> Result<()> {
        match self.direction() {
            Direction::FromNode => {
                *target = binding.decode(self, self.field())?;
            }
            Direction::ToNode => {
                let node = binding.encode(self, target)?;
                self.write(node)?;
            }
        }
        Ok(())
    }

    /// Runs a child pass for a nested [`Mappable`] field.
    ///
    /// `FoundNil` keys from the child are reported under this field's path.
    pub fn bind_nested<T: Mappable>(&mut self, target: &mut T) -> Result<()> {
        match self.direction() {
            Direction::FromNode => {
                let node = self.required_field::<T>()?;
                *target = self.decode_child(node, self.last_key().clone())?;
            }
            Direction::ToNode => {
                let node = self.encode_child(target, self.last_key())?;
                self.write(node)?;
            }
        }
        Ok(())
    }

    pub fn bind_nested_optional<T: Mappable>(&mut self, target: &mut Option<T>) -> Result<()> {
        match self.direction() {
            Direction::FromNode => {
                *target = match self.field() {
                    Some(node) if !node.is_null() => {
                        Some(self.decode_child(node, self.last_key().clone())?)
                    }
                    _ => None,
                };
            }
            Direction::ToNode => match target {
                Some(value) => {
                    let node = self.encode_child(value, self.last_key())?;
                    self.write(node)?;
                }
                None => self.write_optional::<Node>(&None)?,
            },
        }
        Ok(())
    }

    /// Binds an array of nested [`Mappable`] values.
    pub fn bind_nested_vec<T: Mappable>(&mut self, target: &mut Vec<T>) -> Result<()> {
        match self.direction() {
            Direction::FromNode => {
                let node = self.required_field::<Vec<T>>()?;
                let items = node
                    .as_array()
                    .ok_or_else(|| Error::type_mismatch("array", node))?;
                let mut decoded = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let mut prefix = self.last_key().clone();
                    prefix.push(index);
                    decoded.push(self.decode_child(item, prefix)?);
                }
                *target = decoded;
            }
            Direction::ToNode => {
                let mut items = Vec::with_capacity(target.len());
                for (index, value) in target.iter().enumerate() {
                    let mut prefix = self.last_key().clone();
                    prefix.push(index);
                    items.push(self.encode_child(value, &prefix)?);
                }
                self.write(Node::Array(items))?;
            }
        }
        Ok(())
    }

    fn decode_child<T: Mappable>(&self, node: &Node, prefix: Path) -> Result<T> {
        let mut child = Map::from_node_with(node, self.context(), self.config().clone());
        let mut value = T::default();
        value
            .sequence(&mut child)
            .map_err(|err| err.within(&prefix))?;
        Ok(value)
    }

    fn encode_child<T: Mappable>(&self, value: &T, prefix: &Path) -> Result<Node> {
        let mut child = Map::to_node_with(self.config().clone());
        let mut copy = value.clone();
        copy.sequence(&mut child).map_err(|err| err.within(prefix))?;
        Ok(child.into_node().unwrap_or_default())
    }
}
