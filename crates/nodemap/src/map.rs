//! The directional accessor driven by a mapping routine.

use log::trace;
use nodemap_node::{Context, Node, Path, Result};

use crate::config::MapConfig;

/// Which way a [`Map`] moves data. Fixed for the map's whole lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Reading a source node into typed fields.
    FromNode,
    /// Writing typed fields into an accumulator node.
    ToNode,
}

enum State<'a> {
    FromNode {
        source: &'a Node,
        context: &'a Context,
        result: Option<&'a Node>,
    },
    ToNode {
        accumulator: Node,
        context: Context,
    },
}

/// Coordinates one decode or encode pass over a node.
///
/// A mapping routine addresses each field with [`Map::at`] and then issues
/// exactly one bind call (see the `bind*` methods); the bind call, not the
/// routine, decides what happens for the current [`Direction`].
///
/// ```
/// use nodemap::{Direction, Map};
/// use nodemap_node::{Context, Node};
///
/// let source = Node::object([("name", "Ada")]);
/// let context = Context::empty();
/// let mut map = Map::from_node(&source, &context);
/// map.at("name");
/// assert_eq!(map.direction(), Direction::FromNode);
/// assert_eq!(map.result(), Some(&Node::from("Ada")));
/// ```
pub struct Map<'a> {
    state: State<'a>,
    last_key: Path,
    config: MapConfig,
}

impl<'a> Map<'a> {
    /// A decode map reading `source`. It starts addressed at the root.
    pub fn from_node(source: &'a Node, context: &'a Context) -> Self {
        Self::from_node_with(source, context, MapConfig::default())
    }

    pub fn from_node_with(source: &'a Node, context: &'a Context, config: MapConfig) -> Self {
        Map {
            state: State::FromNode {
                source,
                context,
                result: Some(source),
            },
            last_key: Path::root(),
            config,
        }
    }

    /// An encode map with an empty object accumulator.
    pub fn to_node() -> Self {
        Self::to_node_with(MapConfig::default())
    }

    pub fn to_node_with(config: MapConfig) -> Self {
        Map {
            state: State::ToNode {
                accumulator: Node::empty_object(),
                context: Context::empty(),
            },
            last_key: Path::root(),
            config,
        }
    }

    pub fn direction(&self) -> Direction {
        match self.state {
            State::FromNode { .. } => Direction::FromNode,
            State::ToNode { .. } => Direction::ToNode,
        }
    }

    pub fn is_decoding(&self) -> bool {
        self.direction() == Direction::FromNode
    }

    pub fn is_encoding(&self) -> bool {
        self.direction() == Direction::ToNode
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    /// The pass context. Encode maps carry an empty one.
    pub fn context(&self) -> &Context {
        match &self.state {
            State::FromNode { context, .. } => *context,
            State::ToNode { context, .. } => context,
        }
    }

    /// The most recently addressed field path.
    pub fn last_key(&self) -> &Path {
        &self.last_key
    }

    /// Addresses a field. Keys are resolved from the source root.
    ///
    /// With [`MapConfig::key_separator`] set, string keys are split into
    /// nested segments first.
    pub fn at(&mut self, key: impl Into<Path>) -> &mut Self {
        let mut key = key.into();
        if let Some(separator) = self.config.key_separator {
            key = key.split_keys(separator);
        }
        trace!("map {:?} at `{}`", self.direction(), key);
        if let State::FromNode { source, result, .. } = &mut self.state {
            let source: &'a Node = *source;
            *result = source.get_path(&key);
        }
        self.last_key = key;
        self
    }

    /// The node at the current address. Always `None` while encoding.
    pub fn result(&self) -> Option<&'a Node> {
        match self.state {
            State::FromNode { result, .. } => result,
            State::ToNode { .. } => None,
        }
    }

    /// The current field as seen by bindings: [`Map::result`] with `Null`
    /// folded into absence when [`MapConfig::null_as_absent`] is set.
    pub fn field(&self) -> Option<&'a Node> {
        let node = self.result()?;
        if self.config.null_as_absent && node.is_null() {
            return None;
        }
        Some(node)
    }

    /// Stores `node` in the accumulator at [`Map::last_key`], creating
    /// intermediate containers. Ignored while decoding.
    ///
    /// Fails like [`Node::set_path`] when an index is too far past the end
    /// of its array.
    pub fn write(&mut self, node: Node) -> Result<()> {
        if let State::ToNode { accumulator, .. } = &mut self.state {
            trace!("map write `{}` ({})", self.last_key, node.type_name());
            accumulator.set_path(&self.last_key, node)?;
        }
        Ok(())
    }

    /// The accumulator built so far, while encoding.
    pub fn accumulator(&self) -> Option<&Node> {
        match &self.state {
            State::ToNode { accumulator, .. } => Some(accumulator),
            State::FromNode { .. } => None,
        }
    }

    /// Consumes the map, yielding the accumulator of an encode pass.
    pub fn into_node(self) -> Option<Node> {
        match self.state {
            State::ToNode { accumulator, .. } => Some(accumulator),
            State::FromNode { .. } => None,
        }
    }
}
