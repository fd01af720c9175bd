//! Composable conversion wrappers used inside mapping routines.
//!
//! A transformer holds only its function. The [`Map`] of the running pass is
//! lent to `transform` for the duration of the call, which is where missing
//! input is reported against [`Map::last_key`].

use nodemap_node::{type_name, BoxError, Error, FromNode, Node, Result, ToNode};

use crate::map::Map;

/// How a [`Transformer`] treats a missing input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPolicy {
    /// Absence fails with [`Error::FoundNil`].
    Required,
    /// Absence is handed to the function as `None`.
    Optional,
}

enum TransformFn<I, O> {
    Required(Box<dyn Fn(I) -> Result<O>>),
    Optional(Box<dyn Fn(Option<I>) -> Result<O>>),
}

/// A function from `I` to `O` with an explicit [`InputPolicy`].
pub struct Transformer<I, O> {
    func: TransformFn<I, O>,
}

impl<I: 'static, O: 'static> Transformer<I, O> {
    /// Wraps a function that needs a value; absence is an error.
    pub fn required<E, F>(func: F) -> Self
    where
        E: Into<BoxError> + 'static,
        F: Fn(I) -> std::result::Result<O, E> + 'static,
    {
        Transformer {
            func: TransformFn::Required(Box::new(move |input| func(input).map_err(Error::transform))),
        }
    }

    /// Wraps a function that decides for itself what absence means.
    pub fn optional<E, F>(func: F) -> Self
    where
        E: Into<BoxError> + 'static,
        F: Fn(Option<I>) -> std::result::Result<O, E> + 'static,
    {
        Transformer {
            func: TransformFn::Optional(Box::new(move |input| func(input).map_err(Error::transform))),
        }
    }
}

impl<I, O> Transformer<I, O> {
    pub fn policy(&self) -> InputPolicy {
        match self.func {
            TransformFn::Required(_) => InputPolicy::Required,
            TransformFn::Optional(_) => InputPolicy::Optional,
        }
    }

    pub fn transform(&self, map: &Map<'_>, value: Option<I>) -> Result<O> {
        match (&self.func, value) {
            (TransformFn::Required(func), Some(value)) => func(value),
            (TransformFn::Required(_), None) => {
                Err(Error::found_nil(map.last_key().clone(), type_name::<I>()))
            }
            (TransformFn::Optional(func), value) => func(value),
        }
    }
}

/// Strictly decodes a node to `N`, then transforms it to `T`.
///
/// ```
/// use nodemap::{FromNodeTransformer, Map};
/// use nodemap_node::{Context, Node};
///
/// let parse = FromNodeTransformer::required(|s: String| s.parse::<i64>());
/// let source = Node::object([("n", "42")]);
/// let context = Context::empty();
/// let mut map = Map::from_node(&source, &context);
/// map.at("n");
/// assert_eq!(parse.transform(&map, map.result()).unwrap(), 42);
/// ```
pub struct FromNodeTransformer<N, T> {
    base: Transformer<N, T>,
}

impl<N: FromNode + 'static, T: 'static> FromNodeTransformer<N, T> {
    pub fn required<E, F>(func: F) -> Self
    where
        E: Into<BoxError> + 'static,
        F: Fn(N) -> std::result::Result<T, E> + 'static,
    {
        FromNodeTransformer {
            base: Transformer::required(func),
        }
    }

    pub fn optional<E, F>(func: F) -> Self
    where
        E: Into<BoxError> + 'static,
        F: Fn(Option<N>) -> std::result::Result<T, E> + 'static,
    {
        FromNodeTransformer {
            base: Transformer::optional(func),
        }
    }

    /// Attaches an encode step, yielding a [`TwoWayTransformer`].
    pub fn transform_to_node<O, E, F>(self, func: F) -> TwoWayTransformer<N, T, O>
    where
        O: ToNode + 'static,
        E: Into<BoxError> + 'static,
        F: Fn(&T) -> std::result::Result<O, E> + 'static,
    {
        TwoWayTransformer::new(self, ToNodeTransformer::new(func))
    }
}

impl<N: FromNode, T> FromNodeTransformer<N, T> {
    pub fn policy(&self) -> InputPolicy {
        self.base.policy()
    }

    /// Decodes `node` (if present) as `N` and runs the wrapped function.
    ///
    /// A tag mismatch while decoding `N` propagates unchanged.
    pub fn transform(&self, map: &Map<'_>, node: Option<&Node>) -> Result<T> {
        let value = match node {
            Some(node) => Some(N::from_node(node, map.context())?),
            None => None,
        };
        self.base.transform(map, value)
    }
}

/// Transforms a `V` into an intermediate `O`, then encodes it.
pub struct ToNodeTransformer<V, O> {
    func: Box<dyn Fn(&V) -> Result<O>>,
}

impl<V: 'static, O: ToNode + 'static> ToNodeTransformer<V, O> {
    pub fn new<E, F>(func: F) -> Self
    where
        E: Into<BoxError> + 'static,
        F: Fn(&V) -> std::result::Result<O, E> + 'static,
    {
        ToNodeTransformer {
            func: Box::new(move |value: &V| func(value).map_err(Error::transform)),
        }
    }

    /// Attaches a required decode step, yielding a [`TwoWayTransformer`].
    pub fn transform_from_node<N, E, F>(self, func: F) -> TwoWayTransformer<N, V, O>
    where
        N: FromNode + 'static,
        E: Into<BoxError> + 'static,
        F: Fn(N) -> std::result::Result<V, E> + 'static,
    {
        TwoWayTransformer::new(FromNodeTransformer::required(func), self)
    }

    /// Attaches an optional decode step, yielding a [`TwoWayTransformer`].
    pub fn transform_from_optional_node<N, E, F>(self, func: F) -> TwoWayTransformer<N, V, O>
    where
        N: FromNode + 'static,
        E: Into<BoxError> + 'static,
        F: Fn(Option<N>) -> std::result::Result<V, E> + 'static,
    {
        TwoWayTransformer::new(FromNodeTransformer::optional(func), self)
    }
}

impl<V, O: ToNode> ToNodeTransformer<V, O> {
    /// Runs the wrapped function and encodes its output.
    pub fn transform(&self, _map: &Map<'_>, value: &V) -> Result<Node> {
        (self.func)(value).map(|output| output.to_node())
    }
}

/// A decode half and an encode half for the same field type `T`.
///
/// Neither half is tied to a map, so a pair can never disagree about the
/// direction: the map passed at bind time decides which half runs.
///
/// ```
/// use nodemap::FromNodeTransformer;
///
/// let two_way = FromNodeTransformer::required(|s: String| s.parse::<i64>())
///     .transform_to_node(|n: &i64| Ok::<_, std::convert::Infallible>(n.to_string()));
/// # let _ = two_way;
/// ```
pub struct TwoWayTransformer<N, T, O> {
    from_node: FromNodeTransformer<N, T>,
    to_node: ToNodeTransformer<T, O>,
}

impl<N, T, O> TwoWayTransformer<N, T, O> {
    pub fn new(from_node: FromNodeTransformer<N, T>, to_node: ToNodeTransformer<T, O>) -> Self {
        TwoWayTransformer { from_node, to_node }
    }

    pub fn from_node_half(&self) -> &FromNodeTransformer<N, T> {
        &self.from_node
    }

    pub fn to_node_half(&self) -> &ToNodeTransformer<T, O> {
        &self.to_node
    }

    pub fn into_halves(self) -> (FromNodeTransformer<N, T>, ToNodeTransformer<T, O>) {
        (self.from_node, self.to_node)
    }
}

impl<N: FromNode, T, O: ToNode> TwoWayTransformer<N, T, O> {
    pub fn decode(&self, map: &Map<'_>, node: Option<&Node>) -> Result<T> {
        self.from_node.transform(map, node)
    }

    pub fn encode(&self, map: &Map<'_>, value: &T) -> Result<Node> {
        self.to_node.transform(map, value)
    }
}
