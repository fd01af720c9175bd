//! Per-pass mapping options.

use serde::{Deserialize, Serialize};

/// Options shared by a [`Map`](crate::Map) and every child map it spawns.
///
/// Deserializable from any serde format; missing fields take their defaults.
///
/// ```
/// use nodemap::MapConfig;
///
/// let config = MapConfig::default().with_key_separator('.');
/// assert!(config.null_as_absent);
/// assert_eq!(config.key_separator, Some('.'));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Treat an explicit `Null` field as absent while decoding.
    pub null_as_absent: bool,
    /// Split string keys given to [`Map::at`](crate::Map::at) on this character.
    pub key_separator: Option<char>,
    /// Optional bindings write nothing for `None`; otherwise they write `Null`.
    pub skip_none_on_encode: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            null_as_absent: true,
            key_separator: None,
            skip_none_on_encode: true,
        }
    }
}

impl MapConfig {
    pub fn with_null_as_absent(mut self, enabled: bool) -> Self {
        self.null_as_absent = enabled;
        self
    }

    pub fn with_key_separator(mut self, separator: char) -> Self {
        self.key_separator = Some(separator);
        self
    }

    pub fn with_skip_none_on_encode(mut self, enabled: bool) -> Self {
        self.skip_none_on_encode = enabled;
        self
    }
}
