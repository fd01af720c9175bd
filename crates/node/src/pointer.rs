//! JSON Pointer (RFC 6901) strings as an alternate spelling of [`Path`].
//!
//! A pointer step carries no type, so it is parsed as a key. Only
//! [`Node::pointer`](crate::Node::pointer) reads a canonical decimal key as
//! an index, and only where the current node is an array.

use crate::path::{Path, PathSegment};

/// Unescapes a pointer component: `~1` becomes `/`, `~0` becomes `~`.
///
/// ```
/// use nodemap_node::pointer::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// ```
pub fn unescape_component(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    let mut chars = component.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('0') => {
                chars.next();
                out.push('~');
            }
            Some('1') => {
                chars.next();
                out.push('/');
            }
            // dangling or unknown escape: kept as written
            _ => out.push('~'),
        }
    }
    out
}

/// Escapes a pointer component: `~` becomes `~0`, `/` becomes `~1`.
///
/// ```
/// use nodemap_node::pointer::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// ```
pub fn escape_component(component: &str) -> String {
    let mut out = String::with_capacity(component.len());
    for c in component.chars() {
        match c {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            c => out.push(c),
        }
    }
    out
}

/// Parses a pointer into a key-only [`Path`].
///
/// The empty string is the root. A missing leading `/` is tolerated.
///
/// ```
/// use nodemap_node::{path, pointer::parse_pointer};
///
/// assert!(parse_pointer("").is_root());
/// assert_eq!(parse_pointer("/names/2"), path!["names", "2"]);
/// ```
pub fn parse_pointer(pointer: &str) -> Path {
    if pointer.is_empty() {
        return Path::root();
    }
    let body = pointer.strip_prefix('/').unwrap_or(pointer);
    body.split('/')
        .map(|step| PathSegment::Key(unescape_component(step)))
        .collect()
}

/// Formats segments as a pointer string. The root formats as `""`.
pub fn format_pointer(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        match segment {
            PathSegment::Key(key) => out.push_str(&escape_component(key)),
            PathSegment::Index(index) => out.push_str(&index.to_string()),
        }
    }
    out
}

/// Checks that `step` is a canonical array index: digits only, no leading zero.
pub fn is_valid_index(step: &str) -> bool {
    match step.as_bytes() {
        [b'0'] => true,
        [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}
