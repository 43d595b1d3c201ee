// SPDX-License-Identifier: MIT OR Apache-2.0

//! Path type addressing values inside a spec document.
//!
//! This module provides the `SpecPath` type. Paths are used to report where a
//! binding or validation error happened and to address properties through
//! [`SpecService::get`](crate::domain::SpecService::get).

use std::fmt;

/// One step of a [`SpecPath`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A mapping key
    Key(String),
    /// A zero-based sequence index
    Index(usize),
}

/// A location inside a spec document.
///
/// Paths render in dot notation, with sequence indices in brackets:
/// `servers[1].host`. The empty path is the document root.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::SpecPath;
///
/// let path = SpecPath::from("messages.player-joined");
/// assert_eq!(path.len(), 2);
/// assert_eq!(path.to_string(), "messages.player-joined");
///
/// let nested = SpecPath::root().child("servers").index(1).child("host");
/// assert_eq!(nested.to_string(), "servers[1].host");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SpecPath(Vec<PathSegment>);

impl SpecPath {
    /// Returns the root path.
    pub fn root() -> Self {
        SpecPath(Vec::new())
    }

    /// Parses a path in dot notation, accepting `[n]` index suffixes.
    ///
    /// Empty segments are skipped, so `""` is the root path.
    ///
    /// # Examples
    ///
    /// ```
    /// use yamlspec::domain::spec_path::{PathSegment, SpecPath};
    ///
    /// let path = SpecPath::parse("servers[0].port");
    /// assert_eq!(
    ///     path.segments(),
    ///     &[
    ///         PathSegment::Key("servers".to_string()),
    ///         PathSegment::Index(0),
    ///         PathSegment::Key("port".to_string()),
    ///     ]
    /// );
    /// ```
    pub fn parse(path: &str) -> Self {
        let mut segments = Vec::new();
        for part in path.split('.') {
            let (key, mut rest) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if !key.is_empty() {
                segments.push(PathSegment::Key(key.to_string()));
            }
            while let Some(stripped) = rest.strip_prefix('[') {
                match stripped.split_once(']') {
                    Some((index, tail)) => {
                        match index.parse::<usize>() {
                            Ok(i) => segments.push(PathSegment::Index(i)),
                            Err(_) => segments.push(PathSegment::Key(format!("[{}]", index))),
                        }
                        rest = tail;
                    }
                    None => {
                        segments.push(PathSegment::Key(rest.to_string()));
                        rest = "";
                    }
                }
            }
        }
        SpecPath(segments)
    }

    /// Returns a new path with a key segment appended.
    pub fn child(&self, key: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Key(key.into()));
        SpecPath(segments)
    }

    /// Returns a new path with an index segment appended.
    pub fn index(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(index));
        SpecPath(segments)
    }

    /// Returns the segments of this path.
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the root path.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for SpecPath {
    fn from(s: &str) -> Self {
        SpecPath::parse(s)
    }
}

impl From<String> for SpecPath {
    fn from(s: String) -> Self {
        SpecPath::parse(&s)
    }
}

impl fmt::Display for SpecPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => write!(f, "{}", key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}
