// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document tree and rendered document types.

use std::fmt;

/// A scalar leaf of a document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    /// `null`
    Null,
    /// A boolean
    Bool(bool),
    /// An integer
    Int(i64),
    /// A float
    Float(f64),
    /// A string
    String(String),
}

/// A node of a document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum DocNode {
    /// A scalar value
    Scalar(Scalar),
    /// A sequence of nodes
    Sequence(Vec<DocNode>),
    /// A mapping of keyed entries
    Mapping(Vec<DocEntry>),
}

/// A keyed entry of a mapping, with the comment lines rendered above it.
#[derive(Clone, Debug, PartialEq)]
pub struct DocEntry {
    /// The key
    pub key: String,
    /// Comment lines, without the leading `#`
    pub comments: Vec<String>,
    /// The value
    pub node: DocNode,
}

/// An ordered document tree, ready to be rendered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    /// Header comment lines
    pub header: Vec<String>,
    /// Root entries in document order
    pub entries: Vec<DocEntry>,
}

/// The text lines of a rendered document.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::RenderedDocument;
///
/// let doc = RenderedDocument::new(vec!["# Header".to_string(), "".to_string(), "a: 1".to_string()]);
/// assert_eq!(doc.text(), "# Header\n\na: 1\n");
/// assert_eq!(RenderedDocument::new(Vec::new()).text(), "");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    lines: Vec<String>,
}

impl RenderedDocument {
    /// Wraps rendered lines.
    pub fn new(lines: Vec<String>) -> Self {
        RenderedDocument { lines }
    }

    /// Returns the lines, without line terminators.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns the document text: lines joined with `\n`, plus a trailing newline.
    pub fn text(&self) -> String {
        if self.lines.is_empty() {
            return String::new();
        }
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}
