// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML serializer for document trees.
//!
//! Renders a [`Document`] into block-style YAML, emitting each entry's comment
//! lines directly above its key at the key's indentation. Scalars and keys go
//! through `serde_yaml`, so a string that would re-parse as a number, a boolean
//! or `null` comes out quoted.

use crate::domain::{DocEntry, DocNode, Document, RenderedDocument, Result, Scalar, SpecError};

/// Longest key YAML accepts before the `:` of an implicit mapping entry.
const IMPLICIT_KEY_LIMIT: usize = 1024;

/// Which elements of a sequence of objects carry field comments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ArrayCommentStyle {
    /// Only the first element is commented.
    #[default]
    FirstElement,
    /// Every element is commented.
    AllElements,
}

/// Options controlling how documents are rendered.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::{ArrayCommentStyle, RenderOptions};
///
/// let options = RenderOptions::default()
///     .with_indent(4)
///     .unwrap()
///     .with_array_comment_style(ArrayCommentStyle::AllElements);
/// assert_eq!(options.indent(), 4);
///
/// assert!(RenderOptions::default().with_indent(1).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    indent: usize,
    array_comment_style: ArrayCommentStyle,
}

impl RenderOptions {
    /// Smallest accepted indentation unit.
    pub const MIN_INDENT: usize = 2;
    /// Largest accepted indentation unit.
    pub const MAX_INDENT: usize = 8;

    /// Sets the indentation unit used for nested mappings.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::RenderError`] if `indent` is outside
    /// `MIN_INDENT..=MAX_INDENT`.
    pub fn with_indent(mut self, indent: usize) -> Result<Self> {
        if !(Self::MIN_INDENT..=Self::MAX_INDENT).contains(&indent) {
            return Err(SpecError::RenderError {
                message: format!(
                    "Indent must be between {} and {}, got {}",
                    Self::MIN_INDENT,
                    Self::MAX_INDENT,
                    indent
                ),
                source: None,
            });
        }
        self.indent = indent;
        Ok(self)
    }

    /// Sets the array comment style.
    pub fn with_array_comment_style(mut self, style: ArrayCommentStyle) -> Self {
        self.array_comment_style = style;
        self
    }

    /// Returns the indentation unit.
    pub fn indent(&self) -> usize {
        self.indent
    }

    /// Returns the array comment style.
    pub fn array_comment_style(&self) -> ArrayCommentStyle {
        self.array_comment_style
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            indent: Self::MIN_INDENT,
            array_comment_style: ArrayCommentStyle::default(),
        }
    }
}

/// Renders document trees to text.
///
/// Rendering is deterministic: the same tree and options always give the same
/// lines.
///
/// # Examples
///
/// ```
/// use yamlspec::domain::{DocEntry, DocNode, Document, Scalar, Serializer, RenderOptions};
///
/// let doc = Document {
///     header: vec!["Server settings".to_string()],
///     entries: vec![
///         DocEntry {
///             key: "port".to_string(),
///             comments: vec!["The port to bind".to_string()],
///             node: DocNode::Scalar(Scalar::Int(25565)),
///         },
///         DocEntry {
///             key: "motd".to_string(),
///             comments: Vec::new(),
///             node: DocNode::Scalar(Scalar::String("true".to_string())),
///         },
///     ],
/// };
///
/// let text = Serializer::new(RenderOptions::default()).render(&doc).unwrap().text();
/// assert_eq!(text, "# Server settings\n\n# The port to bind\nport: 25565\nmotd: 'true'\n");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Serializer {
    options: RenderOptions,
}

impl Serializer {
    /// Creates a serializer with the given options.
    pub fn new(options: RenderOptions) -> Self {
        Serializer { options }
    }

    /// Returns the options in use.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Renders a document tree.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::RenderError`] if a scalar or key cannot be rendered.
    pub fn render(&self, document: &Document) -> Result<RenderedDocument> {
        let mut out = Vec::new();
        for line in &document.header {
            out.push(comment_line(line));
        }
        if !document.header.is_empty() {
            out.push(String::new());
        }
        for entry in &document.entries {
            self.write_entry(entry, 0, None, true, &mut out)?;
        }
        Ok(RenderedDocument::new(out))
    }

    /// Writes one mapping entry whose key starts at column `indent`.
    ///
    /// `dash` is the column of the sequence dash when the entry is the first key
    /// of a mapping inside a sequence; the key then shares the dash line. Keys
    /// too long for an implicit entry are written as `? key` with the value on
    /// a `:` line below.
    fn write_entry(
        &self,
        entry: &DocEntry,
        indent: usize,
        dash: Option<usize>,
        comments: bool,
        out: &mut Vec<String>,
    ) -> Result<()> {
        if comments {
            push_comments(&entry.comments, dash.unwrap_or(indent), out);
        }
        let prefix = match dash {
            Some(column) => format!("{}- ", spaces(column)),
            None => spaces(indent),
        };
        let key = render_key(&entry.key)?;
        let head = if key.len() < IMPLICIT_KEY_LIMIT {
            format!("{}{}:", prefix, key)
        } else {
            out.push(format!("{}? {}", prefix, key));
            format!("{}:", spaces(indent))
        };
        match &entry.node {
            DocNode::Scalar(scalar) => {
                out.push(format!("{} {}", head, render_scalar(scalar)?));
            }
            DocNode::Sequence(items) if items.is_empty() => {
                out.push(format!("{} []", head));
            }
            DocNode::Mapping(entries) if entries.is_empty() => {
                out.push(format!("{} {{}}", head));
            }
            DocNode::Sequence(items) => {
                out.push(head);
                self.write_items(items, indent, comments, out)?;
            }
            DocNode::Mapping(entries) => {
                out.push(head);
                for child in entries {
                    self.write_entry(child, indent + self.options.indent, None, comments, out)?;
                }
            }
        }
        Ok(())
    }

    /// Writes sequence items with their dash at column `dash`.
    fn write_items(
        &self,
        items: &[DocNode],
        dash: usize,
        comments: bool,
        out: &mut Vec<String>,
    ) -> Result<()> {
        let pad = spaces(dash);
        for (i, item) in items.iter().enumerate() {
            let item_comments = comments
                && (i == 0 || self.options.array_comment_style == ArrayCommentStyle::AllElements);
            match item {
                DocNode::Scalar(scalar) => out.push(format!("{}- {}", pad, render_scalar(scalar)?)),
                DocNode::Sequence(inner) if inner.is_empty() => out.push(format!("{}- []", pad)),
                DocNode::Mapping(entries) if entries.is_empty() => {
                    out.push(format!("{}- {{}}", pad))
                }
                DocNode::Sequence(inner) => {
                    out.push(format!("{}-", pad));
                    self.write_items(inner, dash + 2, item_comments, out)?;
                }
                DocNode::Mapping(entries) => {
                    for (j, entry) in entries.iter().enumerate() {
                        let lead = if j == 0 { Some(dash) } else { None };
                        self.write_entry(entry, dash + 2, lead, item_comments, out)?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn spaces(n: usize) -> String {
    " ".repeat(n)
}

/// Formats one comment line.
fn comment_line(text: &str) -> String {
    if text.starts_with('#') {
        format!("#{}", text)
    } else if text.trim().is_empty() {
        "#".to_string()
    } else {
        format!("# {}", text)
    }
}

/// Writes comment lines at `column`, preceded by a blank line when needed.
fn push_comments(comments: &[String], column: usize, out: &mut Vec<String>) {
    if comments.is_empty() {
        return;
    }
    if out.last().is_some_and(|line| !line.is_empty()) {
        out.push(String::new());
    }
    let pad = spaces(column);
    for comment in comments {
        for line in comment.split('\n') {
            out.push(format!("{}{}", pad, comment_line(line)));
        }
    }
}

fn render_key(key: &str) -> Result<String> {
    render_string(key)
}

fn render_scalar(scalar: &Scalar) -> Result<String> {
    match scalar {
        Scalar::Null => Ok("null".to_string()),
        Scalar::Bool(b) => Ok(b.to_string()),
        Scalar::Int(i) => Ok(i.to_string()),
        Scalar::Float(f) => to_yaml(f),
        Scalar::String(s) => render_string(s),
    }
}

fn render_string(s: &str) -> Result<String> {
    let rendered = to_yaml(&s)?;
    if rendered.contains('\n') {
        Ok(double_quoted(s))
    } else {
        Ok(rendered)
    }
}

fn to_yaml<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let text = serde_yaml::to_string(value).map_err(|e| SpecError::RenderError {
        message: e.to_string(),
        source: Some(Box::new(e)),
    })?;
    Ok(text.trim_end_matches('\n').to_string())
}

/// Renders a string in YAML double-quoted style on a single line.
fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control()
                || matches!(c, '\u{85}' | '\u{2028}' | '\u{2029}' | '\u{feff}') =>
            {
                out.push_str(&format!("\\u{:04X}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
