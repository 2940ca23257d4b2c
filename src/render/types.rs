use super::wire::WireDiffOp;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;

/// Line-level classification of one diff unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffOpKind {
    Equal,
    Delete,
    Insert,
    Replace,
}

/// Character-level classification; never nests further than this
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharDiffKind {
    Equal,
    Delete,
    Insert,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharDiffOp {
    pub kind: CharDiffKind,
    pub content: String,
}

impl CharDiffOp {
    pub fn equal(content: impl Into<String>) -> Self {
        Self {
            kind: CharDiffKind::Equal,
            content: content.into(),
        }
    }

    pub fn delete(content: impl Into<String>) -> Self {
        Self {
            kind: CharDiffKind::Delete,
            content: content.into(),
        }
    }

    pub fn insert(content: impl Into<String>) -> Self {
        Self {
            kind: CharDiffKind::Insert,
            content: content.into(),
        }
    }
}

/// One entry of the line-level diff sequence.
///
/// Each variant carries only the fields that are meaningful for it, so an
/// `Equal` without content or a `Delete` with a char diff cannot be built.
/// The flat JSON shape used by collaborators goes through [`WireDiffOp`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireDiffOp", into = "WireDiffOp")]
pub enum DiffOp {
    Equal(String),
    Delete(String),
    Insert(String),
    Replace {
        left: String,
        right: String,
        char_diff: Option<Vec<CharDiffOp>>,
    },
}

impl DiffOp {
    pub fn equal(content: impl Into<String>) -> Self {
        DiffOp::Equal(content.into())
    }

    pub fn delete(content: impl Into<String>) -> Self {
        DiffOp::Delete(content.into())
    }

    pub fn insert(content: impl Into<String>) -> Self {
        DiffOp::Insert(content.into())
    }

    pub fn replace(left: impl Into<String>, right: impl Into<String>) -> Self {
        DiffOp::Replace {
            left: left.into(),
            right: right.into(),
            char_diff: None,
        }
    }

    pub fn replace_with_chars(
        left: impl Into<String>,
        right: impl Into<String>,
        char_diff: Vec<CharDiffOp>,
    ) -> Self {
        DiffOp::Replace {
            left: left.into(),
            right: right.into(),
            char_diff: Some(char_diff),
        }
    }

    pub fn kind(&self) -> DiffOpKind {
        match self {
            DiffOp::Equal(_) => DiffOpKind::Equal,
            DiffOp::Delete(_) => DiffOpKind::Delete,
            DiffOp::Insert(_) => DiffOpKind::Insert,
            DiffOp::Replace { .. } => DiffOpKind::Replace,
        }
    }

    /// The same unit seen from the other direction: old and new swap roles
    pub fn inverted(&self) -> Self {
        match self {
            DiffOp::Equal(content) => DiffOp::Equal(content.clone()),
            DiffOp::Delete(content) => DiffOp::Insert(content.clone()),
            DiffOp::Insert(content) => DiffOp::Delete(content.clone()),
            DiffOp::Replace {
                left,
                right,
                char_diff,
            } => DiffOp::Replace {
                left: right.clone(),
                right: left.clone(),
                char_diff: char_diff.as_ref().map(|ops| {
                    ops.iter()
                        .map(|op| CharDiffOp {
                            kind: match op.kind {
                                CharDiffKind::Equal => CharDiffKind::Equal,
                                CharDiffKind::Delete => CharDiffKind::Insert,
                                CharDiffKind::Insert => CharDiffKind::Delete,
                            },
                            content: op.content.clone(),
                        })
                        .collect()
                }),
            },
        }
    }
}

/// Which of the two compared documents an element belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpanStyle {
    Plain,
    Removed,
    Added,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledSpan {
    pub style: SpanStyle,
    pub content: String,
}

impl StyledSpan {
    pub fn plain(content: impl Into<String>) -> Self {
        Self {
            style: SpanStyle::Plain,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "type", content = "value")]
pub enum LineBody {
    Plain(String),
    Spans(Vec<StyledSpan>),
}

impl LineBody {
    /// Flattened text of the body, styling dropped
    pub fn text(&self) -> String {
        match self {
            LineBody::Plain(text) => text.clone(),
            LineBody::Spans(spans) => spans.iter().map(|s| s.content.as_str()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            LineBody::Plain(text) => text.is_empty(),
            LineBody::Spans(spans) => spans.iter().all(|s| s.content.is_empty()),
        }
    }
}

/// One side of one row in the two-column view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedLine {
    /// `None` marks a placeholder cell
    pub line_number: Option<NonZeroUsize>,
    pub body: LineBody,
    pub row_class: DiffOpKind,
}

impl RenderedLine {
    pub fn numbered(line_number: NonZeroUsize, body: LineBody, row_class: DiffOpKind) -> Self {
        Self {
            line_number: Some(line_number),
            body,
            row_class,
        }
    }

    pub fn placeholder(row_class: DiffOpKind) -> Self {
        Self {
            line_number: None,
            body: LineBody::Plain(String::new()),
            row_class,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.line_number.is_none()
    }
}
