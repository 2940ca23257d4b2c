//! Flat JSON shape of the diff contract and its validation.
//!
//! Collaborators send ops as `{"kind": ..., "content": ...}` objects with
//! `leftContent`/`rightContent`/`charDiff` on replacements. Every field is
//! optional on the wire; conversion into [`DiffOp`] rejects any op whose
//! fields do not match its kind.

use super::types::{CharDiffKind, CharDiffOp, DiffOp, DiffOpKind, Side};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{kind:?} op is missing `{field}`")]
    MissingField {
        kind: DiffOpKind,
        field: &'static str,
    },

    #[error("{kind:?} op must not carry `{field}`")]
    UnexpectedField {
        kind: DiffOpKind,
        field: &'static str,
    },

    #[error("char diff does not reconstruct the {side} text: expected {expected:?}, got {actual:?}")]
    CharDiffMismatch {
        side: Side,
        expected: String,
        actual: String,
    },

    #[error("op #{index}: {source}")]
    AtIndex {
        index: usize,
        #[source]
        source: Box<ContractError>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireDiffOp {
    pub kind: DiffOpKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub right_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub char_diff: Option<Vec<CharDiffOp>>,
}

impl WireDiffOp {
    fn reject(&self, field: &'static str, present: bool) -> Result<(), ContractError> {
        if present {
            return Err(ContractError::UnexpectedField {
                kind: self.kind,
                field,
            });
        }
        Ok(())
    }

    fn line_content(self) -> Result<String, ContractError> {
        self.reject("leftContent", self.left_content.is_some())?;
        self.reject("rightContent", self.right_content.is_some())?;
        self.reject("charDiff", self.char_diff.is_some())?;
        self.content.ok_or(ContractError::MissingField {
            kind: self.kind,
            field: "content",
        })
    }
}

impl TryFrom<WireDiffOp> for DiffOp {
    type Error = ContractError;

    fn try_from(wire: WireDiffOp) -> Result<Self, Self::Error> {
        let op = match wire.kind {
            DiffOpKind::Equal => DiffOp::Equal(wire.line_content()?),
            DiffOpKind::Delete => DiffOp::Delete(wire.line_content()?),
            DiffOpKind::Insert => DiffOp::Insert(wire.line_content()?),
            DiffOpKind::Replace => {
                wire.reject("content", wire.content.is_some())?;
                let left = wire.left_content.ok_or(ContractError::MissingField {
                    kind: DiffOpKind::Replace,
                    field: "leftContent",
                })?;
                let right = wire.right_content.ok_or(ContractError::MissingField {
                    kind: DiffOpKind::Replace,
                    field: "rightContent",
                })?;
                DiffOp::Replace {
                    left,
                    right,
                    char_diff: wire.char_diff,
                }
            }
        };
        op.validate()?;
        Ok(op)
    }
}

impl From<DiffOp> for WireDiffOp {
    fn from(op: DiffOp) -> Self {
        let kind = op.kind();
        let mut wire = WireDiffOp {
            kind,
            content: None,
            left_content: None,
            right_content: None,
            char_diff: None,
        };
        match op {
            DiffOp::Equal(content) | DiffOp::Delete(content) | DiffOp::Insert(content) => {
                wire.content = Some(content);
            }
            DiffOp::Replace {
                left,
                right,
                char_diff,
            } => {
                wire.left_content = Some(left);
                wire.right_content = Some(right);
                wire.char_diff = char_diff;
            }
        }
        wire
    }
}

impl DiffOp {
    /// Check that a replacement's char diff rebuilds both of its texts.
    /// Other kinds are always valid.
    pub fn validate(&self) -> Result<(), ContractError> {
        let DiffOp::Replace {
            left,
            right,
            char_diff: Some(char_diff),
        } = self
        else {
            return Ok(());
        };

        for (side, expected) in [(Side::Left, left), (Side::Right, right)] {
            let dropped = match side {
                Side::Left => CharDiffKind::Insert,
                Side::Right => CharDiffKind::Delete,
            };
            let actual: String = char_diff
                .iter()
                .filter(|op| op.kind != dropped)
                .map(|op| op.content.as_str())
                .collect();
            if &actual != expected {
                return Err(ContractError::CharDiffMismatch {
                    side,
                    expected: expected.clone(),
                    actual,
                });
            }
        }
        Ok(())
    }
}

/// Decode and validate a whole op sequence, reporting the first bad op by index
pub fn parse_ops(json: &str) -> Result<Vec<DiffOp>, ContractError> {
    let wire: Vec<WireDiffOp> = serde_json::from_str(json)?;
    wire.into_iter()
        .enumerate()
        .map(|(index, op)| {
            DiffOp::try_from(op).map_err(|e| ContractError::AtIndex {
                index,
                source: Box::new(e),
            })
        })
        .collect()
}
