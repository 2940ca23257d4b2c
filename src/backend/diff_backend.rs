use crate::config::Settings;
use crate::render::{CharDiffKind, CharDiffOp, ContractError, DiffOp};
use similar::{ChangeTag, TextDiff};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("Diff provider error: {0}")]
    Provider(String),

    #[error("Invalid diff from provider: {0}")]
    Contract(#[from] ContractError),

    #[error("Diff worker stopped: {0}")]
    Worker(String),
}

/// Something that can turn two documents into a line-level op sequence
pub trait DiffProvider: Send + Sync {
    fn compute(&self, old: &str, new: &str) -> Result<Vec<DiffOp>, CompareError>;
}

impl<F> DiffProvider for F
where
    F: Fn(&str, &str) -> Result<Vec<DiffOp>, CompareError> + Send + Sync,
{
    fn compute(&self, old: &str, new: &str) -> Result<Vec<DiffOp>, CompareError> {
        self(old, new)
    }
}

/// Line diff built on `similar`, pairing removed/added blocks into replacements
#[derive(Debug, Clone)]
pub struct LineDiffProvider {
    char_level: bool,
    trim_line_endings: bool,
}

impl Default for LineDiffProvider {
    fn default() -> Self {
        Self {
            char_level: true,
            trim_line_endings: true,
        }
    }
}

impl LineDiffProvider {
    pub fn new(char_level: bool, trim_line_endings: bool) -> Self {
        Self {
            char_level,
            trim_line_endings,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.char_level, settings.trim_line_endings)
    }

    fn line_text(&self, value: &str) -> String {
        if self.trim_line_endings {
            value.trim_end_matches(['\n', '\r']).to_string()
        } else {
            value.to_string()
        }
    }

    fn replacement(&self, left: String, right: String) -> DiffOp {
        if self.char_level {
            let char_diff = char_diff(&left, &right);
            DiffOp::replace_with_chars(left, right, char_diff)
        } else {
            DiffOp::replace(left, right)
        }
    }
}

impl DiffProvider for LineDiffProvider {
    fn compute(&self, old: &str, new: &str) -> Result<Vec<DiffOp>, CompareError> {
        let diff = TextDiff::from_lines(old, new);
        let changes: Vec<(ChangeTag, String)> = diff
            .iter_all_changes()
            .map(|change| (change.tag(), self.line_text(change.value())))
            .collect();

        let mut ops = Vec::with_capacity(changes.len());
        let mut i = 0usize;

        while i < changes.len() {
            match changes[i].0 {
                ChangeTag::Equal => {
                    ops.push(DiffOp::Equal(changes[i].1.clone()));
                    i += 1;
                }
                ChangeTag::Delete => {
                    // removed block
                    let removed_start = i;
                    while i < changes.len() && changes[i].0 == ChangeTag::Delete {
                        i += 1;
                    }
                    // directly following added block, if any
                    let added_start = i;
                    while i < changes.len() && changes[i].0 == ChangeTag::Insert {
                        i += 1;
                    }
                    let removed = &changes[removed_start..added_start];
                    let added = &changes[added_start..i];

                    // pair line by line, the longer block keeps its surplus
                    let paired = removed.len().min(added.len());
                    for (old_line, new_line) in removed.iter().zip(added.iter()) {
                        ops.push(self.replacement(old_line.1.clone(), new_line.1.clone()));
                    }
                    for (_, line) in &removed[paired..] {
                        ops.push(DiffOp::Delete(line.clone()));
                    }
                    for (_, line) in &added[paired..] {
                        ops.push(DiffOp::Insert(line.clone()));
                    }
                }
                ChangeTag::Insert => {
                    // added without preceding removal
                    ops.push(DiffOp::Insert(changes[i].1.clone()));
                    i += 1;
                }
            }
        }

        tracing::debug!(
            old_lines = diff.old_slices().len(),
            new_lines = diff.new_slices().len(),
            ops = ops.len(),
            "computed line diff"
        );
        Ok(ops)
    }
}

/// Character-level diff of one modified line, adjacent same-kind runs merged
pub fn char_diff(old: &str, new: &str) -> Vec<CharDiffOp> {
    let diff = TextDiff::from_chars(old, new);
    let mut ops: Vec<CharDiffOp> = Vec::new();

    for change in diff.iter_all_changes() {
        let kind = match change.tag() {
            ChangeTag::Equal => CharDiffKind::Equal,
            ChangeTag::Delete => CharDiffKind::Delete,
            ChangeTag::Insert => CharDiffKind::Insert,
        };
        match ops.last_mut() {
            Some(last) if last.kind == kind => last.content.push_str(change.value()),
            _ => ops.push(CharDiffOp {
                kind,
                content: change.value().to_string(),
            }),
        }
    }

    ops
}

/// Check if ops contain meaningful changes (non-blank added, removed or modified text)
pub fn has_meaningful_changes(ops: &[DiffOp]) -> bool {
    ops.iter().any(|op| match op {
        DiffOp::Equal(_) => false,
        DiffOp::Delete(content) | DiffOp::Insert(content) => !content.trim().is_empty(),
        DiffOp::Replace { left, right, .. } => left.trim() != right.trim(),
    })
}
