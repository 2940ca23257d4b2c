//! Two-column layout of a line-level diff.
//!
//! [`render`] walks the op sequence once and emits one row per op on each
//! side. The left and right line numbers advance independently: a deleted
//! line only consumes a left number, an inserted line only a right one, and
//! the missing side gets a placeholder so both columns stay the same height.

mod highlight;
mod stats;
mod types;
mod wire;

use std::num::NonZeroUsize;

pub use highlight::highlight;
pub use stats::{CharStats, Stats, SummaryMode};
pub use types::{
    CharDiffKind, CharDiffOp, DiffOp, DiffOpKind, LineBody, RenderedLine, Side, SpanStyle,
    StyledSpan,
};
pub use wire::{ContractError, WireDiffOp, parse_ops};

/// Output of [`render`]; `left[i]` and `right[i]` describe the same op
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub left: Vec<RenderedLine>,
    pub right: Vec<RenderedLine>,
    pub stats: Stats,
}

impl Rendered {
    /// Rows as aligned (left, right) pairs
    pub fn rows(&self) -> impl Iterator<Item = (&RenderedLine, &RenderedLine)> {
        self.left.iter().zip(self.right.iter())
    }

    pub fn char_stats(&self) -> CharStats {
        CharStats::from_columns(&self.left, &self.right)
    }

    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }
}

/// Next line number for each side
struct LineCounters {
    left: NonZeroUsize,
    right: NonZeroUsize,
}

impl LineCounters {
    fn new() -> Self {
        Self {
            left: NonZeroUsize::MIN,
            right: NonZeroUsize::MIN,
        }
    }

    fn take_left(&mut self) -> NonZeroUsize {
        let n = self.left;
        self.left = n.saturating_add(1);
        n
    }

    fn take_right(&mut self) -> NonZeroUsize {
        let n = self.right;
        self.right = n.saturating_add(1);
        n
    }
}

/// Replacement body for one side: highlighted spans when a char diff is
/// available, otherwise the whole text unstyled
fn replace_body(text: &str, char_diff: Option<&[CharDiffOp]>, side: Side) -> LineBody {
    match char_diff {
        Some(sub_ops) => LineBody::Spans(highlight(sub_ops, side)),
        None => LineBody::Plain(text.to_string()),
    }
}

/// Lay out `ops` as two aligned, independently numbered columns.
///
/// Total over any op sequence, including an empty one.
pub fn render(ops: &[DiffOp]) -> Rendered {
    let mut out = Rendered {
        left: Vec::with_capacity(ops.len()),
        right: Vec::with_capacity(ops.len()),
        stats: Stats::default(),
    };
    let mut lines = LineCounters::new();

    for op in ops {
        let kind = op.kind();
        let (left, right) = match op {
            DiffOp::Equal(content) => (
                RenderedLine::numbered(lines.take_left(), LineBody::Plain(content.clone()), kind),
                RenderedLine::numbered(lines.take_right(), LineBody::Plain(content.clone()), kind),
            ),
            DiffOp::Delete(content) => (
                RenderedLine::numbered(lines.take_left(), LineBody::Plain(content.clone()), kind),
                RenderedLine::placeholder(kind),
            ),
            DiffOp::Insert(content) => (
                RenderedLine::placeholder(kind),
                RenderedLine::numbered(lines.take_right(), LineBody::Plain(content.clone()), kind),
            ),
            DiffOp::Replace {
                left,
                right,
                char_diff,
            } => {
                let sub_ops = char_diff.as_deref();
                (
                    RenderedLine::numbered(
                        lines.take_left(),
                        replace_body(left, sub_ops, Side::Left),
                        kind,
                    ),
                    RenderedLine::numbered(
                        lines.take_right(),
                        replace_body(right, sub_ops, Side::Right),
                        kind,
                    ),
                )
            }
        };
        out.left.push(left);
        out.right.push(right);
        out.stats.record(kind);
    }

    tracing::trace!(rows = out.len(), stats = ?out.stats, "rendered diff");
    out
}
