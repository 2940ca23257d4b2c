use super::types::{CharDiffKind, CharDiffOp, Side, SpanStyle, StyledSpan};

/// Turn a char-level diff into the spans shown on one side of a modified line.
///
/// Equal runs appear on both sides unstyled, deletions only on the left and
/// insertions only on the right, so the same sub-diff drives both cells.
pub fn highlight(sub_ops: &[CharDiffOp], side: Side) -> Vec<StyledSpan> {
    sub_ops
        .iter()
        .filter_map(|op| {
            let style = match (op.kind, side) {
                (CharDiffKind::Equal, _) => SpanStyle::Plain,
                (CharDiffKind::Delete, Side::Left) => SpanStyle::Removed,
                (CharDiffKind::Insert, Side::Right) => SpanStyle::Added,
                (CharDiffKind::Delete, Side::Right) | (CharDiffKind::Insert, Side::Left) => {
                    return None;
                }
            };
            Some(StyledSpan {
                style,
                content: op.content.clone(),
            })
        })
        .collect()
}
