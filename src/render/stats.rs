use super::types::{DiffOpKind, LineBody, RenderedLine, SpanStyle};
use serde::{Deserialize, Serialize};

/// Per-kind tallies of one render
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub equal_count: usize,
    pub delete_count: usize,
    pub insert_count: usize,
    pub replace_count: usize,
}

/// How modified lines show up in the summary line
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryMode {
    /// Modified lines get their own `~N modified` figure
    #[default]
    Separate,
    /// Each modified line counts as one removal plus one addition
    Merged,
}

impl Stats {
    pub(crate) fn record(&mut self, kind: DiffOpKind) {
        match kind {
            DiffOpKind::Equal => self.equal_count += 1,
            DiffOpKind::Delete => self.delete_count += 1,
            DiffOpKind::Insert => self.insert_count += 1,
            DiffOpKind::Replace => self.replace_count += 1,
        }
    }

    /// Number of ops that produced these stats
    pub fn total(&self) -> usize {
        self.equal_count + self.delete_count + self.insert_count + self.replace_count
    }

    /// Numbered rows emitted on the left
    pub fn left_line_total(&self) -> usize {
        self.equal_count + self.delete_count + self.replace_count
    }

    /// Numbered rows emitted on the right
    pub fn right_line_total(&self) -> usize {
        self.equal_count + self.insert_count + self.replace_count
    }

    pub fn total_deletions(&self) -> usize {
        self.delete_count + self.replace_count
    }

    pub fn total_insertions(&self) -> usize {
        self.insert_count + self.replace_count
    }

    pub fn has_changes(&self) -> bool {
        self.delete_count + self.insert_count + self.replace_count > 0
    }

    pub fn summary(&self, mode: SummaryMode) -> String {
        match mode {
            SummaryMode::Separate => format!(
                "{} unchanged, -{}, +{}, ~{} modified",
                self.equal_count, self.delete_count, self.insert_count, self.replace_count
            ),
            SummaryMode::Merged => format!(
                "{} unchanged, -{}, +{}",
                self.equal_count,
                self.total_deletions(),
                self.total_insertions()
            ),
        }
    }
}

/// Character counts of the highlighted changes inside modified lines
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharStats {
    pub added_chars: usize,
    pub removed_chars: usize,
}

impl CharStats {
    /// Count styled span characters (not bytes, so CJK text counts per glyph)
    pub fn from_columns(left: &[RenderedLine], right: &[RenderedLine]) -> Self {
        let count = |lines: &[RenderedLine], wanted: SpanStyle| -> usize {
            lines
                .iter()
                .filter_map(|line| match &line.body {
                    LineBody::Spans(spans) => Some(spans),
                    LineBody::Plain(_) => None,
                })
                .flatten()
                .filter(|span| span.style == wanted)
                .map(|span| span.content.chars().count())
                .sum()
        };

        Self {
            added_chars: count(right, SpanStyle::Added),
            removed_chars: count(left, SpanStyle::Removed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Stats {
        Stats {
            equal_count: 2,
            delete_count: 1,
            insert_count: 3,
            replace_count: 1,
        }
    }

    #[test]
    fn derived_totals() {
        let stats = sample();
        assert_eq!(stats.total(), 7);
        assert_eq!(stats.left_line_total(), 4);
        assert_eq!(stats.right_line_total(), 6);
        assert_eq!(stats.total_deletions(), 2);
        assert_eq!(stats.total_insertions(), 4);
        assert!(stats.has_changes());
        assert!(!Stats::default().has_changes());
    }

    #[test]
    fn summary_modes() {
        let stats = sample();
        assert_eq!(
            stats.summary(SummaryMode::Separate),
            "2 unchanged, -1, +3, ~1 modified"
        );
        assert_eq!(stats.summary(SummaryMode::Merged), "2 unchanged, -2, +4");
    }
}
