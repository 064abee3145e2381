//! An in-memory line buffer implementing the edit-sink contract.
//!
//! Stands in for a host editor buffer: the CLI and tests apply planned
//! batches to it and read the resulting text back.

use crate::location::TextRange;
use crate::planner::{EditSink, Replacement};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextBuffer {
    lines: Vec<String>,
}

impl TextBuffer {
    pub fn from_text(text: &str) -> Self {
        Self {
            lines: text.lines().map(str::to_string).collect(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    fn range_is_valid(&self, range: TextRange) -> bool {
        let TextRange { start, end } = range;
        if start.line >= self.lines.len() || end.line >= self.lines.len() || end.line < start.line {
            return false;
        }
        let first = &self.lines[start.line];
        let last = &self.lines[end.line];
        if start.line == end.line && start.column > end.column {
            return false;
        }
        start.column <= first.len()
            && end.column <= last.len()
            && first.is_char_boundary(start.column)
            && last.is_char_boundary(end.column)
    }

    fn replace(&mut self, range: TextRange, text: &str) {
        let TextRange { start, end } = range;
        let prefix = &self.lines[start.line][..start.column];
        let suffix = &self.lines[end.line][end.column..];
        let spliced = format!("{}{}{}", prefix, text, suffix);

        let replacement_lines: Vec<String> = spliced.split('\n').map(str::to_string).collect();
        self.lines
            .splice(start.line..=end.line, replacement_lines);
    }
}

impl EditSink for TextBuffer {
    /// All-or-nothing: the whole batch is validated before any line changes.
    fn apply_edit(&mut self, batch: &[Replacement]) -> bool {
        if !batch.iter().all(|r| self.range_is_valid(r.range)) {
            return false;
        }

        // bottom-up so pending ranges are never shifted by an earlier splice
        let mut ordered: Vec<&Replacement> = batch.iter().collect();
        ordered.sort_by(|a, b| {
            (b.range.start.line, b.range.start.column)
                .cmp(&(a.range.start.line, a.range.start.column))
        });
        for replacement in ordered {
            self.replace(replacement.range, &replacement.text);
        }
        true
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Position;

    fn range(line: usize, start: usize, end: usize) -> TextRange {
        TextRange::new(Position::new(line, start), Position::new(line, end))
    }

    #[test]
    fn single_replacement() {
        let mut buffer = TextBuffer::from_text("<div class=\"p-16px\">");
        let applied = buffer.apply_edit(&[Replacement {
            range: range(0, 12, 18),
            text: "p-4".to_string(),
        }]);

        assert!(applied);
        assert_eq!(buffer.to_text(), "<div class=\"p-4\">");
    }

    #[test]
    fn batch_on_one_line_applies_cleanly() {
        let mut buffer = TextBuffer::from_text("<div class=\"p-16px m-8px\">");
        let applied = buffer.apply_edit(&[
            Replacement {
                range: range(0, 19, 24),
                text: "m-2".to_string(),
            },
            Replacement {
                range: range(0, 12, 18),
                text: "p-4".to_string(),
            },
        ]);

        assert!(applied);
        assert_eq!(buffer.to_text(), "<div class=\"p-4 m-2\">");
    }

    #[test]
    fn invalid_range_rejects_whole_batch() {
        let original = "<div class=\"p-16px\">";
        let mut buffer = TextBuffer::from_text(original);
        let applied = buffer.apply_edit(&[
            Replacement {
                range: range(0, 12, 18),
                text: "p-4".to_string(),
            },
            Replacement {
                range: range(9, 0, 3),
                text: "m-2".to_string(),
            },
        ]);

        assert!(!applied);
        assert_eq!(buffer.to_text(), original);
    }

    #[test]
    fn multiline_range_collapses_lines() {
        let mut buffer = TextBuffer::from_text("abc\ndef\nghi");
        let applied = buffer.apply_edit(&[Replacement {
            range: TextRange::new(Position::new(0, 1), Position::new(2, 1)),
            text: "X".to_string(),
        }]);

        assert!(applied);
        assert_eq!(buffer.to_text(), "aXhi");
        assert_eq!(buffer.line_count(), 1);
    }

    #[test]
    fn line_access() {
        let buffer = TextBuffer::from_text("one\ntwo");
        assert_eq!(buffer.line_count(), 2);
        assert_eq!(buffer.line(1), Some("two"));
        assert_eq!(buffer.line(2), None);
    }
}
