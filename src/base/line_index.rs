//! Byte offset to line/character conversion.

use text_size::{TextRange, TextSize};

use super::position::{Position, Range};

/// Line start table for a single document.
///
/// Built once per text; converts byte offsets (as produced by the lexer) into
/// 0-indexed line numbers and UTF-16 character columns.
#[derive(Debug, Clone)]
pub struct LineIndex<'a> {
    text: &'a str,
    line_starts: Vec<TextSize>,
}

impl<'a> LineIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut line_starts = vec![TextSize::new(0)];
        for (offset, byte) in text.bytes().enumerate() {
            if byte == b'\n' {
                line_starts.push(TextSize::new(offset as u32 + 1));
            }
        }
        Self { text, line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset into a position. Offsets past the end clamp to EOF.
    pub fn position(&self, offset: TextSize) -> Position {
        let offset = offset.min(TextSize::of(self.text));
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        };
        let start: usize = self.line_starts[line].into();
        let end: usize = offset.into();
        let character = self
            .text
            .get(start..end)
            .map(|slice| slice.chars().map(char::len_utf16).sum::<usize>())
            .unwrap_or(0);
        Position::new(line as u32, character as u32)
    }

    pub fn range(&self, span: TextRange) -> Range {
        Range::new(self.position(span.start()), self.position(span.end()))
    }

    /// Position just past the last character of the text.
    pub fn end(&self) -> Position {
        self.position(TextSize::of(self.text))
    }
}
