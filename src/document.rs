//! Document snapshots
//!
//! Read-only text plus language, with conversions between the byte offsets
//! the scanners report and the line/column positions people read.

use std::borrow::Cow;
use std::ops::Range;
use std::path::{Path, PathBuf};

use ropey::Rope;
use serde::Serialize;

use crate::syntax::{language_for_path, PLAIN_TEXT};

/// Zero-based line and column (column counted in characters)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    buffer: Rope,
    language: String,
    file_path: Option<PathBuf>,
}

impl Document {
    /// Create a document with initial text
    pub fn with_text(text: &str, language: &str) -> Self {
        Self {
            buffer: Rope::from_str(text),
            language: language.to_string(),
            file_path: None,
        }
    }

    /// Load a document from a file path, detecting its language
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self {
            buffer: Rope::from_str(&content),
            language: language_for_path(path).to_string(),
            file_path: Some(path.to_path_buf()),
        })
    }

    pub fn with_language(mut self, language: &str) -> Self {
        self.language = language.to_string();
        self
    }

    pub fn language(&self) -> &str {
        if self.language.is_empty() {
            PLAIN_TEXT
        } else {
            &self.language
        }
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Full text; borrowed when the rope is a single chunk
    pub fn text(&self) -> Cow<'_, str> {
        self.buffer.slice(..).into()
    }

    pub fn len(&self) -> usize {
        self.buffer.len_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.len_bytes() == 0
    }

    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Text of a line without its line ending
    pub fn line_text(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.buffer.len_lines() {
            return None;
        }
        let line = self.buffer.line(line_idx).to_string();
        Some(line.trim_end_matches(['\n', '\r']).to_string())
    }

    /// Text in a byte range, or `None` if the range is out of bounds
    pub fn slice(&self, range: Range<usize>) -> Option<String> {
        if range.start > range.end || range.end > self.buffer.len_bytes() {
            return None;
        }
        let start = self.buffer.byte_to_char(range.start);
        let end = self.buffer.byte_to_char(range.end);
        Some(self.buffer.slice(start..end).to_string())
    }

    /// Convert a byte offset to a line/column position
    pub fn offset_to_position(&self, offset: usize) -> Position {
        let clamped = offset.min(self.buffer.len_bytes());
        let char_idx = self.buffer.byte_to_char(clamped);
        let line = self.buffer.char_to_line(char_idx);
        let line_start = self.buffer.line_to_char(line);
        Position::new(line, char_idx - line_start)
    }

    /// Convert a line/column position to a byte offset, clamping to the line
    pub fn position_to_offset(&self, position: Position) -> usize {
        if position.line >= self.buffer.len_lines() {
            return self.buffer.len_bytes();
        }
        let line_start = self.buffer.line_to_char(position.line);
        let char_idx = line_start + position.column.min(self.line_length(position.line));
        self.buffer.char_to_byte(char_idx)
    }

    /// Length of a line in characters, excluding its line ending
    pub fn line_length(&self, line_idx: usize) -> usize {
        if line_idx >= self.buffer.len_lines() {
            return 0;
        }
        let line = self.buffer.line(line_idx);
        let mut len = line.len_chars();
        for ending in ['\n', '\r'] {
            if len > 0 && line.char(len - 1) == ending {
                len -= 1;
            }
        }
        len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_to_position() {
        let doc = Document::with_text("first\nsecond line\nthird", "rust");
        assert_eq!(doc.offset_to_position(0), Position::new(0, 0));
        assert_eq!(doc.offset_to_position(6), Position::new(1, 0));
        assert_eq!(doc.offset_to_position(13), Position::new(1, 7));
        assert_eq!(doc.offset_to_position(1_000), Position::new(2, 5));
    }

    #[test]
    fn test_multibyte_columns_count_chars() {
        let doc = Document::with_text("// café TODO\n", "rust");
        let offset = "// café ".len();
        assert_eq!(doc.offset_to_position(offset), Position::new(0, 8));
        assert_eq!(doc.position_to_offset(Position::new(0, 8)), offset);
    }

    #[test]
    fn test_position_to_offset_clamps() {
        let doc = Document::with_text("ab\ncd\n", "rust");
        assert_eq!(doc.position_to_offset(Position::new(0, 99)), 2);
        assert_eq!(doc.position_to_offset(Position::new(99, 0)), 6);
    }

    #[test]
    fn test_line_text_and_slice() {
        let doc = Document::with_text("one\r\ntwo\n", "rust");
        assert_eq!(doc.line_text(0).as_deref(), Some("one"));
        assert_eq!(doc.line_text(1).as_deref(), Some("two"));
        assert_eq!(doc.slice(5..8).as_deref(), Some("two"));
        assert_eq!(doc.slice(5..80), None);
        assert_eq!(doc.line_length(0), 3);
    }

    #[test]
    fn test_language_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("script.py");
        std::fs::write(&path, "# TODO\n").unwrap();

        let doc = Document::from_file(&path).unwrap();
        assert_eq!(doc.language(), "python");
        assert_eq!(doc.file_path(), Some(path.as_path()));
        assert_eq!(doc.text(), "# TODO\n");
    }
}
