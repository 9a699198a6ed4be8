//! Document line index: offset↔line conversion for one text buffer.
//!
//! Built on a Rope for O(log n) access. All public offsets are **character**
//! offsets (Unicode scalar values). An index is immutable once built; content
//! changes are handled by building a replacement index from the full text and
//! publishing it wholesale (see [`SharedLineIndex`]), so readers never observe
//! a partially-rebuilt table.

use std::sync::{Arc, RwLock};

use ropey::Rope;

/// Line index over a single text buffer.
///
/// Even an empty buffer has one (empty) line, matching common editor
/// semantics.
#[derive(Debug, Clone)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Build an index for an empty buffer.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build an index from the full buffer content.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Total line count (≥ 1).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total character count.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Start offset of `line`, or `None` when no such line exists.
    ///
    /// Callers must treat `None` as "no such line" rather than clamp; feeding
    /// an out-of-range line into a highlight range is a caller bug.
    pub fn offset_for_line(&self, line: usize) -> Option<usize> {
        if line >= self.line_count() {
            return None;
        }
        Some(self.rope.line_to_char(line))
    }

    /// Line containing `offset`, clamping: an offset past the end of the
    /// buffer maps to the last line.
    pub fn line_for_offset(&self, offset: usize) -> usize {
        let clamped = offset.min(self.rope.len_chars());
        self.rope
            .char_to_line(clamped)
            .min(self.line_count().saturating_sub(1))
    }

    /// Text of `line` without its trailing newline, or `None` when out of
    /// range.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.line_count() {
            return None;
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    /// All lines without trailing newlines, in order.
    ///
    /// This is the form the external diff algorithm consumes for each side.
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count())
            .map(|l| self.line_text(l).unwrap_or_default())
            .collect()
    }

    /// Full buffer content.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }
}

impl Default for LineIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy-on-replace publication cell for a [`LineIndex`].
///
/// A replacement index is built off to the side and swapped in with a single
/// reference-swap, so a concurrent reader sees either the fully-old or the
/// fully-new index, never a half-rebuilt one. Readers hold on to the
/// [`Arc`] snapshot for the duration of one search or mapping pass.
#[derive(Debug)]
pub struct SharedLineIndex {
    current: RwLock<Arc<LineIndex>>,
}

impl SharedLineIndex {
    /// Create a cell holding an index for an empty buffer.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(LineIndex::new())),
        }
    }

    /// Create a cell from initial buffer content.
    pub fn from_text(text: &str) -> Self {
        Self {
            current: RwLock::new(Arc::new(LineIndex::from_text(text))),
        }
    }

    /// The current index snapshot.
    pub fn snapshot(&self) -> Arc<LineIndex> {
        self.current
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Rebuild the index from `text` and publish it atomically.
    pub fn set_text(&self, text: &str) {
        self.publish(Arc::new(LineIndex::from_text(text)));
    }

    /// Publish a pre-built replacement index.
    pub fn publish(&self, index: Arc<LineIndex>) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = index;
    }
}

impl Default for SharedLineIndex {
    fn default() -> Self {
        Self::new()
    }
}
