//! Incremental document search.
//!
//! Scans a [`LineIndex`] line by line for occurrences of a plain-text query,
//! producing an ordered, navigable [`SearchHits`] result set. All offsets are
//! **character** offsets into the whole document.
//!
//! The query is escaped and compiled into a regex so that case folding is
//! delegated to the regex engine; `find_iter` yields exactly the
//! non-overlapping left-to-right occurrences the result set needs (the scan
//! resumes after the end of the previous match, so overlapping occurrences are
//! never double-counted).

use std::hash::{Hash, Hasher};

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::line_index::LineIndex;

/// Search errors.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The escaped query failed to compile (e.g. it exceeds the regex size
    /// limit).
    #[error("invalid search query: {0}")]
    InvalidQuery(#[from] regex::Error),
}

/// One match: a line number plus a half-open character range in document
/// offsets.
///
/// Equality and hashing are defined solely by `(from_offset, to_offset)`:
/// two hits at the same offsets are the same hit even if discovered via
/// different line/size bookkeeping.
#[derive(Debug, Clone, Copy)]
pub struct SearchHit {
    line: usize,
    from_offset: usize,
    size: usize,
}

impl SearchHit {
    /// Create a hit at `from_offset` spanning `size` characters on `line`.
    pub fn new(line: usize, from_offset: usize, size: usize) -> Self {
        Self {
            line,
            from_offset,
            size,
        }
    }

    /// Zero-based line the hit starts on.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Inclusive start character offset in the document.
    pub fn from_offset(&self) -> usize {
        self.from_offset
    }

    /// Exclusive end character offset in the document.
    pub fn to_offset(&self) -> usize {
        self.from_offset + self.size
    }

    /// Match length in characters.
    pub fn size(&self) -> usize {
        self.size
    }
}

impl PartialEq for SearchHit {
    fn eq(&self, other: &Self) -> bool {
        self.from_offset == other.from_offset && self.to_offset() == other.to_offset()
    }
}

impl Eq for SearchHit {}

impl Hash for SearchHit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from_offset.hash(state);
        self.to_offset().hash(state);
    }
}

/// An ordered result set with a wrapping "current hit" cursor.
///
/// Hits are ordered by (line ascending, offset ascending), matching discovery
/// order. The cursor starts at none; the first [`next`](Self::next) lands on
/// the first hit, and navigation wraps around both ends.
#[derive(Debug, Clone, Default)]
pub struct SearchHits {
    hits: Vec<SearchHit>,
    current: Option<usize>,
}

impl SearchHits {
    /// An empty result set.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, hit: SearchHit) {
        self.hits.push(hit);
    }

    /// The ordered hits.
    pub fn hits(&self) -> &[SearchHit] {
        &self.hits
    }

    /// Number of hits.
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Returns `true` if the search produced no hits.
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Index of the current hit, if the cursor has been positioned.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The current hit, if the cursor has been positioned.
    pub fn current(&self) -> Option<&SearchHit> {
        self.current.and_then(|i| self.hits.get(i))
    }

    /// Returns `true` if `hit` is the current hit. Used by the highlight
    /// painter to distinguish the active match.
    pub fn is_current(&self, hit: &SearchHit) -> bool {
        self.current().is_some_and(|c| c == hit)
    }

    /// Advance the cursor to the next hit, wrapping to the first after the
    /// last. No-op on an empty result set.
    pub fn next(&mut self) {
        if self.hits.is_empty() {
            return;
        }
        self.current = Some(match self.current {
            None => 0,
            Some(i) => (i + 1) % self.hits.len(),
        });
    }

    /// Move the cursor to the previous hit, wrapping to the last before the
    /// first. No-op on an empty result set.
    pub fn previous(&mut self) {
        if self.hits.is_empty() {
            return;
        }
        let len = self.hits.len();
        self.current = Some(match self.current {
            None => len - 1,
            Some(i) => (i + len - 1) % len,
        });
    }
}

/// Byte↔char offset table for one line of text.
#[derive(Debug)]
struct CharIndex {
    char_to_byte: Vec<usize>,
    text_len: usize,
}

impl CharIndex {
    fn new(text: &str) -> Self {
        let mut char_to_byte: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        char_to_byte.push(text.len());
        Self {
            char_to_byte,
            text_len: text.len(),
        }
    }

    fn byte_to_char(&self, byte_offset: usize) -> usize {
        let clamped = byte_offset.min(self.text_len);
        match self.char_to_byte.binary_search(&clamped) {
            Ok(idx) => idx,
            Err(idx) => idx,
        }
    }
}

/// Compile `query` as a literal pattern, folding case when `case_sensitive`
/// is `false`.
pub fn compile_query(query: &str, case_sensitive: bool) -> Result<Regex, SearchError> {
    Ok(RegexBuilder::new(&regex::escape(query))
        .case_insensitive(!case_sensitive)
        .build()?)
}

/// Scan `index` for occurrences of `query`, producing an ordered result set.
///
/// - An empty query produces an empty result set.
/// - A line whose start offset cannot be resolved is skipped rather than
///   failing the whole search; the document may be in a transient state.
/// - A query that fails to compile degrades to an empty result set (the
///   failure is logged); search errors are local and non-fatal.
pub fn search(index: &LineIndex, query: &str, case_sensitive: bool) -> SearchHits {
    let mut hits = SearchHits::new();
    if query.is_empty() {
        return hits;
    }

    let pattern = match compile_query(query, case_sensitive) {
        Ok(pattern) => pattern,
        Err(err) => {
            log::warn!("search degraded to empty result set: {err}");
            return hits;
        }
    };

    for line in 0..index.line_count() {
        let Some(text) = index.line_text(line) else {
            continue;
        };
        let Some(line_start) = index.offset_for_line(line) else {
            continue;
        };

        let chars = CharIndex::new(&text);
        for m in pattern.find_iter(&text) {
            let start = chars.byte_to_char(m.start());
            let end = chars.byte_to_char(m.end());
            hits.push(SearchHit::new(line, line_start + start, end - start));
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn doc() -> LineIndex {
        LineIndex::from_text("alpha\nbeta alpha\ngamma")
    }

    #[test]
    fn test_empty_query_yields_empty_hits() {
        let hits = search(&doc(), "", true);
        assert!(hits.is_empty());
        assert_eq!(hits.current_index(), None);
    }

    #[test]
    fn test_literal_offsets_round_trip() {
        let hits = search(&doc(), "alpha", true);
        assert_eq!(hits.len(), 2);

        assert_eq!(hits.hits()[0].line(), 0);
        assert_eq!(hits.hits()[0].from_offset(), 0);
        assert_eq!(hits.hits()[0].size(), 5);

        // Line 1 starts at offset 6; "alpha" begins 5 chars in.
        assert_eq!(hits.hits()[1].line(), 1);
        assert_eq!(hits.hits()[1].from_offset(), 11);
        assert_eq!(hits.hits()[1].to_offset(), 16);
    }

    #[test]
    fn test_case_sensitivity() {
        let insensitive = search(&doc(), "ALPHA", false);
        assert_eq!(insensitive.len(), 2);
        assert_eq!(insensitive.hits(), search(&doc(), "alpha", true).hits());

        let sensitive = search(&doc(), "ALPHA", true);
        assert!(sensitive.is_empty());
    }

    #[test]
    fn test_overlapping_occurrences_not_double_counted() {
        let index = LineIndex::from_text("aaaa");
        let hits = search(&index, "aa", true);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.hits()[0].from_offset(), 0);
        assert_eq!(hits.hits()[1].from_offset(), 2);
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let index = LineIndex::from_text("a.c\nabc");
        let hits = search(&index, "a.c", true);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits.hits()[0].line(), 0);
    }

    #[test]
    fn test_hits_ordered_by_line_then_offset() {
        let index = LineIndex::from_text("xx x\nx\nxxx");
        let hits = search(&index, "x", true);
        let offsets: Vec<usize> = hits.hits().iter().map(|h| h.from_offset()).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        assert_eq!(offsets, sorted);
    }

    #[test]
    fn test_cjk_offsets() {
        let index = LineIndex::from_text("你好\n好的");
        let hits = search(&index, "好", true);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits.hits()[0].from_offset(), 1);
        assert_eq!(hits.hits()[1].from_offset(), 3);
        assert_eq!(hits.hits()[1].size(), 1);
    }

    #[test]
    fn test_navigation_wraparound() {
        let mut hits = search(&doc(), "alpha", true);
        assert_eq!(hits.current_index(), None);

        hits.next();
        assert_eq!(hits.current_index(), Some(0));
        hits.next();
        assert_eq!(hits.current_index(), Some(1));
        hits.next();
        assert_eq!(hits.current_index(), Some(0));

        hits.previous();
        assert_eq!(hits.current_index(), Some(1));
    }

    #[test]
    fn test_previous_from_none_lands_on_last() {
        let mut hits = search(&doc(), "alpha", true);
        hits.previous();
        assert_eq!(hits.current_index(), Some(1));
    }

    #[test]
    fn test_navigation_noop_on_empty() {
        let mut hits = SearchHits::new();
        hits.next();
        hits.previous();
        assert_eq!(hits.current_index(), None);
        assert!(hits.current().is_none());
    }

    #[test]
    fn test_is_current_tracks_cursor() {
        let mut hits = search(&doc(), "alpha", true);
        let first = hits.hits()[0];
        let second = hits.hits()[1];
        assert!(!hits.is_current(&first));

        hits.next();
        assert!(hits.is_current(&first));
        assert!(!hits.is_current(&second));
    }

    #[test]
    fn test_hit_identity_is_offsets_only() {
        let a = SearchHit::new(0, 10, 3);
        let b = SearchHit::new(99, 10, 3);
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        set.insert(b);
        assert_eq!(set.len(), 1);
    }
}
