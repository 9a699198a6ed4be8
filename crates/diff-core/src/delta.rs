//! Structured line-level edit scripts.
//!
//! A diff between two line sequences ("original" and "revised") is modeled as a
//! [`Revision`]: an ordered list of [`Delta`]s, each pairing a contiguous line
//! range ([`Chunk`]) on the original side with one on the revised side. The
//! script itself is produced by an external diff algorithm (see
//! [`crate::diff::DiffAlgorithm`]); this module only defines the typed output
//! that the line mapper and presentation collaborators consume.
//!
//! All coordinates are zero-based **line** indices; the original-side and
//! revised-side anchors live in independent coordinate spaces.

/// A contiguous run of lines within one text sequence.
///
/// `size == 0` denotes a pure insertion/deletion point that consumes no lines
/// on this side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    anchor: usize,
    size: usize,
}

impl Chunk {
    /// Create a chunk starting at `anchor` spanning `size` lines.
    ///
    /// A negative requested size is clamped to 0; upstream diff output is
    /// trusted but defensively normalized.
    pub fn new(anchor: usize, size: isize) -> Self {
        Self {
            anchor,
            size: size.max(0) as usize,
        }
    }

    /// Zero-based index of the first line.
    pub fn anchor(&self) -> usize {
        self.anchor
    }

    /// Number of lines covered; 0 for a pure anchor point.
    pub fn size(&self) -> usize {
        self.size
    }

    /// First covered line, or `None` when the chunk is empty.
    pub fn first(&self) -> Option<usize> {
        (self.size > 0).then_some(self.anchor)
    }

    /// Last covered line, or `None` when the chunk is empty.
    pub fn last(&self) -> Option<usize> {
        (self.size > 0).then(|| self.anchor + self.size - 1)
    }

    /// Returns `true` if this chunk covers no lines.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Exclusive end line (`anchor + size`).
    pub fn end(&self) -> usize {
        self.anchor + self.size
    }
}

/// Which side of a revision a line coordinate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffSide {
    /// The "before" sequence.
    Original,
    /// The "after" sequence.
    Revised,
}

/// The kind of edit a [`Delta`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeltaKind {
    /// Lines exist only in the revised sequence.
    Add,
    /// Lines exist only in the original sequence.
    Delete,
    /// Lines differ between the two sequences.
    Change,
}

/// One edit operation pairing an original-side chunk with a revised-side chunk.
#[derive(Debug, Clone, PartialEq)]
pub enum Delta {
    /// An insertion: the original chunk is an empty anchor point, the revised
    /// chunk carries the inserted lines.
    Add {
        /// Insertion point in the original sequence (`size == 0`).
        original: Chunk,
        /// The inserted lines in the revised sequence.
        revised: Chunk,
    },
    /// A deletion: the original chunk carries the removed lines, the revised
    /// chunk is an empty anchor point.
    Delete {
        /// The removed lines in the original sequence.
        original: Chunk,
        /// Deletion point in the revised sequence (`size == 0`).
        revised: Chunk,
    },
    /// A replacement: both chunks are non-empty and their sizes may differ.
    Change {
        /// The replaced lines in the original sequence.
        original: Chunk,
        /// The replacement lines in the revised sequence.
        revised: Chunk,
        /// Optional one-level refinement of the changed block. Sub-deltas do
        /// not nest further.
        refinement: Option<Revision>,
    },
}

impl Delta {
    /// The kind of edit this delta represents.
    pub fn kind(&self) -> DeltaKind {
        match self {
            Delta::Add { .. } => DeltaKind::Add,
            Delta::Delete { .. } => DeltaKind::Delete,
            Delta::Change { .. } => DeltaKind::Change,
        }
    }

    /// The original-side chunk.
    pub fn original(&self) -> Chunk {
        match self {
            Delta::Add { original, .. }
            | Delta::Delete { original, .. }
            | Delta::Change { original, .. } => *original,
        }
    }

    /// The revised-side chunk.
    pub fn revised(&self) -> Chunk {
        match self {
            Delta::Add { revised, .. }
            | Delta::Delete { revised, .. }
            | Delta::Change { revised, .. } => *revised,
        }
    }

    /// The chunk on the requested side.
    pub fn chunk(&self, side: DiffSide) -> Chunk {
        match side {
            DiffSide::Original => self.original(),
            DiffSide::Revised => self.revised(),
        }
    }

    /// The nested intra-change revision, if this is a refined change.
    pub fn refinement(&self) -> Option<&Revision> {
        match self {
            Delta::Change { refinement, .. } => refinement.as_ref(),
            _ => None,
        }
    }
}

/// An ordered, non-overlapping sequence of [`Delta`]s describing the full
/// transformation from the original sequence to the revised one.
///
/// A revision is produced atomically by the diff algorithm and treated as
/// immutable by every consumer; when the underlying text changes, a fresh
/// revision replaces the old one wholesale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Revision {
    deltas: Vec<Delta>,
}

impl Revision {
    /// Create a revision from deltas already ordered by ascending original
    /// anchor, as the diff algorithm emits them.
    pub fn new(deltas: Vec<Delta>) -> Self {
        debug_assert!(
            deltas
                .windows(2)
                .all(|w| w[0].original().anchor() < w[1].original().anchor()),
            "deltas must be ordered by strictly increasing original anchor"
        );
        Self { deltas }
    }

    /// A revision with no differences.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The ordered deltas.
    pub fn deltas(&self) -> &[Delta] {
        &self.deltas
    }

    /// Number of deltas.
    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    /// Returns `true` if the two sequences are identical.
    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}
