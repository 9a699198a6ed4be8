#![warn(missing_docs)]
//! Diff Core - Headless Side-by-Side Text Comparison Engine
//!
//! # Overview
//!
//! `diff-core` is the headless core of a side-by-side text comparison tool.
//! Given two versions of line-oriented text ("original" and "revised"), it
//! models the line-level edit script between them and provides the two derived
//! services a diff presentation needs: mapping a line number from one side to
//! the other in the presence of insertions and deletions, and incremental,
//! case-optional text search with stable navigation between matches. It does
//! not render, paint, or scroll anything; an upper layer owns widgets,
//! highlighting, and viewport wiring.
//!
//! # Core Features
//!
//! - **Edit-Script Model**: chunk/delta/revision data model, immutable after
//!   construction, replaced wholesale on every recomputation
//! - **Line Mapping**: single-scan translation of a line index across a
//!   revision, for scroll synchronization between two panels
//! - **Document Search**: per-line substring scan over a rope-backed line
//!   index, with a wrapping current-match cursor
//! - **Debounced Execution**: coalesces rapid-fire edit/scroll events into a
//!   single downstream recomputation after a quiet period
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Presentation / Scroll Collaborators        │  ← consumers (not here)
//! ├─────────────────────────────────────────────┤
//! │  Line Mapper & Search (pure, synchronous)   │  ← derived services
//! ├─────────────────────────────────────────────┤
//! │  Revision Model (chunks, deltas)            │  ← diff-algorithm output
//! ├─────────────────────────────────────────────┤
//! │  Line Index (Rope-based)                    │  ← offset↔line access
//! ├─────────────────────────────────────────────┤
//! │  Debouncer (per-instance scheduler thread)  │  ← update coalescing
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use diff_core::{Chunk, Delta, DiffSide, LineIndex, Revision, map_line, search};
//!
//! // A revision normally comes from an external diff algorithm; here,
//! // original ["a","b","c"] became revised ["a","x","y","c"].
//! let revision = Revision::new(vec![Delta::Change {
//!     original: Chunk::new(1, 1),
//!     revised: Chunk::new(1, 2),
//!     refinement: None,
//! }]);
//!
//! assert_eq!(map_line(&revision, 2, DiffSide::Original), 3);
//!
//! let index = LineIndex::from_text("a\nx\ny\nc");
//! let mut hits = search(&index, "y", true);
//! hits.next();
//! assert_eq!(hits.current().unwrap().line(), 2);
//! ```
//!
//! # Module Description
//!
//! - [`line_index`] - Rope based offset↔line index with atomic replacement
//! - [`delta`] - chunk/delta/revision edit-script model
//! - [`diff`] - the consumed external diff-algorithm capability
//! - [`mapper`] - line mapping across a revision
//! - [`search`] - document search and match navigation
//! - [`debounce`] - quiet-period coalescing of update requests
//!
//! # Concurrency
//!
//! The mapper and the search engine are pure, synchronous computations over
//! immutable snapshots ([`Revision`], [`LineIndex`]); thread safety comes from
//! never mutating a published snapshot. Each [`Debouncer`] owns one scheduler
//! thread and guarantees at most one pending execution at a time.

pub mod debounce;
pub mod delta;
pub mod diff;
pub mod line_index;
pub mod mapper;
pub mod search;

pub use debounce::{DebounceRequest, Debouncer};
pub use delta::{Chunk, Delta, DeltaKind, DiffSide, Revision};
pub use diff::DiffAlgorithm;
pub use line_index::{LineIndex, SharedLineIndex};
pub use mapper::map_line;
pub use search::{SearchError, SearchHit, SearchHits, search};
