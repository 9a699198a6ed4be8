//! The consumed diff-algorithm capability.
//!
//! This crate does not implement the line-by-line edit-script computation
//! (Myers/LCS); it consumes the typed output of an external implementation.
//! Implementations produce a [`Revision`] whose deltas are ordered by strictly
//! increasing original anchor and do not overlap in either coordinate space.

use crate::delta::Revision;

/// An external algorithm that computes the edit script between two line
/// sequences.
///
/// Implementations should avoid holding references into the input slices;
/// the returned [`Revision`] is published wholesale to consumers and must be
/// self-contained.
pub trait DiffAlgorithm {
    /// Compute the ordered edit script transforming `original` into `revised`.
    fn compute_revision(&self, original: &[String], revised: &[String]) -> Revision;
}

impl<F> DiffAlgorithm for F
where
    F: Fn(&[String], &[String]) -> Revision,
{
    fn compute_revision(&self, original: &[String], revised: &[String]) -> Revision {
        self(original, revised)
    }
}
