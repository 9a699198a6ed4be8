//! Line mapping across a revision.
//!
//! Given a [`Revision`] and a line number on one side, computes the
//! best-corresponding line number on the other side. The scroll synchronizer
//! uses this to keep two panels aligned: the centered line of the scrolled
//! panel is mapped through the revision and the other panel is scrolled to the
//! result.
//!
//! This is an approximation, not an exact alignment: every line strictly
//! inside a multi-line changed block maps to the first line of the
//! corresponding target block. Precise sub-line alignment would require
//! descending into the nested intra-change refinement, which this mapper does
//! not do.

use crate::delta::{DiffSide, Revision};

/// Map `line`, expressed in `from`-side coordinates, to the corresponding
/// line on the opposite side of `revision`.
///
/// The scan walks the ordered deltas once, accumulating the net line shift of
/// every delta that ends before `line`. A line inside a delta's source range
/// maps to the start of the target chunk; a line outside every delta maps to
/// `line` plus the accumulated shift.
pub fn map_line(revision: &Revision, line: usize, from: DiffSide) -> usize {
    let to = match from {
        DiffSide::Original => DiffSide::Revised,
        DiffSide::Revised => DiffSide::Original,
    };

    let mut offset: isize = 0;
    for delta in revision.deltas() {
        let src = delta.chunk(from);
        let tgt = delta.chunk(to);

        if src.anchor() > line {
            // The line falls strictly before this delta (and all later ones).
            break;
        }
        if line < src.end() {
            // Inside this delta's source range: snap to the target block start.
            return tgt.anchor();
        }

        offset += tgt.size() as isize - src.size() as isize;
    }

    (line as isize + offset).max(0) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delta::{Chunk, Delta};

    fn change(orig: (usize, isize), rev: (usize, isize)) -> Delta {
        Delta::Change {
            original: Chunk::new(orig.0, orig.1),
            revised: Chunk::new(rev.0, rev.1),
            refinement: None,
        }
    }

    #[test]
    fn test_identity_on_empty_revision() {
        let rev = Revision::empty();
        for line in [0, 1, 5, 1000] {
            assert_eq!(map_line(&rev, line, DiffSide::Original), line);
            assert_eq!(map_line(&rev, line, DiffSide::Revised), line);
        }
    }

    #[test]
    fn test_change_delta_end_to_end() {
        // original ["a","b","c"] -> revised ["a","x","y","c"]
        let rev = Revision::new(vec![change((1, 1), (1, 2))]);

        assert_eq!(map_line(&rev, 0, DiffSide::Original), 0);
        // Inside the changed block: start of the target block.
        assert_eq!(map_line(&rev, 1, DiffSide::Original), 1);
        // Past the delta: shifted by the size difference.
        assert_eq!(map_line(&rev, 2, DiffSide::Original), 3);

        // And back from the revised side.
        assert_eq!(map_line(&rev, 0, DiffSide::Revised), 0);
        assert_eq!(map_line(&rev, 1, DiffSide::Revised), 1);
        assert_eq!(map_line(&rev, 2, DiffSide::Revised), 1);
        assert_eq!(map_line(&rev, 3, DiffSide::Revised), 2);
    }

    #[test]
    fn test_insertion_shifts_following_lines() {
        // original ["a","c","d"] -> revised ["a","X","c","Y","d"]
        let rev = Revision::new(vec![
            Delta::Add {
                original: Chunk::new(1, 0),
                revised: Chunk::new(1, 1),
            },
            Delta::Add {
                original: Chunk::new(2, 0),
                revised: Chunk::new(3, 1),
            },
        ]);

        assert_eq!(map_line(&rev, 0, DiffSide::Original), 0);
        assert_eq!(map_line(&rev, 1, DiffSide::Original), 2);
        assert_eq!(map_line(&rev, 2, DiffSide::Original), 4);

        // Inserted lines map back to the insertion anchor.
        assert_eq!(map_line(&rev, 1, DiffSide::Revised), 1);
        assert_eq!(map_line(&rev, 3, DiffSide::Revised), 2);
        assert_eq!(map_line(&rev, 4, DiffSide::Revised), 2);
    }

    #[test]
    fn test_deletion_maps_into_anchor() {
        // original ["a","b","c","d","e"] -> revised ["a","c","e"]
        let rev = Revision::new(vec![
            Delta::Delete {
                original: Chunk::new(1, 1),
                revised: Chunk::new(1, 0),
            },
            Delta::Delete {
                original: Chunk::new(3, 1),
                revised: Chunk::new(2, 0),
            },
        ]);

        assert_eq!(map_line(&rev, 0, DiffSide::Original), 0);
        // Deleted lines snap to the deletion point on the revised side.
        assert_eq!(map_line(&rev, 1, DiffSide::Original), 1);
        assert_eq!(map_line(&rev, 2, DiffSide::Original), 1);
        assert_eq!(map_line(&rev, 3, DiffSide::Original), 2);
        assert_eq!(map_line(&rev, 4, DiffSide::Original), 2);
    }

    #[test]
    fn test_monotone_outside_deltas() {
        let rev = Revision::new(vec![change((2, 2), (2, 5)), change((10, 1), (13, 1))]);
        let outside = [0usize, 1, 4, 5, 9, 11, 20];
        let mapped: Vec<usize> = outside
            .iter()
            .map(|&l| map_line(&rev, l, DiffSide::Original))
            .collect();
        for pair in mapped.windows(2) {
            assert!(pair[0] <= pair[1], "mapping must be monotone: {mapped:?}");
        }
    }

    #[test]
    fn test_multiline_change_snaps_to_block_start() {
        let rev = Revision::new(vec![change((3, 4), (3, 2))]);
        for line in 3..7 {
            assert_eq!(map_line(&rev, line, DiffSide::Original), 3);
        }
        assert_eq!(map_line(&rev, 7, DiffSide::Original), 5);
    }
}
