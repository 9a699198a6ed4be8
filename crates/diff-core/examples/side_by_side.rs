use diff_core::{Chunk, Delta, DiffSide, LineIndex, Revision, map_line, search};

fn main() {
    let original = LineIndex::from_text("a\nb\nc");
    let revised = LineIndex::from_text("a\nx\ny\nc");

    // The edit script normally comes from an external diff algorithm.
    let revision = Revision::new(vec![Delta::Change {
        original: Chunk::new(1, 1),
        revised: Chunk::new(1, 2),
        refinement: None,
    }]);

    // Scroll sync: the left panel centered line 2, scroll the right to line 3.
    assert_eq!(map_line(&revision, 2, DiffSide::Original), 3);

    for line in 0..original.line_count() {
        let mapped = map_line(&revision, line, DiffSide::Original);
        println!(
            "original {line:>2} {:<8} -> revised {mapped:>2} {}",
            original.line_text(line).unwrap_or_default(),
            revised.line_text(mapped).unwrap_or_default(),
        );
    }

    // Search the revised side and walk the matches.
    let mut hits = search(&revised, "y", true);
    hits.next();
    let current = hits.current().expect("one match");
    println!(
        "current match on line {} at offsets {}..{}",
        current.line(),
        current.from_offset(),
        current.to_offset()
    );
}
