// Editor helpers driven by real paragraph outputs

use bidi_engine::{
    find_string_changes, is_char_rtl, log2vis, map_range, xpos_resolve, BidiConfig,
    BidiError, Direction, Outputs, Paragraph,
};

fn line(text: &str, direction: Direction) -> (Vec<u8>, Vec<usize>) {
    let input: Vec<char> = text.chars().collect();
    let visual = log2vis(&input, direction, Outputs::ALL, &BidiConfig::default()).unwrap();
    (
        visual.levels.unwrap(),
        visual.visual_to_logical.unwrap(),
    )
}

#[test]
fn test_selection_spans_across_direction_change() {
    let (levels, v2l) = line("ab \u{05D0}\u{05D1}", Direction::Ltr);
    assert_eq!(levels, vec![0, 0, 0, 1, 1]);
    assert_eq!(v2l, vec![0, 1, 2, 4, 3]);

    assert_eq!(map_range(3..5, &v2l).as_slice(), &[3..5]);
    assert_eq!(map_range(1..4, &v2l).as_slice(), &[1..3, 4..5]);
    assert_eq!(map_range(4.., &v2l).as_slice(), &[3..4]);
}

#[test]
fn test_cursor_hits_on_mixed_line() {
    let (levels, v2l) = line("ab \u{05D0}\u{05D1}", Direction::Ltr);
    let widths = [10; 5];

    // Left half of "b".
    let hit = xpos_resolve(12, 0, Some(levels.as_slice()), Direction::Ltr, &v2l, &widths).unwrap();
    assert_eq!((hit.logical_pos, hit.visual_pos, hit.cursor_x), (1, 1, 10));
    assert!(!hit.cursor_rtl);

    // Right half of the fourth glyph, the second Hebrew letter.
    let hit = xpos_resolve(35, 0, Some(levels.as_slice()), Direction::Ltr, &v2l, &widths).unwrap();
    assert_eq!((hit.logical_pos, hit.visual_pos, hit.cursor_x), (4, 4, 40));
    assert!(hit.cursor_rtl);
    assert!(hit.attach_before);

    // Left half of the last glyph, the first Hebrew letter.
    let hit = xpos_resolve(41, 0, Some(levels.as_slice()), Direction::Ltr, &v2l, &widths).unwrap();
    assert_eq!((hit.logical_pos, hit.visual_pos, hit.cursor_x), (4, 4, 40));
    assert!(!hit.attach_before);

    assert_eq!(
        xpos_resolve(0, 0, Some(&levels[..2]), Direction::Ltr, &v2l, &widths),
        Err(BidiError::MapLength {
            expected: 5,
            found: 2
        })
    );
}

#[test]
fn test_char_direction_lookup() {
    let (levels, _) = line("1 \u{05D0}", Direction::Auto);
    assert_eq!(levels, vec![2, 1, 1]);
    assert!(!is_char_rtl(Some(levels.as_slice()), Direction::Rtl, 0));
    assert!(is_char_rtl(Some(levels.as_slice()), Direction::Ltr, 2));
    assert!(is_char_rtl(Some(levels.as_slice()), Direction::Rtl, 3));
}

#[test]
fn test_incremental_change_detection() {
    let old: Vec<char> = "shalom \u{05E9}\u{05DC}\u{05D5}\u{05DD}".chars().collect();
    let new: Vec<char> = "shalom \u{05E9}\u{05DC}\u{05DD}".chars().collect();
    let (start, len) = find_string_changes(&old, &new);
    assert_eq!((start, len), (9, 0));

    // Only the changed part needs new levels.
    let before = Paragraph::new(&old).embedding_levels(Direction::Auto).unwrap();
    let after = Paragraph::new(&new).embedding_levels(Direction::Auto).unwrap();
    assert_eq!(before.levels[..start], after.levels[..start]);
}
