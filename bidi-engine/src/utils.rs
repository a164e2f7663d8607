//! Helpers for editors and renderers built on the paragraph outputs.

use std::ops::{Bound, Range, RangeBounds};

use smallvec::SmallVec;

use crate::char_type::Direction;
use crate::error::{BidiError, Result};
use crate::Level;

/// Smallest edit turning `old` into `new`: returns the length of the
/// common prefix and the number of elements of `new` that differ after
/// it. The common suffix never overlaps the prefix.
pub fn find_string_changes<T: PartialEq>(old: &[T], new: &[T]) -> (usize, usize) {
    let prefix = old.iter().zip(new).take_while(|(a, b)| a == b).count();
    let room = old.len().min(new.len()) - prefix;
    let suffix = old
        .iter()
        .rev()
        .zip(new.iter().rev())
        .take(room)
        .take_while(|(a, b)| a == b)
        .count();
    (prefix, new.len() - prefix - suffix)
}

/// Maximal ranges of indices `i` whose `position_map[i]` lies in `range`.
///
/// With a visual to logical map this turns a logical selection into the
/// visual spans to highlight. A selection crossing one direction change
/// gives at most three spans, which stay inline.
pub fn map_range<R>(range: R, position_map: &[usize]) -> SmallVec<[Range<usize>; 3]>
where
    R: RangeBounds<usize>,
{
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.saturating_add(1),
        Bound::Excluded(&end) => end,
        Bound::Unbounded => usize::MAX,
    };

    let mut spans: SmallVec<[Range<usize>; 3]> = SmallVec::new();
    for (i, &pos) in position_map.iter().enumerate() {
        if pos < start || pos >= end {
            continue;
        }
        match spans.last_mut() {
            Some(span) if span.end == i => span.end = i + 1,
            _ => spans.push(i..i + 1),
        }
    }
    spans
}

/// Whether the character at `index` is laid out right to left. Falls back
/// on the paragraph direction without levels or past their end.
pub fn is_char_rtl(levels: Option<&[Level]>, base_dir: Direction, index: usize) -> bool {
    match levels.and_then(|levels| levels.get(index)) {
        Some(level) => level & 1 == 1,
        None => base_dir.is_rtl(),
    }
}

/// Cursor placement for a pointer position, see [`xpos_resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorHit {
    /// Insertion point in the logical text.
    pub logical_pos: usize,
    /// Insertion point between visual glyphs.
    pub visual_pos: usize,
    /// Pixel position of the cursor, snapped to a glyph edge.
    pub cursor_x: i32,
    /// Direction of the character the cursor is attached to.
    pub cursor_rtl: bool,
    /// Whether the cursor sits logically before that character.
    pub attach_before: bool,
}

/// Hit-tests pixel `x` against a line whose glyphs, in visual order, start
/// at `x_offset` and have the given `widths`.
///
/// Positions before the line resolve against the first glyph and positions
/// after it against the last one. `levels` are in logical order.
pub fn xpos_resolve(
    x: i32,
    x_offset: i32,
    levels: Option<&[Level]>,
    base_dir: Direction,
    visual_to_logical: &[usize],
    widths: &[i32],
) -> Result<CursorHit> {
    let len = visual_to_logical.len();
    if widths.len() != len {
        return Err(BidiError::MapLength {
            expected: len,
            found: widths.len(),
        });
    }
    if let Some(levels) = levels.filter(|levels| levels.len() != len) {
        return Err(BidiError::MapLength {
            expected: len,
            found: levels.len(),
        });
    }

    if len == 0 {
        return Ok(CursorHit {
            logical_pos: 0,
            visual_pos: 0,
            cursor_x: x_offset,
            cursor_rtl: base_dir.is_rtl(),
            attach_before: true,
        });
    }

    let mut visual = 0;
    let mut left = x_offset;
    while visual + 1 < len && x >= left.saturating_add(widths[visual]) {
        left = left.saturating_add(widths[visual]);
        visual += 1;
    }

    let width = widths[visual];
    let logical = visual_to_logical[visual];
    let rtl = is_char_rtl(levels, base_dir, logical);
    let left_half = x < left.saturating_add(width / 2);
    let attach_before = left_half != rtl;

    Ok(CursorHit {
        logical_pos: if attach_before { logical } else { logical + 1 },
        visual_pos: if left_half { visual } else { visual + 1 },
        cursor_x: if left_half { left } else { left.saturating_add(width) },
        cursor_rtl: rtl,
        attach_before,
    })
}
