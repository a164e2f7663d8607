//! Putting the X9 runs back, and the whitespace reset of L1.

use crate::char_type::CharType;
use crate::run_list::{RunArena, RunLevel, RunList, Run, LEVEL_REMOVED};

/// Splices the runs stripped by X9 back into `main`. A stripped run takes
/// the level of the run before it, or the paragraph level at the start of
/// the text.
pub(crate) fn reinsert_explicits(
    arena: &mut RunArena,
    main: RunList,
    explicits: RunList,
    base_level: u8,
) {
    if arena.first(explicits).is_none() {
        arena.release_list(explicits);
        return;
    }
    arena.reinsert_list(main, explicits);

    let mut prev_level = base_level as RunLevel;
    let mut cursor = arena.first(main);
    while let Some(id) = cursor {
        cursor = arena.next_run(id);
        if arena[id].level == LEVEL_REMOVED {
            arena[id].level = prev_level;
        }
        prev_level = arena[id].level;
    }
}

/// L1: segment and paragraph separators, and any whitespace run before a
/// separator or at the end of the line, go back to the paragraph level.
///
/// Works on the types the paragraph had before resolution, so whitespace
/// the neutral rules turned strong is still seen as whitespace.
pub(crate) fn reset_whitespace(
    arena: &mut RunArena,
    main: RunList,
    types: &[CharType],
    base_level: u8,
) {
    let base_dir = CharType::from_level(base_level as RunLevel);
    let resets = arena.new_list();

    let mut trailing = true;
    let mut end = types.len();
    for i in (0..=types.len()).rev() {
        // Index 0 of the loop stands for the position before the text.
        let kind = match i {
            0 => CharType::ON,
            _ => types[i - 1],
        };
        if !trailing && kind.is_separator() {
            trailing = true;
            end = i;
        } else if trailing && !kind.is_explicit_or_space() {
            trailing = false;
            if end > i {
                let run = arena.alloc(Run::new(base_dir, i, end - i, base_level as RunLevel));
                arena.link_after(resets.head, run);
            }
        }
    }

    arena.override_list(main, resets);
}
