use crate::char_type::classify;
use crate::error::{BidiError, Result};
use crate::unicode::is_mark;
use crate::Level;

/// Arrays kept in step with the buffer given to [`remove_bidi_marks`].
///
/// `visual_to_logical` and `levels` are parallel to the buffer and are
/// compacted with it. `logical_to_visual` points into the buffer; it is
/// rebuilt after the compaction and removed characters map to `None`.
#[derive(Debug, Default)]
pub struct MarkMaps<'a> {
    pub visual_to_logical: Option<&'a mut Vec<usize>>,
    pub logical_to_visual: Option<&'a mut Vec<Option<usize>>>,
    pub levels: Option<&'a mut Vec<Level>>,
}

/// Removes explicit formatting codes and the LRM and RLM marks from
/// `buffer`, usually the visual string produced by [`crate::log2vis`].
/// Returns the new length of the buffer.
pub fn remove_bidi_marks(buffer: &mut Vec<char>, maps: MarkMaps<'_>) -> Result<usize> {
    let len = buffer.len();
    let MarkMaps {
        visual_to_logical,
        logical_to_visual,
        mut levels,
    } = maps;

    for found in [
        visual_to_logical.as_ref().map(|map| map.len()),
        logical_to_visual.as_ref().map(|map| map.len()),
        levels.as_ref().map(|levels| levels.len()),
    ]
    .into_iter()
    .flatten()
    {
        if found != len {
            return Err(BidiError::MapLength {
                expected: len,
                found,
            });
        }
    }

    // The inverse map is rebuilt from a forward one, borrowed or private.
    let mut private_map: Option<Vec<usize>> = match (&visual_to_logical, &logical_to_visual) {
        (None, Some(inverse)) => {
            let mut map: Vec<usize> = (0..len).collect();
            for (logical, &visual) in inverse.iter().enumerate() {
                if let Some(visual) = visual.filter(|&visual| visual < len) {
                    map[visual] = logical;
                }
            }
            Some(map)
        }
        _ => None,
    };
    let mut forward: Option<&mut Vec<usize>> = visual_to_logical.or(private_map.as_mut());

    let mut kept = 0;
    for i in 0..len {
        let ch = buffer[i];
        if classify(ch).is_explicit() || is_mark(ch) {
            continue;
        }
        buffer[kept] = ch;
        if let Some(levels) = levels.as_deref_mut() {
            levels[kept] = levels[i];
        }
        if let Some(map) = forward.as_deref_mut() {
            map[kept] = map[i];
        }
        kept += 1;
    }

    buffer.truncate(kept);
    if let Some(levels) = levels {
        levels.truncate(kept);
    }
    if let Some(map) = forward.as_deref_mut() {
        map.truncate(kept);
    }

    if let (Some(inverse), Some(map)) = (logical_to_visual, forward) {
        inverse.iter_mut().for_each(|slot| *slot = None);
        for (visual, &logical) in map.iter().enumerate() {
            if let Some(slot) = inverse.get_mut(logical) {
                *slot = Some(visual);
            }
        }
    }

    Ok(kept)
}
