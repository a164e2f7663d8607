//! Mirroring and reordering (L2-L4).
//!
//! The visual buffer and the visual to logical map start as copies of the
//! logical text and the identity. Mirroring and the mark reordering of L3
//! work on them while they are still in logical order, then L2 reverses
//! index ranges taken straight from the run positions: every stretch at a
//! level holds the stretches at the levels above it, so earlier reversals
//! never move an index out of a later range.

use std::ops::Range;

use tracing::trace;

use crate::char_type::{mirror, CharType};
use crate::config::BidiConfig;
use crate::run_list::{RunArena, RunLevel, RunList};

pub(crate) struct VisualBuffers<'a> {
    pub visual: Option<&'a mut [char]>,
    pub visual_to_logical: Option<&'a mut [usize]>,
}

impl VisualBuffers<'_> {
    fn reverse(&mut self, range: Range<usize>) {
        if let Some(visual) = self.visual.as_deref_mut() {
            visual[range.clone()].reverse();
        }
        if let Some(map) = self.visual_to_logical.as_deref_mut() {
            map[range].reverse();
        }
    }
}

pub(crate) fn reorder_line(
    arena: &RunArena,
    main: RunList,
    types: &[CharType],
    max_level: u8,
    config: &BidiConfig,
    mut buffers: VisualBuffers<'_>,
) {
    if config.mirroring {
        if let Some(visual) = buffers.visual.as_deref_mut() {
            mirror_odd_runs(arena, main, visual);
        }
    }
    if config.reorder_nsm {
        reorder_marks(arena, main, types, &mut buffers);
    }
    reverse_levels(arena, main, max_level, &mut buffers);
}

/// L4: characters at odd levels take their mirrored form.
fn mirror_odd_runs(arena: &RunArena, main: RunList, visual: &mut [char]) {
    for run in arena.iter(main).filter(|run| run.level & 1 == 1) {
        for ch in &mut visual[run.pos..run.end()] {
            if let Some(mirrored) = mirror(*ch) {
                *ch = mirrored;
            }
        }
    }
}

/// L3: inside odd runs, each base character and the marks following it
/// are reversed in place, so that after L2 the marks still follow it.
fn reorder_marks(
    arena: &RunArena,
    main: RunList,
    types: &[CharType],
    buffers: &mut VisualBuffers<'_>,
) {
    for run in arena.iter(main).filter(|run| run.level & 1 == 1) {
        let mut seq_end = None;
        for i in (run.pos..run.end()).rev() {
            let is_mark = types[i] == CharType::NSM;
            match seq_end {
                Some(end) if !is_mark => {
                    buffers.reverse(i..end + 1);
                    seq_end = None;
                }
                None if is_mark => seq_end = Some(i),
                _ => {}
            }
        }
        if seq_end.is_some() {
            trace!(pos = run.pos, "non spacing marks at the start of an odd run");
        }
    }
}

/// L2: from the highest level down to 1, reverses every maximal stretch of
/// runs at that level or above.
fn reverse_levels(
    arena: &RunArena,
    main: RunList,
    max_level: u8,
    buffers: &mut VisualBuffers<'_>,
) {
    for level in (1..=max_level as RunLevel).rev() {
        let mut cursor = arena.first(main);
        while let Some(id) = cursor {
            if arena[id].level < level {
                cursor = arena.next_run(id);
                continue;
            }
            let start = arena[id].pos;
            let mut last = id;
            while let Some(next) = arena.next_run(last) {
                if arena[next].level < level {
                    break;
                }
                last = next;
            }
            buffers.reverse(start..arena[last].end());
            cursor = arena.next_run(last);
        }
    }
}
