//! Run-length encoded working representation of a paragraph.
//!
//! Runs live in a [`RunArena`] and are chained into doubly linked lists by
//! id. A [`RunList`] is only a pair of sentinel ids, so the main list and
//! the explicits side list share one arena and a run moves between them by
//! relinking. Every list is bounded by a start sentinel (`SOT`) and an end
//! sentinel (`EOT`), both at [`LEVEL_SENTINEL`].

use std::fmt;
use std::ops::{Index, IndexMut};

use slotmap::{new_key_type, SlotMap};

use crate::char_type::CharType;

new_key_type! {
    pub struct RunId;
}

/// Signed run level. Negative values are reserved markers.
pub type RunLevel = i16;

/// Level of the two sentinels of a list.
pub const LEVEL_SENTINEL: RunLevel = -1;
/// Level of a run stripped in X9 before it could be assigned one.
pub const LEVEL_REMOVED: RunLevel = -2;

#[derive(Debug, Clone)]
pub struct Run {
    pub kind: CharType,
    pub pos: usize,
    pub len: usize,
    pub level: RunLevel,
    prev: Option<RunId>,
    next: Option<RunId>,
}

impl Run {
    pub fn new(kind: CharType, pos: usize, len: usize, level: RunLevel) -> Self {
        Self {
            kind,
            pos,
            len,
            level,
            prev: None,
            next: None,
        }
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.pos + self.len
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunList {
    pub head: RunId,
    pub tail: RunId,
}

#[derive(Debug, Default)]
pub struct RunArena {
    runs: SlotMap<RunId, Run>,
}

impl Index<RunId> for RunArena {
    type Output = Run;

    #[inline]
    fn index(&self, id: RunId) -> &Run {
        &self.runs[id]
    }
}

impl IndexMut<RunId> for RunArena {
    #[inline]
    fn index_mut(&mut self, id: RunId) -> &mut Run {
        &mut self.runs[id]
    }
}

impl RunArena {
    pub fn new() -> Self {
        Self {
            runs: SlotMap::with_key(),
        }
    }

    /// Number of live nodes, sentinels included.
    #[cfg(test)]
    pub fn node_count(&self) -> usize {
        self.runs.len()
    }

    #[inline]
    pub fn alloc(&mut self, run: Run) -> RunId {
        self.runs.insert(run)
    }

    /// Creates an empty list.
    pub fn new_list(&mut self) -> RunList {
        let head = self.alloc(Run::new(CharType::SOT, 0, 0, LEVEL_SENTINEL));
        let tail = self.alloc(Run::new(CharType::EOT, 0, 0, LEVEL_SENTINEL));
        self[head].next = Some(tail);
        self[tail].prev = Some(head);
        RunList { head, tail }
    }

    /// Run-length encodes `types` into a new list with every run at level 0.
    pub fn build(&mut self, types: &[CharType]) -> RunList {
        let list = self.new_list();
        let mut last: Option<RunId> = None;
        for (pos, &kind) in types.iter().enumerate() {
            match last {
                Some(id) if self[id].kind == kind => self[id].len += 1,
                _ => last = Some(self.push_back(list, Run::new(kind, pos, 1, 0))),
            }
        }
        list
    }

    #[inline]
    pub fn is_sentinel(&self, id: RunId) -> bool {
        self[id].kind.is_sentinel()
    }

    /// First live run of `list`.
    #[inline]
    pub fn first(&self, list: RunList) -> Option<RunId> {
        self.next_run(list.head)
    }

    /// Following live run, `None` at the end sentinel.
    #[inline]
    pub fn next_run(&self, id: RunId) -> Option<RunId> {
        self[id].next.filter(|&next| !self.is_sentinel(next))
    }

    /// Preceding live run, `None` at the start sentinel.
    #[inline]
    pub fn prev_run(&self, id: RunId) -> Option<RunId> {
        self[id].prev.filter(|&prev| !self.is_sentinel(prev))
    }

    pub fn iter(&self, list: RunList) -> Iter<'_> {
        Iter {
            arena: self,
            cursor: self.first(list),
        }
    }

    pub fn push_back(&mut self, list: RunList, run: Run) -> RunId {
        let id = self.alloc(run);
        let anchor = self[list.tail].prev.unwrap_or(list.head);
        self.link_after(anchor, id);
        id
    }

    /// Links the detached run `id` right after `anchor`.
    pub fn link_after(&mut self, anchor: RunId, id: RunId) {
        debug_assert!(self[id].prev.is_none() && self[id].next.is_none());
        let next = self[anchor].next;
        self[id].prev = Some(anchor);
        self[id].next = next;
        self[anchor].next = Some(id);
        if let Some(next) = next {
            self[next].prev = Some(id);
        }
    }

    /// Detaches `id` from whatever list holds it, patching its neighbours.
    pub fn unlink(&mut self, id: RunId) {
        let (prev, next) = (self[id].prev.take(), self[id].next.take());
        if let Some(prev) = prev {
            self[prev].next = next;
        }
        if let Some(next) = next {
            self[next].prev = prev;
        }
    }

    /// Unlinks and releases `id`.
    pub fn remove(&mut self, id: RunId) {
        self.unlink(id);
        self.runs.remove(id);
    }

    /// Moves `id` out of its current list to just before `target`, which may
    /// belong to another list.
    pub fn move_before(&mut self, id: RunId, target: RunId) {
        self.unlink(id);
        if let Some(anchor) = self[target].prev {
            self.link_after(anchor, id);
        }
    }

    /// Folds `id` into its predecessor and returns the predecessor.
    pub fn merge_with_prev(&mut self, id: RunId) -> RunId {
        let Some(prev) = self[id].prev else {
            return id;
        };
        self[prev].len += self[id].len;
        self.remove(id);
        prev
    }

    /// Merges every run into its live predecessor when `same` holds for the
    /// pair.
    pub fn coalesce<F>(&mut self, list: RunList, same: F)
    where
        F: Fn(&Run, &Run) -> bool,
    {
        let mut cursor = self.first(list);
        while let Some(id) = cursor {
            let target = match self.prev_run(id) {
                Some(prev) if same(&self[prev], &self[id]) => self.merge_with_prev(id),
                _ => id,
            };
            cursor = self.next_run(target);
        }
    }

    /// Merges adjacent runs with identical type and level.
    pub fn coalesce_exact(&mut self, list: RunList) {
        self.coalesce(list, |a, b| a.kind == b.kind && a.level == b.level);
    }

    /// Merges adjacent runs at the same level whose types are identical or
    /// both neutral.
    pub fn coalesce_neutral(&mut self, list: RunList) {
        self.coalesce(list, |a, b| {
            a.level == b.level
                && (a.kind == b.kind || (a.kind.is_neutral() && b.kind.is_neutral()))
        });
    }

    /// Type of the preceding run when it shares the level of `id`, else the
    /// direction of the higher of the two levels (sor).
    pub fn prev_type_or_sor(&self, id: RunId) -> CharType {
        match self[id].prev {
            Some(prev) => self.neighbour_type(id, prev),
            None => CharType::from_level(self[id].level),
        }
    }

    /// Type of the following run when it shares the level of `id`, else the
    /// direction of the higher of the two levels (eor).
    pub fn next_type_or_eor(&self, id: RunId) -> CharType {
        match self[id].next {
            Some(next) => self.neighbour_type(id, next),
            None => CharType::from_level(self[id].level),
        }
    }

    #[inline]
    fn neighbour_type(&self, id: RunId, other: RunId) -> CharType {
        let (level, other_level) = (self[id].level, self[other].level);
        if level == other_level {
            self[other].kind
        } else {
            CharType::from_level(level.max(other_level))
        }
    }

    /// Whether the neighbour after `id` is a live run at the same level.
    #[inline]
    pub fn same_level_as_next(&self, id: RunId) -> bool {
        self.next_run(id)
            .is_some_and(|next| self[next].level == self[id].level)
    }

    /// Whether the neighbour before `id` is a live run at the same level.
    #[inline]
    pub fn same_level_as_prev(&self, id: RunId) -> bool {
        self.prev_run(id)
            .is_some_and(|prev| self[prev].level == self[id].level)
    }

    /// Splices every run of `overlay` into `base` over the exact range the
    /// overlay run covers, splitting or trimming the base runs it overlaps.
    /// `overlay` is consumed.
    pub fn override_list(&mut self, base: RunList, overlay: RunList) {
        self.shadow(base, overlay, false);
    }

    /// Like [`RunArena::override_list`], but first grows the base run that
    /// ends up under each overlay run by the overlay length. Used to put
    /// back runs that were taken out of `base`, whose positions the base
    /// runs merged over.
    pub fn reinsert_list(&mut self, base: RunList, overlay: RunList) {
        self.shadow(base, overlay, true);
    }

    fn shadow(&mut self, base: RunList, overlay: RunList, preserve_length: bool) {
        let mut p = base.head;
        let mut last_pos = 0;
        let mut cursor = self.first(overlay);

        while let Some(q) = cursor {
            cursor = self.next_run(q);
            let (pos, len) = (self[q].pos, self[q].len);
            if len == 0 || pos < last_pos {
                continue;
            }
            last_pos = pos;
            let end = pos + len;

            // p: last run starting at or before the overlay run.
            while let Some(next) = self.next_run(p) {
                if self[next].pos > pos {
                    break;
                }
                p = next;
            }
            // r: last run starting before the overlay run ends.
            let mut r = p;
            while let Some(next) = self.next_run(r) {
                if self[next].pos >= end {
                    break;
                }
                r = next;
            }
            if preserve_length && !self.is_sentinel(r) {
                self[r].len += len;
            }

            let p_live = !self.is_sentinel(p);
            if p == r {
                // Split p in up to three parts and put q in place of the middle.
                r = if p_live && self[p].end() > end {
                    let (kind, level, p_end) = (self[p].kind, self[p].level, self[p].end());
                    let third = self.alloc(Run::new(kind, end, p_end - end, level));
                    self.link_after(p, third);
                    third
                } else {
                    self.following(r, base)
                };
                if p_live && self[p].end() >= pos {
                    if self[p].pos < pos {
                        self[p].len = pos - self[p].pos;
                    } else {
                        let dropped = p;
                        p = self[p].prev.unwrap_or(base.head);
                        self.remove(dropped);
                    }
                }
            } else {
                if p_live && self[p].end() >= pos {
                    if self[p].pos < pos {
                        self[p].len = pos - self[p].pos;
                    } else {
                        p = self[p].prev.unwrap_or(base.head);
                    }
                }
                if self[r].end() > end {
                    let r_end = self[r].end();
                    self[r].pos = end;
                    self[r].len = r_end - end;
                } else {
                    r = self.following(r, base);
                }
                // Drop everything strictly between p and r.
                let mut doomed = self.following(p, base);
                while doomed != r {
                    let next = self.following(doomed, base);
                    self.remove(doomed);
                    doomed = next;
                }
            }

            self.unlink(q);
            self.link_after(p, q);
            debug_assert_eq!(self[q].next, Some(r));
        }

        self.release_list(overlay);
    }

    #[inline]
    fn following(&self, id: RunId, list: RunList) -> RunId {
        self[id].next.unwrap_or(list.tail)
    }

    /// Releases every node of `list`, sentinels included.
    pub fn release_list(&mut self, list: RunList) {
        let mut cursor = Some(list.head);
        while let Some(id) = cursor {
            cursor = self[id].next;
            self.runs.remove(id);
        }
    }

    /// Whether the live runs of `list` cover `0..len` in order, without
    /// gaps or overlaps.
    pub fn covers(&self, list: RunList, len: usize) -> bool {
        let mut expected = 0;
        for run in self.iter(list) {
            if run.pos != expected {
                return false;
            }
            expected = run.end();
        }
        expected == len
    }

    /// Number of live runs in `list`.
    pub fn run_count(&self, list: RunList) -> usize {
        self.iter(list).count()
    }

    /// Compact `[pos+len:TYPE@level ...]` rendering for trace output.
    pub fn display(&self, list: RunList) -> Display<'_> {
        Display { arena: self, list }
    }
}

pub struct Iter<'a> {
    arena: &'a RunArena,
    cursor: Option<RunId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Run;

    fn next(&mut self) -> Option<Self::Item> {
        let arena = self.arena;
        let id = self.cursor?;
        self.cursor = arena.next_run(id);
        Some(&arena[id])
    }
}

pub struct Display<'a> {
    arena: &'a RunArena,
    list: RunList,
}

impl fmt::Display for Display<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, run) in self.arena.iter(self.list).enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}+{}:{}@{}", run.pos, run.len, run.kind, run.level)?;
        }
        f.write_str("]")
    }
}
