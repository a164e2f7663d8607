//! Explicit levels and directions (X1-X9).

use tracing::trace;

use crate::char_type::CharType;
use crate::run_list::{RunArena, RunLevel, RunList, LEVEL_REMOVED};

/// Highest embedding level an explicit code can open.
pub const MAX_EXPLICIT_LEVEL: u8 = 125;

const MAX_STACK: usize = MAX_EXPLICIT_LEVEL as usize;

/// Directional status stack of rules X2-X7.
///
/// Pushes that would exceed [`MAX_EXPLICIT_LEVEL`] are only counted in
/// `over_pushed`, and the matching PDFs consume the count instead of
/// popping. `first_interval` remembers how many rejected pushes came
/// before the last push that reached the maximum level, so that the PDF
/// closing that push pops it before eating the older rejects.
pub(crate) struct LevelStack {
    saved_level: [RunLevel; MAX_STACK + 1],
    saved_override: [CharType; MAX_STACK + 1],
    depth: usize,
    level: RunLevel,
    override_status: CharType,
    over_pushed: usize,
    first_interval: usize,
}

impl LevelStack {
    pub fn new(base_level: u8) -> Self {
        Self {
            saved_level: [0; MAX_STACK + 1],
            saved_override: [CharType::ON; MAX_STACK + 1],
            depth: 0,
            level: base_level as RunLevel,
            override_status: CharType::ON,
            over_pushed: 0,
            first_interval: 0,
        }
    }

    #[inline]
    pub fn level(&self) -> RunLevel {
        self.level
    }

    #[inline]
    pub fn override_status(&self) -> CharType {
        self.override_status
    }

    /// Opens the embedding or override introduced by `code`.
    pub fn push(&mut self, code: CharType) {
        let dir = code.dir_level();
        let new_level = ((self.level + dir + 2) & !1) - dir;
        if new_level <= MAX_EXPLICIT_LEVEL as RunLevel && self.depth < MAX_STACK {
            if self.level == MAX_EXPLICIT_LEVEL as RunLevel - 1 {
                self.first_interval = self.over_pushed;
            }
            self.saved_level[self.depth] = self.level;
            self.saved_override[self.depth] = self.override_status;
            self.depth += 1;
            self.level = new_level;
            self.override_status = code.override_status();
        } else {
            self.over_pushed += 1;
            trace!(
                level = self.level,
                over_pushed = self.over_pushed,
                "{code} rejected above the maximum explicit level"
            );
        }
    }

    /// Closes the innermost embedding (PDF).
    pub fn pop(&mut self) {
        if self.over_pushed == 0 && self.depth == 0 {
            return;
        }
        if self.over_pushed > self.first_interval {
            self.over_pushed -= 1;
        } else {
            if self.over_pushed == self.first_interval {
                self.first_interval = 0;
            }
            if self.depth > 0 {
                self.depth -= 1;
                self.level = self.saved_level[self.depth];
                self.override_status = self.saved_override[self.depth];
            }
        }
    }
}

/// Assigns explicit levels to `main` and strips the explicit codes and
/// boundary neutrals out of it (X9). Returns the side list holding the
/// stripped runs in position order, each at [`LEVEL_REMOVED`].
pub(crate) fn resolve_explicit(arena: &mut RunArena, main: RunList, base_level: u8) -> RunList {
    let explicits = arena.new_list();
    let mut stack = LevelStack::new(base_level);

    let mut cursor = arena.first(main);
    while let Some(id) = cursor {
        cursor = arena.next_run(id);
        let kind = arena[id].kind;

        if kind.is_explicit_or_bn() {
            if kind.is_embedding() {
                for _ in 0..arena[id].len {
                    stack.push(kind);
                }
            } else if kind == CharType::PDF {
                for _ in 0..arena[id].len {
                    stack.pop();
                }
            }
            arena[id].level = LEVEL_REMOVED;
            arena.move_before(id, explicits.tail);
        } else {
            let run = &mut arena[id];
            run.level = stack.level();
            if stack.override_status() != CharType::ON {
                run.kind = stack.override_status();
            }
        }
    }

    arena.coalesce_exact(main);
    explicits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::char_type::CharType::*;

    #[test]
    fn test_stack_push_pop() {
        let mut stack = LevelStack::new(0);
        stack.push(RLE);
        assert_eq!(stack.level(), 1);
        stack.push(RLE);
        assert_eq!(stack.level(), 3);
        stack.push(LRO);
        assert_eq!(stack.level(), 4);
        assert_eq!(stack.override_status(), L);
        stack.pop();
        assert_eq!(stack.level(), 3);
        assert_eq!(stack.override_status(), ON);
        stack.pop();
        stack.pop();
        assert_eq!(stack.level(), 0);
        // Unmatched PDF is ignored.
        stack.pop();
        assert_eq!(stack.level(), 0);
    }

    #[test]
    fn test_stack_overflow_intervals() {
        let mut stack = LevelStack::new(0);
        for _ in 0..62 {
            stack.push(LRE);
        }
        assert_eq!(stack.level(), 124);

        // Would reach 126.
        stack.push(LRE);
        assert_eq!(stack.level(), 124);
        // Reaches 125 after one rejected push.
        stack.push(RLE);
        assert_eq!(stack.level(), 125);

        // Closes the RLE.
        stack.pop();
        assert_eq!(stack.level(), 124);
        // Eats the rejected LRE.
        stack.pop();
        assert_eq!(stack.level(), 124);
        stack.pop();
        assert_eq!(stack.level(), 122);
    }

    #[test]
    fn test_stack_rejects_beyond_max() {
        let mut stack = LevelStack::new(1);
        for _ in 0..200 {
            stack.push(RLO);
        }
        assert_eq!(stack.level(), 125);
        assert_eq!(stack.override_status(), R);
        for _ in 0..200 {
            stack.pop();
        }
        assert_eq!(stack.level(), 1);
        assert_eq!(stack.override_status(), ON);
    }

    #[test]
    fn test_resolve_explicit_strips_codes() {
        let mut arena = RunArena::new();
        let main = arena.build(&[L, LRE, R, R, PDF, L]);
        let explicits = resolve_explicit(&mut arena, main, 0);

        assert_eq!(arena.display(main).to_string(), "[0+1:L@0 2+2:R@2 5+1:L@0]");
        assert_eq!(
            arena.display(explicits).to_string(),
            "[1+1:LRE@-2 4+1:PDF@-2]"
        );
    }

    #[test]
    fn test_resolve_explicit_override() {
        let mut arena = RunArena::new();
        let main = arena.build(&[RLO, L, EN, WS, PDF, L]);
        resolve_explicit(&mut arena, main, 0);
        assert_eq!(arena.display(main).to_string(), "[1+3:R@1 5+1:L@0]");
    }

    #[test]
    fn test_resolve_explicit_merges_across_removed() {
        let mut arena = RunArena::new();
        let main = arena.build(&[L, BN, L]);
        let explicits = resolve_explicit(&mut arena, main, 0);
        // The merged run spans the gap left by the boundary neutral.
        assert_eq!(arena.display(main).to_string(), "[0+2:L@0]");
        assert_eq!(arena.display(explicits).to_string(), "[1+1:BN@-2]");
    }
}
