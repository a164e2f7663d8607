//! Implicit levels (I1-I2).

use crate::run_list::{RunArena, RunLevel, RunList};

/// Raises run levels by their resolved type and returns the highest level
/// in the paragraph.
pub(crate) fn resolve_implicit(arena: &mut RunArena, main: RunList, base_level: u8) -> u8 {
    let mut max_level = base_level as RunLevel;
    let mut cursor = arena.first(main);
    while let Some(id) = cursor {
        cursor = arena.next_run(id);
        let run = &mut arena[id];
        let level = run.level;
        run.level = if run.kind.is_number() {
            (level + 2) & !1
        } else {
            (level ^ run.kind.dir_level()) + (level & 1)
        };
        max_level = max_level.max(run.level);
    }

    arena.coalesce_exact(main);
    max_level as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::char_type::CharType::{self, *};
    use crate::run_list::Run;

    fn resolve(runs: &[(CharType, RunLevel)], base_level: u8) -> (String, u8) {
        let mut arena = RunArena::new();
        let main = arena.new_list();
        for (pos, &(kind, level)) in runs.iter().enumerate() {
            arena.push_back(main, Run::new(kind, pos, 1, level));
        }
        let max = resolve_implicit(&mut arena, main, base_level);
        (arena.display(main).to_string(), max)
    }

    #[test]
    fn test_even_levels() {
        let (runs, max) = resolve(&[(L, 0), (R, 0), (EN, 0), (AN, 0)], 0);
        assert_eq!(runs, "[0+1:L@0 1+1:R@1 2+1:EN@2 3+1:AN@2]");
        assert_eq!(max, 2);
    }

    #[test]
    fn test_odd_levels() {
        let (runs, max) = resolve(&[(R, 1), (L, 1), (EN, 1), (AN, 1)], 1);
        assert_eq!(runs, "[0+1:R@1 1+1:L@2 2+1:EN@2 3+1:AN@2]");
        assert_eq!(max, 2);
    }

    #[test]
    fn test_max_level_defaults_to_base() {
        let (runs, max) = resolve(&[(R, 1), (R, 1)], 1);
        assert_eq!(runs, "[0+2:R@1]");
        assert_eq!(max, 1);
    }
}
