//! Weak types (W1-W7).

use crate::char_type::CharType::{self, *};
use crate::run_list::{RunArena, RunList};

pub(crate) fn resolve_weak(arena: &mut RunArena, main: RunList, base_dir: CharType) {
    resolve_marks_and_arabic_numbers(arena, main, base_dir);
    resolve_numbers(arena, main, base_dir);
    arena.coalesce_neutral(main);
}

/// W1 and W2 in a single sweep.
fn resolve_marks_and_arabic_numbers(arena: &mut RunArena, main: RunList, base_dir: CharType) {
    let mut last_strong = base_dir;
    let mut cursor = arena.first(main);
    while let Some(mut id) = cursor {
        let prev_type = arena.prev_type_or_sor(id);
        let this_type = arena[id].kind;
        let next_type = arena.next_type_or_eor(id);

        if prev_type.is_strong() {
            last_strong = prev_type;
        }

        // W1
        if this_type == NSM {
            if arena.same_level_as_prev(id) {
                id = arena.merge_with_prev(id);
            } else {
                arena[id].kind = prev_type;
            }
            if prev_type == next_type && arena.same_level_as_next(id) {
                if let Some(next) = arena.next_run(id) {
                    id = arena.merge_with_prev(next);
                }
            }
            cursor = arena.next_run(id);
            continue;
        }

        // W2
        if this_type == EN && last_strong == AL {
            arena[id].kind = AN;
            // A mark after the number takes the number's new type.
            if next_type == NSM {
                if let Some(next) = arena.next_run(id) {
                    arena[next].kind = AN;
                }
            }
        }

        cursor = arena.next_run(id);
    }
}

/// W3 to W7 in a single sweep.
///
/// `prev_type_org` is the type the previous run had before W7, so that a
/// number W7 turned into L still counts as a European number for W4 and
/// W5 on the next run. `w4` is cleared when W5 just produced a number,
/// which keeps a separator after a terminator from joining it.
fn resolve_numbers(arena: &mut RunArena, main: RunList, base_dir: CharType) {
    let mut last_strong = base_dir;
    let mut w4 = true;
    let mut prev_type_org = ON;

    let mut cursor = arena.first(main);
    while let Some(id) = cursor {
        cursor = arena.next_run(id);

        let prev_type = arena.prev_type_or_sor(id);
        let mut this_type = arena[id].kind;
        let next_type = arena.next_type_or_eor(id);

        if prev_type.is_strong() {
            last_strong = prev_type;
        }

        // W3
        if this_type == AL {
            arena[id].kind = R;
            w4 = true;
            prev_type_org = ON;
            continue;
        }

        // W4
        if w4
            && arena[id].len == 1
            && this_type.is_es_or_cs()
            && prev_type_org.is_number()
            && prev_type_org == next_type
            && (prev_type_org == EN || this_type == CS)
        {
            this_type = prev_type_org;
            arena[id].kind = this_type;
        }
        w4 = true;

        // W5
        if this_type == ET && (prev_type_org == EN || next_type == EN) {
            this_type = EN;
            arena[id].kind = this_type;
            w4 = false;
        }

        // W6
        if this_type.is_number_separator_or_terminator() {
            arena[id].kind = ON;
        }

        // W7
        if this_type == EN && last_strong == L {
            arena[id].kind = L;
            prev_type_org = if arena.same_level_as_next(id) { EN } else { ON };
        } else {
            prev_type_org = match arena.next_run(id) {
                Some(next) => arena.prev_type_or_sor(next),
                None => ON,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run_list::RunLevel;

    fn resolve(types: &[CharType], level: RunLevel) -> String {
        let mut arena = RunArena::new();
        let main = arena.build(types);
        let mut cursor = arena.first(main);
        while let Some(id) = cursor {
            arena[id].level = level;
            cursor = arena.next_run(id);
        }
        resolve_weak(&mut arena, main, CharType::from_level(level));
        arena.display(main).to_string()
    }

    #[test]
    fn test_nsm_takes_previous_type() {
        assert_eq!(resolve(&[R, NSM, R], 1), "[0+3:R@1]");
        assert_eq!(resolve(&[L, NSM, R], 1), "[0+2:L@1 2+1:R@1]");
        // At the start of the sequence the mark takes sor.
        assert_eq!(resolve(&[NSM, L], 1), "[0+1:R@1 1+1:L@1]");
    }

    #[test]
    fn test_arabic_context_numbers() {
        assert_eq!(resolve(&[AL, EN, NSM], 1), "[0+1:R@1 1+2:AN@1]");
        assert_eq!(resolve(&[R, EN], 1), "[0+1:R@1 1+1:EN@1]");
    }

    #[test]
    fn test_separators_between_numbers() {
        assert_eq!(resolve(&[EN, CS, EN], 1), "[0+3:EN@1]");
        assert_eq!(resolve(&[EN, ES, EN], 1), "[0+3:EN@1]");
        assert_eq!(resolve(&[AN, CS, AN], 1), "[0+3:AN@1]");
        // ES only joins European numbers.
        assert_eq!(
            resolve(&[AN, ES, AN], 1),
            "[0+1:AN@1 1+1:ON@1 2+1:AN@1]"
        );
        // Only a single separator joins.
        assert_eq!(
            resolve(&[EN, CS, CS, EN], 1),
            "[0+1:EN@1 1+2:ON@1 3+1:EN@1]"
        );
    }

    #[test]
    fn test_terminators() {
        assert_eq!(resolve(&[ET, EN], 1), "[0+2:EN@1]");
        assert_eq!(resolve(&[EN, ET, ET], 1), "[0+3:EN@1]");
        assert_eq!(resolve(&[ET, R], 1), "[0+1:ON@1 1+1:R@1]");
    }

    #[test]
    fn test_european_numbers_after_ltr() {
        assert_eq!(resolve(&[EN, CS, EN], 0), "[0+3:L@0]");
        assert_eq!(resolve(&[L, WS, EN], 0), "[0+1:L@0 1+1:WS@0 2+1:L@0]");
    }
}
