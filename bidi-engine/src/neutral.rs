//! Neutral types (N1-N2).

use crate::char_type::CharType;
use crate::run_list::{RunArena, RunList};

pub(crate) fn resolve_neutral(arena: &mut RunArena, main: RunList) {
    let mut cursor = arena.first(main);
    while let Some(id) = cursor {
        cursor = arena.next_run(id);
        if !arena[id].kind.is_neutral() {
            continue;
        }

        let prev_type = arena.prev_type_or_sor(id).numbers_as_rtl();
        let next_type = arena.next_type_or_eor(id).numbers_as_rtl();
        arena[id].kind = if prev_type == next_type {
            prev_type
        } else {
            CharType::from_level(arena[id].level)
        };
    }

    arena.coalesce_exact(main);
}
