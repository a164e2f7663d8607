use tracing::{debug, trace};

use crate::char_type::{CharType, Direction};
use crate::explicit::resolve_explicit;
use crate::implicit::resolve_implicit;
use crate::neutral::resolve_neutral;
use crate::reinsert::{reinsert_explicits, reset_whitespace};
use crate::run_list::{RunArena, RunLevel, RunList};
use crate::weak::resolve_weak;
use crate::Level;

/// A paragraph after every resolution pass: the run list carries the
/// final embedding level of each position.
pub(crate) struct Analysis {
    pub arena: RunArena,
    pub runs: RunList,
    pub base_level: Level,
    pub max_level: Level,
}

impl Analysis {
    pub fn run(types: &[CharType], direction: Direction) -> Self {
        let base_level = paragraph_level(types, direction);
        let base_dir = CharType::from_level(base_level as RunLevel);

        let mut arena = RunArena::new();
        let runs = arena.build(types);
        trace!(runs = %arena.display(runs), "run length encoded");

        let explicits = resolve_explicit(&mut arena, runs, base_level);
        trace!(
            runs = %arena.display(runs),
            explicits = %arena.display(explicits),
            "explicit levels resolved"
        );

        resolve_weak(&mut arena, runs, base_dir);
        trace!(runs = %arena.display(runs), "weak types resolved");

        resolve_neutral(&mut arena, runs);
        trace!(runs = %arena.display(runs), "neutral types resolved");

        let max_level = resolve_implicit(&mut arena, runs, base_level);
        trace!(runs = %arena.display(runs), max_level, "implicit levels resolved");

        reinsert_explicits(&mut arena, runs, explicits, base_level);
        reset_whitespace(&mut arena, runs, types, base_level);
        trace!(runs = %arena.display(runs), "explicits reinserted and whitespace reset");

        debug_assert!(
            arena.covers(runs, types.len()),
            "runs {} do not cover {} positions",
            arena.display(runs),
            types.len()
        );
        debug!(
            len = types.len(),
            base_level,
            max_level,
            runs = arena.run_count(runs),
            "paragraph analysed"
        );

        Self {
            arena,
            runs,
            base_level,
            max_level,
        }
    }

    #[inline]
    pub fn base_direction(&self) -> Direction {
        Direction::from_level(self.base_level)
    }

    /// Embedding level of every position, in logical order.
    pub fn levels(&self, len: usize) -> Vec<Level> {
        let mut levels = Vec::with_capacity(len);
        for run in self.arena.iter(self.runs) {
            levels.extend(std::iter::repeat_n(run.level.max(0) as Level, run.len));
        }
        levels
    }
}

/// Paragraph embedding level (P2, P3): 0 or 1 for a strong direction,
/// otherwise the direction of the first strong letter, falling back on
/// the weak direction requested when there is none.
pub(crate) fn paragraph_level(types: &[CharType], direction: Direction) -> Level {
    match direction {
        Direction::Ltr => 0,
        Direction::Rtl => 1,
        Direction::Auto | Direction::WeakLtr | Direction::WeakRtl => types
            .iter()
            .find(|kind| kind.is_letter())
            .map(|kind| kind.dir_level() as Level)
            .unwrap_or(direction.is_rtl() as Level),
    }
}
