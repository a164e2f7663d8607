//! Unicode bidirectional algorithm (UAX#9) for single paragraphs.
//!
//! A paragraph is classified into [`CharType`]s, run length encoded, and
//! resolved pass by pass over the run list: explicit embeddings (X1-X9),
//! weak types (W1-W7), neutrals (N1-N2), implicit levels (I1-I2) and the
//! whitespace reset of L1. [`log2vis`] then mirrors and reorders the text
//! into display order (L2-L4).
//!
//! ```
//! use bidi_engine::{log2vis, BidiConfig, Direction, Outputs};
//!
//! let text: Vec<char> = "abc \u{05D0}\u{05D1}\u{05D2}".chars().collect();
//! let line = log2vis(&text, Direction::Auto, Outputs::ALL, &BidiConfig::default())?;
//! assert_eq!(line.base_dir, Direction::Ltr);
//! assert_eq!(line.levels.as_deref(), Some(&[0, 0, 0, 0, 1, 1, 1][..]));
//!
//! let shown: String = line.visual.unwrap_or_default().into_iter().collect();
//! assert_eq!(shown, "abc \u{05D2}\u{05D1}\u{05D0}");
//! # Ok::<(), bidi_engine::BidiError>(())
//! ```

mod analysis;
mod char_type;
pub mod config;
mod error;
mod explicit;
mod implicit;
mod marks;
mod neutral;
mod reinsert;
mod reorder;
mod run_list;
pub mod unicode;
pub mod utils;
mod weak;

use bitflags::bitflags;

use crate::analysis::{paragraph_level, Analysis};
use crate::reorder::{reorder_line, VisualBuffers};

pub use char_type::{classify, mirror, CharType, Direction};
pub use config::BidiConfig;
pub use error::{BidiError, Result};
pub use explicit::MAX_EXPLICIT_LEVEL;
pub use marks::{remove_bidi_marks, MarkMaps};
pub use utils::{find_string_changes, is_char_rtl, map_range, xpos_resolve, CursorHit};

/// Embedding level. Even levels are left to right, odd ones right to left.
pub type Level = u8;

/// Longest paragraph accepted, in code points.
pub const MAX_STRING_LENGTH: usize = 0x7FFF_FFFE;

bitflags! {
    /// Outputs computed by [`log2vis`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Outputs: u8 {
        const VISUAL            = 1;
        const LOGICAL_TO_VISUAL = 1 << 1;
        const VISUAL_TO_LOGICAL = 1 << 2;
        const LEVELS            = 1 << 3;
        const ALL = Self::VISUAL.bits()
            | Self::LOGICAL_TO_VISUAL.bits()
            | Self::VISUAL_TO_LOGICAL.bits()
            | Self::LEVELS.bits();
    }
}

impl Default for Outputs {
    fn default() -> Self {
        Outputs::ALL
    }
}

/// Result of [`log2vis`]. Outputs that were not requested are `None`;
/// the others have one entry per input code point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visual {
    /// Resolved paragraph direction, `Ltr` or `Rtl`.
    pub base_dir: Direction,
    /// Highest embedding level in the paragraph.
    pub max_level: Level,
    /// The text in display order, mirrored where needed.
    pub visual: Option<Vec<char>>,
    pub logical_to_visual: Option<Vec<usize>>,
    pub visual_to_logical: Option<Vec<usize>>,
    /// Embedding levels in logical order.
    pub levels: Option<Vec<Level>>,
}

/// Result of [`get_embedding_levels`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphLevels {
    pub base_dir: Direction,
    pub max_level: Level,
    pub levels: Vec<Level>,
}

/// A paragraph of code points along with the bidi type of each.
#[derive(Debug, Clone)]
pub struct Paragraph<'a> {
    chars: &'a [char],
    types: Vec<CharType>,
}

impl<'a> Paragraph<'a> {
    /// Classifies every code point of `chars`.
    pub fn new(chars: &'a [char]) -> Self {
        Self {
            chars,
            types: chars.iter().map(|&ch| classify(ch)).collect(),
        }
    }

    /// Uses precomputed types for the leading code points. Code points
    /// without one are classified, extra types are ignored.
    pub fn with_types<I>(chars: &'a [char], types: I) -> Self
    where
        I: IntoIterator<Item = CharType>,
    {
        let mut types: Vec<CharType> = types.into_iter().take(chars.len()).collect();
        let given = types.len();
        types.extend(chars[given..].iter().map(|&ch| classify(ch)));
        Self { chars, types }
    }

    #[inline]
    pub fn chars(&self) -> &[char] {
        self.chars
    }

    #[inline]
    pub fn types(&self) -> &[CharType] {
        &self.types
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Resolves the embedding levels of the paragraph without reordering it.
    pub fn embedding_levels(&self, direction: Direction) -> Result<ParagraphLevels> {
        check_length(self.len())?;
        if self.is_empty() {
            let base_level = paragraph_level(&[], direction);
            return Ok(ParagraphLevels {
                base_dir: Direction::from_level(base_level),
                max_level: base_level,
                levels: Vec::new(),
            });
        }

        let analysis = Analysis::run(&self.types, direction);
        Ok(ParagraphLevels {
            base_dir: analysis.base_direction(),
            max_level: analysis.max_level,
            levels: analysis.levels(self.len()),
        })
    }

    /// Resolves the paragraph and produces the requested display outputs.
    pub fn log2vis(
        &self,
        direction: Direction,
        outputs: Outputs,
        config: &BidiConfig,
    ) -> Result<Visual> {
        check_length(self.len())?;
        let len = self.len();
        if len == 0 {
            let base_level = paragraph_level(&[], direction);
            return Ok(Visual {
                base_dir: Direction::from_level(base_level),
                max_level: base_level,
                visual: outputs.contains(Outputs::VISUAL).then(Vec::new),
                logical_to_visual: outputs.contains(Outputs::LOGICAL_TO_VISUAL).then(Vec::new),
                visual_to_logical: outputs.contains(Outputs::VISUAL_TO_LOGICAL).then(Vec::new),
                levels: outputs.contains(Outputs::LEVELS).then(Vec::new),
            });
        }

        let analysis = Analysis::run(&self.types, direction);

        let mut visual = outputs
            .contains(Outputs::VISUAL)
            .then(|| self.chars.to_vec());
        // The inverse map is derived from the forward one.
        let mut visual_to_logical = outputs
            .intersects(Outputs::VISUAL_TO_LOGICAL | Outputs::LOGICAL_TO_VISUAL)
            .then(|| (0..len).collect::<Vec<usize>>());

        if visual.is_some() || visual_to_logical.is_some() {
            reorder_line(
                &analysis.arena,
                analysis.runs,
                &self.types,
                analysis.max_level,
                config,
                VisualBuffers {
                    visual: visual.as_deref_mut(),
                    visual_to_logical: visual_to_logical.as_deref_mut(),
                },
            );
        }

        let logical_to_visual = if outputs.contains(Outputs::LOGICAL_TO_VISUAL) {
            visual_to_logical.as_deref().map(invert)
        } else {
            None
        };
        if !outputs.contains(Outputs::VISUAL_TO_LOGICAL) {
            visual_to_logical = None;
        }

        Ok(Visual {
            base_dir: analysis.base_direction(),
            max_level: analysis.max_level,
            visual,
            logical_to_visual,
            visual_to_logical,
            levels: outputs
                .contains(Outputs::LEVELS)
                .then(|| analysis.levels(len)),
        })
    }
}

/// Resolves `input` as one paragraph and reorders it for display.
///
/// `direction` is the requested paragraph direction; the resolved one is
/// returned in [`Visual::base_dir`].
pub fn log2vis(
    input: &[char],
    direction: Direction,
    outputs: Outputs,
    config: &BidiConfig,
) -> Result<Visual> {
    check_length(input.len())?;
    Paragraph::new(input).log2vis(direction, outputs, config)
}

/// Resolves the embedding levels of `input` as one paragraph.
pub fn get_embedding_levels(input: &[char], direction: Direction) -> Result<ParagraphLevels> {
    check_length(input.len())?;
    Paragraph::new(input).embedding_levels(direction)
}

#[inline]
fn check_length(len: usize) -> Result<()> {
    if len > MAX_STRING_LENGTH {
        return Err(BidiError::LengthExceeded {
            len,
            max: MAX_STRING_LENGTH,
        });
    }
    Ok(())
}

fn invert(map: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0; map.len()];
    for (i, &j) in map.iter().enumerate() {
        inverse[j] = i;
    }
    inverse
}
