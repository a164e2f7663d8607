//! Bidi character types and paragraph directions.
//!
//! Every [`CharType`] discriminant is a combination of the `MASK_*` bits
//! below, so predicates such as [`CharType::is_neutral`] are a single
//! bit test instead of a match over the whole enumeration.

use std::fmt;
use std::str::FromStr;

use swash::text::{BidiClass, Codepoint as _};

use crate::error::BidiError;

// Direction bits.
const MASK_RTL: u32 = 0x0000_0001;
const MASK_ARABIC: u32 = 0x0000_0002;

// Each type is exactly one of strong, weak, neutral or sentinel.
const MASK_STRONG: u32 = 0x0000_0010;
const MASK_WEAK: u32 = 0x0000_0020;
const MASK_NEUTRAL: u32 = 0x0000_0040;
const MASK_SENTINEL: u32 = 0x0000_0080;

// Each type is at most one of letter, number, number separator or
// terminator, space or explicit.
const MASK_LETTER: u32 = 0x0000_0100;
const MASK_NUMBER: u32 = 0x0000_0200;
const MASK_NUMSEPTER: u32 = 0x0000_0400;
const MASK_SPACE: u32 = 0x0000_0800;
const MASK_EXPLICIT: u32 = 0x0000_1000;

// Only set together with MASK_SPACE.
const MASK_SEPARATOR: u32 = 0x0000_2000;
// Only set together with MASK_EXPLICIT.
const MASK_OVERRIDE: u32 = 0x0000_4000;

// Keep the remaining types pairwise distinct.
const MASK_ES: u32 = 0x0001_0000;
const MASK_ET: u32 = 0x0002_0000;
const MASK_CS: u32 = 0x0004_0000;
const MASK_NSM: u32 = 0x0008_0000;
const MASK_BN: u32 = 0x0010_0000;
const MASK_WS: u32 = 0x0020_0000;
const MASK_PS: u32 = 0x0040_0000;

/// Bidi character type of a code point, or of a run once resolution
/// passes have rewritten it.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CharType {
    /// Strong left-to-right.
    L = MASK_STRONG | MASK_LETTER,
    /// Strong right-to-left.
    R = MASK_STRONG | MASK_LETTER | MASK_RTL,
    /// Arabic letter.
    AL = MASK_STRONG | MASK_LETTER | MASK_RTL | MASK_ARABIC,
    /// European number.
    EN = MASK_WEAK | MASK_NUMBER,
    /// Arabic number.
    AN = MASK_WEAK | MASK_NUMBER | MASK_ARABIC,
    /// European number separator.
    ES = MASK_WEAK | MASK_NUMSEPTER | MASK_ES,
    /// European number terminator.
    ET = MASK_WEAK | MASK_NUMSEPTER | MASK_ET,
    /// Common number separator.
    CS = MASK_WEAK | MASK_NUMSEPTER | MASK_CS,
    /// Non spacing mark.
    NSM = MASK_WEAK | MASK_NSM,
    /// Boundary neutral.
    BN = MASK_WEAK | MASK_SPACE | MASK_BN,
    /// Block (paragraph) separator.
    B = MASK_NEUTRAL | MASK_SPACE | MASK_SEPARATOR | MASK_PS,
    /// Segment separator.
    S = MASK_NEUTRAL | MASK_SPACE | MASK_SEPARATOR,
    /// Whitespace.
    WS = MASK_NEUTRAL | MASK_SPACE | MASK_WS,
    /// Other neutral.
    ON = MASK_NEUTRAL,
    /// Left-to-right embedding.
    LRE = MASK_STRONG | MASK_EXPLICIT,
    /// Right-to-left embedding.
    RLE = MASK_STRONG | MASK_EXPLICIT | MASK_RTL,
    /// Left-to-right override.
    LRO = MASK_STRONG | MASK_EXPLICIT | MASK_OVERRIDE,
    /// Right-to-left override.
    RLO = MASK_STRONG | MASK_EXPLICIT | MASK_OVERRIDE | MASK_RTL,
    /// Pop directional format.
    PDF = MASK_WEAK | MASK_EXPLICIT,
    /// Start-of-text sentinel.
    SOT = MASK_SENTINEL,
    /// End-of-text sentinel.
    EOT = MASK_SENTINEL | MASK_RTL,
}

use CharType::*;

const ALL_TYPES: [CharType; 21] = [
    L, R, AL, EN, AN, ES, ET, CS, NSM, BN, B, S, WS, ON, LRE, RLE, LRO, RLO, PDF, SOT,
    EOT,
];

impl CharType {
    #[inline]
    pub const fn mask(self) -> u32 {
        self as u32
    }

    /// Strong letter type: L, R or AL.
    #[inline]
    pub const fn is_strong(self) -> bool {
        self.mask() & (MASK_STRONG | MASK_EXPLICIT) == MASK_STRONG
    }

    #[inline]
    pub const fn is_weak(self) -> bool {
        self.mask() & MASK_WEAK != 0
    }

    #[inline]
    pub const fn is_neutral(self) -> bool {
        self.mask() & MASK_NEUTRAL != 0
    }

    #[inline]
    pub const fn is_sentinel(self) -> bool {
        self.mask() & MASK_SENTINEL != 0
    }

    #[inline]
    pub const fn is_rtl(self) -> bool {
        self.mask() & MASK_RTL != 0
    }

    #[inline]
    pub const fn is_arabic(self) -> bool {
        self.mask() & MASK_ARABIC != 0
    }

    #[inline]
    pub const fn is_letter(self) -> bool {
        self.mask() & MASK_LETTER != 0
    }

    /// EN or AN.
    #[inline]
    pub const fn is_number(self) -> bool {
        self.mask() & MASK_NUMBER != 0
    }

    /// LRE, RLE, LRO, RLO or PDF.
    #[inline]
    pub const fn is_explicit(self) -> bool {
        self.mask() & MASK_EXPLICIT != 0
    }

    /// Embedding or override initiator: LRE, RLE, LRO or RLO.
    #[inline]
    pub const fn is_embedding(self) -> bool {
        self.mask() & (MASK_EXPLICIT | MASK_STRONG) == MASK_EXPLICIT | MASK_STRONG
    }

    /// LRO or RLO.
    #[inline]
    pub const fn is_override(self) -> bool {
        self.mask() & MASK_OVERRIDE != 0
    }

    /// Block or segment separator.
    #[inline]
    pub const fn is_separator(self) -> bool {
        self.mask() & MASK_SEPARATOR != 0
    }

    #[inline]
    pub const fn is_es_or_cs(self) -> bool {
        self.mask() & (MASK_ES | MASK_CS) != 0
    }

    /// ES, ET or CS.
    #[inline]
    pub const fn is_number_separator_or_terminator(self) -> bool {
        self.mask() & MASK_NUMSEPTER != 0
    }

    /// The types removed from the run list by rule X9.
    #[inline]
    pub const fn is_explicit_or_bn(self) -> bool {
        self.mask() & (MASK_EXPLICIT | MASK_BN) != 0
    }

    /// The types rule L1 looks through when resetting trailing whitespace.
    #[inline]
    pub const fn is_explicit_or_space(self) -> bool {
        self.mask() & (MASK_EXPLICIT | MASK_SPACE) != 0
    }

    /// Numbers behave as R when resolving neutrals (N1).
    #[inline]
    pub const fn numbers_as_rtl(self) -> CharType {
        if self.is_number() {
            R
        } else {
            self
        }
    }

    /// 0 for left-to-right types, 1 for right-to-left ones.
    #[inline]
    pub(crate) const fn dir_level(self) -> i16 {
        (self.mask() & MASK_RTL) as i16
    }

    /// Override status pushed by an explicit code: L for LRO, R for RLO
    /// and ON for everything else.
    #[inline]
    pub const fn override_status(self) -> CharType {
        if !self.is_override() {
            ON
        } else if self.is_rtl() {
            R
        } else {
            L
        }
    }

    /// Embedding direction of a level: L when even, R when odd.
    #[inline]
    pub const fn from_level(level: i16) -> CharType {
        if level & 1 == 0 {
            L
        } else {
            R
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            L => "L",
            R => "R",
            AL => "AL",
            EN => "EN",
            AN => "AN",
            ES => "ES",
            ET => "ET",
            CS => "CS",
            NSM => "NSM",
            BN => "BN",
            B => "B",
            S => "S",
            WS => "WS",
            ON => "ON",
            LRE => "LRE",
            RLE => "RLE",
            LRO => "LRO",
            RLO => "RLO",
            PDF => "PDF",
            SOT => "SOT",
            EOT => "EOT",
        }
    }

    pub fn from_name(name: &str) -> Option<CharType> {
        ALL_TYPES.into_iter().find(|ty| ty.name() == name)
    }
}

impl fmt::Display for CharType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<BidiClass> for CharType {
    fn from(class: BidiClass) -> Self {
        match class {
            BidiClass::L => L,
            BidiClass::R => R,
            BidiClass::AL => AL,
            BidiClass::EN => EN,
            BidiClass::AN => AN,
            BidiClass::ES => ES,
            BidiClass::ET => ET,
            BidiClass::CS => CS,
            BidiClass::NSM => NSM,
            BidiClass::BN => BN,
            BidiClass::B => B,
            BidiClass::S => S,
            BidiClass::WS => WS,
            BidiClass::ON => ON,
            BidiClass::LRE => LRE,
            BidiClass::RLE => RLE,
            BidiClass::LRO => LRO,
            BidiClass::RLO => RLO,
            BidiClass::PDF => PDF,
            // Isolates are not part of this type model.
            _ => ON,
        }
    }
}

/// Bidi character type of `ch`.
#[inline]
pub fn classify(ch: char) -> CharType {
    ch.bidi_class().into()
}

/// Mirrored glyph counterpart of `ch`, if it has one.
#[inline]
pub fn mirror(ch: char) -> Option<char> {
    ch.mirror()
}

/// Base direction of a paragraph.
///
/// `Auto` and the weak directions are resolved from the first strong
/// letter in the text. When there is none, `Auto` and `WeakLtr` fall back
/// to left-to-right and `WeakRtl` to right-to-left.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[cfg_attr(feature = "serde", serde(rename = "ltr"))]
    Ltr,
    #[cfg_attr(feature = "serde", serde(rename = "rtl"))]
    Rtl,
    #[cfg_attr(feature = "serde", serde(rename = "wltr", alias = "weak-ltr"))]
    WeakLtr,
    #[cfg_attr(feature = "serde", serde(rename = "wrtl", alias = "weak-rtl"))]
    WeakRtl,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "auto", alias = "on"))]
    Auto,
}

impl Direction {
    /// Whether the direction is fixed regardless of the text content.
    #[inline]
    pub fn is_strong(self) -> bool {
        matches!(self, Direction::Ltr | Direction::Rtl)
    }

    #[inline]
    pub fn is_rtl(self) -> bool {
        matches!(self, Direction::Rtl | Direction::WeakRtl)
    }

    /// Resolved direction of a paragraph embedding level.
    #[inline]
    pub fn from_level(level: u8) -> Direction {
        if level & 1 == 0 {
            Direction::Ltr
        } else {
            Direction::Rtl
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ltr => write!(f, "ltr"),
            Direction::Rtl => write!(f, "rtl"),
            Direction::WeakLtr => write!(f, "wltr"),
            Direction::WeakRtl => write!(f, "wrtl"),
            Direction::Auto => write!(f, "auto"),
        }
    }
}

impl FromStr for Direction {
    type Err = BidiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ltr" | "l" => Ok(Direction::Ltr),
            "rtl" | "r" => Ok(Direction::Rtl),
            "wltr" | "weak-ltr" => Ok(Direction::WeakLtr),
            "wrtl" | "weak-rtl" => Ok(Direction::WeakRtl),
            "auto" | "on" => Ok(Direction::Auto),
            _ => Err(BidiError::InvalidDirection(s.to_string())),
        }
    }
}

impl TryFrom<u8> for Direction {
    type Error = BidiError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Direction::Ltr),
            1 => Ok(Direction::Rtl),
            2 => Ok(Direction::WeakLtr),
            3 => Ok(Direction::WeakRtl),
            4 => Ok(Direction::Auto),
            _ => Err(BidiError::InvalidDirection(value.to_string())),
        }
    }
}
