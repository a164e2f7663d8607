//! Options that control the visual output of [`crate::log2vis`].
//!
//! With the `serde` feature enabled the options can be embedded in a
//! host configuration file:
//!
//! ```toml
//! [bidi]
//! mirroring = true
//! reorder-nsm = false
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[inline]
fn default_mirroring() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BidiConfig {
    /// Replace characters at odd levels by their mirrored counterpart (L4).
    #[cfg_attr(feature = "serde", serde(default = "default_mirroring"))]
    pub mirroring: bool,
    /// Keep non spacing marks after their base character inside
    /// right-to-left runs (L3).
    #[cfg_attr(feature = "serde", serde(default, rename = "reorder-nsm"))]
    pub reorder_nsm: bool,
}

impl Default for BidiConfig {
    fn default() -> Self {
        Self {
            mirroring: default_mirroring(),
            reorder_nsm: false,
        }
    }
}

impl BidiConfig {
    #[inline]
    pub fn with_mirroring(mut self, mirroring: bool) -> Self {
        self.mirroring = mirroring;
        self
    }

    #[inline]
    pub fn with_reorder_nsm(mut self, reorder_nsm: bool) -> Self {
        self.reorder_nsm = reorder_nsm;
        self
    }
}
