//! Ball colors.
//!
//! A color is an opaque palette index: two balls are interchangeable
//! exactly when their indices are equal. There is no ordering semantics.
//! The hex palette exists only so legacy persisted boards (which stored
//! display colors instead of indices) can be mapped back.

use serde::{Deserialize, Serialize};

/// Display palette carried over from the original game client.
///
/// Index position is the stable identity; the hex value is presentation
/// only and is never compared beyond legacy-format decoding.
pub const COLOR_PALETTE: [&str; 15] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7",
    "#DDA0DD", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E9",
    "#F8C471", "#82E0AA", "#F1948A", "#D7BDE2", "#A9DFBF",
];

/// A ball color, identified by palette index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color(pub u8);

impl Color {
    /// Create a color from a palette index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw palette index.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Look up the display hex code, if the index is within the palette.
    #[must_use]
    pub fn hex(self) -> Option<&'static str> {
        COLOR_PALETTE.get(self.0 as usize).copied()
    }

    /// Map a display hex code back to its palette color.
    ///
    /// The comparison is case-insensitive since legacy data was written
    /// by hand in more than one casing.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        COLOR_PALETTE
            .iter()
            .position(|c| c.eq_ignore_ascii_case(hex))
            .map(|i| Self(i as u8))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u8> for Color {
    fn from(index: u8) -> Self {
        Self(index)
    }
}
