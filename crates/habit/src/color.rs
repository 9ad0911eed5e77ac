use std::fmt;

use serde::{Deserialize, Serialize};

/// Packed 32-bit ARGB color split into its four channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct Argb {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Argb {
    pub const fn new(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn from_packed(value: u32) -> Self {
        let [a, r, g, b] = value.to_be_bytes();
        Self { a, r, g, b }
    }

    pub const fn packed(&self) -> u32 {
        u32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    /// CSS hex notation without alpha, e.g. `#2196f3`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for Argb {
    fn default() -> Self {
        PALETTE[DEFAULT_PALETTE_INDEX]
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Self::from_packed(value)
    }
}

impl From<Argb> for u32 {
    fn from(value: Argb) -> Self {
        value.packed()
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:08X}", self.packed())
    }
}

pub const DEFAULT_PALETTE_INDEX: usize = 5;

pub const PALETTE: [Argb; 16] = [
    Argb::from_packed(0xFFF44336), // Red
    Argb::from_packed(0xFFE91E63), // Pink
    Argb::from_packed(0xFF9C27B0), // Purple
    Argb::from_packed(0xFF673AB7), // Deep Purple
    Argb::from_packed(0xFF3F51B5), // Indigo
    Argb::from_packed(0xFF2196F3), // Blue
    Argb::from_packed(0xFF03A9F4), // Light Blue
    Argb::from_packed(0xFF00BCD4), // Cyan
    Argb::from_packed(0xFF009688), // Teal
    Argb::from_packed(0xFF4CAF50), // Green
    Argb::from_packed(0xFF8BC34A), // Light Green
    Argb::from_packed(0xFFCDDC39), // Lime
    Argb::from_packed(0xFFFFEB3B), // Yellow
    Argb::from_packed(0xFFFFC107), // Amber
    Argb::from_packed(0xFFFF9800), // Orange
    Argb::from_packed(0xFFFF5722), // Deep Orange
];
