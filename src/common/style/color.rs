use std::fmt;

use serde::{Deserialize, Serialize};

/// Colour as stored by StarOffice.
///
/// StarOffice colours are 32-bit values with red, green and blue components
/// plus a transparency byte (0 = opaque, 255 = fully transparent).
///
/// # Examples
///
/// ```rust
/// use stardoc::common::StarColor;
///
/// let red = StarColor::new(255, 0, 0);
/// assert_eq!(red.to_hex(), "ff0000");
/// assert!(StarColor::default().is_black());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StarColor {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Transparency (0 = opaque)
    pub transparency: u8,
}

/// The sixteen predefined colours addressed by a 16-bit colour name.
const PALETTE: [(u8, u8, u8); 16] = [
    (0x00, 0x00, 0x00), // black
    (0x00, 0x00, 0x80), // blue
    (0x00, 0x80, 0x00), // green
    (0x00, 0x80, 0x80), // cyan
    (0x80, 0x00, 0x00), // red
    (0x80, 0x00, 0x80), // magenta
    (0x80, 0x80, 0x00), // brown
    (0x80, 0x80, 0x80), // gray
    (0xC0, 0xC0, 0xC0), // light gray
    (0x00, 0x00, 0xFF), // light blue
    (0x00, 0xFF, 0x00), // light green
    (0x00, 0xFF, 0xFF), // light cyan
    (0xFF, 0x00, 0x00), // light red
    (0xFF, 0x00, 0xFF), // light magenta
    (0xFF, 0xFF, 0x00), // yellow
    (0xFF, 0xFF, 0xFF), // white
];

impl StarColor {
    /// Create an opaque colour.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self {
            r,
            g,
            b,
            transparency: 0,
        }
    }

    /// Create a colour from four raw bytes in red, green, blue, transparency order.
    #[inline]
    pub const fn from_rgba_bytes(bytes: [u8; 4]) -> Self {
        Self {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            transparency: bytes[3],
        }
    }

    /// Create a colour from a packed `0xTTRRGGBB` value.
    #[inline]
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
            transparency: (value >> 24) as u8,
        }
    }

    /// Look up one of the sixteen predefined colours.
    pub fn from_palette(index: u16) -> Option<Self> {
        PALETTE
            .get(usize::from(index))
            .map(|&(r, g, b)| Self::new(r, g, b))
    }

    /// Raw bytes in red, green, blue, transparency order.
    #[inline]
    pub const fn to_rgba_bytes(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.transparency]
    }

    /// Lower-case hex string without `#` prefix, ignoring transparency.
    pub fn to_hex(&self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Whether the colour is fully transparent ("automatic" in most attributes).
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.transparency == 0xFF
    }

    /// Opacity in percent.
    #[inline]
    pub fn opacity_percent(&self) -> f64 {
        100.0 * (255.0 - f64::from(self.transparency)) / 255.0
    }
}

impl fmt::Display for StarColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette() {
        assert_eq!(StarColor::from_palette(0), Some(StarColor::new(0, 0, 0)));
        assert_eq!(StarColor::from_palette(15), Some(StarColor::new(255, 255, 255)));
        assert_eq!(StarColor::from_palette(16), None);
    }

    #[test]
    fn test_packed_and_bytes() {
        let c = StarColor::from_packed(0xFF12_3456);
        assert_eq!((c.r, c.g, c.b, c.transparency), (0x12, 0x34, 0x56, 0xFF));
        assert!(c.is_transparent());
        assert_eq!(StarColor::from_rgba_bytes(c.to_rgba_bytes()), c);
        assert_eq!(c.to_string(), "#123456");
    }
}
