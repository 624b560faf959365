//! RGB colours and the chart palette.

/// RGB color representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel (0.0 - 1.0)
    pub r: f32,
    /// Green channel (0.0 - 1.0)
    pub g: f32,
    /// Blue channel (0.0 - 1.0)
    pub b: f32,
}

/// Ordered chart palette. Series are coloured `PALETTE[index % 8]`, so a
/// ninth series repeats the first colour.
pub const PALETTE: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#9c755f",
];

/// Colour used when a hex string cannot be parsed.
pub const FALLBACK: Color = Color {
    r: 0.6,
    g: 0.6,
    b: 0.6,
};

/// Hex colour for the series at `index`.
pub fn palette_hex(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

impl Color {
    /// Create a new color.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a black color.
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// A neutral grey of the given lightness.
    pub const fn gray(level: f32) -> Self {
        Self::new(level, level, level)
    }

    /// Parse `#rgb` / `#rrggbb` (leading `#` optional). Returns `None` for any
    /// other length or non-hex digits.
    pub fn parse_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok().map(|v| v as f32 / 255.0);
        match digits.len() {
            3 => {
                let mut out = [0.0f32; 3];
                for (slot, c) in out.iter_mut().zip(digits.chars()) {
                    *slot = channel(&format!("{c}{c}"))?;
                }
                Some(Self::new(out[0], out[1], out[2]))
            },
            6 => Some(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => None,
        }
    }

    /// Parse a hex colour, falling back to [`FALLBACK`].
    pub fn from_hex(hex: &str) -> Self {
        Self::parse_hex(hex).unwrap_or(FALLBACK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_six_digit_hex() {
        assert_eq!(Color::from_hex("#ff0000"), Color::new(1.0, 0.0, 0.0));
        assert_eq!(Color::from_hex("00FF00"), Color::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_three_digit_hex() {
        assert_eq!(Color::from_hex("#00f"), Color::new(0.0, 0.0, 1.0));
        assert_eq!(Color::from_hex("#fff"), Color::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_bad_hex_falls_back() {
        assert_eq!(Color::from_hex("#abcd"), FALLBACK);
        assert_eq!(Color::from_hex("red"), FALLBACK);
        assert_eq!(Color::from_hex(""), FALLBACK);
        assert_eq!(Color::from_hex("#gg0000"), FALLBACK);
    }

    #[test]
    fn test_palette_wraps_after_eight() {
        assert_eq!(palette_hex(0), PALETTE[0]);
        assert_eq!(palette_hex(7), PALETTE[7]);
        assert_eq!(palette_hex(8), PALETTE[0]);
        assert_eq!(palette_hex(17), PALETTE[1]);
    }

    #[test]
    fn test_palette_entries_parse() {
        for hex in PALETTE {
            assert!(Color::parse_hex(hex).is_some(), "{} should parse", hex);
        }
    }
}
