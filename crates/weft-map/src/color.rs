use std::fmt;
use std::str::FromStr;

/// Exact-match RGB key used to classify template pixels.
///
/// Alpha never participates: template images are flattened to RGB8 before
/// sampling, and two keys are equal only when all three channels are.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorKey {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorKey {
    /// Pure black, reserved to mean "leave this column alone".
    pub const SENTINEL: ColorKey = ColorKey::new(0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn is_sentinel(self) -> bool {
        self == Self::SENTINEL
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<image::Rgb<u8>> for ColorKey {
    #[inline]
    fn from(px: image::Rgb<u8>) -> Self {
        Self::new(px.0[0], px.0[1], px.0[2])
    }
}

/// Accepts `#RRGGBB` or `0xRRGGBB`, case-insensitive hex digits.
impl FromStr for ColorKey {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .or_else(|| trimmed.strip_prefix("0X"));
        let parsed = digits
            .filter(|d| d.len() == 6)
            .and_then(|d| u32::from_str_radix(d, 16).ok());
        match parsed {
            Some(rgb) => Ok(ColorKey::new(
                ((rgb >> 16) & 0xFF) as u8,
                ((rgb >> 8) & 0xFF) as u8,
                (rgb & 0xFF) as u8,
            )),
            None => Err(ColorParseError {
                input: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError {
    input: String,
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid color value '{}' (expected #RRGGBB or 0xRRGGBB)",
            self.input
        )
    }
}

impl std::error::Error for ColorParseError {}
