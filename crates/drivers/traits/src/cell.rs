//! Character cells, colors and the cursor appearance

/// One cell of the text screen: a character and its color attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    /// Glyph index in the current font
    pub character: u8,
    /// Foreground LUT index in the high nibble, background in the low
    pub attribute: u8,
}

impl Cell {
    pub const fn new(character: u8, attribute: u8) -> Self {
        Self {
            character,
            attribute,
        }
    }

    /// A space in the given color
    pub const fn blank(attribute: u8) -> Self {
        Self::new(b' ', attribute)
    }

    pub const fn foreground(&self) -> u8 {
        self.attribute >> 4
    }

    pub const fn background(&self) -> u8 {
        self.attribute & 0x0F
    }
}

/// Pack a foreground/background pair of text LUT indices into an attribute
///
/// Both indices are truncated to 4 bits.
pub const fn color_attribute(foreground: u8, background: u8) -> u8 {
    ((foreground & 0x0F) << 4) | (background & 0x0F)
}

/// Cursor blink period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BlinkRate {
    #[default]
    OneSecond = 0,
    HalfSecond = 1,
    QuarterSecond = 2,
    FifthSecond = 3,
}

impl BlinkRate {
    /// Decode the low two bits of a raw rate
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => BlinkRate::OneSecond,
            1 => BlinkRate::HalfSecond,
            2 => BlinkRate::QuarterSecond,
            _ => BlinkRate::FifthSecond,
        }
    }

    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Appearance of the hardware cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorStyle {
    pub enabled: bool,
    pub rate: BlinkRate,
    /// Character in the current font drawn as the cursor
    pub glyph: u8,
}

impl CursorStyle {
    pub const fn new(enabled: bool, rate: BlinkRate, glyph: u8) -> Self {
        Self {
            enabled,
            rate,
            glyph,
        }
    }
}
