//! Screen capability descriptor

use crate::{Extent, ModeFlags, ScreenId};

/// Static description of what one screen supports
///
/// Published once by the driver and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// The unique number of the screen
    pub number: ScreenId,
    /// Display modes the screen can enter
    pub supported_modes: ModeFlags,
    /// Display resolutions in pixels, in preference order
    pub resolutions: &'static [Extent],
    /// Font cell sizes in pixels, in preference order
    pub font_sizes: &'static [Extent],
}

impl Capabilities {
    pub fn supports_resolution(&self, resolution: Extent) -> bool {
        self.resolutions.contains(&resolution)
    }

    pub fn supports_font(&self, size: Extent) -> bool {
        self.font_sizes.contains(&size)
    }

    /// True if every flag in `mode` is one this screen supports
    pub fn supports_mode(&self, mode: ModeFlags) -> bool {
        self.supported_modes.contains(mode)
    }

    /// Largest character grid any supported resolution/font pair produces
    pub fn max_text_size(&self) -> Extent {
        let mut width = 0i16;
        let mut height = 0i16;
        for resolution in self.resolutions {
            for font in self.font_sizes.iter().filter(|f| !f.is_empty()) {
                width = width.max(resolution.width / font.width);
                height = height.max(resolution.height / font.height);
            }
        }
        Extent::new(width, height)
    }
}
