//! Text Device Trait
//!
//! Implemented by every text screen driver.
//! Used by the console registry, which forwards each call by screen number.

use crate::{Capabilities, Cell, CursorStyle, Extent, ModeFlags, Point, Rect, ScreenId, TextResult};

/// Snapshot of a screen's current geometry and color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextDeviceInfo {
    pub name: &'static str,
    pub number: ScreenId,
    /// Display resolution in pixels
    pub resolution: Extent,
    /// Font cell size in pixels
    pub font_size: Extent,
    /// Full character grid, border included
    pub max_size: Extent,
    /// Character grid left once the border is removed
    pub visible_size: Extent,
    /// Border size in pixels, one side
    pub border: Extent,
    pub region: Rect,
    /// Cursor position relative to the region
    pub cursor: Point,
    /// Current color attribute
    pub color: u8,
}

/// Text screen driver
///
/// `init` must run before any other operation. Only the configuration calls
/// (`set_mode`, `set_resolution`, `set_font`) can fail; a rejected value
/// leaves the screen untouched. Everything else normalizes its input and
/// succeeds.
pub trait TextDevice {
    /// Screen number this driver answers to
    fn number(&self) -> ScreenId;

    /// Display name of the screen
    fn name(&self) -> &'static str;

    /// Reset the screen to its default configuration and clear it
    fn init(&mut self);

    fn capabilities(&self) -> &'static Capabilities;

    fn set_mode(&mut self, mode: ModeFlags) -> TextResult<()>;

    /// Set the display resolution in pixels
    fn set_resolution(&mut self, width: i16, height: i16) -> TextResult<()>;

    /// Set the border size in pixels, one side (0 - 32)
    fn set_border(&mut self, width: i16, height: i16);

    fn set_border_color(&mut self, red: u8, green: u8, blue: u8);

    /// Load a font: one byte per pixel row, 256 glyphs of `height` rows
    fn set_font(&mut self, width: i16, height: i16, glyphs: &[u8]) -> TextResult<()>;

    fn set_cursor(&mut self, style: CursorStyle);

    /// Restrict drawing, scrolling and wrapping to `region`
    ///
    /// A region with an empty size resets to the whole visible screen.
    fn set_region(&mut self, region: Rect) -> TextResult<()>;

    /// Set the current foreground and background LUT indices (0 - 15)
    fn set_color(&mut self, foreground: u8, background: u8) -> TextResult<()>;

    /// Move the cursor, relative to the region
    ///
    /// Wraps to the next line past the right edge and scrolls the region
    /// when moved past the bottom.
    fn set_xy(&mut self, x: i16, y: i16);

    /// Cursor position relative to the region
    fn get_xy(&self) -> Point;

    /// Print a character at the cursor in the current color
    ///
    /// LF and CR move the cursor; BS and HT are accepted and ignored.
    fn put(&mut self, c: u8);

    fn print(&mut self, message: &str) {
        for byte in message.bytes() {
            self.put(byte);
        }
    }

    /// Shift the region's contents by whole cells
    ///
    /// Positive values move text left/up, negative right/down. Vacated cells
    /// are blanked in the current color.
    fn scroll(&mut self, horizontal: i16, vertical: i16);

    /// Fill the region with a character in the current color
    fn fill(&mut self, c: u8);

    fn info(&self) -> TextDeviceInfo;

    /// Read back a cell by absolute position in the full character grid
    fn cell(&self, x: i16, y: i16) -> Option<Cell>;
}
