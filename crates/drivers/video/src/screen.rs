//! Generic Text Screen
//!
//! `TextScreen` implements the whole `TextDevice` contract once: geometry,
//! region, cursor, scrolling, filling and validation against the capability
//! tables. The hardware-specific part is a `TextController`, which owns the
//! registers and the character/attribute matrix.

use mcp_driver_traits::{
    debug_video, BlinkRate, Capabilities, Cell, CellMatrix, CursorStyle, Extent, ModeFlags, Point,
    Rect, ScreenId, TextDevice, TextDeviceInfo, TextError, TextResult,
};

use crate::scroll::{fill_region, scroll_region};
use crate::state::{resolve_cursor, ScreenState};

/// Configuration a screen returns to on `init`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenDefaults {
    pub resolution: Extent,
    pub font_size: Extent,
    /// Glyphs loaded at init, 256 glyphs of `font_size.height` rows
    pub font: &'static [u8],
    pub foreground: u8,
    pub background: u8,
    pub cursor: CursorStyle,
    /// Border size in pixels, one side
    pub border: Extent,
    /// Border color as (red, green, blue)
    pub border_color: (u8, u8, u8),
}

impl ScreenDefaults {
    /// Cursor used by every channel unless overridden
    pub const CURSOR: CursorStyle = CursorStyle::new(true, BlinkRate::OneSecond, 0xB1);
}

/// Hardware side of a text screen
///
/// Called only with values the screen has already validated against
/// `capabilities()`.
pub trait TextController: CellMatrix {
    fn capabilities(&self) -> &'static Capabilities;

    fn name(&self) -> &'static str;

    /// Configuration this controller boots with
    fn defaults(&self) -> ScreenDefaults;

    /// Clear control registers and load the color lookup tables
    fn reset(&mut self);

    fn apply_mode(&mut self, mode: ModeFlags);

    fn apply_resolution(&mut self, resolution: Extent);

    /// Program the border; a zero extent disables it
    fn apply_border(&mut self, border: Extent);

    fn apply_border_color(&mut self, red: u8, green: u8, blue: u8);

    /// Copy glyphs into font memory and program the cell size
    fn load_font(&mut self, size: Extent, glyphs: &[u8]);

    /// Program cursor appearance; `color` is the attribute it is drawn in
    fn apply_cursor(&mut self, style: CursorStyle, color: u8);

    /// Move the hardware cursor to an absolute grid position
    fn apply_cursor_position(&mut self, position: Point);
}

/// A text screen driven through a controller
pub struct TextScreen<C> {
    controller: C,
    defaults: ScreenDefaults,
    state: ScreenState,
    mode: ModeFlags,
    cursor_style: CursorStyle,
}

impl<C: TextController> TextScreen<C> {
    /// Wrap a controller using its own defaults
    pub fn new(controller: C) -> Self {
        let defaults = controller.defaults();
        Self::with_defaults(controller, defaults)
    }

    /// Wrap a controller with custom defaults
    ///
    /// The defaults must name a resolution and font the controller supports,
    /// otherwise `init` leaves that part unconfigured.
    pub fn with_defaults(controller: C, defaults: ScreenDefaults) -> Self {
        TextScreen {
            controller,
            defaults,
            state: ScreenState::new(),
            mode: ModeFlags::empty(),
            cursor_style: defaults.cursor,
        }
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn defaults(&self) -> &ScreenDefaults {
        &self.defaults
    }

    pub fn mode(&self) -> ModeFlags {
        self.mode
    }

    pub fn cursor_style(&self) -> CursorStyle {
        self.cursor_style
    }

    fn sync_cursor_position(&mut self) {
        let position = self.state.absolute_cursor();
        self.controller.apply_cursor_position(position);
    }

    fn stride(&self) -> usize {
        self.state.max_size.width.max(0) as usize
    }
}

fn report(name: &str, step: &str, result: TextResult<()>) {
    if let Err(e) = result {
        log::warn!("{}: init could not {}: {}", name, step, e);
    }
}

impl<C: TextController> TextDevice for TextScreen<C> {
    fn number(&self) -> ScreenId {
        self.controller.capabilities().number
    }

    fn name(&self) -> &'static str {
        self.controller.name()
    }

    fn init(&mut self) {
        let name = self.name();
        let defaults = self.defaults;

        self.state.begin_init();
        self.controller.reset();

        report(name, "enter text mode", self.set_mode(ModeFlags::TEXT));
        report(
            name,
            "set resolution",
            self.set_resolution(defaults.resolution.width, defaults.resolution.height),
        );
        report(name, "set color", self.set_color(defaults.foreground, defaults.background));
        report(
            name,
            "load font",
            self.set_font(defaults.font_size.width, defaults.font_size.height, defaults.font),
        );
        self.set_cursor(defaults.cursor);
        self.set_border(defaults.border.width, defaults.border.height);
        let (red, green, blue) = defaults.border_color;
        self.set_border_color(red, green, blue);

        self.state.enable_sizes();
        report(name, "reset region", self.set_region(Rect::ZERO));
        self.set_xy(0, 0);
        self.fill(b' ');

        log::info!(
            "{}: {}x{} text on {}x{}",
            name,
            self.state.visible_size.width,
            self.state.visible_size.height,
            self.state.resolution.width,
            self.state.resolution.height
        );
    }

    fn capabilities(&self) -> &'static Capabilities {
        self.controller.capabilities()
    }

    fn set_mode(&mut self, mode: ModeFlags) -> TextResult<()> {
        let caps = self.controller.capabilities();
        if !caps.supports_mode(mode) || !mode.intersects(ModeFlags::TEXT | ModeFlags::SLEEP) {
            log::warn!("{}: unsupported mode {:#x}", self.name(), mode.bits());
            return Err(TextError::UnsupportedConfiguration);
        }

        // Sleep disables sync, so it replaces text mode
        let applied = if mode.contains(ModeFlags::SLEEP) {
            ModeFlags::SLEEP
        } else {
            ModeFlags::TEXT
        };
        self.controller.apply_mode(applied);
        self.mode = applied;
        Ok(())
    }

    fn set_resolution(&mut self, width: i16, height: i16) -> TextResult<()> {
        let resolution = Extent::new(width, height);
        if !self.controller.capabilities().supports_resolution(resolution) {
            log::warn!("{}: unsupported resolution {}x{}", self.name(), width, height);
            return Err(TextError::UnsupportedConfiguration);
        }

        self.controller.apply_resolution(resolution);
        self.state.resolution = resolution;
        self.state.recompute_sizes();
        Ok(())
    }

    fn set_border(&mut self, width: i16, height: i16) {
        let border = self.state.set_border(width, height);
        self.controller.apply_border(border);
    }

    fn set_border_color(&mut self, red: u8, green: u8, blue: u8) {
        self.controller.apply_border_color(red, green, blue);
    }

    fn set_font(&mut self, width: i16, height: i16, glyphs: &[u8]) -> TextResult<()> {
        let size = Extent::new(width, height);
        if !self.controller.capabilities().supports_font(size) {
            log::warn!("{}: unsupported font size {}x{}", self.name(), width, height);
            return Err(TextError::UnsupportedConfiguration);
        }

        let expected = 256 * height as usize;
        if glyphs.len() < expected {
            log::warn!(
                "{}: font data too short ({} of {} bytes)",
                self.name(),
                glyphs.len(),
                expected
            );
            return Err(TextError::InvalidFontData {
                expected,
                actual: glyphs.len(),
            });
        }

        self.controller.load_font(size, &glyphs[..expected]);
        self.state.font_size = size;
        self.state.recompute_sizes();
        Ok(())
    }

    fn set_cursor(&mut self, style: CursorStyle) {
        self.cursor_style = style;
        self.controller.apply_cursor(style, self.state.color);
    }

    fn set_region(&mut self, region: Rect) -> TextResult<()> {
        if self.state.set_region(region) {
            let applied = self.state.region;
            log::warn!(
                "{}: region {}x{}+{}+{} clipped to {}x{}+{}+{}",
                self.name(),
                region.size.width,
                region.size.height,
                region.origin.x,
                region.origin.y,
                applied.size.width,
                applied.size.height,
                applied.origin.x,
                applied.origin.y
            );
        }
        self.sync_cursor_position();
        Ok(())
    }

    fn set_color(&mut self, foreground: u8, background: u8) -> TextResult<()> {
        self.state.set_color(foreground, background);
        Ok(())
    }

    fn set_xy(&mut self, x: i16, y: i16) {
        let (position, scroll) = resolve_cursor(self.state.region.size, x, y);
        if scroll > 0 {
            debug_video!("{}: cursor past bottom, scrolling {} rows", self.name(), scroll);
            self.scroll(0, scroll);
        }
        self.state.cursor = position;
        self.sync_cursor_position();
    }

    fn get_xy(&self) -> Point {
        self.state.cursor
    }

    fn put(&mut self, c: u8) {
        let Point { x, y } = self.state.cursor;
        match c {
            // Backspace and tab
            0x08 | 0x09 => {}
            b'\n' => self.set_xy(x, y + 1),
            b'\r' => self.set_xy(0, y),
            _ => {
                if self.state.region.is_empty() {
                    return;
                }
                let offset = self.state.offset_of(self.state.cursor);
                self.controller.write_cell(offset, Cell::new(c, self.state.color));
                self.set_xy(x + 1, y);
            }
        }
    }

    fn scroll(&mut self, horizontal: i16, vertical: i16) {
        debug_video!("{}: scroll {},{}", self.name(), horizontal, vertical);
        let stride = self.stride();
        let blank = Cell::blank(self.state.color);
        scroll_region(&mut self.controller, stride, self.state.region, horizontal, vertical, blank);
    }

    fn fill(&mut self, c: u8) {
        let stride = self.stride();
        let cell = Cell::new(c, self.state.color);
        fill_region(&mut self.controller, stride, self.state.region, cell);
    }

    fn info(&self) -> TextDeviceInfo {
        TextDeviceInfo {
            name: self.name(),
            number: self.number(),
            resolution: self.state.resolution,
            font_size: self.state.font_size,
            max_size: self.state.max_size,
            visible_size: self.state.visible_size,
            border: self.state.border,
            region: self.state.region,
            cursor: self.state.cursor,
            color: self.state.color,
        }
    }

    fn cell(&self, x: i16, y: i16) -> Option<Cell> {
        let max = self.state.max_size;
        if x < 0 || y < 0 || x >= max.width || y >= max.height {
            return None;
        }
        Some(self.controller.read_cell(y as usize * max.width as usize + x as usize))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::FONT_8X8;
    use crate::matrix::HeapMatrix;
    use crate::modes::{FONT_8X16, FONT_8X8 as SIZE_8X8, RES_640X480, RES_800X600, TEXT_MODES};
    use alloc::vec::Vec;

    static CAPS: Capabilities = Capabilities {
        number: 7,
        supported_modes: TEXT_MODES,
        resolutions: &[RES_640X480, RES_800X600],
        font_sizes: &[SIZE_8X8, FONT_8X16],
    };

    const DEFAULTS: ScreenDefaults = ScreenDefaults {
        resolution: RES_640X480,
        font_size: SIZE_8X8,
        font: &FONT_8X8,
        foreground: 7,
        background: 1,
        cursor: ScreenDefaults::CURSOR,
        border: Extent::ZERO,
        border_color: (0, 0, 0),
    };

    /// Controller over a heap matrix that records what was programmed
    struct Recorder {
        matrix: HeapMatrix,
        resets: usize,
        mode: ModeFlags,
        resolution: Extent,
        border: Extent,
        font: Option<(Extent, usize)>,
        cursor: Option<(CursorStyle, u8)>,
        position: Point,
    }

    impl Recorder {
        fn new() -> Self {
            Recorder {
                matrix: HeapMatrix::for_capabilities(&CAPS),
                resets: 0,
                mode: ModeFlags::empty(),
                resolution: Extent::ZERO,
                border: Extent::ZERO,
                font: None,
                cursor: None,
                position: Point::ORIGIN,
            }
        }
    }

    impl CellMatrix for Recorder {
        fn read_cell(&self, offset: usize) -> Cell {
            self.matrix.read_cell(offset)
        }

        fn write_cell(&mut self, offset: usize, cell: Cell) {
            self.matrix.write_cell(offset, cell);
        }
    }

    impl TextController for Recorder {
        fn capabilities(&self) -> &'static Capabilities {
            &CAPS
        }

        fn name(&self) -> &'static str {
            "RECORDER"
        }

        fn defaults(&self) -> ScreenDefaults {
            DEFAULTS
        }

        fn reset(&mut self) {
            self.resets += 1;
        }

        fn apply_mode(&mut self, mode: ModeFlags) {
            self.mode = mode;
        }

        fn apply_resolution(&mut self, resolution: Extent) {
            self.resolution = resolution;
        }

        fn apply_border(&mut self, border: Extent) {
            self.border = border;
        }

        fn apply_border_color(&mut self, _red: u8, _green: u8, _blue: u8) {}

        fn load_font(&mut self, size: Extent, glyphs: &[u8]) {
            self.font = Some((size, glyphs.len()));
        }

        fn apply_cursor(&mut self, style: CursorStyle, color: u8) {
            self.cursor = Some((style, color));
        }

        fn apply_cursor_position(&mut self, position: Point) {
            self.position = position;
        }
    }

    fn screen() -> TextScreen<Recorder> {
        let mut screen = TextScreen::new(Recorder::new());
        screen.init();
        screen
    }

    fn row_text(screen: &TextScreen<Recorder>, y: i16, len: i16) -> Vec<u8> {
        (0..len).filter_map(|x| screen.cell(x, y)).map(|c| c.character).collect()
    }

    #[test]
    fn test_init_applies_defaults() {
        let screen = screen();
        let info = screen.info();
        assert_eq!(info.number, 7);
        assert_eq!(info.max_size, Extent::new(80, 60));
        assert_eq!(info.visible_size, Extent::new(80, 60));
        assert_eq!(info.region, Rect::new(0, 0, 80, 60));
        assert_eq!(info.cursor, Point::ORIGIN);
        assert_eq!(info.color, 0x71);
        assert_eq!(screen.mode(), ModeFlags::TEXT);

        let controller = screen.controller();
        assert_eq!(controller.resets, 1);
        assert_eq!(controller.resolution, RES_640X480);
        assert_eq!(controller.font, Some((SIZE_8X8, 2048)));
        assert_eq!(controller.cursor, Some((ScreenDefaults::CURSOR, 0x71)));
        assert_eq!(screen.cell(79, 59), Some(Cell::blank(0x71)));
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut screen = screen();
        let first = screen.info();
        screen.set_color(1, 2).unwrap();
        screen.print("junk");
        screen.init();
        assert_eq!(screen.info(), first);
        assert_eq!(screen.cell(0, 0), Some(Cell::blank(0x71)));
    }

    #[test]
    fn test_rejected_configuration_changes_nothing() {
        let mut screen = screen();
        let before = screen.info();

        assert_eq!(screen.set_resolution(1024, 768), Err(TextError::UnsupportedConfiguration));
        assert_eq!(screen.set_font(16, 16, &FONT_8X8), Err(TextError::UnsupportedConfiguration));
        assert_eq!(screen.set_mode(ModeFlags::BITMAP), Err(TextError::UnsupportedConfiguration));
        assert_eq!(screen.set_mode(ModeFlags::empty()), Err(TextError::UnsupportedConfiguration));
        assert_eq!(
            screen.set_font(8, 16, &FONT_8X8),
            Err(TextError::InvalidFontData {
                expected: 4096,
                actual: 2048
            })
        );

        assert_eq!(screen.info(), before);
        assert_eq!(screen.controller().resolution, RES_640X480);
        assert_eq!(screen.mode(), ModeFlags::TEXT);
    }

    #[test]
    fn test_sleep_mode() {
        let mut screen = screen();
        assert_eq!(screen.set_mode(ModeFlags::TEXT | ModeFlags::SLEEP), Ok(()));
        assert_eq!(screen.controller().mode, ModeFlags::SLEEP);
        assert_eq!(screen.mode(), ModeFlags::SLEEP);

        screen.set_mode(ModeFlags::TEXT).unwrap();
        assert_eq!(screen.mode(), ModeFlags::TEXT);
        assert_eq!(screen.controller().mode, ModeFlags::TEXT);
    }

    #[test]
    fn test_put_writes_and_advances() {
        let mut screen = screen();
        screen.set_color(2, 3).unwrap();
        screen.put(b'A');
        assert_eq!(screen.cell(0, 0), Some(Cell::new(b'A', 0x23)));
        assert_eq!(screen.get_xy(), Point::new(1, 0));
        assert_eq!(screen.controller().position, Point::new(1, 0));
    }

    #[test]
    fn test_control_characters() {
        let mut screen = screen();
        screen.print("ab\x08\x09");
        assert_eq!(screen.get_xy(), Point::new(2, 0));
        screen.put(b'\n');
        assert_eq!(screen.get_xy(), Point::new(2, 1));
        screen.put(b'\r');
        assert_eq!(screen.get_xy(), Point::new(0, 1));
        assert_eq!(row_text(&screen, 0, 3), b"ab ");
    }

    #[test]
    fn test_color_keeps_low_nibbles() {
        let mut screen = screen();
        screen.set_color(0x1F, 0x24).unwrap();
        assert_eq!(screen.info().color, 0xF4);
        screen.put(b'c');
        assert_eq!(screen.cell(0, 0), Some(Cell::new(b'c', 0xF4)));
    }

    #[test]
    fn test_zero_width_region_resets_to_screen() {
        let mut screen = screen();
        screen.set_region(Rect::new(10, 5, 4, 2)).unwrap();
        screen.set_region(Rect::new(5, 5, 0, 9)).unwrap();
        assert_eq!(screen.info().region, Rect::new(0, 0, 80, 60));

        screen.set_region(Rect::new(3, 7, 6, 0)).unwrap();
        assert_eq!(screen.info().region.origin, Point::ORIGIN);
        assert_eq!(screen.info().region.size, screen.info().visible_size);
    }

    #[test]
    fn test_put_in_region_uses_absolute_offset() {
        let mut screen = screen();
        screen.set_region(Rect::new(10, 5, 4, 2)).unwrap();
        screen.set_xy(1, 1);
        screen.put(b'Z');
        assert_eq!(screen.cell(11, 6).map(|c| c.character), Some(b'Z'));
        assert_eq!(screen.controller().position, Point::new(12, 6));
    }

    #[test]
    fn test_wrap_and_scroll_in_region() {
        let mut screen = screen();
        screen.set_region(Rect::new(0, 0, 3, 2)).unwrap();
        screen.print("abcdef");
        assert_eq!(screen.get_xy(), Point::new(0, 1));
        assert_eq!(row_text(&screen, 0, 4), b"def ");
        assert_eq!(row_text(&screen, 1, 3), b"   ");
    }

    #[test]
    fn test_set_xy_below_region_scrolls() {
        let mut screen = screen();
        screen.set_region(Rect::new(0, 0, 4, 3)).unwrap();
        screen.print("11112222");
        assert_eq!(screen.get_xy(), Point::new(0, 2));
        screen.set_xy(0, 3);
        assert_eq!(screen.get_xy(), Point::new(0, 2));
        assert_eq!(row_text(&screen, 0, 4), b"2222");
        assert_eq!(row_text(&screen, 1, 4), b"    ");
    }

    #[test]
    fn test_set_xy_negative_clamps() {
        let mut screen = screen();
        screen.set_xy(-3, -7);
        assert_eq!(screen.get_xy(), Point::ORIGIN);
    }

    #[test]
    fn test_border_shrinks_visible_grid() {
        let mut screen = screen();
        screen.set_border(16, 40);
        let info = screen.info();
        assert_eq!(info.border, Extent::new(16, 32));
        assert_eq!(info.visible_size, Extent::new(76, 52));
        assert_eq!(info.region, Rect::new(0, 0, 76, 52));
        assert_eq!(screen.controller().border, Extent::new(16, 32));
    }

    #[test]
    fn test_font_change_keeps_cursor_inside() {
        let mut screen = screen();
        screen.set_xy(5, 59);
        screen.set_font(8, 16, &crate::font::FONT_8X16).unwrap();
        let info = screen.info();
        assert_eq!(info.visible_size, Extent::new(80, 30));
        assert_eq!(info.cursor, Point::new(5, 29));
    }

    #[test]
    fn test_fill_uses_current_color() {
        let mut screen = screen();
        screen.set_region(Rect::new(2, 2, 2, 2)).unwrap();
        screen.set_color(15, 0).unwrap();
        screen.fill(b'#');
        assert_eq!(screen.cell(3, 3), Some(Cell::new(b'#', 0xF0)));
        assert_eq!(screen.cell(4, 3), Some(Cell::blank(0x71)));
    }

    #[test]
    fn test_cell_out_of_grid() {
        let screen = screen();
        assert_eq!(screen.cell(-1, 0), None);
        assert_eq!(screen.cell(80, 0), None);
        assert_eq!(screen.cell(0, 60), None);
    }

    #[test]
    fn test_put_before_init_draws_nothing() {
        let mut screen = TextScreen::new(Recorder::new());
        screen.put(b'X');
        assert_eq!(screen.get_xy(), Point::ORIGIN);
        assert!(screen.controller().matrix.text().iter().all(|&c| c == b' '));
    }
}
