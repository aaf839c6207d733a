//! Per-screen geometry, region, cursor and color state

use mcp_driver_traits::{color_attribute, Extent, Point, Rect};

/// Largest border a VICKY channel can draw, in pixels per side
pub const MAX_BORDER: i16 = 32;

/// Mutable state of one text screen
///
/// Starts zeroed; sizes stay zero until the driver's init sequence has set
/// a resolution and a font and enabled size computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenState {
    sizes_enabled: bool,
    pub(crate) resolution: Extent,
    pub(crate) font_size: Extent,
    pub(crate) max_size: Extent,
    pub(crate) visible_size: Extent,
    pub(crate) border: Extent,
    pub(crate) region: Rect,
    pub(crate) cursor: Point,
    pub(crate) color: u8,
}

impl ScreenState {
    pub const fn new() -> Self {
        ScreenState {
            sizes_enabled: false,
            resolution: Extent::ZERO,
            font_size: Extent::ZERO,
            max_size: Extent::ZERO,
            visible_size: Extent::ZERO,
            border: Extent::ZERO,
            region: Rect::ZERO,
            cursor: Point::ORIGIN,
            color: 0,
        }
    }

    pub fn resolution(&self) -> Extent {
        self.resolution
    }

    pub fn font_size(&self) -> Extent {
        self.font_size
    }

    pub fn max_size(&self) -> Extent {
        self.max_size
    }

    pub fn visible_size(&self) -> Extent {
        self.visible_size
    }

    pub fn border(&self) -> Extent {
        self.border
    }

    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    /// Forget resolution and font and hold off size computation
    pub(crate) fn begin_init(&mut self) {
        self.sizes_enabled = false;
        self.resolution = Extent::ZERO;
        self.font_size = Extent::ZERO;
    }

    pub(crate) fn enable_sizes(&mut self) {
        self.sizes_enabled = true;
        self.recompute_sizes();
    }

    pub(crate) fn set_color(&mut self, foreground: u8, background: u8) {
        self.color = color_attribute(foreground, background);
    }

    /// Store a border, clamped to what the hardware can draw
    pub(crate) fn set_border(&mut self, width: i16, height: i16) -> Extent {
        self.border = Extent::new(width.clamp(0, MAX_BORDER), height.clamp(0, MAX_BORDER));
        self.recompute_sizes();
        self.border
    }

    /// Recompute the character grid sizes from resolution, font and border
    ///
    /// Does nothing until size computation has been enabled. Afterwards the
    /// region and cursor are pulled back inside the new visible grid.
    pub(crate) fn recompute_sizes(&mut self) {
        if !self.sizes_enabled {
            return;
        }

        let font = self.font_size;
        if font.is_empty() {
            self.max_size = Extent::ZERO;
            self.visible_size = Extent::ZERO;
        } else {
            self.max_size = Extent::new(
                self.resolution.width / font.width,
                self.resolution.height / font.height,
            );

            let border_columns = 2 * (self.border.width / font.width);
            let border_rows = 2 * (self.border.height / font.height);
            self.visible_size = Extent::new(
                (self.max_size.width - border_columns).max(0),
                (self.max_size.height - border_rows).max(0),
            );
        }

        if !self.region.is_empty() {
            self.region = self
                .region
                .clip_to(self.visible_size)
                .unwrap_or_else(|| Rect::from_size(self.visible_size));
            self.clamp_cursor();
        }
    }

    /// Whole visible grid
    pub fn default_region(&self) -> Rect {
        Rect::from_size(self.visible_size)
    }

    /// Install a new region; returns true if the request had to be clipped
    pub(crate) fn set_region(&mut self, region: Rect) -> bool {
        let mut adjusted = false;
        self.region = if region.is_empty() {
            self.default_region()
        } else {
            match region.clip_to(self.visible_size) {
                Some(clipped) => {
                    adjusted = clipped != region;
                    clipped
                }
                None => {
                    adjusted = true;
                    self.default_region()
                }
            }
        };
        self.clamp_cursor();
        adjusted
    }

    /// Pull the cursor inside the current region without scrolling
    fn clamp_cursor(&mut self) {
        let size = self.region.size;
        self.cursor = Point::new(
            self.cursor.x.clamp(0, (size.width - 1).max(0)),
            self.cursor.y.clamp(0, (size.height - 1).max(0)),
        );
    }

    /// Absolute matrix offset of a region-relative cell
    pub fn offset_of(&self, position: Point) -> usize {
        let x = self.region.origin.x as usize + position.x as usize;
        let y = self.region.origin.y as usize + position.y as usize;
        y * self.max_size.width as usize + x
    }

    /// Cursor position in absolute grid coordinates
    pub fn absolute_cursor(&self) -> Point {
        Point::new(
            self.region.origin.x + self.cursor.x,
            self.region.origin.y + self.cursor.y,
        )
    }
}

impl Default for ScreenState {
    fn default() -> Self {
        Self::new()
    }
}

/// Where a requested cursor position lands in a region of `size`
///
/// Returns the normalized position and how many rows the region must scroll
/// up to bring it into view. Moving past the right edge wraps to column 0 of
/// the next row.
pub fn resolve_cursor(size: Extent, x: i16, y: i16) -> (Point, i16) {
    if size.is_empty() {
        return (Point::ORIGIN, 0);
    }

    let width = size.width as i32;
    let height = size.height as i32;
    let mut x = x as i32;
    let mut y = y as i32;

    if x < 0 {
        x = 0;
    } else if x >= width {
        x = 0;
        y += 1;
    }

    let mut scroll = 0;
    if y < 0 {
        y = 0;
    } else if y >= height {
        scroll = (y - height + 1).min(i16::MAX as i32);
        y = height - 1;
    }

    (Point::new(x as i16, y as i16), scroll as i16)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(resolution: Extent, font: Extent, border: Extent) -> ScreenState {
        let mut state = ScreenState::new();
        state.resolution = resolution;
        state.font_size = font;
        state.enable_sizes();
        state.set_border(border.width, border.height);
        state.set_region(Rect::ZERO);
        state
    }

    #[test]
    fn test_sizes_wait_for_enable() {
        let mut state = ScreenState::new();
        state.resolution = Extent::new(800, 600);
        state.font_size = Extent::new(8, 8);
        state.recompute_sizes();
        assert_eq!(state.max_size(), Extent::ZERO);
        state.enable_sizes();
        assert_eq!(state.max_size(), Extent::new(100, 75));
    }

    #[test]
    fn test_visible_size_subtracts_border() {
        let state = state(Extent::new(800, 600), Extent::new(8, 8), Extent::new(32, 32));
        assert_eq!(state.max_size(), Extent::new(100, 75));
        assert_eq!(state.visible_size(), Extent::new(92, 67));
        assert_eq!(state.region(), Rect::new(0, 0, 92, 67));
    }

    #[test]
    fn test_border_counts_whole_cells_per_side() {
        let state = state(Extent::new(800, 600), Extent::new(8, 16), Extent::new(12, 12));
        // 12px is one whole 8px column but no whole 16px row
        assert_eq!(state.max_size(), Extent::new(100, 37));
        assert_eq!(state.visible_size(), Extent::new(98, 37));
    }

    #[test]
    fn test_border_is_clamped() {
        let mut state = state(Extent::new(800, 600), Extent::new(8, 8), Extent::ZERO);
        assert_eq!(state.set_border(-4, 100), Extent::new(0, 32));
    }

    #[test]
    fn test_zero_font_gives_empty_grid() {
        let mut state = ScreenState::new();
        state.resolution = Extent::new(800, 600);
        state.enable_sizes();
        assert_eq!(state.max_size(), Extent::ZERO);
        assert_eq!(state.visible_size(), Extent::ZERO);
    }

    #[test]
    fn test_region_is_clipped() {
        let mut state = state(Extent::new(800, 600), Extent::new(8, 8), Extent::ZERO);
        assert!(!state.set_region(Rect::new(10, 10, 20, 5)));
        assert_eq!(state.region(), Rect::new(10, 10, 20, 5));
        assert!(state.set_region(Rect::new(90, 70, 20, 20)));
        assert_eq!(state.region(), Rect::new(90, 70, 10, 5));
        assert!(state.set_region(Rect::new(200, 0, 5, 5)));
        assert_eq!(state.region(), Rect::new(0, 0, 100, 75));
    }

    #[test]
    fn test_region_shrink_pulls_cursor_in() {
        let mut state = state(Extent::new(800, 600), Extent::new(8, 8), Extent::ZERO);
        state.cursor = Point::new(50, 40);
        state.set_region(Rect::new(0, 0, 10, 10));
        assert_eq!(state.cursor(), Point::new(9, 9));
    }

    #[test]
    fn test_font_change_reclips_region() {
        let mut state = state(Extent::new(800, 600), Extent::new(8, 8), Extent::ZERO);
        state.cursor = Point::new(0, 70);
        state.font_size = Extent::new(8, 16);
        state.recompute_sizes();
        assert_eq!(state.region(), Rect::new(0, 0, 100, 37));
        assert_eq!(state.cursor(), Point::new(0, 36));
    }

    #[test]
    fn test_offset_is_absolute() {
        let mut state = state(Extent::new(800, 600), Extent::new(8, 8), Extent::ZERO);
        state.set_region(Rect::new(5, 2, 10, 10));
        assert_eq!(state.offset_of(Point::new(1, 1)), 3 * 100 + 6);
    }

    #[test]
    fn test_resolve_cursor_wraps_and_scrolls() {
        let size = Extent::new(10, 5);
        assert_eq!(resolve_cursor(size, 3, 4), (Point::new(3, 4), 0));
        assert_eq!(resolve_cursor(size, -5, -1), (Point::new(0, 0), 0));
        assert_eq!(resolve_cursor(size, 10, 2), (Point::new(0, 3), 0));
        assert_eq!(resolve_cursor(size, 10, 4), (Point::new(0, 4), 1));
        assert_eq!(resolve_cursor(size, 0, 8), (Point::new(0, 4), 4));
        assert_eq!(resolve_cursor(size, i16::MAX, i16::MAX), (Point::new(0, 4), 32764));
        assert_eq!(resolve_cursor(Extent::ZERO, 3, 3), (Point::ORIGIN, 0));
    }
}
