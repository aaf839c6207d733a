//! Screen geometry value types
//!
//! Cell coordinates and sizes are `i16`, the width of the controllers'
//! position registers. Points may go negative or past the edge while a
//! caller computes them; drivers clamp before use.

/// Size of a rectangular area (cells or pixels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    pub width: i16,
    pub height: i16,
}

impl Extent {
    pub const ZERO: Self = Self::new(0, 0);

    pub const fn new(width: i16, height: i16) -> Self {
        Self { width, height }
    }

    /// True when either axis has no cells
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Number of cells covered (zero for an empty extent)
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width as usize * self.height as usize
        }
    }
}

/// A point on the character grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column
    pub x: i16,
    /// Row
    pub y: i16,
}

impl Point {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i16, y: i16) -> Self {
        Self { x, y }
    }
}

/// A rectangle on the character grid
///
/// A rectangle with an empty size is used by `set_region` to mean
/// "the whole visible screen".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Upper-left corner
    pub origin: Point,
    pub size: Extent,
}

impl Rect {
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    pub const fn new(x: i16, y: i16, width: i16, height: i16) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Extent::new(width, height),
        }
    }

    /// Rectangle anchored at (0, 0)
    pub const fn from_size(size: Extent) -> Self {
        Self {
            origin: Point::ORIGIN,
            size,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Intersection with `[0, bounds)`, or `None` if nothing is left
    pub fn clip_to(&self, bounds: Extent) -> Option<Rect> {
        let x0 = (self.origin.x as i32).max(0);
        let y0 = (self.origin.y as i32).max(0);
        let x1 = (self.origin.x as i32 + self.size.width as i32).min(bounds.width as i32);
        let y1 = (self.origin.y as i32 + self.size.height as i32).min(bounds.height as i32);

        if x1 <= x0 || y1 <= y0 {
            return None;
        }

        Some(Rect::new(x0 as i16, y0 as i16, (x1 - x0) as i16, (y1 - y0) as i16))
    }
}
