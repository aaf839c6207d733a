//! In-place scroll and fill of a rectangular region
//!
//! Both operations work on the absolute matrix (`row * stride + column`)
//! and never need a scratch buffer: each axis is walked away from the side
//! the data comes from, so every source cell is read before it is
//! overwritten.

use mcp_driver_traits::{Cell, CellMatrix, Rect};

/// Walk of one axis of the region for a given shift
///
/// `first` is the first cell overwritten, `copy_end` the first cell that
/// has no source left inside the region, `end` one step past the last cell.
/// All three are visited by repeatedly adding `step`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Axis {
    first: i32,
    copy_end: i32,
    end: i32,
    step: i32,
}

impl Axis {
    fn new(origin: i16, len: i16, shift: i32) -> Self {
        let origin = origin as i32;
        let len = len as i32;
        if shift >= 0 {
            let end = origin + len;
            Axis {
                first: origin,
                copy_end: end - shift,
                end,
                step: 1,
            }
        } else {
            let end = origin - 1;
            Axis {
                first: origin + len - 1,
                copy_end: end - shift,
                end,
                step: -1,
            }
        }
    }

    /// Cells that receive shifted content
    fn copied(self) -> Steps {
        Steps {
            next: self.first,
            end: self.copy_end,
            step: self.step,
        }
    }

    /// Cells left without content by the shift
    fn vacated(self) -> Steps {
        Steps {
            next: self.copy_end,
            end: self.end,
            step: self.step,
        }
    }

    fn all(self) -> Steps {
        Steps {
            next: self.first,
            end: self.end,
            step: self.step,
        }
    }
}

struct Steps {
    next: i32,
    end: i32,
    step: i32,
}

impl Iterator for Steps {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        if self.next == self.end {
            return None;
        }
        let current = self.next;
        self.next += self.step;
        Some(current)
    }
}

#[inline]
fn offset(stride: usize, x: i32, y: i32) -> usize {
    y as usize * stride + x as usize
}

/// Shift the contents of `region` by `(horizontal, vertical)` cells
///
/// Cell `(x, y)` receives the old contents of `(x + horizontal, y +
/// vertical)`; positive values move text left and up. Cells with no source
/// inside the region are set to `blank`. A shift as large as the region
/// blanks the whole axis.
pub fn scroll_region<M: CellMatrix + ?Sized>(
    matrix: &mut M,
    stride: usize,
    region: Rect,
    horizontal: i16,
    vertical: i16,
    blank: Cell,
) {
    if region.is_empty() || (horizontal == 0 && vertical == 0) {
        return;
    }

    let width = region.size.width as i32;
    let height = region.size.height as i32;
    let dx = (horizontal as i32).clamp(-width, width);
    let dy = (vertical as i32).clamp(-height, height);

    let columns = Axis::new(region.origin.x, region.size.width, dx);
    let rows = Axis::new(region.origin.y, region.size.height, dy);

    for y in rows.copied() {
        for x in columns.copied() {
            matrix.copy_cell(offset(stride, x, y), offset(stride, x + dx, y + dy));
        }
    }

    // Columns vacated by the horizontal shift, over every row
    if dx != 0 {
        for y in rows.all() {
            for x in columns.vacated() {
                matrix.write_cell(offset(stride, x, y), blank);
            }
        }
    }

    // Rows vacated by the vertical shift, minus the columns already blanked
    if dy != 0 {
        for y in rows.vacated() {
            for x in columns.copied() {
                matrix.write_cell(offset(stride, x, y), blank);
            }
        }
    }
}

/// Set every cell of `region` to `cell`
pub fn fill_region<M: CellMatrix + ?Sized>(
    matrix: &mut M,
    stride: usize,
    region: Rect,
    cell: Cell,
) {
    if region.is_empty() {
        return;
    }

    let x0 = region.origin.x as i32;
    let y0 = region.origin.y as i32;
    for y in y0..y0 + region.size.height as i32 {
        for x in x0..x0 + region.size.width as i32 {
            matrix.write_cell(offset(stride, x, y), cell);
        }
    }
}
