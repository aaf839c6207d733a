//! Character and attribute matrix access

use crate::Cell;

/// The two parallel planes (characters, attributes) of a text screen
///
/// Addressed by absolute cell offset: `y * max_width + x`, regardless of
/// the active region.
pub trait CellMatrix {
    fn read_cell(&self, offset: usize) -> Cell;

    fn write_cell(&mut self, offset: usize, cell: Cell);

    fn copy_cell(&mut self, dst: usize, src: usize) {
        let cell = self.read_cell(src);
        self.write_cell(dst, cell);
    }
}
