//! RAM-backed character/attribute matrix

use alloc::vec;
use alloc::vec::Vec;
use mcp_driver_traits::{Capabilities, Cell, CellMatrix, Extent};

/// Two owned parallel planes, one byte per cell each
#[derive(Debug, Clone)]
pub struct HeapMatrix {
    size: Extent,
    text: Vec<u8>,
    color: Vec<u8>,
}

impl HeapMatrix {
    /// Create a matrix of `size` cells, filled with spaces in color 0
    pub fn new(size: Extent) -> Self {
        let cells = size.area();
        HeapMatrix {
            size,
            text: vec![b' '; cells],
            color: vec![0u8; cells],
        }
    }

    /// Size the matrix for the largest grid a screen can display
    pub fn for_capabilities(caps: &Capabilities) -> Self {
        Self::new(caps.max_text_size())
    }

    pub fn size(&self) -> Extent {
        self.size
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Character plane
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// Attribute plane
    pub fn color(&self) -> &[u8] {
        &self.color
    }
}

impl CellMatrix for HeapMatrix {
    fn read_cell(&self, offset: usize) -> Cell {
        match (self.text.get(offset), self.color.get(offset)) {
            (Some(&character), Some(&attribute)) => Cell::new(character, attribute),
            _ => Cell::blank(0),
        }
    }

    fn write_cell(&mut self, offset: usize, cell: Cell) {
        if offset < self.text.len() {
            self.text[offset] = cell.character;
            self.color[offset] = cell.attribute;
        }
    }

    fn copy_cell(&mut self, dst: usize, src: usize) {
        if dst < self.text.len() && src < self.text.len() {
            self.text[dst] = self.text[src];
            self.color[dst] = self.color[src];
        }
    }
}
