//! Register Access Port
//!
//! Controllers reach their registers and video memory only through this
//! trait, so the same driver runs against real memory-mapped I/O or a RAM
//! window on the host.

/// Access to a controller's register window
///
/// Offsets are in bytes from the controller's base address.
pub trait RegisterPort {
    /// Read a 32-bit register
    fn read(&self, offset: usize) -> u32;

    /// Write a 32-bit register
    fn write(&mut self, offset: usize, value: u32);

    /// Read one byte of video memory
    fn read_byte(&self, offset: usize) -> u8;

    /// Write one byte of video memory
    fn write_byte(&mut self, offset: usize, value: u8);

    /// Copy a block of bytes into video memory
    fn write_bytes(&mut self, offset: usize, data: &[u8]) {
        for (i, &byte) in data.iter().enumerate() {
            self.write_byte(offset + i, byte);
        }
    }
}
