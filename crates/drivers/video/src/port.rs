//! Register ports for VICKY channels
//!
//! `MmioPort` talks to the real memory-mapped window; `MemoryPort` backs
//! the same offsets with RAM so the drivers can run on the host.

use alloc::vec;
use alloc::vec::Vec;
use core::ptr::NonNull;
use mcp_driver_traits::RegisterPort;
use volatile::VolatilePtr;

/// RAM-backed register window
///
/// 32-bit registers are stored big-endian, the 68000 byte order. Accesses
/// past the end of the window are dropped and read back as zero.
#[derive(Debug, Clone)]
pub struct MemoryPort {
    bytes: Vec<u8>,
}

impl MemoryPort {
    /// Create a zeroed window of `len` bytes
    pub fn new(len: usize) -> Self {
        MemoryPort { bytes: vec![0u8; len] }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw view of the window
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl RegisterPort for MemoryPort {
    fn read(&self, offset: usize) -> u32 {
        match self.bytes.get(offset..offset + 4) {
            Some(word) => u32::from_be_bytes([word[0], word[1], word[2], word[3]]),
            None => {
                log::trace!("memory port: read past window at {:#x}", offset);
                0
            }
        }
    }

    fn write(&mut self, offset: usize, value: u32) {
        match self.bytes.get_mut(offset..offset + 4) {
            Some(word) => word.copy_from_slice(&value.to_be_bytes()),
            None => log::trace!("memory port: write past window at {:#x}", offset),
        }
    }

    fn read_byte(&self, offset: usize) -> u8 {
        self.bytes.get(offset).copied().unwrap_or(0)
    }

    fn write_byte(&mut self, offset: usize, value: u8) {
        if let Some(byte) = self.bytes.get_mut(offset) {
            *byte = value;
        }
    }

    fn write_bytes(&mut self, offset: usize, data: &[u8]) {
        let end = (offset + data.len()).min(self.bytes.len());
        if offset < end {
            self.bytes[offset..end].copy_from_slice(&data[..end - offset]);
        }
    }
}

/// Memory-mapped register window
pub struct MmioPort {
    base: NonNull<u8>,
    len: usize,
}

// The window is device memory, not shared Rust data
unsafe impl Send for MmioPort {}

impl MmioPort {
    /// Map the window `[base, base + len)`
    ///
    /// # Safety
    ///
    /// `base` must be the physical (identity-mapped) address of the
    /// controller's register window and the whole range must be valid for
    /// volatile reads and writes for the life of the port.
    pub unsafe fn new(base: usize, len: usize) -> Option<Self> {
        NonNull::new(base as *mut u8).map(|base| MmioPort { base, len })
    }

    fn ptr<T>(&self, offset: usize) -> Option<VolatilePtr<'_, T>> {
        if offset + core::mem::size_of::<T>() > self.len {
            return None;
        }
        // SAFETY: offset is inside the window promised valid in `new`
        unsafe {
            let raw = self.base.as_ptr().add(offset).cast::<T>();
            Some(VolatilePtr::new(NonNull::new_unchecked(raw)))
        }
    }
}

impl RegisterPort for MmioPort {
    fn read(&self, offset: usize) -> u32 {
        self.ptr::<u32>(offset).map(|reg| reg.read()).unwrap_or(0)
    }

    fn write(&mut self, offset: usize, value: u32) {
        if let Some(reg) = self.ptr::<u32>(offset) {
            reg.write(value);
        }
    }

    fn read_byte(&self, offset: usize) -> u8 {
        self.ptr::<u8>(offset).map(|byte| byte.read()).unwrap_or(0)
    }

    fn write_byte(&mut self, offset: usize, value: u8) {
        if let Some(byte) = self.ptr::<u8>(offset) {
            byte.write(value);
        }
    }
}
