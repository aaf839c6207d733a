//! Display mode bits

use bitflags::bitflags;

bitflags! {
    /// Display mode flags accepted by `set_mode`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModeFlags: u16 {
        /// Text mode
        const TEXT   = 0x0001;
        /// Bitmap graphics
        const BITMAP = 0x0002;
        /// Sprite graphics
        const SPRITE = 0x0004;
        /// Tile graphics
        const TILE   = 0x0008;
        /// Put the monitor to sleep by disabling sync
        const SLEEP  = 0x0010;
    }
}

impl ModeFlags {
    /// Decode a raw mode word, dropping bits with no meaning
    pub const fn from_raw(raw: u16) -> Self {
        Self::from_bits_truncate(raw)
    }
}
