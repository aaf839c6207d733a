//! VICKY III Text Channel Controller
//!
//! The A2560K has two VICKY III text channels with the same register layout
//! at different base addresses. A `ChannelLayout` describes one channel;
//! `Vicky3` drives it through any `RegisterPort`.

use mcp_driver_traits::{
    Capabilities, Cell, CellMatrix, CursorStyle, Extent, ModeFlags, Point, RegisterPort,
};

use crate::font;
use crate::modes::{self, ResolutionSelect};
use crate::port::{MemoryPort, MmioPort};
use crate::screen::{ScreenDefaults, TextController};

/// Register offsets from the channel base
pub mod regs {
    /// Master control
    pub const MCR: usize = 0x0000;
    /// Border control
    pub const BCR: usize = 0x0004;
    pub const BORDER_COLOR: usize = 0x0008;
    /// Cursor control
    pub const CCR: usize = 0x0010;
    /// Cursor position
    pub const CPR: usize = 0x0014;
    /// Font manager 0: cell and container size
    pub const FM0: usize = 0x0020;
    pub const FONT_MEMORY: usize = 0x8000;
    pub const TEXT_MATRIX: usize = 0x2_0000;
    pub const COLOR_MATRIX: usize = 0x2_8000;
    pub const LUT_FG: usize = 0x2_C400;
    pub const LUT_BG: usize = 0x2_C440;

    /// Bytes in each of the text and color matrices
    pub const MATRIX_LEN: usize = 0x8000;
    /// Span of the whole register window
    pub const WINDOW_LEN: usize = 0x2_C480;

    pub const MCR_TEXT: u32 = 0x0000_0001;
    /// Monitor sleep (sync disable)
    pub const MCR_SLEEP: u32 = 0x0004_0000;
    pub const BCR_ENABLE: u32 = 0x0000_0001;
    pub const CCR_ENABLE: u32 = 0x0000_0001;
}

/// Number of entries in each text color lookup table
pub const LUT_SIZE: usize = 16;

/// Default text colors, ARGB
pub const TEXT_LUT: [u32; LUT_SIZE] = [
    0xFF00_0000, // black
    0xFF80_0000, // dark red
    0xFF00_8000, // dark green
    0xFF80_8000, // olive
    0xFF00_0080, // navy
    0xFFAA_5500, // brown
    0xFF00_8080, // teal
    0xFF80_8080, // gray
    0xFF55_5555, // dark gray
    0xFFFF_5555, // red
    0xFF55_FF55, // green
    0xFFFF_FF55, // yellow
    0xFF55_55FF, // blue
    0xFFFF_7FFF, // pink
    0xFF55_FFFF, // cyan
    0xFFFF_FFFF, // white
];

/// Static description of one VICKY III text channel
#[derive(Debug)]
pub struct ChannelLayout {
    pub name: &'static str,
    /// Physical address of the register window
    pub base: usize,
    pub capabilities: Capabilities,
    /// Master control bits selecting each supported resolution
    pub resolution_select: &'static [ResolutionSelect],
    pub defaults: ScreenDefaults,
    pub lut: &'static [u32; LUT_SIZE],
}

impl ChannelLayout {
    /// Every master control bit used to select a resolution
    fn resolution_mask(&self) -> u32 {
        self.resolution_select.iter().fold(0, |mask, entry| mask | entry.bits)
    }
}

/// Main screen (channel A)
pub static CHANNEL_A: ChannelLayout = ChannelLayout {
    name: "SCREEN A",
    base: 0xFEC4_0000,
    capabilities: Capabilities {
        number: 0,
        supported_modes: modes::TEXT_MODES,
        resolutions: modes::CHANNEL_A_RESOLUTIONS,
        font_sizes: modes::CHANNEL_A_FONTS,
    },
    resolution_select: &[
        ResolutionSelect {
            resolution: modes::RES_800X600,
            bits: 0,
        },
        ResolutionSelect {
            resolution: modes::RES_1024X768,
            bits: 0x0100,
        },
    ],
    defaults: ScreenDefaults {
        resolution: modes::RES_800X600,
        font_size: modes::FONT_8X8,
        font: &font::FONT_8X8,
        foreground: 7,
        background: 4,
        cursor: ScreenDefaults::CURSOR,
        border: Extent::new(32, 32),
        border_color: (0x7F, 0x00, 0x7F),
    },
    lut: &TEXT_LUT,
};

/// Secondary screen (channel B)
pub static CHANNEL_B: ChannelLayout = ChannelLayout {
    name: "SCREEN B",
    base: 0xFEC8_0000,
    capabilities: Capabilities {
        number: 1,
        supported_modes: modes::TEXT_MODES,
        resolutions: modes::CHANNEL_B_RESOLUTIONS,
        font_sizes: modes::CHANNEL_B_FONTS,
    },
    resolution_select: &[
        ResolutionSelect {
            resolution: modes::RES_640X480,
            bits: 0,
        },
        ResolutionSelect {
            resolution: modes::RES_800X600,
            bits: 0x0100,
        },
    ],
    defaults: ScreenDefaults {
        resolution: modes::RES_640X480,
        font_size: modes::FONT_8X8,
        font: &font::FONT_8X8,
        foreground: 7,
        background: 0,
        cursor: ScreenDefaults::CURSOR,
        border: Extent::ZERO,
        border_color: (0, 0, 0),
    },
    lut: &TEXT_LUT,
};

/// VICKY III text channel
pub struct Vicky3<P> {
    port: P,
    layout: &'static ChannelLayout,
    /// Last value written to the master control register
    mcr: u32,
}

impl<P: RegisterPort> Vicky3<P> {
    pub fn new(port: P, layout: &'static ChannelLayout) -> Self {
        Vicky3 {
            port,
            layout,
            mcr: 0,
        }
    }

    pub fn layout(&self) -> &'static ChannelLayout {
        self.layout
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Read back a 32-bit register
    pub fn register(&self, offset: usize) -> u32 {
        self.port.read(offset)
    }

    fn write_mcr(&mut self, value: u32) {
        self.mcr = value;
        self.port.write(regs::MCR, value);
    }
}

impl Vicky3<MmioPort> {
    /// Drive the channel's real register window
    ///
    /// # Safety
    ///
    /// Must run on an A2560K with the channel's window identity-mapped, and
    /// at most one `Vicky3` may exist per channel.
    pub unsafe fn mmio(layout: &'static ChannelLayout) -> Option<Self> {
        MmioPort::new(layout.base, regs::WINDOW_LEN).map(|port| Self::new(port, layout))
    }
}

impl Vicky3<MemoryPort> {
    /// Channel backed by RAM, for hosts without the hardware
    pub fn in_memory(layout: &'static ChannelLayout) -> Self {
        Self::new(MemoryPort::new(regs::WINDOW_LEN), layout)
    }
}

impl<P: RegisterPort> CellMatrix for Vicky3<P> {
    fn read_cell(&self, offset: usize) -> Cell {
        if offset >= regs::MATRIX_LEN {
            return Cell::blank(0);
        }
        Cell::new(
            self.port.read_byte(regs::TEXT_MATRIX + offset),
            self.port.read_byte(regs::COLOR_MATRIX + offset),
        )
    }

    fn write_cell(&mut self, offset: usize, cell: Cell) {
        if offset >= regs::MATRIX_LEN {
            return;
        }
        self.port.write_byte(regs::TEXT_MATRIX + offset, cell.character);
        self.port.write_byte(regs::COLOR_MATRIX + offset, cell.attribute);
    }
}

impl<P: RegisterPort> TextController for Vicky3<P> {
    fn capabilities(&self) -> &'static Capabilities {
        &self.layout.capabilities
    }

    fn name(&self) -> &'static str {
        self.layout.name
    }

    fn defaults(&self) -> ScreenDefaults {
        self.layout.defaults
    }

    fn reset(&mut self) {
        self.write_mcr(0);
        for offset in [regs::BCR, regs::BORDER_COLOR, regs::CCR, regs::CPR, regs::FM0] {
            self.port.write(offset, 0);
        }

        for (i, &color) in self.layout.lut.iter().enumerate() {
            self.port.write(regs::LUT_FG + 4 * i, color);
            self.port.write(regs::LUT_BG + 4 * i, color);
        }
    }

    fn apply_mode(&mut self, mode: ModeFlags) {
        let mut mcr = self.mcr & !(regs::MCR_TEXT | regs::MCR_SLEEP);
        if mode.contains(ModeFlags::SLEEP) {
            mcr |= regs::MCR_SLEEP;
        } else {
            mcr |= regs::MCR_TEXT;
        }
        self.write_mcr(mcr);
    }

    fn apply_resolution(&mut self, resolution: Extent) {
        let select = modes::find_select(self.layout.resolution_select, resolution).unwrap_or(0);
        let mcr = (self.mcr & !self.layout.resolution_mask()) | select;
        self.write_mcr(mcr);
    }

    fn apply_border(&mut self, border: Extent) {
        let value = if border.width == 0 && border.height == 0 {
            0
        } else {
            ((border.height as u32 & 0x3F) << 16)
                | ((border.width as u32 & 0x3F) << 8)
                | regs::BCR_ENABLE
        };
        self.port.write(regs::BCR, value);
    }

    fn apply_border_color(&mut self, red: u8, green: u8, blue: u8) {
        let value = (red as u32) << 16 | (green as u32) << 8 | blue as u32;
        self.port.write(regs::BORDER_COLOR, value);
    }

    fn load_font(&mut self, size: Extent, glyphs: &[u8]) {
        let width = size.width as u32 & 0xFF;
        let height = size.height as u32 & 0xFF;
        self.port.write(regs::FM0, height << 24 | width << 16 | height << 8 | width);
        self.port.write_bytes(regs::FONT_MEMORY, glyphs);
    }

    fn apply_cursor(&mut self, style: CursorStyle, color: u8) {
        let value = (color as u32) << 24
            | (style.glyph as u32) << 16
            | (style.rate.bits() as u32) << 1
            | if style.enabled { regs::CCR_ENABLE } else { 0 };
        self.port.write(regs::CCR, value);
    }

    fn apply_cursor_position(&mut self, position: Point) {
        let value = (position.y as u16 as u32) << 16 | position.x as u16 as u32;
        self.port.write(regs::CPR, value);
    }
}
