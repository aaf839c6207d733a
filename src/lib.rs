//! MCP text screens for the Foenix A2560K
//!
//! Ties the screen drivers to the console registry: `A2560kScreens` owns
//! one `TextScreen` per VICKY III channel, registers both and brings them
//! up in their default configuration.
//!
//! ```ignore
//! let screens = unsafe { A2560kScreens::mmio() }.ok_or(TextError::UnknownScreen(SCREEN_A))?;
//! let mut registry = TextRegistry::new();
//! screens.install(&mut registry)?;
//! screens.init(&registry)?;
//! registry.print(SCREEN_A, "MCP\r\n")?;
//! ```

#![no_std]

pub use mcp_console as console;
pub use mcp_driver_traits as traits;
pub use mcp_driver_video as video;

pub use mcp_console::{txt_print, txt_println, ScreenWriter, TextRegistry, MAX_SCREENS};
pub use mcp_driver_traits::{
    Capabilities, Cell, CursorStyle, Extent, ModeFlags, Point, Rect, ScreenId, TextDevice,
    TextDeviceInfo, TextError, TextResult,
};
pub use mcp_driver_video::{MemoryPort, MmioPort, TextScreen, Vicky3, VickyScreen};

use mcp_driver_traits::RegisterPort;
use mcp_driver_video::vicky::regs;
use mcp_driver_video::{CHANNEL_A, CHANNEL_B};
use spin::Mutex;

/// Screen number of the main channel
pub const SCREEN_A: ScreenId = 0;
/// Screen number of the secondary channel
pub const SCREEN_B: ScreenId = 1;

/// Both text channels of an A2560K
pub struct A2560kScreens<P> {
    channel_a: Mutex<VickyScreen<P>>,
    channel_b: Mutex<VickyScreen<P>>,
}

impl<P: RegisterPort + Send> A2560kScreens<P> {
    /// Build both screens over the given register ports
    pub fn with_ports(channel_a: P, channel_b: P) -> Self {
        A2560kScreens {
            channel_a: Mutex::new(TextScreen::new(Vicky3::new(channel_a, &CHANNEL_A))),
            channel_b: Mutex::new(TextScreen::new(Vicky3::new(channel_b, &CHANNEL_B))),
        }
    }

    pub fn channel_a(&self) -> &Mutex<VickyScreen<P>> {
        &self.channel_a
    }

    pub fn channel_b(&self) -> &Mutex<VickyScreen<P>> {
        &self.channel_b
    }

    /// Register both screens
    pub fn install<'a>(&'a self, registry: &mut TextRegistry<'a>) -> TextResult<()>
    where
        P: 'a,
    {
        registry.register(&self.channel_a)?;
        registry.register(&self.channel_b)?;
        Ok(())
    }

    /// Initialize both screens through the registry
    pub fn init(&self, registry: &TextRegistry<'_>) -> TextResult<()> {
        registry.init_screen(SCREEN_A)?;
        registry.init_screen(SCREEN_B)?;
        log::info!("A2560K text screens ready");
        Ok(())
    }
}

impl A2560kScreens<MmioPort> {
    /// Drive the real VICKY III register windows
    ///
    /// # Safety
    ///
    /// Must run on an A2560K with both channel windows identity-mapped, and
    /// only once: each channel must have a single owner.
    pub unsafe fn mmio() -> Option<Self> {
        let channel_a = Vicky3::mmio(&CHANNEL_A)?;
        let channel_b = Vicky3::mmio(&CHANNEL_B)?;
        Some(A2560kScreens {
            channel_a: Mutex::new(TextScreen::new(channel_a)),
            channel_b: Mutex::new(TextScreen::new(channel_b)),
        })
    }
}

impl A2560kScreens<MemoryPort> {
    /// Both screens backed by RAM
    pub fn in_memory() -> Self {
        Self::with_ports(
            MemoryPort::new(regs::WINDOW_LEN),
            MemoryPort::new(regs::WINDOW_LEN),
        )
    }
}
