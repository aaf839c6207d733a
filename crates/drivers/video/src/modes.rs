//! Resolution, Font Size and Mode Tables

use mcp_driver_traits::{Extent, ModeFlags};

/// Standard VICKY text resolutions
pub const RES_640X480: Extent = Extent::new(640, 480);
pub const RES_800X600: Extent = Extent::new(800, 600);
pub const RES_1024X768: Extent = Extent::new(1024, 768);

/// Font cell sizes
pub const FONT_8X8: Extent = Extent::new(8, 8);
pub const FONT_8X16: Extent = Extent::new(8, 16);

/// Modes every VICKY III text channel can enter
pub const TEXT_MODES: ModeFlags = ModeFlags::TEXT.union(ModeFlags::SLEEP);

/// Channel A (main screen)
pub const CHANNEL_A_RESOLUTIONS: &[Extent] = &[RES_800X600, RES_1024X768];
pub const CHANNEL_A_FONTS: &[Extent] = &[FONT_8X8, FONT_8X16];

/// Channel B (secondary screen)
pub const CHANNEL_B_RESOLUTIONS: &[Extent] = &[RES_640X480, RES_800X600];
pub const CHANNEL_B_FONTS: &[Extent] = &[FONT_8X8];

/// Resolution select bits of a channel's master control register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolutionSelect {
    pub resolution: Extent,
    pub bits: u32,
}

/// Look up the select bits for `resolution`
pub fn find_select(table: &[ResolutionSelect], resolution: Extent) -> Option<u32> {
    table
        .iter()
        .find(|entry| entry.resolution == resolution)
        .map(|entry| entry.bits)
}
