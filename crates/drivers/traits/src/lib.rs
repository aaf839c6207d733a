//! Text Screen Driver Traits for MCP
//!
//! This crate defines the interface every text screen driver implements and
//! the value types that flow across it. The console registry uses these
//! traits to address any screen by number without knowing which controller
//! sits behind it.
//!
//! # Debug Features
//!
//! Enable hot-path tracing at compile time:
//! ```toml
//! mcp-driver-traits = { path = "...", features = ["debug-video"] }
//! ```

#![no_std]

pub mod geometry;
pub mod mode;
pub mod capabilities;
pub mod cell;
pub mod device;
pub mod port;
pub mod matrix;
mod debug;

pub use geometry::*;
pub use mode::*;
pub use capabilities::*;
pub use cell::*;
pub use device::*;
pub use port::*;
pub use matrix::*;

#[doc(hidden)]
pub use log as __log;

use core::fmt;

/// Number identifying a text screen
pub type ScreenId = u16;

/// Errors reported by text screen drivers and the console registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextError {
    /// No driver is registered under this screen number
    UnknownScreen(ScreenId),
    /// Mode, resolution or font size is not in the driver's support table
    UnsupportedConfiguration,
    /// Every registry slot is taken
    RegistryFull,
    /// Glyph buffer is shorter than 256 glyphs of the requested height
    InvalidFontData { expected: usize, actual: usize },
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::UnknownScreen(screen) => write!(f, "unknown screen {}", screen),
            TextError::UnsupportedConfiguration => f.write_str("unsupported configuration"),
            TextError::RegistryFull => f.write_str("text device registry is full"),
            TextError::InvalidFontData { expected, actual } => {
                write!(f, "font data too short: expected {} bytes, got {}", expected, actual)
            }
        }
    }
}

pub type TextResult<T> = Result<T, TextError>;
