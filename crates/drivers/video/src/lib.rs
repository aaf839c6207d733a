//! MCP Text Screen Driver Subsystem
//!
//! Provides the hardware-independent text screen engine and the VICKY III
//! channel controllers of the A2560K.
//!
//! A screen is a `TextScreen` wrapped around a `TextController`:
//!
//! ```ignore
//! let mut screen = TextScreen::new(Vicky3::in_memory(&vicky::CHANNEL_A));
//! screen.init();
//! screen.print("Hello");
//! ```

#![no_std]

extern crate alloc;

pub mod font;
pub mod matrix;
pub mod modes;
pub mod port;
pub mod screen;
pub mod scroll;
pub mod state;
pub mod vicky;

pub use matrix::HeapMatrix;
pub use port::{MemoryPort, MmioPort};
pub use screen::{ScreenDefaults, TextController, TextScreen};
pub use state::ScreenState;
pub use vicky::{ChannelLayout, Vicky3, CHANNEL_A, CHANNEL_B};

/// Text screen on a VICKY III channel
pub type VickyScreen<P> = TextScreen<Vicky3<P>>;
