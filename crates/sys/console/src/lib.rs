//! MCP Text Console
//!
//! Keeps the table of registered text screens and dispatches every screen
//! operation by screen number. Each operation locks only the screen it
//! addresses, for exactly the duration of that operation.

#![no_std]

pub mod registry;
pub mod writer;

pub use registry::{SharedDevice, TextRegistry, MAX_SCREENS};
pub use writer::ScreenWriter;
