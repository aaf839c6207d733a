//! Formatted output to a registered screen

use core::fmt;

use mcp_driver_traits::ScreenId;

use crate::registry::TextRegistry;

/// `core::fmt::Write` adapter for one screen of a registry
pub struct ScreenWriter<'r, 'a> {
    registry: &'r TextRegistry<'a>,
    screen: ScreenId,
}

impl<'r, 'a> ScreenWriter<'r, 'a> {
    pub fn new(registry: &'r TextRegistry<'a>, screen: ScreenId) -> Self {
        ScreenWriter { registry, screen }
    }
}

impl fmt::Write for ScreenWriter<'_, '_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.registry.print(self.screen, s).map_err(|_| fmt::Error)
    }
}

/// Print formatted text to a screen of a registry
///
/// Evaluates to `core::fmt::Result`; fails if the screen is not registered.
#[macro_export]
macro_rules! txt_print {
    ($registry:expr, $screen:expr, $($arg:tt)*) => {{
        use ::core::fmt::Write as _;
        $crate::ScreenWriter::new(&$registry, $screen).write_fmt(format_args!($($arg)*))
    }};
}

/// Print formatted text to a screen of a registry, then move to the start
/// of the next line
#[macro_export]
macro_rules! txt_println {
    ($registry:expr, $screen:expr) => {
        $crate::txt_print!($registry, $screen, "\r\n")
    };
    ($registry:expr, $screen:expr, $($arg:tt)*) => {{
        use ::core::fmt::Write as _;
        let mut writer = $crate::ScreenWriter::new(&$registry, $screen);
        writer.write_fmt(format_args!($($arg)*)).and_then(|_| writer.write_str("\r\n"))
    }};
}

#[cfg(test)]
mod tests {
    use mcp_driver_traits::{Point, TextDevice};
    use mcp_driver_video::{Vicky3, VickyScreen, CHANNEL_B};
    use spin::Mutex;

    use crate::TextRegistry;

    fn row(screen: &Mutex<VickyScreen<mcp_driver_video::MemoryPort>>, y: i16, len: i16) -> [u8; 8] {
        let mut out = [0u8; 8];
        let screen = screen.lock();
        for x in 0..len {
            out[x as usize] = screen.cell(x, y).map(|c| c.character).unwrap_or(0);
        }
        out
    }

    #[test]
    fn test_print_macros() {
        let screen = Mutex::new(VickyScreen::new(Vicky3::in_memory(&CHANNEL_B)));
        let mut registry = TextRegistry::new();
        registry.register(&screen).unwrap();
        registry.init_screen(1).unwrap();

        txt_println!(registry, 1, "x={}", 42).unwrap();
        txt_print!(registry, 1, "{:02}", 7).unwrap();

        assert_eq!(&row(&screen, 0, 4)[..4], b"x=42");
        assert_eq!(&row(&screen, 1, 2)[..2], b"07");
        assert_eq!(registry.get_xy(1), Ok(Point::new(2, 1)));
    }

    #[test]
    fn test_unknown_screen_is_fmt_error() {
        let registry = TextRegistry::new();
        assert!(txt_print!(registry, 9, "lost").is_err());
    }
}
