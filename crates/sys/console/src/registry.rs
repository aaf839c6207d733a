//! Text Device Registry
//!
//! A fixed table of up to `MAX_SCREENS` text screens. The registry holds
//! references to drivers owned elsewhere (usually statics) and forwards each
//! call to the screen it names.

use mcp_driver_traits::{
    BlinkRate, Capabilities, Cell, CursorStyle, ModeFlags, Point, Rect, ScreenId, TextDevice,
    TextDeviceInfo, TextError, TextResult,
};
use spin::Mutex;

/// Maximum number of text screens that can be registered
pub const MAX_SCREENS: usize = 5;

/// A driver shared between the registry and its owner
pub type SharedDevice<'a> = Mutex<dyn TextDevice + Send + 'a>;

/// Table of registered text screens
pub struct TextRegistry<'a> {
    slots: [Option<(ScreenId, &'a SharedDevice<'a>)>; MAX_SCREENS],
}

impl<'a> TextRegistry<'a> {
    /// Create an empty registry
    pub const fn new() -> Self {
        TextRegistry {
            slots: [const { None }; MAX_SCREENS],
        }
    }

    /// Forget every registered screen
    pub fn clear(&mut self) {
        self.slots = [const { None }; MAX_SCREENS];
    }

    /// Register a screen under the number it reports
    ///
    /// A screen already registered under that number is replaced. The device
    /// is not initialized; call `init_screen` for that.
    pub fn register(&mut self, device: &'a SharedDevice<'a>) -> TextResult<ScreenId> {
        let (number, name) = {
            let guard = device.lock();
            (guard.number(), guard.name())
        };

        if let Some(slot) = self.slots.iter_mut().flatten().find(|(id, _)| *id == number) {
            log::warn!("text registry: replacing screen {} with {}", number, name);
            slot.1 = device;
            return Ok(number);
        }

        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some((number, device));
                log::info!("text registry: screen {} is {}", number, name);
                Ok(number)
            }
            None => {
                log::warn!("text registry: no free slot for screen {} ({})", number, name);
                Err(TextError::RegistryFull)
            }
        }
    }

    /// Numbers of the registered screens, in registration order
    ///
    /// The iterator works on a copy of the ids and does not borrow the
    /// registry.
    pub fn screens(&self) -> impl Iterator<Item = ScreenId> {
        self.slots.map(|slot| slot.map(|(id, _)| id)).into_iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up the driver registered under `screen`
    pub fn device(&self, screen: ScreenId) -> TextResult<&'a SharedDevice<'a>> {
        self.slots
            .iter()
            .flatten()
            .find(|(id, _)| *id == screen)
            .map(|(_, device)| *device)
            .ok_or(TextError::UnknownScreen(screen))
    }

    /// Run `f` with the screen locked
    pub fn with_screen<R>(
        &self,
        screen: ScreenId,
        f: impl FnOnce(&mut (dyn TextDevice + Send + 'a)) -> R,
    ) -> TextResult<R> {
        let device = self.device(screen)?;
        let mut guard = device.lock();
        Ok(f(&mut *guard))
    }

    /// Reset a screen to its default configuration
    pub fn init_screen(&self, screen: ScreenId) -> TextResult<()> {
        self.with_screen(screen, |device| device.init())
    }

    pub fn capabilities(&self, screen: ScreenId) -> TextResult<&'static Capabilities> {
        self.with_screen(screen, |device| device.capabilities())
    }

    pub fn set_mode(&self, screen: ScreenId, mode: ModeFlags) -> TextResult<()> {
        self.with_screen(screen, |device| device.set_mode(mode))?
    }

    /// Set the mode from a raw mode word; unknown bits are ignored
    pub fn set_mode_raw(&self, screen: ScreenId, mode: u16) -> TextResult<()> {
        self.set_mode(screen, ModeFlags::from_raw(mode))
    }

    pub fn set_resolution(&self, screen: ScreenId, width: i16, height: i16) -> TextResult<()> {
        self.with_screen(screen, |device| device.set_resolution(width, height))?
    }

    pub fn set_border(&self, screen: ScreenId, width: i16, height: i16) -> TextResult<()> {
        self.with_screen(screen, |device| device.set_border(width, height))
    }

    pub fn set_border_color(
        &self,
        screen: ScreenId,
        red: u8,
        green: u8,
        blue: u8,
    ) -> TextResult<()> {
        self.with_screen(screen, |device| device.set_border_color(red, green, blue))
    }

    pub fn set_font(
        &self,
        screen: ScreenId,
        width: i16,
        height: i16,
        glyphs: &[u8],
    ) -> TextResult<()> {
        self.with_screen(screen, |device| device.set_font(width, height, glyphs))?
    }

    /// Set the cursor appearance; only the low two bits of `rate` are used
    pub fn set_cursor(
        &self,
        screen: ScreenId,
        enable: bool,
        rate: u8,
        glyph: u8,
    ) -> TextResult<()> {
        let style = CursorStyle::new(enable, BlinkRate::from_bits(rate), glyph);
        self.with_screen(screen, |device| device.set_cursor(style))
    }

    pub fn set_region(&self, screen: ScreenId, region: Rect) -> TextResult<()> {
        self.with_screen(screen, |device| device.set_region(region))?
    }

    pub fn set_color(&self, screen: ScreenId, foreground: u8, background: u8) -> TextResult<()> {
        self.with_screen(screen, |device| device.set_color(foreground, background))?
    }

    pub fn set_xy(&self, screen: ScreenId, x: i16, y: i16) -> TextResult<()> {
        self.with_screen(screen, |device| device.set_xy(x, y))
    }

    pub fn get_xy(&self, screen: ScreenId) -> TextResult<Point> {
        self.with_screen(screen, |device| device.get_xy())
    }

    pub fn put(&self, screen: ScreenId, c: u8) -> TextResult<()> {
        self.with_screen(screen, |device| device.put(c))
    }

    pub fn print(&self, screen: ScreenId, message: &str) -> TextResult<()> {
        self.with_screen(screen, |device| device.print(message))
    }

    pub fn scroll(&self, screen: ScreenId, horizontal: i16, vertical: i16) -> TextResult<()> {
        self.with_screen(screen, |device| device.scroll(horizontal, vertical))
    }

    pub fn fill(&self, screen: ScreenId, c: u8) -> TextResult<()> {
        self.with_screen(screen, |device| device.fill(c))
    }

    pub fn info(&self, screen: ScreenId) -> TextResult<TextDeviceInfo> {
        self.with_screen(screen, |device| device.info())
    }

    /// Read back a cell by absolute position; `None` outside the grid
    pub fn cell(&self, screen: ScreenId, x: i16, y: i16) -> TextResult<Option<Cell>> {
        self.with_screen(screen, |device| device.cell(x, y))
    }
}

impl Default for TextRegistry<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate alloc;

    use super::*;
    use alloc::vec::Vec;
    use mcp_driver_traits::Extent;

    static CAPS: [Capabilities; 8] = {
        let mut caps = [Capabilities {
            number: 0,
            supported_modes: ModeFlags::TEXT,
            resolutions: &[],
            font_sizes: &[],
        }; 8];
        let mut i = 0;
        while i < caps.len() {
            caps[i].number = i as ScreenId;
            i += 1;
        }
        caps
    };

    /// Minimal driver that records the calls it gets
    struct Dummy {
        number: ScreenId,
        name: &'static str,
        puts: Vec<u8>,
        inits: usize,
        cursor: Option<CursorStyle>,
        position: Point,
    }

    impl Dummy {
        fn new(number: ScreenId, name: &'static str) -> Self {
            Dummy {
                number,
                name,
                puts: Vec::new(),
                inits: 0,
                cursor: None,
                position: Point::ORIGIN,
            }
        }
    }

    impl TextDevice for Dummy {
        fn number(&self) -> ScreenId {
            self.number
        }

        fn name(&self) -> &'static str {
            self.name
        }

        fn init(&mut self) {
            self.inits += 1;
        }

        fn capabilities(&self) -> &'static Capabilities {
            &CAPS[self.number as usize]
        }

        fn set_mode(&mut self, mode: ModeFlags) -> TextResult<()> {
            if mode == ModeFlags::TEXT {
                Ok(())
            } else {
                Err(TextError::UnsupportedConfiguration)
            }
        }

        fn set_resolution(&mut self, _width: i16, _height: i16) -> TextResult<()> {
            Err(TextError::UnsupportedConfiguration)
        }

        fn set_border(&mut self, _width: i16, _height: i16) {}

        fn set_border_color(&mut self, _red: u8, _green: u8, _blue: u8) {}

        fn set_font(&mut self, _width: i16, _height: i16, _glyphs: &[u8]) -> TextResult<()> {
            Err(TextError::UnsupportedConfiguration)
        }

        fn set_cursor(&mut self, style: CursorStyle) {
            self.cursor = Some(style);
        }

        fn set_region(&mut self, _region: Rect) -> TextResult<()> {
            Ok(())
        }

        fn set_color(&mut self, _foreground: u8, _background: u8) -> TextResult<()> {
            Ok(())
        }

        fn set_xy(&mut self, x: i16, y: i16) {
            self.position = Point::new(x, y);
        }

        fn get_xy(&self) -> Point {
            self.position
        }

        fn put(&mut self, c: u8) {
            self.puts.push(c);
        }

        fn scroll(&mut self, _horizontal: i16, _vertical: i16) {}

        fn fill(&mut self, _c: u8) {}

        fn info(&self) -> TextDeviceInfo {
            TextDeviceInfo {
                name: self.name,
                number: self.number,
                resolution: Extent::ZERO,
                font_size: Extent::ZERO,
                max_size: Extent::ZERO,
                visible_size: Extent::ZERO,
                border: Extent::ZERO,
                region: Rect::ZERO,
                cursor: self.position,
                color: 0,
            }
        }

        fn cell(&self, _x: i16, _y: i16) -> Option<Cell> {
            None
        }
    }

    #[test]
    fn test_register_and_dispatch() {
        let zero = Mutex::new(Dummy::new(0, "ZERO"));
        let one = Mutex::new(Dummy::new(1, "ONE"));
        let mut registry = TextRegistry::new();
        assert_eq!(registry.register(&zero), Ok(0));
        assert_eq!(registry.register(&one), Ok(1));
        assert_eq!(registry.screens().collect::<Vec<_>>(), [0, 1]);

        registry.print(1, "hi").unwrap();
        registry.init_screen(0).unwrap();
        registry.set_xy(1, 4, 2).unwrap();

        assert_eq!(one.lock().puts, b"hi");
        assert!(zero.lock().puts.is_empty());
        assert_eq!(zero.lock().inits, 1);
        assert_eq!(registry.get_xy(1), Ok(Point::new(4, 2)));
        assert_eq!(registry.info(0).map(|info| info.name), Ok("ZERO"));
        assert_eq!(registry.capabilities(1).map(|caps| caps.number), Ok(1));
    }

    #[test]
    fn test_screens_outlive_borrow() {
        let zero = Mutex::new(Dummy::new(0, "ZERO"));
        let three = Mutex::new(Dummy::new(3, "THREE"));
        let mut registry = TextRegistry::new();
        registry.register(&three).unwrap();
        registry.register(&zero).unwrap();

        let ids = registry.screens();
        registry.clear();
        assert_eq!(ids.collect::<Vec<_>>(), [3, 0]);
        assert_eq!(registry.screens().count(), 0);
    }

    #[test]
    fn test_unknown_screen() {
        let zero = Mutex::new(Dummy::new(0, "ZERO"));
        let mut registry = TextRegistry::new();
        registry.register(&zero).unwrap();

        assert_eq!(registry.put(3, b'x'), Err(TextError::UnknownScreen(3)));
        assert_eq!(registry.get_xy(3), Err(TextError::UnknownScreen(3)));
        assert_eq!(registry.set_mode(3, ModeFlags::TEXT), Err(TextError::UnknownScreen(3)));
        assert!(registry.capabilities(4).is_err());
        assert!(zero.lock().puts.is_empty());
    }

    #[test]
    fn test_driver_errors_pass_through() {
        let zero = Mutex::new(Dummy::new(0, "ZERO"));
        let mut registry = TextRegistry::new();
        registry.register(&zero).unwrap();

        assert_eq!(registry.set_mode_raw(0, 0xFF01), Ok(()));
        assert_eq!(registry.set_mode_raw(0, 0x0002), Err(TextError::UnsupportedConfiguration));
        assert_eq!(registry.set_resolution(0, 1, 1), Err(TextError::UnsupportedConfiguration));
    }

    #[test]
    fn test_same_number_replaces() {
        let first = Mutex::new(Dummy::new(2, "FIRST"));
        let second = Mutex::new(Dummy::new(2, "SECOND"));
        let mut registry = TextRegistry::new();
        registry.register(&first).unwrap();
        registry.register(&second).unwrap();

        assert_eq!(registry.len(), 1);
        registry.put(2, b'a').unwrap();
        assert!(first.lock().puts.is_empty());
        assert_eq!(second.lock().puts, b"a");
    }

    #[test]
    fn test_registry_full() {
        let devices: Vec<Mutex<Dummy>> = (0..6)
            .map(|i| Mutex::new(Dummy::new(i, "DUMMY")))
            .collect();
        let mut registry = TextRegistry::new();
        for device in &devices[..MAX_SCREENS] {
            registry.register(device).unwrap();
        }
        assert_eq!(registry.register(&devices[5]), Err(TextError::RegistryFull));
        // Replacing an existing number still works when full
        assert_eq!(registry.register(&devices[4]), Ok(4));

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.register(&devices[5]), Ok(5));
    }

    #[test]
    fn test_cursor_rate_is_masked() {
        let zero = Mutex::new(Dummy::new(0, "ZERO"));
        let mut registry = TextRegistry::new();
        registry.register(&zero).unwrap();
        registry.set_cursor(0, true, 0x06, 0xB1).unwrap();
        assert_eq!(
            zero.lock().cursor,
            Some(CursorStyle::new(true, BlinkRate::QuarterSecond, 0xB1))
        );
    }
}
