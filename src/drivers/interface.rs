/// User-facing hardware: OLED display, push button, status LED and the RGB
/// LED bar.
use heapless::Vec;

use crate::board::{ActivePin, BoardConfig, BoardType, DisplayKind, LedStrip};

use super::{impl_peripheral, Error, Lifecycle, Peripheral, PeripheralKind};

/// Largest LED bar any board carries, rounded up.
pub const MAX_LEDS: usize = 16;

/// OLED display. Needs both a controller and the I2C bus.
#[derive(Debug)]
pub struct Display {
    life: Lifecycle,
    kind: Option<DisplayKind>,
    has_bus: bool,
}

impl Display {
    pub fn new(board: BoardType, cfg: &BoardConfig) -> Self {
        Self {
            life: Lifecycle::new(PeripheralKind::Display, board),
            kind: cfg.display,
            has_bus: cfg.i2c.is_some(),
        }
    }

    pub fn controller(&self) -> Option<DisplayKind> {
        self.kind
    }

    /// Width and height in pixels.
    pub fn size(&self) -> Option<(u16, u16)> {
        self.kind.map(DisplayKind::size)
    }
}

impl_peripheral!(Display, |s| s.kind.is_some() && s.has_bus);

#[derive(Debug)]
pub struct PushButton {
    life: Lifecycle,
    pin: Option<ActivePin>,
}

impl PushButton {
    pub fn new(board: BoardType, cfg: &BoardConfig) -> Self {
        Self {
            life: Lifecycle::new(PeripheralKind::Button, board),
            pin: cfg.button,
        }
    }

    pub fn pin(&self) -> Option<ActivePin> {
        self.pin
    }
}

impl_peripheral!(PushButton, |s| s.pin.is_some());

/// Single-colour status LED (Open Air only).
#[derive(Debug)]
pub struct StatusLed {
    life: Lifecycle,
    pin: Option<ActivePin>,
}

impl StatusLed {
    pub fn new(board: BoardType, cfg: &BoardConfig) -> Self {
        Self {
            life: Lifecycle::new(PeripheralKind::StatusLed, board),
            pin: cfg.status_led,
        }
    }

    pub fn pin(&self) -> Option<ActivePin> {
        self.pin
    }
}

impl_peripheral!(StatusLed, |s| s.pin.is_some());

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Addressable RGB LED bar. Colours are staged in a frame buffer that the
/// owning task pushes to the strip.
#[derive(Debug)]
pub struct LedBar {
    life: Lifecycle,
    strip: Option<LedStrip>,
    pixels: Vec<Rgb, MAX_LEDS>,
}

impl LedBar {
    pub fn new(board: BoardType, cfg: &BoardConfig) -> Self {
        Self {
            life: Lifecycle::new(PeripheralKind::LedBar, board),
            strip: cfg.led_bar,
            pixels: Vec::new(),
        }
    }

    pub fn strip(&self) -> Option<LedStrip> {
        self.strip
    }

    /// Number of LEDs, zero until started.
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    pub fn set_color(&mut self, index: usize, color: Rgb) -> Result<(), Error> {
        self.life.ensure_ready()?;
        let len = self.pixels.len();
        let px = self
            .pixels
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })?;
        *px = color;
        Ok(())
    }

    pub fn fill(&mut self, color: Rgb) -> Result<(), Error> {
        self.life.ensure_ready()?;
        self.pixels.iter_mut().for_each(|px| *px = color);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.pixels.iter_mut().for_each(|px| *px = Rgb::OFF);
    }
}

impl Peripheral for LedBar {
    fn kind(&self) -> PeripheralKind {
        self.life.kind()
    }

    fn board(&self) -> BoardType {
        self.life.board()
    }

    fn is_supported(&self) -> bool {
        self.strip.is_some()
    }

    fn is_ready(&self) -> bool {
        self.life.is_ready()
    }

    fn begin(&mut self) -> Result<(), Error> {
        let was_ready = self.life.is_ready();
        let supported = self.is_supported();
        self.life.begin(supported)?;
        if !was_ready {
            let count = self
                .strip
                .map_or(0, |s| (s.count as usize).min(MAX_LEDS));
            self.pixels.clear();
            // count is clamped to capacity
            let _ = self.pixels.resize(count, Rgb::OFF);
        }
        Ok(())
    }

    fn end(&mut self) {
        self.pixels.clear();
        self.life.end();
    }
}
