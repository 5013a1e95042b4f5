/// The `AirGradient` composition root.
///
/// Built once at boot from a [`BoardType`]. Owns one of every peripheral
/// driver, all unconfigured, plus the board's resolved [`BoardConfig`].
/// Subsystems borrow what they need: single peripherals through the
/// accessors, or disjoint groups through [`AirGradient::parts_mut`].
use core::fmt::Write;

use crate::board::{BoardConfig, BoardTable, BoardType, I2cPins, STANDARD};
use crate::drivers::{
    Connector, Display, HardwareWatchdog, LedBar, Peripheral, PeripheralKind, Pms5003, Pms5003t,
    PushButton, Sgp41, Sht, StatusLed, S8,
};
use crate::mode::FirmwareMode;

/// Library version, independent of board.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pin value handed to collaborators when the board has no I2C bus.
pub const NO_PIN: i32 = -1;

/// Boot banner buffer.
pub type Banner = heapless::String<64>;

#[derive(Debug)]
pub struct AirGradient {
    board: BoardType,
    config: BoardConfig,
    pms5003: Pms5003,
    pms5003t_1: Pms5003t,
    pms5003t_2: Pms5003t,
    s8: S8,
    sht: Sht,
    sgp41: Sgp41,
    display: Display,
    button: PushButton,
    status_led: StatusLed,
    led_bar: LedBar,
    watchdog: HardwareWatchdog,
}

/// Particulate sensors, one per connector arrangement.
pub struct Particulate<'a> {
    pub pms5003: &'a mut Pms5003,
    pub pms5003t_1: &'a mut Pms5003t,
    pub pms5003t_2: &'a mut Pms5003t,
}

/// CO2 and VOC/NOx sensors.
pub struct Gas<'a> {
    pub s8: &'a mut S8,
    pub sgp41: &'a mut Sgp41,
}

/// Display, button and LEDs.
pub struct Interface<'a> {
    pub display: &'a mut Display,
    pub button: &'a mut PushButton,
    pub status_led: &'a mut StatusLed,
    pub led_bar: &'a mut LedBar,
}

/// The registry split into capability groups that can be handed to
/// different subsystems at the same time.
pub struct Parts<'a> {
    pub particulate: Particulate<'a>,
    pub gas: Gas<'a>,
    pub climate: &'a mut Sht,
    pub interface: Interface<'a>,
    pub watchdog: &'a mut HardwareWatchdog,
}

impl AirGradient {
    /// Build the registry for `board` from the standard board table.
    pub fn new(board: BoardType) -> Self {
        Self::with_table(board, &STANDARD)
    }

    /// Build the registry for `board` from a caller-supplied table.
    pub fn with_table(board: BoardType, table: &BoardTable) -> Self {
        let config = *table.lookup(board);
        log::debug!(
            "Registry for {} ({})",
            config.name,
            config.firmware_mode.name()
        );
        Self {
            board,
            pms5003: Pms5003::new(board, &config),
            pms5003t_1: Pms5003t::new(board, &config, Connector::Pm1),
            pms5003t_2: Pms5003t::new(board, &config, Connector::Pm2),
            s8: S8::new(board, &config),
            sht: Sht::new(board, &config),
            sgp41: Sgp41::new(board, &config),
            display: Display::new(board, &config),
            button: PushButton::new(board, &config),
            status_led: StatusLed::new(board, &config),
            led_bar: LedBar::new(board, &config),
            watchdog: HardwareWatchdog::new(board, &config),
            config,
        }
    }

    // ── Board metadata ──────────────────────────────────────────────

    /// SDA pin, or [`NO_PIN`] if the board has no I2C bus.
    pub fn i2c_sda_pin(&self) -> i32 {
        self.config.i2c.map_or(NO_PIN, |p| i32::from(p.sda))
    }

    /// SCL pin, or [`NO_PIN`] if the board has no I2C bus.
    pub fn i2c_scl_pin(&self) -> i32 {
        self.config.i2c.map_or(NO_PIN, |p| i32::from(p.scl))
    }

    pub fn i2c_pins(&self) -> Option<I2cPins> {
        self.config.i2c
    }

    pub fn board_type(&self) -> BoardType {
        self.board
    }

    pub fn board_name(&self) -> &'static str {
        self.config.name
    }

    pub fn version(&self) -> &'static str {
        VERSION
    }

    pub fn firmware_mode(&self) -> FirmwareMode {
        self.config.firmware_mode
    }

    pub fn firmware_mode_name(&self) -> &'static str {
        self.config.firmware_mode.name()
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Whether this board carries `kind`.
    pub fn supports(&self, kind: PeripheralKind) -> bool {
        self.peripheral(kind).is_supported()
    }

    /// One-line identification for boot logs.
    pub fn banner(&self) -> Banner {
        let mut out = Banner::new();
        // 64 bytes fits the longest board name and mode label
        let _ = write!(
            out,
            "AirGradient v{} {} {}",
            VERSION,
            self.config.name,
            self.config.firmware_mode.name()
        );
        out
    }

    // ── Peripherals ─────────────────────────────────────────────────

    pub fn pms5003(&self) -> &Pms5003 {
        &self.pms5003
    }

    pub fn pms5003_mut(&mut self) -> &mut Pms5003 {
        &mut self.pms5003
    }

    /// PMS5003T on the PM1 connector.
    pub fn pms5003t_1(&self) -> &Pms5003t {
        &self.pms5003t_1
    }

    pub fn pms5003t_1_mut(&mut self) -> &mut Pms5003t {
        &mut self.pms5003t_1
    }

    /// PMS5003T on the PM2 connector.
    pub fn pms5003t_2(&self) -> &Pms5003t {
        &self.pms5003t_2
    }

    pub fn pms5003t_2_mut(&mut self) -> &mut Pms5003t {
        &mut self.pms5003t_2
    }

    pub fn s8(&self) -> &S8 {
        &self.s8
    }

    pub fn s8_mut(&mut self) -> &mut S8 {
        &mut self.s8
    }

    pub fn sht(&self) -> &Sht {
        &self.sht
    }

    pub fn sht_mut(&mut self) -> &mut Sht {
        &mut self.sht
    }

    pub fn sgp41(&self) -> &Sgp41 {
        &self.sgp41
    }

    pub fn sgp41_mut(&mut self) -> &mut Sgp41 {
        &mut self.sgp41
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut Display {
        &mut self.display
    }

    pub fn button(&self) -> &PushButton {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut PushButton {
        &mut self.button
    }

    pub fn status_led(&self) -> &StatusLed {
        &self.status_led
    }

    pub fn status_led_mut(&mut self) -> &mut StatusLed {
        &mut self.status_led
    }

    pub fn led_bar(&self) -> &LedBar {
        &self.led_bar
    }

    pub fn led_bar_mut(&mut self) -> &mut LedBar {
        &mut self.led_bar
    }

    pub fn watchdog(&self) -> &HardwareWatchdog {
        &self.watchdog
    }

    pub fn watchdog_mut(&mut self) -> &mut HardwareWatchdog {
        &mut self.watchdog
    }

    /// Look a peripheral up by kind.
    pub fn peripheral(&self, kind: PeripheralKind) -> &dyn Peripheral {
        match kind {
            PeripheralKind::Pms5003 => &self.pms5003,
            PeripheralKind::Pms5003t1 => &self.pms5003t_1,
            PeripheralKind::Pms5003t2 => &self.pms5003t_2,
            PeripheralKind::S8 => &self.s8,
            PeripheralKind::Sht => &self.sht,
            PeripheralKind::Sgp41 => &self.sgp41,
            PeripheralKind::Display => &self.display,
            PeripheralKind::Button => &self.button,
            PeripheralKind::StatusLed => &self.status_led,
            PeripheralKind::LedBar => &self.led_bar,
            PeripheralKind::Watchdog => &self.watchdog,
        }
    }

    pub fn peripheral_mut(&mut self, kind: PeripheralKind) -> &mut dyn Peripheral {
        match kind {
            PeripheralKind::Pms5003 => &mut self.pms5003,
            PeripheralKind::Pms5003t1 => &mut self.pms5003t_1,
            PeripheralKind::Pms5003t2 => &mut self.pms5003t_2,
            PeripheralKind::S8 => &mut self.s8,
            PeripheralKind::Sht => &mut self.sht,
            PeripheralKind::Sgp41 => &mut self.sgp41,
            PeripheralKind::Display => &mut self.display,
            PeripheralKind::Button => &mut self.button,
            PeripheralKind::StatusLed => &mut self.status_led,
            PeripheralKind::LedBar => &mut self.led_bar,
            PeripheralKind::Watchdog => &mut self.watchdog,
        }
    }

    pub fn parts_mut(&mut self) -> Parts<'_> {
        Parts {
            particulate: Particulate {
                pms5003: &mut self.pms5003,
                pms5003t_1: &mut self.pms5003t_1,
                pms5003t_2: &mut self.pms5003t_2,
            },
            gas: Gas {
                s8: &mut self.s8,
                sgp41: &mut self.sgp41,
            },
            climate: &mut self.sht,
            interface: Interface {
                display: &mut self.display,
                button: &mut self.button,
                status_led: &mut self.status_led,
                led_bar: &mut self.led_bar,
            },
            watchdog: &mut self.watchdog,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::config;
    use crate::drivers::Rgb;

    // ── Metadata ────────────────────────────────────────────────────

    #[test]
    fn one_indoor_scenario() {
        let ag = AirGradient::new(BoardType::OneIndoor);
        assert_eq!(ag.board_name(), "ONE_INDOOR");
        assert_eq!(ag.i2c_sda_pin(), 7);
        assert_eq!(ag.i2c_scl_pin(), 6);
        assert_eq!(ag.firmware_mode(), FirmwareMode::I9Psl);
        assert_eq!(ag.firmware_mode_name(), "I-9PSL");
    }

    #[test]
    fn board_type_round_trips() {
        for board in BoardType::ALL {
            assert_eq!(AirGradient::new(board).board_type(), board);
        }
    }

    #[test]
    fn pins_valid_for_boards_with_i2c() {
        for board in BoardType::ALL {
            let ag = AirGradient::new(board);
            if ag.i2c_pins().is_some() {
                assert!(ag.i2c_sda_pin() >= 0);
                assert!(ag.i2c_scl_pin() >= 0);
                assert_ne!(ag.i2c_sda_pin(), ag.i2c_scl_pin());
            } else {
                assert_eq!(ag.i2c_sda_pin(), NO_PIN);
                assert_eq!(ag.i2c_scl_pin(), NO_PIN);
            }
        }
    }

    #[test]
    fn board_without_i2c_reports_sentinel() {
        let bare = BoardConfig { i2c: None, ..config(BoardType::OpenAirOutdoor) };
        let table = BoardTable::standard().with(BoardType::OpenAirOutdoor, bare);
        let ag = AirGradient::with_table(BoardType::OpenAirOutdoor, &table);
        assert_eq!(ag.i2c_sda_pin(), -1);
        assert_eq!(ag.i2c_scl_pin(), -1);
        assert_eq!(ag.i2c_pins(), None);
        assert!(!ag.supports(PeripheralKind::Sgp41));
        assert!(!ag.supports(PeripheralKind::Sht));
    }

    #[test]
    fn version_is_board_independent() {
        let v = AirGradient::new(BoardType::DiyBasic).version();
        assert!(!v.is_empty());
        for board in BoardType::ALL {
            assert_eq!(AirGradient::new(board).version(), v);
        }
        let parts: heapless::Vec<&str, 4> = VERSION.split('.').collect();
        assert_eq!(parts.len(), 3, "VERSION should be semver (major.minor.patch)");
    }

    #[test]
    fn banner_names_board_and_mode() {
        let ag = AirGradient::new(BoardType::DiyProIndoorV4_2);
        let banner = ag.banner();
        assert!(banner.starts_with("AirGradient v"));
        assert!(banner.ends_with("DIY_PRO_INDOOR_V4_2 I-42PS"));
    }

    // ── Ownership ───────────────────────────────────────────────────

    #[test]
    fn two_registries_share_metadata_not_peripherals() {
        let a = AirGradient::new(BoardType::OneIndoor);
        let b = AirGradient::new(BoardType::OneIndoor);
        assert_eq!(a.board_name(), b.board_name());
        assert_eq!(a.i2c_sda_pin(), b.i2c_sda_pin());
        assert_eq!(a.i2c_scl_pin(), b.i2c_scl_pin());
        assert_eq!(a.config(), b.config());
        assert!(!core::ptr::eq(a.pms5003(), b.pms5003()));
        assert!(!core::ptr::eq(a.s8(), b.s8()));
        assert!(!core::ptr::eq(a.led_bar(), b.led_bar()));
        assert!(!core::ptr::eq(a.watchdog(), b.watchdog()));
    }

    #[test]
    fn starting_one_registry_leaves_the_other_alone() {
        let mut a = AirGradient::new(BoardType::OneIndoor);
        let b = AirGradient::new(BoardType::OneIndoor);
        a.s8_mut().begin().unwrap();
        assert!(a.s8().is_ready());
        assert!(!b.s8().is_ready());
    }

    #[test]
    fn every_peripheral_starts_unconfigured() {
        for board in BoardType::ALL {
            let ag = AirGradient::new(board);
            for kind in PeripheralKind::ALL {
                let p = ag.peripheral(kind);
                assert_eq!(p.kind(), kind);
                assert_eq!(p.board(), board);
                assert!(!p.is_ready(), "{kind:?} on {board:?}");
            }
        }
    }

    // ── Firmware mode vs. board facts ───────────────────────────────

    #[test]
    fn default_mode_peripherals_are_supported() {
        for board in BoardType::ALL {
            let ag = AirGradient::new(board);
            for &kind in ag.firmware_mode().peripherals() {
                assert!(ag.supports(kind), "{kind:?} expected on {board:?}");
            }
        }
    }

    #[test]
    fn begin_mode_peripherals() {
        let mut ag = AirGradient::new(BoardType::OpenAirOutdoor);
        for &kind in ag.firmware_mode().peripherals() {
            ag.peripheral_mut(kind).begin().unwrap();
        }
        assert!(ag.pms5003t_1().is_ready());
        assert!(ag.watchdog().is_ready());
        assert!(!ag.pms5003t_2().is_ready());
        assert!(ag.display_mut().begin().is_err());
    }

    // ── Capability groups ───────────────────────────────────────────

    #[test]
    fn parts_hand_out_disjoint_borrows() {
        let mut ag = AirGradient::new(BoardType::OneIndoor);
        let parts = ag.parts_mut();
        parts.interface.led_bar.begin().unwrap();
        parts.gas.s8.begin().unwrap();
        parts.climate.begin().unwrap();
        parts.interface.led_bar.set_color(0, Rgb::new(255, 0, 0)).unwrap();
        assert!(parts.particulate.pms5003t_1.begin().is_err());
        parts.watchdog.begin().unwrap();

        assert_eq!(ag.led_bar().pixels()[0], Rgb::new(255, 0, 0));
        assert!(ag.s8().is_ready());
        assert!(ag.sht().is_ready());
        assert!(ag.watchdog().is_ready());
    }
}
