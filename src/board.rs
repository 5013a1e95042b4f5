/// Board definitions for supported AirGradient hardware.
///
/// Every [`BoardType`] maps to exactly one [`BoardConfig`]. The mapping lives
/// in [`config`], an exhaustive `match`, so adding a board without a table
/// entry fails to compile. [`BoardTable`] carries the mapping by value for
/// callers that want to substitute an entry.
///
/// The board the firmware is built for is selected with a Cargo feature and
/// exposed as [`SELECTED`].
use serde::Serialize;

use crate::drivers::Error;
use crate::mode::FirmwareMode;

/// Physically distinct board SKUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BoardType {
    DiyBasic,
    DiyProIndoorV4_2,
    OneIndoor,
    OpenAirOutdoor,
    DiyProIndoorV3_3,
}

impl BoardType {
    pub const COUNT: usize = 5;

    /// Every board, in discriminant order.
    pub const ALL: [BoardType; Self::COUNT] = [
        BoardType::DiyBasic,
        BoardType::DiyProIndoorV4_2,
        BoardType::OneIndoor,
        BoardType::OpenAirOutdoor,
        BoardType::DiyProIndoorV3_3,
    ];

    pub const fn as_str(self) -> &'static str {
        config(self).name
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Boards are persisted as their discriminant byte.
impl TryFrom<u8> for BoardType {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        BoardType::ALL
            .get(value as usize)
            .copied()
            .ok_or(Error::UnknownBoard(value))
    }
}

/// I2C bus pin assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct I2cPins {
    pub sda: u8,
    pub scl: u8,
}

/// UART pin assignment, named from the MCU side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Uart {
    pub tx: u8,
    pub rx: u8,
}

/// A GPIO plus the logic level that means "active".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActivePin {
    pub pin: u8,
    pub active_high: bool,
}

/// Addressable RGB strip wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedStrip {
    pub pin: u8,
    pub count: u8,
}

/// OLED controllers fitted to the indoor boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayKind {
    /// 0.66" 64x48 on the DIY Basic
    Ssd1306_64x48,
    /// 1.3" 128x64 on the Pro and ONE
    Sh1106_128x64,
}

impl DisplayKind {
    pub const fn size(self) -> (u16, u16) {
        match self {
            DisplayKind::Ssd1306_64x48 => (64, 48),
            DisplayKind::Sh1106_128x64 => (128, 64),
        }
    }
}

/// Hardware facts for one board. `None` means the board does not carry
/// that peripheral or bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoardConfig {
    pub name: &'static str,
    pub firmware_mode: FirmwareMode,
    pub i2c: Option<I2cPins>,
    pub s8: Option<Uart>,
    /// Index 0 is the PM1 connector, index 1 the PM2 connector.
    pub pms: [Option<Uart>; 2],
    pub button: Option<ActivePin>,
    pub status_led: Option<ActivePin>,
    pub led_bar: Option<LedStrip>,
    pub watchdog_reset: Option<u8>,
    pub display: Option<DisplayKind>,
}

/// Resolve the hardware facts for `board`.
pub const fn config(board: BoardType) -> BoardConfig {
    match board {
        BoardType::DiyBasic => BoardConfig {
            name: "DIY_BASIC",
            firmware_mode: FirmwareMode::I40Ps,
            i2c: Some(I2cPins { sda: 4, scl: 5 }),
            s8: Some(Uart { tx: 2, rx: 0 }),
            pms: [Some(Uart { tx: 14, rx: 12 }), None],
            button: Some(ActivePin { pin: 0, active_high: false }),
            status_led: None,
            led_bar: None,
            watchdog_reset: None,
            display: Some(DisplayKind::Ssd1306_64x48),
        },
        BoardType::DiyProIndoorV4_2 => BoardConfig {
            name: "DIY_PRO_INDOOR_V4_2",
            firmware_mode: FirmwareMode::I42Ps,
            i2c: Some(I2cPins { sda: 4, scl: 5 }),
            s8: Some(Uart { tx: 2, rx: 0 }),
            pms: [Some(Uart { tx: 14, rx: 12 }), None],
            button: Some(ActivePin { pin: 15, active_high: true }),
            status_led: None,
            led_bar: None,
            watchdog_reset: None,
            display: Some(DisplayKind::Sh1106_128x64),
        },
        BoardType::OneIndoor => BoardConfig {
            name: "ONE_INDOOR",
            firmware_mode: FirmwareMode::I9Psl,
            i2c: Some(I2cPins { sda: 7, scl: 6 }),
            s8: Some(Uart { tx: 1, rx: 0 }),
            pms: [Some(Uart { tx: 21, rx: 20 }), None],
            button: Some(ActivePin { pin: 9, active_high: false }),
            status_led: None,
            led_bar: Some(LedStrip { pin: 10, count: 11 }),
            watchdog_reset: Some(2),
            display: Some(DisplayKind::Sh1106_128x64),
        },
        BoardType::OpenAirOutdoor => BoardConfig {
            name: "OPEN_AIR_OUTDOOR",
            firmware_mode: FirmwareMode::O1Pst,
            i2c: Some(I2cPins { sda: 7, scl: 6 }),
            s8: Some(Uart { tx: 1, rx: 0 }),
            pms: [Some(Uart { tx: 21, rx: 20 }), Some(Uart { tx: 1, rx: 0 })],
            button: Some(ActivePin { pin: 9, active_high: false }),
            status_led: Some(ActivePin { pin: 10, active_high: true }),
            led_bar: None,
            watchdog_reset: Some(2),
            display: None,
        },
        BoardType::DiyProIndoorV3_3 => BoardConfig {
            name: "DIY_PRO_INDOOR_V3_3",
            firmware_mode: FirmwareMode::I33Ps,
            i2c: Some(I2cPins { sda: 4, scl: 5 }),
            s8: Some(Uart { tx: 2, rx: 0 }),
            pms: [Some(Uart { tx: 14, rx: 12 }), None],
            button: Some(ActivePin { pin: 0, active_high: false }),
            status_led: None,
            led_bar: None,
            watchdog_reset: None,
            display: Some(DisplayKind::Sh1106_128x64),
        },
    }
}

/// Immutable board mapping, indexed by [`BoardType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardTable {
    entries: [BoardConfig; BoardType::COUNT],
}

/// The table every production registry uses.
pub static STANDARD: BoardTable = BoardTable::standard();

impl BoardTable {
    pub const fn standard() -> Self {
        let mut entries = [config(BoardType::DiyBasic); BoardType::COUNT];
        let mut i = 0;
        while i < BoardType::COUNT {
            entries[i] = config(BoardType::ALL[i]);
            i += 1;
        }
        Self { entries }
    }

    /// A copy of this table with the entry for `board` replaced.
    pub const fn with(mut self, board: BoardType, cfg: BoardConfig) -> Self {
        self.entries[board.index()] = cfg;
        self
    }

    pub fn lookup(&self, board: BoardType) -> &BoardConfig {
        &self.entries[board.index()]
    }
}

impl Default for BoardTable {
    fn default() -> Self {
        Self::standard()
    }
}

const BOARD_FEATURES: usize = cfg!(feature = "board-diy-basic") as usize
    + cfg!(feature = "board-diy-pro-v4-2") as usize
    + cfg!(feature = "board-one-indoor") as usize
    + cfg!(feature = "board-open-air-outdoor") as usize
    + cfg!(feature = "board-diy-pro-v3-3") as usize;

const _: () = assert!(
    BOARD_FEATURES <= 1,
    "board-* features are mutually exclusive; enable at most one"
);

/// Board chosen by the `board-*` Cargo feature.
pub const SELECTED: Option<BoardType> = if cfg!(feature = "board-one-indoor") {
    Some(BoardType::OneIndoor)
} else if cfg!(feature = "board-open-air-outdoor") {
    Some(BoardType::OpenAirOutdoor)
} else if cfg!(feature = "board-diy-pro-v4-2") {
    Some(BoardType::DiyProIndoorV4_2)
} else if cfg!(feature = "board-diy-pro-v3-3") {
    Some(BoardType::DiyProIndoorV3_3)
} else if cfg!(feature = "board-diy-basic") {
    Some(BoardType::DiyBasic)
} else {
    None
};
