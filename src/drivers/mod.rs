/// Peripheral drivers owned by the registry.
///
/// Drivers are built unconfigured from the board's [`BoardConfig`] and hold
/// only the hardware facts they need. [`Peripheral::begin`] checks that the
/// board actually carries the part and marks the driver ready; bus traffic
/// belongs to the collaborator that owns the driver afterwards.
///
/// [`BoardConfig`]: crate::board::BoardConfig
use core::fmt;

use crate::board::BoardType;

mod interface;
mod sensors;
mod watchdog;

pub use interface::{Display, LedBar, PushButton, Rgb, StatusLed, MAX_LEDS};
pub use sensors::{Connector, Pms5003, Pms5003t, Sgp41, Sht, S8};
pub use watchdog::HardwareWatchdog;

/// Every peripheral slot in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PeripheralKind {
    Pms5003,
    /// PMS5003T on the PM1 connector
    Pms5003t1,
    /// PMS5003T on the PM2 connector
    Pms5003t2,
    S8,
    Sht,
    Sgp41,
    Display,
    Button,
    StatusLed,
    LedBar,
    Watchdog,
}

impl PeripheralKind {
    pub const ALL: [PeripheralKind; 11] = [
        PeripheralKind::Pms5003,
        PeripheralKind::Pms5003t1,
        PeripheralKind::Pms5003t2,
        PeripheralKind::S8,
        PeripheralKind::Sht,
        PeripheralKind::Sgp41,
        PeripheralKind::Display,
        PeripheralKind::Button,
        PeripheralKind::StatusLed,
        PeripheralKind::LedBar,
        PeripheralKind::Watchdog,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PeripheralKind::Pms5003 => "pms5003",
            PeripheralKind::Pms5003t1 => "pms5003t_1",
            PeripheralKind::Pms5003t2 => "pms5003t_2",
            PeripheralKind::S8 => "s8",
            PeripheralKind::Sht => "sht",
            PeripheralKind::Sgp41 => "sgp41",
            PeripheralKind::Display => "display",
            PeripheralKind::Button => "button",
            PeripheralKind::StatusLed => "status_led",
            PeripheralKind::LedBar => "led_bar",
            PeripheralKind::Watchdog => "watchdog",
        }
    }
}

/// Errors from board selection, configuration tags and driver lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The board does not carry this peripheral
    Unsupported { kind: PeripheralKind, board: BoardType },
    /// Operation needs `begin` first
    NotReady(PeripheralKind),
    IndexOutOfRange { index: usize, len: usize },
    /// Stored board byte does not name a board
    UnknownBoard(u8),
    /// Configuration tag not in the accepted set
    UnknownTag,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Unsupported { kind, board } => {
                write!(f, "{} not supported on {}", kind.as_str(), board.as_str())
            }
            Error::NotReady(kind) => write!(f, "{} not started", kind.as_str()),
            Error::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range (len {})", index, len)
            }
            Error::UnknownBoard(b) => write!(f, "unknown board id {}", b),
            Error::UnknownTag => f.write_str("unknown configuration tag"),
        }
    }
}

/// Lifecycle shared by every driver.
pub trait Peripheral {
    fn kind(&self) -> PeripheralKind;

    /// Board the driver was built for.
    fn board(&self) -> BoardType;

    /// Whether the board carries this peripheral.
    fn is_supported(&self) -> bool;

    fn is_ready(&self) -> bool;

    /// Mark the driver ready. Fails on boards without the part; calling it
    /// again on a ready driver is a no-op.
    fn begin(&mut self) -> Result<(), Error>;

    /// Return to the unconfigured state.
    fn end(&mut self);
}

/// Ready flag plus identity, embedded in each driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Lifecycle {
    kind: PeripheralKind,
    board: BoardType,
    ready: bool,
}

impl Lifecycle {
    pub(crate) const fn new(kind: PeripheralKind, board: BoardType) -> Self {
        Self {
            kind,
            board,
            ready: false,
        }
    }

    pub(crate) fn kind(&self) -> PeripheralKind {
        self.kind
    }

    pub(crate) fn board(&self) -> BoardType {
        self.board
    }

    pub(crate) fn is_ready(&self) -> bool {
        self.ready
    }

    pub(crate) fn begin(&mut self, supported: bool) -> Result<(), Error> {
        if self.ready {
            log::debug!("{} already started", self.kind.as_str());
            return Ok(());
        }
        if !supported {
            log::warn!(
                "{} not supported on {}",
                self.kind.as_str(),
                self.board.as_str()
            );
            return Err(Error::Unsupported {
                kind: self.kind,
                board: self.board,
            });
        }
        self.ready = true;
        log::info!("{} started", self.kind.as_str());
        Ok(())
    }

    pub(crate) fn end(&mut self) {
        if self.ready {
            self.ready = false;
            log::info!("{} stopped", self.kind.as_str());
        }
    }

    pub(crate) fn ensure_ready(&self) -> Result<(), Error> {
        if self.ready {
            Ok(())
        } else {
            Err(Error::NotReady(self.kind))
        }
    }
}

/// Implements [`Peripheral`] for a driver with a `life: Lifecycle` field,
/// given an expression deciding board support.
macro_rules! impl_peripheral {
    ($ty:ty, |$this:ident| $supported:expr) => {
        impl $crate::drivers::Peripheral for $ty {
            fn kind(&self) -> $crate::drivers::PeripheralKind {
                self.life.kind()
            }

            fn board(&self) -> $crate::board::BoardType {
                self.life.board()
            }

            fn is_supported(&self) -> bool {
                let $this = self;
                $supported
            }

            fn is_ready(&self) -> bool {
                self.life.is_ready()
            }

            fn begin(&mut self) -> Result<(), $crate::drivers::Error> {
                let supported = self.is_supported();
                self.life.begin(supported)
            }

            fn end(&mut self) {
                self.life.end()
            }
        }
    };
}
pub(crate) use impl_peripheral;
