/// External hardware watchdog (TPL5010 on the ESP32-C3 boards), kicked by
/// pulsing its reset pin.
use crate::board::{BoardConfig, BoardType};

use super::{impl_peripheral, Lifecycle, PeripheralKind};

#[derive(Debug)]
pub struct HardwareWatchdog {
    life: Lifecycle,
    reset_pin: Option<u8>,
}

impl HardwareWatchdog {
    pub fn new(board: BoardType, cfg: &BoardConfig) -> Self {
        Self {
            life: Lifecycle::new(PeripheralKind::Watchdog, board),
            reset_pin: cfg.watchdog_reset,
        }
    }

    pub fn reset_pin(&self) -> Option<u8> {
        self.reset_pin
    }
}

impl_peripheral!(HardwareWatchdog, |s| s.reset_pin.is_some());
