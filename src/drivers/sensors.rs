/// Sensor drivers: particulate (PMS5003/PMS5003T), CO2 (SenseAir S8),
/// temperature/humidity (SHT3x/SHT4x) and VOC/NOx (SGP41).
use crate::board::{BoardConfig, BoardType, I2cPins, Uart};

use super::{impl_peripheral, Lifecycle, PeripheralKind};

/// PMS connector on the Open Air board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connector {
    Pm1,
    Pm2,
}

impl Connector {
    const fn index(self) -> usize {
        match self {
            Connector::Pm1 => 0,
            Connector::Pm2 => 1,
        }
    }
}

/// Plantower PMS5003 on the indoor boards.
#[derive(Debug)]
pub struct Pms5003 {
    life: Lifecycle,
    uart: Option<Uart>,
}

impl Pms5003 {
    pub fn new(board: BoardType, cfg: &BoardConfig) -> Self {
        let uart = if cfg.firmware_mode.is_outdoor() {
            None
        } else {
            cfg.pms[Connector::Pm1.index()]
        };
        Self {
            life: Lifecycle::new(PeripheralKind::Pms5003, board),
            uart,
        }
    }

    pub fn uart(&self) -> Option<Uart> {
        self.uart
    }
}

impl_peripheral!(Pms5003, |s| s.uart.is_some());

/// Plantower PMS5003T (with temperature/humidity) on an outdoor connector.
#[derive(Debug)]
pub struct Pms5003t {
    life: Lifecycle,
    connector: Connector,
    uart: Option<Uart>,
}

impl Pms5003t {
    pub fn new(board: BoardType, cfg: &BoardConfig, connector: Connector) -> Self {
        let kind = match connector {
            Connector::Pm1 => PeripheralKind::Pms5003t1,
            Connector::Pm2 => PeripheralKind::Pms5003t2,
        };
        let uart = if cfg.firmware_mode.is_outdoor() {
            cfg.pms[connector.index()]
        } else {
            None
        };
        Self {
            life: Lifecycle::new(kind, board),
            connector,
            uart,
        }
    }

    pub fn connector(&self) -> Connector {
        self.connector
    }

    pub fn uart(&self) -> Option<Uart> {
        self.uart
    }
}

impl_peripheral!(Pms5003t, |s| s.uart.is_some());

/// SenseAir S8 CO2 sensor.
#[derive(Debug)]
pub struct S8 {
    life: Lifecycle,
    uart: Option<Uart>,
}

impl S8 {
    pub fn new(board: BoardType, cfg: &BoardConfig) -> Self {
        Self {
            life: Lifecycle::new(PeripheralKind::S8, board),
            uart: cfg.s8,
        }
    }

    pub fn uart(&self) -> Option<Uart> {
        self.uart
    }
}

impl_peripheral!(S8, |s| s.uart.is_some());

/// Sensirion SHT3x/SHT4x on the I2C bus.
#[derive(Debug)]
pub struct Sht {
    life: Lifecycle,
    i2c: Option<I2cPins>,
}

impl Sht {
    pub fn new(board: BoardType, cfg: &BoardConfig) -> Self {
        Self {
            life: Lifecycle::new(PeripheralKind::Sht, board),
            i2c: cfg.i2c,
        }
    }

    pub fn i2c(&self) -> Option<I2cPins> {
        self.i2c
    }
}

impl_peripheral!(Sht, |s| s.i2c.is_some());

/// Sensirion SGP41 VOC/NOx sensor on the I2C bus.
#[derive(Debug)]
pub struct Sgp41 {
    life: Lifecycle,
    i2c: Option<I2cPins>,
}

impl Sgp41 {
    pub fn new(board: BoardType, cfg: &BoardConfig) -> Self {
        Self {
            life: Lifecycle::new(PeripheralKind::Sgp41, board),
            i2c: cfg.i2c,
        }
    }

    pub fn i2c(&self) -> Option<I2cPins> {
        self.i2c
    }
}

impl_peripheral!(Sgp41, |s| s.i2c.is_some());

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::config;
    use crate::drivers::{Error, Peripheral};

    #[test]
    fn drivers_start_unconfigured() {
        let c = config(BoardType::OneIndoor);
        assert!(!Pms5003::new(BoardType::OneIndoor, &c).is_ready());
        assert!(!S8::new(BoardType::OneIndoor, &c).is_ready());
        assert!(!Sht::new(BoardType::OneIndoor, &c).is_ready());
        assert!(!Sgp41::new(BoardType::OneIndoor, &c).is_ready());
    }

    #[test]
    fn pms5003_only_on_indoor_boards() {
        let indoor = config(BoardType::OneIndoor);
        let outdoor = config(BoardType::OpenAirOutdoor);
        assert!(Pms5003::new(BoardType::OneIndoor, &indoor).is_supported());
        assert!(!Pms5003::new(BoardType::OpenAirOutdoor, &outdoor).is_supported());
    }

    #[test]
    fn pms5003t_connectors_on_open_air() {
        let c = config(BoardType::OpenAirOutdoor);
        let pm1 = Pms5003t::new(BoardType::OpenAirOutdoor, &c, Connector::Pm1);
        let pm2 = Pms5003t::new(BoardType::OpenAirOutdoor, &c, Connector::Pm2);
        assert_eq!(pm1.kind(), PeripheralKind::Pms5003t1);
        assert_eq!(pm2.kind(), PeripheralKind::Pms5003t2);
        assert_eq!(pm1.uart(), Some(Uart { tx: 21, rx: 20 }));
        assert_eq!(pm2.uart(), Some(Uart { tx: 1, rx: 0 }));
        assert_eq!(pm2.connector(), Connector::Pm2);
    }

    #[test]
    fn pms5003t_rejected_on_indoor_board() {
        let c = config(BoardType::OneIndoor);
        let mut pm = Pms5003t::new(BoardType::OneIndoor, &c, Connector::Pm1);
        assert_eq!(
            pm.begin(),
            Err(Error::Unsupported {
                kind: PeripheralKind::Pms5003t1,
                board: BoardType::OneIndoor,
            })
        );
    }

    #[test]
    fn i2c_sensors_follow_bus() {
        let c = config(BoardType::DiyBasic);
        let mut sht = Sht::new(BoardType::DiyBasic, &c);
        assert_eq!(sht.i2c(), c.i2c);
        assert_eq!(sht.begin(), Ok(()));
        assert!(sht.is_ready());

        let bare = BoardConfig { i2c: None, ..c };
        let mut sgp = Sgp41::new(BoardType::DiyBasic, &bare);
        assert!(!sgp.is_supported());
        assert!(sgp.begin().is_err());
    }

    #[test]
    fn s8_begin_then_end() {
        let c = config(BoardType::OpenAirOutdoor);
        let mut s8 = S8::new(BoardType::OpenAirOutdoor, &c);
        s8.begin().unwrap();
        assert!(s8.is_ready());
        s8.end();
        assert!(!s8.is_ready());
        assert_eq!(s8.board(), BoardType::OpenAirOutdoor);
    }
}
