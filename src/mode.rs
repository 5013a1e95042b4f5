/// Firmware operating modes and the configuration tags that select
/// runtime behaviour.
///
/// A firmware mode names the sensor combination a board is expected to run
/// with. The label format is `<I|O>-<revision><sensor letters>`, e.g. `O-1PST`
/// is outdoor revision 1 with PMS5003T, S8 and SGP41 (T for TVOC).
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::drivers::{Error, PeripheralKind};

/// Closed set of firmware modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FirmwareMode {
    /// ONE indoor: PMS5003, S8, SHT, SGP41, LED bar
    #[serde(rename = "I-9PSL")]
    I9Psl,
    /// Open Air: PMS5003T, S8, SGP41
    #[serde(rename = "O-1PST")]
    O1Pst,
    /// Open Air: two PMS5003T, SGP41
    #[serde(rename = "O-1PPT")]
    O1Ppt,
    /// Open Air: two PMS5003T
    #[serde(rename = "O-1PP")]
    O1Pp,
    /// Open Air: PMS5003T, S8
    #[serde(rename = "O-1PS")]
    O1Ps,
    /// Default for the DIY Pro 4.2. This label and the two below are local
    /// to this crate; the upstream firmware has no DIY modes.
    #[serde(rename = "I-42PS")]
    I42Ps,
    /// Default for the DIY Pro 3.3
    #[serde(rename = "I-33PS")]
    I33Ps,
    /// Default for the DIY Basic
    #[serde(rename = "I-40PS")]
    I40Ps,
}

impl FirmwareMode {
    pub const ALL: [FirmwareMode; 8] = [
        FirmwareMode::I9Psl,
        FirmwareMode::O1Pst,
        FirmwareMode::O1Ppt,
        FirmwareMode::O1Pp,
        FirmwareMode::O1Ps,
        FirmwareMode::I42Ps,
        FirmwareMode::I33Ps,
        FirmwareMode::I40Ps,
    ];

    /// Fixed display label for the mode.
    pub const fn name(self) -> &'static str {
        match self {
            FirmwareMode::I9Psl => "I-9PSL",
            FirmwareMode::O1Pst => "O-1PST",
            FirmwareMode::O1Ppt => "O-1PPT",
            FirmwareMode::O1Pp => "O-1PP",
            FirmwareMode::O1Ps => "O-1PS",
            FirmwareMode::I42Ps => "I-42PS",
            FirmwareMode::I33Ps => "I-33PS",
            FirmwareMode::I40Ps => "I-40PS",
        }
    }

    pub const fn is_outdoor(self) -> bool {
        matches!(
            self,
            FirmwareMode::O1Pst | FirmwareMode::O1Ppt | FirmwareMode::O1Pp | FirmwareMode::O1Ps
        )
    }

    /// Peripherals a board running this mode is expected to operate.
    pub const fn peripherals(self) -> &'static [PeripheralKind] {
        use PeripheralKind::*;
        match self {
            FirmwareMode::I9Psl => &[
                Pms5003, S8, Sht, Sgp41, Display, Button, LedBar, Watchdog,
            ],
            FirmwareMode::O1Pst => &[Pms5003t1, S8, Sgp41, Button, StatusLed, Watchdog],
            FirmwareMode::O1Ppt => &[Pms5003t1, Pms5003t2, Sgp41, Button, StatusLed, Watchdog],
            FirmwareMode::O1Pp => &[Pms5003t1, Pms5003t2, Button, StatusLed, Watchdog],
            FirmwareMode::O1Ps => &[Pms5003t1, S8, Button, StatusLed, Watchdog],
            FirmwareMode::I42Ps | FirmwareMode::I33Ps | FirmwareMode::I40Ps => {
                &[Pms5003, S8, Sht, Display, Button]
            }
        }
    }
}

impl core::fmt::Display for FirmwareMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// What the ONE's RGB LED bar visualises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LedBarMode {
    /// LED bar unused
    Off,
    /// PM2.5 level
    #[default]
    Pm,
    /// CO2 level
    Co2,
}

impl LedBarMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            LedBarMode::Off => "off",
            LedBarMode::Pm => "pm",
            LedBarMode::Co2 => "co2",
        }
    }
}

impl FromStr for LedBarMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(LedBarMode::Off),
            "pm" => Ok(LedBarMode::Pm),
            "co2" => Ok(LedBarMode::Co2),
            _ => Err(Error::UnknownTag),
        }
    }
}

/// Where device configuration may be changed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigurationControl {
    /// Local HTTP server on the device
    Local,
    /// AirGradient dashboard
    Cloud,
    #[default]
    Both,
}

impl ConfigurationControl {
    pub const fn as_str(self) -> &'static str {
        match self {
            ConfigurationControl::Local => "local",
            ConfigurationControl::Cloud => "cloud",
            ConfigurationControl::Both => "both",
        }
    }

    pub const fn allows_local(self) -> bool {
        matches!(self, ConfigurationControl::Local | ConfigurationControl::Both)
    }

    pub const fn allows_cloud(self) -> bool {
        matches!(self, ConfigurationControl::Cloud | ConfigurationControl::Both)
    }
}

impl FromStr for ConfigurationControl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "local" => Ok(ConfigurationControl::Local),
            "cloud" => Ok(ConfigurationControl::Cloud),
            "both" => Ok(ConfigurationControl::Both),
            _ => Err(Error::UnknownTag),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── FirmwareMode ────────────────────────────────────────────────

    #[test]
    fn every_mode_has_a_label() {
        for mode in FirmwareMode::ALL {
            assert!(!mode.name().is_empty(), "{mode:?} has no label");
        }
    }

    #[test]
    fn labels_are_unique() {
        for a in FirmwareMode::ALL {
            for b in FirmwareMode::ALL {
                if a != b {
                    assert_ne!(a.name(), b.name());
                }
            }
        }
    }

    #[test]
    fn label_prefix_matches_placement() {
        for mode in FirmwareMode::ALL {
            let prefix = if mode.is_outdoor() { "O-" } else { "I-" };
            assert!(mode.name().starts_with(prefix), "{}", mode.name());
        }
    }

    #[test]
    fn known_labels() {
        assert_eq!(FirmwareMode::I9Psl.name(), "I-9PSL");
        assert_eq!(FirmwareMode::O1Pst.name(), "O-1PST");
        assert_eq!(FirmwareMode::O1Ppt.name(), "O-1PPT");
        assert_eq!(FirmwareMode::O1Pp.name(), "O-1PP");
        assert_eq!(FirmwareMode::O1Ps.name(), "O-1PS");
    }

    #[test]
    fn mode_serializes_as_label() {
        for mode in FirmwareMode::ALL {
            let mut buf = [0u8; 16];
            let len = serde_json_core::to_slice(&mode, &mut buf).unwrap();
            assert_eq!(&buf[1..len - 1], mode.name().as_bytes());
        }
    }

    #[test]
    fn display_uses_label() {
        let mut s = heapless::String::<8>::new();
        core::fmt::Write::write_fmt(&mut s, format_args!("{}", FirmwareMode::O1Pp)).unwrap();
        assert_eq!(s.as_str(), "O-1PP");
    }

    #[test]
    fn every_mode_expects_some_peripherals() {
        for mode in FirmwareMode::ALL {
            assert!(!mode.peripherals().is_empty());
        }
    }

    #[test]
    fn outdoor_modes_never_expect_a_display() {
        for mode in FirmwareMode::ALL.into_iter().filter(|m| m.is_outdoor()) {
            assert!(!mode.peripherals().contains(&PeripheralKind::Display));
            assert!(!mode.peripherals().contains(&PeripheralKind::Pms5003));
        }
    }

    #[test]
    fn dual_pms_modes_use_both_connectors() {
        for mode in [FirmwareMode::O1Ppt, FirmwareMode::O1Pp] {
            assert!(mode.peripherals().contains(&PeripheralKind::Pms5003t1));
            assert!(mode.peripherals().contains(&PeripheralKind::Pms5003t2));
        }
    }

    // ── Configuration tags ──────────────────────────────────────────

    #[test]
    fn led_bar_mode_parses_its_labels() {
        for mode in [LedBarMode::Off, LedBarMode::Pm, LedBarMode::Co2] {
            assert_eq!(mode.as_str().parse::<LedBarMode>(), Ok(mode));
        }
        assert_eq!("CO2".parse::<LedBarMode>(), Err(Error::UnknownTag));
    }

    #[test]
    fn configuration_control_parses_its_labels() {
        for ctl in [
            ConfigurationControl::Local,
            ConfigurationControl::Cloud,
            ConfigurationControl::Both,
        ] {
            assert_eq!(ctl.as_str().parse::<ConfigurationControl>(), Ok(ctl));
        }
        assert_eq!("".parse::<ConfigurationControl>(), Err(Error::UnknownTag));
    }

    #[test]
    fn configuration_control_permissions() {
        assert!(ConfigurationControl::Local.allows_local());
        assert!(!ConfigurationControl::Local.allows_cloud());
        assert!(ConfigurationControl::Cloud.allows_cloud());
        assert!(!ConfigurationControl::Cloud.allows_local());
        assert!(ConfigurationControl::Both.allows_local());
        assert!(ConfigurationControl::Both.allows_cloud());
    }

    #[test]
    fn tags_deserialize_from_json() {
        let (mode, _): (LedBarMode, _) = serde_json_core::from_str(r#""co2""#).unwrap();
        assert_eq!(mode, LedBarMode::Co2);
        let (ctl, _): (ConfigurationControl, _) =
            serde_json_core::from_str(r#""cloud""#).unwrap();
        assert_eq!(ctl, ConfigurationControl::Cloud);
        assert!(serde_json_core::from_str::<LedBarMode>(r#""rainbow""#).is_err());
    }

    #[test]
    fn tags_serialize_lowercase() {
        let mut buf = [0u8; 16];
        let len = serde_json_core::to_slice(&ConfigurationControl::Local, &mut buf).unwrap();
        assert_eq!(&buf[..len], br#""local""#);
    }
}
