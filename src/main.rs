//! AirGradient — ESP32-C3 firmware entry point
//!
//! Picks the board from the build features, builds the peripheral registry
//! once, starts the peripherals the firmware mode expects and keeps the
//! external watchdog fed. Sensor, display and network tasks borrow their
//! peripherals from the same registry.

#![no_std]
#![no_main]

use esp_backtrace as _;

esp_bootloader_esp_idf::esp_app_desc!();

use airgradient::board;
use airgradient::drivers::{HardwareWatchdog, Peripheral, PeripheralKind};
use airgradient::AirGradient;

use embassy_time::{Duration, Timer};
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::interrupt::software::SoftwareInterruptControl;
use esp_hal::timer::timg::TimerGroup;
use static_cell::StaticCell;

/// TPL5010 needs a kick well inside its timeout
const WATCHDOG_KICK_SECS: u64 = 60;

/// Width of the DONE pulse on the watchdog reset pin
const WATCHDOG_PULSE_MS: u64 = 20;

static REGISTRY: StaticCell<AirGradient> = StaticCell::new();

#[embassy_executor::task]
async fn watchdog_task(watchdog: &'static mut HardwareWatchdog, mut done: Output<'static>) {
    if let Err(e) = watchdog.begin() {
        log::warn!("Watchdog disabled: {}", e);
        return;
    }
    loop {
        done.set_high();
        Timer::after(Duration::from_millis(WATCHDOG_PULSE_MS)).await;
        done.set_low();
        log::debug!("Watchdog kicked");
        Timer::after(Duration::from_secs(WATCHDOG_KICK_SECS)).await;
    }
}

#[esp_rtos::main]
async fn main(spawner: embassy_executor::Spawner) {
    esp_println::logger::init_logger_from_env();

    let peripherals = esp_hal::init(esp_hal::Config::default());

    // Start the RTOS — requires timer + software interrupt
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    let sw_int = SoftwareInterruptControl::new(peripherals.SW_INTERRUPT);
    esp_rtos::start(timg0.timer0, sw_int.software_interrupt0);

    let Some(board_type) = board::SELECTED else {
        panic!("no board-* feature selected");
    };

    let ag = REGISTRY.init(AirGradient::new(board_type));
    log::info!("{}", ag.banner());
    log::info!("I2C SDA {} SCL {}", ag.i2c_sda_pin(), ag.i2c_scl_pin());

    // The watchdog is started by its own task; everything else the mode
    // expects is started here so collaborators find it ready.
    let mode = ag.firmware_mode();
    for &kind in mode.peripherals() {
        if kind == PeripheralKind::Watchdog {
            continue;
        }
        if let Err(e) = ag.peripheral_mut(kind).begin() {
            log::warn!("{}", e);
        }
    }

    let parts = ag.parts_mut();

    let cfg = OutputConfig::default();
    let done = match parts.watchdog.reset_pin() {
        Some(2) => Some(Output::new(peripherals.GPIO2, Level::Low, cfg)),
        Some(3) => Some(Output::new(peripherals.GPIO3, Level::Low, cfg)),
        Some(4) => Some(Output::new(peripherals.GPIO4, Level::Low, cfg)),
        Some(5) => Some(Output::new(peripherals.GPIO5, Level::Low, cfg)),
        Some(pin) => {
            log::warn!("Watchdog reset GPIO{} has no output mapping", pin);
            None
        }
        None => {
            log::info!("No external watchdog on {}", board_type.as_str());
            None
        }
    };
    if let Some(done) = done {
        spawner.spawn(watchdog_task(parts.watchdog, done)).unwrap();
    }

    log::info!(
        "Build target: {}",
        if cfg!(feature = "one-indoor") {
            "one-indoor (ESP32-C3)"
        } else if cfg!(feature = "open-air-outdoor") {
            "open-air-outdoor (ESP32-C3)"
        } else {
            "unknown"
        }
    );

    loop {
        Timer::after(Duration::from_secs(3600)).await;
    }
}
