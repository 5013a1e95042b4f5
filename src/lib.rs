//! AirGradient board support — board facts and the peripheral registry.
//!
//! Resolves everything that differs between AirGradient boards (I2C pins,
//! which sensors are fitted, default firmware mode, board name) and owns one
//! driver for every peripheral the firmware might use. Higher-level
//! subsystems (display manager, network clients, state machine) receive
//! borrows from the registry at startup.
//!
//! The crate is `no_std` without an allocator and builds on the host for
//! `cargo test`. The ESP32-C3 firmware in `main.rs` is a thin consumer that
//! picks the board and hands the registry to its tasks.
//!
//! Modules:
//! - `board`: board identifiers and the hardware table
//! - `mode`: firmware modes and runtime configuration tags
//! - `drivers`: peripheral drivers and their lifecycle
//! - `registry`: the [`AirGradient`] composition root
//! - `util`: numeric helpers

#![cfg_attr(not(test), no_std)]

pub mod board;
pub mod drivers;
pub mod mode;
pub mod registry;
pub mod util;

pub use board::BoardType;
pub use registry::{AirGradient, VERSION};
pub use util::round2;
