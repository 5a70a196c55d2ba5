//! Board-agnostic software I2C master
//!
//! Reproduces the I2C electrical protocol by toggling two open-drain lines
//! with cycle-counted delays:
//!
//! - Timing calibration (bus speed to half-period busy-wait cycles)
//! - Line driver with clock-stretch wait, the single point every bus
//!   action goes through
//! - Protocol primitives (START, STOP, byte write/read, ACK/NACK)
//! - Bus recovery for slaves left stuck mid-byte
//!
//! Hardware access goes through the `softi2c-hal` traits, so the same
//! state machine runs on any chip that provides them.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod bus;
pub mod config;
pub mod error;
pub mod lines;
pub mod protocol;
pub mod timing;

#[cfg(test)]
pub(crate) mod mock;

pub use bus::SoftI2c;
pub use config::{BusConfig, StretchLimit, Tuning};
pub use error::{BusError, ConfigError, ConfigFailure};
pub use lines::PinPairLines;
pub use timing::calibrate;
