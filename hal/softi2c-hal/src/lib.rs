//! softi2c Hardware Abstraction Layer
//!
//! This crate defines the hardware capabilities a software I2C master needs
//! from the chip it runs on. Chip-specific HALs (RP2040, ...) implement them,
//! and `softi2c-core` drives the bus purely through these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application / device drivers           │
//! └─────────────────────────────────────────┘
//!                     │  I2cMaster
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softi2c-core (SoftI2c state machine)   │
//! └─────────────────────────────────────────┘
//!                     │  OpenDrainLines, CycleCounter, ...
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  softi2c-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ softi2c-hal-  │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OpenDrainLines`] - The SDA/SCL pair, driven as one unit
//! - [`gpio::BusPins`], [`gpio::PinMap`] - Claiming pins by board pin id
//! - [`cycles::CycleCounter`] - Free-running CPU cycle counter
//! - [`interrupt::Interrupts`] - Global interrupt enable/disable
//! - [`i2c::I2cMaster`] - Byte-level I2C master operations

#![no_std]
#![deny(unsafe_code)]

pub mod cycles;
pub mod gpio;
pub mod i2c;
pub mod interrupt;

// Re-export key traits at crate root for convenience
pub use cycles::CycleCounter;
pub use gpio::{BusPins, Level, LineState, OpenDrainLines, PinId, PinMap};
pub use i2c::I2cMaster;
pub use interrupt::Interrupts;
