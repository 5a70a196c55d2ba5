//! RP2040 backend for the software I2C master
//!
//! This crate provides RP2040 implementations of the `softi2c-hal` traits:
//!
//! - Open-drain emulation on `embassy-rp` [`Flex`](embassy_rp::gpio::Flex) pins,
//!   both lines switched by one SIO output-enable write
//! - Claiming pins by board pin id through a [`PinBank`]
//! - SysTick as the CPU cycle counter (the Cortex-M0+ has no DWT cycle counter)
//! - Interrupt masking via `cortex-m`
//!
//! ```ignore
//! let p = embassy_rp::init(Default::default());
//! let Some(core) = cortex_m::Peripherals::take() else { return Ok(()) };
//!
//! let mut bank = PinBank::new(IdentityPinMap);
//! bank.add(p.PIN_4);
//! bank.add(p.PIN_5);
//!
//! let mut bus: Rp2040SoftI2c = SoftI2c::configure(
//!     &mut bank,
//!     &mut CortexMInterrupts,
//!     SysTickCounter::new(core.SYST),
//!     BusConfig::new(4, 5, STANDARD_MODE_HZ),
//! )
//! .map_err(|failure| failure.into_error())?;
//! ```

#![no_std]

pub mod cycles;
pub mod gpio;
pub mod interrupt;
pub mod pins;

pub use cycles::SysTickCounter;
pub use gpio::SioLines;
pub use interrupt::CortexMInterrupts;
pub use pins::{BoardPinMap, IdentityPinMap, PinBank, PinError};

// Re-export shared types for convenience
pub use softi2c_core::{BusConfig, SoftI2c};

/// SDA/SCL pair on two RP2040 GPIOs
pub type Rp2040Lines = SioLines<'static>;

/// Software I2C bus on RP2040 GPIOs, timed by SysTick
pub type Rp2040SoftI2c = SoftI2c<Rp2040Lines, SysTickCounter>;
