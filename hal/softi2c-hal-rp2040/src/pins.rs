//! Claiming bus pins by board pin id
//!
//! Provides a way to get GPIO pins by number at runtime, so a bus can be
//! (re)assigned to pins chosen by configuration rather than hardcoded.

use embassy_rp::gpio::{AnyPin, Pin};
use embassy_rp::Peri;
use softi2c_hal::{BusPins, PinId, PinMap};

use crate::gpio::SioLines;
use crate::Rp2040Lines;

/// Number of user GPIOs on RP2040
pub const GPIO_COUNT: usize = 30;

/// Error when claiming bus pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// Board has no pin with this id
    UnknownPin,
    /// Pin id maps outside the GPIO range (0-29 valid)
    InvalidPin,
    /// Pin already taken, or never added to the bank
    AlreadyTaken,
    /// SDA and SCL map to the same GPIO
    SamePin,
}

/// Boards whose pin labels are the GPIO numbers (e.g. Raspberry Pi Pico)
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPinMap;

impl PinMap for IdentityPinMap {
    fn gpio(&self, pin: PinId) -> Option<u8> {
        Some(pin)
    }
}

/// Board table: logical pin `n` is GPIO `table[n]`
#[derive(Debug, Clone, Copy)]
pub struct BoardPinMap {
    table: &'static [u8],
}

impl BoardPinMap {
    pub const fn new(table: &'static [u8]) -> Self {
        Self { table }
    }
}

impl PinMap for BoardPinMap {
    fn gpio(&self, pin: PinId) -> Option<u8> {
        self.table.get(pin as usize).copied()
    }
}

/// Pin bank that holds GPIO pins and hands them out by board pin id
pub struct PinBank<M> {
    map: M,
    pins: [Option<Peri<'static, AnyPin>>; GPIO_COUNT],
}

impl<M: PinMap> PinBank<M> {
    /// Create an empty bank; pins are added with [`add`](Self::add)
    pub fn new(map: M) -> Self {
        Self {
            map,
            pins: core::array::from_fn(|_| None),
        }
    }

    /// Put a pin in the bank
    pub fn add<P: Pin>(&mut self, pin: Peri<'static, P>) {
        let gpio = pin.pin() as usize;
        if gpio < GPIO_COUNT {
            self.pins[gpio] = Some(pin.into());
        }
    }

    /// Check if a GPIO is available
    pub fn is_available(&self, gpio: u8) -> bool {
        if gpio as usize >= GPIO_COUNT {
            return false;
        }
        self.pins[gpio as usize].is_some()
    }

    fn resolve(&self, pin: PinId) -> Result<u8, PinError> {
        let gpio = self.map.gpio(pin).ok_or(PinError::UnknownPin)?;
        if gpio as usize >= GPIO_COUNT {
            return Err(PinError::InvalidPin);
        }
        if !self.is_available(gpio) {
            return Err(PinError::AlreadyTaken);
        }
        Ok(gpio)
    }

    fn take(&mut self, gpio: u8) -> Result<Peri<'static, AnyPin>, PinError> {
        self.pins[gpio as usize]
            .take()
            .ok_or(PinError::AlreadyTaken)
    }
}

impl<M: PinMap> BusPins for PinBank<M> {
    type Lines = Rp2040Lines;
    type Error = PinError;

    fn open(&mut self, sda: PinId, scl: PinId) -> Result<Rp2040Lines, PinError> {
        let sda_gpio = self.resolve(sda)?;
        let scl_gpio = self.resolve(scl)?;
        if sda_gpio == scl_gpio {
            return Err(PinError::SamePin);
        }

        let sda_pin = self.take(sda_gpio)?;
        let scl_pin = self.take(scl_gpio)?;

        Ok(SioLines::new(sda_pin, sda_gpio, scl_pin, scl_gpio))
    }

    fn release(&mut self, lines: Rp2040Lines) {
        let (sda, scl) = lines.gpios();

        // Dropping the Flex pins disconnects both pads.
        drop(lines);

        for gpio in [sda, scl] {
            // SAFETY: the only handle to this pin was just dropped.
            self.pins[gpio as usize] = Some(unsafe { AnyPin::steal(gpio) });
        }
    }
}
