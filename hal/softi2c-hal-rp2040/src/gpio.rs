//! Open-drain emulation on RP2040 GPIOs
//!
//! RP2040 pads have no open-drain mode. The output latch is held low and
//! only the output enable is toggled: enabled pulls the line low, disabled
//! releases it to the pull-up.
//!
//! Both output enables live in the same SIO register, so a line change is a
//! single write to `GPIO_OE_XOR` with the bits that differ.

use embassy_rp::gpio::{AnyPin, Flex, Pull};
use embassy_rp::pac;
use embassy_rp::Peri;
use softi2c_hal::{Level, LineState, OpenDrainLines};

/// SDA/SCL pair on two bank-0 GPIOs
pub struct SioLines<'d> {
    sda: Flex<'d>,
    scl: Flex<'d>,
    sda_gpio: u8,
    scl_gpio: u8,
}

impl<'d> SioLines<'d> {
    /// Take both pins and release them high
    ///
    /// The internal pull-ups are enabled as a fallback; a real bus still
    /// needs external pull-ups for anything above a few kHz.
    pub fn new(sda: Peri<'d, AnyPin>, sda_gpio: u8, scl: Peri<'d, AnyPin>, scl_gpio: u8) -> Self {
        Self {
            sda: released(sda),
            scl: released(scl),
            sda_gpio,
            scl_gpio,
        }
    }

    /// GPIO numbers of (SDA, SCL)
    pub fn gpios(&self) -> (u8, u8) {
        (self.sda_gpio, self.scl_gpio)
    }

    /// Output-enable bits that must be set for `state`
    fn pulled_low(&self, state: LineState) -> u32 {
        oe_bit(self.sda_gpio, state.sda) | oe_bit(self.scl_gpio, state.scl)
    }
}

fn released(pin: Peri<'_, AnyPin>) -> Flex<'_> {
    let mut pin = Flex::new(pin);
    pin.set_pull(Pull::Up);
    pin.set_low();
    pin.set_as_input();
    pin
}

#[inline(always)]
fn oe_bit(gpio: u8, level: Level) -> u32 {
    match level {
        Level::Low => 1 << gpio,
        Level::High => 0,
    }
}

impl OpenDrainLines for SioLines<'_> {
    #[inline(always)]
    fn drive(&mut self, state: LineState) {
        let mask = (1u32 << self.sda_gpio) | (1u32 << self.scl_gpio);
        let oe = pac::SIO.gpio_oe(0).value().read() & mask;
        let toggle = oe ^ self.pulled_low(state);
        if toggle != 0 {
            pac::SIO.gpio_oe(0).value_xor().write_value(toggle);
        }
    }

    #[inline(always)]
    fn read_sda(&mut self) -> Level {
        Level::from(self.sda.is_high())
    }

    #[inline(always)]
    fn read_scl(&mut self) -> Level {
        Level::from(self.scl.is_high())
    }
}
