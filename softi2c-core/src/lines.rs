//! embedded-hal pin pair adapter
//!
//! Builds an [`OpenDrainLines`] from two separate `embedded-hal` pins that
//! are already configured as open-drain outputs.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin, PinState};
use softi2c_hal::{Level, LineState, OpenDrainLines};

/// SDA/SCL pair made of two independent GPIO pins
///
/// Two pins cannot change in the same instant, so the write order is chosen
/// so that no START or STOP condition appears that was not requested:
/// when SCL goes low it is written before SDA, otherwise SDA is written
/// first. SDA therefore only moves while SCL is low, except when the caller
/// explicitly holds SCL high around an SDA change.
pub struct PinPairLines<SDA, SCL> {
    sda: SDA,
    scl: SCL,
}

impl<SDA, SCL> PinPairLines<SDA, SCL>
where
    SDA: OutputPin<Error = Infallible> + InputPin,
    SCL: OutputPin<Error = Infallible> + InputPin,
{
    /// Wrap two open-drain pins
    pub fn new(sda: SDA, scl: SCL) -> Self {
        Self { sda, scl }
    }

    /// Give back the pins
    pub fn into_inner(self) -> (SDA, SCL) {
        (self.sda, self.scl)
    }
}

impl<SDA, SCL> OpenDrainLines for PinPairLines<SDA, SCL>
where
    SDA: OutputPin<Error = Infallible> + InputPin,
    SCL: OutputPin<Error = Infallible> + InputPin,
{
    fn drive(&mut self, state: LineState) {
        let sda = PinState::from(state.sda.is_high());
        let scl = PinState::from(state.scl.is_high());

        if state.scl.is_low() {
            infallible(self.scl.set_state(scl));
            infallible(self.sda.set_state(sda));
        } else {
            infallible(self.sda.set_state(sda));
            infallible(self.scl.set_state(scl));
        }
    }

    fn read_sda(&mut self) -> Level {
        Level::from(infallible(self.sda.is_high()))
    }

    fn read_scl(&mut self) -> Level {
        Level::from(infallible(self.scl.is_high()))
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => match e {},
    }
}
