//! I2C protocol primitives
//!
//! START/STOP framing, byte transfer and the acknowledge bit, each built
//! only from [`SoftI2c::set_lines`] steps.
//!
//! ```text
//! Idle(1,1) -> START -> 8 x (set SDA, clock) -> ACK bit -> ... -> STOP -> Idle(1,1)
//! ```

use softi2c_hal::{CycleCounter, I2cMaster, Level, OpenDrainLines};

use crate::bus::SoftI2c;
use crate::error::BusError;

impl<L: OpenDrainLines, C: CycleCounter> SoftI2c<L, C> {
    /// START condition: SDA falls while SCL is high
    ///
    /// Also valid mid-transaction as a repeated START. Recalibrates the
    /// half-period delay first, since the CPU clock may have changed since
    /// the bus was last used.
    pub fn start(&mut self) -> Result<(), BusError> {
        self.recalibrate();

        let scl = self.line_state().scl;
        self.set_lines(Level::High, scl)?;
        self.set_lines(Level::High, Level::High)?;
        self.set_lines(Level::Low, Level::High)
    }

    /// STOP condition: SDA rises while SCL is high
    ///
    /// Leaves both lines released (bus idle).
    pub fn stop(&mut self) -> Result<(), BusError> {
        let scl = self.line_state().scl;
        self.set_lines(Level::Low, scl)?;
        self.set_lines(Level::Low, Level::High)?;
        self.set_lines(Level::High, Level::High)
    }

    /// Clock out one acknowledge bit
    ///
    /// `Level::Low` acknowledges, `Level::High` declines. SDA is released
    /// again afterwards with SCL low, ready for the next byte.
    pub fn send_ack_bit(&mut self, level: Level) -> Result<(), BusError> {
        let sda = self.line_state().sda;
        self.set_lines(sda, Level::Low)?;
        self.set_lines(level, Level::Low)?;
        self.set_lines(level, Level::High)?;
        self.set_lines(level, Level::Low)?;
        self.set_lines(Level::High, Level::Low)
    }

    /// Acknowledge the byte just read
    pub fn send_ack(&mut self) -> Result<(), BusError> {
        self.send_ack_bit(Level::Low)
    }

    /// Decline the byte just read
    pub fn send_nack(&mut self) -> Result<(), BusError> {
        self.send_ack_bit(Level::High)
    }

    /// Clock in the acknowledge bit and return the raw SDA sample
    ///
    /// SDA is released so the slave can pull it low, and sampled while SCL
    /// is high. `Low` is an ACK.
    pub fn receive_ack_bit(&mut self) -> Result<Level, BusError> {
        let sda = self.line_state().sda;
        self.set_lines(sda, Level::Low)?;
        self.set_lines(Level::High, Level::Low)?;
        self.set_lines(Level::High, Level::High)?;
        let bit = self.sample_sda();
        self.set_lines(Level::High, Level::Low)?;
        Ok(bit)
    }

    /// Whether the slave acknowledged
    ///
    /// `true` when the sampled bit was low (ACK), `false` when it was high
    /// (NACK).
    pub fn check_ack(&mut self) -> Result<bool, BusError> {
        Ok(self.receive_ack_bit()?.is_low())
    }

    /// Clock in one byte, MSB first
    ///
    /// Leaves SCL low so the caller can drive the acknowledge bit.
    pub fn read_byte(&mut self) -> Result<u8, BusError> {
        let mut value: u8 = 0;

        let sda = self.line_state().sda;
        self.set_lines(sda, Level::Low)?;

        for i in 0..8 {
            self.set_lines(Level::High, Level::Low)?;
            self.set_lines(Level::High, Level::High)?;
            value |= self.sample_sda().bit() << (7 - i);
        }

        self.set_lines(Level::High, Level::Low)?;
        Ok(value)
    }

    /// Clock out one byte, MSB first
    ///
    /// Each bit is set while SCL is low and transferred on the following
    /// SCL rise. The acknowledge bit is not handled here.
    pub fn write_byte(&mut self, value: u8) -> Result<(), BusError> {
        for i in (0..8).rev() {
            let bit = Level::from_bit(value >> i);
            self.set_lines(bit, Level::Low)?;
            self.set_lines(bit, Level::High)?;
        }
        Ok(())
    }
}

impl<L: OpenDrainLines, C: CycleCounter> I2cMaster for SoftI2c<L, C> {
    type Error = BusError;

    fn start(&mut self) -> Result<(), BusError> {
        SoftI2c::start(self)
    }

    fn stop(&mut self) -> Result<(), BusError> {
        SoftI2c::stop(self)
    }

    fn write_byte(&mut self, value: u8) -> Result<(), BusError> {
        SoftI2c::write_byte(self, value)
    }

    fn read_byte(&mut self) -> Result<u8, BusError> {
        SoftI2c::read_byte(self)
    }

    fn send_ack(&mut self) -> Result<(), BusError> {
        SoftI2c::send_ack(self)
    }

    fn send_nack(&mut self) -> Result<(), BusError> {
        SoftI2c::send_nack(self)
    }

    fn check_ack(&mut self) -> Result<bool, BusError> {
        SoftI2c::check_ack(self)
    }
}
