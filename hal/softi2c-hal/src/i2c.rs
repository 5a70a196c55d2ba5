//! I2C master abstractions
//!
//! Byte-level master operations. Framing a transfer (START, address byte,
//! data bytes, ACK handling, STOP) is left to the caller.

/// Lowest SCL frequency a bus can be configured for
pub const MIN_SPEED_HZ: u32 = 1_000;

/// Standard mode (100 kHz)
pub const STANDARD_MODE_HZ: u32 = 100_000;

/// Fast mode (400 kHz)
pub const FAST_MODE_HZ: u32 = 400_000;

/// Fast mode plus (1 MHz)
pub const FAST_MODE_PLUS_HZ: u32 = 1_000_000;

/// I2C bus master
///
/// Every call blocks until its electrical sequence has completed,
/// including any clock stretching by the slave.
pub trait I2cMaster {
    /// Error type for bus operations
    type Error;

    /// Emit a START (or repeated START) condition
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Emit a STOP condition, leaving the bus idle
    fn stop(&mut self) -> Result<(), Self::Error>;

    /// Clock out one byte, MSB first, without the acknowledge bit
    fn write_byte(&mut self, value: u8) -> Result<(), Self::Error>;

    /// Clock in one byte, MSB first, without the acknowledge bit
    fn read_byte(&mut self) -> Result<u8, Self::Error>;

    /// Acknowledge a received byte (SDA low)
    fn send_ack(&mut self) -> Result<(), Self::Error>;

    /// Decline a received byte (SDA high), usually before STOP
    fn send_nack(&mut self) -> Result<(), Self::Error>;

    /// Clock the acknowledge bit from the slave
    ///
    /// Returns `true` if the slave acknowledged. A NACK is not an error.
    fn check_ack(&mut self) -> Result<bool, Self::Error>;
}
