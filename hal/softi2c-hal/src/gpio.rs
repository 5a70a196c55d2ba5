//! Open-drain line abstractions
//!
//! Provides the two-wire line pair a software I2C master toggles, plus the
//! traits used to claim a pair of pins by board pin id.

/// Logical (board) pin identifier, before mapping to a GPIO number
pub type PinId = u8;

/// Electrical level of one bus line
///
/// For an open-drain line, `High` means "released to the pull-up" and
/// `Low` means "actively pulled down".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Line pulled low
    Low,
    /// Line released (reads high unless another device holds it low)
    High,
}

impl Level {
    /// Level of bit 0 of `bit`; all other bits are ignored
    #[inline]
    pub const fn from_bit(bit: u8) -> Self {
        if bit & 0x01 == 0 {
            Level::Low
        } else {
            Level::High
        }
    }

    /// Level as a single bit (0 or 1)
    #[inline]
    pub const fn bit(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }

    #[inline]
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    #[inline]
    pub const fn is_low(self) -> bool {
        matches!(self, Level::Low)
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

impl From<Level> for bool {
    fn from(level: Level) -> Self {
        level.is_high()
    }
}

/// Combined (SDA, SCL) levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineState {
    /// Serial data line
    pub sda: Level,
    /// Serial clock line
    pub scl: Level,
}

impl LineState {
    /// Bus free: both lines released
    pub const IDLE: Self = Self::new(Level::High, Level::High);

    pub const fn new(sda: Level, scl: Level) -> Self {
        Self { sda, scl }
    }

    /// Build from two raw bits, masking each to bit 0
    pub const fn from_bits(sda: u8, scl: u8) -> Self {
        Self::new(Level::from_bit(sda), Level::from_bit(scl))
    }

    /// Check if both lines are released
    pub const fn is_idle(&self) -> bool {
        self.sda.is_high() && self.scl.is_high()
    }
}

impl Default for LineState {
    fn default() -> Self {
        Self::IDLE
    }
}

/// SDA/SCL pair configured as open-drain outputs
///
/// Implementations apply both levels in [`drive`](Self::drive) as a single
/// register write where the hardware allows it. Where it does not, the
/// writes must be ordered so that no intermediate combination forms a START
/// or STOP condition the caller did not request: SDA may only change while
/// SCL is low, unless the requested state itself keeps SCL high.
pub trait OpenDrainLines {
    /// Drive both lines to the requested levels
    fn drive(&mut self, state: LineState);

    /// Sample the physical SDA line
    fn read_sda(&mut self) -> Level;

    /// Sample the physical SCL line
    ///
    /// A slave stretching the clock makes this read `Low` even after the
    /// master released SCL.
    fn read_scl(&mut self) -> Level;
}

/// Board pin-name table
///
/// Maps a logical pin id (as printed on the board) to a GPIO number.
pub trait PinMap {
    /// GPIO number for a logical pin, or `None` if the board has no such pin
    fn gpio(&self, pin: PinId) -> Option<u8>;
}

/// Source of SDA/SCL line pairs
///
/// Owns the pin multiplexing and pad configuration for a chip. Opening a
/// pair maps both logical ids through the board table, switches the pins to
/// open-drain GPIO and releases both lines high.
pub trait BusPins {
    /// Line pair handed to the driver
    type Lines: OpenDrainLines;

    /// Error claiming pins (unknown id, pin in use, ...)
    type Error;

    /// Claim and configure a line pair
    fn open(&mut self, sda: PinId, scl: PinId) -> Result<Self::Lines, Self::Error>;

    /// Return a line pair so its pins can be claimed again
    fn release(&mut self, lines: Self::Lines);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bit_masks_upper_bits() {
        assert_eq!(Level::from_bit(0), Level::Low);
        assert_eq!(Level::from_bit(1), Level::High);
        assert_eq!(Level::from_bit(0xFE), Level::Low);
        assert_eq!(Level::from_bit(0x81), Level::High);
    }

    #[test]
    fn test_level_bit() {
        assert_eq!(Level::Low.bit(), 0);
        assert_eq!(Level::High.bit(), 1);
        assert_eq!(Level::from(true), Level::High);
        assert!(!bool::from(Level::Low));
    }

    #[test]
    fn test_line_state_idle() {
        assert!(LineState::IDLE.is_idle());
        assert_eq!(LineState::default(), LineState::IDLE);
        assert!(!LineState::from_bits(1, 0).is_idle());
        assert_eq!(LineState::from_bits(3, 2), LineState::new(Level::High, Level::Low));
    }
}
