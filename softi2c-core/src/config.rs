//! Bus configuration types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use softi2c_hal::PinId;

use crate::timing::{clamp_speed, DEFAULT_OVERHEAD_CYCLES, DEFAULT_RECOVERY_CLOCKS};

/// Upper bound on how long the master waits for a stretched clock
///
/// The I2C electrical contract has no timeout: a slave may hold SCL low for
/// as long as it likes, and [`Unbounded`](StretchLimit::Unbounded) keeps
/// that behavior. [`Polls`](StretchLimit::Polls) is an extension that gives
/// up after the given number of low SCL reads and reports
/// [`BusError::ClockStretchTimeout`](crate::BusError::ClockStretchTimeout).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StretchLimit {
    /// Wait forever for SCL to be released
    #[default]
    Unbounded,
    /// Give up after this many polls read SCL low
    Polls(u32),
}

/// Board-specific timing calibration data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tuning {
    /// CPU cycles spent by the line driver itself per line change
    pub overhead_cycles: u32,
    /// SCL pulses emitted by the recovery sequence
    pub recovery_clocks: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            overhead_cycles: DEFAULT_OVERHEAD_CYCLES,
            recovery_clocks: DEFAULT_RECOVERY_CLOCKS,
        }
    }
}

/// Configuration of one software I2C bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BusConfig {
    /// Logical pin used as SDA
    pub sda: PinId,
    /// Logical pin used as SCL
    pub scl: PinId,
    /// SCL frequency in Hz (at least [`MIN_SPEED_HZ`](softi2c_hal::i2c::MIN_SPEED_HZ))
    pub speed_hz: u32,
    /// Clock-stretch wait bound
    #[cfg_attr(feature = "serde", serde(default))]
    pub stretch: StretchLimit,
    /// Timing calibration
    #[cfg_attr(feature = "serde", serde(default))]
    pub tuning: Tuning,
}

impl BusConfig {
    /// Create a configuration with default tuning and unbounded stretch wait
    pub fn new(sda: PinId, scl: PinId, speed_hz: u32) -> Self {
        Self {
            sda,
            scl,
            speed_hz,
            stretch: StretchLimit::Unbounded,
            tuning: Tuning::default(),
        }
    }

    pub fn with_stretch_limit(mut self, stretch: StretchLimit) -> Self {
        self.stretch = stretch;
        self
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Same configuration with the speed clamped to the supported minimum
    ///
    /// Speeds below the minimum are not an error; they are raised silently.
    pub fn normalized(mut self) -> Self {
        self.speed_hz = clamp_speed(self.speed_hz);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use softi2c_hal::i2c::{MIN_SPEED_HZ, STANDARD_MODE_HZ};

    #[test]
    fn test_defaults() {
        let config = BusConfig::new(3, 4, STANDARD_MODE_HZ);
        assert_eq!(config.stretch, StretchLimit::Unbounded);
        assert_eq!(config.tuning.overhead_cycles, 130);
        assert_eq!(config.tuning.recovery_clocks, 28);
    }

    #[test]
    fn test_normalized_clamps_low_speed() {
        assert_eq!(BusConfig::new(1, 2, 10).normalized().speed_hz, MIN_SPEED_HZ);
        assert_eq!(BusConfig::new(1, 2, 0).normalized().speed_hz, MIN_SPEED_HZ);
        assert_eq!(
            BusConfig::new(1, 2, STANDARD_MODE_HZ).normalized().speed_hz,
            STANDARD_MODE_HZ
        );
    }

    #[test]
    fn test_builders() {
        let tuning = Tuning {
            overhead_cycles: 60,
            recovery_clocks: 9,
        };
        let config = BusConfig::new(1, 2, 50_000)
            .with_stretch_limit(StretchLimit::Polls(1_000))
            .with_tuning(tuning);
        assert_eq!(config.stretch, StretchLimit::Polls(1_000));
        assert_eq!(config.tuning, tuning);
    }
}
