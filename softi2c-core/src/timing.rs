//! Bus timing calibration
//!
//! Converts a requested SCL frequency into the number of CPU cycles the line
//! driver busy-waits before each line change (one half clock period).

use softi2c_hal::i2c::MIN_SPEED_HZ;

/// Cycles the toggle code path itself costs per line change
///
/// Empirically measured on the reference board; boards with a different
/// GPIO access cost override it through [`Tuning`](crate::Tuning).
pub const DEFAULT_OVERHEAD_CYCLES: u32 = 130;

/// SCL pulses clocked out by the recovery sequence
///
/// Empirically tuned; enough to flush a slave stuck anywhere inside a byte
/// plus its acknowledge bit, several times over.
pub const DEFAULT_RECOVERY_CLOCKS: u8 = 28;

/// Half a second in microseconds: `cpu_mhz * HALF_SECOND_US / speed_hz`
/// is the CPU cycle count of one half SCL period.
const HALF_SECOND_US: u64 = 500_000;

/// Clamp a requested bus speed to the supported minimum
#[inline]
pub const fn clamp_speed(speed_hz: u32) -> u32 {
    if speed_hz < MIN_SPEED_HZ {
        MIN_SPEED_HZ
    } else {
        speed_hz
    }
}

/// Busy-wait cycles per half SCL period
///
/// `cpu_mhz * 500_000 / speed_hz - overhead_cycles`, saturating at zero.
/// A result of zero means the requested speed is faster than the toggle code
/// can run, and the bus simply runs as fast as it can.
///
/// Speeds below [`MIN_SPEED_HZ`] are treated as [`MIN_SPEED_HZ`].
pub const fn calibrate(speed_hz: u32, cpu_mhz: u32, overhead_cycles: u32) -> u32 {
    let speed = clamp_speed(speed_hz) as u64;
    let half_period = cpu_mhz as u64 * HALF_SECOND_US / speed;
    let delay = half_period.saturating_sub(overhead_cycles as u64);

    if delay > u32::MAX as u64 {
        u32::MAX
    } else {
        delay as u32
    }
}
