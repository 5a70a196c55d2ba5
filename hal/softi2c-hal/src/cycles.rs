//! CPU cycle counter abstraction
//!
//! The bus timing is a busy-wait on a free-running counter that increments
//! once per CPU cycle. Keeping the counter behind this trait is what lets
//! the rest of the driver stay architecture independent.

/// Free-running, monotonically increasing CPU cycle counter
pub trait CycleCounter {
    /// Mask of the counter bits that are actually implemented
    ///
    /// A 32-bit counter uses `u32::MAX`; a 24-bit counter (e.g. SysTick)
    /// uses `0x00FF_FFFF` so that elapsed time still wraps correctly.
    const MASK: u32 = u32::MAX;

    /// Current counter value
    fn now(&mut self) -> u32;

    /// Current CPU clock in MHz (cycles per microsecond)
    ///
    /// May change between calls when the CPU clock is scaled at runtime.
    fn cpu_mhz(&self) -> u32;

    /// Cycles between two readings, correct across one counter wraparound
    #[inline]
    fn elapsed(&self, start: u32, now: u32) -> u32 {
        now.wrapping_sub(start) & Self::MASK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter24;

    impl CycleCounter for Counter24 {
        const MASK: u32 = 0x00FF_FFFF;

        fn now(&mut self) -> u32 {
            0
        }

        fn cpu_mhz(&self) -> u32 {
            125
        }
    }

    struct Counter32;

    impl CycleCounter for Counter32 {
        fn now(&mut self) -> u32 {
            0
        }

        fn cpu_mhz(&self) -> u32 {
            80
        }
    }

    #[test]
    fn test_elapsed_across_wrap() {
        let c = Counter32;
        assert_eq!(c.elapsed(u32::MAX - 4, 5), 10);
        assert_eq!(c.elapsed(100, 350), 250);
    }

    #[test]
    fn test_elapsed_masked_counter() {
        let c = Counter24;
        assert_eq!(c.elapsed(0x00FF_FFFE, 0x0000_0003), 5);
        assert_eq!(c.elapsed(10, 20), 10);
    }
}
