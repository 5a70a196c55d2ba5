//! SysTick cycle counter
//!
//! SysTick is a 24-bit down counter. Clocked from the core with the largest
//! reload value it free-runs with a period of 2^24 cycles, and counting the
//! distance from the reload value turns it into an up counter.

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m::peripheral::SYST;
use softi2c_hal::CycleCounter;

/// Largest SysTick reload value
const RELOAD_MAX: u32 = 0x00FF_FFFF;

/// SysTick free-running at the core clock
pub struct SysTickCounter {
    syst: SYST,
}

impl SysTickCounter {
    /// Take over SysTick as a free-running counter
    ///
    /// SysTick must not be in use as a time base elsewhere (the embassy-rp
    /// time driver uses the TIMER peripheral, not SysTick).
    pub fn new(mut syst: SYST) -> Self {
        syst.disable_interrupt();
        syst.set_clock_source(SystClkSource::Core);
        syst.set_reload(RELOAD_MAX);
        syst.clear_current();
        syst.enable_counter();
        Self { syst }
    }

    /// Stop the counter and give SysTick back
    pub fn free(mut self) -> SYST {
        self.syst.disable_counter();
        self.syst
    }
}

impl CycleCounter for SysTickCounter {
    const MASK: u32 = RELOAD_MAX;

    #[inline(always)]
    fn now(&mut self) -> u32 {
        RELOAD_MAX - SYST::get_current()
    }

    fn cpu_mhz(&self) -> u32 {
        embassy_rp::clocks::clk_sys_freq() / 1_000_000
    }
}
