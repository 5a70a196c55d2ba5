//! Interrupt masking on Cortex-M

use softi2c_hal::Interrupts;

/// Global interrupt control via PRIMASK
#[derive(Debug, Clone, Copy, Default)]
pub struct CortexMInterrupts;

impl Interrupts for CortexMInterrupts {
    fn disable(&mut self) {
        cortex_m::interrupt::disable();
    }

    fn enable(&mut self) {
        // SAFETY: only called to end a section opened by `disable`, outside
        // any critical section relying on interrupts staying masked.
        unsafe { cortex_m::interrupt::enable() }
    }

    /// Restores the previous PRIMASK state, so this nests
    fn free<R>(&mut self, f: impl FnOnce() -> R) -> R {
        cortex_m::interrupt::free(|_| f())
    }
}
