//! Interrupt control abstraction
//!
//! Pin reconfiguration must not interleave with other GPIO users, so the
//! driver masks interrupts around it.

/// Global interrupt enable/disable
pub trait Interrupts {
    /// Disable interrupts
    fn disable(&mut self);

    /// Enable interrupts
    fn enable(&mut self);

    /// Run `f` with interrupts disabled
    ///
    /// Implementations that can restore the previous interrupt state
    /// should override this.
    fn free<R>(&mut self, f: impl FnOnce() -> R) -> R {
        self.disable();
        let r = f();
        self.enable();
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        enabled: bool,
        transitions: u8,
    }

    impl Interrupts for Recorder {
        fn disable(&mut self) {
            self.enabled = false;
            self.transitions += 1;
        }

        fn enable(&mut self) {
            self.enabled = true;
            self.transitions += 1;
        }
    }

    #[test]
    fn test_free_masks_around_closure() {
        let mut irq = Recorder {
            enabled: true,
            transitions: 0,
        };
        let seen = irq.free(|| 42);
        assert_eq!(seen, 42);
        assert!(irq.enabled);
        assert_eq!(irq.transitions, 2);
    }
}
