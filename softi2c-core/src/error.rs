//! Error types
//!
//! A NACK is not an error at this layer; `check_ack` reports it as `false`.

/// Failure of a bus operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BusError {
    /// SCL stayed low longer than the configured
    /// [`StretchLimit`](crate::StretchLimit)
    ///
    /// Never produced with the default unbounded stretch wait.
    ClockStretchTimeout,
}

/// Failure while configuring a bus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError<E> {
    /// The pins could not be claimed
    Pins(E),
    /// The recovery sequence hit a bus error
    Bus(BusError),
}

impl<E> From<BusError> for ConfigError<E> {
    fn from(e: BusError) -> Self {
        ConfigError::Bus(e)
    }
}

/// A failed [`configure`](crate::SoftI2c::configure), with the cycle
/// counter handed back
///
/// Any pins claimed before the failure have already been released.
pub struct ConfigFailure<C, E> {
    counter: C,
    error: ConfigError<E>,
}

impl<C, E> ConfigFailure<C, E> {
    pub(crate) fn new(counter: C, error: ConfigError<E>) -> Self {
        Self { counter, error }
    }

    pub fn error(&self) -> &ConfigError<E> {
        &self.error
    }

    /// Drop the counter and keep the cause
    pub fn into_error(self) -> ConfigError<E> {
        self.error
    }

    pub fn into_parts(self) -> (C, ConfigError<E>) {
        (self.counter, self.error)
    }
}

impl<C, E: core::fmt::Debug> core::fmt::Debug for ConfigFailure<C, E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ConfigFailure")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "defmt")]
impl<C, E: defmt::Format> defmt::Format for ConfigFailure<C, E> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ConfigFailure({})", self.error)
    }
}
