//! Bus instance and line driver
//!
//! [`SoftI2c`] owns everything a bus carries between calls: the line pair,
//! the cycle counter, the configuration, the calibrated half-period delay
//! and the last driven line levels. Every electrical action goes through
//! [`SoftI2c::set_lines`].

use softi2c_hal::{BusPins, CycleCounter, Interrupts, Level, LineState, OpenDrainLines, PinId};

use crate::config::{BusConfig, StretchLimit};
use crate::error::{BusError, ConfigError, ConfigFailure};
use crate::timing::{calibrate, clamp_speed};

/// Software I2C master on one SDA/SCL pair
///
/// Not reentrant: one caller at a time per bus. Callers that share a bus
/// between contexts must serialize whole transactions themselves.
pub struct SoftI2c<L, C> {
    lines: L,
    counter: C,
    config: BusConfig,
    /// Busy-wait cycles per half SCL period
    delay_cycles: u32,
    /// Levels requested by the last `set_lines` call
    state: LineState,
}

impl<L: OpenDrainLines, C: CycleCounter> SoftI2c<L, C> {
    /// Create a bus on lines that are already configured and released
    ///
    /// Does not touch the lines. Call [`init`](Self::init) to run the
    /// recovery sequence, or use [`configure`](Self::configure) to claim,
    /// set up and recover in one go.
    pub fn new(lines: L, counter: C, config: BusConfig) -> Self {
        let mut bus = Self {
            lines,
            counter,
            config: config.normalized(),
            delay_cycles: 0,
            state: LineState::IDLE,
        };
        bus.recalibrate();
        bus
    }

    /// Claim the configured pins and bring the bus up
    ///
    /// Clamps the speed to the supported minimum, claims both pins as
    /// open-drain outputs and releases them high with interrupts masked,
    /// then runs the recovery sequence. The armed speed is available from
    /// [`speed_hz`](Self::speed_hz).
    ///
    /// On failure the counter comes back in the [`ConfigFailure`] and any
    /// claimed pins are returned to `pins`.
    pub fn configure<P, I>(
        pins: &mut P,
        irq: &mut I,
        counter: C,
        config: BusConfig,
    ) -> Result<Self, ConfigFailure<C, P::Error>>
    where
        P: BusPins<Lines = L>,
        I: Interrupts,
    {
        let config = config.normalized();

        let opened = irq.free(|| -> Result<L, P::Error> {
            let mut lines = pins.open(config.sda, config.scl)?;
            lines.drive(LineState::IDLE);
            Ok(lines)
        });
        let lines = match opened {
            Ok(lines) => lines,
            Err(e) => {
                warn!(
                    "soft i2c: cannot claim pins sda={} scl={}",
                    config.sda,
                    config.scl
                );
                return Err(ConfigFailure::new(counter, ConfigError::Pins(e)));
            }
        };

        let mut bus = Self::new(lines, counter, config);
        if let Err(e) = bus.init() {
            warn!("soft i2c: bus recovery failed, releasing pins");
            let (lines, counter) = bus.release();
            irq.free(|| pins.release(lines));
            return Err(ConfigFailure::new(counter, ConfigError::Bus(e)));
        }

        info!(
            "soft i2c: sda={} scl={} at {} Hz ({} delay cycles)",
            bus.config.sda,
            bus.config.scl,
            bus.config.speed_hz,
            bus.delay_cycles
        );

        Ok(bus)
    }

    /// Move the bus to new pins and/or a new speed
    ///
    /// Releases the current pins and configures again. Must not be called
    /// in the middle of a transaction. If the new configuration fails, the
    /// old pins stay released and the counter comes back in the error.
    pub fn reconfigure<P, I>(
        self,
        pins: &mut P,
        irq: &mut I,
        config: BusConfig,
    ) -> Result<Self, ConfigFailure<C, P::Error>>
    where
        P: BusPins<Lines = L>,
        I: Interrupts,
    {
        let (lines, counter) = self.release();
        irq.free(|| pins.release(lines));
        Self::configure(pins, irq, counter, config)
    }

    /// Take the bus apart
    pub fn release(self) -> (L, C) {
        (self.lines, self.counter)
    }

    /// Change the bus speed, returning the speed actually armed
    pub fn set_speed(&mut self, speed_hz: u32) -> u32 {
        self.config.speed_hz = clamp_speed(speed_hz);
        self.recalibrate();
        self.config.speed_hz
    }

    /// Change how long a stretched clock is waited for
    pub fn set_stretch_limit(&mut self, stretch: StretchLimit) {
        self.config.stretch = stretch;
    }

    /// Recompute the half-period delay from the current CPU clock
    ///
    /// The CPU clock may have been scaled since the last calibration. The
    /// delay is capped at half the counter range, so a counter that moves
    /// by more than one count between reads still sees it elapse before
    /// wrapping.
    pub fn recalibrate(&mut self) {
        let delay = calibrate(
            self.config.speed_hz,
            self.counter.cpu_mhz(),
            self.config.tuning.overhead_cycles,
        );
        self.delay_cycles = delay.min(C::MASK / 2);
    }

    pub fn config(&self) -> &BusConfig {
        &self.config
    }

    /// Logical pin used as SDA
    pub fn sda_pin(&self) -> PinId {
        self.config.sda
    }

    /// Logical pin used as SCL
    pub fn scl_pin(&self) -> PinId {
        self.config.scl
    }

    /// Armed SCL frequency in Hz
    pub fn speed_hz(&self) -> u32 {
        self.config.speed_hz
    }

    /// Busy-wait cycles per half SCL period
    pub fn delay_cycles(&self) -> u32 {
        self.delay_cycles
    }

    /// Levels last requested on the bus
    pub fn line_state(&self) -> LineState {
        self.state
    }

    /// Drive both lines, one half clock period after the previous change
    ///
    /// Waits the calibrated delay, applies the (SDA, SCL) pair as one
    /// operation, and when SCL is released blocks until it actually reads
    /// high. A slave stretching the clock holds this call for as long as it
    /// keeps SCL low, unless a [`StretchLimit::Polls`] cap is configured.
    pub fn set_lines(&mut self, sda: Level, scl: Level) -> Result<(), BusError> {
        let state = LineState::new(sda, scl);
        self.state = state;

        self.half_period_wait();
        self.lines.drive(state);

        if scl.is_high() {
            self.wait_scl_released()?;
        }
        Ok(())
    }

    /// Sample the physical SDA line
    pub(crate) fn sample_sda(&mut self) -> Level {
        self.lines.read_sda()
    }

    /// Recovery sequence for a slave stuck mid-transaction
    ///
    /// Toggles SDA while SCL is low, clocks out enough SCL pulses with SDA
    /// released to flush any partially shifted byte, then emits a STOP.
    /// There is no way to tell from the master side whether the slave
    /// recovered; the bus is left idle either way.
    pub fn init(&mut self) -> Result<(), BusError> {
        let clocks = self.config.tuning.recovery_clocks;
        debug!("soft i2c: bus recovery, {} clocks", clocks);

        self.set_lines(Level::High, Level::Low)?;

        // SDA wiggle while SCL is low
        self.set_lines(Level::Low, Level::Low)?;
        self.set_lines(Level::High, Level::Low)?;

        for _ in 0..clocks {
            self.set_lines(Level::High, Level::Low)?;
            self.set_lines(Level::High, Level::High)?;
        }

        self.stop()
    }

    fn half_period_wait(&mut self) {
        let delay = self.delay_cycles;
        if delay == 0 {
            return;
        }

        let start = self.counter.now();
        loop {
            let now = self.counter.now();
            if self.counter.elapsed(start, now) >= delay {
                break;
            }
            core::hint::spin_loop();
        }
    }

    fn wait_scl_released(&mut self) -> Result<(), BusError> {
        let mut polls: u32 = 0;

        while self.lines.read_scl().is_low() {
            polls = polls.saturating_add(1);
            if let StretchLimit::Polls(max) = self.config.stretch {
                if polls > max {
                    warn!("soft i2c: SCL held low for {} polls, giving up", polls);
                    return Err(BusError::ClockStretchTimeout);
                }
            }
            core::hint::spin_loop();
        }
        Ok(())
    }
}
