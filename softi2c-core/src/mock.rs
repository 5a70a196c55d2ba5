//! Simulated bus for host tests
//!
//! One shared [`Wire`] stands in for the two physical lines, the slave on
//! the other end, and the CPU cycle counter. Every counter read advances
//! the simulated clock by one cycle, so busy-waits terminate.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use softi2c_hal::{BusPins, CycleCounter, Interrupts, Level, LineState, OpenDrainLines, PinId};

use crate::bus::SoftI2c;
use crate::config::BusConfig;

pub type SharedWire = Rc<RefCell<Wire>>;

/// Line levels, slave behavior and simulated time
pub struct Wire {
    /// Levels the master currently drives
    pub driven: LineState,
    /// Every state the master drove, in order
    pub history: Vec<LineState>,
    /// SCL reads that still return low after the master released it
    pub stretch_polls: u32,
    /// Simulated cycles each stretched SCL read costs
    pub stretch_cost: u32,
    /// Total SCL reads
    pub scl_polls: u32,
    /// Levels the slave puts on SDA for the next samples
    pub sda_script: VecDeque<Level>,
    /// Simulated cycle counter
    pub clock: u32,
    pub cpu_mhz: u32,
}

impl Wire {
    pub fn shared(cpu_mhz: u32) -> SharedWire {
        Rc::new(RefCell::new(Wire {
            driven: LineState::IDLE,
            history: Vec::new(),
            stretch_polls: 0,
            stretch_cost: 0,
            scl_polls: 0,
            sda_script: VecDeque::new(),
            clock: 0,
            cpu_mhz,
        }))
    }

    /// Queue the levels the slave drives on the next SDA samples
    pub fn script_sda(&mut self, levels: &[Level]) {
        self.sda_script.extend(levels.iter().copied());
    }

    /// SDA level at each SCL rise in the recorded history
    pub fn sda_at_rising_edges(&self) -> Vec<Level> {
        self.history
            .windows(2)
            .filter(|w| w[0].scl.is_low() && w[1].scl.is_high())
            .map(|w| w[1].sda)
            .collect()
    }

    pub fn rising_scl_edges(&self) -> usize {
        self.history
            .windows(2)
            .filter(|w| w[0].scl.is_low() && w[1].scl.is_high())
            .count()
    }

    /// Wired-AND SDA level without consuming the script
    pub fn sda_level(&self) -> Level {
        if self.driven.sda.is_low() {
            Level::Low
        } else {
            self.sda_script.front().copied().unwrap_or(Level::High)
        }
    }

    /// Wired-AND SCL level without consuming a stretch poll
    pub fn scl_level(&self) -> Level {
        if self.driven.scl.is_low() || self.stretch_polls > 0 {
            Level::Low
        } else {
            Level::High
        }
    }
}

pub struct MockLines {
    wire: SharedWire,
}

impl MockLines {
    pub fn new(wire: SharedWire) -> Self {
        Self { wire }
    }
}

impl OpenDrainLines for MockLines {
    fn drive(&mut self, state: LineState) {
        let mut w = self.wire.borrow_mut();
        w.driven = state;
        w.history.push(state);
    }

    fn read_sda(&mut self) -> Level {
        let mut w = self.wire.borrow_mut();
        if w.driven.sda.is_low() {
            return Level::Low;
        }
        w.sda_script.pop_front().unwrap_or(Level::High)
    }

    fn read_scl(&mut self) -> Level {
        let mut w = self.wire.borrow_mut();
        w.scl_polls += 1;
        if w.driven.scl.is_low() {
            return Level::Low;
        }
        if w.stretch_polls > 0 {
            w.stretch_polls -= 1;
            w.clock = w.clock.wrapping_add(w.stretch_cost);
            return Level::Low;
        }
        Level::High
    }
}

pub struct MockCounter {
    wire: SharedWire,
}

impl MockCounter {
    pub fn new(wire: SharedWire) -> Self {
        Self { wire }
    }
}

impl CycleCounter for MockCounter {
    fn now(&mut self) -> u32 {
        let mut w = self.wire.borrow_mut();
        let now = w.clock;
        w.clock = w.clock.wrapping_add(1);
        now
    }

    fn cpu_mhz(&self) -> u32 {
        self.wire.borrow().cpu_mhz
    }
}

/// 24-bit counter, like SysTick
pub struct NarrowCounter {
    inner: MockCounter,
}

impl NarrowCounter {
    pub fn new(wire: SharedWire) -> Self {
        Self {
            inner: MockCounter::new(wire),
        }
    }
}

impl CycleCounter for NarrowCounter {
    const MASK: u32 = 0x00FF_FFFF;

    fn now(&mut self) -> u32 {
        self.inner.now() & Self::MASK
    }

    fn cpu_mhz(&self) -> u32 {
        self.inner.cpu_mhz()
    }
}

/// 24-bit counter that moves `step` counts between reads
pub struct SteppingCounter {
    wire: SharedWire,
    step: u32,
}

impl SteppingCounter {
    pub fn new(wire: SharedWire, step: u32) -> Self {
        Self { wire, step }
    }
}

impl CycleCounter for SteppingCounter {
    const MASK: u32 = 0x00FF_FFFF;

    fn now(&mut self) -> u32 {
        let mut w = self.wire.borrow_mut();
        let now = w.clock & Self::MASK;
        w.clock = w.clock.wrapping_add(self.step);
        now
    }

    fn cpu_mhz(&self) -> u32 {
        self.wire.borrow().cpu_mhz
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

/// Pin source handing out [`MockLines`] on the shared wire
pub struct MockPins {
    wire: SharedWire,
    pub opened: Option<(PinId, PinId)>,
    pub released: u32,
    pub fail: bool,
}

impl MockPins {
    pub fn new(wire: SharedWire) -> Self {
        Self {
            wire,
            opened: None,
            released: 0,
            fail: false,
        }
    }
}

impl BusPins for MockPins {
    type Lines = MockLines;
    type Error = MockPinError;

    fn open(&mut self, sda: PinId, scl: PinId) -> Result<MockLines, MockPinError> {
        if self.fail {
            return Err(MockPinError);
        }
        self.opened = Some((sda, scl));
        Ok(MockLines::new(self.wire.clone()))
    }

    fn release(&mut self, _lines: MockLines) {
        self.released += 1;
    }
}

pub struct MockIrq {
    pub enabled: bool,
    pub disabled: u32,
}

impl Default for MockIrq {
    fn default() -> Self {
        Self {
            enabled: true,
            disabled: 0,
        }
    }
}

impl Interrupts for MockIrq {
    fn disable(&mut self) {
        self.enabled = false;
        self.disabled += 1;
    }

    fn enable(&mut self) {
        self.enabled = true;
    }
}

/// Bus on a fresh wire, lines idle, nothing driven yet
pub fn bus(config: BusConfig, cpu_mhz: u32) -> (SoftI2c<MockLines, MockCounter>, SharedWire) {
    let wire = Wire::shared(cpu_mhz);
    let bus = SoftI2c::new(
        MockLines::new(wire.clone()),
        MockCounter::new(wire.clone()),
        config,
    );
    (bus, wire)
}
