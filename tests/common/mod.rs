//! Shared test infrastructure for debounced-button integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use core::cell::Cell;

use debounced_button::{ConfigurePin, DebouncedInput, MillisClock, PinMode, Timer};
use embedded_hal::digital::v2::InputPin;

// ============================================================================
// Mock Clock
// ============================================================================

/// Millisecond clock with controllable time advancement
pub struct MockClock {
    now: Cell<u32>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(millis: u32) -> Self {
        Self {
            now: Cell::new(millis),
        }
    }

    /// Advance time by the given number of milliseconds, wrapping like a hardware counter
    pub fn advance(&self, millis: u32) {
        self.now.set(self.now.get().wrapping_add(millis));
    }

    pub fn set(&self, millis: u32) {
        self.now.set(millis);
    }
}

impl MillisClock for MockClock {
    fn now_millis(&self) -> u32 {
        self.now.get()
    }
}

// ============================================================================
// Mock Input Line
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinError;

/// The electrical side of a button: its level, configured mode and a fault switch
pub struct Line {
    high: Cell<bool>,
    mode: Cell<Option<PinMode>>,
    faulty: Cell<bool>,
    failing_reads: Cell<bool>,
    reads: Cell<u32>,
}

impl Line {
    pub fn new(high: bool) -> Self {
        Self {
            high: Cell::new(high),
            mode: Cell::new(None),
            faulty: Cell::new(false),
            failing_reads: Cell::new(false),
            reads: Cell::new(0),
        }
    }

    pub fn set_high(&self, high: bool) {
        self.high.set(high);
    }

    pub fn mode(&self) -> Option<PinMode> {
        self.mode.get()
    }

    /// Makes every following pin access fail until switched off again
    pub fn set_faulty(&self, faulty: bool) {
        self.faulty.set(faulty);
    }

    /// Makes only reads fail, mode changes still succeed
    pub fn set_failing_reads(&self, failing: bool) {
        self.failing_reads.set(failing);
    }

    pub fn reads(&self) -> u32 {
        self.reads.get()
    }

    pub fn pin(&self) -> MockPin<'_> {
        MockPin { line: self }
    }
}

/// Pin handle given to the debouncer
pub struct MockPin<'a> {
    line: &'a Line,
}

impl InputPin for MockPin<'_> {
    type Error = PinError;

    fn is_high(&self) -> Result<bool, Self::Error> {
        if self.line.faulty.get() || self.line.failing_reads.get() {
            return Err(PinError);
        }
        self.line.reads.set(self.line.reads.get() + 1);
        Ok(self.line.high.get())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.is_high()?)
    }
}

impl ConfigurePin for MockPin<'_> {
    fn set_mode(&mut self, mode: PinMode) -> Result<(), Self::Error> {
        if self.line.faulty.get() {
            return Err(PinError);
        }
        self.line.mode.set(Some(mode));
        Ok(())
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

pub type Button<'a> = DebouncedInput<MockPin<'a>, Timer<&'a MockClock>>;

/// Button wired to ground with the internal pull-up enabled: idles high, pressed reads low
pub fn pullup_button<'a>(line: &'a Line, clock: &'a MockClock) -> Button<'a> {
    DebouncedInput::new(line.pin(), Timer::new(clock)).unwrap()
}

/// Button with an external pull-down: idles low, pressed reads high
pub fn plain_button<'a>(line: &'a Line, clock: &'a MockClock) -> Button<'a> {
    DebouncedInput::with_pullup(line.pin(), Timer::new(clock), false).unwrap()
}

/// Polls once per millisecond from `from` to `to` (exclusive), driving the line with
/// `level(t)` before each poll. Returns how often `on_pressed()` and `on_released()` fired.
pub fn poll_range(
    button: &mut Button<'_>,
    line: &Line,
    clock: &MockClock,
    from: u32,
    to: u32,
    level: impl Fn(u32) -> bool,
) -> (u32, u32) {
    let mut pressed = 0;
    let mut released = 0;
    for t in from..to {
        clock.set(t);
        line.set_high(level(t));
        if button.on_pressed().unwrap() {
            pressed += 1;
        }
        if button.on_released().unwrap() {
            released += 1;
        }
    }
    (pressed, released)
}
