//! Debounces a button or switch on an `InputPin` and reports press/release levels and edges.
//!
//! # Implementation
//!
//! There is no background work. Every query samples the pin once and drives the
//! debouncer forward, so the queries have to be polled regularly, at best every 1 ms and
//! at least once per debounce window.
//!
//! A changed raw level is accepted only after it held for the whole debounce window
//! (10 ms by default). Bounces shorter than the window never show up in the debounced
//! state.
//!
//! Edge queries (`on_pressed()`, `on_released()`) return `true` on exactly one poll per
//! debounced transition, no matter how often they are polled in between.
//!
//! # Example
//!
//! ## Level
//!
//! ```rust,ignore
//! use debounced_button::{DebouncedInput, Timer};
//!
//! // Pin and clock are up to the embedded_hal you are using.
//! let pin = hal_function_which_returns_configurable_pin();
//! let timer = Timer::new(hal_function_which_returns_millis_clock());
//!
//! // Pull-up enabled, pressed means low.
//! let mut button = DebouncedInput::new(pin, timer)?;
//! loop {
//!     if button.is_pressed()? {
//!         // Do something with it
//!     }
//!     // Also hardware specific
//!     wait(1.ms());
//! }
//! ```
//!
//! ## Edges
//!
//! ```rust,ignore
//! use debounced_button::{DebouncedInput, Preconfigured, Timer};
//!
//! // The pin was already put into input mode by a type-state HAL, the button is
//! // externally pulled down and reads high when pressed.
//! let pin = Preconfigured::new(hal_function_which_returns_input_pin());
//! let mut button = DebouncedInput::with_pullup(pin, Timer::new(clock), false)?;
//! button.set_debounce_timeout(20);
//!
//! loop {
//!     if button.on_pressed()? {
//!         // Runs once per press
//!     }
//!     if button.on_released()? {
//!         // Runs once per release
//!     }
//! }
//! ```

#![no_std]

#[macro_use]
mod fmt;

pub mod pin;
pub mod timer;

pub use crate::pin::{ConfigurePin, PinMode, Preconfigured};
pub use crate::timer::{ElapsedTimer, MillisClock, Timer};

use embedded_hal::digital::v2::InputPin;

/// Debounce window used until `set_debounce_timeout()` is called.
pub const DEFAULT_DEBOUNCE_TIMEOUT_MS: u32 = 10;

/// Commonly used traits and types.
pub mod prelude {
    pub use crate::pin::ConfigurePin as _;
    pub use crate::timer::{ElapsedTimer as _, MillisClock as _};
    pub use crate::{DebouncedInput, PinMode, Preconfigured, Timer};
    pub use embedded_hal::digital::v2::InputPin as _;
}

/// A debounced button.
///
/// Owns its pin and timer, so any number of instances can be polled side by side.
pub struct DebouncedInput<P, T> {
    pin: P,
    timer: T,

    /// Whether a low level means pressed.
    invert: bool,

    /// The accepted raw level.
    debounced_state: bool,

    /// The most recent raw sample. The timer runs from the moment it last changed.
    last_raw_state: bool,

    /// A press edge was reported and no release was accepted since.
    has_been_pressed: bool,

    /// A release edge was reported and no press was accepted since.
    has_been_released: bool,
}

impl<P: ConfigurePin, T: ElapsedTimer> DebouncedInput<P, T> {
    /// Initializes a button with the internal pull-up enabled.
    ///
    /// The reading is inverted, since a pulled-up button reads low when pressed.
    pub fn new(pin: P, timer: T) -> Result<Self, P::Error> {
        Self::with_pullup(pin, timer, true)
    }

    /// Initializes a button, enabling the internal pull-up only if `enable_pullup` is set.
    ///
    /// Without the pull-up the pin is a plain input and is expected to read high when pressed.
    pub fn with_pullup(pin: P, timer: T, enable_pullup: bool) -> Result<Self, P::Error> {
        let mut input = Self {
            pin,
            timer,
            invert: false,
            debounced_state: false,
            last_raw_state: false,
            has_been_pressed: false,
            has_been_released: false,
        };
        input.timer.set_timeout(DEFAULT_DEBOUNCE_TIMEOUT_MS);

        if enable_pullup {
            input.input_pullup()?;
        } else {
            input.disable_input_pullup()?;
        }
        Ok(input)
    }

    /// Enables the internal pull-up and inverts the reading.
    ///
    /// The debounced state is reseeded from the pin, no edge is reported for it.
    pub fn input_pullup(&mut self) -> Result<(), P::Error> {
        self.configure(PinMode::PullUp, true)
    }

    /// Switches to a plain input and reads non-inverted.
    ///
    /// The debounced state is reseeded from the pin, no edge is reported for it.
    pub fn disable_input_pullup(&mut self) -> Result<(), P::Error> {
        self.configure(PinMode::Floating, false)
    }

    /// Changes the debounce window.
    ///
    /// A debounce interval in progress keeps its start point.
    pub fn set_debounce_timeout(&mut self, millis: u32) {
        self.timer.set_timeout(millis);
    }

    /// The debounce window in milliseconds.
    pub fn debounce_timeout(&self) -> u32 {
        self.timer.timeout()
    }

    /// Toggles which level counts as pressed.
    ///
    /// The debounced level is only reinterpreted: the timer keeps running and the
    /// toggle itself never fires `on_pressed()` or `on_released()`.
    ///
    /// The reinterpreted level counts as already reported, so an edge that was accepted
    /// but not yet polled before the toggle is dropped.
    pub fn invert_reading(&mut self) {
        self.invert = !self.invert;
        self.latch_current_level();
    }

    /// Makes high mean pressed again.
    ///
    /// Does nothing if the reading is not inverted. Otherwise behaves like `invert_reading()`.
    pub fn reset_reading(&mut self) {
        if !self.invert {
            return;
        }
        self.invert = false;
        self.latch_current_level();
    }

    /// Whether low means pressed.
    pub fn is_inverted(&self) -> bool {
        self.invert
    }

    /// Whether the button is pressed.
    pub fn is_pressed(&mut self) -> Result<bool, P::Error> {
        self.update()?;
        Ok(self.pressed_level())
    }

    /// Whether the button is released. Always the opposite of `is_pressed()`.
    pub fn is_released(&mut self) -> Result<bool, P::Error> {
        Ok(!self.is_pressed()?)
    }

    /// Returns `true` once per press.
    pub fn on_pressed(&mut self) -> Result<bool, P::Error> {
        if !self.is_pressed()? || self.has_been_pressed {
            return Ok(false);
        }
        self.has_been_pressed = true;
        Ok(true)
    }

    /// Returns `true` once per release.
    pub fn on_released(&mut self) -> Result<bool, P::Error> {
        if !self.is_released()? || self.has_been_released {
            return Ok(false);
        }
        self.has_been_released = true;
        Ok(true)
    }

    /// Releases the pin and the timer.
    pub fn free(self) -> (P, T) {
        (self.pin, self.timer)
    }

    fn configure(&mut self, mode: PinMode, invert: bool) -> Result<(), P::Error> {
        self.pin.set_mode(mode)?;
        let raw = self.pin.is_high()?;

        self.invert = invert;
        debug!("pin mode {}, inverted: {}", mode, invert);
        self.debounced_state = raw;
        self.last_raw_state = raw;
        self.timer.restart();
        self.latch_current_level();
        Ok(())
    }

    /// Samples the pin and accepts a raw level once it held for the debounce window.
    fn update(&mut self) -> Result<(), P::Error> {
        let raw = self.pin.is_high()?;
        if raw != self.last_raw_state {
            self.last_raw_state = raw;
            self.timer.restart();
        }

        if self.last_raw_state == self.debounced_state || !self.timer.is_expired() {
            return Ok(());
        }

        self.debounced_state = self.last_raw_state;
        if self.pressed_level() {
            self.has_been_released = false;
        } else {
            self.has_been_pressed = false;
        }
        trace!("debounced level changed, pressed: {}", self.pressed_level());
        Ok(())
    }

    fn pressed_level(&self) -> bool {
        self.debounced_state != self.invert
    }

    /// Marks the current level as already reported.
    fn latch_current_level(&mut self) {
        let pressed = self.pressed_level();
        self.has_been_pressed = pressed;
        self.has_been_released = !pressed;
    }
}

/// Reports the debounced electrical level, regardless of the polarity setting.
///
/// Does not sample the pin, the state only advances through the query methods.
impl<P: ConfigurePin, T: ElapsedTimer> InputPin for DebouncedInput<P, T> {
    type Error = P::Error;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.debounced_state)
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.debounced_state)
    }
}
