//! Pin mode configuration on top of `embedded_hal`'s `InputPin`.

use embedded_hal::digital::v2::InputPin;

/// Electrical mode of the input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Input with the internal pull-up enabled. The line idles high and reads low when pressed.
    PullUp,
    /// Plain input. The external circuit decides the idle level.
    Floating,
}

/// An input pin whose mode can be switched at runtime.
pub trait ConfigurePin: InputPin {
    /// Puts the pin into `mode`.
    fn set_mode(&mut self, mode: PinMode) -> Result<(), Self::Error>;
}

/// Wraps a pin whose mode is already fixed, e.g. by a type-state HAL.
///
/// `set_mode` is accepted and ignored, reads are forwarded to the wrapped pin.
pub struct Preconfigured<P> {
    pin: P,
}

impl<P: InputPin> Preconfigured<P> {
    /// Wraps `pin`.
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Returns the wrapped pin.
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: InputPin> InputPin for Preconfigured<P> {
    type Error = P::Error;

    fn is_high(&self) -> Result<bool, Self::Error> {
        self.pin.is_high()
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        self.pin.is_low()
    }
}

impl<P: InputPin> ConfigurePin for Preconfigured<P> {
    fn set_mode(&mut self, _mode: PinMode) -> Result<(), Self::Error> {
        Ok(())
    }
}
