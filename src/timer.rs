//! Millisecond timers.
//!
//! The debouncer only ever asks "has the timeout elapsed since the last restart?", which is
//! what [`ElapsedTimer`] models. [`Timer`] implements it on top of any free-running
//! millisecond counter.

/// A restartable timer with a fixed timeout.
pub trait ElapsedTimer {
    /// Starts measuring from now.
    fn restart(&mut self);

    /// Changes the timeout. The start point is kept.
    fn set_timeout(&mut self, millis: u32);

    /// The current timeout in milliseconds.
    fn timeout(&self) -> u32;

    /// Whether at least `timeout()` milliseconds passed since the last restart.
    fn is_expired(&self) -> bool;
}

/// A free-running millisecond counter, allowed to wrap around.
pub trait MillisClock {
    /// Milliseconds since some arbitrary, fixed point in the past.
    fn now_millis(&self) -> u32;
}

impl<C: MillisClock + ?Sized> MillisClock for &C {
    fn now_millis(&self) -> u32 {
        (**self).now_millis()
    }
}

/// [`ElapsedTimer`] driven by a [`MillisClock`].
///
/// Elapsed time is computed with wrapping arithmetic, so a counter overflow between
/// `restart()` and `is_expired()` is harmless as long as less than `u32::MAX` ms passed.
pub struct Timer<C> {
    clock: C,
    started_at: u32,
    timeout: u32,
}

impl<C: MillisClock> Timer<C> {
    /// Creates a timer started now, with a zero timeout.
    pub fn new(clock: C) -> Self {
        let started_at = clock.now_millis();
        Self {
            clock,
            started_at,
            timeout: 0,
        }
    }

    /// Milliseconds since the last restart.
    pub fn elapsed(&self) -> u32 {
        self.clock.now_millis().wrapping_sub(self.started_at)
    }

    /// Releases the clock.
    pub fn free(self) -> C {
        self.clock
    }
}

impl<C: MillisClock> ElapsedTimer for Timer<C> {
    fn restart(&mut self) {
        self.started_at = self.clock.now_millis();
    }

    fn set_timeout(&mut self, millis: u32) {
        self.timeout = millis;
    }

    fn timeout(&self) -> u32 {
        self.timeout
    }

    fn is_expired(&self) -> bool {
        self.elapsed() >= self.timeout
    }
}
