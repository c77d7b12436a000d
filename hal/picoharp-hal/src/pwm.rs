//! PWM generator abstraction
//!
//! Frequency and duty cycle are staged configuration. They take effect on
//! the next call to [`Pwm::start`], which may be issued while the output
//! is already running to apply new settings.

use crate::PeripheralError;

/// PWM signal generator
pub trait Pwm {
    /// Lowest frequency (Hz) the generator can produce
    const MIN_FREQUENCY: u16;

    /// Lowest accepted duty cycle (%)
    const MIN_DUTY_CYCLE: u8 = 0;

    /// Stage a new output frequency in Hz
    fn set_frequency(&mut self, hz: u16);

    /// Currently staged frequency in Hz
    fn frequency(&self) -> u16;

    /// Stage a new duty cycle in percent (0-100)
    ///
    /// The spelling follows the peripheral's own attribute name.
    fn set_dutycyle(&mut self, percent: u8);

    /// Currently staged duty cycle in percent
    fn dutycyle(&self) -> u8;

    /// Check if the output is currently running
    fn is_enabled(&self) -> bool;

    /// Apply the staged configuration and run the output
    ///
    /// Restarts the output if it is already running.
    fn start(&mut self) -> Result<(), PeripheralError>;

    /// Stop the output (drive it fully off)
    fn stop(&mut self) -> Result<(), PeripheralError>;
}

/// Clock source that sets the PWM slice period
pub trait PwmClock {
    /// Reprogram the period for the given frequency in Hz
    fn set_frequency_hz(&mut self, hz: u32) -> Result<(), PeripheralError>;
}
