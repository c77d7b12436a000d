//! Peripheral failure reporting

/// Errors a peripheral driver can report back through a register
///
/// Registers never retry or mask these; they propagate to the bus
/// dispatcher unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PeripheralError {
    /// Pin read or write failed
    Pin,
    /// PWM channel rejected a duty cycle update
    Pwm,
    /// ADC conversion failed
    Conversion,
    /// Requested frequency cannot be produced by the clock
    UnsupportedFrequency,
}
