//! Analog-to-digital converter abstraction

use crate::PeripheralError;

/// A single ADC channel producing 16-bit samples
pub trait AdcChannel {
    /// Sample the channel synchronously
    ///
    /// Samples are scaled to the full `0..=65535` range regardless of the
    /// converter's native resolution.
    fn read_u16(&mut self) -> Result<u16, PeripheralError>;
}
