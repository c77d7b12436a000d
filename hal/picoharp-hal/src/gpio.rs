//! Digital pin array abstractions
//!
//! Pins are grouped into arrays of up to 8 and addressed by a bitmask,
//! where bit `i` refers to pin `i` of the array.

use crate::PeripheralError;

/// Array of digital input pins
pub trait DigitalInputArray {
    /// Read the current level of every pin as a bitmask
    ///
    /// Takes `&mut self` because pin reads on most HALs require mutable access.
    fn state(&mut self) -> Result<u8, PeripheralError>;
}

/// Array of digital output pins
///
/// Every operation affects only the bits present in `mask`.
pub trait DigitalOutputArray {
    /// Drive the masked pins high
    fn set_state(&mut self, mask: u8) -> Result<(), PeripheralError>;

    /// Drive the masked pins low
    fn clear_state(&mut self, mask: u8) -> Result<(), PeripheralError>;

    /// Invert the masked pins
    fn toggle_state(&mut self, mask: u8) -> Result<(), PeripheralError>;

    /// Drive every pin low
    fn clear_all(&mut self) -> Result<(), PeripheralError> {
        self.clear_state(u8::MAX)
    }
}
