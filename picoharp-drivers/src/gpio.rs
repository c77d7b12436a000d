//! Pin arrays over embedded-hal pins
//!
//! Groups up to 8 pins into a bitmask-addressed array. Bit `i` of every
//! mask refers to `pins[i]`.

use embedded_hal::digital::{InputPin, OutputPin, StatefulOutputPin};
use picoharp_hal::{DigitalInputArray, DigitalOutputArray, PeripheralError};

/// Maximum pins per array (one `u8` mask)
pub const MAX_PINS: usize = 8;

/// Array of digital inputs
pub struct PinInputArray<P, const N: usize> {
    pins: [P; N],
}

impl<P: InputPin, const N: usize> PinInputArray<P, N> {
    const FITS: () = assert!(N <= MAX_PINS, "pin array exceeds 8 pins");

    /// Group `pins` into an array
    pub fn new(pins: [P; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS;
        Self { pins }
    }

    /// Release the pins
    pub fn release(self) -> [P; N] {
        self.pins
    }
}

impl<P: InputPin, const N: usize> DigitalInputArray for PinInputArray<P, N> {
    fn state(&mut self) -> Result<u8, PeripheralError> {
        let mut state = 0u8;
        for (i, pin) in self.pins.iter_mut().enumerate() {
            if pin.is_high().map_err(|_| PeripheralError::Pin)? {
                state |= 1 << i;
            }
        }
        Ok(state)
    }
}

/// Array of digital outputs
pub struct PinOutputArray<P, const N: usize> {
    pins: [P; N],
}

impl<P: StatefulOutputPin, const N: usize> PinOutputArray<P, N> {
    const FITS: () = assert!(N <= MAX_PINS, "pin array exceeds 8 pins");

    /// Group `pins` into an array
    ///
    /// Pin levels are left as they are; the digital output registers
    /// clear the array when they are bound to it.
    pub fn new(pins: [P; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS;
        Self { pins }
    }

    /// Read back the driven level of every pin as a bitmask
    pub fn driven_state(&mut self) -> Result<u8, PeripheralError> {
        let mut state = 0u8;
        for (i, pin) in self.pins.iter_mut().enumerate() {
            if pin.is_set_high().map_err(|_| PeripheralError::Pin)? {
                state |= 1 << i;
            }
        }
        Ok(state)
    }

    /// Release the pins
    pub fn release(self) -> [P; N] {
        self.pins
    }

    fn for_each_masked<F>(&mut self, mask: u8, mut f: F) -> Result<(), PeripheralError>
    where
        F: FnMut(&mut P) -> Result<(), P::Error>,
    {
        for (i, pin) in self.pins.iter_mut().enumerate() {
            if mask & (1 << i) != 0 {
                f(pin).map_err(|_| PeripheralError::Pin)?;
            }
        }
        Ok(())
    }
}

impl<P: StatefulOutputPin, const N: usize> DigitalOutputArray for PinOutputArray<P, N> {
    fn set_state(&mut self, mask: u8) -> Result<(), PeripheralError> {
        self.for_each_masked(mask, |pin| pin.set_high())
    }

    fn clear_state(&mut self, mask: u8) -> Result<(), PeripheralError> {
        self.for_each_masked(mask, |pin| pin.set_low())
    }

    fn toggle_state(&mut self, mask: u8) -> Result<(), PeripheralError> {
        self.for_each_masked(mask, |pin| pin.toggle())
    }
}
