//! Register address layout
//!
//! Harp reserves addresses below 32 for the common core registers, so
//! application registers start at [`APP_REGISTER_BASE`]. The default
//! layout places the device registers contiguously from there:
//!
//! | Address | Register             | Type |
//! |---------|----------------------|------|
//! | 32      | Digital inputs       | U8   |
//! | 33      | Digital outputs set  | U8   |
//! | 34      | Digital outputs clr  | U8   |
//! | 35      | Digital outputs tgl  | U8   |
//! | 36      | ADC sample           | U16  |
//! | 37      | Analog stream state  | U8   |
//! | 38      | PWM frequency        | U16  |
//! | 39      | PWM duty cycle       | U8   |
//! | 40      | PWM start            | U8   |
//! | 41      | PWM stop             | U8   |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::map::MapError;

/// First address available to application registers
pub const APP_REGISTER_BASE: u8 = 32;

/// Number of registers a device layout assigns
pub const LAYOUT_REGISTER_COUNT: usize = 10;

/// Errors from validating or loading a layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LayoutError {
    /// Address collides with the Harp core register range
    ReservedAddress(u8),
    /// Two registers share an address
    DuplicateAddress(u8),
    /// Register map rejected an entry
    Map(MapError),
    /// Serialization failed
    Serialize,
    /// Deserialization failed
    Deserialize,
}

impl From<MapError> for LayoutError {
    fn from(e: MapError) -> Self {
        LayoutError::Map(e)
    }
}

/// Address of every device register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegisterLayout {
    pub digital_inputs: u8,
    pub digital_outputs_set: u8,
    pub digital_outputs_clear: u8,
    pub digital_outputs_toggle: u8,
    pub adc: u8,
    pub analog_stream: u8,
    pub pwm_frequency: u8,
    pub pwm_duty_cycle: u8,
    pub pwm_start: u8,
    pub pwm_stop: u8,
}

impl Default for RegisterLayout {
    fn default() -> Self {
        Self::contiguous(APP_REGISTER_BASE)
    }
}

impl RegisterLayout {
    /// Place all registers at consecutive addresses from `base`
    ///
    /// Addresses wrap past 255 and are then caught by [`validate`](Self::validate).
    pub const fn contiguous(base: u8) -> Self {
        Self {
            digital_inputs: base,
            digital_outputs_set: base.wrapping_add(1),
            digital_outputs_clear: base.wrapping_add(2),
            digital_outputs_toggle: base.wrapping_add(3),
            adc: base.wrapping_add(4),
            analog_stream: base.wrapping_add(5),
            pwm_frequency: base.wrapping_add(6),
            pwm_duty_cycle: base.wrapping_add(7),
            pwm_start: base.wrapping_add(8),
            pwm_stop: base.wrapping_add(9),
        }
    }

    /// Addresses in declaration order
    pub fn addresses(&self) -> [u8; LAYOUT_REGISTER_COUNT] {
        [
            self.digital_inputs,
            self.digital_outputs_set,
            self.digital_outputs_clear,
            self.digital_outputs_toggle,
            self.adc,
            self.analog_stream,
            self.pwm_frequency,
            self.pwm_duty_cycle,
            self.pwm_start,
            self.pwm_stop,
        ]
    }

    /// Check that every address is unique and outside the core range
    pub fn validate(&self) -> Result<(), LayoutError> {
        let addresses = self.addresses();
        for (i, &address) in addresses.iter().enumerate() {
            if address < APP_REGISTER_BASE {
                return Err(LayoutError::ReservedAddress(address));
            }
            if addresses[..i].contains(&address) {
                return Err(LayoutError::DuplicateAddress(address));
            }
        }
        Ok(())
    }

    /// Serialize into `buf`, returning the number of bytes written
    #[cfg(feature = "serde")]
    pub fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, LayoutError> {
        let used = postcard::to_slice(self, buf).map_err(|_| LayoutError::Serialize)?;
        Ok(used.len())
    }

    /// Deserialize and validate a stored layout
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LayoutError> {
        let layout: Self = postcard::from_bytes(bytes).map_err(|_| LayoutError::Deserialize)?;
        layout.validate()?;
        Ok(layout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = RegisterLayout::default();
        assert_eq!(layout.digital_inputs, 32);
        assert_eq!(layout.adc, 36);
        assert_eq!(layout.pwm_stop, 41);
        assert_eq!(layout.validate(), Ok(()));
    }

    #[test]
    fn test_reserved_address_rejected() {
        let layout = RegisterLayout {
            adc: 5,
            ..Default::default()
        };
        assert_eq!(layout.validate(), Err(LayoutError::ReservedAddress(5)));
    }

    #[test]
    fn test_duplicate_address_rejected() {
        let layout = RegisterLayout {
            pwm_stop: 40,
            ..Default::default()
        };
        assert_eq!(layout.validate(), Err(LayoutError::DuplicateAddress(40)));
    }

    #[test]
    fn test_contiguous_base() {
        let layout = RegisterLayout::contiguous(64);
        assert_eq!(layout.addresses()[0], 64);
        assert_eq!(layout.addresses()[9], 73);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_persisted_layout() {
        let layout = RegisterLayout::contiguous(48);
        let mut buf = [0u8; 32];
        let len = layout.to_bytes(&mut buf).unwrap();
        assert_eq!(RegisterLayout::from_bytes(&buf[..len]), Ok(layout));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_persisted_layout_validated() {
        let layout = RegisterLayout {
            adc: 1,
            ..Default::default()
        };
        let mut buf = [0u8; 32];
        let len = layout.to_bytes(&mut buf).unwrap();
        assert_eq!(
            RegisterLayout::from_bytes(&buf[..len]),
            Err(LayoutError::ReservedAddress(1))
        );
    }
}
