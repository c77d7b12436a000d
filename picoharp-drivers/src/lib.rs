//! Peripheral implementations for Pico Harp registers
//!
//! This crate implements the capability traits from `picoharp-hal` on top
//! of embedded-hal 1.0 so any board HAL can back the registers:
//!
//! - Digital pin arrays (input mirror, set/clear/toggle outputs)
//! - PWM output with staged frequency and duty cycle
//! - Atomic gate for the ADC sampling stream

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod gpio;
pub mod pwm;
pub mod stream;

pub use gpio::{PinInputArray, PinOutputArray};
pub use pwm::{slice_config, PwmChannel, SliceConfig};
pub use stream::StreamGate;
