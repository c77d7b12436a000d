//! Typed Harp register layer for Pico peripherals
//!
//! This crate maps a microcontroller's digital pins, ADC channel and PWM
//! generator onto addressable Harp registers:
//!
//! - Typed value codec (register types, element encoding)
//! - Register contract with check-validate-store-act writes
//! - Concrete registers, one per peripheral behavior
//! - Address-ordered register map and request dispatcher
//! - Register layout configuration and device bring-up
//!
//! Peripherals are reached only through the capability traits in
//! `picoharp-hal`, so simulated peripherals can stand in for hardware.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod config;
pub mod device;
pub mod dispatch;
pub mod map;
pub mod register;
pub mod registers;
pub mod types;

#[cfg(test)]
pub(crate) mod mocks;

pub use device::{Peripherals, PicoDevice};
pub use dispatch::{DispatchError, Dispatcher, Operation, Request, Response};
pub use map::{MapError, RegisterMap};
pub use register::{Access, MemoryRegister, Register, RegisterError, Slot};
pub use types::{Element, RegisterType, Value, Values};
