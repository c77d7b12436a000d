//! Pico Harp Hardware Abstraction Layer
//!
//! This crate defines the narrow capability traits that Harp registers
//! call on their backing peripherals. Chip-specific code (or the
//! embedded-hal adapters in `picoharp-drivers`) implements them, and
//! test code substitutes simulated peripherals.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Bus dispatcher (picoharp-core)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  Registers (picoharp-core)              │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  picoharp-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │   picoharp-   │       │ mock / board  │
//! │    drivers    │       │   specific    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalInputArray`], [`gpio::DigitalOutputArray`] - Pin arrays
//! - [`adc::AdcChannel`] - 16-bit analog samples
//! - [`event::EventGate`] - Enable/disable a sampling event
//! - [`pwm::Pwm`] - Frequency/duty-cycle PWM generator

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod error;
pub mod event;
pub mod gpio;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use adc::AdcChannel;
pub use error::PeripheralError;
pub use event::EventGate;
pub use gpio::{DigitalInputArray, DigitalOutputArray};
pub use pwm::{Pwm, PwmClock};
