//! Concrete register variants
//!
//! Each variant wraps one peripheral capability through a shared,
//! non-owning handle (`&RefCell<P>`). Several registers may share one
//! peripheral, e.g. the four PWM registers or the three digital output
//! registers. Execution is single-threaded and non-reentrant, so the
//! `RefCell` borrow inside each operation never overlaps another.

pub mod adc;
pub mod digital;
pub mod pwm;
pub mod stream;

pub use adc::AdcRegister;
pub use digital::{DigitalInputArrayRegister, DigitalOutputArrayRegister, OutputAction};
pub use pwm::{PwmDutyCycleRegister, PwmFrequencyRegister, PwmStartRegister, PwmStopRegister};
pub use stream::AnalogStreamStateRegister;
