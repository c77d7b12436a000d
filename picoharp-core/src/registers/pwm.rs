//! PWM registers
//!
//! Four registers share one PWM peripheral:
//!
//! | Register   | Type | Effect on write                               |
//! |------------|------|-----------------------------------------------|
//! | Frequency  | U16  | stage frequency (>= `Pwm::MIN_FREQUENCY`)     |
//! | Duty cycle | U8   | stage duty cycle (`MIN_DUTY_CYCLE..=100`)     |
//! | Start      | U8   | always start, restarting if already running   |
//! | Stop       | U8   | stop if running, otherwise only store         |
//!
//! Staged frequency and duty cycle take effect on the next start, so a
//! running output is reconfigured by writing the new values and then
//! writing the start register again.

use core::cell::RefCell;

use picoharp_hal::Pwm;

use crate::register::{accept, Register, RegisterError, Slot};
use crate::types::{RegisterType, Value, Values};

/// Highest accepted duty cycle (%)
pub const MAX_DUTY_CYCLE: u8 = 100;

/// `U16` register staging the PWM frequency in Hz
pub struct PwmFrequencyRegister<'a, P> {
    slot: Slot<u16, 1>,
    pwm: &'a RefCell<P>,
}

impl<'a, P: Pwm> PwmFrequencyRegister<'a, P> {
    /// Bind a register to a PWM, starting at the minimum frequency
    pub fn new(pwm: &'a RefCell<P>) -> Self {
        Self {
            slot: Slot::splat(P::MIN_FREQUENCY),
            pwm,
        }
    }

    fn validate([hz]: &[u16; 1]) -> Result<(), RegisterError> {
        if *hz < P::MIN_FREQUENCY {
            return Err(RegisterError::InvalidValue);
        }
        Ok(())
    }
}

impl<P: Pwm> Register for PwmFrequencyRegister<'_, P> {
    fn register_type(&self) -> RegisterType {
        RegisterType::U16
    }

    fn len(&self) -> usize {
        1
    }

    fn read(&mut self, ty: RegisterType) -> Result<Values, RegisterError> {
        self.slot.read(ty)
    }

    fn write(&mut self, ty: RegisterType, payload: &[Value]) -> Result<(), RegisterError> {
        let [hz] = self.slot.commit(ty, payload, Self::validate)?;
        self.pwm.borrow_mut().set_frequency(hz);
        Ok(())
    }
}

/// `U8` register staging the PWM duty cycle in percent
pub struct PwmDutyCycleRegister<'a, P> {
    slot: Slot<u8, 1>,
    pwm: &'a RefCell<P>,
}

impl<'a, P: Pwm> PwmDutyCycleRegister<'a, P> {
    /// Bind a register to a PWM
    ///
    /// The register is created at the minimum duty cycle and then written
    /// to 0 %, which is also pushed to the peripheral. Fails if the
    /// peripheral's minimum duty cycle excludes 0 %.
    pub fn new(pwm: &'a RefCell<P>) -> Result<Self, RegisterError> {
        let mut reg = Self {
            slot: Slot::splat(P::MIN_DUTY_CYCLE),
            pwm,
        };
        reg.write(RegisterType::U8, &[Value::U8(0)])?;
        Ok(reg)
    }

    fn validate([percent]: &[u8; 1]) -> Result<(), RegisterError> {
        if *percent > MAX_DUTY_CYCLE || *percent < P::MIN_DUTY_CYCLE {
            return Err(RegisterError::InvalidValue);
        }
        Ok(())
    }
}

impl<P: Pwm> Register for PwmDutyCycleRegister<'_, P> {
    fn register_type(&self) -> RegisterType {
        RegisterType::U8
    }

    fn len(&self) -> usize {
        1
    }

    fn read(&mut self, ty: RegisterType) -> Result<Values, RegisterError> {
        self.slot.read(ty)
    }

    fn write(&mut self, ty: RegisterType, payload: &[Value]) -> Result<(), RegisterError> {
        let [percent] = self.slot.commit(ty, payload, Self::validate)?;
        self.pwm.borrow_mut().set_dutycyle(percent);
        Ok(())
    }
}

/// `U8` register that starts the PWM output on every write
///
/// Starting a running output restarts it with the staged configuration.
pub struct PwmStartRegister<'a, P> {
    slot: Slot<u8, 1>,
    pwm: &'a RefCell<P>,
}

impl<'a, P: Pwm> PwmStartRegister<'a, P> {
    /// Bind a register to a PWM
    pub fn new(pwm: &'a RefCell<P>) -> Self {
        Self {
            slot: Slot::splat(0),
            pwm,
        }
    }
}

impl<P: Pwm> Register for PwmStartRegister<'_, P> {
    fn register_type(&self) -> RegisterType {
        RegisterType::U8
    }

    fn len(&self) -> usize {
        1
    }

    fn read(&mut self, ty: RegisterType) -> Result<Values, RegisterError> {
        self.slot.read(ty)
    }

    fn write(&mut self, ty: RegisterType, payload: &[Value]) -> Result<(), RegisterError> {
        self.slot.commit(ty, payload, accept)?;
        self.pwm.borrow_mut().start()?;
        Ok(())
    }
}

/// `U8` register that stops the PWM output if it is running
pub struct PwmStopRegister<'a, P> {
    slot: Slot<u8, 1>,
    pwm: &'a RefCell<P>,
}

impl<'a, P: Pwm> PwmStopRegister<'a, P> {
    /// Bind a register to a PWM
    pub fn new(pwm: &'a RefCell<P>) -> Self {
        Self {
            slot: Slot::splat(0),
            pwm,
        }
    }
}

impl<P: Pwm> Register for PwmStopRegister<'_, P> {
    fn register_type(&self) -> RegisterType {
        RegisterType::U8
    }

    fn len(&self) -> usize {
        1
    }

    fn read(&mut self, ty: RegisterType) -> Result<Values, RegisterError> {
        self.slot.read(ty)
    }

    fn write(&mut self, ty: RegisterType, payload: &[Value]) -> Result<(), RegisterError> {
        self.slot.commit(ty, payload, accept)?;

        let mut pwm = self.pwm.borrow_mut();
        if pwm.is_enabled() {
            pwm.stop()?;
        }
        Ok(())
    }
}
