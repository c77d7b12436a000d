//! ADC sample register

use core::cell::RefCell;

use picoharp_hal::AdcChannel;

use crate::register::{Access, Register, RegisterError, Slot};
use crate::types::{RegisterType, Value, Values};

/// Read-only `U16` register that samples an ADC channel on every read
pub struct AdcRegister<'a, A> {
    slot: Slot<u16, 1>,
    adc: &'a RefCell<A>,
}

impl<'a, A: AdcChannel> AdcRegister<'a, A> {
    /// Bind a register to an ADC channel
    pub fn new(adc: &'a RefCell<A>) -> Self {
        Self {
            slot: Slot::splat(0),
            adc,
        }
    }

    /// Last sample taken
    pub fn last_sample(&self) -> u16 {
        self.slot.value()[0]
    }
}

impl<A: AdcChannel> Register for AdcRegister<'_, A> {
    fn register_type(&self) -> RegisterType {
        RegisterType::U16
    }

    fn len(&self) -> usize {
        1
    }

    fn access(&self) -> Access {
        Access::ReadOnly
    }

    fn read(&mut self, ty: RegisterType) -> Result<Values, RegisterError> {
        self.slot.check_type(ty)?;
        let sample = self.adc.borrow_mut().read_u16()?;
        self.slot.refresh([sample]);
        Ok(self.slot.values())
    }

    fn write(&mut self, _ty: RegisterType, _payload: &[Value]) -> Result<(), RegisterError> {
        Err(RegisterError::ReadOnly)
    }
}
