//! Analog stream state register

use core::cell::RefCell;

use picoharp_hal::EventGate;

use crate::register::{accept, Register, RegisterError, Slot};
use crate::types::{RegisterType, Value, Values};

/// `U8` register gating the periodic ADC sampling event
///
/// Any value above zero enables the event; zero disables it.
pub struct AnalogStreamStateRegister<'a, G> {
    slot: Slot<u8, 1>,
    gate: &'a RefCell<G>,
}

impl<'a, G: EventGate> AnalogStreamStateRegister<'a, G> {
    /// Bind a register to a sampling event gate
    pub fn new(gate: &'a RefCell<G>) -> Self {
        Self {
            slot: Slot::splat(0),
            gate,
        }
    }
}

impl<G: EventGate> Register for AnalogStreamStateRegister<'_, G> {
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
        let [state] = self.slot.commit(ty, payload, accept)?;

        let mut gate = self.gate.borrow_mut();
        if state > 0 {
            gate.enable();
        } else {
            gate.disable();
        }
        Ok(())
    }
}
