//! Digital pin array registers
//!
//! One read register mirrors the input array. Three write registers drive
//! the output array by bitmask: set, clear and toggle. All are `U8` with a
//! single element.

use core::cell::RefCell;

use picoharp_hal::{DigitalInputArray, DigitalOutputArray, PeripheralError};

use crate::register::{accept, Register, RegisterError, Slot};
use crate::types::{RegisterType, Value, Values};

/// Mirror of a digital input array
///
/// Reads sample the pins live and refresh the cached value. Writes are
/// accepted for protocol uniformity but only update the cache.
pub struct DigitalInputArrayRegister<'a, P> {
    slot: Slot<u8, 1>,
    inputs: &'a RefCell<P>,
}

impl<'a, P: DigitalInputArray> DigitalInputArrayRegister<'a, P> {
    /// Bind a register to an input array
    pub fn new(inputs: &'a RefCell<P>) -> Self {
        Self {
            slot: Slot::splat(0),
            inputs,
        }
    }
}

impl<P: DigitalInputArray> Register for DigitalInputArrayRegister<'_, P> {
    fn register_type(&self) -> RegisterType {
        RegisterType::U8
    }

    fn len(&self) -> usize {
        1
    }

    fn read(&mut self, ty: RegisterType) -> Result<Values, RegisterError> {
        self.slot.check_type(ty)?;
        let state = self.inputs.borrow_mut().state()?;
        self.slot.refresh([state]);
        Ok(self.slot.values())
    }

    fn write(&mut self, ty: RegisterType, payload: &[Value]) -> Result<(), RegisterError> {
        self.slot.commit(ty, payload, accept)?;
        Ok(())
    }
}

/// Action an output register applies to its masked pins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputAction {
    /// Masked pins go high
    Set,
    /// Masked pins go low
    Clear,
    /// Masked pins invert
    Toggle,
}

/// Bitmask write register for a digital output array
///
/// The peripheral holds the canonical pin state. The cached value is the
/// last mask written, kept for read-back only.
pub struct DigitalOutputArrayRegister<'a, P> {
    slot: Slot<u8, 1>,
    outputs: &'a RefCell<P>,
    action: OutputAction,
}

impl<'a, P: DigitalOutputArray> DigitalOutputArrayRegister<'a, P> {
    /// Bind a register to an output array
    ///
    /// Drives every output low so the device starts from a known state.
    pub fn new(outputs: &'a RefCell<P>, action: OutputAction) -> Result<Self, PeripheralError> {
        outputs.borrow_mut().clear_all()?;
        Ok(Self {
            slot: Slot::splat(0),
            outputs,
            action,
        })
    }

    /// Register whose writes set the masked outputs
    pub fn set(outputs: &'a RefCell<P>) -> Result<Self, PeripheralError> {
        Self::new(outputs, OutputAction::Set)
    }

    /// Register whose writes clear the masked outputs
    pub fn clear(outputs: &'a RefCell<P>) -> Result<Self, PeripheralError> {
        Self::new(outputs, OutputAction::Clear)
    }

    /// Register whose writes toggle the masked outputs
    pub fn toggle(outputs: &'a RefCell<P>) -> Result<Self, PeripheralError> {
        Self::new(outputs, OutputAction::Toggle)
    }

    /// Action applied on write
    pub fn action(&self) -> OutputAction {
        self.action
    }
}

impl<P: DigitalOutputArray> Register for DigitalOutputArrayRegister<'_, P> {
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
        let [mask] = self.slot.commit(ty, payload, accept)?;

        let mut outputs = self.outputs.borrow_mut();
        match self.action {
            OutputAction::Set => outputs.set_state(mask)?,
            OutputAction::Clear => outputs.clear_state(mask)?,
            OutputAction::Toggle => outputs.toggle_state(mask)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockInputs, MockOutputs, OutputCall};

    #[test]
    fn test_input_read_is_live() {
        let inputs = RefCell::new(MockInputs {
            state: 0b1001,
            fail: false,
        });
        let mut reg = DigitalInputArrayRegister::new(&inputs);

        let values = reg.read(RegisterType::U8).unwrap();
        assert_eq!(values.as_slice(), &[Value::U8(0b1001)]);

        // Pins change underneath the register
        inputs.borrow_mut().state = 0b0110;
        let values = reg.read(RegisterType::U8).unwrap();
        assert_eq!(values.as_slice(), &[Value::U8(0b0110)]);
    }

    #[test]
    fn test_input_read_ignores_written_cache() {
        let inputs = RefCell::new(MockInputs {
            state: 0x0F,
            fail: false,
        });
        let mut reg = DigitalInputArrayRegister::new(&inputs);

        reg.write(RegisterType::U8, &[Value::U8(0xF0)]).unwrap();
        let values = reg.read(RegisterType::U8).unwrap();
        assert_eq!(values.as_slice(), &[Value::U8(0x0F)]);
    }

    #[test]
    fn test_input_read_type_mismatch() {
        let inputs = RefCell::new(MockInputs::default());
        let mut reg = DigitalInputArrayRegister::new(&inputs);
        assert!(matches!(
            reg.read(RegisterType::U16),
            Err(RegisterError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_input_peripheral_error_propagates() {
        let inputs = RefCell::new(MockInputs {
            state: 0,
            fail: true,
        });
        let mut reg = DigitalInputArrayRegister::new(&inputs);
        assert_eq!(
            reg.read(RegisterType::U8),
            Err(RegisterError::Peripheral(PeripheralError::Pin))
        );
    }

    #[test]
    fn test_output_construction_clears_all() {
        let outputs = RefCell::new(MockOutputs::with_state(0xFF));
        let _reg = DigitalOutputArrayRegister::set(&outputs).unwrap();

        let outputs = outputs.borrow();
        assert_eq!(outputs.state, 0);
        assert_eq!(outputs.calls.as_slice(), &[OutputCall::Clear(0xFF)]);
    }

    #[test]
    fn test_set_register() {
        let outputs = RefCell::new(MockOutputs::default());
        let mut reg = DigitalOutputArrayRegister::set(&outputs).unwrap();
        outputs.borrow_mut().state = 0b1010;
        outputs.borrow_mut().calls.clear();

        reg.write(RegisterType::U8, &[Value::U8(0b0101)]).unwrap();

        let out = outputs.borrow();
        assert_eq!(out.calls.as_slice(), &[OutputCall::Set(0b0101)]);
        assert_eq!(out.state, 0b1111);
        drop(out);

        let values = reg.read(RegisterType::U8).unwrap();
        assert_eq!(values.as_slice(), &[Value::U8(0b0101)]);
    }

    #[test]
    fn test_clear_register() {
        let outputs = RefCell::new(MockOutputs::default());
        let mut reg = DigitalOutputArrayRegister::clear(&outputs).unwrap();
        outputs.borrow_mut().state = 0b1110;
        outputs.borrow_mut().calls.clear();

        reg.write(RegisterType::U8, &[Value::U8(0b0110)]).unwrap();

        let out = outputs.borrow();
        assert_eq!(out.calls.as_slice(), &[OutputCall::Clear(0b0110)]);
        assert_eq!(out.state, 0b1000);
    }

    #[test]
    fn test_toggle_register() {
        let outputs = RefCell::new(MockOutputs::default());
        let mut reg = DigitalOutputArrayRegister::toggle(&outputs).unwrap();
        outputs.borrow_mut().state = 0b1010;
        outputs.borrow_mut().calls.clear();

        reg.write(RegisterType::U8, &[Value::U8(0b0011)]).unwrap();
        assert_eq!(outputs.borrow().state, 0b1001);

        reg.write(RegisterType::U8, &[Value::U8(0b0011)]).unwrap();
        assert_eq!(outputs.borrow().state, 0b1010);

        assert_eq!(
            outputs.borrow().calls.as_slice(),
            &[OutputCall::Toggle(0b0011), OutputCall::Toggle(0b0011)]
        );
    }

    #[test]
    fn test_output_rejected_write_skips_peripheral() {
        let outputs = RefCell::new(MockOutputs::default());
        let mut reg = DigitalOutputArrayRegister::set(&outputs).unwrap();
        outputs.borrow_mut().calls.clear();

        assert!(reg.write(RegisterType::U16, &[Value::U16(1)]).is_err());
        assert!(reg
            .write(RegisterType::U8, &[Value::U8(1), Value::U8(2)])
            .is_err());
        assert!(outputs.borrow().calls.is_empty());
        assert_eq!(reg.read(RegisterType::U8).unwrap().as_slice(), &[Value::U8(0)]);
    }

    #[test]
    fn test_registers_share_outputs() {
        let outputs = RefCell::new(MockOutputs::default());
        let mut set = DigitalOutputArrayRegister::set(&outputs).unwrap();
        let mut clear = DigitalOutputArrayRegister::clear(&outputs).unwrap();

        set.write(RegisterType::U8, &[Value::U8(0xF0)]).unwrap();
        clear.write(RegisterType::U8, &[Value::U8(0x30)]).unwrap();

        assert_eq!(outputs.borrow().state, 0xC0);
        assert_eq!(set.action(), OutputAction::Set);
        assert_eq!(clear.action(), OutputAction::Clear);
    }
}
