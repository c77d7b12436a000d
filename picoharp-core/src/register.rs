//! Register contract
//!
//! A register is one addressable, typed slot on the Harp bus. Its type and
//! element count are fixed at construction. Every write follows the same
//! order:
//!
//! 1. type and length check
//! 2. domain validation
//! 3. store into the cached value
//! 4. invoke the peripheral action
//!
//! Steps 1 and 2 happen strictly before any mutation, so a rejected write
//! leaves both the cached value and the peripheral untouched. Step 3
//! precedes step 4 so a read issued right after a write observes the new
//! value even if the peripheral is slow.

use picoharp_hal::PeripheralError;

use crate::types::{Element, RegisterType, Value, Values, MAX_ELEMENTS};

/// Errors returned by register operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegisterError {
    /// Requested type differs from the register's fixed type
    TypeMismatch {
        expected: RegisterType,
        requested: RegisterType,
    },
    /// Payload element count differs from the register's length
    LengthMismatch { expected: usize, actual: usize },
    /// Value outside the register's accepted domain
    InvalidValue,
    /// Register does not accept writes
    ReadOnly,
    /// Backing peripheral reported a failure
    Peripheral(PeripheralError),
}

impl From<PeripheralError> for RegisterError {
    fn from(e: PeripheralError) -> Self {
        RegisterError::Peripheral(e)
    }
}

/// Bus access allowed on a register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// Bus-facing register interface
pub trait Register {
    /// Fixed element type
    fn register_type(&self) -> RegisterType;

    /// Fixed element count
    fn len(&self) -> usize;

    /// Check if the register holds no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Access allowed from the bus
    fn access(&self) -> Access {
        Access::ReadWrite
    }

    /// Read the register contents
    ///
    /// Fails with [`RegisterError::TypeMismatch`] if `ty` is not the
    /// register's type. Takes `&mut self` because live-sampling registers
    /// refresh their cached value from the peripheral.
    fn read(&mut self, ty: RegisterType) -> Result<Values, RegisterError>;

    /// Write the register contents
    ///
    /// Either fully applied or fully rejected; see the module docs for
    /// the order of checks.
    fn write(&mut self, ty: RegisterType, payload: &[Value]) -> Result<(), RegisterError>;
}

/// Validation hook that accepts every value
pub fn accept<T>(_: &T) -> Result<(), RegisterError> {
    Ok(())
}

/// Cached register storage shared by every register variant
///
/// Owns the `[T; N]` value and enforces the check-validate-store order.
/// Callers invoke their peripheral action with the elements returned by
/// [`Slot::commit`].
#[derive(Debug, Clone)]
pub struct Slot<T, const N: usize> {
    value: [T; N],
}

impl<T: Element, const N: usize> Slot<T, N> {
    const FITS: () = assert!(N <= MAX_ELEMENTS, "register exceeds MAX_ELEMENTS");

    /// Create a slot holding `initial`
    pub fn new(initial: [T; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::FITS;
        Self { value: initial }
    }

    /// Create a slot with every element set to `initial`
    pub fn splat(initial: T) -> Self {
        Self::new([initial; N])
    }

    /// Current cached value
    pub fn value(&self) -> &[T; N] {
        &self.value
    }

    /// Fail unless `ty` is this slot's type
    pub fn check_type(&self, ty: RegisterType) -> Result<(), RegisterError> {
        if ty != T::TYPE {
            return Err(RegisterError::TypeMismatch {
                expected: T::TYPE,
                requested: ty,
            });
        }
        Ok(())
    }

    /// Cached value as tagged elements
    pub fn values(&self) -> Values {
        let mut values = Values::new();
        for element in &self.value {
            // Cannot fail: N <= MAX_ELEMENTS is checked at construction
            let _ = values.push(element.into_value());
        }
        values
    }

    /// Type-checked read of the cached value
    pub fn read(&self, ty: RegisterType) -> Result<Values, RegisterError> {
        self.check_type(ty)?;
        Ok(self.values())
    }

    /// Replace the cached value with a fresh peripheral sample
    pub fn refresh(&mut self, value: [T; N]) {
        self.value = value;
    }

    /// Type and length check a payload without storing it
    pub fn decode(&self, ty: RegisterType, payload: &[Value]) -> Result<[T; N], RegisterError> {
        self.check_type(ty)?;
        if payload.len() != N {
            return Err(RegisterError::LengthMismatch {
                expected: N,
                actual: payload.len(),
            });
        }

        let mut decoded = self.value;
        for (slot, value) in decoded.iter_mut().zip(payload) {
            *slot = T::from_value(*value).ok_or(RegisterError::TypeMismatch {
                expected: T::TYPE,
                requested: value.register_type(),
            })?;
        }
        Ok(decoded)
    }

    /// Check, validate, then store a payload
    ///
    /// Returns the stored elements so the caller can drive its peripheral.
    /// Nothing is stored if any check or `validate` fails.
    pub fn commit<F>(
        &mut self,
        ty: RegisterType,
        payload: &[Value],
        validate: F,
    ) -> Result<[T; N], RegisterError>
    where
        F: FnOnce(&[T; N]) -> Result<(), RegisterError>,
    {
        let decoded = self.decode(ty, payload)?;
        validate(&decoded)?;
        self.value = decoded;
        Ok(decoded)
    }
}

/// Plain register with no backing peripheral
///
/// Reads return the cached value and writes only store it.
#[derive(Debug, Clone)]
pub struct MemoryRegister<T, const N: usize> {
    slot: Slot<T, N>,
}

impl<T: Element, const N: usize> MemoryRegister<T, N> {
    /// Create a register holding `initial`
    pub fn new(initial: [T; N]) -> Self {
        Self {
            slot: Slot::new(initial),
        }
    }

    /// Current cached value
    pub fn value(&self) -> &[T; N] {
        self.slot.value()
    }
}

impl<T: Element, const N: usize> Default for MemoryRegister<T, N> {
    fn default() -> Self {
        Self::new([T::ZERO; N])
    }
}

impl<T: Element, const N: usize> Register for MemoryRegister<T, N> {
    fn register_type(&self) -> RegisterType {
        T::TYPE
    }

    fn len(&self) -> usize {
        N
    }

    fn read(&mut self, ty: RegisterType) -> Result<Values, RegisterError> {
        self.slot.read(ty)
    }

    fn write(&mut self, ty: RegisterType, payload: &[Value]) -> Result<(), RegisterError> {
        self.slot.commit(ty, payload, accept)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_register_defaults() {
        let mut reg = MemoryRegister::<u16, 3>::default();
        assert_eq!(reg.register_type(), RegisterType::U16);
        assert_eq!(reg.len(), 3);
        assert!(!reg.is_empty());
        assert_eq!(reg.access(), Access::ReadWrite);

        let values = reg.read(RegisterType::U16).unwrap();
        assert_eq!(
            values.as_slice(),
            &[Value::U16(0), Value::U16(0), Value::U16(0)]
        );
    }

    #[test]
    fn test_write_then_read_back() {
        let mut reg = MemoryRegister::<i32, 2>::default();
        reg.write(RegisterType::S32, &[Value::S32(-5), Value::S32(7)])
            .unwrap();
        assert_eq!(reg.value(), &[-5, 7]);

        let values = reg.read(RegisterType::S32).unwrap();
        assert_eq!(values.as_slice(), &[Value::S32(-5), Value::S32(7)]);
    }

    #[test]
    fn test_read_type_mismatch() {
        let mut reg = MemoryRegister::new([42u8]);
        assert_eq!(
            reg.read(RegisterType::U16),
            Err(RegisterError::TypeMismatch {
                expected: RegisterType::U8,
                requested: RegisterType::U16,
            })
        );
        assert_eq!(reg.value(), &[42]);
    }

    #[test]
    fn test_write_type_mismatch_leaves_value() {
        let mut reg = MemoryRegister::new([42u8]);
        let result = reg.write(RegisterType::S8, &[Value::S8(1)]);
        assert!(matches!(result, Err(RegisterError::TypeMismatch { .. })));
        assert_eq!(reg.value(), &[42]);
    }

    #[test]
    fn test_write_length_mismatch() {
        let mut reg = MemoryRegister::<u8, 2>::default();
        assert_eq!(
            reg.write(RegisterType::U8, &[Value::U8(1)]),
            Err(RegisterError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!(
            reg.write(
                RegisterType::U8,
                &[Value::U8(1), Value::U8(2), Value::U8(3)]
            ),
            Err(RegisterError::LengthMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(reg.value(), &[0, 0]);
    }

    #[test]
    fn test_mixed_element_tags_rejected() {
        // Declared type matches but one element carries a different tag
        let mut reg = MemoryRegister::<u8, 2>::default();
        let result = reg.write(RegisterType::U8, &[Value::U8(1), Value::U16(2)]);
        assert_eq!(
            result,
            Err(RegisterError::TypeMismatch {
                expected: RegisterType::U8,
                requested: RegisterType::U16,
            })
        );
        assert_eq!(reg.value(), &[0, 0]);
    }

    #[test]
    fn test_commit_validation_is_all_or_nothing() {
        let mut slot = Slot::new([10u16, 20]);
        let result = slot.commit(RegisterType::U16, &[Value::U16(1), Value::U16(99)], |v| {
            if v.iter().any(|x| *x > 50) {
                Err(RegisterError::InvalidValue)
            } else {
                Ok(())
            }
        });
        assert_eq!(result, Err(RegisterError::InvalidValue));
        assert_eq!(slot.value(), &[10, 20]);

        let stored = slot
            .commit(RegisterType::U16, &[Value::U16(1), Value::U16(2)], accept)
            .unwrap();
        assert_eq!(stored, [1, 2]);
        assert_eq!(slot.value(), &[1, 2]);
    }

    #[test]
    fn test_float_register() {
        let mut reg = MemoryRegister::<f32, 1>::default();
        reg.write(RegisterType::Float, &[Value::Float(1.5)]).unwrap();
        assert_eq!(
            reg.read(RegisterType::Float).unwrap().as_slice(),
            &[Value::Float(1.5)]
        );
    }
}
