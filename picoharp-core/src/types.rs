//! Typed register values
//!
//! Harp registers carry one of a fixed set of numeric types. Each type has
//! a one-byte code on the wire:
//!
//! ```text
//! ┌────────┬───────┬──────────┬─────────────┐
//! │ bit 7  │ bit 6 │ bits 5-4 │ bits 3-0    │
//! │ signed │ float │ reserved │ width bytes │
//! └────────┴───────┴──────────┴─────────────┘
//! ```
//!
//! Element payloads are little-endian.

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum number of elements a register may hold
pub const MAX_ELEMENTS: usize = 8;

/// Maximum encoded payload size (MAX_ELEMENTS of the widest type)
pub const MAX_PAYLOAD_SIZE: usize = MAX_ELEMENTS * 8;

/// Bounded sequence of register elements
pub type Values = Vec<Value, MAX_ELEMENTS>;

const SIGNED_FLAG: u8 = 0x80;
const FLOAT_FLAG: u8 = 0x40;
const WIDTH_MASK: u8 = 0x0F;

/// Register data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RegisterType {
    U8,
    U16,
    U32,
    U64,
    S8,
    S16,
    S32,
    S64,
    Float,
    Double,
}

impl RegisterType {
    /// Every supported type, in code order
    pub const ALL: [RegisterType; 10] = [
        RegisterType::U8,
        RegisterType::U16,
        RegisterType::U32,
        RegisterType::U64,
        RegisterType::S8,
        RegisterType::S16,
        RegisterType::S32,
        RegisterType::S64,
        RegisterType::Float,
        RegisterType::Double,
    ];

    /// Wire code for this type
    pub const fn code(self) -> u8 {
        match self {
            RegisterType::U8 => 0x01,
            RegisterType::U16 => 0x02,
            RegisterType::U32 => 0x04,
            RegisterType::U64 => 0x08,
            RegisterType::S8 => SIGNED_FLAG | 0x01,
            RegisterType::S16 => SIGNED_FLAG | 0x02,
            RegisterType::S32 => SIGNED_FLAG | 0x04,
            RegisterType::S64 => SIGNED_FLAG | 0x08,
            RegisterType::Float => FLOAT_FLAG | 0x04,
            RegisterType::Double => FLOAT_FLAG | 0x08,
        }
    }

    /// Look up a type from its wire code
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|ty| ty.code() == code)
    }

    /// Width of one element in bytes
    pub const fn width(self) -> usize {
        (self.code() & WIDTH_MASK) as usize
    }

    /// Check if this is a signed integer type
    pub const fn is_signed(self) -> bool {
        self.code() & SIGNED_FLAG != 0
    }

    /// Check if this is a floating point type
    pub const fn is_float(self) -> bool {
        self.code() & FLOAT_FLAG != 0
    }
}

/// Errors from encoding or decoding element payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Byte count does not match the element width
    MalformedPayload,
    /// More elements than a register can hold
    TooManyElements,
    /// Output buffer too small for encoding
    BufferTooSmall,
}

/// A single typed register element
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value {
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    S8(i8),
    S16(i16),
    S32(i32),
    S64(i64),
    Float(f32),
    Double(f64),
}

fn le_array<const W: usize>(bytes: &[u8]) -> Result<[u8; W], CodecError> {
    bytes.try_into().map_err(|_| CodecError::MalformedPayload)
}

impl Value {
    /// Type tag of this element
    pub const fn register_type(&self) -> RegisterType {
        match self {
            Value::U8(_) => RegisterType::U8,
            Value::U16(_) => RegisterType::U16,
            Value::U32(_) => RegisterType::U32,
            Value::U64(_) => RegisterType::U64,
            Value::S8(_) => RegisterType::S8,
            Value::S16(_) => RegisterType::S16,
            Value::S32(_) => RegisterType::S32,
            Value::S64(_) => RegisterType::S64,
            Value::Float(_) => RegisterType::Float,
            Value::Double(_) => RegisterType::Double,
        }
    }

    /// Encode into the start of `buf`
    ///
    /// Returns the number of bytes written.
    pub fn encode_le(&self, buf: &mut [u8]) -> Result<usize, CodecError> {
        let width = self.register_type().width();
        let dst = buf.get_mut(..width).ok_or(CodecError::BufferTooSmall)?;
        match *self {
            Value::U8(v) => dst.copy_from_slice(&v.to_le_bytes()),
            Value::U16(v) => dst.copy_from_slice(&v.to_le_bytes()),
            Value::U32(v) => dst.copy_from_slice(&v.to_le_bytes()),
            Value::U64(v) => dst.copy_from_slice(&v.to_le_bytes()),
            Value::S8(v) => dst.copy_from_slice(&v.to_le_bytes()),
            Value::S16(v) => dst.copy_from_slice(&v.to_le_bytes()),
            Value::S32(v) => dst.copy_from_slice(&v.to_le_bytes()),
            Value::S64(v) => dst.copy_from_slice(&v.to_le_bytes()),
            Value::Float(v) => dst.copy_from_slice(&v.to_le_bytes()),
            Value::Double(v) => dst.copy_from_slice(&v.to_le_bytes()),
        }
        Ok(width)
    }

    /// Decode exactly one element of type `ty`
    pub fn decode_le(ty: RegisterType, bytes: &[u8]) -> Result<Self, CodecError> {
        Ok(match ty {
            RegisterType::U8 => Value::U8(u8::from_le_bytes(le_array(bytes)?)),
            RegisterType::U16 => Value::U16(u16::from_le_bytes(le_array(bytes)?)),
            RegisterType::U32 => Value::U32(u32::from_le_bytes(le_array(bytes)?)),
            RegisterType::U64 => Value::U64(u64::from_le_bytes(le_array(bytes)?)),
            RegisterType::S8 => Value::S8(i8::from_le_bytes(le_array(bytes)?)),
            RegisterType::S16 => Value::S16(i16::from_le_bytes(le_array(bytes)?)),
            RegisterType::S32 => Value::S32(i32::from_le_bytes(le_array(bytes)?)),
            RegisterType::S64 => Value::S64(i64::from_le_bytes(le_array(bytes)?)),
            RegisterType::Float => Value::Float(f32::from_le_bytes(le_array(bytes)?)),
            RegisterType::Double => Value::Double(f64::from_le_bytes(le_array(bytes)?)),
        })
    }
}

/// Split a raw payload into elements of type `ty`
pub fn decode_payload(ty: RegisterType, bytes: &[u8]) -> Result<Values, CodecError> {
    let width = ty.width();
    if bytes.len() % width != 0 {
        return Err(CodecError::MalformedPayload);
    }

    let mut values = Values::new();
    for chunk in bytes.chunks_exact(width) {
        values
            .push(Value::decode_le(ty, chunk)?)
            .map_err(|_| CodecError::TooManyElements)?;
    }
    Ok(values)
}

/// Encode a sequence of elements back to back into `buf`
///
/// Returns the number of bytes written.
pub fn encode_values(values: &[Value], buf: &mut [u8]) -> Result<usize, CodecError> {
    let mut offset = 0;
    for value in values {
        let rest = buf.get_mut(offset..).ok_or(CodecError::BufferTooSmall)?;
        offset += value.encode_le(rest)?;
    }
    Ok(offset)
}

mod sealed {
    pub trait Sealed {}
}

/// Rust primitive that can be stored in a register
///
/// Implemented for every primitive with a [`RegisterType`] counterpart.
pub trait Element: Copy + PartialEq + sealed::Sealed {
    /// Register type this primitive maps to
    const TYPE: RegisterType;

    /// Zero value
    const ZERO: Self;

    /// Wrap into a tagged [`Value`]
    fn into_value(self) -> Value;

    /// Unwrap from a tagged [`Value`], if the tag matches
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_element {
    ($($ty:ty => $variant:ident, $zero:expr;)*) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Element for $ty {
                const TYPE: RegisterType = RegisterType::$variant;
                const ZERO: Self = $zero;

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_element! {
    u8 => U8, 0;
    u16 => U16, 0;
    u32 => U32, 0;
    u64 => U64, 0;
    i8 => S8, 0;
    i16 => S16, 0;
    i32 => S32, 0;
    i64 => S64, 0;
    f32 => Float, 0.0;
    f64 => Double, 0.0;
}
